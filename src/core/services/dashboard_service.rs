use serde::Serialize;

use crate::{
    currency::{CurrencyFormatter, DateFormatter, Language},
    domain::{DateZone, Direction, Session, TransactionRecord},
    storage::{self, KeyValueStore},
};

use super::{
    summary_service::{AmountPolicy, Highlights, SummaryService},
    ServiceResult,
};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum HighlightKind {
    Up,
    Down,
    Total,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HighlightCard {
    pub kind: HighlightKind,
    pub title: String,
    pub amount: String,
    pub last_transaction: Option<String>,
}

/// One row of the dashboard listing, already formatted for display.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TransactionItem {
    pub id: String,
    pub name: String,
    pub amount: String,
    pub direction: Direction,
    pub category: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardView {
    pub user_name: String,
    pub transactions: Vec<TransactionItem>,
    pub entries: HighlightCard,
    pub expenses: HighlightCard,
    pub total: HighlightCard,
    pub highlights: Highlights,
}

pub struct DashboardService;

impl DashboardService {
    /// Reads the session user's transactions and builds the dashboard.
    pub fn load<F>(
        store: &dyn KeyValueStore,
        session: &Session,
        zone: DateZone,
        formatter: &F,
        policy: AmountPolicy,
    ) -> ServiceResult<DashboardView>
    where
        F: CurrencyFormatter + DateFormatter + ?Sized,
    {
        let key = session.transactions_key();
        let records = storage::load_transactions(store, &key, zone)?;
        tracing::debug!(key = %key, count = records.len(), "dashboard records loaded");
        Self::build(&records, session, formatter, policy)
    }

    pub fn build<F>(
        records: &[TransactionRecord],
        session: &Session,
        formatter: &F,
        policy: AmountPolicy,
    ) -> ServiceResult<DashboardView>
    where
        F: CurrencyFormatter + DateFormatter + ?Sized,
    {
        let highlights = SummaryService::compute_highlights(records, policy)?;
        let transactions = records
            .iter()
            .filter_map(|record| {
                // Skipped records were already validated away by the highlights pass.
                let amount = record.parsed_amount().ok()?;
                Some(TransactionItem {
                    id: record.id.clone(),
                    name: record.name.clone(),
                    amount: formatter.format_amount(amount),
                    direction: record.direction,
                    category: record.category.clone(),
                    date: formatter.format_date(record.date),
                })
            })
            .collect();
        let labels = CardLabels::for_language(formatter.language());

        Ok(DashboardView {
            user_name: session.user.name.clone(),
            transactions,
            entries: HighlightCard {
                kind: HighlightKind::Up,
                title: labels.entries.into(),
                amount: formatter.format_amount(highlights.incoming_total),
                last_transaction: highlights
                    .last_incoming
                    .map(|date| format!("{} {}", labels.last_entry, formatter.format_day_month(date))),
            },
            expenses: HighlightCard {
                kind: HighlightKind::Down,
                title: labels.expenses.into(),
                amount: formatter.format_amount(highlights.outgoing_total),
                last_transaction: highlights
                    .last_outgoing
                    .map(|date| format!("{} {}", labels.last_expense, formatter.format_day_month(date))),
            },
            total: HighlightCard {
                kind: HighlightKind::Total,
                title: labels.total.into(),
                amount: formatter.format_amount(highlights.net_total),
                last_transaction: highlights
                    .interval
                    .map(|(start, end)| formatter.format_interval(start, end)),
            },
            highlights,
        })
    }
}

struct CardLabels {
    entries: &'static str,
    expenses: &'static str,
    total: &'static str,
    last_entry: &'static str,
    last_expense: &'static str,
}

impl CardLabels {
    fn for_language(language: Language) -> Self {
        match language {
            Language::Portuguese => Self {
                entries: "Entradas",
                expenses: "Saídas",
                total: "Total",
                last_entry: "Última entrada dia",
                last_expense: "Última saída dia",
            },
            Language::English => Self {
                entries: "Income",
                expenses: "Expenses",
                total: "Total",
                last_entry: "Last income on",
                last_expense: "Last expense on",
            },
        }
    }
}
