use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    currency::{format_percent, CurrencyFormatter, DateFormatter},
    domain::{CategoryCatalog, DateZone, Session, TransactionRecord, YearMonth},
    storage::{self, KeyValueStore},
};

use super::{
    summary_service::{AmountPolicy, SummaryService},
    ServiceResult,
};

/// Month currently shown on the summary screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSelector {
    selected: YearMonth,
}

impl MonthSelector {
    pub fn new(selected: YearMonth) -> Self {
        Self { selected }
    }

    pub fn starting_at(today: NaiveDate) -> Self {
        Self::new(YearMonth::of(today))
    }

    pub fn selected(&self) -> YearMonth {
        self.selected
    }

    pub fn next(&mut self) -> YearMonth {
        self.selected = self.selected.next();
        self.selected
    }

    pub fn previous(&mut self) -> YearMonth {
        self.selected = self.selected.previous();
        self.selected
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryRow {
    pub key: String,
    pub name: String,
    pub color: String,
    pub total: f64,
    pub total_formatted: String,
    pub percent: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResumeView {
    pub month: YearMonth,
    pub month_label: String,
    pub categories: Vec<CategoryRow>,
    pub outgoing_total: String,
    pub skipped_records: usize,
}

pub struct ResumeService;

impl ResumeService {
    pub fn load<F>(
        store: &dyn KeyValueStore,
        session: &Session,
        zone: DateZone,
        catalog: &CategoryCatalog,
        month: YearMonth,
        formatter: &F,
        policy: AmountPolicy,
    ) -> ServiceResult<ResumeView>
    where
        F: CurrencyFormatter + DateFormatter + ?Sized,
    {
        let key = session.transactions_key();
        let records = storage::load_transactions(store, &key, zone)?;
        tracing::debug!(key = %key, %month, count = records.len(), "resume records loaded");
        Self::build(&records, catalog, month, formatter, policy)
    }

    pub fn build<F>(
        records: &[TransactionRecord],
        catalog: &CategoryCatalog,
        month: YearMonth,
        formatter: &F,
        policy: AmountPolicy,
    ) -> ServiceResult<ResumeView>
    where
        F: CurrencyFormatter + DateFormatter + ?Sized,
    {
        let breakdown =
            SummaryService::compute_category_breakdown(records, catalog, Some(month), policy)?;
        let categories = breakdown
            .categories
            .iter()
            .map(|summary| CategoryRow {
                key: summary.category_key.clone(),
                name: summary.display_name.clone(),
                color: summary.display_color.clone(),
                total: summary.total,
                total_formatted: formatter.format_amount(summary.total),
                percent: format_percent(summary.percent_of_total_outgoing),
            })
            .collect();
        Ok(ResumeView {
            month,
            month_label: formatter.format_month(month),
            categories,
            outgoing_total: formatter.format_amount(breakdown.outgoing_total),
            skipped_records: breakdown.skipped_records,
        })
    }
}
