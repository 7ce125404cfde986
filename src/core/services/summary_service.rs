//! Aggregation of transaction records into highlight totals and category breakdowns.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{CategoryCatalog, Direction, TransactionRecord, YearMonth},
    errors::FinanceError,
};

use super::ServiceResult;

/// What to do with a stored record that cannot be counted: an amount that does
/// not parse, or (in the breakdown) a category missing from the catalog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AmountPolicy {
    /// Fail the whole computation.
    #[default]
    Reject,
    /// Leave the record out, log a warning, and report it in `skipped_records`.
    SkipAndCount,
}

/// Incoming, outgoing, and net totals shown on the dashboard.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct Highlights {
    pub incoming_total: f64,
    pub outgoing_total: f64,
    pub net_total: f64,
    pub last_incoming: Option<NaiveDate>,
    pub last_outgoing: Option<NaiveDate>,
    /// Earliest and latest date across the counted records.
    pub interval: Option<(NaiveDate, NaiveDate)>,
    pub skipped_records: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategorySummary {
    pub category_key: String,
    pub display_name: String,
    pub display_color: String,
    pub total: f64,
    pub percent_of_total_outgoing: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct CategoryBreakdown {
    pub month: Option<YearMonth>,
    /// Sum of the counted outgoing records; equals the sum of `categories`.
    pub outgoing_total: f64,
    /// In catalog order; only categories with positive spend.
    pub categories: Vec<CategorySummary>,
    pub skipped_records: usize,
}

impl CategoryBreakdown {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

pub struct SummaryService;

impl SummaryService {
    pub fn compute_highlights(
        records: &[TransactionRecord],
        policy: AmountPolicy,
    ) -> ServiceResult<Highlights> {
        let (valued, skipped_records) = valued_records(records, policy)?;
        let mut highlights = Highlights {
            skipped_records,
            ..Highlights::default()
        };
        for (record, amount) in &valued {
            match record.direction {
                Direction::Incoming => highlights.incoming_total += amount,
                Direction::Outgoing => highlights.outgoing_total += amount,
            }
        }
        ensure_finite("incoming total", highlights.incoming_total)?;
        ensure_finite("outgoing total", highlights.outgoing_total)?;
        highlights.net_total =
            ensure_finite("net total", highlights.incoming_total - highlights.outgoing_total)?;

        let counted: Vec<&TransactionRecord> = valued.iter().map(|(record, _)| *record).collect();
        highlights.last_incoming = latest_date(&counted, Direction::Incoming);
        highlights.last_outgoing = latest_date(&counted, Direction::Outgoing);
        highlights.interval = date_span(&counted);
        Ok(highlights)
    }

    pub fn compute_category_breakdown(
        records: &[TransactionRecord],
        catalog: &CategoryCatalog,
        month: Option<YearMonth>,
        policy: AmountPolicy,
    ) -> ServiceResult<CategoryBreakdown> {
        let selected: Vec<TransactionRecord> = records
            .iter()
            .filter(|record| record.is_outgoing())
            .filter(|record| month.map_or(true, |m| m.contains(record.date)))
            .cloned()
            .collect();
        let (valued, mut skipped_records) = valued_records(&selected, policy)?;

        let mut catalogued = Vec::with_capacity(valued.len());
        for (record, amount) in valued {
            if catalog.contains(&record.category) {
                catalogued.push((record, amount));
                continue;
            }
            match policy {
                AmountPolicy::Reject => {
                    return Err(FinanceError::UnknownCategory {
                        id: record.id.clone(),
                        category: record.category.clone(),
                    })
                }
                AmountPolicy::SkipAndCount => {
                    tracing::warn!(
                        id = %record.id,
                        category = %record.category,
                        "skipping transaction with unknown category"
                    );
                    skipped_records += 1;
                }
            }
        }

        let outgoing_total = ensure_finite(
            "outgoing total",
            catalogued.iter().map(|(_, amount)| amount).sum(),
        )?;
        let mut breakdown = CategoryBreakdown {
            month,
            outgoing_total,
            categories: Vec::new(),
            skipped_records,
        };
        if outgoing_total <= 0.0 {
            return Ok(breakdown);
        }

        for category in catalog.iter() {
            let sum: f64 = catalogued
                .iter()
                .filter(|(record, _)| record.category == category.key)
                .map(|(_, amount)| amount)
                .sum();
            if sum <= 0.0 {
                continue;
            }
            breakdown.categories.push(CategorySummary {
                category_key: category.key.clone(),
                display_name: category.name.clone(),
                display_color: category.color.clone(),
                total: sum,
                percent_of_total_outgoing: percent_of(sum, outgoing_total),
            });
        }
        Ok(breakdown)
    }
}

/// Latest date among records of the given direction.
pub fn last_transaction_date(
    records: &[TransactionRecord],
    direction: Direction,
) -> Option<NaiveDate> {
    let refs: Vec<&TransactionRecord> = records.iter().collect();
    latest_date(&refs, direction)
}

/// Earliest and latest date across all records.
pub fn transaction_interval(records: &[TransactionRecord]) -> Option<(NaiveDate, NaiveDate)> {
    let refs: Vec<&TransactionRecord> = records.iter().collect();
    date_span(&refs)
}

fn latest_date(records: &[&TransactionRecord], direction: Direction) -> Option<NaiveDate> {
    records
        .iter()
        .filter(|record| record.direction == direction)
        .map(|record| record.date)
        .max()
}

fn date_span(records: &[&TransactionRecord]) -> Option<(NaiveDate, NaiveDate)> {
    let start = records.iter().map(|record| record.date).min()?;
    let end = records.iter().map(|record| record.date).max()?;
    Some((start, end))
}

fn ensure_finite(total: &'static str, value: f64) -> ServiceResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        tracing::error!(total, value, "aggregate overflowed");
        Err(FinanceError::TotalOverflow { total, value })
    }
}

/// Caller guarantees `total > 0`.
fn percent_of(part: f64, total: f64) -> u32 {
    ((part / total) * 100.0).round().clamp(0.0, 100.0) as u32
}

fn valued_records(
    records: &[TransactionRecord],
    policy: AmountPolicy,
) -> ServiceResult<(Vec<(&TransactionRecord, f64)>, usize)> {
    let mut valued = Vec::with_capacity(records.len());
    let mut skipped = 0;
    for record in records {
        match record.parsed_amount() {
            Ok(amount) => valued.push((record, amount)),
            Err(err) => match policy {
                AmountPolicy::Reject => return Err(err),
                AmountPolicy::SkipAndCount => {
                    tracing::warn!(
                        id = %record.id,
                        amount = %record.amount,
                        "skipping transaction with invalid amount"
                    );
                    skipped += 1;
                }
            },
        }
    }
    Ok((valued, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(amount: &str, direction: Direction, category: &str, day: NaiveDate) -> TransactionRecord {
        TransactionRecord::new("t", amount, direction, category, day)
    }

    fn scenario() -> Vec<TransactionRecord> {
        vec![
            txn("100", Direction::Outgoing, "food", date(2024, 4, 1)),
            txn("50", Direction::Outgoing, "food", date(2024, 4, 10)),
            txn("200", Direction::Incoming, "salary", date(2024, 4, 5)),
        ]
    }

    #[test]
    fn highlights_for_reference_scenario() {
        let highlights =
            SummaryService::compute_highlights(&scenario(), AmountPolicy::Reject).unwrap();
        assert_eq!(highlights.incoming_total, 200.0);
        assert_eq!(highlights.outgoing_total, 150.0);
        assert_eq!(highlights.net_total, 50.0);
        assert_eq!(highlights.last_incoming, Some(date(2024, 4, 5)));
        assert_eq!(highlights.last_outgoing, Some(date(2024, 4, 10)));
        assert_eq!(highlights.interval, Some((date(2024, 4, 1), date(2024, 4, 10))));
    }

    #[test]
    fn breakdown_for_reference_scenario() {
        let breakdown = SummaryService::compute_category_breakdown(
            &scenario(),
            &CategoryCatalog::default(),
            None,
            AmountPolicy::Reject,
        )
        .unwrap();
        assert_eq!(breakdown.categories.len(), 1);
        let food = &breakdown.categories[0];
        assert_eq!(food.category_key, "food");
        assert_eq!(food.total, 150.0);
        assert_eq!(food.percent_of_total_outgoing, 100);
    }

    #[test]
    fn empty_input_yields_zeroes_and_no_categories() {
        let highlights = SummaryService::compute_highlights(&[], AmountPolicy::Reject).unwrap();
        assert_eq!(highlights.incoming_total, 0.0);
        assert_eq!(highlights.outgoing_total, 0.0);
        assert_eq!(highlights.net_total, 0.0);
        assert_eq!(highlights.interval, None);

        let month = YearMonth::new(2024, 4).ok();
        let breakdown = SummaryService::compute_category_breakdown(
            &[],
            &CategoryCatalog::default(),
            month,
            AmountPolicy::Reject,
        )
        .unwrap();
        assert!(breakdown.is_empty());
        assert_eq!(breakdown.outgoing_total, 0.0);
    }

    #[test]
    fn zero_amount_month_does_not_divide() {
        let records = vec![txn("0", Direction::Outgoing, "food", date(2024, 4, 1))];
        let breakdown = SummaryService::compute_category_breakdown(
            &records,
            &CategoryCatalog::default(),
            None,
            AmountPolicy::Reject,
        )
        .unwrap();
        assert!(breakdown.is_empty());
    }

    #[test]
    fn month_filter_excludes_other_months() {
        let mut records = scenario();
        records.push(txn("900", Direction::Outgoing, "car", date(2024, 5, 2)));
        records.push(txn("300", Direction::Outgoing, "food", date(2023, 4, 2)));
        let april = YearMonth::new(2024, 4).unwrap();
        let breakdown = SummaryService::compute_category_breakdown(
            &records,
            &CategoryCatalog::default(),
            Some(april),
            AmountPolicy::Reject,
        )
        .unwrap();
        assert_eq!(breakdown.outgoing_total, 150.0);
        assert_eq!(breakdown.categories.len(), 1);
        assert_eq!(breakdown.categories[0].total, 150.0);
    }

    #[test]
    fn output_follows_catalog_order_and_suppresses_empty_categories() {
        let records = vec![
            txn("10", Direction::Outgoing, "studies", date(2024, 4, 1)),
            txn("30", Direction::Outgoing, "purchases", date(2024, 4, 1)),
            txn("60", Direction::Outgoing, "car", date(2024, 4, 1)),
            txn("500", Direction::Incoming, "food", date(2024, 4, 1)),
        ];
        let breakdown = SummaryService::compute_category_breakdown(
            &records,
            &CategoryCatalog::default(),
            None,
            AmountPolicy::Reject,
        )
        .unwrap();
        let keys: Vec<&str> = breakdown
            .categories
            .iter()
            .map(|c| c.category_key.as_str())
            .collect();
        assert_eq!(keys, vec!["purchases", "car", "studies"]);
        let percents: Vec<u32> = breakdown
            .categories
            .iter()
            .map(|c| c.percent_of_total_outgoing)
            .collect();
        assert_eq!(percents, vec![30, 60, 10]);
    }

    #[test]
    fn percentages_stay_within_rounding_slack() {
        let records = vec![
            txn("1", Direction::Outgoing, "food", date(2024, 4, 1)),
            txn("1", Direction::Outgoing, "car", date(2024, 4, 1)),
            txn("1", Direction::Outgoing, "leisure", date(2024, 4, 1)),
        ];
        let breakdown = SummaryService::compute_category_breakdown(
            &records,
            &CategoryCatalog::default(),
            None,
            AmountPolicy::Reject,
        )
        .unwrap();
        let sum: u32 = breakdown
            .categories
            .iter()
            .map(|c| c.percent_of_total_outgoing)
            .sum();
        let slack = breakdown.categories.len() as u32;
        assert!(sum + slack >= 100 && sum <= 100 + slack, "sum was {sum}");
        assert!(breakdown
            .categories
            .iter()
            .all(|c| c.percent_of_total_outgoing <= 100));
    }

    #[test]
    fn uncatalogued_spend_is_rejected_by_default() {
        let records = vec![
            txn("1", Direction::Outgoing, "food", date(2024, 4, 1)),
            txn("99", Direction::Outgoing, "travel", date(2024, 4, 1)),
        ];
        let err = SummaryService::compute_category_breakdown(
            &records,
            &CategoryCatalog::default(),
            None,
            AmountPolicy::Reject,
        )
        .expect_err("unknown category must fail");
        assert!(matches!(err, FinanceError::UnknownCategory { ref category, .. } if category == "travel"));
        assert!(err.is_data_integrity());
    }

    #[test]
    fn skip_policy_leaves_uncatalogued_spend_out_of_total() {
        let records = vec![
            txn("1", Direction::Outgoing, "food", date(2024, 4, 1)),
            txn("99", Direction::Outgoing, "travel", date(2024, 4, 1)),
            txn("10", Direction::Incoming, "bonus", date(2024, 4, 1)),
        ];
        let breakdown = SummaryService::compute_category_breakdown(
            &records,
            &CategoryCatalog::default(),
            None,
            AmountPolicy::SkipAndCount,
        )
        .unwrap();
        assert_eq!(breakdown.outgoing_total, 1.0);
        assert_eq!(breakdown.skipped_records, 1);
        assert_eq!(breakdown.categories.len(), 1);
        assert_eq!(breakdown.categories[0].percent_of_total_outgoing, 100);
    }

    #[test]
    fn overflowing_totals_fail_instead_of_reaching_screens() {
        let records = vec![
            txn("1e308", Direction::Incoming, "salary", date(2024, 4, 1)),
            txn("1e308", Direction::Incoming, "salary", date(2024, 4, 2)),
            txn("1e308", Direction::Outgoing, "food", date(2024, 4, 3)),
            txn("1e308", Direction::Outgoing, "food", date(2024, 4, 4)),
        ];
        for policy in [AmountPolicy::Reject, AmountPolicy::SkipAndCount] {
            let err = SummaryService::compute_highlights(&records, policy)
                .expect_err("overflowing highlights");
            assert!(matches!(err, FinanceError::TotalOverflow { .. }));
            assert!(err.is_data_integrity());

            let err = SummaryService::compute_category_breakdown(
                &records,
                &CategoryCatalog::default(),
                None,
                policy,
            )
            .expect_err("overflowing breakdown");
            assert!(matches!(err, FinanceError::TotalOverflow { total, .. } if total == "outgoing total"));
        }
    }

    #[test]
    fn large_but_finite_totals_still_aggregate() {
        let records = vec![
            txn("1e307", Direction::Outgoing, "food", date(2024, 4, 1)),
            txn("1e307", Direction::Outgoing, "car", date(2024, 4, 2)),
        ];
        let breakdown = SummaryService::compute_category_breakdown(
            &records,
            &CategoryCatalog::default(),
            None,
            AmountPolicy::Reject,
        )
        .unwrap();
        let percents: Vec<u32> = breakdown
            .categories
            .iter()
            .map(|c| c.percent_of_total_outgoing)
            .collect();
        assert_eq!(percents, vec![50, 50]);
    }

    #[test]
    fn invalid_amount_rejects_batch_by_default() {
        let mut records = scenario();
        records.push(txn("12,50", Direction::Outgoing, "food", date(2024, 4, 2)));
        let err = SummaryService::compute_highlights(&records, AmountPolicy::Reject)
            .expect_err("invalid amount must fail");
        assert!(matches!(err, FinanceError::InvalidAmount { ref value, .. } if value == "12,50"));
    }

    #[test]
    fn skip_policy_counts_invalid_records() {
        let mut records = scenario();
        records.push(txn("oops", Direction::Outgoing, "food", date(2024, 4, 2)));
        records.push(txn("-5", Direction::Incoming, "salary", date(2024, 4, 2)));
        let highlights =
            SummaryService::compute_highlights(&records, AmountPolicy::SkipAndCount).unwrap();
        assert_eq!(highlights.skipped_records, 2);
        assert_eq!(highlights.net_total, 50.0);

        let breakdown = SummaryService::compute_category_breakdown(
            &records,
            &CategoryCatalog::default(),
            None,
            AmountPolicy::SkipAndCount,
        )
        .unwrap();
        // Only the outgoing invalid record is selected for the breakdown.
        assert_eq!(breakdown.skipped_records, 1);
        assert_eq!(breakdown.outgoing_total, 150.0);
    }

    #[test]
    fn net_is_exact_difference() {
        let records = vec![
            txn("0.1", Direction::Incoming, "salary", date(2024, 4, 1)),
            txn("0.2", Direction::Incoming, "salary", date(2024, 4, 1)),
            txn("0.3", Direction::Outgoing, "food", date(2024, 4, 1)),
        ];
        let h = SummaryService::compute_highlights(&records, AmountPolicy::Reject).unwrap();
        assert_eq!(h.net_total, h.incoming_total - h.outgoing_total);
    }

    #[test]
    fn date_helpers() {
        let records = scenario();
        assert_eq!(
            last_transaction_date(&records, Direction::Outgoing),
            Some(date(2024, 4, 10))
        );
        assert_eq!(
            transaction_interval(&records),
            Some((date(2024, 4, 1), date(2024, 4, 10)))
        );
        assert_eq!(last_transaction_date(&[], Direction::Incoming), None);
    }
}
