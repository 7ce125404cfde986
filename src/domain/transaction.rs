//! Transaction records as they are persisted by the mobile app.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::{
    domain::{
        common::{Displayable, Identifiable, NamedEntity},
        date_zone::DateZone,
    },
    errors::FinanceError,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Whether a transaction increases or decreases the balance.
///
/// Stored as `positive`/`negative` under the `type` field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    #[serde(rename = "positive", alias = "incoming")]
    Incoming,
    #[serde(rename = "negative", alias = "outgoing")]
    Outgoing,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::Incoming => "incoming",
            Direction::Outgoing => "outgoing",
        };
        f.write_str(label)
    }
}

/// A decoded transaction with its calendar date resolved.
///
/// Serializes to the stored wire shape with a `YYYY-MM-DD` date.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TransactionRecord {
    pub id: String,
    pub name: String,
    /// Raw decimal text; see [`TransactionRecord::parsed_amount`].
    pub amount: String,
    #[serde(rename = "type")]
    pub direction: Direction,
    pub category: String,
    #[serde(serialize_with = "serialize_date")]
    pub date: NaiveDate,
}

/// One entry of a stored transaction list, with the date kept as written.
///
/// The date is either `YYYY-MM-DD` or an RFC 3339 timestamp; it only becomes a
/// calendar date once a [`DateZone`] is applied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredTransaction {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "amount_text")]
    pub amount: String,
    #[serde(rename = "type")]
    pub direction: Direction,
    pub category: String,
    pub date: String,
}

impl StoredTransaction {
    pub fn into_record(self, zone: DateZone) -> Result<TransactionRecord, String> {
        let date = parse_record_date(&self.date, zone)
            .ok_or_else(|| format!("transaction {} has invalid date `{}`", self.id, self.date))?;
        Ok(TransactionRecord {
            id: self.id,
            name: self.name,
            amount: self.amount,
            direction: self.direction,
            category: self.category,
            date,
        })
    }

    pub fn has_valid_date(&self) -> bool {
        parse_record_date(&self.date, DateZone::utc()).is_some()
    }
}

impl From<TransactionRecord> for StoredTransaction {
    fn from(record: TransactionRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            amount: record.amount,
            direction: record.direction,
            category: record.category,
            date: record.date.format(DATE_FORMAT).to_string(),
        }
    }
}

impl TransactionRecord {
    pub fn new(
        name: impl Into<String>,
        amount: impl ToString,
        direction: Direction,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            amount: amount.to_string(),
            direction,
            category: category.into(),
            date,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Parses the stored amount, rejecting anything that is not a finite, non-negative decimal.
    pub fn parsed_amount(&self) -> Result<f64, FinanceError> {
        let invalid = || FinanceError::InvalidAmount {
            id: self.id.clone(),
            value: self.amount.clone(),
        };
        let value: f64 = self.amount.trim().parse().map_err(|_| invalid())?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid());
        }
        Ok(value)
    }

    pub fn is_outgoing(&self) -> bool {
        self.direction == Direction::Outgoing
    }
}

impl Identifiable for TransactionRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for TransactionRecord {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for TransactionRecord {
    fn display_label(&self) -> String {
        format!("txn:{} [{}] {}", self.id, self.direction, self.category)
    }
}

/// Accepts the amount either as JSON text or as a bare number.
fn amount_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        other => Err(de::Error::custom(format!(
            "amount must be text or a number, got {}",
            other
        ))),
    }
}

fn serialize_date<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
}

/// Accepts `YYYY-MM-DD` as is; an RFC 3339 timestamp takes its calendar date in `zone`.
pub fn parse_record_date(raw: &str, zone: DateZone) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|stamp| zone.date_of(stamp))
}
