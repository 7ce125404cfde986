//! Locale-aware currency, date, and percentage formatting for the screens.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{domain::YearMonth, errors::FinanceError};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("BRL")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Language {
    Portuguese,
    English,
}

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub language: Language,
    pub decimal_separator: char,
    pub grouping_separator: char,
    /// Whether a space separates the currency symbol from the digits.
    pub symbol_spacing: bool,
}

impl LocaleConfig {
    pub fn pt_br() -> Self {
        Self {
            language_tag: "pt-BR".into(),
            language: Language::Portuguese,
            decimal_separator: ',',
            grouping_separator: '.',
            symbol_spacing: true,
        }
    }

    pub fn en_us() -> Self {
        Self {
            language_tag: "en-US".into(),
            language: Language::English,
            decimal_separator: '.',
            grouping_separator: ',',
            symbol_spacing: false,
        }
    }

    pub fn from_tag(tag: &str) -> Result<Self, FinanceError> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "pt-br" | "pt_br" | "pt" => Ok(Self::pt_br()),
            "en-us" | "en_us" | "en" => Ok(Self::en_us()),
            other => Err(FinanceError::InvalidInput(format!(
                "unsupported locale `{}`",
                other
            ))),
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::pt_br()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormatOptions {
    pub currency_display: CurrencyDisplay,
    pub negative_style: NegativeStyle,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            currency_display: CurrencyDisplay::Symbol,
            negative_style: NegativeStyle::Sign,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NegativeStyle {
    Sign,
    Parentheses,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CurrencyDisplay {
    Symbol,
    Code,
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "BRL" => "R$".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value);
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (body.as_str(), None),
    };
    let grouped = match int_part.strip_prefix('-') {
        Some(digits) => format!("-{}", group_digits(digits, locale.grouping_separator)),
        None => group_digits(int_part, locale.grouping_separator),
    };
    match frac_part {
        Some(frac) => format!("{}{}{}", grouped, locale.decimal_separator, frac),
        None => grouped,
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

pub fn format_currency_value(
    amount: f64,
    code: &CurrencyCode,
    locale: &LocaleConfig,
    options: &FormatOptions,
) -> String {
    let precision = minor_units_for(code.as_str());
    let body = format_number(locale, amount.abs(), precision);
    // Rounding may turn a tiny negative into zero; never render "-0,00".
    let negative = amount < 0.0 && body.chars().any(|ch| ch.is_ascii_digit() && ch != '0');
    let prefix = match options.currency_display {
        CurrencyDisplay::Symbol => symbol_for(code.as_str()),
        CurrencyDisplay::Code => code.as_str().to_string(),
    };
    let spaced = options.currency_display == CurrencyDisplay::Code || locale.symbol_spacing;
    let unsigned = if spaced {
        format!("{} {}", prefix, body)
    } else {
        format!("{}{}", prefix, body)
    };
    if !negative {
        return unsigned;
    }
    match options.negative_style {
        NegativeStyle::Sign => format!("-{}", unsigned),
        NegativeStyle::Parentheses => format!("({})", unsigned),
    }
}

/// `dd/mm/yy` for Portuguese, `mm/dd/yy` for English.
pub fn format_short_date(locale: &LocaleConfig, date: NaiveDate) -> String {
    match locale.language {
        Language::Portuguese => date.format("%d/%m/%y").to_string(),
        Language::English => date.format("%m/%d/%y").to_string(),
    }
}

/// `abril, 2024` or `April, 2024`.
pub fn format_month_label(locale: &LocaleConfig, month: YearMonth) -> String {
    format!(
        "{}, {}",
        month_name(locale.language, month.month()),
        month.year()
    )
}

/// `03 de abril` or `April 3`.
pub fn format_day_month(locale: &LocaleConfig, date: NaiveDate) -> String {
    let month = month_name(locale.language, date.month());
    match locale.language {
        Language::Portuguese => format!("{:02} de {}", date.day(), month),
        Language::English => format!("{} {}", month, date.day()),
    }
}

/// `01 à 16 de abril` within one month, `28 de março à 16 de abril` across months.
pub fn format_date_interval(locale: &LocaleConfig, start: NaiveDate, end: NaiveDate) -> String {
    let same_month = YearMonth::of(start) == YearMonth::of(end);
    match locale.language {
        Language::Portuguese if same_month => format!(
            "{:02} à {:02} de {}",
            start.day(),
            end.day(),
            month_name(locale.language, end.month())
        ),
        Language::Portuguese => format!(
            "{} à {}",
            format_day_month(locale, start),
            format_day_month(locale, end)
        ),
        Language::English if same_month => format!(
            "{} {:02} - {:02}",
            month_name(locale.language, end.month()),
            start.day(),
            end.day()
        ),
        Language::English => format!(
            "{} - {}",
            format_day_month(locale, start),
            format_day_month(locale, end)
        ),
    }
}

pub fn format_percent(percent: u32) -> String {
    format!("{}%", percent)
}

fn month_name(language: Language, month: u32) -> &'static str {
    const PT: [&str; 12] = [
        "janeiro",
        "fevereiro",
        "março",
        "abril",
        "maio",
        "junho",
        "julho",
        "agosto",
        "setembro",
        "outubro",
        "novembro",
        "dezembro",
    ];
    const EN: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    let index = (month as usize).wrapping_sub(1);
    let names = match language {
        Language::Portuguese => &PT,
        Language::English => &EN,
    };
    names.get(index).copied().unwrap_or("")
}

/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: f64) -> String;
}

/// Formats dates for presentation.
pub trait DateFormatter: Send + Sync {
    /// Language of the surrounding screen labels.
    fn language(&self) -> Language;
    fn format_date(&self, date: NaiveDate) -> String;
    fn format_month(&self, month: YearMonth) -> String;
    fn format_day_month(&self, date: NaiveDate) -> String;
    fn format_interval(&self, start: NaiveDate, end: NaiveDate) -> String;
}

/// Bundles a currency, locale, and options into the formatter handed to screens.
#[derive(Debug, Clone, Default)]
pub struct LocaleFormatter {
    pub currency: CurrencyCode,
    pub locale: LocaleConfig,
    pub options: FormatOptions,
}

impl LocaleFormatter {
    pub fn new(currency: CurrencyCode, locale: LocaleConfig) -> Self {
        Self {
            currency,
            locale,
            options: FormatOptions::default(),
        }
    }
}

impl CurrencyFormatter for LocaleFormatter {
    fn format_amount(&self, amount: f64) -> String {
        format_currency_value(amount, &self.currency, &self.locale, &self.options)
    }
}

impl DateFormatter for LocaleFormatter {
    fn language(&self) -> Language {
        self.locale.language
    }

    fn format_date(&self, date: NaiveDate) -> String {
        format_short_date(&self.locale, date)
    }

    fn format_month(&self, month: YearMonth) -> String {
        format_month_label(&self.locale, month)
    }

    fn format_day_month(&self, date: NaiveDate) -> String {
        format_day_month(&self.locale, date)
    }

    fn format_interval(&self, start: NaiveDate, end: NaiveDate) -> String {
        format_date_interval(&self.locale, start, end)
    }
}
