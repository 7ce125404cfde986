use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    core::services::AmountPolicy,
    currency::{CurrencyCode, LocaleConfig, LocaleFormatter},
    domain::DateZone,
    errors::FinanceError,
    utils,
};

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default)]
    pub amount_policy: AmountPolicy,
    /// Offset east of UTC, in minutes, used to date stored timestamps. Absent
    /// means the host's local zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "pt-BR".into(),
            currency: "BRL".into(),
            amount_policy: AmountPolicy::default(),
            utc_offset_minutes: None,
        }
    }
}

impl Config {
    /// Resolves the locale tag and currency into a formatter.
    pub fn formatter(&self) -> Result<LocaleFormatter, FinanceError> {
        let locale = LocaleConfig::from_tag(&self.locale)?;
        Ok(LocaleFormatter::new(CurrencyCode::new(&self.currency), locale))
    }

    pub fn date_zone(&self) -> Result<DateZone, FinanceError> {
        match self.utc_offset_minutes {
            Some(minutes) => DateZone::from_offset_minutes(minutes),
            None => Ok(DateZone::Local),
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, FinanceError> {
        Self::with_base_dir(utils::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, FinanceError> {
        let path = utils::config_file_in(&base);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    pub fn load(&self) -> Result<Config, FinanceError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| FinanceError::Config(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), FinanceError> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| FinanceError::Config(err.to_string()))?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), FinanceError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
