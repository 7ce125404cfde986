use std::{
    fmt::Write as _,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::{errors::FinanceError, utils};

use super::{KeyValueStore, Result};

const BLOB_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed store keeping one JSON blob per key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Opens the store under the application data directory.
    pub fn new_default() -> Result<Self> {
        Self::new(utils::store_dir_in(&utils::app_data_dir()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn blob_path(&self, key: &str) -> Result<PathBuf> {
        Ok(self
            .root
            .join(format!("{}.{}", encode_key(key)?, BLOB_EXTENSION)))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(key)?;
        match fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.blob_path(key)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(key, path = %path.display(), "blob written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.blob_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Maps a store key to a file stem. Unsafe characters are percent-encoded so
/// distinct keys never share a file.
fn encode_key(key: &str) -> Result<String> {
    if key.trim().is_empty() {
        return Err(FinanceError::InvalidInput("store key must not be empty".into()));
    }
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' => encoded.push(byte as char),
            _ => {
                let _ = write!(encoded, "%{:02X}", byte);
            }
        }
    }
    Ok(encoded)
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

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
