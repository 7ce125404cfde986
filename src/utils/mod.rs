pub mod build_info;

use std::{env, path::PathBuf, sync::Once};

use dirs::home_dir;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIR_NAME: &str = ".gofinances";
const STORE_DIR: &str = "store";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";

/// Initializes the global tracing subscriber with sensible defaults.
///
/// Returns `true` only for the call that performed the setup.
pub fn init_tracing() -> bool {
    let mut first = false;
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "gofinances_core=info".parse() {
            filter = filter.add_directive(directive);
        }

        // A host application may already own the global subscriber.
        let _ = fmt().with_env_filter(filter).try_init();
        first = true;
    });
    first
}

/// Returns the application-specific data directory, defaulting to `~/.gofinances`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("GOFINANCES_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Directory holding the file-backed key-value store.
pub fn store_dir_in(base: &std::path::Path) -> PathBuf {
    base.join(STORE_DIR)
}

pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_DIR).join(CONFIG_FILE)
}
