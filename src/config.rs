use std::ffi::OsString;
use std::path::PathBuf;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "CareWatch";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Heading shown at the top of the dashboard.
pub const DASHBOARD_TITLE: &str = "CareWatch AI – Public Health & Inventory Guardian";

/// File name of the critical-stock export.
pub const REORDER_FILE_NAME: &str = "reorder_list.csv";

/// Environment variable overriding the warehouse location.
pub const WAREHOUSE_ENV: &str = "CAREWATCH_WAREHOUSE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot determine home directory")]
    NoHomeDir,
}

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "carewatch_lib=info,carewatch=info,warn"
}

/// Warehouse database location: `$CAREWATCH_WAREHOUSE`, else
/// `~/CareWatch/warehouse.db`.
pub fn warehouse_path() -> Result<PathBuf, ConfigError> {
    resolve_warehouse_path(std::env::var_os(WAREHOUSE_ENV), dirs::home_dir())
}

fn resolve_warehouse_path(
    env_value: Option<OsString>,
    home: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(value));
    }
    let home = home.ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(APP_NAME).join("warehouse.db"))
}
