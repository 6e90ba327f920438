pub mod ask;
pub mod doctor;
pub mod init;
pub mod serve;
pub mod summarize;

use gamechat_config::AppConfig;
use std::path::Path;

/// Load config from `path`, or the default location.
pub(crate) fn load_config(path: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    AppConfig::load_with(path).map_err(|e| format!("Failed to load config: {e}").into())
}
