//! Where the client keeps its files when nothing overrides them.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "ausmash";

/// `<base>/ausmash`, or `./ausmash` when the platform has no such base directory
fn app_dir(base: Option<PathBuf>) -> PathBuf {
    base.unwrap_or_else(|| Path::new(".").to_path_buf()).join(APP_DIR)
}

/// TOML file read by [`Config::load`](super::Config::load) before
/// `AUSMASH_*` environment overrides, e.g. `~/.config/ausmash/config.toml`.
/// A missing file means every setting comes from defaults and the environment.
pub fn get_config_path() -> String {
    app_dir(dirs::config_dir())
        .join("config.toml")
        .to_string_lossy()
        .to_string()
}

/// Directory the rolling request log is written to when `log_file_path` is unset
pub fn get_log_dir_path() -> String {
    app_dir(dirs::cache_dir()).join("logs").to_string_lossy().to_string()
}
