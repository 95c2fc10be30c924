use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "CLIP_HISTORY_DIR";

const APP_DIR_NAME: &str = "clip-history";
const STORE_FILENAME: &str = "clipboard-history.json";
const LOG_FILENAME: &str = "clip-history.log";

/// Directory holding the store and log file.
///
/// `$CLIP_HISTORY_DIR` when set, otherwise `<platform data dir>/clip-history`.
pub fn get_data_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    let base = dirs::data_dir().context("Failed to get platform data directory")?;
    Ok(base.join(APP_DIR_NAME))
}

pub fn default_store_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join(STORE_FILENAME))
}

pub fn log_file_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join(LOG_FILENAME))
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    // Both cases live in one test so they never race on the shared variable
    #[test]
    fn test_data_dir_override_and_default() {
        let original = env::var_os(DATA_DIR_ENV);

        // SAFETY: Setting environment variables in tests is safe as long as:
        // 1. No other test reads or writes this variable concurrently
        // 2. We restore the original value afterwards
        unsafe {
            env::set_var(DATA_DIR_ENV, "/tmp/clip-history-test");
        }
        assert_eq!(get_data_dir().unwrap(), PathBuf::from("/tmp/clip-history-test"));
        assert_eq!(
            default_store_path().unwrap(),
            PathBuf::from("/tmp/clip-history-test/clipboard-history.json")
        );
        assert_eq!(
            log_file_path().unwrap(),
            PathBuf::from("/tmp/clip-history-test/clip-history.log")
        );

        // SAFETY: see above
        unsafe {
            env::remove_var(DATA_DIR_ENV);
        }
        if let Ok(dir) = get_data_dir() {
            assert!(dir.ends_with("clip-history"));
        }

        if let Some(value) = original {
            unsafe {
                env::set_var(DATA_DIR_ENV, value);
            }
        }
    }
}
