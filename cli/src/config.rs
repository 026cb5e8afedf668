//! Where the training log keeps its data.
use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "TRAINING_LOG_DATA_DIR";

const APP_DIR_NAME: &str = "training-log";
const DATABASE_FILE_NAME: &str = "training-log.db";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
}

impl Config {
    /// Resolve the data directory: explicit flag (clap also reads
    /// `TRAINING_LOG_DATA_DIR` into it), then the platform data directory.
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => dirs::data_dir()
                .or_else(dirs::home_dir)
                .map(|base| base.join(APP_DIR_NAME))
                .ok_or_else(|| anyhow!("Could not determine a data directory; pass --data-dir or set {DATA_DIR_ENV}"))?,
        };
        info!("Using data directory {}", data_dir.display());
        Ok(Self { data_dir })
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE_NAME)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_directory_wins() {
        let config = Config::resolve(Some(PathBuf::from("/tmp/lifts"))).unwrap();
        assert_eq!(config.data_dir(), Path::new("/tmp/lifts"));
        assert_eq!(config.database_path(), PathBuf::from("/tmp/lifts/training-log.db"));
    }

    #[test]
    fn test_default_directory_is_app_specific() {
        if let Ok(config) = Config::resolve(None) {
            assert!(config.data_dir.ends_with(APP_DIR_NAME));
        }
    }
}
