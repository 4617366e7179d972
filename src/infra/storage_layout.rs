use std::{env, fs, path::PathBuf};

use crate::infra::error::AppError;

const APP_DIR_NAME: &str = "cryptohomes";
const LOG_FILE_NAME: &str = "cryptohomes.log";

/// Where the application writes its own files. Sessions keep nothing on
/// disk, so the log directory is all there is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    pub log_dir: PathBuf,
}

impl StorageLayout {
    pub fn resolve() -> Result<Self, AppError> {
        let state_base = env::var_os("XDG_STATE_HOME")
            .map(PathBuf::from)
            .or_else(dirs::state_dir)
            .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("state")))
            .ok_or_else(|| AppError::StoragePathResolution {
                details: "unable to resolve state base directory (XDG_STATE_HOME/HOME)".into(),
            })?;

        Ok(Self {
            log_dir: state_base.join(APP_DIR_NAME),
        })
    }

    pub fn ensure_dirs(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.log_dir).map_err(|source| AppError::StorageDirCreate {
            path: self.log_dir.clone(),
            source,
        })
    }

    pub fn log_file_name(&self) -> &'static str {
        LOG_FILE_NAME
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_NAME)
    }
}
