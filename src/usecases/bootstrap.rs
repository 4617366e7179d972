use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;

use crate::{
    infra::{
        self, config::FileConfigAdapter, contracts::ConfigAdapter, error::AppError,
        storage_layout::StorageLayout,
    },
    usecases::context::AppContext,
};

/// Loaded context plus the log writer guard, which must outlive the session.
pub struct Bootstrapped {
    pub context: AppContext,
    pub log_guard: WorkerGuard,
}

pub fn bootstrap(config_path: Option<&Path>) -> Result<Bootstrapped, AppError> {
    let context = build_context(config_path)?;
    let layout = StorageLayout::resolve()?;
    let log_guard = infra::logging::init(&context.config.logging, &layout)?;

    tracing::info!(
        log_file = %layout.log_file().display(),
        level = %context.config.logging.level,
        "logging initialized"
    );

    Ok(Bootstrapped { context, log_guard })
}

/// Config only, without file logging; used by the one-shot `ask` and `calc`
/// commands that print to stdout.
pub fn build_context(config_path: Option<&Path>) -> Result<AppContext, AppError> {
    let config_adapter = FileConfigAdapter::new(config_path);
    let config = config_adapter.load()?;

    Ok(AppContext::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_context_with_default_config_when_file_is_missing() {
        let context = build_context(Some(Path::new("./missing-config.toml")))
            .expect("context should build from defaults");

        assert_eq!(context.config, crate::infra::config::AppConfig::default());
    }

    #[test]
    fn rejects_invalid_config_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[loader]\ntick_ms = 0\n").expect("fixture must be writable");

        let error = build_context(Some(&path)).expect_err("zero tick must be rejected");

        assert!(error.to_string().contains("loader.tick_ms"));
    }
}
