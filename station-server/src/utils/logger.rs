//! Logging Infrastructure
//!
//! Console output (pretty or JSON) plus, when a log directory is given,
//! daily rotating files:
//! - `app/`      everything except the `security` target
//! - `security/` login failures, scope denials and other `security_log!` events

use std::fs;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::core::Config;

/// Level, format and log directory taken from the loaded [`Config`]
pub fn init_logger_from_config(config: &Config) -> anyhow::Result<()> {
    init_logger_with_file(&config.log_level, config.log_json, Some(&config.log_dir()))
}

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_json = json_format.then(|| {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
    });
    let console_pretty = (!json_format).then(|| {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
    });

    let (app_layer, security_layer) = match log_dir {
        Some(dir) => {
            let log_dir = Path::new(dir);
            let app_dir = log_dir.join("app");
            let security_dir = log_dir.join("security");
            fs::create_dir_all(&app_dir)?;
            fs::create_dir_all(&security_dir)?;

            let app_log = RollingFileAppender::new(Rotation::DAILY, app_dir, "app");
            let app_layer = fmt::layer()
                .json()
                .with_target(true)
                .with_writer(std::sync::Mutex::new(app_log))
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() != "security"
                }));

            let security_log = RollingFileAppender::new(Rotation::DAILY, security_dir, "security");
            let security_layer = fmt::layer()
                .json()
                .with_target(true)
                .with_writer(std::sync::Mutex::new(security_log))
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() == "security"
                }));

            (Some(app_layer), Some(security_layer))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_json)
        .with(console_pretty)
        .with(app_layer)
        .with(security_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;

    #[test]
    fn test_file_layers_follow_config_work_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::with_overrides(
            tmp.path().to_string_lossy(),
            0,
            JwtConfig {
                secret: "test-secret-key-that-is-at-least-32-chars".into(),
                expiration_minutes: 60,
                issuer: "station-server".into(),
                audience: "station-backoffice".into(),
            },
        );

        init_logger_from_config(&config).unwrap();

        let logs = tmp.path().join("logs");
        assert!(logs.join("app").is_dir());
        assert!(logs.join("security").is_dir());
    }
}
