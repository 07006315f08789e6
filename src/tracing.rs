//! Tracing initialization.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Initialize tracing. Safe to call multiple times; only the first call wins.
///
/// Logs go to stderr so stdout stays free for command output.
pub fn init(format: LogFormat) {
    INIT.call_once(|| {
        let is_test =
            std::env::var("NEXTEST").is_ok() || std::env::var("CARGO_TARGET_TMPDIR").is_ok();
        let filter = EnvFilter::from_default_env().add_directive(
            if is_test {
                tracing::Level::DEBUG
            } else {
                tracing::Level::INFO
            }
            .into(),
        );

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true)
            .with_span_events(FmtSpan::NONE);

        let result = if is_test {
            builder.compact().with_test_writer().finish().try_init()
        } else {
            match format {
                LogFormat::Compact => builder
                    .compact()
                    .with_writer(std::io::stderr)
                    .finish()
                    .try_init(),
                LogFormat::Json => builder
                    .json()
                    .with_writer(std::io::stderr)
                    .finish()
                    .try_init(),
            }
        };

        if let Err(e) = result {
            eprintln!("Failed to initialize tracing: {}", e);
        }
    });
}
