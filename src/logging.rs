//! Tracing subscriber setup

use std::path::Path;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::config::LOG_ENV;

/// Install the global subscriber.
///
/// Human-readable events go to stderr (`warn` by default, `debug` when
/// `verbose`), and JSON events at `info` and above are appended to
/// `log_file`. `TOOLENV_LOG` overrides both filters. The returned guard must
/// be held until exit so buffered file output is flushed.
pub fn init(log_file: &Path, verbose: bool) -> Option<WorkerGuard> {
    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(env_filter(if verbose { "debug" } else { "warn" }));

    let (file_layer, guard) = match file_writer(log_file) {
        Some((writer, guard)) => {
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(env_filter("info"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    guard
}

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Non-blocking writer appending to `path`, or `None` if it can't be opened
fn file_writer(path: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    let dir = path.parent()?;
    let file_name = path.file_name()?.to_str()?;
    std::fs::create_dir_all(dir).ok()?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .ok()?;
    Some(tracing_appender::non_blocking(appender))
}
