//! Logging setup and configuration

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub struct LoggingGuard {
    pub _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// File name for a run artifact, suffixed with the run stamp when every
/// execution should keep its own file.
pub fn execution_file_name(extension: &str, run_stamp: &str, per_execution: bool) -> String {
    if per_execution {
        format!("execution-{}.{}", run_stamp, extension)
    } else {
        format!("execution.{}", extension)
    }
}

pub fn setup_logging(log_dir: &Path, run_stamp: &str, per_execution: bool) -> Result<Arc<LoggingGuard>> {
    let file_appender = tracing_appender::rolling::never(
        log_dir,
        execution_file_name("logs", run_stamp, per_execution),
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_ansi(true)
                .with_level(true)
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_thread_ids(false)
                .with_level(true)
                .with_ansi(false)
                .compact()
        )
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse()?)
        )
        .init();

    Ok(Arc::new(LoggingGuard { _guard: guard }))
}

pub fn setup_output_directories(log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir)?;
    Ok(())
}

/// Local wall-clock stamp identifying one run, e.g. `2024-03-09-17-05-42`.
pub fn current_date_time() -> String {
    chrono::Local::now().format("%Y-%m-%d-%H-%M-%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_follow_run_mode() {
        assert_eq!(execution_file_name("csv", "2024-01-02-03-04-05", false), "execution.csv");
        assert_eq!(
            execution_file_name("logs", "2024-01-02-03-04-05", true),
            "execution-2024-01-02-03-04-05.logs"
        );
    }

    #[test]
    fn run_stamp_has_fixed_shape() {
        let stamp = current_date_time();
        assert_eq!(stamp.len(), 19);
        assert_eq!(stamp.matches('-').count(), 5);
    }
}
