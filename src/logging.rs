use std::path::Path;

use anyhow::Context;
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};

use crate::config;

/// Start the logger. The returned handle must live until the process exits,
/// otherwise buffered file output is lost.
///
/// Without a log dir everything goes to stderr. With one, the file gets the full
/// spec and stderr keeps WARN and above.
pub fn init_logging(log_dir: Option<&Path>) -> anyhow::Result<LoggerHandle> {
    let logger = Logger::try_with_env_or_str(config::logging::DEFAULT_LOG_SPEC)
        .context("invalid log specification")?
        .format(flexi_logger::detailed_format);

    let logger = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).with_context(|| format!("failed creating log dir {}", dir.display()))?;
            logger
                .log_to_file(
                    FileSpec::default()
                        .directory(dir)
                        .basename(config::logging::LOG_FILE_BASENAME),
                )
                .rotate(
                    Criterion::Size(config::logging::LOG_ROTATE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(config::logging::LOG_ROTATE_KEEP_FILES),
                )
                .duplicate_to_stderr(Duplicate::Warn)
        }
        None => logger.log_to_stderr(),
    };

    let handle = logger.start().context("failed to start logger")?;

    log::info!("{}", "=".repeat(60));
    log::info!("Cooking manual API starting");
    log::info!("Version: {}", config::HOST_VERSION);
    log::info!("Platform: {}", std::env::consts::OS);
    log::info!("{}", "=".repeat(60));

    Ok(handle)
}
