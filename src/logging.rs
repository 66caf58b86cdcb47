//! Log setup. Logs go to a file so they never scribble over the terminal UI.

use crate::config::Config;
use flexi_logger::{
    opt_format, Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming,
};

/// Start file logging if a log directory is configured.
///
/// The returned handle must be kept alive for as long as logging is wanted.
pub fn init(config: &Config) -> Result<Option<LoggerHandle>, FlexiLoggerError> {
    let Some(dir) = &config.log_dir else {
        return Ok(None);
    };

    let handle = Logger::try_with_str(&config.log_spec)?
        .log_to_file(FileSpec::default().directory(dir).basename("tilerow"))
        .format(opt_format)
        .rotate(
            Criterion::Size(10 * 1024 * 1024),
            Naming::Numbers,
            Cleanup::KeepLogFiles(3),
        )
        .start()?;
    Ok(Some(handle))
}
