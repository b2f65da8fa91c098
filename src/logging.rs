use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle, opt_format};

/// Log to stderr so stdout carries nothing but moves. The level comes from
/// `RUST_LOG` and defaults to `warn`. Keep the handle alive for the whole run.
pub fn setup_logging() -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str("warn")?
        .log_to_stderr()
        .format(opt_format)
        .start()
}
