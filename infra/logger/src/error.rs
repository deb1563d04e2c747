use std::borrow::Cow;
use thiserror::Error;

/// Errors raised while initializing the logging system.
#[derive(Debug, Error)]
pub enum LoggerError {
    /// The builder was configured with invalid settings.
    #[error("Invalid logger configuration: {message}")]
    InvalidConfiguration { message: Cow<'static, str> },
    /// The rolling file appender could not be created.
    #[error("File appender error: {0}")]
    Appender(#[from] tracing_appender::rolling::InitError),
    /// A global tracing subscriber is already installed.
    #[error("Subscriber error: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
    /// Filesystem failures while preparing the log directory.
    #[error("Log directory error: {message}")]
    Io { message: Cow<'static, str> },
}
