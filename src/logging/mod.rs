pub mod format;
pub mod init;
pub mod level;
pub mod logger;

pub use format::LineFormat;
pub use init::{LoggingError, LoggingGuards, init_logging};
pub use level::{LogLevel, ParseLogLevelError};
pub use logger::{Logger, LoggerName, Loggers, ParseLoggerNameError, RequestNumber};
