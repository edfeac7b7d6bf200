use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use super::level::LogLevel;

/// tracing のターゲット名（リクエストログ）
pub const REQUEST_TARGET: &str = "request-logger";
/// tracing のターゲット名（書籍ドメインログ）
pub const BOOKS_TARGET: &str = "books-logger";

/// リクエスト通し番号
///
/// プロセス全体で単調増加し、そのリクエストの処理中に出力される
/// すべてのログ行に `request` フィールドとして付与される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestNumber(u64);

impl RequestNumber {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ロガー名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoggerName {
    Request,
    Books,
}

impl LoggerName {
    pub fn as_str(self) -> &'static str {
        match self {
            LoggerName::Request => REQUEST_TARGET,
            LoggerName::Books => BOOKS_TARGET,
        }
    }
}

/// 不明なロガー名
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Logger not found: {0}")]
pub struct ParseLoggerNameError(pub String);

impl FromStr for LoggerName {
    type Err = ParseLoggerNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            REQUEST_TARGET => Ok(LoggerName::Request),
            BOOKS_TARGET => Ok(LoggerName::Books),
            _ => Err(ParseLoggerNameError(s.to_string())),
        }
    }
}

/// 定数ターゲットで tracing イベントを発行する
///
/// tracing のコールサイトはターゲットとレベルが静的である必要があるため、
/// ロガーごと・レベルごとに展開する。
macro_rules! emit {
    ($target:expr, $level:expr, $request:expr, $message:expr) => {
        match $level {
            LogLevel::NotSet | LogLevel::Debug => {
                tracing::debug!(target: $target, request = $request, "{}", $message)
            }
            LogLevel::Info => tracing::info!(target: $target, request = $request, "{}", $message),
            LogLevel::Warning => {
                tracing::warn!(target: $target, request = $request, "{}", $message)
            }
            LogLevel::Error | LogLevel::Critical => {
                tracing::error!(target: $target, request = $request, "{}", $message)
            }
        }
    };
}

/// 実行時に閾値を変更できる名前付きロガー
///
/// 閾値未満のイベントはここで捨て、通過したものだけを tracing に流す。
/// 出力先（ファイル・コンソール）の振り分けはサブスクライバ側が
/// ターゲット名で行う。
#[derive(Debug)]
pub struct Logger {
    name: LoggerName,
    level: AtomicU8,
}

impl Logger {
    pub fn new(name: LoggerName, level: LogLevel) -> Self {
        Self {
            name,
            level: AtomicU8::new(level.value()),
        }
    }

    /// 現在の閾値
    pub fn level(&self) -> LogLevel {
        LogLevel::from_value(self.level.load(Ordering::Relaxed)).unwrap_or(LogLevel::Info)
    }

    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level.value(), Ordering::Relaxed);
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.level().effective()
    }

    pub fn log(&self, level: LogLevel, request: RequestNumber, message: impl fmt::Display) {
        if !self.is_enabled(level) {
            return;
        }
        let request = request.value();
        match self.name {
            LoggerName::Request => emit!(REQUEST_TARGET, level, request, message),
            LoggerName::Books => emit!(BOOKS_TARGET, level, request, message),
        }
    }

    pub fn debug(&self, request: RequestNumber, message: impl fmt::Display) {
        self.log(LogLevel::Debug, request, message);
    }

    pub fn info(&self, request: RequestNumber, message: impl fmt::Display) {
        self.log(LogLevel::Info, request, message);
    }

    pub fn error(&self, request: RequestNumber, message: impl fmt::Display) {
        self.log(LogLevel::Error, request, message);
    }
}

/// サービスが持つ2つのロガー
#[derive(Debug)]
pub struct Loggers {
    request: Logger,
    books: Logger,
}

impl Default for Loggers {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

impl Loggers {
    pub fn new(level: LogLevel) -> Self {
        Self {
            request: Logger::new(LoggerName::Request, level),
            books: Logger::new(LoggerName::Books, level),
        }
    }

    /// リクエストログ（受信・処理時間）
    pub fn request(&self) -> &Logger {
        &self.request
    }

    /// 書籍ドメインログ
    pub fn books(&self) -> &Logger {
        &self.books
    }

    pub fn get(&self, name: LoggerName) -> &Logger {
        match name {
            LoggerName::Request => &self.request,
            LoggerName::Books => &self.books,
        }
    }
}
