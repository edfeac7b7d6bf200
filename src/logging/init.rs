use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::filter::{Targets, filter_fn};
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use super::format::LineFormat;
use super::logger::{BOOKS_TARGET, REQUEST_TARGET};

/// 汎用コンソール出力のデフォルトフィルタ（RUST_LOG 未設定時）
const DEFAULT_CONSOLE_FILTER: &str = "book_store=info,tower_http=debug";

/// ログ初期化のエラー
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to create log directory")]
    Io(#[from] std::io::Error),

    #[error("failed to open log file")]
    Appender(#[from] InitError),

    #[error("global subscriber already set")]
    Subscriber(#[from] TryInitError),
}

/// ファイル出力のワーカーガード
///
/// drop されるまでバッファされた行が書き出され続ける。main で保持すること。
#[must_use]
pub struct LoggingGuards {
    _guards: Vec<WorkerGuard>,
}

/// 汎用コンソールに流すターゲットか
///
/// request-logger と books-logger は専用レイヤーが出力するため、
/// RUST_LOG の指定に関わらずここでは除外する。
fn is_general_target(target: &str) -> bool {
    !matches!(target, REQUEST_TARGET | BOOKS_TARGET)
}

/// 追記専用のログファイル（ローテーションなし）
fn log_file(log_dir: &Path, name: &str) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .filename_suffix("log")
        .build(log_dir)
}

/// グローバルサブスクライバを初期化する
///
/// 出力先：
/// - request-logger → `<log_dir>/requests.log` とコンソール
/// - books-logger → `<log_dir>/books.log`
/// - それ以外（起動メッセージ、tower_http）→ コンソール（RUST_LOG で制御）
///
/// ロガーごとの閾値は `Logger` 側で判定するため、ここではターゲットで
/// 振り分けるだけにしている。
pub fn init_logging(log_dir: &Path) -> Result<LoggingGuards, LoggingError> {
    std::fs::create_dir_all(log_dir)?;

    let (request_file, request_guard) =
        tracing_appender::non_blocking(log_file(log_dir, "requests")?);
    let (books_file, books_guard) = tracing_appender::non_blocking(log_file(log_dir, "books")?);
    let (request_console, console_guard) = tracing_appender::non_blocking(std::io::stdout());

    let request_only = Targets::new().with_target(REQUEST_TARGET, Level::TRACE);
    let books_only = Targets::new().with_target(BOOKS_TARGET, Level::TRACE);
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_CONSOLE_FILTER));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .event_format(LineFormat)
                .with_ansi(false)
                .with_writer(request_file)
                .with_filter(request_only.clone()),
        )
        .with(
            fmt::layer()
                .event_format(LineFormat)
                .with_writer(request_console)
                .with_filter(request_only),
        )
        .with(
            fmt::layer()
                .event_format(LineFormat)
                .with_ansi(false)
                .with_writer(books_file)
                .with_filter(books_only),
        )
        .with(
            fmt::layer()
                .with_filter(filter_fn(|meta| is_general_target(meta.target())))
                .with_filter(console_filter),
        )
        .try_init()?;

    Ok(LoggingGuards {
        _guards: vec![request_guard, books_guard, console_guard],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_targets_are_not_general() {
        assert!(!is_general_target(REQUEST_TARGET));
        assert!(!is_general_target(BOOKS_TARGET));
        assert!(is_general_target("book_store::api::handlers"));
        assert!(is_general_target("tower_http::trace::on_response"));
    }

    #[test]
    fn test_broad_env_filter_does_not_duplicate_logger_lines() {
        use std::io;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

        impl io::Write for SharedBuffer {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let buffer = SharedBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(move || writer.clone())
                .with_filter(filter_fn(|meta| is_general_target(meta.target())))
                .with_filter(EnvFilter::new("trace")),
        );

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "request-logger", request = 1u64, "Incoming request");
            tracing::info!(target: "books-logger", request = 1u64, "Creating new Book");
            tracing::info!("Server listening");
        });

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output.lines().count(), 1, "unexpected output: {output}");
        assert!(output.contains("Server listening"));
    }
}
