use chrono::{Local, NaiveDateTime};
use std::fmt::{self, Write as _};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, format::Writer};
use tracing_subscriber::registry::LookupSpan;

/// 日-月-年 時:分:秒.ミリ秒
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S%.3f";

/// ログ行フォーマッタ
///
/// `<timestamp>.<ms> <LEVEL>: <message> | request #<n>` の形式で1行を出力する。
/// リクエスト番号はイベントの `request` フィールドから取る。
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut fields = LineFields::default();
        event.record(&mut fields);

        let line = format_line(
            Local::now().naive_local(),
            event.metadata().level(),
            &fields.message,
            fields.request,
        );
        writeln!(writer, "{}", line)
    }
}

/// 1行分の文字列を組み立てる（改行なし）
pub fn format_line(
    timestamp: NaiveDateTime,
    level: &Level,
    message: &str,
    request: Option<u64>,
) -> String {
    let mut line = format!(
        "{} {}: {}",
        timestamp.format(TIMESTAMP_FORMAT),
        level_name(level),
        message
    );
    if let Some(request) = request {
        let _ = write!(line, " | request #{}", request);
    }
    line
}

fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::TRACE | Level::DEBUG => "DEBUG",
        Level::INFO => "INFO",
        Level::WARN => "WARNING",
        Level::ERROR => "ERROR",
    }
}

#[derive(Default)]
struct LineFields {
    message: String,
    request: Option<u64>,
}

impl Visit for LineFields {
    fn record_u64(&mut self, field: &Field, value: u64) {
        if field.name() == "request" {
            self.request = Some(value);
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        if field.name() == "request" {
            self.request = u64::try_from(value).ok();
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        }
    }
}
