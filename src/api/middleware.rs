use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;

use super::handlers::AppState;

/// リクエストの受信と処理時間を request-logger に記録するミドルウェア
///
/// ハンドラーの実行前にリクエスト番号を採番して受信ログを出し、
/// 番号を `RequestNumber` としてリクエスト拡張に入れる。
/// ハンドラーの後、ステータスに関わらず処理時間を DEBUG で出す。
pub async fn track_request(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let number = state.next_request_number();
    let started = Instant::now();

    let request_log = state.loggers().request();
    request_log.info(
        number,
        format_args!(
            "Incoming request | #{} | resource: {} | HTTP Verb {}",
            number,
            request.uri().path(),
            request.method().as_str().to_uppercase()
        ),
    );

    request.extensions_mut().insert(number);
    let response = next.run(request).await;

    request_log.debug(
        number,
        format_args!(
            "request #{} duration: {}ms",
            number,
            started.elapsed().as_millis()
        ),
    );

    response
}
