use crate::application::book::{
    ServiceDependencies, count_books as execute_count_books, create_book as execute_create_book,
    delete_book as execute_delete_book, ensure_book_exists, get_book as execute_get_book,
    list_books as execute_list_books, update_book_price as execute_update_book_price,
};
use crate::domain::commands::UpdateBookPrice;
use crate::domain::{Book, BookCatalog, BookId};
use crate::logging::{LogLevel, LoggerName, Loggers, RequestNumber};
use axum::{
    Extension, Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{
    error::ApiError,
    types::{
        BookIdQuery, BooksQuery, CreateBookRequest, LogLevelQuery, ResultResponse,
        UpdatePriceQuery, parse_required_int,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
///
/// カタログ・ロガー・リクエストカウンタをすべてここに持ち、
/// プロセスグローバルな状態は使わない。
#[derive(Default)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
    request_counter: AtomicU64,
}

impl AppState {
    pub fn new(catalog: BookCatalog, loggers: Loggers) -> Self {
        Self {
            service_deps: ServiceDependencies::new(catalog, loggers),
            request_counter: AtomicU64::new(0),
        }
    }

    pub fn loggers(&self) -> &Loggers {
        &self.service_deps.loggers
    }

    /// リクエスト番号を採番する（1始まり）
    pub fn next_request_number(&self) -> RequestNumber {
        RequestNumber::new(self.request_counter.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// これまでに受け付けたリクエスト数
    pub fn request_count(&self) -> u64 {
        self.request_counter.load(Ordering::SeqCst)
    }
}

fn book_id_param(value: Option<&str>) -> Result<BookId, ApiError> {
    parse_required_int("id", value)
        .map(BookId::new)
        .map_err(ApiError::invalid_param)
}

// ============================================================================
// Health
// ============================================================================

/// GET /books/health
pub async fn health_check() -> &'static str {
    "OK"
}

// ============================================================================
// Command handlers (POST / PUT / DELETE)
// ============================================================================

/// POST /book - 書籍を登録
///
/// 強制されるビジネスルール:
/// - タイトルが重複しないこと（大文字小文字を区別しない）
/// - 出版年が 1940〜2100 であること
/// - 価格が正であること
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    Extension(request): Extension<RequestNumber>,
    payload: Result<Json<CreateBookRequest>, JsonRejection>,
) -> Result<Json<ResultResponse<BookId>>, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        ApiError::invalid_body(rejection.body_text()).logged(state.loggers(), request)
    })?;

    let book_id = execute_create_book(&state.service_deps, request, req.to_command())
        .await
        .map_err(|e| ApiError::from(e).logged(state.loggers(), request))?;

    Ok(Json(ResultResponse::new(book_id)))
}

/// PUT /book?id=<id>&price=<price> - 価格を更新
///
/// 変更前の価格を返す。存在しない ID は price の有無に関わらず 404。
pub async fn update_book_price(
    State(state): State<Arc<AppState>>,
    Extension(request): Extension<RequestNumber>,
    Query(query): Query<UpdatePriceQuery>,
) -> Result<Json<ResultResponse<i64>>, ApiError> {
    let book_id = book_id_param(query.id.as_deref())
        .map_err(|e| e.logged(state.loggers(), request))?;
    let price = match parse_required_int("price", query.price.as_deref()) {
        Ok(price) => price,
        Err(name) => {
            ensure_book_exists(&state.service_deps, book_id)
                .await
                .map_err(|e| ApiError::from(e).logged(state.loggers(), request))?;
            return Err(ApiError::invalid_param(name).logged(state.loggers(), request));
        }
    };

    let old_price =
        execute_update_book_price(&state.service_deps, request, UpdateBookPrice { book_id, price })
            .await
            .map_err(|e| ApiError::from(e).logged(state.loggers(), request))?;

    Ok(Json(ResultResponse::new(old_price)))
}

/// DELETE /book?id=<id> - 書籍を削除
///
/// 削除後の書籍数を返す。
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Extension(request): Extension<RequestNumber>,
    Query(query): Query<BookIdQuery>,
) -> Result<Json<ResultResponse<usize>>, ApiError> {
    let book_id = book_id_param(query.id.as_deref())
        .map_err(|e| e.logged(state.loggers(), request))?;

    let remaining = execute_delete_book(&state.service_deps, request, book_id)
        .await
        .map_err(|e| ApiError::from(e).logged(state.loggers(), request))?;

    Ok(Json(ResultResponse::new(remaining)))
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /books/total - フィルタに一致する書籍数
pub async fn total_books(
    State(state): State<Arc<AppState>>,
    Extension(request): Extension<RequestNumber>,
    Query(query): Query<BooksQuery>,
) -> Json<ResultResponse<usize>> {
    let count = execute_count_books(&state.service_deps, request, &query.to_filter()).await;
    Json(ResultResponse::new(count))
}

/// GET /books - フィルタに一致する書籍一覧
///
/// クエリパラメータ（すべて任意）:
/// - author: 著者（大文字小文字を区別しない完全一致）
/// - price-bigger-than / price-less-than: 価格の範囲（両端を含む）
/// - year-bigger-than / year-less-than: 出版年の範囲（両端を含む）
/// - genres: カンマ区切り、いずれかを持つ書籍に一致
///
/// 結果はタイトル順（大文字小文字を区別しない）。
pub async fn list_books(
    State(state): State<Arc<AppState>>,
    Extension(request): Extension<RequestNumber>,
    Query(query): Query<BooksQuery>,
) -> Json<ResultResponse<Vec<Book>>> {
    let books = execute_list_books(&state.service_deps, request, &query.to_filter()).await;
    Json(ResultResponse::new(books))
}

/// GET /book?id=<id> - 書籍をIDで取得
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Extension(request): Extension<RequestNumber>,
    Query(query): Query<BookIdQuery>,
) -> Result<Json<ResultResponse<Book>>, ApiError> {
    let book_id = book_id_param(query.id.as_deref())
        .map_err(|e| e.logged(state.loggers(), request))?;

    let book = execute_get_book(&state.service_deps, request, book_id)
        .await
        .map_err(|e| ApiError::from(e).logged(state.loggers(), request))?;

    Ok(Json(ResultResponse::new(book)))
}

// ============================================================================
// Log level handlers (plain text)
// ============================================================================

const LOGGER_NOT_FOUND: &str = "Logger not found";
const INVALID_LOG_LEVEL: &str = "Invalid log level";

fn find_logger(name: Option<&str>) -> Option<LoggerName> {
    name.and_then(|name| name.parse().ok())
}

/// GET /logs/level?logger-name=<name>
pub async fn get_log_level(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LogLevelQuery>,
) -> (StatusCode, String) {
    match find_logger(query.logger_name.as_deref()) {
        Some(name) => (
            StatusCode::OK,
            state.loggers().get(name).level().to_string(),
        ),
        None => (StatusCode::NOT_FOUND, LOGGER_NOT_FOUND.to_string()),
    }
}

/// PUT /logs/level?logger-name=<name>&logger-level=<level>
///
/// ロガー名の確認が先で、不明な名前はレベルの妥当性に関わらず 404。
/// 成功時は要求されたレベル名を大文字で返す。
pub async fn set_log_level(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LogLevelQuery>,
) -> (StatusCode, String) {
    let Some(name) = find_logger(query.logger_name.as_deref()) else {
        return (StatusCode::NOT_FOUND, LOGGER_NOT_FOUND.to_string());
    };

    let requested = query.logger_level.unwrap_or_default().to_uppercase();
    let Ok(level) = requested.parse::<LogLevel>() else {
        return (StatusCode::BAD_REQUEST, INVALID_LOG_LEVEL.to_string());
    };

    state.loggers().get(name).set_level(level);
    tracing::info!("Logger {} level set to {}", name.as_str(), level);

    (StatusCode::OK, requested)
}
