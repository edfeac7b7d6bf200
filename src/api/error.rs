use crate::application::book::BookApplicationError;
use crate::domain::BookError;
use crate::logging::{Loggers, RequestNumber};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーと入力の解釈エラーをラップし、
/// HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub enum ApiError {
    Application(BookApplicationError),
    /// クエリパラメータ・ボディが解釈できない
    BadRequest(String),
}

impl From<BookApplicationError> for ApiError {
    fn from(err: BookApplicationError) -> Self {
        ApiError::Application(err)
    }
}

impl ApiError {
    /// 必須クエリパラメータの欠落・不正
    pub fn invalid_param(name: &str) -> Self {
        ApiError::BadRequest(format!(
            "Error: missing or invalid query parameter [{}]",
            name
        ))
    }

    /// リクエストボディの解釈失敗
    pub fn invalid_body(detail: impl std::fmt::Display) -> Self {
        ApiError::BadRequest(format!("Error: invalid request body: {}", detail))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            // 404 Not Found - リクエストされた書籍が存在しない
            ApiError::Application(BookApplicationError::Domain(BookError::NotFound { .. })) => {
                StatusCode::NOT_FOUND
            }

            // 409 Conflict - ビジネスルール違反
            ApiError::Application(BookApplicationError::Domain(
                BookError::DuplicateTitle { .. }
                | BookError::YearOutOfRange { .. }
                | BookError::NonPositivePrice
                | BookError::NegativePriceUpdate { .. },
            )) => StatusCode::CONFLICT,

            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::Application(err) => err.to_string(),
            ApiError::BadRequest(msg) => msg.clone(),
        }
    }

    /// books-logger にエラーを記録する
    ///
    /// ステータスがちょうど 400 の場合だけは記録しない。
    pub fn logged(self, loggers: &Loggers, request: RequestNumber) -> Self {
        if self.status() != StatusCode::BAD_REQUEST {
            loggers.books().error(request, self.message());
        }
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new(self.message()));
        (self.status(), body).into_response()
    }
}
