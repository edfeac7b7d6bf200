use serde::{Deserialize, Serialize};

use crate::domain::BookFilter;
use crate::domain::commands::CreateBook;

/// 書籍登録リクエスト（POST /book）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub year: i64,
    pub price: i64,
    pub genres: Vec<String>,
}

impl CreateBookRequest {
    pub fn to_command(self) -> CreateBook {
        CreateBook {
            title: self.title,
            author: self.author,
            year: self.year,
            price: self.price,
            genres: self.genres,
        }
    }
}

/// 成功レスポンス `{ "result": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultResponse<T> {
    pub result: T,
}

impl<T> ResultResponse<T> {
    pub fn new(result: T) -> Self {
        Self { result }
    }
}

/// エラーレスポンス `{ "errorMessage": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "errorMessage")]
    pub error_message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error_message: message.into(),
        }
    }
}

/// 一覧・件数取得のクエリパラメータ
///
/// 数値パラメータは文字列で受け取り、整数として解釈できないものは
/// 未指定と同じ扱いにする。
#[derive(Debug, Default, Deserialize)]
pub struct BooksQuery {
    pub author: Option<String>,
    #[serde(rename = "price-bigger-than")]
    pub price_bigger_than: Option<String>,
    #[serde(rename = "price-less-than")]
    pub price_less_than: Option<String>,
    #[serde(rename = "year-bigger-than")]
    pub year_bigger_than: Option<String>,
    #[serde(rename = "year-less-than")]
    pub year_less_than: Option<String>,
    /// カンマ区切り
    pub genres: Option<String>,
}

impl BooksQuery {
    pub fn to_filter(&self) -> BookFilter {
        BookFilter {
            price_min: parse_lenient(&self.price_bigger_than),
            price_max: parse_lenient(&self.price_less_than),
            year_min: parse_lenient(&self.year_bigger_than),
            year_max: parse_lenient(&self.year_less_than),
            ..Default::default()
        }
        .with_author(self.author.as_deref().unwrap_or_default())
        .with_genres_csv(self.genres.as_deref().unwrap_or_default())
    }
}

/// `?id=<id>` を持つリクエスト（GET / DELETE /book）
#[derive(Debug, Default, Deserialize)]
pub struct BookIdQuery {
    pub id: Option<String>,
}

/// 価格更新のクエリパラメータ（PUT /book）
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePriceQuery {
    pub id: Option<String>,
    pub price: Option<String>,
}

/// ログレベル取得・変更のクエリパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct LogLevelQuery {
    #[serde(rename = "logger-name")]
    pub logger_name: Option<String>,
    #[serde(rename = "logger-level")]
    pub logger_level: Option<String>,
}

fn parse_lenient(value: &Option<String>) -> Option<i64> {
    value.as_deref().and_then(|v| v.trim().parse().ok())
}

/// 必須の整数クエリパラメータを解釈する
///
/// 失敗時はパラメータ名を返す。
pub fn parse_required_int(name: &'static str, value: Option<&str>) -> Result<i64, &'static str> {
    value
        .and_then(|v| v.trim().parse().ok())
        .ok_or(name)
}
