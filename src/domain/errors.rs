use thiserror::Error;

use super::BookId;

/// 書籍カタログのドメインエラー
///
/// 表示文字列はそのままクライアントへのエラーメッセージとログ行になる。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    /// 同じタイトル（大文字小文字を区別しない）の書籍が既に存在する
    #[error("Error: Book with the title [{title}] already exists in the system")]
    DuplicateTitle { title: String },

    /// 出版年が受付範囲外
    #[error(
        "Error: Can't create new Book that its year [{year}] is not in the accepted range [1940 -> 2100]"
    )]
    YearOutOfRange { year: i64 },

    /// 新規作成時の価格が0以下
    #[error("Error: Can't create new Book with negative price")]
    NonPositivePrice,

    /// 価格更新の値が負
    #[error("Error: price update for book [{id}] must be a positive integer")]
    NegativePriceUpdate { id: BookId },

    /// IDに該当する書籍がない
    #[error("Error: no such Book with id {id}")]
    NotFound { id: BookId },
}
