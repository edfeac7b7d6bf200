use thiserror::Error;

use crate::domain::BookError;

/// 書籍管理アプリケーション層のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookApplicationError {
    /// ドメイン層のエラー（バリデーション違反・存在しない書籍）
    #[error(transparent)]
    Domain(#[from] BookError),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, BookApplicationError>;
