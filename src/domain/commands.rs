use serde::{Deserialize, Serialize};

use super::BookId;

/// コマンド：書籍を登録する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub year: i64,
    pub price: i64,
    pub genres: Vec<String>,
}

/// コマンド：書籍の価格を更新する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBookPrice {
    pub book_id: BookId,
    pub price: i64,
}
