use serde::{Deserialize, Serialize};

use super::commands::CreateBook;
use super::errors::BookError;
use super::value_objects::{BookId, is_accepted_year};

/// 書籍
///
/// 不変条件：
/// - タイトルはカタログ内で大文字小文字を区別せず一意
/// - 出版年は 1940〜2100
/// - 価格は作成時 > 0、更新後 >= 0
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: i64,
    pub price: i64,
    pub genres: Vec<String>,
}

impl Book {
    /// 登録コマンドと採番済みIDから書籍を組み立てる
    pub fn from_command(id: BookId, cmd: CreateBook) -> Self {
        Self {
            id,
            title: cmd.title,
            author: cmd.author,
            year: cmd.year,
            price: cmd.price,
            genres: cmd.genres,
        }
    }

    /// タイトルが一致するか（大文字小文字を区別しない）
    pub fn has_title(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }

    /// 価格を変更し、変更前の価格を返す
    pub fn change_price(&mut self, new_price: i64) -> Result<i64, BookError> {
        validate_price_update(self.id, new_price)?;
        Ok(std::mem::replace(&mut self.price, new_price))
    }
}

/// 新規登録のバリデーション（純粋な関数）
///
/// チェック順序は固定で、最初に失敗したものだけを返す：
/// 1. タイトル重複
/// 2. 出版年の範囲
/// 3. 価格が正であること
pub fn validate_new_book(existing: &[Book], cmd: &CreateBook) -> Result<(), BookError> {
    if existing.iter().any(|book| book.has_title(&cmd.title)) {
        return Err(BookError::DuplicateTitle {
            title: cmd.title.clone(),
        });
    }

    if !is_accepted_year(cmd.year) {
        return Err(BookError::YearOutOfRange { year: cmd.year });
    }

    if cmd.price <= 0 {
        return Err(BookError::NonPositivePrice);
    }

    Ok(())
}

/// 価格更新のバリデーション（0は許容）
pub fn validate_price_update(id: BookId, new_price: i64) -> Result<(), BookError> {
    if new_price < 0 {
        return Err(BookError::NegativePriceUpdate { id });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_cmd(title: &str, year: i64, price: i64) -> CreateBook {
        CreateBook {
            title: title.to_string(),
            author: "Herbert".to_string(),
            year,
            price,
            genres: vec!["scifi".to_string()],
        }
    }

    fn stored(id: i64, title: &str) -> Book {
        Book::from_command(BookId::new(id), create_cmd(title, 1965, 20))
    }

    #[test]
    fn test_valid_book_passes() {
        assert!(validate_new_book(&[], &create_cmd("Dune", 1965, 20)).is_ok());
    }

    #[test]
    fn test_duplicate_title_is_case_insensitive() {
        let existing = vec![stored(1, "Dune")];
        let result = validate_new_book(&existing, &create_cmd("dUNE", 1965, 20));
        assert_eq!(
            result,
            Err(BookError::DuplicateTitle {
                title: "dUNE".to_string()
            })
        );
    }

    #[test]
    fn test_duplicate_title_checked_before_year_and_price() {
        let existing = vec![stored(1, "Dune")];
        let result = validate_new_book(&existing, &create_cmd("Dune", 1800, -5));
        assert!(matches!(result, Err(BookError::DuplicateTitle { .. })));
    }

    #[test]
    fn test_year_checked_before_price() {
        let result = validate_new_book(&[], &create_cmd("Dune", 2101, 0));
        assert_eq!(result, Err(BookError::YearOutOfRange { year: 2101 }));
    }

    #[test]
    fn test_year_boundaries_accepted() {
        assert!(validate_new_book(&[], &create_cmd("Old", 1940, 1)).is_ok());
        assert!(validate_new_book(&[], &create_cmd("New", 2100, 1)).is_ok());
        assert!(validate_new_book(&[], &create_cmd("Older", 1939, 1)).is_err());
    }

    #[test]
    fn test_zero_price_rejected_on_create() {
        let result = validate_new_book(&[], &create_cmd("Dune", 1965, 0));
        assert_eq!(result, Err(BookError::NonPositivePrice));
    }

    #[test]
    fn test_change_price_returns_old_price() {
        let mut book = stored(3, "Dune");
        assert_eq!(book.change_price(0), Ok(20));
        assert_eq!(book.price, 0);
    }

    #[test]
    fn test_negative_price_update_leaves_price_unchanged() {
        let mut book = stored(3, "Dune");
        let result = book.change_price(-1);
        assert_eq!(
            result,
            Err(BookError::NegativePriceUpdate { id: BookId::new(3) })
        );
        assert_eq!(book.price, 20);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            BookError::YearOutOfRange { year: 1900 }.to_string(),
            "Error: Can't create new Book that its year [1900] is not in the accepted range [1940 -> 2100]"
        );
        assert_eq!(
            BookError::NotFound { id: BookId::new(9) }.to_string(),
            "Error: no such Book with id 9"
        );
    }
}
