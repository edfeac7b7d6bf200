use super::book::{Book, validate_new_book};
use super::commands::{CreateBook, UpdateBookPrice};
use super::errors::BookError;
use super::filter::{BookFilter, sort_by_title};
use super::value_objects::BookId;

/// 価格変更の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceChange {
    pub book_id: BookId,
    pub title: String,
    pub old_price: i64,
    pub new_price: i64,
}

/// 書籍カタログ集約
///
/// 書籍の一覧とID採番を1つにまとめる。プロセスの生存期間だけ存在し、
/// 永続化はしない。ID は削除後も再利用されない。
#[derive(Debug, Clone)]
pub struct BookCatalog {
    books: Vec<Book>,
    next_id: BookId,
}

impl Default for BookCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl BookCatalog {
    pub fn new() -> Self {
        Self {
            books: Vec::new(),
            next_id: BookId::FIRST,
        }
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// 書籍を登録する
    ///
    /// バリデーションに通れば次のIDを採番して末尾に追加する。
    /// 失敗した場合、カタログは変更されない。
    pub fn create(&mut self, cmd: CreateBook) -> Result<&Book, BookError> {
        validate_new_book(&self.books, &cmd)?;

        let id = self.next_id;
        self.next_id = id.next();
        self.books.push(Book::from_command(id, cmd));

        let index = self.books.len() - 1;
        Ok(&self.books[index])
    }

    pub fn find(&self, id: BookId) -> Result<&Book, BookError> {
        self.books
            .iter()
            .find(|book| book.id == id)
            .ok_or(BookError::NotFound { id })
    }

    /// 価格を更新する
    ///
    /// 存在確認が先、値のチェックが後。
    pub fn update_price(&mut self, cmd: UpdateBookPrice) -> Result<PriceChange, BookError> {
        let book = self
            .books
            .iter_mut()
            .find(|book| book.id == cmd.book_id)
            .ok_or(BookError::NotFound { id: cmd.book_id })?;

        let old_price = book.change_price(cmd.price)?;

        Ok(PriceChange {
            book_id: book.id,
            title: book.title.clone(),
            old_price,
            new_price: cmd.price,
        })
    }

    /// 書籍を削除し、削除した書籍を返す
    pub fn remove(&mut self, id: BookId) -> Result<Book, BookError> {
        let index = self
            .books
            .iter()
            .position(|book| book.id == id)
            .ok_or(BookError::NotFound { id })?;
        Ok(self.books.remove(index))
    }

    /// フィルタに一致する書籍の件数
    pub fn count(&self, filter: &BookFilter) -> usize {
        self.books.iter().filter(|book| filter.matches(book)).count()
    }

    /// フィルタに一致する書籍をタイトル順で返す
    pub fn list(&self, filter: &BookFilter) -> Vec<Book> {
        let mut books: Vec<Book> = filter.apply(&self.books).into_iter().cloned().collect();
        sort_by_title(&mut books);
        books
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_cmd(title: &str) -> CreateBook {
        CreateBook {
            title: title.to_string(),
            author: "Herbert".to_string(),
            year: 1965,
            price: 20,
            genres: vec!["scifi".to_string()],
        }
    }

    #[test]
    fn test_ids_are_assigned_from_one() {
        let mut catalog = BookCatalog::new();
        assert_eq!(catalog.create(create_cmd("A")).unwrap().id, BookId::new(1));
        assert_eq!(catalog.create(create_cmd("B")).unwrap().id, BookId::new(2));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_failed_create_leaves_catalog_unchanged() {
        let mut catalog = BookCatalog::new();
        catalog.create(create_cmd("Dune")).unwrap();

        let result = catalog.create(create_cmd("DUNE"));
        assert!(matches!(result, Err(BookError::DuplicateTitle { .. })));
        assert_eq!(catalog.len(), 1);

        // 失敗した登録はIDを消費しない
        assert_eq!(catalog.create(create_cmd("Emma")).unwrap().id, BookId::new(2));
    }

    #[test]
    fn test_ids_are_never_reused_after_removal() {
        let mut catalog = BookCatalog::new();
        catalog.create(create_cmd("A")).unwrap();
        catalog.create(create_cmd("B")).unwrap();

        let removed = catalog.remove(BookId::new(2)).unwrap();
        assert_eq!(removed.title, "B");
        assert_eq!(catalog.len(), 1);

        assert_eq!(catalog.create(create_cmd("C")).unwrap().id, BookId::new(3));
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut catalog = BookCatalog::new();
        catalog.create(create_cmd("A")).unwrap();

        let result = catalog.remove(BookId::new(42));
        assert_eq!(result, Err(BookError::NotFound { id: BookId::new(42) }));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_update_price_not_found_takes_precedence() {
        let mut catalog = BookCatalog::new();
        let result = catalog.update_price(UpdateBookPrice {
            book_id: BookId::new(5),
            price: -1,
        });
        assert_eq!(result, Err(BookError::NotFound { id: BookId::new(5) }));
    }

    #[test]
    fn test_update_price_reports_change() {
        let mut catalog = BookCatalog::new();
        catalog.create(create_cmd("Dune")).unwrap();

        let change = catalog
            .update_price(UpdateBookPrice {
                book_id: BookId::new(1),
                price: 35,
            })
            .unwrap();
        assert_eq!(change.old_price, 20);
        assert_eq!(change.new_price, 35);
        assert_eq!(change.title, "Dune");
        assert_eq!(catalog.find(BookId::new(1)).unwrap().price, 35);
    }

    #[test]
    fn test_list_sorts_by_title() {
        let mut catalog = BookCatalog::new();
        catalog.create(create_cmd("Beta")).unwrap();
        catalog.create(create_cmd("alpha")).unwrap();

        let titles: Vec<String> = catalog
            .list(&BookFilter::default())
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["alpha", "Beta"]);
        assert_eq!(catalog.count(&BookFilter::default()), 2);
    }
}
