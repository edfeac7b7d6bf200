use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::commands::{CreateBook, UpdateBookPrice};
use crate::domain::{Book, BookCatalog, BookFilter, BookId};
use crate::logging::{Loggers, RequestNumber};

use super::errors::Result;

/// サービスの依存関係
///
/// カタログは単一の Mutex で保護し、各ユースケースは
/// チェックと変更を1回のロック取得の中で行う。
#[derive(Clone, Default)]
pub struct ServiceDependencies {
    pub catalog: Arc<Mutex<BookCatalog>>,
    pub loggers: Arc<Loggers>,
}

impl ServiceDependencies {
    pub fn new(catalog: BookCatalog, loggers: Loggers) -> Self {
        Self {
            catalog: Arc::new(Mutex::new(catalog)),
            loggers: Arc::new(loggers),
        }
    }
}

/// 書籍を登録する
///
/// ビジネスルール（この順で判定し、最初の違反で終了）：
/// - タイトルが既存の書籍と重複しないこと（大文字小文字を区別しない）
/// - 出版年が 1940〜2100 であること
/// - 価格が正であること
///
/// # 戻り値
/// 採番された書籍ID
pub async fn create_book(
    deps: &ServiceDependencies,
    request: RequestNumber,
    cmd: CreateBook,
) -> Result<BookId> {
    let (book_id, title, previous_count) = {
        let mut catalog = deps.catalog.lock().await;
        let book = catalog.create(cmd)?;
        let (id, title) = (book.id, book.title.clone());
        (id, title, catalog.len() - 1)
    };

    let books_log = deps.loggers.books();
    books_log.info(request, format_args!("Creating new Book with Title [{}]", title));
    books_log.debug(
        request,
        format_args!(
            "Currently there are {} Books in the system. New Book will be assigned with id {}",
            previous_count, book_id
        ),
    );

    Ok(book_id)
}

/// フィルタに一致する書籍の件数を返す
pub async fn count_books(
    deps: &ServiceDependencies,
    request: RequestNumber,
    filter: &BookFilter,
) -> usize {
    let count = deps.catalog.lock().await.count(filter);

    deps.loggers.books().info(
        request,
        format_args!("Total Books found for requested filters is {}", count),
    );
    count
}

/// フィルタに一致する書籍をタイトル順（大文字小文字を区別しない）で返す
pub async fn list_books(
    deps: &ServiceDependencies,
    request: RequestNumber,
    filter: &BookFilter,
) -> Vec<Book> {
    let books = deps.catalog.lock().await.list(filter);

    deps.loggers.books().info(
        request,
        format_args!("Total Books found for requested filters is {}", books.len()),
    );
    books
}

/// IDで書籍を1件取得する
pub async fn get_book(
    deps: &ServiceDependencies,
    request: RequestNumber,
    book_id: BookId,
) -> Result<Book> {
    let book = deps.catalog.lock().await.find(book_id)?.clone();

    deps.loggers
        .books()
        .debug(request, format_args!("Fetching book id {} details", book_id));
    Ok(book)
}

/// 書籍が存在することだけを確認する（ログは出さない）
pub async fn ensure_book_exists(deps: &ServiceDependencies, book_id: BookId) -> Result<()> {
    deps.catalog.lock().await.find(book_id)?;
    Ok(())
}

/// 書籍の価格を更新する
///
/// ビジネスルール：
/// - 書籍が存在すること
/// - 新しい価格が負でないこと（0は許容）
///
/// # 戻り値
/// 変更前の価格
pub async fn update_book_price(
    deps: &ServiceDependencies,
    request: RequestNumber,
    cmd: UpdateBookPrice,
) -> Result<i64> {
    let change = deps.catalog.lock().await.update_price(cmd)?;

    let books_log = deps.loggers.books();
    books_log.info(
        request,
        format_args!(
            "Update Book id [{}] price to {}",
            change.book_id, change.new_price
        ),
    );
    books_log.debug(
        request,
        format_args!(
            "Book [{}] price change: {} --> {}",
            change.title, change.old_price, change.new_price
        ),
    );

    Ok(change.old_price)
}

/// 書籍を削除する
///
/// # 戻り値
/// 削除後の書籍数
pub async fn delete_book(
    deps: &ServiceDependencies,
    request: RequestNumber,
    book_id: BookId,
) -> Result<usize> {
    let (removed, remaining) = {
        let mut catalog = deps.catalog.lock().await;
        let removed = catalog.remove(book_id)?;
        (removed, catalog.len())
    };

    let books_log = deps.loggers.books();
    books_log.info(request, format_args!("Removing book [{}]", removed.title));
    books_log.debug(
        request,
        format_args!(
            "After removing book [{}] id: [{}] there are {} books in the system",
            removed.title, book_id, remaining
        ),
    );

    Ok(remaining)
}
