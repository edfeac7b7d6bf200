use super::book::Book;

/// 書籍一覧・件数取得のフィルタ条件
///
/// すべての条件は任意で、指定されたものが論理積で適用される。
/// 数値の境界はすべて両端を含む。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    /// 著者（大文字小文字を区別しない完全一致）
    pub author: Option<String>,
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
    pub year_min: Option<i64>,
    pub year_max: Option<i64>,
    /// いずれか1つでも持っていれば一致
    pub genres: Option<Vec<String>>,
}

impl BookFilter {
    /// 著者条件を設定する。空文字列は条件なしとして扱う
    pub fn with_author(mut self, author: &str) -> Self {
        self.author = (!author.is_empty()).then(|| author.to_lowercase());
        self
    }

    /// カンマ区切りのジャンル指定を設定する
    ///
    /// 先頭要素が空の場合（未指定や `genres=` など）は条件なし。
    pub fn with_genres_csv(mut self, csv: &str) -> Self {
        let genres: Vec<String> = csv.split(',').map(str::to_string).collect();
        self.genres = genres
            .first()
            .is_some_and(|first| !first.is_empty())
            .then_some(genres);
        self
    }

    pub fn matches(&self, book: &Book) -> bool {
        if let Some(author) = &self.author {
            if book.author.to_lowercase() != *author {
                return false;
            }
        }
        if self.price_min.is_some_and(|min| book.price < min) {
            return false;
        }
        if self.price_max.is_some_and(|max| book.price > max) {
            return false;
        }
        if self.year_min.is_some_and(|min| book.year < min) {
            return false;
        }
        if self.year_max.is_some_and(|max| book.year > max) {
            return false;
        }
        if let Some(genres) = &self.genres {
            if !genres.iter().any(|genre| book.genres.contains(genre)) {
                return false;
            }
        }
        true
    }

    /// 条件に一致する書籍を格納順のまま返す
    pub fn apply<'a>(&self, books: &'a [Book]) -> Vec<&'a Book> {
        books.iter().filter(|book| self.matches(book)).collect()
    }
}

/// タイトル昇順（大文字小文字を区別しない、安定ソート）
pub fn sort_by_title(books: &mut [Book]) {
    books.sort_by_cached_key(|book| book.title.to_lowercase());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::BookId;

    fn book(id: i64, title: &str, author: &str, year: i64, price: i64, genres: &[&str]) -> Book {
        Book {
            id: BookId::new(id),
            title: title.to_string(),
            author: author.to_string(),
            year,
            price,
            genres: genres.iter().map(|g| g.to_string()).collect(),
        }
    }

    fn catalog() -> Vec<Book> {
        vec![
            book(1, "Dune", "Frank Herbert", 1965, 20, &["scifi"]),
            book(2, "Emma", "Jane Austen", 1950, 10, &["novel", "romance"]),
            book(3, "Neuromancer", "William Gibson", 1984, 15, &["scifi", "cyberpunk"]),
        ]
    }

    fn ids(books: Vec<&Book>) -> Vec<i64> {
        books.iter().map(|b| b.id.value()).collect()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let books = catalog();
        assert_eq!(BookFilter::default().apply(&books).len(), 3);
    }

    #[test]
    fn test_author_is_case_insensitive_exact_match() {
        let books = catalog();
        let filter = BookFilter::default().with_author("JANE austen");
        assert_eq!(ids(filter.apply(&books)), vec![2]);

        let filter = BookFilter::default().with_author("Jane");
        assert!(filter.apply(&books).is_empty());
    }

    #[test]
    fn test_empty_author_means_no_filter() {
        assert_eq!(BookFilter::default().with_author(""), BookFilter::default());
    }

    #[test]
    fn test_numeric_bounds_are_inclusive() {
        let books = catalog();
        let filter = BookFilter {
            price_min: Some(15),
            price_max: Some(20),
            ..Default::default()
        };
        assert_eq!(ids(filter.apply(&books)), vec![1, 3]);

        let filter = BookFilter {
            year_min: Some(1950),
            year_max: Some(1965),
            ..Default::default()
        };
        assert_eq!(ids(filter.apply(&books)), vec![1, 2]);
    }

    #[test]
    fn test_genres_match_any_listed() {
        let books = catalog();
        let filter = BookFilter::default().with_genres_csv("romance,cyberpunk");
        assert_eq!(ids(filter.apply(&books)), vec![2, 3]);
    }

    #[test]
    fn test_genres_are_case_sensitive() {
        let books = catalog();
        let filter = BookFilter::default().with_genres_csv("SCIFI");
        assert!(filter.apply(&books).is_empty());
    }

    #[test]
    fn test_genres_ignored_when_first_token_empty() {
        assert_eq!(BookFilter::default().with_genres_csv("").genres, None);
        assert_eq!(BookFilter::default().with_genres_csv(",scifi").genres, None);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let books = catalog();
        let filter = BookFilter {
            year_min: Some(1960),
            ..Default::default()
        }
        .with_genres_csv("scifi")
        .with_author("william gibson");
        assert_eq!(ids(filter.apply(&books)), vec![3]);
    }

    #[test]
    fn test_sort_by_title_ignores_case_and_is_stable() {
        let mut books = vec![
            book(1, "Beta", "a", 1965, 1, &[]),
            book(2, "alpha", "a", 1965, 1, &[]),
            book(3, "ALPHA", "a", 1965, 1, &[]),
        ];
        sort_by_title(&mut books);
        let titles: Vec<&str> = books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["alpha", "ALPHA", "Beta"]);
    }
}
