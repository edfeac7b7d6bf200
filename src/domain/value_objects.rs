use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// 受け付ける出版年の範囲
pub const ACCEPTED_YEARS: RangeInclusive<i64> = 1940..=2100;

/// 書籍ID - カタログ内で一意、1から単調増加
///
/// 削除された書籍のIDは再利用されない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(i64);

impl BookId {
    /// 最初に採番されるID
    pub const FIRST: BookId = BookId(1);

    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// 次のID
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 出版年が受付範囲内かどうか
pub fn is_accepted_year(year: i64) -> bool {
    ACCEPTED_YEARS.contains(&year)
}
