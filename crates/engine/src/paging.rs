//! Keyset ("load more") pagination shared by every list.
//!
//! Lists are ordered newest first by a primary key column, ties broken by
//! `id DESC`. A cursor is the id of the last record of the previous page; the
//! next page holds the records strictly after it in that order.

use sea_orm::{ColumnTrait, Condition, Value};
use serde::{Deserialize, Serialize};

pub const BILLS_PAGE_SIZE: u64 = 30;
pub const ITEMS_PAGE_SIZE: u64 = 30;
pub const USERS_PAGE_SIZE: u64 = 30;
pub const WEDDINGS_PAGE_SIZE: u64 = 40;

/// One page of a list.
///
/// `next_cursor` is set only when more records follow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
        }
    }
}

/// Effective page size: the list's fixed size, or a smaller positive
/// request.
pub(crate) fn page_limit(requested: Option<u64>, page_size: u64) -> u64 {
    requested
        .filter(|limit| *limit > 0)
        .map_or(page_size, |limit| limit.min(page_size))
}

/// Records strictly before `(primary_value, id_value)` in
/// `primary DESC, id DESC` order.
pub(crate) fn before<C>(primary: C, id: C, primary_value: impl Into<Value>, id_value: &str) -> Condition
where
    C: ColumnTrait,
{
    let primary_value: Value = primary_value.into();
    Condition::any().add(primary.lt(primary_value.clone())).add(
        Condition::all()
            .add(primary.eq(primary_value))
            .add(id.lt(id_value.to_string())),
    )
}

/// Builds a page from rows fetched with `limit + 1`.
pub(crate) fn into_page<T>(mut rows: Vec<T>, limit: u64, cursor_of: impl Fn(&T) -> String) -> Page<T> {
    let has_more = rows.len() as u64 > limit;
    rows.truncate(limit as usize);
    let next_cursor = if has_more {
        rows.last().map(cursor_of)
    } else {
        None
    };
    Page {
        items: rows,
        next_cursor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_never_exceeds_page_size() {
        assert_eq!(page_limit(None, 30), 30);
        assert_eq!(page_limit(Some(0), 30), 30);
        assert_eq!(page_limit(Some(10), 30), 10);
        assert_eq!(page_limit(Some(500), 40), 40);
    }

    #[test]
    fn page_sets_cursor_only_when_more_rows() {
        let full = into_page((1..=31).collect::<Vec<i32>>(), 30, |n| n.to_string());
        assert_eq!(full.items.len(), 30);
        assert_eq!(full.next_cursor.as_deref(), Some("30"));

        let last = into_page((1..=5).collect::<Vec<i32>>(), 30, |n| n.to_string());
        assert_eq!(last.items.len(), 5);
        assert_eq!(last.next_cursor, None);

        let exact = into_page((1..=30).collect::<Vec<i32>>(), 30, |n| n.to_string());
        assert_eq!(exact.next_cursor, None);
    }
}
