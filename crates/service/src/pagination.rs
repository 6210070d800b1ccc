//! Pagination utilities for service layer
//!
//! Provides the list query accepted by every resource and the page it yields.

use serde::Deserialize;

/// Largest offset the SQL drivers bind; they take a signed 64-bit value.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Pagination parameters
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    /// 1-based page index
    pub page: u64,
    /// items per page
    pub size: u64,
}

impl Pagination {
    /// Clamp to sane bounds; returns `(offset, size)`. The offset saturates,
    /// so callers compare it against [`MAX_OFFSET`] before querying.
    pub fn normalize(self) -> (u64, u64) {
        let page = self.page.max(1);
        let size = self.size.clamp(1, 100);
        ((page - 1).saturating_mul(size), size)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, size: 25 } }
}

/// Query string accepted by list endpoints.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub size: Option<u64>,
    /// Substring matched case-insensitively against the resource's search columns.
    pub keyword: Option<String>,
    /// `asc` (default) or `desc`, applied to the id.
    pub order: Option<String>,
}

impl ListQuery {
    pub fn pagination(&self) -> Pagination {
        let d = Pagination::default();
        Pagination { page: self.page.unwrap_or(d.page), size: self.size.unwrap_or(d.size) }
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    pub fn descending(&self) -> bool {
        self.order.as_deref().is_some_and(|o| o.eq_ignore_ascii_case("desc"))
    }
}

/// One page of results plus the numbers a client needs to page further.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub size: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page { items: self.items.into_iter().map(f).collect(), total: self.total, page: self.page, size: self.size }
    }
}
