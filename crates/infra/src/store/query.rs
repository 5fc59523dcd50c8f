//! Paging primitives shared by every record store.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_LIMIT: u32 = 50;
pub const MAX_PAGE_LIMIT: u32 = 1000;

/// Pagination parameters for list/search queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of records to return.
    pub limit: u32,
    /// Offset for pagination (0-based).
    pub offset: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

impl Pagination {
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self::bounded(limit, offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT)
    }

    /// Build pagination with explicit defaults; a zero limit falls back to `default_limit`.
    pub fn bounded(limit: Option<u32>, offset: Option<u32>, default_limit: u32, max_limit: u32) -> Self {
        let limit = match limit {
            None | Some(0) => default_limit,
            Some(l) => l,
        };
        Self {
            limit: limit.min(max_limit),
            offset: offset.unwrap_or(0),
        }
    }
}

/// Caller-facing paging request. Unset fields take the configured defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

impl PageRequest {
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self { limit, offset }
    }

    /// Resolve against explicit bounds; see `Pagination::bounded`.
    pub fn resolve(self, default_limit: u32, max_limit: u32) -> Pagination {
        Pagination::bounded(self.limit, self.offset, default_limit, max_limit)
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The records on this page.
    pub items: Vec<T>,
    /// Total number of records matching the query (across all pages).
    pub total: u64,
    /// Pagination parameters used.
    pub pagination: Pagination,
    /// Whether there are more records after this page.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Slice an already-filtered, already-ordered sequence into a page.
    pub fn from_ordered<I>(records: I, pagination: Pagination) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut total: u64 = 0;
        let mut items = Vec::new();
        let start = pagination.offset as u64;
        let end = start + pagination.limit as u64;
        for record in records {
            if total >= start && total < end {
                items.push(record);
            }
            total += 1;
        }
        Self {
            has_more: end < total,
            items,
            total,
            pagination,
        }
    }

    /// Convert the items, keeping the paging metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            pagination: self.pagination,
            has_more: self.has_more,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
