//! Paged browse metadata.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    #[serde(default)]
    pub total: u64,
}

/// `meta` object attached to paged browse responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrowseMeta {
    #[serde(default)]
    pub pagination: Pagination,
}
