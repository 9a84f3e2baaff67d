//! Paginated list handling
//!
//! [`Page`] is the canonical shape every list endpoint resolves to.
//! The backend is not consistent yet: newer endpoints emit `Page`
//! directly, older ones emit Spring-style pages or bare arrays.
//! [`PageCompat`] is a migration shim that accepts all three and
//! normalizes; it should disappear once the backend settles on `Page`.

use serde::{Deserialize, Serialize};

/// Canonical paginated result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
}

/// Compatibility shim over the list shapes the backend actually emits
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum PageCompat<T> {
    Canonical(Page<T>),
    Spring {
        content: Vec<T>,
        #[serde(rename = "totalElements")]
        total_elements: u64,
        number: u32,
        size: u32,
    },
    Bare(Vec<T>),
}

impl<T> PageCompat<T> {
    /// Normalize into the canonical shape.
    ///
    /// `page` and `size` echo the request for bare-array responses,
    /// which carry no paging information of their own.
    pub(crate) fn normalize(self, page: u32, size: u32) -> Page<T> {
        match self {
            PageCompat::Canonical(page) => page,
            PageCompat::Spring {
                content,
                total_elements,
                number,
                size,
            } => Page {
                items: content,
                total: total_elements,
                page: number,
                size,
            },
            PageCompat::Bare(items) => Page {
                total: items.len() as u64,
                items,
                page,
                size,
            },
        }
    }
}
