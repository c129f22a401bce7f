//! Pagination of result lists.

use serde::Serialize;

use super::SearchError;

/// A zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    size: usize,
}

impl PageRequest {
    /// Create a page request.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if `size` is zero.
    pub fn new(page: usize, size: usize) -> Result<Self, SearchError> {
        if size == 0 {
            return Err(SearchError::InvalidRequest(
                "page size must be positive".to_string(),
            ));
        }
        Ok(Self { page, size })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Index of the first element on this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 0, size: 10 }
    }
}

/// One page of an ordered result list, with the size of the whole list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Cut the page described by `request` out of the full list.
    pub fn from_full(items: Vec<T>, request: &PageRequest) -> Self {
        let (content, total_elements) = paginate(items, request.offset(), request.size());
        Self {
            content,
            page: request.page(),
            size: request.size(),
            total_elements,
            total_pages: total_elements.div_ceil(request.size()),
        }
    }

    /// Convert each element, keeping the paging metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }

    /// Fallible [`Page::map`]; stops at the first error.
    pub fn try_map<U, E, F>(self, f: F) -> Result<Page<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        Ok(Page {
            content: self.content.into_iter().map(f).collect::<Result<_, _>>()?,
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Slice `items[offset..offset + limit]`, returning it with the full length.
///
/// The total is counted before slicing. An offset at or past the end
/// gives an empty slice.
pub fn paginate<T>(items: Vec<T>, offset: usize, limit: usize) -> (Vec<T>, usize) {
    let total = items.len();
    if offset >= total {
        return (Vec::new(), total);
    }
    let slice = items.into_iter().skip(offset).take(limit).collect();
    (slice, total)
}
