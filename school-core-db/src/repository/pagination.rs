use school_core_api::{PageParams, Paginated};

/// Offset-based page request handed to repositories
///
/// # Example
/// ```
/// use school_core_db::repository::pagination::PageRequest;
///
/// let first = PageRequest::new(20, 0);
/// let third = PageRequest::for_page(20, 3);
/// assert_eq!(third.offset, 40);
/// assert_eq!(third.page_number(), 3);
/// # let _ = first;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Maximum number of items to return
    pub limit: usize,
    /// Number of items to skip
    pub offset: usize,
}

impl PageRequest {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Page request for a 1-based page number; page 0 is treated as page 1.
    pub fn for_page(page_size: usize, page_number: usize) -> Self {
        let page_number = page_number.max(1);
        Self {
            limit: page_size,
            offset: (page_number - 1) * page_size,
        }
    }

    /// Get the page number (1-based) for this request
    pub fn page_number(&self) -> usize {
        if self.limit == 0 {
            1
        } else {
            (self.offset / self.limit) + 1
        }
    }
}

impl From<PageParams> for PageRequest {
    fn from(params: PageParams) -> Self {
        Self::for_page(params.limit as usize, params.page as usize)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
        }
    }
}

/// One page of repository results plus the total across all pages
///
/// # Example
/// ```
/// use school_core_db::repository::pagination::Page;
///
/// let page = Page::new(vec![21, 22, 23], 45, 20, 40);
///
/// assert!(!page.has_more());
/// assert_eq!(page.page_number(), 3);
/// assert_eq!(page.total_pages(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// The items in this page
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total: usize,
    /// Maximum number of items per page
    pub limit: usize,
    /// Number of items skipped before this page
    pub offset: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: usize, limit: usize, offset: usize) -> Self {
        Self {
            items,
            total,
            limit,
            offset,
        }
    }

    /// Slice an already filtered and ordered result set, as in-process backends do.
    pub fn from_full(all: Vec<T>, request: PageRequest) -> Self {
        let total = all.len();
        let items = all
            .into_iter()
            .skip(request.offset)
            .take(request.limit)
            .collect();
        Self::new(items, total, request.limit, request.offset)
    }

    /// Check if there are more pages after this one
    pub fn has_more(&self) -> bool {
        self.offset + self.items.len() < self.total
    }

    /// Get the current page number (1-based)
    pub fn page_number(&self) -> usize {
        if self.limit == 0 {
            1
        } else {
            (self.offset / self.limit) + 1
        }
    }

    /// Get the total number of pages
    pub fn total_pages(&self) -> usize {
        if self.limit == 0 {
            1
        } else {
            self.total.div_ceil(self.limit)
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            limit: self.limit,
            offset: self.offset,
        }
    }

    /// Wrap into the `{data, pagination}` wire envelope.
    pub fn into_paginated(self, params: PageParams) -> Paginated<T> {
        Paginated::new(self.items, params, self.total as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_page_of_forty_five() {
        let rows: Vec<usize> = (1..=45).collect();
        let request = PageRequest::from(PageParams::new(2, 20));
        let page = Page::from_full(rows, request);

        assert_eq!(page.items.first(), Some(&21));
        assert_eq!(page.items.last(), Some(&40));
        assert_eq!(page.total, 45);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_more());

        let paginated = page.into_paginated(PageParams::new(2, 20));
        assert_eq!(paginated.pagination.total_pages, 3);
        assert_eq!(paginated.data.len(), 20);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let page = Page::from_full(vec![1, 2, 3], PageRequest::for_page(20, 5));
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
        assert!(!page.has_more());
    }
}
