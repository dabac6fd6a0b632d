use serde::Serialize;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// A bounded slice of an ordered result set plus total-count metadata.
///
/// Field names follow the shape the web frontend consumes.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: usize,
    pub total_pages: usize,
    pub size: usize,
    /// Zero-based page index.
    pub number: usize,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, number: usize, size: usize, total_elements: usize) -> Self {
        let total_pages = if size == 0 {
            usize::from(total_elements > 0)
        } else {
            total_elements.div_ceil(size)
        };
        let number_of_elements = content.len();

        Self {
            empty: content.is_empty(),
            content,
            total_elements,
            total_pages,
            size,
            number,
            number_of_elements,
            first: number == 0,
            last: number.saturating_add(1) >= total_pages,
        }
    }

    /// Converts every item, keeping the page metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            size: self.size,
            number: self.number,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
            empty: self.empty,
        }
    }
}
