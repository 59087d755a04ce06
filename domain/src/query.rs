//! Read-path helpers: pagination windows and text filters.

use crate::Record;

/// A contiguous slice of a collection, counted in store order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: usize,
    pub limit: usize,
}

impl Window {
    /// Empty window, used for non-positive sizes.
    pub const EMPTY: Window = Window {
        offset: 0,
        limit: 0,
    };

    /// Window for a 1-based `page` of `size` records.
    ///
    /// `page < 1` is clamped to the first page, `size < 1` selects nothing and
    /// `size` never exceeds `max_size`.
    pub fn page(page: i64, size: i64, max_size: usize) -> Self {
        if size <= 0 {
            return Self::EMPTY;
        }
        let limit = usize::try_from(size).unwrap_or(usize::MAX).min(max_size);
        let page_index = usize::try_from(page.max(1) - 1).unwrap_or(usize::MAX);
        Window {
            offset: page_index.saturating_mul(limit),
            limit,
        }
    }

    /// The first `limit` records, capped at `max_size`.
    pub fn first(limit: i64, max_size: usize) -> Self {
        Self::page(1, limit, max_size)
    }

    pub fn apply<I: Iterator>(self, items: I) -> std::iter::Take<std::iter::Skip<I>> {
        items.skip(self.offset).take(self.limit)
    }
}

/// Case-insensitive substring match against one text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFilter {
    field: String,
    needle: String,
}

impl TextFilter {
    pub fn new(field: impl Into<String>, substring: &str) -> Self {
        Self {
            field: field.into(),
            needle: substring.to_lowercase(),
        }
    }

    /// Records without the field never match.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        record
            .text_field(&self.field)
            .is_some_and(|value| value.to_lowercase().contains(&self.needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Task;

    const MAX: usize = 1000;

    fn slice(window: Window, len: usize) -> Vec<usize> {
        window.apply(0..len).collect()
    }

    #[test]
    fn page_arithmetic() {
        assert_eq!(Window::page(1, 20, MAX), Window { offset: 0, limit: 20 });
        assert_eq!(Window::page(3, 5, MAX), Window { offset: 10, limit: 5 });
    }

    #[test]
    fn pages_clip_to_collection_bounds() {
        for len in 0..12 {
            for size in 1..5_i64 {
                for page in 1..6_i64 {
                    let start = ((page - 1) * size) as usize;
                    let end = (page * size) as usize;
                    let expected: Vec<usize> = (start.min(len)..end.min(len)).collect();
                    assert_eq!(slice(Window::page(page, size, MAX), len), expected);
                }
            }
        }
    }

    #[test]
    fn non_positive_page_is_clamped() {
        assert_eq!(Window::page(0, 2, MAX), Window::page(1, 2, MAX));
        assert_eq!(Window::page(-7, 2, MAX), Window::page(1, 2, MAX));
    }

    #[test]
    fn non_positive_size_is_empty() {
        assert_eq!(Window::page(1, 0, MAX), Window::EMPTY);
        assert_eq!(Window::page(2, -3, MAX), Window::EMPTY);
        assert!(slice(Window::first(0, MAX), 4).is_empty());
    }

    #[test]
    fn size_is_capped() {
        assert_eq!(Window::page(1, 5_000, MAX).limit, MAX);
        assert_eq!(Window::first(i64::MAX, 10).limit, 10);
    }

    #[test]
    fn huge_pages_do_not_overflow() {
        let window = Window::page(i64::MAX, i64::MAX, usize::MAX);
        assert_eq!(window.offset, usize::MAX);
        assert!(slice(window, 3).is_empty());
    }

    #[test]
    fn text_filter_is_case_insensitive() {
        let task = Task::new(1, "Faire les Courses", false);
        assert!(TextFilter::new("title", "COURSES").matches(&task));
        assert!(TextFilter::new("title", "faire").matches(&task));
        assert!(!TextFilter::new("title", "email").matches(&task));
        assert!(!TextFilter::new("missing", "faire").matches(&task));
    }
}
