//! Fixed-size pagination with lenient page numbers.
//!
//! A requested page is never an error: missing or garbage input means page 1,
//! and numbers outside `1..=num_pages` snap to the nearest valid page.

use serde::Serialize;

/// Posts per listing page.
pub const PER_PAGE: u64 = 9;

/// A page number as requested by a client, before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNumber {
    /// A numeric request, possibly out of range.
    Requested(i64),
    /// Too large to represent; always resolves to the last page.
    Last,
}

impl PageNumber {
    /// Parse a raw query value. Absent or non-numeric input means page 1.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::first();
        };
        match raw.parse::<i64>() {
            Ok(n) => Self::Requested(n),
            Err(_) if raw.bytes().all(|b| b.is_ascii_digit()) => Self::Last,
            Err(_) => Self::first(),
        }
    }

    pub fn first() -> Self {
        Self::Requested(1)
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::first()
    }
}

/// Offset/limit pair handed to a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
}

/// Computes page counts and windows for a fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    per_page: u64,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(PER_PAGE)
    }
}

impl Paginator {
    pub fn new(per_page: u64) -> Self {
        Self {
            per_page: per_page.max(1),
        }
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Number of pages for `total` items. An empty collection still has one page.
    pub fn num_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.per_page).max(1)
    }

    /// Resolve a requested page to a valid 1-based page number.
    pub fn resolve(&self, requested: PageNumber, total: u64) -> u64 {
        let last = self.num_pages(total);
        match requested {
            PageNumber::Last => last,
            PageNumber::Requested(n) if n < 1 => 1,
            PageNumber::Requested(n) => (n as u64).min(last),
        }
    }

    pub fn window(&self, number: u64) -> PageWindow {
        PageWindow {
            offset: number.saturating_sub(1) * self.per_page,
            limit: self.per_page,
        }
    }

    /// Wrap already-fetched items for page `number`.
    pub fn page<T>(&self, items: Vec<T>, number: u64, total: u64) -> Paginated<T> {
        Paginated {
            items,
            number,
            num_pages: self.num_pages(total),
            per_page: self.per_page,
            total,
        }
    }

    /// Slice an in-memory collection.
    pub fn paginate_vec<T>(&self, all: Vec<T>, requested: PageNumber) -> Paginated<T> {
        let total = all.len() as u64;
        let number = self.resolve(requested, total);
        let window = self.window(number);
        let items = all
            .into_iter()
            .skip(window.offset as usize)
            .take(window.limit as usize)
            .collect();
        self.page(items, number, total)
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub num_pages: u64,
    pub per_page: u64,
    pub total: u64,
}

impl<T> Paginated<T> {
    /// The single empty page.
    pub fn empty(per_page: u64) -> Self {
        Self {
            items: Vec::new(),
            number: 1,
            num_pages: 1,
            per_page,
            total: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            per_page: self.per_page,
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_lenient() {
        assert_eq!(PageNumber::parse(None), PageNumber::Requested(1));
        assert_eq!(PageNumber::parse(Some("")), PageNumber::Requested(1));
        assert_eq!(PageNumber::parse(Some("abc")), PageNumber::Requested(1));
        assert_eq!(PageNumber::parse(Some(" 3 ")), PageNumber::Requested(3));
        assert_eq!(PageNumber::parse(Some("-2")), PageNumber::Requested(-2));
        assert_eq!(
            PageNumber::parse(Some("99999999999999999999999")),
            PageNumber::Last
        );
    }

    #[test]
    fn twenty_items_make_three_pages() {
        let items: Vec<u32> = (1..=20).collect();
        let p = Paginator::default();

        let first = p.paginate_vec(items.clone(), PageNumber::parse(Some("1")));
        assert_eq!(first.items, (1..=9).collect::<Vec<_>>());
        assert_eq!(first.num_pages, 3);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let third = p.paginate_vec(items.clone(), PageNumber::parse(Some("3")));
        assert_eq!(third.items, vec![19, 20]);
        assert!(!third.has_next());
    }

    #[test]
    fn out_of_range_snaps_to_nearest_page() {
        let items: Vec<u32> = (1..=20).collect();
        let p = Paginator::default();

        let high = p.paginate_vec(items.clone(), PageNumber::parse(Some("50")));
        assert_eq!(high.number, 3);
        assert_eq!(high.items, vec![19, 20]);

        let low = p.paginate_vec(items.clone(), PageNumber::parse(Some("0")));
        assert_eq!(low.number, 1);

        let huge = p.paginate_vec(items, PageNumber::Last);
        assert_eq!(huge.number, 3);
    }

    #[test]
    fn empty_collection_has_one_empty_page() {
        let p = Paginator::default();
        let page = p.paginate_vec(Vec::<u32>::new(), PageNumber::parse(Some("4")));
        assert_eq!(page.number, 1);
        assert_eq!(page.num_pages, 1);
        assert!(page.is_empty());
    }
}
