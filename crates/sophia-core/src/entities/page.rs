use serde::{Deserialize, Serialize};

/// One page of a paginated listing. Pages are 1-based.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.per_page))
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }

    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(page: u32, total: u64) -> Page<u8> {
        Page {
            items: vec![],
            page,
            per_page: 10,
            total,
        }
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(page(1, 0).total_pages(), 0);
        assert_eq!(page(1, 10).total_pages(), 1);
        assert_eq!(page(1, 11).total_pages(), 2);
    }

    #[test]
    fn next_and_prev() {
        assert!(page(1, 25).has_next());
        assert!(!page(3, 25).has_next());
        assert!(!page(1, 25).has_prev());
        assert!(page(2, 25).has_prev());
    }
}
