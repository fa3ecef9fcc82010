//! Domain models and operation parameters.
//!
//! Services work exclusively with these types. Each model knows how to build itself from
//! SeaORM entity models (`from_entity`) and how to turn itself into the API DTO
//! (`into_dto`), keeping the data and controller layers decoupled.

pub mod asset;
pub mod auth;
pub mod comment;
pub mod import;
pub mod tag;
pub mod user;
pub mod work;

/// Zero-indexed page request shared by every listing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParam {
    /// Zero-indexed page number.
    pub page: u64,
    /// Number of entries per page, already clamped by the controller.
    pub per_page: u64,
}

impl PageParam {
    /// Number of pages needed to hold `total` entries.
    pub fn total_pages(&self, total: u64) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        total.div_ceil(self.per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::PageParam;

    #[test]
    fn total_pages_rounds_up() {
        let page = PageParam {
            page: 0,
            per_page: 10,
        };

        assert_eq!(page.total_pages(0), 0);
        assert_eq!(page.total_pages(10), 1);
        assert_eq!(page.total_pages(11), 2);
    }
}
