//! Page/limit normalization shared by every list operation.

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Bounded page request: `page >= 1`, `1 <= limit <= MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Clamp raw caller input into a usable page request.
    pub fn normalize(page: i64, limit: i64) -> Self {
        let page = if page < 1 { DEFAULT_PAGE } else { page };
        let limit = if limit <= 0 {
            DEFAULT_LIMIT
        } else {
            limit.min(MAX_LIMIT)
        };
        Self { page, limit }
    }

    /// Same as [`Pagination::normalize`] with absent values treated as zero.
    pub fn from_optional(page: Option<i64>, limit: Option<i64>) -> Self {
        Self::normalize(page.unwrap_or(0), limit.unwrap_or(0))
    }

    /// Rows to skip. Saturates, so an oversized page lands past the end.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit).max(0) as u64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedResult<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl<T> PaginatedResult<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

pub fn paginate<T>(data: Vec<T>, total: i64, pagination: Pagination) -> PaginatedResult<T> {
    let total_pages = if pagination.limit <= 0 {
        0
    } else {
        (total + pagination.limit - 1) / pagination.limit
    };
    PaginatedResult {
        data,
        total,
        page: pagination.page,
        limit: pagination.limit,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_applies_defaults_and_bounds() {
        assert_eq!(Pagination::normalize(0, 0), Pagination { page: 1, limit: 10 });
        assert_eq!(Pagination::normalize(-10, -5), Pagination { page: 1, limit: 10 });
        assert_eq!(Pagination::normalize(2, 999), Pagination { page: 2, limit: 100 });
        assert_eq!(Pagination::normalize(3, 25), Pagination { page: 3, limit: 25 });
    }

    #[test]
    fn offset_follows_page() {
        assert_eq!(Pagination::normalize(1, 10).offset(), 0);
        assert_eq!(Pagination::normalize(3, 20).offset(), 40);
    }

    #[test]
    fn huge_page_offset_saturates() {
        assert_eq!(Pagination::normalize(i64::MAX, 10).offset(), i64::MAX as u64);
        assert_eq!(Pagination::normalize(i64::MAX, 100).offset(), i64::MAX as u64);
    }

    #[test]
    fn total_pages_rounds_up() {
        let p = Pagination::normalize(1, 10);
        assert_eq!(paginate::<u8>(vec![], 0, p).total_pages, 0);
        assert_eq!(paginate::<u8>(vec![], 10, p).total_pages, 1);
        assert_eq!(paginate::<u8>(vec![], 11, p).total_pages, 2);
    }

    #[test]
    fn zero_limit_yields_zero_pages() {
        let raw = Pagination { page: 1, limit: 0 };
        let res = paginate(vec![1, 2], 2, raw);
        assert_eq!(res.total_pages, 0);
        assert_eq!(res.data, vec![1, 2]);
    }
}
