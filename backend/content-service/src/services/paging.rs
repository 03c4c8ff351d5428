/// Page arithmetic shared by the list endpoints
use crate::error::{AppError, Result};

pub const MAX_PAGE_SIZE: i64 = 100;

/// Normalised page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page_num: i64,
    pub page_size: i64,
    pub offset: i64,
}

impl PageWindow {
    /// `page_num` starts at 1; values below are raised to 1 and `page_size`
    /// is clamped to `1..=MAX_PAGE_SIZE`. Pages whose offset does not fit an
    /// `i64` are rejected.
    pub fn new(page_num: i64, page_size: i64) -> Result<Self> {
        let page_num = page_num.max(1);
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        let offset = (page_num - 1)
            .checked_mul(page_size)
            .ok_or_else(|| AppError::BadRequest("pageNum out of range".to_string()))?;

        Ok(Self {
            page_num,
            page_size,
            offset,
        })
    }

    /// 1-based position of the `index`th row of this page
    pub fn position(&self, index: usize) -> i64 {
        self.offset.saturating_add(index as i64).saturating_add(1)
    }

    /// Pages needed to hold `total` rows
    pub fn page_count(&self, total: i64) -> i64 {
        (total.max(0) + self.page_size - 1) / self.page_size
    }
}
