// Search parameters for one repository call. Built fresh per request and never shared.

use crate::domain::TagCategory;

/// Limit used when a post search asks for nothing or for more than `MAX_POST_LIMIT`.
pub const DEFAULT_POST_LIMIT: u32 = 40;
pub const MAX_POST_LIMIT: u32 = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostCriteria {
    pub tags: Vec<String>,
    pub page: u32,
    pub limit: u32,
    pub random: bool,
}

impl PostCriteria {
    /// The bounded limit: `DEFAULT_POST_LIMIT` when `limit` is 0 or above `MAX_POST_LIMIT`.
    pub fn effective_limit(&self) -> u32 {
        if self.limit == 0 || self.limit > MAX_POST_LIMIT {
            DEFAULT_POST_LIMIT
        } else {
            self.limit
        }
    }

    /// Pages start at 1; page 0 means the first page.
    pub fn effective_page(&self) -> u32 {
        self.page.max(1)
    }
}

/// Either `names` (exact match) or `name_prefix` (prefix match) is used, depending on the operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCriteria {
    pub name_prefix: String,
    pub names: Vec<String>,
    pub category: Option<TagCategory>,
    pub limit: u32,
    pub page: u32,
    /// Empty lets the upstream pick its default order.
    pub order: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistCriteria {
    /// Substring of the artist name.
    pub name: String,
    pub limit: u32,
    pub page: u32,
}
