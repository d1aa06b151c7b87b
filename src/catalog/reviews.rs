//! Review list queries: filter by reviewer, sort, paginate
//!
//! Mirrors what the review panel does with the full review list it gets
//! from the API: a username substring filter, rating and like-count sorts
//! (rating takes precedence when both are set), and fixed-size pages.

use crate::types::Review;

/// Reviews shown per page
pub const REVIEWS_PER_PAGE: usize = 5;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Parse "asc"/"desc" (CLI flag values)
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "asc" | "ascending" => Some(SortOrder::Ascending),
            "desc" | "descending" => Some(SortOrder::Descending),
            _ => None,
        }
    }
}

/// One page of query results
#[derive(Debug, Clone)]
pub struct Page {
    pub reviews: Vec<Review>,
    pub page: usize,
    pub total_pages: usize,
    pub total_reviews: usize,
}

/// A review list query
#[derive(Debug, Clone, Default)]
pub struct ReviewQuery {
    /// Case-insensitive substring match against the reviewer's username
    pub username: Option<String>,
    pub sort_rating: Option<SortOrder>,
    pub sort_likes: Option<SortOrder>,
    /// 1-based page number; defaults to the first page
    pub page: Option<usize>,
}

impl ReviewQuery {
    /// Run the query against a full review list
    pub fn apply(&self, reviews: &[Review]) -> Page {
        let mut result: Vec<Review> = match &self.username {
            Some(needle) => {
                let needle = needle.to_lowercase();
                reviews
                    .iter()
                    .filter(|r| r.username.to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            }
            None => reviews.to_vec(),
        };

        result.sort_by(|a, b| {
            let rating_cmp = match self.sort_rating {
                Some(SortOrder::Ascending) => a
                    .rating
                    .partial_cmp(&b.rating)
                    .unwrap_or(std::cmp::Ordering::Equal),
                Some(SortOrder::Descending) => b
                    .rating
                    .partial_cmp(&a.rating)
                    .unwrap_or(std::cmp::Ordering::Equal),
                None => std::cmp::Ordering::Equal,
            };
            if rating_cmp != std::cmp::Ordering::Equal {
                return rating_cmp;
            }
            match self.sort_likes {
                Some(SortOrder::Ascending) => a.likes.cmp(&b.likes),
                Some(SortOrder::Descending) => b.likes.cmp(&a.likes),
                None => std::cmp::Ordering::Equal,
            }
        });

        let total_reviews = result.len();
        let total_pages = total_reviews.div_ceil(REVIEWS_PER_PAGE).max(1);
        let page = self.page.unwrap_or(1).clamp(1, total_pages);

        let start = (page - 1) * REVIEWS_PER_PAGE;
        let reviews = result
            .into_iter()
            .skip(start)
            .take(REVIEWS_PER_PAGE)
            .collect();

        Page {
            reviews,
            page,
            total_pages,
            total_reviews,
        }
    }
}
