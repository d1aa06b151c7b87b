//! Review endpoints: fetch, submit, like, delete

use crate::errors::Result;
use crate::types::Review;
use serde_json::json;

use super::client::LibraryClient;

impl LibraryClient {
    /// Fetch all reviews for one book
    pub async fn reviews_for_book(&self, isbn: &str) -> Result<Vec<Review>> {
        self.get_json("getReviewsByBook", &[("isbn", isbn)]).await
    }

    /// Fetch the review ids this account has liked on one book
    pub async fn liked_reviews(&self, isbn: &str, account_id: i64) -> Result<Vec<i64>> {
        let id = account_id.to_string();
        self.get_json(
            "getLikedByISBN",
            &[("book_isbn", isbn), ("account_id", id.as_str())],
        )
        .await
    }

    /// Like or unlike one review
    pub async fn set_review_liked(
        &self,
        review_id: i64,
        isbn: &str,
        account_id: i64,
        like: bool,
    ) -> Result<()> {
        let action = if like { "like" } else { "unlike" };
        let _: serde_json::Value = self
            .post_json(
                "modifyLikeCount",
                &json!({
                    "review_id": review_id,
                    "action": action,
                    "account_id": account_id,
                    "isbn": isbn,
                }),
            )
            .await?;
        Ok(())
    }

    /// Submit a review for one book
    ///
    /// `review_text` is expected in the section-marker template produced by
    /// [`crate::catalog::template::build_review_text`].
    pub async fn submit_review(
        &self,
        account_id: i64,
        isbn: &str,
        review_text: &str,
        rating: f32,
    ) -> Result<()> {
        let _: serde_json::Value = self
            .post_json(
                "submitReview",
                &json!({
                    "account_id": account_id,
                    "review_text": review_text,
                    "rating": rating,
                    "book_isbn": isbn,
                }),
            )
            .await?;
        Ok(())
    }

    /// Delete one review by id
    pub async fn delete_review(&self, review_id: i64) -> Result<()> {
        let _: serde_json::Value = self
            .post_json("deleteReviewByReviewId", &json!({ "review_id": review_id }))
            .await?;
        Ok(())
    }
}
