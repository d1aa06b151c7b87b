//! Catalog and wishlist endpoints

use crate::errors::Result;
use crate::types::{Book, BookSummary};
use serde_json::json;

use super::client::LibraryClient;

impl LibraryClient {
    /// Fetch the entire book catalog
    pub async fn get_all_books(&self) -> Result<Vec<Book>> {
        self.get_json("get_all_books", &[]).await
    }

    /// Fetch the AI-generated summary for one book
    pub async fn get_book_summary(&self, isbn: &str) -> Result<BookSummary> {
        self.get_json("getBookSummary", &[("isbn", isbn)]).await
    }

    /// Add a book to the catalog by ISBN (admin)
    pub async fn add_book(&self, isbn: &str) -> Result<()> {
        let _: serde_json::Value = self
            .post_json("addBookFromISBN", &json!({ "isbn": isbn }))
            .await?;
        Ok(())
    }

    /// Remove a book from the catalog by ISBN (admin)
    pub async fn remove_book(&self, isbn: &str) -> Result<()> {
        let _: serde_json::Value = self
            .post_json("removeBookFromISBN", &json!({ "isbn": isbn }))
            .await?;
        Ok(())
    }

    /// Fetch the ISBNs on an account's wishlist
    pub async fn wishlist(&self, account_id: i64) -> Result<Vec<String>> {
        let id = account_id.to_string();
        self.get_json("getWishlistByAccount", &[("account_id", id.as_str())])
            .await
    }

    /// Add or remove one ISBN on an account's wishlist
    pub async fn modify_wishlist(&self, account_id: i64, isbn: &str, add: bool) -> Result<()> {
        let action = if add { "add" } else { "remove" };
        let _: serde_json::Value = self
            .post_json(
                "modifyWishlist",
                &json!({
                    "account_id": account_id,
                    "isbn": isbn,
                    "action": action,
                }),
            )
            .await?;
        Ok(())
    }
}
