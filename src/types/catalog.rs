//! Catalog data types mirroring the library API's JSON payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A book in the library catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub publishers: Vec<String>,
    #[serde(default)]
    pub publication_date: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub image: String,
}

impl Book {
    /// Primary author, or a placeholder when the record has none
    pub fn primary_author(&self) -> &str {
        self.authors
            .first()
            .map(String::as_str)
            .unwrap_or("Unknown Author")
    }

    /// Publisher list joined for display
    pub fn publisher_line(&self) -> String {
        if self.publishers.is_empty() {
            "Unknown publisher".to_string()
        } else {
            self.publishers.join(", ")
        }
    }
}

/// A reader review attached to a book
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub review_id: i64,
    pub account_id: i64,
    #[serde(default)]
    pub username: String,
    pub review_text: String,
    pub rating: f32,
    #[serde(default)]
    pub likes: i64,
    pub review_date: DateTime<Utc>,
    #[serde(default)]
    pub book_isbn: String,
}

impl Review {
    /// Review timestamp formatted like "January 5, 2026 3:41 PM"
    pub fn formatted_date(&self) -> String {
        self.review_date.format("%B %-d, %Y %-I:%M %p").to_string()
    }
}

/// AI-generated summary for a single book
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSummary {
    pub summary: String,
}

/// A contest winner entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Winner {
    pub winner_username: String,
    pub win_time: DateTime<Utc>,
}

impl Winner {
    /// Win timestamp formatted for display (UTC)
    pub fn formatted_time(&self) -> String {
        self.win_time.format("%B %-d, %Y %-I:%M:%S %p UTC").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> Book {
        Book {
            isbn: "9780451524935".to_string(),
            title: "1984".to_string(),
            authors: vec!["George Orwell".to_string()],
            publishers: vec!["Signet Classics".to_string()],
            publication_date: "1961".to_string(),
            genres: vec!["Dystopian".to_string()],
            pages: 328,
            image: String::new(),
        }
    }

    #[test]
    fn test_book_deserialization_with_missing_fields() {
        let json = r#"{"isbn": "123", "title": "Sparse"}"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.isbn, "123");
        assert!(book.authors.is_empty());
        assert_eq!(book.pages, 0);
        assert_eq!(book.primary_author(), "Unknown Author");
        assert_eq!(book.publisher_line(), "Unknown publisher");
    }

    #[test]
    fn test_book_display_helpers() {
        let book = sample_book();
        assert_eq!(book.primary_author(), "George Orwell");
        assert_eq!(book.publisher_line(), "Signet Classics");
    }

    #[test]
    fn test_review_deserialization() {
        let json = r#"{
            "review_id": 7,
            "account_id": 2,
            "username": "reader1",
            "review_text": "%OverallThoughts%Great book",
            "rating": 4.5,
            "likes": 3,
            "review_date": "2025-06-01T14:30:00Z",
            "book_isbn": "123"
        }"#;
        let review: Review = serde_json::from_str(json).unwrap();
        assert_eq!(review.review_id, 7);
        assert_eq!(review.rating, 4.5);
        assert_eq!(review.formatted_date(), "June 1, 2025 2:30 PM");
    }

    #[test]
    fn test_winner_formatting() {
        let json = r#"{"winner_username": "bookworm", "win_time": "2025-12-24T09:05:07Z"}"#;
        let winner: Winner = serde_json::from_str(json).unwrap();
        assert_eq!(winner.formatted_time(), "December 24, 2025 9:05:07 AM UTC");
    }
}
