//! Client-side catalog logic
//!
//! The API returns whole collections; searching, sorting, and pagination
//! happen locally.

pub mod reviews;
pub mod template;

pub use reviews::{Page, ReviewQuery, SortOrder};

use crate::types::Book;

/// Case-insensitive catalog filter
///
/// All set fields must match; an empty filter matches every book.
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
}

impl BookFilter {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.genre.is_none()
    }

    /// Whether one book matches the filter
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(title) = &self.title {
            if !contains_ignore_case(&book.title, title) {
                return false;
            }
        }
        if let Some(author) = &self.author {
            if !book.authors.iter().any(|a| contains_ignore_case(a, author)) {
                return false;
            }
        }
        if let Some(genre) = &self.genre {
            if !book.genres.iter().any(|g| contains_ignore_case(g, genre)) {
                return false;
            }
        }
        true
    }

    /// Filter a catalog, preserving order
    pub fn apply<'a>(&self, books: &'a [Book]) -> Vec<&'a Book> {
        books.iter().filter(|b| self.matches(b)).collect()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str, author: &str, genre: &str) -> Book {
        Book {
            isbn: String::new(),
            title: title.to_string(),
            authors: vec![author.to_string()],
            publishers: vec![],
            publication_date: String::new(),
            genres: vec![genre.to_string()],
            pages: 0,
            image: String::new(),
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = BookFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&book("Dune", "Frank Herbert", "Science Fiction")));
    }

    #[test]
    fn test_title_filter_case_insensitive() {
        let filter = BookFilter {
            title: Some("hound".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&book(
            "The Hound of the Baskervilles",
            "Arthur Conan Doyle",
            "Mystery"
        )));
        assert!(!filter.matches(&book("Dune", "Frank Herbert", "Science Fiction")));
    }

    #[test]
    fn test_all_fields_must_match() {
        let filter = BookFilter {
            title: Some("dune".to_string()),
            author: Some("herbert".to_string()),
            genre: Some("mystery".to_string()),
        };
        assert!(!filter.matches(&book("Dune", "Frank Herbert", "Science Fiction")));
    }

    #[test]
    fn test_apply_preserves_order() {
        let books = vec![
            book("A Study in Scarlet", "Arthur Conan Doyle", "Mystery"),
            book("Dune", "Frank Herbert", "Science Fiction"),
            book("The Hound of the Baskervilles", "Arthur Conan Doyle", "Mystery"),
        ];
        let filter = BookFilter {
            genre: Some("mystery".to_string()),
            ..Default::default()
        };
        let matched = filter.apply(&books);
        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].title, "A Study in Scarlet");
        assert_eq!(matched[1].title, "The Hound of the Baskervilles");
    }
}
