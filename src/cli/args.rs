//! Command-line argument parsing for bookbuddy
//!
//! Provides clap-based CLI with subcommands for the catalog, reviews,
//! wishlists, contests, accounts, and the librarian chat.

use clap::{Parser, Subcommand};

/// bookbuddy - Terminal client for the community library
#[derive(Parser, Debug)]
#[command(name = "bookbuddy")]
#[command(version)]
#[command(about = "Browse the library catalog and chat with the librarian", long_about = None)]
pub struct Args {
    /// Override the library API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Subcommand (defaults to the chat REPL)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive librarian chat
    Chat,

    /// List the catalog, optionally filtered
    Books {
        /// Title substring to match
        #[arg(value_name = "TITLE")]
        query: Option<String>,

        /// Author substring to match
        #[arg(long)]
        author: Option<String>,

        /// Genre substring to match
        #[arg(long)]
        genre: Option<String>,
    },

    /// Show the generated summary for one book
    Summary {
        #[arg(value_name = "ISBN")]
        isbn: String,
    },

    /// List reviews for one book
    Reviews {
        #[arg(value_name = "ISBN")]
        isbn: String,

        /// Only reviews whose author matches this substring
        #[arg(long, value_name = "USERNAME")]
        user: Option<String>,

        /// Sort by rating: asc or desc
        #[arg(long, value_name = "ORDER")]
        sort_rating: Option<String>,

        /// Sort by like count: asc or desc (rating takes precedence)
        #[arg(long, value_name = "ORDER")]
        sort_likes: Option<String>,

        /// Page number (5 reviews per page)
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Submit a review for one book
    Review {
        #[arg(value_name = "ISBN")]
        isbn: String,

        /// Star rating, 0.5 to 5.0
        #[arg(long)]
        rating: f32,

        /// Overall thoughts (required section)
        #[arg(long)]
        thoughts: String,

        /// Favorite character (optional section)
        #[arg(long)]
        character: Option<String>,

        /// Favorite part (optional section)
        #[arg(long)]
        part: Option<String>,
    },

    /// Like a review
    Like {
        #[arg(value_name = "REVIEW_ID")]
        review_id: i64,
        #[arg(value_name = "ISBN")]
        isbn: String,
    },

    /// Remove a like from a review
    Unlike {
        #[arg(value_name = "REVIEW_ID")]
        review_id: i64,
        #[arg(value_name = "ISBN")]
        isbn: String,
    },

    /// Delete one of your reviews
    DeleteReview {
        #[arg(value_name = "REVIEW_ID")]
        review_id: i64,
    },

    /// Show or edit your wishlist
    Wishlist {
        #[command(subcommand)]
        action: Option<WishlistAction>,
    },

    /// Show recent contest winners
    Contests,

    /// Draw a new contest winner (admin)
    Draw,

    /// Add a book to the catalog by ISBN (admin)
    AddBook {
        #[arg(value_name = "ISBN")]
        isbn: String,
    },

    /// Remove a book from the catalog by ISBN (admin)
    RemoveBook {
        #[arg(value_name = "ISBN")]
        isbn: String,
    },

    /// Sign in
    Login {
        #[arg(value_name = "USERNAME")]
        username: String,
        #[arg(value_name = "PASSWORD")]
        password: String,
    },

    /// Create an account and sign in
    Signup {
        #[arg(value_name = "USERNAME")]
        username: String,
        #[arg(value_name = "PASSWORD")]
        password: String,
        #[arg(long)]
        email: Option<String>,
    },

    /// Sign out
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Display current configuration
    Config,
}

/// Wishlist subcommands
#[derive(Subcommand, Debug)]
pub enum WishlistAction {
    /// List the books on your wishlist (default)
    List,
    /// Add a book to your wishlist
    Add {
        #[arg(value_name = "ISBN")]
        isbn: String,
    },
    /// Remove a book from your wishlist
    Remove {
        #[arg(value_name = "ISBN")]
        isbn: String,
    },
}
