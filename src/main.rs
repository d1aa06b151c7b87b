//! bookbuddy - Main CLI entry point

use anyhow::Result;
use bookbuddy::api::LibraryClient;
use bookbuddy::catalog::template;
use bookbuddy::catalog::{BookFilter, ReviewQuery, SortOrder};
use bookbuddy::chat::{ChatSession, HttpChatTransport};
use bookbuddy::cli::{Args, Commands, WishlistAction};
use bookbuddy::config::Config;
use bookbuddy::repl::ChatRepl;
use bookbuddy::session::Session;
use bookbuddy::ClientError;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load()?;
    let base_url = args
        .api_url
        .clone()
        .unwrap_or_else(|| config.base_url().to_string());
    let client = LibraryClient::with_base_url(&base_url)?;

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => run_chat(client).await,
        Commands::Books {
            query,
            author,
            genre,
        } => list_books(&client, query, author, genre).await,
        Commands::Summary { isbn } => show_summary(&client, &isbn).await,
        Commands::Reviews {
            isbn,
            user,
            sort_rating,
            sort_likes,
            page,
        } => list_reviews(&client, &isbn, user, sort_rating, sort_likes, page).await,
        Commands::Review {
            isbn,
            rating,
            thoughts,
            character,
            part,
        } => submit_review(&client, &isbn, rating, &thoughts, character, part).await,
        Commands::Like { review_id, isbn } => set_liked(&client, review_id, &isbn, true).await,
        Commands::Unlike { review_id, isbn } => set_liked(&client, review_id, &isbn, false).await,
        Commands::DeleteReview { review_id } => delete_review(&client, review_id).await,
        Commands::Wishlist { action } => run_wishlist(&client, action).await,
        Commands::Contests => show_contests(&client).await,
        Commands::Draw => draw_winner(&client).await,
        Commands::AddBook { isbn } => modify_catalog(&client, &isbn, true).await,
        Commands::RemoveBook { isbn } => modify_catalog(&client, &isbn, false).await,
        Commands::Login { username, password } => login(&client, &username, &password).await,
        Commands::Signup {
            username,
            password,
            email,
        } => signup(&client, &username, &password, email.as_deref()).await,
        Commands::Logout => logout(),
        Commands::Whoami => whoami(),
        Commands::Config => show_config(&config, &base_url),
    }
}

/// Spinner shown while a request is outstanding
fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

async fn run_chat(client: LibraryClient) -> Result<()> {
    let session = Session::require()?;
    let base_url = client.base_url().to_string();

    let transport = HttpChatTransport::new(client);
    let chat = Arc::new(ChatSession::new(Box::new(transport)));

    let mut repl = ChatRepl::new(
        Arc::clone(&chat),
        session.username.clone(),
        base_url.clone(),
    )?;
    repl.show_welcome(env!("CARGO_PKG_VERSION"), &session.username, &base_url);
    repl.run().await
}

async fn list_books(
    client: &LibraryClient,
    query: Option<String>,
    author: Option<String>,
    genre: Option<String>,
) -> Result<()> {
    let pb = spinner("Fetching catalog...");
    let books = client.get_all_books().await?;
    pb.finish_and_clear();

    let filter = BookFilter {
        title: query,
        author,
        genre,
    };
    let matched = filter.apply(&books);

    if matched.is_empty() {
        println!("{}", "No books match.".yellow());
        return Ok(());
    }

    for book in &matched {
        println!(
            "{}  {} by {}",
            book.isbn.dimmed(),
            book.title.bold(),
            book.primary_author()
        );
        if !book.genres.is_empty() {
            println!("    {}", book.genres.join(", ").dimmed());
        }
    }
    println!(
        "\n{} of {} books",
        matched.len().to_string().bold(),
        books.len()
    );
    Ok(())
}

async fn show_summary(client: &LibraryClient, isbn: &str) -> Result<()> {
    let pb = spinner("Fetching summary...");
    let summary = client.get_book_summary(isbn).await?;
    pb.finish_and_clear();

    println!("{}", summary.summary);
    Ok(())
}

async fn list_reviews(
    client: &LibraryClient,
    isbn: &str,
    user: Option<String>,
    sort_rating: Option<String>,
    sort_likes: Option<String>,
    page: usize,
) -> Result<()> {
    let sort_rating = parse_sort_flag("--sort-rating", sort_rating)?;
    let sort_likes = parse_sort_flag("--sort-likes", sort_likes)?;

    let pb = spinner("Fetching reviews...");
    let reviews = client.reviews_for_book(isbn).await?;
    pb.finish_and_clear();

    let query = ReviewQuery {
        username: user,
        sort_rating,
        sort_likes,
        page: Some(page),
    };
    let result = query.apply(&reviews);

    if result.total_reviews == 0 {
        println!("{}", "No reviews yet.".yellow());
        return Ok(());
    }

    for review in &result.reviews {
        let stars = format!("{:.1}/5.0", review.rating);
        println!(
            "{} {} {} ({} likes)  {}",
            format!("#{}", review.review_id).dimmed(),
            review.username.bold(),
            stars.yellow(),
            review.likes,
            review.formatted_date().dimmed()
        );

        let sections = template::parse_review_text(&review.review_text);
        println!("  {}", sections.overall);
        if let Some(character) = &sections.favorite_character {
            println!("  {} {}", "Favorite character:".cyan(), character);
        }
        if let Some(part) = &sections.favorite_part {
            println!("  {} {}", "Favorite part:".cyan(), part);
        }
        println!();
    }

    println!(
        "Page {} of {} ({} reviews)",
        result.page, result.total_pages, result.total_reviews
    );
    Ok(())
}

fn parse_sort_flag(flag: &str, value: Option<String>) -> Result<Option<SortOrder>> {
    match value {
        None => Ok(None),
        Some(raw) => match SortOrder::parse(&raw) {
            Some(order) => Ok(Some(order)),
            None => Err(ClientError::Validation(format!(
                "{} must be 'asc' or 'desc', got '{}'",
                flag, raw
            ))
            .into()),
        },
    }
}

async fn submit_review(
    client: &LibraryClient,
    isbn: &str,
    rating: f32,
    thoughts: &str,
    character: Option<String>,
    part: Option<String>,
) -> Result<()> {
    let session = Session::require()?;

    if !(0.5..=5.0).contains(&rating) {
        return Err(ClientError::Validation(
            "Rating must be between 0.5 and 5.0".to_string(),
        )
        .into());
    }
    if thoughts.trim().is_empty() {
        return Err(ClientError::Validation("Overall thoughts cannot be empty".to_string()).into());
    }

    let text = template::build_review_text(
        thoughts,
        character.as_deref().unwrap_or(""),
        part.as_deref().unwrap_or(""),
    );

    let pb = spinner("Submitting review...");
    client
        .submit_review(session.account_id, isbn, &text, rating)
        .await?;
    pb.finish_and_clear();

    println!("{}", "Review submitted.".green());
    Ok(())
}

async fn set_liked(client: &LibraryClient, review_id: i64, isbn: &str, like: bool) -> Result<()> {
    let session = Session::require()?;

    let pb = spinner("Updating like...");
    client
        .set_review_liked(review_id, isbn, session.account_id, like)
        .await?;
    pb.finish_and_clear();

    if like {
        println!("{}", format!("Liked review #{}.", review_id).green());
    } else {
        println!("{}", format!("Unliked review #{}.", review_id).green());
    }
    Ok(())
}

async fn delete_review(client: &LibraryClient, review_id: i64) -> Result<()> {
    Session::require()?;

    let pb = spinner("Deleting review...");
    client.delete_review(review_id).await?;
    pb.finish_and_clear();

    println!("{}", format!("Deleted review #{}.", review_id).green());
    Ok(())
}

async fn run_wishlist(client: &LibraryClient, action: Option<WishlistAction>) -> Result<()> {
    let session = Session::require()?;

    match action.unwrap_or(WishlistAction::List) {
        WishlistAction::List => {
            let pb = spinner("Fetching wishlist...");
            let isbns = client.wishlist(session.account_id).await?;
            let books = client.get_all_books().await?;
            pb.finish_and_clear();

            if isbns.is_empty() {
                println!("{}", "Your wishlist is empty.".yellow());
                return Ok(());
            }

            for isbn in &isbns {
                match books.iter().find(|b| &b.isbn == isbn) {
                    Some(book) => println!(
                        "{}  {} by {}",
                        book.isbn.dimmed(),
                        book.title.bold(),
                        book.primary_author()
                    ),
                    None => println!("{}  (not in catalog)", isbn.dimmed()),
                }
            }
        }
        WishlistAction::Add { isbn } => {
            let pb = spinner("Updating wishlist...");
            client
                .modify_wishlist(session.account_id, &isbn, true)
                .await?;
            pb.finish_and_clear();
            println!("{}", "Added to your wishlist.".green());
        }
        WishlistAction::Remove { isbn } => {
            let pb = spinner("Updating wishlist...");
            client
                .modify_wishlist(session.account_id, &isbn, false)
                .await?;
            pb.finish_and_clear();
            println!("{}", "Removed from your wishlist.".green());
        }
    }
    Ok(())
}

async fn show_contests(client: &LibraryClient) -> Result<()> {
    let pb = spinner("Fetching winners...");
    let winners = client.recent_winners().await?;
    pb.finish_and_clear();

    if winners.is_empty() {
        println!("{}", "No contest winners yet.".yellow());
        return Ok(());
    }

    println!("{}", "Recent contest winners:".bold().cyan());
    for winner in &winners {
        println!(
            "  {}  {}",
            winner.winner_username.bold(),
            winner.formatted_time().dimmed()
        );
    }
    Ok(())
}

async fn draw_winner(client: &LibraryClient) -> Result<()> {
    Session::require_admin()?;

    let pb = spinner("Drawing a winner...");
    client.select_contest_winner().await?;
    let winners = client.recent_winners().await?;
    pb.finish_and_clear();

    match winners.first() {
        Some(winner) => println!(
            "{} {}",
            "Winner:".green().bold(),
            winner.winner_username.bold()
        ),
        None => println!("{}", "Winner drawn.".green()),
    }
    Ok(())
}

async fn modify_catalog(client: &LibraryClient, isbn: &str, add: bool) -> Result<()> {
    Session::require_admin()?;

    if add {
        let pb = spinner("Adding book...");
        client.add_book(isbn).await?;
        pb.finish_and_clear();
        println!("{}", format!("Added {} to the catalog.", isbn).green());
    } else {
        let pb = spinner("Removing book...");
        client.remove_book(isbn).await?;
        pb.finish_and_clear();
        println!("{}", format!("Removed {} from the catalog.", isbn).green());
    }
    Ok(())
}

async fn login(client: &LibraryClient, username: &str, password: &str) -> Result<()> {
    let pb = spinner("Signing in...");
    let profile = client.login(username, password).await?;
    pb.finish_and_clear();

    let session = Session::from(profile);
    session.save()?;

    println!("{}", format!("Signed in as {}.", session.username).green());
    if session.is_admin {
        println!("{}", "Admin privileges enabled.".cyan());
    }
    Ok(())
}

async fn signup(
    client: &LibraryClient,
    username: &str,
    password: &str,
    email: Option<&str>,
) -> Result<()> {
    let pb = spinner("Creating account...");
    let profile = client.create_account(username, password, email).await?;
    pb.finish_and_clear();

    let session = Session::from(profile);
    session.save()?;

    println!(
        "{}",
        format!("Account created. Signed in as {}.", session.username).green()
    );
    Ok(())
}

fn logout() -> Result<()> {
    Session::clear()?;
    println!("{}", "Signed out.".green());
    Ok(())
}

fn whoami() -> Result<()> {
    match Session::load()? {
        Some(session) => {
            println!("{} (account #{})", session.username.bold(), session.account_id);
            if session.is_admin {
                println!("{}", "admin".cyan());
            }
        }
        None => println!("{}", "Not signed in.".yellow()),
    }
    Ok(())
}

fn show_config(config: &Config, base_url: &str) -> Result<()> {
    println!("{}", "Configuration:".bold().cyan());
    println!("  API base URL: {}", base_url);
    match config.api.base_url {
        Some(_) => println!("  Source: config file"),
        None => println!("  Source: built-in default"),
    }
    if let Ok(path) = Config::config_path() {
        println!("  Config file: {}", path.display());
    }
    Ok(())
}
