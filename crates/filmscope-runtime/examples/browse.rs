//! Run with: cargo run -p filmscope-runtime --example browse [query]
//!
//! Fetches the catalog and prints the first page; pass a query to search
//! the external movie database instead.

use filmscope_runtime::{Runtime, SearchOutcome};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("filmscope=debug")
        .init();

    let runtime = Runtime::new()?;
    runtime.spawn_auth_reactor();

    if let Some(user) = runtime.restore_session().await? {
        println!(
            "Signed in as {}",
            user.email.as_deref().unwrap_or(&user.uid)
        );
    }

    match std::env::args().nth(1) {
        Some(query) => match runtime.search(&query).await? {
            SearchOutcome::Loaded(n) => println!("{n} results for {query:?}."),
            SearchOutcome::NoResults => println!("No movies found for {query:?}."),
        },
        None => {
            let count = runtime.fetch_catalog().await?;
            println!("Loaded {count} movies.");
        }
    }

    let page = runtime.next_page().await;
    for movie in &page.movies {
        println!("  {} ({})", movie.title, movie.year.as_deref().unwrap_or("?"));
    }
    if page.has_more {
        println!("  ...load more available");
    }

    Ok(())
}
