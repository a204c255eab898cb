use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use marquee_core::{BrowsePage, Marquee, MarqueeConfig, page_links};
use marquee_model::{BrowseQuery, BrowseTarget, Domain, GenreId, ImageSize, Preset};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "marquee", version)]
#[command(about = "Browse film and TV categories, searches and curated lists")]
struct Cli {
    /// TOML configuration file (defaults to $MARQUEE_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the category grid with one backdrop per tile
    Categories,
    /// Search films and TV shows by keywords
    Search {
        keywords: String,
        #[command(flatten)]
        listing: ListingArgs,
    },
    /// Browse a category by genre id
    Genre {
        id: GenreId,
        #[command(flatten)]
        listing: ListingArgs,
    },
    /// Browse a curated list such as `popular_movies` or `now_playing_shows`
    Preset {
        selector: Preset,
        #[command(flatten)]
        listing: ListingArgs,
    },
    /// Show details, trailer and reviews for a title
    Details {
        /// `movie` or `tv`
        domain: Domain,
        id: u64,
    },
    /// Print the display name of a genre id
    Name { id: GenreId },
}

#[derive(Args, Debug)]
struct ListingArgs {
    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Listing URL used to print prev/next page links
    #[arg(long)]
    base_url: Option<Url>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,marquee_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = MarqueeConfig::load(cli.config.as_deref()).context("loading configuration")?;
    info!("Using API base {}", config.api_base_url);
    let marquee = Marquee::from_config(config)?;

    match cli.command {
        Command::Categories => print_grid(&marquee).await,
        Command::Search { keywords, listing } => {
            let query = BrowseQuery::keywords(keywords).with_page(listing.page);
            print_listing(&marquee, &query, listing.base_url.as_ref()).await
        }
        Command::Genre { id, listing } => {
            let query = BrowseQuery::genre(id).with_page(listing.page);
            print_listing(&marquee, &query, listing.base_url.as_ref()).await
        }
        Command::Preset { selector, listing } => {
            let query = BrowseQuery::preset(selector).with_page(listing.page);
            print_listing(&marquee, &query, listing.base_url.as_ref()).await
        }
        Command::Details { domain, id } => print_details(&marquee, domain, id).await?,
        Command::Name { id } => println!("{}", marquee.resolve_category_display(id)),
    }

    Ok(())
}

async fn print_grid(marquee: &Marquee) {
    let tiles = marquee.render_grid().await;
    for tile in &tiles {
        let backdrop = tile
            .backdrop_path()
            .map(|path| marquee.config().image_url(ImageSize::backdrop(), path))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>6}  {:<20} {:>8} results  {}",
            tile.category.id.get(),
            tile.category.name,
            tile.total_results,
            backdrop
        );
    }
}

async fn print_listing(marquee: &Marquee, query: &BrowseQuery, base_url: Option<&Url>) {
    let page = marquee.browse(query).await;
    println!("{}", page.heading);
    println!();

    let highlighted = match query.target {
        BrowseTarget::Genre(id) => Some(id),
        _ => None,
    };
    for item in page.items() {
        println!(
            "[{:<5}] {:<40} {:<18} {:<4} {}",
            item.domain().label(),
            item.title(),
            marquee.resolver().genre_label(item, highlighted),
            item.release_year().unwrap_or("----"),
            item.rating_label()
        );
    }

    println!();
    println!("{}", page.summary());
    print_window(marquee, &page, base_url);
}

fn print_window(marquee: &Marquee, page: &BrowsePage, base_url: Option<&Url>) {
    let window = &page.window;
    if window.is_empty() {
        return;
    }

    let pages: Vec<String> = window
        .pages()
        .map(|n| {
            if window.is_current(n) {
                format!("[{n}]")
            } else {
                n.to_string()
            }
        })
        .collect();
    println!(
        "{} {} {}",
        if window.prev_enabled { "<" } else { " " },
        pages.join(" "),
        if window.next_enabled { ">" } else { " " }
    );

    if let Some(base) = base_url {
        let current = marquee.build_page_url(window, base, &page.query, window.current_page);
        let links = page_links(window, &current);
        if let Some(prev) = links.prev {
            println!("prev: {prev}");
        }
        if let Some(next) = links.next {
            println!("next: {next}");
        }
    }
}

async fn print_details(marquee: &Marquee, domain: Domain, id: u64) -> Result<()> {
    let details = marquee
        .details(domain, id)
        .await
        .with_context(|| format!("fetching {} {id}", domain.label()))?;

    println!("{} ({})", details.title, details.year_label());
    println!(
        "{} | {} | {} | {}",
        details.runtime_label(),
        details.age_label(),
        details.rating_label(),
        details
            .genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!();
    println!("{}", details.overview_text());
    if let Some(url) = details.trailer.as_ref().and_then(|t| t.watch_url()) {
        println!();
        println!("Trailer: {url}");
    }

    // Reviews are optional on the details page.
    match marquee.reviews(domain, id).await {
        Ok(reviews) if !reviews.is_empty() => {
            println!();
            println!("Reviews ({})", reviews.len());
            for review in &reviews {
                println!(
                    "- {} {}: {}",
                    review.author,
                    review.date_label(),
                    review.excerpt(50)
                );
            }
        }
        Ok(_) => {}
        Err(e) => tracing::warn!("Reviews unavailable: {e}"),
    }

    Ok(())
}
