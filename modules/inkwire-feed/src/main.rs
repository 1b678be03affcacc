//! feedctl — development harness for the data layer. Exercises every
//! endpoint against a live site from the command line.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use inkwire_common::{Config, Language};
use inkwire_feed::CharacterBrowser;
use std::sync::Arc;
use wp_client::{CharacterQuery, NewComment, WpClient};

#[derive(Parser)]
#[command(name = "feedctl", about = "Inspect the Inkwire data layer against a live site")]
struct Cli {
    /// Content language (en or id).
    #[arg(long, default_value = "en", global = true)]
    lang: Language,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Aggregate fetch across all bases for the language.
    Feed {
        #[arg(long, default_value_t = 10)]
        per_page: u32,
    },
    /// Multi-base search.
    Search {
        query: String,
        #[arg(long)]
        by_date: bool,
    },
    /// One page of a single base.
    Page {
        base: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        per_page: u32,
        #[arg(long)]
        homepage_only: bool,
    },
    /// Browse the character database (pages until exhausted).
    Characters {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        element: Option<String>,
    },
    /// One character by id.
    Character { id: i64 },
    /// Current promotional banner, if any.
    Banner,
    /// Comments on a post.
    Comments { post: i64 },
    /// Like a post from this device.
    Like { post: i64 },
    /// Post a comment.
    Comment {
        post: i64,
        content: String,
        #[arg(long, default_value = "feedctl")]
        author: String,
        #[arg(long, default_value = "feedctl@example.com")]
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("inkwire_feed=info".parse()?)
                .add_directive("wp_client=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let client = Arc::new(WpClient::new(config));

    match cli.command {
        Command::Feed { per_page } => {
            let posts = client.fetch_all(cli.lang, per_page).await;
            print_posts(&posts);
        }
        Command::Search { query, by_date } => {
            let posts = client.search(cli.lang, &query, 1, 10, by_date).await;
            print_posts(&posts);
        }
        Command::Page {
            base,
            page,
            per_page,
            homepage_only,
        } => {
            let result = client.fetch_page(&base, page, per_page, homepage_only).await;
            print_posts(&result.posts);
            println!("has_more: {}", result.has_more);
        }
        Command::Characters { search, element } => {
            let query = CharacterQuery {
                search,
                element,
                lang: cli.lang,
                ..CharacterQuery::default()
            };
            let mut browser = CharacterBrowser::new(client, query);
            while browser.has_more() {
                let added = browser.load_more().await?;
                for c in &added {
                    println!("{:>6}  {:<24} {:<10} {}", c.id, c.name, c.element, c.rarity);
                }
            }
            info!(total = browser.items().len(), "character browse complete");
        }
        Command::Character { id } => {
            let character = client.fetch_character(id, cli.lang).await?;
            println!("{}", serde_json::to_string_pretty(&character)?);
        }
        Command::Banner => match client.fetch_banner().await {
            Some(banner) if banner.visible() => {
                println!("{}", serde_json::to_string_pretty(&banner)?)
            }
            Some(_) => println!("banner present but hidden"),
            None => println!("no banner"),
        },
        Command::Comments { post } => {
            let comments = client.fetch_comments(post, 1, 20).await?;
            for c in &comments {
                println!("#{} {}: {}", c.id, c.author, c.body);
            }
        }
        Command::Like { post } => {
            let count = client.send_like(post).await?;
            println!("like count: {count}");
        }
        Command::Comment {
            post,
            content,
            author,
            email,
        } => {
            client
                .create_comment(&NewComment {
                    post,
                    author_name: author,
                    author_email: email,
                    content,
                })
                .await?;
            println!("comment created");
        }
    }

    Ok(())
}

fn print_posts(posts: &[inkwire_common::Post]) {
    for p in posts {
        let date = p
            .published_at
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "????-??-??".to_string());
        let video = if p.has_video() { " [video]" } else { "" };
        println!("{:>6}  {}  {}{}", p.id, date, p.title, video);
    }
    println!("{} post(s)", posts.len());
}
