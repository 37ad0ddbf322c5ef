use std::process;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use feed_client::PostsClient;
use feed_query::{PostQueries, SavedPostStore};
use tokio::io::BufReader;
use tracing::debug;

mod logging;
mod session;
mod settings;
mod views;

use logging::init_logging;
use session::{Session, list_or_empty, render_detail_error};
use settings::Settings;
use views::{render_post_detail, render_post_list};

#[derive(Debug, Parser)]
#[command(name = "feed-cli", version, about = "Terminal front end for a blog post feed")]
struct Cli {
    /// Базовый URL API постов (по умолчанию FEED_API_BASE_URL или публичный API).
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Печатать результат как JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Лента постов.
    List,
    /// Пост по id.
    Show {
        #[arg(long, allow_hyphen_values = true)]
        id: String,
    },
    /// Интерактивная сессия с сохранёнными постами.
    Session,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut settings = Settings::from_env()?;
    if let Some(api_url) = cli.api_url {
        settings.api_base_url = normalize_api_url(api_url);
    }
    init_logging(&settings.log_level)?;
    debug!(api = %settings.api_base_url, "settings loaded");

    let client = PostsClient::with_timeouts(
        settings.api_base_url.clone(),
        settings.connect_timeout(),
        settings.request_timeout(),
    )
    .context("failed to build http client")?;
    let queries = PostQueries::with_options(client, SavedPostStore::new(), settings.query_options());

    match cli.command {
        Command::List => {
            let posts = list_or_empty(&queries).await;
            if cli.json {
                print_json(&posts)?;
            } else {
                print!("{}", render_post_list(&posts));
            }
        }
        Command::Show { id } => match queries.get_post(&id).await {
            Ok(post) => {
                if cli.json {
                    print_json(&post)?;
                } else {
                    print!("{}", render_post_detail(&post));
                }
            }
            Err(err) => {
                print!("{}", render_detail_error(&err));
                return Err(anyhow!("failed to show post {id}"));
            }
        },
        Command::Session => {
            let input = BufReader::new(tokio::io::stdin());
            let output = std::io::stdout();
            Session::new(&queries, input, output, settings.default_user_id)
                .run()
                .await?;
        }
    }

    Ok(())
}

fn normalize_api_url(url: String) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        return url;
    }

    format!("https://{url}")
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let raw = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{raw}");
    Ok(())
}
