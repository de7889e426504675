use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use portfolio::filter::ALL_LANGUAGES;
use portfolio::github::GithubClient;
use portfolio::render::Notice;
use portfolio::theme::FileStore;
use portfolio::{Config, Environment, Portfolio, html, page};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "portfolio", version, about = "Render a GitHub portfolio page")]
struct Cli {
    /// Portfolio configuration file
    #[arg(long, global = true, default_value = "portfolio.toml")]
    config: PathBuf,

    /// Where the theme preference is kept
    #[arg(long, global = true, default_value = ".portfolio/prefs.json")]
    state: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch repositories and write the page as static HTML
    Build {
        #[arg(short, long, default_value = "index.html")]
        out: PathBuf,
        /// Page title, defaults to the GitHub username
        #[arg(long)]
        title: Option<String>,
    },
    /// Flip the stored dark/light preference
    Theme,
    /// Fetch repositories and list the ones matching a language and search text
    Search {
        #[arg(short, long, default_value = ALL_LANGUAGES)]
        language: String,
        #[arg(short, long, default_value = "")]
        query: String,
    },
}

fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "config file not found; using defaults");
        return Ok(Config::default());
    }
    Config::load(path).with_context(|| format!("Failed to load {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    let store = FileStore::open(&cli.state);

    match cli.command {
        Command::Build { out, title } => {
            let title = title.unwrap_or_else(|| config.github_username.clone());
            let client = GithubClient::new(&config.api_base);
            let mut app = Portfolio::new(config, page::skeleton(&title), store, Environment::now());
            app.load(&client).await;
            app.prepare_static();

            fs::write(&out, html::render_page(app.page()))
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!(
                "Generated {} with {} projects.",
                out.display(),
                app.cache().len()
            );
        }
        Command::Theme => {
            let mut app = Portfolio::new(config, page::skeleton(""), store, Environment::now());
            app.init();
            let theme = app
                .toggle_theme()
                .context("Failed to save theme preference")?;
            println!("Theme is now {}.", theme.as_str());
        }
        Command::Search { language, query } => {
            let client = GithubClient::new(&config.api_base);
            let mut app = Portfolio::new(config, page::skeleton(""), store, Environment::now());
            match app.load(&client).await {
                Some(Notice::LoadFailed) => bail!(Notice::LoadFailed.text()),
                Some(notice) => {
                    println!("{}", notice.text());
                    return Ok(());
                }
                None => {}
            }

            if language != ALL_LANGUAGES {
                let chip = app
                    .chip(&language)
                    .with_context(|| format!("No project uses language {language}"))?;
                app.dispatch(portfolio::events::Event::click(chip));
            }
            app.type_search(&query);

            if let Some(text) = app.notice_text() {
                println!("{text}");
            }
            for repo in app.visible() {
                let card = portfolio::card::card_for(repo);
                println!("{:<32} {}", card.title, card.meta);
            }
        }
    }

    Ok(())
}
