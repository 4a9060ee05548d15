//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `seo_suite` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Reading inputs and writing rendered reports
//!
//! All analysis is implemented in the library crate.

use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use tokio_util::sync::CancellationToken;

use seo_suite::config::{
    DB_PATH, DEFAULT_OWN_DOMAIN, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, MAX_HISTORY_ENTRIES,
};
use seo_suite::export::{
    export_bulk_csv, export_bulk_markdown, export_csv, export_history_csv,
    export_history_markdown, export_json, export_markdown, export_overall_csv,
    export_overall_markdown, MarkdownOptions,
};
use seo_suite::initialization::{init_client, init_logger_with};
use seo_suite::scoring::{Category, Report};
use seo_suite::{
    scan_url, Article, BulkScanner, Config, LogFormat, LogLevel, OutputFormat, OverallReport,
    ScanHistory, Suite, TraditionalScanner,
};

/// Scores pages and articles for traditional SEO, PSEO, AEO and GEO.
#[derive(Debug, Parser)]
#[command(name = "seo_suite", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    log_format: LogFormat,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Scan history database path
    #[arg(long, default_value = DB_PATH, global = true)]
    db_path: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT, global = true)]
    user_agent: String,

    /// Domain whose links count as internal in article content
    #[arg(long, default_value = DEFAULT_OWN_DOMAIN, global = true)]
    own_domain: String,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch a URL and run the Traditional SEO scanner on it
    Scan(ScanArgs),
    /// Run the Traditional SEO scanner on a local HTML file
    Page(PageArgs),
    /// Run every analyzer on an article (JSON)
    Article(ArticleArgs),
    /// Scan a JSON array of articles one after another
    Bulk(BulkArgs),
    /// Show or clear the recorded scan history
    History(HistoryArgs),
}

#[derive(Debug, Args)]
struct ScanArgs {
    /// URL to scan (https:// is assumed when no scheme is given)
    url: String,
}

#[derive(Debug, Args)]
struct PageArgs {
    /// HTML file to scan
    file: PathBuf,

    /// URL the page is served from
    #[arg(long, default_value = "")]
    url: String,
}

#[derive(Debug, Args)]
struct ArticleArgs {
    /// Article JSON file
    file: PathBuf,

    /// Rendered HTML of the article; enables the Traditional scanner
    #[arg(long)]
    html: Option<PathBuf>,

    /// JSON array of sibling articles for the cross-article PSEO checks
    #[arg(long)]
    all: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct BulkArgs {
    /// JSON array of articles (items without content are fetched by URL)
    file: PathBuf,

    /// Pause between items in milliseconds
    #[arg(long, default_value_t = 100)]
    pause_ms: u64,

    /// Do not read or record scan history
    #[arg(long)]
    no_history: bool,
}

#[derive(Debug, Args)]
struct HistoryArgs {
    /// Article slug or URL; lists every key when omitted
    key: Option<String>,

    /// Delete all recorded history
    #[arg(long, conflicts_with = "key")]
    clear: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
            db_path: self.db_path.clone(),
            timeout_seconds: self.timeout_seconds,
            user_agent: self.user_agent.clone(),
            own_domain: self.own_domain.clone(),
            history_limit: MAX_HISTORY_ENTRIES,
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run(cli).await {
        eprintln!("seo_suite error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.config();
    let rendered = match &cli.command {
        Command::Scan(args) => {
            let client = init_client(&config).context("Failed to initialize HTTP client")?;
            let report = scan_url(&client, &TraditionalScanner::new(), &args.url)
                .await
                .with_context(|| format!("Failed to scan {}", args.url))?;
            render_report(&report, cli.format)?
        }
        Command::Page(args) => {
            let html = read_file(&args.file).await?;
            let report = TraditionalScanner::new().analyze(&args.url, &html);
            render_report(&report, cli.format)?
        }
        Command::Article(args) => {
            let article: Article = read_json(&args.file).await?;
            let html = match &args.html {
                Some(path) => Some(read_file(path).await?),
                None => None,
            };
            let all: Vec<Article> = match &args.all {
                Some(path) => read_json(path).await?,
                None => Vec::new(),
            };
            let report = Suite::with_own_domain(&config.own_domain).analyze(
                &article,
                html.as_deref(),
                &all,
            );
            render_overall(&report, cli.format)?
        }
        Command::Bulk(args) => run_bulk(&config, args, cli.format).await?,
        Command::History(args) => run_history(&config, args, cli.format).await?,
    };

    match &cli.output {
        Some(path) => {
            tokio::fs::write(path, rendered)
                .await
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

async fn run_bulk(config: &Config, args: &BulkArgs, format: OutputFormat) -> Result<String> {
    let articles: Vec<Article> = read_json(&args.file).await?;
    info!("Loaded {} items from {}", articles.len(), args.file.display());

    let config = Config {
        bulk_pause: Duration::from_millis(args.pause_ms),
        ..config.clone()
    };
    let client = init_client(&config).context("Failed to initialize HTTP client")?;
    let mut scanner = BulkScanner::from_config(&config).with_client(client);
    if !args.no_history {
        let history = ScanHistory::open(&config.db_path, config.history_limit)
            .await
            .context("Failed to open scan history")?;
        scanner = scanner.with_history(history);
    }

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping after the current item");
            interrupt.cancel();
        }
    });

    let results = scanner.run(&articles, &cancel).await;
    match format {
        OutputFormat::Json => Ok(export_json(&results)?),
        OutputFormat::Markdown => Ok(export_bulk_markdown(&results)),
        OutputFormat::Csv => export_bulk_csv(&results),
    }
}

async fn run_history(config: &Config, args: &HistoryArgs, format: OutputFormat) -> Result<String> {
    let history = ScanHistory::open(&config.db_path, config.history_limit)
        .await
        .context("Failed to open scan history")?;

    if args.clear {
        let removed = history.clear().await.context("Failed to clear history")?;
        return Ok(format!("Removed {removed} history entries"));
    }

    let entries = match &args.key {
        Some(key) => history.history(key).await,
        None => history.all_scans().await,
    }
    .context("Failed to read history")?;

    match format {
        OutputFormat::Json => Ok(export_json(&entries)?),
        OutputFormat::Markdown => Ok(export_history_markdown(&entries)),
        OutputFormat::Csv => export_history_csv(&entries),
    }
}

fn render_report<C: Category>(report: &Report<C>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(export_json(report)?),
        OutputFormat::Markdown => Ok(export_markdown(report, &MarkdownOptions::default())),
        OutputFormat::Csv => export_csv(report),
    }
}

fn render_overall(report: &OverallReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(export_json(report)?),
        OutputFormat::Markdown => Ok(export_overall_markdown(
            report,
            &MarkdownOptions::default(),
        )),
        OutputFormat::Csv => export_overall_csv(report),
    }
}

async fn read_file(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = read_file(path).await?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse JSON in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scan_with_globals() {
        let cli = Cli::try_parse_from([
            "seo_suite",
            "scan",
            "example.com",
            "--format",
            "markdown",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Scan(ref a) if a.url == "example.com"));
        assert_eq!(cli.format, OutputFormat::Markdown);
        assert!(matches!(cli.log_level, LogLevel::Debug));
        assert_eq!(cli.timeout_seconds, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_parse_article_options() {
        let cli = Cli::try_parse_from([
            "seo_suite",
            "article",
            "post.json",
            "--html",
            "post.html",
            "--all",
            "posts.json",
        ])
        .unwrap();
        match cli.command {
            Command::Article(args) => {
                assert_eq!(args.file, PathBuf::from("post.json"));
                assert_eq!(args.html, Some(PathBuf::from("post.html")));
                assert_eq!(args.all, Some(PathBuf::from("posts.json")));
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_bulk_defaults() {
        let cli = Cli::try_parse_from(["seo_suite", "bulk", "items.json"]).unwrap();
        match &cli.command {
            Command::Bulk(args) => {
                assert_eq!(args.pause_ms, 100);
                assert!(!args.no_history);
                assert_eq!(args.file, PathBuf::from("items.json"));
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.db_path, PathBuf::from(DB_PATH));
        assert_eq!(cli.config().own_domain, DEFAULT_OWN_DOMAIN);
    }

    #[test]
    fn test_history_clear_conflicts_with_key() {
        assert!(Cli::try_parse_from(["seo_suite", "history", "post", "--clear"]).is_err());
        assert!(Cli::try_parse_from(["seo_suite", "history", "--clear"]).is_ok());
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["seo_suite", "scan", "x", "--format", "pdf"]).is_err());
    }
}
