//! Kumo main entry point
//!
//! Command-line interface for the Kumo web crawler.

use clap::Parser;
use kumo::config::{compute_config_hash, load_config_or_default, Config};
use kumo::crawler::crawl;
use kumo::output::print_tree;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Kumo: a polite, concurrent web crawler
///
/// Kumo crawls outward from a configured set of seed URLs, pacing its
/// hits per host and deduplicating pages by URL and by content, then
/// prints the tree of pages it reached from each seed.
#[derive(Parser, Debug)]
#[command(name = "kumo")]
#[command(version = "1.0.0")]
#[command(about = "A polite, concurrent web crawler", long_about = None)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(value_name = "CONFIG", default_value = "config/crawler.yml")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate the config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    print_banner();

    let config = match load_config_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if let Ok(hash) = compute_config_hash(&cli.config) {
        tracing::info!(
            "configuration loaded from {} (hash: {})",
            cli.config.display(),
            hash
        );
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let print_indent = config.print_indent;
    let trees = crawl(config).await?;

    for tree in &trees {
        print_tree(tree, print_indent);
    }
    println!();

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("kumo=info,warn"),
            1 => EnvFilter::new("kumo=debug,info"),
            2 => EnvFilter::new("kumo=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn print_banner() {
    println!(
        r#"
 _
| | ___   _ _ __ ___   ___
| |/ / | | | '_ ` _ \ / _ \
|   <| |_| | | | | | | (_) |
|_|\_\\__,_|_| |_| |_|\___/
"#
    );
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Kumo Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Read timeout: {}s", config.read_timeout_secs);
    println!("  Domain hit delay: {}ms", config.domain_delay_ms);
    println!("  Max depth: {}", config.max_depth);
    println!("  Print indent: {}", config.print_indent);

    println!("\nSeeds ({}):", config.seeds.len());
    for seed in &config.seeds {
        println!("  - {}", seed);
    }

    println!("\nBlacklisted URLs ({}):", config.blacklisted_urls.len());
    for url in &config.blacklisted_urls {
        println!("  - {}", url);
    }

    println!("\nIgnored URL substrings ({}):", config.ignore_if_contains.len());
    for entry in &config.ignore_if_contains {
        println!("  - {}", entry);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would start crawling from {} seed URLs", config.seeds.len());
}
