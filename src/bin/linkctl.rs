//! Operator CLI for slug-redirect.
//!
//! Inspects the key-value store and dry-runs the resolver with the same
//! configuration the server uses, without writing access logs.
//!
//! # Usage
//!
//! ```bash
//! # Show what a path would redirect to
//! cargo run --bin linkctl -- resolve /MySlug --query "utm_source=mail"
//!
//! # Print the stored record for a slug
//! cargo run --bin linkctl -- get MySlug
//!
//! # Check the Redis connection
//! cargo run --bin linkctl -- ping
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see `slug_redirect::config`). `resolve` works without
//! Redis for home and inline paths; `get` and `ping` require it.

use slug_redirect::config::{self, Config};
use slug_redirect::domain::redirect::RedirectDecision;
use slug_redirect::domain::request_context::RequestContext;
use slug_redirect::infrastructure::cache::{LinkStore, RedisLinkStore};
use slug_redirect::resolver::lookup::{link_key, lookup_attempts};
use slug_redirect::resolver::{RedirectResolver, ResolveError};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for inspecting slug-redirect.
#[derive(Parser)]
#[command(name = "linkctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a request path without logging the access
    Resolve {
        /// Request path, e.g. "/abc" or "/b:aHR0cHM6Ly9leGFtcGxlLmNvbQ"
        path: String,

        /// Raw query string, without the leading '?'
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Print the stored record(s) for a slug
    Get {
        slug: String,
    },

    /// Check the Redis connection
    Ping,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Resolve { path, query } => resolve(&config, &path, query.as_deref()).await?,
        Commands::Get { slug } => get(&config, &slug).await?,
        Commands::Ping => ping(&config).await?,
    }

    Ok(())
}

async fn connect(config: &Config) -> Result<RedisLinkStore> {
    let redis_url = config
        .redis_url
        .as_deref()
        .context("REDIS_URL (or REDIS_HOST) must be set")?;

    RedisLinkStore::connect(redis_url)
        .await
        .context("Failed to connect to Redis")
}

/// Runs the resolver once and prints the decision.
async fn resolve(config: &Config, path: &str, query: Option<&str>) -> Result<()> {
    let store: Option<Arc<dyn LinkStore>> = if config.is_store_enabled() {
        Some(Arc::new(connect(config).await?))
    } else {
        println!("{}", "Redis not configured: slug lookups are skipped".yellow());
        None
    };

    let resolver = RedirectResolver::new(Arc::new(config.resolver_config()?), store, None);
    let mut ctx = RequestContext::new(path, query);

    println!("{} {}", "Path:".bright_white().bold(), path.cyan());

    match resolver.resolve(&mut ctx).await {
        Ok(RedirectDecision::Redirect { target, status }) => {
            let status = status.map_or_else(|| "default".to_string(), |s| s.as_u16().to_string());
            println!("{} {}", "Redirect".green().bold(), status.bright_white());
            println!("  Location: {}", target.bright_yellow());
            if let Some(link) = ctx.link() {
                println!("  Record:   {}", serde_json::to_string(link)?.dimmed());
            }
        }
        Ok(RedirectDecision::NoAction) => {
            println!("{}", "No action (404)".yellow().bold());
        }
        Err(ResolveError::BadRequest(reason)) => {
            println!("{} {}", "Bad Request (400):".red().bold(), reason);
        }
        Err(ResolveError::Store(e)) => {
            println!("{} {}", "Store error (500):".red().bold(), e);
        }
    }

    Ok(())
}

/// Prints the raw value under every key the resolver would try for `slug`.
async fn get(config: &Config, slug: &str) -> Result<()> {
    let store = connect(config).await?;

    for candidate in lookup_attempts(slug, config.case_sensitive) {
        let key = link_key(&candidate);
        // Zero TTL keeps the value out of the local cache.
        match store
            .get(&key, Duration::ZERO)
            .await
            .with_context(|| format!("Failed to read {}", key))?
        {
            Some(value) => {
                println!("{} {}", "✓".green(), key.cyan());
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
            None => println!("{} {} {}", "✗".red(), key.cyan(), "(missing)".dimmed()),
        }
    }

    Ok(())
}

async fn ping(config: &Config) -> Result<()> {
    let store = connect(config).await?;

    if store.health_check().await {
        println!("{}", "✅ Redis reachable".green().bold());
        Ok(())
    } else {
        anyhow::bail!("Redis PING failed")
    }
}
