//! CLI administration tool for shorturl.
//!
//! Provides key generation, short code debugging and database maintenance
//! without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Generate obfuscator keys
//! cargo run --bin admin -- keygen
//!
//! # Show the code issued for sequence id 42, and reverse it
//! cargo run --bin admin -- encode 42
//! cargo run --bin admin -- decode 1xYz9
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Delete expired links
//! cargo run --bin admin -- purge-expired
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required for `db` and `purge-expired`)
//! - `OPTIMUS_PRIME`, `OPTIMUS_INVERSE`, `OPTIMUS_RANDOM`, `OPTIMUS_BITS`
//!   (required for `encode` and `decode`)

use shorturl::config::obfuscator_from_env;
use shorturl::domain::obfuscator::{DEFAULT_BITS, MAX_BITS, Obfuscator, is_prime};
use shorturl::domain::repositories::UrlRepository;
use shorturl::infrastructure::persistence::PgUrlRepository;
use shorturl::utils::base62;
use shorturl::utils::code_generator::generate_code;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use rand::Rng;
use sqlx::PgPool;
use std::sync::Arc;

/// Smallest bit width `keygen` accepts; narrower domains are too small to be useful.
const MIN_KEYGEN_BITS: u32 = 8;

/// CLI tool for managing shorturl.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Generate a random OPTIMUS_* key set
    Keygen {
        /// Domain width in bits
        #[arg(short, long, default_value_t = DEFAULT_BITS, value_parser = parse_bits)]
        bits: u32,
    },

    /// Show the short code generated for a sequence id
    Encode {
        /// Sequence id
        id: i64,
    },

    /// Recover the sequence id behind a generated short code
    Decode {
        /// Short code
        code: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Delete links whose expiration has passed
    PurgeExpired {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Keygen { bits } => keygen(bits)?,
        Commands::Encode { id } => encode(id)?,
        Commands::Decode { code } => decode(&code)?,
        Commands::Db { action } => {
            let pool = connect().await?;
            handle_db_action(action, &pool).await?
        }
        Commands::PurgeExpired { yes } => {
            let pool = connect().await?;
            purge_expired(&pool, yes).await?
        }
    }

    Ok(())
}

fn parse_bits(raw: &str) -> Result<u32, String> {
    let bits: u32 = raw.parse().map_err(|_| format!("'{raw}' is not a number"))?;
    if !(MIN_KEYGEN_BITS..=MAX_BITS).contains(&bits) {
        return Err(format!(
            "bit width must be between {MIN_KEYGEN_BITS} and {MAX_BITS}"
        ));
    }
    Ok(bits)
}

async fn connect() -> Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

/// Generates a random obfuscator key set.
///
/// The multiplier is a random prime from the upper half of the domain;
/// its inverse is computed, not searched. Output is shell-sourceable:
///
/// ```text
/// OPTIMUS_PRIME=1580030173
/// OPTIMUS_INVERSE=59260789
/// OPTIMUS_RANDOM=1163945558
/// OPTIMUS_BITS=31
/// ```
fn keygen(bits: u32) -> Result<()> {
    let mask = (1u64 << bits) - 1;
    let mut rng = rand::rng();

    let prime = loop {
        let candidate = rng.random_range(mask / 2..=mask) | 1;
        if is_prime(candidate) {
            break candidate;
        }
    };

    let inverse = Obfuscator::modular_inverse(prime, bits)?;
    let random = rng.random_range(0..=mask);

    // Round-trip through the constructor so a bad triple is never printed.
    Obfuscator::new(prime, inverse, random, bits)?;

    eprintln!(
        "{}",
        format!("🔑 Generated {bits}-bit obfuscator keys").bright_blue().bold()
    );
    eprintln!(
        "{}",
        "⚠️  Changing keys on a live database changes every future code."
            .yellow()
    );
    println!("OPTIMUS_PRIME={prime}");
    println!("OPTIMUS_INVERSE={inverse}");
    println!("OPTIMUS_RANDOM={random}");
    println!("OPTIMUS_BITS={bits}");

    Ok(())
}

/// Prints the code the service would issue for `id`.
fn encode(id: i64) -> Result<()> {
    let obfuscator = obfuscator_from_env()?;
    let code = generate_code(id, &obfuscator).map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Id:   {}", id.to_string().bright_white());
    println!("  Code: {}", code.bright_green().bold());

    Ok(())
}

/// Reverses a generated code to its sequence id.
///
/// Custom aliases were never derived from an id; for those the reversal
/// either fails or yields an id with no relation to the record.
fn decode(code: &str) -> Result<()> {
    let obfuscator = obfuscator_from_env()?;

    let value = base62::decode(code)
        .with_context(|| format!("'{}' is not a generated short code", code))?;
    let id = obfuscator
        .deobfuscate(value)
        .with_context(|| format!("'{}' is outside the configured code space", code))?;

    println!("  Code: {}", code.bright_white());
    println!("  Id:   {}", id.to_string().bright_green().bold());

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let repo = PgUrlRepository::new(Arc::new(pool.clone()));
            repo.ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let repo = PgUrlRepository::new(Arc::new(pool.clone()));
            let total = repo
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;
            let expired = repo
                .count_expired(Utc::now())
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count expired links: {}", e))?;

            println!("  PostgreSQL:    {}", version.bright_white());
            println!(
                "  Links:         {}",
                total.to_string().bright_green().bold()
            );
            println!(
                "  Expired links: {}",
                expired.to_string().bright_yellow().bold()
            );
            println!();
        }
    }

    Ok(())
}

/// Physically deletes expired links after confirmation.
async fn purge_expired(pool: &PgPool, skip_confirm: bool) -> Result<()> {
    println!("{}", "🧹 Purge Expired Links".bright_blue().bold());
    println!();

    let repo = PgUrlRepository::new(Arc::new(pool.clone()));
    let now = Utc::now();

    let expired = repo
        .count_expired(now)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count expired links: {}", e))?;

    if expired == 0 {
        println!("{}", "  No expired links found".yellow());
        return Ok(());
    }

    println!(
        "  Expired links: {}",
        expired.to_string().bright_yellow().bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete these links permanently?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deleted = repo
        .delete_expired(now)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete expired links: {}", e))?;

    println!();
    println!(
        "{}",
        format!("✅ Deleted {} expired links", deleted).green().bold()
    );
    println!();

    Ok(())
}
