//! Command-line entry points for `bctl` and `search-wikipedia`

use crate::address::SystemResolver;
use crate::config::{self, Config};
use crate::desktop::{ClipboardSource, SystemBrowser};
use crate::dispatch::{Intent, Resolver, Shortcut};
use crate::logging;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

/// Options shared by both binaries
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write debug logs to the configured log file
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Parser, Debug)]
#[command(name = "bctl", version, about = "Open searches, translations and pages in the browser")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search the given text on the web, or open it if it is an address
    Query {
        /// Site (or any keyword) to put at the beginning of the query
        #[arg(short, long)]
        site: Option<String>,

        /// Text to search; read from the clipboard when omitted
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Translate the given text
    Translate {
        /// Source language (config default: en)
        #[arg(short, long)]
        source: Option<String>,

        /// Target language (config default: it)
        #[arg(short, long)]
        target: Option<String>,

        /// Text to translate; read from the clipboard when omitted
        #[arg(short = 'T', long)]
        text: Option<String>,
    },

    /// Search the given text on Wikipedia
    Wiki {
        /// Wikipedia language edition (config default: en)
        #[arg(short, long)]
        lang: Option<String>,

        /// Text to search; read from the clipboard when omitted
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Open WhatsApp Web
    Whatsapp,

    /// Open Google
    Open,

    /// Open Gmail
    Mail,

    /// Open Google Calendar
    Cal,
}

impl Command {
    /// Turn the parsed command into an intent, filling defaults from `config`
    pub fn into_intent(self, config: &Config) -> Intent {
        match self {
            Command::Query { site, query } => Intent::Search { text: query, site },
            Command::Translate {
                source,
                target,
                text,
            } => Intent::Translate {
                text,
                source: source.unwrap_or_else(|| config.translate.source.clone()),
                target: target.unwrap_or_else(|| config.translate.target.clone()),
            },
            Command::Wiki { lang, query } => Intent::Wiki {
                text: query,
                lang: lang.unwrap_or_else(|| config.wiki.lang.clone()),
            },
            Command::Whatsapp => Intent::Shortcut(Shortcut::WhatsApp),
            Command::Open => Intent::Shortcut(Shortcut::Google),
            Command::Mail => Intent::Shortcut(Shortcut::Mail),
            Command::Cal => Intent::Shortcut(Shortcut::Calendar),
        }
    }
}

/// Search, in order, the configured Wikipedia editions (Italian, then English
/// by default) and fall back to a web search
#[derive(Parser, Debug)]
#[command(name = "search-wikipedia", version)]
pub struct CascadeCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Maximum number of Wikipedia pages to open (config default: 1)
    #[arg(short, long)]
    pub count: Option<u32>,

    /// Text to search; read from the clipboard when omitted
    pub query: Option<String>,
}

impl CascadeCli {
    pub fn into_intent(self, config: &Config) -> Intent {
        Intent::WikiCascade {
            text: self.query,
            count: self.count.unwrap_or(config.wiki.count),
        }
    }
}

/// Entry point for `bctl`
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command;
    execute(&cli.global, move |config| command.into_intent(config)).await
}

/// Entry point for `search-wikipedia`
pub async fn run_cascade() -> Result<()> {
    let cli = CascadeCli::parse();
    let global = cli.global.clone();
    execute(&global, move |config| cli.into_intent(config)).await
}

/// Load configuration for the given global flags
pub fn load_config(global: &GlobalArgs) -> Result<Config> {
    let mut config = match &global.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_or_create_config()?,
    };
    if global.debug {
        config.logging.debug = true;
    }
    Ok(config)
}

async fn execute(global: &GlobalArgs, intent: impl FnOnce(&Config) -> Intent) -> Result<()> {
    let config = load_config(global)?;
    let _log_guard = logging::init(&config.logging)?;

    let intent = intent(&config);
    let browser = SystemBrowser::new(config.browser.clone());
    let resolver = Resolver::new(config, Arc::new(SystemResolver), Arc::new(ClipboardSource))
        .context("Failed to set up resolver")?;

    let destination = resolver
        .dispatch(intent, &browser)
        .await
        .context("Could not resolve destination")?;

    tracing::info!(destination = ?destination, "dispatch complete");
    Ok(())
}
