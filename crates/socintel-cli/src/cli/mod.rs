//! CLI for SOCINTEL.

mod commands;
mod host;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use socintel_core::config::{self, SocintelConfig};
use socintel_core::prefs::{PreferenceStore, SectionKey};
use socintel_core::sanitise::SanitiseKind;
use std::path::PathBuf;

use commands::{
    run_classify, run_expand, run_menu, run_pivot, run_prefs, run_sanitise, PivotArgs,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "socintel")]
#[command(about = "SOCINTEL: pivot from IOCs to threat-intelligence lookups", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the IOC type of a piece of text (ipv4, ipv6, hash, url, unknown).
    Classify {
        /// Text to classify.
        text: String,
    },

    /// Open every configured lookup for an IOC and copy it to the clipboard.
    Pivot {
        /// Selected text (IP, hash, URL or domain).
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        text: Option<String>,
        /// Lookup section to use instead of auto-detection (ip, hash, url).
        #[arg(long)]
        kind: Option<SectionKey>,
        /// Pivot on the SHA-256 of a local file.
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
        /// Print what would be opened and copied without doing it.
        #[arg(long)]
        dry_run: bool,
    },

    /// Expand a lookup URL template.
    Expand {
        /// Template, e.g. "abuseipdb.com/check/{ip}".
        template: String,
        #[arg(long)]
        ip: Option<String>,
        #[arg(long)]
        hash: Option<String>,
        /// URL used for {url}, {encodedUrl} and {domain}.
        #[arg(long)]
        url: Option<String>,
    },

    /// Defang an IP or URL.
    Sanitise {
        text: String,
        #[arg(long, value_enum)]
        kind: SanitiseArg,
    },

    /// Show or edit lookup preferences.
    Prefs {
        #[command(subcommand)]
        command: PrefsCommand,
    },

    /// List the selection context-menu items for the active sections.
    Menu,
}

#[derive(Debug, Subcommand)]
pub enum PrefsCommand {
    /// Print preferences (all sections, or one tab).
    Show {
        #[arg(long)]
        tab: Option<SectionKey>,
    },

    /// Restore the default preferences.
    Reset,

    /// Toggle a section option.
    Set {
        section: SectionKey,
        #[arg(value_enum)]
        option: SectionOption,
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },

    /// Manage a section's lookup URL templates.
    Url {
        #[command(subcommand)]
        command: UrlCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum UrlCommand {
    /// List templates with their positions.
    List { section: SectionKey },
    /// Append a template.
    Add { section: SectionKey, template: String },
    /// Replace the template at a position.
    Set {
        section: SectionKey,
        index: usize,
        template: String,
    },
    /// Clear the template at a position.
    Remove { section: SectionKey, index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SectionOption {
    Active,
    Copy,
    Sanitise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SanitiseArg {
    Ip,
    Url,
}

impl From<SanitiseArg> for SanitiseKind {
    fn from(arg: SanitiseArg) -> Self {
        match arg {
            SanitiseArg::Ip => SanitiseKind::Ip,
            SanitiseArg::Url => SanitiseKind::Url,
        }
    }
}

/// Load config and open the configured preference store.
fn open_store() -> Result<(SocintelConfig, PreferenceStore)> {
    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);
    let store = PreferenceStore::open_default(cfg.storage_area)?;
    Ok((cfg, store))
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Classify { text } => run_classify(&text)?,
            CliCommand::Expand {
                template,
                ip,
                hash,
                url,
            } => run_expand(&template, ip, hash, url)?,
            CliCommand::Sanitise { text, kind } => run_sanitise(&text, kind.into())?,
            CliCommand::Pivot {
                text,
                kind,
                file,
                dry_run,
            } => {
                let (cfg, store) = open_store()?;
                let args = PivotArgs {
                    text,
                    kind,
                    file,
                    dry_run,
                };
                run_pivot(&store, &cfg, args).await?;
            }
            CliCommand::Prefs { command } => {
                let (cfg, store) = open_store()?;
                run_prefs(store, &cfg, command).await?;
            }
            CliCommand::Menu => {
                let (_, store) = open_store()?;
                run_menu(&store).await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
