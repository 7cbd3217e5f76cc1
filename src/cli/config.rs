use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::label::strategy::HintStyle;
use crate::scan::candidate::HintCategory;
use crate::session::hint_config::HintConfig;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "keyhints",
    version,
    about = "Keyboard link hinting over recorded pages"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: keyhints.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Label style: letter or number (overrides the config file)
    #[arg(long, global = true)]
    pub style: Option<HintStyle>,

    /// Append a JSONL trace of every hint operation to this file
    #[arg(long, global = true)]
    pub trace: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the label given to each hinted element
    Labels {
        /// Page description (.json, .yaml or .yml)
        #[arg(long)]
        page: String,

        /// Elements to hint: all, links, images, editable
        #[arg(long, default_value = "all")]
        category: HintCategory,
    },

    /// Open a hint session and feed it keystrokes
    Replay {
        /// Page description (.json, .yaml or .yml)
        #[arg(long)]
        page: String,

        /// Elements to hint: all, links, images, editable
        #[arg(long, default_value = "all")]
        category: HintCategory,

        /// Keys to type, e.g. "ab<BS>c<Tab><Return>"
        #[arg(long)]
        keys: String,
    },

    /// Submit a query through the page's first search field
    Search {
        /// Page description (.json, .yaml or .yml)
        #[arg(long)]
        page: String,

        /// Text to submit
        #[arg(long)]
        query: String,
    },

    /// Cycle keyboard focus through the page's text inputs
    Focus {
        /// Page description (.json, .yaml or .yml)
        #[arg(long)]
        page: String,

        /// How many times to move the focus
        #[arg(long, default_value_t = 1)]
        times: usize,
    },
}

// ============================================================================
// Config File (keyhints.yaml)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub hints: HintConfig,

    /// Trace file used when `--trace` is not given.
    pub trace: Option<String>,
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("keyhints.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = config_path, error = %e, "malformed config file, using defaults");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Hint options from the config file with the CLI overrides applied.
pub fn build_hint_config(config: &AppConfig, style: Option<HintStyle>) -> HintConfig {
    let mut hints = config.hints.clone();
    if let Some(style) = style {
        hints.style = style;
    }
    hints
}

/// Trace path: CLI > config file.
pub fn resolve_trace_path<'a>(config: &'a AppConfig, cli_trace: Option<&'a str>) -> Option<&'a str> {
    cli_trace.or(config.trace.as_deref())
}
