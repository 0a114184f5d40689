//! Application configuration from CLI arguments

use std::env;
use std::path::PathBuf;

use super::config_file::ConfigFile;
use super::store::TableOptionStore;
use crate::core::{FilterFlag, IndexFilter, RangeFallback, SortDirection, TableName};
use crate::error::KapoviewError;

/// Exit codes for the `kv` binary
pub mod exit_code {
    /// Command completed
    pub const SUCCESS: i32 = 0;
    /// Runtime error (state file, rejected change, bad script)
    pub const ERROR: i32 = 2;
    /// Invalid arguments (unknown option, table or column)
    pub const INVALID: i32 = 3;
}

/// What `kv` was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Version,
    /// List the table names
    Tables,
    Show {
        table: TableName,
    },
    Sort {
        table: TableName,
        column: String,
        direction: Option<SortDirection>,
    },
    Column {
        table: TableName,
        column: String,
        visible: bool,
    },
    Move {
        table: TableName,
        column: String,
        index: usize,
    },
    Filter {
        table: TableName,
        flag: FilterFlag,
        value: bool,
    },
    FilterKey(IndexFilter),
    PageSize(u32),
    /// Reset one table, or every table when `None`
    Reset(Option<TableName>),
    /// Run a selection script read from stdin
    Select,
}

/// Application configuration from CLI args and config file
#[derive(Debug)]
pub struct Config {
    pub command: Command,
    /// Print machine-readable output
    pub json: bool,
    /// Table options state file
    pub state_file: PathBuf,
    /// Persist every change (from config file)
    pub autosave: bool,
    /// Shift-click fallback (from config file)
    pub range_fallback: RangeFallback,
    /// Default log filter (from config file)
    pub log_level: String,
}

impl Config {
    pub fn from_args() -> anyhow::Result<Self> {
        Self::parse(env::args().skip(1))
    }

    /// Parse arguments (without the program name)
    pub fn parse<I>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut positional: Vec<String> = Vec::new();
        let mut config_path: Option<PathBuf> = None;
        let mut state_file: Option<PathBuf> = None;
        let mut json = false;
        let mut early: Option<Command> = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--json" => json = true,
                "--config" | "-c" => {
                    if let Some(path) = args.next() {
                        config_path = Some(PathBuf::from(path));
                    } else {
                        anyhow::bail!("--config requires a file path");
                    }
                }
                "--state-file" => {
                    if let Some(path) = args.next() {
                        state_file = Some(PathBuf::from(path));
                    } else {
                        anyhow::bail!("--state-file requires a file path");
                    }
                }
                "--help" | "-h" => early = early.or(Some(Command::Help)),
                "--version" | "-V" => early = early.or(Some(Command::Version)),
                word if !word.starts_with('-') || word.parse::<i64>().is_ok() => {
                    positional.push(word.to_string())
                }
                unknown => {
                    anyhow::bail!(
                        "Unknown option: {}. Use --help for usage information.",
                        unknown
                    );
                }
            }
        }

        // Load config file first (provides defaults)
        let config_file = match config_path {
            Some(path) => ConfigFile::load_from(&path).map_err(|e| {
                KapoviewError::config(format!("Failed to load config {}: {}", path.display(), e))
            })?,
            None => ConfigFile::load(),
        };

        let command = match early {
            Some(command) => command,
            None => parse_command(&positional)?,
        };

        // CLI arguments take precedence over config file
        let state_file = match state_file
            .or(config_file.storage.state_file)
            .or_else(TableOptionStore::default_path)
        {
            Some(path) => path,
            None if matches!(command, Command::Help | Command::Version | Command::Tables) => {
                PathBuf::new()
            }
            None => {
                return Err(KapoviewError::config(
                    "Cannot determine a data directory; pass --state-file PATH",
                )
                .into())
            }
        };

        Ok(Self {
            command,
            json,
            state_file,
            autosave: config_file.storage.autosave,
            range_fallback: config_file.selection.range_fallback,
            log_level: config_file.logging.level,
        })
    }
}

fn parse_command(words: &[String]) -> anyhow::Result<Command> {
    let words: Vec<&str> = words.iter().map(String::as_str).collect();
    let command = match words.as_slice() {
        [] => anyhow::bail!("No command given. Use --help for usage information."),
        ["tables"] => Command::Tables,
        ["show", table] => Command::Show {
            table: parse_table(table)?,
        },
        ["sort", table, column] => Command::Sort {
            table: parse_table(table)?,
            column: column.to_string(),
            direction: None,
        },
        ["sort", table, column, direction] => Command::Sort {
            table: parse_table(table)?,
            column: column.to_string(),
            direction: Some(SortDirection::parse(direction).ok_or_else(|| {
                anyhow::anyhow!("Invalid direction '{}'. Use asc or desc", direction)
            })?),
        },
        ["column", table, column, visibility] => Command::Column {
            table: parse_table(table)?,
            column: column.to_string(),
            visible: match *visibility {
                "show" => true,
                "hide" => false,
                other => anyhow::bail!("column requires 'show' or 'hide', got '{}'", other),
            },
        },
        ["move", table, column, index] => Command::Move {
            table: parse_table(table)?,
            column: column.to_string(),
            index: index.parse().map_err(|_| {
                anyhow::anyhow!("move requires a non-negative index, got '{}'", index)
            })?,
        },
        ["filter", table, flag, value] => Command::Filter {
            table: parse_table(table)?,
            flag: FilterFlag::parse(flag).ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown filter '{}'. Valid filters: {}",
                    flag,
                    join(FilterFlag::ALL.iter().map(FilterFlag::as_str))
                )
            })?,
            value: parse_switch(value)?,
        },
        ["filter-key", filter] => Command::FilterKey(IndexFilter::parse(filter).ok_or_else(
            || {
                anyhow::anyhow!(
                    "Unknown filter key '{}'. Valid keys: {}",
                    filter,
                    join(IndexFilter::ALL.iter().map(IndexFilter::as_str))
                )
            },
        )?),
        ["page-size", size] => Command::PageSize(
            size.parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    anyhow::anyhow!("page-size requires a positive integer, got '{}'", size)
                })?,
        ),
        ["reset"] => Command::Reset(None),
        ["reset", table] => Command::Reset(Some(parse_table(table)?)),
        ["select"] => Command::Select,
        [name, ..] => anyhow::bail!(
            "Invalid usage of '{}'. Use --help for usage information.",
            name
        ),
    };
    Ok(command)
}

fn parse_table(name: &str) -> Result<TableName, KapoviewError> {
    TableName::parse(name).ok_or_else(|| KapoviewError::UnknownTable(name.to_string()))
}

fn parse_switch(value: &str) -> anyhow::Result<bool> {
    match value {
        "on" | "true" => Ok(true),
        "off" | "false" => Ok(false),
        other => anyhow::bail!("Expected 'on' or 'off', got '{}'", other),
    }
}

fn join<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

pub fn print_help() {
    println!(
        r#"kv - Kapoview: list-view selection and table options

USAGE:
    kv [OPTIONS] <COMMAND>

COMMANDS:
    tables                          List the table names
    show <table>                    Show sort, columns and filters of a table
    sort <table> <column> [asc|desc]
                                    Sort by column (re-sorting the same column flips it)
    column <table> <column> show|hide
                                    Change a column's visibility
    move <table> <column> <index>   Move a column to a new position
    filter <table> <flag> on|off    Toggle a filter (hideDownloaded, hideUnmonitored, hideUnmatched)
    filter-key <filter>             Volume index filter: all, monitored, unmonitored,
                                    continuing, ended, wanted
    page-size <n>                   Volume index page size
    reset [<table>]                 Restore defaults for one table or all tables
    select                          Run a selection script read from stdin

OPTIONS:
    --json              Print JSON output (show, select)
    -c, --config PATH   Use this config file instead of the default
    --state-file PATH   Table options file
    -h, --help          Show this help message
    -V, --version       Show version

TABLES:
    volumeIndex, issueTable, queueTable, searchResults, historyTable, blocklistTable

SELECTION SCRIPT:
    items A B C     Set the current items (in display order)
    toggle B [on|off]
                    Toggle one item
    shift D [on|off]
                    Shift-click: apply to the range from the last toggled item
    all             Select every item
    none            Unselect every item
    remove C        Remove an item
    reset           Forget the whole selection
    # ...           Comment

CONFIG FILE:
    ~/.config/kapoview/config.toml

ENVIRONMENT:
    RUST_LOG        Log filter (overrides [logging] level)

EXIT CODES:
    0           Success
    2           Error (runtime error)
    3           Invalid arguments (unknown option, table or column)
"#
    );
}
