use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use meal_engine::SortDirection;
use meal_engine::SortField;
use meal_engine::SortSpec;
use std::path::PathBuf;

use crate::config::ConfigOverrides;

#[derive(Debug, Parser)]
#[command(name = "mealbrowse", version, about = "Search and browse TheMealDB from the terminal")]
pub struct Cli {
    /// TOML config file. Defaults to $MEALBROWSE_HOME/config.toml, then
    /// ~/.mealbrowse/config.toml when present.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the catalog endpoint.
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Override the quiet period used by `watch`.
    #[arg(long, global = true, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            debounce_ms: self.debounce_ms,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search meals by name; with no text, show a random sample.
    Search(SearchCommand),
    /// Filter by category and/or area.
    Browse(BrowseCommand),
    /// Show one meal, optionally stepping through its category.
    Show(ShowCommand),
    /// Meals whose name starts with a letter.
    Letter(LetterCommand),
    /// List categories.
    Categories(CategoriesCommand),
    /// List areas.
    Areas,
    /// List ingredients.
    Ingredients,
    /// Read queries from stdin, one per line, and print each applied result.
    Watch(WatchCommand),
}

#[derive(Debug, Parser)]
pub struct SearchCommand {
    /// Free-form meal name.
    #[arg(value_name = "TEXT", num_args = 0..)]
    pub text: Vec<String>,

    #[command(flatten)]
    pub sort: SortArgs,

    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,
}

impl SearchCommand {
    pub fn query(&self) -> String {
        self.text.join(" ")
    }
}

#[derive(Debug, Parser)]
pub struct BrowseCommand {
    /// Category to include (repeatable; only the first one is sent upstream).
    #[arg(long = "category", action = ArgAction::Append)]
    pub categories: Vec<String>,

    /// Area to include (repeatable).
    #[arg(long = "area", action = ArgAction::Append)]
    pub areas: Vec<String>,

    #[command(flatten)]
    pub sort: SortArgs,

    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,
}

#[derive(Debug, Parser)]
pub struct ShowCommand {
    #[arg(value_name = "ID")]
    pub id: String,

    /// Step forward through the meal's category this many times.
    #[arg(long, value_name = "N", conflicts_with = "prev")]
    pub next: Option<usize>,

    /// Step backward through the meal's category this many times.
    #[arg(long, value_name = "N")]
    pub prev: Option<usize>,

    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,
}

#[derive(Debug, Parser)]
pub struct LetterCommand {
    #[arg(value_name = "LETTER")]
    pub letter: char,

    #[command(flatten)]
    pub sort: SortArgs,

    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,
}

#[derive(Debug, Parser)]
pub struct CategoriesCommand {
    /// Include each category's description.
    #[arg(long)]
    pub describe: bool,
}

#[derive(Debug, Parser)]
pub struct WatchCommand {
    #[command(flatten)]
    pub sort: SortArgs,

    /// Do not load the default sample before the first query.
    #[arg(long)]
    pub no_initial: bool,
}

#[derive(Debug, Clone, Copy, Args)]
pub struct SortArgs {
    /// Column to sort by.
    #[arg(long = "sort", value_enum, default_value_t = SortArg::Name)]
    pub field: SortArg,

    /// Sort descending.
    #[arg(long)]
    pub desc: bool,
}

impl SortArgs {
    pub fn spec(self) -> SortSpec {
        let direction = if self.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        SortSpec::new(self.field.into(), direction)
    }
}

#[derive(Copy, Clone, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum SortArg {
    #[default]
    Name,
    Category,
    Area,
}

impl From<SortArg> for SortField {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Name => SortField::Name,
            SortArg::Category => SortField::Category,
            SortArg::Area => SortField::Area,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
