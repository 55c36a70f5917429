//! Command-line arguments.

use clap::{Args, Parser, Subcommand, ValueEnum};

use pcm_shared::{SortField, SortOrder};

use super::routes::character_list::InitialQuery;
use super::routes::Route;
use crate::ui::UiError;

/// PC Character Manager - create, browse and edit tabletop characters
#[derive(Parser, Debug)]
#[command(name = "pcm-player")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Character API base URL (overrides PCM_API_BASE_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Without a command the character list opens
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Browse characters
    List(ListArgs),

    /// Show one character
    Show {
        /// Character id
        id: String,
    },

    /// Create a character with the step-by-step wizard
    Create,

    /// Edit an existing character
    Edit {
        /// Character id
        id: String,
    },

    /// Delete a character
    Delete {
        /// Character id
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Check that the character API is reachable
    Health,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ListArgs {
    /// Filter by character name
    #[arg(short, long)]
    pub search: Option<String>,

    #[arg(long, value_enum, default_value_t)]
    pub sort: SortArg,

    #[arg(long, value_enum, default_value_t)]
    pub order: OrderArg,

    #[arg(short, long, default_value_t = 1)]
    pub page: u32,

    /// Print the page and exit instead of browsing
    #[arg(long)]
    pub once: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortArg {
    Name,
    Level,
    Race,
    Class,
    #[default]
    Created,
}

impl From<SortArg> for SortField {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortField::CharacterName,
            SortArg::Level => SortField::Level,
            SortArg::Race => SortField::Race,
            SortArg::Class => SortField::Class,
            SortArg::Created => SortField::CreatedAt,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderArg {
    Asc,
    #[default]
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Asc => SortOrder::Asc,
            OrderArg::Desc => SortOrder::Desc,
        }
    }
}

impl ListArgs {
    pub fn initial_query(&self) -> InitialQuery {
        InitialQuery {
            search: self.search.clone().unwrap_or_default(),
            sort_by: self.sort.into(),
            sort_order: self.order.into(),
            page: self.page,
        }
    }
}

impl Commands {
    /// The screen this command opens. `Health` and `Delete` are one-shot
    /// actions with no screen.
    pub fn route(&self) -> Result<Option<Route>, UiError> {
        Ok(match self {
            Commands::List(args) => {
                let query = args.initial_query();
                Some(Route::CharacterList {
                    search: query.search,
                    sort_by: query.sort_by,
                    sort_order: query.sort_order,
                    page: query.page,
                    banner: None,
                })
            }
            Commands::Show { id } => Some(Route::CharacterDetail { id: id.parse()? }),
            Commands::Create => Some(Route::CreateCharacter),
            Commands::Edit { id } => Some(Route::EditCharacter { id: id.parse()? }),
            Commands::Delete { .. } | Commands::Health => None,
        })
    }
}
