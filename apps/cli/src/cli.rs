//! Command line definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lnf_core::{ItemCategory, ItemType, TypeFilter};

/// Campus Lost & Found client.
#[derive(Debug, Parser)]
#[command(name = "lnf", version, about)]
pub struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true, env = "LNF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Counts and the most recent items
    Home,

    /// Search every item
    Search(SearchArgs),

    /// Show one item
    Show {
        id: i64,
    },

    /// Open a page by path, e.g. `/search?q=keys` or `/items/4`
    Open {
        path: String,
    },

    /// List your own items
    Mine {
        /// all, lost or found
        #[arg(long, default_value = "all")]
        filter: TypeFilter,
    },

    /// Edit one of your items; unset fields keep their value
    Edit {
        id: i64,

        #[command(flatten)]
        fields: ItemFieldArgs,

        #[arg(long = "type")]
        item_type: Option<ItemType>,
    },

    /// Delete one of your items
    Delete {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Report an item you lost
    ReportLost(ReportArgs),

    /// Report an item you found
    ReportFound(ReportArgs),

    /// Sign in
    Signin {
        username: String,

        /// Read from the terminal when omitted
        #[arg(long, env = "LNF_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account
    Signup {
        username: String,
        email: String,

        #[arg(long, env = "LNF_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Defaults to a second prompt
        #[arg(long)]
        confirm: Option<String>,
    },

    /// Sign out and forget the session
    Signout,

    /// Show the signed-in user
    Whoami,

    /// Check connectivity to the backend
    Doctor,

    /// Show or write the configuration file
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        save: bool,
    },
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Text matched against title, description and location
    pub query: Option<String>,

    #[arg(long, value_parser = parse_category)]
    pub category: Option<ItemCategory>,

    #[arg(long = "type")]
    pub item_type: Option<ItemType>,
}

/// Item form fields shared by `edit` and the report commands.
#[derive(Debug, Default, Args)]
pub struct ItemFieldArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long, value_parser = parse_category)]
    pub category: Option<ItemCategory>,

    #[arg(long)]
    pub location: Option<String>,

    /// YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,

    /// Phone number or e-mail
    #[arg(long)]
    pub contact: Option<String>,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub fields: ItemFieldArgs,

    /// Optional photo of the item
    #[arg(long)]
    pub image: Option<PathBuf>,
}

/// Category argument. Unknown names list the valid choices.
fn parse_category(value: &str) -> Result<ItemCategory, String> {
    value.parse().map_err(|_| {
        let choices = ItemCategory::ALL
            .iter()
            .map(ItemCategory::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        format!("expected one of {}", choices)
    })
}

impl ItemFieldArgs {
    /// Copies every set field onto the form.
    pub fn apply(&self, draft: &mut lnf_core::ItemDraft) {
        if let Some(title) = &self.title {
            draft.title = title.clone();
        }
        if let Some(description) = &self.description {
            draft.description = description.clone();
        }
        if let Some(category) = self.category {
            draft.category = Some(category);
        }
        if let Some(location) = &self.location {
            draft.location = location.clone();
        }
        if let Some(date) = &self.date {
            draft.date = date.clone();
        }
        if let Some(contact) = &self.contact {
            draft.contact_info = contact.clone();
        }
    }
}
