//! Quick link commands for CLI.

use clap::Subcommand;
use focusdesk_core::{LinkId, ValidationError};

use super::open_store;

#[derive(Subcommand)]
pub enum LinkAction {
    /// Save a link
    Add {
        /// URL to save
        url: String,
    },
    /// List saved links
    List,
    /// Remove a link
    Delete {
        /// Link ID
        id: u64,
    },
}

pub fn run(action: LinkAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;

    match action {
        LinkAction::Add { url } => {
            let url = url.trim();
            if url.is_empty() {
                return Err(ValidationError::Empty("url").into());
            }
            let id = store.add_link(url)?;
            println!("Link created: {id}");
        }
        LinkAction::List => {
            println!("{}", serde_json::to_string_pretty(store.links())?);
        }
        LinkAction::Delete { id } => {
            if store.delete_link(LinkId(id))? {
                println!("Link deleted: {id}");
            } else {
                println!("Link not found: {id}");
            }
        }
    }
    Ok(())
}
