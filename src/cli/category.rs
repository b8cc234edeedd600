//! Category CLI commands
//!
//! Implements CLI commands for budget category management.

use clap::Subcommand;

use super::parse_percentage;
use crate::display::{format_category_list, format_category_tree};
use crate::error::{FamfinError, FamfinResult};
use crate::models::MacroGroup;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories (organized by macro group)
    List {
        /// Only categories that take part in this group (needs, wants, investments)
        #[arg(short, long)]
        group: Option<MacroGroup>,
    },

    /// Add a new category
    Add {
        /// Category name
        name: String,
        /// Macro group (needs, wants, investments); omit to join every group
        #[arg(short, long)]
        group: Option<MacroGroup>,
        /// Weight inside the group, as a percentage
        #[arg(short, long)]
        weight: Option<String>,
    },

    /// Delete a category and its saved budget rows
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> FamfinResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List { group: None } => {
            let categories = service.list()?;
            println!("{}", format_category_tree(&categories).trim_end());
        }

        CategoryCommands::List { group: Some(group) } => {
            let categories = service.list_for_group(group)?;
            println!("{}", format_category_list(&categories).trim_end());
        }

        CategoryCommands::Add {
            name,
            group,
            weight,
        } => {
            let weight = weight.as_deref().map(parse_percentage).transpose()?;
            let category = service.create(&name, group, weight)?;

            println!("Created category: {}", category.name);
            println!(
                "  Group: {}",
                category.macro_group.map_or("any", |g| g.label())
            );
            if let Some(weight) = category.default_percentage {
                println!("  Weight: {:.1}%", weight);
            }
            println!("  ID: {}", category.id);
        }

        CategoryCommands::Delete { category } => {
            let found = service
                .find(&category)?
                .ok_or_else(|| FamfinError::category_not_found(&category))?;
            let deleted = service.delete(found.id)?;
            println!("Deleted category: {}", deleted.name);
        }
    }

    Ok(())
}
