//! Cost center CLI commands
//!
//! Cost centers are the people (or the shared bucket) that transactions are
//! attributed to.

use clap::Subcommand;

use super::parse_percentage;
use crate::display::format_cost_center_list;
use crate::error::FamfinResult;
use crate::services::CostCenterService;
use crate::storage::Storage;

/// Cost center subcommands
#[derive(Subcommand)]
pub enum CostCenterCommands {
    /// List cost centers
    List {
        /// Hide inactive cost centers
        #[arg(long)]
        active: bool,
    },

    /// Add a cost center
    Add {
        /// Cost center name
        name: String,
        /// Share of shared expenses, as a percentage
        #[arg(short, long)]
        default_split: Option<String>,
        /// Make this the shared bucket (receives no default share)
        #[arg(long)]
        shared_bucket: bool,
    },

    /// Change or clear a cost center's default split
    #[command(name = "set-split")]
    SetSplit {
        /// Cost center name or ID
        cost_center: String,
        /// New percentage; omit to clear
        percentage: Option<String>,
    },

    /// Deactivate a cost center (past transactions keep it)
    Deactivate {
        /// Cost center name or ID
        cost_center: String,
    },
}

/// Handle a cost center command
pub fn handle_cost_center_command(storage: &Storage, cmd: CostCenterCommands) -> FamfinResult<()> {
    let service = CostCenterService::new(storage);

    match cmd {
        CostCenterCommands::List { active } => {
            let cost_centers = if active {
                service.list_active()?
            } else {
                service.list()?
            };
            println!("{}", format_cost_center_list(&cost_centers).trim_end());

            let total = service.default_split_total()?;
            if total > 0.0 && (total - 100.0).abs() > 0.01 {
                println!();
                println!(
                    "Note: default splits add up to {:.1}%, so shared expenses will not divide exactly.",
                    total
                );
            }
        }

        CostCenterCommands::Add {
            name,
            default_split,
            shared_bucket,
        } => {
            let default_split = default_split.as_deref().map(parse_percentage).transpose()?;
            let cost_center = service.create(&name, default_split, shared_bucket)?;

            println!("Created cost center: {}", cost_center.name);
            if cost_center.is_shared_bucket {
                println!("  Shared bucket");
            }
            if let Some(pct) = cost_center.default_split_percentage {
                println!("  Default split: {:.1}%", pct);
            }
            println!("  ID: {}", cost_center.id);
        }

        CostCenterCommands::SetSplit {
            cost_center,
            percentage,
        } => {
            let found = service.require(&cost_center)?;
            let percentage = percentage.as_deref().map(parse_percentage).transpose()?;
            let updated = service.set_default_split(found.id, percentage)?;

            match updated.default_split_percentage {
                Some(pct) => println!("Default split for {} set to {:.1}%", updated.name, pct),
                None => println!("Default split for {} cleared", updated.name),
            }
        }

        CostCenterCommands::Deactivate { cost_center } => {
            let found = service.require(&cost_center)?;
            let updated = service.deactivate(found.id)?;
            println!("Deactivated cost center: {}", updated.name);
        }
    }

    Ok(())
}
