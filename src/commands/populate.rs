//! Populate command - Generates a year of rotation planning.

use std::sync::Arc;

use crate::cli::args::PopulateArgs;
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, Persistence};
use crate::services::{PlanningManager, PlanningService};

/// Execute the populate command
pub async fn execute(args: PopulateArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let plannings = PlanningManager::new(Arc::new(Persistence::new(db.get_connection())));

    tracing::info!(year = args.year, "Populating yearly planning...");
    let created = plannings.populate_yearly_planning(args.year).await?;
    println!("Created {} planning rows for {}", created, args.year);

    Ok(())
}
