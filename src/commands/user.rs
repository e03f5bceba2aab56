//! User command - Seeds login accounts. There is no public registration.

use std::sync::Arc;

use crate::cli::args::{UserAction, UserArgs};
use crate::config::Config;
use crate::domain::UserRole;
use crate::errors::AppResult;
use crate::infra::{Database, Persistence};
use crate::services::{AuthService, Authenticator};

/// Execute the user command
pub async fn execute(args: UserArgs, config: Config) -> AppResult<()> {
    match args.action {
        UserAction::Create {
            username,
            password,
            role,
        } => {
            let role: UserRole = role.parse()?;
            let db = Database::connect(&config).await?;
            let auth = Authenticator::new(Arc::new(Persistence::new(db.get_connection())), config);

            let user = auth.create_user(username, password, role).await?;
            println!("Created user {} ({}) with id {}", user.username, user.role, user.id);
        }
    }

    Ok(())
}
