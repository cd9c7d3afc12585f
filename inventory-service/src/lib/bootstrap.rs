use crate::config::AdminSeedConfig;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;
use crate::user::errors::UserError;

/// What the admin seed did at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Disabled,
    AlreadyPresent,
    Created,
    Failed,
}

/// Register the configured administrator through the normal registration path
/// unless it already exists.
///
/// Never fails: errors are logged and startup carries on.
pub async fn seed_admin_user(
    user_service: &dyn UserServicePort,
    config: &AdminSeedConfig,
) -> SeedOutcome {
    if !config.enabled {
        tracing::debug!("Admin seed disabled");
        return SeedOutcome::Disabled;
    }

    match try_seed(user_service, config).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(username = %config.username, error = %e, "Admin seed failed");
            SeedOutcome::Failed
        }
    }
}

async fn try_seed(
    user_service: &dyn UserServicePort,
    config: &AdminSeedConfig,
) -> Result<SeedOutcome, UserError> {
    let username = Username::new(config.username.clone())?;

    if user_service.exists_by_username(&username).await? {
        tracing::info!(username = %username, "Admin user already present");
        return Ok(SeedOutcome::AlreadyPresent);
    }

    let command = CreateUserCommand::parse(
        config.username.clone(),
        config.password.clone(),
        config.email.clone(),
    )?;
    let admin = user_service.create_user(command).await?;

    tracing::info!(user_id = %admin.id, username = %admin.username, "Admin user created");
    Ok(SeedOutcome::Created)
}
