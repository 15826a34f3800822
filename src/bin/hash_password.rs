//! Prompt for a password (no echo) and print its storage encoding
//!
//! Honours `CREDGUARD_CONFIG` / `CREDGUARD_PASSWORD_ITERATIONS` so seeded
//! hashes match what the service would produce.

use anyhow::{bail, Context, Result};
use credential_guard::config::Config;
use credential_guard::{PasswordCredentialService, PasswordPolicy};
use rpassword::prompt_password;
use tracing::{info, warn};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::load().context("Failed to load configuration")?;

    let service = PasswordCredentialService::from_settings(&config.password)?;

    let password = prompt_password("Password: ").context("Failed to read password")?;
    let confirm = prompt_password("Confirm:  ").context("Failed to read password")?;
    if password != confirm {
        bail!("passwords do not match");
    }

    if let Err(issues) = PasswordPolicy::default().check(&password) {
        for issue in issues {
            warn!("weak password: {issue}");
        }
    }

    let hash = service.hash_password(&password)?;
    info!(iterations = hash.iterations(), "password hashed");
    println!("{}", hash.encode());
    Ok(())
}
