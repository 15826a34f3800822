// src/services.rs
//! Startup wiring for the three sibling services
//!
//! Everything that can fail because of configuration fails here, before the
//! caller starts serving traffic. The services never call each other.

use std::sync::Arc;

use tracing::info;

use crate::aliases::KeyMaterial;
use crate::config::Config;
use crate::core::{KeyMaterialProvider, PasswordCredentialService, SymmetricCipherService};
use crate::error::Result;
use crate::tokens::{SystemClock, TokenLifecycleManager, TokenSweeper};

pub struct Services {
    pub keys: KeyMaterialProvider,
    pub passwords: PasswordCredentialService,
    pub cipher: SymmetricCipherService,
    pub tokens: Arc<TokenLifecycleManager>,
    sweeper: Option<TokenSweeper>,
}

impl Services {
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let keys = KeyMaterialProvider::from_config(config);
        keys.get_encryption_key()?;

        let passwords = PasswordCredentialService::from_settings(&config.password)?;
        let tokens = Arc::new(TokenLifecycleManager::from_settings(
            &config.tokens,
            Arc::new(SystemClock),
        )?);
        let sweeper = match config.tokens.sweep_interval() {
            Some(interval) => Some(TokenSweeper::spawn(tokens.clone(), interval)?),
            None => None,
        };

        info!(
            password_iterations = passwords.iterations(),
            token_ttl_secs = config.tokens.ttl_secs,
            sweeper = sweeper.is_some(),
            "credential services ready"
        );

        Ok(Self {
            keys,
            passwords,
            cipher: SymmetricCipherService::new(),
            tokens,
            sweeper,
        })
    }

    /// Load config from file + env and build everything
    pub fn from_env() -> Result<Self> {
        Self::from_config(&Config::load()?)
    }

    /// The resolved field key; always `Ok` after construction
    pub fn encryption_key(&self) -> Result<&KeyMaterial> {
        self.keys.get_encryption_key()
    }

    pub fn has_sweeper(&self) -> bool {
        self.sweeper.is_some()
    }
}
