//! Print a fresh random 256-bit key for `keys.encryption_key` / `CREDGUARD_ENCRYPTION_KEY`

use anyhow::{ensure, Result};
use credential_guard::core::util::random_bytes;
use credential_guard::KeyMaterialProvider;
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let key: [u8; 32] = random_bytes();
    let encoded = hex::encode(key);

    // round-trip through the real resolver so the printed value is known-good
    let keys = credential_guard::config::Keys {
        encryption_key: Some(encoded.clone()),
        ..Default::default()
    };
    let provider = KeyMaterialProvider::from_keys(&keys);
    ensure!(
        provider.get_encryption_key()?.expose_secret() == &key,
        "generated key did not resolve back to itself"
    );

    info!("generated 256-bit key (hex); store it in your secret manager");
    println!("{encoded}");
    Ok(())
}
