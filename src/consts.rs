// src/consts.rs
//! Shared constants — security parameters and defaults

/// Default PBKDF2-HMAC-SHA256 iterations for password hashes
// ~30–60ms on modern hardware
pub const DEFAULT_PASSWORD_ITERATIONS: u32 = 60_000;

/// Lowest iteration count `Config::validate` accepts
pub const MIN_PASSWORD_ITERATIONS: u32 = 1_000;

/// Stored hashes claiming more than this are treated as corrupt
pub const MAX_PASSWORD_ITERATIONS: u32 = 10_000_000;

/// Default per-password salt length in bytes
pub const DEFAULT_SALT_LEN: usize = 32;

/// Shortest salt we ever generate or accept
pub const MIN_SALT_LEN: usize = 16;

/// Longest salt accepted when parsing a stored hash
pub const MAX_SALT_LEN: usize = 64;

/// PBKDF2-HMAC-SHA256 output length
pub const PASSWORD_HASH_LEN: usize = 32;

/// Scheme tag at the front of every encoded password hash
pub const PASSWORD_SCHEME: &str = "pbkdf2-sha256";

/// AES-256 key length
pub const KEY_LEN: usize = 32;

/// KDF iterations when the key comes from a passphrase
// 210_000 ≈ OWASP 2023 guidance for PBKDF2-HMAC-SHA256; runs once per process
pub const DEFAULT_KEY_KDF_ITERATIONS: u32 = 210_000;

/// AES-GCM nonce (IV) length
pub const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length
pub const TAG_LEN: usize = 16;

/// Random bytes per session token
pub const TOKEN_BYTES: usize = 32;

/// Default token time-to-live in seconds
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

/// Run an incidental cleanup pass every N issued tokens
pub const DEFAULT_CLEANUP_EVERY: u64 = 64;

/// Number of independently locked shards in the token store
pub const TOKEN_STORE_SHARDS: usize = 16;

/// Default config file path
pub const DEFAULT_CONFIG_PATH: &str = "credential-guard.toml";
