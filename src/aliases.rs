// src/aliases.rs
//! Re-exports secure-gate's ergonomic secret types
//!
//! These are the canonical secret types used throughout credential-guard.

pub use secure_gate::{dynamic_alias, fixed_alias};

// Fixed-size secrets
fixed_alias!(KeyMaterial, 32); // 256-bit AES-GCM field key

// Dynamic secrets
dynamic_alias!(Passphrase, String); // Human-entered key passphrase
dynamic_alias!(KeySalt, String); // Salt paired with the passphrase
dynamic_alias!(RawKey, String); // Hex/base64 encoded key as configured
