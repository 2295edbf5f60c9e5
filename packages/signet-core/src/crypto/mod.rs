//! # Cryptography Module
//!
//! This module provides the cryptographic primitives used by Signet Core.
//!
//! ## Security Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CRYPTOGRAPHIC ARCHITECTURE                           │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    SESSION KEY MODEL                            │   │
//! │  ├─────────────────────────────────────────────────────────────────┤   │
//! │  │                                                                 │   │
//! │  │  One ephemeral RSA-2048 key pair per session                    │   │
//! │  │                          │                                      │   │
//! │  │            ┌─────────────┴─────────────┐                       │   │
//! │  │            ▼                           ▼                       │   │
//! │  │  ┌─────────────────┐         ┌─────────────────┐              │   │
//! │  │  │  Private Half   │         │  Public Half    │              │   │
//! │  │  │                 │         │  (PublicKey)    │              │   │
//! │  │  │ • Signs         │         │                 │              │   │
//! │  │  │ • Never leaves  │         │ • Verifies      │              │   │
//! │  │  │   the process   │         │ • SPKI DER/hex  │              │   │
//! │  │  │ • Never stored  │         │ • Fingerprint   │              │   │
//! │  │  └─────────────────┘         └─────────────────┘              │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 SIGNATURE SCHEME                                │   │
//! │  ├─────────────────────────────────────────────────────────────────┤   │
//! │  │                                                                 │   │
//! │  │  Digital Signatures (RSASSA-PKCS1-v1_5)                        │   │
//! │  │  ──────────────────────────────────────                         │   │
//! │  │                                                                 │   │
//! │  │  • Modulus: 2048 bits                                          │   │
//! │  │  • Public exponent: 65537 (F4)                                 │   │
//! │  │  • Digest: SHA-256                                             │   │
//! │  │  • Signature size: 256 bytes                                   │   │
//! │  │                                                                 │   │
//! │  │  Properties:                                                   │   │
//! │  │  • Deterministic (same message = same signature)              │   │
//! │  │  • Publicly verifiable with the exported key                  │   │
//! │  │  • Parameters fixed, never negotiated                         │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Algorithm Choices & Rationale
//!
//! | Algorithm | Purpose | Why Chosen |
//! |-----------|---------|------------|
//! | RSASSA-PKCS1-v1_5 | Signing | Fixed envelope contract, universal verifier support |
//! | SHA-256 | Digest | Standard pairing for 2048-bit RSA |
//! | SPKI DER | Key export | Interoperable public-key container |
//!
//! ## Security Considerations
//!
//! 1. **Key Zeroization**: Private key material is zeroized when dropped
//! 2. **Secure Random**: Using `rand::rngs::OsRng` for key generation
//! 3. **No Persistence**: Key pairs live for one session and are never stored
//! 4. **Private Key Containment**: No API exports private key material

mod keys;
mod signing;

pub use keys::{KeyPair, PublicKey};
pub use signing::{sign, verify, Signature};

/// RSA modulus size in bits for generated key pairs
pub const MODULUS_BITS: usize = 2048;

/// RSA public exponent for generated key pairs (F4)
pub const PUBLIC_EXPONENT: u64 = 65537;

/// Size of an RSA-2048 PKCS#1 v1.5 signature in bytes
pub const SIGNATURE_LEN: usize = MODULUS_BITS / 8;

#[cfg(test)]
pub(crate) mod test_keys {
    //! Shared key pairs for tests.
    //!
    //! RSA-2048 generation is slow in debug builds, so test modules reuse
    //! these pairs instead of generating one per test.

    use std::sync::OnceLock;

    use super::KeyPair;

    pub(crate) fn keypair() -> &'static KeyPair {
        static PAIR: OnceLock<KeyPair> = OnceLock::new();
        PAIR.get_or_init(|| KeyPair::generate().expect("RSA key pair generation"))
    }

    /// A second, unrelated pair for cross-key tests.
    pub(crate) fn other_keypair() -> &'static KeyPair {
        static PAIR: OnceLock<KeyPair> = OnceLock::new();
        PAIR.get_or_init(|| KeyPair::generate().expect("RSA key pair generation"))
    }
}
