//! # Signet Core
//!
//! A file-sealing library: sign arbitrary bytes with an ephemeral RSA key
//! pair and package signature and plaintext into a single envelope that
//! anyone holding the public key can verify.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         SIGNET CORE MODULES                             │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │                      ┌──────────────────────┐                           │
//! │                      │      Pipeline        │                           │
//! │                      │                      │                           │
//! │                      │ - sign path          │                           │
//! │                      │ - verify path        │                           │
//! │                      │ - Accepted/Rejected  │                           │
//! │                      └──────────┬───────────┘                           │
//! │                                 │                                       │
//! │              ┌──────────────────┴──────────────────┐                    │
//! │              ▼                                     ▼                    │
//! │  ┌──────────────────────┐            ┌──────────────────────┐          │
//! │  │       Crypto         │            │      Envelope        │          │
//! │  │                      │            │                      │          │
//! │  │ - KeyPair (session)  │            │ - u16 LE prefix      │          │
//! │  │ - PublicKey (SPKI)   │            │ - signature field    │          │
//! │  │ - sign / verify      │            │ - plaintext field    │          │
//! │  └──────────────────────┘            └──────────────────────┘          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                          Error                                  │   │
//! │  │  Taxonomy + boundary Report (codes, kinds, fatality)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error types and the boundary [`Report`](error::Report)
//! - [`crypto`] - Key pairs and the RSA PKCS#1 v1.5 primitives
//! - [`envelope`] - The length-prefixed wire container
//! - [`pipeline`] - Sign and verify orchestration
//!
//! ## Security Model
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          SECURITY MODEL                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Ephemeral Keys                                                        │
//! │  ──────────────                                                         │
//! │  One RSA-2048 key pair per session, generated from OS randomness       │
//! │  and owned by the caller. Never persisted. The private half has no     │
//! │  export path and no serialization path.                                │
//! │                                                                         │
//! │  Honest Outcomes                                                       │
//! │  ───────────────                                                        │
//! │  An invalid signature is a Rejected outcome, not an error. Only a      │
//! │  container that fails to parse is an error, and it says so             │
//! │  explicitly instead of crashing on hostile input.                      │
//! │                                                                         │
//! │  Fixed Parameters                                                      │
//! │  ────────────────                                                       │
//! │  RSASSA-PKCS1-v1_5, 2048-bit modulus, exponent 65537, SHA-256.         │
//! │  Nothing is negotiated, so nothing can be downgraded.                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use signet_core::{pipeline, KeyPair, Verification};
//!
//! let keypair = KeyPair::generate()?;
//!
//! let envelope = pipeline::sign(&keypair, b"hello world")?;
//!
//! match pipeline::verify(&keypair.public_key(), &envelope)? {
//!     Verification::Accepted { plaintext } => { /* use plaintext */ }
//!     Verification::Rejected => { /* refuse the file */ }
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod crypto;
pub mod envelope;
pub mod error;
pub mod pipeline;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use crypto::{KeyPair, PublicKey, Signature};
pub use envelope::Envelope;
pub use error::{Error, Report, Result};
pub use pipeline::Verification;

// ============================================================================
// VERSION INFO
// ============================================================================

/// Returns the version of Signet Core
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// ============================================================================
// TESTS
// ============================================================================
