//! # Error Handling
//!
//! This module provides the error types for Signet Core.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR HIERARCHY                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error (top-level)                                                     │
//! │  │                                                                      │
//! │  ├── Key Errors                                                        │
//! │  │   ├── KeyGenerationFailed  - Session key pair could not be created  │
//! │  │   └── InvalidKey           - Supplied key material does not parse   │
//! │  │                                                                      │
//! │  ├── Signing Errors                                                    │
//! │  │   └── SigningFailed        - Signature computation failed           │
//! │  │                                                                      │
//! │  ├── Envelope Errors                                                   │
//! │  │   ├── MalformedEnvelope    - Container bytes do not parse           │
//! │  │   └── EnvelopeTooLarge     - Signature exceeds the length prefix    │
//! │  │                                                                      │
//! │  ├── Boundary Errors                                                   │
//! │  │   └── Io                   - File read/write at the boundary failed │
//! │  │                                                                      │
//! │  └── Internal Errors                                                   │
//! │      └── Internal             - Should not happen in normal operation  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rejection Is Not an Error
//!
//! A signature that fails to verify is a *normal* outcome, not a failure of
//! the system. It is reported as [`Verification::Rejected`] by the pipeline
//! and deliberately has no variant here. Only a container that cannot be
//! parsed at all surfaces as [`Error::MalformedEnvelope`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       OUTCOME FLOW AT THE BOUNDARY                      │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Core (Rust)                  Boundary                    User          │
//! │  ──────────────────────────────────────────────────────────────────     │
//! │                                                                         │
//! │  Ok(Accepted { .. })  ──────►  artifact + "valid"   ──────►  file      │
//! │  Ok(Rejected)         ──────►  "Invalid signature!" ──────►  notice    │
//! │  Err(Error)           ──────►  Report { code, .. }  ──────►  error     │
//! │                                                                         │
//! │  Example:                                                              │
//! │  Err(Error::MalformedEnvelope)  →  { code: 300, message: "..." }       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`Verification::Rejected`]: crate::pipeline::Verification::Rejected

use serde::Serialize;
use thiserror::Error;

/// Result type alias for Signet Core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Signet Core
///
/// All errors are categorized by stage to make error handling clearer and
/// to provide meaningful messages at the boundary.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Key Errors (100-199)
    // ========================================================================

    /// Session key pair generation failed
    ///
    /// Fatal: without a key pair the pipeline has nothing to operate on,
    /// so the whole session aborts.
    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    /// Supplied key material does not parse
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    // ========================================================================
    // Signing Errors (200-299)
    // ========================================================================

    /// Signature computation failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    // ========================================================================
    // Envelope Errors (300-399)
    // ========================================================================

    /// Envelope bytes do not parse as a length-prefixed container
    ///
    /// Distinct from a cryptographic rejection: the container itself is
    /// broken, so no verification was attempted.
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// Signature is too long for the 16-bit length prefix
    #[error("Signature of {signature_len} bytes exceeds the envelope maximum of 65535")]
    EnvelopeTooLarge {
        /// Length of the rejected signature in bytes
        signature_len: usize,
    },

    // ========================================================================
    // Boundary Errors (400-499)
    // ========================================================================

    /// File read/write at the boundary failed
    #[error("I/O error: {0}")]
    Io(String),

    // ========================================================================
    // Internal Errors (900-999)
    // ========================================================================

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get the numeric error code for boundary reports
    ///
    /// Error codes are organized by category:
    /// - 100-199: Keys
    /// - 200-299: Signing
    /// - 300-399: Envelope
    /// - 400-499: Boundary I/O
    /// - 900-999: Internal
    pub fn code(&self) -> i32 {
        match self {
            // Keys (100-199)
            Error::KeyGenerationFailed(_) => 100,
            Error::InvalidKey(_) => 101,

            // Signing (200-299)
            Error::SigningFailed(_) => 200,

            // Envelope (300-399)
            Error::MalformedEnvelope(_) => 300,
            Error::EnvelopeTooLarge { .. } => 301,

            // Boundary (400-499)
            Error::Io(_) => 400,

            // Internal (900-999)
            Error::Internal(_) => 900,
        }
    }

    /// Stable machine-readable category name
    pub fn kind(&self) -> &'static str {
        match self {
            Error::KeyGenerationFailed(_) => "key_generation",
            Error::InvalidKey(_) => "invalid_key",
            Error::SigningFailed(_) => "signing",
            Error::MalformedEnvelope(_) => "malformed_envelope",
            Error::EnvelopeTooLarge { .. } => "envelope_too_large",
            Error::Io(_) => "io",
            Error::Internal(_) => "internal",
        }
    }

    /// Check if this error ends the session
    ///
    /// Every other error aborts only the operation that raised it; the
    /// session key pair remains valid for further operations.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::KeyGenerationFailed(_))
    }
}

// ============================================================================
// ERROR CONVERSIONS
// ============================================================================

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

// ============================================================================
// BOUNDARY REPORT
// ============================================================================

/// Boundary-friendly error representation
///
/// This is the structured outcome a user-facing surface renders when an
/// operation fails, instead of an ad-hoc alert string.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Numeric error code
    pub code: i32,
    /// Stable machine-readable category
    pub kind: &'static str,
    /// Human-readable error message
    pub message: String,
    /// Whether the session ends with this error
    pub fatal: bool,
}

impl Report {
    /// Render as a single-line JSON object
    pub fn to_json(&self) -> String {
        serde_json::json!({
            "code": self.code,
            "kind": self.kind,
            "message": self.message,
            "fatal": self.fatal,
        })
        .to_string()
    }
}

impl From<Error> for Report {
    fn from(err: Error) -> Self {
        Self {
            code: err.code(),
            kind: err.kind(),
            message: err.to_string(),
            fatal: err.is_fatal(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::KeyGenerationFailed("test".into()).code(), 100);
        assert_eq!(Error::InvalidKey("test".into()).code(), 101);
        assert_eq!(Error::SigningFailed("test".into()).code(), 200);
        assert_eq!(Error::MalformedEnvelope("test".into()).code(), 300);
        assert_eq!(Error::EnvelopeTooLarge { signature_len: 70000 }.code(), 301);
        assert_eq!(Error::Io("test".into()).code(), 400);
        assert_eq!(Error::Internal("test".into()).code(), 900);
    }

    #[test]
    fn test_only_key_generation_is_fatal() {
        assert!(Error::KeyGenerationFailed("rng".into()).is_fatal());
        assert!(!Error::SigningFailed("test".into()).is_fatal());
        assert!(!Error::MalformedEnvelope("test".into()).is_fatal());
        assert!(!Error::Io("test".into()).is_fatal());
    }

    #[test]
    fn test_report_conversion() {
        let err = Error::MalformedEnvelope("truncated signature".into());
        let report: Report = err.into();

        assert_eq!(report.code, 300);
        assert_eq!(report.kind, "malformed_envelope");
        assert!(report.message.contains("truncated signature"));
        assert!(!report.fatal);
    }

    #[test]
    fn test_report_json_shape() {
        let report: Report = Error::KeyGenerationFailed("rng unavailable".into()).into();
        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();

        assert_eq!(json["code"], 100);
        assert_eq!(json["kind"], "key_generation");
        assert_eq!(json["fatal"], true);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        let err: Error = io_err.into();

        assert_eq!(err.code(), 400);
        assert!(err.to_string().contains("missing file"));
    }

    #[test]
    fn test_envelope_too_large_message() {
        let err = Error::EnvelopeTooLarge { signature_len: 65536 };
        assert!(err.to_string().contains("65536"));
        assert!(err.to_string().contains("65535"));
    }
}
