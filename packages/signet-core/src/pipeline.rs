//! # Signing Pipeline
//!
//! Orchestrates the two operations Signet exists for: turning plaintext
//! into a signed envelope, and turning envelope bytes back into trusted
//! plaintext (or a rejection).
//!
//! ## Paths
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            SIGN PATH                                    │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  plaintext ──► crypto::sign ──► Envelope::new ──► to_bytes ──► bytes   │
//! │     &[u8]       (private key)     (length check)               Vec<u8>  │
//! │                                                                         │
//! │  Any failure aborts the operation; no partial envelope escapes.        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           VERIFY PATH                                   │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  bytes ──► Envelope::from_bytes ──► crypto::verify ──► Verification   │
//! │                    │                  (public key)          │           │
//! │                    │                                        ├ Accepted │
//! │                    ▼                                        └ Rejected │
//! │          Err(MalformedEnvelope)                                        │
//! │          (container broken: no                                         │
//! │           verification attempted)                                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each call is one request/response cycle: no state persists between
//! operations, and the key pair is always injected by the caller.
//! Verification runs over the exact plaintext slice the decoder
//! extracted, so an accepted envelope returns those very bytes.

use crate::crypto::{self, KeyPair, PublicKey};
use crate::envelope::Envelope;
use crate::error::Result;

/// Outcome of verifying an envelope
///
/// Rejection is a normal, expected outcome and therefore lives here
/// rather than in the error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// The signature matched; the recovered plaintext is safe to use
    Accepted {
        /// The plaintext exactly as carried by the envelope
        plaintext: Vec<u8>,
    },
    /// The signature did not match; the plaintext is withheld
    Rejected,
}

impl Verification {
    /// Whether the envelope was accepted
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verification::Accepted { .. })
    }

    /// The recovered plaintext, if the envelope was accepted
    pub fn into_plaintext(self) -> Option<Vec<u8>> {
        match self {
            Verification::Accepted { plaintext } => Some(plaintext),
            Verification::Rejected => None,
        }
    }
}

/// Sign plaintext and package it into envelope bytes
///
/// ## Parameters
///
/// - `keypair`: The session key pair, owned by the caller
/// - `plaintext`: The bytes to protect (may be empty)
///
/// ## Returns
///
/// The serialized envelope: length prefix, signature, then the plaintext
/// itself. This is the artifact the boundary writes out.
///
/// ## Errors
///
/// [`Error::SigningFailed`] if the signature computation fails. The
/// envelope packaging itself cannot fail with the fixed signature size,
/// but its length check still runs.
///
/// [`Error::SigningFailed`]: crate::error::Error::SigningFailed
pub fn sign(keypair: &KeyPair, plaintext: &[u8]) -> Result<Vec<u8>> {
    tracing::debug!("Signing {} plaintext bytes", plaintext.len());

    let signature = crypto::sign(keypair, plaintext)?;
    let envelope = Envelope::new(signature.into_bytes(), plaintext.to_vec())?;

    Ok(envelope.to_bytes())
}

/// Parse envelope bytes and verify the signature inside
///
/// ## Parameters
///
/// - `public_key`: The claimed signer's public key
/// - `data`: The envelope bytes, typically read straight from a file
///
/// ## Returns
///
/// - [`Verification::Accepted`] with the recovered plaintext when the
///   signature matches
/// - [`Verification::Rejected`] when the container parsed but the
///   signature does not match the plaintext under this key
///
/// ## Errors
///
/// [`Error::MalformedEnvelope`] when the container itself does not
/// parse. This is deliberately distinct from `Rejected`: a broken file
/// and a forged file are different findings.
///
/// [`Error::MalformedEnvelope`]: crate::error::Error::MalformedEnvelope
pub fn verify(public_key: &PublicKey, data: &[u8]) -> Result<Verification> {
    let envelope = Envelope::from_bytes(data)?;

    tracing::debug!(
        "Verifying envelope: {} signature bytes, {} plaintext bytes",
        envelope.signature().len(),
        envelope.plaintext().len()
    );

    if crypto::verify(public_key, envelope.plaintext(), envelope.signature()) {
        Ok(Verification::Accepted {
            plaintext: envelope.into_plaintext(),
        })
    } else {
        tracing::debug!("Envelope rejected: signature does not match");
        Ok(Verification::Rejected)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::test_keys;
    use crate::crypto::SIGNATURE_LEN;
    use crate::error::Error;

    #[test]
    fn test_sign_verify_round_trip() {
        let keypair = test_keys::keypair();
        let plaintext = b"hello world";

        let bytes = sign(keypair, plaintext).unwrap();
        let verification = verify(&keypair.public_key(), &bytes).unwrap();

        assert_eq!(
            verification,
            Verification::Accepted {
                plaintext: plaintext.to_vec()
            }
        );
    }

    #[test]
    fn test_empty_plaintext_round_trip() {
        let keypair = test_keys::keypair();

        let bytes = sign(keypair, b"").unwrap();
        assert_eq!(bytes.len(), 2 + SIGNATURE_LEN);

        let verification = verify(&keypair.public_key(), &bytes).unwrap();
        assert_eq!(
            verification,
            Verification::Accepted {
                plaintext: Vec::new()
            }
        );
    }

    #[test]
    fn test_envelope_starts_with_signature_length() {
        let keypair = test_keys::keypair();

        let bytes = sign(keypair, b"hello world").unwrap();
        let declared = u16::from_le_bytes([bytes[0], bytes[1]]) as usize;

        assert_eq!(declared, SIGNATURE_LEN);
        assert_eq!(bytes.len(), 2 + SIGNATURE_LEN + 11);
    }

    #[test]
    fn test_tampered_plaintext_rejected() {
        let keypair = test_keys::keypair();

        let mut bytes = sign(keypair, b"hello world").unwrap();
        // Flip one bit inside the plaintext region
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;

        let verification = verify(&keypair.public_key(), &bytes).unwrap();
        assert_eq!(verification, Verification::Rejected);
    }

    #[test]
    fn test_appended_byte_rejected() {
        let keypair = test_keys::keypair();

        let mut bytes = sign(keypair, b"hello world").unwrap();
        bytes.push(b'!');

        let verification = verify(&keypair.public_key(), &bytes).unwrap();
        assert_eq!(verification, Verification::Rejected);
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let keypair = test_keys::keypair();

        let mut bytes = sign(keypair, b"hello world").unwrap();
        // Flip one bit inside the signature region
        bytes[2] ^= 0x80;

        let verification = verify(&keypair.public_key(), &bytes).unwrap();
        assert_eq!(verification, Verification::Rejected);
    }

    #[test]
    fn test_cross_key_rejected() {
        let keypair = test_keys::keypair();
        let other = test_keys::other_keypair();

        let bytes = sign(keypair, b"hello world").unwrap();

        let verification = verify(&other.public_key(), &bytes).unwrap();
        assert_eq!(verification, Verification::Rejected);
    }

    #[test]
    fn test_malformed_envelope_is_error_not_rejection() {
        let public = test_keys::keypair().public_key();

        // Shorter than the length prefix
        assert!(matches!(
            verify(&public, &[0x07]),
            Err(Error::MalformedEnvelope(_))
        ));

        // Prefix declares more signature bytes than are present
        let mut data = 500u16.to_le_bytes().to_vec();
        data.extend_from_slice(&[1, 2, 3]);
        assert!(matches!(
            verify(&public, &data),
            Err(Error::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn test_well_formed_garbage_signature_is_rejected_not_error() {
        let public = test_keys::keypair().public_key();

        // Valid container, nonsense 4-byte signature: the codec accepts
        // it, the crypto rejects it
        let mut data = 4u16.to_le_bytes().to_vec();
        data.extend_from_slice(&[9, 9, 9, 9]);
        data.extend_from_slice(b"hello world");

        let verification = verify(&public, &data).unwrap();
        assert_eq!(verification, Verification::Rejected);
    }

    #[test]
    fn test_rejection_withholds_plaintext() {
        let keypair = test_keys::keypair();

        let mut bytes = sign(keypair, b"secret payload").unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;

        let verification = verify(&keypair.public_key(), &bytes).unwrap();
        assert!(!verification.is_accepted());
        assert_eq!(verification.into_plaintext(), None);
    }
}
