//! # Digital Signatures Module
//!
//! Provides RSA PKCS#1 v1.5 signatures for plaintext authentication and
//! integrity.
//!
//! ## Signature Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         SIGNING FLOW                                    │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  SIGNER (session key holder)                                           │
//! │  ─────────────────────────────────────────────────────────────────      │
//! │                                                                         │
//! │  Input: Plaintext to sign                                              │
//! │  ┌─────────────────────────────────────────────────────────────┐       │
//! │  │                                                             │       │
//! │  │  ┌──────────────┐                                          │       │
//! │  │  │  Plaintext   │                                          │       │
//! │  │  │              │                                          │       │
//! │  │  │ "hello world"│                                          │       │
//! │  │  └──────┬───────┘                                          │       │
//! │  │         │                                                   │       │
//! │  │         ▼                                                   │       │
//! │  │  ┌──────────────────────────────────────────┐              │       │
//! │  │  │        RSASSA-PKCS1-v1_5 Sign            │              │       │
//! │  │  │                                          │              │       │
//! │  │  │  1. Hash plaintext with SHA-256          │              │       │
//! │  │  │  2. Pad digest per PKCS#1 v1.5           │              │       │
//! │  │  │  3. Sign with the 2048-bit private key   │              │       │
//! │  │  │                                          │              │       │
//! │  │  └──────────────┬───────────────────────────┘              │       │
//! │  │                 │                                           │       │
//! │  │                 ▼                                           │       │
//! │  │  ┌──────────────────────────────────────────┐              │       │
//! │  │  │            Signature                     │              │       │
//! │  │  │                                          │              │       │
//! │  │  │   256 bytes (2048 bits)                 │              │       │
//! │  │  │   Deterministic: same input = same sig  │              │       │
//! │  │  └──────────────────────────────────────────┘              │       │
//! │  │                                                             │       │
//! │  └─────────────────────────────────────────────────────────────┘       │
//! │                                                                         │
//! │  Output: (Plaintext, Signature)                                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       VERIFICATION FLOW                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  VERIFIER (anyone with the public half)                                │
//! │  ─────────────────────────────────────────────────────────────────      │
//! │                                                                         │
//! │  Input: Plaintext, Signature bytes, Signer's public key                │
//! │  ┌─────────────────────────────────────────────────────────────┐       │
//! │  │                                                             │       │
//! │  │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐      │       │
//! │  │  │  Plaintext   │  │  Signature   │  │ Signer's Pub │      │       │
//! │  │  │              │  │   (bytes)    │  │     Key      │      │       │
//! │  │  └──────┬───────┘  └──────┬───────┘  └──────┬───────┘      │       │
//! │  │         │                 │                 │               │       │
//! │  │         └─────────────────┼─────────────────┘               │       │
//! │  │                           ▼                                 │       │
//! │  │  ┌──────────────────────────────────────────┐              │       │
//! │  │  │       RSASSA-PKCS1-v1_5 Verify           │              │       │
//! │  │  │                                          │              │       │
//! │  │  │  1. Hash plaintext with SHA-256          │              │       │
//! │  │  │  2. Check signature against public key   │              │       │
//! │  │  │  3. Return valid / invalid               │              │       │
//! │  │  └──────────────┬───────────────────────────┘              │       │
//! │  │                 │                                           │       │
//! │  │                 ▼                                           │       │
//! │  │  ┌──────────────────────────────────────────┐              │       │
//! │  │  │                                          │              │       │
//! │  │  │   true:  plaintext is intact and signed │              │       │
//! │  │  │   false: tampered, forged, or garbage   │              │       │
//! │  │  │                                          │              │       │
//! │  │  └──────────────────────────────────────────┘              │       │
//! │  │                                                             │       │
//! │  └─────────────────────────────────────────────────────────────┘       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security Properties
//!
//! | Property | Description |
//! |----------|-------------|
//! | Authenticity | Verifies the plaintext was signed by the key holder |
//! | Integrity | Detects any modification to the signed plaintext |
//! | Public Verification | Anyone with the public key can verify |
//! | Graceful Rejection | Invalid input is a `false`, never a crash |

use rsa::pkcs1v15::Signature as Pkcs1v15Signature;
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use serde::{Deserialize, Serialize};

use crate::crypto::{KeyPair, PublicKey};
use crate::error::{Error, Result};

/// An RSA PKCS#1 v1.5 signature
///
/// With the fixed 2048-bit parameters every signature is
/// [`SIGNATURE_LEN`](crate::crypto::SIGNATURE_LEN) bytes; the type still
/// carries a `Vec` because the envelope layer treats signature length as
/// data, not as a constant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(#[serde(with = "signature_bytes")] Vec<u8>);

impl Signature {
    /// Create from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume into the raw bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Length of the signature in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the signature is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encode as hex string
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Decode from hex string
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| Error::InvalidKey(format!("Invalid signature hex: {}", e)))?;
        Ok(Self(bytes))
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Sign a message with the session key pair
///
/// ## Parameters
///
/// - `keypair`: The session key pair (contains the private key)
/// - `message`: The plaintext to sign
///
/// ## Returns
///
/// A 256-byte RSA PKCS#1 v1.5 signature over the SHA-256 digest of the
/// message.
///
/// ## Security Note
///
/// PKCS#1 v1.5 signatures are deterministic: signing the same message
/// with the same key always produces the same signature. No randomness
/// is consumed after key generation.
///
/// ## Example
///
/// ```ignore
/// let keypair = KeyPair::generate()?;
/// let signature = sign(&keypair, b"hello world")?;
/// ```
pub fn sign(keypair: &KeyPair, message: &[u8]) -> Result<Signature> {
    let sig = keypair
        .signing_key()
        .try_sign(message)
        .map_err(|e| Error::SigningFailed(e.to_string()))?;

    Ok(Signature(sig.to_vec()))
}

/// Verify a signature over a message
///
/// ## Parameters
///
/// - `public_key`: The signer's public key
/// - `message`: The plaintext the signature claims to cover
/// - `signature`: The raw signature bytes (as extracted from an envelope)
///
/// ## Returns
///
/// `true` only when the signature is a valid PKCS#1 v1.5 signature over
/// the message under the given key. Bytes that do not even parse as a
/// signature are `false` like any other mismatch: rejection is a normal
/// outcome here, never an error.
///
/// ## Example
///
/// ```ignore
/// let valid = verify(&public_key, b"hello world", signature.as_bytes());
/// ```
pub fn verify(public_key: &PublicKey, message: &[u8], signature: &[u8]) -> bool {
    let sig = match Pkcs1v15Signature::try_from(signature) {
        Ok(sig) => sig,
        Err(_) => return false,
    };

    public_key.verifying_key().verify(message, &sig).is_ok()
}

/// Serde helper for signature bytes as hex
mod signature_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        hex::decode(&s).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{test_keys, SIGNATURE_LEN};

    #[test]
    fn test_sign_verify() {
        let keypair = test_keys::keypair();
        let message = b"hello world";

        let signature = sign(keypair, message).unwrap();

        assert!(verify(&keypair.public_key(), message, signature.as_bytes()));
    }

    #[test]
    fn test_signature_length() {
        let keypair = test_keys::keypair();

        let signature = sign(keypair, b"any message").unwrap();

        assert_eq!(signature.len(), SIGNATURE_LEN);
    }

    #[test]
    fn test_verify_wrong_message_fails() {
        let keypair = test_keys::keypair();

        let signature = sign(keypair, b"hello world").unwrap();

        assert!(!verify(
            &keypair.public_key(),
            b"tampered world",
            signature.as_bytes()
        ));
    }

    #[test]
    fn test_verify_wrong_key_fails() {
        let keypair = test_keys::keypair();
        let other = test_keys::other_keypair();

        let signature = sign(keypair, b"hello world").unwrap();

        assert!(!verify(
            &other.public_key(),
            b"hello world",
            signature.as_bytes()
        ));
    }

    #[test]
    fn test_deterministic_signatures() {
        let keypair = test_keys::keypair();
        let message = b"hello world";

        let sig1 = sign(keypair, message).unwrap();
        let sig2 = sign(keypair, message).unwrap();

        // PKCS#1 v1.5 is deterministic
        assert_eq!(sig1, sig2);
    }

    #[test]
    fn test_empty_message_signs() {
        let keypair = test_keys::keypair();

        let signature = sign(keypair, b"").unwrap();

        assert!(verify(&keypair.public_key(), b"", signature.as_bytes()));
    }

    #[test]
    fn test_verify_garbage_signature_is_false() {
        let public = test_keys::keypair().public_key();

        // Too short to be a signature at all
        assert!(!verify(&public, b"hello world", b"junk"));
        // Wrong length for the key
        assert!(!verify(&public, b"hello world", &[0u8; 300]));
        // Right length, wrong content
        assert!(!verify(&public, b"hello world", &[0u8; SIGNATURE_LEN]));
    }

    #[test]
    fn test_signature_serialization() {
        let keypair = test_keys::keypair();
        let signature = sign(keypair, b"test").unwrap();

        let json = serde_json::to_string(&signature).unwrap();
        let restored: Signature = serde_json::from_str(&json).unwrap();

        assert_eq!(signature, restored);
    }

    #[test]
    fn test_signature_hex_roundtrip() {
        let keypair = test_keys::keypair();
        let signature = sign(keypair, b"test").unwrap();

        let restored = Signature::from_hex(&signature.to_hex()).unwrap();

        assert_eq!(signature, restored);
    }
}
