//! # Key Management
//!
//! This module handles session key pair generation and public key handling.
//!
//! ## Key Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          KEY TYPES                                      │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  KeyPair (RSA-2048)                                             │   │
//! │  │  ──────────────────                                              │   │
//! │  │                                                                  │   │
//! │  │  Purpose:                                                       │   │
//! │  │  • Signing plaintext on behalf of the session holder            │   │
//! │  │  • Source of the exportable public half                         │   │
//! │  │                                                                  │   │
//! │  │  Lifetime:                                                      │   │
//! │  │  • Generated once per session, owned by the caller              │   │
//! │  │  • Never persisted, never serialized, zeroized on drop          │   │
//! │  │                                                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  PublicKey (verification half)                                  │   │
//! │  │  ─────────────────────────────                                   │   │
//! │  │                                                                  │   │
//! │  │  Purpose:                                                       │   │
//! │  │  • Verifying envelopes signed by the matching private half      │   │
//! │  │  • Out-of-band exchange with verifiers                          │   │
//! │  │                                                                  │   │
//! │  │  Format:                                                        │   │
//! │  │  • SPKI DER (interoperable container, also hex-encoded)         │   │
//! │  │  • SHA-256 fingerprint for display and comparison               │   │
//! │  │                                                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rand::rngs::OsRng;
use rsa::pkcs1v15::{SigningKey, VerifyingKey};
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey};
use rsa::signature::Keypair;
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use zeroize::ZeroizeOnDrop;

use crate::crypto::{MODULUS_BITS, PUBLIC_EXPONENT};
use crate::error::{Error, Result};

/// Session signing key pair
///
/// ## Security
///
/// - The private half never leaves the process: there is no export,
///   serialization, or debug formatting for it
/// - Key material is zeroized when this struct is dropped
/// - The public half can be shared freely via [`KeyPair::public_key`]
#[derive(ZeroizeOnDrop)]
pub struct KeyPair {
    /// Private signing key (secret)
    #[zeroize(skip)] // rsa::RsaPrivateKey handles its own zeroization
    signing: SigningKey<Sha256>,
}

impl KeyPair {
    /// Generate a new random key pair
    ///
    /// Uses the operating system's secure random number generator. This is
    /// the expensive step of a session: RSA-2048 prime search takes
    /// noticeably longer than the signing operations that follow.
    ///
    /// ## Errors
    ///
    /// [`Error::KeyGenerationFailed`] when the provider cannot produce a
    /// valid key. This is fatal for the session: nothing downstream can
    /// run without a key pair.
    pub fn generate() -> Result<Self> {
        tracing::info!("Generating RSA-{} session key pair", MODULUS_BITS);

        let private = RsaPrivateKey::new_with_exp(
            &mut OsRng,
            MODULUS_BITS,
            &BigUint::from(PUBLIC_EXPONENT),
        )
        .map_err(|e| Error::KeyGenerationFailed(e.to_string()))?;

        Ok(Self {
            signing: SigningKey::new(private),
        })
    }

    /// Get the public half for sharing with verifiers
    pub fn public_key(&self) -> PublicKey {
        let verifying = self.signing.verifying_key();
        PublicKey {
            key: verifying.as_ref().clone(),
        }
    }

    /// Get reference to the signing key
    pub(crate) fn signing_key(&self) -> &SigningKey<Sha256> {
        &self.signing
    }
}

/// Public verification key that can be safely shared with others
///
/// This contains only public information and can be serialized,
/// transmitted, and stored without security concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    key: RsaPublicKey,
}

impl PublicKey {
    /// Encode as SPKI DER (for files and out-of-band exchange)
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let doc = self
            .key
            .to_public_key_der()
            .map_err(|e| Error::InvalidKey(format!("DER encoding failed: {}", e)))?;
        Ok(doc.into_vec())
    }

    /// Decode from SPKI DER
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let key = RsaPublicKey::from_public_key_der(der)
            .map_err(|e| Error::InvalidKey(format!("Invalid public key DER: {}", e)))?;
        Ok(Self { key })
    }

    /// Encode as hex string (for display/copy-paste exchange)
    pub fn to_hex(&self) -> Result<String> {
        Ok(hex::encode(self.to_der()?))
    }

    /// Decode from hex string
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| Error::InvalidKey(format!("Invalid hex: {}", e)))?;
        Self::from_der(&bytes)
    }

    /// SHA-256 fingerprint of the DER encoding, hex-encoded
    ///
    /// Stable for a given key; suitable for display and manual comparison.
    pub fn fingerprint(&self) -> Result<String> {
        let der = self.to_der()?;
        Ok(hex::encode(Sha256::digest(&der)))
    }

    /// Get the verifying key for signature verification
    pub(crate) fn verifying_key(&self) -> VerifyingKey<Sha256> {
        VerifyingKey::new(self.key.clone())
    }
}

impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let hex_der = self.to_hex().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&hex_der)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PublicKey::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::test_keys;

    #[test]
    fn test_keypair_generation_distinct() {
        let kp1 = test_keys::keypair();
        let kp2 = test_keys::other_keypair();

        // Independent generations must not collide
        assert_ne!(kp1.public_key(), kp2.public_key());
    }

    #[test]
    fn test_public_key_der_roundtrip() {
        let public = test_keys::keypair().public_key();

        let der = public.to_der().unwrap();
        let restored = PublicKey::from_der(&der).unwrap();

        assert_eq!(public, restored);
    }

    #[test]
    fn test_public_key_hex_roundtrip() {
        let public = test_keys::keypair().public_key();

        let hex_str = public.to_hex().unwrap();
        let restored = PublicKey::from_hex(&hex_str).unwrap();

        assert_eq!(public, restored);
    }

    #[test]
    fn test_public_key_serialization() {
        let public = test_keys::keypair().public_key();

        let json = serde_json::to_string(&public).unwrap();
        let restored: PublicKey = serde_json::from_str(&json).unwrap();

        assert_eq!(public, restored);
    }

    #[test]
    fn test_fingerprint_stable() {
        let public = test_keys::keypair().public_key();

        let fp1 = public.fingerprint().unwrap();
        let fp2 = public.fingerprint().unwrap();

        assert_eq!(fp1, fp2);
        // SHA-256 hex digest
        assert_eq!(fp1.len(), 64);
    }

    #[test]
    fn test_fingerprints_differ_across_keys() {
        let fp1 = test_keys::keypair().public_key().fingerprint().unwrap();
        let fp2 = test_keys::other_keypair().public_key().fingerprint().unwrap();

        assert_ne!(fp1, fp2);
    }

    #[test]
    fn test_from_der_rejects_garbage() {
        let result = PublicKey::from_der(&[0x30, 0x03, 0x01, 0x02]);
        assert!(matches!(result, Err(Error::InvalidKey(_))));
    }

    #[test]
    fn test_from_hex_rejects_bad_hex() {
        let result = PublicKey::from_hex("not hex at all!");
        assert!(matches!(result, Err(Error::InvalidKey(_))));
    }
}
