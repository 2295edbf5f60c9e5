//! # Signature Envelope
//!
//! The binary container that binds a signature to the exact plaintext it
//! covers. This is the only artifact Signet persists or exchanges, so its
//! layout is a bit-exact contract.
//!
//! ## Wire Format
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ENVELOPE WIRE FORMAT                             │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  length prefix: 2 bytes, u16 little-endian                      │   │
//! │  │  ─────────────────────────────────────────                       │   │
//! │  │  Value N = byte length of the signature field (0..=65535)       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  signature: N bytes                                             │   │
//! │  │  ──────────────────                                              │   │
//! │  │  Raw RSA PKCS#1 v1.5 signature (256 bytes with the fixed       │   │
//! │  │  parameters; the prefix is authoritative, not the constant)     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  plaintext: all remaining bytes (may be empty)                  │   │
//! │  │  ─────────────────────────────────────────────                   │   │
//! │  │  The original input, byte for byte                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Byte order of the prefix is fixed to little-endian on every platform.
//!
//! ## Decode Policy
//!
//! Decoding never reads out of bounds and never panics on hostile input:
//! the input length is checked before the prefix is read, and the declared
//! signature length is checked against the bytes actually present. Either
//! violation is [`Error::MalformedEnvelope`], which callers surface
//! distinctly from a cryptographic rejection.

use crate::error::{Error, Result};

/// Size of the length prefix in bytes
pub const LENGTH_PREFIX_LEN: usize = 2;

/// Maximum signature length representable by the length prefix
pub const MAX_SIGNATURE_LEN: usize = u16::MAX as usize;

/// A signature envelope: a signature and the plaintext it covers
///
/// Immutable pure data. Construction checks the signature length bound;
/// [`Envelope::to_bytes`] and [`Envelope::from_bytes`] translate to and
/// from the wire format above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    signature: Vec<u8>,
    plaintext: Vec<u8>,
}

impl Envelope {
    /// Create an envelope from a signature and its plaintext
    ///
    /// ## Errors
    ///
    /// [`Error::EnvelopeTooLarge`] when the signature cannot be described
    /// by the 16-bit length prefix. This cannot happen with the fixed
    /// 256-byte signatures but is checked regardless.
    pub fn new(signature: Vec<u8>, plaintext: Vec<u8>) -> Result<Self> {
        if signature.len() > MAX_SIGNATURE_LEN {
            return Err(Error::EnvelopeTooLarge {
                signature_len: signature.len(),
            });
        }

        Ok(Self {
            signature,
            plaintext,
        })
    }

    /// Serialize to the wire format
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&(self.signature.len() as u16).to_le_bytes());
        out.extend_from_slice(&self.signature);
        out.extend_from_slice(&self.plaintext);
        out
    }

    /// Parse an envelope from wire bytes
    ///
    /// ## Errors
    ///
    /// [`Error::MalformedEnvelope`] when the input is shorter than the
    /// length prefix, or when the prefix declares more signature bytes
    /// than the input actually carries.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < LENGTH_PREFIX_LEN {
            return Err(Error::MalformedEnvelope(format!(
                "Envelope must be at least {} bytes, got {}",
                LENGTH_PREFIX_LEN,
                data.len()
            )));
        }

        let sig_len = u16::from_le_bytes([data[0], data[1]]) as usize;
        let body = &data[LENGTH_PREFIX_LEN..];

        if body.len() < sig_len {
            return Err(Error::MalformedEnvelope(format!(
                "Length prefix declares {} signature bytes but only {} are present",
                sig_len,
                body.len()
            )));
        }

        Ok(Self {
            signature: body[..sig_len].to_vec(),
            plaintext: body[sig_len..].to_vec(),
        })
    }

    /// The signature field
    ///
    /// Unverified bytes until the pipeline says otherwise.
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// The plaintext field, exactly as carried on the wire
    pub fn plaintext(&self) -> &[u8] {
        &self.plaintext
    }

    /// Consume the envelope, keeping only the plaintext
    pub fn into_plaintext(self) -> Vec<u8> {
        self.plaintext
    }

    /// Serialized size in bytes
    pub fn encoded_len(&self) -> usize {
        LENGTH_PREFIX_LEN + self.signature.len() + self.plaintext.len()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_roundtrip() {
        let signature = vec![0xAAu8; 256];
        let plaintext = b"hello world".to_vec();

        let envelope = Envelope::new(signature.clone(), plaintext.clone()).unwrap();
        let bytes = envelope.to_bytes();
        let decoded = Envelope::from_bytes(&bytes).unwrap();

        assert_eq!(decoded.signature(), signature.as_slice());
        assert_eq!(decoded.plaintext(), plaintext.as_slice());
    }

    #[test]
    fn test_envelope_roundtrip_empty_plaintext() {
        let signature = vec![0x11u8; 256];

        let envelope = Envelope::new(signature.clone(), Vec::new()).unwrap();
        let bytes = envelope.to_bytes();

        assert_eq!(bytes.len(), 2 + 256);

        let decoded = Envelope::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.signature(), signature.as_slice());
        assert!(decoded.plaintext().is_empty());
    }

    #[test]
    fn test_envelope_layout_is_little_endian() {
        let envelope = Envelope::new(vec![0xAA, 0xBB, 0xCC], vec![0x01, 0x02]).unwrap();

        // 3-byte signature: prefix 03 00, then signature, then plaintext
        assert_eq!(
            envelope.to_bytes(),
            vec![0x03, 0x00, 0xAA, 0xBB, 0xCC, 0x01, 0x02]
        );
    }

    #[test]
    fn test_length_prefix_matches_signature_len() {
        let envelope = Envelope::new(vec![0u8; 256], b"payload".to_vec()).unwrap();
        let bytes = envelope.to_bytes();

        let declared = u16::from_le_bytes([bytes[0], bytes[1]]) as usize;
        assert_eq!(declared, 256);
    }

    #[test]
    fn test_decode_rejects_short_input() {
        assert!(matches!(
            Envelope::from_bytes(&[]),
            Err(Error::MalformedEnvelope(_))
        ));
        assert!(matches!(
            Envelope::from_bytes(&[0x07]),
            Err(Error::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn test_decode_rejects_overdeclared_length() {
        // Prefix claims 1000 signature bytes; only 3 follow
        let mut data = 1000u16.to_le_bytes().to_vec();
        data.extend_from_slice(&[0x01, 0x02, 0x03]);

        assert!(matches!(
            Envelope::from_bytes(&data),
            Err(Error::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn test_decode_empty_signature_field() {
        // N = 0 is legal: everything after the prefix is plaintext
        let data = [0x00, 0x00, b'h', b'i'];

        let envelope = Envelope::from_bytes(&data).unwrap();
        assert!(envelope.signature().is_empty());
        assert_eq!(envelope.plaintext(), b"hi");
    }

    #[test]
    fn test_decode_exact_signature_no_plaintext() {
        // Prefix consumes every remaining byte as signature
        let mut data = 4u16.to_le_bytes().to_vec();
        data.extend_from_slice(&[9, 9, 9, 9]);

        let envelope = Envelope::from_bytes(&data).unwrap();
        assert_eq!(envelope.signature(), &[9, 9, 9, 9]);
        assert!(envelope.plaintext().is_empty());
    }

    #[test]
    fn test_max_signature_boundary() {
        let at_max = Envelope::new(vec![0u8; MAX_SIGNATURE_LEN], Vec::new()).unwrap();
        let bytes = at_max.to_bytes();
        let decoded = Envelope::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.signature().len(), MAX_SIGNATURE_LEN);

        let over_max = Envelope::new(vec![0u8; MAX_SIGNATURE_LEN + 1], Vec::new());
        assert!(matches!(
            over_max,
            Err(Error::EnvelopeTooLarge {
                signature_len: 65536
            })
        ));
    }

    #[test]
    fn test_encoded_len() {
        let envelope = Envelope::new(vec![0u8; 256], vec![0u8; 11]).unwrap();

        assert_eq!(envelope.encoded_len(), 2 + 256 + 11);
        assert_eq!(envelope.to_bytes().len(), envelope.encoded_len());
    }

    #[test]
    fn test_into_plaintext() {
        let envelope = Envelope::new(vec![1, 2, 3], b"payload".to_vec()).unwrap();

        assert_eq!(envelope.into_plaintext(), b"payload".to_vec());
    }
}
