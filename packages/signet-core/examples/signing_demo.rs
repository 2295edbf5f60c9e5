//! # File Signing Demo
//!
//! Demonstrates the full Signet flow: session key generation, signing a
//! payload into an envelope, verifying it, and watching tampered or
//! cross-key envelopes get rejected.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example signing_demo
//! ```

use signet_core::pipeline::{self, Verification};
use signet_core::{Envelope, Error, KeyPair};

fn main() {
    println!("=== Signet Core: File Signing Demo ===\n");

    // Step 1: Create a session key pair
    println!("Step 1: Generating RSA-2048 session key pair (takes a moment)...");

    let keypair = match KeyPair::generate() {
        Ok(kp) => kp,
        Err(e) => {
            // Fatal: without keys there is no session
            eprintln!("  [FAILED] {}", e);
            std::process::exit(1);
        }
    };
    let public = keypair.public_key();

    println!(
        "  Public key fingerprint: {}",
        public.fingerprint().expect("fingerprint")
    );
    println!();

    // Step 2: Explain the envelope
    println!("Step 2: Understanding the envelope");
    println!();
    println!("  ┌─────────────────────────────────────────────────────────────┐");
    println!("  │                    ENVELOPE LAYOUT                          │");
    println!("  ├─────────────────────────────────────────────────────────────┤");
    println!("  │                                                             │");
    println!("  │   offset 0:   u16 little-endian = N (signature length)     │");
    println!("  │   offset 2:   N bytes of RSA PKCS#1 v1.5 signature         │");
    println!("  │   offset 2+N: the original plaintext, byte for byte        │");
    println!("  │                                                             │");
    println!("  │   Verification re-reads the plaintext straight out of      │");
    println!("  │   the envelope, so what you verify is what you get.        │");
    println!("  │                                                             │");
    println!("  └─────────────────────────────────────────────────────────────┘");
    println!();

    // Step 3: Sign a payload
    println!("Step 3: Signing a payload...");

    let plaintext = b"This file was sealed by the session key holder.";
    println!("  Payload: \"{}\"", String::from_utf8_lossy(plaintext));

    let envelope_bytes = pipeline::sign(&keypair, plaintext).expect("signing failed");

    let envelope = Envelope::from_bytes(&envelope_bytes).expect("own envelope parses");
    println!("  Envelope size: {} bytes", envelope_bytes.len());
    println!(
        "  Signature (hex, first 16 bytes): {}...",
        hex_preview(envelope.signature())
    );
    println!();

    // Step 4: Verify the envelope
    println!("Step 4: Verifying the envelope...");

    match pipeline::verify(&public, &envelope_bytes) {
        Ok(Verification::Accepted { plaintext }) => {
            println!("  [OK] Signature is valid!");
            println!(
                "  Recovered payload: \"{}\"",
                String::from_utf8_lossy(&plaintext)
            );
        }
        Ok(Verification::Rejected) => println!("  [FAILED] Envelope was rejected!"),
        Err(e) => println!("  [FAILED] {}", e),
    }
    println!();

    // Step 5: Tamper detection
    println!("Step 5: Tamper detection...");

    let mut tampered = envelope_bytes.clone();
    let last = tampered.len() - 1;
    tampered[last] ^= 0x01;

    match pipeline::verify(&public, &tampered) {
        Ok(Verification::Rejected) => {
            println!("  [OK] Tampered payload detected: envelope rejected, plaintext withheld")
        }
        Ok(Verification::Accepted { .. }) => println!("  [FAILED] Tampered payload was accepted!"),
        Err(e) => println!("  [FAILED] Unexpected error: {}", e),
    }
    println!();

    // Step 6: Cross-key rejection
    println!("Step 6: Cross-key rejection...");

    let other = KeyPair::generate().expect("second key pair");
    match pipeline::verify(&other.public_key(), &envelope_bytes) {
        Ok(Verification::Rejected) => println!("  [OK] Wrong public key detected: envelope rejected"),
        Ok(Verification::Accepted { .. }) => println!("  [FAILED] Wrong public key was accepted!"),
        Err(e) => println!("  [FAILED] Unexpected error: {}", e),
    }
    println!();

    // Step 7: Malformed input stays an error, not a crash
    println!("Step 7: Malformed envelopes...");

    let mut truncated = 500u16.to_le_bytes().to_vec();
    truncated.extend_from_slice(&[1, 2, 3]);

    match pipeline::verify(&public, &truncated) {
        Err(Error::MalformedEnvelope(reason)) => {
            println!("  [OK] Malformed envelope reported cleanly: {}", reason)
        }
        other => println!("  [FAILED] Expected a malformed-envelope error, got {:?}", other),
    }
    println!();

    println!("=== Example Complete ===");
}

fn hex_preview(bytes: &[u8]) -> String {
    hex::encode(&bytes[..bytes.len().min(16)])
}
