//! # Signet CLI
//!
//! Command-line boundary for the Signet signing core. This binary reads
//! files, hands bytes to the core, and writes the resulting artifacts
//! back out. All cryptographic decisions live in `signet-core`; all
//! presentation decisions live here.
//!
//! ## Usage
//!
//! ```bash
//! # Sign a file with a fresh session key pair
//! signet sign report.pdf
//! #   -> report.pdf.signed   (envelope: length prefix + signature + plaintext)
//! #   -> report.pdf.pub      (session public key, SPKI DER)
//!
//! # Verify an envelope with the signer's public key
//! signet verify report.pdf.signed --key report.pdf.pub
//! #   -> report.pdf          (recovered plaintext, only on acceptance)
//! ```
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Operation succeeded / envelope accepted |
//! | 1 | Envelope rejected (signature did not match) |
//! | 2 | Operational error (bad input, I/O failure, key generation) |

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::task;
use tracing_subscriber::EnvFilter;

use signet_core::pipeline::{self, Verification};
use signet_core::{Error, KeyPair, PublicKey, Report, Result};

/// Exit code for success and accepted envelopes
const EXIT_OK: u8 = 0;
/// Exit code for a rejected envelope
const EXIT_REJECTED: u8 = 1;
/// Exit code for operational errors
const EXIT_ERROR: u8 = 2;

// ── CLI Arguments ────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "signet",
    version,
    about = "Sign files into self-contained envelopes and verify them"
)]
struct Cli {
    /// Emit machine-readable JSON outcomes instead of human-readable lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign a file with a fresh session key pair
    Sign {
        /// File to sign
        file: PathBuf,

        /// Where to write the signed envelope (default: <FILE>.signed)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Where to write the session public key DER (default: <FILE>.pub)
        #[arg(long)]
        key_out: Option<PathBuf>,
    },

    /// Verify a signed envelope and recover its plaintext
    Verify {
        /// Envelope file to verify
        file: PathBuf,

        /// Signer's public key in SPKI DER, as written by `sign`
        #[arg(short, long)]
        key: PathBuf,

        /// Where to write the recovered plaintext
        /// (default: <FILE> minus a `.signed` suffix, else <FILE>.verified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

// ── Entry Point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "signet_cli=info,signet_core=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Command::Sign {
            file,
            output,
            key_out,
        } => run_sign(file, output, key_out, cli.json).await,
        Command::Verify { file, key, output } => run_verify(file, key, output, cli.json).await,
    };

    match outcome {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            let report = Report::from(err);
            if cli.json {
                println!("{}", report.to_json());
            } else if report.fatal {
                eprintln!("Error (fatal): {}", report.message);
            } else {
                eprintln!("Error: {}", report.message);
            }
            ExitCode::from(EXIT_ERROR)
        }
    }
}

// ── Operations ───────────────────────────────────────────────────────────────

/// Sign `file` with a fresh session key pair and write the artifacts.
///
/// The key pair exists before the payload is read: a generation failure
/// aborts the whole operation and nothing is written.
async fn run_sign(
    file: PathBuf,
    output: Option<PathBuf>,
    key_out: Option<PathBuf>,
    json: bool,
) -> Result<u8> {
    let keypair = task::spawn_blocking(KeyPair::generate)
        .await
        .map_err(|e| Error::Internal(format!("key generation task failed: {}", e)))??;

    let plaintext = tokio::fs::read(&file).await?;
    tracing::info!("Read {} bytes from {}", plaintext.len(), file.display());

    let (envelope, public_der, fingerprint) =
        task::spawn_blocking(move || -> Result<(Vec<u8>, Vec<u8>, String)> {
            let envelope = pipeline::sign(&keypair, &plaintext)?;
            let public = keypair.public_key();
            Ok((envelope, public.to_der()?, public.fingerprint()?))
        })
        .await
        .map_err(|e| Error::Internal(format!("signing task failed: {}", e)))??;

    let envelope_path = output.unwrap_or_else(|| default_sign_output(&file));
    let key_path = key_out.unwrap_or_else(|| default_key_output(&file));

    tokio::fs::write(&envelope_path, &envelope).await?;
    tokio::fs::write(&key_path, &public_der).await?;
    tracing::info!(
        "Wrote {} byte envelope to {}",
        envelope.len(),
        envelope_path.display()
    );

    if json {
        println!(
            "{}",
            serde_json::json!({
                "outcome": "signed",
                "envelope": envelope_path.display().to_string(),
                "public_key": key_path.display().to_string(),
                "fingerprint": fingerprint,
                "envelope_len": envelope.len(),
            })
        );
    } else {
        println!("Signed file: {}", envelope_path.display());
        println!("Public key:  {}", key_path.display());
        println!("Fingerprint: {}", fingerprint);
    }

    Ok(EXIT_OK)
}

/// Verify the envelope in `file` against the public key in `key`.
///
/// The recovered plaintext is written only when the envelope is accepted;
/// a rejection withholds it and exits with [`EXIT_REJECTED`].
async fn run_verify(
    file: PathBuf,
    key: PathBuf,
    output: Option<PathBuf>,
    json: bool,
) -> Result<u8> {
    let envelope = tokio::fs::read(&file).await?;
    let key_der = tokio::fs::read(&key).await?;
    tracing::info!("Read {} envelope bytes from {}", envelope.len(), file.display());

    let verification = task::spawn_blocking(move || -> Result<Verification> {
        let public = PublicKey::from_der(&key_der)?;
        pipeline::verify(&public, &envelope)
    })
    .await
    .map_err(|e| Error::Internal(format!("verification task failed: {}", e)))??;

    match verification {
        Verification::Accepted { plaintext } => {
            let out_path = output.unwrap_or_else(|| default_verify_output(&file));
            tokio::fs::write(&out_path, &plaintext).await?;

            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "outcome": "accepted",
                        "verified": out_path.display().to_string(),
                        "plaintext_len": plaintext.len(),
                    })
                );
            } else {
                println!("Signature is valid.");
                println!("Verified file: {}", out_path.display());
            }
            Ok(EXIT_OK)
        }
        Verification::Rejected => {
            if json {
                println!("{}", serde_json::json!({ "outcome": "rejected" }));
            } else {
                println!("Invalid signature!");
            }
            Ok(EXIT_REJECTED)
        }
    }
}

// ── Output Paths ─────────────────────────────────────────────────────────────

/// Default envelope path for `sign`: `<input>.signed`
fn default_sign_output(input: &Path) -> PathBuf {
    append_extension(input, "signed")
}

/// Default public key path for `sign`: `<input>.pub`
fn default_key_output(input: &Path) -> PathBuf {
    append_extension(input, "pub")
}

/// Default plaintext path for `verify`
///
/// Strips a `.signed` suffix when present so `report.pdf.signed` recovers
/// to `report.pdf`; otherwise appends `.verified`.
fn default_verify_output(input: &Path) -> PathBuf {
    if let Some(name) = input.file_name().and_then(|n| n.to_str()) {
        if let Some(stripped) = name.strip_suffix(".signed") {
            if !stripped.is_empty() {
                return input.with_file_name(stripped);
            }
        }
    }
    append_extension(input, "verified")
}

fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(ext);
    path.with_file_name(name)
}

// ── Tests ────────────────────────────────────────────────────────────────────
