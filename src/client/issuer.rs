use std::path::PathBuf;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use clap::{Parser, Subcommand};
use report_verifier_service::common::client::{submit_report, DEFAULT_VERIFY_URL};
use report_verifier_service::common::config::VerifierConfig;
use report_verifier_service::common::signer::sign_report_file;
use report_verifier_service::common::types::SignedReport;
use tracing::warn;

#[derive(Parser)]
#[command(author, version, about = "Sign reports and check them against a verifier", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the HMAC-SHA256 signature of a report (needs SECRET_KEY)
    Sign {
        /// path to the report file
        file: PathBuf,
    },
    /// Submit a report to a verifier and print its verdict
    Verify {
        /// path to the report file
        file: PathBuf,

        /// signature to check; signs locally with SECRET_KEY when omitted
        #[arg(short, long)]
        signature: Option<String>,

        /// verifier endpoint
        #[arg(short, long, env = "VERIFIER_URL", default_value = DEFAULT_VERIFY_URL)]
        url: String,
    },
}

fn load_config() -> Result<VerifierConfig, Box<dyn std::error::Error>> {
    let config = VerifierConfig::from_env()?;
    if config.uses_dev_secret() {
        warn!("signing with the built-in development secret");
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match Cli::parse().command {
        Command::Sign { file } => {
            let config = load_config()?;
            let signed = sign_report_file(&file, &config.secret_key)?;
            println!("{}", signed.signature);
        }
        Command::Verify {
            file,
            signature,
            url,
        } => {
            let report = match signature {
                Some(signature) => {
                    let bytes = std::fs::read(&file)
                        .map_err(|e| format!("Failed to read report {}: {}", file.display(), e))?;
                    SignedReport {
                        file: BASE64.encode(bytes),
                        signature,
                    }
                }
                None => sign_report_file(&file, &load_config()?.secret_key)?,
            };

            let client = reqwest::Client::new();
            let verdict = submit_report(&client, &url, report).await?;
            println!("valid: {}", verdict.valid);
            println!("{}", verdict.message);
            if !verdict.valid {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sign() {
        let cli = Cli::try_parse_from(["issuer", "sign", "report.pdf"]).unwrap();
        match cli.command {
            Command::Sign { file } => assert_eq!(file, PathBuf::from("report.pdf")),
            _ => panic!("expected sign"),
        }
    }

    #[test]
    fn test_parse_verify_with_signature() {
        let cli = Cli::try_parse_from([
            "issuer",
            "verify",
            "report.pdf",
            "--signature",
            "ABCD",
            "--url",
            "https://verify.example.com/verify",
        ])
        .unwrap();
        match cli.command {
            Command::Verify {
                file,
                signature,
                url,
            } => {
                assert_eq!(file, PathBuf::from("report.pdf"));
                assert_eq!(signature.as_deref(), Some("ABCD"));
                assert_eq!(url, "https://verify.example.com/verify");
            }
            _ => panic!("expected verify"),
        }
    }

    #[test]
    fn test_verify_requires_file() {
        assert!(Cli::try_parse_from(["issuer", "verify"]).is_err());
    }
}
