use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand, ValueEnum};
use errwire_codec::{
    DecodeFailure, FrameError, WireFormat, decode_as, encode_as,
    framing::{read_response, write_response},
};
use errwire_core::{ErrorCode, ErrorResponse};
use serde::Serialize;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "ERRWIRE_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Parser)]
#[command(name = "errwire", about = "Encode and inspect error contract payloads")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Encodes a payload. Binary output is printed as hex unless --output is given.
    Encode {
        #[arg(long, default_value = "")]
        message: String,
        /// Symbolic name or integer identity. Unrecognized identities are encoded as-is.
        #[arg(long, default_value = "UNKNOWN_ERROR")]
        code: String,
        #[arg(long, value_enum, default_value_t = FormatArg::Binary)]
        format: FormatArg,
        #[arg(long)]
        output: Option<PathBuf>,
        /// Append a length-prefixed frame to --output instead of overwriting it.
        #[arg(long, requires = "output")]
        framed: bool,
    },
    /// Decodes a payload and prints one JSON report per payload.
    Decode {
        /// Hex for binary payloads, JSON text for json payloads.
        payload: Option<String>,
        /// Reads raw payload bytes from a file.
        #[arg(long, conflicts_with = "payload")]
        input: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = FormatArg::Binary)]
        format: FormatArg,
        /// Treat --input as a sequence of length-prefixed frames.
        #[arg(long, requires = "input")]
        framed: bool,
    },
    /// Lists every known error code.
    Codes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Binary,
    Json,
}

impl From<FormatArg> for WireFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Binary => WireFormat::Binary,
            FormatArg::Json => WireFormat::Json,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Decode(#[from] DecodeFailure),
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error("invalid hex payload: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("failed to render report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid error code '{value}': expected a name such as AUTH_ERROR or an integer")]
    InvalidCode { value: String },
    #[error("framed payloads are always binary")]
    FramedJson,
    #[error("no payload given: pass it as an argument or use --input")]
    MissingPayload,
}

#[derive(Debug, Serialize)]
struct DecodeReport<'a> {
    message: &'a str,
    error_code: i64,
    name: ErrorCode,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("errwire: {err}");
            ExitCode::from(1)
        }
    }
}

async fn run() -> Result<(), CliError> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Encode {
            message,
            code,
            format,
            output,
            framed,
        } => {
            let response = ErrorResponse {
                message,
                error_code: parse_code(&code)?,
            };
            encode_payload(&response, format, output.as_deref(), framed).await
        }
        Command::Decode {
            payload,
            input,
            format,
            framed,
        } => {
            let format = WireFormat::from(format);
            let bytes = match (input, payload) {
                (Some(path), _) => tokio::fs::read(&path).await?,
                (None, Some(text)) => payload_bytes(format, &text)?,
                (None, None) => return Err(CliError::MissingPayload),
            };

            if framed {
                if format != WireFormat::Binary {
                    return Err(CliError::FramedJson);
                }
                decode_frames(&bytes).await
            } else {
                print_report(&decode_as(format, &bytes)?)
            }
        }
        Command::Codes => {
            let mut stdout = io::stdout().lock();
            for code in ErrorCode::ALL {
                writeln!(stdout, "{}\t{code}", code.identity())?;
            }
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn encode_payload(
    response: &ErrorResponse,
    format: FormatArg,
    output: Option<&Path>,
    framed: bool,
) -> Result<(), CliError> {
    let format = WireFormat::from(format);

    match output {
        Some(path) if framed => {
            if format != WireFormat::Binary {
                return Err(CliError::FramedJson);
            }
            let mut file = tokio::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .await?;
            write_response(&mut file, response).await?;
            tracing::debug!(path = %path.display(), "appended error payload frame");
        }
        Some(path) => {
            let mut file = tokio::fs::File::create(path).await?;
            file.write_all(&encode_as(format, response)).await?;
            file.flush().await?;
        }
        None => {
            let bytes = encode_as(format, response);
            let rendered = match format {
                WireFormat::Binary => hex::encode(bytes),
                WireFormat::Json => String::from_utf8_lossy(&bytes).into_owned(),
            };
            println!("{rendered}");
        }
    }

    Ok(())
}

async fn decode_frames(bytes: &[u8]) -> Result<(), CliError> {
    let mut reader = bytes;
    while !reader.is_empty() {
        let response = read_response(&mut reader).await?;
        print_report(&response)?;
    }
    Ok(())
}

fn print_report(response: &ErrorResponse) -> Result<(), CliError> {
    let report = DecodeReport {
        message: &response.message,
        error_code: response.error_code,
        name: response.code(),
    };
    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}

/// Resolves `--code` to a wire identity.
fn parse_code(value: &str) -> Result<i64, CliError> {
    if let Ok(identity) = value.parse::<i64>() {
        if !ErrorCode::is_known(identity) {
            tracing::warn!(identity, "encoding an identity this build does not recognize");
        }
        return Ok(identity);
    }

    ErrorCode::from_str_name(&value.to_ascii_uppercase())
        .map(|code| i64::from(code.identity()))
        .ok_or_else(|| CliError::InvalidCode {
            value: value.to_string(),
        })
}

fn payload_bytes(format: WireFormat, text: &str) -> Result<Vec<u8>, CliError> {
    match format {
        WireFormat::Binary => Ok(hex::decode(text.trim())?),
        WireFormat::Json => Ok(text.as_bytes().to_vec()),
    }
}
