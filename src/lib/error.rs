use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures on the byte link to the mouth controller.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("could not open {address}: {source}")]
    Open {
        address: String,
        #[source]
        source: io::Error,
    },
    #[error("write to mouth controller failed: {0}")]
    Write(#[from] io::Error),
    #[error("link is not connected")]
    NotConnected,
}

/// Failures talking to the upstream text generator.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("no API key configured (set GROQ_API_KEY or add api_key to the config file)")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode API response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("API returned no reply")]
    EmptyReply,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
