//! Fetching from origin and turning transport failures into actionable messages

use tracing::{debug, warn};

use super::validation::ORIGIN;
use crate::git::{CredentialProvider, RepositoryHandle, TransportError};

// Transport text fragments, checked in this order; first match wins
const CREDENTIAL_MARKERS: &[&str] = &[
    "401",
    "replays",
    "Authentication failed",
    "could not read Username",
];
const NOT_FOUND_MARKERS: &[&str] = &["404", "not found"];
const TIMEOUT_MARKERS: &[&str] = &["timed out"];

/// Why a fetch from origin failed
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchFailure {
    #[error("Incorrect credentials")]
    BadCredentials,
    #[error("Remote not found/no access")]
    RemoteNotFound,
    #[error("Timed out accessing remote")]
    Timeout,
    /// Transport text that matched no known pattern, passed through as-is
    #[error("{0}")]
    Unclassified(String),
}

impl FetchFailure {
    /// Classifies raw transport error text
    pub fn classify(message: &str) -> Self {
        let contains_any = |markers: &[&str]| markers.iter().any(|m| message.contains(m));

        if contains_any(CREDENTIAL_MARKERS) {
            FetchFailure::BadCredentials
        } else if contains_any(NOT_FOUND_MARKERS) {
            FetchFailure::RemoteNotFound
        } else if contains_any(TIMEOUT_MARKERS) {
            FetchFailure::Timeout
        } else {
            FetchFailure::Unclassified(message.to_string())
        }
    }

    pub fn message(&self) -> &str {
        match self {
            FetchFailure::BadCredentials => "Incorrect credentials",
            FetchFailure::RemoteNotFound => "Remote not found/no access",
            FetchFailure::Timeout => "Timed out accessing remote",
            FetchFailure::Unclassified(raw) => raw,
        }
    }
}

impl From<TransportError> for FetchFailure {
    fn from(err: TransportError) -> Self {
        FetchFailure::classify(&err.message)
    }
}

/// Fetches every ref-spec configured on origin, classifying any failure
pub async fn fetch_origin<H>(
    credentials: &dyn CredentialProvider,
    directory: &str,
    repo: &H,
) -> Result<(), FetchFailure>
where
    H: RepositoryHandle + ?Sized,
{
    debug!(directory, "fetching {ORIGIN}");
    repo.fetch(ORIGIN, credentials).await.map_err(|err| {
        let failure = FetchFailure::from(err);
        warn!(directory, %failure, "fetch failed");
        failure
    })
}
