//! Mock fare finder client for running without API access.
//!
//! Serves canned response bodies, either registered in memory or loaded
//! from a directory of JSON files, as if they were live API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::IataCode;

use super::client::FareQuery;
use super::error::FarfndError;
use super::types::RoundTripFaresResponse;

/// Route key: departure plus optional arrival (`None` = any destination).
type RouteKey = (IataCode, Option<IataCode>);

/// What the mock answers for a route.
#[derive(Debug, Clone)]
enum MockReply {
    /// Raw JSON body, parsed at request time.
    Body(String),
    /// Non-success status code.
    Status(u16),
}

/// Mock client that serves responses keyed by route.
///
/// Routes without a registered reply answer with status 404.
#[derive(Debug, Default)]
pub struct MockFarfndClient {
    replies: HashMap<RouteKey, MockReply>,
    calls: AtomicUsize,
}

impl MockFarfndClient {
    /// Create a mock with no registered routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load replies from a directory.
    ///
    /// Expects files named `{DEP}.json` (any destination) or
    /// `{DEP}-{ARR}.json` (e.g., `TSF.json`, `TSF-CRL.json`). Other files
    /// are ignored.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, FarfndError> {
        let data_dir = data_dir.as_ref();
        let mut mock = Self::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            FarfndError::NotConfigured(format!(
                "failed to read mock data directory {data_dir:?}: {e}"
            ))
        })?;

        for entry in entries {
            let path = entry
                .map_err(|e| {
                    FarfndError::NotConfigured(format!("failed to read directory entry: {e}"))
                })?
                .path();

            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| FarfndError::NotConfigured(format!("invalid filename: {path:?}")))?;
            let key = parse_route_key(stem).ok_or_else(|| {
                FarfndError::NotConfigured(format!("invalid route in filename: {stem}"))
            })?;

            let body = std::fs::read_to_string(&path).map_err(|e| {
                FarfndError::NotConfigured(format!("failed to read {path:?}: {e}"))
            })?;

            mock.replies.insert(key, MockReply::Body(body));
        }

        if mock.replies.is_empty() {
            return Err(FarfndError::NotConfigured(format!(
                "no mock fare files found in {data_dir:?}"
            )));
        }

        Ok(mock)
    }

    /// Register a JSON body for a route.
    pub fn with_body(
        mut self,
        departure: IataCode,
        arrival: Option<IataCode>,
        body: impl Into<String>,
    ) -> Self {
        self.replies
            .insert((departure, arrival), MockReply::Body(body.into()));
        self
    }

    /// Register a non-success status for a route.
    pub fn with_status(
        mut self,
        departure: IataCode,
        arrival: Option<IataCode>,
        status: u16,
    ) -> Self {
        self.replies
            .insert((departure, arrival), MockReply::Status(status));
        self
    }

    /// Number of requests served so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Mimics `FarfndClient::round_trip_fares`.
    ///
    /// Only the route is matched; dates and durations are ignored.
    pub async fn round_trip_fares(
        &self,
        query: &FareQuery,
    ) -> Result<RoundTripFaresResponse, FarfndError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.replies.get(&(query.departure, query.arrival)) {
            Some(MockReply::Body(body)) => {
                serde_json::from_str(body).map_err(|e| FarfndError::UnexpectedShape {
                    message: e.to_string(),
                    body: Some(body.chars().take(500).collect()),
                })
            }
            Some(MockReply::Status(429)) => Err(FarfndError::RateLimited),
            Some(MockReply::Status(status)) => Err(FarfndError::Status {
                status: *status,
                message: format!("mock status for {}", query.route_label()),
            }),
            None => Err(FarfndError::Status {
                status: 404,
                message: format!("no mock data for {}", query.route_label()),
            }),
        }
    }
}

/// `TSF` -> (TSF, None), `TSF-CRL` -> (TSF, Some(CRL)).
fn parse_route_key(stem: &str) -> Option<RouteKey> {
    match stem.split_once('-') {
        Some((dep, arr)) => Some((IataCode::parse(dep).ok()?, Some(IataCode::parse(arr).ok()?))),
        None => Some((IataCode::parse(stem).ok()?, None)),
    }
}
