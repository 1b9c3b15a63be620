//! Title → metadata resolution against the OMDb API.
//!
//! The payload mapping is pure and always compiled; only the HTTP client is
//! feature-gated (`lookup`). Service and network failures degrade to
//! [`LookupOutcome::NotFound`]; a lookup never hard-fails its caller.

#[cfg(feature = "lookup")]
pub mod client;
pub mod response;

use crate::catalog::entry::EntryDraft;

#[cfg(feature = "lookup")]
pub use client::OmdbClient;
pub use response::{OmdbPayload, map_payload};

/// Result of one metadata lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// A fully resolved draft. Cover and actors are already defaulted.
    Found(EntryDraft),
    /// No match, or the service was unavailable.
    NotFound { reason: Option<String> },
}

impl LookupOutcome {
    pub fn not_found(reason: impl Into<String>) -> Self {
        LookupOutcome::NotFound {
            reason: Some(reason.into()),
        }
    }
}
