//! Obit Search - batch obituary lookup for tabular people lists
//!
//! Each person in an input CSV is searched on a public obituary index by
//! first and last name. The returned result set is pulled out of the page,
//! compared against the person's name and location, and the decision plus an
//! evidence link is appended to the person's row in the output CSV.

pub mod batch;
pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::batch::{run, BatchError, RunSummary};
pub use crate::core::{Matcher, PayloadExtractor, name_matches, location_matches};
pub use crate::models::{QueryIdentity, CandidateRecord, MatchOutcome};
pub use crate::services::{IdentityMatcher, ObituaryClient, SearchError};
