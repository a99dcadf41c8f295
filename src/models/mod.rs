// Model exports
pub mod domain;
pub mod payload;

pub use domain::{QueryIdentity, CandidateRecord, MatchOutcome};
pub use payload::{SearchPage, ObituaryList, ObituaryEntry};
