use crate::models::{CandidateRecord, MatchOutcome, QueryIdentity};
use crate::core::filters::{location_matches, name_matches};

/// Applies the identity heuristic to a candidate list
///
/// Candidates are scanned in source order and the first one passing both the
/// name and the location check wins. There is no scoring or ranking.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher;

impl Matcher {
    pub fn new() -> Self {
        Self
    }

    /// Decide whether any candidate corresponds to the identity
    pub fn find_match(
        &self,
        identity: &QueryIdentity,
        candidates: &[CandidateRecord],
    ) -> MatchOutcome {
        for (i, candidate) in candidates.iter().enumerate() {
            let position = i + 1;
            tracing::info!(
                "Result {}: {} - {}",
                position,
                candidate.full_name_lower(),
                candidate.location()
            );
            tracing::info!("Result {} URL: {}", position, candidate.obituary_url);

            if name_matches(identity, candidate) && location_matches(identity, candidate) {
                return MatchOutcome::Match {
                    url: candidate.obituary_url.clone(),
                };
            }
        }

        MatchOutcome::NoMatch
    }
}
