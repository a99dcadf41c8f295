use crate::models::{CandidateRecord, QueryIdentity};

/// Check whether a candidate's name plausibly belongs to the identity
///
/// Passes on an exact (case-insensitive) full-name match, or when
/// `"{first} {middle_initial} {last}"` occurs inside the candidate name,
/// which tolerates candidates listed with a middle initial only.
/// An identity without any name never matches.
#[inline]
pub fn name_matches(identity: &QueryIdentity, candidate: &CandidateRecord) -> bool {
    let query_name = identity.full_name_lower();
    if query_name.is_empty() {
        return false;
    }

    let candidate_name = candidate.full_name_lower();
    if candidate_name == query_name {
        return true;
    }

    let needle = identity.initial_needle();
    !needle.is_empty() && candidate_name.contains(&needle)
}

/// Check whether the candidate's location is compatible with the identity
///
/// Identities without a complete city/state pass unconditionally.
#[inline]
pub fn location_matches(identity: &QueryIdentity, candidate: &CandidateRecord) -> bool {
    let location = identity.location();
    location.is_empty() || candidate.location().contains(&location)
}
