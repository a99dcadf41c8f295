/// Identifying attributes for one person being searched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryIdentity {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub city: String,
    pub state: String,
    // Not used by the match heuristic
    pub zip_code: String,
    pub dob_year: String,
}

impl QueryIdentity {
    /// Non-empty name parts joined by single spaces, original case
    pub fn full_name(&self) -> String {
        [&self.first_name, &self.middle_name, &self.last_name]
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn full_name_lower(&self) -> String {
        self.full_name().to_lowercase()
    }

    /// First character of the middle name, lower-cased, or empty
    pub fn middle_initial(&self) -> String {
        self.middle_name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_lowercase().collect::<String>())
            .unwrap_or_default()
    }

    /// `"{first} {middle_initial} {last}"` lower-cased and trimmed.
    ///
    /// Without a middle name this keeps the doubled inner space, so only the
    /// exact full-name comparison can match such identities.
    pub fn initial_needle(&self) -> String {
        format!(
            "{} {} {}",
            self.first_name.trim().to_lowercase(),
            self.middle_initial(),
            self.last_name.trim().to_lowercase()
        )
        .trim()
        .to_string()
    }

    /// `"{city} {state}"` lower-cased, empty unless both parts are present
    pub fn location(&self) -> String {
        if self.city.is_empty() || self.state.is_empty() {
            return String::new();
        }
        format!("{} {}", self.city, self.state).to_lowercase()
    }
}

/// One obituary entry returned by the index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateRecord {
    pub full_name: String,
    pub city: String,
    pub state: String,
    pub obituary_url: String,
}

impl CandidateRecord {
    pub fn new(
        full_name: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        obituary_url: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            city: city.into(),
            state: state.into(),
            obituary_url: obituary_url.into(),
        }
    }

    pub fn full_name_lower(&self) -> String {
        self.full_name.to_lowercase()
    }

    /// `"{city} {state}"` lower-cased and trimmed
    pub fn location(&self) -> String {
        format!("{} {}", self.city, self.state)
            .trim()
            .to_lowercase()
    }
}

/// Decision for one identity plus the evidence link when positive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Match { url: String },
    NoMatch,
}

impl MatchOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Match { .. })
    }

    /// Evidence URL, empty for `NoMatch`
    pub fn url(&self) -> &str {
        match self {
            MatchOutcome::Match { url } => url,
            MatchOutcome::NoMatch => "",
        }
    }

    /// Encoding used in the `Likely Deceased` output column
    pub fn likely_deceased(&self) -> &'static str {
        if self.is_match() {
            "YES"
        } else {
            "NO"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(first: &str, middle: &str, last: &str, city: &str, state: &str) -> QueryIdentity {
        QueryIdentity {
            first_name: first.to_string(),
            middle_name: middle.to_string(),
            last_name: last.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_full_name_skips_empty_parts() {
        assert_eq!(identity("Jane", "", "Doe", "", "").full_name(), "Jane Doe");
        assert_eq!(
            identity("John", "Quincy", "Smith", "", "").full_name_lower(),
            "john quincy smith"
        );
    }

    #[test]
    fn test_initial_needle() {
        assert_eq!(identity("John", "Quincy", "Smith", "", "").initial_needle(), "john q smith");
        assert_eq!(identity("Jane", "", "Doe", "", "").initial_needle(), "jane  doe");
        assert_eq!(identity("", "", "", "", "").initial_needle(), "");
    }

    #[test]
    fn test_padded_names_still_match_initial_rule() {
        let padded = identity("  John ", " Quincy", " Smith  ", "", "");
        assert_eq!(padded.initial_needle(), "john q smith");
        assert!("john q smith jr".contains(&padded.initial_needle()));
    }

    #[test]
    fn test_location_requires_city_and_state() {
        assert_eq!(identity("a", "", "b", "Houston", "TX").location(), "houston tx");
        assert_eq!(identity("a", "", "b", "Houston", "").location(), "");
        assert_eq!(identity("a", "", "b", "", "TX").location(), "");
    }

    #[test]
    fn test_candidate_location_trims_missing_parts() {
        assert_eq!(CandidateRecord::new("x", "", "TX", "").location(), "tx");
        assert_eq!(CandidateRecord::new("x", "Dallas", "", "").location(), "dallas");
        assert_eq!(CandidateRecord::new("x", "", "", "").location(), "");
    }

    #[test]
    fn test_outcome_encoding() {
        let hit = MatchOutcome::Match { url: "http://x/1".to_string() };
        assert_eq!(hit.likely_deceased(), "YES");
        assert_eq!(hit.url(), "http://x/1");
        assert_eq!(MatchOutcome::NoMatch.likely_deceased(), "NO");
        assert_eq!(MatchOutcome::NoMatch.url(), "");
    }
}
