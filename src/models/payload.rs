use serde::Deserialize;
use crate::models::domain::CandidateRecord;

/// JSON document embedded in the search results page.
///
/// The index omits or nulls sub-objects freely, so every level defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    #[serde(rename = "obituaryList", default)]
    pub obituary_list: Option<ObituaryList>,
}

impl SearchPage {
    pub fn into_candidates(self) -> Vec<CandidateRecord> {
        self.obituary_list
            .and_then(|list| list.obituaries)
            .unwrap_or_default()
            .into_iter()
            .map(CandidateRecord::from)
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObituaryList {
    #[serde(default)]
    pub obituaries: Option<Vec<ObituaryEntry>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObituaryEntry {
    #[serde(default)]
    pub name: Option<EntryName>,
    #[serde(default)]
    pub location: Option<EntryLocation>,
    #[serde(default)]
    pub links: Option<EntryLinks>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryName {
    #[serde(rename = "fullName", default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryLocation {
    #[serde(default)]
    pub city: Option<EntryCity>,
    #[serde(default)]
    pub state: Option<EntryState>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryCity {
    #[serde(rename = "fullName", default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryState {
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryLinks {
    #[serde(rename = "obituaryUrl", default)]
    pub obituary_url: Option<EntryHref>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryHref {
    #[serde(default)]
    pub href: Option<String>,
}

impl From<ObituaryEntry> for CandidateRecord {
    fn from(entry: ObituaryEntry) -> Self {
        let full_name = entry.name.and_then(|n| n.full_name).unwrap_or_default();
        let (city, state) = match entry.location {
            Some(location) => (
                location.city.and_then(|c| c.full_name).unwrap_or_default(),
                location.state.and_then(|s| s.code).unwrap_or_default(),
            ),
            None => (String::new(), String::new()),
        };
        let obituary_url = entry
            .links
            .and_then(|l| l.obituary_url)
            .and_then(|u| u.href)
            .unwrap_or_default();

        CandidateRecord {
            full_name,
            city,
            state,
            obituary_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_entry_converts() {
        let page: SearchPage = serde_json::from_str(
            r#"{"obituaryList":{"obituaries":[{
                "name":{"fullName":"John Q Smith"},
                "location":{"city":{"fullName":"Houston"},"state":{"code":"TX"}},
                "links":{"obituaryUrl":{"href":"http://x/1"}}
            }]}}"#,
        )
        .unwrap();

        let candidates = page.into_candidates();
        assert_eq!(candidates, vec![CandidateRecord::new("John Q Smith", "Houston", "TX", "http://x/1")]);
    }

    #[test]
    fn test_missing_and_null_fields_default_to_empty() {
        let page: SearchPage = serde_json::from_str(
            r#"{"obituaryList":{"obituaries":[
                {"name":{"fullName":"Jane Doe"},"location":{"city":null}},
                {}
            ]}}"#,
        )
        .unwrap();

        let candidates = page.into_candidates();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0], CandidateRecord::new("Jane Doe", "", "", ""));
        assert_eq!(candidates[1], CandidateRecord::default());
    }

    #[test]
    fn test_absent_list_yields_no_candidates() {
        let page: SearchPage = serde_json::from_str(r#"{"somethingElse":1}"#).unwrap();
        assert!(page.into_candidates().is_empty());

        let page: SearchPage = serde_json::from_str(r#"{"obituaryList":{}}"#).unwrap();
        assert!(page.into_candidates().is_empty());
    }
}
