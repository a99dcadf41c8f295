use crate::config::SearchSettings;
use crate::core::Matcher;
use crate::models::{MatchOutcome, QueryIdentity};
use crate::services::obituary::{ObituaryClient, SearchError};
use std::time::Duration;

/// Resolves one identity against the obituary index
///
/// Every failure is contained here: a lookup that cannot be completed
/// degrades to `MatchOutcome::NoMatch` and the caller moves on.
pub struct IdentityMatcher {
    client: ObituaryClient,
    matcher: Matcher,
    throttle: Duration,
}

impl IdentityMatcher {
    pub fn new(client: ObituaryClient, matcher: Matcher, throttle: Duration) -> Self {
        Self {
            client,
            matcher,
            throttle,
        }
    }

    pub fn from_settings(settings: &SearchSettings) -> Result<Self, SearchError> {
        Ok(Self::new(
            ObituaryClient::new(settings)?,
            Matcher::new(),
            settings.throttle(),
        ))
    }

    /// Look the identity up and decide whether it is likely deceased
    ///
    /// Pauses for the configured throttle after every call, including
    /// failed ones.
    pub async fn match_identity(&self, identity: &QueryIdentity) -> MatchOutcome {
        let outcome = self.lookup(identity).await;
        if !self.throttle.is_zero() {
            tokio::time::sleep(self.throttle).await;
        }
        outcome
    }

    async fn lookup(&self, identity: &QueryIdentity) -> MatchOutcome {
        let full_name = identity.full_name();
        if full_name.is_empty() {
            tracing::warn!("Skipping lookup for a row without any name");
            return MatchOutcome::NoMatch;
        }

        tracing::info!("Checking {} on {}", full_name, self.client.endpoint());

        let candidates = match self
            .client
            .search(&identity.first_name, &identity.last_name)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) if e.is_transport() => {
                tracing::error!("Error searching for {}: {}", full_name, e);
                return MatchOutcome::NoMatch;
            }
            Err(e) => {
                tracing::warn!("No usable results for {}: {}", full_name, e);
                return MatchOutcome::NoMatch;
            }
        };

        tracing::info!("Found {} results", candidates.len());

        let outcome = self.matcher.find_match(identity, &candidates);
        match &outcome {
            MatchOutcome::Match { url } => {
                tracing::info!("Possible match found for {} at {}", full_name, url)
            }
            MatchOutcome::NoMatch => tracing::info!("No likely match found for {}", full_name),
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn matcher_for(server: &mockito::ServerGuard) -> IdentityMatcher {
        let settings = SearchSettings {
            endpoint: format!("{}/obituaries/search", server.url()),
            throttle_ms: 0,
            ..Default::default()
        };
        IdentityMatcher::from_settings(&settings).unwrap()
    }

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

    #[tokio::test]
    async fn test_match_returns_evidence_url() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/obituaries/search")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(
                "<script><!--{\"obituaryList\":{\"obituaries\":[\
                 {\"name\":{\"fullName\":\"John Q Smith\"},\
                  \"location\":{\"city\":{\"fullName\":\"Houston\"},\"state\":{\"code\":\"TX\"}},\
                  \"links\":{\"obituaryUrl\":{\"href\":\"http://x/1\"}}}]}}--></script>",
            )
            .create_async()
            .await;

        let outcome = matcher_for(&server)
            .match_identity(&identity("John", "Quincy", "Smith", "Houston", "TX"))
            .await;

        assert_eq!(outcome, MatchOutcome::Match { url: "http://x/1".to_string() });
    }

    #[tokio::test]
    async fn test_server_error_degrades_to_no_match() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/obituaries/search")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let outcome = matcher_for(&server)
            .match_identity(&identity("Jane", "", "Doe", "", ""))
            .await;

        assert_eq!(outcome, MatchOutcome::NoMatch);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_degrades_to_no_match() {
        let settings = SearchSettings {
            endpoint: "http://127.0.0.1:9/obituaries/search".to_string(),
            timeout_secs: 2,
            throttle_ms: 0,
            ..Default::default()
        };
        let matcher = IdentityMatcher::from_settings(&settings).unwrap();

        let outcome = matcher.match_identity(&identity("Jane", "", "Doe", "", "")).await;

        assert_eq!(outcome, MatchOutcome::NoMatch);
    }

    #[tokio::test]
    async fn test_throttle_applies_after_failures() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/obituaries/search")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let settings = SearchSettings {
            endpoint: format!("{}/obituaries/search", server.url()),
            throttle_ms: 200,
            ..Default::default()
        };
        let matcher = IdentityMatcher::from_settings(&settings).unwrap();

        let started = Instant::now();
        let outcome = matcher.match_identity(&identity("Jane", "", "Doe", "", "")).await;
        assert_eq!(outcome, MatchOutcome::NoMatch);
        assert!(started.elapsed() >= Duration::from_millis(200));

        let started = Instant::now();
        let outcome = matcher.match_identity(&QueryIdentity::default()).await;
        assert_eq!(outcome, MatchOutcome::NoMatch);
        assert!(started.elapsed() >= Duration::from_millis(200));
    }

    #[tokio::test]
    async fn test_silent_endpoint_times_out_to_no_match() {
        // Accepted by the kernel backlog, never answered
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let settings = SearchSettings {
            endpoint: format!("http://{}/obituaries/search", listener.local_addr().unwrap()),
            timeout_secs: 1,
            throttle_ms: 0,
            ..Default::default()
        };
        let matcher = IdentityMatcher::from_settings(&settings).unwrap();

        let started = Instant::now();
        let outcome = matcher.match_identity(&identity("Jane", "", "Doe", "", "")).await;

        assert_eq!(outcome, MatchOutcome::NoMatch);
        assert!(started.elapsed() >= Duration::from_secs(1));
        assert!(started.elapsed() < Duration::from_secs(5));
        drop(listener);
    }

    #[tokio::test]
    async fn test_nameless_identity_is_not_sent_upstream() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/obituaries/search")
            .match_query(mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let outcome = matcher_for(&server)
            .match_identity(&QueryIdentity::default())
            .await;

        mock.assert_async().await;
        assert_eq!(outcome, MatchOutcome::NoMatch);
    }
}
