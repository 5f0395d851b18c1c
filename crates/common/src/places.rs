//! Place-search provider clients.
//!
//! The vendor directory can enrich itself from external place-search APIs.
//! Two backends are supported: Naver local search and Google Places text
//! search. Both are strictly best-effort: missing credentials, network
//! failures, timeouts and non-2xx responses all degrade to an empty result
//! set so that DB-only vendor listing keeps working.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

/// A single place returned by a search provider.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceResult {
    /// Display name of the place.
    pub name: String,
    /// Formatted address.
    pub address: String,
    /// Average rating, when the provider reports one.
    pub rating: Option<f64>,
    /// Number of ratings/reviews, when the provider reports one.
    pub review_count: Option<i64>,
    /// Stable provider place id. Google reports one; Naver does not.
    pub place_id: Option<String>,
}

/// A review snippet returned by a place-details lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceReview {
    /// Reviewer display name.
    pub author_name: String,
    /// Review text.
    pub content: String,
    /// Star rating given by the reviewer.
    pub rating: Option<f64>,
    /// Date the review was written.
    pub written_at: Option<NaiveDate>,
}

/// Place-search client configuration.
#[derive(Debug, Clone)]
pub struct PlaceSearchConfig {
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum number of results to request per query.
    pub max_results: u32,
}

impl Default for PlaceSearchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            max_results: 5,
        }
    }
}

/// A place-search backend.
///
/// Implementations must never fail loudly: any error is logged and mapped
/// to an empty result list.
#[async_trait]
pub trait PlaceSearchProvider: Send + Sync {
    /// Short provider name used as the review source label.
    fn name(&self) -> &'static str;

    /// Search places matching a free-text query.
    async fn search(&self, query: &str) -> Vec<PlaceResult>;

    /// Fetch review snippets for a place id. Default: none.
    async fn reviews(&self, _place_id: &str) -> Vec<PlaceReview> {
        Vec::new()
    }
}

fn build_client(user_agent: &str, timeout_secs: u64) -> Option<Client> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .ok()
}

// ==================== Google Places ====================

/// Google Places text-search client.
#[derive(Clone)]
pub struct GooglePlacesClient {
    api_key: String,
    config: PlaceSearchConfig,
}

#[derive(Debug, Deserialize)]
struct GoogleSearchResponse {
    #[serde(default)]
    results: Vec<GooglePlace>,
}

#[derive(Debug, Deserialize)]
struct GooglePlace {
    name: String,
    #[serde(default)]
    formatted_address: String,
    rating: Option<f64>,
    user_ratings_total: Option<i64>,
    place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleDetailsResponse {
    result: Option<GoogleDetails>,
}

#[derive(Debug, Deserialize)]
struct GoogleDetails {
    #[serde(default)]
    reviews: Vec<GoogleReview>,
}

#[derive(Debug, Deserialize)]
struct GoogleReview {
    #[serde(default)]
    author_name: String,
    #[serde(default)]
    text: String,
    rating: Option<f64>,
    /// Unix timestamp of the review.
    time: Option<i64>,
}

impl GooglePlacesClient {
    /// Create a new client. Returns `None` when no API key is configured.
    #[must_use]
    pub fn new(api_key: Option<String>, config: PlaceSearchConfig) -> Option<Self> {
        let api_key = api_key?;
        if api_key.is_empty() {
            return None;
        }
        Some(Self { api_key, config })
    }
}

#[async_trait]
impl PlaceSearchProvider for GooglePlacesClient {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn search(&self, query: &str) -> Vec<PlaceResult> {
        let Some(client) = build_client("wedplan/1.0 (PlaceSearch)", self.config.timeout_secs)
        else {
            return Vec::new();
        };

        let response = client
            .get("https://maps.googleapis.com/maps/api/place/textsearch/json")
            .query(&[("query", query), ("key", &self.api_key), ("language", "ko")])
            .send()
            .await;

        let response = match response {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                warn!(status = %r.status(), "Google place search returned non-success status");
                return Vec::new();
            }
            Err(e) => {
                warn!(error = %e, "Google place search failed");
                return Vec::new();
            }
        };

        let body: GoogleSearchResponse = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                warn!(error = %e, "Failed to decode Google place search response");
                return Vec::new();
            }
        };

        body.results
            .into_iter()
            .take(self.config.max_results as usize)
            .map(|p| PlaceResult {
                name: p.name,
                address: p.formatted_address,
                rating: p.rating,
                review_count: p.user_ratings_total,
                place_id: p.place_id,
            })
            .collect()
    }

    async fn reviews(&self, place_id: &str) -> Vec<PlaceReview> {
        let Some(client) = build_client("wedplan/1.0 (PlaceSearch)", self.config.timeout_secs)
        else {
            return Vec::new();
        };

        let response = client
            .get("https://maps.googleapis.com/maps/api/place/details/json")
            .query(&[
                ("place_id", place_id),
                ("key", &self.api_key),
                ("language", "ko"),
                ("fields", "name,rating,user_ratings_total,reviews"),
            ])
            .send()
            .await;

        let body: GoogleDetailsResponse = match response {
            Ok(r) if r.status().is_success() => match r.json().await {
                Ok(b) => b,
                Err(e) => {
                    warn!(error = %e, "Failed to decode Google place details response");
                    return Vec::new();
                }
            },
            Ok(r) => {
                warn!(status = %r.status(), "Google place details returned non-success status");
                return Vec::new();
            }
            Err(e) => {
                warn!(error = %e, "Google place details failed");
                return Vec::new();
            }
        };

        body.result
            .map(|d| d.reviews)
            .unwrap_or_default()
            .into_iter()
            .map(|r| PlaceReview {
                author_name: r.author_name,
                content: r.text,
                rating: r.rating,
                written_at: r
                    .time
                    .and_then(|t| chrono::DateTime::from_timestamp(t, 0))
                    .map(|dt| dt.date_naive()),
            })
            .collect()
    }
}

// ==================== Naver Local Search ====================

/// Naver local-search client.
#[derive(Clone)]
pub struct NaverLocalClient {
    client_id: String,
    client_secret: String,
    config: PlaceSearchConfig,
}

#[derive(Debug, Deserialize)]
struct NaverSearchResponse {
    #[serde(default)]
    items: Vec<NaverPlace>,
}

#[derive(Debug, Deserialize)]
struct NaverPlace {
    /// Title with embedded `<b>` highlight tags.
    title: String,
    #[serde(default)]
    address: String,
    #[serde(default, rename = "roadAddress")]
    road_address: String,
}

impl NaverLocalClient {
    /// Create a new client. Returns `None` when credentials are missing.
    #[must_use]
    pub fn new(
        client_id: Option<String>,
        client_secret: Option<String>,
        config: PlaceSearchConfig,
    ) -> Option<Self> {
        let client_id = client_id?;
        let client_secret = client_secret?;
        if client_id.is_empty() || client_secret.is_empty() {
            return None;
        }
        Some(Self {
            client_id,
            client_secret,
            config,
        })
    }
}

#[async_trait]
impl PlaceSearchProvider for NaverLocalClient {
    fn name(&self) -> &'static str {
        "naver"
    }

    async fn search(&self, query: &str) -> Vec<PlaceResult> {
        let Some(client) = build_client("wedplan/1.0 (PlaceSearch)", self.config.timeout_secs)
        else {
            return Vec::new();
        };

        let display = self.config.max_results.to_string();
        let response = client
            .get("https://openapi.naver.com/v1/search/local.json")
            .header("X-Naver-Client-Id", &self.client_id)
            .header("X-Naver-Client-Secret", &self.client_secret)
            .query(&[("query", query), ("display", &display), ("sort", "random")])
            .send()
            .await;

        let body: NaverSearchResponse = match response {
            Ok(r) if r.status().is_success() => match r.json().await {
                Ok(b) => b,
                Err(e) => {
                    warn!(error = %e, "Failed to decode Naver local search response");
                    return Vec::new();
                }
            },
            Ok(r) => {
                warn!(status = %r.status(), "Naver local search returned non-success status");
                return Vec::new();
            }
            Err(e) => {
                warn!(error = %e, "Naver local search failed");
                return Vec::new();
            }
        };

        body.items
            .into_iter()
            .map(|p| {
                let address = if p.road_address.is_empty() {
                    p.address
                } else {
                    p.road_address
                };
                PlaceResult {
                    name: strip_highlight_tags(&p.title),
                    address,
                    // Naver local search carries neither ratings nor a
                    // stable place id.
                    rating: None,
                    review_count: None,
                    place_id: None,
                }
            })
            .collect()
    }
}

/// Remove the `<b>`/`</b>` highlight tags Naver embeds in result titles.
fn strip_highlight_tags(s: &str) -> String {
    s.replace("<b>", "").replace("</b>", "")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_highlight_tags() {
        assert_eq!(strip_highlight_tags("<b>더채플</b>앳청담"), "더채플앳청담");
        assert_eq!(strip_highlight_tags("plain"), "plain");
    }

    #[test]
    fn test_google_client_requires_key() {
        assert!(GooglePlacesClient::new(None, PlaceSearchConfig::default()).is_none());
        assert!(
            GooglePlacesClient::new(Some(String::new()), PlaceSearchConfig::default()).is_none()
        );
        assert!(
            GooglePlacesClient::new(Some("key".to_string()), PlaceSearchConfig::default())
                .is_some()
        );
    }

    #[test]
    fn test_naver_client_requires_both_credentials() {
        let cfg = PlaceSearchConfig::default();
        assert!(NaverLocalClient::new(None, None, cfg.clone()).is_none());
        assert!(NaverLocalClient::new(Some("id".to_string()), None, cfg.clone()).is_none());
        assert!(
            NaverLocalClient::new(Some("id".to_string()), Some("secret".to_string()), cfg)
                .is_some()
        );
    }

    #[test]
    fn test_google_search_response_decoding() {
        let json = r#"{
            "results": [
                {
                    "name": "The Chapel",
                    "formatted_address": "Seoul Gangnam-gu",
                    "rating": 4.5,
                    "user_ratings_total": 120,
                    "place_id": "ChIJabc123"
                }
            ]
        }"#;
        let parsed: GoogleSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0].place_id.as_deref(), Some("ChIJabc123"));
        assert_eq!(parsed.results[0].user_ratings_total, Some(120));
    }

    #[test]
    fn test_naver_search_response_decoding_prefers_road_address() {
        let json = r#"{
            "items": [
                {"title": "<b>가을</b>스튜디오", "address": "old addr", "roadAddress": "new addr"}
            ]
        }"#;
        let parsed: NaverSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].road_address, "new addr");
    }
}
