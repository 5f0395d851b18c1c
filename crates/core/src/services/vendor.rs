//! Vendor directory service.
//!
//! DB-backed listing with category/region filters, per-profile selection
//! state, and the best-effort external place-search sync guarded by a
//! 24-hour flag per `(category, region)` pair.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use sea_orm::Set;
use tracing::{debug, info, warn};
use wedplan_common::{AppResult, PlaceResult, PlaceSearchProvider};
use wedplan_db::entities::vendor_selection::SelectionStatus;
use wedplan_db::entities::{raw_review, vendor, vendor_category, vendor_selection};
use wedplan_db::repositories::VendorRepository;

/// Category slugs surfaced on the dashboard status card.
const STATUS_SLUGS: [&str; 4] = ["venue", "studio", "dress", "makeup"];

/// Vendor detail: the vendor, the caller's selection state and recent
/// crawled reviews.
#[derive(Debug, Clone)]
pub struct VendorDetail {
    pub vendor: vendor::Model,
    pub selection: Option<vendor_selection::Model>,
    pub reviews: Vec<raw_review::Model>,
}

/// Final-selection status per dashboard category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct VendorSelectionStatus {
    pub venue: bool,
    pub studio: bool,
    pub dress: bool,
    pub makeup: bool,
}

/// Vendor service for directory business logic.
#[derive(Clone)]
pub struct VendorService {
    vendor_repo: VendorRepository,
    providers: Vec<Arc<dyn PlaceSearchProvider>>,
    sync_ttl: Duration,
}

impl VendorService {
    /// Create a new vendor service.
    ///
    /// `providers` are tried in order during sync; an empty list disables
    /// syncing entirely (DB-only listing).
    #[must_use]
    pub fn new(
        vendor_repo: VendorRepository,
        providers: Vec<Arc<dyn PlaceSearchProvider>>,
        sync_ttl_hours: i64,
    ) -> Self {
        Self {
            vendor_repo,
            providers,
            sync_ttl: Duration::hours(sync_ttl_hours),
        }
    }

    /// List all vendor categories.
    pub async fn categories(&self) -> AppResult<Vec<vendor_category::Model>> {
        self.vendor_repo.list_categories().await
    }

    /// List vendors filtered by category slug and/or region substring.
    ///
    /// When both filters are present the external provider sync runs first
    /// (subject to the TTL flag); its failure never breaks the listing,
    /// which always falls through to the database.
    pub async fn list(
        &self,
        category_slug: Option<&str>,
        region: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<vendor::Model>> {
        if let (Some(slug), Some(region)) = (category_slug, region) {
            if let Err(e) = self.sync_if_stale(slug, region, now).await {
                // Sync is an enrichment, not a dependency of the listing.
                warn!(error = %e, slug, region, "Vendor sync failed, serving DB results");
            }
        }

        self.vendor_repo.list(category_slug, region).await
    }

    /// Vendor detail with the caller's selection state and recent reviews.
    pub async fn detail(
        &self,
        vendor_id: i64,
        profile_id: Option<i64>,
    ) -> AppResult<VendorDetail> {
        let vendor = self.vendor_repo.get_by_id(vendor_id).await?;

        let selection = match profile_id {
            Some(profile_id) => self.vendor_repo.find_selection(profile_id, vendor_id).await?,
            None => None,
        };

        let reviews = self.vendor_repo.find_reviews(vendor_id, 5).await?;

        Ok(VendorDetail {
            vendor,
            selection,
            reviews,
        })
    }

    /// Shortlist or finalize a vendor for a profile.
    ///
    /// Upserts on `(profile, vendor)`: selecting again overwrites the
    /// status, so exactly one row ever exists per pair.
    pub async fn select(
        &self,
        profile_id: i64,
        vendor_id: i64,
        status: SelectionStatus,
    ) -> AppResult<vendor_selection::Model> {
        // Ensure the vendor exists before recording a selection for it.
        self.vendor_repo.get_by_id(vendor_id).await?;
        self.vendor_repo
            .upsert_selection(profile_id, vendor_id, status)
            .await
    }

    /// A profile's final selections joined with their vendors.
    pub async fn final_selections(
        &self,
        profile_id: i64,
    ) -> AppResult<Vec<(vendor_selection::Model, Option<vendor::Model>)>> {
        self.vendor_repo
            .find_selections_by_profile(profile_id, Some(SelectionStatus::Final))
            .await
    }

    /// Dashboard status card: is a final vendor chosen per category?
    pub async fn selection_status(&self, profile_id: i64) -> AppResult<VendorSelectionStatus> {
        let mut flags = [false; 4];
        for (flag, slug) in flags.iter_mut().zip(STATUS_SLUGS) {
            *flag = self.vendor_repo.has_final_selection(profile_id, slug).await?;
        }

        Ok(VendorSelectionStatus {
            venue: flags[0],
            studio: flags[1],
            dress: flags[2],
            makeup: flags[3],
        })
    }

    /// Run the external sync for a `(category, region)` pair unless the
    /// flag says it happened within the TTL window.
    ///
    /// The flag is best-effort: two concurrent requests may both find it
    /// stale and sync twice, which the place-id upsert makes idempotent.
    async fn sync_if_stale(
        &self,
        category_slug: &str,
        region: &str,
        now: DateTime<Utc>,
    ) -> AppResult<usize> {
        if self.providers.is_empty() {
            return Ok(0);
        }

        let Some(category) = self.vendor_repo.find_category_by_slug(category_slug).await? else {
            debug!(slug = category_slug, "Unknown category, skipping sync");
            return Ok(0);
        };

        if let Some(flag) = self.vendor_repo.find_sync_flag(category_slug, region).await? {
            let synced_at: DateTime<Utc> = flag.synced_at.into();
            if now - synced_at < self.sync_ttl {
                debug!(slug = category_slug, region, "Sync flag fresh, skipping provider call");
                return Ok(0);
            }
        }

        let query = format!("{region} {}", category.name);
        let mut results: Vec<PlaceResult> = Vec::new();
        let mut provider_used: Option<&Arc<dyn PlaceSearchProvider>> = None;
        for provider in &self.providers {
            results = provider.search(&query).await;
            if !results.is_empty() {
                provider_used = Some(provider);
                break;
            }
        }

        let mut synced = 0;
        for place in &results {
            if self.upsert_place(&category, place, provider_used, now).await? {
                synced += 1;
            }
        }

        // Stamp the flag even for an empty result set so an unproductive
        // query is not repeated every request within the window.
        self.vendor_repo
            .upsert_sync_flag(category_slug, region, now)
            .await?;

        info!(
            slug = category_slug,
            region,
            results = results.len(),
            inserted = synced,
            "Synced vendors from place-search provider"
        );

        Ok(synced)
    }

    /// Upsert one place result. Returns `true` when a new vendor row was
    /// inserted.
    async fn upsert_place(
        &self,
        category: &vendor_category::Model,
        place: &PlaceResult,
        provider: Option<&Arc<dyn PlaceSearchProvider>>,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        let existing = match place.place_id.as_deref() {
            Some(place_id) => self.vendor_repo.find_by_google_place_id(place_id).await?,
            // Providers without a stable place id fall back to name
            // identity within the category.
            None => {
                self.vendor_repo
                    .find_by_name_in_category(category.id, &place.name)
                    .await?
            }
        };

        if let Some(vendor) = existing {
            let rating = place.rating.unwrap_or(vendor.avg_rating);
            let review_count = place
                .review_count
                .map_or(vendor.review_count, |c| c as i32);

            if (vendor.avg_rating - rating).abs() > f64::EPSILON
                || vendor.review_count != review_count
            {
                self.vendor_repo
                    .update_rating(vendor, rating, review_count)
                    .await?;
            }
            return Ok(false);
        }

        let (region_sido, region_sigungu) = split_region(&place.address);
        let created = self
            .vendor_repo
            .create(vendor::ActiveModel {
                name: Set(place.name.clone()),
                category_id: Set(category.id),
                region_sido: Set(region_sido),
                region_sigungu: Set(region_sigungu),
                address: Set(place.address.clone()),
                google_place_id: Set(place.place_id.clone()),
                avg_rating: Set(place.rating.unwrap_or(0.0)),
                review_count: Set(place.review_count.unwrap_or(0) as i32),
                ..Default::default()
            })
            .await?;

        // Review snippets are only reachable through a place id.
        if let (Some(provider), Some(place_id)) = (provider, place.place_id.as_deref()) {
            let reviews = provider.reviews(place_id).await;
            let models: Vec<raw_review::ActiveModel> = reviews
                .into_iter()
                .map(|r| raw_review::ActiveModel {
                    vendor_id: Set(created.id),
                    source: Set(provider.name().to_string()),
                    author_name: Set(r.author_name),
                    content: Set(r.content),
                    rating: Set(r.rating),
                    written_at: Set(r.written_at),
                    crawled_at: Set(now.into()),
                    ..Default::default()
                })
                .collect();
            self.vendor_repo.insert_reviews(models).await?;
        }

        Ok(true)
    }
}

/// Split a formatted Korean address into (sido, sigungu) best-effort:
/// "서울특별시 강남구 ..." -> ("서울특별시", "강남구").
fn split_region(address: &str) -> (String, String) {
    let mut parts = address.split_whitespace();
    let sido = parts.next().unwrap_or_default().to_string();
    let sigungu = parts.next().unwrap_or_default().to_string();
    (sido, sigungu)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    struct CountingProvider {
        calls: AtomicUsize,
        results: Vec<PlaceResult>,
    }

    impl CountingProvider {
        fn new(results: Vec<PlaceResult>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                results,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PlaceSearchProvider for CountingProvider {
        fn name(&self) -> &'static str {
            "google"
        }

        async fn search(&self, _query: &str) -> Vec<PlaceResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.results.clone()
        }
    }

    fn test_category(id: i64, slug: &str, name: &str) -> vendor_category::Model {
        vendor_category::Model {
            id,
            name: name.to_string(),
            slug: slug.to_string(),
        }
    }

    fn test_flag(slug: &str, region: &str, synced_at: DateTime<Utc>) -> wedplan_db::entities::vendor_sync_flag::Model {
        wedplan_db::entities::vendor_sync_flag::Model {
            id: 1,
            category_slug: slug.to_string(),
            region: region.to_string(),
            synced_at: synced_at.into(),
        }
    }

    fn test_vendor(id: i64, category_id: i64, name: &str) -> vendor::Model {
        vendor::Model {
            id,
            name: name.to_string(),
            category_id,
            region_sido: "서울특별시".to_string(),
            region_sigungu: "강남구".to_string(),
            address: String::new(),
            image_url: None,
            naver_place_id: None,
            google_place_id: Some(format!("place-{id}")),
            avg_rating: 4.5,
            review_count: 10,
            summary_positive: String::new(),
            summary_negative: String::new(),
        }
    }

    #[test]
    fn test_split_region() {
        assert_eq!(
            split_region("서울특별시 강남구 테헤란로 1"),
            ("서울특별시".to_string(), "강남구".to_string())
        );
        assert_eq!(split_region(""), (String::new(), String::new()));
    }

    #[tokio::test]
    async fn test_fresh_flag_skips_provider_call() {
        let now = Utc::now();
        let provider = CountingProvider::new(vec![]);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // category lookup
                .append_query_results([[test_category(1, "venue", "예식장")]])
                // flag lookup: synced one hour ago, well within 24h
                .append_query_results([[test_flag("venue", "강남구", now - Duration::hours(1))]])
                // final DB listing
                .append_query_results([[test_vendor(1, 1, "더채플앳청담")]])
                .into_connection(),
        );

        let service = VendorService::new(
            VendorRepository::new(db),
            vec![provider.clone() as Arc<dyn PlaceSearchProvider>],
            24,
        );

        let vendors = service
            .list(Some("venue"), Some("강남구"), now)
            .await
            .unwrap();

        assert_eq!(vendors.len(), 1);
        assert_eq!(provider.calls(), 0, "fresh flag must suppress the provider call");
    }

    #[tokio::test]
    async fn test_stale_flag_triggers_one_provider_call() {
        let now = Utc::now();
        let provider = CountingProvider::new(vec![]);

        let old_flag = test_flag("venue", "강남구", now - Duration::hours(25));
        let new_flag = test_flag("venue", "강남구", now);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_category(1, "venue", "예식장")]])
                // stale flag
                .append_query_results([[old_flag.clone()]])
                // upsert_sync_flag: find then update
                .append_query_results([[old_flag]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 1,
                    rows_affected: 1,
                }])
                .append_query_results([[new_flag]])
                // final DB listing
                .append_query_results([Vec::<vendor::Model>::new()])
                .into_connection(),
        );

        let service = VendorService::new(
            VendorRepository::new(db),
            vec![provider.clone() as Arc<dyn PlaceSearchProvider>],
            24,
        );

        service
            .list(Some("venue"), Some("강남구"), now)
            .await
            .unwrap();

        assert_eq!(provider.calls(), 1, "stale flag must trigger exactly one call");
    }

    #[tokio::test]
    async fn test_sync_inserts_new_vendor_from_place_result() {
        let now = Utc::now();
        let place = PlaceResult {
            name: "더채플앳청담".to_string(),
            address: "서울특별시 강남구 도산대로 1".to_string(),
            rating: Some(4.5),
            review_count: Some(120),
            place_id: Some("place-1".to_string()),
        };
        let provider = CountingProvider::new(vec![place]);

        let created = test_vendor(1, 1, "더채플앳청담");
        let flag = test_flag("venue", "강남구", now);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_category(1, "venue", "예식장")]])
                // no flag yet
                .append_query_results([Vec::<wedplan_db::entities::vendor_sync_flag::Model>::new()])
                // place-id lookup misses
                .append_query_results([Vec::<vendor::Model>::new()])
                // insert vendor
                .append_exec_results([MockExecResult {
                    last_insert_id: 1,
                    rows_affected: 1,
                }])
                .append_query_results([[created.clone()]])
                // upsert_sync_flag: find miss then insert
                .append_query_results([Vec::<wedplan_db::entities::vendor_sync_flag::Model>::new()])
                .append_exec_results([MockExecResult {
                    last_insert_id: 1,
                    rows_affected: 1,
                }])
                .append_query_results([[flag]])
                // final DB listing
                .append_query_results([[created]])
                .into_connection(),
        );

        let service = VendorService::new(
            VendorRepository::new(db),
            vec![provider.clone() as Arc<dyn PlaceSearchProvider>],
            24,
        );

        let vendors = service
            .list(Some("venue"), Some("강남구"), now)
            .await
            .unwrap();

        assert_eq!(provider.calls(), 1);
        assert_eq!(vendors.len(), 1);
    }

    #[tokio::test]
    async fn test_list_without_both_filters_never_syncs() {
        let provider = CountingProvider::new(vec![]);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<vendor::Model>::new()])
                .into_connection(),
        );

        let service = VendorService::new(
            VendorRepository::new(db),
            vec![provider.clone() as Arc<dyn PlaceSearchProvider>],
            24,
        );

        service.list(Some("venue"), None, Utc::now()).await.unwrap();

        assert_eq!(provider.calls(), 0);
    }
}
