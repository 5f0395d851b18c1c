//! Vendor repository.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, JoinType, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use wedplan_common::{AppError, AppResult};

use crate::entities::vendor_selection::SelectionStatus;
use crate::entities::{
    RawReview, Vendor, VendorCategory, VendorSelection, VendorSyncFlag, raw_review, vendor,
    vendor_category, vendor_selection, vendor_sync_flag,
};

/// Repository for vendor directory operations.
#[derive(Clone)]
pub struct VendorRepository {
    db: Arc<DatabaseConnection>,
}

impl VendorRepository {
    /// Create a new vendor repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    // ==================== Category Operations ====================

    /// List all vendor categories.
    pub async fn list_categories(&self) -> AppResult<Vec<vendor_category::Model>> {
        VendorCategory::find()
            .order_by(vendor_category::Column::Id, Order::Asc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a category by slug.
    pub async fn find_category_by_slug(
        &self,
        slug: &str,
    ) -> AppResult<Option<vendor_category::Model>> {
        VendorCategory::find()
            .filter(vendor_category::Column::Slug.eq(slug))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ==================== Vendor Operations ====================

    /// Find vendor by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<vendor::Model>> {
        Vendor::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get vendor by ID, returning error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<vendor::Model> {
        self.find_by_id(id)
            .await?
            .ok_or(AppError::VendorNotFound(id))
    }

    /// List vendors, optionally filtered by category slug and/or region
    /// substring (matched against sido, sigungu and address).
    pub async fn list(
        &self,
        category_slug: Option<&str>,
        region: Option<&str>,
    ) -> AppResult<Vec<vendor::Model>> {
        let mut query = Vendor::find();

        if let Some(slug) = category_slug {
            query = query
                .join(JoinType::InnerJoin, vendor::Relation::Category.def())
                .filter(vendor_category::Column::Slug.eq(slug));
        }

        if let Some(region) = region {
            let pattern = format!("%{}%", region.replace('%', "\\%").replace('_', "\\_"));
            query = query.filter(
                Condition::any()
                    .add(vendor::Column::RegionSido.like(&pattern))
                    .add(vendor::Column::RegionSigungu.like(&pattern))
                    .add(vendor::Column::Address.like(&pattern)),
            );
        }

        query
            .order_by(vendor::Column::AvgRating, Order::Desc)
            .order_by(vendor::Column::Id, Order::Asc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a vendor by its Google place id.
    pub async fn find_by_google_place_id(
        &self,
        place_id: &str,
    ) -> AppResult<Option<vendor::Model>> {
        Vendor::find()
            .filter(vendor::Column::GooglePlaceId.eq(place_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a vendor by exact name within a category.
    pub async fn find_by_name_in_category(
        &self,
        category_id: i64,
        name: &str,
    ) -> AppResult<Option<vendor::Model>> {
        Vendor::find()
            .filter(vendor::Column::CategoryId.eq(category_id))
            .filter(vendor::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new vendor.
    pub async fn create(&self, model: vendor::ActiveModel) -> AppResult<vendor::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Refresh a vendor's rating fields from an external sync.
    pub async fn update_rating(
        &self,
        vendor: vendor::Model,
        avg_rating: f64,
        review_count: i32,
    ) -> AppResult<vendor::Model> {
        let mut active: vendor::ActiveModel = vendor.into();
        active.avg_rating = Set(avg_rating);
        active.review_count = Set(review_count);

        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ==================== Selection Operations ====================

    /// Find a profile's selection for one vendor.
    pub async fn find_selection(
        &self,
        profile_id: i64,
        vendor_id: i64,
    ) -> AppResult<Option<vendor_selection::Model>> {
        VendorSelection::find()
            .filter(vendor_selection::Column::ProfileId.eq(profile_id))
            .filter(vendor_selection::Column::VendorId.eq(vendor_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or overwrite a selection for `(profile, vendor)`.
    pub async fn upsert_selection(
        &self,
        profile_id: i64,
        vendor_id: i64,
        status: SelectionStatus,
    ) -> AppResult<vendor_selection::Model> {
        if let Some(existing) = self.find_selection(profile_id, vendor_id).await? {
            let mut active: vendor_selection::ActiveModel = existing.into();
            active.status = Set(status);
            active.updated_at = Set(Some(Utc::now().into()));

            return active
                .update(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()));
        }

        let model = vendor_selection::ActiveModel {
            profile_id: Set(profile_id),
            vendor_id: Set(vendor_id),
            status: Set(status),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List a profile's selections, optionally restricted to one status,
    /// joined with the selected vendor.
    pub async fn find_selections_by_profile(
        &self,
        profile_id: i64,
        status: Option<SelectionStatus>,
    ) -> AppResult<Vec<(vendor_selection::Model, Option<vendor::Model>)>> {
        let mut query = VendorSelection::find()
            .filter(vendor_selection::Column::ProfileId.eq(profile_id));

        if let Some(status) = status {
            query = query.filter(vendor_selection::Column::Status.eq(status));
        }

        query
            .find_also_related(Vendor)
            .order_by(vendor_selection::Column::CreatedAt, Order::Desc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Whether a profile has a final selection in a category.
    pub async fn has_final_selection(&self, profile_id: i64, slug: &str) -> AppResult<bool> {
        let count = VendorSelection::find()
            .filter(vendor_selection::Column::ProfileId.eq(profile_id))
            .filter(vendor_selection::Column::Status.eq(SelectionStatus::Final))
            .join(JoinType::InnerJoin, vendor_selection::Relation::Vendor.def())
            .join(JoinType::InnerJoin, vendor::Relation::Category.def())
            .filter(vendor_category::Column::Slug.eq(slug))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count > 0)
    }

    // ==================== Sync Flag Operations ====================

    /// Find the sync flag for a `(category_slug, region)` pair.
    pub async fn find_sync_flag(
        &self,
        category_slug: &str,
        region: &str,
    ) -> AppResult<Option<vendor_sync_flag::Model>> {
        VendorSyncFlag::find()
            .filter(vendor_sync_flag::Column::CategorySlug.eq(category_slug))
            .filter(vendor_sync_flag::Column::Region.eq(region))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Stamp the sync flag for a pair with a sync time.
    pub async fn upsert_sync_flag(
        &self,
        category_slug: &str,
        region: &str,
        synced_at: DateTime<Utc>,
    ) -> AppResult<vendor_sync_flag::Model> {
        if let Some(existing) = self.find_sync_flag(category_slug, region).await? {
            let mut active: vendor_sync_flag::ActiveModel = existing.into();
            active.synced_at = Set(synced_at.into());

            return active
                .update(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()));
        }

        let model = vendor_sync_flag::ActiveModel {
            category_slug: Set(category_slug.to_string()),
            region: Set(region.to_string()),
            synced_at: Set(synced_at.into()),
            ..Default::default()
        };

        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ==================== Review Operations ====================

    /// Store crawled review snippets for a vendor.
    pub async fn insert_reviews(&self, models: Vec<raw_review::ActiveModel>) -> AppResult<()> {
        if models.is_empty() {
            return Ok(());
        }

        RawReview::insert_many(models)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    /// Recent raw reviews for a vendor.
    pub async fn find_reviews(
        &self,
        vendor_id: i64,
        limit: u64,
    ) -> AppResult<Vec<raw_review::Model>> {
        RawReview::find()
            .filter(raw_review::Column::VendorId.eq(vendor_id))
            .order_by(raw_review::Column::CrawledAt, Order::Desc)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_vendor(id: i64, category_id: i64, name: &str) -> vendor::Model {
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

    #[tokio::test]
    async fn test_find_by_google_place_id() {
        let vendor = create_test_vendor(1, 1, "더채플앳청담");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[vendor]])
                .into_connection(),
        );

        let repo = VendorRepository::new(db);
        let result = repo.find_by_google_place_id("place-1").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().name, "더채플앳청담");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<vendor::Model>::new()])
                .into_connection(),
        );

        let repo = VendorRepository::new(db);
        let result = repo.get_by_id(5).await;

        assert!(matches!(result, Err(AppError::VendorNotFound(5))));
    }

    #[tokio::test]
    async fn test_upsert_selection_inserts_when_absent() {
        let selection = vendor_selection::Model {
            id: 1,
            profile_id: 1,
            vendor_id: 2,
            status: SelectionStatus::Candidate,
            created_at: Utc::now().into(),
            updated_at: None,
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // find_selection miss
                .append_query_results([Vec::<vendor_selection::Model>::new()])
                .append_exec_results([MockExecResult {
                    last_insert_id: 1,
                    rows_affected: 1,
                }])
                // row returned after insert
                .append_query_results([[selection]])
                .into_connection(),
        );

        let repo = VendorRepository::new(db);
        let result = repo
            .upsert_selection(1, 2, SelectionStatus::Candidate)
            .await
            .unwrap();

        assert_eq!(result.status, SelectionStatus::Candidate);
    }

    #[tokio::test]
    async fn test_upsert_selection_overwrites_status() {
        let existing = vendor_selection::Model {
            id: 1,
            profile_id: 1,
            vendor_id: 2,
            status: SelectionStatus::Candidate,
            created_at: Utc::now().into(),
            updated_at: None,
        };
        let updated = vendor_selection::Model {
            status: SelectionStatus::Final,
            updated_at: Some(Utc::now().into()),
            ..existing.clone()
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 1,
                    rows_affected: 1,
                }])
                .append_query_results([[updated]])
                .into_connection(),
        );

        let repo = VendorRepository::new(db);
        let result = repo
            .upsert_selection(1, 2, SelectionStatus::Final)
            .await
            .unwrap();

        assert_eq!(result.status, SelectionStatus::Final);
    }

    #[tokio::test]
    async fn test_has_final_selection_false_when_none() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(0))
                }]])
                .into_connection(),
        );

        let repo = VendorRepository::new(db);
        assert!(!repo.has_final_selection(1, "venue").await.unwrap());
    }
}
