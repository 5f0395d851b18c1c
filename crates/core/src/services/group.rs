//! Wedding group service.
//!
//! Onboarding (create a group, seed its checklist), joining by invite code
//! and wedding-date maintenance.

use chrono::{NaiveDate, Utc};
use sea_orm::Set;
use tracing::{debug, info, warn};
use wedplan_common::{AppError, AppResult, InviteCodeGenerator};
use wedplan_db::entities::{wedding_group, wedding_profile};
use wedplan_db::repositories::{GroupRepository, ProfileRepository};

use crate::services::schedule::ScheduleService;

/// How many invite codes to try before giving up on a collision streak.
const INVITE_CODE_ATTEMPTS: u32 = 5;

/// Group service for onboarding and membership logic.
#[derive(Clone)]
pub struct GroupService {
    group_repo: GroupRepository,
    profile_repo: ProfileRepository,
    schedule_service: ScheduleService,
    invite_codes: InviteCodeGenerator,
}

impl GroupService {
    /// Create a new group service.
    #[must_use]
    pub fn new(
        group_repo: GroupRepository,
        profile_repo: ProfileRepository,
        schedule_service: ScheduleService,
    ) -> Self {
        Self {
            group_repo,
            profile_repo,
            schedule_service,
            invite_codes: InviteCodeGenerator::new(),
        }
    }

    /// Resolve the profile and group for a user.
    ///
    /// Errors with `GroupNotFound` when the user has no profile yet or the
    /// profile is not attached to a group; callers redirect such users to
    /// onboarding.
    pub async fn profile_and_group(
        &self,
        user_id: i64,
    ) -> AppResult<(wedding_profile::Model, wedding_group::Model)> {
        let profile = self
            .profile_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or(AppError::GroupNotFound)?;

        let group_id = profile.group_id.ok_or(AppError::GroupNotFound)?;
        let group = self.group_repo.get_by_id(group_id).await?;

        Ok((profile, group))
    }

    /// Onboard a user: create their group and seed its checklist.
    ///
    /// Creates the profile when absent and links it to a fresh group with a
    /// unique invite code. A user already in a group gets a conflict, and
    /// re-submitting the onboarding form never re-seeds the checklist.
    pub async fn onboard(
        &self,
        user_id: i64,
        wedding_date: Option<NaiveDate>,
        region_sido: Option<String>,
        region_sigungu: Option<String>,
    ) -> AppResult<(wedding_profile::Model, wedding_group::Model)> {
        let existing = self.profile_repo.find_by_user_id(user_id).await?;
        if let Some(profile) = &existing {
            if profile.group_id.is_some() {
                return Err(AppError::Conflict(
                    "User already belongs to a wedding group".to_string(),
                ));
            }
        }

        let invite_code = self.fresh_invite_code().await?;
        let group = self
            .group_repo
            .create(wedding_group::ActiveModel {
                wedding_date: Set(wedding_date),
                invite_code: Set(invite_code),
                created_at: Set(Utc::now().into()),
                ..Default::default()
            })
            .await?;

        let profile = match existing {
            Some(profile) => self.profile_repo.set_group(profile, group.id).await?,
            None => {
                self.profile_repo
                    .create(wedding_profile::ActiveModel {
                        user_id: Set(user_id),
                        group_id: Set(Some(group.id)),
                        region_sido: Set(region_sido),
                        region_sigungu: Set(region_sigungu),
                        created_at: Set(Utc::now().into()),
                        ..Default::default()
                    })
                    .await?
            }
        };

        let seeded = self.schedule_service.seed_default_checklist(group.id).await?;

        info!(
            user_id,
            group_id = group.id,
            invite_code = %group.invite_code,
            seeded,
            "Onboarded user into new group"
        );

        Ok((profile, group))
    }

    /// Join an existing group by invite code.
    ///
    /// Never re-seeds the checklist: the group already owns its tasks.
    pub async fn join(
        &self,
        user_id: i64,
        invite_code: &str,
    ) -> AppResult<(wedding_profile::Model, wedding_group::Model)> {
        let code = invite_code.trim().to_uppercase();
        let group = self
            .group_repo
            .find_by_invite_code(&code)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No group with invite code: {code}")))?;

        let profile = match self.profile_repo.find_by_user_id(user_id).await? {
            Some(profile) => {
                if profile.group_id == Some(group.id) {
                    return Ok((profile, group));
                }
                if profile.group_id.is_some() {
                    return Err(AppError::Conflict(
                        "User already belongs to another wedding group".to_string(),
                    ));
                }
                self.profile_repo.set_group(profile, group.id).await?
            }
            None => {
                self.profile_repo
                    .create(wedding_profile::ActiveModel {
                        user_id: Set(user_id),
                        group_id: Set(Some(group.id)),
                        created_at: Set(Utc::now().into()),
                        ..Default::default()
                    })
                    .await?
            }
        };

        info!(user_id, group_id = group.id, "User joined group by invite code");

        Ok((profile, group))
    }

    /// Update the group's wedding date from raw form input.
    ///
    /// An unparseable date string is silently ignored (the dashboard
    /// re-renders with the old date), per the form-fallback error policy.
    pub async fn update_wedding_date(
        &self,
        group_id: i64,
        date_input: &str,
    ) -> AppResult<Option<wedding_group::Model>> {
        let Ok(date) = NaiveDate::parse_from_str(date_input.trim(), "%Y-%m-%d") else {
            debug!(group_id, input = date_input, "Ignoring unparseable wedding date");
            return Ok(None);
        };

        let group = self.group_repo.update_wedding_date(group_id, date).await?;
        info!(group_id, date = %date, "Updated wedding date");
        Ok(Some(group))
    }

    /// Days until the wedding; `None` when the date is unset.
    #[must_use]
    pub fn d_day(group: &wedding_group::Model, today: NaiveDate) -> Option<i64> {
        group.wedding_date.map(|w| (w - today).num_days())
    }

    /// Generate an invite code that is not already taken.
    async fn fresh_invite_code(&self) -> AppResult<String> {
        for _ in 0..INVITE_CODE_ATTEMPTS {
            let code = self.invite_codes.generate();
            if !self.group_repo.invite_code_exists(&code).await? {
                return Ok(code);
            }
            warn!(code = %code, "Invite code collision, regenerating");
        }

        Err(AppError::Internal(
            "Could not generate a unique invite code".to_string(),
        ))
    }
}
