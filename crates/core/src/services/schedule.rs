//! Schedule/checklist service.
//!
//! Owns the default checklist template seeded at group creation and the
//! user-facing task operations (add, reschedule, toggle, budget, bulk
//! delete). Every task mutation is ownership-checked against the caller's
//! group before touching the row.

use chrono::{Days, NaiveDate, Utc};
use sea_orm::Set;
use tracing::{debug, info};
use wedplan_common::AppResult;
use wedplan_db::entities::schedule_task::{self, TaskCategory};
use wedplan_db::repositories::TaskRepository;

/// One entry of the default checklist template:
/// `(d_day_offset, category, title, difficulty, description)`.
type TemplateEntry = (i32, TaskCategory, &'static str, i16, &'static str);

/// Default checklist seeded for every new group, ordered by offset.
///
/// Offsets span a full year of preparation (D-365) up to the wedding day
/// itself (D-0). Tasks are seeded unscheduled; the offset drives the
/// checklist ordering until the couple pins a task to a concrete day.
const DEFAULT_CHECKLIST: [TemplateEntry; 33] = [
    (-365, TaskCategory::Meeting, "상견례 일정 잡기", 1, "양가 부모님과 편한 날짜를 조율해보세요."),
    (-330, TaskCategory::Meeting, "상견례 진행", 2, "양가 어른들을 모시고 인사를 나누는 자리입니다."),
    (-320, TaskCategory::Contract, "전체 예산 계획 수립", 2, "전체적인 결혼 준비 예산을 파트너와 상의하세요."),
    (-300, TaskCategory::Venue, "웨딩홀 투어 및 계약", 3, "인기 있는 웨딩홀은 1년 전부터 마감되니 서두르세요!"),
    (-270, TaskCategory::Venue, "예식 날짜/시간 확정", 2, "계약한 홀과 날짜, 시간을 최종 확정하세요."),
    (-240, TaskCategory::Sdm, "스드메(스튜디오/드레스/메이크업) 알아보기", 2, "원하는 스타일을 스크랩하고 업체를 선정해보세요."),
    (-230, TaskCategory::Sdm, "스드메 계약", 3, "견적을 비교하고 마음에 드는 업체와 계약하세요."),
    (-210, TaskCategory::Sdm, "본식 스냅/DVD 예약", 2, "유명한 작가님들은 빨리 마감됩니다."),
    (-200, TaskCategory::Honeymoon, "신혼여행지 정하기", 1, "두 사람의 취향에 맞는 여행지를 골라보세요."),
    (-180, TaskCategory::Honeymoon, "신혼여행 예약", 2, "항공권과 숙소를 미리 예약해야 저렴합니다."),
    (-170, TaskCategory::Furnishing, "신혼집 알아보기", 3, "출퇴근 동선과 예산을 고려해 지역을 정하세요."),
    (-150, TaskCategory::Attire, "드레스 투어", 2, "입어보고 싶은 드레스샵 2-3곳을 투어해보세요."),
    (-140, TaskCategory::Attire, "예복/한복 맞춤 상담", 2, "제작 기간을 고려해 미리 방문 상담을 받으세요."),
    (-130, TaskCategory::Furnishing, "혼수 리스트 정리", 1, "필요한 가전과 가구 목록을 정리해보세요."),
    (-120, TaskCategory::Sdm, "웨딩 촬영", 2, "스튜디오 촬영을 진행하고 모바일 청첩장용 사진을 셀렉하세요."),
    (-110, TaskCategory::Furnishing, "가전/가구 구매", 2, "세일 기간을 노리면 비용을 아낄 수 있습니다."),
    (-100, TaskCategory::Contract, "예물 준비", 2, "반지와 예물을 준비할 시기입니다."),
    (-90, TaskCategory::Invitation, "청첩장 주문", 1, "하객 리스트를 정리하고 청첩장을 주문하세요."),
    (-80, TaskCategory::Invitation, "모바일 청첩장 제작", 1, "촬영 사진으로 모바일 청첩장을 만들어보세요."),
    (-75, TaskCategory::Meeting, "주례/사회자 섭외", 2, "결혼식을 이끌어줄 분들에게 부탁을 드려보세요."),
    (-70, TaskCategory::Honeymoon, "여권/비자 확인", 1, "여권 만료일과 비자 필요 여부를 확인하세요."),
    (-60, TaskCategory::Invitation, "청첩장 모임 시작", 1, "지인들에게 청첩장을 전달하며 식사를 대접하세요."),
    (-50, TaskCategory::Sdm, "본식 헤어/메이크업 리허설 예약", 1, "본식 담당 선생님과 리허설 일정을 잡으세요."),
    (-45, TaskCategory::Venue, "식순/연출 협의", 1, "홀 담당자와 식순, 연출을 협의하세요."),
    (-40, TaskCategory::Furnishing, "신혼집 입주 준비", 2, "입주 청소와 이사 일정을 확정하세요."),
    (-30, TaskCategory::Attire, "본식 드레스 가봉", 2, "본식 날 입을 드레스를 최종 결정하고 사이즈를 체크하세요."),
    (-25, TaskCategory::Contract, "잔금 결제 일정 확인", 1, "업체별 잔금 일정과 금액을 정리하세요."),
    (-20, TaskCategory::Other, "부케 주문 및 축가 섭외", 1, "예식 분위기에 맞는 부케와 식순을 챙겨주세요."),
    (-14, TaskCategory::Honeymoon, "신혼여행 짐 리스트 작성", 1, "필요한 준비물을 미리 적어두면 편합니다."),
    (-10, TaskCategory::Venue, "최종 하객 인원 전달", 1, "보증 인원을 홀에 전달하고 식권을 확인하세요."),
    (-7, TaskCategory::Other, "최종 점검", 1, "식권, 포토테이블, 식순 등 빠진 것이 없는지 확인하세요."),
    (-3, TaskCategory::Other, "컨디션 관리", 1, "충분한 수면과 휴식으로 최상의 컨디션을 만드세요."),
    (0, TaskCategory::Other, "결혼식", 1, "행복한 결혼식 날입니다!"),
];

/// Checklist view: all tasks in display order plus the summed budget.
#[derive(Debug, Clone)]
pub struct ChecklistView {
    /// Tasks ordered by `(d_day_offset ASC, id ASC)`, offset-less last.
    pub tasks: Vec<schedule_task::Model>,
    /// Sum of estimated budgets over all tasks.
    pub total_budget: i64,
}

/// Schedule service for checklist business logic.
#[derive(Clone)]
pub struct ScheduleService {
    task_repo: TaskRepository,
}

impl ScheduleService {
    /// Create a new schedule service.
    #[must_use]
    pub const fn new(task_repo: TaskRepository) -> Self {
        Self { task_repo }
    }

    /// Number of entries in the default checklist template.
    #[must_use]
    pub const fn template_len() -> usize {
        DEFAULT_CHECKLIST.len()
    }

    /// Seed the default checklist for a newly created group.
    ///
    /// Runs exactly once per group: if the group already has any task the
    /// call is a no-op, so repeated onboarding submissions cannot duplicate
    /// the template. Tasks are created unscheduled (`date = NULL`) with
    /// their template offset; one bulk insert keeps the batch atomic.
    pub async fn seed_default_checklist(&self, group_id: i64) -> AppResult<usize> {
        if self.task_repo.count_by_group(group_id).await? > 0 {
            debug!(group_id, "Checklist already seeded, skipping");
            return Ok(0);
        }

        let now = Utc::now();
        let models: Vec<schedule_task::ActiveModel> = DEFAULT_CHECKLIST
            .iter()
            .map(|&(offset, category, title, difficulty, description)| {
                schedule_task::ActiveModel {
                    group_id: Set(group_id),
                    date: Set(None),
                    title: Set(title.to_string()),
                    description: Set(description.to_string()),
                    category: Set(category),
                    difficulty: Set(difficulty),
                    d_day_offset: Set(Some(offset)),
                    estimated_budget: Set(0),
                    is_done: Set(false),
                    created_at: Set(now.into()),
                    ..Default::default()
                }
            })
            .collect();

        let count = models.len();
        self.task_repo.insert_many(models).await?;

        info!(group_id, count, "Seeded default checklist");
        Ok(count)
    }

    /// Add a user-created task.
    ///
    /// `days_left_input` is the user-facing "days remaining before the
    /// wedding" (a positive number); it is negated into the stored offset.
    /// When the group has a wedding date the concrete date is computed
    /// eagerly. Non-numeric inputs are ignored rather than rejected.
    pub async fn add_task(
        &self,
        group_id: i64,
        wedding_date: Option<NaiveDate>,
        title: String,
        description: String,
        budget_input: Option<&str>,
        days_left_input: Option<&str>,
    ) -> AppResult<schedule_task::Model> {
        let budget = budget_input.and_then(parse_budget).unwrap_or(0);

        let d_day_offset = days_left_input.and_then(parse_days_left).map(|days| -days);
        let date = match (wedding_date, d_day_offset) {
            (Some(wedding), Some(offset)) => apply_offset(wedding, offset),
            _ => None,
        };

        let model = schedule_task::ActiveModel {
            group_id: Set(group_id),
            date: Set(date),
            title: Set(title),
            description: Set(description),
            category: Set(TaskCategory::Other),
            difficulty: Set(1),
            d_day_offset: Set(d_day_offset),
            estimated_budget: Set(budget),
            is_done: Set(false),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        self.task_repo.create(model).await
    }

    /// Schedule (or reschedule) a task onto a concrete day.
    ///
    /// The task must belong to the group; a foreign or unknown id is a
    /// not-found error since task ids come straight from the client.
    pub async fn assign_date(
        &self,
        group_id: i64,
        task_id: i64,
        date: NaiveDate,
    ) -> AppResult<schedule_task::Model> {
        let task = self.task_repo.get_by_id_and_group(task_id, group_id).await?;
        self.task_repo.set_date(task, date).await
    }

    /// Flip a task's completion state; ownership-checked.
    pub async fn toggle_done(&self, group_id: i64, task_id: i64) -> AppResult<schedule_task::Model> {
        let task = self.task_repo.get_by_id_and_group(task_id, group_id).await?;
        self.task_repo.toggle_done(task).await
    }

    /// Update a task's estimated budget; ownership-checked.
    ///
    /// The raw input may carry thousands separators ("1,500,000"). A value
    /// that still fails to parse is a silent no-op, mirroring the form
    /// behavior: the page re-renders with the old budget.
    pub async fn update_budget(
        &self,
        group_id: i64,
        task_id: i64,
        budget_input: &str,
    ) -> AppResult<Option<schedule_task::Model>> {
        let Some(budget) = parse_budget(budget_input) else {
            debug!(group_id, task_id, input = budget_input, "Ignoring unparseable budget");
            return Ok(None);
        };

        let task = self.task_repo.get_by_id_and_group(task_id, group_id).await?;
        Ok(Some(self.task_repo.set_budget(task, budget).await?))
    }

    /// Delete a batch of tasks by id, scoped to the group.
    ///
    /// Ids of other groups' tasks are silently unmatched by the scoped
    /// delete, never removed. Returns the number of rows deleted.
    pub async fn bulk_delete(&self, group_id: i64, task_ids: &[i64]) -> AppResult<u64> {
        let deleted = self.task_repo.delete_by_ids(group_id, task_ids).await?;
        info!(group_id, requested = task_ids.len(), deleted, "Bulk-deleted tasks");
        Ok(deleted)
    }

    /// Full checklist in display order with the summed budget.
    pub async fn checklist(&self, group_id: i64) -> AppResult<ChecklistView> {
        let tasks = self.task_repo.find_by_group(group_id).await?;
        let total_budget = tasks.iter().map(|t| t.estimated_budget).sum();

        Ok(ChecklistView {
            tasks,
            total_budget,
        })
    }
}

/// Parse the "days remaining" input. Negative or non-numeric input yields
/// `None`.
fn parse_days_left(input: &str) -> Option<i32> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i32>().ok().filter(|n| *n >= 0)
}

/// Parse a budget amount, tolerating thousands separators.
fn parse_budget(input: &str) -> Option<i64> {
    let cleaned = input.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<i64>().ok()
}

/// Apply a signed day offset to a date.
fn apply_offset(date: NaiveDate, offset: i32) -> Option<NaiveDate> {
    if offset >= 0 {
        date.checked_add_days(Days::new(u64::from(offset.unsigned_abs())))
    } else {
        date.checked_sub_days(Days::new(u64::from(offset.unsigned_abs())))
    }
}
