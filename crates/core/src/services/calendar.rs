//! Calendar/dashboard rendering service.
//!
//! Builds the month grid (weeks x 7, Sunday-first) with per-day flags, the
//! D-Day countdown with its recommendation bucket, and the upcoming
//! task/memo lists. Per-day annotations come from two per-month batch
//! fetches; the grid itself never queries.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use wedplan_common::AppResult;
use wedplan_db::entities::{daily_log, schedule_task, wedding_group};
use wedplan_db::repositories::{DailyLogRepository, TaskRepository};

/// Number of items shown in each upcoming list.
const UPCOMING_LIMIT: u64 = 7;

/// One suggested action for the current D-Day bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DdayAction {
    /// Short action title.
    pub title: &'static str,
    /// One-line explanation.
    pub description: &'static str,
}

const fn action(title: &'static str, description: &'static str) -> DdayAction {
    DdayAction { title, description }
}

/// Recommended actions when no wedding date is set yet.
const ACTIONS_UNSET: [DdayAction; 3] = [
    action("결혼 날짜 정하기", "행복한 시작을 위한 날짜를 먼저 확정해주세요."),
    action("웨딩홀 알아보기", "어떤 분위기의 결혼식을 원하는지 상의해보세요."),
    action("예산 논의하기", "대략적인 결혼 준비 자금을 확인해보세요."),
];

const ACTIONS_OVER_180: [DdayAction; 3] = [
    action("상견례 장소 예약", "양가 어른들을 모실 조용한 장소를 알아보세요."),
    action("예식장 투어", "원하는 날짜와 보증인원을 고려해 투어를 시작하세요."),
    action("예산 계획 수립", "전체적인 결혼 준비 예산을 파트너와 상의하세요."),
];

const ACTIONS_OVER_120: [DdayAction; 3] = [
    action("스드메 계약", "스튜디오, 드레스, 메이크업 업체를 확정하세요."),
    action("본식 스냅 예약", "인기 있는 스냅/DVD 업체는 빨리 마감됩니다."),
    action("신혼여행지 결정", "항공권과 숙소를 미리 예약하면 저렴합니다."),
];

const ACTIONS_OVER_60: [DdayAction; 3] = [
    action("청첩장 주문", "청첩장 디자인을 고르고 초안을 확인하세요."),
    action("예물/예복 맞춤", "제작 기간을 고려해 미리 방문 상담을 받으세요."),
    action("하객 리스트 정리", "초대할 하객 명단을 1차적으로 정리해보세요."),
];

const ACTIONS_OVER_30: [DdayAction; 3] = [
    action("사회자/주례 섭외", "결혼식을 이끌어줄 분들에게 부탁을 드려보세요."),
    action("식중 영상 제작", "식전 영상과 성장 동영상을 준비할 시기입니다."),
    action("부케 선정", "드레스와 홀 분위기에 어울리는 부케를 고르세요."),
];

const ACTIONS_OVER_7: [DdayAction; 3] = [
    action("본식 드레스 가봉", "최종적으로 드레스 상태와 사이즈를 점검하세요."),
    action("식권/방명록 준비", "당일 사용할 물품들을 꼼꼼히 챙겨두세요."),
    action("컨디션 조절", "충분한 수면과 휴식으로 최상의 컨디션을 만드세요."),
];

const ACTIONS_FINAL_WEEK: [DdayAction; 3] = [
    action("준비물 최종 점검", "반지, 포토테이블 사진 등 당일 준비물을 확인하세요."),
    action("마음의 준비", "긴장하지 말고 행복한 하루를 즐길 준비를 하세요."),
    action("부모님께 감사 인사", "키워주신 은혜에 감사하는 마음을 전하세요."),
];

const ACTIONS_AFTER: [DdayAction; 3] = [
    action("신혼여행 즐기기", "행복한 추억을 많이 만드세요!"),
    action("감사 인사 드리기", "와주신 하객분들께 감사의 연락을 돌리세요."),
    action("혼인신고", "법적인 부부가 되기 위한 절차를 확인하세요."),
];

/// One cell of the month grid.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarCell {
    /// Day of month; 0 for padding cells.
    pub day: u32,
    /// Whether this is a padding cell outside the month.
    pub is_empty: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_wedding_day: bool,
    pub has_log: bool,
    /// Journal content for the day, empty when none.
    pub log_content: String,
    /// Tasks scheduled on this day.
    pub tasks: Vec<schedule_task::Model>,
    /// Concrete date; `None` for padding cells.
    pub date: Option<NaiveDate>,
}

impl CalendarCell {
    fn empty() -> Self {
        Self {
            day: 0,
            is_empty: true,
            is_today: false,
            is_selected: false,
            is_wedding_day: false,
            has_log: false,
            log_content: String::new(),
            tasks: Vec::new(),
            date: None,
        }
    }
}

/// One week row of the grid, always exactly 7 cells.
pub type CalendarWeek = Vec<CalendarCell>;

/// A fully rendered month view.
#[derive(Debug, Clone, Serialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    /// Week-major grid, Sunday-first, 7 cells per row.
    pub weeks: Vec<CalendarWeek>,
    /// The highlighted date (query param when valid, today otherwise).
    pub selected_date: NaiveDate,
    /// Days until the wedding; `None` when no date is set.
    pub d_day: Option<i64>,
    /// Suggested actions for the current D-Day bucket.
    pub actions: [DdayAction; 3],
    /// Tasks still unscheduled or not done (shown separately, never
    /// interleaved with the dated grid).
    pub unscheduled_tasks: Vec<schedule_task::Model>,
    pub prev_year: i32,
    pub prev_month: u32,
    pub next_year: i32,
    pub next_month: u32,
}

/// Upcoming items for the dashboard, kept as two separate lists.
#[derive(Debug, Clone, Serialize)]
pub struct UpcomingLists {
    /// Next scheduled tasks, earliest first.
    pub tasks: Vec<schedule_task::Model>,
    /// Next journal entries, earliest first.
    pub logs: Vec<daily_log::Model>,
}

/// Calendar service for dashboard rendering.
#[derive(Clone)]
pub struct CalendarService {
    task_repo: TaskRepository,
    log_repo: DailyLogRepository,
}

impl CalendarService {
    /// Create a new calendar service.
    #[must_use]
    pub const fn new(task_repo: TaskRepository, log_repo: DailyLogRepository) -> Self {
        Self {
            task_repo,
            log_repo,
        }
    }

    /// Render the month view for a group.
    ///
    /// `year`/`month` default to today's; `month` 0 and 13 wrap into the
    /// neighbouring year. An unparseable `selected` falls back to today.
    pub async fn month_view(
        &self,
        group: &wedding_group::Model,
        year: Option<i32>,
        month: Option<i32>,
        selected: Option<&str>,
        today: NaiveDate,
    ) -> AppResult<MonthView> {
        let raw_year = year.unwrap_or_else(|| today.year());
        let raw_month = month.unwrap_or_else(|| today.month() as i32);
        let (year, month) = normalize_month(raw_year, raw_month);

        let selected_date = selected
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .unwrap_or(today);

        let (month_start, month_end) = month_range(year, month);

        // Batch fetches for the whole month; the grid builder below never
        // touches the database.
        let logs = self
            .log_repo
            .find_in_range(group.id, month_start, month_end)
            .await?;
        let month_tasks = self
            .task_repo
            .find_in_range(group.id, month_start, month_end)
            .await?;

        let mut tasks_by_date: HashMap<NaiveDate, Vec<schedule_task::Model>> = HashMap::new();
        for task in month_tasks {
            if let Some(date) = task.date {
                tasks_by_date.entry(date).or_default().push(task);
            }
        }

        let weeks = build_month_grid(
            year,
            month,
            today,
            selected_date,
            group.wedding_date,
            &logs,
            &tasks_by_date,
        );

        let unscheduled_tasks = self.task_repo.find_open(group.id).await?;

        let d_day = group.wedding_date.map(|w| (w - today).num_days());

        let (prev_year, prev_month) = if month == 1 {
            (year - 1, 12)
        } else {
            (year, month - 1)
        };
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };

        Ok(MonthView {
            year,
            month,
            weeks,
            selected_date,
            d_day,
            actions: dday_actions(d_day),
            unscheduled_tasks,
            prev_year,
            prev_month,
            next_year,
            next_month,
        })
    }

    /// Upcoming tasks and journal entries, as two separate lists of at
    /// most seven items each.
    pub async fn upcoming(&self, group_id: i64, today: NaiveDate) -> AppResult<UpcomingLists> {
        let tasks = self
            .task_repo
            .find_upcoming(group_id, today, UPCOMING_LIMIT)
            .await?;
        let logs = self
            .log_repo
            .find_upcoming(group_id, today, UPCOMING_LIMIT)
            .await?;

        Ok(UpcomingLists { tasks, logs })
    }
}

/// Wrap out-of-range month numbers into the neighbouring year:
/// month 0 -> December of the previous year, month 13 -> January of the
/// next year.
fn normalize_month(year: i32, month: i32) -> (i32, u32) {
    if month < 1 {
        (year - 1, 12)
    } else if month > 12 {
        (year + 1, 1)
    } else {
        (year, month as u32)
    }
}

/// First and last day of a month.
fn month_range(year: i32, month: u32) -> (NaiveDate, NaiveDate) {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default());
    let end = start
        .checked_add_months(chrono::Months::new(1))
        .and_then(|d| d.pred_opt())
        .unwrap_or(start);
    (start, end)
}

/// Number of days in a month.
fn days_in_month(year: i32, month: u32) -> u32 {
    let (_, end) = month_range(year, month);
    end.day()
}

/// Build the week-major grid. Leading/trailing cells outside the month are
/// empty placeholders so every row has exactly 7 cells.
fn build_month_grid(
    year: i32,
    month: u32,
    today: NaiveDate,
    selected: NaiveDate,
    wedding_date: Option<NaiveDate>,
    logs: &HashMap<NaiveDate, String>,
    tasks_by_date: &HashMap<NaiveDate, Vec<schedule_task::Model>>,
) -> Vec<CalendarWeek> {
    let (month_start, _) = month_range(year, month);
    let leading = month_start.weekday().num_days_from_sunday() as usize;
    let days = days_in_month(year, month);

    let mut cells: Vec<CalendarCell> = Vec::with_capacity(42);
    for _ in 0..leading {
        cells.push(CalendarCell::empty());
    }

    for day in 1..=days {
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            continue;
        };

        let log_content = logs.get(&date).cloned();
        cells.push(CalendarCell {
            day,
            is_empty: false,
            is_today: date == today,
            is_selected: date == selected,
            is_wedding_day: wedding_date == Some(date),
            has_log: log_content.is_some(),
            log_content: log_content.unwrap_or_default(),
            tasks: tasks_by_date.get(&date).cloned().unwrap_or_default(),
            date: Some(date),
        });
    }

    while cells.len() % 7 != 0 {
        cells.push(CalendarCell::empty());
    }

    cells.chunks(7).map(<[CalendarCell]>::to_vec).collect()
}

/// Static recommendation lookup keyed by how many days remain.
fn dday_actions(days_left: Option<i64>) -> [DdayAction; 3] {
    match days_left {
        None => ACTIONS_UNSET,
        Some(d) if d > 180 => ACTIONS_OVER_180,
        Some(d) if d > 120 => ACTIONS_OVER_120,
        Some(d) if d > 60 => ACTIONS_OVER_60,
        Some(d) if d > 30 => ACTIONS_OVER_30,
        Some(d) if d > 7 => ACTIONS_OVER_7,
        Some(d) if d >= 0 => ACTIONS_FINAL_WEEK,
        Some(_) => ACTIONS_AFTER,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wedplan_db::entities::schedule_task::TaskCategory;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn grid(
        year: i32,
        month: u32,
        today: NaiveDate,
        wedding: Option<NaiveDate>,
    ) -> Vec<CalendarWeek> {
        build_month_grid(
            year,
            month,
            today,
            today,
            wedding,
            &HashMap::new(),
            &HashMap::new(),
        )
    }

    #[test]
    fn test_every_row_has_seven_cells() {
        for (year, month) in [(2025, 2), (2025, 9), (2024, 2), (2025, 12), (2026, 1)] {
            let weeks = grid(year, month, day(2025, 9, 25), None);
            for week in &weeks {
                assert_eq!(week.len(), 7, "{year}-{month}");
            }
        }
    }

    #[test]
    fn test_non_empty_cells_equal_days_in_month() {
        for (year, month, expected) in [
            (2025, 2, 28),
            (2024, 2, 29), // leap year
            (2025, 9, 30),
            (2025, 12, 31),
        ] {
            let weeks = grid(year, month, day(2025, 9, 25), None);
            let filled = weeks
                .iter()
                .flatten()
                .filter(|c| !c.is_empty)
                .count();
            assert_eq!(filled, expected, "{year}-{month}");
        }
    }

    #[test]
    fn test_grid_starts_on_sunday_column() {
        // September 2025 starts on a Monday, so the first row has exactly
        // one leading empty cell.
        let weeks = grid(2025, 9, day(2025, 9, 25), None);
        assert!(weeks[0][0].is_empty);
        assert_eq!(weeks[0][1].day, 1);
    }

    #[test]
    fn test_at_most_one_wedding_day_cell() {
        let wedding = Some(day(2025, 12, 25));
        for month in 1..=12 {
            let weeks = grid(2025, month, day(2025, 9, 25), wedding);
            let flagged = weeks
                .iter()
                .flatten()
                .filter(|c| c.is_wedding_day)
                .count();
            assert!(flagged <= 1, "2025-{month}");
            if month == 12 {
                assert_eq!(flagged, 1);
            }
        }
    }

    #[test]
    fn test_log_and_task_annotations() {
        let mut logs = HashMap::new();
        logs.insert(day(2025, 9, 14), "memo".to_string());

        let task = schedule_task::Model {
            id: 1,
            group_id: 1,
            date: Some(day(2025, 9, 14)),
            expected_date: None,
            title: "Task".to_string(),
            description: String::new(),
            category: TaskCategory::Other,
            difficulty: 1,
            d_day_offset: None,
            estimated_budget: 0,
            is_done: false,
            created_at: chrono::Utc::now().into(),
        };
        let mut tasks = HashMap::new();
        tasks.insert(day(2025, 9, 14), vec![task]);

        let weeks = build_month_grid(
            2025,
            9,
            day(2025, 9, 25),
            day(2025, 9, 25),
            None,
            &logs,
            &tasks,
        );

        let cell = weeks
            .iter()
            .flatten()
            .find(|c| c.day == 14)
            .unwrap();
        assert!(cell.has_log);
        assert_eq!(cell.log_content, "memo");
        assert_eq!(cell.tasks.len(), 1);
    }

    #[test]
    fn test_normalize_month_wraps() {
        assert_eq!(normalize_month(2025, 0), (2024, 12));
        assert_eq!(normalize_month(2025, 13), (2026, 1));
        assert_eq!(normalize_month(2025, 1), (2025, 1));
        assert_eq!(normalize_month(2025, 12), (2025, 12));
    }

    #[test]
    fn test_normalize_month_round_trips_navigation() {
        // Stepping backward from January and forward from December must be
        // inverse operations under the wrap rule.
        let (y, m) = normalize_month(2025, 0);
        assert_eq!((y, m), (2024, 12));
        let (y, m) = normalize_month(y, m as i32 + 1);
        assert_eq!((y, m), (2025, 1));

        let (y, m) = normalize_month(2025, 13);
        assert_eq!((y, m), (2026, 1));
        let (y, m) = normalize_month(y, m as i32 - 1);
        assert_eq!((y, m), (2025, 12));
    }

    #[test]
    fn test_dday_bucket_selection() {
        // wedding 2025-12-25, today 2025-09-25 -> 91 days -> ">60" tier.
        let wedding = day(2025, 12, 25);
        let today = day(2025, 9, 25);
        let days_left = (wedding - today).num_days();
        assert_eq!(days_left, 91);

        let actions = dday_actions(Some(days_left));
        assert_eq!(actions, ACTIONS_OVER_60);
    }

    #[test]
    fn test_dday_bucket_boundaries() {
        assert_eq!(dday_actions(None), ACTIONS_UNSET);
        assert_eq!(dday_actions(Some(181)), ACTIONS_OVER_180);
        assert_eq!(dday_actions(Some(180)), ACTIONS_OVER_120);
        assert_eq!(dday_actions(Some(121)), ACTIONS_OVER_120);
        assert_eq!(dday_actions(Some(61)), ACTIONS_OVER_60);
        assert_eq!(dday_actions(Some(31)), ACTIONS_OVER_30);
        assert_eq!(dday_actions(Some(8)), ACTIONS_OVER_7);
        assert_eq!(dday_actions(Some(7)), ACTIONS_FINAL_WEEK);
        assert_eq!(dday_actions(Some(0)), ACTIONS_FINAL_WEEK);
        assert_eq!(dday_actions(Some(-1)), ACTIONS_AFTER);
    }

    #[test]
    fn test_month_range() {
        assert_eq!(
            month_range(2025, 9),
            (day(2025, 9, 1), day(2025, 9, 30))
        );
        assert_eq!(
            month_range(2025, 12),
            (day(2025, 12, 1), day(2025, 12, 31))
        );
        assert_eq!(month_range(2024, 2), (day(2024, 2, 1), day(2024, 2, 29)));
    }
}
