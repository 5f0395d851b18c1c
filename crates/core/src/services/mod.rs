//! Business logic services.

#![allow(missing_docs)]

pub mod account;
pub mod calendar;
pub mod community;
pub mod daily_log;
pub mod group;
pub mod notice;
pub mod schedule;
pub mod vendor;

pub use account::AccountService;
pub use calendar::{
    CalendarCell, CalendarService, CalendarWeek, DdayAction, MonthView, UpcomingLists,
};
pub use community::{CommunityListing, CommunityService, PostDetail};
pub use daily_log::DailyLogService;
pub use group::GroupService;
pub use notice::NoticeService;
pub use schedule::{ChecklistView, ScheduleService};
pub use vendor::{VendorDetail, VendorSelectionStatus, VendorService};
