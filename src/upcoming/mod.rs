// Upcoming-maintenance aggregation: which record is "latest" per asset,
// how its next-maintenance signal is classified, and how the dashboard
// orders the result.

pub mod clock;
pub mod latest;
pub mod ordering;
pub mod status;

pub use clock::{Clock, FixedClock, SystemClock};
pub use latest::{collect_upcoming, latest_per_asset};
pub use ordering::{compare_due_dates, compare_entries, rank_upcoming, UpcomingEntry};
pub use status::{parse_due_date, MaintenanceStatus, Severity, StatusClassifier, DEFAULT_DUE_SOON_DAYS};
