use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Default inclusive upper bound of the "due soon" window
pub const DEFAULT_DUE_SOON_DAYS: i64 = 7;

/// Where an asset stands relative to its next announced service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Overdue,
    DueToday,
    DueSoon { days: i64 },
    Upcoming { days: i64 },
    ByCondition,
    /// A due date was stored but is not a calendar date
    InvalidDate,
    /// Neither a due date nor a condition
    Unscheduled,
}

/// Visual weight of a status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl MaintenanceStatus {
    /// Primary sort bucket: overdue first, due today second, everything else last
    pub fn severity_bucket(&self) -> u8 {
        match self {
            MaintenanceStatus::Overdue => 0,
            MaintenanceStatus::DueToday => 1,
            _ => 2,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            MaintenanceStatus::Overdue | MaintenanceStatus::InvalidDate => Severity::Critical,
            MaintenanceStatus::DueToday | MaintenanceStatus::DueSoon { .. } => Severity::Warning,
            _ => Severity::Info,
        }
    }

    pub fn label(&self) -> String {
        match self {
            MaintenanceStatus::Overdue => "Overdue".to_string(),
            MaintenanceStatus::DueToday => "Due Today".to_string(),
            MaintenanceStatus::DueSoon { days } => format!("Due in {} day(s)", days),
            MaintenanceStatus::Upcoming { days } => format!("Upcoming in {} days", days),
            MaintenanceStatus::ByCondition => "By Condition".to_string(),
            MaintenanceStatus::InvalidDate => "Invalid Date".to_string(),
            MaintenanceStatus::Unscheduled => "Unscheduled".to_string(),
        }
    }
}

/// Classifies a next-maintenance signal against a calendar date.
///
/// The server uses it to rank dashboard items and the CLI uses it to render
/// them, so both always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusClassifier {
    due_soon_days: i64,
}

impl Default for StatusClassifier {
    fn default() -> Self {
        Self {
            due_soon_days: DEFAULT_DUE_SOON_DAYS,
        }
    }
}

impl StatusClassifier {
    pub fn new(due_soon_days: i64) -> Self {
        Self {
            due_soon_days: due_soon_days.max(1),
        }
    }

    pub fn due_soon_days(&self) -> i64 {
        self.due_soon_days
    }

    /// Classify a typed due date. A present due date always wins over a condition.
    pub fn classify(
        &self,
        today: NaiveDate,
        due_date: Option<NaiveDate>,
        condition: Option<&str>,
    ) -> MaintenanceStatus {
        match due_date {
            Some(due) => {
                let days = (due - today).num_days();
                if days < 0 {
                    MaintenanceStatus::Overdue
                } else if days == 0 {
                    MaintenanceStatus::DueToday
                } else if days <= self.due_soon_days {
                    MaintenanceStatus::DueSoon { days }
                } else {
                    MaintenanceStatus::Upcoming { days }
                }
            }
            None if has_text(condition) => MaintenanceStatus::ByCondition,
            None => MaintenanceStatus::Unscheduled,
        }
    }

    /// Classify a due date as it arrives over the wire. Blank values count as
    /// absent; anything else that does not parse is `InvalidDate`.
    pub fn classify_raw(
        &self,
        today: NaiveDate,
        due_date: Option<&str>,
        condition: Option<&str>,
    ) -> MaintenanceStatus {
        match due_date.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => match parse_due_date(raw) {
                Some(due) => self.classify(today, Some(due), condition),
                None => MaintenanceStatus::InvalidDate,
            },
            None => self.classify(today, None, condition),
        }
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp (its calendar date is kept)
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn has_text(value: Option<&str>) -> bool {
    value.map(|v| !v.trim().is_empty()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn classifies_relative_to_today() {
        let classifier = StatusClassifier::default();
        let today = date(2024, 6, 10);

        assert_eq!(classifier.classify(today, Some(date(2024, 6, 5)), None), MaintenanceStatus::Overdue);
        assert_eq!(classifier.classify(today, Some(date(2024, 6, 10)), None), MaintenanceStatus::DueToday);
        assert_eq!(
            classifier.classify(today, Some(date(2024, 6, 15)), None),
            MaintenanceStatus::DueSoon { days: 5 }
        );
        assert_eq!(
            classifier.classify(today, Some(date(2024, 7, 1)), None),
            MaintenanceStatus::Upcoming { days: 21 }
        );
        assert_eq!(classifier.classify(today, None, Some("5,000 km")), MaintenanceStatus::ByCondition);
    }

    #[test]
    fn due_soon_window_is_inclusive() {
        let classifier = StatusClassifier::default();
        let today = date(2024, 6, 10);

        assert_eq!(
            classifier.classify(today, Some(date(2024, 6, 11)), None),
            MaintenanceStatus::DueSoon { days: 1 }
        );
        assert_eq!(
            classifier.classify(today, Some(date(2024, 6, 17)), None),
            MaintenanceStatus::DueSoon { days: 7 }
        );
        assert_eq!(
            classifier.classify(today, Some(date(2024, 6, 18)), None),
            MaintenanceStatus::Upcoming { days: 8 }
        );
    }

    #[test]
    fn due_date_wins_over_condition() {
        let classifier = StatusClassifier::default();
        let today = date(2024, 6, 10);
        assert_eq!(
            classifier.classify(today, Some(date(2024, 6, 1)), Some("10,000 km")),
            MaintenanceStatus::Overdue
        );
    }

    #[test]
    fn blank_condition_is_unscheduled() {
        let classifier = StatusClassifier::default();
        let today = date(2024, 6, 10);
        assert_eq!(classifier.classify(today, None, Some("   ")), MaintenanceStatus::Unscheduled);
        assert_eq!(classifier.classify(today, None, None), MaintenanceStatus::Unscheduled);
    }

    #[test]
    fn raw_values_parse_or_flag_invalid() {
        let classifier = StatusClassifier::default();
        let today = date(2024, 6, 10);

        assert_eq!(classifier.classify_raw(today, Some("2024-06-10"), None), MaintenanceStatus::DueToday);
        assert_eq!(
            classifier.classify_raw(today, Some("2024-06-05T00:00:00Z"), None),
            MaintenanceStatus::Overdue
        );
        assert_eq!(classifier.classify_raw(today, Some("2024-02-30"), None), MaintenanceStatus::InvalidDate);
        assert_eq!(classifier.classify_raw(today, Some("next spring"), None), MaintenanceStatus::InvalidDate);
        assert_eq!(
            classifier.classify_raw(today, Some(""), Some("5,000 km")),
            MaintenanceStatus::ByCondition
        );
    }

    #[test]
    fn invalid_date_looks_critical_but_sorts_with_the_rest() {
        assert_eq!(MaintenanceStatus::InvalidDate.severity(), MaintenanceStatus::Overdue.severity());
        assert_eq!(MaintenanceStatus::InvalidDate.severity_bucket(), 2);
        assert_ne!(MaintenanceStatus::InvalidDate.label(), MaintenanceStatus::Overdue.label());
    }

    #[test]
    fn due_soon_and_upcoming_share_a_bucket() {
        assert_eq!(MaintenanceStatus::DueSoon { days: 2 }.severity_bucket(), 2);
        assert_eq!(MaintenanceStatus::Upcoming { days: 30 }.severity_bucket(), 2);
        assert_eq!(MaintenanceStatus::ByCondition.severity_bucket(), 2);
        assert_eq!(MaintenanceStatus::DueToday.severity_bucket(), 1);
    }

    #[test]
    fn custom_window() {
        let classifier = StatusClassifier::new(14);
        let today = date(2024, 6, 10);
        assert_eq!(
            classifier.classify(today, Some(date(2024, 6, 20)), None),
            MaintenanceStatus::DueSoon { days: 10 }
        );
    }

    #[test]
    fn status_serializes_with_kind_tag() {
        let value = serde_json::to_value(MaintenanceStatus::DueSoon { days: 5 }).unwrap();
        assert_eq!(value["kind"], "due_soon");
        assert_eq!(value["days"], 5);

        let value = serde_json::to_value(MaintenanceStatus::ByCondition).unwrap();
        assert_eq!(value["kind"], "by_condition");
    }

    #[test]
    fn labels() {
        assert_eq!(MaintenanceStatus::DueSoon { days: 5 }.label(), "Due in 5 day(s)");
        assert_eq!(MaintenanceStatus::DueToday.label(), "Due Today");
        assert_eq!(MaintenanceStatus::ByCondition.label(), "By Condition");
    }
}
