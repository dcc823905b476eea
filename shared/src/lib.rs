use serde::{Deserialize, Serialize};
use std::fmt;
use chrono::NaiveDate;

/// Length of a full-term pregnancy in days (40 weeks)
pub const FULL_TERM_DAYS: i64 = 280;

/// Latest week the timeline will report (overdue pregnancies stop here)
pub const MAX_PREGNANCY_WEEK: u32 = 42;

/// Development content for a single pregnancy week, as served by the content API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekContent {
    /// Pregnancy week (1-42)
    pub week: u32,
    /// Human-readable size comparison, e.g. "a poppy seed"
    pub size_label: String,
    /// Emoji glyph shown next to the size comparison
    pub icon: String,
    /// Developmental milestones reached this week
    #[serde(default)]
    pub milestones: Vec<String>,
    /// Optional development-focus tags (e.g. "nutrition", "hospital bag")
    #[serde(default)]
    pub development_focus: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekRangeResponse {
    pub weeks: Vec<WeekContent>,
}

/// Backing record for a pregnancy; the timeline is always derived from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PregnancyRecord {
    pub id: String,
    /// Start reference point (first day of last period), YYYY-MM-DD
    pub start_date: String,
    /// Optional due date override, YYYY-MM-DD
    pub due_date: Option<String>,
}

impl PregnancyRecord {
    /// Parse the start date in YYYY-MM-DD format
    pub fn parse_start_date(&self) -> Result<NaiveDate, PregnancyDateError> {
        NaiveDate::parse_from_str(self.start_date.trim(), "%Y-%m-%d")
            .map_err(|_| PregnancyDateError::InvalidFormat(self.start_date.clone()))
    }

    /// Derive the timeline as of `today`
    pub fn timeline_on(&self, today: NaiveDate) -> Result<PregnancyTimeline, PregnancyDateError> {
        let start = self.parse_start_date()?;
        Ok(PregnancyTimeline::from_start_date(start, today))
    }
}

/// Current position in the pregnancy, recomputed on every read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PregnancyTimeline {
    /// 1-42
    pub current_week: u32,
    /// 0-6 within the current week
    pub current_day: u32,
    /// 1-3, always consistent with `current_week`
    pub trimester: u8,
    /// Days elapsed since the start date (never negative)
    pub days_completed: i64,
}

impl PregnancyTimeline {
    pub fn from_start_date(start: NaiveDate, today: NaiveDate) -> Self {
        let elapsed = (today - start).num_days().max(0);
        let last_day = i64::from(MAX_PREGNANCY_WEEK) * 7 - 1;
        let days = elapsed.min(last_day);

        let current_week = (days / 7) as u32 + 1;
        let current_day = (days % 7) as u32;

        Self {
            current_week,
            current_day,
            trimester: Self::trimester_for_week(current_week),
            days_completed: elapsed,
        }
    }

    /// Build a timeline from an already-known week and day. Values are clamped
    /// into their valid ranges.
    pub fn from_week_day(week: u32, day: u32) -> Self {
        let current_week = week.clamp(1, MAX_PREGNANCY_WEEK);
        let current_day = day.min(6);
        Self {
            current_week,
            current_day,
            trimester: Self::trimester_for_week(current_week),
            days_completed: i64::from(current_week - 1) * 7 + i64::from(current_day),
        }
    }

    /// Fixed week-range table: [1,12] -> 1, [13,26] -> 2, 27 and later -> 3
    pub fn trimester_for_week(week: u32) -> u8 {
        match week {
            0..=12 => 1,
            13..=26 => 2,
            _ => 3,
        }
    }

    pub fn days_remaining(&self) -> i64 {
        (FULL_TERM_DAYS - self.days_completed).max(0)
    }

    pub fn is_overdue(&self) -> bool {
        self.days_completed > FULL_TERM_DAYS
    }

    /// Estimated due date for a pregnancy that started on `start`
    pub fn due_date(start: NaiveDate) -> NaiveDate {
        start + chrono::Duration::days(FULL_TERM_DAYS)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PregnancyDateError {
    InvalidFormat(String),
}

impl fmt::Display for PregnancyDateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PregnancyDateError::InvalidFormat(value) => {
                write!(f, "Invalid pregnancy date '{}', expected YYYY-MM-DD", value)
            }
        }
    }
}

impl std::error::Error for PregnancyDateError {}

/// A family member as shown in avatars and member lists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// Invitation details returned for a token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvitationDetails {
    pub token: String,
    pub family_name: String,
    pub inviter: UserProfile,
    /// Role the invitee will get, e.g. "grandparent"
    pub role: String,
    pub expires_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptInvitationResponse {
    pub success: bool,
    pub family_id: String,
    pub message: Option<String>,
}

/// Log line shipped from the browser to the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRequest {
    pub level: String,
    pub message: String,
    pub component: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_trimester_ranges() {
        for week in 1..=12 {
            assert_eq!(PregnancyTimeline::trimester_for_week(week), 1, "week {}", week);
        }
        for week in 13..=26 {
            assert_eq!(PregnancyTimeline::trimester_for_week(week), 2, "week {}", week);
        }
        for week in 27..=40 {
            assert_eq!(PregnancyTimeline::trimester_for_week(week), 3, "week {}", week);
        }
        assert_eq!(PregnancyTimeline::trimester_for_week(42), 3);
    }

    #[test]
    fn test_timeline_from_start_date() {
        let timeline = PregnancyTimeline::from_start_date(date("2025-01-01"), date("2025-03-05"));
        // 63 days -> week 10, day 0
        assert_eq!(timeline.days_completed, 63);
        assert_eq!(timeline.current_week, 10);
        assert_eq!(timeline.current_day, 0);
        assert_eq!(timeline.trimester, 1);
        assert_eq!(timeline.days_remaining(), 217);
    }

    #[test]
    fn test_timeline_before_start_clamps_to_week_one() {
        let timeline = PregnancyTimeline::from_start_date(date("2025-06-01"), date("2025-05-20"));
        assert_eq!(timeline.current_week, 1);
        assert_eq!(timeline.current_day, 0);
        assert_eq!(timeline.days_completed, 0);
    }

    #[test]
    fn test_timeline_overdue_caps_at_week_42() {
        let timeline = PregnancyTimeline::from_start_date(date("2024-01-01"), date("2025-01-01"));
        assert_eq!(timeline.current_week, MAX_PREGNANCY_WEEK);
        assert_eq!(timeline.current_day, 6);
        assert_eq!(timeline.trimester, 3);
        assert!(timeline.is_overdue());
        assert_eq!(timeline.days_remaining(), 0);
    }

    #[test]
    fn test_timeline_from_week_day_clamps() {
        let timeline = PregnancyTimeline::from_week_day(50, 9);
        assert_eq!(timeline.current_week, 42);
        assert_eq!(timeline.current_day, 6);

        let timeline = PregnancyTimeline::from_week_day(0, 3);
        assert_eq!(timeline.current_week, 1);
        assert_eq!(timeline.days_completed, 3);

        let timeline = PregnancyTimeline::from_week_day(20, 2);
        assert_eq!(timeline.trimester, 2);
        assert_eq!(timeline.days_completed, 135);
    }

    #[test]
    fn test_due_date() {
        assert_eq!(PregnancyTimeline::due_date(date("2025-01-01")), date("2025-10-08"));
    }

    #[test]
    fn test_parse_start_date() {
        let record = PregnancyRecord {
            id: "pregnancy::1".to_string(),
            start_date: "2025-02-14".to_string(),
            due_date: None,
        };
        assert_eq!(record.parse_start_date().unwrap(), date("2025-02-14"));

        let bad = PregnancyRecord {
            start_date: "14/02/2025".to_string(),
            ..record
        };
        assert_eq!(
            bad.parse_start_date(),
            Err(PregnancyDateError::InvalidFormat("14/02/2025".to_string()))
        );
        assert!(bad.timeline_on(date("2025-03-01")).is_err());
    }

    #[test]
    fn test_week_content_optional_fields_default() {
        let json = r#"{"week":8,"size_label":"a raspberry","icon":"🫐"}"#;
        let content: WeekContent = serde_json::from_str(json).unwrap();
        assert_eq!(content.week, 8);
        assert!(content.milestones.is_empty());
        assert!(content.development_focus.is_empty());
    }
}
