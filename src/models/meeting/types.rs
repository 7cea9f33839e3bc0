use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Lifecycle label of a meeting. Any value may be set directly; there are
/// no transition rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingStatus {
    #[default]
    Upcoming,
    InReview,
    Cancelled,
    Overdue,
    Published,
}

impl MeetingStatus {
    pub const ALL: [MeetingStatus; 5] = [
        MeetingStatus::Upcoming,
        MeetingStatus::InReview,
        MeetingStatus::Cancelled,
        MeetingStatus::Overdue,
        MeetingStatus::Published,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingStatus::Upcoming => "upcoming",
            MeetingStatus::InReview => "in_review",
            MeetingStatus::Cancelled => "cancelled",
            MeetingStatus::Overdue => "overdue",
            MeetingStatus::Published => "published",
        }
    }
}

impl fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeetingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MeetingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("\"{s}\" is not a valid choice."))
    }
}

/// A stored meeting, also its JSON representation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meeting {
    pub id: i64,
    pub agenda: String,
    pub status: MeetingStatus,
    pub date_of_meeting: NaiveDate,
    pub start_time: NaiveTime,
    pub meeting_url: String,
}

/// Validated fields for inserting a meeting.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMeeting {
    pub agenda: String,
    pub status: MeetingStatus,
    pub date_of_meeting: NaiveDate,
    pub start_time: NaiveTime,
    pub meeting_url: String,
}

/// Validated fields for an update; `None` leaves the stored value as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeetingChanges {
    pub agenda: Option<String>,
    pub status: Option<MeetingStatus>,
    pub date_of_meeting: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub meeting_url: Option<String>,
}

/// Optional list filters. All set filters must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeetingFilter {
    pub status: Option<MeetingStatus>,
    pub date_of_meeting: Option<NaiveDate>,
    /// Case-insensitive substring of agenda or meeting_url.
    pub search: Option<String>,
}
