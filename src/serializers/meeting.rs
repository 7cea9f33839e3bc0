use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::models::meeting::{MeetingChanges, MeetingFilter, MeetingStatus, NewMeeting};
use super::{FieldErrors, check_text, read_string};

pub const AGENDA_MAX_LEN: usize = 255;
pub const MEETING_URL_MAX_LEN: usize = 200;

const DATE_FORMAT_ERROR: &str =
    "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";
const TIME_FORMAT_ERROR: &str =
    "Time has wrong format. Use one of these formats instead: hh:mm[:ss[.uuuuuu]].";
const INVALID_URL: &str = "Enter a valid URL.";

/// How strictly a meeting body is checked for missing fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// POST and PUT: every field without a default must be present.
    Full,
    /// PATCH: only the fields present are validated.
    Partial,
}

/// Validate a create body.
pub fn validate_new(data: &Map<String, Value>) -> Result<NewMeeting, FieldErrors> {
    match validate_changes(data, Mode::Full)? {
        MeetingChanges {
            agenda: Some(agenda),
            status,
            date_of_meeting: Some(date_of_meeting),
            start_time: Some(start_time),
            meeting_url: Some(meeting_url),
        } => Ok(NewMeeting {
            agenda,
            status: status.unwrap_or_default(),
            date_of_meeting,
            start_time,
            meeting_url,
        }),
        _ => Err(FieldErrors::single("non_field_errors", "Invalid data.")),
    }
}

/// Validate an update body. `id` and unknown keys are ignored.
pub fn validate_changes(data: &Map<String, Value>, mode: Mode) -> Result<MeetingChanges, FieldErrors> {
    let required = mode == Mode::Full;
    let mut errors = FieldErrors::new();
    let mut changes = MeetingChanges::default();

    match read_string(data, "agenda", required)
        .and_then(|v| v.map(|s| check_text(&s, AGENDA_MAX_LEN)).transpose())
    {
        Ok(v) => changes.agenda = v,
        Err(e) => errors.add("agenda", e),
    }

    // status has a default, so it is never required
    match read_string(data, "status", false)
        .and_then(|v| v.map(|s| s.parse::<MeetingStatus>()).transpose())
    {
        Ok(v) => changes.status = v,
        Err(e) => errors.add("status", e),
    }

    match read_string(data, "date_of_meeting", required)
        .and_then(|v| v.map(|s| parse_date(&s)).transpose())
    {
        Ok(v) => changes.date_of_meeting = v,
        Err(e) => errors.add("date_of_meeting", e),
    }

    match read_string(data, "start_time", required)
        .and_then(|v| v.map(|s| parse_time(&s)).transpose())
    {
        Ok(v) => changes.start_time = v,
        Err(e) => errors.add("start_time", e),
    }

    match read_string(data, "meeting_url", required)
        .and_then(|v| v.map(|s| check_url(&s)).transpose())
    {
        Ok(v) => changes.meeting_url = v,
        Err(e) => errors.add("meeting_url", e),
    }

    errors.finish(changes)
}

/// Raw `GET /meetings/` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    pub date_of_meeting: Option<String>,
    pub search: Option<String>,
}

/// Validate list filters. Empty parameters are treated as absent.
pub fn validate_filter(params: &ListParams) -> Result<MeetingFilter, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut filter = MeetingFilter::default();

    if let Some(raw) = params.status.as_deref().filter(|s| !s.is_empty()) {
        match raw.parse::<MeetingStatus>() {
            Ok(status) => filter.status = Some(status),
            Err(_) => errors.add(
                "status",
                format!("Select a valid choice. {raw} is not one of the available choices."),
            ),
        }
    }
    if let Some(raw) = params.date_of_meeting.as_deref().filter(|s| !s.is_empty()) {
        match parse_date(raw) {
            Ok(date) => filter.date_of_meeting = Some(date),
            Err(_) => errors.add("date_of_meeting", "Enter a valid date."),
        }
    }
    filter.search = params
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from);

    errors.finish(filter)
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| DATE_FORMAT_ERROR.to_string())
}

fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    let raw = raw.trim();
    ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| TIME_FORMAT_ERROR.to_string())
}

/// Syntactic URL check only: allowed scheme plus a host. No reachability.
fn check_url(raw: &str) -> Result<String, String> {
    let value = check_text(raw, MEETING_URL_MAX_LEN)?;
    let parsed = url::Url::parse(&value).map_err(|_| INVALID_URL.to_string())?;
    let scheme_ok = matches!(parsed.scheme(), "http" | "https" | "ftp" | "ftps");
    let host_ok = parsed.host_str().is_some_and(|h| !h.is_empty());
    if scheme_ok && host_ok && !value.contains(char::is_whitespace) {
        Ok(value)
    } else {
        Err(INVALID_URL.to_string())
    }
}
