use chrono::{NaiveDate, NaiveTime};
use sqlx::{QueryBuilder, Sqlite};

use crate::db::DbPool;
use crate::errors::AppError;
use super::types::*;

const MEETING_COLUMNS: &str = "id, agenda, status, date_of_meeting, start_time, meeting_url";

#[derive(sqlx::FromRow)]
struct MeetingRow {
    id: i64,
    agenda: String,
    status: String,
    date_of_meeting: NaiveDate,
    start_time: NaiveTime,
    meeting_url: String,
}

impl TryFrom<MeetingRow> for Meeting {
    type Error = AppError;

    fn try_from(row: MeetingRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<MeetingStatus>()
            .map_err(|e| AppError::Db(sqlx::Error::Decode(e.into())))?;
        Ok(Meeting {
            id: row.id,
            agenda: row.agenda,
            status,
            date_of_meeting: row.date_of_meeting,
            start_time: row.start_time,
            meeting_url: row.meeting_url,
        })
    }
}

/// Insert a meeting and return it with its assigned id.
pub async fn create(pool: &DbPool, new: &NewMeeting) -> Result<Meeting, AppError> {
    let row = sqlx::query_as::<_, MeetingRow>(&format!(
        "INSERT INTO meetings (agenda, status, date_of_meeting, start_time, meeting_url) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING {MEETING_COLUMNS}"
    ))
    .bind(&new.agenda)
    .bind(new.status.as_str())
    .bind(new.date_of_meeting)
    .bind(new.start_time)
    .bind(&new.meeting_url)
    .fetch_one(pool)
    .await?;

    Meeting::try_from(row)
}

pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Meeting>, AppError> {
    let row = sqlx::query_as::<_, MeetingRow>(&format!(
        "SELECT {MEETING_COLUMNS} FROM meetings WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(Meeting::try_from).transpose()
}

/// All meetings matching `filter`, newest date first, then latest start time.
/// Meetings with the same date and time keep insertion order.
pub async fn find_all(pool: &DbPool, filter: &MeetingFilter) -> Result<Vec<Meeting>, AppError> {
    let mut qb: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {MEETING_COLUMNS} FROM meetings WHERE 1=1"));

    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status.as_str());
    }
    if let Some(date) = filter.date_of_meeting {
        qb.push(" AND date_of_meeting = ").push_bind(date);
    }
    if let Some(term) = filter.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        let pattern = format!("%{}%", escape_like(term));
        qb.push(" AND (agenda LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR meeting_url LIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\')");
    }
    qb.push(" ORDER BY date_of_meeting DESC, start_time DESC, id ASC");

    let rows = qb.build_query_as::<MeetingRow>().fetch_all(pool).await?;
    rows.into_iter().map(Meeting::try_from).collect()
}

/// Apply `changes` to the meeting. Returns `None` if no such meeting exists.
pub async fn update(
    pool: &DbPool,
    id: i64,
    changes: &MeetingChanges,
) -> Result<Option<Meeting>, AppError> {
    let row = sqlx::query_as::<_, MeetingRow>(&format!(
        "UPDATE meetings SET \
             agenda = COALESCE($1, agenda), \
             status = COALESCE($2, status), \
             date_of_meeting = COALESCE($3, date_of_meeting), \
             start_time = COALESCE($4, start_time), \
             meeting_url = COALESCE($5, meeting_url) \
         WHERE id = $6 \
         RETURNING {MEETING_COLUMNS}"
    ))
    .bind(changes.agenda.as_deref())
    .bind(changes.status.map(|s| s.as_str()))
    .bind(changes.date_of_meeting)
    .bind(changes.start_time)
    .bind(changes.meeting_url.as_deref())
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(Meeting::try_from).transpose()
}

/// Delete a meeting. Returns `false` if it did not exist.
pub async fn delete(pool: &DbPool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM meetings WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
