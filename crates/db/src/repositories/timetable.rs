//! The timetable store: one row per (class, day) document, slots embedded
//! in a JSONB column so every mutation below is a single-row write.

use chrono::Utc;
use eyre::{eyre, Result};
use serde_json::json;
use sqlx::types::Json;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use timetable_core::models::day::Day;
use timetable_core::models::timetable::NewTimeSlot;

use crate::is_unique_violation;
use crate::models::{DbTimetable, StoredTimeSlot};

/// Optional list filters, combined with AND. `faculty_id` matches slot
/// membership inside `time_slots`, not a document-level column.
#[derive(Debug, Default, Clone)]
pub struct TimetableFilter {
    pub class_id: Option<Uuid>,
    pub day: Option<Day>,
    pub faculty_id: Option<Uuid>,
}

/// Targeted overwrite for one embedded slot. The parent's `day` and
/// `class_id` travel with it and are overwritten too.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotUpdate {
    pub class_id: Uuid,
    pub day: Day,
    pub start_time: String,
    pub end_time: String,
    pub subject_id: Uuid,
    pub faculty_id: Uuid,
    pub classroom: String,
}

pub async fn list_timetables(
    pool: &Pool<Postgres>,
    filter: &TimetableFilter,
    page: u32,
    limit: u32,
) -> Result<(Vec<DbTimetable>, usize)> {
    tracing::debug!(
        "Listing timetables: class_id={:?}, day={:?}, faculty_id={:?}, page={}, limit={}",
        filter.class_id,
        filter.day,
        filter.faculty_id,
        page,
        limit
    );

    let faculty_member = filter
        .faculty_id
        .map(|id| Json(json!([{ "faculty_id": id }])));

    let mut rows = sqlx::query_as::<_, DbTimetable>(
        r#"
        SELECT id, class_id, day, time_slots, created_at
        FROM timetables
        WHERE ($1::uuid IS NULL OR class_id = $1)
          AND ($2::text IS NULL OR day = $2)
          AND ($3::jsonb IS NULL OR time_slots @> $3)
        "#,
    )
    .bind(filter.class_id)
    .bind(filter.day.map(|day| day.to_string()))
    .bind(faculty_member)
    .fetch_all(pool)
    .await?;

    let total = rows.len();
    sort_for_listing(&mut rows);

    let skip = page.saturating_sub(1) as usize * limit as usize;
    let rows = rows
        .into_iter()
        .skip(skip)
        .take(limit as usize)
        .collect::<Vec<_>>();

    Ok((rows, total))
}

pub async fn get_timetable_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbTimetable>> {
    let row = sqlx::query_as::<_, DbTimetable>(
        r#"
        SELECT id, class_id, day, time_slots, created_at
        FROM timetables
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn find_by_class_and_day(
    pool: &Pool<Postgres>,
    class_id: Uuid,
    day: Day,
) -> Result<Option<DbTimetable>> {
    let row = sqlx::query_as::<_, DbTimetable>(
        r#"
        SELECT id, class_id, day, time_slots, created_at
        FROM timetables
        WHERE class_id = $1 AND day = $2
        "#,
    )
    .bind(class_id)
    .bind(day.to_string())
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Creates a document. An empty slot list is allowed; slot ids are
/// assigned on embed.
pub async fn create_timetable(
    pool: &Pool<Postgres>,
    class_id: Uuid,
    day: Day,
    slots: Vec<NewTimeSlot>,
) -> Result<DbTimetable> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let slots: Vec<StoredTimeSlot> = slots.into_iter().map(StoredTimeSlot::from_new).collect();

    tracing::debug!(
        "Creating timetable: id={}, class_id={}, day={}, slots={}",
        id,
        class_id,
        day,
        slots.len()
    );

    let row = sqlx::query_as::<_, DbTimetable>(
        r#"
        INSERT INTO timetables (id, class_id, day, time_slots, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, class_id, day, time_slots, created_at
        "#,
    )
    .bind(id)
    .bind(class_id)
    .bind(day.to_string())
    .bind(Json(slots))
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Upsert-by-day: appends the slot to the existing (class, day) document,
/// creating the document when there is none. A create that loses the
/// unique-constraint race falls back to appending to the winner's row, so
/// concurrent entries for the same (class, day) converge on one document.
pub async fn create_slot_entry(
    pool: &Pool<Postgres>,
    class_id: Uuid,
    day: Day,
    slot: NewTimeSlot,
) -> Result<DbTimetable> {
    if let Some(existing) = find_by_class_and_day(pool, class_id, day).await? {
        tracing::debug!("Appending slot to existing timetable: id={}", existing.id);
        return append_slot(pool, existing.id, slot)
            .await?
            .ok_or_else(|| eyre!("Timetable {} disappeared during append", existing.id));
    }

    tracing::debug!("Creating new timetable for class_id={}, day={}", class_id, day);
    match create_timetable(pool, class_id, day, vec![slot.clone()]).await {
        Ok(row) => Ok(row),
        Err(err) if is_unique_violation(&err) => {
            let existing = find_by_class_and_day(pool, class_id, day)
                .await?
                .ok_or_else(|| eyre!("Timetable for ({class_id}, {day}) vanished after conflict"))?;
            append_slot(pool, existing.id, slot)
                .await?
                .ok_or_else(|| eyre!("Timetable {} disappeared during append", existing.id))
        }
        Err(err) => Err(err),
    }
}

/// Merge-style whole-document update; absent fields keep their value.
/// Never creates a missing document.
pub async fn update_timetable(
    pool: &Pool<Postgres>,
    id: Uuid,
    class_id: Option<Uuid>,
    day: Option<Day>,
    time_slots: Option<Vec<NewTimeSlot>>,
) -> Result<Option<DbTimetable>> {
    let slots = time_slots
        .map(|slots| Json(slots.into_iter().map(StoredTimeSlot::from_new).collect::<Vec<_>>()));

    let row = sqlx::query_as::<_, DbTimetable>(
        r#"
        UPDATE timetables
        SET class_id = COALESCE($2::uuid, class_id),
            day = COALESCE($3::text, day),
            time_slots = COALESCE($4::jsonb, time_slots)
        WHERE id = $1
        RETURNING id, class_id, day, time_slots, created_at
        "#,
    )
    .bind(id)
    .bind(class_id)
    .bind(day.map(|day| day.to_string()))
    .bind(slots)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Overwrites one embedded slot plus the parent's `day`/`class_id` in a
/// single statement. `None` when the document or the slot is missing.
pub async fn update_slot_fields(
    pool: &Pool<Postgres>,
    timetable_id: Uuid,
    slot_id: Uuid,
    update: SlotUpdate,
) -> Result<Option<DbTimetable>> {
    let patch = Json(json!({
        "start_time": update.start_time,
        "end_time": update.end_time,
        "subject_id": update.subject_id,
        "faculty_id": update.faculty_id,
        "classroom": update.classroom,
    }));
    let slot_member = Json(json!([{ "id": slot_id }]));

    let row = sqlx::query_as::<_, DbTimetable>(
        r#"
        UPDATE timetables
        SET day = $3,
            class_id = $4,
            time_slots = (
                SELECT jsonb_agg(
                    CASE WHEN slot->>'id' = $2 THEN slot || $5::jsonb ELSE slot END
                )
                FROM jsonb_array_elements(time_slots) AS slot
            )
        WHERE id = $1 AND time_slots @> $6
        RETURNING id, class_id, day, time_slots, created_at
        "#,
    )
    .bind(timetable_id)
    .bind(slot_id.to_string())
    .bind(update.day.to_string())
    .bind(update.class_id)
    .bind(patch)
    .bind(slot_member)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Appends one slot. `None` when the document is missing.
pub async fn append_slot(
    pool: &Pool<Postgres>,
    timetable_id: Uuid,
    slot: NewTimeSlot,
) -> Result<Option<DbTimetable>> {
    let stored = StoredTimeSlot::from_new(slot);

    let row = sqlx::query_as::<_, DbTimetable>(
        r#"
        UPDATE timetables
        SET time_slots = time_slots || $2::jsonb
        WHERE id = $1
        RETURNING id, class_id, day, time_slots, created_at
        "#,
    )
    .bind(timetable_id)
    .bind(Json(vec![stored]))
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Removes the named slot. Removing the last slot also deletes the parent
/// document, in the same transaction. Returns the post-removal state
/// (possibly empty) or `None` when the document is missing; a slot id
/// with no match leaves the document untouched.
pub async fn remove_slot(
    pool: &Pool<Postgres>,
    timetable_id: Uuid,
    slot_id: Uuid,
) -> Result<Option<DbTimetable>> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, DbTimetable>(
        r#"
        UPDATE timetables
        SET time_slots = (
            SELECT COALESCE(jsonb_agg(slot), '[]'::jsonb)
            FROM jsonb_array_elements(time_slots) AS slot
            WHERE slot->>'id' <> $2
        )
        WHERE id = $1
        RETURNING id, class_id, day, time_slots, created_at
        "#,
    )
    .bind(timetable_id)
    .bind(slot_id.to_string())
    .fetch_optional(&mut *tx)
    .await?;

    if let Some(updated) = &row {
        if updated.time_slots.0.is_empty() {
            tracing::debug!("No time slots left, deleting timetable: id={}", timetable_id);
            sqlx::query("DELETE FROM timetables WHERE id = $1")
                .bind(timetable_id)
                .execute(&mut *tx)
                .await?;
        }
    }

    tx.commit().await?;
    Ok(row)
}

pub async fn delete_timetable_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM timetables WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Listing order: weekday, then earliest slot start, then creation time as
/// the stable tie-break. Documents with no slots sort first within their
/// day; "HH:MM" strings are zero-padded so string order is time order.
fn sort_for_listing(rows: &mut [DbTimetable]) {
    rows.sort_by(|a, b| {
        day_ordinal(&a.day)
            .cmp(&day_ordinal(&b.day))
            .then_with(|| earliest_start(a).cmp(&earliest_start(b)))
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
}

fn day_ordinal(day: &str) -> u8 {
    // The day column is CHECK-constrained; unknown values sort last.
    day.parse::<Day>().map(Day::ordinal).unwrap_or(u8::MAX)
}

fn earliest_start(row: &DbTimetable) -> Option<&str> {
    row.time_slots
        .0
        .iter()
        .map(|slot| slot.start_time.as_str())
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use pretty_assertions::assert_eq;

    fn row(day: &str, starts: &[&str], created_offset_mins: i64) -> DbTimetable {
        let slots = starts
            .iter()
            .map(|start| StoredTimeSlot {
                id: Uuid::new_v4(),
                start_time: (*start).to_string(),
                end_time: "23:59".to_string(),
                subject_id: Uuid::new_v4(),
                faculty_id: Uuid::new_v4(),
                classroom: "A101".to_string(),
            })
            .collect();
        DbTimetable {
            id: Uuid::new_v4(),
            class_id: Uuid::new_v4(),
            day: day.to_string(),
            time_slots: Json(slots),
            created_at: Utc::now() + Duration::minutes(created_offset_mins),
        }
    }

    #[test]
    fn sorts_by_weekday_then_earliest_start() {
        let mut rows = vec![
            row("Wednesday", &["08:00"], 0),
            row("Monday", &["11:00"], 0),
            row("Monday", &["09:00"], 0),
        ];

        sort_for_listing(&mut rows);

        let order: Vec<(&str, Option<&str>)> = rows
            .iter()
            .map(|r| (r.day.as_str(), earliest_start(r)))
            .collect();
        assert_eq!(
            order,
            vec![
                ("Monday", Some("09:00")),
                ("Monday", Some("11:00")),
                ("Wednesday", Some("08:00")),
            ]
        );
    }

    #[test]
    fn earliest_start_ignores_slot_order() {
        let r = row("Friday", &["14:00", "08:30", "10:00"], 0);
        assert_eq!(earliest_start(&r), Some("08:30"));
    }

    #[test]
    fn slotless_documents_sort_first_within_their_day() {
        let mut rows = vec![row("Tuesday", &["07:00"], 0), row("Tuesday", &[], 0)];

        sort_for_listing(&mut rows);

        assert!(rows[0].time_slots.0.is_empty());
    }

    #[test]
    fn creation_time_breaks_equal_day_and_start() {
        let older = row("Monday", &["09:00"], -10);
        let newer = row("Monday", &["09:00"], 10);
        let older_id = older.id;

        let mut rows = vec![newer, older];
        sort_for_listing(&mut rows);

        assert_eq!(rows[0].id, older_id);
    }
}
