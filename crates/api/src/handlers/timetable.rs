//! Timetable handlers: the boundary where nested storage documents are
//! flattened into the per-slot records the frontend consumes, and flat
//! request bodies are nested back into documents.
//!
//! A `/api/timetables/:id` path parameter is parsed exactly once into a
//! [`TimetableTarget`]; composite `{timetableId}_{slotId}` ids address one
//! embedded slot, plain uuids address the whole document.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use timetable_core::errors::TimetableError;
use timetable_core::models::class::ClassSummary;
use timetable_core::models::day::Day;
use timetable_core::models::response::{DataResponse, ListResponse, MessageResponse};
use timetable_core::models::subject::SubjectSummary;
use timetable_core::models::target::TimetableTarget;
use timetable_core::models::timetable::{
    ClassRef, CreateTimetableRequest, FacultyRef, FlatTimeSlot, NewTimeSlot, SubjectRef, TimeSlot,
    Timetable, UpdateSlotRequest, UpdateTimetableDocument,
};
use timetable_core::models::user::UserSummary;
use timetable_db::is_unique_violation;
use timetable_db::models::DbTimetable;
use timetable_db::repositories;
use timetable_db::repositories::timetable::{SlotUpdate, TimetableFilter};

use crate::middleware::{auth, error_handling::AppError};
use crate::ApiState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTimetablesQuery {
    pub class_id: Option<Uuid>,
    pub day: Option<Day>,
    pub faculty_id: Option<Uuid>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[axum::debug_handler]
pub async fn list_timetables(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Query(query): Query<ListTimetablesQuery>,
) -> Result<Json<ListResponse<FlatTimeSlot>>, AppError> {
    auth::authenticate(&state.db_pool, &headers).await?;

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);
    let filter = TimetableFilter {
        class_id: query.class_id,
        day: query.day,
        faculty_id: query.faculty_id,
    };

    let (rows, matching_documents) =
        repositories::timetable::list_timetables(&state.db_pool, &filter, page, limit)
            .await
            .map_err(TimetableError::Database)?;
    tracing::debug!("Found {} matching timetable documents", matching_documents);

    let timetables = populate_many(&state.db_pool, rows).await?;
    let flattened: Vec<FlatTimeSlot> = timetables.iter().flat_map(Timetable::flatten).collect();
    tracing::debug!("Flattened into {} slot records", flattened.len());

    // count and total both report the flattened record count
    let total = flattened.len();
    Ok(Json(ListResponse::new(total, flattened)))
}

#[axum::debug_handler]
pub async fn get_timetable(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Timetable>>, AppError> {
    auth::authenticate(&state.db_pool, &headers).await?;

    // Single-document reads take a plain id; a composite slot id has no
    // nested document of its own to return.
    let TimetableTarget::Document(timetable_id) = TimetableTarget::parse(&id)? else {
        return Err(AppError(TimetableError::NotFound(
            "Timetable not found".to_string(),
        )));
    };

    let row = repositories::timetable::get_timetable_by_id(&state.db_pool, timetable_id)
        .await
        .map_err(TimetableError::Database)?
        .ok_or_else(|| TimetableError::NotFound("Timetable not found".to_string()))?;

    let timetable = populate(&state.db_pool, row).await?;
    Ok(Json(DataResponse::new(timetable)))
}

#[axum::debug_handler]
pub async fn create_timetable(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(payload): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<DataResponse<Timetable>>), AppError> {
    let user = auth::authenticate(&state.db_pool, &headers).await?;
    auth::require_admin(&user)?;

    let request: CreateTimetableRequest = serde_json::from_value(payload)
        .map_err(|err| TimetableError::Validation(format!("Invalid timetable payload: {err}")))?;

    let row = match request {
        CreateTimetableRequest::SlotEntry(entry) => {
            entry.validate()?;
            tracing::debug!(
                "Flat slot entry for class_id={}, day={}",
                entry.class_id,
                entry.day
            );
            repositories::timetable::create_slot_entry(
                &state.db_pool,
                entry.class_id,
                entry.day,
                entry.slot(),
            )
            .await
            .map_err(map_write_error)?
        }
        CreateTimetableRequest::Document(document) => {
            document.validate()?;
            tracing::debug!(
                "Nested document for class_id={}, day={}, slots={}",
                document.class_id,
                document.day,
                document.time_slots.len()
            );
            repositories::timetable::create_timetable(
                &state.db_pool,
                document.class_id,
                document.day,
                document.time_slots,
            )
            .await
            .map_err(map_write_error)?
        }
    };

    let timetable = populate(&state.db_pool, row).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(timetable))))
}

#[axum::debug_handler]
pub async fn update_timetable(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<DataResponse<Timetable>>, AppError> {
    let user = auth::authenticate(&state.db_pool, &headers).await?;
    auth::require_admin(&user)?;

    let row = match TimetableTarget::parse(&id)? {
        TimetableTarget::Slot {
            timetable_id,
            slot_id,
        } => {
            let patch: UpdateSlotRequest = serde_json::from_value(payload).map_err(|err| {
                TimetableError::Validation(format!("Invalid time slot payload: {err}"))
            })?;
            patch.validate()?;

            // The patch overwrites the parent's day and classId along with
            // the slot; every other slot in that document moves with it.
            let update = SlotUpdate {
                class_id: patch.class_id,
                day: patch.day,
                start_time: patch.start_time,
                end_time: patch.end_time,
                subject_id: patch.subject_id,
                faculty_id: patch.faculty_id,
                classroom: patch.room,
            };

            repositories::timetable::update_slot_fields(
                &state.db_pool,
                timetable_id,
                slot_id,
                update,
            )
            .await
            .map_err(map_write_error)?
            .ok_or_else(|| {
                TimetableError::NotFound("Timetable or time slot not found".to_string())
            })?
        }
        TimetableTarget::Document(timetable_id) => {
            let patch: UpdateTimetableDocument = serde_json::from_value(payload).map_err(|err| {
                TimetableError::Validation(format!("Invalid timetable payload: {err}"))
            })?;
            patch.validate()?;

            repositories::timetable::update_timetable(
                &state.db_pool,
                timetable_id,
                patch.class_id,
                patch.day,
                patch.time_slots,
            )
            .await
            .map_err(map_write_error)?
            .ok_or_else(|| TimetableError::NotFound("Timetable not found".to_string()))?
        }
    };

    let timetable = populate(&state.db_pool, row).await?;
    Ok(Json(DataResponse::new(timetable)))
}

#[axum::debug_handler]
pub async fn delete_timetable(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let user = auth::authenticate(&state.db_pool, &headers).await?;
    auth::require_admin(&user)?;

    match TimetableTarget::parse(&id)? {
        TimetableTarget::Slot {
            timetable_id,
            slot_id,
        } => {
            // remove_slot cascades: pulling the last slot deletes the
            // parent document as well.
            repositories::timetable::remove_slot(&state.db_pool, timetable_id, slot_id)
                .await
                .map_err(TimetableError::Database)?
                .ok_or_else(|| TimetableError::NotFound("Timetable not found".to_string()))?;

            Ok(Json(MessageResponse::new("Time slot deleted successfully")))
        }
        TimetableTarget::Document(timetable_id) => {
            let deleted =
                repositories::timetable::delete_timetable_by_id(&state.db_pool, timetable_id)
                    .await
                    .map_err(TimetableError::Database)?;
            if !deleted {
                return Err(AppError(TimetableError::NotFound(
                    "Timetable not found".to_string(),
                )));
            }

            Ok(Json(MessageResponse::new("Timetable deleted successfully")))
        }
    }
}

#[axum::debug_handler]
pub async fn add_time_slot(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<DataResponse<Timetable>>, AppError> {
    let user = auth::authenticate(&state.db_pool, &headers).await?;
    auth::require_admin(&user)?;

    let slot: NewTimeSlot = serde_json::from_value(payload)
        .map_err(|err| TimetableError::Validation(format!("Invalid time slot payload: {err}")))?;
    slot.validate()?;

    let row = repositories::timetable::append_slot(&state.db_pool, id, slot)
        .await
        .map_err(TimetableError::Database)?
        .ok_or_else(|| TimetableError::NotFound("Timetable not found".to_string()))?;

    let timetable = populate(&state.db_pool, row).await?;
    Ok(Json(DataResponse::new(timetable)))
}

#[axum::debug_handler]
pub async fn remove_time_slot(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path((id, slot_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<DataResponse<Timetable>>, AppError> {
    let user = auth::authenticate(&state.db_pool, &headers).await?;
    auth::require_admin(&user)?;

    let row = repositories::timetable::remove_slot(&state.db_pool, id, slot_id)
        .await
        .map_err(TimetableError::Database)?
        .ok_or_else(|| TimetableError::NotFound("Timetable not found".to_string()))?;

    let timetable = populate(&state.db_pool, row).await?;
    Ok(Json(DataResponse::new(timetable)))
}

/// Maps unique-constraint violations to the duplicate-value 400 the
/// frontend expects; everything else stays a database error.
fn map_write_error(err: eyre::Report) -> TimetableError {
    if is_unique_violation(&err) {
        TimetableError::Validation("Duplicate field value entered".to_string())
    } else {
        TimetableError::Database(err)
    }
}

async fn populate(pool: &sqlx::PgPool, row: DbTimetable) -> Result<Timetable, TimetableError> {
    let mut timetables = populate_many(pool, vec![row]).await?;
    timetables
        .pop()
        .ok_or_else(|| TimetableError::Internal("populated timetable missing".into()))
}

/// Resolves class, subject and faculty references for a batch of rows with
/// one lookup per entity kind. Dangling references degrade to the bare id.
async fn populate_many(
    pool: &sqlx::PgPool,
    rows: Vec<DbTimetable>,
) -> Result<Vec<Timetable>, TimetableError> {
    let mut class_ids: HashSet<Uuid> = HashSet::new();
    let mut subject_ids: HashSet<Uuid> = HashSet::new();
    let mut faculty_ids: HashSet<Uuid> = HashSet::new();
    for row in &rows {
        class_ids.insert(row.class_id);
        for slot in &row.time_slots.0 {
            subject_ids.insert(slot.subject_id);
            faculty_ids.insert(slot.faculty_id);
        }
    }

    let class_ids: Vec<Uuid> = class_ids.into_iter().collect();
    let subject_ids: Vec<Uuid> = subject_ids.into_iter().collect();
    let faculty_ids: Vec<Uuid> = faculty_ids.into_iter().collect();

    let classes = repositories::class::classes_by_ids(pool, &class_ids)
        .await
        .map_err(TimetableError::Database)?;
    let subjects = repositories::subject::subjects_by_ids(pool, &subject_ids)
        .await
        .map_err(TimetableError::Database)?;
    let users = repositories::user::users_by_ids(pool, &faculty_ids)
        .await
        .map_err(TimetableError::Database)?;

    let class_map: HashMap<Uuid, ClassSummary> =
        classes.iter().map(|class| (class.id, class.summary())).collect();
    let subject_map: HashMap<Uuid, SubjectSummary> =
        subjects.iter().map(|subject| (subject.id, subject.summary())).collect();
    let user_map: HashMap<Uuid, UserSummary> =
        users.iter().map(|user| (user.id, user.summary())).collect();

    rows.into_iter()
        .map(|row| assemble(row, &class_map, &subject_map, &user_map))
        .collect()
}

fn assemble(
    row: DbTimetable,
    class_map: &HashMap<Uuid, ClassSummary>,
    subject_map: &HashMap<Uuid, SubjectSummary>,
    user_map: &HashMap<Uuid, UserSummary>,
) -> Result<Timetable, TimetableError> {
    let day: Day = row.day.parse()?;

    let time_slots = row
        .time_slots
        .0
        .into_iter()
        .map(|slot| TimeSlot {
            id: slot.id,
            start_time: slot.start_time,
            end_time: slot.end_time,
            subject_id: subject_map
                .get(&slot.subject_id)
                .cloned()
                .map(SubjectRef::Populated)
                .unwrap_or(SubjectRef::Id(slot.subject_id)),
            faculty_id: user_map
                .get(&slot.faculty_id)
                .cloned()
                .map(FacultyRef::Populated)
                .unwrap_or(FacultyRef::Id(slot.faculty_id)),
            classroom: slot.classroom,
        })
        .collect();

    Ok(Timetable {
        id: row.id,
        class_id: class_map
            .get(&row.class_id)
            .cloned()
            .map(ClassRef::Populated)
            .unwrap_or(ClassRef::Id(row.class_id)),
        day,
        time_slots,
        created_at: row.created_at,
    })
}
