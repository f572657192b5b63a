use eyre::eyre;
use mockall::predicate;
use uuid::Uuid;

use timetable_core::errors::TimetableError;
use timetable_core::models::day::Day;
use timetable_core::models::timetable::{NewTimeSlot, UpdateSlotRequest};
use timetable_db::models::DbTimetable;
use timetable_db::repositories::timetable::SlotUpdate;

use crate::test_utils::{db_timetable, stored_slot, TestContext};
use timetable_api::middleware::error_handling::AppError;

fn new_slot(start: &str, end: &str) -> NewTimeSlot {
    NewTimeSlot {
        start_time: start.to_string(),
        end_time: end.to_string(),
        subject_id: Uuid::new_v4(),
        faculty_id: Uuid::new_v4(),
        classroom: "A101".to_string(),
    }
}

// Mirrors the upsert-by-day policy the create handler drives: append to
// the existing (class, day) document, create one otherwise.
async fn upsert_slot_entry_wrapper(
    ctx: &TestContext,
    class_id: Uuid,
    day: Day,
    slot: NewTimeSlot,
) -> eyre::Result<DbTimetable> {
    if let Some(existing) = ctx
        .timetable_repo
        .find_by_class_and_day(class_id, day)
        .await?
    {
        return ctx
            .timetable_repo
            .append_slot(existing.id, slot)
            .await?
            .ok_or_else(|| eyre!("timetable vanished during append"));
    }

    ctx.timetable_repo
        .create_timetable(class_id, day, vec![slot])
        .await
}

// Mirrors the store's cascade-on-empty: pulling the last slot deletes the
// parent document.
async fn remove_slot_with_cascade_wrapper(
    ctx: &TestContext,
    timetable_id: Uuid,
    slot_id: Uuid,
) -> eyre::Result<Option<DbTimetable>> {
    let row = ctx.timetable_repo.remove_slot(timetable_id, slot_id).await?;

    if let Some(updated) = &row {
        if updated.time_slots.0.is_empty() {
            ctx.timetable_repo
                .delete_timetable_by_id(timetable_id)
                .await?;
        }
    }

    Ok(row)
}

// Mirrors the composite-id update path: validate the flat patch, then
// overwrite the slot plus the parent's day/classId.
async fn update_slot_wrapper(
    ctx: &TestContext,
    timetable_id: Uuid,
    slot_id: Uuid,
    patch: UpdateSlotRequest,
) -> Result<DbTimetable, AppError> {
    patch.validate()?;

    let update = SlotUpdate {
        class_id: patch.class_id,
        day: patch.day,
        start_time: patch.start_time,
        end_time: patch.end_time,
        subject_id: patch.subject_id,
        faculty_id: patch.faculty_id,
        classroom: patch.room,
    };

    ctx.timetable_repo
        .update_slot_fields(timetable_id, slot_id, update)
        .await?
        .ok_or_else(|| {
            AppError(TimetableError::NotFound(
                "Timetable or time slot not found".to_string(),
            ))
        })
}

#[tokio::test]
async fn test_slot_entry_creates_document_when_none_exists() {
    let mut ctx = TestContext::new();
    let class_id = Uuid::new_v4();

    ctx.timetable_repo
        .expect_find_by_class_and_day()
        .with(predicate::eq(class_id), predicate::eq(Day::Monday))
        .times(1)
        .returning(|_, _| Ok(None));

    ctx.timetable_repo
        .expect_create_timetable()
        .with(
            predicate::eq(class_id),
            predicate::eq(Day::Monday),
            predicate::always(),
        )
        .times(1)
        .returning(|class_id, day, slots| {
            let stored = slots
                .iter()
                .map(|slot| {
                    let mut s = stored_slot(&slot.start_time, &slot.end_time);
                    s.classroom = slot.classroom.clone();
                    s
                })
                .collect();
            Ok(db_timetable(class_id, day.as_str(), stored))
        });

    ctx.timetable_repo.expect_append_slot().times(0);

    let result =
        upsert_slot_entry_wrapper(&ctx, class_id, Day::Monday, new_slot("09:00", "10:00")).await;

    let timetable = result.unwrap();
    assert_eq!(timetable.time_slots.0.len(), 1);
    assert_eq!(timetable.day, "Monday");
}

#[tokio::test]
async fn test_second_slot_entry_appends_to_same_document() {
    let mut ctx = TestContext::new();
    let class_id = Uuid::new_v4();
    let existing = db_timetable(class_id, "Monday", vec![stored_slot("09:00", "10:00")]);
    let existing_id = existing.id;
    let existing_slot = existing.time_slots.0[0].clone();

    ctx.timetable_repo
        .expect_find_by_class_and_day()
        .with(predicate::eq(class_id), predicate::eq(Day::Monday))
        .times(1)
        .returning(move |_, _| Ok(Some(existing.clone())));

    ctx.timetable_repo
        .expect_append_slot()
        .with(predicate::eq(existing_id), predicate::always())
        .times(1)
        .returning(move |timetable_id, slot| {
            let mut appended = stored_slot(&slot.start_time, &slot.end_time);
            appended.classroom = slot.classroom.clone();
            let mut row = db_timetable(class_id, "Monday", vec![existing_slot.clone(), appended]);
            row.id = timetable_id;
            Ok(Some(row))
        });

    ctx.timetable_repo.expect_create_timetable().times(0);

    let result =
        upsert_slot_entry_wrapper(&ctx, class_id, Day::Monday, new_slot("10:00", "11:00")).await;

    let timetable = result.unwrap();
    assert_eq!(timetable.id, existing_id);
    assert_eq!(timetable.time_slots.0.len(), 2);
}

#[tokio::test]
async fn test_removing_last_slot_deletes_parent_document() {
    let mut ctx = TestContext::new();
    let class_id = Uuid::new_v4();
    let timetable_id = Uuid::new_v4();
    let slot_id = Uuid::new_v4();

    ctx.timetable_repo
        .expect_remove_slot()
        .with(predicate::eq(timetable_id), predicate::eq(slot_id))
        .times(1)
        .returning(move |timetable_id, _| {
            let mut row = db_timetable(class_id, "Monday", vec![]);
            row.id = timetable_id;
            Ok(Some(row))
        });

    ctx.timetable_repo
        .expect_delete_timetable_by_id()
        .with(predicate::eq(timetable_id))
        .times(1)
        .returning(|_| Ok(true));

    let result = remove_slot_with_cascade_wrapper(&ctx, timetable_id, slot_id).await;

    let row = result.unwrap().unwrap();
    assert!(row.time_slots.0.is_empty());
}

#[tokio::test]
async fn test_removing_one_of_many_slots_keeps_parent_document() {
    let mut ctx = TestContext::new();
    let class_id = Uuid::new_v4();
    let timetable_id = Uuid::new_v4();
    let slot_id = Uuid::new_v4();

    ctx.timetable_repo
        .expect_remove_slot()
        .with(predicate::eq(timetable_id), predicate::eq(slot_id))
        .times(1)
        .returning(move |timetable_id, _| {
            let mut row = db_timetable(class_id, "Monday", vec![stored_slot("11:00", "12:00")]);
            row.id = timetable_id;
            Ok(Some(row))
        });

    ctx.timetable_repo.expect_delete_timetable_by_id().times(0);

    let result = remove_slot_with_cascade_wrapper(&ctx, timetable_id, slot_id).await;

    let row = result.unwrap().unwrap();
    assert_eq!(row.time_slots.0.len(), 1);
}

#[tokio::test]
async fn test_composite_update_moves_parent_day_and_class() {
    let mut ctx = TestContext::new();
    let timetable_id = Uuid::new_v4();
    let slot_id = Uuid::new_v4();
    let new_class_id = Uuid::new_v4();
    let subject_id = Uuid::new_v4();
    let faculty_id = Uuid::new_v4();

    let patch = UpdateSlotRequest {
        class_id: new_class_id,
        day: Day::Tuesday,
        subject_id,
        faculty_id,
        start_time: "11:00".to_string(),
        end_time: "12:00".to_string(),
        room: "B2".to_string(),
    };

    let expected_update = SlotUpdate {
        class_id: new_class_id,
        day: Day::Tuesday,
        start_time: "11:00".to_string(),
        end_time: "12:00".to_string(),
        subject_id,
        faculty_id,
        classroom: "B2".to_string(),
    };

    ctx.timetable_repo
        .expect_update_slot_fields()
        .with(
            predicate::eq(timetable_id),
            predicate::eq(slot_id),
            predicate::eq(expected_update),
        )
        .times(1)
        .returning(move |timetable_id, slot_id, update| {
            // The untouched sibling slot moves to the new day/class too.
            let sibling = stored_slot("09:00", "10:00");
            let mut updated = stored_slot(&update.start_time, &update.end_time);
            updated.id = slot_id;
            updated.classroom = update.classroom.clone();
            let mut row =
                db_timetable(update.class_id, update.day.as_str(), vec![sibling, updated]);
            row.id = timetable_id;
            Ok(Some(row))
        });

    let row = update_slot_wrapper(&ctx, timetable_id, slot_id, patch)
        .await
        .unwrap();

    assert_eq!(row.day, "Tuesday");
    assert_eq!(row.class_id, new_class_id);
    assert_eq!(row.time_slots.0.len(), 2);
    let updated = row
        .time_slots
        .0
        .iter()
        .find(|slot| slot.id == slot_id)
        .unwrap();
    assert_eq!(updated.start_time, "11:00");
    assert_eq!(updated.classroom, "B2");
}

#[tokio::test]
async fn test_composite_update_of_missing_slot_is_not_found() {
    let mut ctx = TestContext::new();
    let timetable_id = Uuid::new_v4();
    let slot_id = Uuid::new_v4();

    ctx.timetable_repo
        .expect_update_slot_fields()
        .times(1)
        .returning(|_, _, _| Ok(None));

    let patch = UpdateSlotRequest {
        class_id: Uuid::new_v4(),
        day: Day::Tuesday,
        subject_id: Uuid::new_v4(),
        faculty_id: Uuid::new_v4(),
        start_time: "11:00".to_string(),
        end_time: "12:00".to_string(),
        room: "B2".to_string(),
    };

    let result = update_slot_wrapper(&ctx, timetable_id, slot_id, patch).await;

    match result.unwrap_err().0 {
        TimetableError::NotFound(_) => {}
        other => panic!("Expected NotFound error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_composite_update_rejects_malformed_times() {
    let ctx = TestContext::new();
    // No repository expectations: validation fails before any store call.

    let patch = UpdateSlotRequest {
        class_id: Uuid::new_v4(),
        day: Day::Tuesday,
        subject_id: Uuid::new_v4(),
        faculty_id: Uuid::new_v4(),
        start_time: "11am".to_string(),
        end_time: "12:00".to_string(),
        room: "B2".to_string(),
    };

    let result = update_slot_wrapper(&ctx, Uuid::new_v4(), Uuid::new_v4(), patch).await;

    match result.unwrap_err().0 {
        TimetableError::Validation(message) => assert!(message.contains("startTime")),
        other => panic!("Expected Validation error, got: {other:?}"),
    }
}
