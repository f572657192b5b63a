use std::fmt;

use uuid::Uuid;

use crate::errors::TimetableError;

/// What a `/api/timetables/:id` path parameter addresses.
///
/// The frontend addresses individual time slots with a composite id of the
/// form `{timetableId}_{slotId}`, while whole documents are addressed by a
/// plain uuid. Uuids never contain `_`, so the two forms cannot collide.
/// The raw path string is parsed into this enum exactly once at the HTTP
/// boundary; everything downstream dispatches on the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimetableTarget {
    /// A whole timetable document.
    Document(Uuid),
    /// One embedded time slot within a document.
    Slot { timetable_id: Uuid, slot_id: Uuid },
}

impl TimetableTarget {
    /// Parses a path id, composite or plain.
    ///
    /// Ids that are neither a uuid nor a pair of uuids joined by `_` map to
    /// `NotFound`: the original backend fed such strings straight into the
    /// store's id cast and surfaced the failure as a 404.
    pub fn parse(raw: &str) -> Result<Self, TimetableError> {
        match raw.split_once('_') {
            Some((timetable, slot)) => {
                let timetable_id = Uuid::parse_str(timetable)
                    .map_err(|_| TimetableError::NotFound("Timetable not found".to_string()))?;
                let slot_id = Uuid::parse_str(slot)
                    .map_err(|_| TimetableError::NotFound("Time slot not found".to_string()))?;
                Ok(TimetableTarget::Slot {
                    timetable_id,
                    slot_id,
                })
            }
            None => {
                let id = Uuid::parse_str(raw)
                    .map_err(|_| TimetableError::NotFound("Timetable not found".to_string()))?;
                Ok(TimetableTarget::Document(id))
            }
        }
    }

    /// Composite id for an embedded slot, as handed to the frontend.
    pub fn slot(timetable_id: Uuid, slot_id: Uuid) -> Self {
        TimetableTarget::Slot {
            timetable_id,
            slot_id,
        }
    }
}

impl fmt::Display for TimetableTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimetableTarget::Document(id) => write!(f, "{id}"),
            TimetableTarget::Slot {
                timetable_id,
                slot_id,
            } => write!(f, "{timetable_id}_{slot_id}"),
        }
    }
}
