// ── Wire-to-domain conversion ──
//
// The single place where `portwatch-api` payload types become domain
// types. Applies the documented defaults: missing name -> "Unknown",
// empty-string ids and MACs treated as absent. Present values pass
// through verbatim.

use chrono::Utc;

use portwatch_api::{PersonRecord, StatusPayload};

use crate::model::{MacAddress, Person, PersonId, Snapshot};

/// Convert a raw status payload into a domain [`Snapshot`], stamped with
/// the current time.
pub fn snapshot_from_payload(payload: StatusPayload) -> Snapshot {
    Snapshot {
        approval_pending: payload.approval_pending,
        pending_count: payload.pending_count,
        approved_count: payload.approved_count,
        tracked_count: payload.tracked_count,
        people_count: payload.people_count,
        people: payload.people.into_iter().map(person_from_record).collect(),
        fetched_at: Utc::now(),
    }
}

fn person_from_record(record: PersonRecord) -> Person {
    Person {
        id: record
            .id
            .filter(|s| !s.is_empty())
            .map(PersonId::from),
        name: record
            .name
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "Unknown".to_owned()),
        online: record.online,
        phone_mac: record
            .phone_mac
            .filter(|s| !s.is_empty())
            .map(MacAddress::new),
        phone_count: record.phone_count,
        photo: record.photo,
    }
}
