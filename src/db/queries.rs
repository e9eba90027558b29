use chrono::{NaiveDate, NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::errors::AppError;
use crate::models::{
    Availability, BookingRequest, BookingStatus, Inquiry, NewBookingRequest, TimeSlot,
};

const DATE_FMT: &str = "%Y-%m-%d";
const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

// ── Availability ──

pub fn get_availability(conn: &Connection) -> Result<Vec<Availability>, AppError> {
    let mut stmt =
        conn.prepare("SELECT id, date, time_slot, is_available FROM availability")?;
    let rows = stmt.query_map([], |row| Ok(parse_availability_row(row)))?;

    let mut records = vec![];
    for row in rows {
        records.push(row??);
    }
    Ok(records)
}

pub fn get_availability_for_date(
    conn: &Connection,
    date: NaiveDate,
) -> Result<Vec<Availability>, AppError> {
    let date_str = date.format(DATE_FMT).to_string();
    let mut stmt = conn.prepare(
        "SELECT id, date, time_slot, is_available FROM availability WHERE date = ?1",
    )?;
    let rows = stmt.query_map(params![date_str], |row| Ok(parse_availability_row(row)))?;

    let mut records = vec![];
    for row in rows {
        records.push(row??);
    }
    Ok(records)
}

/// Upserts the flag for a (date, slot) pair. The UNIQUE(date, time_slot)
/// constraint makes this a single atomic statement, so at most one row ever
/// exists per pair and concurrent setters reduce to last-write-wins.
pub fn set_availability(
    conn: &Connection,
    date: NaiveDate,
    time_slot: TimeSlot,
    is_available: bool,
) -> Result<Availability, AppError> {
    let date_str = date.format(DATE_FMT).to_string();

    conn.execute(
        "INSERT INTO availability (date, time_slot, is_available) VALUES (?1, ?2, ?3)
         ON CONFLICT(date, time_slot) DO UPDATE SET is_available = excluded.is_available",
        params![date_str, time_slot.as_str(), is_available as i32],
    )?;

    let record = conn.query_row(
        "SELECT id, date, time_slot, is_available FROM availability
         WHERE date = ?1 AND time_slot = ?2",
        params![date_str, time_slot.as_str()],
        |row| Ok(parse_availability_row(row)),
    )??;
    Ok(record)
}

fn parse_availability_row(row: &rusqlite::Row) -> Result<Availability, AppError> {
    let id: i64 = row.get(0)?;
    let date_str: String = row.get(1)?;
    let slot_str: String = row.get(2)?;
    let is_available: bool = row.get::<_, i32>(3)? != 0;

    Ok(Availability {
        id,
        date: parse_stored_date(&date_str),
        time_slot: TimeSlot::parse(&slot_str)?,
        is_available,
    })
}

// ── Booking requests ──

pub fn get_booking_requests(conn: &Connection) -> Result<Vec<BookingRequest>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, email, body_part, size, description, requested_date, status, created_at
         FROM booking_requests ORDER BY created_at DESC",
    )?;
    let rows = stmt.query_map([], |row| Ok(parse_booking_row(row)))?;

    let mut requests = vec![];
    for row in rows {
        requests.push(row??);
    }
    Ok(requests)
}

pub fn create_booking_request(
    conn: &Connection,
    new: &NewBookingRequest,
) -> Result<BookingRequest, AppError> {
    let requested_date = new.requested_date.format(DATE_FMT).to_string();
    let created_at = Utc::now().naive_utc().format(DATETIME_FMT).to_string();

    // Status and creation time are always assigned here, never by the caller.
    conn.execute(
        "INSERT INTO booking_requests (name, email, body_part, size, description, requested_date, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'pending', ?7)",
        params![
            new.name,
            new.email,
            new.body_part,
            new.size,
            new.description,
            requested_date,
            created_at,
        ],
    )?;

    let id = conn.last_insert_rowid();
    get_booking_request(conn, id)?
        .ok_or_else(|| AppError::NotFound(format!("booking request {id}")))
}

pub fn get_booking_request(
    conn: &Connection,
    id: i64,
) -> Result<Option<BookingRequest>, AppError> {
    let result = conn.query_row(
        "SELECT id, name, email, body_part, size, description, requested_date, status, created_at
         FROM booking_requests WHERE id = ?1",
        params![id],
        |row| Ok(parse_booking_row(row)),
    );

    match result {
        Ok(request) => Ok(Some(request?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Applies the status lifecycle to one request. The transition function is
/// consulted before anything is written; an illegal transition or a missing
/// id leaves the ledger untouched.
pub fn update_booking_status(
    conn: &Connection,
    id: i64,
    requested: BookingStatus,
) -> Result<BookingRequest, AppError> {
    let booking = get_booking_request(conn, id)?
        .ok_or_else(|| AppError::NotFound(format!("booking request {id}")))?;

    let next = BookingStatus::transition(booking.status, requested)?;

    conn.execute(
        "UPDATE booking_requests SET status = ?1 WHERE id = ?2",
        params![next.as_str(), id],
    )?;

    Ok(BookingRequest {
        status: next,
        ..booking
    })
}

fn parse_booking_row(row: &rusqlite::Row) -> Result<BookingRequest, AppError> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let email: String = row.get(2)?;
    let body_part: String = row.get(3)?;
    let size: String = row.get(4)?;
    let description: String = row.get(5)?;
    let requested_date_str: String = row.get(6)?;
    let status_str: String = row.get(7)?;
    let created_at_str: String = row.get(8)?;

    Ok(BookingRequest {
        id,
        name,
        email,
        body_part,
        size,
        description,
        requested_date: parse_stored_date(&requested_date_str),
        status: BookingStatus::parse(&status_str)?,
        created_at: parse_stored_datetime(&created_at_str),
    })
}

// ── Inquiries ──

pub fn get_inquiries(conn: &Connection) -> Result<Vec<Inquiry>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, email, message, created_at FROM inquiries ORDER BY created_at DESC",
    )?;
    let rows = stmt.query_map([], |row| {
        let created_at_str: String = row.get(4)?;
        Ok(Inquiry {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            message: row.get(3)?,
            created_at: parse_stored_datetime(&created_at_str),
        })
    })?;

    let mut inquiries = vec![];
    for row in rows {
        inquiries.push(row?);
    }
    Ok(inquiries)
}

pub fn create_inquiry(
    conn: &Connection,
    name: &str,
    email: &str,
    message: &str,
) -> Result<Inquiry, AppError> {
    let created_at = Utc::now().naive_utc();
    conn.execute(
        "INSERT INTO inquiries (name, email, message, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![name, email, message, created_at.format(DATETIME_FMT).to_string()],
    )?;

    Ok(Inquiry {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
        created_at,
    })
}

fn parse_stored_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, DATE_FMT)
        .unwrap_or_else(|_| Utc::now().date_naive())
}

fn parse_stored_datetime(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, DATETIME_FMT).unwrap_or_else(|_| Utc::now().naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn setup_db() -> Connection {
        db::init_db(":memory:").unwrap()
    }

    fn new_request(date: &str) -> NewBookingRequest {
        NewBookingRequest {
            name: "Alex".to_string(),
            email: "a@x.com".to_string(),
            body_part: "Arm".to_string(),
            size: "4x6".to_string(),
            description: "Rose".to_string(),
            requested_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        }
    }

    #[test]
    fn test_create_booking_is_pending() {
        let conn = setup_db();
        let created = create_booking_request(&conn, &new_request("2025-06-01")).unwrap();

        assert_eq!(created.status, BookingStatus::Pending);
        assert_eq!(created.name, "Alex");
        assert_eq!(
            created.requested_date,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
    }

    #[test]
    fn test_ids_are_assigned_sequentially() {
        let conn = setup_db();
        let first = create_booking_request(&conn, &new_request("2025-06-01")).unwrap();
        let second = create_booking_request(&conn, &new_request("2025-06-02")).unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn test_approve_keeps_other_fields() {
        let conn = setup_db();
        let created = create_booking_request(&conn, &new_request("2025-06-01")).unwrap();

        let updated =
            update_booking_status(&conn, created.id, BookingStatus::Approved).unwrap();
        assert_eq!(updated.status, BookingStatus::Approved);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.email, created.email);
        assert_eq!(updated.requested_date, created.requested_date);
        assert_eq!(updated.created_at, created.created_at);

        let reloaded = get_booking_request(&conn, created.id).unwrap().unwrap();
        assert_eq!(reloaded.status, BookingStatus::Approved);
    }

    #[test]
    fn test_update_missing_id_is_not_found() {
        let conn = setup_db();
        let result = update_booking_status(&conn, 9999, BookingStatus::Approved);
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(get_booking_requests(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_terminal_record_cannot_be_reupdated() {
        let conn = setup_db();
        let created = create_booking_request(&conn, &new_request("2025-06-01")).unwrap();
        update_booking_status(&conn, created.id, BookingStatus::Rejected).unwrap();

        let result = update_booking_status(&conn, created.id, BookingStatus::Approved);
        assert!(matches!(result, Err(AppError::Validation(_))));

        let reloaded = get_booking_request(&conn, created.id).unwrap().unwrap();
        assert_eq!(reloaded.status, BookingStatus::Rejected);
    }

    #[test]
    fn test_set_availability_inserts_then_updates_in_place() {
        let conn = setup_db();
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        let first = set_availability(&conn, date, TimeSlot::Morning, true).unwrap();
        assert!(first.is_available);

        // Flipping the flag repeatedly must keep touching the original row.
        for flag in [false, true, false] {
            let updated = set_availability(&conn, date, TimeSlot::Morning, flag).unwrap();
            assert_eq!(updated.id, first.id);
            assert_eq!(updated.is_available, flag);
        }

        assert_eq!(get_availability(&conn).unwrap().len(), 1);
    }

    #[test]
    fn test_set_availability_distinct_pairs_get_distinct_rows() {
        let conn = setup_db();
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let other = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();

        set_availability(&conn, date, TimeSlot::Morning, true).unwrap();
        set_availability(&conn, date, TimeSlot::Evening, true).unwrap();
        set_availability(&conn, other, TimeSlot::Morning, true).unwrap();

        assert_eq!(get_availability(&conn).unwrap().len(), 3);
        assert_eq!(get_availability_for_date(&conn, date).unwrap().len(), 2);
    }

    #[test]
    fn test_create_inquiry_and_list() {
        let conn = setup_db();
        let created = create_inquiry(&conn, "Sam", "s@x.com", "Walk-ins?").unwrap();
        assert_eq!(created.name, "Sam");

        let all = get_inquiries(&conn).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].message, "Walk-ins?");
    }
}
