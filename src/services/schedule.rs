use chrono::NaiveDate;
use rusqlite::Connection;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Availability, TimeSlot};

/// Replaces a date's whole availability selection in one transaction: after
/// this returns, exactly the selected slots are marked available and every
/// other slot is marked unavailable, regardless of what the date held before.
/// A failure partway rolls the entire day back.
///
/// Deselected slots are cleared before selected slots are set, so the write
/// order never depends on the previous selection.
pub fn replace_day(
    conn: &mut Connection,
    date: NaiveDate,
    selected: &[TimeSlot],
) -> Result<Vec<Availability>, AppError> {
    let tx = conn.transaction()?;

    for slot in TimeSlot::ALL {
        if !selected.contains(&slot) {
            queries::set_availability(&tx, date, slot, false)?;
        }
    }
    for slot in TimeSlot::ALL {
        if selected.contains(&slot) {
            queries::set_availability(&tx, date, slot, true)?;
        }
    }

    let final_state = queries::get_availability_for_date(&tx, date)?;
    tx.commit()?;

    Ok(final_state)
}
