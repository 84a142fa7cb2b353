use chrono::{NaiveDateTime, NaiveTime, SubsecRound};
use tracing::{debug, info};

use crate::error::AppError;
use crate::store::AttendanceLedger;

pub const MARKED: &str = "Attendance marked successfully";
pub const ALREADY_MARKED: &str = "Attendance already marked for today";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkOutcome {
    pub created: bool,
}

impl MarkOutcome {
    pub fn message(&self) -> &'static str {
        if self.created { MARKED } else { ALREADY_MARKED }
    }
}

/// Local midnight that opens the calendar day containing `now`.
pub fn start_of_day(now: NaiveDateTime) -> NaiveDateTime {
    now.date().and_time(NaiveTime::MIN)
}

/// Records presence for `user_id` at `now`, at most once per calendar day.
pub async fn mark_attendance(
    ledger: &dyn AttendanceLedger,
    user_id: u64,
    now: NaiveDateTime,
) -> Result<MarkOutcome, AppError> {
    // DATETIME keeps whole seconds; a rounded 23:59:59.6 would land on the next day
    // while attendance_day stays on this one
    let now = now.trunc_subsecs(0);
    let created = ledger.insert_once_per_day(user_id, now).await?;

    if created {
        info!(user_id, day = %now.date(), "Attendance marked");
    } else {
        debug!(user_id, day = %now.date(), "Attendance already marked");
    }

    Ok(MarkOutcome { created })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn truncates_to_midnight() {
        assert_eq!(start_of_day(at(9, 17, 45)), at(9, 0, 0));
        assert_eq!(start_of_day(at(9, 0, 0)), at(9, 0, 0));
    }

    #[actix_web::test]
    async fn marks_once_per_day() {
        let store = MemoryStore::default();

        let first = mark_attendance(&store, 7, at(9, 8, 30)).await.unwrap();
        let second = mark_attendance(&store, 7, at(9, 12, 0)).await.unwrap();
        let third = mark_attendance(&store, 7, at(9, 23, 59)).await.unwrap();

        assert!(first.created);
        assert_eq!(first.message(), MARKED);
        assert!(!second.created);
        assert!(!third.created);
        assert_eq!(second.message(), ALREADY_MARKED);

        let records = store.attendance_for(7);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, at(9, 8, 30));
    }

    #[actix_web::test]
    async fn stores_whole_seconds_so_late_logins_stay_on_their_day() {
        let store = MemoryStore::default();
        let late = NaiveDate::from_ymd_opt(2026, 3, 9)
            .unwrap()
            .and_hms_micro_opt(23, 59, 59, 600_000)
            .unwrap();

        assert!(mark_attendance(&store, 7, late).await.unwrap().created);

        let records = store.attendance_for(7);
        assert_eq!(records.len(), 1);
        let expected = NaiveDate::from_ymd_opt(2026, 3, 9)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        assert_eq!(records[0].date, expected);
        assert_eq!(records[0].date.date(), records[0].attendance_day);

        let next_morning = at(10, 0, 0);
        assert!(mark_attendance(&store, 7, next_morning).await.unwrap().created);
        assert_eq!(store.attendance_for(7).len(), 2);
    }

    #[actix_web::test]
    async fn next_day_gets_a_new_record() {
        let store = MemoryStore::default();

        assert!(mark_attendance(&store, 7, at(9, 23, 59)).await.unwrap().created);
        assert!(mark_attendance(&store, 7, at(10, 0, 0)).await.unwrap().created);
        assert_eq!(store.attendance_for(7).len(), 2);
    }

    #[actix_web::test]
    async fn users_are_independent() {
        let store = MemoryStore::default();

        assert!(mark_attendance(&store, 1, at(9, 9, 0)).await.unwrap().created);
        assert!(mark_attendance(&store, 2, at(9, 9, 0)).await.unwrap().created);
    }
}
