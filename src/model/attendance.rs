use chrono::NaiveDateTime;

/// An attendance row joined with its owner's identity, as the report reads it.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct AttendanceEntry {
    pub id: u64,
    pub user_id: u64,
    pub date: NaiveDateTime,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
}
