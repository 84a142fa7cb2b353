//! Persistence seams. The services only see these traits; `mysql` backs them in
//! production and `memory` in tests.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::error::AppError;
use crate::model::attendance::AttendanceEntry;
use crate::model::user::{NewUser, User};

#[cfg(test)]
pub mod memory;
pub mod mysql;

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Fails with `AppError::DuplicateEmail` when the email is already taken.
    async fn insert(&self, user: NewUser) -> Result<User, AppError>;
}

#[async_trait]
pub trait AttendanceLedger: Send + Sync {
    /// Appends a record at `at` unless `user_id` already has one on the same
    /// calendar day. Returns whether a record was written.
    async fn insert_once_per_day(&self, user_id: u64, at: NaiveDateTime) -> Result<bool, AppError>;

    /// Records with a timestamp at or after `since`, oldest first.
    async fn entries_since(&self, since: NaiveDateTime) -> Result<Vec<AttendanceEntry>, AppError>;
}
