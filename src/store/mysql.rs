use async_trait::async_trait;
use chrono::{Local, NaiveDateTime, SubsecRound};
use sqlx::MySqlPool;

use super::{AttendanceLedger, CredentialStore};
use crate::error::AppError;
use crate::model::attendance::AttendanceEntry;
use crate::model::user::{NewUser, User};

#[derive(Clone)]
pub struct MySqlCredentialStore {
    pool: MySqlPool,
}

impl MySqlCredentialStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for MySqlCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, phone, department, pin, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let created_at = Local::now().naive_local().trunc_subsecs(0);

        let result = sqlx::query(
            r#"
            INSERT INTO users (name, email, phone, department, pin, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.department)
        .bind(&user.pin_hash)
        .bind(created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(User {
                id: done.last_insert_id(),
                name: user.name,
                email: user.email,
                phone: user.phone,
                department: user.department,
                pin: user.pin_hash,
                created_at,
            }),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Clone)]
pub struct MySqlAttendanceLedger {
    pool: MySqlPool,
}

impl MySqlAttendanceLedger {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceLedger for MySqlAttendanceLedger {
    async fn insert_once_per_day(&self, user_id: u64, at: NaiveDateTime) -> Result<bool, AppError> {
        // uq_attendance_user_day rejects a second row for the same day
        let result = sqlx::query(
            r#"
            INSERT INTO attendance (user_id, date, attendance_day)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(at)
        .bind(at.date())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(true),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn entries_since(&self, since: NaiveDateTime) -> Result<Vec<AttendanceEntry>, AppError> {
        let rows = sqlx::query_as::<_, AttendanceEntry>(
            r#"
            SELECT a.id, a.user_id, a.date, u.name, u.email, u.phone, u.department
            FROM attendance a
            JOIN users u ON u.id = a.user_id
            WHERE a.date >= ?
            ORDER BY a.date ASC, a.id ASC
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
