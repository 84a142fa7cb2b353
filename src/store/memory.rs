use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Local, NaiveDate, NaiveDateTime};

use super::{AttendanceLedger, CredentialStore};
use crate::error::AppError;
use crate::model::attendance::AttendanceEntry;
use crate::model::user::{NewUser, User};

/// One row of the `attendance` table.
#[derive(Debug, Clone)]
pub struct Attendance {
    pub id: u64,
    pub user_id: u64,
    pub date: NaiveDateTime,
    pub attendance_day: NaiveDate,
}

/// Test double holding users and attendance in one place so the ledger can
/// join against users like the SQL query does.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    attendance: Mutex<Vec<Attendance>>,
}

impl MemoryStore {
    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn attendance_for(&self, user_id: u64) -> Vec<Attendance> {
        self.attendance
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::DuplicateEmail);
        }

        let stored = User {
            id: users.len() as u64 + 1,
            name: user.name,
            email: user.email,
            phone: user.phone,
            department: user.department,
            pin: user.pin_hash,
            created_at: Local::now().naive_local(),
        };
        users.push(stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl AttendanceLedger for MemoryStore {
    async fn insert_once_per_day(&self, user_id: u64, at: NaiveDateTime) -> Result<bool, AppError> {
        let mut attendance = self.attendance.lock().unwrap();
        let day = at.date();
        if attendance
            .iter()
            .any(|a| a.user_id == user_id && a.attendance_day == day)
        {
            return Ok(false);
        }

        let id = attendance.len() as u64 + 1;
        attendance.push(Attendance {
            id,
            user_id,
            date: at,
            attendance_day: day,
        });
        Ok(true)
    }

    async fn entries_since(&self, since: NaiveDateTime) -> Result<Vec<AttendanceEntry>, AppError> {
        let users = self.users.lock().unwrap();
        let attendance = self.attendance.lock().unwrap();

        let mut entries: Vec<AttendanceEntry> = attendance
            .iter()
            .filter(|a| a.date >= since)
            .filter_map(|a| {
                let user = users.iter().find(|u| u.id == a.user_id)?;
                Some(AttendanceEntry {
                    id: a.id,
                    user_id: a.user_id,
                    date: a.date,
                    name: user.name.clone(),
                    email: user.email.clone(),
                    phone: user.phone.clone(),
                    department: user.department.clone(),
                })
            })
            .collect();
        entries.sort_by_key(|e| (e.date, e.id));
        Ok(entries)
    }
}
