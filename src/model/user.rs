use chrono::NaiveDateTime;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    /// Argon2 PHC string
    pub pin: String,
    pub created_at: NaiveDateTime,
}

/// Validated registration input with the PIN already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub pin_hash: String,
}
