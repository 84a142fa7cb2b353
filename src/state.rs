use std::sync::Arc;

use sqlx::MySqlPool;

use crate::store::mysql::{MySqlAttendanceLedger, MySqlCredentialStore};
use crate::store::{AttendanceLedger, CredentialStore};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn CredentialStore>,
    pub ledger: Arc<dyn AttendanceLedger>,
}

impl AppState {
    pub fn new(users: Arc<dyn CredentialStore>, ledger: Arc<dyn AttendanceLedger>) -> Self {
        Self { users, ledger }
    }

    pub fn mysql(pool: MySqlPool) -> Self {
        Self::new(
            Arc::new(MySqlCredentialStore::new(pool.clone())),
            Arc::new(MySqlAttendanceLedger::new(pool)),
        )
    }
}
