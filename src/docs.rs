use crate::models::{LoginReq, MessageResponse, PublicUser, RegisterReq, RegisterResponse};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance API",
        version = "0.1.0",
        description = r#"
## Daily Attendance

- **Register** a user with name, email, phone, department and PIN
- **Login** with email and PIN; a successful login marks today's attendance (once per day)
- **Export** today's attendance as CSV or PDF

There are no tokens: every login re-checks the PIN.
"#,
    ),
    paths(
        crate::auth::handlers::register,
        crate::auth::handlers::login,
        crate::api::attendance::export_attendance
    ),
    components(
        schemas(
            RegisterReq,
            LoginReq,
            RegisterResponse,
            PublicUser,
            MessageResponse
        )
    ),
    tags(
        (name = "Auth", description = "Registration and PIN login"),
        (name = "Attendance", description = "Daily attendance reports"),
    )
)]
pub struct ApiDoc;
