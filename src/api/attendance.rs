use actix_web::{
    HttpResponse,
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    web,
};
use chrono::Local;
use tracing::instrument;

use crate::{error::AppError, models::ExportQuery, report, state::AppState};

/// Download today's attendance
#[utoipa::path(
    get,
    path = "/export-attendance",
    params(ExportQuery),
    responses(
        (status = 200, description = "Attachment named attendance-<YYYY-MM-DD>.csv or .pdf",
         content(
            ("text/csv" = String),
            ("application/pdf" = Vec<u8>)
         )
        ),
        (status = 400, description = "Missing or unsupported format", body = Object, example = json!({
            "error": "Unsupported format. Use 'csv' or 'pdf'"
        })),
        (status = 404, description = "No attendance recorded today", body = Object, example = json!({
            "error": "No attendance records found for today"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
#[instrument(name = "export_attendance", skip(state))]
pub async fn export_attendance(
    state: web::Data<AppState>,
    query: web::Query<ExportQuery>,
) -> Result<HttpResponse, AppError> {
    let now = Local::now().naive_local();
    let file =
        report::export_attendance(state.ledger.as_ref(), query.format.as_deref(), now).await?;

    Ok(HttpResponse::Ok()
        .content_type(file.format.content_type())
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file.filename)],
        })
        .body(file.body))
}
