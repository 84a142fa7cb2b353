use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{
    Error, HttpResponse,
    body::{BoxBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    middleware::{Next, from_fn},
    web,
};
use serde_json::json;
use std::sync::Arc;

use crate::{api::attendance, auth::handlers, config::Config, error::AppError};

type Limiter = Governor<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-IP limiters. Build once and clone into every worker so they share state.
#[derive(Clone)]
pub struct RateLimiters {
    login: Arc<Limiter>,
    register: Arc<Limiter>,
}

impl RateLimiters {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            login: Arc::new(build_limiter(config.rate_login_per_min)?),
            register: Arc::new(build_limiter(config.rate_register_per_min)?),
        })
    }
}

fn build_limiter(requests_per_min: u32) -> anyhow::Result<Limiter> {
    let per_min = requests_per_min.max(1);
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond((60_000 / per_min as u64).max(1))
        .burst_size(per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("invalid rate limit: {requests_per_min}/min"))?;
    Ok(Governor::new(&cfg))
}

const RATE_LIMITED: &str = "Too many requests, please try again later";

/// Rewrites the governor's plain-text 429 into the `{error}` body every other
/// failure uses. Must wrap outside the governor.
async fn json_rate_limit(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let http_req = req.request().clone();
    let rejected = move || {
        let resp = HttpResponse::TooManyRequests().json(json!({ "error": RATE_LIMITED }));
        ServiceResponse::new(http_req, resp)
    };

    match next.call(req).await {
        Ok(res) if res.status() == StatusCode::TOO_MANY_REQUESTS => Ok(rejected()),
        Ok(res) => Ok(res.map_into_boxed_body()),
        Err(e) if e.as_response_error().status_code() == StatusCode::TOO_MANY_REQUESTS => {
            Ok(rejected())
        }
        Err(e) => Err(e),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig, limiters: RateLimiters) {
    // Malformed bodies get the same `{error}` shape as missing fields
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::validation(format!("Invalid request body: {err}")).into()
    }));

    // `format` is the only query parameter, so any query error is a bad format
    cfg.app_data(
        web::QueryConfig::default().error_handler(|_err, _req| AppError::UnsupportedFormat.into()),
    );

    cfg.service(
        web::resource("/register")
            .wrap(limiters.register)
            .wrap(from_fn(json_rate_limit))
            .route(web::post().to(handlers::register)),
    )
    .service(
        web::resource("/login")
            .wrap(limiters.login)
            .wrap(from_fn(json_rate_limit))
            .route(web::post().to(handlers::login)),
    )
    .service(
        web::resource("/export-attendance").route(web::get().to(attendance::export_attendance)),
    );
}
