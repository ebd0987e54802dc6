use actix_web::http::StatusCode;
use actix_web::web::Data;
use actix_web::HttpResponse;
use chrono::{SecondsFormat, Utc};

use crate::config::Config;
use crate::core::ports::repository::Manager;
use crate::core::services::health::probe;
use crate::response::{Health, Unhealthy};

pub async fn health<M>(manager: Data<M>, config: Data<Config>) -> HttpResponse
where
    M: Manager + 'static,
{
    match probe(manager.get_ref(), config.max_latency).await {
        Ok(probe) => {
            let (code, status) = if probe.slow {
                (StatusCode::SERVICE_UNAVAILABLE, "slow")
            } else {
                (StatusCode::OK, "ok")
            };
            HttpResponse::build(code).json(Health {
                status,
                latency: format!("{:.2}", probe.latency.as_secs_f64() * 1000.0),
                max_latency: config.max_latency.as_millis() as u64,
                timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            })
        }
        Err(e) => {
            log::error!("storage probe failed: {}", e);
            HttpResponse::InternalServerError().json(Unhealthy {
                status: "unhealthy",
                message: "Database connection failed",
            })
        }
    }
}
