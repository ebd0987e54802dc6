pub mod health;
pub mod submission;
pub mod survey;

use actix_web::web::{get, post, scope, JsonConfig, ServiceConfig};
use actix_web::HttpResponse;

use crate::core::ports::repository::Manager;
use crate::error::Error;
use crate::response::NotFound;

/// Path ids are plain decimal 32-bit integers, surrounding whitespace tolerated.
/// Exponent and hex forms such as `1e3` or `0x10` are rejected.
pub fn parse_id(raw: &str) -> Result<i32, Error> {
    raw.trim().parse().map_err(|_| Error::invalid_id())
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(NotFound::default())
}

pub fn json_config() -> JsonConfig {
    JsonConfig::default().error_handler(|err, _| {
        log::debug!("rejected request body: {}", err);
        Error::validation_failed().into()
    })
}

/// Registers the API under `api_root`. The caller supplies `Data<M>` and `Data<Config>`.
pub fn configure<M>(cfg: &mut ServiceConfig, api_root: &str)
where
    M: Manager + 'static,
{
    cfg.app_data(json_config()).service(
        scope(api_root).route("/health", get().to(health::health::<M>)).service(
            scope("/surveys")
                .route("/submissions/{id}", get().to(submission::detail::<M>))
                .route("/{id}", get().to(survey::detail::<M>))
                .route("/{id}/submissions", post().to(submission::create::<M>)),
        ),
    );
}
