use actix_web::web::{Data, Path};
use actix_web::HttpResponse;

use crate::core::ports::repository::Manager;
use crate::core::services::survey::survey_detail;
use crate::error::Error;
use crate::handlers::parse_id;
use crate::response::Envelope;

pub async fn detail<M>(id: Path<String>, manager: Data<M>) -> Result<HttpResponse, Error>
where
    M: Manager + 'static,
{
    let id = parse_id(&id)?;
    let mut db = manager.db().await?;
    let survey = survey_detail(&mut db, id).await?;
    Ok(HttpResponse::Ok().json(Envelope::success(survey, "Survey fetched successfully")))
}
