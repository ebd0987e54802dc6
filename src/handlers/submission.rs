use actix_web::web::{Data, Json, Path};
use actix_web::HttpResponse;
use serde_json::Value;

use crate::core::ports::repository::Manager;
use crate::core::services::submission::{submission_detail, submit};
use crate::core::validation;
use crate::error::Error;
use crate::handlers::parse_id;
use crate::response::Envelope;

pub async fn create<M>(survey_id: Path<String>, Json(payload): Json<Value>, manager: Data<M>) -> Result<HttpResponse, Error>
where
    M: Manager + 'static,
{
    let survey_id = parse_id(&survey_id)?;
    let request = validation::submit_request(payload)?;
    let tx = manager.tx().await?;
    let created = submit(tx, survey_id, request).await?;
    Ok(HttpResponse::Created().json(Envelope::success(created, "Survey submitted successfully")))
}

pub async fn detail<M>(id: Path<String>, manager: Data<M>) -> Result<HttpResponse, Error>
where
    M: Manager + 'static,
{
    let id = parse_id(&id)?;
    let mut db = manager.db().await?;
    let submission = submission_detail(&mut db, id).await?;
    Ok(HttpResponse::Ok().json(Envelope::success(submission, "Submission fetched successfully")))
}
