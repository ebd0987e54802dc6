use crate::core::models::survey::Survey;
use crate::core::ports::repository::{Store, SurveyCommon};
use crate::error::Error;

pub async fn survey_detail<S>(store: &mut S, id: i32) -> Result<Survey, Error>
where
    S: Store,
{
    SurveyCommon::get(store, id).await?.ok_or_else(|| Error::NotFound("Survey not found".into()))
}
