use serde::Deserialize;
use serde_json::{Number, Value};

use crate::core::models::{answer::Submit as AnswerSubmit, submission::SubmitRequest};
use crate::error::Error;

#[derive(Debug, Deserialize)]
struct RawSubmit {
    answers: Vec<RawAnswer>,
}

#[derive(Debug, Deserialize)]
struct RawAnswer {
    #[serde(rename = "questionId")]
    question_id: Number,
    value: String,
}

fn question_id(n: &Number) -> Option<i32> {
    let id = match n.as_i64() {
        Some(id) => id,
        None => {
            let f = n.as_f64()?;
            if f.fract() != 0.0 || f > i64::MAX as f64 || f < i64::MIN as f64 {
                return None;
            }
            f as i64
        }
    };
    if id <= 0 {
        return None;
    }
    i32::try_from(id).ok()
}

/// Checks the shape of a submission payload. All or nothing: any bad entry rejects the whole payload.
pub fn submit_request(payload: Value) -> Result<SubmitRequest, Error> {
    let raw: RawSubmit = serde_json::from_value(payload).map_err(|_| Error::validation_failed())?;
    if raw.answers.is_empty() {
        return Err(Error::validation_failed());
    }
    let answers = raw
        .answers
        .into_iter()
        .map(|a| {
            question_id(&a.question_id)
                .map(|question_id| AnswerSubmit { question_id, value: a.value })
                .ok_or_else(Error::validation_failed)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SubmitRequest { answers })
}
