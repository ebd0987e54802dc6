use itertools::Itertools;
use std::collections::HashMap;

use crate::core::models::{
    answer::{AnswerWithQuestion, Insert as AnswerInsert, Query as AnswerQuery},
    question::{Query as QuestionQuery, Question},
    submission::{Created, Insert as SubmissionInsert, SubmissionDetail, SubmitRequest},
    survey::Survey,
};
use crate::core::ports::repository::{AnswerCommon, QuestionCommon, Store, SubmissionCommon, SurveyCommon, TxStore};
use crate::error::Error;

/// Required questions of `survey` that have no usable value in `request`, in survey order.
/// Duplicate question ids keep the last value.
pub fn missing_required<'s>(survey: &'s Survey, request: &SubmitRequest) -> Vec<&'s Question> {
    let values: HashMap<i32, &str> = request.answers.iter().map(|a| (a.question_id, a.value.as_str())).collect();
    survey
        .required_questions()
        .filter(|q| !q.accepts(values.get(&q.id).copied()))
        .collect()
}

pub async fn submit<S>(mut store: S, survey_id: i32, request: SubmitRequest) -> Result<Created, Error>
where
    S: TxStore,
{
    let survey = match SurveyCommon::get(&mut store, survey_id).await? {
        Some(survey) => survey,
        None => {
            store.rollback().await?;
            return Err(Error::NotFound("Survey not found".into()));
        }
    };
    let missing = missing_required(&survey, &request);
    if !missing.is_empty() {
        store.rollback().await?;
        let details = missing.iter().map(|q| format!("{} ({})", q.id, q.text)).join(", ");
        log::warn!("rejected submission for survey {}: {} required answers missing", survey_id, missing.len());
        return Err(Error::Validation(format!("Missing required answers for questions: {}", details)));
    }
    let submission_id = SubmissionCommon::insert(&mut store, SubmissionInsert { survey_id }).await?;
    let answers = request
        .answers
        .into_iter()
        .map(|a| AnswerInsert {
            submission_id,
            question_id: a.question_id,
            value: a.value,
        })
        .collect::<Vec<_>>();
    let count = answers.len();
    AnswerCommon::bulk_insert(&mut store, answers).await?;
    store.commit().await?;
    log::info!("stored submission {} for survey {} with {} answers", submission_id, survey_id, count);
    Ok(Created { submission_id })
}

pub async fn submission_detail<S>(store: &mut S, id: i32) -> Result<SubmissionDetail, Error>
where
    S: Store,
{
    let submission = SubmissionCommon::get(store, id)
        .await?
        .ok_or_else(|| Error::NotFound("Submission not found".into()))?;
    let survey = SurveyCommon::get(store, submission.survey_id)
        .await?
        .ok_or_else(|| Error::Internal(format!("survey {} of submission {} is gone", submission.survey_id, id)))?;
    let answers = AnswerCommon::query(
        store,
        AnswerQuery { submission_id_eq: Some(id) },
    )
    .await?;
    let question_ids = answers.iter().map(|a| a.question_id).unique().collect::<Vec<_>>();
    let questions: HashMap<i32, Question> = QuestionCommon::query(
        store,
        QuestionQuery {
            id_in: Some(question_ids),
            ..default::default()
        },
    )
    .await?
    .into_iter()
    .map(|q| (q.id, q))
    .collect();
    let answers = answers
        .into_iter()
        .map(|answer| match questions.get(&answer.question_id) {
            Some(question) => Ok(AnswerWithQuestion {
                question: question.clone(),
                answer,
            }),
            None => Err(Error::Internal(format!("question {} of answer {} is gone", answer.question_id, answer.id))),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SubmissionDetail {
        id: submission.id,
        survey_id: submission.survey_id,
        created_at: submission.created_at,
        survey,
        answers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{answer::Submit as AnswerSubmit, submission::Query as SubmissionQuery};
    use crate::core::ports::repository::Manager;
    use crate::database::memory::MemoryStore;
    use crate::testing::{intake_store, scenario_store};

    fn request(answers: &[(i32, &str)]) -> SubmitRequest {
        SubmitRequest {
            answers: answers
                .iter()
                .map(|(question_id, value)| AnswerSubmit {
                    question_id: *question_id,
                    value: value.to_string(),
                })
                .collect(),
        }
    }

    async fn counts(manager: &MemoryStore) -> (i64, i64) {
        let mut db = manager.db().await.unwrap();
        let submissions = SubmissionCommon::count(&mut db, SubmissionQuery::default()).await.unwrap();
        let answers = AnswerCommon::count(&mut db, AnswerQuery::default()).await.unwrap();
        (submissions, answers)
    }

    #[tokio::test]
    async fn test_missing_required_last_duplicate_wins() {
        let manager = scenario_store();
        let mut db = manager.db().await.unwrap();
        let survey = SurveyCommon::get(&mut db, 1).await.unwrap().unwrap();
        assert!(missing_required(&survey, &request(&[(10, "x")])).is_empty());
        assert_eq!(missing_required(&survey, &request(&[(10, "x"), (10, " ")])).len(), 1);
        assert!(missing_required(&survey, &request(&[(10, ""), (10, "y")])).is_empty());
        assert_eq!(missing_required(&survey, &request(&[(11, "A")]))[0].id, 10);
    }

    #[tokio::test]
    async fn test_scenario_round_trip() {
        let manager = scenario_store();
        let tx = manager.tx().await.unwrap();
        let created = submit(tx, 1, request(&[(10, "x")])).await.unwrap();
        let mut db = manager.db().await.unwrap();
        let detail = submission_detail(&mut db, created.submission_id).await.unwrap();
        assert_eq!(detail.survey_id, 1);
        assert_eq!(detail.survey.questions.len(), 2);
        let pairs: Vec<(i32, String)> = detail.answers.iter().map(|a| (a.answer.question_id, a.answer.value.clone())).collect();
        assert_eq!(pairs, vec![(10, "x".to_string())]);
        assert_eq!(detail.answers[0].question.id, 10);
    }

    #[tokio::test]
    async fn test_missing_required_writes_nothing() {
        let manager = intake_store();
        let before = counts(&manager).await;
        let tx = manager.tx().await.unwrap();
        let err = submit(tx, 1, request(&[(1, "Ada"), (2, "   "), (9, "Email")])).await.unwrap_err();
        match err {
            Error::Validation(msg) => {
                assert!(msg.starts_with("Missing required answers for questions: "));
                assert!(msg.contains("2 (What is your age?)"));
                assert!(msg.contains("3 (What is your email?), 4 (What is your gender?)"));
                assert!(!msg.contains("1 (What is your name?)"));
                assert!(!msg.contains("9 ("));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(counts(&manager).await, before);
    }

    #[tokio::test]
    async fn test_valid_submission_counts() {
        let manager = intake_store();
        let (submissions, answers) = counts(&manager).await;
        let payload = request(&[
            (1, "Ada"),
            (2, "36"),
            (3, "ada@example.com"),
            (4, "Female"),
            (5, "Diabetes,Other"),
            (6, "Phone"),
            (7, "1815-12-10"),
            (8, "Other"),
        ]);
        let n = payload.answers.len() as i64;
        let tx = manager.tx().await.unwrap();
        submit(tx, 1, payload).await.unwrap();
        assert_eq!(counts(&manager).await, (submissions + 1, answers + n));
    }

    #[tokio::test]
    async fn test_duplicates_and_foreign_questions_persisted_as_given() {
        let manager = scenario_store();
        let tx = manager.tx().await.unwrap();
        let created = submit(tx, 1, request(&[(10, "first"), (10, "second"), (20, "elsewhere")])).await.unwrap();
        let mut db = manager.db().await.unwrap();
        let detail = submission_detail(&mut db, created.submission_id).await.unwrap();
        let pairs: Vec<(i32, &str)> = detail.answers.iter().map(|a| (a.answer.question_id, a.answer.value.as_str())).collect();
        assert_eq!(pairs, vec![(10, "first"), (10, "second"), (20, "elsewhere")]);
        assert_eq!(detail.answers[2].question.survey_id, 2);
    }

    #[tokio::test]
    async fn test_unknown_question_rolls_back() {
        let manager = scenario_store();
        let before = counts(&manager).await;
        let tx = manager.tx().await.unwrap();
        assert!(matches!(submit(tx, 1, request(&[(10, "x"), (404, "y")])).await, Err(Error::Internal(_))));
        assert_eq!(counts(&manager).await, before);
    }

    #[tokio::test]
    async fn test_unknown_survey() {
        let manager = scenario_store();
        let tx = manager.tx().await.unwrap();
        match submit(tx, 999, request(&[(10, "x")])).await {
            Err(Error::NotFound(msg)) => assert_eq!(msg, "Survey not found"),
            other => panic!("expected not found, got {:?}", other),
        }
        let mut db = manager.db().await.unwrap();
        match submission_detail(&mut db, 999).await {
            Err(Error::NotFound(msg)) => assert_eq!(msg, "Submission not found"),
            other => panic!("expected not found, got {:?}", other),
        }
    }
}
