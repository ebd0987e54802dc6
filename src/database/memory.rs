use chrono::Utc;
use futures::lock::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::models::{
    answer::{Answer, Insert as AnswerInsert, Query as AnswerQuery},
    question::{Query as QuestionQuery, Question},
    submission::{Insert as SubmissionInsert, Query as SubmissionQuery, Submission},
    survey::Survey,
};
use crate::core::ports::repository::{AnswerCommon, Common, HealthCommon, Manager, QuestionCommon, Store, SubmissionCommon, SurveyCommon, TxStore};
use crate::database::models::SurveyRow;
use crate::error::Error;

#[derive(Debug)]
struct Tables {
    surveys: BTreeMap<i32, SurveyRow>,
    questions: BTreeMap<i32, Question>,
    submissions: BTreeMap<i32, Submission>,
    answers: BTreeMap<i32, Answer>,
    submission_seq: i32,
    answer_seq: i32,
}

impl Default for Tables {
    fn default() -> Self {
        Tables {
            surveys: BTreeMap::new(),
            questions: BTreeMap::new(),
            submissions: BTreeMap::new(),
            answers: BTreeMap::new(),
            submission_seq: 1,
            answer_seq: 1,
        }
    }
}

/// Process-local storage with the same all-or-nothing write contract as the Postgres adapter.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn with_surveys(surveys: Vec<Survey>) -> Self {
        let mut tables = Tables::default();
        for survey in surveys {
            tables.surveys.insert(survey.id, SurveyRow::from(&survey));
            for question in survey.questions {
                tables.questions.insert(question.id, question);
            }
        }
        Self {
            tables: Arc::new(Mutex::new(tables)),
        }
    }
}

#[derive(Debug, Default)]
struct Pending {
    submissions: Vec<Submission>,
    answers: Vec<Answer>,
}

/// A checked-out session. Writes land immediately unless the session was opened as a transaction,
/// in which case they are staged until `commit` and dropped on `rollback` or drop.
pub struct MemorySession {
    tables: Arc<Mutex<Tables>>,
    pending: Option<Pending>,
}

impl SurveyCommon for MemorySession {
    async fn get(&mut self, id: i32) -> Result<Option<Survey>, Error> {
        let tables = self.tables.lock().await;
        Ok(tables.surveys.get(&id).cloned().map(|row| {
            let mut questions: Vec<Question> = tables.questions.values().filter(|q| q.survey_id == id).cloned().collect();
            questions.sort_by_key(|q| (q.order_index, q.id));
            row.with_questions(questions)
        }))
    }
}

impl QuestionCommon for MemorySession {
    async fn query(&mut self, query: QuestionQuery) -> Result<Vec<Question>, Error> {
        let tables = self.tables.lock().await;
        let mut questions: Vec<Question> = tables
            .questions
            .values()
            .filter(|q| query.survey_id_eq.map_or(true, |id| q.survey_id == id))
            .filter(|q| query.id_in.as_ref().map_or(true, |ids| ids.contains(&q.id)))
            .cloned()
            .collect();
        questions.sort_by_key(|q| (q.order_index, q.id));
        Ok(questions)
    }
}

impl SubmissionCommon for MemorySession {
    async fn insert(&mut self, submission: SubmissionInsert) -> Result<i32, Error> {
        let mut tables = self.tables.lock().await;
        if !tables.surveys.contains_key(&submission.survey_id) {
            return Err(Error::Internal(format!("foreign key violation: survey {} does not exist", submission.survey_id)));
        }
        let id = tables.submission_seq;
        tables.submission_seq += 1;
        let row = Submission {
            id,
            survey_id: submission.survey_id,
            created_at: Utc::now(),
        };
        match self.pending.as_mut() {
            Some(pending) => pending.submissions.push(row),
            None => {
                tables.submissions.insert(id, row);
            }
        }
        Ok(id)
    }

    async fn get(&mut self, id: i32) -> Result<Option<Submission>, Error> {
        let tables = self.tables.lock().await;
        let staged = self.pending.as_ref().and_then(|p| p.submissions.iter().find(|s| s.id == id));
        Ok(staged.or_else(|| tables.submissions.get(&id)).cloned())
    }

    async fn count(&mut self, query: SubmissionQuery) -> Result<i64, Error> {
        let tables = self.tables.lock().await;
        let staged = self.pending.iter().flat_map(|p| p.submissions.iter());
        let total = tables
            .submissions
            .values()
            .chain(staged)
            .filter(|s| query.survey_id_eq.map_or(true, |id| s.survey_id == id))
            .count();
        Ok(total as i64)
    }
}

impl AnswerCommon for MemorySession {
    async fn bulk_insert(&mut self, answers: Vec<AnswerInsert>) -> Result<(), Error> {
        let mut tables = self.tables.lock().await;
        for a in &answers {
            let staged = self.pending.as_ref().map_or(false, |p| p.submissions.iter().any(|s| s.id == a.submission_id));
            if !staged && !tables.submissions.contains_key(&a.submission_id) {
                return Err(Error::Internal(format!("foreign key violation: submission {} does not exist", a.submission_id)));
            }
            if !tables.questions.contains_key(&a.question_id) {
                return Err(Error::Internal(format!("foreign key violation: question {} does not exist", a.question_id)));
            }
        }
        for a in answers {
            let id = tables.answer_seq;
            tables.answer_seq += 1;
            let row = Answer {
                id,
                submission_id: a.submission_id,
                question_id: a.question_id,
                value: a.value,
            };
            match self.pending.as_mut() {
                Some(pending) => pending.answers.push(row),
                None => {
                    tables.answers.insert(id, row);
                }
            }
        }
        Ok(())
    }

    async fn query(&mut self, query: AnswerQuery) -> Result<Vec<Answer>, Error> {
        let tables = self.tables.lock().await;
        let staged = self.pending.iter().flat_map(|p| p.answers.iter());
        let mut answers: Vec<Answer> = tables
            .answers
            .values()
            .chain(staged)
            .filter(|a| query.submission_id_eq.map_or(true, |id| a.submission_id == id))
            .cloned()
            .collect();
        answers.sort_by_key(|a| a.id);
        Ok(answers)
    }

    async fn count(&mut self, query: AnswerQuery) -> Result<i64, Error> {
        Ok(AnswerCommon::query(self, query).await?.len() as i64)
    }
}

impl HealthCommon for MemorySession {
    async fn ping(&mut self) -> Result<(), Error> {
        let _tables = self.tables.lock().await;
        Ok(())
    }
}

impl Common for MemorySession {}
impl Store for MemorySession {}

impl TxStore for MemorySession {
    async fn commit(mut self) -> Result<(), Error> {
        if let Some(pending) = self.pending.take() {
            let mut tables = self.tables.lock().await;
            for s in pending.submissions {
                tables.submissions.insert(s.id, s);
            }
            for a in pending.answers {
                tables.answers.insert(a.id, a);
            }
        }
        Ok(())
    }

    async fn rollback(mut self) -> Result<(), Error> {
        self.pending.take();
        Ok(())
    }
}

impl Manager for MemoryStore {
    type Store = MemorySession;
    type TxStore = MemorySession;

    async fn db(&self) -> Result<Self::Store, Error> {
        Ok(MemorySession {
            tables: self.tables.clone(),
            pending: None,
        })
    }

    async fn tx(&self) -> Result<Self::TxStore, Error> {
        Ok(MemorySession {
            tables: self.tables.clone(),
            pending: Some(Pending::default()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::scenario_store;

    #[tokio::test]
    async fn test_staged_writes_visible_only_after_commit() {
        let manager = scenario_store();
        let mut tx = manager.tx().await.unwrap();
        let id = SubmissionCommon::insert(&mut tx, SubmissionInsert { survey_id: 1 }).await.unwrap();
        AnswerCommon::bulk_insert(
            &mut tx,
            vec![AnswerInsert {
                submission_id: id,
                question_id: 10,
                value: "x".into(),
            }],
        )
        .await
        .unwrap();
        assert!(SubmissionCommon::get(&mut tx, id).await.unwrap().is_some());

        let mut db = manager.db().await.unwrap();
        assert!(SubmissionCommon::get(&mut db, id).await.unwrap().is_none());
        assert_eq!(AnswerCommon::count(&mut db, AnswerQuery::default()).await.unwrap(), 0);

        tx.commit().await.unwrap();
        assert!(SubmissionCommon::get(&mut db, id).await.unwrap().is_some());
        assert_eq!(AnswerCommon::count(&mut db, AnswerQuery { submission_id_eq: Some(id) }).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_rollback_and_drop_discard() {
        let manager = scenario_store();
        let mut tx = manager.tx().await.unwrap();
        SubmissionCommon::insert(&mut tx, SubmissionInsert { survey_id: 1 }).await.unwrap();
        tx.rollback().await.unwrap();
        {
            let mut tx = manager.tx().await.unwrap();
            SubmissionCommon::insert(&mut tx, SubmissionInsert { survey_id: 1 }).await.unwrap();
        }
        let mut db = manager.db().await.unwrap();
        assert_eq!(SubmissionCommon::count(&mut db, SubmissionQuery::default()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_bulk_insert_is_all_or_nothing() {
        let manager = scenario_store();
        let mut db = manager.db().await.unwrap();
        let id = SubmissionCommon::insert(&mut db, SubmissionInsert { survey_id: 1 }).await.unwrap();
        let res = AnswerCommon::bulk_insert(
            &mut db,
            vec![
                AnswerInsert {
                    submission_id: id,
                    question_id: 10,
                    value: "x".into(),
                },
                AnswerInsert {
                    submission_id: id,
                    question_id: 404,
                    value: "y".into(),
                },
            ],
        )
        .await;
        assert!(matches!(res, Err(Error::Internal(_))));
        assert_eq!(AnswerCommon::count(&mut db, AnswerQuery::default()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_submission_requires_survey() {
        let manager = scenario_store();
        let mut db = manager.db().await.unwrap();
        assert!(SubmissionCommon::insert(&mut db, SubmissionInsert { survey_id: 42 }).await.is_err());
    }

    #[tokio::test]
    async fn test_question_query_filters() {
        let manager = scenario_store();
        let mut db = manager.db().await.unwrap();
        let all = QuestionCommon::query(&mut db, QuestionQuery::default()).await.unwrap();
        assert_eq!(all.len(), 3);
        let ids = QuestionCommon::query(
            &mut db,
            QuestionQuery {
                id_in: Some(vec![11, 20]),
                ..default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(ids.iter().map(|q| q.id).collect::<Vec<_>>(), vec![20, 11]);
    }
}
