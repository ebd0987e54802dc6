use crate::core::models::{
    answer::{Answer, Insert as AnswerInsert, Query as AnswerQuery},
    question::{Query as QuestionQuery, Question},
    submission::{Insert as SubmissionInsert, Query as SubmissionQuery, Submission},
    survey::Survey,
};
use crate::error::Error;

pub trait SurveyCommon {
    /// Loads a survey with its questions ordered by `order_index`.
    async fn get(&mut self, id: i32) -> Result<Option<Survey>, Error>;
}

pub trait QuestionCommon {
    async fn query(&mut self, query: QuestionQuery) -> Result<Vec<Question>, Error>;
}

pub trait SubmissionCommon {
    async fn insert(&mut self, submission: SubmissionInsert) -> Result<i32, Error>;
    async fn get(&mut self, id: i32) -> Result<Option<Submission>, Error>;
    async fn count(&mut self, query: SubmissionQuery) -> Result<i64, Error>;
}

pub trait AnswerCommon {
    async fn bulk_insert(&mut self, answers: Vec<AnswerInsert>) -> Result<(), Error>;
    /// Answers in insertion order.
    async fn query(&mut self, query: AnswerQuery) -> Result<Vec<Answer>, Error>;
    async fn count(&mut self, query: AnswerQuery) -> Result<i64, Error>;
}

pub trait HealthCommon {
    async fn ping(&mut self) -> Result<(), Error>;
}

pub trait Common: SurveyCommon + QuestionCommon + SubmissionCommon + AnswerCommon + HealthCommon {}

pub trait Store: Common {}

pub trait TxStore: Store {
    async fn commit(self) -> Result<(), Error>;
    async fn rollback(self) -> Result<(), Error>;
}

pub trait Manager {
    type Store: Store;
    type TxStore: TxStore;

    async fn db(&self) -> Result<Self::Store, Error>;
    async fn tx(&self) -> Result<Self::TxStore, Error>;
}
