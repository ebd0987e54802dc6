use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{query, query_as, query_scalar, Executor, PgPool, Postgres, QueryBuilder, Transaction};

use crate::core::models::{
    answer::{Answer, Insert as AnswerInsert, Query as AnswerQuery},
    question::{Query as QuestionQuery, Question},
    submission::{Insert as SubmissionInsert, Query as SubmissionQuery, Submission},
    survey::Survey,
};
use crate::core::ports::repository::{AnswerCommon, Common, HealthCommon, Manager, QuestionCommon, Store, SubmissionCommon, SurveyCommon, TxStore};
use crate::database::models::SurveyRow;
use crate::error::Error;

pub struct PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e>,
{
    executor: E,
}

impl<E> PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }
}

impl<E> SurveyCommon for PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn get(&mut self, id: i32) -> Result<Option<Survey>, Error> {
        let row: Option<SurveyRow> = query_as("SELECT id, title, description, created_at FROM surveys WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut self.executor)
            .await?;
        match row {
            Some(row) => {
                let questions = QuestionCommon::query(
                    self,
                    QuestionQuery {
                        survey_id_eq: Some(id),
                        ..default::default()
                    },
                )
                .await?;
                Ok(Some(row.with_questions(questions)))
            }
            None => Ok(None),
        }
    }
}

impl<E> QuestionCommon for PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn query(&mut self, query: QuestionQuery) -> Result<Vec<Question>, Error> {
        let mut q = QueryBuilder::<Postgres>::new("SELECT id, survey_id, text, type_, required, options, order_index, created_at FROM questions WHERE 1 = 1");
        if let Some(survey_id) = query.survey_id_eq {
            q.push(" AND survey_id = ").push_bind(survey_id);
        }
        if let Some(ids) = query.id_in {
            q.push(" AND id = ANY(").push_bind(ids).push(")");
        }
        q.push(" ORDER BY order_index ASC, id ASC");
        let questions = q.build_query_as().fetch_all(&mut self.executor).await?;
        Ok(questions)
    }
}

impl<E> SubmissionCommon for PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert(&mut self, submission: SubmissionInsert) -> Result<i32, Error> {
        let id = query_scalar("INSERT INTO submissions (survey_id) VALUES ($1) RETURNING id")
            .bind(submission.survey_id)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(id)
    }

    async fn get(&mut self, id: i32) -> Result<Option<Submission>, Error> {
        let submission = query_as("SELECT id, survey_id, created_at FROM submissions WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut self.executor)
            .await?;
        Ok(submission)
    }

    async fn count(&mut self, query: SubmissionQuery) -> Result<i64, Error> {
        let total = query_scalar("SELECT COUNT(*) FROM submissions WHERE ($1::INT4 IS NULL OR survey_id = $1)")
            .bind(query.survey_id_eq)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(total)
    }
}

impl<E> AnswerCommon for PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn bulk_insert(&mut self, answers: Vec<AnswerInsert>) -> Result<(), Error> {
        if answers.is_empty() {
            return Ok(());
        }
        QueryBuilder::<Postgres>::new("INSERT INTO answers (submission_id, question_id, value)")
            .push_values(answers.into_iter(), |mut b, a| {
                b.push_bind(a.submission_id);
                b.push_bind(a.question_id);
                b.push_bind(a.value);
            })
            .build()
            .execute(&mut self.executor)
            .await?;
        Ok(())
    }

    async fn query(&mut self, query: AnswerQuery) -> Result<Vec<Answer>, Error> {
        let answers = query_as(
            "
        SELECT id, submission_id, question_id, value
        FROM answers
        WHERE ($1::INT4 IS NULL OR submission_id = $1)
        ORDER BY id ASC",
        )
        .bind(query.submission_id_eq)
        .fetch_all(&mut self.executor)
        .await?;
        Ok(answers)
    }

    async fn count(&mut self, query: AnswerQuery) -> Result<i64, Error> {
        let total = query_scalar("SELECT COUNT(*) FROM answers WHERE ($1::INT4 IS NULL OR submission_id = $1)")
            .bind(query.submission_id_eq)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(total)
    }
}

impl<E> HealthCommon for PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn ping(&mut self) -> Result<(), Error> {
        query("SELECT 1").execute(&mut self.executor).await?;
        Ok(())
    }
}

impl Common for PgSqlx<PoolConnection<Postgres>> {}
impl<'a> Common for PgSqlx<Transaction<'a, Postgres>> {}
impl Store for PgSqlx<PoolConnection<Postgres>> {}
impl<'a> Store for PgSqlx<Transaction<'a, Postgres>> {}

impl<'a> TxStore for PgSqlx<Transaction<'a, Postgres>> {
    async fn commit(self) -> Result<(), Error> {
        self.executor.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), Error> {
        self.executor.rollback().await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgSqlxManager {
    pool: PgPool,
}

impl PgSqlxManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, Error> {
        let pool = PgPoolOptions::new().max_connections(max_connections).connect(url).await?;
        Ok(Self::new(pool))
    }
}

impl Manager for PgSqlxManager {
    type Store = PgSqlx<PoolConnection<Postgres>>;
    type TxStore = PgSqlx<Transaction<'static, Postgres>>;

    async fn db(&self) -> Result<Self::Store, Error> {
        let conn = self.pool.acquire().await?;
        Ok(PgSqlx::new(conn))
    }

    async fn tx(&self) -> Result<Self::TxStore, Error> {
        let tx = self.pool.begin().await?;
        Ok(PgSqlx::new(tx))
    }
}
