use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sqlx::Error as SqlxError;
use std::{io, num};
use thiserror::Error as ThisError;

use crate::response::Envelope;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] SqlxError),

    #[error("parse int error: {0}")]
    ParseInt(#[from] num::ParseIntError),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("server error: {0}")]
    Internal(String),
}

impl Error {
    pub fn validation_failed() -> Self {
        Error::Validation("Validation Failed".into())
    }

    pub fn invalid_id() -> Self {
        Error::Validation("Invalid id parameter".into())
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Database(_) | Error::ParseInt(_) | Error::Io(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        }
        HttpResponse::build(status).json(Envelope::<()>::failure(self.to_string()))
    }
}
