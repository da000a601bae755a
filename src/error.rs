use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use log::{error, warn};
use rocket::{
    http::{Status, StatusClass},
    response::{self, Responder},
    serde::json::Json,
    Request,
};
use thiserror::Error;

use crate::{
    election::{ElectionError, Rejection},
    model::api::Notice,
    store::StoreError,
    Config,
};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Election(#[from] ElectionError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Jwt(#[from] JwtError),
    #[error("{1}")]
    Status(Status, String),
}

impl From<Rejection> for Error {
    fn from(rejection: Rejection) -> Self {
        Self::Election(rejection.into())
    }
}

impl Error {
    pub fn status(&self) -> Status {
        match self {
            Self::Election(ElectionError::Validation(_)) => Status::BadRequest,
            Self::Election(ElectionError::PartyNotFound(_)) => Status::NotFound,
            Self::Election(ElectionError::Rejected(Rejection::InvalidCredentials)) => {
                Status::Unauthorized
            }
            Self::Election(ElectionError::Rejected(_)) => Status::Forbidden,
            Self::Store(_) => Status::InternalServerError,
            Self::Jwt(err) => match err.kind() {
                JwtErrorKind::InvalidKeyFormat
                | JwtErrorKind::InvalidRsaKey(_)
                | JwtErrorKind::InvalidEcdsaKey
                | JwtErrorKind::RsaFailedSigning => Status::InternalServerError,
                _ => Status::Unauthorized,
            },
            Self::Status(status, _) => *status,
        }
    }

    /// The text shown to the user. Internal details stay in the log.
    fn message(&self) -> String {
        match self {
            Self::Store(_) => "The election data could not be saved or loaded".to_string(),
            Self::Jwt(_) => "Session is invalid or has expired".to_string(),
            other => other.to_string(),
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'o> {
        let status = self.status();
        match status.class() {
            StatusClass::ServerError => error!("{self}"),
            _ => warn!("{self}"),
        }

        let notice_ttl = req
            .rocket()
            .state::<Config>()
            .map(Config::notice_ttl)
            .unwrap_or(crate::config::DEFAULT_NOTICE_TTL);
        (status, Json(Notice::error(self.message(), notice_ttl))).respond_to(req)
    }
}
