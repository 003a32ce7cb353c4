//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie carries the signed-in user's id and email; handlers only see
//! [`CurrentUser`].

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{CurrentUser, Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const EMAIL_KEY: &str = "email";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the signed-in identity, rotating the session id.
    pub fn persist_user(&self, user: &CurrentUser) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user.id.as_ref())
            .and_then(|()| self.0.insert(EMAIL_KEY, user.email.as_str()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Drop every session value.
    pub fn clear(&self) {
        self.0.purge();
    }

    /// The signed-in identity, if the cookie holds a valid one.
    pub fn current_user(&self) -> Result<Option<CurrentUser>, Error> {
        let read = |key: &str| {
            self.0
                .get::<String>(key)
                .map_err(|error| Error::internal(format!("failed to read session: {error}")))
        };
        let (Some(raw_id), Some(email)) = (read(USER_ID_KEY)?, read(EMAIL_KEY)?) else {
            return Ok(None);
        };
        match UserId::new(&raw_id) {
            Ok(id) => Ok(Some(CurrentUser { id, email })),
            Err(error) => {
                tracing::warn!(%error, "invalid user id in session cookie");
                Ok(None)
            }
        }
    }

    /// Require a signed-in identity or return `401 Unauthorized`.
    pub fn require_user(&self) -> Result<CurrentUser, Error> {
        self.current_user()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Require a signed-in user and return only the id.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.require_user().map(|user| user.id)
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
