//! Viewer-session extractor.
//!
//! Topic views are deduplicated per visitor session. The session id rides
//! a cookie; when a request carries none, a fresh id is minted here and the
//! handler sets the cookie on the way out.

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use std::future::{Ready, ready};
use uuid::Uuid;

/// Name of the visitor-session cookie.
pub const SESSION_COOKIE: &str = "quorum_session";

/// The visitor's session identity.
#[derive(Debug, Clone)]
pub struct ViewerSession {
    pub id: String,
    /// True when the id was minted for this request and the cookie still
    /// needs to be set on the response.
    pub is_new: bool,
}

impl FromRequest for ViewerSession {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let session = match req.cookie(SESSION_COOKIE) {
            Some(cookie) => ViewerSession {
                id: cookie.value().to_string(),
                is_new: false,
            },
            None => ViewerSession {
                id: Uuid::new_v4().to_string(),
                is_new: true,
            },
        };

        ready(Ok(session))
    }
}
