//! Actix-web extractor for the acting user.
//!
//! Users are managed by the surrounding application; requests carry an
//! opaque user reference in the `X-User` header.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use std::convert::Infallible;
use std::future::{Ready, ready};

use crate::config::USER_HEADER;

/// Read a header as trimmed text.
/// Returns None if the header is missing, blank or invalid UTF-8.
fn extract_header(req: &HttpRequest, header_name: &str) -> Option<String> {
    req.headers()
        .get(header_name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// The user a request acts on behalf of, if any.
///
/// Used as a default for `engineer` and `inspector` on create:
/// ```ignore
/// async fn handler(user: ActingUser) -> impl Responder {
///     let engineer = user.into_inner();
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActingUser(Option<String>);

impl ActingUser {
    /// Read the acting user from the request headers.
    pub fn from_headers(req: &HttpRequest) -> Self {
        ActingUser(extract_header(req, USER_HEADER))
    }

    pub fn into_inner(self) -> Option<String> {
        self.0
    }
}

impl FromRequest for ActingUser {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(ActingUser::from_headers(req)))
    }
}
