//! HTTP calls to the helpful-links endpoints.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Native builds: no transport is compiled; controllers are exercised through
//! the [`LinkApi`] trait with in-memory implementations.
//!
//! ERROR HANDLING
//! ==============
//! Every failure comes back as an [`ApiError`] so the controller can log it
//! and leave the page untouched. Validation failures are not errors: the
//! create endpoint answers them with a 400 and an `errors` body, which is
//! decoded into [`CreateLinkReply::Invalid`].

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use links::{CreateLinkReply, LinkId, WireError};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::config::UiConfig;

/// Header marking an interface-originated call.
pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";
pub const REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Bytes left unescaped in a form body (the `application/x-www-form-urlencoded`
/// unreserved set, spaces go out as `%20`).
const FORM_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'*');

/// Failure of a single create or delete exchange.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (network, CORS, aborted).
    #[error("{0}")]
    Transport(String),
    /// The server answered with a non-success status where one was required.
    #[error("unexpected status: {0}")]
    Status(u16),
    /// The response body could not be interpreted.
    #[error(transparent)]
    Body(#[from] WireError),
    /// No anti-forgery token was available to send.
    #[error("missing anti-forgery token field `{0}`")]
    MissingToken(String),
}

/// Fields of the add-link form at the moment it was submitted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkFormSubmission {
    /// The form's configured target.
    pub action: String,
    /// Field name/value pairs in document order.
    pub fields: Vec<(String, String)>,
}

impl LinkFormSubmission {
    /// First value submitted for `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The fields as a url-encoded request body.
    #[must_use]
    pub fn encoded_body(&self) -> String {
        encode_form(&self.fields)
    }
}

/// Encode name/value pairs as an `application/x-www-form-urlencoded` body.
#[must_use]
pub fn encode_form(fields: &[(String, String)]) -> String {
    fields
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, FORM_VALUE),
                utf8_percent_encode(value, FORM_VALUE)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Headers sent with every mutating call.
#[must_use]
pub fn mutation_headers<'a>(csrf_header: &'a str, token: &'a str) -> [(&'a str, &'a str); 3] {
    [
        (csrf_header, token),
        ("Content-Type", FORM_CONTENT_TYPE),
        (REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE),
    ]
}

#[cfg(any(test, feature = "hydrate"))]
fn transport_failed_message(action: &str, detail: &str) -> String {
    format!("{action} request failed: {detail}")
}

/// Network capability used by the link list controller.
#[allow(async_fn_in_trait)]
pub trait LinkApi {
    /// Post the add-link form and decode the reply, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when no usable reply arrives.
    async fn create_link(
        &self,
        submission: &LinkFormSubmission,
        token: &str,
    ) -> Result<CreateLinkReply, ApiError>;

    /// Ask the server to delete `id`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or a non-success status.
    async fn delete_link(&self, id: &LinkId, token: &str) -> Result<(), ApiError>;
}

/// [`LinkApi`] over `fetch`.
#[derive(Clone, Debug)]
pub struct HttpLinkApi {
    csrf_header: String,
    delete_endpoint: String,
}

impl HttpLinkApi {
    #[must_use]
    pub fn new(config: &UiConfig) -> Self {
        Self {
            csrf_header: config.csrf_header.clone(),
            delete_endpoint: config.delete_endpoint.clone(),
        }
    }

    /// Header carrying the anti-forgery token.
    #[must_use]
    pub fn csrf_header(&self) -> &str {
        &self.csrf_header
    }

    /// Delete route for `id`.
    #[must_use]
    pub fn delete_url(&self, id: &LinkId) -> String {
        links::delete_endpoint(&self.delete_endpoint, id)
    }
}

impl LinkApi for HttpLinkApi {
    async fn create_link(
        &self,
        submission: &LinkFormSubmission,
        token: &str,
    ) -> Result<CreateLinkReply, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let mut request = gloo_net::http::Request::post(&submission.action);
            for (name, value) in mutation_headers(self.csrf_header(), token) {
                request = request.header(name, value);
            }
            let resp = request
                .body(submission.encoded_body())
                .map_err(|e| ApiError::Transport(transport_failed_message("create", &e.to_string())))?
                .send()
                .await
                .map_err(|e| ApiError::Transport(transport_failed_message("create", &e.to_string())))?;
            log::debug!("create link answered {}", resp.status());
            let body = resp
                .text()
                .await
                .map_err(|e| ApiError::Transport(transport_failed_message("create", &e.to_string())))?;
            Ok(links::decode_create_reply(&body)?)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (submission, token);
            Err(ApiError::Transport("not available outside the browser".to_owned()))
        }
    }

    async fn delete_link(&self, id: &LinkId, token: &str) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let url = self.delete_url(id);
            let mut request = gloo_net::http::Request::post(&url);
            for (name, value) in mutation_headers(self.csrf_header(), token) {
                request = request.header(name, value);
            }
            let resp = request
                .send()
                .await
                .map_err(|e| ApiError::Transport(transport_failed_message("delete", &e.to_string())))?;
            if !resp.ok() {
                return Err(ApiError::Status(resp.status()));
            }
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (id, token);
            Err(ApiError::Transport("not available outside the browser".to_owned()))
        }
    }
}
