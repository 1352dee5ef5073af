//! Helpful-links list controller.
//!
//! Keeps the rendered list in step with server-side create/delete calls. Both
//! handlers take the event payload plus a [`LinkPage`] (DOM) and a
//! [`LinkApi`] (network), so they run unchanged against the browser adapters
//! in `browser::links` and against in-memory fakes in tests.
//!
//! ERROR HANDLING
//! ==============
//! A failure ends the single action that triggered it. Validation messages
//! are rendered inline; transport and status failures are only logged, and
//! the page is left exactly as it was before the request.

#[cfg(test)]
#[path = "links_test.rs"]
mod links_test;

use links::{CreateLinkReply, FieldErrors, LinkId, LinkRecord, NON_FIELD_ERRORS};

use crate::config::UiConfig;
use crate::net::api::{ApiError, LinkApi, LinkFormSubmission};

/// DOM capability used by the link list controller.
pub trait LinkPage {
    /// Append a rendered list item for `record`.
    fn append_link(&self, record: &LinkRecord);
    /// Remove the list item for `id`. Returns whether one was found.
    fn remove_link(&self, id: &LinkId) -> bool;
    /// Number of items currently rendered in the list.
    fn link_count(&self) -> usize;
    /// Clear the add-link form fields.
    fn reset_form(&self);
    /// Show or hide the "no links" placeholder, if the page has one.
    fn set_placeholder_visible(&self, visible: bool);
    /// Replace the error region's lines. An empty slice clears and hides it.
    fn show_errors(&self, lines: &[String]);
    /// Ask the user a yes/no question.
    fn confirm(&self, message: &str) -> bool;
    /// Value of the page's anti-forgery field.
    fn csrf_token(&self) -> Option<String>;
}

/// Result of handling one add-link submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A list item was appended for this id.
    Added(LinkId),
    /// The server rejected the form; this many error lines were rendered.
    Rejected(usize),
    /// The reply carried neither a record nor errors.
    Ignored,
    /// No usable reply; nothing changed.
    Failed,
}

/// Result of handling one delete request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined the confirmation; nothing was sent.
    Declined,
    /// The server deleted the link and its item was removed.
    Deleted,
    /// The request failed or was never sent; the list is unchanged.
    Failed,
}

/// What a rendered list item for one link consists of.
///
/// Name and URL are carried as plain text and attribute values; adapters must
/// never feed them to an HTML parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkItemView {
    pub element_id: String,
    pub item_class: String,
    pub href: String,
    pub text: String,
    pub button_class: String,
    pub button_label: String,
    pub id_attribute: (String, String),
    pub icon_class: String,
}

impl LinkItemView {
    #[must_use]
    pub fn new(record: &LinkRecord, config: &UiConfig) -> Self {
        Self {
            element_id: config.link_item_id(&record.pk),
            item_class: config.link_item_class.clone(),
            href: record.url.clone(),
            text: record.name.clone(),
            button_class: format!("{} {}", config.delete_button_style, config.delete_button_class),
            button_label: format!("Delete {}", record.name),
            id_attribute: (config.link_id_attribute.clone(), record.pk.to_string()),
            icon_class: config.delete_icon_class.clone(),
        }
    }
}

/// Render field errors as display lines.
///
/// Each field becomes `"field: first, second"`; form-wide errors are shown
/// without a field prefix.
#[must_use]
pub fn error_lines(errors: &FieldErrors) -> Vec<String> {
    errors
        .iter()
        .map(|(field, messages)| {
            let joined = messages.join(", ");
            if field == NON_FIELD_ERRORS {
                joined
            } else {
                format!("{field}: {joined}")
            }
        })
        .collect()
}

/// Require an anti-forgery token before any request is sent.
///
/// # Errors
///
/// Returns [`ApiError::MissingToken`] naming the configured field.
pub fn require_token<T>(token: Option<T>, config: &UiConfig) -> Result<T, ApiError> {
    token.ok_or_else(|| ApiError::MissingToken(config.csrf_field.clone()))
}

/// Make the placeholder visible exactly when the list is empty.
pub fn sync_placeholder<P: LinkPage>(page: &P) {
    page.set_placeholder_visible(page.link_count() == 0);
}

/// Handle a submission of the add-link form.
pub async fn submit_new_link<P, A>(
    page: &P,
    api: &A,
    config: &UiConfig,
    submission: LinkFormSubmission,
) -> SubmitOutcome
where
    P: LinkPage,
    A: LinkApi,
{
    let token = match require_token(submission.field(&config.csrf_field), config) {
        Ok(token) => token,
        Err(e) => {
            leptos::logging::error!("Error adding link: {e}");
            return SubmitOutcome::Failed;
        }
    };

    match api.create_link(&submission, token).await {
        Ok(CreateLinkReply::Created(record)) => {
            page.append_link(&record);
            page.reset_form();
            page.show_errors(&[]);
            sync_placeholder(page);
            SubmitOutcome::Added(record.pk)
        }
        Ok(CreateLinkReply::Invalid(errors)) => {
            let lines = error_lines(&errors);
            page.show_errors(&lines);
            SubmitOutcome::Rejected(lines.len())
        }
        Ok(CreateLinkReply::Unrecognized) => {
            leptos::logging::warn!("Add link reply had neither `pk` nor `errors`; ignoring");
            SubmitOutcome::Ignored
        }
        Err(e) => {
            leptos::logging::error!("Error adding link: {e}");
            SubmitOutcome::Failed
        }
    }
}

/// Handle activation of a delete control for `id`.
pub async fn delete_link<P, A>(page: &P, api: &A, config: &UiConfig, id: LinkId) -> DeleteOutcome
where
    P: LinkPage,
    A: LinkApi,
{
    if !page.confirm(&config.confirm_delete_message) {
        return DeleteOutcome::Declined;
    }

    let token = match require_token(page.csrf_token(), config) {
        Ok(token) => token,
        Err(e) => {
            leptos::logging::error!("Error deleting link {id}: {e}");
            return DeleteOutcome::Failed;
        }
    };

    match api.delete_link(&id, &token).await {
        Ok(()) => {
            if !page.remove_link(&id) {
                leptos::logging::warn!("Deleted link {id} had no list item");
            }
            sync_placeholder(page);
            DeleteOutcome::Deleted
        }
        Err(e) => {
            leptos::logging::error!("Failed to delete link {id}: {e}");
            DeleteOutcome::Failed
        }
    }
}
