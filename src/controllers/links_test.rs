use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use futures::executor::block_on;

use super::*;
use crate::net::api::ApiError;

#[derive(Default)]
struct FakePage {
    items: RefCell<Vec<LinkRecord>>,
    form_resets: Cell<usize>,
    /// `None` when the page has no placeholder element.
    placeholder_visible: RefCell<Option<bool>>,
    errors: RefCell<Vec<String>>,
    confirm_answer: Cell<bool>,
    confirm_prompts: RefCell<Vec<String>>,
    token: Option<String>,
}

impl FakePage {
    fn with_items(ids: &[&str]) -> Self {
        let page = Self {
            placeholder_visible: RefCell::new(Some(ids.is_empty())),
            confirm_answer: Cell::new(true),
            token: Some("page-token".to_owned()),
            ..Self::default()
        };
        page.items
            .borrow_mut()
            .extend(ids.iter().map(|id| record(id, "Existing", "https://example.com")));
        page
    }

    fn ids(&self) -> Vec<String> {
        self.items.borrow().iter().map(|r| r.pk.to_string()).collect()
    }
}

impl LinkPage for FakePage {
    fn append_link(&self, record: &LinkRecord) {
        self.items.borrow_mut().push(record.clone());
    }

    fn remove_link(&self, id: &LinkId) -> bool {
        let mut items = self.items.borrow_mut();
        let before = items.len();
        items.retain(|r| &r.pk != id);
        items.len() != before
    }

    fn link_count(&self) -> usize {
        self.items.borrow().len()
    }

    fn reset_form(&self) {
        self.form_resets.set(self.form_resets.get() + 1);
    }

    fn set_placeholder_visible(&self, visible: bool) {
        let mut placeholder = self.placeholder_visible.borrow_mut();
        if placeholder.is_some() {
            *placeholder = Some(visible);
        }
    }

    fn show_errors(&self, lines: &[String]) {
        *self.errors.borrow_mut() = lines.to_vec();
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirm_prompts.borrow_mut().push(message.to_owned());
        self.confirm_answer.get()
    }

    fn csrf_token(&self) -> Option<String> {
        self.token.clone()
    }
}

#[derive(Default)]
struct FakeApi {
    create_replies: RefCell<VecDeque<Result<CreateLinkReply, ApiError>>>,
    delete_replies: RefCell<VecDeque<Result<(), ApiError>>>,
    create_calls: RefCell<Vec<(LinkFormSubmission, String)>>,
    delete_calls: RefCell<Vec<(LinkId, String)>>,
}

impl FakeApi {
    fn replying_create(reply: Result<CreateLinkReply, ApiError>) -> Self {
        let api = Self::default();
        api.create_replies.borrow_mut().push_back(reply);
        api
    }

    fn replying_delete(reply: Result<(), ApiError>) -> Self {
        let api = Self::default();
        api.delete_replies.borrow_mut().push_back(reply);
        api
    }
}

impl LinkApi for FakeApi {
    async fn create_link(
        &self,
        submission: &LinkFormSubmission,
        token: &str,
    ) -> Result<CreateLinkReply, ApiError> {
        self.create_calls
            .borrow_mut()
            .push((submission.clone(), token.to_owned()));
        self.create_replies
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(ApiError::Transport("no reply queued".to_owned())))
    }

    async fn delete_link(&self, id: &LinkId, token: &str) -> Result<(), ApiError> {
        self.delete_calls.borrow_mut().push((id.clone(), token.to_owned()));
        self.delete_replies
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(ApiError::Transport("no reply queued".to_owned())))
    }
}

fn record(pk: &str, name: &str, url: &str) -> LinkRecord {
    LinkRecord {
        pk: LinkId::parse(pk).expect("id"),
        name: name.to_owned(),
        url: url.to_owned(),
        delete_url: None,
    }
}

fn id(raw: &str) -> LinkId {
    LinkId::parse(raw).expect("id")
}

fn submission(name: &str, url: &str) -> LinkFormSubmission {
    LinkFormSubmission {
        action: "/campaigns/lost-mine/links/add/".to_owned(),
        fields: vec![
            ("csrfmiddlewaretoken".to_owned(), "form-token".to_owned()),
            ("name".to_owned(), name.to_owned()),
            ("url".to_owned(), url.to_owned()),
        ],
    }
}

fn invalid(field: &str, messages: &[&str]) -> CreateLinkReply {
    let mut errors = FieldErrors::new();
    errors.insert(field.to_owned(), messages.iter().map(|m| (*m).to_owned()).collect());
    CreateLinkReply::Invalid(errors)
}

#[test]
fn successful_submission_appends_item_and_resets_form() {
    let page = FakePage::with_items(&[]);
    let api = FakeApi::replying_create(Ok(CreateLinkReply::Created(record(
        "42",
        "Trap Guide",
        "https://example.com/traps",
    ))));
    let config = UiConfig::default();

    let outcome = block_on(submit_new_link(
        &page,
        &api,
        &config,
        submission("Trap Guide", "https://example.com/traps"),
    ));

    assert_eq!(outcome, SubmitOutcome::Added(id("42")));
    assert_eq!(page.ids(), vec!["42"]);
    let items = page.items.borrow();
    assert_eq!(items[0].name, "Trap Guide");
    assert_eq!(items[0].url, "https://example.com/traps");
    assert_eq!(config.link_item_id(&items[0].pk), "link-42");
    assert_eq!(page.form_resets.get(), 1);
    assert_eq!(*page.placeholder_visible.borrow(), Some(false));
}

#[test]
fn submission_sends_form_token_to_api() {
    let page = FakePage::with_items(&[]);
    let api = FakeApi::replying_create(Ok(CreateLinkReply::Created(record("1", "a", "https://a.test"))));

    block_on(submit_new_link(&page, &api, &UiConfig::default(), submission("a", "https://a.test")));

    let calls = api.create_calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1, "form-token");
    assert_eq!(calls[0].0.action, "/campaigns/lost-mine/links/add/");
    assert_eq!(calls[0].0.field("name"), Some("a"));
}

#[test]
fn successful_submission_clears_previous_errors() {
    let page = FakePage::with_items(&["1"]);
    page.errors.borrow_mut().push("name: This field is required.".to_owned());
    let api = FakeApi::replying_create(Ok(CreateLinkReply::Created(record("2", "b", "https://b.test"))));

    block_on(submit_new_link(&page, &api, &UiConfig::default(), submission("b", "https://b.test")));

    assert!(page.errors.borrow().is_empty());
    assert_eq!(page.ids(), vec!["1", "2"]);
}

#[test]
fn rejected_submission_renders_errors_without_touching_list() {
    let page = FakePage::with_items(&["7"]);
    let api = FakeApi::replying_create(Ok(invalid("name", &["This field is required."])));

    let outcome = block_on(submit_new_link(&page, &api, &UiConfig::default(), submission("", "https://x.test")));

    assert_eq!(outcome, SubmitOutcome::Rejected(1));
    assert_eq!(*page.errors.borrow(), vec!["name: This field is required."]);
    assert_eq!(page.ids(), vec!["7"]);
    assert_eq!(page.form_resets.get(), 0);
}

#[test]
fn rejected_submission_renders_every_field_and_message() {
    let page = FakePage::with_items(&[]);
    let mut errors = FieldErrors::new();
    errors.insert("url".to_owned(), vec!["Enter a valid URL.".to_owned(), "Too long.".to_owned()]);
    errors.insert("name".to_owned(), vec!["This field is required.".to_owned()]);
    errors.insert(
        NON_FIELD_ERRORS.to_owned(),
        vec!["You can only add up to 20 helpful links per campaign.".to_owned()],
    );
    let api = FakeApi::replying_create(Ok(CreateLinkReply::Invalid(errors)));

    let outcome = block_on(submit_new_link(&page, &api, &UiConfig::default(), submission("", "bad")));

    assert_eq!(outcome, SubmitOutcome::Rejected(3));
    assert_eq!(
        *page.errors.borrow(),
        vec![
            "You can only add up to 20 helpful links per campaign.",
            "name: This field is required.",
            "url: Enter a valid URL., Too long.",
        ]
    );
    assert!(page.ids().is_empty());
    assert_eq!(*page.placeholder_visible.borrow(), Some(true));
}

#[test]
fn new_errors_replace_previous_errors() {
    let page = FakePage::with_items(&[]);
    page.errors.borrow_mut().push("url: old".to_owned());
    let api = FakeApi::replying_create(Ok(invalid("name", &["Required."])));

    block_on(submit_new_link(&page, &api, &UiConfig::default(), submission("", "")));

    assert_eq!(*page.errors.borrow(), vec!["name: Required."]);
}

#[test]
fn transport_failure_leaves_page_unchanged() {
    let page = FakePage::with_items(&["3"]);
    page.errors.borrow_mut().push("name: earlier".to_owned());
    let api = FakeApi::replying_create(Err(ApiError::Transport("NetworkError".to_owned())));

    let outcome = block_on(submit_new_link(&page, &api, &UiConfig::default(), submission("x", "https://x.test")));

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(page.ids(), vec!["3"]);
    assert_eq!(*page.errors.borrow(), vec!["name: earlier"]);
    assert_eq!(page.form_resets.get(), 0);
    assert_eq!(*page.placeholder_visible.borrow(), Some(false));
}

#[test]
fn unrecognized_reply_is_ignored() {
    let page = FakePage::with_items(&[]);
    let api = FakeApi::replying_create(Ok(CreateLinkReply::Unrecognized));

    let outcome = block_on(submit_new_link(&page, &api, &UiConfig::default(), submission("x", "https://x.test")));

    assert_eq!(outcome, SubmitOutcome::Ignored);
    assert!(page.ids().is_empty());
    assert_eq!(page.form_resets.get(), 0);
    assert_eq!(*page.placeholder_visible.borrow(), Some(true));
}

#[test]
fn submission_without_token_field_sends_nothing() {
    let page = FakePage::with_items(&[]);
    let api = FakeApi::default();
    let mut form = submission("x", "https://x.test");
    form.fields.retain(|(key, _)| key != "csrfmiddlewaretoken");

    let outcome = block_on(submit_new_link(&page, &api, &UiConfig::default(), form));

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert!(api.create_calls.borrow().is_empty());
}

#[test]
fn deleting_last_item_reveals_placeholder() {
    let page = FakePage::with_items(&["5"]);
    let api = FakeApi::replying_delete(Ok(()));

    let outcome = block_on(delete_link(&page, &api, &UiConfig::default(), id("5")));

    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert!(page.ids().is_empty());
    assert_eq!(*page.placeholder_visible.borrow(), Some(true));
}

#[test]
fn deleting_non_last_item_keeps_placeholder_hidden() {
    let page = FakePage::with_items(&["5", "6"]);
    let api = FakeApi::replying_delete(Ok(()));

    block_on(delete_link(&page, &api, &UiConfig::default(), id("5")));

    assert_eq!(page.ids(), vec!["6"]);
    assert_eq!(*page.placeholder_visible.borrow(), Some(false));
}

#[test]
fn deleting_without_placeholder_element_is_fine() {
    let page = FakePage::with_items(&["5"]);
    *page.placeholder_visible.borrow_mut() = None;
    let api = FakeApi::replying_delete(Ok(()));

    let outcome = block_on(delete_link(&page, &api, &UiConfig::default(), id("5")));

    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(*page.placeholder_visible.borrow(), None);
}

#[test]
fn declined_confirmation_sends_nothing() {
    let page = FakePage::with_items(&["5"]);
    page.confirm_answer.set(false);
    let api = FakeApi::replying_delete(Ok(()));

    let outcome = block_on(delete_link(&page, &api, &UiConfig::default(), id("5")));

    assert_eq!(outcome, DeleteOutcome::Declined);
    assert!(api.delete_calls.borrow().is_empty());
    assert_eq!(page.ids(), vec!["5"]);
    assert_eq!(
        *page.confirm_prompts.borrow(),
        vec!["Are you sure you want to delete this link?"]
    );
}

#[test]
fn delete_sends_page_token_for_id() {
    let page = FakePage::with_items(&["9"]);
    let api = FakeApi::replying_delete(Ok(()));

    block_on(delete_link(&page, &api, &UiConfig::default(), id("9")));

    assert_eq!(*api.delete_calls.borrow(), vec![(id("9"), "page-token".to_owned())]);
}

#[test]
fn failed_delete_leaves_list_unchanged() {
    let page = FakePage::with_items(&["5"]);
    let api = FakeApi::replying_delete(Err(ApiError::Status(403)));

    let outcome = block_on(delete_link(&page, &api, &UiConfig::default(), id("5")));

    assert_eq!(outcome, DeleteOutcome::Failed);
    assert_eq!(page.ids(), vec!["5"]);
    assert_eq!(*page.placeholder_visible.borrow(), Some(false));
}

#[test]
fn delete_without_page_token_sends_nothing() {
    let page = FakePage {
        token: None,
        ..FakePage::with_items(&["5"])
    };
    let api = FakeApi::replying_delete(Ok(()));

    let outcome = block_on(delete_link(&page, &api, &UiConfig::default(), id("5")));

    assert_eq!(outcome, DeleteOutcome::Failed);
    assert!(api.delete_calls.borrow().is_empty());
    assert_eq!(page.ids(), vec!["5"]);
}

#[test]
fn missing_token_names_configured_field() {
    let config = UiConfig {
        csrf_field: "authenticity_token".to_owned(),
        ..UiConfig::default()
    };

    let err = require_token(None::<&str>, &config).unwrap_err();

    assert!(matches!(&err, ApiError::MissingToken(field) if field == "authenticity_token"));
    assert_eq!(
        err.to_string(),
        "missing anti-forgery token field `authenticity_token`"
    );
}

#[test]
fn present_token_passes_through() {
    let token = require_token(Some("abc"), &UiConfig::default());
    assert!(matches!(token, Ok("abc")));
}

#[test]
fn error_lines_join_messages_per_field() {
    let mut errors = FieldErrors::new();
    errors.insert("name".to_owned(), vec!["a".to_owned(), "b".to_owned()]);
    assert_eq!(error_lines(&errors), vec!["name: a, b"]);
    assert!(error_lines(&FieldErrors::new()).is_empty());
}

#[test]
fn sync_placeholder_tracks_emptiness() {
    let page = FakePage::with_items(&["1"]);
    *page.placeholder_visible.borrow_mut() = Some(true);
    sync_placeholder(&page);
    assert_eq!(*page.placeholder_visible.borrow(), Some(false));

    page.items.borrow_mut().clear();
    sync_placeholder(&page);
    assert_eq!(*page.placeholder_visible.borrow(), Some(true));
}

#[test]
fn item_view_carries_id_text_and_delete_tag() {
    let view = LinkItemView::new(
        &record("42", "Trap Guide", "https://example.com/traps"),
        &UiConfig::default(),
    );
    assert_eq!(view.element_id, "link-42");
    assert_eq!(view.href, "https://example.com/traps");
    assert_eq!(view.text, "Trap Guide");
    assert_eq!(view.id_attribute, ("data-link-pk".to_owned(), "42".to_owned()));
    assert_eq!(view.button_class, "btn btn-sm btn-outline-danger delete-link-btn");
    assert_eq!(view.button_label, "Delete Trap Guide");
}

#[test]
fn item_view_keeps_markup_in_names_as_text() {
    let view = LinkItemView::new(
        &record("1", "<img src=x onerror=alert(1)>", "https://x.test"),
        &UiConfig::default(),
    );
    assert_eq!(view.text, "<img src=x onerror=alert(1)>");
}
