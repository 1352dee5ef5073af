use super::*;

fn pair(key: &str, value: &str) -> (String, String) {
    (key.to_owned(), value.to_owned())
}

#[test]
fn encode_form_escapes_reserved_characters() {
    let body = encode_form(&[
        pair("name", "Trap Guide"),
        pair("url", "https://example.com/traps?a=1&b=2"),
    ]);
    assert_eq!(
        body,
        "name=Trap%20Guide&url=https%3A%2F%2Fexample.com%2Ftraps%3Fa%3D1%26b%3D2"
    );
}

#[test]
fn encode_form_keeps_unreserved_characters_and_utf8() {
    assert_eq!(encode_form(&[pair("a-b_c.d*", "x")]), "a-b_c.d*=x");
    assert_eq!(encode_form(&[pair("name", "é")]), "name=%C3%A9");
    assert_eq!(encode_form(&[]), "");
}

#[test]
fn submission_field_returns_first_match() {
    let submission = LinkFormSubmission {
        action: "/campaigns/keep/links/add/".to_owned(),
        fields: vec![
            pair("csrfmiddlewaretoken", "tok"),
            pair("name", "first"),
            pair("name", "second"),
        ],
    };
    assert_eq!(submission.field("name"), Some("first"));
    assert_eq!(submission.field("csrfmiddlewaretoken"), Some("tok"));
    assert_eq!(submission.field("url"), None);
    assert_eq!(submission.encoded_body(), "csrfmiddlewaretoken=tok&name=first&name=second");
}

#[test]
fn mutation_headers_mark_interface_call_and_carry_token() {
    let headers = mutation_headers("X-CSRFToken", "abc123");
    assert_eq!(headers[0], ("X-CSRFToken", "abc123"));
    assert_eq!(headers[1], ("Content-Type", "application/x-www-form-urlencoded"));
    assert_eq!(headers[2], ("X-Requested-With", "XMLHttpRequest"));
}

#[test]
fn http_api_builds_delete_url_from_config() {
    let api = HttpLinkApi::new(&UiConfig::default());
    let id = LinkId::parse("42").expect("id");
    assert_eq!(api.delete_url(&id), "/links/42/delete/");
}

#[test]
fn transport_failed_message_names_action() {
    assert_eq!(
        transport_failed_message("delete", "NetworkError"),
        "delete request failed: NetworkError"
    );
}

#[test]
fn api_error_messages_are_readable() {
    assert_eq!(ApiError::Status(403).to_string(), "unexpected status: 403");
    assert_eq!(
        ApiError::MissingToken("csrfmiddlewaretoken".to_owned()).to_string(),
        "missing anti-forgery token field `csrfmiddlewaretoken`"
    );
    let wire = links::decode_create_reply("nope").expect_err("not json");
    assert!(ApiError::from(wire).to_string().starts_with("failed to decode reply body"));
}
