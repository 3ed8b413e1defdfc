use std::time::Duration;

use wiremock::matchers::any;
use wiremock::matchers::body_json;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::Mock;
use wiremock::ResponseTemplate;

use crate::helpers::check_redirect;
use crate::helpers::spawn_app;
use crate::helpers::PRESIGN_PATH;

const INVALID_EMAIL_MSG: &str = "Not a valid email my friend...";

#[tokio::test]
async fn form_is_served() {
    let app = spawn_app().await;
    let resp = app.get_signin().await;
    assert_eq!(resp.status().as_u16(), 200);

    let html = resp.text().await.unwrap();
    assert!(html.contains(r#"<form action="/" method="post">"#));
    assert!(html.contains(r#"name="email""#));
    assert!(!html.contains(INVALID_EMAIL_MSG));
}

#[tokio::test]
async fn invalid_email_is_never_sent() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.presign_server)
        .await;

    let too_long = format!("a@b.co{}", "x".repeat(40));
    for (email, msg) in [
        ("", "empty"),
        ("not-an-email", "no at"),
        (" jane.doe@email.com", "leading space"),
        ("jane.doe@email", "no tld"),
        (too_long.as_str(), "too long"),
    ] {
        let resp = app.post_signin(email).await;
        check_redirect(&resp, "/");
        // consume the flash message so the next attempt starts clean
        let html = app.get_signin_html().await;
        assert!(html.contains(INVALID_EMAIL_MSG), "{msg}");
    }
}

#[tokio::test]
async fn validation_message_is_shown_once() {
    let app = spawn_app().await;

    let resp = app.post_signin("not-an-email").await;
    check_redirect(&resp, "/");

    let html = app.get_signin_html().await;
    assert!(html.contains(INVALID_EMAIL_MSG));

    // reload: the message is gone
    let html = app.get_signin_html().await;
    assert!(!html.contains(INVALID_EMAIL_MSG));
}

#[tokio::test]
async fn ok_redirects_to_presigned_url() {
    let app = spawn_app().await;

    Mock::given(path(PRESIGN_PATH))
        .and(method("POST"))
        .and(body_json(serde_json::json!({ "email": "jane.doe@email.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "ok",
            "presigned": "https://studio.example.com/x",
        })))
        .expect(1)
        .mount(&app.presign_server)
        .await;

    let resp = app.post_signin("jane.doe@email.com").await;
    check_redirect(&resp, "https://studio.example.com/x");
}

#[tokio::test]
async fn uppercase_email_is_sent_as_typed() {
    let app = spawn_app().await;

    Mock::given(path(PRESIGN_PATH))
        .and(body_json(serde_json::json!({ "email": "UPPER.CASE@EXAMPLE.COM" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "presigned": "https://studio.example.com/y" })),
        )
        .expect(1)
        .mount(&app.presign_server)
        .await;

    let resp = app.post_signin("UPPER.CASE@EXAMPLE.COM").await;
    check_redirect(&resp, "https://studio.example.com/y");
}

#[tokio::test]
async fn error_message_replaces_form() {
    let app = spawn_app().await;

    Mock::given(path(PRESIGN_PATH))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({ "message": "Email already registered" })),
        )
        .expect(1)
        .mount(&app.presign_server)
        .await;

    let resp = app.post_signin("jane.doe@email.com").await;
    assert_eq!(resp.status().as_u16(), 400);

    let html = resp.text().await.unwrap();
    assert!(html.contains("Email already registered"));
    assert!(!html.contains("<form"));
    // a way back to the form
    assert!(html.contains(r#"href="/""#));
}

#[tokio::test]
async fn not_registered() {
    let app = spawn_app().await;

    Mock::given(path(PRESIGN_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "message": "This email is not registered with the event, or the event is over"
        })))
        .expect(1)
        .mount(&app.presign_server)
        .await;

    let resp = app.post_signin("jane.doe@email.com").await;
    assert_eq!(resp.status().as_u16(), 404);
    assert!(resp
        .text()
        .await
        .unwrap()
        .contains("This email is not registered with the event, or the event is over"));
}

#[tokio::test]
async fn error_without_message() {
    let app = spawn_app().await;

    Mock::given(path(PRESIGN_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.presign_server)
        .await;

    let resp = app.post_signin("jane.doe@email.com").await;
    assert_eq!(resp.status().as_u16(), 500);
    assert!(resp
        .text()
        .await
        .unwrap()
        .contains("Something went wrong, please try again later"));
}

#[tokio::test]
async fn ok_without_presigned_url() {
    let app = spawn_app().await;

    Mock::given(path(PRESIGN_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "message": "ok" })),
        )
        .expect(1)
        .mount(&app.presign_server)
        .await;

    let resp = app.post_signin("jane.doe@email.com").await;
    assert_eq!(resp.status().as_u16(), 502);
    assert!(resp
        .text()
        .await
        .unwrap()
        .contains("The sign-in service returned an unexpected response"));
}

#[tokio::test]
async fn presign_endpoint_too_slow() {
    let app = spawn_app().await;

    // longer than the timeout set in `spawn_app`
    Mock::given(path(PRESIGN_PATH))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&app.presign_server)
        .await;

    let resp = app.post_signin("jane.doe@email.com").await;
    assert_eq!(resp.status().as_u16(), 502);
    assert!(resp
        .text()
        .await
        .unwrap()
        .contains("Could not reach the sign-in service"));
}

#[tokio::test]
async fn failure_page_leads_back_to_clean_form() {
    let app = spawn_app().await;

    Mock::given(path(PRESIGN_PATH))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({ "message": "Email already registered" })),
        )
        .mount(&app.presign_server)
        .await;

    let resp = app.post_signin("jane.doe@email.com").await;
    assert_eq!(resp.status().as_u16(), 400);

    let html = app.get_signin_html().await;
    assert!(html.contains("<form"));
    assert!(!html.contains("Email already registered"));
}
