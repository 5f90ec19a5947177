use crate::config::AppConfig;
use crate::host::Host;
use crate::notes::CommentNotes;
use crate::router::{handle, App};
use crate::tests::utils::{init_test_db, operator, visitor_comment};
use astra::{Body, Response};
use http::{Method, Request};
use std::io::Read;
use tempfile::TempDir;

fn make_app() -> (App, TempDir) {
    let (db, dir) = init_test_db();
    let mut config = AppConfig::default();
    config.server.operator_name = "Front Desk".to_string();

    let mut host = Host::new(db);
    CommentNotes::new(config.notes.clone()).register(&mut host);
    (App { host, config }, dir)
}

fn get(app: &App, uri: &str) -> Response {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    handle(req, app).expect("Handler failed")
}

fn post_form(app: &App, uri: &str, form: &str) -> Result<Response, crate::errors::AppError> {
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    handle(req, app)
}

fn body_of(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

#[test]
fn root_redirects_to_comments() {
    let (app, _dir) = make_app();
    let resp = get(&app, "/");
    assert_eq!(resp.status(), 303);
    assert_eq!(
        resp.headers().get("Location").unwrap().to_str().unwrap(),
        "/admin/comments"
    );
}

#[test]
fn meta_form_records_a_price_note_on_the_property_screen() {
    let (app, _dir) = make_app();
    let id = app
        .host
        .insert_post(&operator(), "property", "12 Harbour Road")
        .unwrap();
    app.host.add_post_meta(&operator(), id, "_price", "250000").unwrap();

    let resp = post_form(
        &app,
        &format!("/admin/property/{id}/meta"),
        "key=_price&value=245000",
    )
    .expect("Handler failed");
    assert_eq!(resp.status(), 303);
    assert_eq!(
        resp.headers().get("Location").unwrap().to_str().unwrap(),
        format!("/admin/property/{id}")
    );

    let resp = get(&app, &format!("/admin/property/{id}"));
    assert_eq!(resp.status(), 200);
    let body = body_of(resp);
    assert!(body.contains("12 Harbour Road"));
    assert!(body.contains("Price changed from 250000 to 245000"));
    assert!(body.contains("Front Desk"));
    assert!(body.contains("_price_change_date"));
}

#[test]
fn comment_list_hides_notes_but_shows_comments() {
    let (app, _dir) = make_app();
    let id = app
        .host
        .insert_post(&operator(), "property", "12 Harbour Road")
        .unwrap();
    app.host
        .insert_comment(&operator(), &visitor_comment(id, "1"))
        .unwrap();
    app.host
        .add_post_meta(&operator(), id, "_on_market", "yes")
        .unwrap();

    let body = body_of(get(&app, "/admin/comments"));
    assert!(body.contains("Is this still available?"));
    assert!(!body.contains("property_on_market"));
    assert!(body.contains("All: <strong>1</strong>"));
}

#[test]
fn status_form_moves_a_comment() {
    let (app, _dir) = make_app();
    let id = app
        .host
        .insert_post(&operator(), "property", "12 Harbour Road")
        .unwrap();
    let comment = app
        .host
        .insert_comment(&operator(), &visitor_comment(id, "0"))
        .unwrap();

    let resp = post_form(&app, &format!("/admin/comments/{comment}/status"), "status=spam")
        .expect("Handler failed");
    assert_eq!(resp.status(), 303);

    let stats = app.host.count_comments(&operator(), None).unwrap();
    assert_eq!(stats.spam, 1);
    assert_eq!(stats.moderated, 0);
}

#[test]
fn bad_input_is_rejected() {
    let (app, _dir) = make_app();
    let id = app
        .host
        .insert_post(&operator(), "property", "12 Harbour Road")
        .unwrap();

    let err = post_form(&app, &format!("/admin/property/{id}/meta"), "value=1").unwrap_err();
    assert!(matches!(err, crate::errors::AppError::BadRequest(_)));

    let err = post_form(&app, "/admin/comments/1/status", "status=deleted").unwrap_err();
    assert!(matches!(err, crate::errors::AppError::BadRequest(_)));

    let err = post_form(&app, "/admin/comments/abc/status", "status=1").unwrap_err();
    assert!(matches!(err, crate::errors::AppError::BadRequest(_)));
}

#[test]
fn unknown_records_and_routes_are_not_found() {
    let (app, _dir) = make_app();
    let id = app
        .host
        .insert_post(&operator(), "contact", "A. Buyer")
        .unwrap();

    for uri in [
        format!("/admin/property/{id}"),
        "/admin/property/9999".to_string(),
        "/nowhere".to_string(),
    ] {
        let req = Request::builder()
            .method(Method::GET)
            .uri(uri.as_str())
            .body(Body::empty())
            .unwrap();
        let err = handle(req, &app).unwrap_err();
        assert!(matches!(err, crate::errors::AppError::NotFound), "{uri}");
    }
}
