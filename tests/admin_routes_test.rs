mod common;

use actix_web::test;
use serde_json::json;
use serial_test::serial;

use common::{TestApp, ADMIN_SECRET};

#[actix_rt::test]
#[serial]
async fn test_login_with_correct_secret() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(&json!({ "password": ADMIN_SECRET }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["authenticated"], true);
}

#[actix_rt::test]
#[serial]
async fn test_login_with_wrong_secret() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(&json!({ "password": "letmein" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Incorrect password!");
}

#[actix_rt::test]
#[serial]
async fn test_no_lockout_after_failed_attempts() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    for _ in 0..5 {
        let req = test::TestRequest::post()
            .uri("/api/admin/login")
            .set_json(&json!({ "password": "wrong" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }

    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(&json!({ "password": ADMIN_SECRET }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}

#[actix_rt::test]
#[serial]
async fn test_bookings_require_the_secret_header() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/bookings")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::get()
        .uri("/api/admin/bookings")
        .insert_header(("x-admin-secret", "wrong"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
#[serial]
async fn test_bookings_surface_store_read_failure() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    // The test store is unreachable, so an authorized refresh reports the
    // read error to the operator.
    let req = test::TestRequest::get()
        .uri("/api/admin/bookings")
        .insert_header(("x-admin-secret", ADMIN_SECRET))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 503);

    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("Error loading bookings"));
}

#[actix_rt::test]
#[serial]
async fn test_export_requires_the_secret_header() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/bookings/export")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
#[serial]
async fn test_export_surfaces_store_read_failure() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/bookings/export")
        .insert_header(("x-admin-secret", ADMIN_SECRET))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 503);
}
