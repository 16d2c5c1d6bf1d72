use actix_web::{web, HttpRequest, HttpResponse, Responder};
use chrono::Utc;
use mongodb::Client;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::db::bookings::MongoBookingStore;
use crate::services::access_gate::{verify_secret, AdminSession};
use crate::services::reporting_service::{export_filename, AdminDashboard, ExportError};

#[derive(Deserialize)]
pub struct LoginInput {
    pub password: String,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/login", web::post().to(login))
            .route("/bookings", web::get().to(get_bookings))
            .route("/bookings/export", web::get().to(export_bookings)),
    );
}

/// Static-secret gate in front of the dashboard. A failed attempt carries
/// no lockout or counter; the client shows its shake animation and the
/// operator tries again.
pub async fn login(input: web::Json<LoginInput>) -> impl Responder {
    let mut session = AdminSession::new();
    if session.login(&input.password) {
        HttpResponse::Ok().json(json!({ "authenticated": true }))
    } else {
        HttpResponse::Unauthorized().json(json!({ "error": "Incorrect password!" }))
    }
}

fn authorized(req: &HttpRequest) -> bool {
    req.headers()
        .get("x-admin-secret")
        .and_then(|value| value.to_str().ok())
        .map(verify_secret)
        .unwrap_or(false)
}

pub async fn get_bookings(req: HttpRequest, mongo: web::Data<Arc<Client>>) -> impl Responder {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().json(json!({ "error": "Unauthorized" }));
    }

    let mut dashboard = AdminDashboard::new(MongoBookingStore::new(mongo.get_ref().clone()));
    match dashboard.refresh().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "bookings": dashboard.bookings(),
            "stats": dashboard.stats(),
        })),
        Err(e) => {
            log::error!("Failed to load bookings: {}", e);
            HttpResponse::ServiceUnavailable()
                .body("Error loading bookings. Please check your connection.")
        }
    }
}

pub async fn export_bookings(req: HttpRequest, mongo: web::Data<Arc<Client>>) -> impl Responder {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().json(json!({ "error": "Unauthorized" }));
    }

    let mut dashboard = AdminDashboard::new(MongoBookingStore::new(mongo.get_ref().clone()));
    if let Err(e) = dashboard.refresh().await {
        log::error!("Failed to load bookings for export: {}", e);
        return HttpResponse::ServiceUnavailable()
            .body("Error loading bookings. Please check your connection.");
    }

    match dashboard.export_csv() {
        Ok(csv) => {
            let filename = export_filename(Utc::now().date_naive());
            HttpResponse::Ok()
                .content_type("text/csv")
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{}\"", filename),
                ))
                .body(csv)
        }
        Err(e @ ExportError::NoRecords) => {
            HttpResponse::NotFound().json(json!({ "error": e.to_string() }))
        }
    }
}
