use actix_web::{HttpResponse, Responder};

use crate::models::room::room_catalog;

pub async fn get_rooms() -> impl Responder {
    HttpResponse::Ok().json(room_catalog())
}
