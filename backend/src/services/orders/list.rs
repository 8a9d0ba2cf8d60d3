//! `GET /api/orders`.

use crate::services::orders::mock;
use actix_web::{HttpResponse, Responder};
use log::debug;

pub async fn process() -> impl Responder {
    let orders = mock::generate_orders(&mut rand::thread_rng(), mock::BATCH_SIZE);
    debug!("Serving {} generated orders", orders.len());
    HttpResponse::Ok().json(orders)
}
