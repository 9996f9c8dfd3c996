mod approve_premium;
mod assign_driver;
mod list;
mod pending_premiums;
mod premium_status;
mod request_premium;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .nest("/request-premium", request_premium::get_router())
        .nest("/approve-premium", approve_premium::get_router())
        .nest("/pending-premiums", pending_premiums::get_router())
        .nest("/get-premium-status", premium_status::get_router())
        .nest("/list", list::get_router())
        .nest("/assign-driver", assign_driver::get_router())
}
