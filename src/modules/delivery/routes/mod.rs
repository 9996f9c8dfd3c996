mod history;
mod mark_delivered;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .nest("/mark-delivered", mark_delivered::get_router())
        .nest("/history", history::get_router())
}
