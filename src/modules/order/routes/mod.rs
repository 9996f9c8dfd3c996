mod assign_driver;
mod history;
mod list;
mod list_by_user;
mod place_order;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .nest("/place-order", place_order::get_router())
        .nest("/all", list::get_router())
        .nest("/user", list_by_user::get_router())
        .nest("/history", history::get_router())
        .nest("/assign-driver", assign_driver::get_router())
}
