use super::types::{request, response};
use crate::types::Context;
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user_id = payload
        .user_id
        .trim()
        .parse::<i32>()
        .map_err(|_| response::Error::InvalidUserId)?;

    ctx.db
        .water_orders
        .find_many_by_user_id(user_id)
        .await
        .map(response::Success::Orders)
        .map_err(|_| response::Error::FailedToFetchOrders)
}
