use super::types::{request, response};
use crate::types::Context;
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let customer_id = payload
        .customer_id
        .trim()
        .parse::<i32>()
        .map_err(|_| response::Error::InvalidCustomerId)?;

    ctx.db
        .deliveries
        .find_many_by_customer_id(customer_id)
        .await
        .map(response::Success::Deliveries)
        .map_err(|_| response::Error::FailedToFetchDeliveries)
}
