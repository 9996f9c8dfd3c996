use super::types::{request, response};
use crate::{
    modules::delivery::service::{self as delivery, MarkDelivered},
    types::Context,
    utils::validation::{integer_field, non_blank},
};
use std::sync::Arc;
use validator::ValidationErrors;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let mut errors = ValidationErrors::new();
    let customer_id = integer_field(&mut errors, "customer_id", payload.customer_id, 1);
    let driver_id = integer_field(&mut errors, "driver_id", payload.driver_id, 1);
    let cans_delivered = integer_field(&mut errors, "cans_delivered", payload.cans_delivered, 0);

    let (Some(customer_id), Some(driver_id), Some(cans_delivered)) =
        (customer_id, driver_id, cans_delivered)
    else {
        tracing::warn!("Failed to validate payload: {errors}");
        return Err(response::Error::FailedToValidate(errors));
    };

    delivery::mark_delivered(
        ctx.db.deliveries.as_ref(),
        ctx.clock.as_ref(),
        MarkDelivered {
            customer_id,
            driver_id,
            cans_delivered,
            notes: non_blank(payload.notes),
        },
    )
    .await
    .map(response::Success::Delivered)
    .map_err(|_| response::Error::FailedToRecordDelivery)
}
