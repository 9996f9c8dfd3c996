use super::types::{request, response};
use crate::{
    modules::order::repository::CreateWaterOrderPayload, types::Context,
    utils::validation::{integer_field, non_blank},
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let mut errors = payload.validate().err().unwrap_or_default();
    let user_id = integer_field(&mut errors, "user_id", payload.user_id, 1);
    let cans = integer_field(&mut errors, "cans", payload.cans, 1);

    let (Some(user_id), Some(cans), Some(slot)) = (user_id, cans, non_blank(payload.slot)) else {
        tracing::warn!("Failed to validate payload: {errors}");
        return Err(response::Error::MissingRequiredFields(errors));
    };

    ctx.db
        .accounts
        .find_by_id(user_id)
        .await
        .map_err(|_| response::Error::FailedToFetchUser)?
        .ok_or(response::Error::UserNotFound)?;

    let order = ctx
        .db
        .water_orders
        .create(CreateWaterOrderPayload {
            user_id,
            cans,
            slot,
            is_premium: payload.is_premium,
        })
        .await
        .map_err(|_| response::Error::FailedToPlaceOrder)?;

    tracing::info!("User {} placed water order #{}", user_id, order.id);

    Ok(response::Success::OrderPlaced(order))
}
