use super::types::{request, response};
use crate::types::Context;
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user_id = payload
        .user_id
        .trim()
        .parse::<i32>()
        .map_err(|_| response::Error::InvalidUserId)?;

    let account = ctx
        .db
        .accounts
        .find_by_id(user_id)
        .await
        .map_err(|_| response::Error::FailedToFetchUser)?
        .ok_or(response::Error::UserNotFound)?;

    Ok(response::Success::PremiumStatus {
        is_premium: account.is_premium,
        premium_requested: account.premium_requested,
    })
}
