use super::types::{request, response};
use crate::{
    types::Context,
    utils::validation::{parse_id, IdError},
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user_id = parse_id(payload.user_id).map_err(|err| match err {
        IdError::Missing => response::Error::UserIdRequired,
        IdError::Invalid => response::Error::InvalidUserId,
    })?;

    if !ctx
        .db
        .accounts
        .approve_premium(user_id)
        .await
        .map_err(|_| response::Error::UnexpectedError)?
    {
        return Err(response::Error::UserNotFound);
    }

    tracing::info!("Premium approved for user {}", user_id);

    Ok(response::Success::PremiumApproved)
}
