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

    let updated = ctx
        .db
        .accounts
        .request_premium(user_id)
        .await
        .map_err(|_| response::Error::UnexpectedError)?;

    if !updated {
        return Err(response::Error::UserNotFound);
    }

    tracing::info!("User {} requested premium", user_id);

    Ok(response::Success::PremiumRequested)
}
