use super::types::{request, response};
use crate::{
    modules::auth::service::otp::SendError, types::Context, utils::validation::non_blank,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let phone = non_blank(payload.phone).ok_or(response::Error::PhoneNumberRequired)?;

    ctx.otp.send(&phone).await.map_err(|err| match err {
        SendError::MissingPhone => response::Error::PhoneNumberRequired,
        SendError::NotSent | SendError::UnexpectedError => {
            tracing::error!("Failed to send verification otp to {}: {:?}", phone, err);
            response::Error::FailedToSendOtp
        }
    })?;

    Ok(response::Success::OtpSent)
}
