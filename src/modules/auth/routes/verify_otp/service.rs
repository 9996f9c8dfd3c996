use super::types::{request, response};
use crate::{
    modules::auth::service::otp::VerificationError, types::Context, utils::validation::non_blank,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let (Some(phone), Some(code)) = (non_blank(payload.phone), non_blank(payload.code)) else {
        return Err(response::Error::MissingFields);
    };

    ctx.otp.verify(&phone, &code).await.map_err(|err| match err {
        VerificationError::NotFound => response::Error::OtpNotFound,
        VerificationError::Expired => response::Error::OtpExpired,
        VerificationError::InvalidOtp => response::Error::InvalidOtp,
        VerificationError::UnexpectedError => response::Error::UnexpectedError,
    })?;

    let account = ctx
        .db
        .accounts
        .find_many_by_phone(&phone)
        .await
        .map_err(|_| response::Error::FailedToFetchUser)?
        .into_iter()
        .next();

    Ok(response::Success::Verified(account.map(Into::into)))
}
