use super::types::{request, response};
use crate::{
    modules::{
        auth::service::password,
        user::repository::{CreateAccountPayload, Role},
    },
    types::Context,
    utils::{phone, validation::non_blank},
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let (Some(name), Some(email), Some(phone), Some(plain_password)) = (
        non_blank(payload.name),
        non_blank(payload.email),
        non_blank(payload.phone),
        payload.password.filter(|password| !password.is_empty()),
    ) else {
        return Err(response::Error::MissingRequiredFields);
    };

    if !phone::is_valid(&phone) {
        return Err(response::Error::InvalidPhoneNumber);
    }

    let role = match non_blank(payload.role) {
        Some(role) => Role::try_from(role).map_err(|err| {
            tracing::warn!("{}", err);
            response::Error::InvalidRole
        })?,
        None => Role::Customer,
    };

    let email = email.to_lowercase();

    if let Some(existing) = ctx
        .db
        .accounts
        .find_by_email_or_phone(&email, &phone)
        .await
        .map_err(|_| response::Error::FailedToFetchUser)?
    {
        tracing::info!(
            "Rejected registration for {}: account {} already uses this phone or email",
            phone,
            existing.id
        );
        return Err(response::Error::UserAlreadyExists);
    }

    let password_hash = password::hash(plain_password)
        .await
        .map_err(|_| response::Error::UnexpectedError)?;

    let account = ctx
        .db
        .accounts
        .create_if_unique(CreateAccountPayload {
            name,
            email,
            phone,
            password_hash,
            address: non_blank(payload.address),
            pincode: non_blank(payload.pincode),
            role,
            latitude: payload.latitude,
            longitude: payload.longitude,
        })
        .await
        .map_err(|_| response::Error::RegistrationFailed)?
        .ok_or_else(|| {
            tracing::info!("Rejected registration: phone or email taken by a concurrent request");
            response::Error::UserAlreadyExists
        })?;

    tracing::info!("Registered {} account {}", account.role.as_str(), account.id);

    Ok(response::Success::Registered(account.into()))
}
