use super::types::{request, response};
use crate::{modules::auth::service::password, types::Context, utils::validation::non_blank};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let (Some(identifier), Some(plain_password)) = (
        non_blank(payload.identifier),
        payload.password.filter(|password| !password.is_empty()),
    ) else {
        return Err(response::Error::MissingCredentials);
    };

    let candidates = ctx
        .db
        .accounts
        .find_many_by_phone(&identifier)
        .await
        .map_err(|_| response::Error::LoginFailed)?;

    if candidates.is_empty() {
        tracing::info!("Login attempt for unknown phone {}", identifier);
        password::verify_decoy(plain_password).await;
        return Err(response::Error::InvalidCredentials);
    }

    // Legacy rows may share a phone number, so every candidate gets a try.
    for account in candidates {
        let Some(password_hash) = account.password_hash.clone() else {
            continue;
        };

        // A malformed legacy hash counts as a mismatch.
        let matched = password::verify(plain_password.clone(), password_hash)
            .await
            .unwrap_or(false);

        if matched {
            tracing::info!("Account {} logged in", account.id);
            return Ok(response::Success::LoggedIn(account.into()));
        }
    }

    tracing::info!("Incorrect password for phone {}", identifier);
    Err(response::Error::InvalidCredentials)
}
