use super::types::{request, response};
use crate::{modules::user::repository::Role, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let role = match payload.role.as_str() {
        "drivers" => Role::Driver,
        "customers" => Role::Customer,
        _ => return Err(response::Error::UnknownList),
    };

    let users = ctx
        .db
        .accounts
        .find_many_by_role(role)
        .await
        .map_err(|_| response::Error::FailedToFetchUsers)?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(match role {
        Role::Driver => response::Success::Drivers(users),
        _ => response::Success::Customers(users),
    })
}
