use super::types::{request, response};
use crate::{modules::driver, types::Context, utils::validation::non_blank};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let driver_id = non_blank(payload.driver_id)
        .ok_or(response::Error::DriverIdRequired)?
        .parse::<i32>()
        .map_err(|_| response::Error::InvalidDriverId)?;

    driver::service::list_assigned_customers(ctx.db.accounts.as_ref(), driver_id)
        .await
        .map(response::Success::AssignedCustomers)
        .map_err(|_| response::Error::UnexpectedError)
}
