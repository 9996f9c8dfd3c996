use super::types::{request, response};
use crate::{
    modules::driver::service::{self as assignment, AssignmentError},
    types::Context,
    utils::validation::{parse_id, IdError},
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let order_id = parse_id(payload.order_id);
    let driver_id = parse_id(payload.driver_id);

    if order_id == Err(IdError::Missing) || driver_id == Err(IdError::Missing) {
        return Err(response::Error::MissingFields);
    }
    let order_id = order_id.map_err(|_| response::Error::InvalidOrderId)?;
    let driver_id = driver_id.map_err(|_| response::Error::InvalidDriverId)?;

    let message = assignment::assign_to_order(
        ctx.db.water_orders.as_ref(),
        ctx.db.accounts.as_ref(),
        order_id,
        driver_id,
    )
    .await
    .map_err(|err| match err {
        AssignmentError::InvalidOrder | AssignmentError::InvalidCustomer => {
            response::Error::InvalidOrderId
        }
        AssignmentError::InvalidDriver => response::Error::InvalidDriverId,
        AssignmentError::UnexpectedError => response::Error::UnexpectedError,
    })?;

    tracing::info!("{}", message);

    Ok(response::Success::DriverAssigned(message))
}
