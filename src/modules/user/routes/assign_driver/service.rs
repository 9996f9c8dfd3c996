use super::types::{request, response};
use crate::{
    modules::driver::service::{self as assignment, AssignmentError},
    types::Context,
    utils::validation::{parse_id, IdError},
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let (customer_id, driver_id) = match (
        parse_id(payload.customer_id),
        parse_id(payload.driver_id),
    ) {
        (Err(IdError::Missing), _) | (_, Err(IdError::Missing)) => {
            return Err(response::Error::MissingFields)
        }
        (Err(IdError::Invalid), _) => return Err(response::Error::InvalidCustomerId),
        (_, Err(IdError::Invalid)) => return Err(response::Error::InvalidDriverId),
        (Ok(customer_id), Ok(driver_id)) => (customer_id, driver_id),
    };

    assignment::assign_to_customer(ctx.db.accounts.as_ref(), customer_id, driver_id)
        .await
        .map(|message| {
            tracing::info!("{}", message);
            response::Success::DriverAssigned(message)
        })
        .map_err(|err| match err {
            AssignmentError::InvalidCustomer | AssignmentError::InvalidOrder => {
                response::Error::InvalidCustomerId
            }
            AssignmentError::InvalidDriver => response::Error::InvalidDriverId,
            AssignmentError::UnexpectedError => response::Error::UnexpectedError,
        })
}
