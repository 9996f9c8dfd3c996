use crate::modules::{
    order::repository::WaterOrderRepository,
    user::repository::{self, Account, AccountRepository, AssignedCustomer},
};

#[derive(Debug, PartialEq, Eq)]
pub enum AssignmentError {
    InvalidCustomer,
    InvalidDriver,
    InvalidOrder,
    UnexpectedError,
}

type Result<T> = std::result::Result<T, AssignmentError>;

async fn find_driver(accounts: &dyn AccountRepository, driver_id: i32) -> Result<Account> {
    accounts
        .find_by_id(driver_id)
        .await
        .map_err(|_| AssignmentError::UnexpectedError)?
        .filter(repository::is_driver)
        .ok_or(AssignmentError::InvalidDriver)
}

/// Binds a customer to a driver, replacing any previous binding.
pub async fn assign_to_customer(
    accounts: &dyn AccountRepository,
    customer_id: i32,
    driver_id: i32,
) -> Result<String> {
    let customer = accounts
        .find_by_id(customer_id)
        .await
        .map_err(|_| AssignmentError::UnexpectedError)?
        .filter(repository::is_customer)
        .ok_or(AssignmentError::InvalidCustomer)?;

    let driver = find_driver(accounts, driver_id).await?;

    if !accounts
        .assign_driver(customer.id, driver.id)
        .await
        .map_err(|_| AssignmentError::UnexpectedError)?
    {
        return Err(AssignmentError::InvalidCustomer);
    }

    if let Some(previous) = customer.assigned_driver_id.filter(|id| *id != driver.id) {
        tracing::info!(
            "Customer {} moved from driver {} to driver {}",
            customer.id,
            previous,
            driver.id
        );
    }

    Ok(format!(
        "Driver {} assigned to customer {}",
        driver.name, customer.name
    ))
}

pub async fn assign_to_order(
    water_orders: &dyn WaterOrderRepository,
    accounts: &dyn AccountRepository,
    order_id: i32,
    driver_id: i32,
) -> Result<String> {
    let order = water_orders
        .find_by_id(order_id)
        .await
        .map_err(|_| AssignmentError::UnexpectedError)?
        .ok_or(AssignmentError::InvalidOrder)?;

    let driver = find_driver(accounts, driver_id).await?;

    if !water_orders
        .assign_driver(order.id, driver.id)
        .await
        .map_err(|_| AssignmentError::UnexpectedError)?
    {
        return Err(AssignmentError::InvalidOrder);
    }

    Ok(format!("Driver {} assigned to order #{}", driver.name, order.id))
}

pub async fn list_assigned_customers(
    accounts: &dyn AccountRepository,
    driver_id: i32,
) -> Result<Vec<AssignedCustomer>> {
    Ok(accounts
        .find_many_by_assigned_driver(driver_id)
        .await
        .map_err(|_| AssignmentError::UnexpectedError)?
        .into_iter()
        .map(AssignedCustomer::from)
        .collect())
}
