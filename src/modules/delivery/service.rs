use mockable::Clock;

use super::repository::{DeliveryRecord, DeliveryRepository, DeliveryStatus, UpsertDeliveryPayload};

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    Conflict,
}

pub struct MarkDelivered {
    pub customer_id: i32,
    pub driver_id: i32,
    pub cans_delivered: i32,
    pub notes: Option<String>,
}

/// Records today's delivery for a customer. Reporting again on the same
/// local calendar day overwrites that day's record.
pub async fn mark_delivered(
    deliveries: &dyn DeliveryRepository,
    clock: &(dyn Clock + Send + Sync),
    payload: MarkDelivered,
) -> Result<DeliveryRecord, Error> {
    let delivery_date = clock.local().date_naive();

    let record = deliveries
        .upsert(UpsertDeliveryPayload {
            customer_id: payload.customer_id,
            driver_id: payload.driver_id,
            cans_delivered: payload.cans_delivered,
            notes: payload.notes,
            status: DeliveryStatus::Delivered,
            delivery_date,
        })
        .await
        .map_err(|_| Error::Conflict)?;

    tracing::info!(
        "Driver {} delivered {} cans to customer {} on {}",
        record.driver_id,
        record.cans_delivered,
        record.customer_id,
        record.delivery_date
    );

    Ok(record)
}
