use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::PgPool;
use std::fmt;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeliveryStatus {
    #[serde(rename = "delivered")]
    Delivered,
}

#[derive(Debug)]
pub struct InvalidDeliveryStatus(pub String);

impl fmt::Display for InvalidDeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid delivery status: {}", self.0)
    }
}

impl std::error::Error for InvalidDeliveryStatus {}

impl TryFrom<String> for DeliveryStatus {
    type Error = InvalidDeliveryStatus;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.as_ref() {
            "delivered" => Ok(DeliveryStatus::Delivered),
            _ => Err(InvalidDeliveryStatus(value)),
        }
    }
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Delivered => "delivered",
        }
    }
}

/// One row per customer per calendar day.
#[derive(sqlx::FromRow, Serialize, Clone, Debug)]
pub struct DeliveryRecord {
    pub id: i32,
    pub customer_id: i32,
    pub driver_id: i32,
    pub cans_delivered: i32,
    pub notes: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: DeliveryStatus,
    pub delivery_date: NaiveDate,
}

#[derive(Clone, Debug)]
pub struct UpsertDeliveryPayload {
    pub customer_id: i32,
    pub driver_id: i32,
    pub cans_delivered: i32,
    pub notes: Option<String>,
    pub status: DeliveryStatus,
    pub delivery_date: NaiveDate,
}

#[async_trait]
pub trait DeliveryRepository: Send + Sync {
    /// Inserts the record for `(customer_id, delivery_date)` or, when one
    /// exists, overwrites its cans, notes and status. Must be a single
    /// atomic write.
    async fn upsert(&self, payload: UpsertDeliveryPayload) -> Result<DeliveryRecord>;

    async fn find_many_by_customer_id(&self, customer_id: i32) -> Result<Vec<DeliveryRecord>>;
}

pub struct PostgresDeliveryRepository {
    pool: PgPool,
}

impl PostgresDeliveryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeliveryRepository for PostgresDeliveryRepository {
    async fn upsert(&self, payload: UpsertDeliveryPayload) -> Result<DeliveryRecord> {
        sqlx::query_as::<_, DeliveryRecord>(
            "
            INSERT INTO deliveries
                (customer_id, driver_id, cans_delivered, notes, status, delivery_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (customer_id, delivery_date) DO UPDATE SET
                cans_delivered = EXCLUDED.cans_delivered,
                notes = EXCLUDED.notes,
                status = EXCLUDED.status,
                updated_at = NOW()
            RETURNING *
            ",
        )
        .bind(payload.customer_id)
        .bind(payload.driver_id)
        .bind(payload.cans_delivered)
        .bind(payload.notes)
        .bind(payload.status.as_str())
        .bind(payload.delivery_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!(
                "Failed to record delivery for customer {} on {}: {}",
                payload.customer_id,
                payload.delivery_date,
                err
            );
            Error::UnexpectedError
        })
    }

    async fn find_many_by_customer_id(&self, customer_id: i32) -> Result<Vec<DeliveryRecord>> {
        sqlx::query_as::<_, DeliveryRecord>(
            "SELECT * FROM deliveries WHERE customer_id = $1 ORDER BY delivery_date DESC",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching deliveries for customer {}: {}",
                customer_id,
                err
            );
            Error::UnexpectedError
        })
    }
}
