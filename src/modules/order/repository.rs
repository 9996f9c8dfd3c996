use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::PgPool;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

#[derive(sqlx::FromRow, Serialize, Clone, Debug)]
pub struct WaterOrder {
    pub id: i32,
    pub user_id: i32,
    pub cans: i32,
    pub slot: String,
    pub is_premium: bool,
    pub status: String,
    pub driver_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct CreateWaterOrderPayload {
    pub user_id: i32,
    pub cans: i32,
    pub slot: String,
    pub is_premium: bool,
}

#[async_trait]
pub trait WaterOrderRepository: Send + Sync {
    async fn create(&self, payload: CreateWaterOrderPayload) -> Result<WaterOrder>;

    async fn find_by_id(&self, id: i32) -> Result<Option<WaterOrder>>;

    /// Every order, newest first.
    async fn find_many(&self) -> Result<Vec<WaterOrder>>;

    /// Newest first.
    async fn find_many_by_user_id(&self, user_id: i32) -> Result<Vec<WaterOrder>>;

    /// Returns `false` when no order has this id.
    async fn assign_driver(&self, order_id: i32, driver_id: i32) -> Result<bool>;
}

pub struct PostgresWaterOrderRepository {
    pool: PgPool,
}

impl PostgresWaterOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WaterOrderRepository for PostgresWaterOrderRepository {
    async fn create(&self, payload: CreateWaterOrderPayload) -> Result<WaterOrder> {
        sqlx::query_as::<_, WaterOrder>(
            "
            INSERT INTO water_orders (user_id, cans, slot, is_premium)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            ",
        )
        .bind(payload.user_id)
        .bind(payload.cans)
        .bind(payload.slot)
        .bind(payload.is_premium)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while placing a water order: {}", err);
            Error::UnexpectedError
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<WaterOrder>> {
        sqlx::query_as::<_, WaterOrder>("SELECT * FROM water_orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| {
                tracing::error!("Error occurred while fetching order with id {}: {}", id, err);
                Error::UnexpectedError
            })
    }

    async fn find_many(&self) -> Result<Vec<WaterOrder>> {
        sqlx::query_as::<_, WaterOrder>("SELECT * FROM water_orders ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|err| {
                tracing::error!("Error occurred while fetching water orders: {}", err);
                Error::UnexpectedError
            })
    }

    async fn find_many_by_user_id(&self, user_id: i32) -> Result<Vec<WaterOrder>> {
        sqlx::query_as::<_, WaterOrder>(
            "SELECT * FROM water_orders WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching water orders of user {}: {}",
                user_id,
                err
            );
            Error::UnexpectedError
        })
    }

    async fn assign_driver(&self, order_id: i32, driver_id: i32) -> Result<bool> {
        sqlx::query("UPDATE water_orders SET driver_id = $1 WHERE id = $2")
            .bind(driver_id)
            .bind(order_id)
            .execute(&self.pool)
            .await
            .map(|res| res.rows_affected() > 0)
            .map_err(|err| {
                tracing::error!(
                    "Failed to assign driver {} to order {}: {}",
                    driver_id,
                    order_id,
                    err
                );
                Error::UnexpectedError
            })
    }
}
