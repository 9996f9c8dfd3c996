use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "customer")]
    Customer,
    #[serde(rename = "driver")]
    Driver,
    #[serde(rename = "admin")]
    Admin,
}

#[derive(Debug)]
pub struct InvalidRole(pub String);

impl fmt::Display for InvalidRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid user role: {}", self.0)
    }
}

impl std::error::Error for InvalidRole {}

impl TryFrom<String> for Role {
    type Error = InvalidRole;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_ref() {
            "customer" => Ok(Role::Customer),
            "driver" => Ok(Role::Driver),
            "admin" => Ok(Role::Admin),
            _ => Err(InvalidRole(value)),
        }
    }
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Driver => "driver",
            Role::Admin => "admin",
        }
    }
}

/// A row of the `users` table. Not `Serialize`: responses go through
/// [`AccountProfile`] or [`AssignedCustomer`] so the password hash never
/// reaches a response body.
#[derive(sqlx::FromRow, Clone, Debug)]
pub struct Account {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[sqlx(rename = "password")]
    pub password_hash: Option<String>,
    pub address: Option<String>,
    pub pincode: Option<String>,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_verified: bool,
    pub is_premium: bool,
    pub premium_requested: bool,
    pub assigned_driver_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct AccountProfile {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub is_premium: bool,
}

impl From<Account> for AccountProfile {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            phone: account.phone,
            role: account.role,
            is_premium: account.is_premium,
        }
    }
}

/// What a driver sees about the customers on their route.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct AssignedCustomer {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub address: Option<String>,
    pub pincode: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_premium: bool,
}

impl From<Account> for AssignedCustomer {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            phone: account.phone,
            address: account.address,
            pincode: account.pincode,
            latitude: account.latitude,
            longitude: account.longitude,
            is_premium: account.is_premium,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CreateAccountPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub address: Option<String>,
    pub pincode: Option<String>,
    pub role: Role,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn create(&self, payload: CreateAccountPayload) -> Result<Account>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Account>>;

    /// Every account whose phone matches once surrounding whitespace is
    /// ignored. Older rows may share a phone number.
    async fn find_many_by_phone(&self, phone: &str) -> Result<Vec<Account>>;

    async fn find_by_email_or_phone(&self, email: &str, phone: &str) -> Result<Option<Account>>;

    /// Inserts the account unless one already uses its email or phone, in a
    /// single step with respect to other calls. `None` means it was taken.
    async fn create_if_unique(&self, payload: CreateAccountPayload) -> Result<Option<Account>>;

    async fn find_many_by_role(&self, role: Role) -> Result<Vec<Account>>;

    async fn find_many_with_pending_premium(&self) -> Result<Vec<Account>>;

    /// Customers whose `assigned_driver_id` is `driver_id`.
    async fn find_many_by_assigned_driver(&self, driver_id: i32) -> Result<Vec<Account>>;

    /// Returns `false` when no account has this id.
    async fn request_premium(&self, id: i32) -> Result<bool>;

    /// Returns `false` when no account has this id.
    async fn approve_premium(&self, id: i32) -> Result<bool>;

    /// Returns `false` when `customer_id` is not a customer account.
    async fn assign_driver(&self, customer_id: i32, driver_id: i32) -> Result<bool>;
}

pub struct PostgresAccountRepository {
    pool: PgPool,
}

/// Advisory lock key serialising registrations.
const REGISTRATION_LOCK: i64 = 0x7761_7465_7272_6567;

async fn insert_account<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    payload: CreateAccountPayload,
) -> std::result::Result<Account, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        "
        INSERT INTO users
            (name, email, phone, password, address, pincode, role, latitude, longitude, is_verified)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, true)
        RETURNING *
        ",
    )
    .bind(payload.name)
    .bind(payload.email)
    .bind(payload.phone)
    .bind(payload.password_hash)
    .bind(payload.address)
    .bind(payload.pincode)
    .bind(payload.role.as_str())
    .bind(payload.latitude)
    .bind(payload.longitude)
    .fetch_one(executor)
    .await
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, payload: CreateAccountPayload) -> Result<Account> {
        insert_account(&self.pool, payload).await.map_err(|err| {
            tracing::error!("Error occurred while creating a user account: {}", err);
            Error::UnexpectedError
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| {
                tracing::error!("Error occurred while fetching user with id {}: {}", id, err);
                Error::UnexpectedError
            })
    }

    async fn find_many_by_phone(&self, phone: &str) -> Result<Vec<Account>> {
        sqlx::query_as::<_, Account>(
            "SELECT * FROM users WHERE TRIM(phone) = TRIM($1) ORDER BY id ASC",
        )
        .bind(phone)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred in find_many_by_phone: {}", err);
            Error::UnexpectedError
        })
    }

    async fn find_by_email_or_phone(&self, email: &str, phone: &str) -> Result<Option<Account>> {
        sqlx::query_as::<_, Account>(
            "
            SELECT * FROM users
            WHERE LOWER(email) = LOWER($1) OR TRIM(phone) = TRIM($2)
            LIMIT 1
            ",
        )
        .bind(email)
        .bind(phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred in find_by_email_or_phone: {}", err);
            Error::UnexpectedError
        })
    }

    async fn create_if_unique(&self, payload: CreateAccountPayload) -> Result<Option<Account>> {
        let unexpected = |err: sqlx::Error| {
            tracing::error!("Error occurred while registering a user account: {}", err);
            Error::UnexpectedError
        };

        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(REGISTRATION_LOCK)
            .execute(&mut *tx)
            .await
            .map_err(unexpected)?;

        let taken = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM users WHERE LOWER(email) = LOWER($1) OR TRIM(phone) = TRIM($2) LIMIT 1",
        )
        .bind(&payload.email)
        .bind(&payload.phone)
        .fetch_optional(&mut *tx)
        .await
        .map_err(unexpected)?;

        if taken.is_some() {
            return Ok(None);
        }

        let account = insert_account(&mut *tx, payload).await.map_err(unexpected)?;
        tx.commit().await.map_err(unexpected)?;

        Ok(Some(account))
    }

    async fn find_many_by_role(&self, role: Role) -> Result<Vec<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM users WHERE role = $1 ORDER BY id DESC")
            .bind(role.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|err| {
                tracing::error!(
                    "Error occurred while fetching users with role {}: {}",
                    role.as_str(),
                    err
                );
                Error::UnexpectedError
            })
    }

    async fn find_many_with_pending_premium(&self) -> Result<Vec<Account>> {
        sqlx::query_as::<_, Account>(
            "SELECT * FROM users WHERE premium_requested = true ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching pending premiums: {}", err);
            Error::UnexpectedError
        })
    }

    async fn find_many_by_assigned_driver(&self, driver_id: i32) -> Result<Vec<Account>> {
        sqlx::query_as::<_, Account>(
            "
            SELECT * FROM users
            WHERE assigned_driver_id = $1 AND role = 'customer'
            ORDER BY id ASC
            ",
        )
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching customers assigned to driver {}: {}",
                driver_id,
                err
            );
            Error::UnexpectedError
        })
    }

    async fn request_premium(&self, id: i32) -> Result<bool> {
        // An approved account keeps premium_requested = false.
        sqlx::query("UPDATE users SET premium_requested = NOT is_premium WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|res| res.rows_affected() > 0)
            .map_err(|err| {
                tracing::error!("Failed to request premium for user {}: {}", id, err);
                Error::UnexpectedError
            })
    }

    async fn approve_premium(&self, id: i32) -> Result<bool> {
        sqlx::query("UPDATE users SET is_premium = true, premium_requested = false WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|res| res.rows_affected() > 0)
            .map_err(|err| {
                tracing::error!("Failed to approve premium for user {}: {}", id, err);
                Error::UnexpectedError
            })
    }

    async fn assign_driver(&self, customer_id: i32, driver_id: i32) -> Result<bool> {
        sqlx::query(
            "UPDATE users SET assigned_driver_id = $1 WHERE id = $2 AND role = 'customer'",
        )
        .bind(driver_id)
        .bind(customer_id)
        .execute(&self.pool)
        .await
        .map(|res| res.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!(
                "Failed to assign driver {} to customer {}: {}",
                driver_id,
                customer_id,
                err
            );
            Error::UnexpectedError
        })
    }
}

pub fn is_driver(account: &Account) -> bool {
    account.role == Role::Driver
}

pub fn is_customer(account: &Account) -> bool {
    account.role == Role::Customer
}
