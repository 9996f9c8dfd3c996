//! In-memory implementations of the repositories, used when no
//! `DATABASE_URL` is configured in development and by the test suites.
//! Contents are lost when the process exits.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::modules::{
    delivery::repository::{self as delivery, DeliveryRecord, DeliveryRepository},
    order::repository::{self as order, WaterOrder, WaterOrderRepository},
    user::repository::{self as user, Account, AccountRepository, Role},
};

#[derive(Default)]
struct Tables {
    users: HashMap<i32, Account>,
    water_orders: HashMap<i32, WaterOrder>,
    deliveries: Vec<DeliveryRecord>,
    next_user_id: i32,
    next_water_order_id: i32,
    next_delivery_id: i32,
}

/// All tables sit behind one lock so every write is atomic with respect to
/// the others, which is what the delivery upsert relies on. Row timestamps
/// come from `clock`, stored as naive UTC like the Postgres columns.
pub struct InMemoryDatabase {
    tables: RwLock<Tables>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            tables: RwLock::default(),
            clock,
        }
    }

    fn insert_account(&self, tables: &mut Tables, payload: user::CreateAccountPayload) -> Account {
        tables.next_user_id += 1;

        let account = Account {
            id: tables.next_user_id,
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            password_hash: Some(payload.password_hash),
            address: payload.address,
            pincode: payload.pincode,
            role: payload.role,
            latitude: payload.latitude,
            longitude: payload.longitude,
            is_verified: true,
            is_premium: false,
            premium_requested: false,
            assigned_driver_id: None,
            created_at: self.clock.utc().naive_utc(),
        };

        tables.users.insert(account.id, account.clone());
        account
    }
}

impl Default for InMemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}

fn newest_first(water_orders: &mut [WaterOrder]) {
    water_orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

fn uses_email_or_phone(account: &Account, email: &str, phone: &str) -> bool {
    account.email.to_lowercase() == email.to_lowercase() || account.phone.trim() == phone.trim()
}

fn sorted_by_id(mut accounts: Vec<Account>) -> Vec<Account> {
    accounts.sort_by_key(|account| account.id);
    accounts
}

#[async_trait]
impl AccountRepository for InMemoryDatabase {
    async fn create(&self, payload: user::CreateAccountPayload) -> Result<Account, user::Error> {
        let mut tables = self.tables.write().await;
        Ok(self.insert_account(&mut tables, payload))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Account>, user::Error> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_many_by_phone(&self, phone: &str) -> Result<Vec<Account>, user::Error> {
        let tables = self.tables.read().await;
        Ok(sorted_by_id(
            tables
                .users
                .values()
                .filter(|account| account.phone.trim() == phone.trim())
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_email_or_phone(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<Option<Account>, user::Error> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|account| uses_email_or_phone(account, email, phone))
            .cloned())
    }

    async fn create_if_unique(
        &self,
        payload: user::CreateAccountPayload,
    ) -> Result<Option<Account>, user::Error> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .values()
            .any(|account| uses_email_or_phone(account, &payload.email, &payload.phone))
        {
            return Ok(None);
        }

        Ok(Some(self.insert_account(&mut tables, payload)))
    }

    async fn find_many_by_role(&self, role: Role) -> Result<Vec<Account>, user::Error> {
        let tables = self.tables.read().await;
        let mut accounts = sorted_by_id(
            tables
                .users
                .values()
                .filter(|account| account.role == role)
                .cloned()
                .collect(),
        );
        accounts.reverse();
        Ok(accounts)
    }

    async fn find_many_with_pending_premium(&self) -> Result<Vec<Account>, user::Error> {
        let tables = self.tables.read().await;
        Ok(sorted_by_id(
            tables
                .users
                .values()
                .filter(|account| account.premium_requested)
                .cloned()
                .collect(),
        ))
    }

    async fn find_many_by_assigned_driver(
        &self,
        driver_id: i32,
    ) -> Result<Vec<Account>, user::Error> {
        let tables = self.tables.read().await;
        Ok(sorted_by_id(
            tables
                .users
                .values()
                .filter(|account| {
                    account.role == Role::Customer && account.assigned_driver_id == Some(driver_id)
                })
                .cloned()
                .collect(),
        ))
    }

    async fn request_premium(&self, id: i32) -> Result<bool, user::Error> {
        let mut tables = self.tables.write().await;
        Ok(match tables.users.get_mut(&id) {
            Some(account) => {
                account.premium_requested = !account.is_premium;
                true
            }
            None => false,
        })
    }

    async fn approve_premium(&self, id: i32) -> Result<bool, user::Error> {
        let mut tables = self.tables.write().await;
        Ok(match tables.users.get_mut(&id) {
            Some(account) => {
                account.is_premium = true;
                account.premium_requested = false;
                true
            }
            None => false,
        })
    }

    async fn assign_driver(&self, customer_id: i32, driver_id: i32) -> Result<bool, user::Error> {
        let mut tables = self.tables.write().await;
        Ok(match tables.users.get_mut(&customer_id) {
            Some(account) if account.role == Role::Customer => {
                account.assigned_driver_id = Some(driver_id);
                true
            }
            _ => false,
        })
    }
}

#[async_trait]
impl WaterOrderRepository for InMemoryDatabase {
    async fn create(
        &self,
        payload: order::CreateWaterOrderPayload,
    ) -> Result<WaterOrder, order::Error> {
        let mut tables = self.tables.write().await;
        tables.next_water_order_id += 1;

        let water_order = WaterOrder {
            id: tables.next_water_order_id,
            user_id: payload.user_id,
            cans: payload.cans,
            slot: payload.slot,
            is_premium: payload.is_premium,
            status: "pending".to_string(),
            driver_id: None,
            created_at: self.clock.utc().naive_utc(),
        };

        tables
            .water_orders
            .insert(water_order.id, water_order.clone());
        Ok(water_order)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<WaterOrder>, order::Error> {
        Ok(self.tables.read().await.water_orders.get(&id).cloned())
    }

    async fn find_many(&self) -> Result<Vec<WaterOrder>, order::Error> {
        let tables = self.tables.read().await;
        let mut water_orders: Vec<WaterOrder> = tables.water_orders.values().cloned().collect();
        newest_first(&mut water_orders);
        Ok(water_orders)
    }

    async fn find_many_by_user_id(&self, user_id: i32) -> Result<Vec<WaterOrder>, order::Error> {
        let tables = self.tables.read().await;
        let mut water_orders: Vec<WaterOrder> = tables
            .water_orders
            .values()
            .filter(|water_order| water_order.user_id == user_id)
            .cloned()
            .collect();
        newest_first(&mut water_orders);
        Ok(water_orders)
    }

    async fn assign_driver(&self, order_id: i32, driver_id: i32) -> Result<bool, order::Error> {
        let mut tables = self.tables.write().await;
        Ok(match tables.water_orders.get_mut(&order_id) {
            Some(water_order) => {
                water_order.driver_id = Some(driver_id);
                true
            }
            None => false,
        })
    }
}

#[async_trait]
impl DeliveryRepository for InMemoryDatabase {
    async fn upsert(
        &self,
        payload: delivery::UpsertDeliveryPayload,
    ) -> Result<DeliveryRecord, delivery::Error> {
        let mut tables = self.tables.write().await;

        if let Some(record) = tables.deliveries.iter_mut().find(|record| {
            record.customer_id == payload.customer_id
                && record.delivery_date == payload.delivery_date
        }) {
            record.cans_delivered = payload.cans_delivered;
            record.notes = payload.notes;
            record.status = payload.status;
            return Ok(record.clone());
        }

        tables.next_delivery_id += 1;
        let record = DeliveryRecord {
            id: tables.next_delivery_id,
            customer_id: payload.customer_id,
            driver_id: payload.driver_id,
            cans_delivered: payload.cans_delivered,
            notes: payload.notes,
            status: payload.status,
            delivery_date: payload.delivery_date,
        };
        tables.deliveries.push(record.clone());
        Ok(record)
    }

    async fn find_many_by_customer_id(
        &self,
        customer_id: i32,
    ) -> Result<Vec<DeliveryRecord>, delivery::Error> {
        let tables = self.tables.read().await;
        let mut records: Vec<DeliveryRecord> = tables
            .deliveries
            .iter()
            .filter(|record| record.customer_id == customer_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.delivery_date.cmp(&a.delivery_date));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::delivery::repository::{DeliveryStatus, UpsertDeliveryPayload};
    use crate::modules::user::repository::CreateAccountPayload;
    use chrono::{DateTime, Local, NaiveDate, Utc};

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn account(name: &str, phone: &str, role: Role) -> CreateAccountPayload {
        CreateAccountPayload {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: phone.to_string(),
            password_hash: "hash".to_string(),
            address: None,
            pincode: None,
            role,
            latitude: None,
            longitude: None,
        }
    }

    #[tokio::test]
    async fn upsert_keeps_one_record_per_customer_per_day() {
        let db = InMemoryDatabase::new();
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let payload = |cans| UpsertDeliveryPayload {
            customer_id: 1,
            driver_id: 2,
            cans_delivered: cans,
            notes: None,
            status: DeliveryStatus::Delivered,
            delivery_date: day,
        };

        let first = db.upsert(payload(2)).await.unwrap();
        let second = db.upsert(payload(5)).await.unwrap();

        assert_eq!(first.id, second.id);
        let records = db.find_many_by_customer_id(1).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].cans_delivered, 5);
    }

    #[tokio::test]
    async fn request_premium_does_not_flag_premium_accounts() {
        let db = InMemoryDatabase::new();
        let created = AccountRepository::create(&db, account("Asha", "+911111111111", Role::Customer))
            .await
            .unwrap();

        assert!(db.approve_premium(created.id).await.unwrap());
        assert!(db.request_premium(created.id).await.unwrap());

        let stored = AccountRepository::find_by_id(&db, created.id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.is_premium);
        assert!(!stored.premium_requested);
    }

    #[tokio::test]
    async fn assign_driver_only_targets_customers() {
        let db = InMemoryDatabase::new();
        let driver = AccountRepository::create(&db, account("Ravi", "+912222222222", Role::Driver))
            .await
            .unwrap();
        let other_driver =
            AccountRepository::create(&db, account("Kiran", "+913333333333", Role::Driver))
                .await
                .unwrap();

        assert!(!AccountRepository::assign_driver(&db, other_driver.id, driver.id)
            .await
            .unwrap());
        assert!(db
            .find_many_by_assigned_driver(driver.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn water_orders_are_stamped_with_the_injected_clock() {
        let at = chrono::Utc::now() - chrono::Duration::days(10);
        let db = InMemoryDatabase::with_clock(Arc::new(FixedClock(at)));

        let placed = WaterOrderRepository::create(
            &db,
            order::CreateWaterOrderPayload {
                user_id: 1,
                cans: 2,
                slot: "morning".to_string(),
                is_premium: false,
            },
        )
        .await
        .unwrap();

        assert_eq!(placed.created_at, at.naive_utc());
        assert_eq!(db.find_many().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_if_unique_refuses_a_taken_email_or_phone() {
        let db = InMemoryDatabase::new();
        let first = db
            .create_if_unique(account("Asha", "+911111111111", Role::Customer))
            .await
            .unwrap();
        assert!(first.is_some());

        let same_phone = db
            .create_if_unique(account("Meena", " +911111111111", Role::Customer))
            .await
            .unwrap();
        let mut same_email = account("Other", "+913333333333", Role::Customer);
        same_email.email = "ASHA@example.com".to_string();
        let same_email = db.create_if_unique(same_email).await.unwrap();

        assert!(same_phone.is_none());
        assert!(same_email.is_none());
        assert_eq!(db.find_many_by_role(Role::Customer).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn phone_lookup_ignores_surrounding_whitespace() {
        let db = InMemoryDatabase::new();
        AccountRepository::create(&db, account("Meena", " +914444444444 ", Role::Customer))
            .await
            .unwrap();

        let found = db.find_many_by_phone("+914444444444").await.unwrap();
        assert_eq!(found.len(), 1);
    }
}
