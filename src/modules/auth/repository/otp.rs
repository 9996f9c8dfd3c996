use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PendingVerification {
    pub phone: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

impl PendingVerification {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn matches(&self, code: &str) -> bool {
        self.code.as_bytes().ct_eq(code.trim().as_bytes()).into()
    }
}

/// Outcome of [`OtpStore::consume`].
#[derive(Debug, PartialEq, Eq)]
pub enum Consumed {
    Accepted,
    Mismatch,
    Expired,
    NotFound,
}

/// Storage for codes awaiting verification, keyed by phone. A `put` for a
/// phone replaces whatever was stored for it.
#[async_trait]
pub trait OtpStore: Send + Sync {
    async fn put(&self, otp: PendingVerification) -> Result<()>;

    async fn get(&self, phone: &str) -> Result<Option<PendingVerification>>;

    /// Checks `code` against the entry stored for `phone` and removes it when
    /// it matches or has expired. The check and the removal happen as one
    /// step, so a code replaced by a concurrent `put` is never accepted.
    async fn consume(&self, phone: &str, code: &str, now: DateTime<Utc>) -> Result<Consumed>;

    /// Drops every entry that expired before `now`, returning how many went.
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize>;
}

/// Process-local store. Everything in it is lost on restart.
#[derive(Default)]
pub struct InMemoryOtpStore {
    entries: RwLock<HashMap<String, PendingVerification>>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn put(&self, otp: PendingVerification) -> Result<()> {
        self.entries.write().await.insert(otp.phone.clone(), otp);
        Ok(())
    }

    async fn get(&self, phone: &str) -> Result<Option<PendingVerification>> {
        Ok(self.entries.read().await.get(phone).cloned())
    }

    async fn consume(&self, phone: &str, code: &str, now: DateTime<Utc>) -> Result<Consumed> {
        let mut entries = self.entries.write().await;

        let outcome = match entries.get(phone) {
            None => return Ok(Consumed::NotFound),
            Some(otp) if otp.is_expired(now) => Consumed::Expired,
            Some(otp) if otp.matches(code) => Consumed::Accepted,
            Some(_) => return Ok(Consumed::Mismatch),
        };

        entries.remove(phone);
        Ok(outcome)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, otp| !otp.is_expired(now));
        Ok(before - entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn pending(phone: &str, code: &str, expires_at: DateTime<Utc>) -> PendingVerification {
        PendingVerification {
            phone: phone.to_string(),
            code: code.to_string(),
            expires_at,
        }
    }

    #[tokio::test]
    async fn put_replaces_the_previous_entry() {
        let store = InMemoryOtpStore::new();
        let expires_at = Utc::now() + Duration::minutes(5);

        store.put(pending("+15550001111", "111111", expires_at)).await.unwrap();
        store.put(pending("+15550001111", "222222", expires_at)).await.unwrap();

        let stored = store.get("+15550001111").await.unwrap().unwrap();
        assert_eq!(stored.code, "222222");
    }

    #[tokio::test]
    async fn consume_removes_a_matching_entry_once() {
        let store = InMemoryOtpStore::new();
        let now = Utc::now();
        store
            .put(pending("+15550001111", "111111", now + Duration::minutes(5)))
            .await
            .unwrap();

        assert_eq!(
            store.consume("+15550001111", "111111", now).await.unwrap(),
            Consumed::Accepted
        );
        assert_eq!(
            store.consume("+15550001111", "111111", now).await.unwrap(),
            Consumed::NotFound
        );
    }

    #[tokio::test]
    async fn consume_keeps_the_entry_on_mismatch() {
        let store = InMemoryOtpStore::new();
        let now = Utc::now();
        store
            .put(pending("+15550001111", "111111", now + Duration::minutes(5)))
            .await
            .unwrap();

        assert_eq!(
            store.consume("+15550001111", "222222", now).await.unwrap(),
            Consumed::Mismatch
        );
        assert!(store.get("+15550001111").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn consume_drops_an_expired_entry() {
        let store = InMemoryOtpStore::new();
        let now = Utc::now();
        store
            .put(pending("+15550001111", "111111", now - Duration::seconds(1)))
            .await
            .unwrap();

        assert_eq!(
            store.consume("+15550001111", "111111", now).await.unwrap(),
            Consumed::Expired
        );
        assert!(store.get("+15550001111").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn purge_expired_keeps_live_entries() {
        let store = InMemoryOtpStore::new();
        let now = Utc::now();
        store
            .put(pending("+15550001111", "111111", now - Duration::seconds(1)))
            .await
            .unwrap();
        store
            .put(pending("+15550002222", "222222", now + Duration::minutes(5)))
            .await
            .unwrap();

        assert_eq!(store.purge_expired(now).await.unwrap(), 1);
        assert!(store.get("+15550001111").await.unwrap().is_none());
        assert!(store.get("+15550002222").await.unwrap().is_some());
    }
}
