use chrono::Duration;
use mockable::Clock;
use rand::Rng;
use std::sync::Arc;

use crate::modules::{
    auth::repository::otp::{Consumed, OtpStore, PendingVerification},
    notification::{
        self,
        service::{sms::SmsSender, Notification},
    },
};

#[derive(Eq, PartialEq, Debug)]
pub enum SendError {
    MissingPhone,
    NotSent,
    UnexpectedError,
}

#[derive(Eq, PartialEq, Debug)]
pub enum VerificationError {
    NotFound,
    Expired,
    InvalidOtp,
    UnexpectedError,
}

/// Issues and checks one-time passcodes. At most one code is live per phone:
/// issuing a new one overwrites the old. Expiry is checked when a code is
/// verified; [`OtpService::purge_expired`] only reclaims memory.
pub struct OtpService {
    store: Arc<dyn OtpStore>,
    sms: Arc<dyn SmsSender>,
    clock: Arc<dyn Clock + Send + Sync>,
    ttl: Duration,
    default_country_code: String,
}

pub fn generate_code() -> String {
    rand::thread_rng().gen_range(100000u32..=999999).to_string()
}

impl OtpService {
    pub fn new(
        store: Arc<dyn OtpStore>,
        sms: Arc<dyn SmsSender>,
        clock: Arc<dyn Clock + Send + Sync>,
        ttl: Duration,
        default_country_code: String,
    ) -> Self {
        Self {
            store,
            sms,
            clock,
            ttl,
            default_country_code,
        }
    }

    /// Stores a fresh code for `phone` and texts it. The entry stays stored
    /// even if the message fails to send.
    pub async fn send(&self, phone: &str) -> Result<(), SendError> {
        let phone = phone.trim();
        if phone.is_empty() {
            return Err(SendError::MissingPhone);
        }

        let code = generate_code();

        self.store
            .put(PendingVerification {
                phone: phone.to_string(),
                code: code.clone(),
                expires_at: self.clock.utc() + self.ttl,
            })
            .await
            .map_err(|_| SendError::UnexpectedError)?;

        notification::service::sms::send(
            self.sms.as_ref(),
            Notification::verification_otp_requested(
                phone.to_string(),
                code,
                self.ttl.num_minutes(),
            ),
            &self.default_country_code,
        )
        .await
        .map_err(|_| SendError::NotSent)?;

        tracing::info!("Verification OTP sent to {}", phone);

        Ok(())
    }

    /// Consumes the code for `phone`. Expired entries are removed too, so an
    /// expired code can never become valid again.
    pub async fn verify(&self, phone: &str, code: &str) -> Result<(), VerificationError> {
        let phone = phone.trim();

        let consumed = self
            .store
            .consume(phone, code, self.clock.utc())
            .await
            .map_err(|_| VerificationError::UnexpectedError)?;

        match consumed {
            Consumed::Accepted => Ok(()),
            Consumed::Mismatch => Err(VerificationError::InvalidOtp),
            Consumed::NotFound => Err(VerificationError::NotFound),
            Consumed::Expired => {
                tracing::info!("otp for {} expired", phone);
                Err(VerificationError::Expired)
            }
        }
    }

    pub async fn purge_expired(&self) -> usize {
        match self.store.purge_expired(self.clock.utc()).await {
            Ok(purged) => purged,
            Err(err) => {
                tracing::error!("Failed to purge expired otps: {:?}", err);
                0
            }
        }
    }
}
