use crate::types::Context;
use std::sync::Arc;
use tokio::time::{self, MissedTickBehavior};

/// Periodically drops expired OTP entries so the store does not grow without
/// bound. Verification checks expiry on its own, so this only reclaims memory.
pub async fn monitor(ctx: Arc<Context>) {
    let mut interval = time::interval(ctx.otp_purge_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let purged = ctx.otp.purge_expired().await;
        if purged > 0 {
            tracing::debug!("Purged {} expired otp entries", purged);
        }
    }
}
