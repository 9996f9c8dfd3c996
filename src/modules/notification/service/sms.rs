use super::{Error, Notification, Result};
use crate::utils::phone;
use async_trait::async_trait;
use serde::Deserialize;

#[async_trait]
pub trait SmsSender: Send + Sync {
    /// `to` is expected in international format.
    async fn send(&self, to: &str, body: &str) -> Result<()>;
}

#[derive(Deserialize, Debug)]
struct TwilioMessageResponse {
    sid: String,
    status: String,
}

pub struct TwilioSmsSender {
    client: reqwest::Client,
    api_endpoint: String,
    account_sid: String,
    auth_token: String,
    from: String,
}

impl TwilioSmsSender {
    pub fn new(api_endpoint: String, account_sid: String, auth_token: String, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_endpoint,
            account_sid,
            auth_token,
            from,
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_endpoint.trim_end_matches('/'),
            self.account_sid
        )
    }
}

#[async_trait]
impl SmsSender for TwilioSmsSender {
    async fn send(&self, to: &str, body: &str) -> Result<()> {
        let res = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("From", self.from.as_str()), ("To", to), ("Body", body)])
            .send()
            .await
            .map_err(|err| {
                tracing::error!("Failed to send sms: {}", err);
                Error::NotSent
            })?;

        if !res.status().is_success() {
            match res.text().await {
                Ok(data) => tracing::error!("Failed to send sms: {}", data),
                Err(err) => tracing::error!("Failed to get response body: {}", err),
            }
            return Err(Error::NotSent);
        }

        let message = res.json::<TwilioMessageResponse>().await.map_err(|err| {
            tracing::error!("Failed to deserialize sms response: {}", err);
            Error::NotSent
        })?;

        tracing::debug!(
            "Successfully queued sms {} with status {}",
            message.sid,
            message.status
        );

        Ok(())
    }
}

/// Logs messages instead of sending them. Only wired up in development when
/// no SMS credentials are configured.
pub struct ConsoleSmsSender;

#[async_trait]
impl SmsSender for ConsoleSmsSender {
    async fn send(&self, to: &str, body: &str) -> Result<()> {
        tracing::info!("sms to {}: {}", to, body);
        Ok(())
    }
}

pub async fn send(
    sender: &dyn SmsSender,
    notification: Notification,
    default_country_code: &str,
) -> Result<()> {
    let to = phone::to_international(notification.recipient(), default_country_code);
    sender.send(&to, &notification.message()).await
}
