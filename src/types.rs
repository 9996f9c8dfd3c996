use crate::modules::{
    auth::{repository::otp::InMemoryOtpStore, service::otp::OtpService},
    delivery::repository::{DeliveryRepository, PostgresDeliveryRepository},
    notification::service::sms::{ConsoleSmsSender, SmsSender, TwilioSmsSender},
    order::repository::{PostgresWaterOrderRepository, WaterOrderRepository},
    user::repository::{AccountRepository, PostgresAccountRepository},
};
use crate::utils::database::{self, memory::InMemoryDatabase};
use mockable::{Clock, DefaultClock};
use std::env;
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
pub enum AppEnvironment {
    Production,
    Development,
}

impl AppEnvironment {
    pub fn from(raw_environment: String) -> Self {
        match raw_environment.as_ref() {
            "production" => Self::Production,
            _ => Self::Development,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    MissingVariable(&'static str),
    InvalidVariable(&'static str),
    DatabaseUnavailable,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVariable(name) => write!(f, "{} not set", name),
            Self::InvalidVariable(name) => write!(f, "Invalid value for {}", name),
            Self::DatabaseUnavailable => write!(f, "Failed to prepare the database"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct AppContext {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
}

/// Repositories backing every route. Postgres in deployments, in-memory for
/// local development without `DATABASE_URL` and for tests.
#[derive(Clone)]
pub struct DatabaseContext {
    pub accounts: Arc<dyn AccountRepository>,
    pub water_orders: Arc<dyn WaterOrderRepository>,
    pub deliveries: Arc<dyn DeliveryRepository>,
}

impl DatabaseContext {
    pub fn in_memory(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        let db = Arc::new(InMemoryDatabase::with_clock(clock));
        Self {
            accounts: db.clone(),
            water_orders: db.clone(),
            deliveries: db,
        }
    }
}

#[derive(Clone)]
pub struct Context {
    pub app: AppContext,
    pub db: DatabaseContext,
    pub otp: Arc<OtpService>,
    pub clock: Arc<dyn Clock + Send + Sync>,
    pub otp_purge_interval: std::time::Duration,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
}

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
}

#[derive(Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub phone_number: String,
    pub api_endpoint: String,
}

#[derive(Clone)]
pub struct SmsConfig {
    pub twilio: Option<TwilioConfig>,
    pub default_country_code: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OtpConfig {
    pub ttl_seconds: i64,
    pub purge_interval_seconds: u64,
}

impl OtpConfig {
    /// Longest lifetime a code may be given, one day.
    pub const MAX_TTL_SECONDS: i64 = 24 * 60 * 60;

    pub fn new(ttl_seconds: i64, purge_interval_seconds: u64) -> Result<Self, ConfigError> {
        if !(1..=Self::MAX_TTL_SECONDS).contains(&ttl_seconds) {
            return Err(ConfigError::InvalidVariable("OTP_TTL_SECONDS"));
        }
        if purge_interval_seconds == 0 {
            return Err(ConfigError::InvalidVariable("OTP_PURGE_INTERVAL_SECONDS"));
        }

        Ok(Self {
            ttl_seconds,
            purge_interval_seconds,
        })
    }
}

#[derive(Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub app: AppConfig,
    pub sms: SmsConfig,
    pub otp: OtpConfig,
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidVariable(name)),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment =
            AppEnvironment::from(env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()));
        let database_url = env::var("DATABASE_URL").ok();
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_var::<u32>("PORT", 8000)?;

        let twilio = match (
            env::var("TWILIO_ACCOUNT_SID"),
            env::var("TWILIO_AUTH_TOKEN"),
            env::var("TWILIO_PHONE_NUMBER"),
        ) {
            (Ok(account_sid), Ok(auth_token), Ok(phone_number)) => Some(TwilioConfig {
                account_sid,
                auth_token,
                phone_number,
                api_endpoint: env::var("TWILIO_API_ENDPOINT")
                    .unwrap_or_else(|_| "https://api.twilio.com".to_string()),
            }),
            (account_sid, auth_token, _) => {
                if environment == AppEnvironment::Production {
                    return Err(ConfigError::MissingVariable(match (account_sid, auth_token) {
                        (Err(_), _) => "TWILIO_ACCOUNT_SID",
                        (_, Err(_)) => "TWILIO_AUTH_TOKEN",
                        _ => "TWILIO_PHONE_NUMBER",
                    }));
                }
                None
            }
        };

        if environment == AppEnvironment::Production && database_url.is_none() {
            return Err(ConfigError::MissingVariable("DATABASE_URL"));
        }

        Ok(Self {
            database: DatabaseConfig { url: database_url },
            app: AppConfig {
                host,
                environment,
                port,
            },
            sms: SmsConfig {
                twilio,
                default_country_code: env::var("SMS_DEFAULT_COUNTRY_CODE")
                    .unwrap_or_else(|_| "+91".to_string()),
            },
            otp: OtpConfig::new(
                parse_var::<i64>("OTP_TTL_SECONDS", 300)?,
                parse_var::<u64>("OTP_PURGE_INTERVAL_SECONDS", 60)?,
            )?,
        })
    }
}

#[async_trait::async_trait]
pub trait ToContext {
    async fn to_context(self) -> Result<Context, ConfigError>;
}

#[async_trait::async_trait]
impl ToContext for Config {
    async fn to_context(self) -> Result<Context, ConfigError> {
        let clock: Arc<dyn Clock + Send + Sync> = Arc::new(DefaultClock);

        let db = match self.database.url {
            Some(url) => {
                let db_conn = database::connect(url.as_str())
                    .await
                    .map_err(|_| ConfigError::DatabaseUnavailable)?;
                database::migrate(&db_conn)
                    .await
                    .map_err(|_| ConfigError::DatabaseUnavailable)?;

                DatabaseContext {
                    accounts: Arc::new(PostgresAccountRepository::new(db_conn.pool.clone())),
                    water_orders: Arc::new(PostgresWaterOrderRepository::new(
                        db_conn.pool.clone(),
                    )),
                    deliveries: Arc::new(PostgresDeliveryRepository::new(db_conn.pool)),
                }
            }
            None => {
                tracing::warn!("DATABASE_URL not set, falling back to an in-memory store");
                DatabaseContext::in_memory(clock.clone())
            }
        };

        let sms: Arc<dyn SmsSender> = match self.sms.twilio {
            Some(twilio) => Arc::new(TwilioSmsSender::new(
                twilio.api_endpoint,
                twilio.account_sid,
                twilio.auth_token,
                twilio.phone_number,
            )),
            None => {
                tracing::warn!("Twilio credentials not set, OTP messages will only be logged");
                Arc::new(ConsoleSmsSender)
            }
        };

        let otp = OtpService::new(
            Arc::new(InMemoryOtpStore::new()),
            sms,
            clock.clone(),
            chrono::Duration::seconds(self.otp.ttl_seconds),
            self.sms.default_country_code,
        );

        Ok(Context {
            app: AppContext {
                host: self.app.host,
                environment: self.app.environment,
                port: self.app.port,
            },
            db,
            otp: Arc::new(otp),
            clock,
            otp_purge_interval: std::time::Duration::from_secs(self.otp.purge_interval_seconds),
        })
    }
}
