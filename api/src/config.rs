use application::DEFAULT_MAX_PAGE_SIZE;
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use tracing::{info, warn};

pub const DEFAULT_PORT: u16 = 3000;
const DEFAULT_ORDER_USERNAME: &str = "admin";
const DEFAULT_ORDER_PASSWORD: &str = "secret";

/// Runtime settings, read from the environment.
#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Cap on `size`/`limit` of every listing.
    pub max_page_size: usize,
    /// The single pair accepted on order creation.
    pub order_username: String,
    pub order_password: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            order_username: DEFAULT_ORDER_USERNAME.to_string(),
            order_password: DEFAULT_ORDER_PASSWORD.to_string(),
        }
    }
}

impl AppConfig {
    /// Reads `PORT`, `MAX_PAGE_SIZE`, `ORDER_USERNAME` and `ORDER_PASSWORD`.
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: parse_or("PORT", defaults.port),
            max_page_size: parse_or("MAX_PAGE_SIZE", defaults.max_page_size).max(1),
            order_username: env::var("ORDER_USERNAME").unwrap_or(defaults.order_username),
            order_password: env::var("ORDER_PASSWORD").unwrap_or(defaults.order_password),
        }
    }
}

fn parse_or<T: FromStr + Display + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(value) => {
                info!("Using {} = {} from environment.", key, value);
                value
            }
            Err(_) => {
                warn!(
                    "Invalid {} value '{}' in environment. Using default {}.",
                    key, raw, default
                );
                default
            }
        },
        Err(_) => {
            info!("{} not set. Using default {}.", key, default);
            default
        }
    }
}
