use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::infra::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    pub logging: LogConfig,
    pub chat: ChatConfig,
    pub offer: OfferConfig,
    pub loader: LoaderConfig,
    pub calculator: CalculatorConfig,
    pub random: RandomConfig,
}

impl AppConfig {
    /// Rejects timing values the session machines cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.chat.thinking_min_ms > self.chat.thinking_max_ms {
            return Err(AppError::InvalidConfig {
                field: "chat.thinking_min_ms",
                details: format!(
                    "{} is greater than chat.thinking_max_ms ({})",
                    self.chat.thinking_min_ms, self.chat.thinking_max_ms
                ),
            });
        }

        if self.loader.tick_ms == 0 {
            return Err(AppError::InvalidConfig {
                field: "loader.tick_ms",
                details: "must be greater than zero".to_owned(),
            });
        }

        if !self.loader.max_increment.is_finite() || self.loader.max_increment <= 0.0 {
            return Err(AppError::InvalidConfig {
                field: "loader.max_increment",
                details: format!("{} is not a positive number", self.loader.max_increment),
            });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatConfig {
    pub thinking_min_ms: u64,
    pub thinking_max_ms: u64,
}

impl ChatConfig {
    pub fn thinking_range_ms(&self) -> (f64, f64) {
        (self.thinking_min_ms as f64, self.thinking_max_ms as f64)
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            thinking_min_ms: 1_000,
            thinking_max_ms: 2_500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OfferConfig {
    /// Display price of the listing the offer is made on, e.g. "AED 15,500,000".
    pub listing_price: String,
    pub submit_delay_ms: u64,
}

impl OfferConfig {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

impl Default for OfferConfig {
    fn default() -> Self {
        Self {
            listing_price: "AED 15,500,000".to_owned(),
            submit_delay_ms: 2_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoaderConfig {
    pub tick_ms: u64,
    pub max_increment: f64,
    pub grace_ms: u64,
}

impl LoaderConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn grace(&self) -> Duration {
        Duration::from_millis(self.grace_ms)
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            max_increment: 15.0,
            grace_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalculatorConfig {
    pub delay_ms: u64,
}

impl CalculatorConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self { delay_ms: 1_500 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RandomConfig {
    /// Fixed seed for reproducible sessions; `None` seeds from the OS.
    pub seed: Option<u64>,
}
