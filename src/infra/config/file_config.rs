use serde::Deserialize;

use crate::infra::config::{
    AppConfig, CalculatorConfig, ChatConfig, LoaderConfig, LogConfig, OfferConfig, RandomConfig,
};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub chat: Option<FileChatConfig>,
    pub offer: Option<FileOfferConfig>,
    pub loader: Option<FileLoaderConfig>,
    pub calculator: Option<FileCalculatorConfig>,
    pub random: Option<FileRandomConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(chat) = self.chat {
            chat.merge_into(&mut config.chat);
        }

        if let Some(offer) = self.offer {
            offer.merge_into(&mut config.offer);
        }

        if let Some(loader) = self.loader {
            loader.merge_into(&mut config.loader);
        }

        if let Some(calculator) = self.calculator {
            calculator.merge_into(&mut config.calculator);
        }

        if let Some(random) = self.random {
            random.merge_into(&mut config.random);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileChatConfig {
    pub thinking_min_ms: Option<u64>,
    pub thinking_max_ms: Option<u64>,
}

impl FileChatConfig {
    fn merge_into(self, config: &mut ChatConfig) {
        if let Some(min) = self.thinking_min_ms {
            config.thinking_min_ms = min;
        }

        if let Some(max) = self.thinking_max_ms {
            config.thinking_max_ms = max;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileOfferConfig {
    pub listing_price: Option<String>,
    pub submit_delay_ms: Option<u64>,
}

impl FileOfferConfig {
    fn merge_into(self, config: &mut OfferConfig) {
        if let Some(price) = self.listing_price {
            config.listing_price = price;
        }

        if let Some(delay) = self.submit_delay_ms {
            config.submit_delay_ms = delay;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLoaderConfig {
    pub tick_ms: Option<u64>,
    pub max_increment: Option<f64>,
    pub grace_ms: Option<u64>,
}

impl FileLoaderConfig {
    fn merge_into(self, config: &mut LoaderConfig) {
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }

        if let Some(max_increment) = self.max_increment {
            config.max_increment = max_increment;
        }

        if let Some(grace_ms) = self.grace_ms {
            config.grace_ms = grace_ms;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileCalculatorConfig {
    pub delay_ms: Option<u64>,
}

impl FileCalculatorConfig {
    fn merge_into(self, config: &mut CalculatorConfig) {
        if let Some(delay_ms) = self.delay_ms {
            config.delay_ms = delay_ms;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileRandomConfig {
    pub seed: Option<u64>,
}

impl FileRandomConfig {
    fn merge_into(self, config: &mut RandomConfig) {
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}
