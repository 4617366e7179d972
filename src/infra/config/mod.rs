mod adapter;
mod app_config;
mod file_config;
mod loader;

pub use adapter::FileConfigAdapter;
pub use app_config::{
    AppConfig, CalculatorConfig, ChatConfig, LoaderConfig, LogConfig, OfferConfig, RandomConfig,
};
pub use loader::load;
