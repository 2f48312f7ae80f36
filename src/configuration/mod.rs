pub mod settings;

pub use settings::{LoggingSettings, get_config_path};
