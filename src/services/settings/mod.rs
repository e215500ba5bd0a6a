// Settings service module

mod service;

pub use service::{default_config_path, load_config, save_config, SettingsService};
