pub mod app_config;
pub mod cashback;
pub mod config;
pub mod geo;
pub mod schedule;

pub use app_config::{AppConfig, Environment};
pub use cashback::{calculate_cashback, format_pounds, Product};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use geo::{distance_miles, nearest, Coordinate};
pub use schedule::{merge_opening_hours, Day, DayHours, ScheduleError};
