pub mod provider;
pub mod providers;

pub use provider::{Observation, WeatherError, WeatherProvider};
pub use providers::OpenWeatherMapProvider;
