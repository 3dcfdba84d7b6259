mod openweathermap;

pub use openweathermap::OpenWeatherMapProvider;
