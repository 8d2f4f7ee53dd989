//! OpenWeatherMap weather integration
//!
//! Client for the OpenWeatherMap "current weather by city name" endpoint
//! (<https://openweathermap.org/current>). Requires an API key.

pub mod client;
mod models;

pub use client::{OpenWeatherClient, WeatherClient, WeatherConfig, WeatherError};
pub use models::CurrentConditions;
