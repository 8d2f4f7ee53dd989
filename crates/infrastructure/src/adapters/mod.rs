//! Adapters implementing application ports against external services

mod weather_adapter;

pub use weather_adapter::WeatherAdapter;
