//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod weather_gateway_port;
mod weather_history_port;

#[cfg(test)]
pub use weather_gateway_port::MockWeatherGatewayPort;
pub use weather_gateway_port::WeatherGatewayPort;
pub use weather_history_port::{DEFAULT_HISTORY_LIMIT, WeatherHistoryPort};
#[cfg(test)]
pub use weather_history_port::MockWeatherHistoryPort;
