//! Value objects - Immutable, validated domain primitives

mod city_name;

pub use city_name::{CITY_NAME_REQUIRED, CityName};
