//! Value objects for the SkyCast domain

mod cardinal_direction;
mod city_name;
mod geo_position;

pub use cardinal_direction::CardinalDirection;
pub use city_name::CityName;
pub use geo_position::GeoPosition;
