//! Polygon.io REST implementation of the provider traits.

pub mod params;
pub mod provider;
pub mod response;

pub use provider::PolygonProvider;
