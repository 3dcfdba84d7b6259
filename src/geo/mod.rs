//! # Geolocation
//!
//! Finds out where the dashboard is running. A [`LocationProvider`] makes a
//! single lookup; the [`LocationResolver`] wraps it in a [`RetryPolicy`] and
//! a cancellation signal so startup can wait for the network without
//! becoming unkillable.

pub mod provider;
pub mod providers;
pub mod resolver;

pub use provider::{GeoError, LocationProvider};
pub use providers::FreeGeoIpLocator;
pub use resolver::{LocationResolver, ResolveError, RetryPolicy};
