//! Commute panel data for Homeboard.
//!
//! Queries a Google-Directions-style API for driving routes between two
//! fixed addresses with live-traffic timing, and produces an ordered list of
//! route options. The panel-facing wrapper degrades every failure to an
//! empty list.

pub mod client;
pub mod types;

pub use client::DirectionsClient;
pub use types::{CommuteError, RouteOption};
