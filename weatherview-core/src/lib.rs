//! Core library for the `weatherview` widget.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather current-conditions provider and its error taxonomy
//! - Normalization into [`WeatherView`], including the icon heuristic and
//!   location clock formatting
//! - The query [`Session`] that decides which result is on screen
//!
//! It is used by `weatherview-cli`, but has no terminal dependencies of its own.

pub mod clock;
pub mod config;
pub mod error;
pub mod icon;
pub mod model;
pub mod provider;
pub mod session;

pub use config::Config;
pub use error::QueryError;
pub use icon::{IconCategory, pick_icon};
pub use model::WeatherView;
pub use provider::{WeatherProvider, provider_from_config};
pub use session::{Busy, QueryState, Session, Ticket};
