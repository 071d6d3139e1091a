//! Farm equipment rental catalog.
//!
//! Owners publish equipment with a daily rate and a location; renters search,
//! filter and rank it by distance from where they stand, then price a
//! provisional booking.
//!
//! The pure pieces are [`geo::annotate`], [`query::query`] and
//! [`booking::compute_booking`]. [`catalog::Catalog`] wires them to a
//! [`providers::ListingRepository`].

pub mod booking;
pub mod catalog;
pub mod config;
pub mod error;
pub mod geo;
pub mod models;
pub mod providers;
pub mod query;

pub use catalog::Catalog;
pub use error::CatalogError;
