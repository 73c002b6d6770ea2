//! Flightpath CLI - command line planning for delivery drone routes.
//!
//! This crate provides the `plan_route` binary plus the scenario loading and
//! environment configuration it is built from.

pub mod config;
pub mod scenario;

pub use config::Config;
pub use scenario::{render_route, Scenario};
