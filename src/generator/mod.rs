//! Random instance generation.
//!
//! Synthesizes commodities over an existing network. Origins and destinations
//! are drawn until the destination is reachable, and every deadline is derived
//! from the shortest-path travel time. With a scope of at least 1 the window
//! is never shorter than the shortest path, even for fractional transit
//! times.

mod config;
mod instance_generator;

pub use config::GeneratorConfig;
pub use instance_generator::InstanceGenerator;
