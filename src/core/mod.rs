pub mod builder;
pub mod circuit;
pub mod config;
pub mod connections;
pub mod errors;
pub mod execution;
pub mod gates;
pub mod snapshot;
pub mod types;

// Re-export commonly used types
pub use builder::CompoundBuilder;
pub use circuit::Circuit;
pub use config::CircuitConfig;
pub use errors::CircuitError;
pub use snapshot::CircuitSnapshot;

#[cfg(test)]
mod tests;
