pub mod compound_builder;

pub use compound_builder::CompoundBuilder;
