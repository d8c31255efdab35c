//! Response reshaping for presentation

pub mod projector;

pub use projector::OutputProjector;
