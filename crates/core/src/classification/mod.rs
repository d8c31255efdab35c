//! Remote failure classification

pub mod classifier;

pub use classifier::ErrorClassifier;
