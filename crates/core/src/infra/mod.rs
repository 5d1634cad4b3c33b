pub mod completion;
pub mod metrics;
