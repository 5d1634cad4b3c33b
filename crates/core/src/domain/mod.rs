pub mod error;
pub mod replacement;
pub mod settings;
pub mod types;

#[cfg(test)]
mod serde_tests;
