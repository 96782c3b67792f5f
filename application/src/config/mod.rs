//! Application configuration types.

pub mod execution_params;

pub use execution_params::ExecutionParams;
