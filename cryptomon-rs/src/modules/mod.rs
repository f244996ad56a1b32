//! Deployment modules shipped with the crate

pub mod cryptomon;

pub use cryptomon::cryptomon_module;
