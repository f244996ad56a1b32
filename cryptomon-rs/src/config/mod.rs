/**
 * config module
 * Network configuration consumed by execution backends
 */

pub mod network;

pub use network::{Metadata, NetworkConfig, Spec, CONFIG_FILE_NAME};
