//! Run configuration: backend settings and logging

pub mod defaults;
mod settings;

pub use settings::*;
