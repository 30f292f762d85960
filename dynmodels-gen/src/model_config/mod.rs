//! Model config (`models/dynamic_models.yml`) discovery and parsing

mod loader;
mod model_spec;

pub use loader::*;
pub use model_spec::*;
