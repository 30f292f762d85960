//! Cross-product generation: resolve, render, materialize

mod driver;
mod materializer;
mod resolver;
mod task;
mod template;

#[cfg(test)]
pub(crate) mod testing;

pub use driver::*;
pub use materializer::*;
pub use resolver::*;
pub use task::*;
pub use template::*;
