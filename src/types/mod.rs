//! Declarative grid configuration: columns, sections and chunks.

mod column;
mod props;
mod section;

pub use column::*;
pub use props::*;
pub use section::*;
