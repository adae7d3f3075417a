mod formula;
mod types;

pub use formula::*;
pub use types::*;
