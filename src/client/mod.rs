mod advisor;
mod types;

pub use advisor::*;
pub use types::*;
