mod path;
mod relative;

pub use path::*;
pub use relative::*;
