pub use board::*;
pub use coordinate::*;
pub use errors::*;
pub use options::*;
pub use parser::*;
pub use record::*;
pub use result::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod coordinate;
mod errors;
mod options;
mod parser;
mod record;
mod result;
mod visualization;
