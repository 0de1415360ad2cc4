mod config;
mod error;
mod operations;
mod recording;
mod scratch;
mod sequencer;
mod session;
pub use config::*;
pub use error::*;
pub use operations::*;
pub use recording::*;
pub use scratch::*;
pub use sequencer::*;
pub use session::*;
