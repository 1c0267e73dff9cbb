pub mod types;
pub mod board;
pub mod footprint;
pub mod rules;
pub mod state;

pub use types::*;
pub use board::*;
pub use footprint::*;
pub use rules::*;
pub use state::*;
