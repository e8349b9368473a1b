pub mod error;
pub mod state;
pub mod traits;
pub mod types;

pub use error::*;
pub use state::*;
pub use traits::*;
pub use types::*;
