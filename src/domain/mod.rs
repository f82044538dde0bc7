pub mod booking;
pub mod commands;
pub mod errors;
pub mod pagination;
pub mod references;
pub mod state;
pub mod value_objects;

pub use booking::*;
pub use errors::*;
pub use pagination::*;
pub use references::*;
pub use state::*;
pub use value_objects::*;
