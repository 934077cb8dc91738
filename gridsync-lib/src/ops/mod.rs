//! Store mutation operations and atomic batches

mod batch;
mod op;

pub use batch::*;
pub use op::*;
