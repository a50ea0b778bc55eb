//! QuickBooks API model types.

mod line;
mod purchase;
mod reference;

pub use line::*;
pub use purchase::*;
pub use reference::*;
