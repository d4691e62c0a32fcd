//! Log lines to typed events.
//!
//! - [`parse_line`]: one line against the table's phrase templates
//! - [`IdentityMaps`]: seat/name/stack extractions over a whole batch
//! - [`validate_all`]: the completeness gate before state is applied
mod event;
mod identity;
mod parser;

pub use event::*;
pub use identity::*;
pub use parser::*;
