//! Request dispatch: parameter resolution, method routing and response
//! rendering.
//!
//! The dispatcher holds no state between requests beyond liveness. Each
//! parsed request is resolved, routed to one of the fixed methods, and its
//! response fully written and flushed before the session reads the next
//! line.

pub mod params;
pub mod render;
pub mod response;
pub mod router;

pub use params::{OutputFormat, ResolvedOcrRequest, resolve};
pub use response::{ResponseError, ResponseWriter};
pub use router::{MethodRouter, Outcome};
