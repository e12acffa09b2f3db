//! # Packet Dispatch
//!
//! Entry points that turn buffers into packets and back, plus uniform field access.
//!
//! ## Components
//! - **Dispatcher**: `load` sniffs the tag byte and decodes the matching shape; `marshal`
//!   delegates to the shape's own encoder. `Dispatcher` wraps both with a configured
//!   payload format, size cap and counters.
//! - **Accessors**: `id_of`, `method_of`, `status_of` and payload materialization

pub mod accessors;
pub mod dispatcher;

#[cfg(test)]
mod tests;
