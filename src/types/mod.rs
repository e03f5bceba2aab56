//! Shared HTTP response types.

mod response;

pub use response::{CountResponse, Created, MessageResponse, SwapRequiredResponse};
