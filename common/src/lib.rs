//! Wire-level types shared by the Wordfeud API client: rule and board
//! enumerations, identifier coercion, the endpoint catalogue and the response
//! envelope.

pub mod models;
pub mod protocol;
pub mod requests;
