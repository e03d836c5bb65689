//! BrickLink store API client for price guide lookups

mod client;
mod response;

pub use client::{BricklinkClient, PriceSource, BASE_URL};
pub use response::interpret_response;
