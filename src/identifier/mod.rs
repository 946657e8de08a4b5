//! Identifier tokens for shareable page URLs, and resolution of the page
//! query string into a request.

mod codec;
mod query;

pub use codec::{decode, encode_data, encode_fortune, Identifier};
pub use query::{PageQuery, PageRequest};
