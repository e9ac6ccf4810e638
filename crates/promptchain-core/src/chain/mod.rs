//! Chain definitions: parsing, validation, lookup, and the listing port.

pub mod definition;
pub mod source;
