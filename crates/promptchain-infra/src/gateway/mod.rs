//! Assistant gateway implementations.
//!
//! - [`StreamGateway`] writes the document to an async writer (stdout in
//!   production).
//! - [`HttpChatGateway`] posts it to an OpenAI-compatible chat completions
//!   endpoint.

pub mod http;
pub mod stream;

pub use http::HttpChatGateway;
pub use stream::{StdoutGateway, StreamGateway};
