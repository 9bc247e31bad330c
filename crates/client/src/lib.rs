//! Client side of the service-request form: holds the draft, checks the
//! required fields and posts the draft to `POST /submission`.

mod client;
mod status;
mod transport;

pub use client::*;
pub use status::*;
pub use transport::*;
