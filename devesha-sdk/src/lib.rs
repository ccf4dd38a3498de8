#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod checkout;
#[cfg(feature = "client")]
pub mod client;
pub mod objects;
pub mod resolver;
