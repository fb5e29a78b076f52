//! gnuplot process transport.
//!
//! Locates the `gnuplot` executable, spawns it with a piped standard input
//! and owns that pipe until the connection is closed:
//! - [`GnuplotConfig`] carries the resolved executable and launch flags
//! - [`Connection`] is the running child plus its writable stdin
//!
//! This is the lowest layer of gplot. Everything else writes through the
//! [`Connection`] provided here.

pub mod config;
pub mod connection;
pub mod error;

pub use config::{GnuplotConfig, DEFAULT_PROGRAM, PERSIST_FLAG};
pub use connection::Connection;
pub use error::{Result, TransportError};
