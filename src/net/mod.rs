//! Sending and answering DNS queries over the network.
//!
//! The [`server`] module contains the embedded server framework: it
//! receives queries over UDP and TCP and hands them to a
//! [`Resolver`][server::Resolver] supplied by the application. The
//! [`client`] module sends queries and validates the responses.

pub mod client;
pub mod server;
