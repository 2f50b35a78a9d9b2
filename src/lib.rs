//! A DNS library for Rust.
//!
//! This crate provides a bit-exact codec for the DNS wire format together
//! with parsers and formatters for the two common textual representations
//! of DNS data – zone files and the debug output of the `dig` utility – and
//! a small framework for embedding DNS servers into applications.
//!
//! The crate is organized in a number of modules:
//!
//! * [`base`] contains the types describing DNS messages and their parts:
//!   [`Message`][base::Message], [`Name`][base::name::Name],
//!   [`Record`][base::Record], the header, and the registries translating
//!   between the integer values and mnemonics used throughout the DNS.
//! * [`rdata`] implements the record data of the supported record types,
//!   one type per variant plus an opaque fallback for everything else.
//! * [`zonefile`] reads zone files in the format defined by RFC 1035.
//! * [`digfile`] reads the output produced by `dig +qr`.
//! * [`net`] contains the server framework and a simple query client.
//! * [`resolvers`] provides ready-made resolver implementations for the
//!   server framework.
//!
//! Parsing a message is all-or-nothing: [`Message::parse`][base::Message::parse]
//! either returns a fully decoded message or fails with a
//! [`DnsError`][base::DnsError]. This property holds for arbitrary,
//! including adversarial, input.

#![allow(clippy::manual_range_contains)]

pub mod base;
pub mod digfile;
pub mod net;
pub mod rdata;
pub mod resolvers;
pub mod utils;
pub mod zonefile;

pub use self::base::message::Message;
pub use self::base::DnsError;
