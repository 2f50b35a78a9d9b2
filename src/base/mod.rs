//! The basic types for dealing with DNS messages.

pub mod charstr;
pub mod header;
pub mod iana;
pub mod label;
pub mod message;
pub mod name;
pub mod question;
pub mod record;
pub mod scan;
pub mod wire;

pub use self::charstr::CharStr;
pub use self::header::{Flags, Header};
pub use self::iana::{Class, Opcode, OptionCode, Rcode, Rtype};
pub use self::label::Label;
pub use self::message::Message;
pub use self::name::Name;
pub use self::question::Question;
pub use self::record::Record;
pub use self::wire::{BufferError, Composer, FormError, Parser};

use core::fmt;

//------------ DnsError ------------------------------------------------------

/// An error happened while handling a DNS message.
///
/// This is the failure type for all whole-message operations. Lower-level
/// failures – running out of input, a compression loop – are wrapped in
/// their respective variants.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DnsError {
    /// An attempt was made to read or write outside the buffer.
    Buffer(BufferError),

    /// The wire data was structurally invalid.
    Form(FormError),

    /// A record data decoder did not consume exactly RDLENGTH octets.
    RdlenMismatch {
        /// The record type whose data was being decoded.
        rtype: Rtype,

        /// The RDLENGTH given in the record.
        declared: u16,

        /// The number of octets actually consumed.
        consumed: u16,
    },

    /// A response carried a different transaction ID than the request.
    IdMismatch {
        /// The ID sent in the request.
        request: u16,

        /// The ID received in the response.
        response: u16,
    },
}

//--- From

impl From<BufferError> for DnsError {
    fn from(err: BufferError) -> Self {
        DnsError::Buffer(err)
    }
}

impl From<FormError> for DnsError {
    fn from(err: FormError) -> Self {
        DnsError::Form(err)
    }
}

//--- Display and Error

impl fmt::Display for DnsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DnsError::Buffer(ref err) => err.fmt(f),
            DnsError::Form(ref err) => err.fmt(f),
            DnsError::RdlenMismatch {
                rtype,
                declared,
                consumed,
            } => {
                write!(
                    f,
                    "{} record data length mismatch: \
                     declared {} octets, consumed {}",
                    rtype, declared, consumed
                )
            }
            DnsError::IdMismatch { request, response } => {
                write!(
                    f,
                    "transaction ID mismatch: sent {:#06x}, got {:#06x}",
                    request, response
                )
            }
        }
    }
}

impl std::error::Error for DnsError {}
