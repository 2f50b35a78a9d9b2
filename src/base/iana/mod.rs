//! The mapping between the integer values and mnemonics of the DNS.
//!
//! A number of fields in DNS messages are 8 or 16 bit integers whose values
//! are assigned in IANA registries and which have well-known mnemonics used
//! by every textual representation. Each such field gets its own type here,
//! built from a shared set of macros. Forward translation (integer to text)
//! never fails: unassigned values are rendered through a fallback form such
//! as `TYPE1234`. Reverse translation accepts that fallback form and fails
//! on everything else.

#[macro_use]
mod macros;

pub mod class;
pub mod opcode;
pub mod opt;
pub mod rcode;
pub mod rtype;
pub mod svcb;

pub use self::class::Class;
pub use self::opcode::Opcode;
pub use self::opt::OptionCode;
pub use self::rcode::Rcode;
pub use self::rtype::Rtype;
pub use self::svcb::SvcParamKey;
