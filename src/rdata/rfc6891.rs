//! Record data from [RFC 6891]: the OPT pseudo record.
//!
//! EDNS extends the DNS protocol by greatly increasing the space for flags
//! and codes and by allowing client and server to exchange options. All of
//! it is carried in the OPT pseudo record placed in the additional section
//! of a message. The record's fixed header fields are reinterpreted: the
//! class carries the requestor's UDP payload size and the TTL the extended
//! rcode, EDNS version, and EDNS flags.
//!
//! [`Opt`] is the record data – the sequence of options – while
//! [`OptRecord`] provides a view of a complete OPT record with accessors
//! for the reinterpreted header fields.
//!
//! [RFC 6891]: https://tools.ietf.org/html/rfc6891

use crate::base::iana::{Class, OptionCode};
use crate::base::name::Name;
use crate::base::record::Record;
use crate::base::wire::{Composer, FormError, Parser};
use crate::base::DnsError;
use crate::rdata::RecordData;
use crate::utils::base16;
use bytes::Bytes;
use core::fmt;

//------------ Opt -----------------------------------------------------------

/// OPT record data.
///
/// The data of an OPT record is a sequence of options, each consisting of
/// a 16 bit code, a 16 bit length, and that many octets of data. Options
/// are kept in the order they appeared in.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Opt {
    options: Vec<EdnsOption>,
}

impl Opt {
    /// Creates new, empty OPT record data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates OPT record data from a sequence of options.
    pub fn from_options(options: Vec<EdnsOption>) -> Self {
        Opt { options }
    }

    /// Returns the options of the record.
    pub fn options(&self) -> &[EdnsOption] {
        &self.options
    }

    /// Returns the first option with the given code, if present.
    pub fn first(&self, code: OptionCode) -> Option<&EdnsOption> {
        self.options.iter().find(|option| option.code == code)
    }

    /// Takes OPT record data from a parser.
    ///
    /// Options are read until exactly `rdlen` octets are used up; an
    /// option crossing the end of the record data is an error.
    pub fn parse(parser: &mut Parser, rdlen: u16) -> Result<Self, DnsError> {
        let end = parser.pos() + usize::from(rdlen);
        let mut options = Vec::new();
        while parser.pos() < end {
            let code = OptionCode::parse(parser)?;
            let len = usize::from(parser.parse_u16()?);
            if parser.pos() + len > end {
                return Err(FormError::new(
                    "EDNS option crosses end of record data",
                )
                .into());
            }
            let data = Bytes::copy_from_slice(parser.parse_octets(len)?);
            options.push(EdnsOption::new(code, data));
        }
        Ok(Opt { options })
    }

    pub fn compose(&self, target: &mut Composer) {
        for option in &self.options {
            option.compose(target)
        }
    }
}

//--- Display

impl fmt::Display for Opt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut sep = "";
        for option in &self.options {
            write!(f, "{}{}", sep, option)?;
            sep = "\n";
        }
        Ok(())
    }
}

//------------ EdnsOption ----------------------------------------------------

/// A single EDNS option.
///
/// The option data is kept opaque; interpretation is left to whoever knows
/// the option code.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct EdnsOption {
    /// The assigned code of the option.
    code: OptionCode,

    /// The option data.
    data: Bytes,
}

impl EdnsOption {
    /// Creates a new option from its code and data.
    pub fn new(code: OptionCode, data: Bytes) -> Self {
        EdnsOption { code, data }
    }

    /// Returns the code of the option.
    pub fn code(&self) -> OptionCode {
        self.code
    }

    /// Returns the data of the option.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn compose(&self, target: &mut Composer) {
        self.code.compose(target);
        target.append_u16(self.data.len() as u16);
        target.append_slice(&self.data)
    }
}

//--- Display

impl fmt::Display for EdnsOption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "; EDNS: code: {}; data: ", self.code.to_int())?;
        base16::display(&self.data, f)
    }
}

//------------ OptRecord -----------------------------------------------------

/// A view of a complete OPT record.
///
/// This interprets the class and TTL of the record carrying the options:
///
/// ```text
/// CLASS:  requestor's UDP payload size
/// TTL:    extended RCODE (8 bits), VERSION (8), DO (1), Z (15)
/// ```
#[derive(Clone, Debug)]
pub struct OptRecord<'a> {
    /// The UDP payload size from the record's class field.
    udp_payload_size: u16,

    /// The record's raw TTL holding the extension fields.
    flags: u32,

    /// The options carried by the record.
    opt: &'a Opt,
}

impl<'a> OptRecord<'a> {
    /// Creates the view from the reinterpreted record fields.
    pub fn new(class: Class, ttl: u32, opt: &'a Opt) -> Self {
        OptRecord {
            udp_payload_size: class.to_int(),
            flags: ttl,
            opt,
        }
    }

    /// The largest UDP payload the requestor can handle.
    pub fn udp_payload_size(&self) -> u16 {
        self.udp_payload_size
    }

    /// The upper octet of the extended 12 bit rcode.
    pub fn ext_rcode(&self) -> u8 {
        (self.flags >> 24) as u8
    }

    /// The EDNS version; only 0 is currently defined.
    pub fn version(&self) -> u8 {
        (self.flags >> 16) as u8
    }

    /// The DNSSEC OK flag: the requestor can handle DNSSEC records.
    pub fn dnssec_ok(&self) -> bool {
        self.flags & 0x8000 != 0
    }

    /// The options carried by the record.
    pub fn opt(&self) -> &Opt {
        self.opt
    }
}

//--- Display

impl fmt::Display for OptRecord<'_> {
    /// Formats the record as the pseudosection block `dig` prints.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            ";; OPT PSEUDOSECTION\n; EDNS: version: {}, flags: {}; udp: {}",
            self.version(),
            if self.dnssec_ok() { "do" } else { "" },
            self.udp_payload_size,
        )?;
        for option in self.opt.options() {
            write!(f, "\n{}", option)?;
        }
        Ok(())
    }
}

//------------ opt_record ----------------------------------------------------

/// Builds a complete OPT record from the EDNS parameters.
///
/// The record's owner is the root name; payload size, extended rcode,
/// version, and DO flag are packed into the class and TTL fields.
pub fn opt_record(
    udp_payload_size: u16,
    ext_rcode: u8,
    version: u8,
    dnssec_ok: bool,
    options: Vec<EdnsOption>,
) -> Record {
    let ttl = u32::from(ext_rcode) << 24
        | u32::from(version) << 16
        | if dnssec_ok { 0x8000 } else { 0 };
    Record::new(
        Name::root(),
        Class::Int(udp_payload_size),
        ttl,
        RecordData::Opt(Opt::from_options(options)),
    )
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_options() {
        let wire = b"\x00\x03\x00\x04abcd\x00\x0A\x00\x00";
        let opt = Opt::parse(
            &mut Parser::new(wire),
            wire.len() as u16,
        )
        .unwrap();
        assert_eq!(opt.options().len(), 2);
        assert_eq!(opt.options()[0].code(), OptionCode::NSID);
        assert_eq!(opt.options()[0].data().as_ref(), b"abcd");
        assert!(opt.first(OptionCode::Cookie).is_some());

        let mut target = Composer::new();
        opt.compose(&mut target);
        assert_eq!(target.as_slice(), wire);
    }

    #[test]
    fn parse_rejects_crossing_option() {
        let wire = b"\x00\x03\x00\x10ab";
        assert!(Opt::parse(&mut Parser::new(wire), 6).is_err());
    }

    #[test]
    fn opt_record_fields() {
        let record = opt_record(4096, 0, 0, true, Vec::new());
        assert_eq!(record.class().to_int(), 4096);
        assert_eq!(record.ttl(), 0x8000);
        let view = record.as_opt().unwrap();
        assert_eq!(view.udp_payload_size(), 4096);
        assert!(view.dnssec_ok());
        assert_eq!(view.version(), 0);
        assert_eq!(
            view.to_string(),
            ";; OPT PSEUDOSECTION\n\
             ; EDNS: version: 0, flags: do; udp: 4096"
        );
    }
}
