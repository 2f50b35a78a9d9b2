//! Resource records.

use super::iana::{Class, Rtype};
use super::name::{Name, NameCompressor};
use super::wire::Composer;
use super::{DnsError, Parser};
use crate::rdata::rfc6891::OptRecord;
use crate::rdata::RecordData;
use core::fmt;

//------------ Record --------------------------------------------------------

/// A DNS resource record.
///
/// A record associates record data with an owner name, a class, and a time
/// to live. The record type is not stored separately: it is always the one
/// reported by the data itself, so the two can never disagree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// The owner name of the record.
    owner: Name,

    /// The class of the record.
    class: Class,

    /// The number of seconds the record may be cached.
    ttl: u32,

    /// The record data.
    data: RecordData,
}

impl Record {
    /// Creates a new record from its components.
    pub fn new(owner: Name, class: Class, ttl: u32, data: RecordData) -> Self {
        Record {
            owner,
            class,
            ttl,
            data,
        }
    }

    /// Returns the owner name of the record.
    pub fn owner(&self) -> &Name {
        &self.owner
    }

    /// Replaces the owner name of the record.
    pub fn set_owner(&mut self, owner: Name) {
        self.owner = owner
    }

    /// Returns the record type.
    pub fn rtype(&self) -> Rtype {
        self.data.rtype()
    }

    /// Returns the class of the record.
    ///
    /// For OPT records this field carries the requestor's UDP payload size
    /// instead; see [`OptRecord`].
    pub fn class(&self) -> Class {
        self.class
    }

    /// Returns the time to live of the record.
    ///
    /// For OPT records this field carries the extended rcode, EDNS version,
    /// and EDNS flags instead; see [`OptRecord`].
    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Sets the time to live of the record.
    pub fn set_ttl(&mut self, ttl: u32) {
        self.ttl = ttl
    }

    /// Returns a reference to the record data.
    pub fn data(&self) -> &RecordData {
        &self.data
    }

    /// Converts the record into its record data.
    pub fn into_data(self) -> RecordData {
        self.data
    }

    /// Returns the EDNS view of the record if it is an OPT record.
    pub fn as_opt(&self) -> Option<OptRecord> {
        match self.data {
            RecordData::Opt(ref opt) => {
                Some(OptRecord::new(self.class, self.ttl, opt))
            }
            _ => None,
        }
    }
}

/// # Wire Format
///
impl Record {
    /// Takes a record from the beginning of a parser.
    ///
    /// The record data parser is given the RDLENGTH declared in the record
    /// and must consume exactly that many octets; anything else fails.
    pub fn parse(parser: &mut Parser) -> Result<Self, DnsError> {
        let owner = Name::parse(parser)?;
        let rtype = Rtype::parse(parser)?;
        let class = Class::parse(parser)?;
        let ttl = parser.parse_u32()?;
        let rdlen = parser.parse_u16()?;
        parser.check_len(usize::from(rdlen))?;
        let start = parser.pos();
        let data = RecordData::parse(rtype, parser, rdlen)?;
        let consumed = (parser.pos() - start) as u16;
        if consumed != rdlen {
            return Err(DnsError::RdlenMismatch {
                rtype,
                declared: rdlen,
                consumed,
            });
        }
        Ok(Record {
            owner,
            class,
            ttl,
            data,
        })
    }

    /// Appends the record to a message under construction.
    ///
    /// A placeholder RDLENGTH is written first and patched once the record
    /// data is done.
    pub fn compose(
        &self,
        target: &mut Composer,
        compressor: &mut NameCompressor,
    ) -> Result<(), DnsError> {
        self.owner.compose_compressed(target, compressor);
        self.rtype().compose(target);
        self.class.compose(target);
        target.append_u32(self.ttl);
        let rdlen_pos = target.pos();
        target.append_u16(0);
        let start = target.pos();
        self.data.compose(target, compressor);
        let rdlen = (target.pos() - start) as u16;
        target.patch_u16(rdlen_pos, rdlen)?;
        Ok(())
    }
}

//--- Display

impl fmt::Display for Record {
    /// Formats the record as a zone file line.
    ///
    /// OPT records have no meaningful zone file form; they are formatted
    /// as the pseudosection block `dig` prints for them.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.as_opt() {
            Some(opt) => opt.fmt(f),
            None => write!(
                f,
                "{:<23} {:<7} {:<7} {:<7} {}",
                self.owner.to_string(),
                self.ttl,
                self.class.to_string(),
                self.rtype().to_string(),
                self.data
            ),
        }
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::rdata::rfc1035::A;
    use core::str::FromStr;

    fn record() -> Record {
        Record::new(
            Name::from_str("abc.com").unwrap(),
            Class::IN,
            60,
            RecordData::A(A::from_str("1.2.3.4").unwrap()),
        )
    }

    #[test]
    fn wire_round_trip() {
        let mut target = Composer::new();
        let mut compressor = NameCompressor::new();
        record().compose(&mut target, &mut compressor).unwrap();
        assert_eq!(
            target.as_slice(),
            b"\x03abc\x03com\0\x00\x01\x00\x01\x00\x00\x00\x3C\
              \x00\x04\x01\x02\x03\x04"
        );
        let parsed =
            Record::parse(&mut Parser::new(target.as_slice())).unwrap();
        assert_eq!(parsed, record());
    }

    #[test]
    fn display() {
        assert_eq!(
            record().to_string(),
            "abc.com.                60      IN      A       1.2.3.4"
        );
    }
}
