//! Record data for unimplemented record types.

use crate::base::iana::Rtype;
use crate::base::scan::{ScanError, Tokens};
use crate::base::wire::{Composer, Parser};
use crate::base::DnsError;
use crate::utils::base16;
use bytes::Bytes;
use core::fmt;

//------------ UnknownRecordData ---------------------------------------------

/// Record data of an unimplemented record type.
///
/// The data is kept as an opaque octets sequence so unknown record types
/// survive decoding and re-encoding unchanged. The text form is the
/// generic `\# <length> <hex>` representation defined in [RFC 3597].
///
/// [RFC 3597]: https://tools.ietf.org/html/rfc3597
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct UnknownRecordData {
    /// The record type of the data.
    rtype: Rtype,

    /// The record data.
    data: Bytes,
}

impl UnknownRecordData {
    /// Creates generic record data from a record type and the data.
    pub fn new(rtype: Rtype, data: Bytes) -> Self {
        UnknownRecordData { rtype, data }
    }

    /// Returns the record type of the data.
    pub fn rtype(&self) -> Rtype {
        self.rtype
    }

    /// Returns the data octets.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn parse(
        rtype: Rtype,
        parser: &mut Parser,
        rdlen: u16,
    ) -> Result<Self, DnsError> {
        let data =
            Bytes::copy_from_slice(parser.parse_octets(rdlen.into())?);
        Ok(Self::new(rtype, data))
    }

    pub fn compose(&self, target: &mut Composer) {
        target.append_slice(&self.data)
    }

    /// Creates generic record data from the RFC 3597 zone file form.
    ///
    /// The form is the token `\#` followed by the data length and the data
    /// as hex digits, possibly split over several tokens.
    pub fn scan(
        rtype: Rtype,
        tokens: &mut Tokens,
    ) -> Result<Self, ScanError> {
        let marker = tokens.next_token()?;
        if marker.text != "\\#" {
            return Err(ScanError::custom(
                "expected generic record data marker \\#",
            ));
        }
        let len: usize = tokens.scan_int()?;
        let data = if len == 0 {
            Vec::new()
        } else {
            tokens.scan_remaining_hex()?
        };
        if data.len() != len {
            return Err(ScanError::custom(
                "generic record data length mismatch",
            ));
        }
        Ok(Self::new(rtype, data.into()))
    }
}

//--- Display

impl fmt::Display for UnknownRecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\\# {}", self.data.len())?;
        if !self.data.is_empty() {
            f.write_str(" ")?;
            base16::display(&self.data, f)?;
        }
        Ok(())
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::scan::Token;

    #[test]
    fn display() {
        let data = UnknownRecordData::new(
            Rtype::Int(4711),
            Bytes::from_static(b"\x01\x02\xFF"),
        );
        assert_eq!(data.to_string(), "\\# 3 0102FF");
        assert_eq!(
            UnknownRecordData::new(Rtype::Int(4711), Bytes::new())
                .to_string(),
            "\\# 0"
        );
    }

    #[test]
    fn scan() {
        let tokens = vec![
            Token::new("\\#"),
            Token::new("3"),
            Token::new("0102FF"),
        ];
        let mut tokens = Tokens::new(&tokens, None);
        let data =
            UnknownRecordData::scan(Rtype::Int(4711), &mut tokens).unwrap();
        assert_eq!(data.data().as_ref(), b"\x01\x02\xFF");

        let tokens = vec![
            Token::new("\\#"),
            Token::new("4"),
            Token::new("0102FF"),
        ];
        let mut tokens = Tokens::new(&tokens, None);
        assert!(
            UnknownRecordData::scan(Rtype::Int(4711), &mut tokens).is_err()
        );
    }
}
