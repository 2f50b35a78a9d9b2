//! Record data from [RFC 8659]: the CAA record.
//!
//! [RFC 8659]: https://tools.ietf.org/html/rfc8659

use crate::base::charstr::CharStr;
use crate::base::scan::{ScanError, Tokens};
use crate::base::wire::{Composer, FormError, Parser};
use crate::base::DnsError;
use bytes::Bytes;
use core::fmt;

//------------ Caa -----------------------------------------------------------

/// CAA record data.
///
/// The CAA record lists the certification authorities allowed to issue
/// certificates for the domain. The tag names a property such as `issue`
/// or `iodef`, the value is the property's content.
///
/// The CAA record type is defined in [RFC 8659, section 4.1][1].
///
/// [1]: https://tools.ietf.org/html/rfc8659#section-4.1
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Caa {
    flags: u8,
    tag: CharStr,
    value: Bytes,
}

impl Caa {
    /// Creates new CAA record data from its components.
    pub fn new(flags: u8, tag: CharStr, value: Bytes) -> Self {
        Caa { flags, tag, value }
    }

    /// The flags of the record; bit 7 is the issuer critical flag.
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// The name of the property.
    pub fn tag(&self) -> &CharStr {
        &self.tag
    }

    /// The value of the property.
    pub fn value(&self) -> &Bytes {
        &self.value
    }

    pub fn parse(parser: &mut Parser, rdlen: u16) -> Result<Self, DnsError> {
        let start = parser.pos();
        let flags = parser.parse_u8()?;
        let tag = CharStr::parse(parser)?;
        let value_len = usize::from(rdlen)
            .checked_sub(parser.pos() - start)
            .ok_or_else(|| FormError::new("short CAA record data"))?;
        let value = Bytes::copy_from_slice(parser.parse_octets(value_len)?);
        Ok(Self::new(flags, tag, value))
    }

    pub fn compose(&self, target: &mut Composer) {
        target.append_u8(self.flags);
        self.tag.compose(target);
        target.append_slice(&self.value)
    }

    pub fn scan(tokens: &mut Tokens) -> Result<Self, ScanError> {
        let flags = tokens.scan_int()?;
        let tag = tokens.scan_charstr()?;
        let mut value = Vec::new();
        for sym in tokens.next_token()?.symbols() {
            value.push(
                sym.into_octet()
                    .map_err(|_| ScanError::custom("illegal CAA value"))?,
            );
        }
        Ok(Self::new(flags, tag, value.into()))
    }
}

//--- Display

impl fmt::Display for Caa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} \"", self.flags, self.tag)?;
        for &ch in self.value.iter() {
            if ch == b'"' || ch == b'\\' {
                write!(f, "\\{}", ch as char)?;
            } else if ch >= 0x20 && ch < 0x7F {
                write!(f, "{}", ch as char)?;
            } else {
                write!(f, "\\{:03}", ch)?;
            }
        }
        f.write_str("\"")
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::scan::Token;

    #[test]
    fn scan_and_display() {
        let tokens = vec![
            Token::new("0"),
            Token::new("issue"),
            Token::quoted("letsencrypt.org"),
        ];
        let mut tokens = Tokens::new(&tokens, None);
        let caa = Caa::scan(&mut tokens).unwrap();
        assert_eq!(caa.flags(), 0);
        assert_eq!(caa.tag().as_slice(), b"issue");
        assert_eq!(caa.value().as_ref(), b"letsencrypt.org");
        assert_eq!(caa.to_string(), "0 issue \"letsencrypt.org\"");
    }

    #[test]
    fn wire_round_trip() {
        let caa = Caa::new(
            128,
            CharStr::from_octets(b"iodef".to_vec()).unwrap(),
            Bytes::from_static(b"mailto:security@example.com"),
        );
        let mut target = Composer::new();
        caa.compose(&mut target);
        let parsed = Caa::parse(
            &mut Parser::new(target.as_slice()),
            target.as_slice().len() as u16,
        )
        .unwrap();
        assert_eq!(parsed, caa);
    }
}
