//! Record data from [RFC 6698]: the TLSA record.
//!
//! [RFC 6698]: https://tools.ietf.org/html/rfc6698

use crate::base::scan::{ScanError, Tokens};
use crate::base::wire::{Composer, FormError, Parser};
use crate::base::DnsError;
use crate::utils::base16;
use bytes::Bytes;
use core::fmt;

//------------ Tlsa ----------------------------------------------------------

/// TLSA record data.
///
/// The TLSA record associates a TLS server certificate or public key with
/// the domain name where the record is found.
///
/// The TLSA record type is defined in [RFC 6698, section 2.1][1].
///
/// [1]: https://tools.ietf.org/html/rfc6698#section-2.1
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Tlsa {
    cert_usage: u8,
    selector: u8,
    matching_type: u8,
    cert_data: Bytes,
}

impl Tlsa {
    /// Creates new TLSA record data from its components.
    pub fn new(
        cert_usage: u8,
        selector: u8,
        matching_type: u8,
        cert_data: Bytes,
    ) -> Self {
        Tlsa {
            cert_usage,
            selector,
            matching_type,
            cert_data,
        }
    }

    /// How the certificate association is verified.
    pub fn cert_usage(&self) -> u8 {
        self.cert_usage
    }

    /// Which part of the certificate is matched.
    pub fn selector(&self) -> u8 {
        self.selector
    }

    /// How the certificate association is presented.
    pub fn matching_type(&self) -> u8 {
        self.matching_type
    }

    /// The certificate association data.
    pub fn cert_data(&self) -> &Bytes {
        &self.cert_data
    }

    pub fn parse(parser: &mut Parser, rdlen: u16) -> Result<Self, DnsError> {
        if rdlen < 3 {
            return Err(FormError::new("short TLSA record data").into());
        }
        Ok(Self::new(
            parser.parse_u8()?,
            parser.parse_u8()?,
            parser.parse_u8()?,
            Bytes::copy_from_slice(
                parser.parse_octets(usize::from(rdlen) - 3)?,
            ),
        ))
    }

    pub fn compose(&self, target: &mut Composer) {
        target.append_u8(self.cert_usage);
        target.append_u8(self.selector);
        target.append_u8(self.matching_type);
        target.append_slice(&self.cert_data)
    }

    pub fn scan(tokens: &mut Tokens) -> Result<Self, ScanError> {
        Ok(Self::new(
            tokens.scan_int()?,
            tokens.scan_int()?,
            tokens.scan_int()?,
            tokens.scan_remaining_hex()?.into(),
        ))
    }
}

//--- Display

impl fmt::Display for Tlsa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} ",
            self.cert_usage, self.selector, self.matching_type
        )?;
        base16::display(&self.cert_data, f)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::scan::Token;

    #[test]
    fn scan_multi_token_hex() {
        let tokens = vec![
            Token::new("3"),
            Token::new("1"),
            Token::new("1"),
            Token::new("d2abde240d7cd3ee6b4b28c54df034b9"),
            Token::new("7983a1d16e8a410e4561cb106618e971"),
        ];
        let mut tokens = Tokens::new(&tokens, None);
        let data = Tlsa::scan(&mut tokens).unwrap();
        assert_eq!(data.cert_data().len(), 32);
        let mut target = Composer::new();
        data.compose(&mut target);
        assert_eq!(
            Tlsa::parse(
                &mut Parser::new(target.as_slice()),
                target.as_slice().len() as u16
            )
            .unwrap(),
            data
        );
    }
}
