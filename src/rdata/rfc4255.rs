//! Record data from [RFC 4255]: the SSHFP record.
//!
//! [RFC 4255]: https://tools.ietf.org/html/rfc4255

use crate::base::scan::{ScanError, Tokens};
use crate::base::wire::{Composer, FormError, Parser};
use crate::base::DnsError;
use crate::utils::base16;
use bytes::Bytes;
use core::fmt;

//------------ Sshfp ---------------------------------------------------------

/// SSHFP record data.
///
/// The SSHFP record publishes the fingerprint of a host's SSH public key
/// in the DNS.
///
/// The SSHFP record type is defined in [RFC 4255, section 3.1][1].
///
/// [1]: https://tools.ietf.org/html/rfc4255#section-3.1
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Sshfp {
    algorithm: u8,
    fingerprint_type: u8,
    fingerprint: Bytes,
}

impl Sshfp {
    /// Creates new SSHFP record data from its components.
    pub fn new(
        algorithm: u8,
        fingerprint_type: u8,
        fingerprint: Bytes,
    ) -> Self {
        Sshfp {
            algorithm,
            fingerprint_type,
            fingerprint,
        }
    }

    /// The public key algorithm.
    pub fn algorithm(&self) -> u8 {
        self.algorithm
    }

    /// The message digest algorithm used for the fingerprint.
    pub fn fingerprint_type(&self) -> u8 {
        self.fingerprint_type
    }

    /// The fingerprint of the public key.
    pub fn fingerprint(&self) -> &Bytes {
        &self.fingerprint
    }

    pub fn parse(parser: &mut Parser, rdlen: u16) -> Result<Self, DnsError> {
        if rdlen < 2 {
            return Err(FormError::new("short SSHFP record data").into());
        }
        Ok(Self::new(
            parser.parse_u8()?,
            parser.parse_u8()?,
            Bytes::copy_from_slice(
                parser.parse_octets(usize::from(rdlen) - 2)?,
            ),
        ))
    }

    pub fn compose(&self, target: &mut Composer) {
        target.append_u8(self.algorithm);
        target.append_u8(self.fingerprint_type);
        target.append_slice(&self.fingerprint)
    }

    pub fn scan(tokens: &mut Tokens) -> Result<Self, ScanError> {
        Ok(Self::new(
            tokens.scan_int()?,
            tokens.scan_int()?,
            tokens.scan_remaining_hex()?.into(),
        ))
    }
}

//--- Display

impl fmt::Display for Sshfp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} ", self.algorithm, self.fingerprint_type)?;
        base16::display(&self.fingerprint, f)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::scan::Token;

    #[test]
    fn scan_and_round_trip() {
        let tokens = vec![
            Token::new("2"),
            Token::new("1"),
            Token::new("123456789abcdef67890123456789abcdef67890"),
        ];
        let mut tokens = Tokens::new(&tokens, None);
        let data = Sshfp::scan(&mut tokens).unwrap();
        assert_eq!(data.algorithm(), 2);
        let mut target = Composer::new();
        data.compose(&mut target);
        assert_eq!(
            Sshfp::parse(
                &mut Parser::new(target.as_slice()),
                target.as_slice().len() as u16
            )
            .unwrap(),
            data
        );
        assert_eq!(
            data.to_string(),
            "2 1 123456789ABCDEF67890123456789ABCDEF67890"
        );
    }
}
