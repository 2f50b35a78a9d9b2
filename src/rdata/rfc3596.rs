//! Record data from [RFC 3596]: the AAAA record.
//!
//! [RFC 3596]: https://tools.ietf.org/html/rfc3596

use crate::base::scan::{ScanError, Tokens};
use crate::base::wire::{Composer, Parser};
use crate::base::DnsError;
use core::fmt;
use core::str::FromStr;
use std::net::Ipv6Addr;

//------------ Aaaa ----------------------------------------------------------

/// AAAA record data.
///
/// An AAAA record provides the IPv6 address of a host. Its text form is
/// the canonical address representation of [RFC 5952], which
/// [`Ipv6Addr`]'s `Display` produces.
///
/// The AAAA record type is defined in [RFC 3596, section 2.1][1].
///
/// [RFC 5952]: https://tools.ietf.org/html/rfc5952
/// [1]: https://tools.ietf.org/html/rfc3596#section-2.1
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Aaaa {
    addr: Ipv6Addr,
}

impl Aaaa {
    /// Creates new AAAA record data from an IPv6 address.
    pub fn new(addr: Ipv6Addr) -> Self {
        Aaaa { addr }
    }

    /// Returns the address of the record.
    pub fn addr(&self) -> Ipv6Addr {
        self.addr
    }

    pub fn parse(parser: &mut Parser) -> Result<Self, DnsError> {
        let mut octets = [0; 16];
        octets.copy_from_slice(parser.parse_octets(16)?);
        Ok(Aaaa::new(octets.into()))
    }

    pub fn compose(&self, target: &mut Composer) {
        target.append_slice(&self.addr.octets())
    }

    pub fn scan(tokens: &mut Tokens) -> Result<Self, ScanError> {
        let token = tokens.next_token()?;
        token
            .text
            .parse()
            .map(Aaaa::new)
            .map_err(|_| ScanError::custom("expected IPv6 address"))
    }
}

//--- FromStr

impl FromStr for Aaaa {
    type Err = <Ipv6Addr as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv6Addr::from_str(s).map(Aaaa::new)
    }
}

//--- Display

impl fmt::Display for Aaaa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.addr.fmt(f)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trip() {
        let data = Aaaa::from_str("1234:5678::1").unwrap();
        let mut target = Composer::new();
        data.compose(&mut target);
        assert_eq!(
            target.as_slice(),
            b"\x12\x34\x56\x78\0\0\0\0\0\0\0\0\0\0\0\x01"
        );
        assert_eq!(
            Aaaa::parse(&mut Parser::new(target.as_slice())).unwrap(),
            data
        );
        assert_eq!(data.to_string(), "1234:5678::1");
    }
}
