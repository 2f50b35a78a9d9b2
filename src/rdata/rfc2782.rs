//! Record data from [RFC 2782]: the SRV record.
//!
//! [RFC 2782]: https://tools.ietf.org/html/rfc2782

use crate::base::name::Name;
use crate::base::scan::{ScanError, Tokens};
use crate::base::wire::{Composer, Parser};
use crate::base::DnsError;
use core::fmt;

//------------ Srv -----------------------------------------------------------

/// SRV record data.
///
/// The SRV record specifies the location of the server or servers for a
/// specific protocol and domain. The target name is never compressed, as
/// required by the RFC.
///
/// The SRV record type is defined in [RFC 2782].
///
/// [RFC 2782]: https://tools.ietf.org/html/rfc2782
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Srv {
    priority: u16,
    weight: u16,
    port: u16,
    target: Name,
}

impl Srv {
    /// Creates new SRV record data from its components.
    pub fn new(priority: u16, weight: u16, port: u16, target: Name) -> Self {
        Srv {
            priority,
            weight,
            port,
            target,
        }
    }

    /// The priority of this target host.
    ///
    /// Clients attempt to contact the host with the lowest priority first.
    pub fn priority(&self) -> u16 {
        self.priority
    }

    /// The weight for entries of equal priority.
    pub fn weight(&self) -> u16 {
        self.weight
    }

    /// The port on the target host of the service.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// The domain name of the target host.
    pub fn target(&self) -> &Name {
        &self.target
    }

    pub fn parse(parser: &mut Parser) -> Result<Self, DnsError> {
        Ok(Self::new(
            parser.parse_u16()?,
            parser.parse_u16()?,
            parser.parse_u16()?,
            Name::parse(parser)?,
        ))
    }

    pub fn compose(&self, target: &mut Composer) {
        target.append_u16(self.priority);
        target.append_u16(self.weight);
        target.append_u16(self.port);
        self.target.compose(target)
    }

    pub fn scan(tokens: &mut Tokens) -> Result<Self, ScanError> {
        Ok(Self::new(
            tokens.scan_int()?,
            tokens.scan_int()?,
            tokens.scan_int()?,
            tokens.scan_name()?,
        ))
    }
}

//--- Display

impl fmt::Display for Srv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.priority, self.weight, self.port, self.target
        )
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn round_trip() {
        let data = Srv::new(
            10,
            60,
            5060,
            Name::from_str("sip.example.com.").unwrap(),
        );
        let mut target = Composer::new();
        data.compose(&mut target);
        assert_eq!(
            target.as_slice(),
            b"\x00\x0A\x00\x3C\x13\xC4\x03sip\x07example\x03com\0"
        );
        assert_eq!(
            Srv::parse(&mut Parser::new(target.as_slice())).unwrap(),
            data
        );
        assert_eq!(data.to_string(), "10 60 5060 sip.example.com.");
    }
}
