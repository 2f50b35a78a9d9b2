//! Record data from [RFC 1035]: the initial record types.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

use crate::base::charstr::CharStr;
use crate::base::name::{Name, NameCompressor};
use crate::base::scan::{ScanError, Tokens};
use crate::base::wire::{Composer, FormError, Parser};
use crate::base::DnsError;
use core::fmt;
use core::str::FromStr;
use std::net::Ipv4Addr;

//------------ A -------------------------------------------------------------

/// A record data.
///
/// An A record provides the IPv4 address of a host.
///
/// The A record type is defined in [RFC 1035, section 3.4.1][1].
///
/// [1]: https://tools.ietf.org/html/rfc1035#section-3.4.1
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct A {
    addr: Ipv4Addr,
}

impl A {
    /// Creates new A record data from an IPv4 address.
    pub fn new(addr: Ipv4Addr) -> Self {
        A { addr }
    }

    /// Creates new A record data from the four address octets.
    pub fn from_octets(a: u8, b: u8, c: u8, d: u8) -> Self {
        A::new(Ipv4Addr::new(a, b, c, d))
    }

    /// Returns the address of the record.
    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    pub fn parse(parser: &mut Parser) -> Result<Self, DnsError> {
        let octets = parser.parse_octets(4)?;
        Ok(A::from_octets(octets[0], octets[1], octets[2], octets[3]))
    }

    pub fn compose(&self, target: &mut Composer) {
        target.append_slice(&self.addr.octets())
    }

    pub fn scan(tokens: &mut Tokens) -> Result<Self, ScanError> {
        let token = tokens.next_token()?;
        token
            .text
            .parse()
            .map(A::new)
            .map_err(|_| ScanError::custom("expected IPv4 address"))
    }
}

//--- FromStr

impl FromStr for A {
    type Err = <Ipv4Addr as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv4Addr::from_str(s).map(A::new)
    }
}

//--- Display

impl fmt::Display for A {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.addr.fmt(f)
    }
}

//------------ Cname ---------------------------------------------------------

/// CNAME record data.
///
/// The CNAME record specifies the canonical or primary name for its owner.
/// The owner name is an alias.
///
/// The CNAME record type is defined in [RFC 1035, section 3.3.1][1].
///
/// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.1
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Cname {
    cname: Name,
}

impl Cname {
    /// Creates new CNAME record data from the canonical name.
    pub fn new(cname: Name) -> Self {
        Cname { cname }
    }

    /// Returns the canonical name.
    pub fn cname(&self) -> &Name {
        &self.cname
    }

    pub fn parse(parser: &mut Parser) -> Result<Self, DnsError> {
        Name::parse(parser).map(Self::new)
    }

    pub fn compose(
        &self,
        target: &mut Composer,
        compressor: &mut NameCompressor,
    ) {
        self.cname.compose_compressed(target, compressor)
    }

    pub fn scan(tokens: &mut Tokens) -> Result<Self, ScanError> {
        tokens.scan_name().map(Self::new)
    }
}

//--- Display

impl fmt::Display for Cname {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.cname.fmt(f)
    }
}

//------------ Ns ------------------------------------------------------------

/// NS record data.
///
/// NS records specify hosts that are authoritative for a class and domain.
///
/// The NS record type is defined in [RFC 1035, section 3.3.11][1].
///
/// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.11
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Ns {
    nsdname: Name,
}

impl Ns {
    /// Creates new NS record data from the name server's name.
    pub fn new(nsdname: Name) -> Self {
        Ns { nsdname }
    }

    /// Returns the name of the authoritative server.
    pub fn nsdname(&self) -> &Name {
        &self.nsdname
    }

    pub fn parse(parser: &mut Parser) -> Result<Self, DnsError> {
        Name::parse(parser).map(Self::new)
    }

    pub fn compose(
        &self,
        target: &mut Composer,
        compressor: &mut NameCompressor,
    ) {
        self.nsdname.compose_compressed(target, compressor)
    }

    pub fn scan(tokens: &mut Tokens) -> Result<Self, ScanError> {
        tokens.scan_name().map(Self::new)
    }
}

//--- Display

impl fmt::Display for Ns {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.nsdname.fmt(f)
    }
}

//------------ Ptr -----------------------------------------------------------

/// PTR record data.
///
/// PTR records are used in special domains to point to some other location
/// in the domain space.
///
/// The PTR record type is defined in [RFC 1035, section 3.3.12][1].
///
/// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.12
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Ptr {
    ptrdname: Name,
}

impl Ptr {
    /// Creates new PTR record data from the name pointed to.
    pub fn new(ptrdname: Name) -> Self {
        Ptr { ptrdname }
    }

    /// Returns the name this record points to.
    pub fn ptrdname(&self) -> &Name {
        &self.ptrdname
    }

    pub fn parse(parser: &mut Parser) -> Result<Self, DnsError> {
        Name::parse(parser).map(Self::new)
    }

    pub fn compose(
        &self,
        target: &mut Composer,
        compressor: &mut NameCompressor,
    ) {
        self.ptrdname.compose_compressed(target, compressor)
    }

    pub fn scan(tokens: &mut Tokens) -> Result<Self, ScanError> {
        tokens.scan_name().map(Self::new)
    }
}

//--- Display

impl fmt::Display for Ptr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.ptrdname.fmt(f)
    }
}

//------------ Mx ------------------------------------------------------------

/// MX record data.
///
/// The MX record specifies a host willing to serve as a mail exchange for
/// the owner name.
///
/// The MX record type is defined in [RFC 1035, section 3.3.9][1].
///
/// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.9
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Mx {
    preference: u16,
    exchange: Name,
}

impl Mx {
    /// Creates new MX record data from the components.
    pub fn new(preference: u16, exchange: Name) -> Self {
        Mx {
            preference,
            exchange,
        }
    }

    /// The preference for this record.
    ///
    /// Defines an order if there are several MX records for the same owner.
    /// Lower values are preferred.
    pub fn preference(&self) -> u16 {
        self.preference
    }

    /// The name of the host that is the exchange.
    pub fn exchange(&self) -> &Name {
        &self.exchange
    }

    pub fn parse(parser: &mut Parser) -> Result<Self, DnsError> {
        let preference = parser.parse_u16()?;
        let exchange = Name::parse(parser)?;
        Ok(Self::new(preference, exchange))
    }

    pub fn compose(
        &self,
        target: &mut Composer,
        compressor: &mut NameCompressor,
    ) {
        target.append_u16(self.preference);
        self.exchange.compose_compressed(target, compressor)
    }

    pub fn scan(tokens: &mut Tokens) -> Result<Self, ScanError> {
        Ok(Self::new(tokens.scan_int()?, tokens.scan_name()?))
    }
}

//--- Display

impl fmt::Display for Mx {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.preference, self.exchange)
    }
}

//------------ Soa -----------------------------------------------------------

/// SOA record data.
///
/// SOA records mark the top of a zone and contain information pertinent to
/// name server maintenance operations.
///
/// The SOA record type is defined in [RFC 1035, section 3.3.13][1].
///
/// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.13
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Soa {
    mname: Name,
    rname: Name,
    serial: u32,
    refresh: u32,
    retry: u32,
    expire: u32,
    minimum: u32,
}

impl Soa {
    /// Creates new SOA record data from its components.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        mname: Name,
        rname: Name,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    ) -> Self {
        Soa {
            mname,
            rname,
            serial,
            refresh,
            retry,
            expire,
            minimum,
        }
    }

    /// The name of the original or primary source for the zone.
    pub fn mname(&self) -> &Name {
        &self.mname
    }

    /// The mailbox of the person responsible for the zone.
    pub fn rname(&self) -> &Name {
        &self.rname
    }

    /// The version number of the zone.
    pub fn serial(&self) -> u32 {
        self.serial
    }

    /// The number of seconds before the zone should be refreshed.
    pub fn refresh(&self) -> u32 {
        self.refresh
    }

    /// The number of seconds before a failed refresh is retried.
    pub fn retry(&self) -> u32 {
        self.retry
    }

    /// The number of seconds after which the zone is considered expired.
    pub fn expire(&self) -> u32 {
        self.expire
    }

    /// The minimum TTL to be exported with any record from the zone.
    pub fn minimum(&self) -> u32 {
        self.minimum
    }

    pub fn parse(parser: &mut Parser) -> Result<Self, DnsError> {
        Ok(Self::new(
            Name::parse(parser)?,
            Name::parse(parser)?,
            parser.parse_u32()?,
            parser.parse_u32()?,
            parser.parse_u32()?,
            parser.parse_u32()?,
            parser.parse_u32()?,
        ))
    }

    pub fn compose(
        &self,
        target: &mut Composer,
        compressor: &mut NameCompressor,
    ) {
        self.mname.compose_compressed(target, compressor);
        self.rname.compose_compressed(target, compressor);
        target.append_u32(self.serial);
        target.append_u32(self.refresh);
        target.append_u32(self.retry);
        target.append_u32(self.expire);
        target.append_u32(self.minimum);
    }

    pub fn scan(tokens: &mut Tokens) -> Result<Self, ScanError> {
        Ok(Self::new(
            tokens.scan_name()?,
            tokens.scan_name()?,
            tokens.scan_int()?,
            tokens.scan_time()?,
            tokens.scan_time()?,
            tokens.scan_time()?,
            tokens.scan_time()?,
        ))
    }
}

//--- Display

impl fmt::Display for Soa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.mname,
            self.rname,
            self.serial,
            self.refresh,
            self.retry,
            self.expire,
            self.minimum
        )
    }
}

//------------ Txt -----------------------------------------------------------

/// TXT record data.
///
/// TXT records hold descriptive text: a sequence of character strings of
/// up to 255 octets each.
///
/// The TXT record type is defined in [RFC 1035, section 3.3.14][1].
///
/// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.14
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Txt {
    strings: Vec<CharStr>,
}

impl Txt {
    /// Creates new TXT record data from a sequence of character strings.
    pub fn new(strings: Vec<CharStr>) -> Self {
        Txt { strings }
    }

    /// Creates new TXT record data with a single character string.
    pub fn single(string: CharStr) -> Self {
        Txt {
            strings: vec![string],
        }
    }

    /// Returns the character strings of the record.
    pub fn strings(&self) -> &[CharStr] {
        &self.strings
    }

    /// Takes TXT record data from a parser.
    ///
    /// Character strings are read until exactly `rdlen` octets are used
    /// up. A string crossing the end of the record data is an error.
    pub fn parse(parser: &mut Parser, rdlen: u16) -> Result<Self, DnsError> {
        let end = parser.pos() + usize::from(rdlen);
        let mut strings = Vec::new();
        while parser.pos() < end {
            let string = CharStr::parse(parser)?;
            if parser.pos() > end {
                return Err(FormError::new(
                    "character string crosses end of record data",
                )
                .into());
            }
            strings.push(string);
        }
        Ok(Txt { strings })
    }

    pub fn compose(&self, target: &mut Composer) {
        for string in &self.strings {
            string.compose(target)
        }
    }

    /// Creates TXT record data from zone file tokens.
    ///
    /// Every remaining token of the entry becomes one character string.
    pub fn scan(tokens: &mut Tokens) -> Result<Self, ScanError> {
        let mut strings = Vec::new();
        strings.push(tokens.scan_charstr()?);
        while !tokens.is_done() {
            strings.push(tokens.scan_charstr()?);
        }
        Ok(Txt { strings })
    }
}

//--- Display

impl fmt::Display for Txt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut sep = "";
        for string in &self.strings {
            write!(f, "{}{}", sep, string.display_quoted())?;
            sep = " ";
        }
        Ok(())
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::scan::Token;

    fn tokens(input: &[&str]) -> Vec<Token> {
        input.iter().map(|t| Token::new(*t)).collect()
    }

    #[test]
    fn a_round_trip() {
        let data = A::from_str("1.2.3.4").unwrap();
        let mut target = Composer::new();
        data.compose(&mut target);
        assert_eq!(target.as_slice(), b"\x01\x02\x03\x04");
        assert_eq!(
            A::parse(&mut Parser::new(target.as_slice())).unwrap(),
            data
        );
        assert_eq!(data.to_string(), "1.2.3.4");
    }

    #[test]
    fn mx_scan() {
        let tokens = tokens(&["10", "mail.example.com."]);
        let mut tokens = Tokens::new(&tokens, None);
        let mx = Mx::scan(&mut tokens).unwrap();
        assert_eq!(mx.preference(), 10);
        assert_eq!(mx.to_string(), "10 mail.example.com.");
    }

    #[test]
    fn soa_scan_with_units() {
        let tokens = tokens(&[
            "ns1.example.com.",
            "admin.example.com.",
            "2014020901",
            "3h",
            "30m",
            "1w",
            "86400",
        ]);
        let mut tokens = Tokens::new(&tokens, None);
        let soa = Soa::scan(&mut tokens).unwrap();
        assert_eq!(soa.refresh(), 10800);
        assert_eq!(soa.retry(), 1800);
        assert_eq!(soa.expire(), 604800);
        assert_eq!(
            soa.to_string(),
            "ns1.example.com. admin.example.com. \
             2014020901 10800 1800 604800 86400"
        );
    }

    #[test]
    fn txt_parse_checks_bounds() {
        // Two strings of 3 octets each.
        let wire = b"\x03foo\x03bar";
        let txt = Txt::parse(&mut Parser::new(wire), 8).unwrap();
        assert_eq!(txt.strings().len(), 2);
        assert_eq!(txt.to_string(), "\"foo\" \"bar\"");

        // Inner string runs past the end of the record data.
        let mut parser = Parser::new(wire);
        assert!(Txt::parse(&mut parser, 5).is_err());
    }

    #[test]
    fn txt_empty_rdata() {
        let txt = Txt::parse(&mut Parser::new(b""), 0).unwrap();
        assert!(txt.strings().is_empty());
    }
}
