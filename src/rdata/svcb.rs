//! Record data from [RFC 9460]: SVCB and HTTPS records.
//!
//! Both record types share the same shape: a priority, a target name, and
//! a list of service parameters. They only differ in their record type and
//! in which protocol they describe, so one type, [`ServiceBinding`],
//! implements them both.
//!
//! [RFC 9460]: https://tools.ietf.org/html/rfc9460

use crate::base::iana::SvcParamKey;
use crate::base::name::Name;
use crate::base::scan::{ScanError, Symbol, Token, Tokens};
use crate::base::wire::{Composer, FormError, Parser};
use crate::base::DnsError;
use crate::utils::base64;
use bytes::Bytes;
use core::fmt;
use core::str::FromStr;
use std::net::{Ipv4Addr, Ipv6Addr};

//------------ ServiceBinding ------------------------------------------------

/// SVCB or HTTPS record data.
///
/// A service binding record either points at an alternative endpoint for a
/// service, possibly carrying parameters for connecting to it (service
/// mode, priority above zero), or delegates to another name (alias mode,
/// priority zero). The target name is never compressed.
///
/// The wire format reader is strictly bounded by the record's RDLENGTH; a
/// parameter running past it is an error, and parameters of a record are
/// never read from beyond its data.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ServiceBinding {
    priority: u16,
    target: Name,
    params: Vec<SvcParam>,
}

impl ServiceBinding {
    /// Creates new service binding data from its components.
    pub fn new(priority: u16, target: Name, params: Vec<SvcParam>) -> Self {
        ServiceBinding {
            priority,
            target,
            params,
        }
    }

    /// The priority of the binding.
    ///
    /// Zero marks alias mode; any other value is the precedence among the
    /// service mode records of an RRset, lower values first.
    pub fn priority(&self) -> u16 {
        self.priority
    }

    /// The target name of the binding.
    ///
    /// The root name stands for the owner name of the record itself.
    pub fn target(&self) -> &Name {
        &self.target
    }

    /// The service parameters of the binding.
    pub fn params(&self) -> &[SvcParam] {
        &self.params
    }

    pub fn parse(parser: &mut Parser, rdlen: u16) -> Result<Self, DnsError> {
        let end = parser.pos() + usize::from(rdlen);
        let priority = parser.parse_u16()?;
        let target = Name::parse(parser)?;
        let mut params = Vec::new();
        while parser.pos() < end {
            let key = SvcParamKey::parse(parser)?;
            let len = usize::from(parser.parse_u16()?);
            if parser.pos() + len > end {
                return Err(FormError::new(
                    "service parameter crosses end of record data",
                )
                .into());
            }
            let value = Bytes::copy_from_slice(parser.parse_octets(len)?);
            params.push(SvcParam::new(key, value));
        }
        Ok(Self::new(priority, target, params))
    }

    pub fn compose(&self, target: &mut Composer) {
        target.append_u16(self.priority);
        self.target.compose(target);
        for param in &self.params {
            param.key.compose(target);
            target.append_u16(param.value.len() as u16);
            target.append_slice(&param.value);
        }
    }

    /// Creates service binding data from zone file tokens.
    ///
    /// Every token after priority and target is one `key` or `key=value`
    /// parameter. A quoted value directly following a token that ends in
    /// `=` belongs to that key. Parameters are stored in ascending key
    /// order as the wire format requires.
    pub fn scan(tokens: &mut Tokens) -> Result<Self, ScanError> {
        let priority = tokens.scan_int()?;
        let target = tokens.scan_name()?;
        let mut params = Vec::new();
        while let Some(token) = tokens.next_opt() {
            let (key, value) = match token.text.split_once('=') {
                Some((key, "")) if !token.quoted => {
                    // The value is the next token if it was quoted, as in
                    // `alpn="h2,h3"` which tokenizes into two tokens.
                    match tokens.next_opt() {
                        Some(value) => (key, value.clone()),
                        None => (key, Token::new("")),
                    }
                }
                Some((key, value)) => (key, Token::new(value)),
                None => (token.text.as_str(), Token::new("")),
            };
            let key = SvcParamKey::from_str(key).map_err(|_| {
                ScanError::custom("unknown service parameter key")
            })?;
            params.push(SvcParam::scan_value(key, &value)?);
        }
        params.sort_by_key(|param| param.key);
        Ok(Self::new(priority, target, params))
    }
}

//--- Display

impl fmt::Display for ServiceBinding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.priority, self.target)?;
        for param in &self.params {
            write!(f, " {}", param)?;
        }
        Ok(())
    }
}

//------------ SvcParam ------------------------------------------------------

/// A single service parameter of an SVCB or HTTPS record.
///
/// The value is kept in its wire format; the presentation format defined
/// for the key is applied when formatting and scanning.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SvcParam {
    /// The key of the parameter.
    key: SvcParamKey,

    /// The value in its wire format.
    value: Bytes,
}

impl SvcParam {
    /// Creates a new parameter from a key and the wire format value.
    pub fn new(key: SvcParamKey, value: Bytes) -> Self {
        SvcParam { key, value }
    }

    /// Returns the key of the parameter.
    pub fn key(&self) -> SvcParamKey {
        self.key
    }

    /// Returns the wire format value of the parameter.
    pub fn value(&self) -> &Bytes {
        &self.value
    }

    /// Creates a parameter from the presentation form of its value.
    fn scan_value(
        key: SvcParamKey,
        token: &Token,
    ) -> Result<Self, ScanError> {
        let text = token.text.as_str();
        let mut value = Vec::new();
        match key {
            SvcParamKey::Mandatory => {
                let mut keys = Vec::new();
                for item in split_value_list(text)? {
                    let item = String::from_utf8(item).map_err(|_| {
                        ScanError::custom("unknown service parameter key")
                    })?;
                    keys.push(
                        SvcParamKey::from_str(&item).map_err(|_| {
                            ScanError::custom(
                                "unknown service parameter key",
                            )
                        })?,
                    );
                }
                keys.sort();
                for key in keys {
                    value.extend_from_slice(&key.to_int().to_be_bytes());
                }
            }
            SvcParamKey::Alpn => {
                for id in split_value_list(text)? {
                    if id.is_empty() || id.len() > 255 {
                        return Err(ScanError::custom(
                            "illegal alpn protocol id",
                        ));
                    }
                    value.push(id.len() as u8);
                    value.extend_from_slice(&id);
                }
            }
            SvcParamKey::NoDefaultAlpn => {
                if !text.is_empty() {
                    return Err(ScanError::custom(
                        "no-default-alpn takes no value",
                    ));
                }
            }
            SvcParamKey::Port => {
                let port = text.parse::<u16>().map_err(|_| {
                    ScanError::custom("expected port number")
                })?;
                value.extend_from_slice(&port.to_be_bytes());
            }
            SvcParamKey::Ipv4Hint => {
                for item in split_value_list(text)? {
                    let item = String::from_utf8(item).map_err(|_| {
                        ScanError::custom("expected IPv4 address")
                    })?;
                    let addr =
                        item.parse::<Ipv4Addr>().map_err(|_| {
                            ScanError::custom("expected IPv4 address")
                        })?;
                    value.extend_from_slice(&addr.octets());
                }
            }
            SvcParamKey::Ech => {
                value = base64::decode(text).map_err(|err| {
                    ScanError::custom(err.to_string())
                })?;
            }
            SvcParamKey::Ipv6Hint => {
                for item in split_value_list(text)? {
                    let item = String::from_utf8(item).map_err(|_| {
                        ScanError::custom("expected IPv6 address")
                    })?;
                    let addr =
                        item.parse::<Ipv6Addr>().map_err(|_| {
                            ScanError::custom("expected IPv6 address")
                        })?;
                    value.extend_from_slice(&addr.octets());
                }
            }
            _ => {
                for sym in token.symbols() {
                    value.push(sym.into_octet().map_err(|_| {
                        ScanError::custom(
                            "illegal service parameter value",
                        )
                    })?);
                }
            }
        }
        Ok(SvcParam::new(key, value.into()))
    }
}

//--- Display

impl fmt::Display for SvcParam {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.fmt_value(f) {
            Ok(()) => Ok(()),
            // A value that doesn't match its key's format is printed the
            // way an unknown key's value would be.
            Err(fmt::Error) => {
                write!(f, "{}=", self.key)?;
                fmt_escaped(f, &self.value, false)
            }
        }
    }
}

impl SvcParam {
    /// Formats the value in the presentation format of its key.
    ///
    /// Fails if the value doesn't have the shape the key requires.
    fn fmt_value(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = self.value.as_ref();
        match self.key {
            SvcParamKey::Mandatory => {
                if value.is_empty() || value.len() % 2 != 0 {
                    return Err(fmt::Error);
                }
                write!(f, "{}=", self.key)?;
                let mut sep = "";
                for chunk in value.chunks(2) {
                    let key =
                        SvcParamKey::from_int(u16::from_be_bytes([
                            chunk[0], chunk[1],
                        ]));
                    write!(f, "{}{}", sep, key)?;
                    sep = ",";
                }
                Ok(())
            }
            SvcParamKey::Alpn => {
                // Check the length octets up front so nothing has been
                // written if the value turns out malformed.
                let mut check = Parser::new(value);
                while check.remaining() > 0 {
                    let len = usize::from(
                        check.parse_u8().map_err(|_| fmt::Error)?,
                    );
                    check.parse_octets(len).map_err(|_| fmt::Error)?;
                }
                write!(f, "{}=", self.key)?;
                let mut parser = Parser::new(value);
                let mut sep = "";
                while parser.remaining() > 0 {
                    let len = usize::from(parser.parse_u8().unwrap());
                    let id = parser.parse_octets(len).unwrap();
                    f.write_str(sep)?;
                    fmt_escaped(f, id, true)?;
                    sep = ",";
                }
                Ok(())
            }
            SvcParamKey::NoDefaultAlpn => {
                if !value.is_empty() {
                    return Err(fmt::Error);
                }
                write!(f, "{}", self.key)
            }
            SvcParamKey::Port => {
                if value.len() != 2 {
                    return Err(fmt::Error);
                }
                write!(
                    f,
                    "{}={}",
                    self.key,
                    u16::from_be_bytes([value[0], value[1]])
                )
            }
            SvcParamKey::Ipv4Hint => {
                if value.is_empty() || value.len() % 4 != 0 {
                    return Err(fmt::Error);
                }
                write!(f, "{}=", self.key)?;
                let mut sep = "";
                for chunk in value.chunks(4) {
                    let addr = Ipv4Addr::new(
                        chunk[0], chunk[1], chunk[2], chunk[3],
                    );
                    write!(f, "{}{}", sep, addr)?;
                    sep = ",";
                }
                Ok(())
            }
            SvcParamKey::Ech => {
                write!(f, "{}=", self.key)?;
                base64::display(value, f)
            }
            SvcParamKey::Ipv6Hint => {
                if value.is_empty() || value.len() % 16 != 0 {
                    return Err(fmt::Error);
                }
                write!(f, "{}=", self.key)?;
                let mut sep = "";
                for chunk in value.chunks(16) {
                    let mut octets = [0; 16];
                    octets.copy_from_slice(chunk);
                    write!(f, "{}{}", sep, Ipv6Addr::from(octets))?;
                    sep = ",";
                }
                Ok(())
            }
            _ => {
                if value.is_empty() {
                    write!(f, "{}", self.key)
                } else {
                    write!(f, "{}=", self.key)?;
                    fmt_escaped(f, value, false)
                }
            }
        }
    }
}

//------------ Helper Functions ----------------------------------------------

/// Writes octets in escaped presentation form.
///
/// Commas get a decimal escape when the octets are part of a
/// comma-separated value list.
fn fmt_escaped(
    f: &mut fmt::Formatter,
    octets: &[u8],
    escape_comma: bool,
) -> fmt::Result {
    for &ch in octets {
        if escape_comma && ch == b',' {
            write!(f, "\\{:03}", ch)?;
        } else {
            fmt::Display::fmt(&Symbol::from_octet(ch), f)?;
        }
    }
    Ok(())
}

/// Splits a value in presentation form on unescaped commas.
///
/// Escape sequences within the items are resolved.
fn split_value_list(text: &str) -> Result<Vec<Vec<u8>>, ScanError> {
    let mut items = vec![Vec::new()];
    let mut chars = text.chars();
    loop {
        match Symbol::from_chars(&mut chars) {
            Ok(Some(Symbol::Char(','))) => items.push(Vec::new()),
            Ok(Some(sym)) => items.last_mut().unwrap().push(
                sym.into_octet().map_err(|_| {
                    ScanError::custom("illegal service parameter value")
                })?,
            ),
            Ok(None) => break,
            Err(err) => return Err(ScanError::custom(err.to_string())),
        }
    }
    if items.last().map_or(false, Vec::is_empty) {
        items.pop();
    }
    Ok(items)
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    fn tokens(input: &[&str]) -> Vec<Token> {
        input.iter().map(|t| Token::new(*t)).collect()
    }

    fn scan(input: &[&str]) -> ServiceBinding {
        let tokens = tokens(input);
        let mut tokens = Tokens::new(&tokens, None);
        ServiceBinding::scan(&mut tokens).unwrap()
    }

    #[test]
    fn alias_mode() {
        let data = scan(&["0", "foo.example.com."]);
        assert_eq!(data.priority(), 0);
        assert_eq!(data.to_string(), "0 foo.example.com.");
    }

    #[test]
    fn service_mode_params() {
        let data = scan(&["1", ".", "alpn=h3,h3-29,h2", "port=443"]);
        assert_eq!(data.to_string(), "1 . alpn=h3,h3-29,h2 port=443");
        let alpn = &data.params()[0];
        assert_eq!(alpn.key(), SvcParamKey::Alpn);
        assert_eq!(
            alpn.value().as_ref(),
            b"\x02h3\x05h3-29\x02h2"
        );
    }

    #[test]
    fn params_sorted_on_scan() {
        let data = scan(&["1", ".", "port=443", "alpn=h2"]);
        assert_eq!(data.params()[0].key(), SvcParamKey::Alpn);
        assert_eq!(data.params()[1].key(), SvcParamKey::Port);
    }

    #[test]
    fn escaped_comma_in_alpn() {
        let data = scan(&["1", ".", "alpn=part1,part2\\044part3"]);
        assert_eq!(
            data.params()[0].value().as_ref(),
            b"\x05part1\x0Bpart2,part3"
        );
        assert_eq!(
            data.to_string(),
            "1 . alpn=part1,part2\\044part3"
        );
    }

    #[test]
    fn hints_and_ech() {
        let data = scan(&[
            "1",
            ".",
            "ipv4hint=104.16.132.229,104.16.133.229",
            "ech=Z2FyYmFnZQ==",
            "ipv6hint=2606:4700::6810:84e5",
        ]);
        assert_eq!(
            data.to_string(),
            "1 . ipv4hint=104.16.132.229,104.16.133.229 \
             ech=Z2FyYmFnZQ== ipv6hint=2606:4700::6810:84e5"
        );
    }

    #[test]
    fn unknown_key() {
        let data = scan(&["1", ".", "key9999=X"]);
        assert_eq!(data.to_string(), "1 . key9999=X");
    }

    #[test]
    fn wire_round_trip() {
        // A record with alpn, ipv4hint, and ipv6hint parameters.
        let wire: &[u8] =
            b"\x00\x01\x00\
              \x00\x01\x00\x0C\x02h3\x05h3-29\x02h2\
              \x00\x04\x00\x08\x68\x10\x84\xe5\x68\x10\x85\xe5\
              \x00\x06\x00\x20\
              \x26\x06\x47\x00\x00\x00\x00\x00\x00\x00\x00\x00\x68\x10\x84\xe5\
              \x26\x06\x47\x00\x00\x00\x00\x00\x00\x00\x00\x00\x68\x10\x85\xe5";
        let data = ServiceBinding::parse(
            &mut Parser::new(wire),
            wire.len() as u16,
        )
        .unwrap();
        assert_eq!(
            data.to_string(),
            "1 . alpn=h3,h3-29,h2 \
             ipv4hint=104.16.132.229,104.16.133.229 \
             ipv6hint=2606:4700::6810:84e5,2606:4700::6810:85e5"
        );
        let mut target = Composer::new();
        data.compose(&mut target);
        assert_eq!(target.as_slice(), wire);
    }

    #[test]
    fn parse_stops_at_rdlen() {
        // A parameter whose declared length runs past the record data.
        let wire = b"\x00\x01\x00\x00\x03\x00\x10\x01\xbb";
        assert!(ServiceBinding::parse(
            &mut Parser::new(wire),
            wire.len() as u16
        )
        .is_err());
    }

    #[test]
    fn quoted_value_after_equals() {
        let tokens = vec![
            Token::new("1"),
            Token::new("."),
            Token::new("alpn="),
            Token::quoted("h2,h3"),
        ];
        let mut tokens = Tokens::new(&tokens, None);
        let data = ServiceBinding::scan(&mut tokens).unwrap();
        assert_eq!(
            data.params()[0].value().as_ref(),
            b"\x02h2\x02h3"
        );
    }
}
