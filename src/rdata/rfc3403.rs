//! Record data from [RFC 3403]: the NAPTR record.
//!
//! [RFC 3403]: https://tools.ietf.org/html/rfc3403

use crate::base::charstr::CharStr;
use crate::base::name::Name;
use crate::base::scan::{ScanError, Tokens};
use crate::base::wire::{Composer, Parser};
use crate::base::DnsError;
use core::fmt;

//------------ Naptr ---------------------------------------------------------

/// NAPTR record data.
///
/// The NAPTR record is the dynamic delegation discovery system's rewrite
/// rule: order and preference select a rule, the flags, services, and
/// regexp character strings describe it, and the replacement name is used
/// when the regexp is empty. The replacement name is never compressed.
///
/// The NAPTR record type is defined in [RFC 3403, section 4.1][1].
///
/// [1]: https://tools.ietf.org/html/rfc3403#section-4.1
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Naptr {
    order: u16,
    preference: u16,
    flags: CharStr,
    services: CharStr,
    regexp: CharStr,
    replacement: Name,
}

impl Naptr {
    /// Creates new NAPTR record data from its components.
    pub fn new(
        order: u16,
        preference: u16,
        flags: CharStr,
        services: CharStr,
        regexp: CharStr,
        replacement: Name,
    ) -> Self {
        Naptr {
            order,
            preference,
            flags,
            services,
            regexp,
            replacement,
        }
    }

    /// The order in which rules have to be processed.
    pub fn order(&self) -> u16 {
        self.order
    }

    /// The preference among rules of equal order.
    pub fn preference(&self) -> u16 {
        self.preference
    }

    /// The flags controlling rewriting and interpretation.
    pub fn flags(&self) -> &CharStr {
        &self.flags
    }

    /// The services available down this rewrite path.
    pub fn services(&self) -> &CharStr {
        &self.services
    }

    /// The substitution expression applied to the original string.
    pub fn regexp(&self) -> &CharStr {
        &self.regexp
    }

    /// The name to query next when the regexp is empty.
    pub fn replacement(&self) -> &Name {
        &self.replacement
    }

    pub fn parse(parser: &mut Parser) -> Result<Self, DnsError> {
        Ok(Self::new(
            parser.parse_u16()?,
            parser.parse_u16()?,
            CharStr::parse(parser)?,
            CharStr::parse(parser)?,
            CharStr::parse(parser)?,
            Name::parse(parser)?,
        ))
    }

    pub fn compose(&self, target: &mut Composer) {
        target.append_u16(self.order);
        target.append_u16(self.preference);
        self.flags.compose(target);
        self.services.compose(target);
        self.regexp.compose(target);
        self.replacement.compose(target)
    }

    pub fn scan(tokens: &mut Tokens) -> Result<Self, ScanError> {
        Ok(Self::new(
            tokens.scan_int()?,
            tokens.scan_int()?,
            tokens.scan_charstr()?,
            tokens.scan_charstr()?,
            tokens.scan_charstr()?,
            tokens.scan_name()?,
        ))
    }
}

//--- Display

impl fmt::Display for Naptr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.order,
            self.preference,
            self.flags.display_quoted(),
            self.services.display_quoted(),
            self.regexp.display_quoted(),
            self.replacement
        )
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
            Token::new("100"),
            Token::new("10"),
            Token::quoted("U"),
            Token::quoted("E2U+sip"),
            Token::quoted("!^.*$!sip:customer-service@example.com!"),
            Token::new("."),
        ];
        let mut tokens = Tokens::new(&tokens, None);
        let naptr = Naptr::scan(&mut tokens).unwrap();
        assert_eq!(naptr.order(), 100);
        assert_eq!(naptr.replacement(), &Name::root());
        assert_eq!(
            naptr.to_string(),
            "100 10 \"U\" \"E2U+sip\" \
             \"!^.*$!sip:customer-service@example.com!\" ."
        );
    }

    #[test]
    fn wire_round_trip() {
        let tokens = vec![
            Token::new("100"),
            Token::new("50"),
            Token::quoted("s"),
            Token::quoted("http+I2L+I2C+I2R"),
            Token::quoted(""),
            Token::new("_http._tcp.foo.com."),
        ];
        let mut tokens = Tokens::new(&tokens, None);
        let naptr = Naptr::scan(&mut tokens).unwrap();
        let mut target = Composer::new();
        naptr.compose(&mut target);
        assert_eq!(
            Naptr::parse(&mut Parser::new(target.as_slice())).unwrap(),
            naptr
        );
    }
}
