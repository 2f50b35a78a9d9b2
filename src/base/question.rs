//! A single question of a DNS message.

use super::iana::{Class, Rtype};
use super::name::{Name, NameCompressor};
use super::wire::Composer;
use super::{DnsError, Parser};
use core::fmt;

//------------ Question ------------------------------------------------------

/// A question of a DNS message.
///
/// A question carries the domain name, record type, and class a query asks
/// about. While queries always contain exactly one question, the wire
/// format allows any number of them.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Question {
    /// The domain name of the question.
    qname: Name,

    /// The record type of the question.
    qtype: Rtype,

    /// The class of the question.
    qclass: Class,
}

impl Question {
    /// Creates a new question from its three components.
    pub fn new(qname: Name, qtype: Rtype, qclass: Class) -> Self {
        Question {
            qname,
            qtype,
            qclass,
        }
    }

    /// Creates a new question for the A record of a name in class IN.
    pub fn new_in_a(qname: Name) -> Self {
        Self::new(qname, Rtype::A, Class::IN)
    }

    /// Returns the domain name of the question.
    pub fn qname(&self) -> &Name {
        &self.qname
    }

    /// Returns the record type of the question.
    pub fn qtype(&self) -> Rtype {
        self.qtype
    }

    /// Returns the class of the question.
    pub fn qclass(&self) -> Class {
        self.qclass
    }
}

/// # Wire Format
///
impl Question {
    /// Takes a question from the beginning of a parser.
    pub fn parse(parser: &mut Parser) -> Result<Self, DnsError> {
        let qname = Name::parse(parser)?;
        let qtype = Rtype::parse(parser)?;
        let qclass = Class::parse(parser)?;
        Ok(Question {
            qname,
            qtype,
            qclass,
        })
    }

    /// Appends the question to a message under construction.
    pub fn compose(
        &self,
        target: &mut Composer,
        compressor: &mut NameCompressor,
    ) {
        self.qname.compose_compressed(target, compressor);
        self.qtype.compose(target);
        self.qclass.compose(target);
    }
}

//--- Display

impl fmt::Display for Question {
    /// Formats the question the way `dig` prints a question section line.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            ";{:<30} {:<7} {}",
            self.qname.to_string(),
            self.qclass.to_string(),
            self.qtype
        )
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn display() {
        let question = Question::new_in_a(
            Name::from_str("www.google.com").unwrap(),
        );
        assert_eq!(
            question.to_string(),
            ";www.google.com.                IN      A"
        );
    }

    #[test]
    fn wire_round_trip() {
        let question = Question::new(
            Name::from_str("example.com").unwrap(),
            Rtype::MX,
            Class::IN,
        );
        let mut target = Composer::new();
        let mut compressor = NameCompressor::new();
        question.compose(&mut target, &mut compressor);
        assert_eq!(
            target.as_slice(),
            b"\x07example\x03com\0\x00\x0F\x00\x01"
        );
        let parsed =
            Question::parse(&mut Parser::new(target.as_slice())).unwrap();
        assert_eq!(parsed, question);
    }
}
