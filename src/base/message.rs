//! DNS messages.
//!
//! This module provides [`Message`], the type representing a complete DNS
//! message: the header and the four sections holding questions and
//! records. Messages are decoded from and encoded into the wire format
//! defined in [RFC 1035] and are displayed in the textual form `dig`
//! prints.
//!
//! Decoding is all or nothing: [`Message::parse`] returns a message only
//! if every section decoded cleanly and fails with a
//! [`DnsError`][super::DnsError] otherwise. This holds for arbitrary
//! input, which makes the parser safe to expose to the network.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

use super::header::Header;
use super::iana::{Class, Rtype};
use super::name::{Name, NameCompressor};
use super::question::Question;
use super::record::Record;
use super::wire::{Composer, FormError, Parser};
use super::DnsError;
use crate::rdata::rfc6891::{opt_record, EdnsOption, OptRecord};
use core::fmt;

//------------ Message -------------------------------------------------------

/// A DNS message.
///
/// The message owns all its data; nothing borrows from the packet a
/// message was decoded from. The header's section counts are not part of
/// the value: they are derived from the section lengths whenever the
/// message is encoded or displayed.
#[derive(Clone, Debug, Default)]
pub struct Message {
    /// The message header.
    header: Header,

    /// The question section.
    questions: Vec<Question>,

    /// The answer section.
    answers: Vec<Record>,

    /// The authority section.
    authorities: Vec<Record>,

    /// The additional section.
    additionals: Vec<Record>,
}

/// # Creation
///
impl Message {
    /// Creates a new, empty message.
    ///
    /// The header starts with a random ID and the RD flag set, ready for
    /// building a query.
    pub fn new() -> Self {
        let mut res = Self::default();
        res.header.set_random_id();
        res.header.set_rd(true);
        res
    }

    /// Creates a query for the given name and record type in class IN.
    pub fn query(qname: Name, qtype: Rtype) -> Self {
        let mut res = Self::new();
        res.questions
            .push(Question::new(qname, qtype, Class::IN));
        res
    }

    /// Creates the skeleton of a response to this message.
    ///
    /// The response copies the ID, opcode, and RD flag of the request and
    /// has the QR, RA, and AA flags set. The question section is copied;
    /// the record sections start out empty.
    pub fn reply(&self) -> Self {
        let mut res = Self::default();
        res.header.set_id(self.header.id());
        res.header.set_opcode(self.header.opcode());
        res.header.set_rd(self.header.rd());
        res.header.set_qr(true);
        res.header.set_ra(true);
        res.header.set_aa(true);
        res.questions = self.questions.clone();
        res
    }

    /// Creates a truncated copy of the message.
    ///
    /// The copy keeps only the header, with the TC flag set. It is what a
    /// server sends when a response doesn't fit the transport's message
    /// size, telling the client to retry over TCP.
    pub fn truncated(&self) -> Self {
        let mut res = Self::default();
        res.header = self.header;
        res.header.set_tc(true);
        res
    }
}

/// # Access to Header and Sections
///
impl Message {
    /// Returns a reference to the message header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns a mutable reference to the message header.
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Returns the question section.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Returns the first question, if there is one.
    ///
    /// Queries carry exactly one question in practice, so this is usually
    /// the only one that matters.
    pub fn first_question(&self) -> Option<&Question> {
        self.questions.first()
    }

    /// Returns the answer section.
    pub fn answers(&self) -> &[Record] {
        &self.answers
    }

    /// Returns the authority section.
    pub fn authorities(&self) -> &[Record] {
        &self.authorities
    }

    /// Returns the additional section.
    pub fn additionals(&self) -> &[Record] {
        &self.additionals
    }

    /// Appends a question to the question section.
    pub fn add_question(&mut self, question: Question) {
        self.questions.push(question)
    }

    /// Appends a record to the answer section.
    pub fn add_answer(&mut self, record: Record) {
        self.answers.push(record)
    }

    /// Appends a record to the authority section.
    pub fn add_authority(&mut self, record: Record) {
        self.authorities.push(record)
    }

    /// Appends a record to the additional section.
    pub fn add_additional(&mut self, record: Record) {
        self.additionals.push(record)
    }

    /// Returns the EDNS view of the message's OPT record, if present.
    pub fn opt(&self) -> Option<OptRecord> {
        self.additionals.iter().find_map(Record::as_opt)
    }

    /// Adds an OPT record with the given EDNS parameters.
    ///
    /// A message carries at most one OPT record; an already present one is
    /// replaced.
    pub fn add_opt(
        &mut self,
        udp_payload_size: u16,
        ext_rcode: u8,
        version: u8,
        dnssec_ok: bool,
        options: Vec<EdnsOption>,
    ) {
        self.additionals.retain(|r| r.rtype() != Rtype::OPT);
        self.additionals.push(opt_record(
            udp_payload_size,
            ext_rcode,
            version,
            dnssec_ok,
            options,
        ));
    }
}

/// # Wire Format
///
impl Message {
    /// Parses a message from a wire format packet.
    ///
    /// The section counts in the packet header determine how many entries
    /// are read from each section. Any failure anywhere in the packet
    /// fails the whole parse.
    pub fn parse(packet: &[u8]) -> Result<Self, DnsError> {
        let mut parser = Parser::new(packet);
        let header = Header::parse(&mut parser)?;
        let qdcount = parser.parse_u16()?;
        let ancount = parser.parse_u16()?;
        let nscount = parser.parse_u16()?;
        let arcount = parser.parse_u16()?;
        let mut res = Message {
            header,
            ..Default::default()
        };
        for _ in 0..qdcount {
            res.questions.push(Question::parse(&mut parser)?);
        }
        for _ in 0..ancount {
            res.answers.push(Record::parse(&mut parser)?);
        }
        for _ in 0..nscount {
            res.authorities.push(Record::parse(&mut parser)?);
        }
        let mut seen_opt = false;
        for _ in 0..arcount {
            let record = Record::parse(&mut parser)?;
            if record.rtype() == Rtype::OPT {
                if seen_opt {
                    return Err(FormError::new(
                        "more than one OPT record",
                    )
                    .into());
                }
                seen_opt = true;
            }
            res.additionals.push(record);
        }
        Ok(res)
    }

    /// Packs the message into its wire format.
    ///
    /// The header's section counts are filled in from the actual section
    /// lengths. One name compressor spans the whole packet, so names in
    /// all sections compress against each other.
    pub fn pack(&self) -> Result<Vec<u8>, DnsError> {
        let mut target = Composer::new();
        let mut compressor = NameCompressor::new();
        self.header.compose(&mut target);
        for len in [
            self.questions.len(),
            self.answers.len(),
            self.authorities.len(),
            self.additionals.len(),
        ] {
            target.append_u16(
                u16::try_from(len).map_err(|_| {
                    FormError::new("section with more than 65535 entries")
                })?,
            );
        }
        for question in &self.questions {
            question.compose(&mut target, &mut compressor);
        }
        for record in self
            .answers
            .iter()
            .chain(self.authorities.iter())
            .chain(self.additionals.iter())
        {
            record.compose(&mut target, &mut compressor)?;
        }
        Ok(target.finish())
    }
}

/// # Comparison
///
impl Message {
    /// Returns the lines in which the two messages differ.
    ///
    /// Lines of the canonical text form only present in `self` are
    /// prefixed with `<`, lines only present in `other` with `>`. An
    /// empty result means the messages are equal.
    pub fn diff(&self, other: &Self) -> Vec<String> {
        let this = self.to_string();
        let that = other.to_string();
        let mut res = Vec::new();
        for line in this.lines() {
            if !that.lines().any(|l| l == line) {
                res.push(format!("< {}", line));
            }
        }
        for line in that.lines() {
            if !this.lines().any(|l| l == line) {
                res.push(format!("> {}", line));
            }
        }
        res
    }
}

//--- PartialEq and Eq

impl PartialEq for Message {
    /// Two messages are equal if their canonical text forms are equal.
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for Message {}

//--- Display

impl fmt::Display for Message {
    /// Formats the message the way `dig` prints it.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            ";; ->>HEADER<<- opcode: {}, status: {}, id: {}",
            self.header.opcode(),
            self.header.rcode(),
            self.header.id()
        )?;
        write!(
            f,
            "\n;; flags: {}; QUERY: {}, ANSWER: {}, AUTHORITY: {}, \
             ADDITIONAL: {}",
            self.header.flags(),
            self.questions.len(),
            self.answers.len(),
            self.authorities.len(),
            self.additionals.len()
        )?;
        if !self.questions.is_empty() {
            write!(f, "\n;; QUESTION SECTION:")?;
            for question in &self.questions {
                write!(f, "\n{}", question)?;
            }
        }
        if !self.answers.is_empty() {
            write!(f, "\n;; ANSWER SECTION:")?;
            for record in &self.answers {
                write!(f, "\n{}", record)?;
            }
        }
        if !self.authorities.is_empty() {
            write!(f, "\n;; AUTHORITY SECTION:")?;
            for record in &self.authorities {
                write!(f, "\n{}", record)?;
            }
        }
        if !self.additionals.is_empty() {
            write!(f, "\n;; ADDITIONAL SECTION:")?;
            for record in &self.additionals {
                write!(f, "\n{}", record)?;
            }
        }
        Ok(())
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::rdata::rfc1035::{Cname, A};
    use crate::rdata::RecordData;
    use core::str::FromStr;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    #[test]
    fn query_and_reply() {
        let mut query = Message::query(name("abc.com"), Rtype::ANY);
        query.header_mut().set_id(4711);
        assert!(query.header().rd());
        assert!(!query.header().qr());

        let mut reply = query.reply();
        assert_eq!(reply.header().id(), 4711);
        assert!(reply.header().qr());
        assert!(reply.header().aa());
        assert!(reply.header().rd());
        assert!(reply.header().ra());
        assert_eq!(reply.questions(), query.questions());

        reply.add_answer(Record::new(
            name("abc.com"),
            Class::IN,
            60,
            RecordData::A(A::from_str("1.2.3.4").unwrap()),
        ));
        let reparsed = Message::parse(&reply.pack().unwrap()).unwrap();
        assert_eq!(reparsed, reply);
        assert_eq!(reparsed.answers().len(), 1);
    }

    #[test]
    fn wire_round_trip_with_compression() {
        let mut msg = Message::query(name("www.example.com"), Rtype::A);
        msg.header_mut().set_id(1);
        let mut reply = msg.reply();
        reply.add_answer(Record::new(
            name("www.example.com"),
            Class::IN,
            5,
            RecordData::Cname(Cname::new(name("web.example.com"))),
        ));
        reply.add_answer(Record::new(
            name("web.example.com"),
            Class::IN,
            5,
            RecordData::A(A::from_str("192.0.2.1").unwrap()),
        ));
        let packet = reply.pack().unwrap();
        // The owner of the first answer is a pointer to the question name.
        let reparsed = Message::parse(&packet).unwrap();
        assert_eq!(reparsed, reply);
        // Re-packing a parsed message again yields an equal message.
        assert_eq!(
            Message::parse(&reparsed.pack().unwrap()).unwrap(),
            reparsed
        );
    }

    #[test]
    fn display() {
        let mut query = Message::query(name("abc.com"), Rtype::A);
        query.header_mut().set_id(1234);
        let mut reply = query.reply();
        reply.add_answer(Record::new(
            name("abc.com"),
            Class::IN,
            60,
            RecordData::A(A::from_str("1.2.3.4").unwrap()),
        ));
        assert_eq!(
            reply.to_string(),
            ";; ->>HEADER<<- opcode: QUERY, status: NOERROR, id: 1234\n\
             ;; flags: qr aa rd ra; QUERY: 1, ANSWER: 1, AUTHORITY: 0, \
             ADDITIONAL: 0\n\
             ;; QUESTION SECTION:\n\
             ;abc.com.                       IN      A\n\
             ;; ANSWER SECTION:\n\
             abc.com.                60      IN      A       1.2.3.4"
        );
    }

    #[test]
    fn counts_in_packet() {
        let mut query = Message::query(name("abc.com"), Rtype::A);
        query.header_mut().set_id(0x0102);
        let packet = query.pack().unwrap();
        // QDCOUNT is 1, the other counts 0.
        assert_eq!(&packet[4..12], b"\x00\x01\x00\x00\x00\x00\x00\x00");
    }

    #[test]
    fn edns() {
        let mut msg = Message::query(name("abc.com"), Rtype::A);
        msg.add_opt(4096, 0, 0, true, Vec::new());
        let opt = msg.opt().unwrap();
        assert_eq!(opt.udp_payload_size(), 4096);
        assert!(opt.dnssec_ok());

        // The additional record's class carries the payload size, the
        // TTL the DO bit.
        let record = &msg.additionals()[0];
        assert_eq!(record.class().to_int(), 4096);
        assert_eq!(record.ttl(), 0x8000);

        let reparsed = Message::parse(&msg.pack().unwrap()).unwrap();
        assert!(reparsed.opt().unwrap().dnssec_ok());

        // Adding again replaces the record instead of duplicating it.
        msg.add_opt(1232, 0, 0, false, Vec::new());
        assert_eq!(msg.additionals().len(), 1);
        assert_eq!(msg.opt().unwrap().udp_payload_size(), 1232);
    }

    #[test]
    fn rejects_double_opt() {
        let mut msg = Message::query(name("abc.com"), Rtype::A);
        msg.add_opt(4096, 0, 0, false, Vec::new());
        msg.additionals.push(opt_record(512, 0, 0, false, Vec::new()));
        let packet = msg.pack().unwrap();
        assert!(Message::parse(&packet).is_err());
    }

    #[test]
    fn truncated() {
        let mut query = Message::query(name("abc.com"), Rtype::A);
        query.header_mut().set_id(7);
        let t = query.truncated();
        assert!(t.header().tc());
        assert_eq!(t.header().id(), 7);
        assert!(t.questions().is_empty());
    }

    #[test]
    fn diff() {
        let mut left = Message::query(name("abc.com"), Rtype::A);
        left.header_mut().set_id(1);
        let mut right = left.clone();
        assert!(left.diff(&right).is_empty());
        right.header_mut().set_id(2);
        assert_eq!(left.diff(&right).len(), 2);
    }
}
