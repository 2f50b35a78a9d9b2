//! Reading the debug output of dig.
//!
//! When invoked with `+qr`, BIND's `dig` utility prints both the query it
//! sends and the answer it receives in a line-oriented text form. This
//! module reads that format back into [`Message`] values, one per
//! `;; ->>HEADER<<-` marker found. Record lines use the zone file token
//! grammar, so everything the zone file reader understands works here as
//! well.
//!
//! The main use of this module is comparing a response assembled by this
//! crate against what `dig` saw for the same query.

use crate::base::header::Header;
use crate::base::iana::{Class, Opcode, Rcode, Rtype};
use crate::base::message::Message;
use crate::base::name::Name;
use crate::base::record::Record;
use crate::base::scan::{parse_time, ScanError, Token, Tokens};
use crate::rdata::RecordData;
use crate::zonefile::parse_question;
use core::fmt;
use core::str::FromStr;

//------------ parse ---------------------------------------------------------

/// Parses dig output into the messages contained in it.
///
/// Returns one message per header marker in the input. For `dig +qr`
/// output that is two: the query sent and the answer received.
pub fn parse(text: &str) -> Result<Vec<Message>, Error> {
    let mut res = Vec::new();
    let mut current: Option<Message> = None;
    let mut section = Section::Question;

    for (idx, line) in text.lines().enumerate() {
        let err = |msg: ScanError| Error {
            line: idx + 1,
            msg: msg.to_string(),
        };
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix(";; ->>HEADER<<-") {
            if let Some(msg) = current.take() {
                res.push(msg);
            }
            let mut msg = Message::default();
            parse_header(rest, msg.header_mut()).map_err(err)?;
            current = Some(msg);
            section = Section::Question;
        } else if let Some(rest) = line.strip_prefix(";; flags:") {
            if let Some(ref mut msg) = current {
                let flags = rest.split(';').next().unwrap_or("");
                parse_flags(flags, msg.header_mut()).map_err(err)?;
            }
        } else if let Some(rest) = line.strip_prefix("; EDNS:") {
            if let Some(ref mut msg) = current {
                parse_edns(rest, msg).map_err(err)?;
            }
        } else if line.starts_with(";; QUESTION SECTION") {
            section = Section::Question;
        } else if line.starts_with(";; ANSWER SECTION") {
            section = Section::Answer;
        } else if line.starts_with(";; AUTHORITY SECTION") {
            section = Section::Authority;
        } else if line.starts_with(";; ADDITIONAL SECTION") {
            section = Section::Additional;
        } else if line.starts_with(";; OPT PSEUDOSECTION") {
            section = Section::Additional;
        } else if let Some(rest) = line.strip_prefix(';') {
            // A question line or one of dig's many comments.
            if !rest.starts_with(';')
                && section == Section::Question
                && current.is_some()
            {
                let tokens = tokenize(rest).map_err(err)?;
                if !tokens.is_empty() {
                    let question =
                        parse_question(&tokens).map_err(err)?;
                    current.as_mut().unwrap().add_question(question);
                }
            }
        } else if let Some(ref mut msg) = current {
            let tokens = tokenize(line).map_err(err)?;
            if tokens.is_empty() {
                continue;
            }
            let record = parse_record(&tokens).map_err(err)?;
            match section {
                Section::Question => {
                    return Err(err(ScanError::custom(
                        "record line in question section",
                    )))
                }
                Section::Answer => msg.add_answer(record),
                Section::Authority => msg.add_authority(record),
                Section::Additional => msg.add_additional(record),
            }
        }
    }

    if let Some(msg) = current.take() {
        res.push(msg);
    }
    Ok(res)
}

//------------ Section -------------------------------------------------------

/// The section record lines are currently assigned to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Section {
    Question,
    Answer,
    Authority,
    Additional,
}

//------------ Helper Functions ----------------------------------------------

/// Parses the remainder of a header line.
///
/// The input is `opcode: QUERY, status: NOERROR, id: 1234` with the
/// leading marker already removed.
fn parse_header(rest: &str, header: &mut Header) -> Result<(), ScanError> {
    for part in rest.split(',') {
        let (key, value) = part
            .trim()
            .split_once(':')
            .ok_or_else(|| ScanError::custom("malformed header line"))?;
        let value = value.trim();
        match key.trim() {
            "opcode" => {
                header.set_opcode(Opcode::from_str(value).map_err(
                    |_| ScanError::custom("unknown opcode"),
                )?);
            }
            "status" => {
                header.set_rcode(Rcode::from_str(value).map_err(|_| {
                    ScanError::custom("unknown response code")
                })?);
            }
            "id" => {
                header.set_id(value.parse().map_err(|_| {
                    ScanError::custom("malformed message ID")
                })?);
            }
            _ => {}
        }
    }
    Ok(())
}

/// Sets the flags named in a flags line.
fn parse_flags(flags: &str, header: &mut Header) -> Result<(), ScanError> {
    for flag in flags.split_whitespace() {
        match flag {
            "qr" => header.set_qr(true),
            "aa" => header.set_aa(true),
            "tc" => header.set_tc(true),
            "rd" => header.set_rd(true),
            "ra" => header.set_ra(true),
            "z" => header.set_z(true),
            "ad" => header.set_ad(true),
            "cd" => header.set_cd(true),
            _ => return Err(ScanError::custom("unknown flag")),
        }
    }
    Ok(())
}

/// Parses an EDNS pseudosection line into an OPT record.
///
/// The input is ` version: 0, flags: do; udp: 4096` with the leading
/// `; EDNS:` already removed.
fn parse_edns(rest: &str, msg: &mut Message) -> Result<(), ScanError> {
    let mut version = 0;
    let mut dnssec_ok = false;
    let mut udp_payload_size = 512;
    for part in rest.split(|ch| ch == ',' || ch == ';') {
        let (key, value) = match part.trim().split_once(':') {
            Some(res) => res,
            None => continue,
        };
        let value = value.trim();
        match key.trim() {
            "version" => {
                version = value.parse().map_err(|_| {
                    ScanError::custom("malformed EDNS version")
                })?;
            }
            "flags" => {
                dnssec_ok = value.split_whitespace().any(|f| f == "do");
            }
            "udp" => {
                udp_payload_size = value.parse().map_err(|_| {
                    ScanError::custom("malformed EDNS UDP size")
                })?;
            }
            _ => {}
        }
    }
    msg.add_opt(udp_payload_size, 0, version, dnssec_ok, Vec::new());
    Ok(())
}

/// Parses a record line in the dig column format.
///
/// Unlike in a zone file, owner, TTL, and class are always present.
fn parse_record(tokens: &[Token]) -> Result<Record, ScanError> {
    let mut iter = tokens.iter();
    let owner = Name::from_text(
        &iter
            .next()
            .ok_or_else(|| ScanError::custom("missing owner name"))?
            .text,
        None,
    )
    .map_err(|err| ScanError::custom(err.to_string()))?;
    let ttl = parse_time(
        &iter
            .next()
            .ok_or_else(|| ScanError::custom("missing TTL"))?
            .text,
    )?;
    let class = iter
        .next()
        .ok_or_else(|| ScanError::custom("missing class"))?
        .text
        .parse::<Class>()
        .map_err(|_| ScanError::custom("expected class"))?;
    let rtype = iter
        .next()
        .ok_or_else(|| ScanError::custom("missing record type"))?
        .text
        .parse::<Rtype>()
        .map_err(|_| ScanError::custom("expected record type"))?;
    let mut tokens = Tokens::new(iter.as_slice(), None);
    let data = RecordData::scan(rtype, &mut tokens)?;
    tokens.require_done()?;
    Ok(Record::new(owner, class, ttl, data))
}

/// Splits one line into tokens.
///
/// Quoted strings become single tokens, escape sequences are kept as is,
/// and stray parentheses are dropped.
fn tokenize(line: &str) -> Result<Vec<Token>, ScanError> {
    let mut res = Vec::new();
    let mut chars = line.chars().peekable();
    loop {
        while matches!(chars.peek(), Some(' ') | Some('\t')) {
            chars.next();
        }
        match chars.peek() {
            None => return Ok(res),
            Some('(') | Some(')') => {
                chars.next();
            }
            Some('"') => {
                chars.next();
                let mut text = String::new();
                loop {
                    match chars.next() {
                        None => {
                            return Err(ScanError::custom(
                                "unterminated quoted string",
                            ))
                        }
                        Some('"') => break,
                        Some('\\') => {
                            text.push('\\');
                            match chars.next() {
                                Some(ch) => text.push(ch),
                                None => {
                                    return Err(ScanError::custom(
                                        "unterminated quoted string",
                                    ))
                                }
                            }
                        }
                        Some(ch) => text.push(ch),
                    }
                }
                res.push(Token::quoted(text));
            }
            Some(_) => {
                let mut text = String::new();
                while let Some(&ch) = chars.peek() {
                    match ch {
                        ' ' | '\t' | '(' | ')' | '"' => break,
                        '\\' => {
                            text.push('\\');
                            chars.next();
                            if let Some(ch) = chars.next() {
                                text.push(ch);
                            }
                        }
                        _ => {
                            text.push(ch);
                            chars.next();
                        }
                    }
                }
                res.push(Token::new(text));
            }
        }
    }
}

//============ Error Types ===================================================

//------------ Error ---------------------------------------------------------

/// An error while reading dig output.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    /// The line the error occurred on, starting at 1.
    pub line: usize,

    /// What went wrong.
    pub msg: String,
}

//--- Display and Error

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.msg)
    }
}

impl std::error::Error for Error {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    const OUTPUT: &str = "\
; <<>> DiG 9.18.1 <<>> +qr www.google.com @8.8.8.8\n\
;; global options: +cmd\n\
;; Sending:\n\
;; ->>HEADER<<- opcode: QUERY, status: NOERROR, id: 1234\n\
;; flags: rd; QUERY: 1, ANSWER: 0, AUTHORITY: 0, ADDITIONAL: 0\n\
;; QUESTION SECTION:\n\
;www.google.com.\t\tIN\tA\n\
\n\
;; Got answer:\n\
;; ->>HEADER<<- opcode: QUERY, status: NOERROR, id: 1234\n\
;; flags: qr rd ra; QUERY: 1, ANSWER: 1, AUTHORITY: 0, ADDITIONAL: 1\n\
;; OPT PSEUDOSECTION:\n\
; EDNS: version: 0, flags: do; udp: 4096\n\
;; QUESTION SECTION:\n\
;www.google.com.\t\tIN\tA\n\
;; ANSWER SECTION:\n\
www.google.com.\t5\tIN\tA\t66.249.91.104\n\
\n\
;; Query time: 4 msec\n\
;; SERVER: 8.8.8.8#53(8.8.8.8)\n\
";

    #[test]
    fn two_messages() {
        let messages = parse(OUTPUT).unwrap();
        assert_eq!(messages.len(), 2);

        let query = &messages[0];
        assert_eq!(query.header().id(), 1234);
        assert!(query.header().rd());
        assert!(!query.header().qr());
        assert_eq!(query.questions().len(), 1);
        assert_eq!(
            query.first_question().unwrap().qtype(),
            Rtype::A
        );

        let answer = &messages[1];
        assert!(answer.header().qr());
        assert!(answer.header().ra());
        assert_eq!(answer.answers().len(), 1);
        assert_eq!(
            answer.answers()[0].data().to_string(),
            "66.249.91.104"
        );
        let opt = answer.opt().unwrap();
        assert_eq!(opt.udp_payload_size(), 4096);
        assert!(opt.dnssec_ok());
    }

    #[test]
    fn quoted_txt_record() {
        let text = "\
;; ->>HEADER<<- opcode: QUERY, status: NOERROR, id: 1\n\
;; flags: qr; QUERY: 0, ANSWER: 1, AUTHORITY: 0, ADDITIONAL: 0\n\
;; ANSWER SECTION:\n\
example.com.\t60\tIN\tTXT\t\"A B C\" \"second\"\n";
        let messages = parse(text).unwrap();
        assert_eq!(
            messages[0].answers()[0].data().to_string(),
            "\"A B C\" \"second\""
        );
    }
}
