//! Reading zone files.
//!
//! This module implements the zone file format defined in section 5 of
//! [RFC 1035]. A [`Zonefile`] holds the complete text in memory and acts
//! as an iterator over the records in it.
//!
//! The format is line-oriented, but a parenthesized group continues an
//! entry across line breaks. Comments start with a semicolon outside
//! quoted strings. The `$ORIGIN` and `$TTL` control entries are handled
//! internally; `$INCLUDE` is not supported and fails with an error.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

use crate::base::iana::{Class, Rtype};
use crate::base::name::Name;
use crate::base::record::Record;
use crate::base::scan::{parse_time, ScanError, Token, Tokens};
use crate::base::Question;
use crate::rdata::RecordData;
use core::fmt;

//------------ Zonefile ------------------------------------------------------

/// A zone file to be read.
///
/// A value of this type holds the text of a zone file and allows reading
/// the records in it by acting as an iterator. The origin used to complete
/// relative names and the default TTL can be preset and are updated by the
/// `$ORIGIN` and `$TTL` control entries as they are encountered.
#[derive(Clone, Debug)]
pub struct Zonefile {
    /// The characters of the zone file.
    data: Vec<char>,

    /// The read position in `data`.
    pos: usize,

    /// The line number of the read position, starting at 1.
    line: usize,

    /// The current origin.
    origin: Option<Name>,

    /// The owner of the last record, used by indented entries.
    last_owner: Option<Name>,

    /// The TTL used by records without an explicit one.
    default_ttl: u32,
}

impl Zonefile {
    /// Creates a new zone file from its text.
    pub fn new(text: &str) -> Self {
        Zonefile {
            data: text.chars().collect(),
            pos: 0,
            line: 1,
            origin: None,
            last_owner: None,
            default_ttl: 0,
        }
    }

    /// Creates a new zone file with a preset origin.
    pub fn with_origin(text: &str, origin: Name) -> Self {
        let mut res = Self::new(text);
        res.origin = Some(origin);
        res
    }

    /// Sets the origin for relative names.
    pub fn set_origin(&mut self, origin: Name) {
        self.origin = Some(origin)
    }

    /// Sets the TTL used by records without an explicit one.
    pub fn set_default_ttl(&mut self, ttl: u32) {
        self.default_ttl = ttl
    }

    /// Returns the next record in the zone file.
    ///
    /// Returns `Ok(None)` when the end of the file has been reached.
    pub fn next_record(&mut self) -> Result<Option<Record>, Error> {
        loop {
            let line = self.line;
            let entry = match self.next_entry().map_err(|err| Error {
                line,
                msg: err.to_string(),
            })? {
                Some(entry) => entry,
                None => return Ok(None),
            };
            match self.process_entry(entry) {
                Ok(Some(record)) => return Ok(Some(record)),
                Ok(None) => {}
                Err(err) => {
                    return Err(Error {
                        line,
                        msg: err.to_string(),
                    })
                }
            }
        }
    }

    /// Processes one entry, returning a record if it contained one.
    fn process_entry(
        &mut self,
        entry: Entry,
    ) -> Result<Option<Record>, ScanError> {
        let first = &entry.tokens[0];
        if !entry.leading_space && first.text.starts_with('$') {
            self.process_control(&entry)?;
            return Ok(None);
        }

        let mut tokens = entry.tokens.as_slice();

        // The owner: inherited for indented entries, `@` for the origin.
        let owner = if entry.leading_space {
            match self.last_owner.clone() {
                Some(owner) => owner,
                None => {
                    return Err(ScanError::custom(
                        "indented entry without a previous owner",
                    ))
                }
            }
        } else {
            let token = &tokens[0];
            tokens = &tokens[1..];
            if token.text == "@" {
                match self.origin.clone() {
                    Some(origin) => origin,
                    None => {
                        return Err(ScanError::custom(
                            "@ without an origin in effect",
                        ))
                    }
                }
            } else {
                Name::from_text(&token.text, self.origin.as_ref())
                    .map_err(|err| ScanError::custom(err.to_string()))?
            }
        };
        self.last_owner = Some(owner.clone());

        // TTL and class are optional and may come in either order.
        let mut ttl = None;
        let mut class = None;
        let rtype = loop {
            let token = match tokens.first() {
                Some(token) => token,
                None => {
                    return Err(ScanError::custom("missing record type"))
                }
            };
            tokens = &tokens[1..];
            if ttl.is_none() && token.text.starts_with(|c: char| c.is_ascii_digit()) {
                ttl = Some(parse_time(&token.text)?);
            } else if class.is_none() {
                if let Ok(parsed) = token.text.parse::<Class>() {
                    class = Some(parsed);
                    continue;
                }
                break token.text.parse::<Rtype>().map_err(|_| {
                    ScanError::custom("expected record type")
                })?;
            } else {
                break token.text.parse::<Rtype>().map_err(|_| {
                    ScanError::custom("expected record type")
                })?;
            }
        };

        let class = class.unwrap_or(Class::IN);
        let ttl = ttl.unwrap_or(self.default_ttl);

        let mut tokens = Tokens::new(tokens, self.origin.as_ref());
        let data = RecordData::scan(rtype, &mut tokens)?;
        tokens.require_done()?;
        Ok(Some(Record::new(owner, class, ttl, data)))
    }

    /// Processes a control entry.
    fn process_control(&mut self, entry: &Entry) -> Result<(), ScanError> {
        let mut tokens =
            Tokens::new(&entry.tokens[1..], self.origin.as_ref());
        match entry.tokens[0].text.to_ascii_uppercase().as_str() {
            "$ORIGIN" => {
                let origin = tokens.scan_name()?;
                self.origin = Some(origin);
                Ok(())
            }
            "$TTL" => {
                self.default_ttl = tokens.scan_time()?;
                Ok(())
            }
            "$INCLUDE" => Err(ScanError::custom(
                "$INCLUDE is not supported",
            )),
            _ => Err(ScanError::custom("unknown control entry")),
        }
    }
}

//--- Iterator

impl Iterator for Zonefile {
    type Item = Result<Record, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

/// # Tokenizing
///
impl Zonefile {
    /// Returns the next entry of the file.
    ///
    /// An entry is one logical line: tokens up to a line break outside of
    /// a parenthesized group. Empty lines and comment-only lines are
    /// skipped. Returns `None` at the end of the file.
    fn next_entry(&mut self) -> Result<Option<Entry>, ScanError> {
        loop {
            let leading_space = matches!(self.peek(), Some(' ') | Some('\t'));
            let mut tokens = Vec::new();
            let mut parens = 0usize;
            loop {
                self.skip_spaces();
                match self.peek() {
                    None => {
                        if parens > 0 {
                            return Err(ScanError::custom(
                                "unclosed parentheses",
                            ));
                        }
                        if tokens.is_empty() {
                            return Ok(None);
                        }
                        break;
                    }
                    Some('\n') => {
                        self.advance();
                        if parens == 0 {
                            break;
                        }
                    }
                    Some(';') => {
                        while !matches!(self.peek(), None | Some('\n')) {
                            self.advance();
                        }
                    }
                    Some('(') => {
                        self.advance();
                        parens += 1;
                    }
                    Some(')') => {
                        if parens == 0 {
                            return Err(ScanError::custom(
                                "unexpected closing parenthesis",
                            ));
                        }
                        self.advance();
                        parens -= 1;
                    }
                    Some('"') => {
                        self.advance();
                        tokens.push(self.read_quoted()?);
                    }
                    Some(_) => {
                        tokens.push(self.read_word());
                    }
                }
            }
            if !tokens.is_empty() {
                return Ok(Some(Entry {
                    tokens,
                    leading_space,
                }));
            }
        }
    }

    /// Reads a quoted token; the opening quote is already consumed.
    fn read_quoted(&mut self) -> Result<Token, ScanError> {
        let mut text = String::new();
        loop {
            match self.peek() {
                None => {
                    return Err(ScanError::custom(
                        "unterminated quoted string",
                    ))
                }
                Some('"') => {
                    self.advance();
                    return Ok(Token::quoted(text));
                }
                Some('\\') => {
                    text.push(self.advance().unwrap());
                    match self.peek() {
                        Some(_) => text.push(self.advance().unwrap()),
                        None => {
                            return Err(ScanError::custom(
                                "unterminated quoted string",
                            ))
                        }
                    }
                }
                Some(_) => text.push(self.advance().unwrap()),
            }
        }
    }

    /// Reads an unquoted token.
    fn read_word(&mut self) -> Token {
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            match ch {
                ' ' | '\t' | '\r' | '\n' | '(' | ')' | ';' | '"' => break,
                '\\' => {
                    text.push(self.advance().unwrap());
                    if let Some(ch) = self.advance() {
                        text.push(ch);
                    }
                }
                _ => {
                    text.push(ch);
                    self.advance();
                }
            }
        }
        Token::new(text)
    }

    /// Skips over spaces, tabs, and carriage returns.
    fn skip_spaces(&mut self) {
        while matches!(self.peek(), Some(' ') | Some('\t') | Some('\r')) {
            self.advance();
        }
    }

    /// Returns the character at the read position.
    fn peek(&self) -> Option<char> {
        self.data.get(self.pos).copied()
    }

    /// Takes the character at the read position.
    fn advance(&mut self) -> Option<char> {
        let res = self.peek();
        if let Some(ch) = res {
            self.pos += 1;
            if ch == '\n' {
                self.line += 1;
            }
        }
        res
    }
}

//------------ Entry ---------------------------------------------------------

/// One tokenized logical line of a zone file.
#[derive(Clone, Debug)]
struct Entry {
    /// The tokens of the entry.
    tokens: Vec<Token>,

    /// Whether the entry started with white space.
    ///
    /// Such entries inherit the owner of the previous record.
    leading_space: bool,
}

//------------ entries_to_questions ------------------------------------------

/// Reads the zone-style question lines used by the dig format.
///
/// A question line has the form `name class type` without a TTL. This is
/// used by [`digfile`][crate::digfile] and has no meaning in real zone
/// files.
pub(crate) fn parse_question(
    tokens: &[Token],
) -> Result<Question, ScanError> {
    let mut tokens = Tokens::new(tokens, None);
    let qname = tokens.scan_name()?;
    let qclass = tokens
        .next_token()?
        .text
        .parse::<Class>()
        .map_err(|_| ScanError::custom("expected class"))?;
    let qtype = tokens.scan_rtype()?;
    tokens.require_done()?;
    Ok(Question::new(qname, qtype, qclass))
}

//============ Error Types ===================================================

//------------ Error ---------------------------------------------------------

/// An error while reading a zone file.
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
    use core::str::FromStr;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    fn collect(zone: &str) -> Vec<Record> {
        Zonefile::new(zone)
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn simple_record() {
        let records = collect("www.example.com. 60 IN A 1.2.3.4\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].owner(), &name("www.example.com."));
        assert_eq!(records[0].ttl(), 60);
        assert_eq!(records[0].class(), Class::IN);
        assert_eq!(records[0].rtype(), Rtype::A);
    }

    #[test]
    fn directives_and_inheritance() {
        let records = collect(
            "$TTL 300\n\
             $ORIGIN abc.com.\n\
             @       IN      MX      10 mail.abc.com.\n\
             www     IN      A       1.2.3.4\n\
             \tIN      TXT     \"Some Text\"\n\
             mail    IN      CNAME   www.abc.com.\n",
        );
        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|rr| rr.ttl() == 300));
        assert_eq!(records[0].owner(), &name("abc.com."));
        assert_eq!(records[1].owner(), &name("www.abc.com."));
        // The TXT entry is indented and inherits the previous owner.
        assert_eq!(records[2].owner(), &name("www.abc.com."));
        assert_eq!(records[2].rtype(), Rtype::TXT);
        assert_eq!(records[3].owner(), &name("mail.abc.com."));
    }

    #[test]
    fn multiline_soa() {
        let records = collect(
            "$ORIGIN example.com.\n\
             @  IN  SOA     ns1.example.com. admin.example.com. (\n\
                            2014020901  ; Serial\n\
                            10800   ; Refresh\n\
                            1800    ; Retry\n\
                            604800  ; Expire\n\
                            86400 ) ; Minimum TTL\n",
        );
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].data().to_string(),
            "ns1.example.com. admin.example.com. \
             2014020901 10800 1800 604800 86400"
        );
    }

    #[test]
    fn ttl_with_units() {
        let mut zone = Zonefile::new("$TTL 90m\nwww.example.com. IN A 1.2.3.4\n");
        let record = zone.next_record().unwrap().unwrap();
        assert_eq!(record.ttl(), 5400);
    }

    #[test]
    fn include_is_rejected() {
        let mut zone = Zonefile::new("$INCLUDE other.zone\n");
        assert!(zone.next_record().is_err());
    }

    #[test]
    fn relative_name_without_origin() {
        let mut zone = Zonefile::new("www IN A 1.2.3.4\n");
        // Without an origin relative names are taken as absolute.
        let record = zone.next_record().unwrap().unwrap();
        assert_eq!(record.owner(), &name("www."));
    }

    #[test]
    fn error_carries_line_number() {
        let mut zone =
            Zonefile::new("www.example.com. IN A 1.2.3.4\nbad entry\n");
        zone.next_record().unwrap();
        let err = zone.next_record().unwrap_err();
        assert_eq!(err.line, 2);
    }

    #[test]
    fn comments_and_empty_lines() {
        let records = collect(
            "; a comment line\n\
             \n\
             www.example.com. 60 IN A 1.2.3.4 ; trailing comment\n",
        );
        assert_eq!(records.len(), 1);
    }
}
