//! Reading data from its zone file representation.
//!
//! Zone files and the closely related dig output represent arbitrary octets
//! through escape sequences. The [`Symbol`] type models one such
//! representation unit and is used by everything that converts between
//! octets and text: domain names, character strings, and the tokenizers in
//! [`zonefile`][crate::zonefile] and [`digfile`][crate::digfile].

use super::charstr::CharStr;
use super::iana::Rtype;
use super::name::Name;
use crate::utils::{base16, base64};
use core::fmt;

//------------ Symbol --------------------------------------------------------

/// The zone file representation of a single character.
///
/// This is either a regular character or an escape sequence. See the
/// variants for more details.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Symbol {
    /// An unescaped character.
    Char(char),

    /// A character escaped via a preceding backslash.
    SimpleEscape(u8),

    /// A raw octet escaped using the decimal escape sequence.
    ///
    /// This escape sequence consists of a backslash followed by exactly
    /// three decimal digits with the value of the octet.
    DecimalEscape(u8),
}

impl Symbol {
    /// Reads a symbol from a character source.
    ///
    /// Returns the next symbol in the source, `Ok(None)` if the source has
    /// been exhausted, or an error if there wasn't a valid symbol.
    pub fn from_chars<C>(chars: &mut C) -> Result<Option<Self>, SymbolCharsError>
    where
        C: Iterator<Item = char>,
    {
        use self::SymbolCharsError::*;

        let ch = match chars.next() {
            Some(ch) => ch,
            None => return Ok(None),
        };
        if ch != '\\' {
            return Ok(Some(Symbol::Char(ch)));
        }
        match chars.next() {
            Some(ch) if ch.is_ascii_digit() => {
                let ch = ch.to_digit(10).unwrap() * 100;
                let ch2 = match chars.next() {
                    Some(ch) => match ch.to_digit(10) {
                        Some(ch) => ch * 10,
                        None => return Err(BadEscape),
                    },
                    None => return Err(ShortInput),
                };
                let ch3 = match chars.next() {
                    Some(ch) => match ch.to_digit(10) {
                        Some(ch) => ch,
                        None => return Err(BadEscape),
                    },
                    None => return Err(ShortInput),
                };
                let res = ch + ch2 + ch3;
                if res > 255 {
                    return Err(BadEscape);
                }
                Ok(Some(Symbol::DecimalEscape(res as u8)))
            }
            Some(ch) => {
                let ch = u8::try_from(ch).map_err(|_| BadEscape)?;
                Ok(Some(Symbol::SimpleEscape(ch)))
            }
            None => Err(ShortInput),
        }
    }

    /// Provides the best symbol for an octet.
    ///
    /// The function will use the simple escape sequence for octet values
    /// that represent ASCII spaces, quotes, backslashes, and semicolons and
    /// the plain ASCII value for all other printable ASCII characters. Any
    /// other value is escaped using the decimal escape sequence.
    pub fn from_octet(ch: u8) -> Self {
        if ch == b' ' || ch == b'"' || ch == b'\\' || ch == b';' {
            Symbol::SimpleEscape(ch)
        } else if !(0x20..0x7F).contains(&ch) {
            Symbol::DecimalEscape(ch)
        } else {
            Symbol::Char(ch as char)
        }
    }

    /// Converts the symbol into an octet if it represents one.
    ///
    /// Both domain names and character strings operate on octets instead of
    /// characters. These octets can be represented by printable ASCII
    /// characters, both plain or through a simple escape, or by a decimal
    /// escape.
    pub fn into_octet(self) -> Result<u8, BadSymbol> {
        match self {
            Symbol::Char(ch) => {
                if ch.is_ascii() && ch >= '\u{20}' && ch <= '\u{7E}' {
                    Ok(ch as u8)
                } else {
                    Err(BadSymbol(self))
                }
            }
            Symbol::SimpleEscape(ch) | Symbol::DecimalEscape(ch) => Ok(ch),
        }
    }

    /// Converts the symbol representing a digit into its integer value.
    pub fn into_digit(self, base: u32) -> Result<u32, BadSymbol> {
        if let Symbol::Char(ch) = self {
            match ch.to_digit(base) {
                Some(ch) => Ok(ch),
                None => Err(BadSymbol(self)),
            }
        } else {
            Err(BadSymbol(self))
        }
    }
}

//--- From

impl From<char> for Symbol {
    fn from(ch: char) -> Symbol {
        Symbol::Char(ch)
    }
}

//--- Display

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Symbol::Char(ch) => write!(f, "{}", ch),
            Symbol::SimpleEscape(ch) => write!(f, "\\{}", ch as char),
            Symbol::DecimalEscape(ch) => write!(f, "\\{:03}", ch),
        }
    }
}

//------------ Symbols -------------------------------------------------------

/// An iterator over the symbols in a char sequence.
#[derive(Clone, Debug)]
pub struct Symbols<Chars> {
    /// The chars of the sequence.
    ///
    /// This is an option so we can fuse the iterator on error.
    chars: Option<Chars>,
}

impl<Chars> Symbols<Chars> {
    /// Creates a new symbols iterator atop a char iterator.
    pub fn new(chars: Chars) -> Self {
        Symbols { chars: Some(chars) }
    }
}

impl<Chars: Iterator<Item = char>> Iterator for Symbols<Chars> {
    type Item = Symbol;

    fn next(&mut self) -> Option<Self::Item> {
        if let Ok(res) = Symbol::from_chars(self.chars.as_mut()?) {
            return res;
        }
        self.chars = None;
        None
    }
}

//------------ Token ---------------------------------------------------------

/// One token of a zone file entry.
///
/// The tokenizers in [`zonefile`][crate::zonefile] and
/// [`digfile`][crate::digfile] split entries into tokens. A token keeps its
/// text with all escape sequences still in place – whoever interprets the
/// token decides what the escapes mean – and remembers whether it was
/// quoted, which matters for TXT record data.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    /// The text of the token with escape sequences kept as is.
    pub text: String,

    /// Whether the token was enclosed in double quotes.
    pub quoted: bool,
}

impl Token {
    /// Creates an unquoted token from a string.
    pub fn new(text: impl Into<String>) -> Self {
        Token {
            text: text.into(),
            quoted: false,
        }
    }

    /// Creates a quoted token from a string.
    pub fn quoted(text: impl Into<String>) -> Self {
        Token {
            text: text.into(),
            quoted: true,
        }
    }

    /// Returns an iterator over the symbols of the token.
    pub fn symbols(&self) -> Symbols<core::str::Chars<'_>> {
        Symbols::new(self.text.chars())
    }
}

//------------ Tokens --------------------------------------------------------

/// The tokens of one record's data waiting to be interpreted.
///
/// This is handed to the `scan` function of a record data type which takes
/// the tokens it needs off the front. The active origin travels along for
/// completing relative domain names.
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    /// The remaining tokens.
    iter: core::slice::Iter<'a, Token>,

    /// The origin for relative domain names, if there is one.
    origin: Option<&'a Name>,
}

impl<'a> Tokens<'a> {
    /// Creates a new token source from a slice of tokens.
    pub fn new(tokens: &'a [Token], origin: Option<&'a Name>) -> Self {
        Tokens {
            iter: tokens.iter(),
            origin,
        }
    }

    /// Returns the origin, if there is one.
    pub fn origin(&self) -> Option<&'a Name> {
        self.origin
    }

    /// Takes the next token if there is one.
    pub fn next_opt(&mut self) -> Option<&'a Token> {
        self.iter.next()
    }

    /// Takes the next token or complains about the entry ending early.
    pub fn next_token(&mut self) -> Result<&'a Token, ScanError> {
        self.next_opt()
            .ok_or_else(|| ScanError::custom("unexpected end of entry"))
    }

    /// Returns whether all tokens have been taken.
    pub fn is_done(&self) -> bool {
        self.iter.as_slice().is_empty()
    }

    /// Complains if there are tokens left.
    pub fn require_done(&self) -> Result<(), ScanError> {
        if self.is_done() {
            Ok(())
        } else {
            Err(ScanError::custom("trailing data at end of entry"))
        }
    }

    /// Takes the next token and parses it as a decimal integer.
    pub fn scan_int<T: core::str::FromStr>(
        &mut self,
    ) -> Result<T, ScanError> {
        let token = self.next_token()?;
        token
            .text
            .parse()
            .map_err(|_| ScanError::custom("expected decimal number"))
    }

    /// Takes the next token and parses it as a time value.
    ///
    /// Accepts a plain number of seconds or a number followed by one of
    /// the units `s`, `m`, `h`, `d`, or `w`.
    pub fn scan_time(&mut self) -> Result<u32, ScanError> {
        parse_time(&self.next_token()?.text)
    }

    /// Takes the next token and converts it into a domain name.
    ///
    /// Relative names are completed with the origin.
    pub fn scan_name(&mut self) -> Result<Name, ScanError> {
        let token = self.next_token()?;
        Name::from_text(&token.text, self.origin)
            .map_err(|err| ScanError::custom(err.to_string()))
    }

    /// Takes the next token and converts it into a character string.
    pub fn scan_charstr(&mut self) -> Result<CharStr, ScanError> {
        let token = self.next_token()?;
        CharStr::from_symbols(&token.text)
            .map_err(|err| ScanError::custom(err.to_string()))
    }

    /// Takes the next token and converts it into a record type.
    pub fn scan_rtype(&mut self) -> Result<Rtype, ScanError> {
        let token = self.next_token()?;
        token
            .text
            .parse()
            .map_err(|_| ScanError::custom("expected record type"))
    }

    /// Takes all remaining tokens as one stretch of Base 64 data.
    pub fn scan_remaining_base64(&mut self) -> Result<Vec<u8>, ScanError> {
        let mut decoder = base64::Decoder::new();
        let mut seen = false;
        for token in self.iter.by_ref() {
            seen = true;
            for ch in token.text.chars() {
                decoder
                    .push(ch)
                    .map_err(|err| ScanError::custom(err.to_string()))?;
            }
        }
        if !seen {
            return Err(ScanError::custom("missing Base 64 data"));
        }
        decoder
            .finalize()
            .map_err(|err| ScanError::custom(err.to_string()))
    }

    /// Takes all remaining tokens as one stretch of hex digits.
    pub fn scan_remaining_hex(&mut self) -> Result<Vec<u8>, ScanError> {
        let mut decoder = base16::Decoder::new();
        let mut seen = false;
        for token in self.iter.by_ref() {
            seen = true;
            for ch in token.text.chars() {
                decoder
                    .push(ch)
                    .map_err(|err| ScanError::custom(err.to_string()))?;
            }
        }
        if !seen {
            return Err(ScanError::custom("missing hex data"));
        }
        decoder
            .finalize()
            .map_err(|err| ScanError::custom(err.to_string()))
    }
}

//------------ parse_time ----------------------------------------------------

/// Parses a time value with an optional unit suffix.
///
/// Zone files allow TTLs and the SOA timers to be given as `90m` or `2d`
/// instead of a plain number of seconds.
pub fn parse_time(s: &str) -> Result<u32, ScanError> {
    let (digits, unit) = match s.as_bytes().last().copied() {
        Some(ch) if ch.is_ascii_digit() => (s, 1),
        Some(b's') | Some(b'S') => (&s[..s.len() - 1], 1),
        Some(b'm') | Some(b'M') => (&s[..s.len() - 1], 60),
        Some(b'h') | Some(b'H') => (&s[..s.len() - 1], 3600),
        Some(b'd') | Some(b'D') => (&s[..s.len() - 1], 86400),
        Some(b'w') | Some(b'W') => (&s[..s.len() - 1], 604800),
        _ => return Err(ScanError::custom("expected time value")),
    };
    digits
        .parse::<u32>()
        .ok()
        .and_then(|value| value.checked_mul(unit))
        .ok_or_else(|| ScanError::custom("expected time value"))
}

//============ Error Types ===================================================

//------------ ScanError -----------------------------------------------------

/// Interpreting tokens as record data failed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScanError {
    /// A description of what went wrong.
    msg: String,
}

impl ScanError {
    /// Creates a new error from a message.
    pub fn custom(msg: impl Into<String>) -> Self {
        ScanError { msg: msg.into() }
    }
}

//--- Display and Error

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.msg)
    }
}

impl std::error::Error for ScanError {}

//------------ SymbolCharsError ----------------------------------------------

/// An error happened when reading a symbol.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SymbolCharsError {
    /// An illegal escape sequence was encountered.
    BadEscape,

    /// Unexpected end of input.
    ///
    /// This can only happen in an escape sequence.
    ShortInput,
}

//--- Display and Error

impl fmt::Display for SymbolCharsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SymbolCharsError::BadEscape => {
                f.write_str("illegal escape sequence")
            }
            SymbolCharsError::ShortInput => {
                f.write_str("unexpected end of input")
            }
        }
    }
}

impl std::error::Error for SymbolCharsError {}

//------------ BadSymbol -----------------------------------------------------

/// A symbol with an unexpected value was encountered.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BadSymbol(pub Symbol);

//--- Display and Error

impl fmt::Display for BadSymbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unexpected symbol '{}'", self.0)
    }
}

impl std::error::Error for BadSymbol {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn symbol_from_chars() {
        fn symbol(s: &str) -> Result<Option<Symbol>, SymbolCharsError> {
            Symbol::from_chars(&mut s.chars())
        }

        assert_eq!(symbol(""), Ok(None));
        assert_eq!(symbol("a"), Ok(Some(Symbol::Char('a'))));
        assert_eq!(symbol("\\."), Ok(Some(Symbol::SimpleEscape(b'.'))));
        assert_eq!(symbol("\\032"), Ok(Some(Symbol::DecimalEscape(32))));
        assert_eq!(symbol("\\255"), Ok(Some(Symbol::DecimalEscape(255))));
        assert_eq!(symbol("\\256"), Err(SymbolCharsError::BadEscape));
        assert_eq!(symbol("\\25"), Err(SymbolCharsError::ShortInput));
        assert_eq!(symbol("\\"), Err(SymbolCharsError::ShortInput));
    }

    #[test]
    fn symbol_octet_round_trip() {
        for ch in 0..=255u8 {
            assert_eq!(Symbol::from_octet(ch).into_octet(), Ok(ch));
        }
    }

    #[test]
    fn symbol_display() {
        assert_eq!(Symbol::Char('a').to_string(), "a");
        assert_eq!(Symbol::SimpleEscape(b'.').to_string(), "\\.");
        assert_eq!(Symbol::DecimalEscape(7).to_string(), "\\007");
    }
}
