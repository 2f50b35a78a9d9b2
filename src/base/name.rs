//! Domain names.
//!
//! This module provides the [`Name`] type, an owned, absolute domain name
//! stored in its uncompressed wire format. Reading a name from a message
//! resolves all compression pointers, so a decoded name never borrows from
//! the message it came from. Writing a name into a message optionally uses
//! the packet-wide [`NameCompressor`] to re-introduce compression.

use super::label::Label;
use super::scan::{Symbol, SymbolCharsError};
use super::wire::{BufferError, Composer, FormError, Parser};
use super::DnsError;
use core::{fmt, hash, str};
use std::collections::HashMap;

//------------ Name ----------------------------------------------------------

/// An absolute domain name.
///
/// The name is kept in uncompressed wire format: a sequence of labels, each
/// preceded by its length octet, terminated by the root label's zero octet.
/// The shortest name is the root itself, a single zero octet; the complete
/// name is never longer than 255 octets.
///
/// Names compare and hash ignoring the case of ASCII letters.
#[derive(Clone, Debug)]
pub struct Name {
    /// The wire format octets of the name.
    bytes: Vec<u8>,
}

impl Name {
    /// The maximum length of a name in wire format octets.
    pub const MAX_LEN: usize = 255;

    /// Creates the root name.
    pub fn root() -> Self {
        Name { bytes: vec![0] }
    }

    /// Creates a name from its text representation.
    ///
    /// This is what the `FromStr` impl does, except that it can also
    /// complete a relative name – one whose last character is not an
    /// unescaped dot – with the given origin. Without an origin, a
    /// relative name is taken as absolute, i.e., the missing trailing dot
    /// is implied.
    pub fn from_text(
        text: &str,
        origin: Option<&Name>,
    ) -> Result<Self, NameError> {
        if text == "." {
            return Ok(Self::root());
        }
        let mut bytes = Vec::new();
        let mut label = Vec::new();
        let mut absolute = false;
        let mut chars = text.chars();
        loop {
            match Symbol::from_chars(&mut chars)? {
                Some(Symbol::Char('.')) => {
                    Self::push_label(&mut bytes, &label)?;
                    label.clear();
                    // A trailing dot makes the name absolute. Anything
                    // after it starts a new label.
                    absolute = chars.as_str().is_empty();
                    if absolute {
                        break;
                    }
                }
                Some(sym) => {
                    label.push(sym.into_octet().map_err(|_| {
                        NameError(NameErrorKind::BadSymbol)
                    })?);
                    absolute = false;
                }
                None => break,
            }
        }
        if !label.is_empty() {
            Self::push_label(&mut bytes, &label)?;
        }
        if !absolute {
            match origin {
                Some(origin) => bytes.extend_from_slice(&origin.bytes),
                None => bytes.push(0),
            }
        } else {
            bytes.push(0);
        }
        if bytes.len() > Self::MAX_LEN {
            return Err(NameError(NameErrorKind::LongName));
        }
        Ok(Name { bytes })
    }

    /// Appends one label to a wire format buffer under construction.
    fn push_label(bytes: &mut Vec<u8>, label: &[u8]) -> Result<(), NameError> {
        if label.is_empty() {
            return Err(NameError(NameErrorKind::EmptyLabel));
        }
        if label.len() > Label::MAX_LEN {
            return Err(NameError(NameErrorKind::LongLabel));
        }
        bytes.push(label.len() as u8);
        bytes.extend_from_slice(label);
        Ok(())
    }

    /// Returns whether the name is the root name.
    pub fn is_root(&self) -> bool {
        self.bytes.len() == 1
    }

    /// Returns the length of the name in wire format octets.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns the wire format octets of the name.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns an iterator over the labels of the name.
    ///
    /// The final root label is not included.
    pub fn iter_labels(&self) -> LabelIter {
        LabelIter { slice: &self.bytes }
    }

    /// Returns the number of labels, not counting the root label.
    pub fn label_count(&self) -> usize {
        self.iter_labels().count()
    }

    /// Returns the first label or the root label for the root name.
    pub fn first_label(&self) -> &Label {
        let len = self.bytes[0] as usize;
        Label::from_slice_unchecked(&self.bytes[1..1 + len])
    }

    /// Returns the name with its first label removed.
    ///
    /// Returns `None` for the root name.
    pub fn parent(&self) -> Option<Name> {
        if self.is_root() {
            return None;
        }
        let len = self.bytes[0] as usize;
        Some(Name {
            bytes: self.bytes[1 + len..].into(),
        })
    }

    /// Returns whether `base` is identical to or a parent of this name.
    pub fn ends_with(&self, base: &Name) -> bool {
        let mut idx = 0;
        loop {
            let tail = &self.bytes[idx..];
            if tail.eq_ignore_ascii_case(&base.bytes) {
                return true;
            }
            if tail[0] == 0 {
                return false;
            }
            idx += tail[0] as usize + 1;
        }
    }
}

/// # Wire Format
///
impl Name {
    /// Takes a name from the beginning of a message parser.
    ///
    /// The name may be compressed. Pointers are followed through
    /// [`Parser::seek`]; a set of offsets already jumped to guards against
    /// pointer loops. When the name is done, the parser is positioned right
    /// after the name's last octet in its original location, i.e., just
    /// past the first pointer if there was one.
    pub fn parse(parser: &mut Parser) -> Result<Self, DnsError> {
        let mut bytes = Vec::new();
        let mut visited = Vec::new();
        let mut resume = None;
        loop {
            let ltype = parser.parse_u8()?;
            match ltype {
                0 => break,
                1..=0x3F => {
                    let label = parser.parse_octets(ltype as usize)?;
                    if bytes.len() + label.len() + 2 > Self::MAX_LEN {
                        return Err(
                            FormError::new("long domain name").into()
                        );
                    }
                    bytes.push(ltype);
                    bytes.extend_from_slice(label);
                }
                0xC0..=0xFF => {
                    let target = usize::from(ltype & 0x3F) << 8
                        | usize::from(parser.parse_u8()?);
                    if resume.is_none() {
                        resume = Some(parser.pos());
                    }
                    if target >= parser.len() {
                        return Err(BufferError::BadPointer.into());
                    }
                    if visited.contains(&target) {
                        return Err(BufferError::PointerCycle.into());
                    }
                    visited.push(target);
                    parser.seek(target)?;
                }
                _ => {
                    return Err(
                        FormError::new("reserved label type").into()
                    );
                }
            }
        }
        if let Some(pos) = resume {
            parser.seek(pos)?;
        }
        bytes.push(0);
        Ok(Name { bytes })
    }

    /// Appends the uncompressed wire format of the name to the target.
    pub fn compose(&self, target: &mut Composer) {
        target.append_slice(&self.bytes)
    }

    /// Appends the name to the target, compressing it where possible.
    ///
    /// The longest suffix of the name already known to the compressor is
    /// replaced by a pointer; all labels before it are written out and
    /// their suffixes recorded for later names.
    pub fn compose_compressed(
        &self,
        target: &mut Composer,
        compressor: &mut NameCompressor,
    ) {
        let mut idx = 0;
        while self.bytes[idx] != 0 {
            match compressor.get(&self.bytes[idx..]) {
                Some(pos) => {
                    target.append_u16(0xC000 | pos);
                    return;
                }
                None => {
                    compressor.insert(&self.bytes[idx..], target.pos());
                    let len = usize::from(self.bytes[idx]);
                    target.append_slice(&self.bytes[idx..idx + len + 1]);
                    idx += len + 1;
                }
            }
        }
        target.append_u8(0)
    }
}

//--- FromStr

impl str::FromStr for Name {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s, None)
    }
}

//--- PartialEq and Eq

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.bytes.eq_ignore_ascii_case(&other.bytes)
    }
}

impl Eq for Name {}

//--- Hash

impl hash::Hash for Name {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        for ch in self.bytes.iter() {
            ch.to_ascii_lowercase().hash(state)
        }
    }
}

//--- Display

impl fmt::Display for Name {
    /// Formats the name in its zone file form with a trailing dot.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_root() {
            return f.write_str(".");
        }
        for label in self.iter_labels() {
            write!(f, "{}.", label)?;
        }
        Ok(())
    }
}

//------------ LabelIter -----------------------------------------------------

/// An iterator over the labels of a name.
#[derive(Clone, Debug)]
pub struct LabelIter<'a> {
    /// The remaining wire format octets.
    slice: &'a [u8],
}

impl<'a> Iterator for LabelIter<'a> {
    type Item = &'a Label;

    fn next(&mut self) -> Option<Self::Item> {
        let len = usize::from(*self.slice.first()?);
        if len == 0 {
            return None;
        }
        let (label, tail) = self.slice[1..].split_at(len);
        self.slice = tail;
        Some(Label::from_slice_unchecked(label))
    }
}

//------------ NameCompressor ------------------------------------------------

/// The name compression state of a message being composed.
///
/// The compressor maps name suffixes to the offset where they were first
/// written. It lives for exactly one packet: [`Message::pack`] creates one
/// and threads it through all names of the message. Suffixes are keyed by
/// their canonical, i.e., lowercased, wire format. Offsets that do not fit
/// into the 14 bits of a compression pointer are never recorded, so names
/// written late in a large message simply stay uncompressed.
///
/// [`Message::pack`]: super::message::Message::pack
#[derive(Debug, Default)]
pub struct NameCompressor {
    /// The mapping from canonical suffixes to their offsets.
    map: HashMap<Vec<u8>, u16>,
}

impl NameCompressor {
    /// Creates a new, empty compressor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the offset a suffix was first written at, if any.
    fn get(&self, suffix: &[u8]) -> Option<u16> {
        self.map.get(&suffix.to_ascii_lowercase()).copied()
    }

    /// Records a suffix as present at the given offset.
    fn insert(&mut self, suffix: &[u8], pos: usize) {
        if pos < 0x4000 {
            self.map.insert(suffix.to_ascii_lowercase(), pos as u16);
        }
    }
}

//============ Error Types ===================================================

//------------ NameError -----------------------------------------------------

/// A name could not be created from its text form.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NameError(NameErrorKind);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum NameErrorKind {
    /// A label was empty, as in `"a..b"`.
    EmptyLabel,

    /// A label was longer than 63 octets.
    LongLabel,

    /// The complete name was longer than 255 octets.
    LongName,

    /// An escape sequence was broken or a character not usable in a name.
    BadSymbol,
}

//--- From

impl From<SymbolCharsError> for NameError {
    fn from(_: SymbolCharsError) -> Self {
        NameError(NameErrorKind::BadSymbol)
    }
}

//--- Display and Error

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self.0 {
            NameErrorKind::EmptyLabel => "empty label",
            NameErrorKind::LongLabel => "label too long",
            NameErrorKind::LongName => "name too long",
            NameErrorKind::BadSymbol => "illegal character or escape",
        })
    }
}

impl std::error::Error for NameError {}

//============ Testing =======================================================
