//! Decoding and encoding of Base 16 a.k.a. hex digits.
//!
//! The Base 16 encoding is defined in [RFC 4648]. It really is just a
//! normal hex-encoding using the (case-insensitive) letters 'A' to 'F' as
//! additional values for the digits.
//!
//! [RFC 4648]: https://tools.ietf.org/html/rfc4648

use core::fmt;

//------------ Re-exports ----------------------------------------------------

pub use super::base64::DecodeError;

//------------ Convenience Functions -----------------------------------------

/// Decodes a string with Base 16 encoded data.
///
/// The function attempts to decode the entire string and returns the result
/// as a vec. Whitespace is not allowed; the zone parsers join multi-token
/// hex fields before calling this.
pub fn decode(s: &str) -> Result<Vec<u8>, DecodeError> {
    let mut decoder = Decoder::new();
    for ch in s.chars() {
        decoder.push(ch)?;
    }
    decoder.finalize()
}

/// Encodes binary data in Base 16 and writes it into a format stream.
///
/// This function is intended to be used in implementations of formatting
/// traits. The hex digits are written in upper case, the way `dig` prints
/// digests.
pub fn display<B, W>(bytes: &B, f: &mut W) -> fmt::Result
where
    B: AsRef<[u8]> + ?Sized,
    W: fmt::Write,
{
    for &ch in bytes.as_ref() {
        write!(f, "{:02X}", ch)?;
    }
    Ok(())
}

/// Encodes binary data in Base 16 and returns the encoded data as a string.
pub fn encode_string<B: AsRef<[u8]> + ?Sized>(bytes: &B) -> String {
    let mut res = String::with_capacity(bytes.as_ref().len() * 2);
    display(bytes, &mut res).unwrap();
    res
}

/// Returns a placeholder value that implements `Display` for encoded data.
pub fn encode_display<Octets: AsRef<[u8]>>(
    octets: &Octets,
) -> impl fmt::Display + '_ {
    struct Display<'a>(&'a [u8]);

    impl<'a> fmt::Display for Display<'a> {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            display(self.0, f)
        }
    }

    Display(octets.as_ref())
}

//------------ Decoder -------------------------------------------------------

/// A Base 16 decoder.
///
/// This type keeps all the state for decoding a sequence of characters
/// representing data encoded in Base 16. Upon success, the decoder returns
/// the decoded data.
pub struct Decoder {
    /// A buffer for the first half of an octet.
    buf: Option<u8>,

    /// The target or an error if something went wrong.
    target: Result<Vec<u8>, DecodeError>,
}

impl Decoder {
    /// Creates a new, empty decoder.
    #[must_use]
    pub fn new() -> Self {
        Decoder {
            buf: None,
            target: Ok(Vec::new()),
        }
    }

    /// Finalizes decoding and returns the decoded data.
    pub fn finalize(self) -> Result<Vec<u8>, DecodeError> {
        if self.buf.is_some() {
            return Err(DecodeError::ShortInput);
        }
        self.target
    }

    /// Decodes one more character of data.
    ///
    /// Returns an error as soon as the encoded data is determined to be
    /// illegal. It is okay to push more data after the first error. The
    /// method will just keep returning errors.
    pub fn push(&mut self, ch: char) -> Result<(), DecodeError> {
        let value = match ch.to_digit(16) {
            Some(value) => value as u8,
            None => {
                self.target = Err(DecodeError::IllegalChar(ch));
                return Err(DecodeError::IllegalChar(ch));
            }
        };
        match self.buf.take() {
            Some(first) => {
                if let Ok(ref mut target) = self.target {
                    target.push(first << 4 | value)
                }
            }
            None => self.buf = Some(value),
        }
        match self.target {
            Ok(_) => Ok(()),
            Err(err) => Err(err),
        }
    }
}

//--- Default

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode_str() {
        assert_eq!(decode("").unwrap(), b"");
        assert_eq!(decode("66").unwrap(), b"f");
        assert_eq!(decode("666f6F").unwrap(), b"foo");
        assert_eq!(decode("666"), Err(DecodeError::ShortInput));
        assert_eq!(decode("6 6"), Err(DecodeError::IllegalChar(' ')));
    }

    #[test]
    fn test_display() {
        assert_eq!(encode_string(b""), "");
        assert_eq!(encode_string(b"foo"), "666F6F");
        assert_eq!(encode_string(b"\x00\xff"), "00FF");
    }
}
