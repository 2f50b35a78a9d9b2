//! The header of a DNS message.
//!
//! Each DNS message starts with a twelve octet long header section. The
//! first four octets contain the message ID, opcode, rcode, and the various
//! flags; the remaining eight the number of entries in the four sections
//! that follow. Content and format are defined in section 4.1.1 of
//! [RFC 1035].
//!
//! Only the first four octets are kept by [`Header`]. The section counts
//! are not stored anywhere: they are derived from the actual section
//! lengths when a message is written and only checked when one is read.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

use super::iana::{Opcode, Rcode};
use super::wire::{BufferError, Composer, Parser};
use core::fmt;

//------------ Header --------------------------------------------------------

/// The first part of the header of a DNS message.
///
/// This type represents the information contained in the first four octets
/// of the header: the message ID, opcode, rcode, and the various flags. It
/// keeps those four octets in wire representation, i.e., in network byte
/// order. The data is layed out like this:
///
/// ```text
///                                 1  1  1  1  1  1
///   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                      ID                       |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |QR|   Opcode  |AA|TC|RD|RA|Z |AD|CD|   RCODE   |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
///
/// The basic structure and most of the fields are defined in [RFC 1035],
/// except for the AD and CD flags, which are defined in [RFC 4035].
///
/// [RFC 1035]: https://tools.ietf.org/html/rfc1035
/// [RFC 4035]: https://tools.ietf.org/html/rfc4035
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Header {
    /// The actual header in its wire format representation.
    ///
    /// This means that the ID field is in big endian.
    inner: [u8; 4],
}

/// # Creation and Conversion
///
impl Header {
    /// Creates a new header.
    ///
    /// The new header has all fields as either zero or false. Thus, the
    /// opcode will be [`Opcode::Query`] and the response code will be
    /// [`Rcode::NoError`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a reference to the underlying octets.
    pub fn as_slice(&self) -> &[u8] {
        &self.inner
    }
}

/// # Field Access
///
impl Header {
    /// Returns the value of the ID field.
    ///
    /// The ID field is an identifier chosen by whoever created a query
    /// and is copied into a response by a server. It allows matching
    /// incoming responses to their queries.
    pub fn id(self) -> u16 {
        u16::from_be_bytes([self.inner[0], self.inner[1]])
    }

    /// Sets the value of the ID field.
    pub fn set_id(&mut self, value: u16) {
        self.inner[..2].copy_from_slice(&value.to_be_bytes())
    }

    /// Sets the value of the ID field to a randomly chosen number.
    ///
    /// When choosing an ID for an outgoing query, make sure it is random
    /// to avoid spoofing through guessing the message ID.
    pub fn set_random_id(&mut self) {
        self.set_id(rand::random())
    }

    /// Returns whether the QR bit is set.
    ///
    /// The bit specifies whether the message is a query (`false`) or a
    /// response (`true`).
    pub fn qr(self) -> bool {
        self.get_bit(2, 7)
    }

    /// Sets the value of the QR bit.
    pub fn set_qr(&mut self, set: bool) {
        self.set_bit(2, 7, set)
    }

    /// Returns the value of the Opcode field.
    ///
    /// This field specifies the kind of query a message contains. See
    /// the [`Opcode`] type for more information on the possible values and
    /// their meaning. Normal queries have the variant [`Opcode::Query`]
    /// which is also the default value when creating a new header.
    pub fn opcode(self) -> Opcode {
        Opcode::from_int((self.inner[2] >> 3) & 0x0F)
    }

    /// Sets the value of the opcode field.
    pub fn set_opcode(&mut self, opcode: Opcode) {
        self.inner[2] = self.inner[2] & 0x87 | (opcode.to_int() << 3);
    }

    /// Returns whether the AA bit is set.
    ///
    /// Using this bit, a name server generating a response states whether
    /// it is authoritative for the requested domain name.
    pub fn aa(self) -> bool {
        self.get_bit(2, 2)
    }

    /// Sets the value of the AA bit.
    pub fn set_aa(&mut self, set: bool) {
        self.set_bit(2, 2, set)
    }

    /// Returns whether the TC bit is set.
    ///
    /// The *truncation* bit is set if there was more data available then
    /// fit into the message.
    pub fn tc(self) -> bool {
        self.get_bit(2, 1)
    }

    /// Sets the value of the TC bit.
    pub fn set_tc(&mut self, set: bool) {
        self.set_bit(2, 1, set)
    }

    /// Returns whether the RD bit is set.
    ///
    /// The *recursion desired* bit may be set in a query to ask the name
    /// server to attempt to recursively gather a response.
    pub fn rd(self) -> bool {
        self.get_bit(2, 0)
    }

    /// Sets the value of the RD bit.
    pub fn set_rd(&mut self, set: bool) {
        self.set_bit(2, 0, set)
    }

    /// Returns whether the RA bit is set.
    ///
    /// In a response, the *recursion available* bit denotes whether the
    /// responding name server supports recursion.
    pub fn ra(self) -> bool {
        self.get_bit(3, 7)
    }

    /// Sets the value of the RA bit.
    pub fn set_ra(&mut self, set: bool) {
        self.set_bit(3, 7, set)
    }

    /// Returns whether the reserved bit is set.
    ///
    /// This bit must be `false` in all queries and responses.
    pub fn z(self) -> bool {
        self.get_bit(3, 6)
    }

    /// Sets the value of the reserved bit.
    pub fn set_z(&mut self, set: bool) {
        self.set_bit(3, 6, set)
    }

    /// Returns whether the AD bit is set.
    ///
    /// The *authentic data* bit is used by security-aware recursive name
    /// servers to indicate that data was authenticated through DNSSEC.
    pub fn ad(self) -> bool {
        self.get_bit(3, 5)
    }

    /// Sets the value of the AD bit.
    pub fn set_ad(&mut self, set: bool) {
        self.set_bit(3, 5, set)
    }

    /// Returns whether the CD bit is set.
    ///
    /// The *checking disabled* bit asks a security-aware resolver not to
    /// perform DNSSEC validation.
    pub fn cd(self) -> bool {
        self.get_bit(3, 4)
    }

    /// Sets the value of the CD bit.
    pub fn set_cd(&mut self, set: bool) {
        self.set_bit(3, 4, set)
    }

    /// Returns the value of the RCODE field.
    ///
    /// The *response code* is used in a response to indicate what happened
    /// when processing the query. See the [`Rcode`] type for information on
    /// possible values and their meaning.
    pub fn rcode(self) -> Rcode {
        Rcode::from_int(self.inner[3] & 0x0F)
    }

    /// Sets the value of the RCODE field.
    pub fn set_rcode(&mut self, rcode: Rcode) {
        self.inner[3] = self.inner[3] & 0xF0 | (rcode.to_int() & 0x0F);
    }

    /// Returns all flags contained in the header.
    pub fn flags(self) -> Flags {
        Flags {
            qr: self.qr(),
            aa: self.aa(),
            tc: self.tc(),
            rd: self.rd(),
            ra: self.ra(),
            z: self.z(),
            ad: self.ad(),
            cd: self.cd(),
        }
    }

    //--- Internal helpers

    /// Returns the value of the bit at the given position.
    ///
    /// The argument `offset` gives the byte offset of the flag octet and
    /// `bit` gives the number of the bit with the most significant bit
    /// being 7.
    fn get_bit(self, offset: usize, bit: usize) -> bool {
        self.inner[offset] & (1 << bit) != 0
    }

    /// Sets or resets the given bit.
    fn set_bit(&mut self, offset: usize, bit: usize, set: bool) {
        if set {
            self.inner[offset] |= 1 << bit
        } else {
            self.inner[offset] &= !(1 << bit)
        }
    }
}

/// # Wire Format
///
impl Header {
    /// Takes the flag part of a header from the beginning of a parser.
    pub fn parse(parser: &mut Parser) -> Result<Self, BufferError> {
        let mut inner = [0; 4];
        inner.copy_from_slice(parser.parse_octets(4)?);
        Ok(Header { inner })
    }

    /// Appends the flag part of the header to the target.
    pub fn compose(&self, target: &mut Composer) {
        target.append_slice(&self.inner)
    }
}

//------------ Flags ---------------------------------------------------------

/// The flag bits of a message header.
///
/// This is a virtual field composed of all the flag bits of the header.
/// Its main use is the `Display` impl which prints the mnemonics of all
/// set flags lowercased and separated by spaces, the way `dig` prints its
/// `;; flags:` line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Flags {
    /// The `QR` bit: query or response.
    pub qr: bool,

    /// The `AA` bit: authoritative answer.
    pub aa: bool,

    /// The `TC` bit: message truncated.
    pub tc: bool,

    /// The `RD` bit: recursion desired.
    pub rd: bool,

    /// The `RA` bit: recursion available.
    pub ra: bool,

    /// The reserved bit.
    pub z: bool,

    /// The `AD` bit: authentic data.
    pub ad: bool,

    /// The `CD` bit: checking disabled.
    pub cd: bool,
}

impl Flags {
    /// Creates new flags with all bits cleared.
    pub fn new() -> Self {
        Self::default()
    }
}

//--- Display

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut sep = "";
        for (flag, mnemonic) in [
            (self.qr, "qr"),
            (self.aa, "aa"),
            (self.tc, "tc"),
            (self.rd, "rd"),
            (self.ra, "ra"),
            (self.z, "z"),
            (self.ad, "ad"),
            (self.cd, "cd"),
        ] {
            if flag {
                f.write_str(sep)?;
                f.write_str(mnemonic)?;
                sep = " ";
            }
        }
        Ok(())
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn field_access() {
        let mut header = Header::new();
        assert_eq!(header.opcode(), Opcode::Query);
        assert_eq!(header.rcode(), Rcode::NoError);

        header.set_id(0xd5ad);
        header.set_qr(true);
        header.set_rd(true);
        header.set_ra(true);
        header.set_rcode(Rcode::NXDomain);
        assert_eq!(header.id(), 0xd5ad);
        assert!(header.qr());
        assert!(!header.aa());
        assert!(header.rd());
        assert!(header.ra());
        assert_eq!(header.rcode(), Rcode::NXDomain);
        assert_eq!(header.as_slice(), b"\xd5\xad\x81\x83");

        header.set_qr(false);
        assert_eq!(header.as_slice(), b"\xd5\xad\x01\x83");
    }

    #[test]
    fn opcode_round_trip() {
        let mut header = Header::new();
        header.set_rd(true);
        header.set_opcode(Opcode::Update);
        assert_eq!(header.opcode(), Opcode::Update);
        assert!(header.rd());
        header.set_opcode(Opcode::Query);
        assert_eq!(header.opcode(), Opcode::Query);
        assert!(header.rd());
    }

    #[test]
    fn flags_display() {
        let mut header = Header::new();
        header.set_qr(true);
        header.set_aa(true);
        header.set_rd(true);
        header.set_ra(true);
        assert_eq!(header.flags().to_string(), "qr aa rd ra");
        assert_eq!(Header::new().flags().to_string(), "");
    }

    #[test]
    fn wire_round_trip() {
        let mut parser = Parser::new(b"\x12\x34\x85\x00");
        let header = Header::parse(&mut parser).unwrap();
        assert_eq!(header.id(), 0x1234);
        assert!(header.qr());
        assert!(header.aa());
        assert!(header.rd());
        let mut target = Composer::new();
        header.compose(&mut target);
        assert_eq!(target.as_slice(), b"\x12\x34\x85\x00");
    }
}
