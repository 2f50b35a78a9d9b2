//! Record data from [RFC 4034]: DS, RRSIG, NSEC, and DNSKEY records.
//!
//! This RFC defines the record types for DNSSEC. The records are carried
//! and round-tripped faithfully, but no signatures are generated or
//! validated here.
//!
//! [RFC 4034]: https://tools.ietf.org/html/rfc4034

use crate::base::iana::Rtype;
use crate::base::name::Name;
use crate::base::scan::{ScanError, Tokens};
use crate::base::wire::{Composer, FormError, Parser};
use crate::base::DnsError;
use crate::utils::{base16, base64};
use bytes::Bytes;
use core::str::FromStr;
use core::{cmp, fmt};
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};

//------------ Ds ------------------------------------------------------------

/// DS record data.
///
/// The DS record appears in a zone's parent and references a DNSKEY of the
/// zone, forming the chain of trust across the delegation.
///
/// The DS record type is defined in [RFC 4034, section 5][1].
///
/// [1]: https://tools.ietf.org/html/rfc4034#section-5
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Ds {
    key_tag: u16,
    algorithm: u8,
    digest_type: u8,
    digest: Bytes,
}

impl Ds {
    /// Creates new DS record data from its components.
    pub fn new(
        key_tag: u16,
        algorithm: u8,
        digest_type: u8,
        digest: Bytes,
    ) -> Self {
        Ds {
            key_tag,
            algorithm,
            digest_type,
            digest,
        }
    }

    /// The key tag of the referenced DNSKEY.
    pub fn key_tag(&self) -> u16 {
        self.key_tag
    }

    /// The algorithm of the referenced DNSKEY.
    pub fn algorithm(&self) -> u8 {
        self.algorithm
    }

    /// The algorithm used to create the digest.
    pub fn digest_type(&self) -> u8 {
        self.digest_type
    }

    /// The digest of the referenced DNSKEY.
    pub fn digest(&self) -> &Bytes {
        &self.digest
    }

    pub fn parse(parser: &mut Parser, rdlen: u16) -> Result<Self, DnsError> {
        if rdlen < 4 {
            return Err(FormError::new("short DS record data").into());
        }
        Ok(Self::new(
            parser.parse_u16()?,
            parser.parse_u8()?,
            parser.parse_u8()?,
            Bytes::copy_from_slice(
                parser.parse_octets(usize::from(rdlen) - 4)?,
            ),
        ))
    }

    pub fn compose(&self, target: &mut Composer) {
        target.append_u16(self.key_tag);
        target.append_u8(self.algorithm);
        target.append_u8(self.digest_type);
        target.append_slice(&self.digest)
    }

    pub fn scan(tokens: &mut Tokens) -> Result<Self, ScanError> {
        Ok(Self::new(
            tokens.scan_int()?,
            tokens.scan_int()?,
            tokens.scan_int()?,
            tokens.scan_remaining_hex()?.into(),
        ))
    }
}

//--- Display

impl fmt::Display for Ds {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} ",
            self.key_tag, self.algorithm, self.digest_type
        )?;
        base16::display(&self.digest, f)
    }
}

//------------ Dnskey --------------------------------------------------------

/// DNSKEY record data.
///
/// The DNSKEY record holds a public key a zone signs its records with.
///
/// The DNSKEY record type is defined in [RFC 4034, section 2][1].
///
/// [1]: https://tools.ietf.org/html/rfc4034#section-2
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Dnskey {
    flags: u16,
    protocol: u8,
    algorithm: u8,
    public_key: Bytes,
}

impl Dnskey {
    /// Creates new DNSKEY record data from its components.
    pub fn new(
        flags: u16,
        protocol: u8,
        algorithm: u8,
        public_key: Bytes,
    ) -> Self {
        Dnskey {
            flags,
            protocol,
            algorithm,
            public_key,
        }
    }

    /// The key flags; bit 7 marks a zone key, bit 15 a secure entry point.
    pub fn flags(&self) -> u16 {
        self.flags
    }

    /// The protocol field; always 3 for DNSSEC.
    pub fn protocol(&self) -> u8 {
        self.protocol
    }

    /// The cryptographic algorithm of the key.
    pub fn algorithm(&self) -> u8 {
        self.algorithm
    }

    /// The public key material.
    pub fn public_key(&self) -> &Bytes {
        &self.public_key
    }

    pub fn parse(parser: &mut Parser, rdlen: u16) -> Result<Self, DnsError> {
        if rdlen < 4 {
            return Err(FormError::new("short DNSKEY record data").into());
        }
        Ok(Self::new(
            parser.parse_u16()?,
            parser.parse_u8()?,
            parser.parse_u8()?,
            Bytes::copy_from_slice(
                parser.parse_octets(usize::from(rdlen) - 4)?,
            ),
        ))
    }

    pub fn compose(&self, target: &mut Composer) {
        target.append_u16(self.flags);
        target.append_u8(self.protocol);
        target.append_u8(self.algorithm);
        target.append_slice(&self.public_key)
    }

    pub fn scan(tokens: &mut Tokens) -> Result<Self, ScanError> {
        Ok(Self::new(
            tokens.scan_int()?,
            tokens.scan_int()?,
            tokens.scan_int()?,
            tokens.scan_remaining_base64()?.into(),
        ))
    }
}

//--- Display

impl fmt::Display for Dnskey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {} ", self.flags, self.protocol, self.algorithm)?;
        base64::display(&self.public_key, f)
    }
}

//------------ Timestamp -----------------------------------------------------

/// The expiration and inception times of an RRSIG record.
///
/// On the wire this is the number of seconds since the Unix epoch as an
/// unsigned 32 bit integer; the value wraps around every 136 years. The
/// presentation format is the calendar form `YYYYMMDDHHmmSS` in UTC. When
/// scanning, a plain integer of up to ten digits is accepted as well.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Timestamp(u32);

impl Timestamp {
    /// Creates a timestamp from a raw integer value.
    pub fn from_int(value: u32) -> Self {
        Timestamp(value)
    }

    /// Returns the timestamp as a raw integer.
    pub fn to_int(self) -> u32 {
        self.0
    }

    pub fn parse(parser: &mut Parser) -> Result<Self, DnsError> {
        parser.parse_u32().map(Timestamp).map_err(Into::into)
    }

    pub fn compose(self, target: &mut Composer) {
        target.append_u32(self.0)
    }
}

//--- From and FromStr

impl From<u32> for Timestamp {
    fn from(value: u32) -> Self {
        Timestamp(value)
    }
}

impl FromStr for Timestamp {
    type Err = IllegalSignatureTime;

    /// Parses a timestamp value from a string.
    ///
    /// The presentation format can either be the integer value or a
    /// specific date in `YYYYMMDDHHmmSS` format.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        if !src.is_ascii() {
            return Err(IllegalSignatureTime(()));
        }
        if src.len() == 14 {
            let year = i32::from_str(&src[0..4])
                .map_err(|_| IllegalSignatureTime(()))?;
            let month = Month::try_from(
                u8::from_str(&src[4..6])
                    .map_err(|_| IllegalSignatureTime(()))?,
            )
            .map_err(|_| IllegalSignatureTime(()))?;
            let day = u8::from_str(&src[6..8])
                .map_err(|_| IllegalSignatureTime(()))?;
            let hour = u8::from_str(&src[8..10])
                .map_err(|_| IllegalSignatureTime(()))?;
            let minute = u8::from_str(&src[10..12])
                .map_err(|_| IllegalSignatureTime(()))?;
            let second = u8::from_str(&src[12..14])
                .map_err(|_| IllegalSignatureTime(()))?;
            let timestamp = PrimitiveDateTime::new(
                Date::from_calendar_date(year, month, day)
                    .map_err(|_| IllegalSignatureTime(()))?,
                Time::from_hms(hour, minute, second)
                    .map_err(|_| IllegalSignatureTime(()))?,
            )
            .assume_utc()
            .unix_timestamp();
            u32::try_from(timestamp)
                .map(Timestamp)
                .map_err(|_| IllegalSignatureTime(()))
        } else {
            u32::from_str(src)
                .map(Timestamp)
                .map_err(|_| IllegalSignatureTime(()))
        }
    }
}

//--- Display

impl fmt::Display for Timestamp {
    /// Formats the timestamp in the `YYYYMMDDHHmmSS` calendar form.
    ///
    /// The conversion is done in UTC and is independent of any locale.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let time = OffsetDateTime::from_unix_timestamp(i64::from(self.0))
            .map_err(|_| fmt::Error)?;
        write!(
            f,
            "{:04}{:02}{:02}{:02}{:02}{:02}",
            time.year(),
            time.month() as u8,
            time.day(),
            time.hour(),
            time.minute(),
            time.second()
        )
    }
}

//------------ Rrsig ---------------------------------------------------------

/// RRSIG record data.
///
/// The RRSIG record holds the signature over one RRset of the zone. The
/// signer name is never compressed.
///
/// The RRSIG record type is defined in [RFC 4034, section 3][1].
///
/// [1]: https://tools.ietf.org/html/rfc4034#section-3
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Rrsig {
    type_covered: Rtype,
    algorithm: u8,
    labels: u8,
    original_ttl: u32,
    expiration: Timestamp,
    inception: Timestamp,
    key_tag: u16,
    signer_name: Name,
    signature: Bytes,
}

impl Rrsig {
    /// Creates new RRSIG record data from its components.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        type_covered: Rtype,
        algorithm: u8,
        labels: u8,
        original_ttl: u32,
        expiration: Timestamp,
        inception: Timestamp,
        key_tag: u16,
        signer_name: Name,
        signature: Bytes,
    ) -> Self {
        Rrsig {
            type_covered,
            algorithm,
            labels,
            original_ttl,
            expiration,
            inception,
            key_tag,
            signer_name,
            signature,
        }
    }

    /// The record type of the RRset covered by this signature.
    pub fn type_covered(&self) -> Rtype {
        self.type_covered
    }

    /// The algorithm used to create the signature.
    pub fn algorithm(&self) -> u8 {
        self.algorithm
    }

    /// The number of labels of the owner name of the signed RRset.
    pub fn labels(&self) -> u8 {
        self.labels
    }

    /// The TTL of the covered RRset as it appears in the zone.
    pub fn original_ttl(&self) -> u32 {
        self.original_ttl
    }

    /// The time past which the signature must not be used anymore.
    pub fn expiration(&self) -> Timestamp {
        self.expiration
    }

    /// The time before which the signature must not be used.
    pub fn inception(&self) -> Timestamp {
        self.inception
    }

    /// The key tag of the DNSKEY the signature was created with.
    pub fn key_tag(&self) -> u16 {
        self.key_tag
    }

    /// The name of the zone that owns the signing DNSKEY.
    pub fn signer_name(&self) -> &Name {
        &self.signer_name
    }

    /// The cryptographic signature.
    pub fn signature(&self) -> &Bytes {
        &self.signature
    }

    pub fn parse(parser: &mut Parser, rdlen: u16) -> Result<Self, DnsError> {
        let start = parser.pos();
        let type_covered = Rtype::parse(parser)?;
        let algorithm = parser.parse_u8()?;
        let labels = parser.parse_u8()?;
        let original_ttl = parser.parse_u32()?;
        let expiration = Timestamp::parse(parser)?;
        let inception = Timestamp::parse(parser)?;
        let key_tag = parser.parse_u16()?;
        let signer_name = Name::parse(parser)?;
        let consumed = parser.pos() - start;
        let sig_len = usize::from(rdlen)
            .checked_sub(consumed)
            .ok_or_else(|| FormError::new("short RRSIG record data"))?;
        let signature =
            Bytes::copy_from_slice(parser.parse_octets(sig_len)?);
        Ok(Self::new(
            type_covered,
            algorithm,
            labels,
            original_ttl,
            expiration,
            inception,
            key_tag,
            signer_name,
            signature,
        ))
    }

    pub fn compose(&self, target: &mut Composer) {
        self.type_covered.compose(target);
        target.append_u8(self.algorithm);
        target.append_u8(self.labels);
        target.append_u32(self.original_ttl);
        self.expiration.compose(target);
        self.inception.compose(target);
        target.append_u16(self.key_tag);
        self.signer_name.compose(target);
        target.append_slice(&self.signature)
    }

    pub fn scan(tokens: &mut Tokens) -> Result<Self, ScanError> {
        let type_covered = tokens.scan_rtype()?;
        let algorithm = tokens.scan_int()?;
        let labels = tokens.scan_int()?;
        let original_ttl = tokens.scan_time()?;
        let expiration = scan_timestamp(tokens)?;
        let inception = scan_timestamp(tokens)?;
        let key_tag = tokens.scan_int()?;
        let signer_name = tokens.scan_name()?;
        let signature = tokens.scan_remaining_base64()?.into();
        Ok(Self::new(
            type_covered,
            algorithm,
            labels,
            original_ttl,
            expiration,
            inception,
            key_tag,
            signer_name,
            signature,
        ))
    }
}

/// Scans a signature time token.
fn scan_timestamp(tokens: &mut Tokens) -> Result<Timestamp, ScanError> {
    tokens
        .next_token()?
        .text
        .parse()
        .map_err(|_| ScanError::custom("illegal signature time"))
}

//--- Display

impl fmt::Display for Rrsig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {} {} ",
            self.type_covered,
            self.algorithm,
            self.labels,
            self.original_ttl,
            self.expiration,
            self.inception,
            self.key_tag,
            self.signer_name
        )?;
        base64::display(&self.signature, f)
    }
}

//------------ Nsec ----------------------------------------------------------

/// NSEC record data.
///
/// The NSEC record proves the non-existence of names and record types: it
/// names the next owner name in canonical zone order and lists the record
/// types present at its own owner. The next name is never compressed.
///
/// The NSEC record type is defined in [RFC 4034, section 4][1].
///
/// [1]: https://tools.ietf.org/html/rfc4034#section-4
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Nsec {
    next_name: Name,
    types: RtypeBitmap,
}

impl Nsec {
    /// Creates new NSEC record data from its components.
    pub fn new(next_name: Name, types: RtypeBitmap) -> Self {
        Nsec { next_name, types }
    }

    /// The next owner name in canonical zone order.
    pub fn next_name(&self) -> &Name {
        &self.next_name
    }

    /// The record types present at the record's owner name.
    pub fn types(&self) -> &RtypeBitmap {
        &self.types
    }

    pub fn parse(parser: &mut Parser, rdlen: u16) -> Result<Self, DnsError> {
        let start = parser.pos();
        let next_name = Name::parse(parser)?;
        let bitmap_len = usize::from(rdlen)
            .checked_sub(parser.pos() - start)
            .ok_or_else(|| FormError::new("short NSEC record data"))?;
        let types = RtypeBitmap::parse(parser, bitmap_len)?;
        Ok(Self::new(next_name, types))
    }

    pub fn compose(&self, target: &mut Composer) {
        self.next_name.compose(target);
        self.types.compose(target)
    }

    pub fn scan(tokens: &mut Tokens) -> Result<Self, ScanError> {
        let next_name = tokens.scan_name()?;
        let mut types = Vec::new();
        while !tokens.is_done() {
            types.push(tokens.scan_rtype()?);
        }
        Ok(Self::new(next_name, RtypeBitmap::new(types)))
    }
}

//--- Display

impl fmt::Display for Nsec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.next_name, self.types)
    }
}

//------------ RtypeBitmap ---------------------------------------------------

/// The type bitmap of an NSEC record.
///
/// On the wire the present record types are grouped into windows of 256
/// types each: the window number is the high octet of the type value, the
/// window's bitmap covers the low octet, one bit per type, most significant
/// bit first. Windows appear in increasing order, empty windows are left
/// out, and each bitmap is truncated to its last non-zero octet.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct RtypeBitmap {
    /// The present types in increasing order.
    types: Vec<Rtype>,
}

impl RtypeBitmap {
    /// Creates a bitmap from a list of record types.
    ///
    /// The list is sorted and deduplicated.
    pub fn new(mut types: Vec<Rtype>) -> Self {
        types.sort();
        types.dedup();
        RtypeBitmap { types }
    }

    /// Returns the record types in the bitmap.
    pub fn iter(&self) -> impl Iterator<Item = Rtype> + '_ {
        self.types.iter().copied()
    }

    /// Returns whether the given type is present.
    pub fn contains(&self, rtype: Rtype) -> bool {
        self.types.binary_search(&rtype).is_ok()
    }

    /// Returns whether there are no types at all.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Takes a type bitmap of the given length from a parser.
    pub fn parse(
        parser: &mut Parser,
        len: usize,
    ) -> Result<Self, DnsError> {
        let end = parser.pos() + len;
        let mut types = Vec::new();
        let mut last_window = None;
        while parser.pos() < end {
            let window = parser.parse_u8()?;
            if last_window.map_or(false, |last| window <= last) {
                return Err(
                    FormError::new("type bitmap windows out of order").into()
                );
            }
            last_window = Some(window);
            let bitmap_len = parser.parse_u8()?;
            if bitmap_len == 0 || bitmap_len > 32 {
                return Err(
                    FormError::new("illegal type bitmap length").into()
                );
            }
            if parser.pos() + usize::from(bitmap_len) > end {
                return Err(FormError::new(
                    "type bitmap crosses end of record data",
                )
                .into());
            }
            let bitmap = parser.parse_octets(usize::from(bitmap_len))?;
            for (pos, &octet) in bitmap.iter().enumerate() {
                for bit in 0..8 {
                    if octet & (0x80 >> bit) != 0 {
                        types.push(Rtype::from_int(
                            u16::from(window) << 8
                                | (pos as u16) << 3
                                | bit as u16,
                        ));
                    }
                }
            }
        }
        Ok(RtypeBitmap { types })
    }

    /// Appends the wire format of the bitmap to the target.
    pub fn compose(&self, target: &mut Composer) {
        let mut iter = self.types.iter().peekable();
        while let Some(&first) = iter.next() {
            let window = first.to_int() >> 8;
            let mut bitmap = [0u8; 32];
            let mut high = 0;
            let mut set = |rtype: Rtype| {
                let low = rtype.to_int() & 0xFF;
                bitmap[usize::from(low >> 3)] |= 0x80 >> (low & 7);
                high = cmp::max(high, usize::from(low >> 3));
            };
            set(first);
            while let Some(&&next) = iter.peek() {
                if next.to_int() >> 8 != window {
                    break;
                }
                set(next);
                iter.next();
            }
            target.append_u8(window as u8);
            target.append_u8((high + 1) as u8);
            target.append_slice(&bitmap[..=high]);
        }
    }
}

//--- Display

impl fmt::Display for RtypeBitmap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut sep = "";
        for rtype in self.types.iter() {
            write!(f, "{}{}", sep, rtype)?;
            sep = " ";
        }
        Ok(())
    }
}

//------------ IllegalSignatureTime ------------------------------------------

/// A presentation format signature time was malformed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IllegalSignatureTime(());

//--- Display and Error

impl fmt::Display for IllegalSignatureTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("illegal signature time")
    }
}

impl std::error::Error for IllegalSignatureTime {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn timestamp_text_forms() {
        let ts = Timestamp::from_str("20220919092245").unwrap();
        assert_eq!(ts.to_int(), 1663579365);
        assert_eq!(ts.to_string(), "20220919092245");
        assert_eq!(Timestamp::from_str("1663579365").unwrap(), ts);
        assert!(Timestamp::from_str("20221399092245").is_err());
        assert!(Timestamp::from_str("next tuesday").is_err());
    }

    #[test]
    fn type_bitmap_round_trip() {
        // A bitmap with a single window: A, TXT, AAAA, RRSIG, NSEC.
        let wire = b"\x00\x06\x40\x00\x80\x08\x00\x03";
        let bitmap =
            RtypeBitmap::parse(&mut Parser::new(wire), wire.len()).unwrap();
        assert_eq!(bitmap.to_string(), "A TXT AAAA RRSIG NSEC");
        let mut target = Composer::new();
        bitmap.compose(&mut target);
        assert_eq!(target.as_slice(), wire);
    }

    #[test]
    fn type_bitmap_multiple_windows() {
        let bitmap = RtypeBitmap::new(vec![
            Rtype::A,
            Rtype::ANY,
            Rtype::URI,
            Rtype::CAA,
            Rtype::TA,
            Rtype::DLV,
        ]);
        let mut target = Composer::new();
        bitmap.compose(&mut target);
        let parsed = RtypeBitmap::parse(
            &mut Parser::new(target.as_slice()),
            target.as_slice().len(),
        )
        .unwrap();
        assert_eq!(parsed, bitmap);
        assert_eq!(bitmap.to_string(), "A ANY URI CAA TA DLV");
    }

    #[test]
    fn type_bitmap_rejects_bad_window_len() {
        assert!(RtypeBitmap::parse(&mut Parser::new(b"\x00\x00"), 2).is_err());
        assert!(
            RtypeBitmap::parse(&mut Parser::new(b"\x00\x21"), 2).is_err()
        );
    }

    #[test]
    fn unknown_types_in_bitmap() {
        let bitmap = RtypeBitmap::new(vec![Rtype::A, Rtype::Int(1234)]);
        assert_eq!(bitmap.to_string(), "A TYPE1234");
        let mut target = Composer::new();
        bitmap.compose(&mut target);
        let parsed = RtypeBitmap::parse(
            &mut Parser::new(target.as_slice()),
            target.as_slice().len(),
        )
        .unwrap();
        assert!(parsed.contains(Rtype::Int(1234)));
    }
}
