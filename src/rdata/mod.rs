//! Record data implementations.
//!
//! This module contains implementations of the record data for the record
//! types the crate understands. The types are named identically to the
//! [`Rtype`] variant they implement and are grouped into submodules for the
//! RFCs they are defined in. All types are also re-exported at the top
//! level here.
//!
//! The [`RecordData`] enum ties the types together. It is what a
//! [`Record`][crate::base::record::Record] carries and what selects the
//! right decoder, encoder, and zone file grammar for a record type. Record
//! types without an implementation here travel through
//! [`UnknownRecordData`] which keeps the data as an opaque octets sequence
//! per [RFC 3597].
//!
//! [RFC 3597]: https://tools.ietf.org/html/rfc3597

pub mod generic;
pub mod rfc1035;
pub mod rfc2782;
pub mod rfc3403;
pub mod rfc3596;
pub mod rfc4034;
pub mod rfc4255;
pub mod rfc6698;
pub mod rfc6891;
pub mod rfc8659;
pub mod svcb;

pub use self::generic::UnknownRecordData;
pub use self::rfc1035::{Cname, Mx, Ns, Ptr, Soa, Txt, A};
pub use self::rfc2782::Srv;
pub use self::rfc3403::Naptr;
pub use self::rfc3596::Aaaa;
pub use self::rfc4034::{Dnskey, Ds, Nsec, Rrsig};
pub use self::rfc4255::Sshfp;
pub use self::rfc6698::Tlsa;
pub use self::rfc6891::{EdnsOption, Opt};
pub use self::rfc8659::Caa;
pub use self::svcb::ServiceBinding;

use crate::base::iana::Rtype;
use crate::base::name::NameCompressor;
use crate::base::scan::{ScanError, Tokens};
use crate::base::wire::{Composer, Parser};
use crate::base::DnsError;
use core::fmt;

//------------ RecordData ----------------------------------------------------

/// The data of a resource record.
///
/// Every variant wraps the record data type of one record type. The
/// variant, and with it the record type, is selected by the RTYPE when
/// decoding from the wire or scanning from zone text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RecordData {
    /// A host address.
    A(A),

    /// An authoritative name server.
    Ns(Ns),

    /// The canonical name for an alias.
    Cname(Cname),

    /// The start of a zone of authority.
    Soa(Soa),

    /// A domain name pointer.
    Ptr(Ptr),

    /// A mail exchange.
    Mx(Mx),

    /// Text strings.
    Txt(Txt),

    /// An IPv6 host address.
    Aaaa(Aaaa),

    /// Server selection.
    Srv(Srv),

    /// A naming authority pointer.
    Naptr(Naptr),

    /// EDNS options.
    Opt(Opt),

    /// A delegation signer.
    Ds(Ds),

    /// An SSH key fingerprint.
    Sshfp(Sshfp),

    /// A TLSA certificate association.
    Tlsa(Tlsa),

    /// A DNSSEC signature.
    Rrsig(Rrsig),

    /// DNSSEC denial of existence.
    Nsec(Nsec),

    /// A DNSSEC key.
    Dnskey(Dnskey),

    /// A general purpose service binding.
    Svcb(ServiceBinding),

    /// A service binding for HTTPS.
    Https(ServiceBinding),

    /// A certification authority restriction.
    Caa(Caa),

    /// The data of a record type without its own implementation.
    Unknown(UnknownRecordData),
}

impl RecordData {
    /// Returns the record type of the data.
    pub fn rtype(&self) -> Rtype {
        match *self {
            RecordData::A(_) => Rtype::A,
            RecordData::Ns(_) => Rtype::NS,
            RecordData::Cname(_) => Rtype::CNAME,
            RecordData::Soa(_) => Rtype::SOA,
            RecordData::Ptr(_) => Rtype::PTR,
            RecordData::Mx(_) => Rtype::MX,
            RecordData::Txt(_) => Rtype::TXT,
            RecordData::Aaaa(_) => Rtype::AAAA,
            RecordData::Srv(_) => Rtype::SRV,
            RecordData::Naptr(_) => Rtype::NAPTR,
            RecordData::Opt(_) => Rtype::OPT,
            RecordData::Ds(_) => Rtype::DS,
            RecordData::Sshfp(_) => Rtype::SSHFP,
            RecordData::Tlsa(_) => Rtype::TLSA,
            RecordData::Rrsig(_) => Rtype::RRSIG,
            RecordData::Nsec(_) => Rtype::NSEC,
            RecordData::Dnskey(_) => Rtype::DNSKEY,
            RecordData::Svcb(_) => Rtype::SVCB,
            RecordData::Https(_) => Rtype::HTTPS,
            RecordData::Caa(_) => Rtype::CAA,
            RecordData::Unknown(ref data) => data.rtype(),
        }
    }

    /// Takes record data of the given type from a parser.
    ///
    /// The parser is positioned at the beginning of the record data;
    /// `rdlen` is the length declared by the record. Decoders that read up
    /// to the end of the record data use it as their limit. The caller is
    /// responsible for checking that exactly `rdlen` octets were consumed.
    pub fn parse(
        rtype: Rtype,
        parser: &mut Parser,
        rdlen: u16,
    ) -> Result<Self, DnsError> {
        match rtype {
            Rtype::A => A::parse(parser).map(RecordData::A),
            Rtype::NS => Ns::parse(parser).map(RecordData::Ns),
            Rtype::CNAME => Cname::parse(parser).map(RecordData::Cname),
            Rtype::SOA => Soa::parse(parser).map(RecordData::Soa),
            Rtype::PTR => Ptr::parse(parser).map(RecordData::Ptr),
            Rtype::MX => Mx::parse(parser).map(RecordData::Mx),
            Rtype::TXT => Txt::parse(parser, rdlen).map(RecordData::Txt),
            Rtype::AAAA => Aaaa::parse(parser).map(RecordData::Aaaa),
            Rtype::SRV => Srv::parse(parser).map(RecordData::Srv),
            Rtype::NAPTR => Naptr::parse(parser).map(RecordData::Naptr),
            Rtype::OPT => Opt::parse(parser, rdlen).map(RecordData::Opt),
            Rtype::DS => Ds::parse(parser, rdlen).map(RecordData::Ds),
            Rtype::SSHFP => {
                Sshfp::parse(parser, rdlen).map(RecordData::Sshfp)
            }
            Rtype::TLSA => Tlsa::parse(parser, rdlen).map(RecordData::Tlsa),
            Rtype::RRSIG => {
                Rrsig::parse(parser, rdlen).map(RecordData::Rrsig)
            }
            Rtype::NSEC => Nsec::parse(parser, rdlen).map(RecordData::Nsec),
            Rtype::DNSKEY => {
                Dnskey::parse(parser, rdlen).map(RecordData::Dnskey)
            }
            Rtype::SVCB => {
                ServiceBinding::parse(parser, rdlen).map(RecordData::Svcb)
            }
            Rtype::HTTPS => {
                ServiceBinding::parse(parser, rdlen).map(RecordData::Https)
            }
            Rtype::CAA => Caa::parse(parser, rdlen).map(RecordData::Caa),
            _ => UnknownRecordData::parse(rtype, parser, rdlen)
                .map(RecordData::Unknown),
        }
    }

    /// Creates record data of the given type from its zone file tokens.
    pub fn scan(
        rtype: Rtype,
        tokens: &mut Tokens,
    ) -> Result<Self, ScanError> {
        match rtype {
            Rtype::A => A::scan(tokens).map(RecordData::A),
            Rtype::NS => Ns::scan(tokens).map(RecordData::Ns),
            Rtype::CNAME => Cname::scan(tokens).map(RecordData::Cname),
            Rtype::SOA => Soa::scan(tokens).map(RecordData::Soa),
            Rtype::PTR => Ptr::scan(tokens).map(RecordData::Ptr),
            Rtype::MX => Mx::scan(tokens).map(RecordData::Mx),
            Rtype::TXT => Txt::scan(tokens).map(RecordData::Txt),
            Rtype::AAAA => Aaaa::scan(tokens).map(RecordData::Aaaa),
            Rtype::SRV => Srv::scan(tokens).map(RecordData::Srv),
            Rtype::NAPTR => Naptr::scan(tokens).map(RecordData::Naptr),
            Rtype::DS => Ds::scan(tokens).map(RecordData::Ds),
            Rtype::SSHFP => Sshfp::scan(tokens).map(RecordData::Sshfp),
            Rtype::TLSA => Tlsa::scan(tokens).map(RecordData::Tlsa),
            Rtype::RRSIG => Rrsig::scan(tokens).map(RecordData::Rrsig),
            Rtype::NSEC => Nsec::scan(tokens).map(RecordData::Nsec),
            Rtype::DNSKEY => Dnskey::scan(tokens).map(RecordData::Dnskey),
            Rtype::SVCB => {
                ServiceBinding::scan(tokens).map(RecordData::Svcb)
            }
            Rtype::HTTPS => {
                ServiceBinding::scan(tokens).map(RecordData::Https)
            }
            Rtype::CAA => Caa::scan(tokens).map(RecordData::Caa),
            Rtype::OPT => {
                Err(ScanError::custom("OPT record in zone file"))
            }
            _ => UnknownRecordData::scan(rtype, tokens)
                .map(RecordData::Unknown),
        }
    }

    /// Appends the wire format of the data to a message under construction.
    ///
    /// The enclosing record takes care of the RDLENGTH; this method only
    /// writes the data itself. Types whose names take part in compression
    /// hand the compressor on.
    pub fn compose(
        &self,
        target: &mut Composer,
        compressor: &mut NameCompressor,
    ) {
        match *self {
            RecordData::A(ref data) => data.compose(target),
            RecordData::Ns(ref data) => data.compose(target, compressor),
            RecordData::Cname(ref data) => data.compose(target, compressor),
            RecordData::Soa(ref data) => data.compose(target, compressor),
            RecordData::Ptr(ref data) => data.compose(target, compressor),
            RecordData::Mx(ref data) => data.compose(target, compressor),
            RecordData::Txt(ref data) => data.compose(target),
            RecordData::Aaaa(ref data) => data.compose(target),
            RecordData::Srv(ref data) => data.compose(target),
            RecordData::Naptr(ref data) => data.compose(target),
            RecordData::Opt(ref data) => data.compose(target),
            RecordData::Ds(ref data) => data.compose(target),
            RecordData::Sshfp(ref data) => data.compose(target),
            RecordData::Tlsa(ref data) => data.compose(target),
            RecordData::Rrsig(ref data) => data.compose(target),
            RecordData::Nsec(ref data) => data.compose(target),
            RecordData::Dnskey(ref data) => data.compose(target),
            RecordData::Svcb(ref data) => data.compose(target),
            RecordData::Https(ref data) => data.compose(target),
            RecordData::Caa(ref data) => data.compose(target),
            RecordData::Unknown(ref data) => data.compose(target),
        }
    }
}

//--- Display

impl fmt::Display for RecordData {
    /// Formats the record data in its zone file form.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RecordData::A(ref data) => data.fmt(f),
            RecordData::Ns(ref data) => data.fmt(f),
            RecordData::Cname(ref data) => data.fmt(f),
            RecordData::Soa(ref data) => data.fmt(f),
            RecordData::Ptr(ref data) => data.fmt(f),
            RecordData::Mx(ref data) => data.fmt(f),
            RecordData::Txt(ref data) => data.fmt(f),
            RecordData::Aaaa(ref data) => data.fmt(f),
            RecordData::Srv(ref data) => data.fmt(f),
            RecordData::Naptr(ref data) => data.fmt(f),
            RecordData::Opt(ref data) => data.fmt(f),
            RecordData::Ds(ref data) => data.fmt(f),
            RecordData::Sshfp(ref data) => data.fmt(f),
            RecordData::Tlsa(ref data) => data.fmt(f),
            RecordData::Rrsig(ref data) => data.fmt(f),
            RecordData::Nsec(ref data) => data.fmt(f),
            RecordData::Dnskey(ref data) => data.fmt(f),
            RecordData::Svcb(ref data) => data.fmt(f),
            RecordData::Https(ref data) => data.fmt(f),
            RecordData::Caa(ref data) => data.fmt(f),
            RecordData::Unknown(ref data) => data.fmt(f),
        }
    }
}
