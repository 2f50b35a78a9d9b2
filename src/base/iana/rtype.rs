//! Resource Record (RR) TYPEs.

//------------ Rtype ---------------------------------------------------------

int_enum! {
    /// Resource Record Types.
    ///
    /// Each resource record has a 16 bit type value indicating what kind of
    /// information is represented by the record. A normal query includes the
    /// type of record information is requested for. A few additional types,
    /// called query types, are defined as well and can only be used in
    /// questions. This type represents both these types.
    ///
    /// The currently assigned values are maintained in an [IANA registry].
    ///
    /// In order to avoid confusion over capitalization, the mnemonics are
    /// treated as single acronyms and therefore all variant names are
    /// spelled with all capital letters.
    ///
    /// [IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-4
    =>
    Rtype, u16, parse_u16, append_u16;

    /// A host address.
    (A => 1, b"A")

    /// An authoritative name server.
    (NS => 2, b"NS")

    /// The canonical name for an alias.
    (CNAME => 5, b"CNAME")

    /// Marks the start of a zone of authority.
    (SOA => 6, b"SOA")

    /// A null resource record.
    ///
    /// (Experimental.)
    (NULL => 10, b"NULL")

    /// A domain name pointer.
    (PTR => 12, b"PTR")

    /// Host information.
    (HINFO => 13, b"HINFO")

    /// Mail exchange.
    (MX => 15, b"MX")

    /// Text strings.
    (TXT => 16, b"TXT")

    /// For Responsible Person.
    ///
    /// See RFC 1183.
    (RP => 17, b"RP")

    /// For AFS Data Base location.
    ///
    /// See RFC 1183 and RFC 5864.
    (AFSDB => 18, b"AFSDB")

    /// For security signature.
    (SIG => 24, b"SIG")

    /// For security key.
    (KEY => 25, b"KEY")

    /// An IPv6 host address.
    ///
    /// See RFC 3596.
    (AAAA => 28, b"AAAA")

    /// Location information.
    ///
    /// See RFC 1876.
    (LOC => 29, b"LOC")

    /// Server selection.
    ///
    /// See RFC 2782.
    (SRV => 33, b"SRV")

    /// Naming authority pointer.
    ///
    /// See RFC 2915, RFC 2168, and RFC 3403.
    (NAPTR => 35, b"NAPTR")

    /// Key exchanger.
    ///
    /// See RFC 2230.
    (KX => 36, b"KX")

    /// CERT.
    ///
    /// See RFC 4398.
    (CERT => 37, b"CERT")

    /// DNAME.
    ///
    /// See RFC 6672.
    (DNAME => 39, b"DNAME")

    /// OPT.
    ///
    /// See RFC 6891.
    (OPT => 41, b"OPT")

    /// Delegation signer.
    ///
    /// See RFC 4034.
    (DS => 43, b"DS")

    /// SSH key fingerprint.
    ///
    /// See RFC 4255.
    (SSHFP => 44, b"SSHFP")

    /// IPSECKEY.
    ///
    /// See RFC 4025.
    (IPSECKEY => 45, b"IPSECKEY")

    /// RRSIG.
    ///
    /// See RFC 4034.
    (RRSIG => 46, b"RRSIG")

    /// NSEC.
    ///
    /// See RFC 4034.
    (NSEC => 47, b"NSEC")

    /// DNSKEY.
    ///
    /// See RFC 4034.
    (DNSKEY => 48, b"DNSKEY")

    /// DHCID.
    ///
    /// See RFC 4701.
    (DHCID => 49, b"DHCID")

    /// NSEC3.
    ///
    /// See RFC 5155.
    (NSEC3 => 50, b"NSEC3")

    /// NSEC3PARAM.
    ///
    /// See RFC 5155.
    (NSEC3PARAM => 51, b"NSEC3PARAM")

    /// TLSA.
    ///
    /// See RFC 6698.
    (TLSA => 52, b"TLSA")

    /// Child DS.
    ///
    /// See RFC 7344.
    (CDS => 59, b"CDS")

    /// DNSKEY(s) the child wants reflected in DS.
    ///
    /// See RFC 7344.
    (CDNSKEY => 60, b"CDNSKEY")

    /// OpenPGP key.
    ///
    /// See RFC 7929.
    (OPENPGPKEY => 61, b"OPENPGPKEY")

    /// Child-to-parent synchronization.
    ///
    /// See RFC 7477.
    (CSYNC => 62, b"CSYNC")

    /// Message digest for DNS zone.
    ///
    /// See RFC 8976.
    (ZONEMD => 63, b"ZONEMD")

    /// General purpose service binding.
    ///
    /// See RFC 9460.
    (SVCB => 64, b"SVCB")

    /// Service binding type for use with HTTPS.
    ///
    /// See RFC 9460.
    (HTTPS => 65, b"HTTPS")

    /// Sender policy framework.
    ///
    /// See RFC 7208.
    (SPF => 99, b"SPF")

    /// EUI-48 address.
    ///
    /// See RFC 7043.
    (EUI48 => 108, b"EUI48")

    /// EUI-64 address.
    ///
    /// See RFC 7043.
    (EUI64 => 109, b"EUI64")

    /// Transaction key.
    ///
    /// See RFC 2930.
    (TKEY => 249, b"TKEY")

    /// Transaction signature.
    ///
    /// See RFC 2845.
    (TSIG => 250, b"TSIG")

    /// Incremental transfer.
    ///
    /// See RFC 1995.
    (IXFR => 251, b"IXFR")

    /// Transfer of an entire zone.
    ///
    /// See RFC 1035 and RFC 5936.
    (AXFR => 252, b"AXFR")

    /// A request for all records the server/cache has available.
    ///
    /// See RFC 1035 and RFC 6895.
    (ANY => 255, b"ANY")

    /// URI.
    ///
    /// See RFC 7553.
    (URI => 256, b"URI")

    /// Certification Authority Restriction.
    ///
    /// See RFC 6844.
    (CAA => 257, b"CAA")

    /// DNSSEC trust authorities.
    (TA => 32768, b"TA")

    /// DNSSEC lookaside validation.
    ///
    /// See RFC 4431.
    (DLV => 32769, b"DLV")
}

int_enum_str_with_prefix!(Rtype, "TYPE", b"TYPE", u16, "unknown record type");

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn from_str() {
        assert_eq!(Rtype::from_str("A"), Ok(Rtype::A));
        assert_eq!(Rtype::from_str("aaaa"), Ok(Rtype::AAAA));
        assert_eq!(Rtype::from_str("TYPE1"), Ok(Rtype::A));
        assert_eq!(Rtype::from_str("TYPE1234"), Ok(Rtype::Int(1234)));
        assert_eq!(Rtype::from_str("type1234"), Ok(Rtype::Int(1234)));
        assert!(Rtype::from_str("TYPE65536").is_err());
        assert!(Rtype::from_str("BOGUS").is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Rtype::A.to_string(), "A");
        assert_eq!(Rtype::Int(1).to_string(), "A");
        assert_eq!(Rtype::Int(1234).to_string(), "TYPE1234");
    }
}
