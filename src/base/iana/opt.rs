//! EDNS option codes.

//------------ OptionCode ----------------------------------------------------

int_enum! {
    /// DNS EDNS0 option codes.
    ///
    /// The codes are maintained in an [IANA registry].
    ///
    /// [IANA registry]: https://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-11
    =>
    OptionCode, u16, parse_u16, append_u16;

    /// Long-lived queries.
    (LLQ => 1, b"LLQ")

    /// Update leases.
    (UL => 2, b"UL")

    /// Name server identifier.
    ///
    /// See RFC 5001.
    (NSID => 3, b"NSID")

    /// DNSSEC algorithm understood.
    ///
    /// See RFC 6975.
    (DAU => 5, b"DAU")

    /// DS hash understood.
    ///
    /// See RFC 6975.
    (DHU => 6, b"DHU")

    /// NSEC3 hash understood.
    ///
    /// See RFC 6975.
    (N3U => 7, b"N3U")

    /// EDNS client subnet.
    ///
    /// See RFC 7871.
    (ClientSubnet => 8, b"EDNS-CLIENT-SUBNET")

    /// Expire timer.
    ///
    /// See RFC 7314.
    (Expire => 9, b"EDNS-EXPIRE")

    /// DNS cookie.
    ///
    /// See RFC 7873.
    (Cookie => 10, b"COOKIE")

    /// EDNS TCP keepalive.
    ///
    /// See RFC 7828.
    (TcpKeepalive => 11, b"EDNS-TCP-KEEPALIVE")

    /// Padding.
    ///
    /// See RFC 7830.
    (Padding => 12, b"PADDING")

    /// CHAIN query requests.
    ///
    /// See RFC 7901.
    (Chain => 13, b"CHAIN")

    /// EDNS key tag.
    ///
    /// See RFC 8145.
    (KeyTag => 14, b"EDNS-KEY-TAG")

    /// Extended DNS errors.
    ///
    /// See RFC 8914.
    (ExtendedError => 15, b"EDE")
}

int_enum_str_with_decimal!(OptionCode, u16, "unknown option code");
