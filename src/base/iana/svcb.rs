//! The service parameter keys of the SVCB and HTTPS record types.

//------------ SvcParamKey ---------------------------------------------------

int_enum! {
    /// The service parameter keys used in SVCB and HTTPS records.
    ///
    /// These keys and their presentation names are defined in [RFC 9460].
    /// Unassigned keys are presented as `keyNNNNN` with the decimal value
    /// of the key.
    ///
    /// [RFC 9460]: https://tools.ietf.org/html/rfc9460
    =>
    SvcParamKey, u16, parse_u16, append_u16;

    /// Mandatory keys in this record.
    (Mandatory => 0, b"mandatory")

    /// Additional supported protocols.
    (Alpn => 1, b"alpn")

    /// No support for default protocol.
    (NoDefaultAlpn => 2, b"no-default-alpn")

    /// Port for alternative endpoint.
    (Port => 3, b"port")

    /// IPv4 address hints.
    (Ipv4Hint => 4, b"ipv4hint")

    /// Encrypted ClientHello configuration.
    (Ech => 5, b"ech")

    /// IPv6 address hints.
    (Ipv6Hint => 6, b"ipv6hint")
}

int_enum_str_with_prefix!(
    SvcParamKey,
    "key",
    b"key",
    u16,
    "unknown service parameter key"
);

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn presentation() {
        assert_eq!(SvcParamKey::Alpn.to_string(), "alpn");
        assert_eq!(SvcParamKey::Int(9999).to_string(), "key9999");
        assert_eq!(SvcParamKey::from_str("key9999"), Ok(SvcParamKey::Int(9999)));
        assert_eq!(
            SvcParamKey::from_str("no-default-alpn"),
            Ok(SvcParamKey::NoDefaultAlpn)
        );
    }
}
