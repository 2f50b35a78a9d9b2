//! DNS response codes.

//------------ Rcode ---------------------------------------------------------

int_enum! {
    /// DNS Response Codes.
    ///
    /// The response code of a response indicates what happend on the server
    /// when trying to answer the query. The code is a 4 bit value in the
    /// message header; EDNS provides eight more bits for an extended code
    /// which are carried in the OPT record and interpreted by
    /// [`OptRecord`][crate::rdata::rfc6891::OptRecord].
    ///
    /// The initial response codes are defined in [RFC 1035]. All currently
    /// assigned values can be found in the [IANA registry].
    ///
    /// [RFC 1035]: https://tools.ietf.org/html/rfc1035
    /// [IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-6
    =>
    Rcode, u8, parse_u8, append_u8;

    /// No error condition.
    ///
    /// (Otherwise known as success.)
    (NoError => 0, b"NOERROR")

    /// Format error.
    ///
    /// The name server was unable to interpret the query.
    (FormErr => 1, b"FORMERR")

    /// Server failure.
    ///
    /// The name server was unable to process this query due to a problem
    /// with the name server.
    (ServFail => 2, b"SERVFAIL")

    /// Name error.
    ///
    /// The domain name referenced in the query does not exist.
    (NXDomain => 3, b"NXDOMAIN")

    /// Not implemented.
    ///
    /// The name server does not support the requested kind of query.
    (NotImp => 4, b"NOTIMP")

    /// Query refused.
    ///
    /// The name server refused to perform the operation requested by the
    /// query for policy reasons.
    (Refused => 5, b"REFUSED")

    /// Name exists when it should not.
    ///
    /// See RFC 2136 and RFC 6672.
    (YXDomain => 6, b"YXDOMAIN")

    /// RR set exists when it should not.
    ///
    /// See RFC 2136.
    (YXRRSet => 7, b"YXRRSET")

    /// RR set that should exist does not.
    ///
    /// See RFC 2136.
    (NXRRSet => 8, b"NXRRSET")

    /// Server not authoritative for zone or client not authorized.
    ///
    /// See RFC 2136 and RFC 8945.
    (NotAuth => 9, b"NOTAUTH")

    /// Name not contained in zone.
    ///
    /// See RFC 2136.
    (NotZone => 10, b"NOTZONE")
}

int_enum_str_with_decimal!(Rcode, u8, "unknown response code");

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Rcode::NoError.to_string(), "NOERROR");
        assert_eq!(Rcode::ServFail.to_string(), "SERVFAIL");
        assert_eq!(Rcode::Int(13).to_string(), "13");
    }
}
