//! DNS CLASSes.

//------------ Class ---------------------------------------------------------

int_enum! {
    /// DNS CLASSes.
    ///
    /// The domain name space is partitioned into separate classes for
    /// different network types. That is, each class has its own separate
    /// record tree starting at the root. However, in practice, only the IN
    /// class is really relevant.
    ///
    /// In addition, there are query classes or QCLASSes that are used in
    /// questions or UPDATE queries, namely NONE and ANY (or *).
    ///
    /// Classes are represented by a 16 bit value. The enum wraps these
    /// values.
    ///
    /// See [RFC 1035] for the introduction of classes.
    ///
    /// [RFC 1035]: https://tools.ietf.org/html/rfc1035
    =>
    Class, u16, parse_u16, append_u16;

    /// Internet (IN).
    ///
    /// This class is defined in RFC 1035 and really is the only one relevant
    /// at all.
    (IN => 1, b"IN")

    /// Chaos (CH).
    (CH => 3, b"CH")

    /// Hesiod (HS).
    (HS => 4, b"HS")

    /// Query class None.
    ///
    /// Defined in RFC 2136, this class is used in UPDATE queries to
    /// require that an RRset does not exist prior to the update.
    (NONE => 0xFE, b"NONE")

    /// Query class * (ANY).
    ///
    /// This class can be used in a query to indicate that records for the
    /// given name from any class are requested.
    (ANY => 0xFF, b"ANY")
}

int_enum_str_with_prefix!(Class, "CLASS", b"CLASS", u16, "unknown class");

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn from_str() {
        assert_eq!(Class::from_str("IN"), Ok(Class::IN));
        assert_eq!(Class::from_str("in"), Ok(Class::IN));
        assert_eq!(Class::from_str("CLASS3"), Ok(Class::CH));
        assert_eq!(Class::from_str("CLASS1234"), Ok(Class::Int(1234)));
        assert!(Class::from_str("1").is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Class::IN.to_string(), "IN");
        assert_eq!(Class::Int(1234).to_string(), "CLASS1234");
    }
}
