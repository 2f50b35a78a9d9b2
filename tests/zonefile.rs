//! End-to-end tests of the zone file reader.

use dnswire::base::iana::{Class, Rtype};
use dnswire::base::name::Name;
use dnswire::base::record::Record;
use dnswire::zonefile::Zonefile;
use std::str::FromStr;

fn collect(zone: &str) -> Vec<Record> {
    Zonefile::new(zone).collect::<Result<Vec<_>, _>>().unwrap()
}

#[test]
fn multiline_zone() {
    let records = collect(
        "$TTL 300\n\
         $ORIGIN abc.com.\n\
         @       IN      MX      10 mail.abc.com.\n\
         www     IN      A       1.2.3.4\n\
         \tIN      TXT     \"Some Text\"\n\
         mail    IN      CNAME   www.abc.com.\n",
    );
    assert_eq!(records.len(), 4);
    assert!(records.iter().all(|rr| rr.ttl() == 300));
    assert!(records.iter().all(|rr| rr.class() == Class::IN));

    assert_eq!(records[0].owner(), &Name::from_str("abc.com.").unwrap());
    assert_eq!(records[0].rtype(), Rtype::MX);
    assert_eq!(records[0].data().to_string(), "10 mail.abc.com.");

    assert_eq!(records[1].owner(), &Name::from_str("www.abc.com.").unwrap());
    assert_eq!(records[1].rtype(), Rtype::A);

    assert_eq!(records[2].owner(), &Name::from_str("www.abc.com.").unwrap());
    assert_eq!(records[2].rtype(), Rtype::TXT);
    assert_eq!(records[2].data().to_string(), "\"Some Text\"");

    assert_eq!(records[3].owner(), &Name::from_str("mail.abc.com.").unwrap());
    assert_eq!(records[3].rtype(), Rtype::CNAME);
}

#[test]
fn full_zone_with_groups() {
    let records = collect(
        "$ORIGIN example.com.        ; Comment\n\
         $TTL 90m\n\
         \n\
         @           IN  SOA     ns1.example.com. admin.example.com. (\n\
                                     2014020901  ; Serial\n\
                                     10800   ; Refresh\n\
                                     1800    ; Retry\n\
                                     604800  ; Expire\n\
                                     86400 ) ; Minimum TTL\n\
         \n\
         \t1800   IN  NS      ns1.example.com.\n\
         \tIN  MX      ( 10  mail.example.com. )\n\
         \n\
         abc         IN  A       1.2.3.4\n\
         \tIN  TXT     \"A B C\"\n\
         \n\
         ns1   60    IN  A       6.7.8.9\n\
         ipv6        IN  AAAA    1234:5678::1\n\
         www         IN  CNAME   abc\n",
    );
    let lines: Vec<String> =
        records.iter().map(|rr| rr.to_string()).collect();
    assert_eq!(
        lines,
        [
            "example.com.            5400    IN      SOA     \
             ns1.example.com. admin.example.com. \
             2014020901 10800 1800 604800 86400",
            "example.com.            1800    IN      NS      \
             ns1.example.com.",
            "example.com.            5400    IN      MX      \
             10 mail.example.com.",
            "abc.example.com.        5400    IN      A       1.2.3.4",
            "abc.example.com.        5400    IN      TXT     \"A B C\"",
            "ns1.example.com.        60      IN      A       6.7.8.9",
            "ipv6.example.com.       5400    IN      AAAA    1234:5678::1",
            "www.example.com.        5400    IN      CNAME   \
             abc.example.com.",
        ]
    );
}

#[test]
fn text_round_trip() {
    // Rendering the records and reading them back yields the same set.
    let records = collect(
        "$ORIGIN example.com.\n\
         $TTL 3600\n\
         @    IN SOA   ns1.example.com. admin.example.com. \
              2020010101 7200 3600 1209600 3600\n\
         @    IN NS    ns1.example.com.\n\
         @    IN MX    10 mail.example.com.\n\
         @    IN TXT   \"v=spf1 -all\" \"second string\"\n\
         @    IN CAA   0 issue \"letsencrypt.org\"\n\
         www  IN A     192.0.2.1\n\
         www  IN AAAA  2001:db8::1\n\
         _sip._tcp IN SRV 10 60 5060 sip.example.com.\n\
         @    IN HTTPS 1 . alpn=h2,h3 port=443\n\
         @    IN TYPE999 \\# 3 010203\n",
    );
    let rendered: String = records
        .iter()
        .map(|rr| rr.to_string())
        .collect::<Vec<_>>()
        .join("\n");
    let reread = collect(&rendered);
    assert_eq!(records, reread);
}

#[test]
fn dnssec_records() {
    let records = collect(
        "example.com. 3600 IN DS 60485 5 1 \
         2BB183AF5F22588179A53B0A98631FAD1A292118\n\
         example.com. 3600 IN DNSKEY 256 3 5 AQPSKmynfzW4kyBv015MUG2DeIQ3\n\
         example.com. 3600 IN NSEC host.example.com. A MX RRSIG NSEC TYPE1234\n\
         host.example.com. 3600 IN RRSIG A 5 3 86400 20030322173103 \
         20030220173103 2642 example.com. oJB1W6WNGv+ldvQ3WDG0MQkg5IEhjRip8WTr\n",
    );
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].rtype(), Rtype::DS);
    assert_eq!(records[1].rtype(), Rtype::DNSKEY);
    assert_eq!(records[2].rtype(), Rtype::NSEC);
    assert_eq!(records[3].rtype(), Rtype::RRSIG);
    assert_eq!(
        records[2].data().to_string(),
        "host.example.com. A MX RRSIG NSEC TYPE1234"
    );
    assert!(records[3]
        .data()
        .to_string()
        .contains("20030322173103 20030220173103 2642 example.com."));

    // The wire forms survive a round trip through a packet.
    let mut msg = dnswire::Message::new();
    for rr in &records {
        msg.add_answer(rr.clone());
    }
    let reparsed = dnswire::Message::parse(&msg.pack().unwrap()).unwrap();
    assert_eq!(reparsed, msg);
}
