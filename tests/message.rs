//! End-to-end tests of the wire format codec.

use dnswire::base::iana::{Class, Opcode, Rcode, Rtype};
use dnswire::base::name::Name;
use dnswire::base::record::Record;
use dnswire::base::DnsError;
use dnswire::rdata::rfc1035::A;
use dnswire::rdata::RecordData;
use dnswire::Message;
use std::str::FromStr;

/// Decodes a string of hex digits into octets.
fn unhex(s: &str) -> Vec<u8> {
    assert!(s.len() % 2 == 0);
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}

/// A captured response for an A query for www.google.com.
const GOOGLE_RESPONSE: &str = "d5ad818000010005000000000377777706676f6f67\
    6c6503636f6d0000010001c00c0005000100000005000803777777016cc010c02c0001\
    000100000005000442f95b68c02c0001000100000005000442f95b63c02c0001000100\
    000005000442f95b67c02c0001000100000005000442f95b93";

#[test]
fn parse_google_response() {
    let packet = unhex(GOOGLE_RESPONSE);
    let msg = Message::parse(&packet).unwrap();

    let header = msg.header();
    assert_eq!(header.id(), 0xd5ad);
    assert!(header.qr());
    assert!(header.rd());
    assert!(header.ra());
    assert_eq!(header.opcode(), Opcode::Query);
    assert_eq!(header.rcode(), Rcode::NoError);

    let question = msg.first_question().unwrap();
    assert_eq!(question.qname().to_string(), "www.google.com.");
    assert_eq!(question.qtype(), Rtype::A);
    assert_eq!(question.qclass(), Class::IN);

    assert_eq!(msg.answers().len(), 5);
    assert!(msg.authorities().is_empty());
    assert!(msg.additionals().is_empty());

    let cname = &msg.answers()[0];
    assert_eq!(cname.rtype(), Rtype::CNAME);
    assert_eq!(cname.ttl(), 5);
    assert_eq!(cname.data().to_string(), "www.l.google.com.");

    let addrs: Vec<String> = msg.answers()[1..]
        .iter()
        .map(|rr| {
            assert_eq!(rr.rtype(), Rtype::A);
            assert_eq!(rr.ttl(), 5);
            rr.data().to_string()
        })
        .collect();
    assert_eq!(
        addrs,
        ["66.249.91.104", "66.249.91.99", "66.249.91.103", "66.249.91.147"]
    );
}

#[test]
fn repack_google_response() {
    // Re-encoding a parsed packet may lay the bytes out differently but
    // must parse back to an equal message.
    let packet = unhex(GOOGLE_RESPONSE);
    let msg = Message::parse(&packet).unwrap();
    let repacked = msg.pack().unwrap();
    assert_eq!(Message::parse(&repacked).unwrap(), msg);
}

#[test]
fn query_construction() {
    let query = Message::query(Name::from_str("google.com").unwrap(), Rtype::A);
    let packet = query.pack().unwrap();
    let reparsed = Message::parse(&packet).unwrap();
    assert_eq!(reparsed, query);
    assert_eq!(reparsed.header().opcode(), Opcode::Query);
    assert!(reparsed.header().rd());
    assert!(!reparsed.header().qr());
    assert_eq!(reparsed.questions().len(), 1);
}

#[test]
fn reply_skeleton() {
    let query = Message::query(Name::from_str("abc.com").unwrap(), Rtype::ANY);
    let mut reply = query.reply();
    assert!(reply.header().qr());
    assert!(reply.header().aa());
    assert!(reply.header().rd());
    assert!(reply.header().ra());
    assert_eq!(reply.questions(), query.questions());

    reply.add_answer(Record::new(
        Name::from_str("abc.com").unwrap(),
        Class::IN,
        60,
        RecordData::A(A::from_str("1.2.3.4").unwrap()),
    ));
    let reparsed = Message::parse(&reply.pack().unwrap()).unwrap();
    assert_eq!(reparsed, reply);
    assert_eq!(reparsed.answers().len(), 1);
    assert_eq!(reparsed.answers()[0].data().to_string(), "1.2.3.4");
}

#[test]
fn edns_do_flag() {
    let mut query = Message::query(Name::from_str("abc.com").unwrap(), Rtype::A);
    query.add_opt(4096, 0, 0, true, Vec::new());

    let record = &query.additionals()[0];
    assert_eq!(record.class().to_int(), 4096);
    assert_eq!(record.ttl() & 0x8000, 0x8000);
    assert!(query
        .to_string()
        .contains("; EDNS: version: 0, flags: do; udp: 4096"));

    let reparsed = Message::parse(&query.pack().unwrap()).unwrap();
    let opt = reparsed.opt().unwrap();
    assert!(opt.dnssec_ok());
    assert_eq!(opt.udp_payload_size(), 4096);
}

#[test]
fn pointer_cycle_is_detected() {
    // A header declaring one question whose name points at itself.
    let mut packet = unhex("000000000001000000000000");
    packet.extend_from_slice(b"\xC0\x0C\x00\x01\x00\x01");
    match Message::parse(&packet) {
        Err(DnsError::Buffer(_)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn truncated_inputs_fail_cleanly() {
    let packet = unhex(GOOGLE_RESPONSE);
    for len in 0..packet.len() {
        assert!(
            Message::parse(&packet[..len]).is_err(),
            "prefix of {} octets parsed",
            len
        );
    }
}

#[test]
fn arbitrary_input_never_panics() {
    // A tiny deterministic xorshift generator; the parser must either
    // produce a message or an error for whatever it emits.
    let mut state = 0x2545F491_4F6CDD1Du64;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    for _ in 0..2000 {
        let len = (next() % 160) as usize;
        let mut packet = Vec::with_capacity(len);
        for _ in 0..len {
            packet.push(next() as u8);
        }
        let _ = Message::parse(&packet);
    }
}

#[test]
fn parsed_messages_repack() {
    // Compression safety: anything that parses also packs, and the
    // repacked packet parses back to the same message.
    let inputs = [
        GOOGLE_RESPONSE.to_string(),
        // A response with an OPT record (from a DNSSEC-enabled query).
        "000081a0000100010000000103777777076578616d706c6503636f6d00000100\
         01c00c000100010000012c000405f8d82e0000290200000080000000"
            .to_string(),
    ];
    for input in inputs {
        let packet = unhex(&input);
        let msg = Message::parse(&packet).unwrap();
        let repacked = msg.pack().unwrap();
        assert_eq!(Message::parse(&repacked).unwrap(), msg);
    }
}
