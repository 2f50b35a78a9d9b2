//! Ready-made resolver implementations.
//!
//! Two simple resolvers for the server framework: [`FixedResolver`]
//! answers every query with the same canned record set, and
//! [`ZoneResolver`] serves the contents of a zone file. Both are useful
//! as-is for testing and as starting points for application-specific
//! resolvers.

use crate::base::iana::{Rcode, Rtype};
use crate::base::message::Message;
use crate::base::name::Name;
use crate::base::record::Record;
use crate::base::DnsError;
use crate::net::server::{RequestContext, Resolver};
use crate::rdata::RecordData;
use crate::zonefile::{Error as ZoneError, Zonefile};
use tracing::info;

//------------ FixedResolver -------------------------------------------------

/// A resolver answering all queries with the same records.
///
/// The records are given in zone file form. Their owner names are
/// replaced with the query name in every response, so a single
/// `. 60 IN A 127.0.0.1` answers anything asked.
#[derive(Clone, Debug)]
pub struct FixedResolver {
    /// The records of every answer.
    records: Vec<Record>,
}

impl FixedResolver {
    /// Creates a resolver from records in zone file form.
    pub fn from_zone(zone: &str) -> Result<Self, ZoneError> {
        let records =
            Zonefile::new(zone).collect::<Result<Vec<_>, _>>()?;
        Ok(FixedResolver { records })
    }

    /// Returns the records of the resolver.
    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

//--- Resolver

impl Resolver for FixedResolver {
    fn resolve(
        &self,
        request: &Message,
        ctx: &RequestContext,
    ) -> Result<Message, DnsError> {
        let mut reply = request.reply();
        if let Some(question) = request.first_question() {
            info!(
                peer = %ctx.peer(),
                transport = %ctx.transport(),
                qname = %question.qname(),
                qtype = %question.qtype(),
                "fixed answer",
            );
            for record in &self.records {
                let mut answer = record.clone();
                answer.set_owner(question.qname().clone());
                reply.add_answer(answer);
            }
        }
        Ok(reply)
    }
}

//------------ ZoneResolver --------------------------------------------------

/// A resolver serving the records of a zone file.
///
/// A query is answered with all records whose owner equals the query name
/// and whose type matches: either exactly, or via a query type of ANY, or
/// because the record is a CNAME. Answers that point at another name have
/// the A and AAAA records of that name added to the additional section. A
/// query nothing matches is answered with NXDOMAIN.
#[derive(Clone, Debug)]
pub struct ZoneResolver {
    /// The records of the zone.
    zone: Vec<Record>,
}

impl ZoneResolver {
    /// Creates a resolver from the text of a zone file.
    pub fn from_zone(zone: &str) -> Result<Self, ZoneError> {
        let records =
            Zonefile::new(zone).collect::<Result<Vec<_>, _>>()?;
        Ok(ZoneResolver { zone: records })
    }

    /// Returns the records of the zone.
    pub fn records(&self) -> &[Record] {
        &self.zone
    }

    /// Returns the name an answer record delegates to, if any.
    ///
    /// These are the record types whose targets get A/AAAA glue in the
    /// additional section.
    fn target_name(record: &Record) -> Option<&Name> {
        match record.data() {
            RecordData::Cname(data) => Some(data.cname()),
            RecordData::Ns(data) => Some(data.nsdname()),
            RecordData::Mx(data) => Some(data.exchange()),
            RecordData::Ptr(data) => Some(data.ptrdname()),
            _ => None,
        }
    }
}

//--- Resolver

impl Resolver for ZoneResolver {
    fn resolve(
        &self,
        request: &Message,
        ctx: &RequestContext,
    ) -> Result<Message, DnsError> {
        let mut reply = request.reply();
        let question = match request.first_question() {
            Some(question) => question,
            None => return Ok(reply),
        };
        info!(
            peer = %ctx.peer(),
            transport = %ctx.transport(),
            qname = %question.qname(),
            qtype = %question.qtype(),
            "zone lookup",
        );
        for record in &self.zone {
            if record.owner() != question.qname() {
                continue;
            }
            if record.rtype() != question.qtype()
                && question.qtype() != Rtype::ANY
                && record.rtype() != Rtype::CNAME
            {
                continue;
            }
            reply.add_answer(record.clone());
            if let Some(target) = Self::target_name(record) {
                for glue in &self.zone {
                    if glue.owner() == target
                        && matches!(glue.rtype(), Rtype::A | Rtype::AAAA)
                    {
                        reply.add_additional(glue.clone());
                    }
                }
            }
        }
        if reply.answers().is_empty() {
            reply.header_mut().set_rcode(Rcode::NXDomain);
        }
        Ok(reply)
    }
}

//============ Testing =======================================================
