#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, Record, RecordType};
use std::net::Ipv4Addr;
use std::str::FromStr;

pub const ANSWER_IP: Ipv4Addr = Ipv4Addr::new(93, 184, 216, 34);

pub struct MessageBuilder;

impl MessageBuilder {
    pub fn query(id: u16, domain: &str) -> Message {
        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(Query::query(Name::from_str(domain).unwrap(), RecordType::A));
        message
    }

    pub fn answer(query: &Message, ip: Ipv4Addr) -> Message {
        let mut message = Message::new(query.id(), MessageType::Response, OpCode::Query);
        message.set_recursion_desired(query.recursion_desired());
        message.set_recursion_available(true);
        for q in query.queries() {
            message.add_query(q.clone());
            message.add_answer(Record::from_rdata(q.name().clone(), 60, RData::A(A(ip))));
        }
        message
    }

    pub fn answered_ips(message: &Message) -> Vec<Ipv4Addr> {
        message
            .answers()
            .iter()
            .filter_map(|r| match r.data() {
                RData::A(a) => Some(a.0),
                _ => None,
            })
            .collect()
    }
}
