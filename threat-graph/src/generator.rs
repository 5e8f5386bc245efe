//! Derives graph elements from decoded events.

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use threat_graph_descriptions::{EdgeGroup, GraphElement, NodeGroup};

use crate::domain::extract_domain;
use crate::models::{parse_address, Event, EventDetail};

const EVENT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

lazy_static! {
    static ref IPV4_LITERAL: Regex = Regex::new("^[0-9]+\\.[0-9]+\\.[0-9]+\\.[0-9]+$").unwrap();
}

/// Maps one event to its ordered graph elements and its second-truncated
/// timestamp. Events with no resolvable source or destination IP produce no
/// elements; an unparseable timestamp yields the Unix epoch. Never fails.
pub fn describe_event(event: &Event) -> (Vec<GraphElement>, DateTime<Utc>) {
    let tm = event_time(&event.time);

    let src = parse_address(&event.src);
    let dest = parse_address(&event.dest);
    if src.ip.is_empty() || dest.ip.is_empty() {
        return (Vec::new(), tm);
    }

    let mut elements = Vec::new();

    elements.push(GraphElement::node(&src.ip, NodeGroup::Ip));
    elements.push(GraphElement::node(&dest.ip, NodeGroup::Ip));
    elements.push(GraphElement::edge(&src.ip, &dest.ip, EdgeGroup::IpFlow));

    if !event.origin.is_empty() {
        elements.push(GraphElement::node(&event.device, NodeGroup::Device));
        match event.origin.as_str() {
            "device" => {
                elements.push(GraphElement::edge(&event.device, &src.ip, EdgeGroup::HasIp));
            }
            "network" => {
                elements.push(GraphElement::edge(
                    &event.device,
                    &dest.ip,
                    EdgeGroup::HasIp,
                ));
            }
            _ => {}
        }
    }

    match &event.detail {
        EventDetail::DnsMessage {
            dns_message: Some(message),
        } => match message.kind.as_str() {
            "query" => {
                for record in &message.query {
                    if record.name.is_empty() {
                        continue;
                    }
                    elements.push(GraphElement::node(&record.name, NodeGroup::Hostname));
                    elements.push(GraphElement::edge(
                        &src.ip,
                        &record.name,
                        EdgeGroup::DnsQuery,
                    ));
                    push_domain_linkage(&mut elements, &record.name, &record.name);
                }
            }
            "response" => {
                for record in &message.answer {
                    if record.name.is_empty() || record.address.is_empty() {
                        continue;
                    }
                    elements.push(GraphElement::node(&record.name, NodeGroup::Hostname));
                    elements.push(GraphElement::node(&record.address, NodeGroup::Ip));
                    elements.push(GraphElement::edge(
                        &record.name,
                        &record.address,
                        EdgeGroup::Dns,
                    ));
                    push_domain_linkage(&mut elements, &record.name, &record.name);
                }
            }
            _ => {}
        },
        EventDetail::HttpRequest {
            http_request: Some(request),
        } => {
            let user_agent = request.user_agent();
            if !user_agent.is_empty() {
                elements.push(GraphElement::edge(&src.ip, user_agent, EdgeGroup::UserAgent));
            }

            let host = request.host();
            if !host.is_empty() {
                elements.push(GraphElement::node(host, NodeGroup::Server));
                elements.push(GraphElement::edge(&src.ip, host, EdgeGroup::WebRequest));
                elements.push(GraphElement::edge(&dest.ip, host, EdgeGroup::Serves));

                // Domain linkage keys off the host with any :port removed,
                // but the edge keeps the full host.
                let hostpart = host.split(':').next().unwrap_or(host);
                if !IPV4_LITERAL.is_match(hostpart) {
                    push_domain_linkage(&mut elements, hostpart, host);
                }
            }
        }
        _ => {}
    }

    (elements, tm)
}

fn push_domain_linkage(elements: &mut Vec<GraphElement>, hostname: &str, edge_source: &str) {
    let domain = extract_domain(hostname);
    if domain.is_empty() {
        return;
    }
    elements.push(GraphElement::node(&domain, NodeGroup::Domain));
    elements.push(GraphElement::edge(edge_source, &domain, EdgeGroup::InDomain));
}

/// Parses the event timestamp, truncated to the second. Absent or
/// unparseable timestamps yield the Unix epoch rather than an error.
fn event_time(time: &str) -> DateTime<Utc> {
    let tm = NaiveDateTime::parse_from_str(time, EVENT_TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .unwrap_or_default();
    tm.with_nanosecond(0).unwrap_or(tm)
}
