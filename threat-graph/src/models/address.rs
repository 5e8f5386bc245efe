/// A transport endpoint decomposed from an event address-tuple list. Fields
/// the tuples never set stay empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EndpointAddress {
    pub ip: String,
    pub port: String,
    pub protocol: String,
}

/// Decomposes an ordered `"<class>:<value>"` tuple list into an endpoint
/// address. Later entries of a class overwrite earlier ones; unrecognized
/// classes are ignored.
pub fn parse_address(tuples: &[String]) -> EndpointAddress {
    let mut endpoint = EndpointAddress::default();

    for tuple in tuples {
        let (class, value) = match tuple.split_once(':') {
            Some((class, value)) => (class, value),
            None => (tuple.as_str(), ""),
        };

        match class {
            "ipv4" | "ipv6" => endpoint.ip = value.to_string(),
            "tcp" => {
                endpoint.port = value.to_string();
                endpoint.protocol = "tcp".to_string();
            }
            "udp" => {
                endpoint.port = value.to_string();
                endpoint.protocol = "udp".to_string();
            }
            "icmp" => {
                endpoint.port.clear();
                endpoint.protocol = "icmp".to_string();
            }
            _ => {}
        }
    }

    endpoint
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuples(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_typical_tcp_endpoint() {
        let endpoint = parse_address(&tuples(&["ipv4:10.0.2.15", "tcp:34060", "http"]));
        assert_eq!(
            endpoint,
            EndpointAddress {
                ip: "10.0.2.15".to_string(),
                port: "34060".to_string(),
                protocol: "tcp".to_string(),
            }
        );
    }

    #[test]
    fn test_last_entry_of_a_class_wins() {
        let endpoint = parse_address(&tuples(&["ipv4:10.0.2.15", "ipv6:2001:db8::1"]));
        assert_eq!(endpoint.ip, "2001:db8::1");

        let endpoint = parse_address(&tuples(&["tcp:80", "udp:53"]));
        assert_eq!(endpoint.port, "53");
        assert_eq!(endpoint.protocol, "udp");
    }

    #[test]
    fn test_icmp_clears_previously_set_port() {
        let endpoint = parse_address(&tuples(&["ipv4:10.0.2.15", "tcp:80", "icmp"]));
        assert_eq!(endpoint.port, "");
        assert_eq!(endpoint.protocol, "icmp");
    }

    #[test]
    fn test_unknown_classes_are_ignored() {
        let endpoint = parse_address(&tuples(&["ipv4:10.0.2.15", "http", "vlan:42"]));
        assert_eq!(endpoint.ip, "10.0.2.15");
        assert_eq!(endpoint.port, "");
        assert_eq!(endpoint.protocol, "");
    }

    #[test]
    fn test_bare_class_yields_empty_value() {
        let endpoint = parse_address(&tuples(&["ipv4"]));
        assert_eq!(endpoint.ip, "");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_address(&[]), EndpointAddress::default());
    }
}
