use std::fmt;

/// Group labels for graph vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeGroup {
    Ip,
    Hostname,
    Domain,
    Device,
    Server,
}

impl NodeGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeGroup::Ip => "ip",
            NodeGroup::Hostname => "hostname",
            NodeGroup::Domain => "domain",
            NodeGroup::Device => "device",
            NodeGroup::Server => "server",
        }
    }
}

impl fmt::Display for NodeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Group labels for graph edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeGroup {
    IpFlow,
    HasIp,
    DnsQuery,
    Dns,
    InDomain,
    UserAgent,
    WebRequest,
    Serves,
}

impl EdgeGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeGroup::IpFlow => "ipflow",
            EdgeGroup::HasIp => "hasip",
            EdgeGroup::DnsQuery => "dnsquery",
            EdgeGroup::Dns => "dns",
            EdgeGroup::InDomain => "indomain",
            EdgeGroup::UserAgent => "useragent",
            EdgeGroup::WebRequest => "webrequest",
            EdgeGroup::Serves => "serves",
        }
    }
}

impl fmt::Display for EdgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vertex identity. Two nodes with the same name and group are the same
/// observation for aggregation purposes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Node {
    pub name: String,
    pub group: NodeGroup,
}

/// A directed edge identity between two vertex names.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub source: String,
    pub destination: String,
    pub group: EdgeGroup,
}

/// One element derived from an event, fed into a [`crate::Summary`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GraphElement {
    Node(Node),
    Edge(Edge),
}

impl GraphElement {
    pub fn node(name: impl Into<String>, group: NodeGroup) -> Self {
        GraphElement::Node(Node {
            name: name.into(),
            group,
        })
    }

    pub fn edge(
        source: impl Into<String>,
        destination: impl Into<String>,
        group: EdgeGroup,
    ) -> Self {
        GraphElement::Edge(Edge {
            source: source.into(),
            destination: destination.into(),
            group,
        })
    }
}

impl From<Node> for GraphElement {
    fn from(node: Node) -> Self {
        GraphElement::Node(node)
    }
}

impl From<Edge> for GraphElement {
    fn from(edge: Edge) -> Self {
        GraphElement::Edge(edge)
    }
}
