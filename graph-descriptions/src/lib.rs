//! Graph data model for the threat-graph pipeline: element identities, the
//! windowed aggregation summary, and the Gaffer wire representation.

pub mod element;
pub mod gaffer;
pub mod summary;

pub use element::{Edge, EdgeGroup, GraphElement, Node, NodeGroup};
pub use gaffer::{AddElements, ElementProperties, GafferElement, TimestampSet};
pub use summary::Summary;
