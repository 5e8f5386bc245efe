//! Wire types for the Gaffer bulk add-elements operation.

use std::collections::BTreeSet;

use serde::Serialize;

const ADD_ELEMENTS_CLASS: &str = "uk.gov.gchq.gaffer.operation.impl.add.AddElements";
const ENTITY_CLASS: &str = "uk.gov.gchq.gaffer.data.element.Entity";
const EDGE_CLASS: &str = "uk.gov.gchq.gaffer.data.element.Edge";
const TIMESTAMP_SET_CLASS: &str = "uk.gov.gchq.gaffer.time.RBMBackedTimestampSet";

/// Hour-bucketed temporal presence set. Timestamps are epoch seconds
/// truncated to their containing hour, deduplicated and ascending.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimestampSet {
    class: &'static str,
    #[serde(rename = "timeBucket")]
    time_bucket: &'static str,
    timestamps: Vec<i64>,
}

impl TimestampSet {
    /// Buckets each second-resolution instant into its containing hour.
    pub fn hours(seconds: impl IntoIterator<Item = i64>) -> Self {
        let hours: BTreeSet<i64> = seconds
            .into_iter()
            .map(|secs| secs - secs.rem_euclid(3600))
            .collect();

        TimestampSet {
            class: TIMESTAMP_SET_CLASS,
            time_bucket: "HOUR",
            timestamps: hours.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Observation properties shared by entities and edges.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ElementProperties {
    pub count: u64,
    pub time: TimestampSet,
}

/// One element of an add-elements payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GafferElement {
    Entity {
        class: &'static str,
        vertex: String,
        group: &'static str,
        properties: ElementProperties,
    },
    Edge {
        class: &'static str,
        source: String,
        destination: String,
        directed: bool,
        group: &'static str,
        properties: ElementProperties,
    },
}

impl GafferElement {
    pub fn entity(
        vertex: impl Into<String>,
        group: &'static str,
        count: u64,
        time: TimestampSet,
    ) -> Self {
        GafferElement::Entity {
            class: ENTITY_CLASS,
            vertex: vertex.into(),
            group,
            properties: ElementProperties { count, time },
        }
    }

    pub fn edge(
        source: impl Into<String>,
        destination: impl Into<String>,
        group: &'static str,
        count: u64,
        time: TimestampSet,
    ) -> Self {
        GafferElement::Edge {
            class: EDGE_CLASS,
            source: source.into(),
            destination: destination.into(),
            directed: true,
            group,
            properties: ElementProperties { count, time },
        }
    }

    pub fn properties(&self) -> &ElementProperties {
        match self {
            GafferElement::Entity { properties, .. } => properties,
            GafferElement::Edge { properties, .. } => properties,
        }
    }
}

/// The bulk-load envelope PUT to the store.
#[derive(Clone, Debug, Serialize)]
pub struct AddElements {
    class: &'static str,
    validate: bool,
    #[serde(rename = "skipInvalidElements")]
    skip_invalid_elements: bool,
    input: Vec<GafferElement>,
}

impl AddElements {
    pub fn new(input: Vec<GafferElement>) -> Self {
        AddElements {
            class: ADD_ELEMENTS_CLASS,
            validate: true,
            skip_invalid_elements: false,
            input,
        }
    }
}
