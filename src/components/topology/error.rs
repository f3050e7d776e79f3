//! Integrity errors raised while building or rendering a topology.

use thiserror::Error;

/// Data-integrity failures. Each one is fatal to the graph instance it was
/// raised for.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TopologyError {
	/// An edge names a node id the graph does not contain.
	#[error("edge `{edge}` references unknown node `{node}`")]
	DanglingReference {
		/// Offending edge id.
		edge: String,
		/// Missing node id.
		node: String,
	},

	/// Bandwidth utilization outside 0..=100.
	#[error("edge `{edge}` has usage {usage}%, expected 0..=100")]
	InvalidRange {
		/// Offending edge id.
		edge: String,
		/// Supplied value.
		usage: i32,
	},

	/// Two nodes or two edges share an id.
	#[error("duplicate {kind} id `{id}`")]
	DuplicateId {
		/// `"node"` or `"edge"`.
		kind: &'static str,
		/// Repeated id.
		id: String,
	},

	/// A coordinate that is not a percentage in 0..=100.
	#[error("node `{node}` has invalid coordinate `{value}`")]
	InvalidCoordinate {
		/// Offending node id.
		node: String,
		/// Supplied string.
		value: String,
	},

	/// Lookup of an edge id the graph does not contain.
	#[error("unknown edge `{0}`")]
	UnknownEdge(String),

	/// The data source could not be decoded.
	#[error("malformed topology source: {0}")]
	MalformedSource(String),
}

impl From<serde_json::Error> for TopologyError {
	fn from(err: serde_json::Error) -> Self {
		TopologyError::MalformedSource(err.to_string())
	}
}
