//! Severity classification for nodes and edges.

use super::model::{Edge, Node};
use super::types::Severity;

/// What a classifier may look at.
pub trait Classify {
	/// Severity supplied by the data source.
	fn declared_status(&self) -> Severity;

	/// Bandwidth utilization, for entities that carry one.
	fn usage_percent(&self) -> Option<u8> {
		None
	}
}

impl Classify for Node {
	fn declared_status(&self) -> Severity {
		self.status
	}
}

impl Classify for Edge {
	fn declared_status(&self) -> Severity {
		self.status
	}

	fn usage_percent(&self) -> Option<u8> {
		Some(self.usage)
	}
}

/// Maps an entity to the severity the renderer draws. Implementations are
/// total and side-effect free.
pub trait StatusClassifier {
	/// Classify `entity`.
	fn classify(&self, entity: &dyn Classify) -> Severity;
}

/// Uses the operator-supplied status as is.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeclaredStatus;

impl StatusClassifier for DeclaredStatus {
	fn classify(&self, entity: &dyn Classify) -> Severity {
		entity.declared_status()
	}
}

/// Derives severity from utilization; entities without one keep their
/// declared status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UsageThresholds {
	/// Lowest usage classified as warning.
	pub warning: u8,
	/// Lowest usage classified as danger.
	pub danger: u8,
}

impl Default for UsageThresholds {
	fn default() -> Self {
		Self {
			warning: 70,
			danger: 90,
		}
	}
}

impl UsageThresholds {
	/// Severity for a given utilization.
	pub fn severity_for(&self, usage: u8) -> Severity {
		if usage >= self.danger {
			Severity::Danger
		} else if usage >= self.warning {
			Severity::Warning
		} else {
			Severity::Normal
		}
	}
}

impl StatusClassifier for UsageThresholds {
	fn classify(&self, entity: &dyn Classify) -> Severity {
		match entity.usage_percent() {
			Some(usage) => self.severity_for(usage),
			None => entity.declared_status(),
		}
	}
}

/// Severity the thresholds suggest for an edge declared normal despite
/// running hot, or `None` when the declaration is plausible.
pub fn status_mismatch(edge: &Edge, thresholds: &UsageThresholds) -> Option<Severity> {
	let derived = thresholds.severity_for(edge.usage);
	(edge.status == Severity::Normal && derived != Severity::Normal).then_some(derived)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::topology::types::{IconKind, Position};

	fn edge(status: Severity, usage: u8) -> Edge {
		Edge {
			id: "e".into(),
			source: "a".into(),
			target: "b".into(),
			status,
			traffic: String::new(),
			usage,
		}
	}

	#[test]
	fn declared_status_passes_through() {
		assert_eq!(DeclaredStatus.classify(&edge(Severity::Danger, 5)), Severity::Danger);
		assert_eq!(DeclaredStatus.classify(&edge(Severity::Normal, 99)), Severity::Normal);
	}

	#[test]
	fn thresholds_derive_from_usage() {
		let thresholds = UsageThresholds::default();
		assert_eq!(thresholds.classify(&edge(Severity::Danger, 69)), Severity::Normal);
		assert_eq!(thresholds.classify(&edge(Severity::Normal, 70)), Severity::Warning);
		assert_eq!(thresholds.classify(&edge(Severity::Normal, 90)), Severity::Danger);
	}

	#[test]
	fn nodes_keep_declared_status_under_thresholds() {
		let node = Node {
			id: "n".into(),
			name: "N".into(),
			kind: "Switch".into(),
			model: String::new(),
			position: Position { x: 0.0, y: 0.0 },
			status: Severity::Warning,
			icon: IconKind::Router,
		};
		assert_eq!(UsageThresholds::default().classify(&node), Severity::Warning);
	}

	#[test]
	fn flags_hot_edges_declared_normal() {
		let thresholds = UsageThresholds::default();
		assert_eq!(status_mismatch(&edge(Severity::Normal, 95), &thresholds), Some(Severity::Danger));
		assert_eq!(status_mismatch(&edge(Severity::Warning, 95), &thresholds), None);
		assert_eq!(status_mismatch(&edge(Severity::Normal, 12), &thresholds), None);
	}
}
