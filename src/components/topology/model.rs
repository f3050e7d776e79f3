//! Immutable node/edge graph built from a validated [`TopologyData`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::error::TopologyError;
use super::status::{UsageThresholds, status_mismatch};
use super::types::{IconKind, Position, Severity, TopologyData};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Identity of one built graph. Two builds never share a generation, even
/// from identical data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Generation(u64);

impl Generation {
	fn next() -> Self {
		Generation(NEXT_GENERATION.fetch_add(1, Ordering::Relaxed))
	}
}

/// A device or external entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Unique stable identifier.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Device role label.
	pub kind: String,
	/// Device model key; empty means not manageable.
	pub model: String,
	/// Fixed normalized position.
	pub position: Position,
	/// Declared condition.
	pub status: Severity,
	/// Pictogram tag.
	pub icon: IconKind,
}

impl Node {
	/// Whether activating this node navigates anywhere.
	pub fn is_interactive(&self) -> bool {
		!self.model.is_empty()
	}

	/// Secondary label under the glyph.
	pub fn caption(&self) -> &str {
		if self.model.is_empty() { &self.kind } else { &self.model }
	}
}

/// A logical or physical link between two nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	/// Unique identifier.
	pub id: String,
	/// One endpoint's node id.
	pub source: String,
	/// The other endpoint's node id.
	pub target: String,
	/// Declared condition.
	pub status: Severity,
	/// Point-in-time throughput label.
	pub traffic: String,
	/// Bandwidth utilization, 0..=100.
	pub usage: u8,
}

/// Validated, read-only topology. Replaced wholesale, never edited.
#[derive(Clone, Debug)]
pub struct TopologyGraph {
	generation: Generation,
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	node_index: HashMap<String, usize>,
	edge_index: HashMap<String, usize>,
	// (source, target) node positions in `nodes`, parallel to `edges`.
	endpoint_index: Vec<(usize, usize)>,
}

impl TopologyGraph {
	/// Validate `data` and build a new graph generation.
	pub fn build(data: &TopologyData) -> Result<Self, TopologyError> {
		let mut nodes = Vec::with_capacity(data.nodes.len());
		let mut node_index = HashMap::with_capacity(data.nodes.len());
		for spec in &data.nodes {
			if node_index.insert(spec.id.clone(), nodes.len()).is_some() {
				return Err(TopologyError::DuplicateId {
					kind: "node",
					id: spec.id.clone(),
				});
			}
			nodes.push(Node {
				id: spec.id.clone(),
				name: spec.name.clone(),
				kind: spec.kind.clone(),
				model: spec.model.clone(),
				position: Position::parse(&spec.id, &spec.x, &spec.y)?,
				status: spec.status,
				icon: spec.icon,
			});
		}

		let mut edges = Vec::with_capacity(data.edges.len());
		let mut edge_index = HashMap::with_capacity(data.edges.len());
		let mut endpoint_index = Vec::with_capacity(data.edges.len());
		for spec in &data.edges {
			let resolve = |endpoint: &String| {
				node_index
					.get(endpoint)
					.copied()
					.ok_or_else(|| TopologyError::DanglingReference {
						edge: spec.id.clone(),
						node: endpoint.clone(),
					})
			};
			let endpoints = (resolve(&spec.source)?, resolve(&spec.target)?);
			let usage = u8::try_from(spec.usage)
				.ok()
				.filter(|usage| *usage <= 100)
				.ok_or_else(|| TopologyError::InvalidRange {
					edge: spec.id.clone(),
					usage: spec.usage,
				})?;
			if edge_index.insert(spec.id.clone(), edges.len()).is_some() {
				return Err(TopologyError::DuplicateId {
					kind: "edge",
					id: spec.id.clone(),
				});
			}
			endpoint_index.push(endpoints);
			edges.push(Edge {
				id: spec.id.clone(),
				source: spec.source.clone(),
				target: spec.target.clone(),
				status: spec.status,
				traffic: spec.traffic.clone(),
				usage,
			});
		}

		let thresholds = UsageThresholds::default();
		for edge in &edges {
			if let Some(derived) = status_mismatch(edge, &thresholds) {
				log::warn!(
					"edge {} is declared {:?} at {}% usage (thresholds suggest {:?})",
					edge.id,
					edge.status,
					edge.usage,
					derived
				);
			}
		}

		let generation = Generation::next();
		log::info!(
			"built topology generation {:?}: {} nodes, {} edges",
			generation,
			nodes.len(),
			edges.len()
		);

		Ok(Self {
			generation,
			nodes,
			edges,
			node_index,
			edge_index,
			endpoint_index,
		})
	}

	/// This graph's identity.
	pub fn generation(&self) -> Generation {
		self.generation
	}

	/// All nodes, in source order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// All edges, in source order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Look up a node by id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.node_index.get(id).map(|&idx| &self.nodes[idx])
	}

	/// Look up an edge by id.
	pub fn edge(&self, id: &str) -> Option<&Edge> {
		self.edge_index.get(id).map(|&idx| &self.edges[idx])
	}

	/// Resolve an edge's two endpoint nodes.
	pub fn endpoints(&self, edge: &Edge) -> Result<(&Node, &Node), TopologyError> {
		let resolve = |id: &String| {
			self.node(id).ok_or_else(|| TopologyError::DanglingReference {
				edge: edge.id.clone(),
				node: id.clone(),
			})
		};
		Ok((resolve(&edge.source)?, resolve(&edge.target)?))
	}

	/// Every edge with its source and target node, in source order. Endpoints
	/// were resolved at build time, so this cannot fail.
	pub fn segments(&self) -> impl Iterator<Item = (&Edge, &Node, &Node)> {
		self.edges
			.iter()
			.zip(&self.endpoint_index)
			.map(|(edge, &(source, target))| (edge, &self.nodes[source], &self.nodes[target]))
	}

	/// Endpoint coordinates of the edge with id `edge_id`.
	pub fn edge_coordinates(&self, edge_id: &str) -> Result<(Position, Position), TopologyError> {
		let edge = self
			.edge(edge_id)
			.ok_or_else(|| TopologyError::UnknownEdge(edge_id.to_string()))?;
		let (source, target) = self.endpoints(edge)?;
		Ok((source.position, target.position))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::topology::types::{EdgeSpec, NodeSpec};

	fn node(id: &str, model: &str, x: &str, y: &str) -> NodeSpec {
		NodeSpec {
			id: id.into(),
			name: id.to_uppercase(),
			kind: "Switch".into(),
			model: model.into(),
			x: x.into(),
			y: y.into(),
			status: Severity::Normal,
			icon: IconKind::Server,
		}
	}

	fn edge(id: &str, source: &str, target: &str, usage: i32) -> EdgeSpec {
		EdgeSpec {
			id: id.into(),
			source: source.into(),
			target: target.into(),
			status: Severity::Normal,
			traffic: "1 Gbps".into(),
			usage,
		}
	}

	fn data(edges: Vec<EdgeSpec>) -> TopologyData {
		TopologyData {
			nodes: vec![node("a", "A1", "10%", "20%"), node("b", "", "90%", "80%")],
			edges,
		}
	}

	#[test]
	fn builds_lookups() {
		let graph = TopologyGraph::build(&data(vec![edge("ab", "a", "b", 50)])).unwrap();
		assert_eq!(graph.node("a").unwrap().model, "A1");
		assert!(graph.node("zz").is_none());
		assert_eq!(graph.edge("ab").unwrap().usage, 50);
		let (from, to) = graph.edge_coordinates("ab").unwrap();
		assert_eq!(from, Position { x: 10.0, y: 20.0 });
		assert_eq!(to, Position { x: 90.0, y: 80.0 });
	}

	#[test]
	fn dangling_source_and_target_are_rejected() {
		for bad in [edge("x", "ghost", "b", 1), edge("x", "a", "ghost", 1)] {
			let err = TopologyGraph::build(&data(vec![bad])).unwrap_err();
			assert_eq!(
				err,
				TopologyError::DanglingReference {
					edge: "x".into(),
					node: "ghost".into()
				}
			);
		}
	}

	#[test]
	fn usage_must_be_a_percentage() {
		for usage in [-1, 101, 300] {
			let err = TopologyGraph::build(&data(vec![edge("ab", "a", "b", usage)])).unwrap_err();
			assert!(matches!(err, TopologyError::InvalidRange { usage: u, .. } if u == usage));
		}
		for usage in [0, 100] {
			assert!(TopologyGraph::build(&data(vec![edge("ab", "a", "b", usage)])).is_ok());
		}
	}

	#[test]
	fn duplicate_ids_are_rejected() {
		let mut dup_nodes = data(vec![]);
		dup_nodes.nodes.push(node("a", "", "0%", "0%"));
		assert!(matches!(
			TopologyGraph::build(&dup_nodes),
			Err(TopologyError::DuplicateId { kind: "node", .. })
		));

		let dup_edges = data(vec![edge("ab", "a", "b", 1), edge("ab", "b", "a", 2)]);
		assert!(matches!(
			TopologyGraph::build(&dup_edges),
			Err(TopologyError::DuplicateId { kind: "edge", .. })
		));
	}

	#[test]
	fn each_build_is_a_new_generation() {
		let source = data(vec![]);
		let first = TopologyGraph::build(&source).unwrap();
		let second = TopologyGraph::build(&source).unwrap();
		assert_ne!(first.generation(), second.generation());
	}

	#[test]
	fn foreign_edge_fails_endpoint_resolution() {
		let graph = TopologyGraph::build(&data(vec![])).unwrap();
		let foreign = Edge {
			id: "zz".into(),
			source: "a".into(),
			target: "nowhere".into(),
			status: Severity::Normal,
			traffic: String::new(),
			usage: 0,
		};
		assert!(matches!(
			graph.endpoints(&foreign),
			Err(TopologyError::DanglingReference { node, .. }) if node == "nowhere"
		));
		assert_eq!(
			graph.edge_coordinates("zz"),
			Err(TopologyError::UnknownEdge("zz".into()))
		);
	}

	#[test]
	fn segments_pair_each_edge_with_its_endpoints() {
		let graph = TopologyGraph::build(&data(vec![edge("ab", "a", "b", 1), edge("ba", "b", "a", 2)])).unwrap();
		let pairs: Vec<_> = graph
			.segments()
			.map(|(edge, source, target)| (edge.id.as_str(), source.id.as_str(), target.id.as_str()))
			.collect();
		assert_eq!(pairs, [("ab", "a", "b"), ("ba", "b", "a")]);
	}

	#[test]
	fn caption_falls_back_to_kind() {
		let graph = TopologyGraph::build(&data(vec![])).unwrap();
		assert_eq!(graph.node("a").unwrap().caption(), "A1");
		assert_eq!(graph.node("b").unwrap().caption(), "Switch");
		assert!(!graph.node("b").unwrap().is_interactive());
	}
}
