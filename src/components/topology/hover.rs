//! Which single edge, if any, the pointer currently focuses.

use super::model::{Edge, Generation, TopologyGraph};

/// Hover state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HoverState {
	/// No edge focused.
	Idle,
	/// `edge_id` of graph `generation` is focused.
	Focused {
		/// Graph the focus was taken on.
		generation: Generation,
		/// Weak key into that graph.
		edge_id: String,
	},
}

/// Sole writer of the hover state for one topology view.
#[derive(Clone, Debug)]
pub struct HoverController {
	generation: Generation,
	state: HoverState,
}

impl HoverController {
	/// Idle controller bound to `graph`.
	pub fn new(graph: &TopologyGraph) -> Self {
		Self {
			generation: graph.generation(),
			state: HoverState::Idle,
		}
	}

	/// Focus `edge_id` of `graph`. Last enter wins. Ids the graph does not
	/// contain, and graphs other than the bound one, leave the state as is.
	pub fn on_edge_enter(&mut self, graph: &TopologyGraph, edge_id: &str) {
		if graph.generation() != self.generation {
			log::debug!("hover enter {} on stale graph ignored", edge_id);
			return;
		}
		let Some(edge) = graph.edge(edge_id) else {
			log::warn!("hover enter on unknown edge {} ignored", edge_id);
			return;
		};
		log::debug!("hover enter {}", edge.id);
		self.state = HoverState::Focused {
			generation: self.generation,
			edge_id: edge.id.clone(),
		};
	}

	/// Drop focus, but only if `edge_id` is the focused edge. A late leave
	/// from a previously hovered edge must not clear a newer focus.
	pub fn on_edge_leave(&mut self, edge_id: &str) {
		if self.active_edge_id() == Some(edge_id) {
			log::debug!("hover leave {}", edge_id);
			self.state = HoverState::Idle;
		}
	}

	/// Resolve the focused edge against `graph`. `None` when idle, when the
	/// focus belongs to another graph generation, or when the id is gone.
	pub fn current<'g>(&self, graph: &'g TopologyGraph) -> Option<&'g Edge> {
		match &self.state {
			HoverState::Focused { generation, edge_id } if *generation == graph.generation() => {
				graph.edge(edge_id)
			}
			_ => None,
		}
	}

	/// Focused edge id, without resolving it.
	pub fn active_edge_id(&self) -> Option<&str> {
		match &self.state {
			HoverState::Focused { edge_id, .. } => Some(edge_id),
			HoverState::Idle => None,
		}
	}

	/// Current state.
	pub fn state(&self) -> &HoverState {
		&self.state
	}

	/// Rebind to a replacement graph and go idle.
	pub fn reset(&mut self, graph: &TopologyGraph) {
		self.generation = graph.generation();
		self.state = HoverState::Idle;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::topology::types::TopologyData;

	fn graph() -> TopologyGraph {
		TopologyGraph::build(&TopologyData::sample().unwrap()).unwrap()
	}

	#[test]
	fn enter_then_leave_goes_idle() {
		let graph = graph();
		let mut hover = HoverController::new(&graph);
		hover.on_edge_enter(&graph, "e1");
		assert_eq!(hover.current(&graph).map(|e| e.id.as_str()), Some("e1"));
		hover.on_edge_leave("e1");
		assert!(hover.current(&graph).is_none());
		assert_eq!(hover.state(), &HoverState::Idle);
	}

	#[test]
	fn stale_leave_is_ignored() {
		let graph = graph();
		let mut hover = HoverController::new(&graph);
		hover.on_edge_enter(&graph, "e1");
		hover.on_edge_enter(&graph, "e2");
		hover.on_edge_leave("e1");
		assert_eq!(hover.current(&graph).map(|e| e.id.as_str()), Some("e2"));
	}

	#[test]
	fn leave_while_idle_is_a_no_op() {
		let graph = graph();
		let mut hover = HoverController::new(&graph);
		hover.on_edge_leave("e1");
		assert_eq!(hover.state(), &HoverState::Idle);
	}

	#[test]
	fn unknown_edge_is_never_focused() {
		let graph = graph();
		let mut hover = HoverController::new(&graph);
		hover.on_edge_enter(&graph, "ghost");
		assert_eq!(hover.state(), &HoverState::Idle);
		assert_eq!(hover.active_edge_id(), None);

		// A stray enter must not wipe a valid focus either.
		hover.on_edge_enter(&graph, "e3");
		hover.on_edge_enter(&graph, "ghost");
		assert_eq!(hover.active_edge_id(), Some("e3"));
		assert_eq!(hover.current(&graph).map(|e| e.id.as_str()), Some("e3"));
	}

	#[test]
	fn enter_against_an_unbound_graph_is_ignored() {
		let bound = graph();
		let other = graph();
		let mut hover = HoverController::new(&bound);
		hover.on_edge_enter(&other, "e1");
		assert_eq!(hover.state(), &HoverState::Idle);
	}

	#[test]
	fn focus_does_not_survive_a_new_generation() {
		let old = graph();
		let mut hover = HoverController::new(&old);
		hover.on_edge_enter(&old, "e4");

		let replacement = graph();
		assert!(replacement.edge("e4").is_some());
		assert!(hover.current(&replacement).is_none());

		hover.reset(&replacement);
		assert_eq!(hover.state(), &HoverState::Idle);
		hover.on_edge_enter(&replacement, "e4");
		assert_eq!(hover.current(&replacement).map(|e| e.usage), Some(92));
	}
}
