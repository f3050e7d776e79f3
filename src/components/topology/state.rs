use super::error::TopologyError;
use super::hover::HoverController;
use super::model::{Edge, Node, TopologyGraph};
use super::nav::{NavigationCommand, Navigator, activate};
use super::scene::{DetailPanel, RenderConfig, Scene, detail_panel, render_scene};
use super::status::{DeclaredStatus, StatusClassifier};

/// Interaction context of one topology view. Every view owns its own, so
/// views never share hover state.
pub struct TopologyState {
	graph: TopologyGraph,
	hover: HoverController,
	config: RenderConfig,
	width: f64,
	height: f64,
	elapsed: f64,
	started_at: Option<f64>,
	pointer_edge: Option<String>,
	pointer_node: Option<String>,
	classifier: Box<dyn StatusClassifier>,
}

fn distance_to_segment(px: f64, py: f64, (x1, y1): (f64, f64), (x2, y2): (f64, f64)) -> f64 {
	let (dx, dy) = (x2 - x1, y2 - y1);
	let len_sq = dx * dx + dy * dy;
	let t = if len_sq < 1e-9 {
		0.0
	} else {
		(((px - x1) * dx + (py - y1) * dy) / len_sq).clamp(0.0, 1.0)
	};
	let (cx, cy) = (x1 + t * dx, y1 + t * dy);
	((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

impl TopologyState {
	/// Idle state for `graph` in a `width` x `height` container.
	pub fn new(graph: TopologyGraph, width: f64, height: f64, config: RenderConfig) -> Self {
		Self {
			hover: HoverController::new(&graph),
			graph,
			config,
			width,
			height,
			elapsed: 0.0,
			started_at: None,
			pointer_edge: None,
			pointer_node: None,
			classifier: Box::new(DeclaredStatus),
		}
	}

	/// Replace the default declared-status classifier.
	pub fn with_classifier(mut self, classifier: impl StatusClassifier + 'static) -> Self {
		self.classifier = Box::new(classifier);
		self
	}

	/// Current graph generation.
	pub fn graph(&self) -> &TopologyGraph {
		&self.graph
	}

	/// Hover state, bound to [`Self::graph`].
	pub fn hover(&self) -> &HoverController {
		&self.hover
	}

	/// Scene tunables.
	pub fn config(&self) -> &RenderConfig {
		&self.config
	}

	/// Container width, px.
	pub fn width(&self) -> f64 {
		self.width
	}

	/// Container height, px.
	pub fn height(&self) -> f64 {
		self.height
	}

	/// Seconds since the first frame.
	pub fn elapsed(&self) -> f64 {
		self.elapsed
	}

	/// Id of the node under the pointer.
	pub fn hovered_node(&self) -> Option<&str> {
		self.pointer_node.as_deref()
	}

	/// Swap in a new graph generation. Any open hover is dropped.
	pub fn replace_graph(&mut self, graph: TopologyGraph) {
		self.hover.reset(&graph);
		self.graph = graph;
		self.pointer_edge = None;
		self.pointer_node = None;
	}

	/// Advance the animation clock to a frame timestamp in milliseconds.
	pub fn tick(&mut self, timestamp_ms: f64) {
		let start = *self.started_at.get_or_insert(timestamp_ms);
		self.elapsed = ((timestamp_ms - start) / 1000.0).max(0.0);
	}

	/// Topmost node whose glyph box contains the pixel point.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<&Node> {
		let half = self.config.glyph_size / 2.0;
		self.graph.nodes().iter().rev().find(|node| {
			let (x, y) = node.position.to_screen(self.width, self.height);
			(sx - x).abs() <= half && (sy - y).abs() <= half
		})
	}

	/// Nearest edge whose hit region contains the pixel point.
	pub fn edge_at_position(&self, sx: f64, sy: f64) -> Option<&Edge> {
		let reach = self.config.hit_width / 2.0;
		let mut found: Option<(&Edge, f64)> = None;
		for (edge, source, target) in self.graph.segments() {
			let dist = distance_to_segment(
				sx,
				sy,
				source.position.to_screen(self.width, self.height),
				target.position.to_screen(self.width, self.height),
			);
			if dist <= reach && found.is_none_or(|(_, best)| dist < best) {
				found = Some((edge, dist));
			}
		}
		found.map(|(edge, _)| edge)
	}

	/// Feed a pointer position; translates hit-region changes into
	/// enter/leave events. Returns whether the hovered edge changed.
	pub fn pointer_moved(&mut self, sx: f64, sy: f64) -> bool {
		self.pointer_node = self.node_at_position(sx, sy).map(|node| node.id.clone());
		// Nodes sit above edges and swallow the pointer.
		let target = if self.pointer_node.is_some() {
			None
		} else {
			self.edge_at_position(sx, sy).map(|edge| edge.id.clone())
		};
		if target == self.pointer_edge {
			return false;
		}

		let previous = std::mem::replace(&mut self.pointer_edge, target);
		if let Some(id) = &self.pointer_edge {
			self.hover.on_edge_enter(&self.graph, id);
		}
		if let Some(id) = &previous {
			self.hover.on_edge_leave(id);
		}
		true
	}

	/// The pointer left the container.
	pub fn pointer_left(&mut self) -> bool {
		self.pointer_node = None;
		match self.pointer_edge.take() {
			Some(id) => {
				self.hover.on_edge_leave(&id);
				true
			}
			None => false,
		}
	}

	/// Activate the node under the pointer, if it is interactive.
	pub fn click(&self, sx: f64, sy: f64, navigator: &dyn Navigator) -> Option<NavigationCommand> {
		let command = activate(self.node_at_position(sx, sy)?)?;
		log::debug!("navigate to {} ({})", command.view.as_str(), command.device_model);
		navigator.dispatch(command.clone());
		Some(command)
	}

	/// CSS cursor for the pixel point.
	pub fn cursor(&self, sx: f64, sy: f64) -> &'static str {
		match self.node_at_position(sx, sy) {
			Some(node) if node.is_interactive() => "pointer",
			Some(_) => "default",
			None if self.edge_at_position(sx, sy).is_some() => "pointer",
			None => "default",
		}
	}

	/// Detail panel for the focused edge.
	pub fn panel(&self) -> Result<Option<DetailPanel>, TopologyError> {
		detail_panel(&self.graph, &self.hover, self.classifier.as_ref())
	}

	/// Scene for the current frame.
	pub fn scene(&self) -> Result<Scene, TopologyError> {
		let mut scene = render_scene(
			&self.graph,
			&self.hover,
			self.elapsed,
			self.classifier.as_ref(),
			&self.config,
		)?;
		if let Some(id) = &self.pointer_node {
			scene.hover_node(id, &self.config);
		}
		Ok(scene)
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use super::*;
	use crate::components::topology::types::{Severity, TopologyData};

	fn state() -> TopologyState {
		let graph = TopologyGraph::build(&TopologyData::sample().unwrap()).unwrap();
		TopologyState::new(graph, 1000.0, 500.0, RenderConfig::default())
	}

	fn active(state: &TopologyState) -> Option<String> {
		state.hover().current(state.graph()).map(|e| e.id.clone())
	}

	#[test]
	fn hit_testing_prefers_nodes_over_edges() {
		let state = state();
		assert_eq!(state.node_at_position(300.0, 300.0).unwrap().id, "s7700");
		assert_eq!(state.edge_at_position(505.0, 125.0).unwrap().id, "e1");
		assert!(state.edge_at_position(515.0, 125.0).is_none());
		assert_eq!(state.edge_at_position(500.0, 305.0).unwrap().id, "e4");
	}

	#[test]
	fn pointer_motion_drives_hover() {
		let mut state = state();
		assert!(state.pointer_moved(505.0, 125.0));
		assert_eq!(active(&state).as_deref(), Some("e1"));
		assert!(!state.pointer_moved(504.0, 126.0));

		assert!(state.pointer_moved(500.0, 305.0));
		assert_eq!(active(&state).as_deref(), Some("e4"));

		// Over Core-01's glyph: edges underneath are not hovered.
		assert!(state.pointer_moved(300.0, 300.0));
		assert_eq!(active(&state), None);

		state.pointer_moved(500.0, 305.0);
		assert!(state.pointer_left());
		assert_eq!(active(&state), None);
		assert!(!state.pointer_left());
	}

	#[test]
	fn click_navigates_only_from_managed_nodes() {
		let state = state();
		let sent = RefCell::new(Vec::new());
		let navigator = |command: NavigationCommand| sent.borrow_mut().push(command);

		assert!(state.click(500.0, 75.0, &navigator).is_none());
		assert!(state.click(900.0, 450.0, &navigator).is_none());
		let command = state.click(300.0, 300.0, &navigator).unwrap();
		assert_eq!(command.device_model, "S7700");
		assert_eq!(sent.borrow().as_slice(), &[command]);
	}

	#[test]
	fn cursor_shows_affordance() {
		let state = state();
		assert_eq!(state.cursor(300.0, 300.0), "pointer");
		assert_eq!(state.cursor(500.0, 75.0), "default");
		assert_eq!(state.cursor(505.0, 125.0), "pointer");
		assert_eq!(state.cursor(900.0, 450.0), "default");
	}

	#[test]
	fn replacing_the_graph_clears_hover() {
		let mut state = state();
		state.pointer_moved(500.0, 305.0);
		assert!(state.panel().unwrap().is_some());

		let fresh = TopologyGraph::build(&TopologyData::sample().unwrap()).unwrap();
		state.replace_graph(fresh);
		assert_eq!(active(&state), None);
		assert!(state.panel().unwrap().is_none());
		assert!(state.pointer_moved(500.0, 305.0));
		assert_eq!(active(&state).as_deref(), Some("e4"));
	}

	#[test]
	fn hover_stays_live_across_replacements() {
		let mut state = state();
		for _ in 0..3 {
			let fresh = TopologyGraph::build(&TopologyData::sample().unwrap()).unwrap();
			let generation = fresh.generation();
			state.replace_graph(fresh);
			assert_eq!(state.graph().generation(), generation);

			assert!(state.pointer_moved(500.0, 305.0));
			state.pointer_moved(10.0, 10.0);
			assert!(state.pointer_moved(500.0, 305.0));
			assert_eq!(active(&state).as_deref(), Some("e4"));
			assert_eq!(state.hover().active_edge_id(), Some("e4"));
		}
	}

	#[test]
	fn hovered_node_is_tracked_and_magnified() {
		let mut state = state();
		state.pointer_moved(300.0, 300.0);
		assert_eq!(state.hovered_node(), Some("s7700"));
		let scene = state.scene().unwrap();
		let core1 = scene.nodes.iter().find(|n| n.id == "s7700").unwrap();
		assert_eq!(core1.scale, state.config().node_hover_scale);
		assert!(scene.nodes.iter().filter(|n| n.id != "s7700").all(|n| n.scale == 1.0));

		state.pointer_moved(505.0, 125.0);
		assert_eq!(state.hovered_node(), None);
		state.pointer_moved(300.0, 300.0);
		state.pointer_left();
		assert_eq!(state.hovered_node(), None);
		assert!(state.scene().unwrap().nodes.iter().all(|n| n.scale == 1.0));

		state.pointer_moved(300.0, 300.0);
		state.replace_graph(TopologyGraph::build(&TopologyData::sample().unwrap()).unwrap());
		assert_eq!(state.hovered_node(), None);
	}

	#[test]
	fn clock_counts_from_first_frame() {
		let mut state = state();
		state.tick(1_000.0);
		assert_eq!(state.elapsed(), 0.0);
		state.tick(3_500.0);
		assert!((state.elapsed() - 2.5).abs() < 1e-9);
	}

	#[test]
	fn classifier_is_pluggable() {
		use crate::components::topology::status::UsageThresholds;

		let state = state().with_classifier(UsageThresholds::default());
		let scene = state.scene().unwrap();
		let e4 = scene.edges.iter().find(|e| e.id == "e4").unwrap();
		assert_eq!(e4.severity, Severity::Danger);
	}
}
