//! Drawable scene as a pure function of graph, hover state and elapsed time.
//!
//! Nothing here touches a rendering surface; the canvas layer in `render`
//! only paints what [`render_scene`] returns. Animated values (decals,
//! marching dashes, entrance reveals) are computed from elapsed seconds so
//! the host can re-invoke the renderer on any frame.

use super::error::TopologyError;
use super::hover::HoverController;
use super::model::{Edge, TopologyGraph};
use super::status::StatusClassifier;
use super::types::{IconKind, Position, Severity};

/// Stroke start color shared by every edge gradient.
pub const LINK_COLOR: &str = "#25c0f4";

/// Tunables for the scene. `Default` reproduces the dashboard's look.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
	/// Decal cycle in seconds for an idle link.
	pub base_decal_period: f64,
	/// Floor for the decal cycle.
	pub min_decal_period: f64,
	/// Dash length on alert edges, px.
	pub dash_on: f64,
	/// Gap length on alert edges, px.
	pub dash_off: f64,
	/// Seconds for the dash pattern to march `dash_travel` px.
	pub dash_cycle: f64,
	/// Dash offset travelled per cycle, px.
	pub dash_travel: f64,
	/// Visible stroke width, px.
	pub stroke_width: f64,
	/// Stroke width of the focused edge, px.
	pub active_stroke_width: f64,
	/// Opacity of edges that are not focused.
	pub idle_opacity: f64,
	/// Opacity of the focused edge.
	pub active_opacity: f64,
	/// Width of the invisible pointer target around each edge, px.
	pub hit_width: f64,
	/// Side of the square node glyph, px.
	pub glyph_size: f64,
	/// Radius of the traffic decal, px.
	pub decal_radius: f64,
	/// Seconds for edges to draw in after mount.
	pub reveal_duration: f64,
	/// Seconds before the first node appears.
	pub node_delay: f64,
	/// Extra delay per node, seconds.
	pub node_stagger: f64,
	/// Seconds for one node to fade in.
	pub node_fade: f64,
	/// Glyph magnification while the pointer rests on a node.
	pub node_hover_scale: f64,
}

impl Default for RenderConfig {
	fn default() -> Self {
		Self {
			base_decal_period: 3.0,
			min_decal_period: 0.2,
			dash_on: 8.0,
			dash_off: 8.0,
			dash_cycle: 10.0,
			dash_travel: 100.0,
			stroke_width: 2.0,
			active_stroke_width: 4.0,
			idle_opacity: 0.6,
			active_opacity: 1.0,
			hit_width: 20.0,
			glyph_size: 64.0,
			decal_radius: 3.0,
			reveal_duration: 1.5,
			node_delay: 0.5,
			node_stagger: 0.1,
			node_fade: 0.4,
			node_hover_scale: 1.1,
		}
	}
}

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

fn ease_in_out_cubic(t: f64) -> f64 {
	if t < 0.5 {
		4.0 * t * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
	}
}

/// Seconds per decal traversal. Busier links cycle faster.
pub fn decal_period(usage: u8, config: &RenderConfig) -> f64 {
	(config.base_decal_period - f64::from(usage) / 50.0).max(config.min_decal_period)
}

/// Fraction of the path a decal has covered, in `[0, 1)`.
pub fn decal_progress(elapsed: f64, period: f64) -> f64 {
	if period <= 0.0 {
		return 0.0;
	}
	(elapsed.max(0.0) / period).fract()
}

/// Dash offset for marching dashes on alert edges.
pub fn dash_offset(elapsed: f64, config: &RenderConfig) -> f64 {
	if config.dash_cycle <= 0.0 {
		return 0.0;
	}
	-(elapsed.max(0.0).rem_euclid(config.dash_cycle) / config.dash_cycle) * config.dash_travel
}

/// Drawn fraction of each edge during the mount animation.
pub fn edge_reveal(elapsed: f64, config: &RenderConfig) -> f64 {
	if config.reveal_duration <= 0.0 {
		return 1.0;
	}
	ease_in_out_cubic((elapsed / config.reveal_duration).clamp(0.0, 1.0))
}

/// Opacity/scale factor of the `index`-th node during its staggered entrance.
pub fn node_reveal(index: usize, elapsed: f64, config: &RenderConfig) -> f64 {
	let start = config.node_delay + index as f64 * config.node_stagger;
	if config.node_fade <= 0.0 {
		return if elapsed >= start { 1.0 } else { 0.0 };
	}
	ease_out_cubic(((elapsed - start) / config.node_fade).clamp(0.0, 1.0))
}

/// A node as drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeGlyph {
	/// Node id.
	pub id: String,
	/// Primary label.
	pub name: String,
	/// Secondary label: model, or role when unmanaged.
	pub caption: String,
	/// Center of the glyph.
	pub position: Position,
	/// Classified condition.
	pub severity: Severity,
	/// Pictogram.
	pub icon: IconKind,
	/// Receives pointer affordance and click handling.
	pub interactive: bool,
	/// Pulsing alert badge in the corner.
	pub badge: bool,
	/// Side of the glyph box, px.
	pub size: f64,
	/// Entrance progress, 0 to 1.
	pub reveal: f64,
	/// Hover magnification, 1 unless the pointer is on the glyph.
	pub scale: f64,
}

/// Dash pattern of an alert edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DashPattern {
	/// Dash length, px.
	pub on: f64,
	/// Gap length, px.
	pub off: f64,
	/// Current offset, px.
	pub offset: f64,
}

/// Visible stroke of an edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
	/// Line width, px.
	pub width: f64,
	/// Opacity, 0 to 1.
	pub opacity: f64,
	/// `Some` for dashed strokes.
	pub dash: Option<DashPattern>,
	/// Drawn fraction of the line, 0 to 1.
	pub reveal: f64,
}

/// Invisible pointer target laid over the edge's line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitRegion {
	/// Total width, px.
	pub width: f64,
}

/// Moving traffic marker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decal {
	/// Seconds per traversal.
	pub period: f64,
	/// Fraction of the path covered.
	pub progress: f64,
	/// Current location.
	pub position: Position,
	/// Marker radius, px.
	pub radius: f64,
}

/// An edge as drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeSprite {
	/// Edge id.
	pub id: String,
	/// Source endpoint.
	pub from: Position,
	/// Target endpoint.
	pub to: Position,
	/// Classified condition.
	pub severity: Severity,
	/// Focused by the pointer.
	pub active: bool,
	/// Visible line.
	pub stroke: StrokeStyle,
	/// Gradient stops from source to target.
	pub gradient: [&'static str; 2],
	/// Blurred halo around the line.
	pub glow: bool,
	/// Pointer target.
	pub hit_region: HitRegion,
	/// Traffic marker; only normal edges carry one.
	pub decal: Option<Decal>,
}

/// Live status of the focused link.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailPanel {
	/// Focused edge id.
	pub edge_id: String,
	/// Source node display name.
	pub source_name: String,
	/// Target node display name.
	pub target_name: String,
	/// Bandwidth utilization, 0..=100.
	pub usage: u8,
	/// Throughput label.
	pub traffic: String,
	/// Classified condition.
	pub severity: Severity,
}

impl DetailPanel {
	/// `"Source ↔ Target"`.
	pub fn endpoints_label(&self) -> String {
		format!("{} \u{2194} {}", self.source_name, self.target_name)
	}

	/// Fill width of the usage bar, as a CSS percentage.
	pub fn usage_bar_width(&self) -> String {
		format!("{}%", self.usage)
	}
}

/// Everything a surface needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
	/// Edges, drawn first.
	pub edges: Vec<EdgeSprite>,
	/// Nodes, drawn over edges.
	pub nodes: Vec<NodeGlyph>,
	/// Present while an edge is focused.
	pub panel: Option<DetailPanel>,
}

impl Scene {
	/// Magnify the glyph of `node_id`, the node under the pointer.
	pub fn hover_node(&mut self, node_id: &str, config: &RenderConfig) {
		if let Some(glyph) = self.nodes.iter_mut().find(|glyph| glyph.id == node_id) {
			glyph.scale = config.node_hover_scale;
		}
	}
}

/// Project the focused edge, if any, into a detail panel.
pub fn detail_panel(
	graph: &TopologyGraph,
	hover: &HoverController,
	classifier: &dyn StatusClassifier,
) -> Result<Option<DetailPanel>, TopologyError> {
	let Some(edge) = hover.current(graph) else {
		return Ok(None);
	};
	let (source, target) = graph.endpoints(edge)?;
	Ok(Some(DetailPanel {
		edge_id: edge.id.clone(),
		source_name: source.name.clone(),
		target_name: target.name.clone(),
		usage: edge.usage,
		traffic: edge.traffic.clone(),
		severity: classifier.classify(edge),
	}))
}

fn edge_sprite(
	graph: &TopologyGraph,
	edge: &Edge,
	active: bool,
	elapsed: f64,
	classifier: &dyn StatusClassifier,
	config: &RenderConfig,
) -> Result<EdgeSprite, TopologyError> {
	let (source, target) = graph.endpoints(edge)?;
	let (from, to) = (source.position, target.position);
	let severity = classifier.classify(edge);
	let alert = severity.is_alert();

	let dash = alert.then(|| DashPattern {
		on: config.dash_on,
		off: config.dash_off,
		offset: dash_offset(elapsed, config),
	});
	let (width, opacity) = if active {
		(config.active_stroke_width, config.active_opacity)
	} else {
		(config.stroke_width, config.idle_opacity)
	};
	let decal = (!alert).then(|| {
		let period = decal_period(edge.usage, config);
		let progress = decal_progress(elapsed, period);
		Decal {
			period,
			progress,
			position: from.lerp(to, progress),
			radius: config.decal_radius,
		}
	});

	Ok(EdgeSprite {
		id: edge.id.clone(),
		from,
		to,
		severity,
		active,
		stroke: StrokeStyle {
			width,
			opacity,
			dash,
			reveal: edge_reveal(elapsed, config),
		},
		gradient: [LINK_COLOR, severity.color()],
		glow: alert || active,
		hit_region: HitRegion {
			width: config.hit_width,
		},
		decal,
	})
}

/// Render `graph` under `hover` at `elapsed` seconds since mount.
///
/// Fails with [`TopologyError::DanglingReference`] rather than skipping an
/// edge whose endpoint cannot be resolved.
pub fn render_scene(
	graph: &TopologyGraph,
	hover: &HoverController,
	elapsed: f64,
	classifier: &dyn StatusClassifier,
	config: &RenderConfig,
) -> Result<Scene, TopologyError> {
	let active_id = hover.current(graph).map(|edge| edge.id.as_str());

	let edges = graph
		.edges()
		.iter()
		.map(|edge| {
			let active = active_id == Some(edge.id.as_str());
			edge_sprite(graph, edge, active, elapsed, classifier, config)
		})
		.collect::<Result<Vec<_>, _>>()?;

	let nodes = graph
		.nodes()
		.iter()
		.enumerate()
		.map(|(i, node)| {
			let severity = classifier.classify(node);
			NodeGlyph {
				id: node.id.clone(),
				name: node.name.clone(),
				caption: node.caption().to_string(),
				position: node.position,
				severity,
				icon: node.icon,
				interactive: node.is_interactive(),
				badge: severity.is_alert(),
				size: config.glyph_size,
				reveal: node_reveal(i, elapsed, config),
				scale: 1.0,
			}
		})
		.collect();

	Ok(Scene {
		edges,
		nodes,
		panel: detail_panel(graph, hover, classifier)?,
	})
}
