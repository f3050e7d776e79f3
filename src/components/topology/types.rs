//! Source descriptors and small value types shared by the topology core.

use serde::{Deserialize, Serialize};

use super::error::TopologyError;

/// Three-level condition applied to nodes and edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
	/// Healthy.
	#[default]
	Normal,
	/// High load.
	Warning,
	/// Congested or failing.
	Danger,
}

impl Severity {
	/// Whether the condition calls for dashed, glowing presentation.
	pub fn is_alert(self) -> bool {
		self != Severity::Normal
	}

	/// Legend label.
	pub fn label(self) -> &'static str {
		match self {
			Severity::Normal => "Normal",
			Severity::Warning => "High Load",
			Severity::Danger => "Congested",
		}
	}

	/// Accent color used for badges, bars and gradient ends.
	pub fn color(self) -> &'static str {
		match self {
			Severity::Normal => "#10b981",
			Severity::Warning => "#f59e0b",
			Severity::Danger => "#ef4444",
		}
	}
}

/// Pictogram tag for a node glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKind {
	/// External network.
	Cloud,
	/// Firewall or gateway.
	Shield,
	/// Core switch.
	Server,
	/// Access switch.
	Router,
}

impl IconKind {
	/// Text pictogram drawn inside the glyph box.
	pub fn glyph(self) -> &'static str {
		match self {
			IconKind::Cloud => "\u{2601}",
			IconKind::Shield => "\u{26E8}",
			IconKind::Server => "\u{25A4}",
			IconKind::Router => "\u{21C4}",
		}
	}
}

/// Normalized coordinates, in percent of the container's width and height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
	/// Horizontal percentage, 0 to 100.
	pub x: f64,
	/// Vertical percentage, 0 to 100.
	pub y: f64,
}

impl Position {
	/// Parse a pair of `"NN%"` strings owned by node `node`.
	pub fn parse(node: &str, x: &str, y: &str) -> Result<Self, TopologyError> {
		Ok(Self {
			x: parse_percent(node, x)?,
			y: parse_percent(node, y)?,
		})
	}

	/// Pixel coordinates inside a `width` x `height` container.
	pub fn to_screen(self, width: f64, height: f64) -> (f64, f64) {
		(self.x / 100.0 * width, self.y / 100.0 * height)
	}

	/// Point at fraction `t` of the way from `self` to `other`.
	pub fn lerp(self, other: Position, t: f64) -> Position {
		Position {
			x: self.x + (other.x - self.x) * t,
			y: self.y + (other.y - self.y) * t,
		}
	}
}

fn parse_percent(node: &str, value: &str) -> Result<f64, TopologyError> {
	let invalid = || TopologyError::InvalidCoordinate {
		node: node.to_string(),
		value: value.to_string(),
	};
	let number = value.trim().strip_suffix('%').ok_or_else(invalid)?;
	let parsed: f64 = number.trim().parse().map_err(|_| invalid())?;
	if !(0.0..=100.0).contains(&parsed) {
		return Err(invalid());
	}
	Ok(parsed)
}

/// A node as supplied by the data source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
	/// Unique stable identifier.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Device role label.
	#[serde(rename = "type")]
	pub kind: String,
	/// Device model key; empty for non-manageable entities.
	#[serde(default)]
	pub model: String,
	/// Horizontal coordinate, e.g. `"50%"`.
	pub x: String,
	/// Vertical coordinate, e.g. `"35%"`.
	pub y: String,
	/// Declared condition.
	#[serde(default)]
	pub status: Severity,
	/// Pictogram tag.
	pub icon: IconKind,
}

/// A link as supplied by the data source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
	/// Unique identifier.
	pub id: String,
	/// One endpoint's node id.
	pub source: String,
	/// The other endpoint's node id.
	pub target: String,
	/// Declared condition.
	#[serde(default)]
	pub status: Severity,
	/// Point-in-time throughput, e.g. `"38.4 Gbps"`.
	pub traffic: String,
	/// Bandwidth utilization; validated to 0..=100 when the graph is built.
	pub usage: i32,
}

/// A `(nodes, edges)` tuple from a static or refreshed source.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologyData {
	/// Node descriptors.
	pub nodes: Vec<NodeSpec>,
	/// Edge descriptors.
	pub edges: Vec<EdgeSpec>,
}

const SAMPLE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/topology.json"));

impl TopologyData {
	/// Decode a dataset from JSON.
	pub fn from_json(source: &str) -> Result<Self, TopologyError> {
		Ok(serde_json::from_str(source)?)
	}

	/// The bundled data-center mock topology.
	pub fn sample() -> Result<Self, TopologyError> {
		Self::from_json(SAMPLE)
	}
}
