//! Hands node activation over to the device-detail view.

use super::model::Node;

/// Top-level views a navigation command can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
	/// Per-device hardware view.
	DeviceDetail,
}

impl ViewKind {
	/// Stable name used by the host router.
	pub fn as_str(self) -> &'static str {
		match self {
			ViewKind::DeviceDetail => "device-detail",
		}
	}
}

/// "Switch to `view` and show `device_model`".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationCommand {
	/// Target view.
	pub view: ViewKind,
	/// Device the target view should show.
	pub device_model: String,
}

impl NavigationCommand {
	/// Router path for this command.
	pub fn route(&self) -> String {
		match self.view {
			ViewKind::DeviceDetail => format!("/device/{}", self.device_model),
		}
	}
}

/// Consumer of navigation commands.
pub trait Navigator {
	/// Carry out `command`.
	fn dispatch(&self, command: NavigationCommand);
}

impl<F> Navigator for F
where
	F: Fn(NavigationCommand),
{
	fn dispatch(&self, command: NavigationCommand) {
		self(command)
	}
}

/// Command for activating `node`; unmanaged nodes are inert.
pub fn activate(node: &Node) -> Option<NavigationCommand> {
	node.is_interactive().then(|| NavigationCommand {
		view: ViewKind::DeviceDetail,
		device_model: node.model.clone(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::topology::types::{IconKind, Position, Severity};

	fn node(model: &str) -> Node {
		Node {
			id: "n".into(),
			name: "N".into(),
			kind: "Core Switch".into(),
			model: model.into(),
			position: Position { x: 0.0, y: 0.0 },
			status: Severity::Normal,
			icon: IconKind::Server,
		}
	}

	#[test]
	fn inert_node_emits_nothing() {
		assert_eq!(activate(&node("")), None);
	}

	#[test]
	fn managed_node_targets_device_detail() {
		let command = activate(&node("S7700")).unwrap();
		assert_eq!(command.view.as_str(), "device-detail");
		assert_eq!(command.device_model, "S7700");
		assert_eq!(command.route(), "/device/S7700");
	}
}
