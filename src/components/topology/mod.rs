//! Interactive network topology: validated graph model, severity
//! classification, edge hover state machine, pure scene renderer and the
//! navigation bridge, plus the canvas component that hosts them.

mod component;
pub mod error;
pub mod hover;
pub mod model;
pub mod nav;
mod render;
pub mod scene;
mod state;
pub mod status;
pub mod types;

pub use component::TopologyCanvas;
pub use error::TopologyError;
pub use hover::{HoverController, HoverState};
pub use model::{Edge, Generation, Node, TopologyGraph};
pub use nav::{NavigationCommand, Navigator, ViewKind, activate};
pub use scene::{DetailPanel, RenderConfig, Scene, render_scene};
pub use state::TopologyState;
pub use status::{DeclaredStatus, StatusClassifier, UsageThresholds};
pub use types::{IconKind, Position, Severity, TopologyData};
