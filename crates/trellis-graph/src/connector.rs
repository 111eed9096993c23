use trellis_engine::coords::Vec2;
use trellis_engine::paint::Color;
use trellis_engine::render::Surface;
use trellis_engine::scene::{Behavior, EventCtx, NodeId, Scene, SceneNode};

use crate::socket::NodeSocket;

/// Paint priority of connectors: above nodes, below sockets.
pub const CONNECTOR_LAYER: i32 = 1;

/// Bezier curve from an output socket to an input socket.
///
/// Endpoints and control points are in the connector's local space (the graph
/// container's space once attached). Either socket may be missing while the
/// connector is being dragged into place; the missing end is then free.
#[derive(Debug, Clone)]
pub struct NodeConnector {
    pub input: Option<NodeId>,
    pub output: Option<NodeId>,

    /// Output end.
    pub from: Vec2,
    /// Input end.
    pub to: Vec2,
    pub from_control: Vec2,
    pub to_control: Vec2,

    pub color: Color,
    pub line_width: f32,
}

impl Default for NodeConnector {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            from: Vec2::zero(),
            to: Vec2::zero(),
            from_control: Vec2::zero(),
            to_control: Vec2::zero(),
            color: Color::rgb(0.85, 0.85, 0.85),
            line_width: 2.0,
        }
    }
}

impl NodeConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a detached connector node. Sockets attach it to their container.
    pub fn spawn(scene: &mut Scene) -> NodeId {
        let mut node = SceneNode::new()
            .with_name("connector")
            .with_layer(CONNECTOR_LAYER)
            .with_behavior(Self::new());
        node.pointer_events = false;
        scene.insert(node)
    }

    /// Exactly one socket attached.
    #[inline]
    pub fn is_half_attached(&self) -> bool {
        self.input.is_some() != self.output.is_some()
    }

    /// Moves whichever end has no socket.
    pub fn set_free_end(&mut self, point: Vec2) {
        if self.input.is_none() {
            self.to = point;
        } else if self.output.is_none() {
            self.from = point;
        }
        self.update_curve();
    }

    /// S-curve control points: the span along the dominant axis is split at
    /// its midpoint and each control point is pushed half of it away from its
    /// end. Aligned ends give a straight line.
    pub fn update_curve(&mut self) {
        let span = self.to - self.from;
        if span.x.abs() >= span.y.abs() {
            let half = span.x.abs() * 0.5;
            self.from_control = Vec2::new(self.from.x + half, self.from.y);
            self.to_control = Vec2::new(self.to.x - half, self.to.y);
        } else {
            let half = span.y.abs() * 0.5;
            self.from_control = Vec2::new(self.from.x, self.from.y + half);
            self.to_control = Vec2::new(self.to.x, self.to.y - half);
        }
    }
}

impl Behavior for NodeConnector {
    fn on_update(&mut self, ctx: &mut EventCtx<'_>) {
        let Some(inverse) = ctx.node().map(|n| *n.inverse_world_matrix()) else {
            return;
        };
        if let Some(p) = self.output.and_then(|s| ctx.scene.world_position(s)) {
            self.from = inverse.transform_point(p);
        }
        if let Some(p) = self.input.and_then(|s| ctx.scene.world_position(s)) {
            self.to = inverse.transform_point(p);
        }
        self.update_curve();
    }

    fn paint(&self, _node: &SceneNode, surface: &mut dyn Surface) {
        if self.input.is_none() && self.output.is_none() {
            return;
        }
        surface.set_stroke_color(self.color);
        surface.set_line_width(self.line_width);
        surface.begin_path();
        surface.move_to(self.from);
        surface.bezier_curve_to(self.from_control, self.to_control, self.to);
        surface.stroke();
    }
}

/// Detaches a connector from both sockets and removes it from the scene.
pub fn destroy_connector(scene: &mut Scene, connector: NodeId) {
    let ends = scene.behavior::<NodeConnector>(connector).map(|c| [c.input, c.output]);
    for socket in ends.into_iter().flatten().flatten() {
        if let Some(s) = scene.behavior_mut::<NodeSocket>(socket) {
            s.release_connector(connector);
        }
    }
    scene.remove(connector);
    log::debug!("connector {connector:?} destroyed");
}
