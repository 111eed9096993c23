use std::collections::HashSet;

use trellis_engine::coords::Vec2;
use trellis_engine::paint::{Color, Style};
use trellis_engine::render::Surface;
use trellis_engine::scene::{AsAny, Behavior, CircleShape, EventCtx, NodeId, Scene, SceneNode};

use crate::connector::{destroy_connector, NodeConnector};
use crate::error::GraphError;
use crate::node::GraphNode;

/// Paint/hit priority of sockets: above nodes and connectors.
pub const SOCKET_LAYER: i32 = 2;
pub const SOCKET_RADIUS: f32 = 6.0;

const LABEL_SIZE: f32 = 11.0;
const LABEL_GAP: f32 = 4.0;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SocketDirection {
    Input,
    Output,
}

/// Typed connection point of a [`GraphNode`].
///
/// A socket is a scene node of its own, a sibling of its owner inside the
/// graph container, so it can be laid out and hit-tested independently.
/// It holds at most one connector.
#[derive(Debug)]
pub struct NodeSocket {
    pub owner: NodeId,
    pub direction: SocketDirection,
    /// Type tag; connections require an exact match.
    pub kind: String,
    pub name: String,
    connector: Option<NodeId>,
}

impl NodeSocket {
    pub fn new(
        owner: NodeId,
        direction: SocketDirection,
        kind: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self { owner, direction, kind: kind.into(), name: name.into(), connector: None }
    }

    /// Creates the socket node and adds it to the owner's container.
    ///
    /// If the owner is not attached yet the socket stays detached.
    pub fn spawn(
        scene: &mut Scene,
        owner: NodeId,
        direction: SocketDirection,
        kind: impl Into<String>,
        name: impl Into<String>,
    ) -> NodeId {
        let socket = Self::new(owner, direction, kind, name);
        let node = SceneNode::new()
            .with_name(socket.name.clone())
            .with_layer(SOCKET_LAYER)
            .with_shape(CircleShape::new(SOCKET_RADIUS, socket_style(direction)))
            .draggable(true)
            .with_behavior(socket);
        let id = scene.insert(node);

        match scene.parent(owner) {
            Some(container) => {
                // Fresh node: the only possible failure is an unknown container.
                if let Err(err) = scene.attach(container, id) {
                    log::warn!("socket {id:?} left detached: {err}");
                }
            }
            None => log::debug!("owner {owner:?} has no container; socket {id:?} left detached"),
        }
        id
    }

    #[inline]
    pub fn connector(&self) -> Option<NodeId> {
        self.connector
    }

    /// Forgets `connector` if it is the one held.
    pub(crate) fn release_connector(&mut self, connector: NodeId) {
        if self.connector == Some(connector) {
            self.connector = None;
        }
    }

    #[inline]
    pub fn is_input(&self) -> bool {
        self.direction == SocketDirection::Input
    }

    /// Connects `connector` to this socket (`me` is this socket's node id).
    ///
    /// A different connector already held by the socket is destroyed.
    fn link(&mut self, scene: &mut Scene, me: NodeId, connector: NodeId) {
        if let Some(c) = scene.behavior_mut::<NodeConnector>(connector) {
            match self.direction {
                SocketDirection::Input => c.input = Some(me),
                SocketDirection::Output => c.output = Some(me),
            }
        }

        if let Some(previous) = self.connector.replace(connector) {
            if previous != connector {
                log::debug!("socket {me:?} drops connector {previous:?}");
                destroy_connector(scene, previous);
            }
        }

        if scene.parent(connector).is_none() {
            if let Some(container) = scene.parent(me) {
                if let Err(err) = scene.attach(container, connector) {
                    log::warn!("connector {connector:?} left detached: {err}");
                }
            }
        }
    }
}

fn socket_style(direction: SocketDirection) -> Style {
    let fill = match direction {
        SocketDirection::Input => Color::rgb(0.36, 0.55, 0.98),
        SocketDirection::Output => Color::rgb(0.98, 0.62, 0.27),
    };
    Style::filled(fill).with_stroke(Some(Color::BLACK), 1.0)
}

// ── connection rules ──────────────────────────────────────────────────────

/// Checks that `a` and `b` may be connected; returns `(input, output)`.
fn check_link(
    scene: &Scene,
    (a, sa): (NodeId, &NodeSocket),
    (b, sb): (NodeId, &NodeSocket),
) -> Result<(NodeId, NodeId), GraphError> {
    if sa.direction == sb.direction {
        return Err(GraphError::SameDirection { a, b, direction: sa.direction });
    }
    let ((input, si), (output, so)) = if sa.is_input() { ((a, sa), (b, sb)) } else { ((b, sb), (a, sa)) };

    if si.kind != so.kind {
        return Err(GraphError::TypeMismatch {
            output_kind: so.kind.clone(),
            input_kind: si.kind.clone(),
        });
    }
    if reaches(scene, si.owner, so.owner) {
        return Err(GraphError::Cycle { output, input });
    }
    Ok((input, output))
}

/// Whether `target` is `from` or lies downstream of it.
fn reaches(scene: &Scene, from: NodeId, target: NodeId) -> bool {
    let mut seen = HashSet::new();
    let mut stack = vec![from];
    while let Some(node) = stack.pop() {
        if node == target {
            return true;
        }
        if !seen.insert(node) {
            continue;
        }
        let Some(graph_node) = scene.behavior::<GraphNode>(node) else {
            continue;
        };
        for &output in graph_node.outputs() {
            let downstream = scene
                .behavior::<NodeSocket>(output)
                .and_then(|s| s.connector)
                .and_then(|c| scene.behavior::<NodeConnector>(c))
                .and_then(|c| c.input)
                .and_then(|i| scene.behavior::<NodeSocket>(i))
                .map(|s| s.owner);
            stack.extend(downstream);
        }
    }
    false
}

/// Connects two sockets with a new connector.
///
/// Requires one input and one output with identical type tags, and rejects
/// links that would let a node feed itself. Connectors already held by either
/// socket are replaced.
pub fn connect_to(scene: &mut Scene, a: NodeId, b: NodeId) -> Result<NodeId, GraphError> {
    let (input, output) = {
        let sa = scene.behavior::<NodeSocket>(a).ok_or(GraphError::NotASocket(a))?;
        let sb = scene.behavior::<NodeSocket>(b).ok_or(GraphError::NotASocket(b))?;
        check_link(scene, (a, sa), (b, sb))?
    };

    let connector = NodeConnector::spawn(scene);
    attach_connector(scene, input, connector)?;
    attach_connector(scene, output, connector)?;
    log::debug!("connected {output:?} -> {input:?} via {connector:?}");
    Ok(connector)
}

/// Sets the connector end matching the socket's direction and records the
/// connector on the socket. See [`NodeSocket`] for replacement rules.
pub fn attach_connector(scene: &mut Scene, socket: NodeId, connector: NodeId) -> Result<(), GraphError> {
    scene
        .with_behavior(socket, |behavior, scene| {
            behavior
                .as_any_mut()
                .downcast_mut::<NodeSocket>()
                .map(|s| s.link(scene, socket, connector))
        })
        .flatten()
        .ok_or(GraphError::NotASocket(socket))
}

// ── drag-to-connect ───────────────────────────────────────────────────────

impl NodeSocket {
    /// The connector this socket is dragging out, if its far end is still free.
    fn pending(&self, scene: &Scene) -> Option<NodeId> {
        let c = self.connector?;
        scene
            .behavior::<NodeConnector>(c)
            .filter(|connector| connector.is_half_attached())
            .map(|_| c)
    }
}

/// Maps a world point into a connector's space.
///
/// Connectors sit at their container's origin, so the container's transform
/// is used: it is current even on the frame the connector was spawned.
fn connector_space(scene: &Scene, connector: NodeId, world: Vec2) -> Option<Vec2> {
    let frame = match scene.parent(connector) {
        Some(container) => scene.get(container)?,
        None => scene.get(connector)?,
    };
    Some(frame.inverse_world_matrix().transform_point(world))
}

impl Behavior for NodeSocket {
    fn on_button_down(&mut self, ctx: &mut EventCtx<'_>) {
        if self.connector.is_some() {
            return;
        }
        let connector = NodeConnector::spawn(ctx.scene);
        self.link(ctx.scene, ctx.id, connector);

        // Start the free end under the pointer.
        let world = ctx.pointer_world();
        if let Some(local) = connector_space(ctx.scene, connector, world) {
            if let Some(c) = ctx.scene.behavior_mut::<NodeConnector>(connector) {
                c.set_free_end(local);
            }
        }
        log::debug!("socket {:?} drags out connector {connector:?}", ctx.id);
    }

    /// Sockets stay put; the pending connector's free end follows the pointer.
    fn on_pointer_drag(&mut self, ctx: &mut EventCtx<'_>, _delta: Vec2) {
        let Some(connector) = self.pending(ctx.scene) else {
            return;
        };
        let Some(local) = connector_space(ctx.scene, connector, ctx.pointer_world()) else {
            return;
        };
        if let Some(c) = ctx.scene.behavior_mut::<NodeConnector>(connector) {
            c.set_free_end(local);
        }
    }

    fn on_pointer_drag_end(&mut self, ctx: &mut EventCtx<'_>) {
        let Some(connector) = self.pending(ctx.scene) else {
            return;
        };
        let Some(container) = ctx.scene.parent(ctx.id) else {
            return;
        };

        let world = ctx.pointer_world();
        let mut hits = ctx.scene.hit_test_world(container, world);
        ctx.scene.sort_front_to_back(&mut hits);

        let target = hits.into_iter().filter(|h| *h != ctx.id).find(|h| {
            ctx.scene
                .behavior::<NodeSocket>(*h)
                .is_some_and(|other| check_link(ctx.scene, (ctx.id, &*self), (*h, other)).is_ok())
        });

        match target {
            Some(target) => {
                if let Err(err) = attach_connector(ctx.scene, target, connector) {
                    log::warn!("drop on {target:?} failed: {err}");
                } else {
                    log::debug!("connector {connector:?} dropped on {target:?}");
                }
            }
            None => {
                log::debug!("connector {connector:?} dropped on nothing");
                self.connector = None;
                destroy_connector(ctx.scene, connector);
            }
        }
    }

    fn paint(&self, _node: &SceneNode, surface: &mut dyn Surface) {
        let width = surface.measure_text(&self.name, LABEL_SIZE);
        let x = match self.direction {
            SocketDirection::Input => SOCKET_RADIUS + LABEL_GAP,
            SocketDirection::Output => -(SOCKET_RADIUS + LABEL_GAP + width),
        };
        surface.set_fill_color(Color::WHITE);
        surface.fill_text(&self.name, Vec2::new(x, LABEL_SIZE * 0.35), LABEL_SIZE);
    }
}
