use std::any::Any;

use crate::coords::Vec2;
use crate::input::PointerState;
use crate::render::Surface;
use crate::viewport::Viewport;

use super::{NodeId, Scene, SceneNode};

/// Everything a pointer or update hook can reach.
///
/// `scene` is fully mutable: hooks may add, remove or re-parent nodes. The
/// running frame keeps its own node list, so such changes show up next frame.
pub struct EventCtx<'a> {
    pub scene: &'a mut Scene,
    /// Node the hook runs for.
    pub id: NodeId,
    pub pointer: &'a PointerState,
    pub viewport: &'a Viewport,
}

impl EventCtx<'_> {
    #[inline]
    pub fn node(&self) -> Option<&SceneNode> {
        self.scene.get(self.id)
    }

    #[inline]
    pub fn node_mut(&mut self) -> Option<&mut SceneNode> {
        self.scene.get_mut(self.id)
    }

    /// Pointer position mapped through the viewport inverse.
    #[inline]
    pub fn pointer_world(&self) -> Vec2 {
        self.viewport.screen_to_world(self.pointer.position())
    }
}

/// Moves the node by `delta`. What a drag does unless a behavior overrides it.
pub fn drag_by(ctx: &mut EventCtx<'_>, delta: Vec2) {
    if let Some(node) = ctx.node_mut() {
        node.position += delta;
    }
}

/// Downcasting support for behaviors.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Lifecycle and pointer hooks of a node.
///
/// Every hook defaults to a no-op, except [`on_pointer_drag`](Self::on_pointer_drag)
/// which moves the node. While a hook runs, its behavior is detached from the
/// node, so `ctx.scene.behavior::<Self>(ctx.id)` yields `None`; use `self`.
///
/// # Implementing a behavior
///
/// ```rust,ignore
/// struct Highlight { hovered: bool }
///
/// impl Behavior for Highlight {
///     fn on_pointer_enter(&mut self, _ctx: &mut EventCtx<'_>) { self.hovered = true; }
///     fn on_pointer_leave(&mut self, _ctx: &mut EventCtx<'_>) { self.hovered = false; }
/// }
/// ```
#[allow(unused_variables)]
pub trait Behavior: AsAny {
    /// The node (or an ancestor of it) was attached to a parent.
    fn on_attach(&mut self, scene: &mut Scene, id: NodeId) {}

    /// The node (or an ancestor of it) is being detached from its parent.
    fn on_detach(&mut self, scene: &mut Scene, id: NodeId) {}

    /// Pointer entered the shape.
    fn on_pointer_enter(&mut self, ctx: &mut EventCtx<'_>) {}

    /// Pointer left the shape.
    fn on_pointer_leave(&mut self, ctx: &mut EventCtx<'_>) {}

    /// Pointer is inside the shape (every frame).
    fn on_pointer_over(&mut self, ctx: &mut EventCtx<'_>) {}

    fn on_double_click(&mut self, ctx: &mut EventCtx<'_>) {}

    /// Primary button held while inside (every frame).
    fn on_button_pressed(&mut self, ctx: &mut EventCtx<'_>) {}

    /// Primary button went down while inside.
    fn on_button_down(&mut self, ctx: &mut EventCtx<'_>) {}

    /// Primary button went up while inside.
    fn on_button_up(&mut self, ctx: &mut EventCtx<'_>) {}

    fn on_pointer_drag_start(&mut self, ctx: &mut EventCtx<'_>) {}

    /// `delta` is the pointer movement since last frame, in world space.
    fn on_pointer_drag(&mut self, ctx: &mut EventCtx<'_>, delta: Vec2) {
        drag_by(ctx, delta);
    }

    fn on_pointer_drag_end(&mut self, ctx: &mut EventCtx<'_>) {}

    /// Runs once per frame for every gathered node, after drag handling.
    fn on_update(&mut self, ctx: &mut EventCtx<'_>) {}

    /// Extra painting after the node's shape, under the node's transform.
    fn paint(&self, node: &SceneNode, surface: &mut dyn Surface) {}
}
