use crate::coords::{Matrix2D, Vec2};

use super::behavior::{Behavior, EventCtx};
use super::{NodeId, Scene};

/// A platform-native element positioned by a scene node instead of painted.
pub trait NativeElement: 'static {
    /// The node joined a tree.
    fn attach(&mut self);

    /// The node is leaving its tree.
    fn detach(&mut self);

    /// Places the element. `screen` maps the node's local space to surface
    /// pixels; `size` is the element's box in local units.
    fn project(&mut self, screen: &Matrix2D, size: Vec2, visible: bool);
}

/// Behavior driving a [`NativeElement`] from its node.
pub struct Embedded<E: NativeElement> {
    pub element: E,
    pub size: Vec2,
}

impl<E: NativeElement> Embedded<E> {
    pub fn new(element: E, size: Vec2) -> Self {
        Self { element, size }
    }
}

impl<E: NativeElement> Behavior for Embedded<E> {
    fn on_attach(&mut self, _scene: &mut Scene, _id: NodeId) {
        self.element.attach();
    }

    fn on_detach(&mut self, _scene: &mut Scene, _id: NodeId) {
        self.element.detach();
    }

    fn on_update(&mut self, ctx: &mut EventCtx<'_>) {
        let Some(node) = ctx.scene.get(ctx.id) else {
            return;
        };
        let mut screen = *node.world_matrix();
        if !node.ignore_viewport {
            screen.premultiply(ctx.viewport.matrix());
        }
        self.element.project(&screen, self.size, node.visible);
    }
}
