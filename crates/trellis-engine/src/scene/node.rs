use crate::coords::{Matrix2D, Vec2};

use super::behavior::Behavior;
use super::shapes::Shape;
use super::NodeId;

/// One node of the scene tree.
///
/// Transform attributes (`position`, `origin`, `scale`, `rotation`) are set
/// by callers; the matrices are derived from them by
/// [`update_transform`](Self::update_transform) and are read-only from the
/// outside. Topology (`parent`, `children`, `depth`) is owned by
/// [`Scene`](super::Scene).
pub struct SceneNode {
    pub name: String,

    // ── transform attributes ──────────────────────────────────────────────
    /// Position in the parent's space.
    pub position: Vec2,
    /// Pivot for rotation and scale, in local space.
    pub origin: Vec2,
    pub scale: Vec2,
    /// Rotation in radians.
    pub rotation: f32,

    /// Recompute the local matrix every frame. When off, set
    /// [`transform_dirty`](Self::transform_dirty) after changing attributes.
    pub matrix_auto_update: bool,
    pub transform_dirty: bool,

    // ── ordering / interaction flags ──────────────────────────────────────
    /// Primary paint and hit-test priority, higher is in front.
    pub layer: i32,
    pub visible: bool,
    /// Whether the pipeline hit-tests and dispatches pointer events to this node.
    pub pointer_events: bool,
    pub draggable: bool,
    /// Hit-test and paint in surface space, bypassing the viewport.
    pub ignore_viewport: bool,
    /// Save surface state before painting this node.
    pub save_context: bool,
    /// Restore surface state after painting this node.
    pub restore_context: bool,

    /// Mask nodes clipping this node when it paints. One mask may be shared.
    pub masks: Vec<NodeId>,
    /// Masks clip instead of painting.
    pub is_mask: bool,

    pub shape: Option<Box<dyn Shape>>,
    pub(crate) behavior: Option<Box<dyn Behavior>>,

    // ── derived ───────────────────────────────────────────────────────────
    local_matrix: Matrix2D,
    world_matrix: Matrix2D,
    inverse_world_matrix: Matrix2D,

    // ── topology (owned by Scene) ─────────────────────────────────────────
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) depth: u32,

    // ── per-frame interaction state ───────────────────────────────────────
    pub(crate) pointer_inside: bool,
    pub(crate) being_dragged: bool,
}

impl Default for SceneNode {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneNode {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            position: Vec2::zero(),
            origin: Vec2::zero(),
            scale: Vec2::splat(1.0),
            rotation: 0.0,
            matrix_auto_update: true,
            transform_dirty: false,
            layer: 0,
            visible: true,
            pointer_events: true,
            draggable: false,
            ignore_viewport: false,
            save_context: true,
            restore_context: true,
            masks: Vec::new(),
            is_mask: false,
            shape: None,
            behavior: None,
            local_matrix: Matrix2D::IDENTITY,
            world_matrix: Matrix2D::IDENTITY,
            inverse_world_matrix: Matrix2D::IDENTITY,
            parent: None,
            children: Vec::new(),
            depth: 0,
            pointer_inside: false,
            being_dragged: false,
        }
    }

    /// A clipping node: never painted, never hit.
    pub fn mask<S: Shape>(shape: S) -> Self {
        Self { is_mask: true, pointer_events: false, ..Self::new() }.with_shape(shape)
    }

    // ── builder ───────────────────────────────────────────────────────────

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    pub fn with_origin(mut self, x: f32, y: f32) -> Self {
        self.origin = Vec2::new(x, y);
        self
    }

    pub fn with_scale(mut self, x: f32, y: f32) -> Self {
        self.scale = Vec2::new(x, y);
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_shape<S: Shape>(mut self, shape: S) -> Self {
        self.shape = Some(Box::new(shape));
        self
    }

    pub fn with_behavior<B: Behavior>(mut self, behavior: B) -> Self {
        self.behavior = Some(Box::new(behavior));
        self
    }

    pub fn with_mask(mut self, mask: NodeId) -> Self {
        self.masks.push(mask);
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    pub fn ignore_viewport(mut self, ignore: bool) -> Self {
        self.ignore_viewport = ignore;
        self
    }

    pub fn set_behavior<B: Behavior>(&mut self, behavior: B) {
        self.behavior = Some(Box::new(behavior));
    }

    // ── topology / state queries ──────────────────────────────────────────

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Tree level: 0 for detached nodes and the root.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn pointer_inside(&self) -> bool {
        self.pointer_inside
    }

    #[inline]
    pub fn being_dragged(&self) -> bool {
        self.being_dragged
    }

    #[inline]
    pub fn has_behavior(&self) -> bool {
        self.behavior.is_some()
    }

    // ── transforms ────────────────────────────────────────────────────────

    #[inline]
    pub fn local_matrix(&self) -> &Matrix2D {
        &self.local_matrix
    }

    #[inline]
    pub fn world_matrix(&self) -> &Matrix2D {
        &self.world_matrix
    }

    #[inline]
    pub fn inverse_world_matrix(&self) -> &Matrix2D {
        &self.inverse_world_matrix
    }

    /// Recomputes the derived matrices.
    ///
    /// The local matrix is rebuilt only when `matrix_auto_update` or
    /// `transform_dirty` is set. The world matrix is always re-derived as
    /// `parent_world · local`, so it never goes stale behind a moving parent.
    /// `parent_world` must already be current.
    pub fn update_transform(&mut self, parent_world: Option<&Matrix2D>) {
        if self.matrix_auto_update || self.transform_dirty {
            self.local_matrix = Matrix2D::compose(
                self.position.x,
                self.position.y,
                self.scale.x,
                self.scale.y,
                self.origin.x,
                self.origin.y,
                self.rotation,
            );
            self.transform_dirty = false;
        }

        self.world_matrix = self.local_matrix;
        if let Some(parent) = parent_world {
            self.world_matrix.premultiply(parent);
        }
        self.inverse_world_matrix = self.world_matrix.inverse();
    }

    /// Shape containment in local space; `false` without a shape.
    #[inline]
    pub fn point_inside(&self, local: Vec2) -> bool {
        self.shape.as_ref().is_some_and(|s| s.contains(local))
    }

    /// Containment of a world-space point, using the last computed transform.
    #[inline]
    pub fn contains_world_point(&self, world: Vec2) -> bool {
        self.point_inside(self.inverse_world_matrix.transform_point(world))
    }

    /// Local origin mapped to world space.
    #[inline]
    pub fn world_position(&self) -> Vec2 {
        self.world_matrix.translation_part()
    }
}

impl std::fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneNode")
            .field("name", &self.name)
            .field("position", &self.position)
            .field("layer", &self.layer)
            .field("depth", &self.depth)
            .field("visible", &self.visible)
            .field("is_mask", &self.is_mask)
            .field("has_shape", &self.shape.is_some())
            .field("has_behavior", &self.behavior.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Style;
    use crate::scene::RectShape;

    #[test]
    fn world_is_parent_times_local() {
        let parent = Matrix2D::compose(10.0, 20.0, 2.0, 2.0, 0.0, 0.0, 0.5);
        let mut node = SceneNode::new().with_position(3.0, 4.0).with_rotation(0.25);
        node.update_transform(Some(&parent));
        let expected = parent * *node.local_matrix();
        assert!(node.world_matrix().approx_eq(&expected, 1e-4));
    }

    #[test]
    fn manual_mode_waits_for_dirty_flag() {
        let mut node = SceneNode::new();
        node.matrix_auto_update = false;
        node.position = Vec2::new(5.0, 0.0);
        node.update_transform(None);
        assert_eq!(node.world_position(), Vec2::zero());

        node.transform_dirty = true;
        node.update_transform(None);
        assert_eq!(node.world_position(), Vec2::new(5.0, 0.0));
        assert!(!node.transform_dirty);
    }

    #[test]
    fn point_inside_without_shape_is_false() {
        assert!(!SceneNode::new().point_inside(Vec2::zero()));
    }

    #[test]
    fn contains_world_point_uses_inverse() {
        let mut node = SceneNode::new()
            .with_position(100.0, 0.0)
            .with_scale(2.0, 2.0)
            .with_shape(RectShape::centered(Vec2::new(10.0, 10.0), Style::default()));
        node.update_transform(None);
        assert!(node.contains_world_point(Vec2::new(109.0, 0.0)));
        assert!(!node.contains_world_point(Vec2::new(111.0, 0.0)));
    }
}
