use crate::coords::{Matrix2D, Vec2};
use crate::input::{MouseButton, PointerState};
use crate::scene::{drag_by, Behavior, EventCtx, NodeId, Scene, SceneNode};
use crate::viewport::{Viewport, ViewportControls};

use super::Surface;

/// Button that drives press, release and drag events.
const PRIMARY: MouseButton = MouseButton::Left;

/// Per-renderer settings.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Clear the surface once before painting.
    pub auto_clear: bool,
    /// Hit-test and dispatch pointer events.
    pub pointer_events: bool,
    /// Viewport gestures, applied after the pointer sync.
    pub controls: Option<ViewportControls>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self { auto_clear: true, pointer_events: true, controls: None }
    }
}

/// Runs frames over a scene.
///
/// One [`frame`](Self::frame) call:
/// 1. gathers visible nodes (pre-order)
/// 2. sorts them front-most first by [`PaintKey`](super::PaintKey)
/// 3. syncs the pointer, runs viewport controls, refreshes the viewport
/// 4. hit-tests and dispatches pointer events, front to back
/// 5. runs drags and `on_update`
/// 6. updates every transform of the subtree
/// 7. paints back to front
///
/// The list built in steps 1–2 is fixed for the whole frame. Nodes removed by
/// a hook are skipped for the rest of it; nodes added by a hook join the
/// next frame.
#[derive(Debug, Default)]
pub struct Renderer {
    config: RendererConfig,
    order: Vec<NodeId>,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config, order: Vec::new() }
    }

    #[inline]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    #[inline]
    pub fn config_mut(&mut self) -> &mut RendererConfig {
        &mut self.config
    }

    /// Nodes gathered by the last frame, front-most first.
    #[inline]
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    /// Renders the whole scene.
    pub fn frame(
        &mut self,
        scene: &mut Scene,
        viewport: &mut Viewport,
        pointer: &mut PointerState,
        surface: &mut dyn Surface,
    ) {
        let root = scene.root();
        self.frame_from(root, scene, viewport, pointer, surface);
    }

    /// Renders the subtree rooted at `root`.
    pub fn frame_from(
        &mut self,
        root: NodeId,
        scene: &mut Scene,
        viewport: &mut Viewport,
        pointer: &mut PointerState,
        surface: &mut dyn Surface,
    ) {
        self.order.clear();
        self.order.extend(
            scene
                .descendants(root)
                .into_iter()
                .filter(|id| scene.get(*id).is_some_and(|n| n.visible)),
        );
        scene.sort_front_to_back(&mut self.order);

        pointer.sync();
        if let Some(controls) = &mut self.config.controls {
            controls.update(viewport, pointer, surface.size());
        }
        viewport.refresh();

        let pointer: &PointerState = pointer;
        let viewport: &Viewport = viewport;

        if self.config.pointer_events {
            dispatch(scene, viewport, pointer, &self.order);
        }

        update(scene, viewport, pointer, &self.order);

        scene.update_transforms(root);

        if self.config.auto_clear {
            surface.clear();
        }
        paint(scene, viewport, surface, &self.order);

        log::trace!("frame: {} nodes", self.order.len());
    }
}

/// Runs a hook with the node's behavior; no-op without one.
fn fire(
    scene: &mut Scene,
    id: NodeId,
    pointer: &PointerState,
    viewport: &Viewport,
    hook: impl FnOnce(&mut dyn Behavior, &mut EventCtx<'_>),
) {
    scene.with_behavior(id, |behavior, scene| {
        let mut ctx = EventCtx { scene, id, pointer, viewport };
        hook(behavior, &mut ctx);
    });
}

fn dispatch(scene: &mut Scene, viewport: &Viewport, pointer: &PointerState, order: &[NodeId]) {
    let screen = pointer.position();
    let world = viewport.screen_to_world(screen);

    let just_pressed = pointer.button_just_pressed(PRIMARY);
    let just_released = pointer.button_just_released(PRIMARY);
    let on_surface = pointer.on_surface();

    for &id in order {
        let Some(node) = scene.get(id) else {
            continue;
        };
        if !node.pointer_events {
            continue;
        }

        let point = if node.ignore_viewport { screen } else { world };
        let inside = on_surface && node.contains_world_point(point);
        let was_inside = node.pointer_inside;
        let draggable = node.draggable;

        if inside {
            if let Some(n) = scene.get_mut(id) {
                n.pointer_inside = true;
            }
            if !was_inside {
                fire(scene, id, pointer, viewport, |b, ctx| b.on_pointer_enter(ctx));
            }

            fire(scene, id, pointer, viewport, |b, ctx| b.on_pointer_over(ctx));

            if pointer.button_double_clicked(PRIMARY) {
                fire(scene, id, pointer, viewport, |b, ctx| b.on_double_click(ctx));
            }
            if pointer.button_pressed(PRIMARY) {
                fire(scene, id, pointer, viewport, |b, ctx| b.on_button_pressed(ctx));
            }
            if just_released {
                fire(scene, id, pointer, viewport, |b, ctx| b.on_button_up(ctx));
            }
            if just_pressed {
                fire(scene, id, pointer, viewport, |b, ctx| b.on_button_down(ctx));

                if draggable {
                    if let Some(n) = scene.get_mut(id) {
                        n.being_dragged = true;
                    }
                    log::debug!("drag start on {id:?}");
                    fire(scene, id, pointer, viewport, |b, ctx| b.on_pointer_drag_start(ctx));
                    // Topmost draggable node takes the drag.
                    break;
                }
            }
        } else if was_inside {
            if let Some(n) = scene.get_mut(id) {
                n.pointer_inside = false;
            }
            fire(scene, id, pointer, viewport, |b, ctx| b.on_pointer_leave(ctx));
        }

        let dragged = scene.get(id).is_some_and(|n| n.being_dragged);
        if just_released && dragged {
            if let Some(n) = scene.get_mut(id) {
                n.being_dragged = false;
            }
            log::debug!("drag end on {id:?}");
            fire(scene, id, pointer, viewport, |b, ctx| b.on_pointer_drag_end(ctx));
        }
    }
}

fn update(scene: &mut Scene, viewport: &Viewport, pointer: &PointerState, order: &[NodeId]) {
    let screen_delta = pointer.delta();
    let world = world_delta(viewport, pointer.position(), screen_delta);

    for &id in order {
        let Some(node) = scene.get(id) else {
            continue;
        };

        if node.being_dragged {
            let delta = if node.ignore_viewport { screen_delta } else { world };
            let handled = scene.with_behavior(id, |behavior, scene| {
                let mut ctx = EventCtx { scene, id, pointer, viewport };
                behavior.on_pointer_drag(&mut ctx, delta);
            });
            if handled.is_none() {
                drag_by(&mut EventCtx { scene: &mut *scene, id, pointer, viewport }, delta);
            }
        }

        fire(scene, id, pointer, viewport, |b, ctx| b.on_update(ctx));
    }
}

fn paint(scene: &Scene, viewport: &Viewport, surface: &mut dyn Surface, order: &[NodeId]) {
    for &id in order.iter().rev() {
        let Some(node) = scene.get(id) else {
            continue;
        };
        if node.is_mask {
            continue;
        }

        if node.save_context {
            surface.save();
        }

        for &mask_id in &node.masks {
            let Some(mask) = scene.get(mask_id) else {
                continue;
            };
            let Some(shape) = mask.shape.as_deref() else {
                continue;
            };
            apply_transform(surface, viewport, mask);
            surface.begin_path();
            shape.trace(surface);
            surface.clip();
        }

        apply_transform(surface, viewport, node);

        if let Some(shape) = node.shape.as_deref() {
            shape.style(surface);
            shape.draw(surface);
        }
        if let Some(behavior) = node.behavior.as_deref() {
            behavior.paint(node, surface);
        }

        if node.restore_context {
            surface.restore();
        }
    }
}

/// Sets `viewport · world` (or just `world` for viewport-free nodes).
fn apply_transform(surface: &mut dyn Surface, viewport: &Viewport, node: &SceneNode) {
    if node.ignore_viewport {
        surface.set_transform(&Matrix2D::IDENTITY);
    } else {
        surface.set_transform(viewport.matrix());
    }
    surface.transform(node.world_matrix());
}

/// World-space drag delta for a pointer movement, as used by the drag pass.
#[inline]
pub fn world_delta(viewport: &Viewport, position: Vec2, delta: Vec2) -> Vec2 {
    viewport.screen_to_world(position) - viewport.screen_to_world(position - delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputEvent, MouseButtonState};
    use crate::paint::Style;
    use crate::render::{DrawCmd, DrawList};
    use crate::scene::RectShape;

    fn square(x: f32, y: f32) -> SceneNode {
        SceneNode::new()
            .with_position(x, y)
            .with_shape(RectShape::centered(Vec2::new(20.0, 20.0), Style::default()))
    }

    struct Harness {
        scene: Scene,
        viewport: Viewport,
        pointer: PointerState,
        surface: DrawList,
        renderer: Renderer,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                scene: Scene::new(),
                viewport: Viewport::new(),
                pointer: PointerState::new(),
                surface: DrawList::default(),
                renderer: Renderer::default(),
            }
        }

        fn frame(&mut self) {
            self.surface.clear_recording();
            self.renderer
                .frame(&mut self.scene, &mut self.viewport, &mut self.pointer, &mut self.surface);
        }
    }

    // ── gather / sort ─────────────────────────────────────────────────────

    #[test]
    fn invisible_nodes_are_skipped_but_children_are_kept() {
        let mut h = Harness::new();
        let root = h.scene.root();
        let hidden = h.scene.add(root, square(0.0, 0.0)).unwrap();
        h.scene.get_mut(hidden).unwrap().visible = false;
        let child = h.scene.add(hidden, square(0.0, 0.0)).unwrap();

        h.frame();
        assert!(h.renderer.order().contains(&child));
        assert!(!h.renderer.order().contains(&hidden));
    }

    #[test]
    fn order_is_front_most_first() {
        let mut h = Harness::new();
        let root = h.scene.root();
        let back = h.scene.add(root, square(0.0, 0.0)).unwrap();
        let front = h.scene.add(root, square(0.0, 0.0).with_layer(3)).unwrap();

        h.frame();
        assert_eq!(h.renderer.order(), &[front, back, root]);
    }

    // ── paint ─────────────────────────────────────────────────────────────

    #[test]
    fn paint_is_back_to_front_after_clear() {
        let mut h = Harness::new();
        let root = h.scene.root();
        h.scene.add(root, square(0.0, 0.0).with_layer(1)).unwrap();
        h.scene.add(root, square(100.0, 0.0)).unwrap();

        h.frame();
        assert_eq!(h.surface.commands().next(), Some(&DrawCmd::Clear));

        let rect_transforms: Vec<Vec2> = h
            .surface
            .items()
            .iter()
            .filter(|i| matches!(i.cmd, DrawCmd::Rect { .. }))
            .map(|i| i.transform.translation_part())
            .collect();
        assert_eq!(rect_transforms, vec![Vec2::new(100.0, 0.0), Vec2::zero()]);
        assert_eq!(h.surface.save_depth(), 0);
    }

    #[test]
    fn auto_clear_off_records_no_clear() {
        let mut h = Harness::new();
        h.renderer.config_mut().auto_clear = false;
        h.frame();
        assert!(!h.surface.commands().any(|c| *c == DrawCmd::Clear));
    }

    #[test]
    fn viewport_is_applied_unless_ignored() {
        let mut h = Harness::new();
        let root = h.scene.root();
        h.scene.add(root, square(10.0, 0.0)).unwrap();
        h.scene.add(root, square(10.0, 0.0).ignore_viewport(true).with_layer(-1)).unwrap();
        h.viewport.set_position(Vec2::new(0.0, 50.0));

        h.frame();
        let rects: Vec<Vec2> = h
            .surface
            .items()
            .iter()
            .filter(|i| matches!(i.cmd, DrawCmd::Rect { .. }))
            .map(|i| i.transform.translation_part())
            .collect();
        assert_eq!(rects, vec![Vec2::new(10.0, 0.0), Vec2::new(10.0, 50.0)]);
    }

    // ── dispatch ──────────────────────────────────────────────────────────

    #[test]
    fn pointer_events_off_skips_dispatch() {
        let mut h = Harness::new();
        h.renderer.config_mut().pointer_events = false;
        let root = h.scene.root();
        let id = h.scene.add(root, square(0.0, 0.0).draggable(true)).unwrap();
        h.frame();

        h.pointer.apply_event(InputEvent::PointerMoved { x: 0.0, y: 0.0 });
        h.pointer.apply_event(InputEvent::PointerButton {
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
        });
        h.frame();
        let node = h.scene.get(id).unwrap();
        assert!(!node.pointer_inside());
        assert!(!node.being_dragged());
    }

    #[test]
    fn world_delta_undoes_zoom() {
        let mut viewport = Viewport::new();
        viewport.set_scale(2.0);
        viewport.refresh();
        let d = world_delta(&viewport, Vec2::new(50.0, 50.0), Vec2::new(10.0, 4.0));
        assert_eq!(d, Vec2::new(5.0, 2.0));
    }
}
