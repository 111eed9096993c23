use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use trellis_engine::coords::Vec2;
use trellis_engine::input::{CaptureConfig, InputEvent, MouseButton, MouseButtonState, PointerCapture, PointerState};
use trellis_engine::paint::Style;
use trellis_engine::render::{DrawCmd, DrawList, ImageId, Renderer};
use trellis_engine::scene::{Behavior, EventCtx, ImageShape, NodeId, RectShape, Scene, SceneNode};
use trellis_engine::viewport::Viewport;

type Log = Rc<RefCell<Vec<&'static str>>>;

/// Records every pointer hook it receives.
struct Recorder {
    log: Log,
}

impl Behavior for Recorder {
    fn on_pointer_enter(&mut self, _ctx: &mut EventCtx<'_>) {
        self.log.borrow_mut().push("enter");
    }

    fn on_pointer_leave(&mut self, _ctx: &mut EventCtx<'_>) {
        self.log.borrow_mut().push("leave");
    }

    fn on_pointer_over(&mut self, _ctx: &mut EventCtx<'_>) {
        self.log.borrow_mut().push("over");
    }

    fn on_double_click(&mut self, _ctx: &mut EventCtx<'_>) {
        self.log.borrow_mut().push("double_click");
    }

    fn on_button_pressed(&mut self, _ctx: &mut EventCtx<'_>) {
        self.log.borrow_mut().push("pressed");
    }

    fn on_button_down(&mut self, _ctx: &mut EventCtx<'_>) {
        self.log.borrow_mut().push("down");
    }

    fn on_button_up(&mut self, _ctx: &mut EventCtx<'_>) {
        self.log.borrow_mut().push("up");
    }

    fn on_pointer_drag_start(&mut self, _ctx: &mut EventCtx<'_>) {
        self.log.borrow_mut().push("drag_start");
    }

    fn on_pointer_drag_end(&mut self, _ctx: &mut EventCtx<'_>) {
        self.log.borrow_mut().push("drag_end");
    }
}

/// Removes `target` from the scene when the pointer enters.
struct Remover {
    target: NodeId,
}

impl Behavior for Remover {
    fn on_pointer_enter(&mut self, ctx: &mut EventCtx<'_>) {
        ctx.scene.remove(self.target);
    }
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
            surface: DrawList::new(Vec2::new(800.0, 600.0)),
            renderer: Renderer::default(),
        }
    }

    fn frame(&mut self) {
        self.surface.clear_recording();
        self.renderer
            .frame(&mut self.scene, &mut self.viewport, &mut self.pointer, &mut self.surface);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.pointer.apply_event(InputEvent::PointerMoved { x, y });
    }

    fn button(&mut self, state: MouseButtonState) {
        self.pointer.apply_event(InputEvent::PointerButton { button: MouseButton::Left, state });
    }

    fn count(log: &Log, what: &str) -> usize {
        log.borrow().iter().filter(|e| **e == what).count()
    }
}

fn square(x: f32, y: f32) -> SceneNode {
    SceneNode::new()
        .with_position(x, y)
        .with_shape(RectShape::centered(Vec2::new(20.0, 20.0), Style::default()))
}

fn log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

// ── drag lifecycle ────────────────────────────────────────────────────────

#[test]
fn drag_moves_node_by_pointer_delta() {
    let mut h = Harness::new();
    let events = log();
    let root = h.scene.root();
    let id = h
        .scene
        .add(root, square(100.0, 100.0).draggable(true).with_behavior(Recorder { log: events.clone() }))
        .unwrap();

    // Settle transforms, then hover.
    h.frame();
    h.move_to(105.0, 105.0);
    h.frame();
    assert!(h.scene.get(id).unwrap().pointer_inside());

    h.button(MouseButtonState::Pressed);
    h.frame();
    assert!(h.scene.get(id).unwrap().being_dragged());
    assert_eq!(Harness::count(&events, "drag_start"), 1);
    assert_eq!(h.scene.get(id).unwrap().position, Vec2::new(100.0, 100.0));

    h.move_to(115.0, 110.0);
    h.frame();
    assert_eq!(h.scene.get(id).unwrap().position, Vec2::new(110.0, 105.0));
    assert_eq!(Harness::count(&events, "drag_start"), 1);

    h.button(MouseButtonState::Released);
    h.frame();
    h.frame();
    assert_eq!(Harness::count(&events, "drag_end"), 1);
    assert!(!h.scene.get(id).unwrap().being_dragged());
    assert_eq!(h.scene.world_position(id), Some(Vec2::new(110.0, 105.0)));
}

#[test]
fn drag_delta_is_in_world_space() {
    let mut h = Harness::new();
    let root = h.scene.root();
    let id = h.scene.add(root, square(0.0, 0.0).draggable(true)).unwrap();
    h.viewport.set_scale(2.0);

    h.frame();
    h.move_to(2.0, 2.0);
    h.frame();
    h.button(MouseButtonState::Pressed);
    h.frame();
    h.move_to(22.0, 12.0);
    h.frame();

    assert_eq!(h.scene.get(id).unwrap().position, Vec2::new(10.0, 5.0));
}

#[test]
fn topmost_draggable_takes_the_drag() {
    let mut h = Harness::new();
    let root = h.scene.root();
    let back = h.scene.add(root, square(0.0, 0.0).draggable(true)).unwrap();
    let front = h.scene.add(root, square(5.0, 0.0).draggable(true).with_layer(1)).unwrap();

    h.frame();
    h.move_to(2.0, 0.0);
    h.button(MouseButtonState::Pressed);
    h.frame();

    assert!(h.scene.get(front).unwrap().being_dragged());
    assert!(!h.scene.get(back).unwrap().being_dragged());
}

#[test]
fn drag_end_fires_outside_the_shape() {
    let mut h = Harness::new();
    let events = log();
    let root = h.scene.root();
    h.scene
        .add(root, square(0.0, 0.0).draggable(true).with_behavior(Recorder { log: events.clone() }))
        .unwrap();
    h.frame();
    h.move_to(0.0, 0.0);
    h.button(MouseButtonState::Pressed);
    h.frame();

    // Jump out and release in the same frame.
    h.move_to(300.0, 300.0);
    h.button(MouseButtonState::Released);
    h.frame();

    assert_eq!(Harness::count(&events, "drag_end"), 1);
}

#[test]
fn release_then_focus_loss_still_ends_the_drag() {
    let mut h = Harness::new();
    let events = log();
    let root = h.scene.root();
    let id = h
        .scene
        .add(root, square(0.0, 0.0).draggable(true).with_behavior(Recorder { log: events.clone() }))
        .unwrap();
    h.frame();
    h.move_to(0.0, 0.0);
    h.button(MouseButtonState::Pressed);
    h.frame();
    assert!(h.scene.get(id).unwrap().being_dragged());

    h.button(MouseButtonState::Released);
    h.pointer.apply_event(InputEvent::Focused(false));
    h.frame();
    assert_eq!(Harness::count(&events, "drag_end"), 1);
    assert!(!h.scene.get(id).unwrap().being_dragged());

    // With the button up, moving no longer drags.
    h.move_to(50.0, 0.0);
    h.frame();
    assert_eq!(h.scene.get(id).unwrap().position, Vec2::zero());
}

// ── enter / leave ─────────────────────────────────────────────────────────

#[test]
fn enter_over_leave_sequence() {
    let mut h = Harness::new();
    let events = log();
    let root = h.scene.root();
    h.scene.add(root, square(0.0, 0.0).with_behavior(Recorder { log: events.clone() })).unwrap();

    h.frame();
    h.move_to(1.0, 1.0);
    h.frame();
    h.frame();
    h.move_to(50.0, 50.0);
    h.frame();

    assert_eq!(*events.borrow(), vec!["enter", "over", "over", "leave"]);
}

#[test]
fn leaving_the_surface_fires_leave() {
    let mut h = Harness::new();
    let events = log();
    let root = h.scene.root();
    let id = h.scene.add(root, square(0.0, 0.0).with_behavior(Recorder { log: events.clone() })).unwrap();

    h.frame();
    h.move_to(1.0, 1.0);
    h.frame();
    h.pointer.apply_event(InputEvent::PointerLeft);
    h.frame();
    h.frame();

    assert_eq!(*events.borrow(), vec!["enter", "over", "leave"]);
    assert!(!h.scene.get(id).unwrap().pointer_inside());

    // Coming back in at the same spot enters again.
    h.move_to(1.0, 1.0);
    h.frame();
    assert_eq!(Harness::count(&events, "enter"), 2);
}

#[test]
fn press_and_release_inside() {
    let mut h = Harness::new();
    let events = log();
    let root = h.scene.root();
    h.scene.add(root, square(0.0, 0.0).with_behavior(Recorder { log: events.clone() })).unwrap();

    h.frame();
    h.move_to(0.0, 0.0);
    h.button(MouseButtonState::Pressed);
    h.frame();
    h.button(MouseButtonState::Released);
    h.frame();

    assert_eq!(Harness::count(&events, "down"), 1);
    assert_eq!(Harness::count(&events, "up"), 1);
    assert_eq!(Harness::count(&events, "drag_start"), 0);
}

#[test]
fn held_button_fires_every_frame_until_release() {
    let mut h = Harness::new();
    let events = log();
    let root = h.scene.root();
    h.scene.add(root, square(0.0, 0.0).with_behavior(Recorder { log: events.clone() })).unwrap();

    h.frame();
    h.move_to(0.0, 0.0);
    h.button(MouseButtonState::Pressed);
    h.frame();
    h.frame();
    h.frame();
    assert_eq!(Harness::count(&events, "pressed"), 3);

    h.button(MouseButtonState::Released);
    h.frame();
    h.frame();
    assert_eq!(Harness::count(&events, "pressed"), 3);
}

#[test]
fn double_click_through_capture_fires_once() {
    let mut h = Harness::new();
    let events = log();
    let root = h.scene.root();
    h.scene.add(root, square(0.0, 0.0).with_behavior(Recorder { log: events.clone() })).unwrap();
    let mut capture = PointerCapture::new(CaptureConfig::default());
    let t0 = Instant::now();
    let left = |state| InputEvent::PointerButton { button: MouseButton::Left, state };

    h.frame();
    capture.handle_at(&mut h.pointer, InputEvent::PointerMoved { x: 1.0, y: 1.0 }, t0);
    capture.handle_at(&mut h.pointer, left(MouseButtonState::Pressed), t0);
    h.frame();
    capture.handle_at(&mut h.pointer, left(MouseButtonState::Released), t0 + Duration::from_millis(60));
    h.frame();
    capture.handle_at(&mut h.pointer, left(MouseButtonState::Pressed), t0 + Duration::from_millis(120));
    h.frame();
    capture.handle_at(&mut h.pointer, left(MouseButtonState::Released), t0 + Duration::from_millis(180));
    h.frame();
    h.frame();

    assert_eq!(Harness::count(&events, "double_click"), 1);
    assert_eq!(Harness::count(&events, "down"), 2);
}

#[test]
fn slow_second_press_is_not_a_double_click() {
    let mut h = Harness::new();
    let events = log();
    let root = h.scene.root();
    h.scene.add(root, square(0.0, 0.0).with_behavior(Recorder { log: events.clone() })).unwrap();
    let mut capture = PointerCapture::new(CaptureConfig::default());
    let t0 = Instant::now();
    let left = |state| InputEvent::PointerButton { button: MouseButton::Left, state };

    h.frame();
    capture.handle_at(&mut h.pointer, InputEvent::PointerMoved { x: 1.0, y: 1.0 }, t0);
    capture.handle_at(&mut h.pointer, left(MouseButtonState::Pressed), t0);
    h.frame();
    capture.handle_at(&mut h.pointer, left(MouseButtonState::Released), t0 + Duration::from_millis(100));
    h.frame();
    capture.handle_at(&mut h.pointer, left(MouseButtonState::Pressed), t0 + Duration::from_millis(700));
    h.frame();

    assert_eq!(Harness::count(&events, "double_click"), 0);
}

// ── mutation during dispatch ──────────────────────────────────────────────

#[test]
fn node_removed_during_dispatch_is_skipped() {
    let mut h = Harness::new();
    let events = log();
    let root = h.scene.root();
    let victim = h
        .scene
        .add(root, square(0.0, 0.0).with_behavior(Recorder { log: events.clone() }))
        .unwrap();
    h.scene.add(root, square(0.0, 0.0).with_layer(1).with_behavior(Remover { target: victim })).unwrap();

    h.frame();
    h.move_to(0.0, 0.0);
    h.frame();

    assert!(!h.scene.contains(victim));
    assert!(events.borrow().is_empty());
    // Only the remover's rect reaches the paint stream.
    let rects = h.surface.commands().filter(|c| matches!(c, DrawCmd::Rect { .. })).count();
    assert_eq!(rects, 1);
}

#[test]
fn node_added_during_dispatch_joins_next_frame() {
    struct Spawner {
        spawned: Option<NodeId>,
    }

    impl Behavior for Spawner {
        fn on_pointer_enter(&mut self, ctx: &mut EventCtx<'_>) {
            let root = ctx.scene.root();
            self.spawned = ctx.scene.add(root, SceneNode::new()).ok();
        }
    }

    let mut h = Harness::new();
    let root = h.scene.root();
    let id = h.scene.add(root, square(0.0, 0.0).with_behavior(Spawner { spawned: None })).unwrap();

    h.frame();
    h.move_to(0.0, 0.0);
    h.frame();
    let spawned = h.scene.behavior::<Spawner>(id).and_then(|s| s.spawned).unwrap();
    assert!(!h.renderer.order().contains(&spawned));

    h.frame();
    assert!(h.renderer.order().contains(&spawned));
}

// ── masks ─────────────────────────────────────────────────────────────────

#[test]
fn mask_clips_before_node_transform() {
    let mut h = Harness::new();
    let root = h.scene.root();
    let mask = h
        .scene
        .add(root, SceneNode::mask(RectShape::centered(Vec2::new(10.0, 10.0), Style::default())))
        .unwrap();
    let node = h.scene.add(root, square(40.0, 0.0).with_mask(mask)).unwrap();

    h.frame();
    h.frame();
    let items = h.surface.items();

    let clip = items.iter().position(|i| i.cmd == DrawCmd::Clip).unwrap();
    let node_world = *h.scene.get(node).unwrap().world_matrix();
    let node_transform = items
        .iter()
        .position(|i| i.cmd == DrawCmd::SetTransform(node_world))
        .unwrap();
    assert!(clip < node_transform);

    // The mask itself is never painted.
    let rects: Vec<_> = items.iter().filter(|i| matches!(i.cmd, DrawCmd::Rect { .. })).collect();
    assert_eq!(rects.len(), 2);
    assert_eq!(rects[0].clip_depth, 0);
    assert_eq!(rects[1].clip_depth, 1);
    assert_eq!(items.iter().filter(|i| i.cmd == DrawCmd::Fill).count(), 1);
    assert_eq!(h.surface.save_depth(), 0);
}

// ── images ────────────────────────────────────────────────────────────────

#[test]
fn image_shape_blits_under_node_transform() {
    let mut h = Harness::new();
    let root = h.scene.root();
    let id = h
        .scene
        .add(root, SceneNode::new().with_position(30.0, 40.0).with_shape(ImageShape::centered(ImageId(1), Vec2::new(8.0, 8.0))))
        .unwrap();

    h.frame();
    h.frame();

    let blit = h
        .surface
        .items()
        .iter()
        .find(|i| matches!(i.cmd, DrawCmd::Image { .. }))
        .unwrap();
    assert_eq!(blit.cmd, DrawCmd::Image { image: ImageId(1), min: Vec2::new(-4.0, -4.0), size: Vec2::new(8.0, 8.0) });
    assert_eq!(blit.transform, *h.scene.get(id).unwrap().world_matrix());
}
