use anyhow::{Context, Result};
use trellis_engine::coords::Vec2;
use trellis_engine::input::{CaptureConfig, InputEvent, MouseButton, MouseButtonState, PointerCapture, PointerState};
use trellis_engine::logging::{init_logging, LoggingConfig};
use trellis_engine::render::{DrawList, Renderer, RendererConfig};
use trellis_engine::scene::{NodeId, Scene};
use trellis_engine::viewport::{Viewport, ViewportControls};
use trellis_graph::operations::{Arithmetic, ArithmeticOp, Constant, Format};
use trellis_graph::{get_value, GraphNode, NodeGraph, NodeSocket, Value};

const SURFACE_SIZE: Vec2 = Vec2::new(1280.0, 720.0);

/// Headless editor session: every piece a windowed host would own, minus the window.
struct Studio {
    scene: Scene,
    graph: NodeGraph,
    viewport: Viewport,
    pointer: PointerState,
    capture: PointerCapture,
    surface: DrawList,
    renderer: Renderer,
    frames: u64,
}

impl Studio {
    fn new() -> Result<Self> {
        let mut scene = Scene::new();
        let root = scene.root();
        let graph = NodeGraph::new(&mut scene, root).context("creating the graph container")?;

        let renderer = Renderer::new(RendererConfig {
            controls: Some(ViewportControls::new()),
            ..RendererConfig::default()
        });

        Ok(Self {
            scene,
            graph,
            viewport: Viewport::new(),
            pointer: PointerState::new(),
            capture: PointerCapture::new(CaptureConfig::default()),
            surface: DrawList::new(SURFACE_SIZE),
            renderer,
            frames: 0,
        })
    }

    fn frame(&mut self) {
        self.surface.clear_recording();
        self.renderer
            .frame(&mut self.scene, &mut self.viewport, &mut self.pointer, &mut self.surface);
        self.frames += 1;
        log::trace!("frame {}: {} draw calls", self.frames, self.surface.items().len());
    }

    fn send(&mut self, ev: InputEvent) {
        self.capture.handle(&mut self.pointer, ev);
    }

    fn move_to_world(&mut self, world: Vec2) {
        let screen = self.viewport.world_to_screen(world);
        self.send(InputEvent::PointerMoved { x: screen.x, y: screen.y });
        self.frame();
    }

    fn primary(&mut self, state: MouseButtonState) {
        self.send(InputEvent::PointerButton { button: MouseButton::Left, state });
        self.frame();
    }

    fn socket_world(&self, socket: NodeId) -> Result<Vec2> {
        self.scene
            .world_position(socket)
            .with_context(|| format!("socket {socket:?} is not in the scene"))
    }

    /// Drags from one socket onto another, the way a user would.
    fn drag_connect(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        let start = self.socket_world(from)?;
        let end = self.socket_world(to)?;

        self.move_to_world(start);
        self.primary(MouseButtonState::Pressed);
        self.move_to_world((start + end) * 0.5);
        self.move_to_world(end);
        self.primary(MouseButtonState::Released);
        // one more frame so the connector picks up both socket positions
        self.frame();

        let connected = self
            .scene
            .behavior::<NodeSocket>(to)
            .and_then(NodeSocket::connector)
            .is_some();
        anyhow::ensure!(connected, "drag from {from:?} to {to:?} did not connect");
        log::info!("connected {from:?} -> {to:?} by drag");
        Ok(())
    }
}

fn output(scene: &Scene, node: NodeId, index: usize) -> Result<NodeId> {
    scene
        .behavior::<GraphNode>(node)
        .and_then(|n| n.outputs().get(index).copied())
        .with_context(|| format!("node {node:?} has no output {index}"))
}

fn input(scene: &Scene, node: NodeId, index: usize) -> Result<NodeId> {
    scene
        .behavior::<GraphNode>(node)
        .and_then(|n| n.inputs().get(index).copied())
        .with_context(|| format!("node {node:?} has no input {index}"))
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut studio = Studio::new()?;
    let graph = studio.graph;

    // ── build ─────────────────────────────────────────────────────────────
    let six = graph.add_node(&mut studio.scene, Constant(Value::Number(6.0)))?;
    let seven = graph.add_node(&mut studio.scene, Constant(Value::Number(7.0)))?;
    let multiply = graph.add_node(&mut studio.scene, Arithmetic::new(ArithmeticOp::Multiply))?;
    let format = graph.add_node(&mut studio.scene, Format::with_precision(1))?;

    let links = [
        (output(&studio.scene, six, 0)?, input(&studio.scene, multiply, 0)?),
        (output(&studio.scene, seven, 0)?, input(&studio.scene, multiply, 1)?),
    ];
    for (from, to) in links {
        graph
            .connect(&mut studio.scene, from, to)
            .with_context(|| format!("connecting {from:?} -> {to:?}"))?;
    }

    // Lay sockets out, then frame the multiply node.
    studio.frame();
    studio.frame();
    studio.viewport.center_on(&studio.scene, multiply, SURFACE_SIZE);
    studio.frame();

    // ── interact ──────────────────────────────────────────────────────────
    let product = output(&studio.scene, multiply, 0)?;
    let text = input(&studio.scene, format, 0)?;
    studio.drag_connect(product, text)?;

    // ── evaluate ──────────────────────────────────────────────────────────
    let result = output(&studio.scene, format, 0)?;
    let value = get_value(&studio.scene, result).context("graph produced no value")?;
    log::info!(
        "{} nodes, {} frames, {} draw calls in the last frame",
        graph.nodes(&studio.scene).len(),
        studio.frames,
        studio.surface.items().len(),
    );
    println!("6 x 7 = {value}");

    studio.capture.dispose(&mut studio.pointer);
    Ok(())
}
