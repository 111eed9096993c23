use slotmap::SlotMap;

use crate::coords::Vec2;
use crate::render::PaintKey;

use super::behavior::{AsAny, Behavior};
use super::{NodeId, SceneError, SceneNode};

/// Arena owning every node of a scene.
///
/// Nodes are addressed by [`NodeId`]. Each node stores its ordered children
/// (the ownership edge) and a non-owning parent id, so the tree has no
/// reference cycles. Nodes can live in the arena detached from the tree; only
/// nodes reachable from a rendered root take part in frames.
pub struct Scene {
    nodes: SlotMap<NodeId, SceneNode>,
    root: NodeId,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates a scene holding a single root node.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::new().with_name("root"));
        Self { nodes, root }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena, attached or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }

    // ── topology ──────────────────────────────────────────────────────────

    /// Adds a detached node.
    pub fn insert(&mut self, mut node: SceneNode) -> NodeId {
        node.parent = None;
        node.children.clear();
        node.depth = 0;
        self.nodes.insert(node)
    }

    /// Inserts `node` and attaches it under `parent`.
    pub fn add(&mut self, parent: NodeId, node: SceneNode) -> Result<NodeId, SceneError> {
        if !self.contains(parent) {
            return Err(SceneError::UnknownNode(parent));
        }
        let id = self.insert(node);
        self.attach(parent, id)?;
        Ok(id)
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Children of `id` in order; empty for unknown ids.
    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Whether `ancestor` is `id` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            if c == ancestor {
                return true;
            }
            cur = self.parent(c);
        }
        false
    }

    /// Makes `child` the last child of `parent`.
    ///
    /// Depths of the attached subtree are rebased under `parent`, then every
    /// node of that subtree gets [`Behavior::on_attach`] in pre-order.
    /// Attaching a node to its current parent changes nothing.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        if !self.contains(parent) {
            return Err(SceneError::UnknownNode(parent));
        }
        let Some(current) = self.nodes.get(child).map(|n| n.parent) else {
            return Err(SceneError::UnknownNode(child));
        };
        if child == self.root {
            return Err(SceneError::RootAttach(child));
        }
        match current {
            Some(p) if p == parent => return Ok(()),
            Some(p) => return Err(SceneError::AlreadyAttached { child, parent: p }),
            None => {}
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(SceneError::Cycle { parent, child });
        }

        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);

        let base = self.nodes[parent].depth + 1;
        let old = self.nodes[child].depth;
        let subtree = self.descendants(child);
        for &id in &subtree {
            let node = &mut self.nodes[id];
            node.depth = node.depth - old + base;
        }

        log::debug!("attached {child:?} under {parent:?} ({} nodes)", subtree.len());

        for id in subtree {
            self.with_behavior(id, |b, scene| b.on_attach(scene, id));
        }
        Ok(())
    }

    /// Detaches `child` from `parent`. No-op unless `child` is a child of `parent`.
    ///
    /// Every node of the subtree gets [`Behavior::on_detach`] in pre-order
    /// while still attached; the child's depth then resets to 0.
    pub fn detach(&mut self, parent: NodeId, child: NodeId) {
        let is_child = self.nodes.get(parent).is_some_and(|p| p.children.contains(&child));
        if !is_child {
            return;
        }

        for id in self.descendants(child) {
            self.with_behavior(id, |b, scene| b.on_detach(scene, id));
        }

        // A hook may already have moved or removed the child.
        if self.parent(child) != Some(parent) {
            return;
        }

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.retain(|c| *c != child);
        }
        let old = self.nodes[child].depth;
        self.nodes[child].parent = None;
        for id in self.descendants(child) {
            let node = &mut self.nodes[id];
            node.depth -= old;
        }

        log::debug!("detached {child:?} from {parent:?}");
    }

    /// Detaches `id` and frees its whole subtree. The root cannot be removed.
    pub fn remove(&mut self, id: NodeId) {
        if id == self.root || !self.contains(id) {
            return;
        }
        if let Some(parent) = self.parent(id) {
            self.detach(parent, id);
        }
        for n in self.descendants(id) {
            self.nodes.remove(n);
        }
    }

    // ── traversal / lookup ────────────────────────────────────────────────

    /// `from` and all of its descendants, pre-order.
    pub fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(from) {
            return out;
        }
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Visits `from` and every descendant, pre-order.
    pub fn traverse(&self, from: NodeId, mut visit: impl FnMut(NodeId, &SceneNode)) {
        for id in self.descendants(from) {
            visit(id, &self.nodes[id]);
        }
    }

    /// Finds `id` inside the subtree rooted at `from`.
    pub fn find_by_id(&self, from: NodeId, id: NodeId) -> Option<NodeId> {
        self.descendants(from).into_iter().find(|n| *n == id)
    }

    /// First node named `name` in the subtree rooted at `from`, pre-order.
    pub fn find_by_name(&self, from: NodeId, name: &str) -> Option<NodeId> {
        self.descendants(from).into_iter().find(|n| self.nodes[*n].name == name)
    }

    // ── transforms ────────────────────────────────────────────────────────

    /// Updates matrices of `from` and its subtree, parents before children.
    pub fn update_transforms(&mut self, from: NodeId) {
        for id in self.descendants(from) {
            let parent_world = self
                .parent(id)
                .and_then(|p| self.nodes.get(p))
                .map(|p| *p.world_matrix());
            self.nodes[id].update_transform(parent_world.as_ref());
        }
    }

    /// World position of the node's local origin.
    pub fn world_position(&self, id: NodeId) -> Option<Vec2> {
        self.nodes.get(id).map(SceneNode::world_position)
    }

    // ── hit testing ───────────────────────────────────────────────────────

    /// Every node of the subtree whose shape contains `world`, pre-order.
    ///
    /// Uses the matrices from the last transform update.
    pub fn hit_test_world(&self, from: NodeId, world: Vec2) -> Vec<NodeId> {
        self.descendants(from)
            .into_iter()
            .filter(|id| self.nodes[*id].contains_world_point(world))
            .collect()
    }

    /// Whether `id` (or, if `recursive`, anything below it) contains `world`.
    pub fn hit_test_world_any(&self, id: NodeId, world: Vec2, recursive: bool) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        if node.contains_world_point(world) {
            return true;
        }
        recursive
            && node
                .children
                .iter()
                .any(|c| self.hit_test_world_any(*c, world, true))
    }

    /// Priority key used for paint order and hit-test order.
    pub fn paint_key(&self, id: NodeId) -> PaintKey {
        self.nodes
            .get(id)
            .map_or(PaintKey::new(i32::MIN, 0), |n| PaintKey::new(n.layer, n.depth))
    }

    /// Stable sort, front-most first.
    pub fn sort_front_to_back(&self, ids: &mut [NodeId]) {
        ids.sort_by_key(|id| self.paint_key(*id));
    }

    // ── behaviors ─────────────────────────────────────────────────────────

    pub fn set_behavior<B: Behavior>(&mut self, id: NodeId, behavior: B) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.behavior = Some(Box::new(behavior));
        }
    }

    /// Typed access to a node's behavior.
    ///
    /// `None` for a different type, no behavior, or while that behavior's own
    /// hook is running.
    pub fn behavior<T: Behavior>(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id)?.behavior.as_deref()?.as_any().downcast_ref::<T>()
    }

    pub fn behavior_mut<T: Behavior>(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes
            .get_mut(id)?
            .behavior
            .as_deref_mut()?
            .as_any_mut()
            .downcast_mut::<T>()
    }

    /// Runs `f` with the node's behavior taken out of the arena, so `f` can
    /// mutate the scene freely. The behavior is put back afterwards unless
    /// the node was removed or given a new behavior meanwhile.
    ///
    /// Returns `None` when the node has no behavior.
    pub fn with_behavior<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn Behavior, &mut Scene) -> R,
    ) -> Option<R> {
        let mut behavior = self.nodes.get_mut(id)?.behavior.take()?;
        let out = f(behavior.as_mut(), self);
        if let Some(node) = self.nodes.get_mut(id) {
            if node.behavior.is_none() {
                node.behavior = Some(behavior);
            }
        }
        Some(out)
    }
}
