use std::collections::HashSet;

use smallvec::SmallVec;

use crate::foundation::core::{Canvas, Color, Fps, FrameIndex};
use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::model::{ElementKind, NodeId, SceneGraph, SceneNode, TextRole, Visual};
use crate::timeline::sequence::{Sequence, TimeCtx};

/// Builds a [`SceneGraph`] top-down into a flat arena.
///
/// The builder keeps a stack of open containers and a matching stack of clocks. Nodes added
/// inside [`SceneBuilder::sequence`] see the rebased [`TimeCtx`] of that sequence through
/// [`SceneBuilder::time`]; when the sequence is not mounted its closure never runs.
///
/// Keys are joined with `/` under their container's key and must be unique within the graph.
#[derive(Debug)]
pub struct SceneBuilder {
    graph: SceneGraph,
    parents: Vec<NodeId>,
    clocks: Vec<TimeCtx>,
    keys: HashSet<String>,
}

impl SceneBuilder {
    /// Start a graph for `frame` of a composition `duration_in_frames` long.
    pub fn new(
        composition: &str,
        frame: FrameIndex,
        canvas: Canvas,
        fps: Fps,
        duration_in_frames: u64,
        background: Color,
    ) -> Self {
        let root = SceneNode {
            id: NodeId::ROOT,
            parent: None,
            key: String::new(),
            kind: ElementKind::Root,
            visual: Visual::default(),
            children: SmallVec::new(),
        };
        Self {
            graph: SceneGraph {
                composition: composition.to_owned(),
                frame,
                canvas,
                fps,
                background,
                nodes: vec![root],
            },
            parents: vec![NodeId::ROOT],
            clocks: vec![TimeCtx::root(frame, duration_in_frames, fps)],
            keys: HashSet::new(),
        }
    }

    /// Clock of the innermost open sequence.
    pub fn time(&self) -> TimeCtx {
        self.clocks
            .last()
            .copied()
            .unwrap_or_else(|| TimeCtx::root(self.graph.frame, 0, self.graph.fps))
    }

    /// Local frame of the innermost open sequence.
    pub fn frame(&self) -> i64 {
        self.time().frame
    }

    fn current_parent(&self) -> NodeId {
        self.parents.last().copied().unwrap_or(NodeId::ROOT)
    }

    /// Append a leaf under the current container.
    pub fn add(&mut self, key: &str, kind: ElementKind, visual: Visual) -> ReelResult<NodeId> {
        if key.is_empty() || key.contains('/') {
            return Err(ReelError::validation(format!(
                "node key '{key}' must be non-empty and contain no '/'"
            )));
        }
        let parent = self.current_parent();
        let full_key = match self.graph.node(parent) {
            Some(p) if !p.key.is_empty() => format!("{}/{key}", p.key),
            _ => key.to_owned(),
        };
        if !self.keys.insert(full_key.clone()) {
            return Err(ReelError::validation(format!(
                "duplicate node key '{full_key}' in composition '{}'",
                self.graph.composition
            )));
        }

        let id = NodeId(u32::try_from(self.graph.nodes.len()).map_err(|_| {
            ReelError::validation("scene graph exceeds u32::MAX nodes")
        })?);
        self.graph.nodes.push(SceneNode {
            id,
            parent: Some(parent),
            key: full_key,
            kind,
            visual,
            children: SmallVec::new(),
        });
        self.graph.nodes[parent.index()].children.push(id);
        Ok(id)
    }

    /// Append a text leaf.
    pub fn text(
        &mut self,
        key: &str,
        content: impl Into<String>,
        role: TextRole,
        color: Color,
        visual: Visual,
    ) -> ReelResult<NodeId> {
        self.add(
            key,
            ElementKind::Text {
                content: content.into(),
                role,
                color,
            },
            visual,
        )
    }

    /// Append a container and build its children with `f`.
    pub fn container(
        &mut self,
        key: &str,
        kind: ElementKind,
        visual: Visual,
        f: impl FnOnce(&mut Self) -> ReelResult<()>,
    ) -> ReelResult<NodeId> {
        let id = self.add(key, kind, visual)?;
        self.parents.push(id);
        let res = f(self);
        self.parents.pop();
        res.map(|()| id)
    }

    /// Append a plain group and build its children with `f`.
    pub fn group(
        &mut self,
        key: &str,
        visual: Visual,
        f: impl FnOnce(&mut Self) -> ReelResult<()>,
    ) -> ReelResult<NodeId> {
        self.container(key, ElementKind::Group, visual, f)
    }

    /// Gate a subtree by `seq`, measured in the current clock.
    ///
    /// Returns `Ok(None)` without running `f` when the window is not mounted at this frame.
    /// Inside `f`, [`SceneBuilder::time`] reports the sequence's local clock.
    pub fn sequence(
        &mut self,
        key: &str,
        seq: Sequence,
        f: impl FnOnce(&mut Self) -> ReelResult<()>,
    ) -> ReelResult<Option<NodeId>> {
        let Some(ctx) = self.time().enter(seq) else {
            return Ok(None);
        };
        let id = self.add(key, ElementKind::Group, Visual::default())?;
        self.parents.push(id);
        self.clocks.push(ctx);
        let res = f(self);
        self.clocks.pop();
        self.parents.pop();
        res.map(|()| Some(id))
    }

    /// Finish and return the graph.
    pub fn finish(self) -> SceneGraph {
        self.graph
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/builder.rs"]
mod tests;
