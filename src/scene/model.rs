use smallvec::SmallVec;

use crate::foundation::core::{Canvas, Color, Fps, FrameIndex, Vec2};
use crate::scene::highlight::CodeLine;

/// Index of a node inside [`SceneGraph::nodes`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The root node of every graph.
    pub const ROOT: Self = Self(0);

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Per-node animated display state. Values compose multiplicatively down the tree.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Visual {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Translation in pixels.
    pub translate: Vec2,
}

impl Default for Visual {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            scale: 1.0,
            translate: Vec2::ZERO,
        }
    }
}

impl Visual {
    /// Identity visual with `opacity`, clamped to `[0, 1]`.
    pub fn faded(opacity: f64) -> Self {
        Self::default().with_opacity(opacity)
    }

    /// Same visual with `opacity`, clamped to `[0, 1]`.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Same visual with uniform `scale`.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Same visual translated by `(x, y)` pixels.
    pub fn with_translate(mut self, x: f64, y: f64) -> Self {
        self.translate = Vec2::new(x, y);
        self
    }
}

/// Semantic role of a text element; the host maps roles to typography.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    /// Full-screen title card.
    Title,
    /// Section or panel heading.
    Heading,
    /// Regular copy.
    Body,
    /// Narration line.
    Subtitle,
    /// Small pill label.
    Badge,
    /// Closing call to action.
    CallToAction,
}

/// Tint of a code panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeTone {
    /// Regular editor colors.
    #[default]
    Normal,
    /// Whole panel flagged as failing code.
    Error,
    /// Follow-up snippet drawn in an accent color.
    Accent,
}

/// Tint of terminal output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalTone {
    /// Plain output.
    #[default]
    Plain,
    /// Successful run.
    Success,
    /// Failed run.
    Error,
}

/// A code panel's revealed content.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CodeBlock {
    /// Revealed lines, tokenized.
    pub lines: Vec<CodeLine>,
    /// Typing cursor after the last revealed character.
    pub cursor: bool,
    /// Panel tint.
    pub tone: CodeTone,
    /// Color of untokenized text.
    pub color: Color,
}

impl CodeBlock {
    /// Revealed source text, lines joined with `\n`.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            for tok in &line.tokens {
                out.push_str(&tok.text);
            }
        }
        out
    }
}

/// What a node draws.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
    /// Graph root; fills the canvas.
    Root,
    /// Pure container.
    Group,
    /// Boxed container, optionally titled.
    Panel {
        /// Title bar text.
        title: Option<String>,
        /// Background fill.
        fill: Option<Color>,
        /// Border color.
        border: Option<Color>,
    },
    /// Text run.
    Text {
        /// Text content.
        content: String,
        /// Typographic role.
        role: TextRole,
        /// Fill color.
        color: Color,
    },
    /// Code panel content.
    Code(CodeBlock),
    /// Terminal output.
    Terminal {
        /// Revealed lines, without prompt.
        lines: Vec<String>,
        /// Output tint.
        tone: TerminalTone,
        /// Idle prompt after the last line.
        prompt_cursor: bool,
    },
    /// Simulated push button.
    Button {
        /// Button label.
        label: String,
    },
    /// Progress dot.
    Indicator {
        /// Lit while its phase is active.
        active: bool,
    },
}

/// One element of a [`SceneGraph`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneNode {
    /// Arena index.
    pub id: NodeId,
    /// Parent node; `None` only for the root.
    pub parent: Option<NodeId>,
    /// Stable, slash separated key, unique within the graph.
    pub key: String,
    /// What to draw.
    pub kind: ElementKind,
    /// Animated display state.
    pub visual: Visual,
    /// Children in paint order.
    pub children: SmallVec<[NodeId; 4]>,
}

/// Everything visible in one frame of one composition.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneGraph {
    /// Composition id.
    pub composition: String,
    /// Absolute frame this graph was built for.
    pub frame: FrameIndex,
    /// Output size.
    pub canvas: Canvas,
    /// Composition frame rate.
    pub fps: Fps,
    /// Canvas background.
    pub background: Color,
    /// Node arena; index 0 is the root.
    pub nodes: Vec<SceneNode>,
}

impl SceneGraph {
    /// Root node.
    pub fn root(&self) -> &SceneNode {
        &self.nodes[NodeId::ROOT.index()]
    }

    /// Node by id.
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.index())
    }

    /// Node by key.
    pub fn find(&self, key: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.key == key)
    }

    /// `true` when a node with `key` is mounted.
    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Nodes whose key starts with `prefix`.
    pub fn find_prefixed<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a SceneNode> {
        self.nodes.iter().filter(move |n| n.key.starts_with(prefix))
    }

    /// Opacity after multiplying every ancestor's opacity.
    pub fn effective_opacity(&self, id: NodeId) -> f64 {
        let mut acc = 1.0;
        let mut cur = self.node(id);
        while let Some(n) = cur {
            acc *= n.visual.opacity;
            cur = n.parent.and_then(|p| self.node(p));
        }
        acc
    }

    /// Depth-first, paint-order traversal.
    pub fn walk(&self) -> Vec<&SceneNode> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            out.push(node);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Text content of a text node by key.
    pub fn text_of(&self, key: &str) -> Option<&str> {
        match &self.find(key)?.kind {
            ElementKind::Text { content, .. } => Some(content.as_str()),
            _ => None,
        }
    }
}
