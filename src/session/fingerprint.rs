use crate::foundation::core::Color;
use crate::scene::highlight::{CodeLine, LineClass, TokenKind};
use crate::scene::model::{CodeTone, ElementKind, SceneGraph, SceneNode, TerminalTone, TextRole};
use xxhash_rust::xxh3::Xxh3;

const XXH3_SEED: u64 = 0x8b5ad4a0c7d8e9f1;

/// 128-bit content hash of a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SceneFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl std::fmt::Display for SceneFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Hash everything visible in `scene`.
///
/// The frame index is left out, so two frames that look the same share a fingerprint.
pub fn fingerprint_scene(scene: &SceneGraph) -> SceneFingerprint {
    let mut h = StableHasher::new();
    h.write_str(&scene.composition);
    h.write_u32(scene.canvas.width);
    h.write_u32(scene.canvas.height);
    h.write_u32(scene.fps.num);
    h.write_u32(scene.fps.den);
    write_color(&mut h, scene.background);

    h.write_u32(scene.nodes.len() as u32);
    for node in &scene.nodes {
        write_node(&mut h, node);
    }
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    // Length-prefixed so adjacent strings cannot collide.
    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> SceneFingerprint {
        let v = self.inner.digest128();
        SceneFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_color(h: &mut StableHasher, c: Color) {
    h.write_bytes(&[c.r, c.g, c.b, c.a]);
}

fn write_opt_color(h: &mut StableHasher, c: Option<Color>) {
    match c {
        None => h.write_u8(0),
        Some(c) => {
            h.write_u8(1);
            write_color(h, c);
        }
    }
}

fn write_node(h: &mut StableHasher, node: &SceneNode) {
    h.write_u32(node.id.0);
    match node.parent {
        None => h.write_u8(0),
        Some(p) => {
            h.write_u8(1);
            h.write_u32(p.0);
        }
    }
    h.write_str(&node.key);

    h.write_f64(node.visual.opacity);
    h.write_f64(node.visual.scale);
    h.write_f64(node.visual.translate.x);
    h.write_f64(node.visual.translate.y);

    h.write_u32(node.children.len() as u32);
    for c in &node.children {
        h.write_u32(c.0);
    }

    write_kind(h, &node.kind);
}

fn write_kind(h: &mut StableHasher, kind: &ElementKind) {
    match kind {
        ElementKind::Root => h.write_u8(0),
        ElementKind::Group => h.write_u8(1),
        ElementKind::Panel {
            title,
            fill,
            border,
        } => {
            h.write_u8(2);
            match title {
                None => h.write_u8(0),
                Some(t) => {
                    h.write_u8(1);
                    h.write_str(t);
                }
            }
            write_opt_color(h, *fill);
            write_opt_color(h, *border);
        }
        ElementKind::Text {
            content,
            role,
            color,
        } => {
            h.write_u8(3);
            h.write_str(content);
            h.write_u8(text_role_tag(*role));
            write_color(h, *color);
        }
        ElementKind::Code(block) => {
            h.write_u8(4);
            h.write_bool(block.cursor);
            h.write_u8(match block.tone {
                CodeTone::Normal => 0,
                CodeTone::Error => 1,
                CodeTone::Accent => 2,
            });
            write_color(h, block.color);
            h.write_u32(block.lines.len() as u32);
            for line in &block.lines {
                write_code_line(h, line);
            }
        }
        ElementKind::Terminal {
            lines,
            tone,
            prompt_cursor,
        } => {
            h.write_u8(5);
            h.write_u32(lines.len() as u32);
            for l in lines {
                h.write_str(l);
            }
            h.write_u8(match tone {
                TerminalTone::Plain => 0,
                TerminalTone::Success => 1,
                TerminalTone::Error => 2,
            });
            h.write_bool(*prompt_cursor);
        }
        ElementKind::Button { label } => {
            h.write_u8(6);
            h.write_str(label);
        }
        ElementKind::Indicator { active } => {
            h.write_u8(7);
            h.write_bool(*active);
        }
    }
}

fn text_role_tag(role: TextRole) -> u8 {
    match role {
        TextRole::Title => 0,
        TextRole::Heading => 1,
        TextRole::Body => 2,
        TextRole::Subtitle => 3,
        TextRole::Badge => 4,
        TextRole::CallToAction => 5,
    }
}

fn write_code_line(h: &mut StableHasher, line: &CodeLine) {
    h.write_u32(line.number);
    h.write_bool(line.highlighted);
    h.write_u8(match line.class {
        LineClass::Code => 0,
        LineClass::Comment => 1,
        LineClass::Error => 2,
    });
    h.write_u32(line.tokens.len() as u32);
    for tok in &line.tokens {
        h.write_u8(match tok.kind {
            TokenKind::Keyword => 0,
            TokenKind::Builtin => 1,
            TokenKind::String => 2,
            TokenKind::Number => 3,
            TokenKind::Comment => 4,
            TokenKind::Plain => 5,
        });
        h.write_str(&tok.text);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/fingerprint.rs"]
mod tests;
