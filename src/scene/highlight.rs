//! Line-oriented syntax tokenizer for the code panels.
//!
//! Tokens carry a [`TokenKind`] only; mapping kinds to colors belongs to the host. Strings and
//! comments never span lines, which is all the tutorial snippets need, and partially typed input
//! (an unterminated string at the typing cursor) tokenizes without error.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Source language of a snippet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// Python.
    #[default]
    Python,
    /// JavaScript.
    JavaScript,
    /// No highlighting; one plain token per line.
    Plain,
}

const PYTHON_KEYWORDS: &[&str] = &[
    "and", "as", "class", "def", "elif", "else", "for", "from", "if", "import", "in", "is",
    "lambda", "not", "or", "return", "while", "with", "None", "True", "False",
];
const PYTHON_BUILTINS: &[&str] = &[
    "print", "len", "dict", "list", "int", "str", "hasattr", "max", "min", "range",
];
const JS_KEYWORDS: &[&str] = &[
    "const", "let", "var", "function", "return", "if", "else", "for", "while", "new", "true",
    "false", "null", "undefined",
];
const JS_BUILTINS: &[&str] = &["document", "console", "setTimeout"];

impl Language {
    fn comment_prefix(self) -> Option<&'static str> {
        match self {
            Self::Python => Some("#"),
            Self::JavaScript => Some("//"),
            Self::Plain => None,
        }
    }
}

/// Lexical class of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Language keyword.
    Keyword,
    /// Well-known builtin function or object.
    Builtin,
    /// String literal, quotes included.
    String,
    /// Numeric literal.
    Number,
    /// Comment to end of line.
    Comment,
    /// Everything else.
    Plain,
}

/// A run of source text with one lexical class.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Token {
    /// Lexical class.
    pub kind: TokenKind,
    /// Source text.
    pub text: String,
}

/// Whole-line classification used for line tinting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineClass {
    /// Ordinary code.
    #[default]
    Code,
    /// Line holds only a comment.
    Comment,
    /// Line mentions an exception type such as `TypeError`.
    Error,
}

/// One tokenized source line.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CodeLine {
    /// 1-based line number.
    pub number: u32,
    /// Tokens in order; concatenated they give the line text.
    pub tokens: Vec<Token>,
    /// Line is the current focus of narration.
    pub highlighted: bool,
    /// Whole-line class.
    pub class: LineClass,
}

/// Tokenize `code` line by line, marking `highlight_line` (1-based) as focused.
pub fn annotate(code: &str, language: Language, highlight_line: Option<u32>) -> Vec<CodeLine> {
    code.split('\n')
        .enumerate()
        .map(|(i, line)| {
            let number = u32::try_from(i + 1).unwrap_or(u32::MAX);
            CodeLine {
                number,
                tokens: tokenize_line(line, language),
                highlighted: highlight_line == Some(number),
                class: classify_line(line, language),
            }
        })
        .collect()
}

fn classify_line(line: &str, language: Language) -> LineClass {
    if mentions_exception(line) {
        return LineClass::Error;
    }
    match language.comment_prefix() {
        Some(prefix) if line.trim_start().starts_with(prefix) => LineClass::Comment,
        _ => LineClass::Code,
    }
}

fn mentions_exception(line: &str) -> bool {
    EXCEPTION_NAME.as_ref().is_some_and(|re| re.is_match(line))
}

static EXCEPTION_NAME: LazyLock<Option<Regex>> =
    LazyLock::new(|| compiled(Regex::new(r"\b\p{Lu}\w*Error\b"), "exception name"));

static PYTHON_LEXER: LazyLock<Option<Lexer>> = LazyLock::new(|| {
    let strings = format!(
        r#"(?:\b(?i:rb|br|fr|rf|[rbf]))?(?:{}|{})"#,
        quoted('"'),
        quoted('\'')
    );
    compiled(
        Lexer::compile(&[
            TokenRule::new(TokenKind::Comment, "#.*"),
            TokenRule::new(TokenKind::String, strings),
            TokenRule::words(TokenKind::Keyword, PYTHON_KEYWORDS),
            TokenRule::words(TokenKind::Builtin, PYTHON_BUILTINS),
            TokenRule::new(TokenKind::Number, NUMBER),
        ]),
        "python",
    )
});

static JS_LEXER: LazyLock<Option<Lexer>> = LazyLock::new(|| {
    let strings = format!("{}|{}|{}", quoted('"'), quoted('\''), quoted('`'));
    compiled(
        Lexer::compile(&[
            TokenRule::new(TokenKind::Comment, "//.*"),
            TokenRule::new(TokenKind::String, strings),
            TokenRule::words(TokenKind::Keyword, JS_KEYWORDS),
            TokenRule::words(TokenKind::Builtin, JS_BUILTINS),
            TokenRule::new(TokenKind::Number, NUMBER),
        ]),
        "javascript",
    )
});

const NUMBER: &str = r"\b[0-9][A-Za-z0-9_.]*";

// A quoted literal with backslash escapes; the closing quote is optional so a half-typed string
// runs to end of line.
fn quoted(q: char) -> String {
    format!(r#"{q}(?:[^{q}\\]|\\.?)*{q}?"#)
}

fn compiled<T>(built: Result<T, regex::Error>, what: &str) -> Option<T> {
    built
        .inspect_err(|err| tracing::error!(what, %err, "highlight pattern failed to compile"))
        .ok()
}

/// One lexical rule: every match of `pattern` becomes a token of `kind`.
struct TokenRule {
    kind: TokenKind,
    pattern: String,
}

impl TokenRule {
    fn new(kind: TokenKind, pattern: impl Into<String>) -> Self {
        Self {
            kind,
            pattern: pattern.into(),
        }
    }

    fn words(kind: TokenKind, words: &[&str]) -> Self {
        Self::new(kind, format!(r"\b(?:{})\b", words.join("|")))
    }
}

/// Rules joined into one leftmost-first alternation, one capture group per rule in rule order.
///
/// Rule patterns must not contain capture groups of their own.
struct Lexer {
    regex: Regex,
    kinds: Vec<TokenKind>,
}

impl Lexer {
    fn compile(rules: &[TokenRule]) -> Result<Self, regex::Error> {
        let alternation = rules
            .iter()
            .map(|r| format!("({})", r.pattern))
            .collect::<Vec<_>>()
            .join("|");
        Ok(Self {
            regex: Regex::new(&alternation)?,
            kinds: rules.iter().map(|r| r.kind).collect(),
        })
    }

    fn kind_of(&self, caps: &Captures<'_>) -> TokenKind {
        self.kinds
            .iter()
            .enumerate()
            .find(|(i, _)| caps.get(i + 1).is_some())
            .map_or(TokenKind::Plain, |(_, kind)| *kind)
    }
}

impl Language {
    fn lexer(self) -> Option<&'static Lexer> {
        match self {
            Self::Python => PYTHON_LEXER.as_ref(),
            Self::JavaScript => JS_LEXER.as_ref(),
            Self::Plain => None,
        }
    }
}

/// Tokenize a single line.
pub fn tokenize_line(line: &str, language: Language) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::new();
    if line.is_empty() {
        return out;
    }
    let Some(lexer) = language.lexer() else {
        push(&mut out, TokenKind::Plain, line);
        return out;
    };

    let mut pos = 0;
    for caps in lexer.regex.captures_iter(line) {
        let Some(m) = caps.get(0) else { continue };
        if m.is_empty() {
            continue;
        }
        push(&mut out, TokenKind::Plain, &line[pos..m.start()]);
        push(&mut out, lexer.kind_of(&caps), m.as_str());
        pos = m.end();
    }
    push(&mut out, TokenKind::Plain, &line[pos..]);
    out
}

fn push(out: &mut Vec<Token>, kind: TokenKind, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(last) = out.last_mut()
        && last.kind == kind
        && kind == TokenKind::Plain
    {
        last.text.push_str(text);
        return;
    }
    out.push(Token {
        kind,
        text: text.to_owned(),
    });
}

#[cfg(test)]
#[path = "../../tests/unit/scene/highlight.rs"]
mod tests;
