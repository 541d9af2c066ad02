use super::*;

fn kinds(tokens: &[Token]) -> Vec<(TokenKind, &str)> {
    tokens.iter().map(|t| (t.kind, t.text.as_str())).collect()
}

#[test]
fn python_keywords_strings_and_numbers() {
    let toks = tokenize_line("def add(a, b=10): return f\"{a}\" + 'x'", Language::Python);
    assert_eq!(
        kinds(&toks),
        vec![
            (TokenKind::Keyword, "def"),
            (TokenKind::Plain, " add(a, b="),
            (TokenKind::Number, "10"),
            (TokenKind::Plain, "): "),
            (TokenKind::Keyword, "return"),
            (TokenKind::Plain, " "),
            (TokenKind::String, "f\"{a}\""),
            (TokenKind::Plain, " + "),
            (TokenKind::String, "'x'"),
        ]
    );
}

#[test]
fn keywords_respect_word_boundaries() {
    let toks = tokenize_line("define = format_in", Language::Python);
    assert_eq!(kinds(&toks), vec![(TokenKind::Plain, "define = format_in")]);
}

#[test]
fn comment_runs_to_end_of_line() {
    let toks = tokenize_line("x = 1  # set x", Language::Python);
    assert_eq!(toks.last().unwrap().kind, TokenKind::Comment);
    assert_eq!(toks.last().unwrap().text, "# set x");

    let js = tokenize_line("let n = 0; // counter", Language::JavaScript);
    assert_eq!(js[0].kind, TokenKind::Keyword);
    assert_eq!(js.last().unwrap().text, "// counter");
}

#[test]
fn unterminated_string_reaches_line_end() {
    let toks = tokenize_line("print(\"Hel", Language::Python);
    assert_eq!(
        kinds(&toks),
        vec![
            (TokenKind::Builtin, "print"),
            (TokenKind::Plain, "("),
            (TokenKind::String, "\"Hel"),
        ]
    );
}

#[test]
fn tokens_concatenate_back_to_source() {
    let src = "for k, v in d.items():  # 🎉 done\n    print(k, \"→\", v)";
    for (line, src_line) in annotate(src, Language::Python, None).iter().zip(src.split('\n')) {
        let joined: String = line.tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(joined, src_line);
    }
}

#[test]
fn annotate_marks_focus_comments_and_errors() {
    let src = "# greet\nname = 5\nprint(\"Hi \" + name)\nTypeError: can only concatenate str";
    let lines = annotate(src, Language::Python, Some(3));
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0].class, LineClass::Comment);
    assert_eq!(lines[1].class, LineClass::Code);
    assert!(lines[2].highlighted);
    assert!(!lines[1].highlighted);
    assert_eq!(lines[3].class, LineClass::Error);
    assert_eq!(lines[3].number, 4);
}

#[test]
fn plain_language_is_one_token() {
    let toks = tokenize_line("<button id=\"go\">Go</button>", Language::Plain);
    assert_eq!(toks.len(), 1);
    assert_eq!(toks[0].kind, TokenKind::Plain);
    assert!(tokenize_line("", Language::Python).is_empty());
}

#[test]
fn comment_marker_inside_string_stays_in_string() {
    let toks = tokenize_line(r#"s = "a # b \" c"  # real"#, Language::Python);
    assert_eq!(
        kinds(&toks),
        vec![
            (TokenKind::Plain, "s = "),
            (TokenKind::String, r#""a # b \" c""#),
            (TokenKind::Plain, "  "),
            (TokenKind::Comment, "# real"),
        ]
    );
}

#[test]
fn string_prefixes_and_template_literals() {
    let toks = tokenize_line("x = rb'\\x00' + ab'y'", Language::Python);
    assert_eq!(toks[1], Token { kind: TokenKind::String, text: "rb'\\x00'".into() });
    assert_eq!(toks[2].text, " + ab");
    assert_eq!(toks[3].text, "'y'");

    let js = tokenize_line("const s = `n=${n}`; setTimeout(f, 250)", Language::JavaScript);
    assert_eq!(
        kinds(&js),
        vec![
            (TokenKind::Keyword, "const"),
            (TokenKind::Plain, " s = "),
            (TokenKind::String, "`n=${n}`"),
            (TokenKind::Plain, "; "),
            (TokenKind::Builtin, "setTimeout"),
            (TokenKind::Plain, "(f, "),
            (TokenKind::Number, "250"),
            (TokenKind::Plain, ")"),
        ]
    );
}

#[test]
fn numbers_inside_identifiers_stay_plain() {
    let toks = tokenize_line("x1 = _2 + 3.5", Language::Python);
    assert_eq!(
        kinds(&toks),
        vec![(TokenKind::Plain, "x1 = _2 + "), (TokenKind::Number, "3.5")]
    );
}

#[test]
fn exception_names_need_a_prefix_word() {
    let lines = annotate("Error\nraise KeyError('k')\nmyError = 1", Language::Python, None);
    assert_eq!(lines[0].class, LineClass::Code);
    assert_eq!(lines[1].class, LineClass::Error);
    assert_eq!(lines[2].class, LineClass::Code);
}
