//! render/highlight.rs
//!
//! Colours generated pytest code. The whole block is parsed once with
//! tree-sitter and the token spans are then cut per line, so multi-line
//! strings keep their colour across lines.

use tree_sitter::{Node, Parser};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Plain,
    Keyword,
    Builtin,
    Str,
    Comment,
    Number,
    Decorator,
}

const KEYWORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
    "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda",
    "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
];

const BUILTINS: &[&str] = &[
    "print", "len", "range", "str", "int", "float", "dict", "list", "set", "tuple", "isinstance",
    "ValueError", "TypeError", "KeyError", "ZeroDivisionError", "Exception", "pytest", "self",
];

/// Tokens for each line of `code`, in order. Concatenating a line's token
/// texts gives back the line.
pub fn highlight(code: &str) -> Vec<Vec<(Token, String)>> {
    if code.is_empty() {
        return Vec::new();
    }

    let spans = token_spans(code);

    let mut lines: Vec<Vec<(Token, String)>> = vec![Vec::new()];
    let mut pos = 0;
    for (start, end, tok) in spans {
        if end <= pos {
            continue;
        }
        let start = start.max(pos);
        if start > pos {
            emit(&mut lines, &code[pos..start], Token::Plain);
        }
        emit(&mut lines, &code[start..end], tok);
        pos = end;
    }
    emit(&mut lines, &code[pos..], Token::Plain);

    if code.ends_with('\n') {
        lines.pop();
    }
    lines
}

/// Byte ranges of every non-plain token, in source order.
fn token_spans(code: &str) -> Vec<(usize, usize, Token)> {
    let mut parser = Parser::new();
    if parser.set_language(&tree_sitter_python::language()).is_err() {
        return Vec::new();
    }
    let Some(tree) = parser.parse(code, None) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    collect(tree.root_node(), code.as_bytes(), &mut out);
    out
}

fn collect(node: Node<'_>, src: &[u8], out: &mut Vec<(usize, usize, Token)>) {
    let whole = match node.kind() {
        "string" | "concatenated_string" => Some(Token::Str),
        "comment" => Some(Token::Comment),
        "decorator" => Some(Token::Decorator),
        "integer" | "float" => Some(Token::Number),
        "true" | "false" | "none" => Some(Token::Keyword),
        _ => None,
    };

    if let Some(tok) = whole {
        out.push((node.start_byte(), node.end_byte(), tok));
        return;
    }

    if node.child_count() == 0 {
        let tok = leaf_token(node, src);
        if tok != Token::Plain {
            out.push((node.start_byte(), node.end_byte(), tok));
        }
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect(child, src, out);
    }
}

fn leaf_token(node: Node<'_>, src: &[u8]) -> Token {
    if !node.is_named() && KEYWORDS.contains(&node.kind()) {
        return Token::Keyword;
    }

    if node.kind() == "identifier" {
        let text = node.utf8_text(src).unwrap_or("");
        if BUILTINS.contains(&text) {
            return Token::Builtin;
        }
    }

    Token::Plain
}

fn emit(lines: &mut Vec<Vec<(Token, String)>>, text: &str, tok: Token) {
    for (i, part) in text.split('\n').enumerate() {
        if i > 0 {
            lines.push(Vec::new());
        }
        if let Some(line) = lines.last_mut() {
            push(line, tok, part.trim_end_matches('\r'));
        }
    }
}

fn push(line: &mut Vec<(Token, String)>, tok: Token, text: &str) {
    if text.is_empty() {
        return;
    }
    match line.last_mut() {
        Some((last, buf)) if *last == tok => buf.push_str(text),
        _ => line.push((tok, text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(line: &[(Token, String)]) -> String {
        line.iter().map(|(_, t)| t.as_str()).collect()
    }

    #[test]
    fn keywords_strings_and_comments() {
        let lines = highlight("def test_x():  # check\n    assert msg == \"a # not comment\"\n");
        assert_eq!(lines.len(), 2);

        assert_eq!(lines[0][0], (Token::Keyword, "def".into()));
        assert_eq!(lines[0].last().unwrap(), &(Token::Comment, "# check".into()));

        assert!(lines[1].contains(&(Token::Keyword, "assert".into())));
        assert!(lines[1].contains(&(Token::Str, "\"a # not comment\"".into())));
        assert!(!lines[1].iter().any(|(k, _)| *k == Token::Comment));
    }

    #[test]
    fn decorators_numbers_and_builtins() {
        let lines = highlight("@pytest.fixture\ndef value():\n    return 1.5\n");
        assert_eq!(lines[0], vec![(Token::Decorator, "@pytest.fixture".into())]);
        assert!(lines[2].contains(&(Token::Number, "1.5".into())));

        let lines = highlight("with pytest.raises(ZeroDivisionError):\n    divide(1, 0)\n");
        assert!(lines[0].contains(&(Token::Builtin, "ZeroDivisionError".into())));
        assert!(lines[0].contains(&(Token::Builtin, "pytest".into())));
        assert!(lines[1].contains(&(Token::Number, "0".into())));
    }

    #[test]
    fn triple_quoted_string_spans_lines() {
        let lines = highlight("x = 1\ndoc = \"\"\"Docstring\nstill doc\"\"\" + x");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].last().unwrap(), &(Token::Str, "\"\"\"Docstring".into()));
        assert_eq!(lines[2][0], (Token::Str, "still doc\"\"\"".into()));
        assert_eq!(lines[2].last().unwrap(), &(Token::Plain, " + x".into()));
    }

    #[test]
    fn tokens_reassemble_each_line() {
        let code = "import pytest\n\ndef test_zero():\n    with pytest.raises(ZeroDivisionError): divide(1, 0)  # boom\n";
        let lines = highlight(code);
        let expected: Vec<&str> = code.lines().collect();
        assert_eq!(lines.len(), expected.len());
        for (got, want) in lines.iter().zip(expected) {
            assert_eq!(joined(got), want);
        }
    }

    #[test]
    fn broken_code_is_still_covered() {
        let code = "def broken(:\n    return \"unterminated";
        let lines = highlight(code);
        let rebuilt: Vec<String> = lines.iter().map(|l| joined(l)).collect();
        assert_eq!(rebuilt.join("\n"), code);
    }
}
