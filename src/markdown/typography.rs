//! Symbol replacements on parsed text.
//!
//! comrak's smart punctuation covers quotes, dashes and ellipses. The
//! remaining substitutions, `(c)` `(r)` `(tm)` and `+-`, run here on text
//! nodes. Code spans and code blocks are separate node kinds and are never
//! visited; link text is skipped so visible URLs stay intact.

use comrak::nodes::{AstNode, NodeValue};

pub(super) fn replace_symbols<'a>(root: &'a AstNode<'a>) {
    for node in root.descendants() {
        let in_link = node
            .ancestors()
            .skip(1)
            .any(|ancestor| matches!(ancestor.data.borrow().value, NodeValue::Link(_)));
        if in_link {
            continue;
        }
        let mut data = node.data.borrow_mut();
        if let NodeValue::Text(text) = &mut data.value
            && let Some(replaced) = replace_in(text)
        {
            *text = replaced;
        }
    }
}

fn replace_in(text: &str) -> Option<String> {
    if !text.contains('(') && !text.contains("+-") {
        return None;
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut changed = false;
    while let Some(ch) = rest.chars().next() {
        if let Some((symbol, consumed)) = symbol_at(rest) {
            out.push(symbol);
            rest = &rest[consumed..];
            changed = true;
        } else {
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }
    changed.then_some(out)
}

/// Symbol starting at the head of `s`, with the number of bytes it replaces.
fn symbol_at(s: &str) -> Option<(char, usize)> {
    if s.starts_with("+-") {
        return Some(('\u{b1}', 2));
    }
    let inner = s.strip_prefix('(')?;
    let close = inner.find(')').filter(|&idx| idx <= 2)?;
    let word = &inner[..close];
    let symbol = if word.eq_ignore_ascii_case("c") {
        '\u{a9}'
    } else if word.eq_ignore_ascii_case("r") {
        '\u{ae}'
    } else if word.eq_ignore_ascii_case("tm") {
        '\u{2122}'
    } else {
        return None;
    };
    Some((symbol, close + 2))
}
