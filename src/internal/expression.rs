//! String algebra for the regular expressions built during state elimination.
//!
//! Expressions use `+` for alternation, juxtaposition for concatenation and a postfix `*`.
//! The empty language is written as [EMPTY] and the empty word as [LAMBDA].
//! Literal text is escaped with a backslash wherever it contains one of these operators.

use crate::LAMBDA;

/// The expression of the empty language.
pub(crate) const EMPTY: &str = "∅";

const ESCAPE: char = '\\';

/// The expression matching exactly `text`.
pub(crate) fn literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '(' | ')' | '*' | '+' | '[' | ']' | '\\' | 'λ' | '∅') {
            escaped.push(ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// The alternation of two expressions.
pub(crate) fn or(r1: &str, r2: &str) -> String {
    if r1 == EMPTY {
        r2.to_string()
    } else if r2 == EMPTY || r1 == r2 {
        r1.to_string()
    } else {
        format!("{}+{}", r1, r2)
    }
}

/// The concatenation of two expressions.
pub(crate) fn concat(r1: &str, r2: &str) -> String {
    if r1 == EMPTY || r2 == EMPTY {
        EMPTY.to_string()
    } else if r1 == LAMBDA {
        r2.to_string()
    } else if r2 == LAMBDA {
        r1.to_string()
    } else {
        format!("{}{}", group_alternation(r1), group_alternation(r2))
    }
}

/// The Kleene star of an expression.
pub(crate) fn star(r: &str) -> String {
    if r == EMPTY || r == LAMBDA {
        return LAMBDA.to_string();
    }
    if let Some(starred) = r.strip_suffix('*') {
        if !ends_with_escape(starred) && is_atom(starred) {
            // r** = r*
            return r.to_string();
        }
    }
    if is_atom(r) {
        format!("{}*", r)
    } else {
        format!("({})*", r)
    }
}

fn group_alternation(r: &str) -> String {
    if has_top_level_or(r) {
        format!("({})", r)
    } else {
        r.to_string()
    }
}

// A single symbol, an escaped symbol, a range or a group enclosed in one pair of parentheses.
fn is_atom(r: &str) -> bool {
    let mut chars = r.chars();
    let single = match (chars.next(), chars.next(), chars.next()) {
        (Some(_), None, None) => true,
        (Some(ESCAPE), Some(_), None) => true,
        _ => false,
    };
    single || is_range(r) || is_enclosed(r)
}

// The last character of `r` escapes whatever follows it.
fn ends_with_escape(r: &str) -> bool {
    r.chars().rev().take_while(|c| *c == ESCAPE).count() % 2 == 1
}

// The characters of `r` that are operators, with the escaped ones left out.
fn operators(r: &str) -> impl Iterator<Item = (usize, char)> + '_ {
    let mut escaped = false;
    r.char_indices().filter(move |(_, c)| {
        if escaped {
            escaped = false;
            false
        } else if *c == ESCAPE {
            escaped = true;
            false
        } else {
            true
        }
    })
}

fn is_range(r: &str) -> bool {
    let chars = r.chars().collect::<Vec<_>>();
    chars.len() == 5 && chars[0] == '[' && chars[2] == '-' && chars[4] == ']'
}

// The opening parenthesis at the start is closed by the last character.
fn is_enclosed(r: &str) -> bool {
    if !r.starts_with('(') || !r.ends_with(')') {
        return false;
    }
    let mut depth = 0usize;
    for (i, c) in operators(r) {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i + c.len_utf8() == r.len();
                }
            }
            _ => {}
        }
    }
    false
}

fn has_top_level_or(r: &str) -> bool {
    let mut depth = 0usize;
    for (_, c) in operators(r) {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            '+' if depth == 0 => return true,
            _ => {}
        }
    }
    false
}
