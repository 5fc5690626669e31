/// The textual representation of the empty word.
pub const LAMBDA: &str = "λ";

/// The label of a transition.
///
/// Labels are parsed from their textual form with [TransitionLabel::parse]:
/// - the empty string is an epsilon label,
/// - a bracketed character interval like `[a-z]` is a range label,
/// - everything else is a literal label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", from = "String")
)]
pub enum TransitionLabel {
    /// Matches without consuming input.
    Epsilon,
    /// Matches the contained string verbatim.
    Literal(String),
    /// Matches exactly one character within the inclusive interval.
    Range(char, char),
}

impl TransitionLabel {
    /// Create a label from its textual form.
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            return TransitionLabel::Epsilon;
        }
        let chars = text.chars().collect::<Vec<_>>();
        if chars.len() == 5
            && chars[0] == '['
            && chars[2] == '-'
            && chars[4] == ']'
            && chars[1] <= chars[3]
        {
            TransitionLabel::Range(chars[1], chars[3])
        } else {
            TransitionLabel::Literal(text.to_string())
        }
    }

    /// Create a literal label. An empty string yields an epsilon label.
    pub fn literal(text: &str) -> Self {
        if text.is_empty() {
            TransitionLabel::Epsilon
        } else {
            TransitionLabel::Literal(text.to_string())
        }
    }

    /// Returns true if this is an epsilon label.
    #[inline]
    pub fn is_epsilon(&self) -> bool {
        matches!(self, TransitionLabel::Epsilon)
    }

    /// Returns true if the label consumes more than one character.
    pub fn is_multi_character(&self) -> bool {
        match self {
            TransitionLabel::Literal(s) => s.chars().count() > 1,
            TransitionLabel::Epsilon | TransitionLabel::Range(..) => false,
        }
    }

    /// Returns the number of bytes of `input` consumed by this label if it matches a prefix of
    /// `input`.
    pub fn match_prefix(&self, input: &str) -> Option<usize> {
        match self {
            TransitionLabel::Epsilon => Some(0),
            TransitionLabel::Literal(s) => input.starts_with(s.as_str()).then_some(s.len()),
            TransitionLabel::Range(lo, hi) => input
                .chars()
                .next()
                .filter(|c| lo <= c && c <= hi)
                .map(char::len_utf8),
        }
    }

    /// Returns true if the label matches the given single-character symbol exactly.
    pub fn matches_symbol(&self, symbol: &str) -> bool {
        let mut chars = symbol.chars();
        match (self, chars.next(), chars.next()) {
            (TransitionLabel::Literal(s), _, _) => s == symbol,
            (TransitionLabel::Range(lo, hi), Some(c), None) => *lo <= c && c <= *hi,
            _ => false,
        }
    }

    /// The single-character symbols this label contributes to an alphabet-complete symbol set.
    /// Literal labels contribute their characters, ranges every character of the interval.
    pub(crate) fn symbols(&self) -> Vec<String> {
        match self {
            TransitionLabel::Epsilon => Vec::new(),
            TransitionLabel::Literal(s) => s.chars().map(String::from).collect(),
            TransitionLabel::Range(lo, hi) => (*lo..=*hi).map(String::from).collect(),
        }
    }

    /// Returns true if both labels can consume the same first character.
    /// Two literals like `ab` and `ac` overlap: once split into single-character transitions they
    /// leave the same state on `a`.
    /// Epsilon labels overlap with nothing here, they are handled separately by the determinism
    /// check.
    pub fn overlaps(&self, other: &TransitionLabel) -> bool {
        use TransitionLabel::*;
        match (self, other) {
            (Epsilon, _) | (_, Epsilon) => false,
            (Literal(a), Literal(b)) => a.chars().next() == b.chars().next(),
            (Range(lo1, hi1), Range(lo2, hi2)) => lo1 <= hi2 && lo2 <= hi1,
            (Literal(s), Range(lo, hi)) | (Range(lo, hi), Literal(s)) => s
                .chars()
                .next()
                .is_some_and(|c| *lo <= c && c <= *hi),
        }
    }

    /// The textual form of the label as accepted by [TransitionLabel::parse].
    pub fn to_text(&self) -> String {
        match self {
            TransitionLabel::Epsilon => String::new(),
            TransitionLabel::Literal(s) => s.clone(),
            TransitionLabel::Range(lo, hi) => format!("[{}-{}]", lo, hi),
        }
    }
}

impl std::fmt::Display for TransitionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionLabel::Epsilon => write!(f, "{}", LAMBDA),
            _ => write!(f, "{}", self.to_text()),
        }
    }
}

impl From<&str> for TransitionLabel {
    fn from(text: &str) -> Self {
        TransitionLabel::parse(text)
    }
}

impl From<String> for TransitionLabel {
    fn from(text: String) -> Self {
        TransitionLabel::parse(&text)
    }
}

impl From<TransitionLabel> for String {
    fn from(label: TransitionLabel) -> Self {
        label.to_text()
    }
}
