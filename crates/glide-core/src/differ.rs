//! Tokenizing differ: two snippets in, merged typed segments out

use crate::segment::{Segment, SegmentKind};
use similar::{ChangeTag, TextDiff};

/// Merge-boundary classification of a text run.
///
/// Only used to decide where adjacent diff fragments may coalesce; this is
/// unrelated to syntax-highlighting tokenization. The heuristic is tuned
/// for source-code-like text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenClass {
    Newline,
    Whitespace,
    Word,
    Operator,
}

// ASCII only: non-ASCII letters diff as individual atoms and merge as
// operator-class runs
fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}

fn token_class(text: &str) -> TokenClass {
    if text == "\n" {
        return TokenClass::Newline;
    }
    if !text.is_empty() && text.chars().all(char::is_whitespace) {
        return TokenClass::Whitespace;
    }
    if !text.is_empty() && text.chars().all(is_word_char) {
        return TokenClass::Word;
    }
    TokenClass::Operator
}

/// Split text into diffable atoms: maximal identifier runs, individual
/// whitespace characters, individual punctuation characters. Every input
/// character lands in exactly one token.
fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;

    for (i, ch) in text.char_indices() {
        if is_word_char(ch) {
            if word_start.is_none() {
                word_start = Some(i);
            }
        } else {
            if let Some(start) = word_start.take() {
                tokens.push(&text[start..i]);
            }
            tokens.push(&text[i..i + ch.len_utf8()]);
        }
    }
    if let Some(start) = word_start {
        tokens.push(&text[start..]);
    }
    tokens
}

/// Accumulates segments, merging a candidate run into the open segment when
/// the merge rule allows it.
#[derive(Default)]
struct SegmentBuilder {
    segments: Vec<Segment>,
    open: Option<Segment>,
}

impl SegmentBuilder {
    /// Start a new segment when there is no open one, the kind differs,
    /// either side is a lone newline, or the token class changes.
    fn should_start_new(&self, text: &str, kind: SegmentKind) -> bool {
        let Some(open) = &self.open else {
            return true;
        };
        if open.kind != kind {
            return true;
        }
        if text == "\n" || open.text == "\n" {
            return true;
        }
        token_class(text) != token_class(&open.text)
    }

    fn flush(&mut self) {
        if let Some(seg) = self.open.take() {
            // an empty run is never emitted
            if !seg.text.is_empty() {
                self.segments.push(seg);
            }
        }
    }

    fn push(&mut self, text: &str, kind: SegmentKind) {
        if text.is_empty() {
            return;
        }
        if self.should_start_new(text, kind) {
            self.flush();
            self.open = Some(Segment::new(kind, text));
        } else if let Some(open) = &mut self.open {
            open.text.push_str(text);
        }
    }

    /// A line break always stands alone and closes whatever was open
    fn push_newline(&mut self, kind: SegmentKind) {
        self.flush();
        self.segments.push(Segment::new(kind, "\n"));
    }

    fn finish(mut self) -> Vec<Segment> {
        self.flush();
        self.segments
    }
}

/// Compute the ordered segment list for a before → after transition.
///
/// Runs a whitespace-preserving token diff, then walks each diff part
/// splitting at line breaks and coalescing adjacent fragments of the same
/// kind and token class. Empty inputs are legal (all-added / all-removed).
pub fn segment_diff(before: &str, after: &str) -> Vec<Segment> {
    let before_tokens = tokenize(before);
    let after_tokens = tokenize(after);
    let diff = TextDiff::from_slices(&before_tokens, &after_tokens);

    // Coalesce consecutive same-tag tokens into parts so that an unchanged
    // run like "let x = " reaches the merge rule as one candidate.
    let mut parts: Vec<(SegmentKind, String)> = Vec::new();
    for change in diff.iter_all_changes() {
        let kind = match change.tag() {
            ChangeTag::Equal => SegmentKind::Unchanged,
            ChangeTag::Delete => SegmentKind::Removed,
            ChangeTag::Insert => SegmentKind::Added,
        };
        match parts.last_mut() {
            Some((last_kind, value)) if *last_kind == kind => value.push_str(change.value()),
            _ => parts.push((kind, change.value().to_string())),
        }
    }

    let mut builder = SegmentBuilder::default();
    for (kind, value) in &parts {
        let mut buffer = String::new();
        for ch in value.chars() {
            if ch == '\n' {
                builder.push(&buffer, *kind);
                buffer.clear();
                builder.push_newline(*kind);
            } else {
                buffer.push(ch);
            }
        }
        builder.push(&buffer, *kind);
    }
    builder.finish()
}
