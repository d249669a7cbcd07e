use once_cell::sync::Lazy;
use regex::Regex;
use swc_core::common::{
    BytePos, DUMMY_SP, Span,
    comments::{Comment, CommentKind, Comments},
    source_map::PURE_SP,
};

const PURE_ANNOTATION: &str = "#__PURE__";

static PURE_ANNOTATION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[@#]__PURE__").unwrap());

fn pure_comment() -> Comment {
    Comment {
        span: DUMMY_SP,
        kind: CommentKind::Block,
        text: PURE_ANNOTATION.into(),
    }
}

pub(crate) fn is_pure_annotation(comment: &Comment) -> bool {
    PURE_ANNOTATION_REGEX.is_match(&comment.text)
}

/// Whether the node starting at `span` already carries a purity marker.
pub(crate) fn is_pure_annotated<C: Comments>(comments: &C, span: Span) -> bool {
    span.lo == PURE_SP.lo
        || comments
            .get_leading(span.lo)
            .is_some_and(|leading| leading.iter().any(is_pure_annotation))
}

/// Attaches `/*#__PURE__*/` in front of the node starting at `span`, unless it
/// is already there. Returns whether a comment was added.
pub(crate) fn annotate_as_pure<C: Comments>(comments: &C, span: Span) -> bool {
    // Comments can't be attached to synthesized nodes.
    if span.lo == DUMMY_SP.lo || is_pure_annotated(comments, span) {
        return false;
    }

    comments.add_leading(span.lo, pure_comment());
    true
}

/// Moves a marker added by [annotate_as_pure] from `from` to `to`, leaving
/// every other comment at `from` untouched.
pub(crate) fn move_pure_annotation<C: Comments>(comments: &C, from: BytePos, to: BytePos) {
    let Some(mut leading) = comments.take_leading(from) else {
        return;
    };
    if let Some(index) = leading
        .iter()
        .rposition(|comment| *comment.text == *PURE_ANNOTATION)
    {
        leading.remove(index);
        comments.add_leading(to, pure_comment());
    }
    if !leading.is_empty() {
        comments.add_leading_comments(from, leading);
    }
}
