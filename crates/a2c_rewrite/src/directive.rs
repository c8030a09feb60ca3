//! Per-statement exemption markers.
//!
//! A statement whose leading comments include the exact marker text is
//! passed through untouched. Only comments attached to the statement
//! itself count; comments inside a call's arguments never exempt it.

use a2c_ast::{Directive, IGNORE_COMMENT};
use swc_common::{comments::Comments, BytePos};

/// Decide whether the statement starting at `lo` may be rewritten.
///
/// Pure function of the position and the comment side-table. A comment
/// matches only if its trimmed text equals the marker exactly; markers
/// embedded in longer sentences do not count.
pub fn scan(lo: BytePos, comments: &dyn Comments) -> Directive {
    let exempt = comments
        .get_leading(lo)
        .is_some_and(|list| list.iter().any(|c| c.text.trim() == IGNORE_COMMENT));
    if exempt {
        Directive::Exempt
    } else {
        Directive::Eligible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a2c_ast::Directive;
    use swc_common::{
        comments::{Comment, CommentKind, Comments, SingleThreadedComments},
        BytePos, Span,
    };

    fn comment(text: &str, pos: BytePos) -> Comment {
        Comment {
            kind: CommentKind::Line,
            span: Span::new(pos, pos),
            text: text.into(),
        }
    }

    #[test]
    fn exact_marker_exempts() {
        let comments = SingleThreadedComments::default();
        let pos = BytePos(10);
        comments.add_leading(pos, comment(" transform-amd-to-commonjs-ignore ", BytePos(0)));
        assert_eq!(scan(pos, &comments), Directive::Exempt);
    }

    #[test]
    fn marker_inside_longer_text_does_not_exempt() {
        let comments = SingleThreadedComments::default();
        let pos = BytePos(10);
        comments.add_leading(
            pos,
            comment("please transform-amd-to-commonjs-ignore this", BytePos(0)),
        );
        assert_eq!(scan(pos, &comments), Directive::Eligible);
    }

    #[test]
    fn any_of_several_comments_exempts() {
        let comments = SingleThreadedComments::default();
        let pos = BytePos(10);
        comments.add_leading(pos, comment(" a really nice comment ", BytePos(0)));
        comments.add_leading(pos, comment("transform-amd-to-commonjs-ignore", BytePos(5)));
        assert_eq!(scan(pos, &comments), Directive::Exempt);
    }

    #[test]
    fn no_comments_is_eligible() {
        let comments = SingleThreadedComments::default();
        assert_eq!(scan(BytePos(10), &comments), Directive::Eligible);
    }
}
