//! Span-based rewriting of source text.
//!
//! Rewrites are recorded against byte offsets of the original text and
//! applied in a single pass. Edits must not overlap.

use crate::error::{GenError, Result};
use oxc_span::Span;

/// A single replacement of `span` in the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Edit {
    span: Span,
    replacement: String,
}

/// Edit buffer over a borrowed source string.
#[derive(Debug, Clone)]
pub struct SourceEdits<'s> {
    source: &'s str,
    edits: Vec<Edit>,
}

impl<'s> SourceEdits<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            edits: Vec::new(),
        }
    }

    /// Replace the text covered by `span`.
    pub fn replace(&mut self, span: Span, replacement: impl Into<String>) {
        self.edits.push(Edit {
            span,
            replacement: replacement.into(),
        });
    }

    /// Delete the text covered by `span`.
    pub fn remove(&mut self, span: Span) {
        self.replace(span, String::new());
    }

    /// Apply every recorded edit and return the rewritten text.
    ///
    /// # Errors
    ///
    /// Fails when an edit falls outside the source, splits a UTF-8 sequence,
    /// or overlaps another edit.
    pub fn apply(&self) -> Result<String> {
        let mut ordered: Vec<&Edit> = self.edits.iter().collect();
        ordered.sort_by_key(|edit| (edit.span.start, edit.span.end));

        let mut output = String::with_capacity(self.source.len());
        let mut cursor = 0usize;
        let mut previous: Option<Span> = None;

        for edit in ordered {
            self.check_bounds(edit.span)?;

            if let Some(prev) = previous {
                if edit.span.start < prev.end {
                    return Err(GenError::OverlappingEdits {
                        first_start: prev.start,
                        first_end: prev.end,
                        second_start: edit.span.start,
                        second_end: edit.span.end,
                    });
                }
            }

            let start = edit.span.start as usize;
            output.push_str(&self.source[cursor..start]);
            output.push_str(&edit.replacement);
            cursor = edit.span.end as usize;
            previous = Some(edit.span);
        }

        output.push_str(&self.source[cursor..]);
        tracing::trace!(edits = self.edits.len(), "applied source edits");
        Ok(output)
    }

    fn check_bounds(&self, span: Span) -> Result<()> {
        let (start, end) = (span.start as usize, span.end as usize);
        let valid = start <= end
            && end <= self.source.len()
            && self.source.is_char_boundary(start)
            && self.source.is_char_boundary(end);

        if valid {
            Ok(())
        } else {
            Err(GenError::EditOutOfBounds {
                start: span.start,
                end: span.end,
                len: self.source.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_no_edits_returns_source() {
        let edits = SourceEdits::new("var a = 1;");
        assert_eq!(edits.apply().unwrap(), "var a = 1;");
    }

    #[test]
    fn test_replace_and_remove() {
        let source = "module.exports = a;";
        let mut edits = SourceEdits::new(source);
        edits.replace(Span::new(0, 17), "return ");
        assert_eq!(edits.apply().unwrap(), "return a;");

        let mut edits = SourceEdits::new("var a = 1, b = 2;");
        edits.remove(Span::new(4, 11));
        assert_eq!(edits.apply().unwrap(), "var b = 2;");
    }

    #[test]
    fn test_edits_applied_in_offset_order() {
        let mut edits = SourceEdits::new("abcdef");
        edits.replace(Span::new(4, 5), "E");
        edits.replace(Span::new(0, 1), "A");
        assert_eq!(edits.apply().unwrap(), "AbcdEf");
    }

    #[test]
    fn test_overlapping_edits_rejected() {
        let mut edits = SourceEdits::new("abcdef");
        edits.replace(Span::new(0, 3), "x");
        edits.replace(Span::new(2, 4), "y");
        assert!(matches!(
            edits.apply(),
            Err(GenError::OverlappingEdits { .. })
        ));
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut edits = SourceEdits::new("abc");
        edits.remove(Span::new(2, 10));
        assert!(matches!(
            edits.apply(),
            Err(GenError::EditOutOfBounds { .. })
        ));

        let mut edits = SourceEdits::new("é");
        edits.remove(Span::new(0, 1));
        assert!(edits.apply().is_err());
    }

    proptest! {
        #[test]
        fn identity_edits_preserve_source(source in "[a-z ;=]{0,40}", cuts in prop::collection::vec(0usize..40, 0..6)) {
            let mut points: Vec<usize> = cuts.into_iter().filter(|c| *c <= source.len()).collect();
            points.sort_unstable();
            points.dedup();

            let mut edits = SourceEdits::new(&source);
            for pair in points.windows(2) {
                let span = Span::new(pair[0] as u32, pair[1] as u32);
                edits.replace(span, &source[pair[0]..pair[1]]);
            }
            prop_assert_eq!(edits.apply().unwrap(), source.clone());
        }
    }
}
