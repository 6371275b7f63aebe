//! # Scanner Module
//!
//! Locates the structure of a source file with a single forward pass over its
//! lines: the documentation comment span (if any) and the type declaration.
//!
//! This is line-pattern matching, not parsing. A line counts as a declaration
//! when it contains `class` or `interface` as a whole word and no `*`
//! character, which keeps keywords mentioned inside comments from matching.

use std::sync::LazyLock;

use regex::Regex;

const COMMENT_OPEN: &str = "/*";
const COMMENT_CLOSE: &str = "*/";

static DECLARATION_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\b(class|interface)\b").expect("declaration regex must compile"));

/// Structural problems that make a file unsafe to rewrite.
///
/// Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructureError {
  #[error("no class or interface declaration found")]
  MissingDeclaration,

  #[error("comment opened on line {line} is not closed before the declaration")]
  UnterminatedComment { line: usize },

  #[error("comment on line {line} opens and closes on the same line")]
  SingleLineComment { line: usize },

  #[error("unexpected content on line {line} between the comment and the declaration: {content}")]
  UnexpectedContent { line: usize, content: String },
}

/// Inclusive line range of the documentation comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSpan {
  pub start: usize,
  pub end: usize,
}

/// Where things are in a file, as found by [`locate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
  /// Index of the declaration line.
  pub declaration: usize,
  /// The comment directly before the declaration, if any.
  pub comment: Option<CommentSpan>,
}

impl Layout {
  /// Index of the first line that belongs to the comment or, without one, to
  /// the declaration. Everything before it is the license region.
  pub fn header_start(&self) -> usize {
    self.comment.map_or(self.declaration, |span| span.start)
  }
}

/// Returns `true` if the line would be taken for the type declaration.
pub fn is_declaration_line(line: &str) -> bool {
  !line.contains('*') && DECLARATION_REGEX.is_match(line)
}

/// Returns `true` if the line is empty or whitespace only.
pub fn is_blank(line: &str) -> bool {
  line.trim().is_empty()
}

/// Scans `lines` and validates what it finds.
///
/// Every comment open marker forgets the previous open/close pair, so the span
/// reported is the last comment opened before the declaration.
///
/// # Errors
///
/// See [`StructureError`]. Nothing is reported for a file that passes, and no
/// line is touched either way.
pub fn locate<S: AsRef<str>>(lines: &[S]) -> Result<Layout, StructureError> {
  let mut open: Option<usize> = None;
  let mut close: Option<usize> = None;
  let mut declaration: Option<usize> = None;

  for (idx, line) in lines.iter().enumerate() {
    let line = line.as_ref();

    if line.contains(COMMENT_OPEN) {
      open = Some(idx);
      close = None;
    }

    if open.is_some() && close.is_none() && line.contains(COMMENT_CLOSE) {
      close = Some(idx);
    }

    if is_declaration_line(line) {
      declaration = Some(idx);
      break;
    }
  }

  let declaration = declaration.ok_or(StructureError::MissingDeclaration)?;

  let comment = match (open, close) {
    (None, _) => None,
    (Some(start), None) => return Err(StructureError::UnterminatedComment { line: start + 1 }),
    (Some(start), Some(end)) if start == end => return Err(StructureError::SingleLineComment { line: start + 1 }),
    (Some(start), Some(end)) => Some(CommentSpan { start, end }),
  };

  if let Some(span) = comment {
    for (idx, line) in lines.iter().enumerate().take(declaration).skip(span.end + 1) {
      let line: &str = line.as_ref();
      if !is_blank(line) {
        return Err(StructureError::UnexpectedContent {
          line: idx + 1,
          content: line.to_string(),
        });
      }
    }
  }

  Ok(Layout { declaration, comment })
}
