//! Statement rewriting.
//!
//! Rewrites one file at a time against a completed [`NamespaceIndex`]. Each
//! line is classified with [`LineShape::classify`]; recognized lines are
//! replaced whole, everything else is copied through byte for byte, line
//! endings included.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::DeclarationStyle;
use crate::corpus::SourceFile;
use crate::error::{MigrateError, MigrateResult};
use crate::index::NamespaceIndex;
use crate::patterns::{LineKind, LineShape};
use crate::relpath::import_specifier;

// ============================================================================
// Rewrite Results
// ============================================================================

/// One replaced line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineEdit {
    /// 1-indexed line number in the source file.
    pub line: u32,
    /// Which pattern matched.
    pub kind: LineKind,
    /// Original line, without its terminator.
    pub old_text: String,
    /// Replacement line, without its terminator. Empty for removed declarations.
    pub new_text: String,
}

/// The rewritten form of one corpus file.
#[derive(Debug, Clone)]
pub struct FileRewrite {
    /// File the contents were read from.
    pub source: SourceFile,
    /// Where the contents are written.
    pub output: PathBuf,
    /// Full rewritten contents.
    pub contents: String,
    /// Replaced lines, in line order.
    pub edits: Vec<LineEdit>,
}

impl FileRewrite {
    /// True when no line was recognized; the output is a copy of the input.
    pub fn is_verbatim(&self) -> bool {
        self.edits.is_empty()
    }

    /// Write the contents to the output path, creating or truncating it.
    pub fn write(&self) -> MigrateResult<()> {
        fs::write(&self.output, &self.contents)
            .map_err(|e| MigrateError::write_failed(&self.output, e))
    }
}

// ============================================================================
// Rewriter
// ============================================================================

/// Rewrites files against a completed namespace index.
#[derive(Debug, Clone, Copy)]
pub struct Rewriter<'a> {
    index: &'a NamespaceIndex,
    style: DeclarationStyle,
}

impl<'a> Rewriter<'a> {
    pub fn new(index: &'a NamespaceIndex, style: DeclarationStyle) -> Self {
        Rewriter { index, style }
    }

    /// Read and rewrite a corpus file.
    pub fn rewrite_file(
        &self,
        file: &SourceFile,
        target_extension: &str,
    ) -> MigrateResult<FileRewrite> {
        let original = file.read()?;
        let (contents, edits) = self.rewrite_source(&file.relative, &original)?;

        tracing::debug!("Rewrote {} ({} lines changed)", file.display(), edits.len());

        Ok(FileRewrite {
            source: file.clone(),
            output: file.output_path(target_extension),
            contents,
            edits,
        })
    }

    /// Rewrite `contents` of the file at corpus-relative path `file`.
    ///
    /// The first unresolved namespace aborts the file.
    pub fn rewrite_source(
        &self,
        file: &Path,
        contents: &str,
    ) -> MigrateResult<(String, Vec<LineEdit>)> {
        let mut output = String::with_capacity(contents.len());
        let mut edits = Vec::new();

        for (idx, piece) in contents.split_inclusive('\n').enumerate() {
            let (line, ending) = split_line_ending(piece);
            let line_number = (idx + 1) as u32;

            let Some(shape) = LineShape::classify(line, self.style) else {
                output.push_str(piece);
                continue;
            };

            let replacement = shape.render(|namespace| self.resolve(namespace, file, line_number))?;

            tracing::trace!(
                "{}:{}: {:?} -> {:?}",
                file.display(),
                line_number,
                line,
                replacement
            );

            output.push_str(&replacement);
            output.push_str(ending);
            edits.push(LineEdit {
                line: line_number,
                kind: shape.kind(),
                old_text: line.to_string(),
                new_text: replacement,
            });
        }

        Ok((output, edits))
    }

    fn resolve(&self, namespace: &str, file: &Path, line: u32) -> MigrateResult<String> {
        let target = self
            .index
            .get(namespace)
            .ok_or_else(|| MigrateError::UnresolvedNamespace {
                namespace: namespace.to_string(),
                file: file.display().to_string(),
                line,
            })?;
        Ok(import_specifier(file, target))
    }
}

/// Split a line into its body and its terminator (`"\r\n"`, `"\n"` or `""`).
fn split_line_ending(piece: &str) -> (&str, &str) {
    if let Some(body) = piece.strip_suffix("\r\n") {
        (body, &piece[body.len()..])
    } else if let Some(body) = piece.strip_suffix('\n') {
        (body, &piece[body.len()..])
    } else {
        (piece, "")
    }
}
