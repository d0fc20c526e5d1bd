//! Unified diff generation utilities.
//!
//! Produces a unified diff from rewrite results. The old side is the source
//! file and the new side is its output file. Each replaced line is shown as a
//! single-line hunk at its location.

use crate::corpus::slash_path;
use crate::rewrite::FileRewrite;

/// Generate a unified diff for every file with at least one edit.
///
/// Files appear in the order given; files copied verbatim are skipped.
pub fn generate_unified_diff(rewrites: &[FileRewrite], target_extension: &str) -> String {
    let mut diff = String::new();
    for rewrite in rewrites.iter().filter(|r| !r.is_verbatim()) {
        diff.push_str(&format!("--- a/{}\n", rewrite.source.display()));
        diff.push_str(&format!(
            "+++ b/{}\n",
            slash_path(&rewrite.source.relative_output_path(target_extension))
        ));

        for edit in &rewrite.edits {
            diff.push_str(&format!(
                "@@ -{},{} +{},{} @@\n",
                edit.line, 1, edit.line, 1
            ));
            diff.push_str(&format!("-{}\n", edit.old_text));
            diff.push_str(&format!("+{}\n", edit.new_text));
        }
    }

    diff
}

// ============================================================================
// Tests
// ============================================================================
