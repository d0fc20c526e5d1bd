//! Relative import specifiers.
//!
//! Both the referencing file and the target module are corpus-relative paths,
//! so the relative path between their directories is a pure component
//! computation and never touches the filesystem.

use std::path::{Component, Path, PathBuf};

use crate::corpus::slash_path;

/// Relative path from directory `from` to directory `to`.
///
/// Returns `.` when both are the same directory.
pub fn relative_dir(from: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component<'_>> = normal_components(from);
    let to: Vec<Component<'_>> = normal_components(to);

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..from.len() {
        rel.push("..");
    }
    for component in &to[common..] {
        rel.push(component.as_os_str());
    }

    if rel.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        rel
    }
}

/// Import specifier for `target` (extension already stripped) as seen from
/// the file at `from_file`.
///
/// The result uses `/` separators and always starts with `.`, so it is read
/// as a relative path and not as a package name.
pub fn import_specifier(from_file: &Path, target: &Path) -> String {
    let from_dir = from_file.parent().unwrap_or_else(|| Path::new(""));
    let target_dir = target.parent().unwrap_or_else(|| Path::new(""));
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let dir = relative_dir(from_dir, target_dir);
    let joined = if dir == Path::new(".") {
        name
    } else {
        format!("{}/{}", slash_path(&dir), name)
    };

    if joined.starts_with('.') {
        joined
    } else {
        format!("./{}", joined)
    }
}

fn normal_components(path: &Path) -> Vec<Component<'_>> {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specifier(from: &str, target: &str) -> String {
        import_specifier(Path::new(from), Path::new(target))
    }

    #[test]
    fn same_directory_gets_dot_slash() {
        assert_eq!(specifier("b.js", "a"), "./a");
        assert_eq!(specifier("events/b.js", "events/a"), "./a");
    }

    #[test]
    fn child_directory() {
        assert_eq!(specifier("block.js", "utils/dom"), "./utils/dom");
        assert_eq!(specifier("block.js", "renderers/common/info"), "./renderers/common/info");
    }

    #[test]
    fn parent_directory_is_not_prefixed() {
        assert_eq!(specifier("utils/dom.js", "block"), "../block");
        assert_eq!(specifier("renderers/zelos/info.js", "utils"), "../../utils");
    }

    #[test]
    fn sibling_directory() {
        assert_eq!(specifier("renderers/zelos/info.js", "renderers/common/info"), "../common/info");
        assert_eq!(specifier("events/events.js", "utils/xml"), "../utils/xml");
    }

    #[test]
    fn dotted_module_names_are_kept() {
        assert_eq!(specifier("a.js", "b.test"), "./b.test");
    }

    #[test]
    fn relative_dir_cases() {
        assert_eq!(relative_dir(Path::new(""), Path::new("")), PathBuf::from("."));
        assert_eq!(relative_dir(Path::new("a/b"), Path::new("a/b")), PathBuf::from("."));
        assert_eq!(relative_dir(Path::new("a/b"), Path::new("a")), PathBuf::from(".."));
        assert_eq!(relative_dir(Path::new("a"), Path::new("a/b/c")), PathBuf::from("b/c"));
        assert_eq!(
            relative_dir(Path::new("./x/y"), Path::new("z")),
            PathBuf::from("../../z")
        );
    }
}
