//! Namespace index: which file declares which namespace.
//!
//! The index is built in one pass over the whole corpus before any file is
//! rewritten, because a file may import a namespace declared by any other file.
//! Once built it is only read.
//!
//! Duplicate declarations are not an error: the file scanned last wins. Since
//! corpus files are visited in sorted path order, that is the file whose
//! corpus-relative path sorts last.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::DeclarationStyle;
use crate::corpus::{slash_path, Corpus};
use crate::error::MigrateResult;
use crate::patterns::declared_namespace;

/// Map from declared namespace to the declaring file's corpus-relative path,
/// without extension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceIndex {
    entries: BTreeMap<String, PathBuf>,
}

impl NamespaceIndex {
    /// Scan every corpus file for namespace declarations.
    ///
    /// Any unreadable file aborts the build; there is no partial index.
    pub fn build(corpus: &Corpus, style: DeclarationStyle) -> MigrateResult<Self> {
        let mut index = NamespaceIndex::default();

        for file in corpus.files() {
            let contents = file.read()?;
            for line in contents.lines() {
                if let Some(namespace) = declared_namespace(line, style) {
                    index.insert(namespace, file.module_path());
                }
            }
        }

        tracing::info!(
            "Indexed {} namespaces from {} files",
            index.len(),
            corpus.len()
        );
        Ok(index)
    }

    fn insert(&mut self, namespace: &str, path: PathBuf) {
        if let Some(previous) = self.entries.insert(namespace.to_string(), path) {
            tracing::debug!(
                "Namespace {} redeclared, replacing {}",
                namespace,
                previous.display()
            );
        }
    }

    /// Declaring module path for `namespace`.
    pub fn get(&self, namespace: &str) -> Option<&Path> {
        self.entries.get(namespace).map(PathBuf::as_path)
    }

    /// Number of distinct namespaces.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in namespace order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries
            .iter()
            .map(|(ns, path)| (ns.as_str(), path.as_path()))
    }

    /// Entries with `/`-separated paths, for output.
    pub fn to_display_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(ns, path)| (ns.to_string(), slash_path(path)))
            .collect()
    }
}

impl<S: Into<String>, P: Into<PathBuf>> FromIterator<(S, P)> for NamespaceIndex {
    /// Later pairs replace earlier ones, as in [`NamespaceIndex::build`].
    fn from_iter<I: IntoIterator<Item = (S, P)>>(iter: I) -> Self {
        NamespaceIndex {
            entries: iter
                .into_iter()
                .map(|(ns, path)| (ns.into(), path.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MigrateConfig;
    use crate::error::MigrateError;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, contents: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn build(dir: &TempDir) -> NamespaceIndex {
        let config = MigrateConfig::default().with_root(dir.path());
        let corpus = Corpus::discover(&config).unwrap();
        NamespaceIndex::build(&corpus, config.declaration).unwrap()
    }

    #[test]
    fn indexes_declarations_by_module_path() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "block.js",
            "'use strict';\n\ngoog.module('Blockly.Block');\n",
        );
        write(
            dir.path(),
            "utils/dom.js",
            "goog.module('Blockly.utils.dom');\ngoog.module.declareLegacyNamespace();\n",
        );
        write(dir.path(), "plain.js", "const x = 1;\n");

        let index = build(&dir);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("Blockly.Block"), Some(Path::new("block")));
        assert_eq!(index.get("Blockly.utils.dom"), Some(Path::new("utils/dom")));
        assert_eq!(index.get("Blockly.plain"), None);
    }

    #[test]
    fn duplicate_declaration_last_file_wins() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.js", "goog.module('dup');\n");
        write(dir.path(), "b.js", "goog.module('dup');\n");

        let index = build(&dir);
        assert_eq!(index.get("dup"), Some(Path::new("b")));
    }

    #[test]
    fn multiple_declarations_in_one_file_are_all_indexed() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.js", "goog.module('one');\ngoog.module('two');\n");

        let index = build(&dir);
        assert_eq!(index.get("one"), Some(Path::new("a")));
        assert_eq!(index.get("two"), Some(Path::new("a")));
    }

    #[test]
    fn declare_module_id_style() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.js", "goog.declareModuleId('pkg.A');\n");
        write(dir.path(), "b.js", "goog.module('pkg.B');\n");

        let config = MigrateConfig {
            declaration: DeclarationStyle::DeclareModuleId,
            ..MigrateConfig::default().with_root(dir.path())
        };
        let corpus = Corpus::discover(&config).unwrap();
        let index = NamespaceIndex::build(&corpus, config.declaration).unwrap();

        assert_eq!(index.get("pkg.A"), Some(Path::new("a")));
        assert_eq!(index.get("pkg.B"), None);
    }

    #[test]
    fn unreadable_file_aborts_build() {
        let dir = TempDir::new().unwrap();
        // Not valid UTF-8, so reading as text fails.
        fs::write(dir.path().join("bad.js"), [0xff, 0xfe, 0x00]).unwrap();

        let config = MigrateConfig::default().with_root(dir.path());
        let corpus = Corpus::discover(&config).unwrap();
        let err = NamespaceIndex::build(&corpus, config.declaration).unwrap_err();
        assert!(matches!(err, MigrateError::ReadFailed { .. }));
    }

    #[test]
    fn display_map_uses_slashes_and_sorted_keys() {
        let index: NamespaceIndex = [("b.ns", "x/b"), ("a.ns", "a")].into_iter().collect();
        let keys: Vec<_> = index.to_display_map().into_keys().collect();
        assert_eq!(keys, vec!["a.ns".to_string(), "b.ns".to_string()]);
    }
}
