//! Line shapes recognized by the migration.
//!
//! Every line of a corpus file is tested against a fixed list of patterns in
//! precedence order. The first pattern that matches decides the line's
//! [`LineShape`]; lines that match nothing are left untouched. Patterns search
//! anywhere in the line, and a match replaces the whole line.
//!
//! | Order | Shape | Example |
//! |-------|-------|---------|
//! | 1 | `Require` | `const Foo = goog.require('a.Foo');` |
//! | 2 | `RequireType` | `const Foo = goog.requireType('a.Foo');` |
//! | 3 | `DestructuredRequire` | `const {x, y: z} = goog.require('a.b');` |
//! | 4 | `DestructuredRequireType` | `const {X} = goog.requireType('a.b');` |
//! | 5 | `SideEffectRequire` | `goog.require('a.init');` |
//! | 6 | `Declaration` | `goog.module('a.Foo');` |
//! | 7 | `Export` | `exports.Foo = Foo;` |

use serde::Serialize;

use crate::config::DeclarationStyle;
use crate::error::MigrateResult;

/// Regex patterns for line matching (compiled once)
mod regexes {
    use std::sync::LazyLock;

    pub static DECLARATION: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new(r"goog\.module\('([^']+)'\);").unwrap());

    pub static DECLARE_MODULE_ID: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new(r"goog\.declareModuleId\('([^']+)'\);").unwrap());

    pub static REQUIRE: LazyLock<regex::Regex> = LazyLock::new(|| {
        regex::Regex::new(r"const ([A-Za-z_$][\w$]*) = goog\.require\('([^']+)'\);").unwrap()
    });

    pub static REQUIRE_TYPE: LazyLock<regex::Regex> = LazyLock::new(|| {
        regex::Regex::new(r"const ([A-Za-z_$][\w$]*) = goog\.requireType\('([^']+)'\);").unwrap()
    });

    pub static DESTRUCTURED_REQUIRE: LazyLock<regex::Regex> = LazyLock::new(|| {
        regex::Regex::new(r"const \{(.+)\} = goog\.require\('([^']+)'\);").unwrap()
    });

    pub static DESTRUCTURED_REQUIRE_TYPE: LazyLock<regex::Regex> = LazyLock::new(|| {
        regex::Regex::new(r"const \{(.+)\} = goog\.requireType\('([^']+)'\);").unwrap()
    });

    pub static SIDE_EFFECT_REQUIRE: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new(r"goog\.require\('([^']+)'\);").unwrap());

    pub static EXPORT: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new(r"exports\.([A-Za-z_$][\w$]*) = (.+);").unwrap());
}

// ============================================================================
// Line Shapes
// ============================================================================

/// A recognized line, with the fields captured from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineShape<'a> {
    /// `const Name = goog.require('ns');`
    Require { binding: &'a str, namespace: &'a str },
    /// `const Name = goog.requireType('ns');`
    RequireType { binding: &'a str, namespace: &'a str },
    /// `const {a, b: c} = goog.require('ns');`
    DestructuredRequire {
        bindings: &'a str,
        namespace: &'a str,
    },
    /// `const {a, b: c} = goog.requireType('ns');`
    DestructuredRequireType {
        bindings: &'a str,
        namespace: &'a str,
    },
    /// `goog.require('ns');`
    SideEffectRequire { namespace: &'a str },
    /// The namespace declaration of the file.
    Declaration { namespace: &'a str },
    /// `exports.Name = local;`
    Export { name: &'a str, local: &'a str },
}

/// Tag of a [`LineShape`], for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Require,
    RequireType,
    DestructuredRequire,
    DestructuredRequireType,
    SideEffectRequire,
    Declaration,
    Export,
}

impl<'a> LineShape<'a> {
    /// Classify a single line. Returns `None` for lines left unchanged.
    pub fn classify(line: &'a str, style: DeclarationStyle) -> Option<Self> {
        if let Some(caps) = regexes::REQUIRE.captures(line) {
            return Some(LineShape::Require {
                binding: caps.get(1)?.as_str(),
                namespace: caps.get(2)?.as_str(),
            });
        }
        if let Some(caps) = regexes::REQUIRE_TYPE.captures(line) {
            return Some(LineShape::RequireType {
                binding: caps.get(1)?.as_str(),
                namespace: caps.get(2)?.as_str(),
            });
        }
        if let Some(caps) = regexes::DESTRUCTURED_REQUIRE.captures(line) {
            return Some(LineShape::DestructuredRequire {
                bindings: caps.get(1)?.as_str(),
                namespace: caps.get(2)?.as_str(),
            });
        }
        if let Some(caps) = regexes::DESTRUCTURED_REQUIRE_TYPE.captures(line) {
            return Some(LineShape::DestructuredRequireType {
                bindings: caps.get(1)?.as_str(),
                namespace: caps.get(2)?.as_str(),
            });
        }
        if let Some(caps) = regexes::SIDE_EFFECT_REQUIRE.captures(line) {
            return Some(LineShape::SideEffectRequire {
                namespace: caps.get(1)?.as_str(),
            });
        }
        if let Some(namespace) = declared_namespace(line, style) {
            return Some(LineShape::Declaration { namespace });
        }
        if let Some(caps) = regexes::EXPORT.captures(line) {
            return Some(LineShape::Export {
                name: caps.get(1)?.as_str(),
                local: caps.get(2)?.as_str(),
            });
        }
        None
    }

    /// Tag of this shape.
    pub fn kind(&self) -> LineKind {
        match self {
            LineShape::Require { .. } => LineKind::Require,
            LineShape::RequireType { .. } => LineKind::RequireType,
            LineShape::DestructuredRequire { .. } => LineKind::DestructuredRequire,
            LineShape::DestructuredRequireType { .. } => LineKind::DestructuredRequireType,
            LineShape::SideEffectRequire { .. } => LineKind::SideEffectRequire,
            LineShape::Declaration { .. } => LineKind::Declaration,
            LineShape::Export { .. } => LineKind::Export,
        }
    }

    /// Produce the replacement line.
    ///
    /// `resolve` maps a referenced namespace to its import specifier and is
    /// only called for import shapes.
    pub fn render<F>(&self, resolve: F) -> MigrateResult<String>
    where
        F: FnOnce(&str) -> MigrateResult<String>,
    {
        let line = match *self {
            LineShape::Require { binding, namespace } => {
                format!("import * as {} from '{}';", binding, resolve(namespace)?)
            }
            LineShape::RequireType { binding, namespace } => {
                format!("import type * as {} from '{}';", binding, resolve(namespace)?)
            }
            LineShape::DestructuredRequire {
                bindings,
                namespace,
            } => format!(
                "import {{{}}} from '{}';",
                translate_aliases(bindings),
                resolve(namespace)?
            ),
            LineShape::DestructuredRequireType {
                bindings,
                namespace,
            } => format!(
                "import type {{{}}} from '{}';",
                translate_aliases(bindings),
                resolve(namespace)?
            ),
            LineShape::SideEffectRequire { namespace } => {
                format!("import '{}';", resolve(namespace)?)
            }
            LineShape::Declaration { .. } => String::new(),
            LineShape::Export { name, local } => {
                if name == local {
                    format!("export {{{}}};", name)
                } else {
                    format!("export {{ {} as {} }};", local, name)
                }
            }
        };
        Ok(line)
    }
}

/// Namespace declared by `line`, if it is a declaration in the given style.
pub fn declared_namespace(line: &str, style: DeclarationStyle) -> Option<&str> {
    let re = match style {
        DeclarationStyle::Module => &*regexes::DECLARATION,
        DeclarationStyle::DeclareModuleId => &*regexes::DECLARE_MODULE_ID,
    };
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Rewrite destructuring renames (`orig: alias`) as import renames (`orig as alias`).
pub fn translate_aliases(bindings: &str) -> String {
    bindings
        .split(',')
        .map(|part| match part.split_once(':') {
            Some((orig, alias)) => format!("{} as {}", orig.trim_end(), alias.trim_start()),
            None => part.to_string(),
        })
        .collect::<Vec<_>>()
        .join(",")
}
