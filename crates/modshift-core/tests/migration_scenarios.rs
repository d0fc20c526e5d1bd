//! Corpus-level migration scenarios.
//!
//! Each test lays out a small corpus in a temp directory, runs the full
//! index-then-rewrite pipeline, and checks the written `.ts` files.

use std::fs;
use std::path::Path;

use modshift_core::config::MigrateConfig;
use modshift_core::error::MigrateError;
use modshift_core::migrate::{build_index, run};
use tempfile::TempDir;

// ============================================================================
// Test Infrastructure
// ============================================================================

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

fn config(dir: &TempDir) -> MigrateConfig {
    MigrateConfig::default().with_root(dir.path().join("core"))
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn two_file_scenario() {
    let dir = TempDir::new().unwrap();
    let core = dir.path().join("core");
    write(
        &core,
        "a.js",
        "goog.module('pkg.A');\n\nclass Foo {}\n\nexports.Foo = Foo;\n",
    );
    write(
        &core,
        "b.js",
        "goog.module('pkg.B');\n\nconst A = goog.require('pkg.A');\n\nnew A.Foo();\n",
    );

    run(&config(&dir)).unwrap();

    let a = read(&core, "a.ts");
    assert!(!a.contains("goog.module"));
    assert!(a.contains("export {Foo};"));

    let b = read(&core, "b.ts");
    assert!(b.contains("import * as A from './a';"));
    assert!(b.contains("new A.Foo();"));
}

#[test]
fn nested_directories_resolve_relative_to_referencer() {
    let dir = TempDir::new().unwrap();
    let core = dir.path().join("core");
    write(&core, "utils.js", "goog.module('Blockly.utils');\n");
    write(&core, "utils/dom.js", "goog.module('Blockly.utils.dom');\n");
    write(
        &core,
        "renderers/common/info.js",
        "goog.module('Blockly.blockRendering.RenderInfo');\n",
    );
    write(
        &core,
        "renderers/zelos/info.js",
        "\
goog.module('Blockly.zelos.RenderInfo');

const BaseRenderInfo = goog.require('Blockly.blockRendering.RenderInfo');
const dom = goog.require('Blockly.utils.dom');
const {inherits: extend} = goog.require('Blockly.utils');
",
    );
    write(
        &core,
        "block.js",
        "goog.module('Blockly.Block');\nconst dom = goog.require('Blockly.utils.dom');\n",
    );

    run(&config(&dir)).unwrap();

    assert_eq!(
        read(&core, "renderers/zelos/info.ts"),
        concat!(
            "\n",
            "\n",
            "import * as BaseRenderInfo from '../common/info';\n",
            "import * as dom from '../../utils/dom';\n",
            "import {inherits as extend} from '../../utils';\n",
        )
    );
    assert_eq!(
        read(&core, "block.ts"),
        "\nimport * as dom from './utils/dom';\n"
    );
}

#[test]
fn forward_references_resolve() {
    // "a" sorts first but imports a namespace declared by "z".
    let dir = TempDir::new().unwrap();
    let core = dir.path().join("core");
    write(&core, "a.js", "goog.require('late.Z');\n");
    write(&core, "z.js", "goog.module('late.Z');\n");

    run(&config(&dir)).unwrap();

    assert_eq!(read(&core, "a.ts"), "import './z';\n");
}

#[test]
fn verbatim_files_are_copied_exactly() {
    let dir = TempDir::new().unwrap();
    let core = dir.path().join("core");
    let contents = "/**\n * @license\n */\r\n'use strict';\n\nfunction f() {}\n";
    write(&core, "plain.js", contents);

    run(&config(&dir)).unwrap();

    assert_eq!(read(&core, "plain.ts"), contents);
    assert_eq!(read(&core, "plain.js"), contents);
}

#[test]
fn type_only_imports() {
    let dir = TempDir::new().unwrap();
    let core = dir.path().join("core");
    write(&core, "workspace.js", "goog.module('Blockly.Workspace');\n");
    write(
        &core,
        "interfaces/i_copyable.js",
        "goog.module('Blockly.ICopyable');\n",
    );
    write(
        &core,
        "common.js",
        "\
/* eslint-disable-next-line no-unused-vars */
const Workspace = goog.requireType('Blockly.Workspace');
const {ICopyable, CopyData: Data} = goog.requireType('Blockly.ICopyable');
",
    );

    run(&config(&dir)).unwrap();

    assert_eq!(
        read(&core, "common.ts"),
        "\
/* eslint-disable-next-line no-unused-vars */
import type * as Workspace from './workspace';
import type {ICopyable, CopyData as Data} from './interfaces/i_copyable';
"
    );
}

#[test]
fn unresolved_namespace_aborts_before_writing() {
    let dir = TempDir::new().unwrap();
    let core = dir.path().join("core");
    write(&core, "a.js", "goog.module('pkg.A');\n");
    write(&core, "b.js", "const X = goog.require('pkg.Unknown');\n");

    let err = run(&config(&dir)).unwrap_err();

    match err {
        MigrateError::UnresolvedNamespace { namespace, file, line } => {
            assert_eq!(namespace, "pkg.Unknown");
            assert_eq!(file, "b.js");
            assert_eq!(line, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!core.join("a.ts").exists());
}

#[test]
fn rerun_over_outputs_is_stable() {
    let dir = TempDir::new().unwrap();
    let core = dir.path().join("core");
    write(&core, "a.js", "goog.module('pkg.A');\nexports.Foo = bar;\n");
    write(&core, "b.js", "const {Foo: F} = goog.require('pkg.A');\n");

    run(&config(&dir)).unwrap();
    let first_a = read(&core, "a.ts");
    let first_b = read(&core, "b.ts");

    // Treat the outputs as a new corpus.
    let rerun = MigrateConfig {
        source_extension: "ts".to_string(),
        target_extension: "mts".to_string(),
        ..config(&dir)
    };
    run(&rerun).unwrap();

    assert_eq!(read(&core, "a.mts"), first_a);
    assert_eq!(read(&core, "b.mts"), first_b);
    assert_eq!(first_b, "import {Foo as F} from './a';\n");
}

#[test]
fn index_reports_last_declaration_for_duplicates() {
    let dir = TempDir::new().unwrap();
    let core = dir.path().join("core");
    write(&core, "first/dup.js", "goog.module('pkg.Dup');\n");
    write(&core, "second/dup.js", "goog.module('pkg.Dup');\n");
    write(&core, "user.js", "goog.require('pkg.Dup');\n");

    let (_, index) = build_index(&config(&dir)).unwrap();
    assert_eq!(index.get("pkg.Dup"), Some(Path::new("second/dup")));

    run(&config(&dir)).unwrap();
    assert_eq!(read(&core, "user.ts"), "import './second/dup';\n");
}

#[test]
fn unwritable_output_is_a_write_failure() {
    let dir = TempDir::new().unwrap();
    let core = dir.path().join("core");
    write(&core, "a.js", "goog.module('pkg.A');\nexports.Foo = Foo;\n");
    // A directory where the output file should go.
    fs::create_dir_all(core.join("a.ts")).unwrap();

    let err = run(&config(&dir)).unwrap_err();

    match err {
        MigrateError::WriteFailed { path, .. } => assert_eq!(path, core.join("a.ts")),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        read(&core, "a.js"),
        "goog.module('pkg.A');\nexports.Foo = Foo;\n"
    );
}
