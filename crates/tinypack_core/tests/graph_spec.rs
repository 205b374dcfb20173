use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tinypack_core::{Compilation, Config, Entry, ModuleId};

fn setup_workspace() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn entries(pairs: &[(&str, &str)]) -> Entry {
    Entry::Named(
        pairs
            .iter()
            .map(|(name, path)| (name.to_string(), path.to_string()))
            .collect::<IndexMap<_, _>>(),
    )
}

#[test]
fn test_single_dependency() {
    let dir = setup_workspace();
    let root = dir.path();
    write(root, "src/index.js", "const a = require('./a');\nconsole.log(a);");
    write(root, "src/a.js", "module.exports = 'a';");

    let config = Config::new(root, entries(&[("main", "./src/index.js")]));
    let stats = Compilation::new(&config).build().unwrap();

    assert_eq!(stats.modules.len(), 2);
    let index = stats.modules.get(&ModuleId::from("./src/index.js")).unwrap();
    assert!(stats.modules.contains(&ModuleId::from("./src/a.js")));
    assert!(index.source.contains("require(\"./src/a.js\")"), "{}", index.source);
    assert_eq!(index.dependencies.len(), 1);
    assert_eq!(index.dependencies[0].id, "./src/a.js");
    assert_eq!(index.dependencies[0].path, root.join("src/a.js"));

    assert_eq!(stats.chunks.len(), 1);
    assert_eq!(stats.chunks[0].name, "main");
    assert_eq!(stats.chunks[0].entry_module, "./src/index.js");
}

#[test]
fn test_shared_dependency_built_once() {
    let dir = setup_workspace();
    let root = dir.path();
    write(root, "src/app.js", "require('./shared');");
    write(root, "src/admin.js", "require('./shared.js');");
    write(root, "src/shared.js", "require('./util'); module.exports = {};");
    write(root, "src/util.js", "module.exports = 1;");

    let config = Config::new(
        root,
        entries(&[("app", "./src/app.js"), ("admin", "./src/admin.js")]),
    );
    let stats = Compilation::new(&config).build().unwrap();

    assert_eq!(stats.modules.len(), 4);
    let ids: HashSet<_> = stats.modules.iter().map(|m| m.id.clone()).collect();
    assert_eq!(ids.len(), stats.modules.len(), "module ids must be unique");

    let shared = stats.modules.get(&ModuleId::from("./src/shared.js")).unwrap();
    assert_eq!(shared.names.iter().collect::<Vec<_>>(), vec!["app", "admin"]);

    // reachable transitively through the shared module
    let util = stats.modules.get(&ModuleId::from("./src/util.js")).unwrap();
    assert!(util.names.contains("admin"));

    let admin = stats.chunks.iter().find(|c| c.name == "admin").unwrap();
    assert_eq!(
        admin.modules,
        vec![
            ModuleId::from("./src/shared.js"),
            ModuleId::from("./src/util.js"),
            ModuleId::from("./src/admin.js"),
        ]
    );
    assert!(!admin.modules.contains(&ModuleId::from("./src/app.js")));
}

#[test]
fn test_entry_already_reached_from_another_entry() {
    let dir = setup_workspace();
    let root = dir.path();
    write(root, "src/app.js", "require('./widget');");
    write(root, "src/widget.js", "require('./dom');");
    write(root, "src/dom.js", "");

    let config = Config::new(
        root,
        entries(&[("app", "./src/app.js"), ("widget", "./src/widget.js")]),
    );
    let stats = Compilation::new(&config).build().unwrap();

    assert_eq!(stats.modules.len(), 3);
    let widget = stats.chunks.iter().find(|c| c.name == "widget").unwrap();
    assert_eq!(widget.entry_module, "./src/widget.js");
    assert_eq!(
        widget.modules,
        vec![ModuleId::from("./src/widget.js"), ModuleId::from("./src/dom.js")]
    );
}

#[test]
fn test_cyclic_dependency_terminates() {
    let dir = setup_workspace();
    let root = dir.path();
    write(root, "src/a.js", "const b = require('./b'); exports.a = 1;");
    write(root, "src/b.js", "const a = require('./a'); exports.b = 2;");

    let config = Config::new(root, Entry::Single("./src/a.js".into()));
    let stats = Compilation::new(&config).build().unwrap();

    assert_eq!(stats.modules.len(), 2);
    let b = stats.modules.get(&ModuleId::from("./src/b.js")).unwrap();
    assert!(b.source.contains("require(\"./src/a.js\")"));
    assert_eq!(stats.chunks[0].modules.len(), 2);
}

#[test]
fn test_every_rewritten_require_points_at_a_built_module() {
    let dir = setup_workspace();
    let root = dir.path();
    write(
        root,
        "src/index.js",
        "require('./lib/math'); require('./lib/format'); require('./lib/math.js');",
    );
    write(root, "src/lib/math.js", "module.exports = { add: (a, b) => a + b };");
    write(root, "src/lib/format.js", "const m = require('./math'); module.exports = m;");

    let config = Config::new(root, Entry::Single("./src/index.js".into()));
    let stats = Compilation::new(&config).build().unwrap();

    for module in stats.modules.iter() {
        for dep in &module.dependencies {
            assert!(stats.modules.contains(&dep.id), "{} is missing", dep.id);
            assert!(module.source.contains(&format!("require(\"{}\")", dep.id)));
        }
    }
    let index = stats.modules.get(&ModuleId::from("./src/index.js")).unwrap();
    assert_eq!(index.dependencies.len(), 3);
    assert_eq!(index.dependencies[0].id, index.dependencies[2].id);
}

#[test]
fn test_file_dependencies_are_recorded_in_order() {
    let dir = setup_workspace();
    let root = dir.path();
    write(root, "src/index.js", "require('./a'); require('./b');");
    write(root, "src/a.js", "require('./b');");
    write(root, "src/b.js", "");

    let config = Config::new(root, Entry::Single("./src/index.js".into()));
    let stats = Compilation::new(&config).build().unwrap();

    assert_eq!(
        stats.file_dependencies,
        vec![
            root.join("src/index.js"),
            root.join("src/a.js"),
            root.join("src/b.js"),
            root.join("src/b.js"),
        ]
    );
}

#[test]
fn test_depth_first_after_own_scan() {
    let dir = setup_workspace();
    let root = dir.path();
    write(root, "index.js", "require('./a'); require('./b');");
    write(root, "a.js", "require('./c');");
    write(root, "b.js", "");
    write(root, "c.js", "");

    let config = Config::new(root, Entry::Single("./index.js".into()));
    let stats = Compilation::new(&config).build().unwrap();

    let order: Vec<_> = stats.modules.iter().map(|m| m.id.to_string()).collect();
    assert_eq!(order, vec!["./index.js", "./a.js", "./c.js", "./b.js"]);
}
