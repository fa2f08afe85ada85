//! Unit tests for treegraph-indexer

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use treegraph_core::{PropertyGraph, Vertex};

use crate::*;

const SHOP_JAVA: &str = r#"class Shop {
    Map<String, Item> items;

    void helper() {}

    void run() {
        helper();
    }
}
"#;

const GREET_PY: &str = "def f():\n    pass\n";

fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn only<'g>(graph: &'g PropertyGraph, kind: &str) -> &'g Vertex {
    let matches: Vec<_> = graph.vertices_where("type", kind).collect();
    assert_eq!(matches.len(), 1, "expected exactly one {} vertex", kind);
    matches[0]
}

#[test]
fn test_small_python_file() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "greet.py", GREET_PY.as_bytes());

    let graph = Indexer::default().build_graph(&[path]).unwrap();

    let vertices = graph.vertices().map(|v| v.to_string()).collect::<Vec<_>>().join("\n");
    insta::assert_snapshot!(vertices, @r"
    1 module
    2 function_definition
    3 identifier
    4 parameters
    5 block
    6 pass_statement
    ");

    let counts = graph
        .edge_label_counts()
        .into_iter()
        .map(|(label, count)| format!("{} {}", label, count))
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(counts, @r"
    DECLARES 1
    STRUCTURAL 5
    ");
}

#[test]
fn test_java_semantic_edges() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "Shop.java", SHOP_JAVA.as_bytes());

    let graph = Indexer::default().build_graph(&[path]).unwrap();

    let field = only(&graph, "field_declaration");
    assert_eq!(field.reference(), Some("Map,String,Item"));
    assert!(graph.edges_labeled("TYPE").next().is_none());

    let call = only(&graph, "method_invocation");
    let calls: Vec<_> = graph.edges_labeled("CALLS").collect();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].source, call.id);
    let target = graph.vertex_by_id(calls[0].target).unwrap();
    assert_eq!(target.kind(), Some("method_declaration"));
    assert_eq!(target.str_property("name"), Some("helper"));
    assert_eq!(calls[0].edge_type(), Some("CALLS"));

    let class = only(&graph, "class_declaration");
    assert_eq!(class.str_property("name"), Some("Shop"));
    assert_eq!(class.parent_kind(), Some("program"));
    assert_eq!(class.str_property("line"), Some("1"));
    assert_eq!(graph.edges_from(class.id).iter().filter(|e| e.label == "DECLARES").count(), 3);
}

#[test]
fn test_files_share_one_id_space() {
    let dir = TempDir::new().unwrap();
    let java = write(dir.path(), "Shop.java", SHOP_JAVA.as_bytes());
    let python = write(dir.path(), "greet.py", GREET_PY.as_bytes());

    let mut indexer = Indexer::default();
    let single = indexer.build_graph(std::slice::from_ref(&java)).unwrap();
    let both = indexer.build_graph(&[java.clone(), python.clone()]).unwrap();

    assert_eq!(both.vertex_count(), single.vertex_count() + 6);
    let ids: Vec<u64> = both.vertices().map(|v| v.id.0).collect();
    assert_eq!(ids, (1..=both.vertex_count() as u64).collect::<Vec<_>>());

    let roots: Vec<_> = both
        .vertices()
        .filter(|v| v.parent_kind().is_none())
        .map(|v| v.str_property("file").unwrap().to_string())
        .collect();
    assert_eq!(roots, vec![java.display().to_string(), python.display().to_string()]);
}

#[test]
fn test_spans_disabled() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "greet.py", GREET_PY.as_bytes());
    let config = IndexerConfig {
        spans: false,
        ..IndexerConfig::default()
    };

    let graph = Indexer::new(config).build_graph(&[path]).unwrap();
    assert!(graph.vertices().all(|v| v.property("line").is_none()));
    assert_eq!(only(&graph, "function_definition").str_property("name"), Some("f"));
}

#[test]
fn test_unsupported_file() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "notes.txt", b"hello");

    let err = Indexer::default().build_graph(&[path]).unwrap_err();
    assert!(matches!(err, IndexError::UnsupportedLanguage(_)));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = Indexer::default()
        .build_graph(&[dir.path().join("Gone.java")])
        .unwrap_err();
    assert!(matches!(err, IndexError::Io { .. }));
}

#[test]
fn test_invalid_utf8() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "bad.py", &[0x78, 0x20, 0x3d, 0x20, 0xff, 0xfe]);

    let err = Indexer::default().build_graph(&[path]).unwrap_err();
    assert!(matches!(err, IndexError::Encoding(_)));
}

#[test]
fn test_strict_mode_aborts_build() {
    let dir = TempDir::new().unwrap();
    let good = write(dir.path(), "greet.py", GREET_PY.as_bytes());
    let bad = write(dir.path(), "Broken.java", b"class A {\n  void f( }\n");
    let config = IndexerConfig {
        strict: true,
        ..IndexerConfig::default()
    };

    let err = Indexer::new(config).build_graph(&[good.clone(), bad.clone()]).unwrap_err();
    match err {
        IndexError::Syntax { path, .. } => assert_eq!(path, bad.display().to_string()),
        other => panic!("unexpected error: {other}"),
    }

    // lenient mode converts the recovered tree
    let graph = Indexer::default().build_graph(&[good, bad]).unwrap();
    assert!(graph.vertex_count() > 6);
}

#[test]
fn test_index_directory() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    write(&dir.path().join("src"), "greet.py", GREET_PY.as_bytes());
    write(dir.path(), "README.md", b"# readme");
    write(dir.path(), CONFIG_FILE, b"disabled-relations = [\"DECLARES\"]\n");

    let config = IndexerConfig::discover(dir.path()).unwrap();
    let graph = Indexer::new(config).index(dir.path()).unwrap();

    assert_eq!(graph.vertex_count(), 6);
    assert_eq!(graph.edge_label_counts(), vec![("STRUCTURAL".to_string(), 5)]);
}

#[test]
fn test_qualified_field_type_reference() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "Repo.java", b"class Repo { java.util.List<Item> xs; }\n");

    let graph = Indexer::default().build_graph(&[path]).unwrap();
    assert_eq!(only(&graph, "field_declaration").reference(), Some("List,Item"));
}

#[test]
fn test_deeply_nested_expression() {
    let dir = TempDir::new().unwrap();
    let terms = vec!["1"; 20_000].join(" + ");
    let source = format!("class A {{ int x = {}; }}\n", terms);
    let path = write(dir.path(), "A.java", source.as_bytes());

    let graph = Indexer::default().build_graph(&[path]).unwrap();
    assert!(graph.vertex_count() > 40_000);
    assert_eq!(graph.edges_labeled("STRUCTURAL").count(), graph.vertex_count() - 1);
}
