//! Integration tests for treegraph
//!
//! These tests drive the indexer, the exporters and the CLI binary together.

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;
use treegraph_core::{read_json, to_dot, write_json, AstNode, GraphBuilder, RelationKind};
use treegraph_indexer::{FileType, Indexer, IndexerConfig, CONFIG_FILE};

const ORDERS_RS: &str = r#"struct Order { total: u64 }

fn tax(order: &Order) -> u64 {
    order.total / 10
}

fn checkout(order: Order) -> u64 {
    tax(&order) + order.total
}
"#;

const CART_PY: &str = r#"class Cart:
    def add(self, item: str) -> None:
        pass

    def fill(self):
        self.add("apple")
"#;

const SERVER_GO: &str = r#"package main

type Server struct{}

func (s Server) start() {}

func main() {
	var s Server
	s.start()
}
"#;

fn sample_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/orders.rs"), ORDERS_RS).unwrap();
    fs::write(dir.path().join("src/cart.py"), CART_PY).unwrap();
    fs::write(dir.path().join("server.go"), SERVER_GO).unwrap();
    fs::write(dir.path().join("NOTES.md"), "not source").unwrap();
    dir
}

fn treegraph(args: &[&str], cwd: &Path) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_treegraph"))
        .args(args)
        .current_dir(cwd)
        .env_remove("TREEGRAPH_LOG")
        .output()
        .expect("Failed to execute treegraph")
}

/// Test that the CLI can be invoked
#[test]
fn test_cli_invocation() {
    let dir = TempDir::new().unwrap();
    let output = treegraph(&["--help"], dir.path());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Convert source trees into property graphs"));
    assert!(stdout.contains("convert"));
    assert!(stdout.contains("stats"));
}

/// Test that a mixed-language repository becomes one graph with calls resolved per file
#[test]
fn test_index_mixed_repository() {
    let repo = sample_repo();

    let graph = Indexer::default().index(repo.path()).unwrap();

    let roots: Vec<_> = graph
        .vertices()
        .filter(|v| v.parent_kind().is_none())
        .map(|v| v.kind().unwrap().to_string())
        .collect();
    assert_eq!(roots, vec!["source_file", "module", "source_file"]);

    let callees: Vec<_> = graph
        .edges_labeled("CALLS")
        .map(|e| graph.vertex_by_id(e.target).unwrap().str_property("name").unwrap().to_string())
        .collect();
    assert_eq!(callees, vec!["start", "add", "tax"]);

    for edge in graph.edges() {
        assert!(graph.vertex_by_id(edge.source).is_some());
        assert!(graph.vertex_by_id(edge.target).is_some());
        assert_eq!(edge.edge_type(), Some(edge.label.as_str()));
    }
}

/// Test that vertex counts match the lowered trees exactly
#[test]
fn test_vertex_per_node() {
    let mut indexer = Indexer::default();
    let tree = indexer.parse_source(FileType::Rust, ORDERS_RS, "orders.rs").unwrap();
    let root = tree.root().unwrap();

    let mut builder = GraphBuilder::new();
    builder.process(&root).unwrap();
    let graph = builder.finish();

    assert_eq!(graph.vertex_count(), tree.len());
    let structural = tree
        .keys()
        .map(|k| tree.node(k).related(RelationKind::Structural).len())
        .sum::<usize>();
    assert_eq!(graph.edges_labeled("STRUCTURAL").count(), structural);
    assert_eq!(structural, tree.len() - 1);
}

/// Test that an exported graph loads back unchanged
#[test]
fn test_export_round_trip() {
    let repo = sample_repo();
    let graph = Indexer::default().index(repo.path()).unwrap();

    let out = TempDir::new().unwrap();
    let path = out.path().join("graph.json");
    write_json(&graph, &path).unwrap();
    let loaded = read_json(&path).unwrap();

    assert_eq!(loaded.vertex_count(), graph.vertex_count());
    assert_eq!(loaded.edge_label_counts(), graph.edge_label_counts());
    assert_eq!(loaded.vertices().collect::<Vec<_>>(), graph.vertices().collect::<Vec<_>>());

    let dot = to_dot(&loaded);
    assert!(dot.starts_with("digraph"));
    assert!(dot.contains("CALLS"));
}

/// Test the convert command end to end
#[test]
fn test_cli_convert() {
    let repo = sample_repo();
    let out = TempDir::new().unwrap();
    let json = out.path().join("graph.json");

    let output = treegraph(
        &["convert", repo.path().to_str().unwrap(), "-o", json.to_str().unwrap()],
        out.path(),
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let graph = read_json(&json).unwrap();
    let expected = Indexer::default().index(repo.path()).unwrap();
    assert_eq!(graph.vertex_count(), expected.vertex_count());
    assert_eq!(graph.edge_count(), expected.edge_count());

    let output = treegraph(
        &["convert", repo.path().join("server.go").to_str().unwrap(), "--format", "dot"],
        out.path(),
    );
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("digraph"));
}

/// Test that the stats command honors the config file at the input root
#[test]
fn test_cli_stats_with_config() {
    let repo = sample_repo();
    fs::write(
        repo.path().join(CONFIG_FILE),
        "disabled-relations = [\"CALLS\"]\nexclude = [\"src/**\"]\n",
    )
    .unwrap();

    let output = treegraph(&["stats", repo.path().to_str().unwrap()], repo.path());
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    let config = IndexerConfig::discover(repo.path()).unwrap();
    let graph = Indexer::new(config).index(repo.path()).unwrap();
    assert!(stdout.contains(&format!("vertices: {}", graph.vertex_count())));
    assert!(stdout.contains("STRUCTURAL"));
    assert!(!stdout.contains("CALLS"));
}

/// Test that a strict config turns a syntax error into a failing exit status
#[test]
fn test_cli_strict_failure() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Broken.java"), "class A { void f( }\n").unwrap();
    let config = dir.path().join("strict.toml");
    fs::write(&config, "strict = true\n").unwrap();

    let output = treegraph(
        &[
            "convert",
            dir.path().to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ],
        dir.path(),
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("syntax error"));
}
