//! Integration tests for the sql-seeder binary.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn get_binary_path() -> String {
    std::env::var("CARGO_BIN_EXE_sql-seeder")
        .unwrap_or_else(|_| "target/debug/sql-seeder".to_string())
}

fn create_test_schema(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("schema.sql");
    fs::write(
        &path,
        r#"
-- orders come first on purpose
CREATE TABLE orders (
  id INT PRIMARY KEY,
  customer_id INT NOT NULL,
  total DECIMAL(10,2),
  placed_on DATE,
  FOREIGN KEY (customer_id) REFERENCES customers(id)
);

CREATE TABLE customers (
  id INT PRIMARY KEY AUTO_INCREMENT,
  name VARCHAR(50) NOT NULL,
  manager_id INT,
  FOREIGN KEY (manager_id) REFERENCES customers(id)
);

CREATE INDEX idx_orders_customer ON orders (customer_id);
"#,
    )
    .unwrap();
    path
}

fn create_cyclic_schema(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("cyclic.sql");
    fs::write(
        &path,
        r#"
CREATE TABLE a (id INT PRIMARY KEY, b_id INT, FOREIGN KEY (b_id) REFERENCES b(id));
CREATE TABLE b (id INT PRIMARY KEY, a_id INT, FOREIGN KEY (a_id) REFERENCES a(id));
"#,
    )
    .unwrap();
    path
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(get_binary_path())
        .args(args)
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_order_puts_referenced_table_first() {
    let dir = TempDir::new().unwrap();
    let schema = create_test_schema(&dir);

    let output = run(&["order", schema.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let customers = stdout.find("CREATE TABLE customers").unwrap();
    let orders = stdout.find("CREATE TABLE orders").unwrap();
    assert!(customers < orders, "{stdout}");
    assert!(!stdout.contains("CREATE INDEX"));
}

#[test]
fn test_order_json_output_file() {
    let dir = TempDir::new().unwrap();
    let schema = create_test_schema(&dir);
    let out = dir.path().join("ordered.json");

    let output = run(&[
        "order",
        schema.to_str().unwrap(),
        "--json",
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let content = fs::read_to_string(&out).unwrap();
    let ordered: Vec<String> = serde_json::from_str(&content).unwrap();
    assert_eq!(ordered.len(), 2);
    assert!(ordered[0].starts_with("CREATE TABLE customers"));
    assert!(ordered[1].starts_with("CREATE TABLE orders"));
}

#[test]
fn test_order_check() {
    let dir = TempDir::new().unwrap();
    let schema = create_test_schema(&dir);

    let output = run(&["order", schema.to_str().unwrap(), "--check"]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Check PASSED"));
    assert!(stderr.contains("1. customers"));
    assert!(stderr.contains("Self-referencing tables"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_order_cycle_fails() {
    let dir = TempDir::new().unwrap();
    let schema = create_cyclic_schema(&dir);

    let output = run(&["order", schema.to_str().unwrap(), "--check"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Check FAILED"));
    assert!(stderr.contains("cyclic foreign key dependency"));
    assert!(stderr.contains("a, b"));
}

#[test]
fn test_order_accepts_list_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("list.txt");
    fs::write(
        &input,
        "```json\n[\"CREATE TABLE child (id INT, p INT REFERENCES parent(id));\", \"CREATE TABLE parent (id INT);\"]\n```",
    )
    .unwrap();

    let output = run(&["order", input.to_str().unwrap(), "--json"]);
    assert!(output.status.success());

    let ordered: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        ordered,
        vec![
            "CREATE TABLE parent (id INT)".to_string(),
            "CREATE TABLE child (id INT, p INT REFERENCES parent(id))".to_string(),
        ]
    );
}

#[test]
fn test_populate_text_output() {
    let dir = TempDir::new().unwrap();
    let schema = create_test_schema(&dir);

    let output = run(&["populate", schema.to_str().unwrap(), "--rows", "3", "--seed", "7"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let inserts: Vec<&str> = stdout.lines().filter(|l| l.starts_with("INSERT")).collect();
    assert_eq!(inserts.len(), 6);
    assert!(inserts[..3]
        .iter()
        .all(|l| l.starts_with("INSERT INTO customers (name, manager_id) VALUES (")));
    assert!(inserts[3..]
        .iter()
        .all(|l| l.starts_with("INSERT INTO orders (id, customer_id, total, placed_on) VALUES (")));
}

#[test]
fn test_populate_is_reproducible_with_seed() {
    let dir = TempDir::new().unwrap();
    let schema = create_test_schema(&dir);
    let args = ["populate", schema.to_str().unwrap(), "-r", "4", "--seed", "99"];

    let first = run(&args);
    let second = run(&args);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_populate_json_output() {
    let dir = TempDir::new().unwrap();
    let schema = create_test_schema(&dir);

    let output = run(&[
        "populate",
        schema.to_str().unwrap(),
        "--rows",
        "2",
        "--seed",
        "1",
        "--json",
    ]);
    assert!(output.status.success());

    let grouped: Vec<Vec<String>> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(grouped.len(), 2);
    assert!(grouped.iter().all(|t| t.len() == 2));
    assert!(grouped[0][0].starts_with("INSERT INTO customers"));
}

#[test]
fn test_populate_with_config() {
    let dir = TempDir::new().unwrap();
    let schema = create_test_schema(&dir);
    let config = dir.path().join("seed.yaml");
    fs::write(
        &config,
        "rows: 2\nseed: 5\ntables:\n  orders:\n    skip: true\n",
    )
    .unwrap();

    let output = run(&[
        "populate",
        schema.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("INSERT INTO customers").count(), 2);
    assert!(!stdout.contains("INSERT INTO orders"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Skipped table 'orders'"));
}

#[test]
fn test_populate_placeholder_warning() {
    let dir = TempDir::new().unwrap();
    let schema = dir.path().join("blob.sql");
    fs::write(&schema, "CREATE TABLE files (id INT PRIMARY KEY, data BLOB NOT NULL);").unwrap();

    let output = run(&[
        "populate",
        schema.to_str().unwrap(),
        "--rows",
        "2",
        "--placeholder",
        "x",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("INSERT INTO files (id, data) VALUES (1, 'x');"));
    assert!(stdout.contains("INSERT INTO files (id, data) VALUES (2, 'x');"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("files.data is NOT NULL"));
}

#[test]
fn test_populate_cycle_fails() {
    let dir = TempDir::new().unwrap();
    let schema = create_cyclic_schema(&dir);

    let output = run(&["populate", schema.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cyclic"));
}

#[test]
fn test_parse_json() {
    let dir = TempDir::new().unwrap();
    let schema = create_test_schema(&dir);

    let output = run(&["parse", schema.to_str().unwrap(), "--json"]);
    assert!(output.status.success());

    let tables: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let orders = &tables[0];
    assert_eq!(orders["name"], "orders");
    assert_eq!(orders["columns"][1]["name"], "customer_id");
    assert_eq!(orders["columns"][1]["type"], "INT");
    assert_eq!(orders["columns"][1]["not_null"], true);
    assert_eq!(orders["columns"][1]["is_foreign_key"], true);
    assert_eq!(orders["columns"][2]["size"], 10);
}

#[test]
fn test_parse_text() {
    let dir = TempDir::new().unwrap();
    let schema = create_test_schema(&dir);

    let output = run(&["parse", schema.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("customers (3 columns)"));
    assert!(stdout.contains("id INT [PK] [auto]"));
    assert!(stdout.contains("name VARCHAR(50) NOT NULL"));
}

#[test]
fn test_normalize_command() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("response.txt");
    fs::write(&input, "```json\n[\"a\", \"b\"]\n```").unwrap();

    let output = run(&["normalize", input.to_str().unwrap()]);
    assert!(output.status.success());

    let items: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(items, vec!["a", "b"]);
}

#[test]
fn test_normalize_unparsable_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("response.txt");
    fs::write(&input, "I cannot help with that").unwrap();

    let output = run(&["normalize", input.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("I cannot help with that"));
}

#[test]
fn test_missing_input_file() {
    let output = run(&["order", "/nonexistent/schema.sql"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
}

#[test]
fn test_completions() {
    let output = run(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("sql-seeder"));
}
