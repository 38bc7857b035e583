/* Command Tests
 *
 * Run the codegen and analyze commands against YAML files in a scratch directory.
 */

use builder_gen::cmds;
use builder_gen::cmds::analyze::DeclOutputFormat;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PIZZA: &str = r#"
package: "com.example.food"
imports: ["java.util.*"]
types:
  - name: Pizza
    builder:
      call-methods: [toString]
    fields:
      - { name: size, type: String, final: true }
      - name: toppings
        type: "List<String>"
        initializer: { verbatim: "new ArrayList<String>()" }
  - name: Topping
    fields:
      - { name: name, type: String, final: true }
"#;

const CONFIG: &str = r#"
indent: 2
defaults:
  prefix: with
"#;

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("failed to write test input");
    path
}

#[test]
fn test_codegen_writes_one_file_per_type() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "pizza.yaml", PIZZA);
    let config = write_file(dir.path(), "staged-builder.yaml", CONFIG);
    let output = dir.path().join("out");

    let written = cmds::codegen::run(vec![input], Some(output.clone()), Some(config), false).unwrap();

    let package_dir = output.join("com/example/food");
    assert_eq!(
        written,
        vec![package_dir.join("Pizza.java"), package_dir.join("Topping.java")]
    );

    let pizza = fs::read_to_string(package_dir.join("Pizza.java")).unwrap();
    assert!(pizza.starts_with("package com.example.food;\n\nimport java.util.*;\n"));
    /* Config supplies the prefix and the indent width */
    assert!(pizza.contains("\n  public static $SizeDef pizza() {\n"));
    assert!(pizza.contains("    public $OptionalDef withSize(final String size);\n"));
    assert!(pizza.contains("    public $OptionalDef withTopping(final String arg0);\n"));

    /* Types without a builder request are emitted unchanged */
    let topping = fs::read_to_string(package_dir.join("Topping.java")).unwrap();
    assert!(!topping.contains("$Builder"));
    assert!(topping.contains("private final String name;"));
}

#[test]
fn test_codegen_uses_config_output_dir() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "pizza.yaml", PIZZA);
    let output = dir.path().join("from-config");
    let config = write_file(
        dir.path(),
        "config.yaml",
        &format!("output-dir: {}\n", output.display()),
    );

    let written = cmds::codegen::run(vec![input], None, Some(config), false).unwrap();
    assert_eq!(written.len(), 2);
    assert!(written.iter().all(|path| path.starts_with(&output)));
    assert!(output.join("com/example/food/Pizza.java").exists());
}

#[test]
fn test_analyze_reports_synthesized_types() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "pizza.yaml", PIZZA);
    let config = write_file(dir.path(), "config.yaml", "indent: 4\n");

    let reports =
        cmds::analyze::run(vec![input], Some(config), true, DeclOutputFormat::Yaml).unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].type_name, "Pizza");
    assert_eq!(reports[0].stage_interfaces, vec!["$SizeDef", "$OptionalDef"]);
    assert_eq!(
        reports[0].optional_methods,
        vec!["addTopping", "addToppings", "build", "toString"]
    );
}

#[test]
fn test_missing_input_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let config = write_file(dir.path(), "config.yaml", "indent: 4\n");
    let missing = dir.path().join("missing.yaml");

    let error = cmds::codegen::run(vec![missing], Some(dir.path().join("out")), Some(config), false)
        .unwrap_err();
    assert!(format!("{:#}", error).contains("Failed to read"));
}

#[test]
fn test_malformed_type_reference_is_an_error() {
    let dir = TempDir::new().unwrap();
    let config = write_file(dir.path(), "config.yaml", "indent: 4\n");
    let input = write_file(
        dir.path(),
        "broken.yaml",
        r#"
types:
  - name: Broken
    builder: {}
    fields:
      - { name: values, type: "List<String" }
"#,
    );

    let error = cmds::analyze::run(vec![input], Some(config), false, DeclOutputFormat::Json)
        .unwrap_err();
    assert!(format!("{:#}", error).contains("Failed to parse"));
}
