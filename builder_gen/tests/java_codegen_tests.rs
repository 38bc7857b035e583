/* Java Code Generation Tests
 *
 * These tests verify the Java source emitted for synthesized builders.
 */

use builder_gen::codegen::{JavaCodeGenerator, JavaCodeGeneratorOptions};
use builder_gen::decl::DeclAdapters;
use builder_gen::synthesize;
use builder_types::{BuilderFile, BuilderSettings};

/* Helper to synthesize every type of a YAML document and emit the first one */
fn emit_first_type(yaml: &str) -> String {
    let mut file = BuilderFile::from_yaml(yaml).expect("test YAML should parse");
    let adapters = DeclAdapters::default();
    for decl in &mut file.types {
        let settings = decl
            .builder
            .clone()
            .unwrap_or_default()
            .resolve(&BuilderSettings::default());
        synthesize(decl, &settings, &adapters.extension_adapters()).expect("synthesis should succeed");
    }
    let generator = JavaCodeGenerator::new(JavaCodeGeneratorOptions::default());
    generator.emit_file(file.package.as_deref(), &file.imports, &file.types[0])
}

fn assert_contains(source: &str, expected: &str) {
    assert!(
        source.contains(expected),
        "expected generated source to contain:\n{}\n\ngenerated:\n{}",
        expected,
        source
    );
}

const PIZZA: &str = r#"
package: "com.example.food"
imports: ["java.util.ArrayList", "java.util.Collection"]
types:
  - name: Pizza
    builder:
      call-methods: [toString]
    fields:
      - { name: size, type: String, final: true }
      - { name: crustType, type: String, final: true }
      - name: toppings
        type: "Collection<String>"
        initializer: { verbatim: "new ArrayList<String>()" }
      - { name: extraCheese, type: boolean }
"#;

#[test]
fn test_pizza_file_header() {
    let source = emit_first_type(PIZZA);
    assert!(source.starts_with(
        "package com.example.food;\n\nimport java.util.ArrayList;\nimport java.util.Collection;\n\npublic class Pizza {\n"
    ));
    assert!(source.ends_with("}\n"));
}

#[test]
fn test_pizza_target_members() {
    let source = emit_first_type(PIZZA);
    assert_contains(&source, "    private final String size;\n");
    assert_contains(&source, "    private Collection<String> toppings;\n");
    assert_contains(
        &source,
        "    private Pizza(final $Builder builder) {\n        this.size = builder.size;\n        this.crustType = builder.crustType;\n        this.toppings = builder.toppings;\n        this.extraCheese = builder.extraCheese;\n    }\n",
    );
    assert_contains(
        &source,
        "    public static $SizeDef pizza() {\n        return new $Builder();\n    }\n",
    );
}

#[test]
fn test_pizza_stage_interfaces() {
    let source = emit_first_type(PIZZA);
    assert_contains(
        &source,
        "    public static interface $SizeDef {\n        public $CrustTypeDef size(final String size);\n    }\n",
    );
    assert_contains(
        &source,
        "        public $OptionalDef crustType(final String crustType);\n",
    );
    assert_contains(&source, "        public $OptionalDef addTopping(final String arg0);\n");
    assert_contains(
        &source,
        "        public $OptionalDef addToppings(final java.util.Collection<? extends String> arg0);\n",
    );
    assert_contains(&source, "        public Pizza build();\n");
    assert_contains(&source, "        public String toString();\n");
}

#[test]
fn test_pizza_builder_class() {
    let source = emit_first_type(PIZZA);
    assert_contains(
        &source,
        "    private static class $Builder implements $SizeDef, $CrustTypeDef, $OptionalDef {\n",
    );
    assert_contains(
        &source,
        "        private Collection<String> toppings = new ArrayList<String>();\n",
    );
    assert_contains(&source, "        private $Builder() {\n        }\n");
    assert_contains(
        &source,
        "        @Override\n        public $OptionalDef addToppings(final java.util.Collection<? extends String> arg0) {\n            this.toppings.addAll(arg0);\n            return this;\n        }\n",
    );
    assert_contains(
        &source,
        "        @Override\n        public Pizza build() {\n            return new Pizza(this);\n        }\n",
    );
    assert_contains(
        &source,
        "        @Override\n        public String toString() {\n            return build().toString();\n        }\n",
    );
}

#[test]
fn test_generic_builder_source() {
    let source = emit_first_type(
        r#"
types:
  - name: Box
    type-parameters: [{ name: T }]
    builder:
      access: package
    fields:
      - { name: value, type: T, final: true }
"#,
    );
    assert_contains(&source, "    static <T> $ValueDef<T> box() {\n        return new $Builder<T>();\n");
    assert_contains(&source, "    public static interface $ValueDef<T> {\n");
    assert_contains(
        &source,
        "    private static class $Builder<T> implements $ValueDef<T>, $OptionalDef<T> {\n",
    );
    assert_contains(&source, "    private Box(final $Builder<T> builder) {\n");
    assert_contains(&source, "            return new Box<T>(this);\n");
}

#[test]
fn test_folded_extension_source() {
    let source = emit_first_type(
        r#"
types:
  - name: Pizza
    builder: {}
    fields:
      - { name: cheese, type: String }
    methods:
      - name: cheesy
        annotations: [{ name: Builder.Extension }]
        arguments:
          - name: kind
            type: String
            annotations: [{ name: NotEmpty }]
        body: [{ verbatim: "this.cheese = kind;" }]
"#,
    );
    assert_contains(&source, "        public $OptionalDef cheesy(@NotEmpty String kind);\n");
    assert_contains(
        &source,
        "            if (kind == null) {\n                throw new java.lang.NullPointerException(\"The validated object 'kind' (argument #1) is null\");\n            }\n",
    );
    assert_contains(&source, "            if (kind.isEmpty()) {\n");
    assert_contains(&source, "            this.cheese = kind;\n            return this;\n");
}

#[test]
fn test_input_methods_without_body_stay_concrete() {
    let source = emit_first_type(
        r#"
types:
  - name: Pizza
    builder: {}
    fields:
      - { name: size, type: String, final: true }
    methods:
      - name: bake
      - name: slices
        returns: int
        body: [{ verbatim: "return 8;" }]
"#,
    );
    assert_contains(&source, "    public void bake() {\n    }\n");
    assert_contains(&source, "    public int slices() {\n        return 8;\n    }\n");
    assert!(!source.contains("bake();"));
}

#[test]
fn test_folded_verbatim_guard_returns_the_builder() {
    let source = emit_first_type(
        r#"
types:
  - name: Pizza
    builder: {}
    fields:
      - { name: size, type: String }
    methods:
      - name: large
        annotations: [{ name: Extension }]
        arguments: [{ name: x, type: String }]
        body:
          - verbatim: "if (x == null) return;"
          - verbatim: "this.size = x;"
"#,
    );
    assert_contains(
        &source,
        "            if (x == null) return this;\n            this.size = x;\n            return this;\n",
    );
    assert!(!source.contains("return;"));
}
