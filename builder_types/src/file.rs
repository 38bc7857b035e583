use crate::decl::{AccessLevel, TypeDecl};
use serde_derive::{Deserialize, Serialize};

/* ============================================================================
   Builder Options
   ============================================================================ */

/* Options of a `@Builder` request; unset values fall back to the generator defaults */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct BuilderOptions {
    /* Access level of the static factory method */
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<AccessLevel>,
    /* Prefix for fluent method names, `with` turns `size` into `withSize` */
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /* Zero-argument methods forwarded through `build()` */
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_methods: Option<Vec<String>>,
    /* Fields left out of the builder */
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
    /* Generate add/put style methods for initialized collections and maps */
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub convenient_methods: Option<bool>,
}

/* Fully resolved builder options */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct BuilderSettings {
    #[serde(default)]
    pub access: AccessLevel,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub call_methods: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default = "default_convenient_methods")]
    pub convenient_methods: bool,
}

fn default_convenient_methods() -> bool {
    true
}

impl Default for BuilderSettings {
    fn default() -> Self {
        Self {
            access: AccessLevel::Public,
            prefix: String::new(),
            call_methods: Vec::new(),
            exclude: Vec::new(),
            convenient_methods: true,
        }
    }
}

impl BuilderOptions {
    /* Overlay these options on `defaults`; excludes from both sides are kept */
    pub fn resolve(&self, defaults: &BuilderSettings) -> BuilderSettings {
        let mut exclude = defaults.exclude.clone();
        exclude.extend(self.exclude.iter().cloned());
        BuilderSettings {
            access: self.access.unwrap_or(defaults.access),
            prefix: self.prefix.clone().unwrap_or_else(|| defaults.prefix.clone()),
            call_methods: self
                .call_methods
                .clone()
                .unwrap_or_else(|| defaults.call_methods.clone()),
            exclude,
            convenient_methods: self.convenient_methods.unwrap_or(defaults.convenient_methods),
        }
    }
}

/* ============================================================================
   Input File
   ============================================================================ */

/// One input document: a compilation unit with its package, imports and top-level types.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct BuilderFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,
    #[serde(with = "serde_yml::with::singleton_map_recursive")]
    pub types: Vec<TypeDecl>,
}

impl BuilderFile {
    pub fn from_yaml(content: &str) -> Result<Self, serde_yml::Error> {
        serde_yml::from_str(content)
    }

    /* `com.example.food` -> `com/example/food` */
    pub fn package_path(&self) -> Option<String> {
        self.package.as_ref().map(|package| package.replace('.', "/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Expr;

    #[test]
    fn options_overlay_defaults() {
        let defaults = BuilderSettings {
            prefix: "with".to_string(),
            exclude: vec!["cache".to_string()],
            ..BuilderSettings::default()
        };
        let options = BuilderOptions {
            access: Some(AccessLevel::Package),
            exclude: vec!["id".to_string()],
            convenient_methods: Some(false),
            ..BuilderOptions::default()
        };
        let settings = options.resolve(&defaults);
        assert_eq!(settings.access, AccessLevel::Package);
        assert_eq!(settings.prefix, "with");
        assert_eq!(settings.exclude, vec!["cache".to_string(), "id".to_string()]);
        assert!(!settings.convenient_methods);
    }

    #[test]
    fn parses_yaml_documents() {
        let yaml = r#"
package: "com.example.food"
types:
  - name: Pizza
    builder:
      call-methods: [toString]
    fields:
      - name: size
        type: String
        final: true
      - name: toppings
        type: "Collection<String>"
        initializer:
          verbatim: "new ArrayList<String>()"
"#;
        let file = BuilderFile::from_yaml(yaml).unwrap();
        assert_eq!(file.package_path().as_deref(), Some("com/example/food"));
        let pizza = &file.types[0];
        assert_eq!(pizza.fields.len(), 2);
        assert!(pizza.fields[0].is_final);
        assert_eq!(pizza.fields[1].ty.to_string(), "Collection<String>");
        assert_eq!(
            pizza.fields[1].initializer,
            Some(Expr::Verbatim("new ArrayList<String>()".to_string()))
        );
        let options = pizza.builder.as_ref().unwrap();
        assert_eq!(options.call_methods, Some(vec!["toString".to_string()]));
    }

    #[test]
    fn methods_without_body_are_concrete() {
        let yaml = r#"
types:
  - name: Pizza
    methods:
      - name: bake
      - name: slices
        returns: int
        body: null
"#;
        let file = BuilderFile::from_yaml(yaml).unwrap();
        let methods = &file.types[0].methods;
        assert_eq!(methods[0].body, Some(Vec::new()));
        assert!(methods[1].is_abstract());
    }
}
