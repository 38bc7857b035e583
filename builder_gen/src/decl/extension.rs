use crate::model::{ExtensionClassifier, ExtensionStage};
use builder_types::{Argument, Expr, MethodDecl, Stmt};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

const EXTENSION_ANNOTATION: &str = "Extension";

/* `this.name = ...` or `name = ...` at the start of a verbatim statement */
static FIELD_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(this\s*\.\s*)?([A-Za-z_$][A-Za-z0-9_$]*)\s*=[^=]")
        .expect("field assignment pattern is valid")
});

/// Classifies methods annotated with `@Builder.Extension` (or a bare `@Extension`).
///
/// Only non-static, `void` methods qualify. A method whose top-level statements assign
/// every required field extends the required stage; assignments under an `if` may not
/// run, so they do not count. Every other extension extends the optional stage.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnnotationExtensionClassifier;

impl AnnotationExtensionClassifier {
    /* Field names assigned unconditionally by top-level statements, arguments shadowing fields excluded */
    fn assigned_fields(&self, statements: &[Stmt], arguments: &[Argument], assigned: &mut HashSet<String>) {
        let is_argument = |name: &str| arguments.iter().any(|argument| argument.name == name);
        for statement in statements {
            match statement {
                Stmt::Assign { target, .. } => match target {
                    Expr::Field { receiver: None, name } => {
                        assigned.insert(name.clone());
                    }
                    Expr::Field { receiver: Some(receiver), name } if **receiver == Expr::This => {
                        assigned.insert(name.clone());
                    }
                    Expr::Name(name) if !is_argument(name) => {
                        assigned.insert(name.clone());
                    }
                    _ => {}
                },
                Stmt::Verbatim(source) => {
                    if let Some(captures) = FIELD_ASSIGNMENT.captures(source) {
                        let name = &captures[2];
                        let qualified = captures.get(1).is_some();
                        if qualified || !is_argument(name) {
                            assigned.insert(name.to_string());
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

impl ExtensionClassifier<MethodDecl> for AnnotationExtensionClassifier {
    fn classify(&self, method: &MethodDecl, required_field_names: &[String]) -> Option<ExtensionStage> {
        let annotated = method
            .annotations
            .iter()
            .any(|annotation| annotation.is(EXTENSION_ANNOTATION));
        if !annotated || method.is_static || !method.return_type.is_void() {
            return None;
        }

        let mut assigned = HashSet::new();
        if let Some(body) = &method.body {
            self.assigned_fields(body, &method.arguments, &mut assigned);
        }

        let assigns_all_required = !required_field_names.is_empty()
            && required_field_names.iter().all(|name| assigned.contains(name));
        Some(if assigns_all_required {
            ExtensionStage::RequiredFields
        } else {
            ExtensionStage::OptionalFields
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use builder_types::{Annotation, TypeRef};

    fn extension(name: &str) -> MethodDecl {
        let mut method = MethodDecl::new(TypeRef::void(), name).make_public();
        method.annotations.push(Annotation::new("Builder.Extension"));
        method
    }

    fn required() -> Vec<String> {
        vec!["size".to_string(), "crustType".to_string()]
    }

    #[test]
    fn ignores_unannotated_static_and_non_void_methods() {
        let classifier = AnnotationExtensionClassifier;
        let plain = MethodDecl::new(TypeRef::void(), "bake");
        assert_eq!(classifier.classify(&plain, &required()), None);

        let mut fixed = extension("standard").make_static();
        assert_eq!(classifier.classify(&fixed, &required()), None);

        fixed = extension("standard");
        fixed.return_type = TypeRef::string();
        assert_eq!(classifier.classify(&fixed, &required()), None);
    }

    #[test]
    fn assigning_every_required_field_extends_the_required_stage() {
        let classifier = AnnotationExtensionClassifier;
        let method = extension("standard").with_statements([
            Stmt::assign(Expr::field("size"), Expr::string("large")),
            Stmt::Verbatim("this.crustType = \"thin\";".to_string()),
        ]);
        assert_eq!(
            classifier.classify(&method, &required()),
            Some(ExtensionStage::RequiredFields)
        );
    }

    #[test]
    fn partial_assignments_extend_the_optional_stage() {
        let classifier = AnnotationExtensionClassifier;
        let method = extension("large")
            .with_statement(Stmt::assign(Expr::field("size"), Expr::string("large")));
        assert_eq!(
            classifier.classify(&method, &required()),
            Some(ExtensionStage::OptionalFields)
        );
        assert_eq!(
            classifier.classify(&method, &[]),
            Some(ExtensionStage::OptionalFields)
        );
    }

    #[test]
    fn argument_assignments_and_comparisons_do_not_count() {
        let classifier = AnnotationExtensionClassifier;
        let method = extension("sized")
            .with_argument(Argument::new(TypeRef::string(), "size"))
            .with_statements([
                Stmt::assign(Expr::name("size"), Expr::call_on(Expr::name("size"), "trim")),
                Stmt::Verbatim("crustType == null;".to_string()),
            ]);
        assert_eq!(
            classifier.classify(&method, &required()),
            Some(ExtensionStage::OptionalFields)
        );
    }

    #[test]
    fn conditional_assignments_do_not_satisfy_required_fields() {
        let classifier = AnnotationExtensionClassifier;
        let method = extension("maybe")
            .with_argument(Argument::new(TypeRef::new("boolean"), "flag"))
            .with_statement(Stmt::if_then(
                Expr::name("flag"),
                vec![
                    Stmt::assign(Expr::field("size"), Expr::string("L")),
                    Stmt::Verbatim("this.crustType = \"thin\";".to_string()),
                ],
            ));
        assert_eq!(
            classifier.classify(&method, &required()),
            Some(ExtensionStage::OptionalFields)
        );

        let mixed = extension("standard").with_statements([
            Stmt::Verbatim("size = \"large\";".to_string()),
            Stmt::if_then(
                Expr::Verbatim("true".to_string()),
                vec![Stmt::assign(
                    Expr::field_of(Expr::This, "crustType"),
                    Expr::string("thin"),
                )],
            ),
        ]);
        assert_eq!(
            classifier.classify(&mixed, &required()),
            Some(ExtensionStage::OptionalFields)
        );
    }
}
