//! Annotation-driven parameter validation and sanitization for folded extensions.

use crate::model::{ParameterSanitizer, ParameterValidator};
use builder_types::{Annotation, Argument, BinaryOp, Expr, MethodDecl, Stmt, TypeRef};
use tracing::warn;

const NORMALIZER_FORMS: &[&str] = &["NFC", "NFD", "NFKC", "NFKD"];
const DEFAULT_NORMALIZER_FORM: &str = "NFKC";

/* `"The validated object 'name' (argument #2) is null"` */
fn validation_message(argument: &Argument, position: usize, problem: &str) -> String {
    format!(
        "The validated object '{}' (argument #{}) is {}",
        argument.name, position, problem
    )
}

fn throw_new(exception: &str, message: String) -> Stmt {
    Stmt::Throw(Expr::new_instance(TypeRef::new(exception)).with_argument(Expr::string(message)))
}

/// `@NotNull` and `@NotEmpty` become guard clauses at the top of the folded method.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnnotationParameterValidator;

impl ParameterValidator<MethodDecl> for AnnotationParameterValidator {
    fn validate_parameters_of(&self, method: &MethodDecl) -> Vec<Stmt> {
        let mut statements = Vec::new();
        for (index, argument) in method.arguments.iter().enumerate() {
            let position = index + 1;
            let not_empty = argument.annotation("NotEmpty").is_some();
            if not_empty || argument.annotation("NotNull").is_some() {
                statements.push(Stmt::if_then(
                    Expr::binary(Expr::name(argument.name.clone()), BinaryOp::Eq, Expr::Null),
                    vec![throw_new(
                        "java.lang.NullPointerException",
                        validation_message(argument, position, "null"),
                    )],
                ));
            }
            if not_empty {
                statements.push(Stmt::if_then(
                    Expr::call_on(Expr::name(argument.name.clone()), "isEmpty"),
                    vec![throw_new(
                        "java.lang.IllegalArgumentException",
                        validation_message(argument, position, "empty"),
                    )],
                ));
            }
        }
        statements
    }
}

/// `@Normalize` and `@With("fn")` reassign the argument before the original body runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnnotationParameterSanitizer;

impl AnnotationParameterSanitizer {
    /* `NFC`, `Form.NFC` or `form = java.text.Normalizer.Form.NFC`; anything else is NFKC */
    fn normalizer_form(annotation: &Annotation) -> &'static str {
        let Some(value) = annotation.value.as_deref() else {
            return DEFAULT_NORMALIZER_FORM;
        };
        let requested = value
            .rsplit(['=', '.'])
            .next()
            .map(str::trim)
            .unwrap_or_default();
        match NORMALIZER_FORMS.iter().copied().find(|form| *form == requested) {
            Some(form) => form,
            None => {
                warn!(value, "unknown normalizer form, using {}", DEFAULT_NORMALIZER_FORM);
                DEFAULT_NORMALIZER_FORM
            }
        }
    }

    /* `"trim"` or `value = "trim"` -> `trim` */
    fn sanitizer_function(annotation: &Annotation) -> Option<String> {
        let value = annotation.value.as_deref()?;
        let value = value.rsplit('=').next().unwrap_or(value).trim();
        let function = value.trim_matches('"').trim();
        (!function.is_empty()).then(|| function.to_string())
    }
}

impl ParameterSanitizer<MethodDecl> for AnnotationParameterSanitizer {
    fn sanitize_parameters_of(&self, method: &MethodDecl) -> Vec<Stmt> {
        let mut statements = Vec::new();
        for argument in &method.arguments {
            let name = || Expr::name(argument.name.clone());
            if let Some(annotation) = argument.annotation("Normalize") {
                let form = Self::normalizer_form(annotation);
                statements.push(Stmt::assign(
                    name(),
                    Expr::call_on(Expr::name("java.text.Normalizer"), "normalize")
                        .with_argument(name())
                        .with_argument(Expr::name(format!("java.text.Normalizer.Form.{}", form))),
                ));
            }
            if let Some(annotation) = argument.annotation("With") {
                match Self::sanitizer_function(annotation) {
                    Some(function) => {
                        statements.push(Stmt::assign(name(), Expr::call(function).with_argument(name())))
                    }
                    None => warn!(argument = %argument.name, "@With without a function name, skipped"),
                }
            }
        }
        statements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method_with(arguments: Vec<Argument>) -> MethodDecl {
        MethodDecl::new(TypeRef::void(), "named").with_arguments(arguments)
    }

    #[test]
    fn not_empty_implies_not_null() {
        let method = method_with(vec![
            Argument::new(TypeRef::string(), "label"),
            Argument::new(TypeRef::string(), "name")
                .with_annotations([Annotation::new("NotEmpty")]),
        ]);
        let statements = AnnotationParameterValidator.validate_parameters_of(&method);
        assert_eq!(statements.len(), 2);

        let Stmt::If { condition, then } = &statements[0] else {
            panic!("expected a null check, got {:?}", statements[0]);
        };
        assert_eq!(
            *condition,
            Expr::binary(Expr::name("name"), BinaryOp::Eq, Expr::Null)
        );
        assert_eq!(
            then[0],
            throw_new(
                "java.lang.NullPointerException",
                "The validated object 'name' (argument #2) is null".to_string()
            )
        );

        let Stmt::If { condition, .. } = &statements[1] else {
            panic!("expected an emptiness check, got {:?}", statements[1]);
        };
        assert_eq!(*condition, Expr::call_on(Expr::name("name"), "isEmpty"));
    }

    #[test]
    fn unannotated_arguments_produce_nothing() {
        let method = method_with(vec![Argument::new(TypeRef::string(), "name")]);
        assert!(AnnotationParameterValidator.validate_parameters_of(&method).is_empty());
        assert!(AnnotationParameterSanitizer.sanitize_parameters_of(&method).is_empty());
    }

    #[test]
    fn normalize_uses_the_requested_form() {
        let method = method_with(vec![
            Argument::new(TypeRef::string(), "plain")
                .with_annotations([Annotation::new("Normalize")]),
            Argument::new(TypeRef::string(), "composed")
                .with_annotations([Annotation::new("Normalize").with_value("Form.NFC")]),
        ]);
        let statements = AnnotationParameterSanitizer.sanitize_parameters_of(&method);
        let forms: Vec<_> = statements
            .iter()
            .map(|statement| match statement {
                Stmt::Assign {
                    value: Expr::Call { arguments, .. },
                    ..
                } => arguments[1].clone(),
                other => panic!("unexpected statement {:?}", other),
            })
            .collect();
        assert_eq!(
            forms,
            vec![
                Expr::name("java.text.Normalizer.Form.NFKC"),
                Expr::name("java.text.Normalizer.Form.NFC"),
            ]
        );
    }

    #[test]
    fn with_calls_the_named_function() {
        let method = method_with(vec![Argument::new(TypeRef::string(), "name")
            .with_annotations([Annotation::new("With").with_value("\"trim\"")])]);
        assert_eq!(
            AnnotationParameterSanitizer.sanitize_parameters_of(&method),
            vec![Stmt::assign(
                Expr::name("name"),
                Expr::call("trim").with_argument(Expr::name("name"))
            )]
        );
    }
}
