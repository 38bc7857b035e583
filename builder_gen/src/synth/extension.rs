//! Folding extension methods declared on the target into the builder chain.

use crate::error::{Result, SynthesisError};
use crate::model::{ExtensionAdapters, ExtensionStage, MethodModel, TypeModel};
use crate::spec::{BuilderSpec, BUILDER, OPTIONAL_DEF};
use crate::synth::transaction::{Mutation, Transaction};
use builder_types::{Argument, Expr, MethodDecl, Stmt};
use regex::Regex;
use serde_derive::Serialize;
use std::sync::LazyLock;
use tracing::{debug, trace};

static BARE_RETURN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\breturn\s*;").expect("bare return pattern is valid"));

/* Where an extension method ended up */
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct FoldedExtension {
    pub method: String,
    pub stage: ExtensionStage,
    pub destination: String,
}

/// Moves `method` from the target type into the builder if it is an extension.
///
/// A required-fields extension is declared on the first stage interface, any other
/// extension on `$OptionalDef`; both return the optional stage. The builder gets the
/// implementation: validation statements, then sanitization statements, then the
/// original body, then `return this;`. The original method is removed from the
/// target. All of this is applied as one transaction, so a failure leaves `ty`
/// unchanged. Returns `None` when the classifier rejects the method.
pub fn handle_extension<T: TypeModel>(
    ty: &mut T,
    spec: &BuilderSpec<T::Field>,
    method: &T::Method,
    adapters: &ExtensionAdapters<'_, T::Method>,
) -> Result<Option<FoldedExtension>> {
    let required_field_names = spec.required_field_names();
    let Some(stage) = adapters.classifier.classify(method, &required_field_names) else {
        trace!(method = method.name(), "not an extension");
        return Ok(None);
    };

    if ty.member_type(BUILDER).is_none() {
        return Err(SynthesisError::MissingBuilder {
            type_name: ty.name().to_string(),
        });
    }

    let destination = match (stage, spec.required_field_def_type_names.first()) {
        (ExtensionStage::RequiredFields, Some(first_stage)) => first_stage.clone(),
        _ => OPTIONAL_DEF.to_string(),
    };

    let validation = adapters.validator.validate_parameters_of(method);
    let sanitization = adapters.sanitizer.sanitize_parameters_of(method);
    let arguments = release_sanitized_arguments(method.arguments(), &sanitization);
    let return_type = spec.optional_def_type();

    let implementation = MethodDecl::new(return_type.clone(), method.name())
        .implementing()
        .with_arguments(arguments.iter().cloned())
        .with_thrown_exceptions(method.thrown_exceptions().iter().cloned())
        .with_statements(validation)
        .with_statements(sanitization)
        .with_statements(method.statements().into_iter().map(return_builder))
        .with_statement(Stmt::return_this());
    let declaration = MethodDecl::new(return_type, method.name())
        .with_arguments(arguments)
        .with_thrown_exceptions(method.thrown_exceptions().iter().cloned())
        .with_no_body();

    let mut transaction = Transaction::new();
    transaction.push(Mutation::InjectMemberMethod {
        member: BUILDER.to_string(),
        method: implementation,
    });
    transaction.push(Mutation::InjectMemberMethod {
        member: destination.clone(),
        method: declaration,
    });
    transaction.push(Mutation::RemoveMethod {
        name: method.name().to_string(),
        signature: method.signature(),
    });
    transaction.commit(ty)?;

    debug!(
        type_name = ty.name(),
        method = method.name(),
        destination = %destination,
        "folded extension into builder"
    );

    Ok(Some(FoldedExtension {
        method: method.name().to_string(),
        stage,
        destination,
    }))
}

/* Arguments reassigned by a sanitizer cannot stay final */
fn release_sanitized_arguments(arguments: Vec<Argument>, sanitization: &[Stmt]) -> Vec<Argument> {
    arguments
        .into_iter()
        .map(|mut argument| {
            let reassigned = sanitization.iter().any(|statement| {
                matches!(statement, Stmt::Assign { target: Expr::Name(name), .. } if *name == argument.name)
            });
            if reassigned {
                argument.is_final = false;
            }
            argument
        })
        .collect()
}

/* A bare `return;` inside a folded body has to keep the chain going */
fn return_builder(statement: Stmt) -> Stmt {
    match statement {
        Stmt::Return(None) => Stmt::return_this(),
        Stmt::If { condition, then } => Stmt::If {
            condition,
            then: then.into_iter().map(return_builder).collect(),
        },
        Stmt::Verbatim(source) => {
            Stmt::Verbatim(BARE_RETURN.replace_all(&source, "return this;").into_owned())
        }
        other => other,
    }
}
