//! Staged builder synthesis.
//!
//! `handle_builder` installs the constructor, the factory, the stage interfaces and
//! the builder class on a target type; `handle_extension` folds one extension
//! method into an installed builder; `synthesize` runs both for a whole type.

pub mod builder_class;
pub mod extension;
pub mod optional;
pub mod stages;
pub mod transaction;

pub use extension::{handle_extension, FoldedExtension};
pub use transaction::{Mutation, Transaction};

use crate::error::{Result, SynthesisError};
use crate::model::{ExtensionAdapters, FieldModel, TypeModel};
use crate::spec::{BuilderSpec, OPTIONAL_DEF};
use builder_types::BuilderSettings;
use serde_derive::Serialize;
use tracing::{debug, info};

/// What was generated for one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SynthesisReport {
    pub type_name: String,
    pub required_fields: Vec<String>,
    pub optional_fields: Vec<String>,
    /* Stage interfaces in chain order, `$OptionalDef` last */
    pub stage_interfaces: Vec<String>,
    pub optional_methods: Vec<String>,
    pub forwarded_methods: Vec<String>,
    pub extensions: Vec<FoldedExtension>,
}

/// Installs the staged builder on `ty`.
///
/// Every declaration is planned first and then committed as one transaction:
/// the private constructor taking the builder, the static factory, one stage
/// interface per required field, `$OptionalDef`, and `$Builder`.
pub fn handle_builder<T: TypeModel>(
    ty: &mut T,
    spec: &BuilderSpec<T::Field>,
) -> Result<SynthesisReport> {
    check_stage_names(spec)?;
    let constructor = builder_class::create_constructor(spec);
    let factory = builder_class::create_factory_method(spec);
    let required = stages::create_required_field_interfaces(spec);
    let optional_stage = optional::create_optional_field_interface(ty, spec);

    let mut interface_types = spec.required_field_def_types();
    interface_types.push(spec.optional_def_type());

    let mut builder_methods = required.builder_methods;
    builder_methods.extend(optional_stage.builder_methods);
    let (builder, cleared_initializers) =
        builder_class::create_builder(spec, interface_types, builder_methods);

    let mut stage_interfaces: Vec<String> = required
        .interfaces
        .iter()
        .map(|interface| interface.name.clone())
        .collect();
    stage_interfaces.push(optional_stage.interface.name.clone());
    let optional_methods = optional_stage
        .interface
        .methods
        .iter()
        .map(|method| method.name.clone())
        .collect();

    let mut transaction = Transaction::new();
    transaction.push(Mutation::InjectConstructor(constructor));
    transaction.push(Mutation::InjectMethod(factory));
    transaction.extend(required.interfaces.into_iter().map(Mutation::InjectType));
    transaction.push(Mutation::InjectType(optional_stage.interface));
    transaction.push(Mutation::InjectType(builder));
    transaction.extend(cleared_initializers);
    transaction.commit(ty)?;

    debug!(type_name = ty.name(), stages = stage_interfaces.len(), "installed builder");

    Ok(SynthesisReport {
        type_name: spec.type_name.clone(),
        required_fields: spec.required_field_names(),
        optional_fields: spec
            .optional_fields
            .iter()
            .map(|field| field.name().to_string())
            .collect(),
        stage_interfaces,
        optional_methods,
        forwarded_methods: spec.call_methods.clone(),
        extensions: Vec::new(),
    })
}

/* A required field named `optional` would clash with the optional stage */
fn check_stage_names<F: FieldModel>(spec: &BuilderSpec<F>) -> Result<()> {
    let reserved = spec
        .required_fields
        .iter()
        .zip(&spec.required_field_def_type_names)
        .find(|(_, stage)| stage.as_str() == OPTIONAL_DEF);
    match reserved {
        Some((field, stage)) => Err(SynthesisError::ReservedStageName {
            type_name: spec.type_name.clone(),
            field: field.name().to_string(),
            stage: stage.clone(),
        }),
        None => Ok(()),
    }
}

/// Installs the builder on `ty` and folds every extension method declared on it.
///
/// Works on a copy of the type, so when any step fails `ty` keeps its original
/// declarations.
pub fn synthesize<T: TypeModel>(
    ty: &mut T,
    settings: &BuilderSettings,
    adapters: &ExtensionAdapters<'_, T::Method>,
) -> Result<SynthesisReport> {
    let mut scratch = ty.clone();
    let spec = BuilderSpec::assemble(&scratch, settings);
    let candidates = scratch.methods().to_vec();

    let mut report = handle_builder(&mut scratch, &spec)?;
    for method in &candidates {
        if let Some(folded) = handle_extension(&mut scratch, &spec, method, adapters)? {
            report.extensions.push(folded);
        }
    }

    *ty = scratch;
    info!(
        type_name = %report.type_name,
        required = report.required_fields.len(),
        optional = report.optional_fields.len(),
        extensions = report.extensions.len(),
        "synthesized staged builder"
    );
    Ok(report)
}
