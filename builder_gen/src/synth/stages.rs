//! Stage interfaces for required fields.

use crate::model::FieldModel;
use crate::naming::camel_case;
use crate::spec::BuilderSpec;
use builder_types::{Argument, Expr, MethodDecl, Stmt, TypeDecl, TypeRef};
use tracing::{debug, trace};

/* Interface declarations plus the builder methods implementing them */
#[derive(Debug, Default, Clone)]
pub struct StageOutput {
    pub interfaces: Vec<TypeDecl>,
    pub builder_methods: Vec<MethodDecl>,
}

/// One interface per required field, chained in declaration order.
///
/// The interface for field `i` declares a single fluent method returning the
/// interface of field `i + 1`; the last one returns the optional stage. Without
/// required fields nothing is produced.
pub fn create_required_field_interfaces<F: FieldModel>(spec: &BuilderSpec<F>) -> StageOutput {
    let mut output = StageOutput::default();
    let stage_types = spec.required_field_def_types();

    for (index, (field, stage_name)) in spec
        .required_fields
        .iter()
        .zip(&spec.required_field_def_type_names)
        .enumerate()
    {
        let next_stage = stage_types
            .get(index + 1)
            .cloned()
            .unwrap_or_else(|| spec.optional_def_type());

        let (declaration, implementation) = create_fluent_setter(spec, field, next_stage);
        let interface = TypeDecl::interface(stage_name.clone())
            .make_public()
            .make_static()
            .with_type_parameters(spec.type_parameters.iter().cloned())
            .with_methods([declaration]);

        debug!(
            type_name = %spec.type_name,
            interface = %stage_name,
            field = field.name(),
            "created stage interface"
        );
        output.interfaces.push(interface);
        output.builder_methods.push(implementation);
    }
    output
}

/// Abstract declaration and builder implementation of `name(final T name)`.
///
/// The implementation assigns the builder field and returns the builder as
/// `return_type`.
pub fn create_fluent_setter<F: FieldModel>(
    spec: &BuilderSpec<F>,
    field: &F,
    return_type: TypeRef,
) -> (MethodDecl, MethodDecl) {
    let method_name = camel_case(&spec.prefix, field.name());
    let argument = Argument::new(field.field_type().clone(), field.name())
        .make_final()
        .with_annotations(field.annotations().iter().cloned());

    let declaration = MethodDecl::new(return_type.clone(), method_name.clone())
        .with_argument(argument.clone())
        .with_no_body();
    let implementation = MethodDecl::new(return_type, method_name)
        .implementing()
        .with_argument(argument)
        .with_statements([
            Stmt::assign(Expr::field(field.name()), Expr::name(field.name())),
            Stmt::return_this(),
        ]);

    trace!(field = field.name(), method = %implementation.name, "created fluent setter");
    (declaration, implementation)
}
