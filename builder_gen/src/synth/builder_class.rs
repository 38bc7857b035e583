//! The `$Builder` class plus the constructor and factory injected into the target.

use crate::model::FieldModel;
use crate::naming::decapitalize;
use crate::spec::{BuilderSpec, BUILDER};
use crate::synth::transaction::Mutation;
use builder_types::{
    AccessLevel, Argument, ConstructorDecl, Expr, FieldDecl, MethodDecl, Stmt, TypeDecl, TypeRef,
};
use tracing::debug;

/* `private Target(final $Builder<..> builder)` assigning every builder field in declaration order */
pub fn create_constructor<F: FieldModel>(spec: &BuilderSpec<F>) -> ConstructorDecl {
    spec.all_fields.iter().fold(
        ConstructorDecl::new(spec.type_name.clone())
            .make_private()
            .with_argument(Argument::new(spec.builder_type(), "builder").make_final()),
        |constructor, field| {
            constructor.with_statement(Stmt::assign(
                Expr::field(field.name()),
                Expr::field_of(Expr::name("builder"), field.name()),
            ))
        },
    )
}

/// Static entry point named after the type, `Pizza` gets `pizza()`.
///
/// Returns a fresh builder typed as the first stage interface, or as the optional
/// stage when there are no required fields.
pub fn create_factory_method<F>(spec: &BuilderSpec<F>) -> MethodDecl {
    MethodDecl::new(spec.entry_type(), decapitalize(&spec.type_name))
        .with_access(spec.level)
        .make_static()
        .with_type_parameters(spec.type_parameters.iter().cloned())
        .with_statement(Stmt::ret(Expr::new_instance(spec.builder_type())))
}

/// The builder class implementing `interface_types` with the given methods.
///
/// Builder fields mirror the target's builder-relevant fields. An initializer moves
/// from the target field to the builder field, so alongside the class this returns
/// the mutations clearing those initializers on the target.
pub fn create_builder<F: FieldModel>(
    spec: &BuilderSpec<F>,
    interface_types: Vec<TypeRef>,
    builder_methods: Vec<MethodDecl>,
) -> (TypeDecl, Vec<Mutation>) {
    let mut cleared = Vec::new();
    let fields: Vec<FieldDecl> = spec
        .all_fields
        .iter()
        .map(|field| {
            let mut builder_field = FieldDecl::new(field.field_type().clone(), field.name());
            builder_field.access = AccessLevel::Private;
            if let Some(initializer) = field.initializer() {
                builder_field.initializer = Some(initializer.clone());
                cleared.push(Mutation::ClearInitializer {
                    field: field.name().to_string(),
                });
            }
            builder_field
        })
        .collect();

    debug!(
        type_name = %spec.type_name,
        interfaces = interface_types.len(),
        methods = builder_methods.len(),
        moved_initializers = cleared.len(),
        "created builder class"
    );

    let builder = TypeDecl::class(BUILDER)
        .make_private()
        .make_static()
        .with_type_parameters(spec.type_parameters.iter().cloned())
        .implementing(interface_types)
        .with_fields(fields)
        .with_constructor(ConstructorDecl::new(BUILDER).make_private())
        .with_methods(builder_methods);

    (builder, cleared)
}
