//! The optional stage: setters and convenience mutators for optional fields,
//! `build()`, and forwarding wrappers for configured zero-argument methods.

use crate::model::{FieldModel, MethodModel, TypeModel};
use crate::naming::{camel_case, singular};
use crate::spec::{BuilderSpec, OPTIONAL_DEF};
use crate::synth::stages::create_fluent_setter;
use builder_types::{Argument, Expr, MethodDecl, Stmt, TypeArgument, TypeDecl, TypeRef};
use tracing::{debug, trace, warn};

const COLLECTION_TYPES: &[&str] = &["Collection", "List", "Set"];
const MAP_TYPE: &str = "Map";

#[derive(Debug, Clone)]
pub struct OptionalStageOutput {
    pub interface: TypeDecl,
    pub builder_methods: Vec<MethodDecl>,
}

/* Collects matching abstract declarations and builder implementations */
#[derive(Default)]
struct MethodPairs {
    declarations: Vec<MethodDecl>,
    implementations: Vec<MethodDecl>,
}

impl MethodPairs {
    fn push(&mut self, (declaration, implementation): (MethodDecl, MethodDecl)) {
        trace!(method = %implementation.name, "created optional stage method");
        self.declarations.push(declaration);
        self.implementations.push(implementation);
    }
}

pub fn is_collection<F: FieldModel>(field: &F) -> bool {
    COLLECTION_TYPES.iter().any(|name| field.is_of_type(name))
}

pub fn is_map<F: FieldModel>(field: &F) -> bool {
    field.is_of_type(MAP_TYPE)
}

pub fn is_initialized_map_or_collection<F: FieldModel>(field: &F) -> bool {
    (is_collection(field) || is_map(field)) && field.is_initialized()
}

/// Builds the `$OptionalDef` interface and its builder implementations.
///
/// Initialized collections and maps get element-wise mutators when convenience
/// methods are enabled; every other optional field gets a plain fluent setter.
/// The interface always ends with `build()` followed by one wrapper per
/// forwarded method name.
pub fn create_optional_field_interface<T: TypeModel>(
    ty: &T,
    spec: &BuilderSpec<T::Field>,
) -> OptionalStageOutput {
    let mut pairs = MethodPairs::default();

    for field in &spec.optional_fields {
        let convenient = spec.generate_convenient_methods && is_initialized_map_or_collection(field);
        if convenient && is_collection(field) {
            for pair in create_collection_methods(spec, field) {
                pairs.push(pair);
            }
        } else if convenient && is_map(field) {
            for pair in create_map_methods(spec, field) {
                pairs.push(pair);
            }
        } else {
            pairs.push(create_fluent_setter(spec, field, spec.optional_def_type()));
        }
    }

    pairs.push(create_build_method(spec));

    for method_name in &spec.call_methods {
        pairs.push(create_method_call(spec, ty.methods(), method_name));
    }

    debug!(
        type_name = %spec.type_name,
        methods = pairs.declarations.len(),
        "created optional stage interface"
    );

    let interface = TypeDecl::interface(OPTIONAL_DEF)
        .make_public()
        .make_static()
        .with_type_parameters(spec.type_parameters.iter().cloned())
        .with_methods(pairs.declarations);

    OptionalStageOutput {
        interface,
        builder_methods: pairs.implementations,
    }
}

/* Names of the element-wise and bulk mutators; an empty prefix falls back to `verb` */
fn convenience_method_names(prefix: &str, verb: &str, field_name: &str) -> (String, String) {
    let prefix = if prefix.is_empty() { verb } else { prefix };
    let bulk = camel_case(prefix, field_name);
    (singular(&bulk), bulk)
}

/* A method on the optional stage delegating to `this.field.<target>(arg0, ...)` */
fn delegating_method<F>(
    spec: &BuilderSpec<F>,
    name: String,
    field_name: &str,
    target: &str,
    arguments: Vec<Argument>,
) -> (MethodDecl, MethodDecl) {
    let return_type = spec.optional_def_type();
    let call = arguments.iter().fold(
        Expr::call_on(Expr::field(field_name), target),
        |call, argument| call.with_argument(Expr::name(argument.name.clone())),
    );

    let declaration = MethodDecl::new(return_type.clone(), name.clone())
        .with_arguments(arguments.iter().cloned())
        .with_no_body();
    let implementation = MethodDecl::new(return_type, name)
        .implementing()
        .with_arguments(arguments)
        .with_statements([Stmt::Expr(call), Stmt::return_this()]);
    (declaration, implementation)
}

/// `add<Singular>(E)` and `add<Plural>(Collection<? extends E>)` for a collection field.
///
/// Without exactly one concrete type argument the element type is `Object` and the
/// bulk argument a raw `Collection`.
pub fn create_collection_methods<F: FieldModel>(
    spec: &BuilderSpec<F>,
    field: &F,
) -> Vec<(MethodDecl, MethodDecl)> {
    let type_arguments = field.type_arguments();
    let (element_type, collection_type) = match type_arguments.as_slice() {
        [element] => (
            element.clone(),
            TypeRef::new("java.util.Collection")
                .with_type_argument(TypeArgument::Extends(element.clone())),
        ),
        _ => (TypeRef::object(), TypeRef::new("java.util.Collection")),
    };

    let (add_name, add_all_name) = convenience_method_names(&spec.prefix, "add", field.name());
    vec![
        delegating_method(
            spec,
            add_name,
            field.name(),
            "add",
            vec![Argument::new(element_type, "arg0").make_final()],
        ),
        delegating_method(
            spec,
            add_all_name,
            field.name(),
            "addAll",
            vec![Argument::new(collection_type, "arg0").make_final()],
        ),
    ]
}

/// `put<Singular>(K, V)` and `put<Plural>(Map<? extends K, ? extends V>)` for a map field.
///
/// Without exactly two concrete type arguments keys and values are `Object` and the
/// bulk argument a raw `Map`.
pub fn create_map_methods<F: FieldModel>(
    spec: &BuilderSpec<F>,
    field: &F,
) -> Vec<(MethodDecl, MethodDecl)> {
    let type_arguments = field.type_arguments();
    let (key_type, value_type, map_type) = match type_arguments.as_slice() {
        [key, value] => (
            key.clone(),
            value.clone(),
            TypeRef::new("java.util.Map").with_type_arguments([
                TypeArgument::Extends(key.clone()),
                TypeArgument::Extends(value.clone()),
            ]),
        ),
        _ => (TypeRef::object(), TypeRef::object(), TypeRef::new("java.util.Map")),
    };

    let (put_name, put_all_name) = convenience_method_names(&spec.prefix, "put", field.name());
    vec![
        delegating_method(
            spec,
            put_name,
            field.name(),
            "put",
            vec![
                Argument::new(key_type, "arg0").make_final(),
                Argument::new(value_type, "arg1").make_final(),
            ],
        ),
        delegating_method(
            spec,
            put_all_name,
            field.name(),
            "putAll",
            vec![Argument::new(map_type, "arg0").make_final()],
        ),
    ]
}

/* `build()` returning `new Target<..>(this)` */
pub fn create_build_method<F>(spec: &BuilderSpec<F>) -> (MethodDecl, MethodDecl) {
    let target = spec.target_type();
    let declaration = MethodDecl::new(target.clone(), "build").with_no_body();
    let implementation = MethodDecl::new(target.clone(), "build")
        .implementing()
        .with_statement(Stmt::ret(
            Expr::new_instance(target).with_argument(Expr::This),
        ));
    (declaration, implementation)
}

/// Wrapper calling `build().<name>()`.
///
/// A declared zero-argument method of that name provides the return type and thrown
/// exceptions. Otherwise `toString` returns `String` and any other name falls back to
/// `void`, which is logged since the configuration names a method the type lacks.
pub fn create_method_call<F, M: MethodModel>(
    spec: &BuilderSpec<F>,
    methods: &[M],
    method_name: &str,
) -> (MethodDecl, MethodDecl) {
    let declared = methods
        .iter()
        .find(|method| method.name() == method_name && !method.has_arguments());

    let (return_type, thrown_exceptions) = match declared {
        Some(method) => (
            method.return_type().clone(),
            method.thrown_exceptions().to_vec(),
        ),
        None if method_name == "toString" => (TypeRef::string(), Vec::new()),
        None => {
            warn!(
                type_name = %spec.type_name,
                method = method_name,
                "no zero-argument method found for forwarded call, assuming void"
            );
            (TypeRef::void(), Vec::new())
        }
    };

    let call = Expr::call_on(Expr::call("build"), method_name);
    let statement = if return_type.is_void() {
        Stmt::Expr(call)
    } else {
        Stmt::ret(call)
    };

    let declaration = MethodDecl::new(return_type.clone(), method_name)
        .with_thrown_exceptions(thrown_exceptions.iter().cloned())
        .with_no_body();
    let implementation = MethodDecl::new(return_type, method_name)
        .implementing()
        .with_thrown_exceptions(thrown_exceptions)
        .with_statement(statement);
    (declaration, implementation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convenience_names_use_the_verb_without_prefix() {
        assert_eq!(
            convenience_method_names("", "add", "toppings"),
            ("addTopping".to_string(), "addToppings".to_string())
        );
        assert_eq!(
            convenience_method_names("with", "put", "entries"),
            ("withEntry".to_string(), "withEntries".to_string())
        );
    }
}
