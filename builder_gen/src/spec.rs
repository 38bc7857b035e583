//! Builder specification assembly: which fields are required, which are optional,
//! and what every generated type is called.

use crate::model::{FieldModel, TypeModel};
use crate::naming::capitalize;
use builder_types::{AccessLevel, BuilderSettings, TypeArgument, TypeParameter, TypeRef};
use tracing::{debug, warn};

pub const OPTIONAL_DEF: &str = "$OptionalDef";
pub const BUILDER: &str = "$Builder";

/* Stage interface name for a required field: `size` -> `$SizeDef` */
pub fn required_field_def_type_name(field_name: &str) -> String {
    format!("${}Def", capitalize(field_name))
}

/// Normalized input of one synthesis invocation.
///
/// Fields are owned copies taken from the target type, so the type can be mutated
/// while the specification is still in use.
#[derive(Debug, Clone)]
pub struct BuilderSpec<F> {
    pub type_name: String,
    pub type_parameters: Vec<TypeParameter>,
    pub type_arguments: Vec<TypeArgument>,
    pub level: AccessLevel,
    pub prefix: String,
    pub call_methods: Vec<String>,
    /* Required and optional fields together, in declaration order */
    pub all_fields: Vec<F>,
    pub required_fields: Vec<F>,
    pub optional_fields: Vec<F>,
    /* One stage interface name per required field */
    pub required_field_def_type_names: Vec<String>,
    pub generate_convenient_methods: bool,
}

impl<F: FieldModel> BuilderSpec<F> {
    /// Classifies the fields of `ty`.
    ///
    /// Static fields, `$`-prefixed fields, excluded fields and initialized final fields
    /// are skipped. The remaining final fields are required, in declaration order; every
    /// other field is optional. An uninitialized final field stays required even when
    /// excluded, since only the builder constructor can assign it.
    pub fn assemble<T>(ty: &T, settings: &BuilderSettings) -> Self
    where
        T: TypeModel<Field = F>,
    {
        let mut all_fields = Vec::new();
        let mut required_fields = Vec::new();
        let mut optional_fields = Vec::new();

        for field in ty.fields() {
            if field.is_static() || field.name().starts_with('$') {
                continue;
            }
            if settings.exclude.iter().any(|excluded| excluded == field.name()) {
                if !field.is_final() || field.is_initialized() {
                    continue;
                }
                warn!(
                    type_name = ty.name(),
                    field = field.name(),
                    "uninitialized final field cannot be excluded, keeping it required"
                );
            }
            if field.is_final() {
                if field.is_initialized() {
                    continue;
                }
                required_fields.push(field.clone());
            } else {
                optional_fields.push(field.clone());
            }
            all_fields.push(field.clone());
        }

        let required_field_def_type_names = required_fields
            .iter()
            .map(|field| required_field_def_type_name(field.name()))
            .collect();

        debug!(
            type_name = ty.name(),
            required = required_fields.len(),
            optional = optional_fields.len(),
            "assembled builder specification"
        );

        Self {
            type_name: ty.name().to_string(),
            type_parameters: ty.type_parameters().to_vec(),
            type_arguments: ty.type_arguments(),
            level: settings.access,
            prefix: settings.prefix.clone(),
            call_methods: settings.call_methods.clone(),
            all_fields,
            required_fields,
            optional_fields,
            required_field_def_type_names,
            generate_convenient_methods: settings.convenient_methods,
        }
    }

    pub fn required_field_names(&self) -> Vec<String> {
        self.required_fields
            .iter()
            .map(|field| field.name().to_string())
            .collect()
    }
}

impl<F> BuilderSpec<F> {
    /* A member type name parameterized with the target's type arguments */
    pub fn parameterized(&self, name: &str) -> TypeRef {
        TypeRef::new(name).with_type_arguments(self.type_arguments.iter().cloned())
    }

    pub fn target_type(&self) -> TypeRef {
        self.parameterized(&self.type_name)
    }

    pub fn builder_type(&self) -> TypeRef {
        self.parameterized(BUILDER)
    }

    pub fn optional_def_type(&self) -> TypeRef {
        self.parameterized(OPTIONAL_DEF)
    }

    pub fn required_field_def_types(&self) -> Vec<TypeRef> {
        self.required_field_def_type_names
            .iter()
            .map(|name| self.parameterized(name))
            .collect()
    }

    /* What the factory hands out: the first stage, or the optional stage without required fields */
    pub fn entry_type(&self) -> TypeRef {
        match self.required_field_def_type_names.first() {
            Some(name) => self.parameterized(name),
            None => self.optional_def_type(),
        }
    }
}
