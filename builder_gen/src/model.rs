//! Capability set the synthesizer works against.
//!
//! Synthesis only ever talks to a host through these traits: it reads fields and
//! methods, and mutates the target type through declare/remove/resolve operations.
//! `crate::decl` implements them for the in-memory `builder_types` declarations.

use builder_types::{
    Annotation, Argument, ConstructorDecl, Expr, MethodDecl, Stmt, TypeArgument, TypeDecl,
    TypeParameter, TypeRef,
};
use thiserror::Error;

/* Failures of the mutation capabilities */
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("type '{type_name}' already declares member type '{member}'")]
    DuplicateMemberType { type_name: String, member: String },

    #[error("type '{type_name}' already declares method {method}")]
    DuplicateMethod { type_name: String, method: String },

    #[error("type '{type_name}' already declares constructor ({signature})")]
    DuplicateConstructor { type_name: String, signature: String },

    #[error("type '{type_name}' declares no method {method}")]
    MethodNotFound { type_name: String, method: String },

    #[error("type '{type_name}' has no member type '{member}'")]
    UnknownMemberType { type_name: String, member: String },

    #[error("type '{type_name}' has no field '{field}'")]
    FieldNotFound { type_name: String, field: String },
}

/* `name(A, B)` as used in diagnostics */
pub fn describe_method(name: &str, signature: &[String]) -> String {
    format!("{}({})", name, signature.join(", "))
}

pub trait FieldModel: Clone {
    fn name(&self) -> &str;

    fn field_type(&self) -> &TypeRef;

    /* Concrete type arguments of the declared type, wildcards excluded */
    fn type_arguments(&self) -> Vec<TypeRef>;

    fn annotations(&self) -> &[Annotation];

    fn is_static(&self) -> bool;

    fn is_final(&self) -> bool;

    fn initializer(&self) -> Option<&Expr>;

    fn is_initialized(&self) -> bool {
        self.initializer().is_some()
    }

    /// Whether the declared type is `simple_name`, ignoring qualification and type arguments.
    fn is_of_type(&self, simple_name: &str) -> bool;
}

pub trait MethodModel: Clone {
    fn name(&self) -> &str;

    /* Arguments including their annotations */
    fn arguments(&self) -> Vec<Argument>;

    fn statements(&self) -> Vec<Stmt>;

    fn return_type(&self) -> &TypeRef;

    fn returns_void(&self) -> bool {
        self.return_type().is_void()
    }

    fn has_arguments(&self) -> bool;

    fn thrown_exceptions(&self) -> &[TypeRef];

    fn annotations(&self) -> &[Annotation];

    fn is_static(&self) -> bool;

    /* Erased argument types identifying this overload */
    fn signature(&self) -> Vec<String>;
}

/// A mutable type declaration owned by one synthesis invocation.
///
/// `Clone` is required so mutations can be applied to a scratch copy first and only
/// replace the original once every one of them succeeded.
pub trait TypeModel: Clone {
    type Field: FieldModel;
    type Method: MethodModel;

    fn name(&self) -> &str;

    fn type_parameters(&self) -> &[TypeParameter];

    fn type_arguments(&self) -> Vec<TypeArgument> {
        self.type_parameters()
            .iter()
            .map(TypeParameter::as_type_argument)
            .collect()
    }

    fn fields(&self) -> &[Self::Field];

    fn methods(&self) -> &[Self::Method];

    fn member_type(&self, name: &str) -> Option<&Self>;

    fn member_type_mut(&mut self, name: &str) -> Option<&mut Self>;

    fn inject_method(&mut self, method: MethodDecl) -> Result<(), ModelError>;

    fn inject_constructor(&mut self, constructor: ConstructorDecl) -> Result<(), ModelError>;

    fn inject_type(&mut self, member: TypeDecl) -> Result<(), ModelError>;

    fn remove_method(&mut self, name: &str, signature: &[String]) -> Result<(), ModelError>;

    fn clear_initializer(&mut self, field: &str) -> Result<(), ModelError>;
}

/* Which stage interface an extension method is folded into */
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde_derive::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtensionStage {
    RequiredFields,
    OptionalFields,
}

pub trait ExtensionClassifier<M: MethodModel> {
    /// `None` when `method` is not an extension. Otherwise the stage it extends, judged
    /// against the names of the builder's required fields.
    fn classify(&self, method: &M, required_field_names: &[String]) -> Option<ExtensionStage>;
}

pub trait ParameterValidator<M: MethodModel> {
    fn validate_parameters_of(&self, method: &M) -> Vec<Stmt>;
}

pub trait ParameterSanitizer<M: MethodModel> {
    fn sanitize_parameters_of(&self, method: &M) -> Vec<Stmt>;
}

/* Host-supplied collaborators used while folding extensions */
pub struct ExtensionAdapters<'a, M: MethodModel> {
    pub classifier: &'a dyn ExtensionClassifier<M>,
    pub validator: &'a dyn ParameterValidator<M>,
    pub sanitizer: &'a dyn ParameterSanitizer<M>,
}
