use crate::expr::{Expr, Stmt};
use crate::file::BuilderOptions;
use crate::types::{TypeArgument, TypeRef};
use serde_derive::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AccessLevel {
    #[default]
    Public,
    Protected,
    /* Package-private, no keyword */
    Package,
    Private,
}

impl AccessLevel {
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            AccessLevel::Public => Some("public"),
            AccessLevel::Protected => Some("protected"),
            AccessLevel::Package => None,
            AccessLevel::Private => Some("private"),
        }
    }
}

fn private_access() -> AccessLevel {
    AccessLevel::Private
}

fn void_type() -> TypeRef {
    TypeRef::void()
}

fn empty_body() -> Option<Vec<Stmt>> {
    Some(Vec::new())
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Annotation {
    pub name: String,
    /* Raw annotation arguments, e.g. `"trim"` or `form = NFC` */
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Annotation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Matches `name` either exactly or as the trailing part of a qualified annotation name,
    /// so `Builder.Extension` and `lombok.Builder.Extension` both match `"Builder.Extension"`.
    pub fn is(&self, name: &str) -> bool {
        self.name == name
            || self
                .name
                .strip_suffix(name)
                .is_some_and(|prefix| prefix.ends_with('.'))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct TypeParameter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bounds: Vec<TypeRef>,
}

impl TypeParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    /* The parameter used as an argument: `T extends Comparable<T>` -> `T` */
    pub fn as_type_argument(&self) -> TypeArgument {
        TypeArgument::Type(TypeRef::new(self.name.clone()))
    }
}

impl fmt::Display for TypeParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for (i, bound) in self.bounds.iter().enumerate() {
            f.write_str(if i == 0 { " extends " } else { " & " })?;
            write!(f, "{}", bound)?;
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Argument {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    #[serde(default, rename = "final")]
    pub is_final: bool,
}

impl Argument {
    pub fn new(ty: TypeRef, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty,
            annotations: Vec::new(),
            is_final: false,
        }
    }

    pub fn make_final(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn with_annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.annotations.extend(annotations);
        self
    }

    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|annotation| annotation.is(name))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default = "private_access")]
    pub access: AccessLevel,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, rename = "final")]
    pub is_final: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<Expr>,
}

impl FieldDecl {
    /* A private, non-final, uninitialized field */
    pub fn new(ty: TypeRef, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty,
            access: AccessLevel::Private,
            is_static: false,
            is_final: false,
            annotations: Vec::new(),
            initializer: None,
        }
    }

    pub fn make_final(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn with_initializer(mut self, initializer: Option<Expr>) -> Self {
        self.initializer = initializer;
        self
    }

    pub fn with_annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.annotations.extend(annotations);
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub access: AccessLevel,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default = "void_type", rename = "returns")]
    pub return_type: TypeRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<Argument>,
    #[serde(default, rename = "throws", skip_serializing_if = "Vec::is_empty")]
    pub thrown_exceptions: Vec<TypeRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    /* Rendered with `@Override` */
    #[serde(default)]
    pub implementing: bool,
    /* `None` for abstract declarations, written `body: null` in input files */
    #[serde(default = "empty_body")]
    pub body: Option<Vec<Stmt>>,
}

impl MethodDecl {
    /* A public method with an empty body */
    pub fn new(return_type: TypeRef, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            access: AccessLevel::Public,
            is_static: false,
            type_parameters: Vec::new(),
            return_type,
            arguments: Vec::new(),
            thrown_exceptions: Vec::new(),
            annotations: Vec::new(),
            implementing: false,
            body: Some(Vec::new()),
        }
    }

    pub fn make_public(self) -> Self {
        self.with_access(AccessLevel::Public)
    }

    pub fn make_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_access(mut self, access: AccessLevel) -> Self {
        self.access = access;
        self
    }

    pub fn implementing(mut self) -> Self {
        self.implementing = true;
        self
    }

    pub fn with_no_body(mut self) -> Self {
        self.body = None;
        self
    }

    pub fn with_type_parameters(mut self, parameters: impl IntoIterator<Item = TypeParameter>) -> Self {
        self.type_parameters.extend(parameters);
        self
    }

    pub fn with_argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn with_arguments(mut self, arguments: impl IntoIterator<Item = Argument>) -> Self {
        self.arguments.extend(arguments);
        self
    }

    pub fn with_thrown_exceptions(mut self, exceptions: impl IntoIterator<Item = TypeRef>) -> Self {
        self.thrown_exceptions.extend(exceptions);
        self
    }

    pub fn with_statement(self, statement: Stmt) -> Self {
        self.with_statements([statement])
    }

    /* Appends to the body, turning an abstract declaration into a concrete one */
    pub fn with_statements(mut self, statements: impl IntoIterator<Item = Stmt>) -> Self {
        self.body.get_or_insert_with(Vec::new).extend(statements);
        self
    }

    pub fn is_abstract(&self) -> bool {
        self.body.is_none()
    }

    /* Erased argument types, the part of the signature overloads differ in */
    pub fn signature(&self) -> Vec<String> {
        self.arguments.iter().map(|argument| argument.ty.erasure()).collect()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ConstructorDecl {
    pub name: String,
    #[serde(default)]
    pub access: AccessLevel,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<Argument>,
    #[serde(default)]
    pub body: Vec<Stmt>,
}

impl ConstructorDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            access: AccessLevel::Public,
            arguments: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn make_private(mut self) -> Self {
        self.access = AccessLevel::Private;
        self
    }

    pub fn with_argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn with_statement(mut self, statement: Stmt) -> Self {
        self.body.push(statement);
        self
    }

    pub fn signature(&self) -> Vec<String> {
        self.arguments.iter().map(|argument| argument.ty.erasure()).collect()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
}

/// A class or interface declaration, either read from an input file or synthesized.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct TypeDecl {
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub access: AccessLevel,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<TypeRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    /* The `@Builder` request carried by this declaration */
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builder: Option<BuilderOptions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDecl>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constructors: Vec<ConstructorDecl>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodDecl>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub member_types: Vec<TypeDecl>,
}

impl TypeDecl {
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Class,
            access: AccessLevel::Public,
            is_static: false,
            type_parameters: Vec::new(),
            implements: Vec::new(),
            annotations: Vec::new(),
            builder: None,
            fields: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            member_types: Vec::new(),
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Interface,
            ..Self::class(name)
        }
    }

    pub fn make_public(mut self) -> Self {
        self.access = AccessLevel::Public;
        self
    }

    pub fn make_private(mut self) -> Self {
        self.access = AccessLevel::Private;
        self
    }

    pub fn make_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_type_parameters(mut self, parameters: impl IntoIterator<Item = TypeParameter>) -> Self {
        self.type_parameters.extend(parameters);
        self
    }

    pub fn implementing(mut self, interfaces: impl IntoIterator<Item = TypeRef>) -> Self {
        self.implements.extend(interfaces);
        self
    }

    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldDecl>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn with_methods(mut self, methods: impl IntoIterator<Item = MethodDecl>) -> Self {
        self.methods.extend(methods);
        self
    }

    pub fn with_constructor(mut self, constructor: ConstructorDecl) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /* Type parameters as arguments: `class Box<T extends Number>` -> `<T>` */
    pub fn type_arguments(&self) -> Vec<TypeArgument> {
        self.type_parameters
            .iter()
            .map(TypeParameter::as_type_argument)
            .collect()
    }

    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MethodDecl> + 'a {
        self.methods.iter().filter(move |method| method.name == name)
    }

    pub fn member_type(&self, name: &str) -> Option<&TypeDecl> {
        self.member_types.iter().find(|member| member.name == name)
    }

    pub fn member_type_mut(&mut self, name: &str) -> Option<&mut TypeDecl> {
        self.member_types.iter_mut().find(|member| member.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotation_matches_qualified_names() {
        let annotation = Annotation::new("lombok.Builder.Extension");
        assert!(annotation.is("Builder.Extension"));
        assert!(!annotation.is("Extension.Builder"));
        assert!(Annotation::new("NotNull").is("NotNull"));
        assert!(!Annotation::new("MyNotNull").is("NotNull"));
    }

    #[test]
    fn type_parameters_become_plain_arguments() {
        let mut bound = TypeParameter::new("T");
        bound.bounds.push("Comparable<T>".parse().unwrap());
        assert_eq!(bound.to_string(), "T extends Comparable<T>");

        let decl = TypeDecl::class("Box").with_type_parameters([bound]);
        let arguments = decl.type_arguments();
        assert_eq!(arguments.len(), 1);
        assert_eq!(arguments[0].to_string(), "T");
    }

    #[test]
    fn statements_turn_abstract_methods_concrete() {
        let method = MethodDecl::new(TypeRef::void(), "run").with_no_body();
        assert!(method.is_abstract());
        let method = method.with_statement(Stmt::Return(None));
        assert_eq!(method.body.as_ref().map(Vec::len), Some(1));
    }
}
