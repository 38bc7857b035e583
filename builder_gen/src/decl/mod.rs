//! Host adapter for the in-memory `builder_types` declarations.

pub mod extension;
pub mod validation;

use crate::model::{
    describe_method, ExtensionAdapters, FieldModel, MethodModel, ModelError, TypeModel,
};
use builder_types::{
    Annotation, Argument, ConstructorDecl, Expr, FieldDecl, MethodDecl, Stmt, TypeDecl,
    TypeParameter, TypeRef,
};

pub use extension::AnnotationExtensionClassifier;
pub use validation::{AnnotationParameterSanitizer, AnnotationParameterValidator};

impl FieldModel for FieldDecl {
    fn name(&self) -> &str {
        &self.name
    }

    fn field_type(&self) -> &TypeRef {
        &self.ty
    }

    fn type_arguments(&self) -> Vec<TypeRef> {
        self.ty.exact_type_arguments().into_iter().cloned().collect()
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn is_static(&self) -> bool {
        self.is_static
    }

    fn is_final(&self) -> bool {
        self.is_final
    }

    fn initializer(&self) -> Option<&Expr> {
        self.initializer.as_ref()
    }

    fn is_of_type(&self, simple_name: &str) -> bool {
        self.ty.array_dimensions == 0 && self.ty.simple_name() == simple_name
    }
}

impl MethodModel for MethodDecl {
    fn name(&self) -> &str {
        &self.name
    }

    fn arguments(&self) -> Vec<Argument> {
        self.arguments.clone()
    }

    fn statements(&self) -> Vec<Stmt> {
        self.body.clone().unwrap_or_default()
    }

    fn return_type(&self) -> &TypeRef {
        &self.return_type
    }

    fn has_arguments(&self) -> bool {
        !self.arguments.is_empty()
    }

    fn thrown_exceptions(&self) -> &[TypeRef] {
        &self.thrown_exceptions
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn is_static(&self) -> bool {
        self.is_static
    }

    fn signature(&self) -> Vec<String> {
        MethodDecl::signature(self)
    }
}

impl TypeModel for TypeDecl {
    type Field = FieldDecl;
    type Method = MethodDecl;

    fn name(&self) -> &str {
        &self.name
    }

    fn type_parameters(&self) -> &[TypeParameter] {
        &self.type_parameters
    }

    fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    fn methods(&self) -> &[MethodDecl] {
        &self.methods
    }

    fn member_type(&self, name: &str) -> Option<&Self> {
        TypeDecl::member_type(self, name)
    }

    fn member_type_mut(&mut self, name: &str) -> Option<&mut Self> {
        TypeDecl::member_type_mut(self, name)
    }

    fn inject_method(&mut self, method: MethodDecl) -> Result<(), ModelError> {
        let signature = method.signature();
        let duplicate = self
            .methods
            .iter()
            .any(|existing| existing.name == method.name && existing.signature() == signature);
        if duplicate {
            return Err(ModelError::DuplicateMethod {
                type_name: self.name.clone(),
                method: describe_method(&method.name, &signature),
            });
        }
        self.methods.push(method);
        Ok(())
    }

    fn inject_constructor(&mut self, constructor: ConstructorDecl) -> Result<(), ModelError> {
        let signature = constructor.signature();
        if self
            .constructors
            .iter()
            .any(|existing| existing.signature() == signature)
        {
            return Err(ModelError::DuplicateConstructor {
                type_name: self.name.clone(),
                signature: signature.join(", "),
            });
        }
        self.constructors.push(constructor);
        Ok(())
    }

    fn inject_type(&mut self, member: TypeDecl) -> Result<(), ModelError> {
        if TypeDecl::member_type(self, &member.name).is_some() {
            return Err(ModelError::DuplicateMemberType {
                type_name: self.name.clone(),
                member: member.name,
            });
        }
        self.member_types.push(member);
        Ok(())
    }

    fn remove_method(&mut self, name: &str, signature: &[String]) -> Result<(), ModelError> {
        let position = self
            .methods
            .iter()
            .position(|method| method.name == name && method.signature() == signature);
        match position {
            Some(index) => {
                self.methods.remove(index);
                Ok(())
            }
            None => Err(ModelError::MethodNotFound {
                type_name: self.name.clone(),
                method: describe_method(name, signature),
            }),
        }
    }

    fn clear_initializer(&mut self, field: &str) -> Result<(), ModelError> {
        match self.fields.iter_mut().find(|candidate| candidate.name == field) {
            Some(found) => {
                found.initializer = None;
                Ok(())
            }
            None => Err(ModelError::FieldNotFound {
                type_name: self.name.clone(),
                field: field.to_string(),
            }),
        }
    }
}

/// The default annotation-driven collaborators for `TypeDecl` hosts.
#[derive(Debug, Default)]
pub struct DeclAdapters {
    pub classifier: AnnotationExtensionClassifier,
    pub validator: AnnotationParameterValidator,
    pub sanitizer: AnnotationParameterSanitizer,
}

impl DeclAdapters {
    pub fn extension_adapters(&self) -> ExtensionAdapters<'_, MethodDecl> {
        ExtensionAdapters {
            classifier: &self.classifier,
            validator: &self.validator,
            sanitizer: &self.sanitizer,
        }
    }
}
