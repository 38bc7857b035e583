//! All-or-nothing application of planned mutations.

use crate::model::{ModelError, TypeModel};
use builder_types::{ConstructorDecl, MethodDecl, TypeDecl};
use tracing::trace;

/* One planned change to a target type */
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    InjectConstructor(ConstructorDecl),
    InjectMethod(MethodDecl),
    InjectType(TypeDecl),
    /* Add a method to a member type, which may itself be injected earlier in the same transaction */
    InjectMemberMethod { member: String, method: MethodDecl },
    RemoveMethod { name: String, signature: Vec<String> },
    ClearInitializer { field: String },
}

impl Mutation {
    fn apply<T: TypeModel>(self, ty: &mut T) -> Result<(), ModelError> {
        match self {
            Mutation::InjectConstructor(constructor) => ty.inject_constructor(constructor),
            Mutation::InjectMethod(method) => ty.inject_method(method),
            Mutation::InjectType(member) => ty.inject_type(member),
            Mutation::InjectMemberMethod { member, method } => {
                let type_name = ty.name().to_string();
                match ty.member_type_mut(&member) {
                    Some(target) => target.inject_method(method),
                    None => Err(ModelError::UnknownMemberType { type_name, member }),
                }
            }
            Mutation::RemoveMethod { name, signature } => ty.remove_method(&name, &signature),
            Mutation::ClearInitializer { field } => ty.clear_initializer(&field),
        }
    }
}

/// Ordered mutations planned against a type while only reading it.
///
/// `commit` applies them to a scratch copy and replaces the target only when every
/// mutation succeeded, so a failed commit leaves the target exactly as it was.
#[derive(Debug, Default, Clone)]
pub struct Transaction {
    mutations: Vec<Mutation>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mutation: Mutation) {
        self.mutations.push(mutation);
    }

    pub fn extend(&mut self, mutations: impl IntoIterator<Item = Mutation>) {
        self.mutations.extend(mutations);
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    pub fn commit<T: TypeModel>(self, ty: &mut T) -> Result<(), ModelError> {
        let mut scratch = ty.clone();
        let count = self.mutations.len();
        for mutation in self.mutations {
            mutation.apply(&mut scratch)?;
        }
        trace!(type_name = ty.name(), mutations = count, "committed transaction");
        *ty = scratch;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use builder_types::{FieldDecl, TypeRef};

    #[test]
    fn failed_commit_leaves_type_unchanged() {
        let mut ty = TypeDecl::class("Pizza")
            .with_fields([FieldDecl::new(TypeRef::string(), "size")])
            .with_methods([MethodDecl::new(TypeRef::void(), "bake")]);
        let before = ty.clone();

        let mut transaction = Transaction::new();
        transaction.push(Mutation::InjectMethod(MethodDecl::new(TypeRef::void(), "slice")));
        transaction.push(Mutation::InjectType(TypeDecl::class("$Builder")));
        transaction.push(Mutation::RemoveMethod {
            name: "missing".to_string(),
            signature: Vec::new(),
        });

        assert_matches!(
            transaction.commit(&mut ty),
            Err(ModelError::MethodNotFound { .. })
        );
        assert_eq!(ty, before);
    }

    #[test]
    fn member_methods_land_on_types_injected_earlier() {
        let mut ty = TypeDecl::class("Pizza");
        let mut transaction = Transaction::new();
        transaction.push(Mutation::InjectType(TypeDecl::interface("$OptionalDef")));
        transaction.push(Mutation::InjectMemberMethod {
            member: "$OptionalDef".to_string(),
            method: MethodDecl::new(TypeRef::new("Pizza"), "build").with_no_body(),
        });
        transaction.commit(&mut ty).unwrap();

        let optional = ty.member_type("$OptionalDef").unwrap();
        assert_eq!(optional.methods.len(), 1);
        assert!(optional.methods[0].is_abstract());
    }

    #[test]
    fn unknown_member_type_is_rejected() {
        let mut ty = TypeDecl::class("Pizza");
        let mut transaction = Transaction::new();
        transaction.push(Mutation::InjectMemberMethod {
            member: "$Builder".to_string(),
            method: MethodDecl::new(TypeRef::void(), "run"),
        });
        assert_matches!(
            transaction.commit(&mut ty),
            Err(ModelError::UnknownMemberType { .. })
        );
    }
}
