use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/* Errors raised while parsing a type reference string such as `Map<String, List<T>>` */
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeParseError {
    #[error("empty type reference")]
    Empty,

    #[error("unexpected {found} at offset {offset} in '{input}'")]
    Unexpected {
        input: String,
        offset: usize,
        found: String,
    },

    #[error("expected {expected} at offset {offset} in '{input}'")]
    Expected {
        input: String,
        offset: usize,
        expected: &'static str,
    },
}

/* A type argument inside angle brackets */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeArgument {
    Type(TypeRef),
    /* `?` */
    Wildcard,
    /* `? extends T` */
    Extends(TypeRef),
    /* `? super T` */
    Super(TypeRef),
}

/// A (possibly parameterized) reference to a type, printed and parsed in Java syntax.
///
/// `name` keeps whatever qualification the source used (`List` or `java.util.List`),
/// type matching is done on the simple name.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct TypeRef {
    pub name: String,
    pub type_arguments: Vec<TypeArgument>,
    pub array_dimensions: usize,
}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_arguments: Vec::new(),
            array_dimensions: 0,
        }
    }

    pub fn void() -> Self {
        Self::new("void")
    }

    pub fn object() -> Self {
        Self::new("Object")
    }

    pub fn string() -> Self {
        Self::new("String")
    }

    pub fn with_type_argument(mut self, argument: TypeArgument) -> Self {
        self.type_arguments.push(argument);
        self
    }

    pub fn with_type_arguments(mut self, arguments: impl IntoIterator<Item = TypeArgument>) -> Self {
        self.type_arguments.extend(arguments);
        self
    }

    /* Last segment of a qualified name: `java.util.List` -> `List` */
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn is_void(&self) -> bool {
        self.name == "void" && self.array_dimensions == 0
    }

    /* Type arguments that are concrete types, in order; wildcards are skipped */
    pub fn exact_type_arguments(&self) -> Vec<&TypeRef> {
        self.type_arguments
            .iter()
            .filter_map(|argument| match argument {
                TypeArgument::Type(ty) => Some(ty),
                _ => None,
            })
            .collect()
    }

    /* Erasure used when comparing method signatures */
    pub fn erasure(&self) -> String {
        let mut erased = self.simple_name().to_string();
        for _ in 0..self.array_dimensions {
            erased.push_str("[]");
        }
        erased
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.type_arguments.is_empty() {
            f.write_str("<")?;
            for (i, argument) in self.type_arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", argument)?;
            }
            f.write_str(">")?;
        }
        for _ in 0..self.array_dimensions {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

impl fmt::Display for TypeArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeArgument::Type(ty) => write!(f, "{}", ty),
            TypeArgument::Wildcard => f.write_str("?"),
            TypeArgument::Extends(ty) => write!(f, "? extends {}", ty),
            TypeArgument::Super(ty) => write!(f, "? super {}", ty),
        }
    }
}

impl FromStr for TypeRef {
    type Err = TypeParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.trim().is_empty() {
            return Err(TypeParseError::Empty);
        }
        let mut parser = TypeRefParser { input, offset: 0 };
        let parsed = parser.parse_type()?;
        parser.skip_whitespace();
        if let Some(c) = parser.peek() {
            return Err(parser.unexpected(c));
        }
        Ok(parsed)
    }
}

impl TryFrom<String> for TypeRef {
    type Error = TypeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

/* Recursive-descent parser over the grammar
 *   type     := name ('<' argument (',' argument)* '>')? ('[' ']')*
 *   argument := '?' (('extends' | 'super') type)? | type
 *   name     := ident ('.' ident)*
 */
struct TypeRefParser<'a> {
    input: &'a str,
    offset: usize,
}

impl<'a> TypeRefParser<'a> {
    fn peek(&self) -> Option<char> {
        self.input[self.offset..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn unexpected(&self, found: char) -> TypeParseError {
        TypeParseError::Unexpected {
            input: self.input.to_string(),
            offset: self.offset,
            found: format!("'{}'", found),
        }
    }

    fn expected(&self, expected: &'static str) -> TypeParseError {
        TypeParseError::Expected {
            input: self.input.to_string(),
            offset: self.offset,
            expected,
        }
    }

    fn parse_ident(&mut self) -> Result<&'a str, TypeParseError> {
        self.skip_whitespace();
        let start = self.offset;
        match self.peek() {
            Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {
                self.bump();
            }
            _ => return Err(self.expected("identifier")),
        }
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_' || c == '$') {
            self.bump();
        }
        Ok(&self.input[start..self.offset])
    }

    fn parse_name(&mut self) -> Result<String, TypeParseError> {
        let mut name = self.parse_ident()?.to_string();
        while self.eat('.') {
            name.push('.');
            name.push_str(self.parse_ident()?);
        }
        Ok(name)
    }

    fn parse_type(&mut self) -> Result<TypeRef, TypeParseError> {
        let mut ty = TypeRef::new(self.parse_name()?);
        if self.eat('<') {
            loop {
                ty.type_arguments.push(self.parse_argument()?);
                if self.eat(',') {
                    continue;
                }
                if self.eat('>') {
                    break;
                }
                return Err(self.expected("',' or '>'"));
            }
        }
        while self.eat('[') {
            if !self.eat(']') {
                return Err(self.expected("']'"));
            }
            ty.array_dimensions += 1;
        }
        Ok(ty)
    }

    fn parse_argument(&mut self) -> Result<TypeArgument, TypeParseError> {
        if !self.eat('?') {
            return Ok(TypeArgument::Type(self.parse_type()?));
        }
        self.skip_whitespace();
        if matches!(self.peek(), Some(',') | Some('>')) {
            return Ok(TypeArgument::Wildcard);
        }
        match self.parse_ident()? {
            "extends" => Ok(TypeArgument::Extends(self.parse_type()?)),
            "super" => Ok(TypeArgument::Super(self.parse_type()?)),
            _ => Err(self.expected("'extends' or 'super'")),
        }
    }
}
