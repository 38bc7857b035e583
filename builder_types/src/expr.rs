use crate::types::TypeRef;
use serde_derive::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BinaryOp {
    Eq,
    Ne,
    And,
    Or,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

/// Expressions the synthesizer needs to build; anything else travels as `Verbatim`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Expr {
    This,
    Null,
    Name(String),
    #[serde(rename = "string")]
    StringLiteral(String),
    /* `receiver.name`; no receiver means `this.name` */
    Field {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        receiver: Option<Box<Expr>>,
        name: String,
    },
    Call {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        receiver: Option<Box<Expr>>,
        name: String,
        #[serde(default)]
        arguments: Vec<Expr>,
    },
    New {
        #[serde(rename = "type")]
        ty: TypeRef,
        #[serde(default)]
        arguments: Vec<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    Verbatim(String),
}

impl Expr {
    pub fn name(name: impl Into<String>) -> Self {
        Expr::Name(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::StringLiteral(value.into())
    }

    /* `this.name` */
    pub fn field(name: impl Into<String>) -> Self {
        Expr::Field {
            receiver: None,
            name: name.into(),
        }
    }

    pub fn field_of(receiver: Expr, name: impl Into<String>) -> Self {
        Expr::Field {
            receiver: Some(Box::new(receiver)),
            name: name.into(),
        }
    }

    /* Unqualified call `name()` */
    pub fn call(name: impl Into<String>) -> Self {
        Expr::Call {
            receiver: None,
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    pub fn call_on(receiver: Expr, name: impl Into<String>) -> Self {
        Expr::Call {
            receiver: Some(Box::new(receiver)),
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    pub fn new_instance(ty: TypeRef) -> Self {
        Expr::New {
            ty,
            arguments: Vec::new(),
        }
    }

    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Appends an argument to a `Call` or `New`; other expressions are returned unchanged.
    pub fn with_argument(mut self, argument: Expr) -> Self {
        match &mut self {
            Expr::Call { arguments, .. } | Expr::New { arguments, .. } => arguments.push(argument),
            _ => {}
        }
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Stmt {
    Expr(Expr),
    Assign {
        target: Expr,
        value: Expr,
    },
    Return(Option<Expr>),
    Throw(Expr),
    If {
        condition: Expr,
        then: Vec<Stmt>,
    },
    Verbatim(String),
}

impl Stmt {
    pub fn assign(target: Expr, value: Expr) -> Self {
        Stmt::Assign { target, value }
    }

    pub fn ret(value: Expr) -> Self {
        Stmt::Return(Some(value))
    }

    pub fn return_this() -> Self {
        Stmt::Return(Some(Expr::This))
    }

    pub fn if_then(condition: Expr, then: Vec<Stmt>) -> Self {
        Stmt::If { condition, then }
    }
}
