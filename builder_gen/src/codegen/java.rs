/* Java source emission for synthesized declarations */

use builder_types::{
    Annotation, Argument, ConstructorDecl, Expr, FieldDecl, MethodDecl, Stmt, TypeDecl,
    TypeParameter, TypeRef,
};
use std::fmt::Write;
use tracing::trace;

pub struct JavaCodeGeneratorOptions {
    /* Spaces per nesting level */
    pub indent: usize,
}

impl Default for JavaCodeGeneratorOptions {
    fn default() -> Self {
        Self { indent: 4 }
    }
}

pub struct JavaCodeGenerator {
    options: JavaCodeGeneratorOptions,
}

/* Line-oriented output buffer tracking the current nesting depth */
struct SourceWriter {
    out: String,
    unit: String,
    depth: usize,
}

impl SourceWriter {
    fn new(indent: usize) -> Self {
        Self {
            out: String::new(),
            unit: " ".repeat(indent),
            depth: 0,
        }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(&self.unit);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn open(&mut self, header: &str) {
        self.line(&format!("{} {{", header));
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }
}

impl JavaCodeGenerator {
    pub fn new(options: JavaCodeGeneratorOptions) -> Self {
        Self { options }
    }

    /// A complete compilation unit: package line, imports, then `decl`.
    pub fn emit_file(&self, package: Option<&str>, imports: &[String], decl: &TypeDecl) -> String {
        let mut writer = SourceWriter::new(self.options.indent);
        if let Some(package) = package {
            writer.line(&format!("package {};", package));
            writer.blank();
        }
        for import in imports {
            writer.line(&format!("import {};", import));
        }
        if !imports.is_empty() {
            writer.blank();
        }
        emit_type(&mut writer, decl);
        writer.out
    }

    pub fn emit_type(&self, decl: &TypeDecl) -> String {
        let mut writer = SourceWriter::new(self.options.indent);
        emit_type(&mut writer, decl);
        writer.out
    }
}

fn emit_type(writer: &mut SourceWriter, decl: &TypeDecl) {
    trace!(type_name = %decl.name, "emitting type");
    for annotation in &decl.annotations {
        writer.line(&format_annotation(annotation));
    }

    let mut header = String::new();
    if let Some(keyword) = decl.access.keyword() {
        header.push_str(keyword);
        header.push(' ');
    }
    if decl.is_static {
        header.push_str("static ");
    }
    header.push_str(if decl.is_interface() { "interface " } else { "class " });
    header.push_str(&decl.name);
    header.push_str(&format_type_parameters(&decl.type_parameters));
    if !decl.implements.is_empty() {
        header.push_str(if decl.is_interface() { " extends " } else { " implements " });
        header.push_str(&join(&decl.implements));
    }
    writer.open(&header);

    let mut first = true;
    if !decl.fields.is_empty() {
        separate(writer, &mut first);
        for field in &decl.fields {
            emit_field(writer, field);
        }
    }
    for constructor in &decl.constructors {
        separate(writer, &mut first);
        emit_constructor(writer, constructor);
    }
    for method in &decl.methods {
        separate(writer, &mut first);
        emit_method(writer, method);
    }
    for member in &decl.member_types {
        separate(writer, &mut first);
        emit_type(writer, member);
    }

    writer.close();
}

/* Blank line between members */
fn separate(writer: &mut SourceWriter, first: &mut bool) {
    if !*first {
        writer.blank();
    }
    *first = false;
}

fn emit_field(writer: &mut SourceWriter, field: &FieldDecl) {
    for annotation in &field.annotations {
        writer.line(&format_annotation(annotation));
    }
    let mut line = String::new();
    if let Some(keyword) = field.access.keyword() {
        line.push_str(keyword);
        line.push(' ');
    }
    if field.is_static {
        line.push_str("static ");
    }
    if field.is_final {
        line.push_str("final ");
    }
    let _ = write!(line, "{} {}", field.ty, field.name);
    if let Some(initializer) = &field.initializer {
        let _ = write!(line, " = {}", format_expr(initializer));
    }
    line.push(';');
    writer.line(&line);
}

fn emit_constructor(writer: &mut SourceWriter, constructor: &ConstructorDecl) {
    let mut header = String::new();
    if let Some(keyword) = constructor.access.keyword() {
        header.push_str(keyword);
        header.push(' ');
    }
    let _ = write!(
        header,
        "{}({})",
        constructor.name,
        format_arguments(&constructor.arguments)
    );
    writer.open(&header);
    emit_statements(writer, &constructor.body);
    writer.close();
}

fn emit_method(writer: &mut SourceWriter, method: &MethodDecl) {
    if method.implementing {
        writer.line("@Override");
    }
    for annotation in &method.annotations {
        writer.line(&format_annotation(annotation));
    }

    let mut header = String::new();
    if let Some(keyword) = method.access.keyword() {
        header.push_str(keyword);
        header.push(' ');
    }
    if method.is_static {
        header.push_str("static ");
    }
    if !method.type_parameters.is_empty() {
        header.push_str(&format_type_parameters(&method.type_parameters));
        header.push(' ');
    }
    let _ = write!(
        header,
        "{} {}({})",
        method.return_type,
        method.name,
        format_arguments(&method.arguments)
    );
    if !method.thrown_exceptions.is_empty() {
        let _ = write!(header, " throws {}", join(&method.thrown_exceptions));
    }

    match &method.body {
        None => writer.line(&format!("{};", header)),
        Some(body) => {
            writer.open(&header);
            emit_statements(writer, body);
            writer.close();
        }
    }
}

fn emit_statements(writer: &mut SourceWriter, statements: &[Stmt]) {
    for statement in statements {
        match statement {
            Stmt::Expr(expr) => writer.line(&format!("{};", format_expr(expr))),
            Stmt::Assign { target, value } => {
                writer.line(&format!("{} = {};", format_expr(target), format_expr(value)))
            }
            Stmt::Return(None) => writer.line("return;"),
            Stmt::Return(Some(value)) => writer.line(&format!("return {};", format_expr(value))),
            Stmt::Throw(value) => writer.line(&format!("throw {};", format_expr(value))),
            Stmt::If { condition, then } => {
                writer.open(&format!("if ({})", format_expr(condition)));
                emit_statements(writer, then);
                writer.close();
            }
            Stmt::Verbatim(source) => writer.line(source.trim()),
        }
    }
}

pub fn format_expr(expr: &Expr) -> String {
    match expr {
        Expr::This => "this".to_string(),
        Expr::Null => "null".to_string(),
        Expr::Name(name) => name.clone(),
        Expr::StringLiteral(value) => format!("\"{}\"", escape_string(value)),
        Expr::Field { receiver, name } => match receiver {
            Some(receiver) => format!("{}.{}", format_expr(receiver), name),
            None => format!("this.{}", name),
        },
        Expr::Call {
            receiver,
            name,
            arguments,
        } => {
            let arguments = arguments.iter().map(format_expr).collect::<Vec<_>>().join(", ");
            match receiver {
                Some(receiver) => format!("{}.{}({})", format_expr(receiver), name, arguments),
                None => format!("{}({})", name, arguments),
            }
        }
        Expr::New { ty, arguments } => format!(
            "new {}({})",
            ty,
            arguments.iter().map(format_expr).collect::<Vec<_>>().join(", ")
        ),
        Expr::Binary { left, op, right } => format!(
            "{} {} {}",
            format_operand(left),
            op.symbol(),
            format_operand(right)
        ),
        Expr::Verbatim(source) => source.clone(),
    }
}

/* Nested binary expressions are parenthesized */
fn format_operand(expr: &Expr) -> String {
    match expr {
        Expr::Binary { .. } => format!("({})", format_expr(expr)),
        _ => format_expr(expr),
    }
}

pub fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn format_annotation(annotation: &Annotation) -> String {
    match &annotation.value {
        Some(value) => format!("@{}({})", annotation.name, value),
        None => format!("@{}", annotation.name),
    }
}

fn format_arguments(arguments: &[Argument]) -> String {
    arguments
        .iter()
        .map(|argument| {
            let mut text = String::new();
            for annotation in &argument.annotations {
                text.push_str(&format_annotation(annotation));
                text.push(' ');
            }
            if argument.is_final {
                text.push_str("final ");
            }
            let _ = write!(text, "{} {}", argument.ty, argument.name);
            text
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_type_parameters(parameters: &[TypeParameter]) -> String {
    if parameters.is_empty() {
        return String::new();
    }
    let parameters = parameters
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("<{}>", parameters)
}

fn join(types: &[TypeRef]) -> String {
    types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
