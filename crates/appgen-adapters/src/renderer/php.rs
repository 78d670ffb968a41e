//! PHP renderer: turns a structural `SourceUnit` into PHP 8 source text.
//!
//! Layout rules:
//! - tab indentation, one class per file;
//! - `declare(strict_types=1);` when the unit asks for it;
//! - imports sorted, one `use` per line;
//! - type names shortened against the namespace and imports, otherwise
//!   written fully qualified with a leading `\`.
//!
//! Output is not blank-line normalized; the scaffold service does that.

use std::collections::BTreeSet;

use appgen_core::{
    application::{ApplicationError, ports::SourceRenderer},
    domain::{
        common::is_identifier,
        source::{
            ClassDecl, ClassModifier, Import, MethodDecl, Param, PropertyDecl, SourceUnit,
            TypeHint, is_builtin_type,
        },
    },
    error::AppGenResult,
};
use tracing::{instrument, trace};

const INDENT: &str = "\t";

/// Renders [`SourceUnit`]s as PHP.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhpRenderer;

impl PhpRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl SourceRenderer for PhpRenderer {
    #[instrument(skip_all, fields(class = %unit.declaration.name))]
    fn render(&self, unit: &SourceUnit) -> AppGenResult<String> {
        check(unit)?;

        let names = NameTable::new(unit);
        let mut out = Printer::default();

        out.line(0, "<?php");
        out.blank();
        if unit.strict_types {
            out.line(0, "declare(strict_types=1);");
            out.blank();
        }
        if !unit.namespace.is_empty() {
            out.line(0, &format!("namespace {};", unit.namespace));
            out.blank();
        }

        if !names.imports.is_empty() {
            for import in &names.imports {
                match &import.alias {
                    Some(alias) => out.line(0, &format!("use {} as {alias};", import.name)),
                    None => out.line(0, &format!("use {};", import.name)),
                }
            }
            out.blank();
        }

        render_class(&mut out, &names, &unit.declaration);

        trace!(lines = out.lines.len(), "Rendered unit");
        Ok(out.finish())
    }

    fn file_extension(&self) -> &'static str {
        "php"
    }
}

fn check(unit: &SourceUnit) -> AppGenResult<()> {
    let decl = &unit.declaration;
    let bad = |reason: String| -> AppGenResult<()> {
        Err(ApplicationError::RenderingFailed {
            artifact: unit.class_name().to_string(),
            reason,
        }
        .into())
    };

    if !is_identifier(&decl.name) {
        return bad(format!("'{}' is not a valid class name", decl.name));
    }
    if let Some(method) = decl.methods.iter().find(|m| !is_identifier(&m.name)) {
        return bad(format!("'{}' is not a valid method name", method.name));
    }
    if let Some(property) = decl.properties.iter().find(|p| !is_identifier(&p.name)) {
        return bad(format!("'{}' is not a valid property name", property.name));
    }
    Ok(())
}

// ── Names ────────────────────────────────────────────────────────────────────

/// How type names are written inside one unit.
struct NameTable<'a> {
    namespace: &'a str,
    imports: BTreeSet<&'a Import>,
}

impl<'a> NameTable<'a> {
    /// Imports whose local name collides with the declared class are dropped;
    /// references to them are written fully qualified instead.
    fn new(unit: &'a SourceUnit) -> Self {
        let imports = unit
            .imports
            .iter()
            .filter(|import| import.local_name() != unit.declaration.name)
            .collect();
        Self {
            namespace: &unit.namespace,
            imports,
        }
    }

    fn shorten(&self, name: &str) -> String {
        let name = name.trim_start_matches('\\');
        if is_builtin_type(name) {
            return name.to_string();
        }
        if let Some(import) = self.imports.iter().find(|i| i.name == name) {
            return import.local_name().to_string();
        }

        let (namespace, short) = name.rsplit_once('\\').unwrap_or(("", name));
        if namespace == self.namespace {
            short.to_string()
        } else {
            format!("\\{name}")
        }
    }

    fn hint(&self, hint: &TypeHint) -> String {
        let name = self.shorten(&hint.name);
        if hint.nullable && name != "mixed" && name != "null" {
            format!("?{name}")
        } else {
            name
        }
    }

    fn param(&self, param: &Param) -> String {
        let mut text = String::new();
        if let Some(visibility) = param.promoted {
            text.push_str(visibility.as_str());
            text.push(' ');
        }
        if let Some(hint) = &param.type_hint {
            text.push_str(&self.hint(hint));
            text.push(' ');
        }
        text.push('$');
        text.push_str(&param.name);
        if let Some(default) = &param.default {
            text.push_str(" = ");
            text.push_str(default);
        }
        text
    }
}

// ── Declarations ─────────────────────────────────────────────────────────────

fn render_class(out: &mut Printer, names: &NameTable<'_>, decl: &ClassDecl) {
    render_doc(out, 0, &decl.doc);

    let mut header = String::new();
    match decl.modifier {
        ClassModifier::Abstract => header.push_str("abstract "),
        ClassModifier::Final => header.push_str("final "),
        ClassModifier::None => {}
    }
    header.push_str("class ");
    header.push_str(&decl.name);
    if let Some(parent) = &decl.extends {
        header.push_str(" extends ");
        header.push_str(&names.shorten(parent));
    }
    if !decl.implements.is_empty() {
        let interfaces: Vec<String> = decl.implements.iter().map(|i| names.shorten(i)).collect();
        header.push_str(" implements ");
        header.push_str(&interfaces.join(", "));
    }
    out.line(0, &header);
    out.line(0, "{");

    let mut first = true;
    let mut separate = |out: &mut Printer| {
        if !std::mem::take(&mut first) {
            out.blank();
        }
    };

    if !decl.traits.is_empty() {
        separate(out);
        for name in &decl.traits {
            out.line(1, &format!("use {};", names.shorten(name)));
        }
    }
    for property in &decl.properties {
        separate(out);
        render_property(out, names, property);
    }
    for method in &decl.methods {
        separate(out);
        render_method(out, names, method);
    }

    out.line(0, "}");
}

fn render_property(out: &mut Printer, names: &NameTable<'_>, property: &PropertyDecl) {
    render_doc(out, 1, &property.doc);

    let mut line = format!("{} ", property.visibility.as_str());
    if let Some(hint) = &property.type_hint {
        line.push_str(&names.hint(hint));
        line.push(' ');
    }
    line.push('$');
    line.push_str(&property.name);
    if let Some(default) = &property.default {
        line.push_str(" = ");
        line.push_str(default);
    }
    line.push(';');
    out.line(1, &line);
}

fn render_method(out: &mut Printer, names: &NameTable<'_>, method: &MethodDecl) {
    render_doc(out, 1, &method.doc);

    let head = format!("{} function {}", method.visibility.as_str(), method.name);
    let returns = method
        .return_type
        .as_ref()
        .map(|hint| format!(": {}", names.hint(hint)))
        .unwrap_or_default();

    if method.params.iter().any(|p| p.promoted.is_some()) {
        out.line(1, &format!("{head}("));
        for param in &method.params {
            out.line(2, &format!("{},", names.param(param)));
        }
        out.line(1, &format!("){returns} {{"));
    } else {
        let params: Vec<String> = method.params.iter().map(|p| names.param(p)).collect();
        out.line(1, &format!("{head}({}){returns}", params.join(", ")));
        out.line(1, "{");
    }

    for statement in &method.body {
        if statement.is_empty() {
            out.blank();
        } else {
            out.line(2, statement);
        }
    }
    out.line(1, "}");
}

fn render_doc(out: &mut Printer, depth: usize, doc: &[String]) {
    match doc {
        [] => {}
        [single] => out.line(depth, &format!("/** {single} */")),
        lines => {
            out.line(depth, "/**");
            for line in lines {
                if line.is_empty() {
                    out.line(depth, " *");
                } else {
                    out.line(depth, &format!(" * {line}"));
                }
            }
            out.line(depth, " */");
        }
    }
}

// ── Output buffer ────────────────────────────────────────────────────────────

#[derive(Default)]
struct Printer {
    lines: Vec<String>,
}

impl Printer {
    fn line(&mut self, depth: usize, text: &str) {
        self.lines.push(format!("{}{text}", INDENT.repeat(depth)));
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn finish(self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}
