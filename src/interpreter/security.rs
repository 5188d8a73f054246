use crate::{
    ast::{Expr, MemberKey, Span, Template},
    error::SecurityError,
};

/// Binding names that reach module loading.
///
/// Any appearance of one of these anywhere in a template is rejected
/// outright, before the broader unsafe-binding scan runs.
const MODULE_BINDINGS: [&str; 4] = ["require", "import", "importScripts", "module"];

/// Binding names that reach host internals or dynamic code execution.
///
/// The expression language has no way to evaluate these usefully today; the
/// gate rejects them anyway so a template never probes for them.
const UNSAFE_BINDINGS: [&str; 12] = ["eval",
                                     "Function",
                                     "global",
                                     "globalThis",
                                     "process",
                                     "window",
                                     "this",
                                     "constructor",
                                     "prototype",
                                     "__proto__",
                                     "Reflect",
                                     "Proxy"];

/// Vets a parsed template before evaluation.
///
/// Every name position in every expression span is collected: identifiers,
/// static member keys, string keys in brackets, and object literal keys,
/// recursing into lambda bodies, dynamic key expressions, and nested
/// backtick templates.
///
/// Module-loading bindings take precedence: if any collected name appears in
/// [`MODULE_BINDINGS`], the result is [`SecurityError::ModuleImport`] no
/// matter what else the template contains. Otherwise every name found in
/// [`UNSAFE_BINDINGS`] is aggregated into one
/// [`SecurityError::Problems`] report, in template order.
///
/// # Parameters
/// - `template`: The parsed template to vet.
///
/// # Errors
/// Returns a `SecurityError` when any flagged binding appears; `Ok(())`
/// means evaluation may proceed.
pub fn vet_template(template: &Template) -> Result<(), SecurityError> {
    let mut names = Vec::new();
    for span in &template.spans {
        if let Span::Expression(expr) = span {
            collect_names(expr, &mut names);
        }
    }

    if names.iter().any(|name| MODULE_BINDINGS.contains(&name.as_str())) {
        return Err(SecurityError::ModuleImport);
    }

    let mut problems = Vec::new();
    for name in names {
        if UNSAFE_BINDINGS.contains(&name.as_str()) && !problems.contains(&name) {
            problems.push(name);
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(SecurityError::Problems(problems))
    }
}

/// Collects every name position in an expression, in source order.
fn collect_names(expr: &Expr, names: &mut Vec<String>) {
    match expr {
        Expr::Null { .. }
        | Expr::Bool { .. }
        | Expr::Number { .. }
        | Expr::Str { .. }
        | Expr::ContextRef { .. } => {},
        Expr::TemplateStr { template, .. } => {
            for span in &template.spans {
                if let Span::Expression(inner) = span {
                    collect_names(inner, names);
                }
            }
        },
        Expr::Array { elements, .. } => {
            for element in elements {
                collect_names(element, names);
            }
        },
        Expr::Object { entries, .. } => {
            for entry in entries {
                names.push(entry.key.clone());
                collect_names(&entry.value, names);
            }
        },
        Expr::Identifier { name, .. } => names.push(name.clone()),
        Expr::Member { target, key, .. } => {
            collect_names(target, names);
            match key {
                MemberKey::Name(name) => names.push(name.clone()),
                MemberKey::Index(_) => {},
                MemberKey::Dynamic(inner) => {
                    if let Expr::Str { value, .. } = inner.as_ref() {
                        names.push(value.clone());
                    }
                    collect_names(inner, names);
                },
            }
        },
        Expr::Call { callee, arguments, .. } => {
            collect_names(callee, names);
            for argument in arguments {
                collect_names(argument, names);
            }
        },
        Expr::Lambda { params, body, .. } => {
            for param in params {
                names.push(param.clone());
            }
            collect_names(body, names);
        },
        Expr::Unary { expr, .. } => collect_names(expr, names),
        Expr::Binary { left, right, .. } => {
            collect_names(left, names);
            collect_names(right, names);
        },
        Expr::Ternary { condition,
                        then_branch,
                        else_branch,
                        .. } => {
            collect_names(condition, names);
            collect_names(then_branch, names);
            collect_names(else_branch, names);
        },
    }
}
