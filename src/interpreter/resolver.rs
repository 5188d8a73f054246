use crate::{
    ResolveOptions,
    error::TemplateError,
    interpreter::{
        evaluator::core::{Context, Evaluator},
        preprocess::{apply_sugar, normalize},
        security::vet_template,
        template::parse_template,
        value::core::Value,
    },
};

/// Resolves one template string against a context.
///
/// The pipeline runs in a fixed order: normalization, the option-gated
/// sugar rewrites, template splitting and parsing, the security gate, and
/// finally evaluation. Each stage's failure maps into [`TemplateError`]
/// through its `From` impl, so callers see one error type with the stage
/// preserved as the variant.
///
/// # Parameters
/// - `text`: The raw template text.
/// - `context`: The data to resolve against.
/// - `options`: Toggles for the sugar rewrites.
///
/// # Errors
/// Returns a `TemplateError` when parsing fails, the security gate rejects
/// the template, or evaluation hits a runtime error.
pub fn resolve_template(text: &str,
                        context: &Context,
                        options: &ResolveOptions)
                        -> Result<Value, TemplateError> {
    let normalized = normalize(text);
    let prepared = apply_sugar(&normalized, options);

    let template = parse_template(&prepared)?;
    vet_template(&template)?;

    let evaluator = Evaluator::new(context);
    Ok(evaluator.eval_template(&template, None)?)
}
