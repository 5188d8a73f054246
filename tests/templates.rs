use std::collections::HashMap;

use templex::{
    Context, ResolveOptions, TemplateError, Value,
    error::{ParseError, RuntimeError, SecurityError},
    resolve, resolve_value, resolve_with,
};

/// Builds the context shared by most tests: nested mappings, a sequence, a
/// string-keyed oddity, and a service function that reads the context it is
/// handed.
fn context() -> Context {
    let variables: HashMap<String, Value> =
        HashMap::from([("host".to_string(), "example.com".into()),
                       ("pathname".to_string(), "/users".into()),
                       ("port".to_string(), 8080i64.into()),
                       ("duration".to_string(), 0.1f64.into()),
                       ("input".to_string(),
                        vec![Value::Number(0.0), Value::Number(1.0), Value::Number(2.0)].into()),
                       ("#complexName".to_string(), "complex".into())]);

    let environment_variables: HashMap<String, Value> =
        HashMap::from([("a2".to_string(), Value::Number(2.0))]);
    let environment: HashMap<String, Value> =
        HashMap::from([("variables".to_string(), environment_variables.into())]);

    let services: HashMap<String, Value> =
        HashMap::from([("get".to_string(), Value::native(host_from_context)),
                       ("echo".to_string(),
                        Value::native(|args| {
                            Ok(args.first().cloned().unwrap_or(Value::Undefined))
                        })),
                       ("fail".to_string(),
                        Value::native(|_| Err(RuntimeError::native("service unavailable"))))]);

    Context::new().with("variables", Value::from(variables))
                  .with("environment", Value::from(environment))
                  .with("services", Value::from(services))
                  .with("keyVariable", "host")
                  .with("prefix", "a")
                  .with("current", 2i64)
}

/// Digs `variables.host` out of a context mapping argument. Reports a fixed
/// string when no context was passed, so tests can tell the two call shapes
/// apart.
fn host_from_context(args: &[Value]) -> Result<Value, RuntimeError> {
    let Some(Value::Mapping(bindings)) = args.first() else {
        return Ok(Value::Str("no context".to_string()));
    };
    let Some(Value::Mapping(variables)) = bindings.get("variables") else {
        return Ok(Value::Undefined);
    };
    Ok(variables.get("host").cloned().unwrap_or(Value::Undefined))
}

fn ok(template: &str) -> Value {
    match resolve(template, &context()) {
        Ok(value) => value,
        Err(e) => panic!("Template {template:?} failed: {e}"),
    }
}

fn fails(template: &str) -> TemplateError {
    match resolve(template, &context()) {
        Ok(value) => panic!("Template {template:?} succeeded with {value:?} but was expected to fail"),
        Err(e) => e,
    }
}

fn str_of(s: &str) -> Value {
    Value::Str(s.to_string())
}

#[test]
fn plain_text_passes_through() {
    assert_eq!(ok("plain text"), str_of("plain text"));
    assert_eq!(ok("cost: $5 {not an expression}"), str_of("cost: $5 {not an expression}"));
    assert_eq!(ok(""), str_of(""));
}

#[test]
fn single_expression_keeps_native_type() {
    assert_eq!(ok("${null}"), Value::Null);
    assert_eq!(ok("${true}"), Value::Bool(true));
    assert_eq!(ok("${false}"), Value::Bool(false));
    assert_eq!(ok("${0}"), Value::Number(0.0));
    assert_eq!(ok("${10.1}"), Value::Number(10.1));
    assert_eq!(ok("${.5}"), Value::Number(0.5));
    assert_eq!(ok("${'text'}"), str_of("text"));
    assert_eq!(ok("${variables.port}"), Value::Number(8080.0));
}

#[test]
fn radix_literals() {
    assert_eq!(ok("${0o10}"), Value::Number(8.0));
    assert_eq!(ok("${0x1F}"), Value::Number(31.0));
    assert_eq!(ok("${0b101}"), Value::Number(5.0));
}

#[test]
fn aggregate_literals() {
    assert_eq!(ok("${[1, 2, 3]}"),
               Value::from(vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)]));

    let Value::Mapping(object) = ok("${{key: 'value', 'quoted key': 1}}") else {
        panic!("expected a mapping");
    };
    assert_eq!(object.get("key"), Some(&str_of("value")));
    assert_eq!(object.get("quoted key"), Some(&Value::Number(1.0)));
}

#[test]
fn object_shorthand_desugars() {
    let Value::Mapping(object) = ok("${{variables}}") else {
        panic!("expected a mapping");
    };
    assert!(matches!(object.get("variables"), Some(Value::Mapping(_))));
}

#[test]
fn interpolation_concatenates_spans() {
    assert_eq!(ok("http://${variables.host}${variables.pathname}"),
               str_of("http://example.com/users"));
    assert_eq!(ok("PT${variables.duration}S"), str_of("PT0.1S"));
    assert_eq!(ok("port ${variables.port}!"), str_of("port 8080!"));
}

#[test]
fn adjacent_expressions_interpolate() {
    // Looks like one expression from the outer delimiters, but is two.
    assert_eq!(ok("${variables.host}${variables.pathname}"), str_of("example.com/users"));
}

#[test]
fn value_rendering_in_interpolation() {
    assert_eq!(ok("v=${variables.input}"), str_of("v=0,1,2"));
    assert_eq!(ok("v=${variables}"), str_of("v=[object Object]"));
    assert_eq!(ok("v=${null}"), str_of("v=null"));
    assert_eq!(ok("v=${true}"), str_of("v=true"));
    assert_eq!(ok("v=${services.echo}"), str_of("v=[function]"));
    // Undefined renders as nothing.
    assert_eq!(ok("x${variables.missing}y"), str_of("xy"));
}

#[test]
fn missing_data_resolves_to_undefined() {
    assert_eq!(ok("${missing}"), Value::Undefined);
    assert_eq!(ok("${variables.missing}"), Value::Undefined);
    assert_eq!(ok("${variables.missing.deeper.still}"), Value::Undefined);
    assert_eq!(ok("${variables.input[99]}"), Value::Undefined);
    assert_eq!(ok("${null.anything}"), Value::Undefined);
}

#[test]
fn member_access_forms() {
    assert_eq!(ok("${variables['#complexName']}"), str_of("complex"));
    assert_eq!(ok("${variables[keyVariable]}"), str_of("example.com"));
    assert_eq!(ok("${variables.input[1]}"), Value::Number(1.0));
    assert_eq!(ok("${variables.input.length}"), Value::Number(3.0));
    assert_eq!(ok("${variables.host.length}"), Value::Number(11.0));
    assert_eq!(ok("${variables.host[0]}"), str_of("e"));
}

#[test]
fn negative_index_reads_from_the_end() {
    assert_eq!(ok("${variables.input[-1]}"), Value::Number(2.0));
    assert_eq!(ok("${variables.input[-2]}"), Value::Number(1.0));
    assert_eq!(ok("${variables.input[-99]}"), Value::Number(0.0));
}

#[test]
fn negative_index_rewrite_can_be_disabled() {
    let options = ResolveOptions { transform_array_negative_index: false,
                                   ..ResolveOptions::default() };
    let value = resolve_with("${variables.input[-1]}", &context(), &options).unwrap();
    assert_eq!(value, Value::Undefined);
}

#[test]
fn negative_index_untouched_inside_strings() {
    assert_eq!(ok("${'a[-1]'}"), str_of("a[-1]"));
    assert_eq!(ok("xs[-1] stays ${'put'}"), str_of("xs[-1] stays put"));
}

#[test]
fn sequence_methods() {
    assert_eq!(ok("${variables.input.slice(1)}"),
               Value::from(vec![Value::Number(1.0), Value::Number(2.0)]));
    assert_eq!(ok("${variables.input.slice(-2)}"),
               Value::from(vec![Value::Number(1.0), Value::Number(2.0)]));
    assert_eq!(ok("${variables.input.slice(0, 2)}"),
               Value::from(vec![Value::Number(0.0), Value::Number(1.0)]));
    assert_eq!(ok("${variables.input.shift()}"), Value::Number(0.0));
}

#[test]
fn empty_index_is_a_parse_error() {
    let TemplateError::Parse(ParseError::EmptyIndex { .. }) = fails("${variables.input[]}")
    else {
        panic!("expected an empty-index parse error");
    };
}

#[test]
fn nested_template_string_builds_dynamic_keys() {
    assert_eq!(ok("${environment.variables[`${prefix}${current}`]}"), Value::Number(2.0));
}

#[test]
fn nested_template_with_single_span_keeps_native_type() {
    assert_eq!(ok("${`${variables.port}`}"), Value::Number(8080.0));
    assert_eq!(ok("${`literal`}"), str_of("literal"));
}

#[test]
fn bare_nested_delimiters_are_rejected() {
    assert!(matches!(fails("${variables[${keyVariable}]}"), TemplateError::Parse(_)));
}

#[test]
fn arithmetic_and_concatenation() {
    assert_eq!(ok("${1 + 2}"), Value::Number(3.0));
    assert_eq!(ok("${5 - 2}"), Value::Number(3.0));
    assert_eq!(ok("${'PT' + variables.duration + 'S'}"), str_of("PT0.1S"));
    assert_eq!(ok("${variables.host + ':' + variables.port}"), str_of("example.com:8080"));
}

#[test]
fn arithmetic_type_mismatch_fails() {
    assert!(matches!(fails("${1 + null}"),
                     TemplateError::Eval(RuntimeError::TypeMismatch { .. })));
    assert!(matches!(fails("${1 - 'x'}"),
                     TemplateError::Eval(RuntimeError::TypeMismatch { .. })));
    assert!(matches!(fails("${-'x'}"),
                     TemplateError::Eval(RuntimeError::TypeMismatch { .. })));
}

#[test]
fn unary_operators() {
    assert_eq!(ok("${-variables.port}"), Value::Number(-8080.0));
    assert_eq!(ok("${!variables.missing}"), Value::Bool(true));
    assert_eq!(ok("${!variables.host}"), Value::Bool(false));
}

#[test]
fn logic_operators_return_operands() {
    assert_eq!(ok("${variables.missing || ''}"), str_of(""));
    assert_eq!(ok("${variables.missing || 'fallback'}"), str_of("fallback"));
    assert_eq!(ok("${variables.host || 'fallback'}"), str_of("example.com"));
    assert_eq!(ok("${variables.host && variables.port}"), Value::Number(8080.0));
    assert_eq!(ok("${variables.missing && variables.port}"), Value::Undefined);
}

#[test]
fn equality_is_loose_between_null_and_undefined() {
    assert_eq!(ok("${variables.missing == null}"), Value::Bool(true));
    assert_eq!(ok("${null == null}"), Value::Bool(true));
    assert_eq!(ok("${null != variables.missing}"), Value::Bool(false));
    assert_eq!(ok("${0 == ''}"), Value::Bool(false));
    assert_eq!(ok("${variables.input == variables.input}"), Value::Bool(true));
}

#[test]
fn ternary_selects_on_truthiness() {
    assert_eq!(ok("${variables.host ? 'y' : 'n'}"), str_of("y"));
    assert_eq!(ok("${variables.missing ? 'y' : 'n'}"), str_of("n"));
    assert_eq!(ok("${'' ? 'y' : 'n'}"), str_of("n"));
    assert_eq!(ok("${[] ? 'y' : 'n'}"), str_of("y"));
    assert_eq!(ok("${variables.missing ? 1 : variables.missing ? 2 : 3}"), Value::Number(3.0));
}

#[test]
fn callables_resolve_and_receive_the_context() {
    assert_eq!(ok("${services.get}").kind(), "function");
    assert_eq!(ok("${services.get()}"), str_of("example.com"));
}

#[test]
fn implicit_context_rewrite_can_be_disabled() {
    let options = ResolveOptions { pass_context_to_empty_functions: false,
                                   ..ResolveOptions::default() };
    let value = resolve_with("${services.get()}", &context(), &options).unwrap();
    assert_eq!(value, str_of("no context"));
}

#[test]
fn call_arguments_evaluate_in_order() {
    assert_eq!(ok("${services.echo('hello')}"), str_of("hello"));
    assert_eq!(ok("${services.echo([1, 'a', true, null])}"),
               Value::from(vec![Value::Number(1.0),
                                str_of("a"),
                                Value::Bool(true),
                                Value::Null]));
    assert_eq!(ok("${services.echo({key: variables.port})}"),
               Value::from(HashMap::from([("key".to_string(), Value::Number(8080.0))])));
}

#[test]
fn native_failures_surface_as_eval_errors() {
    let err = fails("${services.fail()}");
    assert_eq!(err.to_string(), "Parser Error: service unavailable");
}

#[test]
fn calling_a_non_callable_fails() {
    assert!(matches!(fails("${variables.port(1)}"),
                     TemplateError::Eval(RuntimeError::CallTarget { .. })));
    assert!(matches!(fails("${variables.missing(1)}"),
                     TemplateError::Eval(RuntimeError::CallTarget { .. })));
}

#[test]
fn lambdas_resolve_to_callables() {
    assert_eq!(ok("${() => 'value'}").kind(), "function");
    assert_eq!(ok("${(test) => test}").kind(), "function");
    assert_eq!(ok("${(a, b) => { return a; }}").kind(), "function");
}

#[test]
fn lambdas_apply_inline() {
    assert_eq!(ok("${((x) => x + 1)(2)}"), Value::Number(3.0));
    assert_eq!(ok("${(x => x)('id')}"), str_of("id"));
    assert_eq!(ok("${((a, b) => a)(1)}"), Value::Number(1.0));
    // A parameter without an argument binds the undefined value.
    assert_eq!(ok("${((a, b) => b)(1)}"), Value::Undefined);
    assert_eq!(ok("${((x) => { return x; })('block')}"), str_of("block"));
}

#[test]
fn lambda_block_without_return_is_rejected() {
    assert!(matches!(fails("${(x) => { x }}"),
                     TemplateError::Parse(ParseError::MissingReturn { .. })));
}

#[test]
fn security_gate_rejects_module_imports() {
    let err = fails("${require('fs')}");
    assert_eq!(err, TemplateError::Security(SecurityError::ModuleImport));
    assert_eq!(err.to_string(), "Insecure module import");

    assert_eq!(fails("${import}"), TemplateError::Security(SecurityError::ModuleImport));
    // Module findings take precedence over everything else.
    assert_eq!(fails("${global.require}"),
               TemplateError::Security(SecurityError::ModuleImport));
}

#[test]
fn security_gate_aggregates_findings() {
    let err = fails("${global.process}");
    assert_eq!(err.to_string(), "Security problems detected: global, process");

    assert!(fails("${variables.constructor}").to_string().contains("constructor"));
    assert!(matches!(fails("${variables['__proto__']}"), TemplateError::Security(_)));
    // The gate recurses into nested templates and lambda bodies.
    assert!(matches!(fails("${`${eval}`}"), TemplateError::Security(_)));
    assert!(matches!(fails("${() => globalThis}"), TemplateError::Security(_)));
}

#[test]
fn security_gate_is_static() {
    // The offending reference sits in a branch evaluation would never take;
    // the gate rejects it anyway.
    assert_eq!(fails("${true ? 'safe' : require('x')}"),
               TemplateError::Security(SecurityError::ModuleImport));
}

#[test]
fn whitespace_normalizes_before_parsing() {
    assert_eq!(ok("${ variables.port }"), Value::Number(8080.0));
    assert_eq!(ok("${ 1 +\n 2 }"), Value::Number(3.0));
    assert_eq!(ok("  trimmed  "), str_of("trimmed"));
    assert_eq!(ok("line1\n\nline2"), str_of("line1 line2"));
}

#[test]
fn empty_expression_is_rejected() {
    assert!(matches!(fails("${}"),
                     TemplateError::Parse(ParseError::EmptyExpression { .. })));
    assert!(matches!(fails("a${ }b"),
                     TemplateError::Parse(ParseError::EmptyExpression { .. })));
}

#[test]
fn unterminated_expression_is_rejected() {
    assert!(matches!(fails("a${variables.host"), TemplateError::Parse(_)));
}

#[test]
fn parse_errors_carry_the_resolver_prefix() {
    let err = fails("${1 +}");
    assert!(err.to_string().starts_with("Parser Error: "), "got: {err}");
}

#[test]
fn resolve_value_only_touches_strings() {
    let ctx = context();
    assert_eq!(resolve_value(&str_of("p=${variables.port}"), &ctx).unwrap(), str_of("p=8080"));
    assert_eq!(resolve_value(&Value::Number(7.0), &ctx).unwrap(), Value::Number(7.0));
    assert_eq!(resolve_value(&Value::Null, &ctx).unwrap(), Value::Null);
}

#[test]
fn string_escapes() {
    assert_eq!(ok(r"${'it\'s'}"), str_of("it's"));
    assert_eq!(ok(r#"${"a\tb"}"#), str_of("a\tb"));
}

#[test]
fn long_adversarial_input_resolves_quickly() {
    let long = "_________________/".repeat(100);
    let started = std::time::Instant::now();
    let value = resolve(&long, &context()).unwrap();
    assert_eq!(value, Value::Str(long));
    assert!(started.elapsed() < std::time::Duration::from_millis(50));
}
