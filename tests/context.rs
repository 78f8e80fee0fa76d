use std::{sync::Arc, thread};

use vexl::{
    Binding, ConversionFallback, Context, ContextItem, EvalOptions, Expression, Function, Members,
    Registry, RuntimeError, Value,
};

fn eval(src: &str, layers: &[&Context]) -> Value {
    Expression::parse(src).unwrap_or_else(|e| panic!("Expression `{src}' failed to parse: {e}"))
                          .evaluate(layers)
                          .unwrap_or_else(|e| panic!("Expression `{src}' failed: {e}"))
}

fn eval_err(src: &str, layers: &[&Context], options: &EvalOptions) -> RuntimeError {
    match Expression::parse(src).unwrap().evaluate_with(layers, options) {
        Ok(value) => panic!("Expression `{src}' gave {value} but was expected to fail"),
        Err(e) => e,
    }
}

fn unknowns(src: &str, layers: &[&Context]) -> Vec<String> {
    Expression::parse(src).unwrap()
                          .resolve_unknowns(layers)
                          .into_iter()
                          .collect()
}

struct Joint {
    angle:   f64,
    members: Context,
}

impl ContextItem for Joint {
    fn value(&self) -> Value {
        Value::scalar(self.angle)
    }

    fn members(&self) -> Option<&Context> {
        Some(&self.members)
    }
}

#[test]
fn plain_bindings() {
    let context = Context::new().with("x", 2.0)
                                .with("n", 3)
                                .with("flag", true)
                                .with("v", [1.0, 2.0])
                                .with("t", " 4.5 ");

    assert_eq!(eval("x * n", &[&context]), Value::scalar(6.0));
    assert_eq!(eval("flag", &[&context]), Value::scalar(1.0));
    assert_eq!(eval("v * x", &[&context]), Value::from([2.0, 4.0]));
    assert_eq!(eval("t + 1", &[&context]), Value::scalar(5.5));
}

#[test]
fn later_layers_override_earlier_ones() {
    let base = Context::new().with("x", 1.0).with("y", 10.0);
    let over = Context::new().with("x", 2.0);

    assert_eq!(eval("x + y", &[&base, &over]), Value::scalar(12.0));
    assert_eq!(eval("x + y", &[&over, &base]), Value::scalar(11.0));
}

#[test]
fn dotted_paths_descend_into_members() {
    let wrist = Members::new(0.25).with("limit", 1.5);
    let arm = Members::new(Value::from([1.0, 2.0])).with("length", 0.5)
                                                   .with("wrist", wrist);
    let context = Context::new().with("arm", arm);

    assert_eq!(eval("arm", &[&context]), Value::from([1.0, 2.0]));
    assert_eq!(eval("arm.length * 4", &[&context]), Value::scalar(2.0));
    assert_eq!(eval("arm.wrist + arm.wrist.limit", &[&context]), Value::scalar(1.75));
    assert_eq!(eval("arm.missing", &[&context]), Value::scalar(0.0));
}

#[test]
fn custom_context_items() {
    let joint = Joint { angle:   0.5,
                        members: Context::new().with("offset", 2.0), };
    let context = Context::new().with_item("joint", joint);

    assert_eq!(eval("joint + joint.offset", &[&context]), Value::scalar(2.5));
    assert_eq!(unknowns("joint.offset + joint.nothing", &[&context]), ["joint"]);
}

#[test]
fn paths_through_plain_values_do_not_resolve() {
    let context = Context::new().with("x", 3.0);

    assert_eq!(eval("x.y", &[&context]), Value::scalar(0.0));
    assert_eq!(unknowns("x.y + x", &[&context]), ["x"]);
}

#[test]
fn quoted_identifiers() {
    let context = Context::new().with("upper arm", 2.0).with("a.b", 5.0);

    assert_eq!(eval("{upper arm} * 3", &[&context]), Value::scalar(6.0));
    assert_eq!(eval("{a.b}", &[&context]), Value::scalar(5.0));
}

#[test]
fn unknown_analysis() {
    let context = Context::new().with("z", 1.0);

    assert_eq!(unknowns("x + y.z", &[]), ["x", "y"]);
    assert_eq!(unknowns("b + a + b * z", &[&context]), ["a", "b"]);
    assert!(unknowns("pi * e * z", &[&context]).is_empty());
    assert!(Expression::parse("z + 1").unwrap().validate_variables(&[&context]));
    assert!(!Expression::parse("w + 1").unwrap().validate_variables(&[&context]));
}

#[test]
fn unknown_analysis_follows_bound_expressions() {
    let context = Context::new().with("a", Expression::parse("b * 2").unwrap())
                                .with("b", Expression::parse("c + d").unwrap())
                                .with("d", 1.0);

    assert_eq!(unknowns("a + x", &[&context]), ["c", "x"]);
}

#[test]
fn strict_mode_rejects_unknowns() {
    let context = Context::new().with("x", 1.0);
    let strict = EvalOptions::default().strict(true);

    assert_eq!(eval_err("x + y + w", &[&context], &strict),
               RuntimeError::UnresolvedIdentifiers { names: vec!["w".to_string(),
                                                                 "y".to_string()] });

    let value = Expression::parse("x + pi").unwrap()
                                           .evaluate_with(&[&context], &strict)
                                           .unwrap();
    assert_eq!(value, Value::scalar(1.0 + std::f64::consts::PI));
}

#[test]
fn bound_expressions_are_evaluated_in_the_same_scope() {
    let context = Context::new().with("radius", 2.0)
                                .with("area", Expression::parse("pi * radius ** 2").unwrap());

    let value = eval("area / pi", &[&context]);
    assert!((value.first().unwrap() - 4.0).abs() < vexl::EPSILON);

    let shared = Arc::new(Expression::parse("radius * 2").unwrap());
    let context = Context::new().with("radius", 3.0)
                                .with("d1", Arc::clone(&shared))
                                .with("d2", shared);
    assert_eq!(eval("d1 + d2", &[&context]), Value::scalar(12.0));
}

#[test]
fn cyclic_references_are_errors() {
    let context = Context::new().with("a", Expression::parse("b + 1").unwrap())
                                .with("b", Expression::parse("a + 1").unwrap());

    let err = eval_err("a", &[&context], &EvalOptions::default());
    assert!(matches!(err, RuntimeError::CyclicReference { .. }));

    let itself = Context::new().with("x", Expression::parse("x * 2").unwrap());
    let err = eval_err("x", &[&itself], &EvalOptions::default());
    assert_eq!(err, RuntimeError::CyclicReference { name: "x".to_string() });
}

#[test]
fn unknown_analysis_terminates_on_cycles() {
    let context = Context::new().with("a", Expression::parse("b + y").unwrap())
                                .with("b", Expression::parse("a").unwrap());

    assert_eq!(unknowns("a", &[&context]), ["y"]);
    assert_eq!(unknowns("a + b", &[&context]), ["y"]);

    let strict = EvalOptions::default().strict(true);
    assert_eq!(eval_err("a", &[&context], &strict),
               RuntimeError::UnresolvedIdentifiers { names: vec!["y".to_string()] });

    let bound = Context::new().with("a", Expression::parse("b + 1").unwrap())
                              .with("b", Expression::parse("a").unwrap());
    assert!(unknowns("a", &[&bound]).is_empty());
    assert!(matches!(eval_err("a", &[&bound], &strict), RuntimeError::CyclicReference { .. }));
}

#[test]
fn nesting_deeper_than_the_limit_is_an_error() {
    let mut context = Context::new().with("v0", 1.0);
    for i in 1..=10 {
        context.insert(format!("v{i}"),
                       Expression::parse(&format!("v{} + 1", i - 1)).unwrap());
    }

    assert_eq!(eval("v10", &[&context]), Value::scalar(11.0));

    let shallow = EvalOptions::default().max_depth(5);
    assert_eq!(eval_err("v10", &[&context], &shallow),
               RuntimeError::RecursionLimit { limit: 5 });

    let value = Expression::parse("v5").unwrap()
                                       .evaluate_with(&[&context], &shallow)
                                       .unwrap();
    assert_eq!(value, Value::scalar(6.0));
}

#[test]
fn text_that_is_not_a_number() {
    let context = Context::new().with("name", "left arm");

    let err = eval_err("name + 1", &[&context], &EvalOptions::default());
    assert_eq!(err,
               RuntimeError::TypeConversion { name:  "name".to_string(),
                                              value: "left arm".to_string(), });

    let lenient = EvalOptions::default().conversion(ConversionFallback::Zero);
    let value = Expression::parse("name + 1").unwrap()
                                             .evaluate_with(&[&context], &lenient)
                                             .unwrap();
    assert_eq!(value, Value::scalar(1.0));
}

#[test]
fn evaluation_is_repeatable() {
    let expr = Expression::parse("sum(v) * k").unwrap();
    let first = Context::new().with("v", [1.0, 2.0]).with("k", 2.0);
    let second = Context::new().with("v", [3.0]).with("k", 0.5);

    assert_eq!(expr.evaluate(&[&first]).unwrap(), Value::scalar(6.0));
    assert_eq!(expr.evaluate(&[&second]).unwrap(), Value::scalar(1.5));
    assert_eq!(expr.evaluate(&[&first]).unwrap(), Value::scalar(6.0));
}

#[test]
fn parsing_is_deterministic() {
    let source = "a[1..2] + max(b, 3) * -c ? [1, 2] : sin(d)";

    let a = Expression::parse(source).unwrap();
    let b = Expression::parse(source).unwrap();
    assert_eq!(a.instructions(), b.instructions());
    assert_eq!(a, b);
}

#[test]
fn reparse_keeps_the_old_program_on_failure() {
    let context = Context::new().with("x", 2.0);
    let mut expr = Expression::parse("x * 2").unwrap();

    assert!(expr.reparse("x *").is_err());
    assert_eq!(expr.text(), "x * 2");
    assert_eq!(expr.evaluate(&[&context]).unwrap(), Value::scalar(4.0));

    expr.reparse("x + 10").unwrap();
    assert_eq!(expr.to_string(), "x + 10");
    assert_eq!(expr.evaluate(&[&context]).unwrap(), Value::scalar(12.0));
}

#[test]
fn default_expression_is_zero() {
    let expr = Expression::default();

    assert_eq!(expr.text(), "");
    assert_eq!(expr.evaluate(&[]).unwrap(), Value::scalar(0.0));
}

#[test]
fn from_str_parses() {
    let expr: Expression = "1 + 2".parse().unwrap();
    assert_eq!(expr.evaluate(&[]).unwrap(), Value::scalar(3.0));

    assert!("1 +".parse::<Expression>().is_err());
}

fn clamp(args: &[Value]) -> Value {
    let (v, lo, hi) = (&args[0], args[1].first().unwrap_or(0.0), args[2].first().unwrap_or(0.0));
    v.map(|x| x.clamp(lo, hi))
}

fn double(v: &Value) -> Value {
    v.map(|x| 2.0 * x)
}

fn half_sum(a: &Value, b: &Value) -> Value {
    a.broadcast(b, |x, y| x + y, |x, y| (x + y) / 2.0)
}

#[test]
fn custom_registry_functions() {
    let mut registry = Registry::with_builtins();
    registry.register("double", Function::Unary(double))
            .register("double", Function::Binary(half_sum))
            .register("clamp", Function::Variadic(clamp));

    let expr = Expression::parse_with("clamp(double([1, 4]), 0, 5)", &registry).unwrap();
    assert_eq!(expr.evaluate(&[]).unwrap(), Value::from([2.0, 5.0]));

    let expr = Expression::parse_with("DOUBLE(4, 6)", &registry).unwrap();
    assert_eq!(expr.evaluate(&[]).unwrap(), Value::scalar(5.0));

    assert!(Expression::parse("double(1)").is_err());
    assert!(Expression::parse_with("double(1, 2, 3)", &registry).is_err());
}

#[test]
fn expressions_are_shared_between_threads() {
    let expr = Arc::new(Expression::parse("x * 2 + pi").unwrap());

    let handles = (0..4_u8).map(|i| {
                            let expr = Arc::clone(&expr);
                            thread::spawn(move || {
                                let context = Context::new().with("x", f64::from(i));
                                expr.evaluate(&[&context]).unwrap()
                            })
                        })
                        .collect::<Vec<_>>();

    for (i, handle) in handles.into_iter().enumerate() {
        let value = handle.join().unwrap();
        let expected = 2.0 * i as f64 + std::f64::consts::PI;
        assert_eq!(value, Value::scalar(expected));
    }
}

#[test]
fn bindings_can_be_inspected() {
    let context = Context::new().with("x", 1.0).with("v", vec![1.0, 2.0]);

    assert_eq!(context.len(), 2);
    assert!(context.contains("x"));
    assert!(matches!(context.get("v"), Some(Binding::Value(v)) if v.size() == 2));
    assert!(Context::constants().contains("pi"));

    let collected: Context = [("a", 1.0), ("b", 2.0)].into_iter().collect();
    assert_eq!(eval("a + b", &[&collected]), Value::scalar(3.0));
}
