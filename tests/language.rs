use std::fs;

use vexl::{
    Context, EPSILON, Expression, LookupError, ParseError, Value, evaluate,
    interpreter::{lexer::Tokenizer, parser::core::MAX_NESTING},
};
use walkdir::WalkDir;

#[test]
fn guide_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("docs").into_iter()
                            .filter_map(Result::ok)
                            .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (source, expected) in extract_examples(&content) {
            count += 1;
            let want = evaluate(&expected, &[]).unwrap_or_else(|e| {
                                                   panic!("Expected value `{expected}' in \
                                                           {path:?} failed: {e}")
                                               });
            assert_value(&source, want.as_slice());
        }
    }

    assert!(count > 0, "No vexl examples found in docs");
}

/// Collects `expression => expected` lines from ```vexl blocks.
fn extract_examples(content: &str) -> Vec<(String, String)> {
    let mut examples = Vec::new();
    let mut inside = false;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```vexl") {
            inside = true;
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            continue;
        }
        if inside && let Some((source, expected)) = trimmed.split_once("=>") {
            examples.push((source.trim().to_string(), expected.trim().to_string()));
        }
    }

    examples
}

fn assert_value(src: &str, expected: &[f64]) {
    assert_value_in(src, &Context::new(), expected);
}

fn assert_value_in(src: &str, context: &Context, expected: &[f64]) {
    let value = match evaluate(src, &[context]) {
        Ok(value) => value,
        Err(e) => panic!("Expression `{src}' failed: {e}"),
    };

    let close = value.size() == expected.len()
                && value.iter().zip(expected).all(|(a, b)| (a - b).abs() < EPSILON);
    assert!(close, "Expression `{src}' gave {value}, expected {}", Value::from(expected));
}

fn assert_failure(src: &str) {
    if let Ok(value) = evaluate(src, &[]) {
        panic!("Expression `{src}' gave {value} but was expected to fail")
    }
}

#[test]
fn precedence_and_associativity() {
    assert_value("2 + 3 * 4", &[14.0]);
    assert_value("(2 + 3) * 4", &[20.0]);
    assert_value("10 - 4 - 3", &[3.0]);
    assert_value("16 / 4 / 2", &[2.0]);
    assert_value("2 ** 3 ** 2", &[512.0]);
    assert_value("2 ^ 3", &[8.0]);
    assert_value("-2 ** 2", &[-4.0]);
    assert_value("2 ** -1", &[0.5]);
    assert_value("-3 * 2", &[-6.0]);
    assert_value("7 % 4", &[3.0]);
    assert_value("1 + 2 > 2", &[1.0]);
    assert_value("1 < 2 == 1", &[1.0]);
    assert_value("0 || 1 && 0", &[0.0]);
}

#[test]
fn numeric_literals() {
    assert_value("1.5", &[1.5]);
    assert_value(".25 * 4", &[1.0]);
    assert_value("1e3", &[1000.0]);
    assert_value("2.5E-1", &[0.25]);
}

#[test]
fn blank_input_is_zero() {
    assert_value("", &[0.0]);
    assert_value("   \t", &[0.0]);
}

#[test]
fn broadcasting_folds_over_the_shorter_operand() {
    assert_value("[1, 2, 3] + [10, 20]", &[32.0, 34.0, 36.0]);
    assert_value("[10, 20] + [1, 2, 3]", &[32.0, 34.0, 36.0]);
    assert_value("[1, 2, 3] * 2", &[2.0, 4.0, 6.0]);
    assert_value("[10, 20] - 1", &[9.0, 19.0]);
    assert_value("[4, 8] / 2", &[2.0, 4.0]);
    assert_value("1 - [1, 2]", &[-1.0]);
}

#[test]
fn empty_second_operand_folds_to_zero() {
    assert_value("[1, 2] - []", &[0.0, 0.0]);
    assert_value("[1, 2] > []", &[0.0, 0.0]);
    assert_value("[] - [1, 2]", &[]);
}

#[test]
fn relational_operators_require_every_element() {
    assert_value("[1, 5] > [2, 3]", &[0.0, 1.0]);
    assert_value("2 >= [1, 2]", &[1.0]);
    assert_value("2 > [1, 2]", &[0.0]);
    assert_value("[1, 2, 3] == 2", &[0.0, 1.0, 0.0]);
    assert_value("3 <= 3", &[1.0]);
}

#[test]
fn logic_and_unary_operators() {
    assert_value("1 && 0", &[0.0]);
    assert_value("1 || 0", &[1.0]);
    assert_value("!0", &[1.0]);
    assert_value("![0, 2]", &[1.0, 0.0]);
    assert_value("~0", &[-1.0]);
    assert_value("+3", &[3.0]);
    assert_value("-[1, -2]", &[-1.0, 2.0]);
}

#[test]
fn ternary_selects_a_whole_branch() {
    assert_value("1 ? 2 : 3", &[2.0]);
    assert_value("0 ? 2 : 3", &[3.0]);
    assert_value("[1, 0] ? 1 : [4, 5]", &[4.0, 5.0]);
    assert_value("[1, 1] ? [1, 2] : 0", &[1.0, 2.0]);
    assert_value("0 ? 1 : 0 ? 2 : 3", &[3.0]);
    assert_value("1 ? 0 ? 1 : 2 : 3", &[2.0]);
    assert_value("0 ? 1 : 2 + 3", &[5.0]);
}

#[test]
fn ranges_and_vectors() {
    assert_value("1..4", &[1.0, 2.0, 3.0, 4.0]);
    assert_value("3..1", &[3.0, 2.0, 1.0]);
    assert_value("[]", &[]);
    assert_value("[1, [2, 3], 4]", &[1.0, 2.0, 3.0, 4.0]);
    assert_value("[0..2, 9]", &[0.0, 1.0, 2.0, 9.0]);
}

#[test]
fn oversized_ranges_are_empty() {
    assert_value("0..1e10", &[]);
    assert_value("1e10..0", &[]);
    assert_value("sum(0..1000)", &[500_500.0]);
}

#[test]
fn indexing_and_slicing() {
    assert_value("[7, 8, 9][0]", &[7.0]);
    assert_value("[7, 8, 9][-1]", &[9.0]);
    assert_value("[7, 8, 9][0..1]", &[7.0, 8.0]);
    assert_value("[7, 8, 9][2..0]", &[9.0, 8.0, 7.0]);
    assert_value("[7, 8, 9][2, 0]", &[9.0, 7.0]);
    assert_value("[7, 8, 9][[1, 1]]", &[8.0, 8.0]);
    assert_value("[7, 8, 9][1.9]", &[8.0]);
    assert_value("[][0]", &[]);
    assert_value("(1..5)[1..2]", &[2.0, 3.0]);
}

#[test]
fn builtin_functions() {
    assert_value("min(1, 2, 3)", &[1.0]);
    assert_value("max([1, 5], 3)", &[5.0]);
    assert_value("sum([1, 2, 3])", &[6.0]);
    assert_value("product(2, [3, 4])", &[24.0]);
    assert_value("min()", &[0.0]);
    assert_value("sqrt(16)", &[4.0]);
    assert_value("sqrt([4, 9])", &[2.0, 3.0]);
    assert_value("abs(-3)", &[3.0]);
    assert_value("round(2.5)", &[2.0]);
    assert_value("floor(-1.5)", &[-2.0]);
    assert_value("ceil(1.2)", &[2.0]);
    assert_value("sign([-4, 0, 2])", &[-1.0, 0.0, 1.0]);
    assert_value("sin(0)", &[0.0]);
    assert_value("cos(0)", &[1.0]);
    assert_value("atan2(0, 1)", &[0.0]);
    assert_value("pow(2, 10)", &[1024.0]);
    assert_value("ln(e)", &[1.0]);
    assert_value("log10(1000)", &[3.0]);
}

#[test]
fn function_names_are_case_insensitive() {
    assert_value("MIN(3, 1)", &[1.0]);
    assert_value("Sqrt(9)", &[3.0]);
}

#[test]
fn constants() {
    assert_value("pi", &[std::f64::consts::PI]);
    assert_value("PI / 2", &[std::f64::consts::FRAC_PI_2]);
    assert_value("E", &[std::f64::consts::E]);
}

#[test]
fn constants_can_be_overridden() {
    let context = Context::new().with("pi", 3.0);
    assert_value_in("pi * 2", &context, &[6.0]);
}

#[test]
fn unknown_identifiers_read_as_zero() {
    assert_value("x + 1", &[1.0]);
    assert_value("a.b.c * 3", &[0.0]);
}

#[test]
fn indexing_variables() {
    let context = Context::new().with("a", [7.0, 8.0, 9.0]);

    assert_value_in("a[0]", &context, &[7.0]);
    assert_value_in("a[-1]", &context, &[9.0]);
    assert_value_in("a[0..1]", &context, &[7.0, 8.0]);
    assert_value_in("a[1..-1] * 2", &context, &[16.0, 18.0]);
}

#[test]
fn deep_nesting_is_a_parse_error() {
    for source in [format!("{}1", "-".repeat(10_000)),
                   "(".repeat(10_000),
                   format!("{}1{}", "[".repeat(10_000), "]".repeat(10_000)),
                   format!("{}1", "2 ** ".repeat(10_000)),
                   format!("{}1{}", "sin(".repeat(10_000), ")".repeat(10_000))]
    {
        let err = Expression::parse(&source).unwrap_err();
        assert!(matches!(err, ParseError::NestingTooDeep { limit: MAX_NESTING, .. }));
    }

    let nested = format!("{}1{}", "(".repeat(100), ")".repeat(100));
    assert_value(&nested, &[1.0]);
}

#[test]
fn only_lexer_whitespace_is_skipped() {
    let mut tokens = Tokenizer::new("1\u{a0}");

    tokens.next().unwrap();
    assert!(!tokens.at_end());
    assert_eq!(tokens.remaining(), "\u{a0}");
    assert!(tokens.next().is_err());

    assert!(matches!(Expression::parse("1 \u{a0}").unwrap_err(),
                     ParseError::UnexpectedCharacter { character: '\u{a0}', .. }));
}

#[test]
fn syntax_errors() {
    assert_failure("1 +");
    assert_failure("(1");
    assert_failure("(1, 2)");
    assert_failure("()");
    assert_failure(")");
    assert_failure("1 2");
    assert_failure("x y");
    assert_failure("1 )");
    assert_failure("[1, 2");
    assert_failure("[1 2]");
    assert_failure("1 ? 2");
    assert_failure("a ! b");
    assert_failure("a ~ b");
}

#[test]
fn lexical_errors() {
    assert_failure("1 = 2");
    assert_failure("1 & 2");
    assert_failure("1 | 2");
    assert_failure("1 $ 2");
    assert_failure("1.2.3");
}

#[test]
fn runtime_errors() {
    assert_failure("[7, 8, 9][3]");
    assert_failure("[7, 8, 9][-4]");
    assert_failure("[7, 8, 9][0..5]");
    assert_failure("[1, 2][1 / 0]");
}

#[test]
fn unknown_function_is_a_lookup_error() {
    let err = Expression::parse("nope(1)").unwrap_err();

    assert!(matches!(err,
                     ParseError::Lookup { error: LookupError::UnknownFunction { ref name, arity: 1 },
                                          .. } if name == "nope"));
}

#[test]
fn wrong_arity_is_a_lookup_error() {
    let err = Expression::parse("sin(1, 2)").unwrap_err();

    match err {
        ParseError::Lookup { error: LookupError::ArityMismatch { name, arity, accepted },
                             .. } => {
            assert_eq!(name, "sin");
            assert_eq!(arity, 2);
            assert_eq!(accepted, vec![1]);
        },
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn errors_carry_the_remaining_input() {
    let err = Expression::parse("1 + 2 )").unwrap_err();
    assert_eq!(err.remaining(), ")");

    let err = Expression::parse("2 * $x").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedCharacter { character: '$', .. }));
    assert_eq!(err.remaining(), "$x");

    let err = Expression::parse("1 +").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedEndOfInput { .. }));
}
