use expression::{
    parse, parse_skipping_comments, BinaryOperator, Expression, ExpressionError, ExpressionGrammar,
    NAryExpression, UnaryOperator,
};
use grammar::{CancelFlag, Collection, Grammar, GrammarError, ParseOptions, Sink, TextSource};

fn shape(text: &str) -> String {
    parse(text).unwrap().to_string()
}

#[test]
fn tighter_operator_on_the_right() {
    let tree = parse("2 + 3 * 4").unwrap();
    assert_eq!(tree.to_string(), "Add(2, Mul(3, 4))");
    assert_eq!(tree.evaluate().unwrap(), 14.0);
}

#[test]
fn tighter_operator_on_the_left() {
    assert_eq!(shape("2 * 3 + 4"), "Add(Mul(2, 3), 4)");
}

#[test]
fn tighter_operator_in_the_middle() {
    let tree = parse("2 + 3 * 4 + 5").unwrap();
    assert_eq!(tree.to_string(), "Add(2, Add(Mul(3, 4), 5))");
    assert_eq!(tree.evaluate().unwrap(), 19.0);
}

#[test]
fn same_operator_run_is_one_node() {
    let tree = parse("1+2+3").unwrap();
    assert_eq!(tree.to_string(), "Add(1, 2, 3)");
    assert_eq!(tree.node_count(), 4);
}

#[test]
fn unary_not() {
    let tree = parse("!1").unwrap();
    assert_eq!(tree.to_string(), "BoolNot(1)");
    assert_eq!(tree.evaluate().unwrap(), 0.0);
}

#[test]
fn parentheses_override_precedence() {
    let tree = parse("(1+2)*3").unwrap();
    assert_eq!(tree.to_string(), "Mul(Add(1, 2), 3)");
    assert_eq!(tree.evaluate().unwrap(), 9.0);
}

#[test]
fn subtraction_stays_left_to_right() {
    let tree = parse("10 - 2 * 3 + 1").unwrap();
    assert_eq!(tree.to_string(), "Add(Sub(10, Mul(2, 3)), 1)");
    assert_eq!(tree.evaluate().unwrap(), 5.0);
}

#[test]
fn comparisons_and_logic() {
    let tree = parse("1 + 1 == 2 && 3 > 2 || 0").unwrap();
    assert_eq!(tree.to_string(), "Or(And(Eq(Add(1, 1), 2), Gt(3, 2)), 0)");
    assert_eq!(tree.evaluate().unwrap(), 1.0);
}

#[test]
fn rational_operands() {
    let tree = parse("1.5 * 2e1").unwrap();
    assert_eq!(tree.to_string(), "Mul(1.5, 20)");
    assert_eq!(tree.evaluate().unwrap(), 30.0);
}

#[test]
fn comments_are_skipped_on_request() {
    let text = "1 /* one */ + // two\n 2";
    assert_eq!(parse_skipping_comments(text).unwrap().to_string(), "Add(1, 2)");
    assert!(parse(text).is_err());
}

#[test]
fn failure_reports_furthest_position() {
    let error = parse("1 + * 2").unwrap_err();
    match error {
        ExpressionError::NoExpression { line, column, context } => {
            assert_eq!((line, column), (1, 5));
            assert!(context.contains('|'));
        }
        other => panic!("expected NoExpression, got {other:?}"),
    }
}

#[test]
fn failure_position_counts_lines() {
    let error = parse("1 +\n\n* 2").unwrap_err();
    assert!(matches!(error, ExpressionError::NoExpression { line: 3, column: 1, .. }));
}

#[test]
fn empty_input_is_no_expression() {
    assert!(matches!(parse("   "), Err(ExpressionError::NoExpression { .. })));
}

#[test]
fn unbalanced_parentheses_fail() {
    assert!(parse("(1 + 2").is_err());
    assert!(parse("1 + 2)").is_err());
}

#[test]
fn deep_parentheses_within_limit() {
    let depth = 40;
    let text = format!("{}7{}", "(".repeat(depth), ")".repeat(depth));
    let tree = parse(&text).unwrap();
    assert_eq!(tree, Expression::literal(7.0));
}

#[test]
fn deep_parentheses_on_worker_thread() {
    let depth = 450;
    let text = format!("{}7{}", "(".repeat(depth), ")".repeat(depth));
    let tree = std::thread::spawn(move || parse(&text))
        .join()
        .expect("worker thread finished")
        .unwrap();
    assert_eq!(tree, Expression::literal(7.0));
}

#[test]
fn deep_tree_walks_on_worker_thread() {
    let depth = 5_000;
    let (value, printed, nodes, height) = std::thread::spawn(move || {
        let mut tree = Expression::literal(1.0);
        for _ in 0..depth {
            tree = Expression::unary(UnaryOperator::BoolNot, tree);
        }
        (tree.evaluate(), tree.to_string(), tree.node_count(), tree.depth())
    })
    .join()
    .expect("worker thread finished");

    assert_eq!(value, Ok(1.0));
    assert!(printed.starts_with("BoolNot(BoolNot("));
    assert_eq!(printed.matches('(').count(), depth);
    assert_eq!(nodes, depth + 1);
    assert_eq!(height, depth + 1);
}

#[test]
fn deep_parentheses_past_default_limit() {
    let depth = 600;
    let text = format!("{}7{}", "(".repeat(depth), ")".repeat(depth));
    let error = std::thread::spawn(move || parse(&text))
        .join()
        .expect("worker thread finished")
        .unwrap_err();
    assert!(matches!(
        error,
        ExpressionError::Grammar(GrammarError::RecursionLimit { limit: 1024, .. })
    ));
}

#[test]
fn deep_parentheses_hit_configured_limit() {
    let depth = 40;
    let text = format!("{}7{}", "(".repeat(depth), ")".repeat(depth));
    let mut source = TextSource::new(&text);
    let error = ExpressionGrammar::new()
        .parse_source(&mut source, ParseOptions::default().with_max_depth(32))
        .unwrap_err();
    assert!(matches!(
        error,
        ExpressionError::Grammar(GrammarError::RecursionLimit { limit: 32, .. })
    ));
}

#[test]
fn cancelled_parse() {
    let flag = CancelFlag::new();
    flag.cancel();
    let mut source = TextSource::new("1 + 2");
    let error = ExpressionGrammar::new()
        .parse_source(&mut source, ParseOptions::default().with_cancel(flag))
        .unwrap_err();
    assert_eq!(error, ExpressionError::Cancelled);
}

#[test]
fn trace_names_front_end_steps() {
    let mut source = TextSource::new("!2");
    let (result, trace) = ExpressionGrammar::new()
        .parse_traced(&mut source, ParseOptions::default().with_trace(true));
    assert_eq!(result.unwrap().to_string(), "BoolNot(2)");
    let trace = trace.unwrap();
    let labels: Vec<&str> = trace.events().iter().map(|event| event.label.as_str()).collect();
    assert!(labels.contains(&"<n-ary expression>"));
    assert!(labels.contains(&"unary expression"));
}

#[test]
fn evaluation_errors_surface() {
    let tree = parse("1 / (2 - 2)").unwrap();
    assert_eq!(tree.evaluate(), Err(ExpressionError::DivisionByZero));
}

#[test]
fn production_embeds_in_larger_grammar() {
    let trees = Collection::new();
    let item = NAryExpression::new(Sink::collect(trees.clone())).grammar();
    let list = Grammar::char('[')
        >> (item.clone() >> (Grammar::char(',') >> item).zero_or_more_ws()).optional()
        >> Grammar::char(']');

    assert!(list.matches_str("[1 + 2, (3), 4 * 5 - 6]").unwrap());
    let printed: Vec<String> = trees.to_vec().iter().map(ToString::to_string).collect();
    assert_eq!(printed, vec!["Add(1, 2)", "3", "Sub(Mul(4, 5), 6)"]);
}

#[test]
fn tree_round_trips_through_json() {
    let tree = parse("!0 + 2 * (3 - 1)").unwrap();
    let json = serde_json::to_string(&tree).unwrap();
    let back: Expression = serde_json::from_str(&json).unwrap();
    assert_eq!(back, tree);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["NAry"]["operator"], "Add");
    assert_eq!(
        serde_json::to_value(BinaryOperator::Modulo).unwrap(),
        serde_json::json!("Modulo")
    );
}
