use grammar::{
    parse, CancelFlag, Collection, CommentSkippingSource, Grammar, GrammarError, Outcome,
    ParseOptions, RationalLiteral, Rule, Sink, Slot, Source, TextSource,
};

fn tokens(source: &mut dyn Source) -> Vec<String> {
    let words = Collection::new();
    let token = (Grammar::range('0', '9').one_or_more() | Grammar::one_of("+-*/"))
        .save_text(Sink::collect(words.clone()));
    let stream = Grammar::space() + token.zero_or_more_ws() + Grammar::space() + Grammar::end_of_input();
    let outcome = parse(&stream, source, ParseOptions::default()).unwrap();
    assert!(outcome.matched);
    words.to_vec()
}

#[test]
fn comment_skipping_source_yields_same_tokens() {
    let plain = tokens(&mut TextSource::new("1 + 2"));
    let commented = tokens(&mut CommentSkippingSource::new("1 /* x */ + 2"));
    assert_eq!(plain, vec!["1", "+", "2"]);
    assert_eq!(commented, plain);
}

#[test]
fn line_comments_end_at_line_break() {
    let found = tokens(&mut CommentSkippingSource::new("// header\n12 // trailing\n* 3"));
    assert_eq!(found, vec!["12", "*", "3"]);
}

#[test]
fn cancelled_parse_reports_cancellation() {
    let flag = CancelFlag::new();
    flag.cancel();
    let mut source = TextSource::new("abc");
    let outcome = parse(
        &Grammar::literal("abc"),
        &mut source,
        ParseOptions::default().with_cancel(flag.clone()),
    )
    .unwrap();
    assert!(!outcome.matched);
    assert!(outcome.cancelled);

    flag.reset();
    let mut source = TextSource::new("abc");
    let outcome = parse(&Grammar::literal("abc"), &mut source, ParseOptions::default().with_cancel(flag)).unwrap();
    assert!(outcome.matched);
}

#[test]
fn cancel_flag_crosses_threads() {
    let flag = CancelFlag::new();
    let remote = flag.clone();
    std::thread::spawn(move || remote.cancel()).join().unwrap();
    assert!(flag.is_cancelled());
}

#[test]
fn deep_recursion_hits_limit() {
    let nested = Rule::declare("nested");
    nested
        .define(Grammar::char('(') + nested.grammar().optional() + ')')
        .unwrap();
    let input = "(".repeat(200);
    let mut source = TextSource::new(&input);
    let error = parse(&nested.grammar(), &mut source, ParseOptions::default().with_max_depth(100)).unwrap_err();
    assert!(matches!(error, GrammarError::RecursionLimit { limit: 100, .. }));
    assert_eq!(source.cursor().offset(), 0);
}

#[test]
fn trace_follows_nesting() {
    let grammar = Grammar::literal("a") | Grammar::literal("b");
    let mut source = TextSource::new("b");
    let outcome = parse(&grammar, &mut source, ParseOptions::default().with_trace(true)).unwrap();
    let trace = outcome.trace.unwrap();
    let lines: Vec<(usize, Outcome, &str)> = trace
        .events()
        .iter()
        .map(|event| (event.depth, event.outcome, event.label.as_str()))
        .collect();
    assert_eq!(
        lines,
        vec![
            (0, Outcome::Attempt, "(\"a\" | \"b\")"),
            (1, Outcome::Attempt, "\"a\""),
            (1, Outcome::Failed, "\"a\""),
            (1, Outcome::Attempt, "\"b\""),
            (1, Outcome::Matched, "\"b\""),
            (0, Outcome::Matched, "(\"a\" | \"b\")"),
        ]
    );
    assert!(trace.to_string().contains("  + \"b\" @ line 1, column 2 [b|]"));
}

#[test]
fn trace_hides_lookahead() {
    let grammar = !Grammar::char('x') + Grammar::any();
    let mut source = TextSource::new("y");
    let outcome = parse(&grammar, &mut source, ParseOptions::default().with_trace(true)).unwrap();
    let trace = outcome.trace.unwrap();
    assert!(trace.events().iter().all(|event| event.label != "'x'"));
    assert!(trace.events().iter().any(|event| event.label == "!'x'"));
}

#[test]
fn furthest_failure_points_at_problem() {
    let number = RationalLiteral::<f64>::new(Sink::discard()).grammar();
    let grammar = number.clone() >> Grammar::char('+') >> number + Grammar::end_of_input();
    let mut source = TextSource::new("12 + 3 4");
    let outcome = parse(&grammar, &mut source, ParseOptions::default()).unwrap();
    assert!(!outcome.matched);
    assert_eq!(outcome.furthest.offset(), 6);
    assert_eq!(outcome.furthest.column(), 6);
}

#[test]
fn committed_captures_survive_later_failures() {
    let slot = Slot::new();
    let grammar = Grammar::any().save_char(Sink::slot(slot.clone()));
    assert!(grammar.matches_str("k").unwrap());
    assert!(!grammar.matches_str("").unwrap());
    assert_eq!(slot.get(), Some('k'));
}
