//! # Expression Front End
//!
//! Combinator grammar for arithmetic expressions, wired to the tree builder.
//!
//! ## Grammar
//!
//! ```text
//! Expression := Operand (Operator Operand)*
//! Operand    := Unary | '(' Expression ')'
//! Unary      := ['!'] Number
//! ```
//!
//! Whitespace may appear around operators and inside parentheses. Numbers
//! are rational literals, so `1.5e2` and `-3` are single operands.
//!
//! Terminals (operators, numbers, punctuation) are ordinary grammar nodes
//! whose captures land in private slots. The recursive part runs in Rust
//! under [`ParseContext::transaction`], so every nesting level keeps its own
//! operand and operator lists and a failed branch leaves nothing behind.

use crate::ast::Expression;
use crate::builder::TreeBuilder;
use crate::error::ExpressionError;
use crate::operator::{BinaryOperator, UnaryOperator};
use grammar::{
    CommentSkippingSource, Grammar, GrammarError, ParseContext, ParseOptions, ParseOutcome,
    Production, RationalLiteral, Sink, Slot, Source, TextSource, Trace,
};
use std::rc::Rc;
use tracing::{event, Level};

// =============================================================================
// N-ARY EXPRESSION PRODUCTION
// =============================================================================

/// Production matching one expression and saving its tree.
///
/// It does not consume surrounding whitespace or require end of input, so
/// it can be embedded in larger grammars.
///
/// ## Example
///
/// ```rust
/// use expression::NAryExpression;
/// use grammar::{Grammar, Sink, Slot};
///
/// let tree = Slot::new();
/// let call = Grammar::literal("eval")
///     >> Grammar::char('[')
///     >> NAryExpression::new(Sink::slot(tree.clone())).grammar()
///     >> Grammar::char(']');
/// assert!(call.matches_str("eval [ 1 + 2 ]").unwrap());
/// assert_eq!(tree.get().unwrap().to_string(), "Add(1, 2)");
/// ```
#[derive(Debug)]
pub struct NAryExpression {
    operator: Grammar,
    operator_text: Slot<String>,
    number: Grammar,
    number_value: Slot<f64>,
    bang: Grammar,
    open: Grammar,
    close: Grammar,
    sink: Sink<Expression>,
}

impl NAryExpression {
    /// Expression production saving its tree to `sink`.
    pub fn new(sink: Sink<Expression>) -> Self {
        let operator_text = Slot::new();
        let number_value = Slot::new();
        let operator = Grammar::choice(BinaryOperator::ALL.map(|op| Grammar::literal(op.symbol())))
            .save_text(Sink::slot(operator_text.clone()));
        let number = RationalLiteral::<f64>::new(Sink::slot(number_value.clone())).grammar();

        Self {
            operator,
            operator_text,
            number,
            number_value,
            bang: Grammar::char('!'),
            open: Grammar::char('('),
            close: Grammar::char(')'),
            sink,
        }
    }

    /// Grammar node running this production.
    pub fn grammar(self) -> Grammar {
        Grammar::production(self)
    }

    /// `Operand (Operator Operand)*`, folded into one tree.
    fn nary_expression(&self, ctx: &mut ParseContext<'_>) -> Result<Option<Expression>, GrammarError> {
        ctx.transaction(&"operand run", |ctx| {
            let Some(first) = self.operand(ctx)? else {
                return Ok(None);
            };
            let mut operands = vec![first];
            let mut operators = Vec::new();
            while let Some((operator, operand)) = self.operator_operand(ctx)? {
                operators.push(operator);
                operands.push(operand);
            }

            match TreeBuilder::build(operands, operators) {
                Ok(tree) => Ok(Some(tree)),
                Err(error) => {
                    event!(Level::WARN, error = %error, "operand run rejected");
                    Ok(None)
                }
            }
        })
    }

    /// One `Operator Operand` continuation, whitespace allowed around the
    /// operator.
    fn operator_operand(
        &self,
        ctx: &mut ParseContext<'_>,
    ) -> Result<Option<(BinaryOperator, Expression)>, GrammarError> {
        ctx.transaction(&"operator operand", |ctx| {
            ctx.skip_whitespace();
            if !ctx.attempt(&self.operator)? {
                return Ok(None);
            }
            let Some(operator) = self
                .operator_text
                .take()
                .as_deref()
                .and_then(BinaryOperator::from_symbol)
            else {
                return Ok(None);
            };
            ctx.skip_whitespace();
            Ok(self.operand(ctx)?.map(|operand| (operator, operand)))
        })
    }

    fn operand(&self, ctx: &mut ParseContext<'_>) -> Result<Option<Expression>, GrammarError> {
        if let Some(unary) = self.unary_expression(ctx)? {
            return Ok(Some(unary));
        }
        self.parenthesized_operand(ctx)
    }

    /// `['!'] Number`.
    fn unary_expression(&self, ctx: &mut ParseContext<'_>) -> Result<Option<Expression>, GrammarError> {
        ctx.transaction(&"unary expression", |ctx| {
            let negated = ctx.attempt(&self.bang)?;
            if !ctx.attempt(&self.number)? {
                return Ok(None);
            }
            let Some(value) = self.number_value.take() else {
                return Ok(None);
            };
            let literal = Expression::literal(value);
            Ok(Some(if negated {
                Expression::unary(UnaryOperator::BoolNot, literal)
            } else {
                literal
            }))
        })
    }

    /// `'(' Expression ')'`.
    fn parenthesized_operand(&self, ctx: &mut ParseContext<'_>) -> Result<Option<Expression>, GrammarError> {
        ctx.transaction(&"parenthesized operand", |ctx| {
            if !ctx.attempt(&self.open)? {
                return Ok(None);
            }
            ctx.skip_whitespace();
            let Some(inner) = self.nary_expression(ctx)? else {
                return Ok(None);
            };
            ctx.skip_whitespace();
            if !ctx.attempt(&self.close)? {
                return Ok(None);
            }
            Ok(Some(inner))
        })
    }
}

impl Production for NAryExpression {
    fn name(&self) -> &str {
        "n-ary expression"
    }

    fn matches(&self, ctx: &mut ParseContext<'_>) -> Result<bool, GrammarError> {
        match self.nary_expression(ctx)? {
            Some(tree) => {
                ctx.save(&self.sink, tree);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn detached(&self) -> Rc<dyn Production> {
        Rc::new(Self::new(Sink::discard()))
    }
}

// =============================================================================
// COMPLETE EXPRESSION GRAMMAR
// =============================================================================

/// Whole-input expression parser.
///
/// Accepts leading and trailing whitespace and requires the expression to
/// cover the rest of the input.
///
/// ## Example
///
/// ```rust
/// use expression::ExpressionGrammar;
///
/// let grammar = ExpressionGrammar::new();
/// let tree = grammar.parse(" (1 + 2) * 3 ").unwrap();
/// assert_eq!(tree.to_string(), "Mul(Add(1, 2), 3)");
/// assert!(grammar.parse("(1 + 2").is_err());
/// ```
#[derive(Debug)]
pub struct ExpressionGrammar {
    grammar: Grammar,
    output: Slot<Expression>,
}

impl Default for ExpressionGrammar {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionGrammar {
    /// Creates the grammar.
    pub fn new() -> Self {
        let output = Slot::new();
        let grammar = Grammar::space()
            + NAryExpression::new(Sink::slot(output.clone())).grammar()
            + Grammar::space()
            + Grammar::end_of_input();
        Self { grammar, output }
    }

    /// Underlying grammar value.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Parses `text` as one expression.
    pub fn parse(&self, text: &str) -> Result<Expression, ExpressionError> {
        let mut source = TextSource::new(text);
        self.parse_source(&mut source, ParseOptions::default())
    }

    /// Parses the rest of `source` as one expression.
    ///
    /// ## Parameters
    ///
    /// - `source`: Plain or comment-skipping reader
    /// - `options`: Trace, cancellation and depth settings
    pub fn parse_source(
        &self,
        source: &mut dyn Source,
        options: ParseOptions,
    ) -> Result<Expression, ExpressionError> {
        self.parse_traced(source, options).0
    }

    /// Like [`ExpressionGrammar::parse_source`], also returning the
    /// diagnostic trail when `options` enable it.
    pub fn parse_traced(
        &self,
        source: &mut dyn Source,
        options: ParseOptions,
    ) -> (Result<Expression, ExpressionError>, Option<Trace>) {
        self.output.clear();
        let outcome = match grammar::parse(&self.grammar, source, options) {
            Ok(outcome) => outcome,
            Err(error) => return (Err(error.into()), None),
        };

        let result = if outcome.cancelled {
            Err(ExpressionError::Cancelled)
        } else if outcome.matched {
            self.output.take().ok_or_else(|| no_expression(&outcome))
        } else {
            Err(no_expression(&outcome))
        };
        match &result {
            Ok(tree) => event!(Level::DEBUG, tree = %tree, "expression parsed"),
            Err(error) => event!(Level::DEBUG, error = %error, "no expression"),
        }
        (result, outcome.trace)
    }
}

fn no_expression(outcome: &ParseOutcome) -> ExpressionError {
    ExpressionError::NoExpression {
        line: outcome.furthest.line() + 1,
        column: outcome.furthest.column() + 1,
        context: outcome.furthest_context.clone(),
    }
}

// =============================================================================
// CONVENIENCE
// =============================================================================

/// Parses `text` as one expression.
///
/// ## Example
///
/// ```rust
/// let tree = expression::parse("2 + 3 * 4").unwrap();
/// assert_eq!(tree.to_string(), "Add(2, Mul(3, 4))");
/// ```
pub fn parse(text: &str) -> Result<Expression, ExpressionError> {
    ExpressionGrammar::new().parse(text)
}

/// Parses `text` as one expression, ignoring `//` and `/* */` comments.
pub fn parse_skipping_comments(text: &str) -> Result<Expression, ExpressionError> {
    let mut source = CommentSkippingSource::new(text);
    ExpressionGrammar::new().parse_source(&mut source, ParseOptions::default())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(text: &str) -> String {
        parse(text).unwrap().to_string()
    }

    #[test]
    fn test_single_number() {
        assert_eq!(shape("42"), "42");
        assert_eq!(shape("  1.5  "), "1.5");
    }

    #[test]
    fn test_longest_operator_wins() {
        assert_eq!(shape("1 <= 2"), "Le(1, 2)");
        assert_eq!(shape("1 != 2"), "Ne(1, 2)");
        assert_eq!(shape("1<2"), "Lt(1, 2)");
    }

    #[test]
    fn test_signed_operand() {
        assert_eq!(shape("1 - -2"), "Sub(1, -2)");
    }

    #[test]
    fn test_bool_not_needs_number() {
        assert_eq!(shape("!0"), "BoolNot(0)");
        assert!(parse("!(1)").is_err());
    }

    #[test]
    fn test_dangling_operator_fails() {
        let error = parse("2 +").unwrap_err();
        assert!(matches!(error, ExpressionError::NoExpression { line: 1, .. }));
    }

    #[test]
    fn test_grammar_reusable() {
        let grammar = ExpressionGrammar::new();
        assert_eq!(grammar.parse("1+2").unwrap().to_string(), "Add(1, 2)");
        assert!(grammar.parse(")").is_err());
        assert_eq!(grammar.parse("3*4").unwrap().to_string(), "Mul(3, 4)");
    }

    #[test]
    fn test_detached_production_discards() {
        let output = Slot::new();
        let grammar = NAryExpression::new(Sink::slot(output.clone())).grammar().detached();
        assert!(grammar.matches_str("1 + 2").unwrap());
        assert!(!output.is_set());
    }
}
