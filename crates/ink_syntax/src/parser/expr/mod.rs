//! Expression Parser
//!
//! 表达式解析：一元取反、单层二元运算、函数调用、match 表达式。
//! 原子之后只看一个 token 决定走哪条产生式。

pub mod atom;
pub mod literal;

use super::error::ParseResult;
use super::helpers::{current, delimited, descend, expect, peek, unexpected};
use super::pattern::parse_clauses;
use crate::ast::Node;
use crate::token::{Token, TokenKind};
use atom::parse_atom_at;

/// 解析一个完整表达式，返回节点和下一个未消费 token 的位置
///
/// 二元表达式的右操作数只能是原子：`a + b + c` 在这一层不被接受。
pub fn parse_expression(tokens: &[Token], pos: usize) -> ParseResult<(Node, usize)> {
    parse_expression_at(tokens, pos, 0)
}

/// 带嵌套深度的 [`parse_expression`]；所有递归都经过这里
pub(crate) fn parse_expression_at(
    tokens: &[Token],
    pos: usize,
    depth: usize,
) -> ParseResult<(Node, usize)> {
    let depth = descend(pos, depth)?;
    let tok = current(tokens, pos, "an expression")?;

    // 一元取反只作用于紧跟的一个原子，不叠加
    if tok.kind() == TokenKind::NegationOp {
        let (operand, next) = parse_atom_at(tokens, pos + 1, depth)?;
        return Ok((Node::unary(tok.clone(), operand), next));
    }

    let (atom, pos) = parse_atom_at(tokens, pos, depth)?;

    let Some(next) = peek(tokens, pos) else {
        return Ok((atom, pos));
    };

    match next.kind() {
        kind if kind.is_terminator() => Ok((atom, pos)),
        kind if kind.is_binary_op() => {
            let (right, after) = parse_atom_at(tokens, pos + 1, depth)?;
            Ok((Node::binary(next.clone(), atom, right), after))
        }
        TokenKind::LeftParen => parse_call(tokens, atom, pos, depth),
        TokenKind::MatchColon => parse_match(tokens, atom, pos, depth),
        _ => Err(unexpected(next, pos, "an operator, a call or the end of the expression")),
    }
}

/// callee ( args... )，`pos` 指向 '('
fn parse_call(
    tokens: &[Token],
    callee: Node,
    pos: usize,
    depth: usize,
) -> ParseResult<(Node, usize)> {
    let (arguments, next) = delimited(
        tokens,
        pos + 1,
        TokenKind::RightParen,
        "',' or ')'",
        |tokens, pos| parse_expression_at(tokens, pos, depth),
    )?;
    Ok((Node::call(callee, arguments), next))
}

/// subject : { clauses... }，`pos` 指向 ':'
fn parse_match(
    tokens: &[Token],
    subject: Node,
    pos: usize,
    depth: usize,
) -> ParseResult<(Node, usize)> {
    let pos = expect(tokens, pos + 1, TokenKind::LeftBrace, "'{' after ':'")?;
    let (clauses, next) = parse_clauses(tokens, pos, depth)?;
    Ok((
        Node::MatchExpr {
            subject: Box::new(subject),
            clauses,
        },
        next,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::MatchClause;
    use crate::parser::helpers::MAX_DEPTH;
    use crate::parser::ParseError;
    use TokenKind::*;

    fn op(kind: TokenKind) -> Token {
        Token::new(kind)
    }

    #[test]
    fn test_single_literals_consume_everything() {
        let cases = vec![
            (Token::number(42.0), Node::number(42.0)),
            (Token::string("hi"), Node::string("hi")),
            (op(TrueLiteral), Node::BooleanLiteral { value: true }),
            (op(FalseLiteral), Node::BooleanLiteral { value: false }),
            (op(NullLiteral), Node::NullLiteral),
            (Token::ident("a"), Node::ident("a")),
        ];
        for (tok, expected) in cases {
            let tokens = vec![tok];
            assert_eq!(parse_expression(&tokens, 0), Ok((expected, 1)));
        }
    }

    #[test]
    fn test_binary_expression() {
        let tokens = vec![Token::ident("a"), op(AddOp), Token::ident("b")];
        assert_eq!(
            parse_expression(&tokens, 0),
            Ok((
                Node::binary(op(AddOp), Node::ident("a"), Node::ident("b")),
                3
            ))
        );
    }

    #[test]
    fn test_every_binary_operator() {
        for kind in [
            AddOp, SubtractOp, MultiplyOp, DivideOp, ModulusOp, GreaterThanOp, LessThanOp,
            EqualOp, IsOp, DefineOp, AccessorOp,
        ] {
            let tokens = vec![Token::ident("l"), op(kind), Token::number(1.0)];
            let (node, next) = parse_expression(&tokens, 0).unwrap();
            assert_eq!(next, 3);
            assert_eq!(node, Node::binary(op(kind), Node::ident("l"), Node::number(1.0)));
        }
    }

    #[test]
    fn test_negation() {
        let tokens = vec![op(NegationOp), Token::ident("x")];
        assert_eq!(
            parse_expression(&tokens, 0),
            Ok((Node::unary(op(NegationOp), Node::ident("x")), 2))
        );
    }

    #[test]
    fn test_negation_takes_only_an_atom() {
        // ~x + 1：取反之后直接返回，'+' 留给调用方
        let tokens = vec![op(NegationOp), Token::ident("x"), op(AddOp), Token::number(1.0)];
        let (node, next) = parse_expression(&tokens, 0).unwrap();
        assert_eq!(node, Node::unary(op(NegationOp), Node::ident("x")));
        assert_eq!(next, 2);
    }

    #[test]
    fn test_separator_is_not_consumed() {
        let tokens = vec![Token::ident("a"), op(Separator), Token::ident("b")];
        assert_eq!(parse_expression(&tokens, 0), Ok((Node::ident("a"), 1)));
        // 从中间位置开始，返回的仍是绝对位置
        assert_eq!(parse_expression(&tokens, 2), Ok((Node::ident("b"), 3)));
    }

    #[test]
    fn test_function_call() {
        // f(a, b)
        let tokens = vec![
            Token::ident("f"),
            op(LeftParen),
            Token::ident("a"),
            op(Separator),
            Token::ident("b"),
            op(RightParen),
        ];
        assert_eq!(
            parse_expression(&tokens, 0),
            Ok((
                Node::call(Node::ident("f"), vec![Node::ident("a"), Node::ident("b")]),
                6
            ))
        );
    }

    #[test]
    fn test_empty_call() {
        let tokens = vec![Token::ident("f"), op(LeftParen), op(RightParen)];
        assert_eq!(
            parse_expression(&tokens, 0),
            Ok((Node::call(Node::ident("f"), vec![]), 3))
        );
    }

    #[test]
    fn test_nested_call_arguments() {
        // f(g(1), x.y)
        let tokens = vec![
            Token::ident("f"),
            op(LeftParen),
            Token::ident("g"),
            op(LeftParen),
            Token::number(1.0),
            op(RightParen),
            op(Separator),
            Token::ident("x"),
            op(AccessorOp),
            Token::ident("y"),
            op(RightParen),
        ];
        let (node, next) = parse_expression(&tokens, 0).unwrap();
        assert_eq!(next, tokens.len());
        assert_eq!(
            node,
            Node::call(
                Node::ident("f"),
                vec![
                    Node::call(Node::ident("g"), vec![Node::number(1.0)]),
                    Node::binary(op(AccessorOp), Node::ident("x"), Node::ident("y")),
                ]
            )
        );
    }

    #[test]
    fn test_match_expression() {
        // x : { 1 -> y }
        let tokens = vec![
            Token::ident("x"),
            op(MatchColon),
            op(LeftBrace),
            Token::number(1.0),
            op(CaseArrow),
            Token::ident("y"),
            op(RightBrace),
        ];
        assert_eq!(
            parse_expression(&tokens, 0),
            Ok((
                Node::MatchExpr {
                    subject: Box::new(Node::ident("x")),
                    clauses: vec![MatchClause {
                        pattern: Node::number(1.0),
                        body: vec![Node::ident("y")],
                    }],
                },
                7
            ))
        );
    }

    #[test]
    fn test_empty_match_is_valid() {
        let tokens = vec![Token::ident("x"), op(MatchColon), op(LeftBrace), op(RightBrace)];
        assert_eq!(
            parse_expression(&tokens, 0),
            Ok((
                Node::MatchExpr {
                    subject: Box::new(Node::ident("x")),
                    clauses: vec![],
                },
                4
            ))
        );
    }

    #[test]
    fn test_match_requires_brace() {
        let tokens = vec![Token::ident("x"), op(MatchColon), Token::ident("y")];
        assert_eq!(
            parse_expression(&tokens, 0),
            Err(ParseError::UnexpectedToken {
                found: Identifier,
                pos: 2,
                expected: "'{' after ':'",
            })
        );
    }

    #[test]
    fn test_unexpected_lookahead() {
        let tokens = vec![Token::ident("a"), Token::ident("b")];
        assert!(matches!(
            parse_expression(&tokens, 0),
            Err(ParseError::UnexpectedToken { found: Identifier, pos: 1, .. })
        ));
    }

    #[test]
    fn test_missing_right_operand() {
        let tokens = vec![Token::ident("a"), op(AddOp)];
        assert_eq!(
            parse_expression(&tokens, 0),
            Err(ParseError::UnexpectedEndOfInput {
                pos: 2,
                expected: "an expression",
            })
        );
    }

    #[test]
    fn test_deeply_nested_groups_are_rejected() {
        let depth = 5000;
        let mut tokens = vec![op(LeftParen); depth];
        tokens.push(Token::ident("a"));
        tokens.extend(vec![op(RightParen); depth]);
        assert!(matches!(
            parse_expression(&tokens, 0),
            Err(ParseError::NestingTooDeep { limit: MAX_DEPTH, .. })
        ));
    }

    #[test]
    fn test_nesting_below_limit_is_accepted() {
        let depth = 100;
        let mut tokens = vec![op(LeftBracket); depth];
        tokens.push(Token::number(1.0));
        tokens.extend(vec![op(RightBracket); depth]);
        let (_, next) = parse_expression(&tokens, 0).unwrap();
        assert_eq!(next, tokens.len());
    }

    #[test]
    fn test_unterminated_call() {
        let tokens = vec![Token::ident("f"), op(LeftParen), Token::ident("a")];
        let err = parse_expression(&tokens, 0).unwrap_err();
        assert!(err.is_end_of_input());
    }
}
