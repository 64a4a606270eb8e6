//! Match Clause Parser
//!
//! 解析 `pattern -> body, ...` 分支

use super::error::ParseResult;
use super::expr::parse_expression_at;
use super::helpers::{at, current, expect, peek_kind, skip_separators};
use crate::ast::{MatchClause, Node};
use crate::token::{Token, TokenKind};

/// 分支体结束后的状态：分支、结束位置，以及已经解析出的下一个分支模式
type ClauseEnd = (MatchClause, usize, Option<(Node, usize)>);

/// 解析一个 match 分支，返回分支和下一个未消费 token 的位置
///
/// 分支体可以有多个表达式，以分隔符隔开；遇到 '}' 或下一个分支的开头时结束，
/// 结束用的 token 不消费。
pub fn parse_match_clause(tokens: &[Token], pos: usize) -> ParseResult<(MatchClause, usize)> {
    let (pattern, pos) = parse_expression_at(tokens, pos, 0)?;
    let (clause, pos, _) = parse_clause_body(tokens, pattern, pos, 0)?;
    Ok((clause, pos))
}

/// `{` 之后的全部分支，返回 '}' 之后的位置
///
/// 分隔符之后的表达式只解析一次：后面紧跟 '->' 就是下一个分支的模式，
/// 否则归入当前分支体。
pub(crate) fn parse_clauses(
    tokens: &[Token],
    pos: usize,
    depth: usize,
) -> ParseResult<(Vec<MatchClause>, usize)> {
    let mut clauses = Vec::new();

    let start = skip_separators(tokens, pos);
    if current(tokens, start, "',' or '}'")?.kind() == TokenKind::RightBrace {
        return Ok((clauses, start + 1));
    }

    let mut pending = parse_expression_at(tokens, start, depth)?;
    loop {
        let (pattern, pos) = pending;
        let (clause, pos, next) = parse_clause_body(tokens, pattern, pos, depth)?;
        clauses.push(clause);

        match next {
            Some(next) => pending = next,
            None => {
                let end = skip_separators(tokens, pos);
                let end = expect(tokens, end, TokenKind::RightBrace, "',' or '}'")?;
                return Ok((clauses, end));
            }
        }
    }
}

/// `pos` 指向模式之后的 '->'
fn parse_clause_body(
    tokens: &[Token],
    pattern: Node,
    pos: usize,
    depth: usize,
) -> ParseResult<ClauseEnd> {
    let pos = expect(tokens, pos, TokenKind::CaseArrow, "'->' after match pattern")?;
    let (first, mut pos) = parse_expression_at(tokens, pos, depth)?;
    let mut body = vec![first];

    while at(tokens, pos, TokenKind::Separator) {
        let after = skip_separators(tokens, pos);
        if matches!(peek_kind(tokens, after), None | Some(TokenKind::RightBrace)) {
            break;
        }

        let (expr, next) = parse_expression_at(tokens, after, depth)?;
        if at(tokens, next, TokenKind::CaseArrow) {
            return Ok((MatchClause { pattern, body }, pos, Some((expr, next))));
        }
        body.push(expr);
        pos = next;
    }

    Ok((MatchClause { pattern, body }, pos, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokens;
    use crate::parser::{parse_expression, ParseError};

    #[test]
    fn test_single_clause() {
        let toks = tokens("1 -> y }").unwrap();
        let (clause, next) = parse_match_clause(&toks, 0).unwrap();
        assert_eq!(clause.pattern, Node::number(1.0));
        assert_eq!(clause.body, vec![Node::ident("y")]);
        // 停在 '}' 上，不消费
        assert_eq!(next, 3);
    }

    #[test]
    fn test_clause_body_stops_at_next_pattern() {
        let toks = tokens("1 -> a, b\n2 -> c").unwrap();
        let (first, next) = parse_match_clause(&toks, 0).unwrap();
        assert_eq!(first.body, vec![Node::ident("a"), Node::ident("b")]);
        assert_eq!(toks[next].kind(), TokenKind::Separator);

        let (second, end) = parse_match_clause(&toks, next + 1).unwrap();
        assert_eq!(second.pattern, Node::number(2.0));
        assert_eq!(second.body, vec![Node::ident("c")]);
        assert_eq!(end, toks.len());
    }

    #[test]
    fn test_multi_clause_match() {
        let toks = tokens("n : {\n  0 -> 'even'\n  _ -> log(n), 'odd'\n}").unwrap();
        let (node, next) = parse_expression(&toks, 0).unwrap();
        assert_eq!(next, toks.len());
        let Node::MatchExpr { subject, clauses } = node else {
            panic!("expected match expression");
        };
        assert_eq!(*subject, Node::ident("n"));
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].body, vec![Node::string("even")]);
        assert_eq!(clauses[1].pattern, Node::ident("_"));
        assert_eq!(clauses[1].body.len(), 2);
    }

    #[test]
    fn test_deeply_nested_match_parses_quickly() {
        // x : { 1 -> a, x : { 1 -> a, ... z } }
        let depth = 40;
        let source = format!("{}z{}", "x : { 1 -> a, ".repeat(depth), " }".repeat(depth));
        let toks = tokens(&source).unwrap();

        let started = std::time::Instant::now();
        let (mut node, next) = parse_expression(&toks, 0).unwrap();
        assert!(started.elapsed() < std::time::Duration::from_secs(2));
        assert_eq!(next, toks.len());

        for _ in 0..depth {
            let Node::MatchExpr { mut clauses, .. } = node else {
                panic!("expected match expression");
            };
            assert_eq!(clauses.len(), 1);
            let mut body = clauses.remove(0).body;
            assert_eq!(body.len(), 2);
            assert_eq!(body[0], Node::ident("a"));
            node = body.remove(1);
        }
        assert_eq!(node, Node::ident("z"));
    }

    #[test]
    fn test_clause_list_errors() {
        // '->' 之后直接跟 '->'
        let toks = tokens("x : { 1 -> a -> b }").unwrap();
        assert_eq!(
            parse_expression(&toks, 0),
            Err(ParseError::UnexpectedToken {
                found: TokenKind::CaseArrow,
                pos: 6,
                expected: "',' or '}'",
            })
        );

        let toks = tokens("x : { 1 -> a,\n").unwrap();
        assert_eq!(
            parse_expression(&toks, 0),
            Err(ParseError::UnexpectedEndOfInput {
                pos: 8,
                expected: "',' or '}'",
            })
        );
    }

    #[test]
    fn test_missing_arrow() {
        let toks = tokens("1 y").unwrap();
        assert!(matches!(
            parse_match_clause(&toks, 0),
            Err(ParseError::UnexpectedToken { .. })
        ));
        let toks = tokens("1").unwrap();
        assert_eq!(
            parse_match_clause(&toks, 0),
            Err(ParseError::UnexpectedEndOfInput {
                pos: 1,
                expected: "'->' after match pattern",
            })
        );
    }

    #[test]
    fn test_clause_needs_a_body() {
        let toks = tokens("1 -> }").unwrap();
        assert!(matches!(
            parse_match_clause(&toks, 0),
            Err(ParseError::UnexpectedToken {
                found: TokenKind::RightBrace,
                ..
            })
        ));
    }
}
