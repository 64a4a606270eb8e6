//! Composite Literals
//!
//! 对象、列表、函数字面量

use super::parse_expression_at;
use crate::ast::{Node, ObjectEntry, ObjectKey};
use crate::parser::error::ParseResult;
use crate::parser::helpers::{
    at, current, delimited, expect, peek_kind, string_payload, unexpected,
};
use crate::token::{Token, TokenKind};

/// `pos` 处的 '(' 是否开启一个参数列表：`( ident, ... ) =>`
///
/// 只做扫描，不消费 token。
pub fn is_parameter_list(tokens: &[Token], pos: usize) -> bool {
    let mut i = pos + 1;
    loop {
        match peek_kind(tokens, i) {
            Some(TokenKind::Identifier) | Some(TokenKind::Separator) => i += 1,
            Some(TokenKind::RightParen) => return at(tokens, i + 1, TokenKind::FunctionArrow),
            _ => return false,
        }
    }
}

/// 函数字面量: `x => body`、`(a, b) => body`、`() => body`、`=> body`
pub(crate) fn parse_function_literal(
    tokens: &[Token],
    pos: usize,
    depth: usize,
) -> ParseResult<(Node, usize)> {
    let tok = current(tokens, pos, "an expression")?;

    let (parameters, pos) = match tok.kind() {
        TokenKind::Identifier => (vec![string_payload(tok, pos)?], pos + 1),
        TokenKind::LeftParen => delimited(
            tokens,
            pos + 1,
            TokenKind::RightParen,
            "',' or ')' in parameter list",
            parse_parameter,
        )?,
        // 省略参数列表
        TokenKind::FunctionArrow => (Vec::new(), pos),
        _ => return Err(unexpected(tok, pos, "an expression")),
    };

    let pos = expect(tokens, pos, TokenKind::FunctionArrow, "'=>'")?;
    let (body, pos) = parse_expression_at(tokens, pos, depth)?;

    Ok((
        Node::FunctionLiteral {
            parameters,
            body: Box::new(body),
        },
        pos,
    ))
}

fn parse_parameter(tokens: &[Token], pos: usize) -> ParseResult<(String, usize)> {
    let tok = current(tokens, pos, "a parameter name")?;
    match tok.kind() {
        TokenKind::Identifier => Ok((string_payload(tok, pos)?, pos + 1)),
        _ => Err(unexpected(tok, pos, "a parameter name")),
    }
}

/// 对象字面量: { key: value, 'key': value }
pub(crate) fn parse_object_literal(
    tokens: &[Token],
    pos: usize,
    depth: usize,
) -> ParseResult<(Node, usize)> {
    let (entries, next) = delimited(
        tokens,
        pos + 1,
        TokenKind::RightBrace,
        "',' or '}'",
        |tokens, pos| parse_object_entry(tokens, pos, depth),
    )?;
    Ok((Node::ObjectLiteral { entries }, next))
}

fn parse_object_entry(
    tokens: &[Token],
    pos: usize,
    depth: usize,
) -> ParseResult<(ObjectEntry, usize)> {
    let tok = current(tokens, pos, "an object key")?;
    let key = match tok.kind() {
        TokenKind::Identifier => ObjectKey::Identifier(string_payload(tok, pos)?),
        TokenKind::StringLiteral => ObjectKey::String(string_payload(tok, pos)?),
        _ => return Err(unexpected(tok, pos, "an object key")),
    };

    let pos = expect(tokens, pos + 1, TokenKind::MatchColon, "':' after object key")?;
    let (value, pos) = parse_expression_at(tokens, pos, depth)?;
    Ok((ObjectEntry { key, value }, pos))
}

/// 列表字面量: [a, b, c]
pub(crate) fn parse_list_literal(
    tokens: &[Token],
    pos: usize,
    depth: usize,
) -> ParseResult<(Node, usize)> {
    let (elements, next) = delimited(
        tokens,
        pos + 1,
        TokenKind::RightBracket,
        "',' or ']'",
        |tokens, pos| parse_expression_at(tokens, pos, depth),
    )?;
    Ok((Node::ListLiteral { elements }, next))
}
