//! Atom Parser
//!
//! 最小的自包含表达式：标识符、字面量、括号分组、对象 / 列表 / 函数字面量

use super::literal::{
    is_parameter_list, parse_function_literal, parse_list_literal, parse_object_literal,
};
use super::parse_expression_at;
use crate::ast::Node;
use crate::parser::error::ParseResult;
use crate::parser::helpers::{at, current, expect, number_payload, string_payload};
use crate::token::{Token, TokenKind};

/// 解析一个原子，返回节点和下一个未消费 token 的位置
pub fn parse_atom(tokens: &[Token], pos: usize) -> ParseResult<(Node, usize)> {
    parse_atom_at(tokens, pos, 0)
}

pub(crate) fn parse_atom_at(
    tokens: &[Token],
    pos: usize,
    depth: usize,
) -> ParseResult<(Node, usize)> {
    let tok = current(tokens, pos, "an expression")?;

    match tok.kind() {
        TokenKind::Identifier => {
            // x => body：单参数函数字面量
            if at(tokens, pos + 1, TokenKind::FunctionArrow) {
                return parse_function_literal(tokens, pos, depth);
            }
            let name = string_payload(tok, pos)?;
            Ok((Node::Identifier { name }, pos + 1))
        }
        TokenKind::NumberLiteral => {
            let value = number_payload(tok, pos)?;
            Ok((Node::NumberLiteral { value }, pos + 1))
        }
        TokenKind::StringLiteral => {
            let value = string_payload(tok, pos)?;
            Ok((Node::StringLiteral { value }, pos + 1))
        }
        TokenKind::TrueLiteral => Ok((Node::BooleanLiteral { value: true }, pos + 1)),
        TokenKind::FalseLiteral => Ok((Node::BooleanLiteral { value: false }, pos + 1)),
        TokenKind::NullLiteral => Ok((Node::NullLiteral, pos + 1)),
        TokenKind::LeftParen => {
            if is_parameter_list(tokens, pos) {
                parse_function_literal(tokens, pos, depth)
            } else {
                parse_group(tokens, pos, depth)
            }
        }
        TokenKind::LeftBrace => parse_object_literal(tokens, pos, depth),
        TokenKind::LeftBracket => parse_list_literal(tokens, pos, depth),
        TokenKind::NegationOp
        | TokenKind::AddOp
        | TokenKind::SubtractOp
        | TokenKind::MultiplyOp
        | TokenKind::DivideOp
        | TokenKind::ModulusOp
        | TokenKind::GreaterThanOp
        | TokenKind::LessThanOp
        | TokenKind::EqualOp
        | TokenKind::IsOp
        | TokenKind::DefineOp
        | TokenKind::AccessorOp
        | TokenKind::RightParen
        | TokenKind::RightBrace
        | TokenKind::RightBracket
        | TokenKind::MatchColon
        | TokenKind::CaseArrow
        | TokenKind::FunctionArrow
        | TokenKind::Separator => parse_function_literal(tokens, pos, depth),
    }
}

/// ( expr )：分组不额外包一层节点
fn parse_group(tokens: &[Token], pos: usize, depth: usize) -> ParseResult<(Node, usize)> {
    let (inner, pos) = parse_expression_at(tokens, pos + 1, depth)?;
    let pos = expect(tokens, pos, TokenKind::RightParen, "')'")?;
    Ok((inner, pos))
}
