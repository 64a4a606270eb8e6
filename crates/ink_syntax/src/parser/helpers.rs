//! Parser Helper Functions
//!
//! 辅助函数：越界检查的 peek、expect、跳过分隔符、读取负载。
//! 所有函数都接收完整序列和绝对位置。

use super::error::{ParseError, ParseResult};
use crate::token::{Token, TokenKind};

/// 表达式最大嵌套深度
pub const MAX_DEPTH: usize = 128;

/// 进入一层嵌套表达式，返回新的深度
pub fn descend(pos: usize, depth: usize) -> ParseResult<usize> {
    if depth >= MAX_DEPTH {
        return Err(ParseError::NestingTooDeep {
            pos,
            limit: MAX_DEPTH,
        });
    }
    Ok(depth + 1)
}

/// 读取 `pos` 处的 token，越界返回 None
pub fn peek(tokens: &[Token], pos: usize) -> Option<&Token> {
    tokens.get(pos)
}

pub fn peek_kind(tokens: &[Token], pos: usize) -> Option<TokenKind> {
    tokens.get(pos).map(Token::kind)
}

/// `pos` 处是否为给定种类
pub fn at(tokens: &[Token], pos: usize, kind: TokenKind) -> bool {
    peek_kind(tokens, pos) == Some(kind)
}

/// 读取 `pos` 处的 token；输入结束时报 UnexpectedEndOfInput
pub fn current<'t>(
    tokens: &'t [Token],
    pos: usize,
    expected: &'static str,
) -> ParseResult<&'t Token> {
    tokens
        .get(pos)
        .ok_or(ParseError::UnexpectedEndOfInput { pos, expected })
}

/// 要求 `pos` 处为给定种类，返回下一个位置
pub fn expect(
    tokens: &[Token],
    pos: usize,
    kind: TokenKind,
    expected: &'static str,
) -> ParseResult<usize> {
    let tok = current(tokens, pos, expected)?;
    if tok.kind() == kind {
        Ok(pos + 1)
    } else {
        Err(unexpected(tok, pos, expected))
    }
}

pub fn unexpected(tok: &Token, pos: usize, expected: &'static str) -> ParseError {
    ParseError::UnexpectedToken {
        found: tok.kind(),
        pos,
        expected,
    }
}

/// 跳过连续的分隔符
pub fn skip_separators(tokens: &[Token], mut pos: usize) -> usize {
    while at(tokens, pos, TokenKind::Separator) {
        pos += 1;
    }
    pos
}

/// 解析 `item (, item)* close`，返回 close 之后的位置
///
/// 分隔符可以连续出现，也可以出现在首尾；每一项之后只能是分隔符或 close。
pub fn delimited<T>(
    tokens: &[Token],
    mut pos: usize,
    close: TokenKind,
    expected: &'static str,
    mut item: impl FnMut(&[Token], usize) -> ParseResult<(T, usize)>,
) -> ParseResult<(Vec<T>, usize)> {
    let mut items = Vec::new();
    loop {
        pos = skip_separators(tokens, pos);
        if current(tokens, pos, expected)?.kind() == close {
            return Ok((items, pos + 1));
        }

        let (value, next) = item(tokens, pos)?;
        items.push(value);
        pos = next;

        match peek(tokens, pos) {
            Some(tok) if tok.kind() == TokenKind::Separator || tok.kind() == close => {}
            Some(tok) => return Err(unexpected(tok, pos, expected)),
            None => return Err(ParseError::UnexpectedEndOfInput { pos, expected }),
        }
    }
}

/// 标识符 / 字符串的字符串负载
pub fn string_payload(tok: &Token, pos: usize) -> ParseResult<String> {
    tok.str_val()
        .map(str::to_string)
        .ok_or(ParseError::MalformedToken {
            kind: tok.kind(),
            pos,
        })
}

/// 数字的数值负载
pub fn number_payload(tok: &Token, pos: usize) -> ParseResult<f64> {
    tok.num_val().ok_or(ParseError::MalformedToken {
        kind: tok.kind(),
        pos,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_checks_bounds() {
        let tokens = vec![Token::new(TokenKind::LeftParen)];
        assert_eq!(expect(&tokens, 0, TokenKind::LeftParen, "'('"), Ok(1));
        assert_eq!(
            expect(&tokens, 1, TokenKind::RightParen, "')'"),
            Err(ParseError::UnexpectedEndOfInput {
                pos: 1,
                expected: "')'"
            })
        );
        assert!(matches!(
            expect(&tokens, 0, TokenKind::RightParen, "')'"),
            Err(ParseError::UnexpectedToken { pos: 0, .. })
        ));
    }

    #[test]
    fn test_descend_stops_at_limit() {
        assert_eq!(descend(0, 0), Ok(1));
        assert_eq!(descend(3, MAX_DEPTH - 1), Ok(MAX_DEPTH));
        assert_eq!(
            descend(3, MAX_DEPTH),
            Err(ParseError::NestingTooDeep {
                pos: 3,
                limit: MAX_DEPTH
            })
        );
    }

    #[test]
    fn test_skip_separators() {
        let tokens = vec![
            Token::new(TokenKind::Separator),
            Token::new(TokenKind::Separator),
            Token::ident("a"),
        ];
        assert_eq!(skip_separators(&tokens, 0), 2);
        assert_eq!(skip_separators(&tokens, 2), 2);
        assert_eq!(skip_separators(&tokens, 9), 9);
    }

    #[test]
    fn test_missing_payload() {
        let bare = Token::new(TokenKind::Identifier);
        assert_eq!(
            string_payload(&bare, 4),
            Err(ParseError::MalformedToken {
                kind: TokenKind::Identifier,
                pos: 4
            })
        );
    }
}
