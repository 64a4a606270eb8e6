//! Parse Error Types
//!
//! 解析错误定义。所有错误对整个解析过程都是终止性的：不做局部恢复，
//! 也不跳到下一个分隔符重新同步。

use crate::token::TokenKind;
use thiserror::Error;

/// 解析错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// 当前状态下没有任何产生式能接受这个 token
    #[error("unexpected '{found}' at token {pos}, expected {expected}")]
    UnexpectedToken {
        found: TokenKind,
        pos: usize,
        expected: &'static str,
    },

    /// 需要的 token 还没出现输入就结束了
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEndOfInput { pos: usize, expected: &'static str },

    /// token 种类要求负载，但负载缺失
    #[error("malformed '{kind}' token at {pos}: missing payload")]
    MalformedToken { kind: TokenKind, pos: usize },

    /// 嵌套超过上限
    #[error("expression nested deeper than {limit} levels at token {pos}")]
    NestingTooDeep { pos: usize, limit: usize },

    /// AST 的接收端提前关闭
    #[error("node consumer hung up after {published} expressions")]
    ConsumerDisconnected { published: usize },
}

impl ParseError {
    /// 出错 token 的下标 (输入结束时等于 token 数)
    pub fn pos(&self) -> Option<usize> {
        match self {
            Self::UnexpectedToken { pos, .. }
            | Self::UnexpectedEndOfInput { pos, .. }
            | Self::MalformedToken { pos, .. }
            | Self::NestingTooDeep { pos, .. } => Some(*pos),
            Self::ConsumerDisconnected { .. } => None,
        }
    }

    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Self::UnexpectedEndOfInput { .. })
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ParseError::UnexpectedToken {
            found: TokenKind::AddOp,
            pos: 3,
            expected: "an expression",
        };
        assert_eq!(
            err.to_string(),
            "unexpected '+' at token 3, expected an expression"
        );
        assert_eq!(err.pos(), Some(3));

        let eof = ParseError::UnexpectedEndOfInput {
            pos: 2,
            expected: "')'",
        };
        assert_eq!(eof.to_string(), "unexpected end of input, expected ')'");
        assert!(eof.is_end_of_input());

        let deep = ParseError::NestingTooDeep { pos: 7, limit: 128 };
        assert_eq!(
            deep.to_string(),
            "expression nested deeper than 128 levels at token 7"
        );
        assert_eq!(deep.pos(), Some(7));

        let gone = ParseError::ConsumerDisconnected { published: 4 };
        assert_eq!(gone.pos(), None);
    }
}
