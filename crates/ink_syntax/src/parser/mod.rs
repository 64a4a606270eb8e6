//! Parser Module
//!
//! 手写递归下降解析器。每个解析函数都接收完整的 token 序列和绝对位置，
//! 返回构造好的节点和下一个未消费 token 的绝对位置，不做任何切片。

pub mod error;
pub mod expr;
pub mod helpers;
pub mod pattern;
pub mod stream;

pub use error::{ParseError, ParseResult};
pub use expr::atom::parse_atom;
pub use expr::parse_expression;
pub use pattern::parse_match_clause;
pub use stream::{collect_tokens, parse, spawn, ParseOutcome, ParseSummary, ParserConfig, ParserHandle};

use crate::ast::Node;
use crate::token::{Token, TokenKind};
use helpers::{peek, skip_separators, unexpected};

/// 顶层表达式迭代器
///
/// 从位置 0 开始反复调用表达式解析器；顶层表达式之间必须是分隔符。
/// 遇到第一个错误后产出该错误并停止。
#[derive(Debug, Clone)]
pub struct TopLevel<'t> {
    tokens: &'t [Token],
    cursor: usize,
    halted: bool,
}

impl<'t> TopLevel<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            cursor: 0,
            halted: false,
        }
    }

    /// 下一个未消费 token 的位置
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn halt(&mut self, err: ParseError) -> Option<ParseResult<Node>> {
        self.halted = true;
        Some(Err(err))
    }
}

impl Iterator for TopLevel<'_> {
    type Item = ParseResult<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted {
            return None;
        }

        self.cursor = skip_separators(self.tokens, self.cursor);
        if self.cursor >= self.tokens.len() {
            self.halted = true;
            return None;
        }

        let (node, next) = match parse_expression(self.tokens, self.cursor) {
            Ok(parsed) => parsed,
            Err(err) => return self.halt(err),
        };

        // 顶层表达式之后只能是分隔符或输入结束
        if let Some(tok) = peek(self.tokens, next) {
            if tok.kind() != TokenKind::Separator {
                let err = unexpected(tok, next, "a separator between expressions");
                return self.halt(err);
            }
        }

        self.cursor = next;
        Some(Ok(node))
    }
}

/// 同步入口：解析整个 token 序列
pub fn parse_tokens(tokens: &[Token]) -> ParseResult<Vec<Node>> {
    TopLevel::new(tokens).collect()
}
