//! Ink Syntax
//!
//! Ink 表达式语言的前端：token 模型、参考词法分析器、AST、
//! 递归下降解析器与通道管道、规范化还原。
//!
//! ```rust
//! use ink_syntax::lexer::tokens;
//! use ink_syntax::parser::parse_tokens;
//! use ink_syntax::ast::Node;
//!
//! let toks = tokens("f(a, b)").unwrap();
//! let nodes = parse_tokens(&toks).unwrap();
//! assert!(matches!(nodes[0], Node::FunctionCallExpr { .. }));
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod unparse;

pub use ast::Node;
pub use parser::{parse_tokens, ParseError};
pub use token::{Token, TokenKind};
