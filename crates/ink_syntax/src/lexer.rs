//! Reference Lexer
//!
//! 基于 logos 的词法分析器，把源码切分为 [`Token`] 序列，同时保留字节范围，
//! 供驱动层把解析错误映射回源码位置。

use crate::token::{Token, TokenKind};
use logos::Logos;
use thiserror::Error;

/// 源码位置范围 (字节偏移)
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, PartialEq, Clone)]
// 空白与行注释
#[logos(skip r"([ \t\r\f]+|//[^\n]*)")]
enum Lexeme {
    // --- 关键字 ---
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,
    #[token("is")]
    Is,

    // --- 运算符 ---
    #[token("~")]
    Tilde,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token(">")]
    Gt,
    #[token("<")]
    Lt,
    #[token("=")]
    Eq,
    #[token(":=")]
    ColonEq,
    #[token(".")]
    Dot,

    // --- 分隔符 ---
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(":")]
    Colon,
    #[token("->")]
    Arrow,
    #[token("=>")]
    FatArrow,
    // 逗号和换行都是表达式分隔
    #[token(",")]
    #[token("\n")]
    Separator,

    // --- 数据 ---
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_?!]*", |lex| lex.slice().to_string())]
    Ident(String),

    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[regex(r"'([^'\\]|\\.)*'", |lex| unescape(lex.slice()))]
    String(String),
}

/// 去掉引号并处理转义
fn unescape(quoted: &str) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some(o) => out.push(o),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

impl From<Lexeme> for Token {
    fn from(lexeme: Lexeme) -> Self {
        let kind = match lexeme {
            Lexeme::Ident(name) => return Token::ident(name),
            Lexeme::Number(value) => return Token::number(value),
            Lexeme::String(value) => return Token::string(value),
            Lexeme::True => TokenKind::TrueLiteral,
            Lexeme::False => TokenKind::FalseLiteral,
            Lexeme::Null => TokenKind::NullLiteral,
            Lexeme::Is => TokenKind::IsOp,
            Lexeme::Tilde => TokenKind::NegationOp,
            Lexeme::Plus => TokenKind::AddOp,
            Lexeme::Minus => TokenKind::SubtractOp,
            Lexeme::Star => TokenKind::MultiplyOp,
            Lexeme::Slash => TokenKind::DivideOp,
            Lexeme::Percent => TokenKind::ModulusOp,
            Lexeme::Gt => TokenKind::GreaterThanOp,
            Lexeme::Lt => TokenKind::LessThanOp,
            Lexeme::Eq => TokenKind::EqualOp,
            Lexeme::ColonEq => TokenKind::DefineOp,
            Lexeme::Dot => TokenKind::AccessorOp,
            Lexeme::LParen => TokenKind::LeftParen,
            Lexeme::RParen => TokenKind::RightParen,
            Lexeme::LBrace => TokenKind::LeftBrace,
            Lexeme::RBrace => TokenKind::RightBrace,
            Lexeme::LBracket => TokenKind::LeftBracket,
            Lexeme::RBracket => TokenKind::RightBracket,
            Lexeme::Colon => TokenKind::MatchColon,
            Lexeme::Arrow => TokenKind::CaseArrow,
            Lexeme::FatArrow => TokenKind::FunctionArrow,
            Lexeme::Separator => TokenKind::Separator,
        };
        Token::new(kind)
    }
}

/// 词法错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// 无法识别的输入
    #[error("unrecognised input {text:?} at byte {}", .span.start)]
    UnknownToken { text: String, span: Span },
}

impl LexError {
    pub fn span(&self) -> &Span {
        match self {
            Self::UnknownToken { span, .. } => span,
        }
    }
}

/// 词法分析，返回 token 及其字节范围
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>, LexError> {
    Lexeme::lexer(source)
        .spanned()
        .map(|(lexeme, span)| match lexeme {
            Ok(lexeme) => Ok((Token::from(lexeme), span)),
            Err(()) => Err(LexError::UnknownToken {
                text: source[span.clone()].to_string(),
                span,
            }),
        })
        .collect()
}

/// 只要 token，不要位置
pub fn tokens(source: &str) -> Result<Vec<Token>, LexError> {
    Ok(tokenize(source)?.into_iter().map(|(tok, _)| tok).collect())
}
