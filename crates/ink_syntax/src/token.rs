//! Token Model
//!
//! 解析器消费的词法单元：种类 + 可选的字符串 / 数值负载

use std::fmt;

/// Token 种类 (封闭枚举)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // --- 数据 ---
    Identifier,
    NumberLiteral,
    StringLiteral,
    TrueLiteral,
    FalseLiteral,
    NullLiteral,

    // --- 运算符 ---
    NegationOp,
    AddOp,
    SubtractOp,
    MultiplyOp,
    DivideOp,
    ModulusOp,
    GreaterThanOp,
    LessThanOp,
    EqualOp,
    IsOp,
    DefineOp,
    AccessorOp,

    // --- 分隔符 ---
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    MatchColon,
    CaseArrow,
    FunctionArrow,
    Separator,
}

impl TokenKind {
    /// 是否为二元运算符
    pub fn is_binary_op(&self) -> bool {
        matches!(
            self,
            Self::AddOp
                | Self::SubtractOp
                | Self::MultiplyOp
                | Self::DivideOp
                | Self::ModulusOp
                | Self::GreaterThanOp
                | Self::LessThanOp
                | Self::EqualOp
                | Self::IsOp
                | Self::DefineOp
                | Self::AccessorOp
        )
    }

    /// 结束一个表达式但不被它消费的 token
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            Self::Separator
                | Self::RightParen
                | Self::RightBracket
                | Self::RightBrace
                | Self::CaseArrow
        )
    }

    /// 规范的源码写法
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Identifier => "<identifier>",
            Self::NumberLiteral => "<number>",
            Self::StringLiteral => "<string>",
            Self::TrueLiteral => "true",
            Self::FalseLiteral => "false",
            Self::NullLiteral => "null",
            Self::NegationOp => "~",
            Self::AddOp => "+",
            Self::SubtractOp => "-",
            Self::MultiplyOp => "*",
            Self::DivideOp => "/",
            Self::ModulusOp => "%",
            Self::GreaterThanOp => ">",
            Self::LessThanOp => "<",
            Self::EqualOp => "=",
            Self::IsOp => "is",
            Self::DefineOp => ":=",
            Self::AccessorOp => ".",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::MatchColon => ":",
            Self::CaseArrow => "->",
            Self::FunctionArrow => "=>",
            Self::Separator => ",",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// 词法单元
///
/// 构造后不可变；`Identifier` / `StringLiteral` 带字符串负载，
/// `NumberLiteral` 带数值负载。
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    kind: TokenKind,
    str_val: Option<String>,
    num_val: Option<f64>,
}

impl Token {
    /// 创建不带负载的 token
    pub fn new(kind: TokenKind) -> Self {
        Self {
            kind,
            str_val: None,
            num_val: None,
        }
    }

    /// 标识符
    pub fn ident(name: impl Into<String>) -> Self {
        Self {
            str_val: Some(name.into()),
            ..Self::new(TokenKind::Identifier)
        }
    }

    /// 字符串字面量
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            str_val: Some(value.into()),
            ..Self::new(TokenKind::StringLiteral)
        }
    }

    /// 数字字面量
    pub fn number(value: f64) -> Self {
        Self {
            num_val: Some(value),
            ..Self::new(TokenKind::NumberLiteral)
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn str_val(&self) -> Option<&str> {
        self.str_val.as_deref()
    }

    pub fn num_val(&self) -> Option<f64> {
        self.num_val
    }
}

impl From<TokenKind> for Token {
    fn from(kind: TokenKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for Token {
    /// 以源码形式输出 (规范格式化使用)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "{}", self.str_val().unwrap_or("?")),
            TokenKind::NumberLiteral => write!(f, "{}", self.num_val.unwrap_or(f64::NAN)),
            TokenKind::StringLiteral => {
                write!(f, "'")?;
                for c in self.str_val().unwrap_or("").chars() {
                    match c {
                        '\'' => write!(f, "\\'")?,
                        '\\' => write!(f, "\\\\")?,
                        '\n' => write!(f, "\\n")?,
                        '\t' => write!(f, "\\t")?,
                        '\r' => write!(f, "\\r")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                write!(f, "'")
            }
            kind => write!(f, "{}", kind),
        }
    }
}
