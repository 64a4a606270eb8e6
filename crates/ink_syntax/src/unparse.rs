//! Canonical Unparser
//!
//! 把 AST 还原成规范的 token 序列，再解析会得到结构相同的树。
//! 原子位置 (一元操作数、二元操作数、被调用者、match 主体) 上的复合节点加括号。
//!
//! token 层面的往返对任何树都成立，包括词法器产生不了的负载 (负数、
//! 不合标识符规则的名字)。[`render`] 输出的文本只有在负载本身能被词法器
//! 读回时才能往返。

use crate::ast::{MatchClause, Node, ObjectKey, Visitor};
use crate::token::{Token, TokenKind};

/// token 写出器
#[derive(Debug, Default)]
pub struct Unparser {
    out: Vec<Token>,
}

impl Unparser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> Vec<Token> {
        self.out
    }

    fn push(&mut self, kind: TokenKind) {
        self.out.push(Token::new(kind));
    }

    /// 原子位置：不能自定界的节点包一层括号
    fn atom(&mut self, node: &Node) {
        if node.is_self_delimiting() {
            self.visit_node(node);
        } else {
            self.push(TokenKind::LeftParen);
            self.visit_node(node);
            self.push(TokenKind::RightParen);
        }
    }

    /// 以分隔符连接的表达式列表
    fn list<'n>(&mut self, nodes: impl IntoIterator<Item = &'n Node>) {
        for (i, node) in nodes.into_iter().enumerate() {
            if i > 0 {
                self.push(TokenKind::Separator);
            }
            self.visit_node(node);
        }
    }
}

impl Visitor<()> for Unparser {
    fn visit_node(&mut self, node: &Node) {
        match node {
            Node::Identifier { name } => self.out.push(Token::ident(name.as_str())),
            Node::NumberLiteral { value } => self.out.push(Token::number(*value)),
            Node::StringLiteral { value } => self.out.push(Token::string(value.as_str())),
            Node::BooleanLiteral { value: true } => self.push(TokenKind::TrueLiteral),
            Node::BooleanLiteral { value: false } => self.push(TokenKind::FalseLiteral),
            Node::NullLiteral => self.push(TokenKind::NullLiteral),
            Node::ObjectLiteral { entries } => {
                self.push(TokenKind::LeftBrace);
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        self.push(TokenKind::Separator);
                    }
                    self.out.push(match &entry.key {
                        ObjectKey::Identifier(name) => Token::ident(name.as_str()),
                        ObjectKey::String(name) => Token::string(name.as_str()),
                    });
                    self.push(TokenKind::MatchColon);
                    self.visit_node(&entry.value);
                }
                self.push(TokenKind::RightBrace);
            }
            Node::ListLiteral { elements } => {
                self.push(TokenKind::LeftBracket);
                self.list(elements);
                self.push(TokenKind::RightBracket);
            }
            Node::FunctionLiteral { parameters, body } => {
                self.push(TokenKind::LeftParen);
                for (i, param) in parameters.iter().enumerate() {
                    if i > 0 {
                        self.push(TokenKind::Separator);
                    }
                    self.out.push(Token::ident(param.as_str()));
                }
                self.push(TokenKind::RightParen);
                self.push(TokenKind::FunctionArrow);
                self.visit_node(body);
            }
            Node::UnaryExpr { operator, operand } => {
                self.out.push(operator.clone());
                self.atom(operand);
            }
            Node::BinaryExpr {
                operator,
                left,
                right,
            } => {
                self.atom(left);
                self.out.push(operator.clone());
                self.atom(right);
            }
            Node::FunctionCallExpr { callee, arguments } => {
                self.atom(callee);
                self.push(TokenKind::LeftParen);
                self.list(arguments);
                self.push(TokenKind::RightParen);
            }
            Node::MatchExpr { subject, clauses } => {
                self.atom(subject);
                self.push(TokenKind::MatchColon);
                self.push(TokenKind::LeftBrace);
                for (i, clause) in clauses.iter().enumerate() {
                    if i > 0 {
                        self.push(TokenKind::Separator);
                    }
                    self.visit_clause(clause);
                }
                self.push(TokenKind::RightBrace);
            }
        }
    }

    fn visit_clause(&mut self, clause: &MatchClause) {
        self.visit_node(&clause.pattern);
        self.push(TokenKind::CaseArrow);
        self.list(&clause.body);
    }
}

/// 把一组顶层表达式还原为 token 序列，表达式之间用一个分隔符
pub fn unparse(nodes: &[Node]) -> Vec<Token> {
    let mut unparser = Unparser::new();
    unparser.list(nodes);
    unparser.finish()
}

/// 规范源码文本
///
/// 负数会写成 `-3.5`，再次词法分析得到的是减号和数字，所以只对
/// 词法器产生的树保证文本往返。
pub fn render(nodes: &[Node]) -> String {
    let mut text = String::new();
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            text.push('\n');
        }
        for (j, tok) in unparse(std::slice::from_ref(node)).iter().enumerate() {
            // 分隔符紧贴前一个 token
            if j > 0 && tok.kind() != TokenKind::Separator {
                text.push(' ');
            }
            text.push_str(&tok.to_string());
        }
    }
    text
}
