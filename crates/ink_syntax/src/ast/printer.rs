//! Tree Printer
//!
//! 把 AST 按缩进树的形式输出，供命令行 `parse` 子命令使用

use super::{MatchClause, Node, ObjectKey, Visitor};
use std::fmt::Write;

/// 缩进树打印器
#[derive(Debug, Default)]
pub struct TreePrinter {
    out: String,
    depth: usize,
}

impl TreePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 打印一组顶层表达式
    pub fn print(nodes: &[Node]) -> String {
        let mut printer = Self::new();
        printer.visit_all(nodes);
        printer.out
    }

    fn line(&mut self, text: impl AsRef<str>) {
        let _ = writeln!(self.out, "{}{}", "  ".repeat(self.depth), text.as_ref());
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }
}

impl Visitor<()> for TreePrinter {
    fn visit_node(&mut self, node: &Node) {
        match node {
            Node::Identifier { name } => self.line(format!("Identifier {}", name)),
            Node::NumberLiteral { value } => self.line(format!("NumberLiteral {}", value)),
            Node::StringLiteral { value } => self.line(format!("StringLiteral {:?}", value)),
            Node::BooleanLiteral { value } => self.line(format!("BooleanLiteral {}", value)),
            Node::NullLiteral => self.line("NullLiteral"),
            Node::ObjectLiteral { entries } => {
                self.line("ObjectLiteral");
                self.nested(|p| {
                    for entry in entries {
                        match &entry.key {
                            ObjectKey::Identifier(name) => p.line(format!("{}:", name)),
                            ObjectKey::String(name) => p.line(format!("{:?}:", name)),
                        }
                        p.nested(|p| p.visit_node(&entry.value));
                    }
                });
            }
            Node::ListLiteral { elements } => {
                self.line("ListLiteral");
                self.nested(|p| {
                    p.visit_all(elements);
                });
            }
            Node::FunctionLiteral { parameters, body } => {
                self.line(format!("FunctionLiteral ({})", parameters.join(", ")));
                self.nested(|p| p.visit_node(body));
            }
            Node::UnaryExpr { operator, operand } => {
                self.line(format!("UnaryExpr {}", operator.kind()));
                self.nested(|p| p.visit_node(operand));
            }
            Node::BinaryExpr {
                operator,
                left,
                right,
            } => {
                self.line(format!("BinaryExpr {}", operator.kind()));
                self.nested(|p| {
                    p.visit_node(left);
                    p.visit_node(right);
                });
            }
            Node::FunctionCallExpr { callee, arguments } => {
                self.line("FunctionCallExpr");
                self.nested(|p| {
                    p.visit_node(callee);
                    p.line("arguments");
                    p.nested(|p| {
                        p.visit_all(arguments);
                    });
                });
            }
            Node::MatchExpr { subject, clauses } => {
                self.line("MatchExpr");
                self.nested(|p| {
                    p.visit_node(subject);
                    for clause in clauses {
                        p.visit_clause(clause);
                    }
                });
            }
        }
    }

    fn visit_clause(&mut self, clause: &MatchClause) {
        self.line("MatchClause");
        self.nested(|p| {
            p.visit_node(&clause.pattern);
            p.line("->");
            p.nested(|p| {
                p.visit_all(&clause.body);
            });
        });
    }
}
