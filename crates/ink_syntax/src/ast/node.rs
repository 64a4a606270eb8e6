use crate::token::Token;

/// AST 节点
///
/// 封闭的和类型：每个节点独占自己的子节点 (树形，无共享、无环)，构造后不可变。
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    // 变量使用: x, count
    Identifier { name: String },

    // 字面量: 1, 'hello', true, null
    NumberLiteral { value: f64 },
    StringLiteral { value: String },
    BooleanLiteral { value: bool },
    NullLiteral,

    // 对象字面量: { name: 'ink', 'version': 1 }
    ObjectLiteral { entries: Vec<ObjectEntry> },

    // 列表字面量: [1, 2, 3]
    ListLiteral { elements: Vec<Node> },

    // 函数字面量: (a, b) => a + b
    FunctionLiteral {
        parameters: Vec<String>,
        body: Box<Node>,
    },

    // 一元操作: ~x
    UnaryExpr { operator: Token, operand: Box<Node> },

    // 二元操作: a + b, x := 1, obj.field
    BinaryExpr {
        operator: Token,
        left: Box<Node>,
        right: Box<Node>,
    },

    // 函数调用: f(a, b)
    FunctionCallExpr {
        callee: Box<Node>,
        arguments: Vec<Node>,
    },

    // Match 表达式: x : { 1 -> y, _ -> z }
    MatchExpr {
        subject: Box<Node>,
        clauses: Vec<MatchClause>,
    },
}

/// Match 分支: pattern -> body...
#[derive(Debug, Clone, PartialEq)]
pub struct MatchClause {
    pub pattern: Node,
    pub body: Vec<Node>,
}

/// 对象字面量中的一项
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectEntry {
    pub key: ObjectKey,
    pub value: Node,
}

/// 对象键：标识符或字符串字面量
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectKey {
    Identifier(String),
    String(String),
}

impl ObjectKey {
    pub fn name(&self) -> &str {
        match self {
            Self::Identifier(name) | Self::String(name) => name,
        }
    }
}

impl Node {
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Identifier { name: name.into() }
    }

    pub fn number(value: f64) -> Self {
        Self::NumberLiteral { value }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::StringLiteral {
            value: value.into(),
        }
    }

    pub fn unary(operator: Token, operand: Node) -> Self {
        Self::UnaryExpr {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn binary(operator: Token, left: Node, right: Node) -> Self {
        Self::BinaryExpr {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn call(callee: Node, arguments: Vec<Node>) -> Self {
        Self::FunctionCallExpr {
            callee: Box::new(callee),
            arguments,
        }
    }

    /// 是否可以直接放在原子位置 (操作数 / 被调用者 / match 主体) 而不加括号
    ///
    /// 函数字面量的函数体会吞掉后面的运算符，所以也不算自定界。
    pub fn is_self_delimiting(&self) -> bool {
        match self {
            Self::Identifier { .. }
            | Self::NumberLiteral { .. }
            | Self::StringLiteral { .. }
            | Self::BooleanLiteral { .. }
            | Self::NullLiteral
            | Self::ObjectLiteral { .. }
            | Self::ListLiteral { .. } => true,
            Self::FunctionLiteral { .. }
            | Self::UnaryExpr { .. }
            | Self::BinaryExpr { .. }
            | Self::FunctionCallExpr { .. }
            | Self::MatchExpr { .. } => false,
        }
    }

    /// 节点种类名 (诊断和打印使用)
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Identifier { .. } => "Identifier",
            Self::NumberLiteral { .. } => "NumberLiteral",
            Self::StringLiteral { .. } => "StringLiteral",
            Self::BooleanLiteral { .. } => "BooleanLiteral",
            Self::NullLiteral => "NullLiteral",
            Self::ObjectLiteral { .. } => "ObjectLiteral",
            Self::ListLiteral { .. } => "ListLiteral",
            Self::FunctionLiteral { .. } => "FunctionLiteral",
            Self::UnaryExpr { .. } => "UnaryExpr",
            Self::BinaryExpr { .. } => "BinaryExpr",
            Self::FunctionCallExpr { .. } => "FunctionCallExpr",
            Self::MatchExpr { .. } => "MatchExpr",
        }
    }
}
