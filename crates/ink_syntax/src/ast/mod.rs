pub mod node;
pub mod printer;
pub mod visitor;

// 重新导出核心类型，方便外部直接使用 ink_syntax::ast::Node 等
pub use node::{MatchClause, Node, ObjectEntry, ObjectKey};
pub use printer::TreePrinter;
pub use visitor::Visitor;
