use super::*;

// 泛型 R: 返回值 (Result)
pub trait Visitor<R> {
    // 访问表达式节点
    fn visit_node(&mut self, node: &Node) -> R;

    // 访问 match 分支
    fn visit_clause(&mut self, clause: &MatchClause) -> R;

    // 按顺序访问顶层表达式
    fn visit_all(&mut self, nodes: &[Node]) -> Vec<R> {
        nodes.iter().map(|node| self.visit_node(node)).collect()
    }
}
