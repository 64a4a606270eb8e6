//! Channel Pipeline
//!
//! token 通道 -> 收集 -> 解析 -> AST 通道 -> 完成信号。
//!
//! 结构化解析在 token 全部到齐后同步进行；挂起点只有两个：
//! 从输入通道收 token，和向输出通道发节点。

use super::error::ParseError;
use super::TopLevel;
use crate::ast::Node;
use crate::token::Token;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, instrument, trace};

/// 管道配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// 输入 token 通道容量
    pub token_buffer: usize,
    /// 输出 AST 通道容量
    pub node_buffer: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            token_buffer: 256,
            node_buffer: 64,
        }
    }
}

impl ParserConfig {
    /// 创建输入 token 通道 (容量至少为 1)
    pub fn token_channel(&self) -> (mpsc::Sender<Token>, mpsc::Receiver<Token>) {
        mpsc::channel(self.token_buffer.max(1))
    }

    /// 创建输出 AST 通道 (容量至少为 1)
    pub fn node_channel(&self) -> (mpsc::Sender<Node>, mpsc::Receiver<Node>) {
        mpsc::channel(self.node_buffer.max(1))
    }
}

/// 一次解析的统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseSummary {
    /// 收到的 token 数
    pub tokens: usize,
    /// 发布的顶层表达式数
    pub expressions: usize,
}

impl ParseSummary {
    pub fn is_empty(&self) -> bool {
        self.expressions == 0
    }
}

/// 完成信号携带的结果
pub type ParseOutcome = Result<ParseSummary, ParseError>;

/// 把输入通道收空，直到生产者关闭它
pub async fn collect_tokens(source: &mut mpsc::Receiver<Token>) -> Vec<Token> {
    let mut tokens = Vec::new();
    while let Some(tok) = source.recv().await {
        trace!(kind = ?tok.kind(), token = %tok, "token received");
        tokens.push(tok);
    }
    debug!(count = tokens.len(), "token stream closed");
    tokens
}

/// 解析管道
///
/// 依次发布每个顶层表达式。无论成功、出错还是接收端挂断，
/// 都先关闭输出通道，再恰好发送一次完成信号。
#[instrument(skip_all)]
pub async fn parse(
    mut source: mpsc::Receiver<Token>,
    nodes: mpsc::Sender<Node>,
    done: oneshot::Sender<ParseOutcome>,
) {
    let tokens = collect_tokens(&mut source).await;
    let outcome = publish(&tokens, &nodes).await;

    drop(nodes);

    match &outcome {
        Ok(summary) => debug!(expressions = summary.expressions, "parse finished"),
        Err(err) => debug!(error = %err, "parse aborted"),
    }
    if done.send(outcome).is_err() {
        debug!("completion receiver dropped");
    }
}

async fn publish(tokens: &[Token], nodes: &mpsc::Sender<Node>) -> Result<ParseSummary, ParseError> {
    let mut published = 0;
    for node in TopLevel::new(tokens) {
        let node = node?;
        debug!(kind = node.kind_name(), "expression parsed");
        if nodes.send(node).await.is_err() {
            return Err(ParseError::ConsumerDisconnected { published });
        }
        published += 1;
    }
    Ok(ParseSummary {
        tokens: tokens.len(),
        expressions: published,
    })
}

/// 已启动的解析任务
#[derive(Debug)]
pub struct ParserHandle {
    /// 顶层表达式，按解析顺序到达
    pub nodes: mpsc::Receiver<Node>,
    /// 完成信号
    pub done: oneshot::Receiver<ParseOutcome>,
    pub task: JoinHandle<()>,
}

/// 在 tokio 运行时上启动解析管道
pub fn spawn(source: mpsc::Receiver<Token>, config: &ParserConfig) -> ParserHandle {
    let (node_tx, node_rx) = config.node_channel();
    let (done_tx, done_rx) = oneshot::channel();
    let task = tokio::spawn(parse(source, node_tx, done_tx));
    ParserHandle {
        nodes: node_rx,
        done: done_rx,
        task,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[tokio::test]
    async fn test_collect_preserves_order() {
        let (tx, mut rx) = mpsc::channel(2);
        let producer = tokio::spawn(async move {
            for name in ["a", "b", "c"] {
                tx.send(Token::ident(name)).await.unwrap();
            }
        });
        let tokens = collect_tokens(&mut rx).await;
        producer.await.unwrap();
        assert_eq!(
            tokens,
            vec![Token::ident("a"), Token::ident("b"), Token::ident("c")]
        );
    }

    #[tokio::test]
    async fn test_empty_stream_signals_completion() {
        let config = ParserConfig::default();
        let (tx, rx) = config.token_channel();
        drop(tx);

        let mut handle = spawn(rx, &config);
        assert!(handle.nodes.recv().await.is_none());
        let outcome = handle.done.await.unwrap();
        assert_eq!(outcome, Ok(ParseSummary::default()));
        assert!(outcome.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_consumer_hang_up_is_reported() {
        let config = ParserConfig {
            token_buffer: 8,
            node_buffer: 1,
        };
        let (tx, rx) = config.token_channel();
        let (node_tx, node_rx) = config.node_channel();
        let (done_tx, done_rx) = oneshot::channel();
        drop(node_rx);

        for tok in [
            Token::ident("a"),
            Token::new(TokenKind::Separator),
            Token::ident("b"),
        ] {
            tx.send(tok).await.unwrap();
        }
        drop(tx);

        parse(rx, node_tx, done_tx).await;
        assert_eq!(
            done_rx.await.unwrap(),
            Err(ParseError::ConsumerDisconnected { published: 0 })
        );
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let config = ParserConfig {
            token_buffer: 0,
            node_buffer: 0,
        };
        // mpsc::channel(0) 会 panic
        let _ = config.token_channel();
        let _ = config.node_channel();
    }
}
