//! Ink Driver
//!
//! 驱动模块：词法分析 -> token 通道 -> 解析管道 -> 收集 AST

pub mod error;

pub use error::{CompileError, CompileResult};

use ink_diagnostics::{Diagnostic, DiagnosticSink, Span};
use ink_syntax::lexer::tokenize;
use ink_syntax::parser::{self, ParseError, ParseSummary, ParserConfig};
use ink_syntax::Node;
use tracing::{debug, info_span, Instrument};

/// 解析结果
#[derive(Debug)]
pub struct ParseOutput {
    /// 顶层表达式，按源码顺序
    pub nodes: Vec<Node>,
    pub summary: ParseSummary,
}

impl ParseOutput {
    /// 不影响解析结果、但值得提示的情况
    pub fn lint(&self, file_path: Option<&str>) -> DiagnosticSink {
        let mut sink = DiagnosticSink::new();
        if self.nodes.is_empty() {
            let mut diag = Diagnostic::warning("input contains no expressions");
            if let Some(path) = file_path {
                diag = diag.with_file(path);
            }
            sink.add(diag);
        }
        sink
    }
}

/// 解析源代码
///
/// token 由独立任务逐个送入输入通道，解析管道把表达式发布到输出通道。
///
/// # Example
/// ```
/// use ink_driver::parse_source;
/// use ink_syntax::parser::ParserConfig;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let output = parse_source("a := 1, f(a)", &ParserConfig::default()).await.unwrap();
/// assert_eq!(output.nodes.len(), 2);
/// # }
/// ```
pub async fn parse_source(source: &str, config: &ParserConfig) -> CompileResult<ParseOutput> {
    // 1. 词法分析
    let (tokens, spans): (Vec<_>, Vec<Span>) = tokenize(source)?.into_iter().unzip();
    debug!(tokens = tokens.len(), "source lexed");

    // 2. 生产者任务
    let (token_tx, token_rx) = config.token_channel();
    let producer = tokio::spawn(
        async move {
            for tok in tokens {
                if token_tx.send(tok).await.is_err() {
                    break;
                }
            }
        }
        .instrument(info_span!("producer")),
    );

    // 3. 解析管道
    let mut handle = parser::spawn(token_rx, config);
    let mut nodes = Vec::new();
    while let Some(node) = handle.nodes.recv().await {
        nodes.push(node);
    }

    let outcome = handle
        .done
        .await
        .map_err(|_| CompileError::PipelineError("completion signal dropped".to_string()))?;
    join(producer).await?;
    join(handle.task).await?;

    match outcome {
        Ok(summary) => Ok(ParseOutput { nodes, summary }),
        Err(error) => {
            let span = error_span(&error, &spans, source.len());
            Err(CompileError::ParseError {
                error,
                span,
                parsed: nodes,
            })
        }
    }
}

/// 从文件解析
pub async fn parse_file(path: &str, config: &ParserConfig) -> CompileResult<ParseOutput> {
    let source = tokio::fs::read_to_string(path).await?;
    parse_source(&source, config).await
}

async fn join(task: tokio::task::JoinHandle<()>) -> CompileResult<()> {
    task.await
        .map_err(|err| CompileError::PipelineError(err.to_string()))
}

/// token 下标 -> 字节范围；输入结束处的错误落在源码末尾
fn error_span(error: &ParseError, spans: &[Span], len: usize) -> Option<Span> {
    let pos = error.pos()?;
    Some(spans.get(pos).cloned().unwrap_or(len..len))
}
