//! Compilation Errors
//!
//! 驱动层的错误类型，集成统一诊断系统

use ink_diagnostics::{Diagnostic, DiagnosticSink, Emitter, Span};
use ink_syntax::lexer::LexError;
use ink_syntax::{Node, ParseError};
use thiserror::Error;

/// 编译错误
#[derive(Debug, Error)]
pub enum CompileError {
    /// 词法错误
    #[error("Lexical error: {0}")]
    LexError(#[from] LexError),

    /// 语法错误，附带出错位置和此前已发布的表达式
    #[error("Parse error: {error}")]
    ParseError {
        #[source]
        error: ParseError,
        span: Option<Span>,
        parsed: Vec<Node>,
    },

    /// 解析任务异常退出
    #[error("Pipeline error: {0}")]
    PipelineError(String),

    /// IO 错误
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CompileError {
    /// 转换为诊断并收集到 DiagnosticSink
    pub fn collect_to_sink(&self, sink: &mut DiagnosticSink, file_path: Option<&str>) {
        let mut add_diag = |diag: Diagnostic| {
            if let Some(path) = file_path {
                sink.add(diag.with_file(path));
            } else {
                sink.add(diag);
            }
        };

        match self {
            CompileError::LexError(err) => {
                add_diag(Diagnostic::error(err.to_string()).span(err.span().clone()));
            }
            CompileError::ParseError {
                error,
                span,
                parsed,
            } => {
                let mut diag = Diagnostic::error(error.to_string());
                if let Some(span) = span {
                    diag = diag.span(span.clone());
                }
                if !parsed.is_empty() {
                    diag = diag.with_note(format!(
                        "{} expression(s) parsed before the error",
                        parsed.len()
                    ));
                }
                if error.is_end_of_input() {
                    diag = diag.suggest("the input ends in the middle of an expression");
                }
                add_diag(diag);
            }
            CompileError::PipelineError(msg) => {
                add_diag(Diagnostic::error(format!("Pipeline error: {}", msg)));
            }
            CompileError::IoError(err) => {
                add_diag(Diagnostic::error(format!("IO error: {}", err)));
            }
        }
    }

    /// 使用统一诊断系统输出错误
    pub fn emit(&self, file_path: Option<&str>, source: Option<&str>, use_colors: bool) {
        let mut sink = DiagnosticSink::new();
        self.collect_to_sink(&mut sink, file_path);

        let emitter = if use_colors {
            Emitter::new()
        } else {
            Emitter::without_colors()
        };
        if let Some(src) = source {
            for diag in sink.diagnostics() {
                emitter.emit_with_source(diag, src);
            }
        } else {
            emitter.emit_all(sink.diagnostics());
        }
    }

    /// 出错前已解析的表达式
    pub fn parsed(&self) -> &[Node] {
        match self {
            CompileError::ParseError { parsed, .. } => parsed,
            _ => &[],
        }
    }
}

/// 编译结果类型
pub type CompileResult<T> = Result<T, CompileError>;
