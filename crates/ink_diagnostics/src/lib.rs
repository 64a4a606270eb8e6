//! Ink Diagnostics
//!
//! 解析前端的诊断系统：收集词法 / 语法错误，按纯文本、彩色或带源码片段的形式输出。
//!
//! # 核心类型
//!
//! - [`Diagnostic`] - 诊断信息主体
//! - [`DiagnosticLevel`] - 诊断级别（Error/Warning）
//! - [`DiagnosticSink`] - 诊断收集器
//! - [`Emitter`] - 诊断输出器
//!
//! # 示例
//!
//! ```rust
//! use ink_diagnostics::{Diagnostic, DiagnosticSink, Emitter};
//!
//! let mut sink = DiagnosticSink::new();
//! sink.add(
//!     Diagnostic::error("unexpected end of input, expected ')'")
//!         .span(2..2)
//!         .with_note("the group opened here is never closed")
//! );
//!
//! if sink.has_errors() {
//!     let emitter = Emitter::without_colors();
//!     emitter.emit_all(sink.diagnostics());
//! }
//! ```

pub mod diagnostic;
pub mod emitter;
pub mod level;
pub mod sink;

// 重新导出核心类型
pub use diagnostic::{Diagnostic, Span, Suggestion};
pub use emitter::Emitter;
pub use level::DiagnosticLevel;
pub use sink::DiagnosticSink;
