//! Emitter - 诊断输出器
//!
//! 诊断统一输出到 stderr；有源码时用 ariadne 画出出错片段。

use crate::diagnostic::{Diagnostic, Span};
use ariadne::{Color, Config, Label, Report, Source};
use colored::*;
use std::fmt::Write;

/// 诊断输出器
pub struct Emitter {
    use_colors: bool,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// 创建无颜色的输出器
    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    /// 输出单个诊断
    pub fn emit(&self, diagnostic: &Diagnostic) {
        eprint!("{}", self.render(diagnostic));
    }

    /// 输出所有诊断
    pub fn emit_all(&self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            self.emit(diagnostic);
            eprintln!(); // 诊断之间空行
        }
    }

    /// 带源码片段输出；没有位置信息时退回普通输出
    pub fn emit_with_source(&self, diagnostic: &Diagnostic, source: &str) {
        eprint!("{}", self.render_with_source(diagnostic, source));
    }

    /// 格式化单个诊断 (不含源码)
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();
        if self.use_colors {
            let _ = writeln!(
                out,
                "{}: {}",
                diagnostic.level.colored_name(),
                diagnostic.message.bold()
            );
        } else {
            let _ = writeln!(out, "{}: {}", diagnostic.level, diagnostic.message);
        }

        if let Some(location) = self.location(diagnostic) {
            let arrow = if self.use_colors {
                "-->".blue().bold().to_string()
            } else {
                "-->".to_string()
            };
            let _ = writeln!(out, "  {} {}", arrow, location);
        }

        for note in &diagnostic.notes {
            let line = format!("note: {}", note);
            if self.use_colors {
                let _ = writeln!(out, "  {} {}", "=".blue().bold(), line.bright_black());
            } else {
                let _ = writeln!(out, "  = {}", line);
            }
        }

        for suggestion in &diagnostic.suggestions {
            let line = format!("help: {}", suggestion.message);
            if self.use_colors {
                let _ = writeln!(out, "  {} {}", "=".green().bold(), line.green());
            } else {
                let _ = writeln!(out, "  = {}", line);
            }
            if let Some(replacement) = &suggestion.replacement {
                let _ = writeln!(out, "        try: {}", replacement);
            }
        }
        out
    }

    /// 用 ariadne 格式化带源码片段的诊断
    pub fn render_with_source(&self, diagnostic: &Diagnostic, source: &str) -> String {
        let Some(span) = diagnostic.span.clone() else {
            return self.render(diagnostic);
        };

        let mut buf = Vec::new();
        match self
            .report(diagnostic, clamp(span, source.len()))
            .write(Source::from(source), &mut buf)
        {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.render(diagnostic),
        }
    }

    fn report(&self, diagnostic: &Diagnostic, span: Span) -> Report<'static, Span> {
        let label = Label::new(span.clone())
            .with_message(&diagnostic.message)
            .with_color(Color::Red);

        let mut builder = Report::build(diagnostic.level.report_kind(), (), span.start)
            .with_config(Config::default().with_color(self.use_colors))
            .with_message(&diagnostic.message)
            .with_label(label);

        for note in &diagnostic.notes {
            builder = builder.with_note(note);
        }
        for suggestion in &diagnostic.suggestions {
            builder = builder.with_help(&suggestion.message);
        }
        builder.finish()
    }

    fn location(&self, diagnostic: &Diagnostic) -> Option<String> {
        match (&diagnostic.file, &diagnostic.span) {
            (Some(file), Some(span)) => Some(format!("{}:{}..{}", file, span.start, span.end)),
            (Some(file), None) => Some(file.clone()),
            (None, Some(span)) => Some(format!("{}..{}", span.start, span.end)),
            (None, None) => None,
        }
    }
}

/// 输入结束处的错误没有对应 token，位置落在源码末尾
fn clamp(span: Span, len: usize) -> Span {
    let start = span.start.min(len);
    let end = span.end.clamp(start, len);
    start..end
}
