use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use ink_diagnostics::Emitter;
use ink_driver::{parse_source, CompileError, ParseOutput};
use ink_syntax::ast::TreePrinter;
use ink_syntax::lexer::tokenize;
use ink_syntax::parser::ParserConfig;
use ink_syntax::unparse::render;
use tokio::io::AsyncReadExt;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "inkp")]
#[command(about = "Ink 表达式解析器", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,

    /// 关闭彩色诊断
    #[arg(long, global = true)]
    no_color: bool,

    /// 输入 token 通道容量
    #[arg(long, global = true, default_value_t = ParserConfig::default().token_buffer)]
    token_buffer: usize,

    /// 输出 AST 通道容量
    #[arg(long, global = true, default_value_t = ParserConfig::default().node_buffer)]
    node_buffer: usize,
}

#[derive(Args)]
struct Input {
    /// 输入文件 ("-" 表示标准输入)
    input: String,
}

#[derive(Subcommand)]
enum Commands {
    /// 输出词法分析结果
    Tokens(Input),

    /// 解析并打印 AST
    Parse {
        #[command(flatten)]
        input: Input,

        /// 使用 Debug 格式输出
        #[arg(long)]
        debug: bool,
    },

    /// 检查语法错误
    Check(Input),

    /// 输出规范化源码
    Fmt(Input),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let session = Session {
        config: ParserConfig {
            token_buffer: cli.token_buffer,
            node_buffer: cli.node_buffer,
        },
        use_colors: !cli.no_color,
    };
    debug!(config = ?session.config, "parser configured");

    match cli.command {
        Commands::Tokens(input) => cmd_tokens(&input).await?,
        Commands::Parse { input, debug } => session.cmd_parse(&input, debug).await?,
        Commands::Check(input) => session.cmd_check(&input).await?,
        Commands::Fmt(input) => session.cmd_fmt(&input).await?,
    }

    Ok(())
}

/// RUST_LOG 优先，否则 warn (--verbose 时 debug)
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn read_input(input: &Input) -> Result<String> {
    if input.input == "-" {
        let mut source = String::new();
        tokio::io::stdin().read_to_string(&mut source).await?;
        Ok(source)
    } else {
        Ok(tokio::fs::read_to_string(&input.input).await?)
    }
}

/// 词法命令
async fn cmd_tokens(input: &Input) -> Result<()> {
    let source = read_input(input).await?;
    for (tok, span) in tokenize(&source)? {
        println!("{:>4}..{:<4} {:<16} {}", span.start, span.end, format!("{:?}", tok.kind()), tok);
    }
    Ok(())
}

/// 标准输入没有文件名
fn file_name(input: &Input) -> Option<&str> {
    (input.input != "-").then_some(input.input.as_str())
}

struct Session {
    config: ParserConfig,
    use_colors: bool,
}

impl Session {
    /// 解析；失败时输出诊断并以退出码 1 结束
    async fn parse(&self, input: &Input) -> Result<ParseOutput> {
        let source = read_input(input).await?;
        match parse_source(&source, &self.config).await {
            Ok(output) => Ok(output),
            Err(e) => {
                self.report(&e, input, &source);
                std::process::exit(1);
            }
        }
    }

    fn report(&self, err: &CompileError, input: &Input, source: &str) {
        err.emit(file_name(input), Some(source), self.use_colors);
    }

    fn emitter(&self) -> Emitter {
        if self.use_colors {
            Emitter::new()
        } else {
            Emitter::without_colors()
        }
    }

    /// 解析命令
    async fn cmd_parse(&self, input: &Input, debug: bool) -> Result<()> {
        let output = self.parse(input).await?;
        if debug {
            println!("{:#?}", output.nodes);
        } else {
            print!("{}", TreePrinter::print(&output.nodes));
        }
        Ok(())
    }

    /// 检查命令
    async fn cmd_check(&self, input: &Input) -> Result<()> {
        let output = self.parse(input).await?;
        let warnings = output.lint(file_name(input));
        self.emitter().emit_all(warnings.diagnostics());
        println!(
            "ok: {} expressions, {} tokens, {} warnings",
            output.summary.expressions,
            output.summary.tokens,
            warnings.warning_count()
        );
        Ok(())
    }

    /// 格式化命令
    async fn cmd_fmt(&self, input: &Input) -> Result<()> {
        let output = self.parse(input).await?;
        if !output.nodes.is_empty() {
            println!("{}", render(&output.nodes));
        }
        Ok(())
    }
}
