use ink_syntax::ast::TreePrinter;
use ink_syntax::lexer::tokens;
use ink_syntax::parser::{spawn, ParserConfig};

#[tokio::main]
async fn main() {
    let code = "fib := n => n : {\n  0 -> 0\n  1 -> 1\n  _ -> add(fib(n - 1), fib(n - 2))\n}";
    println!("Source:\n{}\n", code);

    let toks = match tokens(code) {
        Ok(toks) => toks,
        Err(e) => {
            println!("✗ lex failed: {}", e);
            return;
        }
    };

    // 模拟上游词法器：逐个发送 token
    let config = ParserConfig::default();
    let (tx, rx) = config.token_channel();
    let mut handle = spawn(rx, &config);
    tokio::spawn(async move {
        for tok in toks {
            if tx.send(tok).await.is_err() {
                break;
            }
        }
    });

    let mut nodes = Vec::new();
    while let Some(node) = handle.nodes.recv().await {
        nodes.push(node);
    }

    match handle.done.await {
        Ok(Ok(summary)) => {
            print!("{}", TreePrinter::print(&nodes));
            println!("\n✓ {} tokens, {} expressions", summary.tokens, summary.expressions);
        }
        Ok(Err(e)) => println!("✗ parse failed: {}", e),
        Err(_) => println!("✗ parser task vanished"),
    }
}
