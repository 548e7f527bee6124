// Rotor: expression-language tokenizer and parser

use std::fs;
use std::io::{self, Write};

use log::error;

use rotor::parser::lexer::Lexer;
use rotor::parser::parse::Parser;
use rotor::printer::Printer;
use rotor::symbols::FunctionTable;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() != 2 {
        let program_name = args.first().map(|s| s.as_str()).unwrap_or("rotor");
        eprintln!("Usage: {} <file>", program_name);
        eprintln!();
        eprintln!("Set RUST_LOG to control diagnostics (error, warn, info, debug, trace).");
        std::process::exit(1);
    }

    let path = &args[1];

    // Read source code
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            error!("Error opening file '{}': {}", path, e);
            std::process::exit(1);
        }
    };

    let printer = Printer::for_stdout();

    let mut lexer = Lexer::new(&source);
    let tokens = lexer.tokenize();

    if log::log_enabled!(log::Level::Debug) {
        let mut table = Vec::new();
        Printer::new(false).print_tokens(&mut table, &tokens)?;
        log::debug!("tokens:\n{}", String::from_utf8_lossy(&table));
    }

    let mut parser = Parser::new(tokens);
    let ast = parser.parse_all();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for root in ast.roots() {
        printer.print_node(&mut out, &ast, *root)?;
    }
    out.flush()?;

    let functions = FunctionTable::build(&ast);
    for function in functions.functions() {
        log::info!(
            "fn {}({})",
            function.name.as_deref().unwrap_or("<anonymous>"),
            function
                .parameters
                .iter()
                .map(|p| match &p.ty {
                    Some(ty) => format!("{}: {}", p.name, ty),
                    None => p.name.clone(),
                })
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    let problems = lexer.diagnostics().len() + parser.diagnostics().len();
    if problems > 0 {
        log::info!("{} diagnostic(s) reported for {}", problems, path);
    }

    Ok(())
}
