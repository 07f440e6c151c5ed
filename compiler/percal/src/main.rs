use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use percal_eval::{evaluate_with_limit, EvalError, DEFAULT_MAX_DEPTH};
use percal_parser::parse_source_with_limit;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "percal",
    version,
    about = "Evaluator for compounding percentage-adjustment expressions",
    long_about = "percal evaluates expressions of the percentage-adjustment language.\n\n\
        An expression is a number (10, 1.5), a percent literal (1.5%), or a\n\
        nested call increase(base, amount) / decrease(base, amount).\n\n\
        EXAMPLES:\n\
        \n  percal eval 'increase(10, 1.5%)'          Prints 10.15\n\
        \n  percal eval 'decrease(10, 2.5%)'          Prints 9.75\n\
        \n  echo 'increase(10, 5)' | percal eval      Read the expression from stdin\n\
        \n  percal json 'increase(10, 1.5%)'          Emit the result as JSON\n\
        \n  percal repl                               Start an interactive session"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate an expression and print its value
    #[command(
        about = "Evaluate an expression and print its numeric value",
        long_about = "Evaluates a percentage-adjustment expression.\n\n\
            The expression is taken from the argument, from --file, or from\n\
            stdin when neither is given."
    )]
    Eval(EvalArgs),

    /// Evaluate an expression and emit the result as JSON
    #[command(about = "Evaluate an expression and emit the result as JSON")]
    Json(EvalArgs),

    /// Start an interactive Read-Eval-Print Loop
    #[command(
        about = "Start an interactive REPL session",
        long_about = "Start an interactive Read-Eval-Print Loop.\n\n\
            Commands:\n\
            \n  :help   Show available REPL commands\n\
            \n  :quit   Exit the REPL (also :q, :exit)"
    )]
    Repl,
}

#[derive(Debug, Args, Clone)]
struct EvalArgs {
    /// Expression to evaluate (reads from stdin if not provided)
    #[arg(value_name = "EXPR")]
    expr: Option<String>,

    /// Read the expression from a file instead of the command line
    #[arg(short = 'f', long = "file", value_name = "FILE", conflicts_with = "expr")]
    file: Option<PathBuf>,

    /// Maximum call nesting depth accepted by the parser
    #[arg(long = "max-depth", value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Print the parsed expression tree instead of evaluating it
    #[arg(long = "ast")]
    ast: bool,
}

fn read_expression_from_input(args: &EvalArgs) -> Result<String, String> {
    if let Some(ref expr) = args.expr {
        Ok(expr.clone())
    } else if let Some(ref path) = args.file {
        fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {e}", path.display()))
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read from stdin: {e}"))?;
        Ok(buf)
    }
}

fn error_json(err: &EvalError) -> serde_json::Value {
    json!({
        "error": {
            "kind": err.kind(),
            "message": err.to_string(),
        }
    })
}

fn run_eval(source: &str, args: &EvalArgs, mode: OutputMode) -> i32 {
    if args.ast {
        return run_ast(source, args, mode);
    }

    match evaluate_with_limit(source, args.max_depth) {
        Ok(value) => {
            match mode {
                OutputMode::Text => println!("{value}"),
                OutputMode::Json => println!(
                    "{}",
                    json!({ "input": source.trim(), "value": value })
                ),
            }
            0
        }
        Err(err) => {
            match mode {
                OutputMode::Text => eprintln!("error: {err}"),
                OutputMode::Json => println!("{}", error_json(&err)),
            }
            1
        }
    }
}

fn run_ast(source: &str, args: &EvalArgs, mode: OutputMode) -> i32 {
    match parse_source_with_limit(source, args.max_depth) {
        Ok(expr) => match mode {
            OutputMode::Text => {
                println!("{expr}");
                0
            }
            OutputMode::Json => match percal_ast::to_json(&expr) {
                Ok(s) => {
                    println!("{s}");
                    0
                }
                Err(e) => {
                    eprintln!("error: failed to serialize expression tree: {e}");
                    2
                }
            },
        },
        Err(err) => {
            let err = EvalError::from(err);
            match mode {
                OutputMode::Text => eprintln!("error: {err}"),
                OutputMode::Json => println!("{}", error_json(&err)),
            }
            1
        }
    }
}

fn run_repl() -> i32 {
    use rustyline::error::ReadlineError;
    use rustyline::Editor;
    let mut rl = match Editor::<(), rustyline::history::DefaultHistory>::new() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("error: failed to initialize repl: {e}");
            return 2;
        }
    };

    println!("percal repl — type an expression, or :help for commands");
    loop {
        match rl.readline("percal> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);
                match trimmed {
                    ":quit" | ":q" | ":exit" => return 0,
                    ":help" => {
                        println!(":help   Show this message");
                        println!(":quit   Exit the REPL (also :q, :exit)");
                        println!("Anything else is evaluated as an expression.");
                    }
                    expr => match percal_eval::evaluate(expr) {
                        Ok(value) => println!("{value}"),
                        Err(err) => println!("error: {err}"),
                    },
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => return 0,
            Err(e) => {
                eprintln!("error: repl failed: {e}");
                return 2;
            }
        }
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(filter)
        .init();
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Eval(args) => {
            let source = match read_expression_from_input(&args) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("error: {e}");
                    return 2;
                }
            };
            run_eval(&source, &args, OutputMode::Text)
        }
        Command::Json(args) => {
            let source = match read_expression_from_input(&args) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("error: {e}");
                    return 2;
                }
            };
            run_eval(&source, &args, OutputMode::Json)
        }
        Command::Repl => run_repl(),
    }
}

fn main() {
    std::process::exit(run_cli());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_args(expr: &str) -> EvalArgs {
        EvalArgs {
            expr: Some(expr.to_string()),
            file: None,
            max_depth: DEFAULT_MAX_DEPTH,
            ast: false,
        }
    }

    #[test]
    fn eval_subcommand_parses_expression_argument() {
        let cli = Cli::parse_from(["percal", "eval", "increase(10, 1.5%)"]);
        match cli.command {
            Command::Eval(args) => {
                assert_eq!(args.expr.as_deref(), Some("increase(10, 1.5%)"));
                assert_eq!(args.max_depth, DEFAULT_MAX_DEPTH);
            }
            other => panic!("expected eval subcommand, got {other:?}"),
        }
    }

    #[test]
    fn max_depth_flag_overrides_the_default() {
        let cli = Cli::parse_from(["percal", "eval", "--max-depth", "8", "10"]);
        match cli.command {
            Command::Eval(args) => assert_eq!(args.max_depth, 8),
            other => panic!("expected eval subcommand, got {other:?}"),
        }
    }

    #[test]
    fn successful_evaluation_exits_zero() {
        let args = eval_args("increase(10, 1.5%)");
        assert_eq!(run_eval("increase(10, 1.5%)", &args, OutputMode::Text), 0);
    }

    #[test]
    fn malformed_expression_exits_one() {
        let args = eval_args("increase(10)");
        assert_eq!(run_eval("increase(10)", &args, OutputMode::Json), 1);
    }

    #[test]
    fn error_json_carries_the_kind() {
        let err = EvalError::NumberFormat("abc".to_string());
        let value = error_json(&err);
        assert_eq!(value["error"]["kind"], "number-format");
    }
}
