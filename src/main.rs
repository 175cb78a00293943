use formexpr::{CliError, ExpressionContext, default_engine};
use serde::Serialize;
use std::env;
use std::fs;
use std::process::ExitCode;

fn usage(program: &str) -> CliError {
    CliError::Usage(format!(
        "Evaluate, validate or inspect form rule expressions.\n\n\
         Usage:\n  \
         {program} eval <expression> [path/to/context.json]\n  \
         {program} validate <expression>\n  \
         {program} deps <expression>"
    ))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_context(path: Option<&String>) -> Result<ExpressionContext, CliError> {
    match path {
        Some(path) => {
            log::debug!("Loading context from {}", path);
            let raw = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(ExpressionContext::default()),
    }
}

/// Returns whether the command succeeded.
fn run(args: &[String]) -> Result<bool, CliError> {
    let program = args.first().map(String::as_str).unwrap_or("formexpr");
    let engine = default_engine();

    match args.get(1..).unwrap_or_default() {
        [cmd, expr] | [cmd, expr, _] if cmd == "eval" => {
            let context = load_context(args.get(3))?;
            let result = engine.evaluate(expr, &context);
            print_json(&result)?;
            Ok(result.success)
        }
        [cmd, expr] if cmd == "validate" => {
            let result = engine.validate(expr);
            print_json(&result)?;
            Ok(result.valid)
        }
        [cmd, expr] if cmd == "deps" => {
            print_json(&engine.dependencies(expr))?;
            Ok(true)
        }
        _ => Err(usage(program)),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
