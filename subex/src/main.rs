mod args;
mod error;

use args::Args;
use error::CliError;
use log::{debug, info};
use rustyline::{error::ReadlineError, DefaultEditor};
use simple_logger::SimpleLogger;
use std::{fs, io::{self, IsTerminal, Read}, process::ExitCode};
use subex_analysis::{canonical, closed::find_maximally_closed, subexpr::find};
use subex_parser::parse;

/// Parses the given input and prints the analyses selected by `args`.
fn analyze(input: &str, args: &Args) -> Result<(), CliError> {
    let tree = parse(input)?;
    let Some(root) = tree.root() else {
        return Ok(());
    };

    println!("Built successfully");
    println!("Expression: {}", root);

    if let Some(order) = args.order {
        let nodes = tree.traverse(order)
            .map(|node| node.text())
            .collect::<Vec<_>>();
        println!("Traversal ({:?}): {}", order, nodes.join(" "));
    }

    if !args.no_repeated {
        println!("Repeated subexpressions:");
        for repeated in find(&tree).iter().filter(|repeated| !repeated.is_trivial()) {
            println!("  {}", repeated);
        }
    }

    if !args.no_closed {
        println!("Maximally closed subexpressions:");
        for node in find_maximally_closed(&tree) {
            println!("  {}", canonical(node));
        }
    }

    Ok(())
}

/// Analyzes the given input, reporting any error to stderr. Returns true on success.
fn run(src_id: &str, input: &str, args: &Args) -> bool {
    if input.trim().is_empty() {
        println!("Enter an expression");
        return false;
    }

    match analyze(input, args) {
        Ok(()) => true,
        Err(err) => {
            err.report_to_stderr(src_id, input);
            false
        },
    }
}

/// Runs the interactive prompt until end of input.
fn repl(args: &Args) -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;

    fn process_line(rl: &mut DefaultEditor, args: &Args) -> Result<(), ReadlineError> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(());
        }

        rl.add_history_entry(&input)?;

        run("input", &input, args);
        Ok(())
    }

    loop {
        match process_line(&mut rl, args) {
            Ok(()) => (),
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => return Ok(()),
            Err(err) => return Err(err),
        }
    }
}

/// Reads the whole expression from the given file, or stdin if there is none.
fn read_input(file: Option<&std::path::Path>) -> Result<String, CliError> {
    let input = match file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            input
        },
    };
    Ok(input)
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();

    if let Err(err) = SimpleLogger::new().with_level(args.log.to_level_filter()).init() {
        eprintln!("could not install logger: {}", err);
    }
    debug!("{:?}", args);

    let ok = if let Some(expression) = &args.expression {
        run("expression", expression, &args)
    } else if args.file.is_some() || !io::stdin().is_terminal() {
        match &args.file {
            Some(path) => info!("reading expression from {}", path.display()),
            None => info!("reading expression from stdin"),
        }
        match read_input(args.file.as_deref()) {
            Ok(input) => run("input", &input, &args),
            Err(err) => {
                eprintln!("{}", err);
                false
            },
        }
    } else {
        match repl(&args) {
            Ok(()) => true,
            Err(err) => {
                eprintln!("{}", err);
                false
            },
        }
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
