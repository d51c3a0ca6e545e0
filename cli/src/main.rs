mod highlighter;
mod lexer;
mod session;

use abacus::{
    CompilationOptions, Engine, EngineOptions, EvaluatorOptions, FUNCTIONS, render_error_to,
};
use abacus_core::parser;
use bumpalo::Bump;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use reedline::{
    DefaultCompleter, DefaultPrompt, DefaultPromptSegment, DescriptionMode, EditCommand, Emacs,
    IdeMenu, KeyCode, KeyModifiers, Keybindings, MenuBuilder, Reedline, ReedlineEvent,
    ReedlineMenu, Signal, default_emacs_keybindings,
};
use std::io::{BufRead, BufReader, Write};

use crate::highlighter::{BracketValidator, Highlighter};
use crate::session::{Command, Reply, Session};

/// Abacus - A sandboxed arithmetic calculator
#[derive(Parser, Debug)]
#[command(name = "abacus")]
#[command(about = "Evaluate arithmetic expressions safely", long_about = None)]
struct Args {
    /// Print the parsed tree before evaluating (for debugging)
    #[arg(long)]
    debug_parse: bool,

    /// Maximum evaluation depth
    #[arg(long, default_value_t = EvaluatorOptions::default().max_depth)]
    max_depth: usize,

    /// Disable colored error output
    #[arg(long)]
    no_color: bool,

    /// Expression to evaluate (if not provided, reads from stdin)
    expression: Option<String>,
}

fn add_menu_keybindings(keybindings: &mut Keybindings) {
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );
    keybindings.add_binding(
        KeyModifiers::ALT,
        KeyCode::Enter,
        ReedlineEvent::Edit(vec![EditCommand::InsertNewline]),
    );
}

fn setup_reedline() -> (Reedline, DefaultPrompt) {
    let mut words: Vec<String> = ["help", "history", "clear", "exit", "quit"]
        .iter()
        .map(|command| command.to_string())
        .collect();
    words.extend(FUNCTIONS.iter().map(|function| function.name.to_string()));

    let completer = Box::new({
        let mut completions = DefaultCompleter::with_inclusions(&['_']);
        completions.insert(words);
        completions
    });

    // Use the interactive menu to select options from the completer
    let ide_menu = IdeMenu::default()
        .with_name("completion_menu")
        .with_min_completion_width(0)
        .with_max_completion_width(50)
        .with_max_completion_height(u16::MAX)
        .with_padding(0)
        .with_cursor_offset(0)
        .with_description_mode(DescriptionMode::PreferRight)
        .with_min_description_width(0)
        .with_max_description_width(50)
        .with_description_offset(1)
        .with_correct_cursor_pos(false);

    let completion_menu = Box::new(ide_menu);

    let mut keybindings = default_emacs_keybindings();
    add_menu_keybindings(&mut keybindings);

    let edit_mode = Box::new(Emacs::new(keybindings));

    // No history backend: entered expressions are never written to disk.
    let line_editor = Reedline::create()
        .with_highlighter(Box::new(Highlighter))
        .with_validator(Box::new(BracketValidator))
        .with_completer(completer)
        .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
        .with_edit_mode(edit_mode);

    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic("abacus".to_string()),
        DefaultPromptSegment::Empty,
    );

    (line_editor, prompt)
}

fn print_parse_tree(line: &str) {
    let Command::Evaluate(expr) = Command::parse(line) else {
        return;
    };
    let arena = Bump::new();
    // Parse failures are reported by the evaluation that follows.
    if let Ok(parsed) = parser::parse(&arena, expr) {
        println!("=== Parsed Tree ===");
        println!("{:#?}", parsed.expr);
        println!();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Continue,
    Failed,
    Exit,
}

fn interpret_input(session: &mut Session, line: &str, args: &Args) -> Result<Outcome> {
    if args.debug_parse {
        print_parse_tree(line);
    }

    let mut stdout = std::io::stdout();
    match session.handle(line) {
        Reply::Silent => Ok(Outcome::Continue),
        Reply::Exit => Ok(Outcome::Exit),
        Reply::Output(text) => {
            writeln!(stdout, "{text}").into_diagnostic()?;
            Ok(Outcome::Continue)
        }
        Reply::Value(value) => {
            writeln!(stdout, "{value}").into_diagnostic()?;
            Ok(Outcome::Continue)
        }
        Reply::Failure { source, error } => {
            let mut stderr = std::io::stderr();
            render_error_to(&source, &error, &mut stderr, !args.no_color).into_diagnostic()?;
            Ok(Outcome::Failed)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use ABACUS_LOG or RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_env("ABACUS_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .or_else(|_| EnvFilter::try_new("warn"))
        .into_diagnostic()?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let engine = Engine::new(EngineOptions {
        default_compilation_options: CompilationOptions::default(),
        default_execution_options: EvaluatorOptions {
            max_depth: args.max_depth,
        },
    });
    let mut session = Session::new(engine);

    // Check if we have a direct expression argument
    if let Some(expr) = &args.expression {
        if interpret_input(&mut session, expr, &args)? == Outcome::Failed {
            std::process::exit(1);
        }
        return Ok(());
    }

    // Otherwise, check if we're in interactive or pipe mode
    let is_interactive = atty::is(atty::Stream::Stdin);

    if is_interactive {
        // Interactive REPL mode
        let (mut line_editor, prompt) = setup_reedline();

        println!("abacus - type \"help\" for commands, \"exit\" to quit");

        loop {
            let sig = match line_editor.read_line(&prompt) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Reedline error: {e}");
                    return Ok(());
                }
            };

            match sig {
                Signal::Success(buffer) => {
                    if interpret_input(&mut session, &buffer, &args)? == Outcome::Exit {
                        return Ok(());
                    }
                }
                Signal::CtrlD | Signal::CtrlC => {
                    println!();
                    return Ok(());
                }
            }
        }
    } else {
        // Pipe/stdin mode
        let stdin = std::io::stdin();
        let reader = BufReader::new(stdin.lock());

        for line in reader.lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("Error reading line from stdin: {}", e);
                    return Ok(());
                }
            };

            if interpret_input(&mut session, &line, &args)? == Outcome::Exit {
                break;
            }
        }
    }

    Ok(())
}
