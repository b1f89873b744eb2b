use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use surdx_cli::{Repl, ReplMsg, ReplOutcome};

fn render(messages: &[ReplMsg]) {
    for msg in messages {
        match msg {
            ReplMsg::Output(s) | ReplMsg::Info(s) => println!("{s}"),
            ReplMsg::Error(s) => eprintln!("\x1b[1;31merror:\x1b[0m {s}"),
        }
    }
}

fn main() -> rustyline::Result<()> {
    env_logger::init();
    let mut repl = Repl::new();
    println!("{}", repl.version_line());

    let mut rl = DefaultEditor::new()?;
    loop {
        match rl.readline("surdx> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                rl.add_history_entry(line.as_str())?;
                match repl.handle_line(&line) {
                    ReplOutcome::Quit => break,
                    ReplOutcome::Continue(messages) => render(&messages),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("\x1b[1;31merror:\x1b[0m {e}");
                break;
            }
        }
    }
    Ok(())
}
