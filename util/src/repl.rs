use std::path::{Path, PathBuf};

use rustyline::{error::ReadlineError, Editor};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum Error<E> {
    #[error(transparent)]
    Readline(ReadlineError),
    #[error("Evaluation failed: {0:?}")]
    Evaluate(E),
}

pub trait Repl {
    type Error: std::fmt::Debug;
    const PROMPT: &'static str = ">> ";
    /// File to load the line history from and to save it to after every input.
    fn history(&self) -> Option<&Path> {
        None
    }
    fn evaluate(&mut self, input: String) -> Result<(), Self::Error>;
}

/// Reads lines until Ctrl-C or Ctrl-D. A line ending with `\` continues on the next one.
pub fn start_repl<R: Repl>(mut repl: R) -> Result<(), Error<R::Error>> {
    let mut editor = Editor::<()>::new();
    let history = repl.history().map(PathBuf::from);
    if let Some(history) = &history {
        if let Err(e) = editor.load_history(history) {
            debug!("no history loaded from {}: {e}", history.display());
        }
    }
    let mut input: Option<String> = None;
    loop {
        match editor.readline(R::PROMPT) {
            Ok(mut line) if line.ends_with('\\') => {
                line.pop();
                line.push('\n');
                if let Some(input) = input.as_mut() {
                    input.push_str(line.as_str());
                } else {
                    input = Some(line);
                }
            }
            Ok(line) => {
                let input = if let Some(mut input) = input.take() {
                    input.push_str(line.as_str());
                    input
                } else {
                    line
                };
                editor.add_history_entry(input.as_str());
                repl.evaluate(input).map_err(Error::Evaluate)?;
                if let Some(history) = &history {
                    if let Err(e) = editor.save_history(history) {
                        warn!("cannot save history to {}: {e}", history.display());
                    }
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                println!("Bye!");
                break Ok(());
            }
            Err(e) => break Err(Error::Readline(e)),
        }
    }
}
