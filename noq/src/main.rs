use std::path::{Path, PathBuf};

use anyhow::Result;
use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use clap::Parser;
use noq::{lang::Token, matcher, parser, prelude::*, stack, term::Rule, Error};
use tracing_subscriber::EnvFilter;
use util::repl;

#[derive(Parser)]
struct Args {
    /// Keep the line history in this file
    #[arg(long, value_name = "FILE", default_value = "/tmp/noq.history")]
    history: PathBuf,

    /// Neither read nor write a history file
    #[arg(long)]
    no_history: bool,

    /// Log every rewrite (same as `RUST_LOG=debug`)
    #[arg(short, long)]
    verbose: bool,
}

fn build_report(e: &Error) -> Option<Report> {
    let (span, found) = match e {
        Error::Lex(e) => (
            e.span(),
            e.found
                .map_or_else(|| "end of the input".to_string(), |c| c.to_string()),
        ),
        Error::Parse(e) => (e.span.clone(), e.found.to_string()),
        Error::Substitution(_) => return None,
    };
    Some(
        Report::build(ReportKind::Error, (), span.start)
            .with_message(e.to_string())
            .with_label(
                Label::new(span)
                    .with_message(format!("Unexpected {}", found.fg(Color::Red)))
                    .with_color(Color::Red),
            )
            .finish(),
    )
}

/// `:cmd rest` into `("cmd", "rest")`. Input without a leading `:` has no command.
fn split_command(input: &str) -> (&str, &str) {
    match input.strip_prefix(':') {
        Some(stripped) => {
            let stripped = stripped.trim_start();
            stripped.split_once(' ').unwrap_or((stripped, ""))
        }
        None => ("", input),
    }
}

type CommandResult = Result<(), Error>;

struct Repl {
    rule: Option<Rule>,
    history: Option<PathBuf>,
}
impl Repl {
    fn tokenize(input: &str) -> CommandResult {
        let tokens = parser::lex(input)?
            .into_iter()
            .map(Spanned::forget_span)
            .collect::<Vec<Token>>();
        println!("{tokens:?}");
        Ok(())
    }

    fn parse(input: &str) -> CommandResult {
        let term = parser::parse_term(input)?;
        println!("{term}");
        println!("{term:?}");
        Ok(())
    }

    fn set_rule(&mut self, input: &str) -> CommandResult {
        let rule = parser::parse_rule(input)?;
        println!("{rule}");
        self.rule = Some(rule);
        Ok(())
    }

    fn pattern_match(input: &str) -> CommandResult {
        let Rule { head, body } = parser::parse_rule(input)?;
        match matcher::pattern_match(&head, &body) {
            Some(bindings) => println!("{bindings}"),
            None => println!("no match"),
        }
        Ok(())
    }

    fn apply(&self, input: &str) -> CommandResult {
        let Some(rule) = &self.rule else {
            eprintln!("No rule yet, set one with :rule head = body");
            return Ok(());
        };
        let term = parser::parse_term(input)?;
        println!("{}", rule.apply_all(&term)?);
        Ok(())
    }

    fn show_help() {
        println!(
            "{}",
            r#"
term                    -- same as :apply term
:tokenize   text        -- show tokenized text
:parse      term        -- show parsed term
:rule       head = body -- set the rule used by :apply
:match      pattern = term
                        -- show the bindings of term against pattern
:apply      term        -- rewrite every match of the rule in term, once
:help                   -- show this message
        "#
            .trim()
        );
    }

    fn handle_repl_input(&mut self, input: &str) -> CommandResult {
        let (cmd, input) = split_command(input);
        match cmd {
            "to" | "tokenize" => Self::tokenize(input)?,
            "p" | "parse" => Self::parse(input)?,
            "r" | "rule" => self.set_rule(input)?,
            "m" | "match" => Self::pattern_match(input)?,
            "" | "a" | "apply" => self.apply(input)?,
            "h" | "he" | "hel" | "help" => Self::show_help(),
            _ => {
                eprintln!("Unknown command {cmd}");
                Self::show_help();
            }
        }
        Ok(())
    }
}
impl repl::Repl for Repl {
    type Error = anyhow::Error;
    fn history(&self) -> Option<&Path> {
        self.history.as_deref()
    }
    fn evaluate(&mut self, input: String) -> Result<(), Self::Error> {
        if input.trim().is_empty() {
            return Ok(());
        }
        if let Err(e) = self.handle_repl_input(&input) {
            match build_report(&e) {
                Some(report) => report.eprint(Source::from(&input))?,
                None => eprintln!("Error: {e}"),
            }
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    println!("Hi, this is a term rewriting REPL. :h to show help");
    println!();
    let history = (!args.no_history).then_some(args.history);
    stack::with_large_stack(move || repl::start_repl(Repl { rule: None, history }))??;
    Ok(())
}
