use crate::command::Command;
use crate::console::Console;
use crate::error::{CommandError, CommandResult};
use std::io::{self, BufRead, Write};
use tracing::{debug, error};

/// Prompt shown before each interactive command.
pub const PROMPT: &str = "(hbnb) ";

const HELP: &[(&str, &str)] = &[
    ("create", "create <Class>\n        Creates a new instance, saves it and prints its id."),
    ("show", "show <Class> <id>\n        Prints the string representation of an instance."),
    ("destroy", "destroy <Class> <id>\n        Deletes an instance and saves the change."),
    ("all", "all [<Class>]\n        Prints every instance, or every instance of a class."),
    ("count", "count <Class>\n        Prints the number of instances of a class."),
    (
        "update",
        "update <Class> <id> <attribute> \"<value>\"\n        Sets one attribute. Digits are stored as integers, digits.digits as floats.",
    ),
    ("quit", "quit\n        Exits the program."),
    ("EOF", "EOF\n        Exits the program."),
];

/// Whether the loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

enum Reply {
    Print(String),
    Silent,
    Quit,
}

/// Line-oriented command interpreter writing to `out`.
pub struct Shell<W: Write> {
    console: Console,
    out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(console: Console, out: W) -> Self {
        Self { console, out }
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    /// The output sink.
    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Releases the console and the output sink.
    pub fn into_parts(self) -> (Console, W) {
        (self.console, self.out)
    }

    /// Reads commands until `quit`, `EOF` or end of input.
    ///
    /// The prompt is only written when `interactive` is set.
    pub fn run<R: BufRead>(&mut self, input: R, interactive: bool) -> io::Result<()> {
        let mut lines = input.lines();
        loop {
            if interactive {
                write!(self.out, "{PROMPT}")?;
                self.out.flush()?;
            }
            let Some(line) = lines.next().transpose()? else {
                if interactive {
                    writeln!(self.out)?;
                }
                return Ok(());
            };
            if self.execute(&line)? == Flow::Quit {
                return Ok(());
            }
        }
    }

    /// Runs one line and writes its output or error message.
    pub fn execute(&mut self, line: &str) -> io::Result<Flow> {
        debug!(line, "executing");
        match Command::parse(line).and_then(|command| self.dispatch(command)) {
            Ok(Reply::Print(output)) => writeln!(self.out, "{output}")?,
            Ok(Reply::Silent) => {}
            Ok(Reply::Quit) => return Ok(Flow::Quit),
            Err(err) => {
                if let CommandError::Storage(ref cause) = err {
                    error!(%cause, "command failed to persist");
                }
                writeln!(self.out, "{err}")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn dispatch(&mut self, command: Command) -> CommandResult<Reply> {
        let console = &mut self.console;
        match command {
            Command::Empty => Ok(Reply::Silent),
            Command::Quit => Ok(Reply::Quit),
            Command::Help(topic) => Ok(Reply::Print(help(topic.as_deref()))),
            Command::Create(args) => {
                let class = args.first().ok_or(CommandError::MissingClass)?;
                Ok(Reply::Print(console.create(class)?.to_string()))
            }
            Command::Show(args) => {
                let (class, id) = class_and_id(console, &args)?;
                Ok(Reply::Print(console.show(class, id)?))
            }
            Command::Destroy(args) => {
                let (class, id) = class_and_id(console, &args)?;
                console.destroy(class, id)?;
                Ok(Reply::Silent)
            }
            Command::All(args) => {
                let shown = console.all(args.first().map(String::as_str))?;
                Ok(Reply::Print(render_list(&shown)))
            }
            Command::Count(args) => {
                let class = args.first().ok_or(CommandError::MissingClass)?;
                Ok(Reply::Print(console.count(class)?.to_string()))
            }
            Command::Update(args) => {
                let (class, id) = class_and_id(console, &args)?;
                console.locate(class, id)?;
                let attribute = args.get(2).ok_or(CommandError::MissingAttribute)?;
                let value = args.get(3).ok_or(CommandError::MissingValue)?;
                console.update(class, id, attribute, value)?;
                Ok(Reply::Silent)
            }
            Command::UpdateMany { class, id, attributes } => {
                console.update_many(&class, &id, attributes)?;
                Ok(Reply::Silent)
            }
        }
    }
}

/// Validates the leading `<Class> <id>` arguments in reporting order.
fn class_and_id<'a>(console: &Console, args: &'a [String]) -> CommandResult<(&'a str, &'a str)> {
    let class = args.first().ok_or(CommandError::MissingClass)?;
    console.resolve(class)?;
    let id = args.get(1).ok_or(CommandError::MissingId)?;
    Ok((class.as_str(), id.as_str()))
}

/// Renders a list of strings the way a Python list literal prints.
fn render_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| quote(s)).collect();
    format!("[{}]", quoted.join(", "))
}

/// Quotes with `'` unless the text holds a `'` and no `"`.
fn quote(s: &str) -> String {
    let q = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(q);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c if c == q => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(q);
    out
}

fn help(topic: Option<&str>) -> String {
    match topic {
        Some(topic) => HELP
            .iter()
            .find(|(name, _)| *name == topic)
            .map(|(_, text)| (*text).to_owned())
            .unwrap_or_else(|| format!("*** No help on {topic}")),
        None => {
            let names: Vec<&str> = HELP.iter().map(|(name, _)| *name).collect();
            format!(
                "Documented commands (type help <topic>):\n========================================\n{}",
                names.join("  ")
            )
        }
    }
}
