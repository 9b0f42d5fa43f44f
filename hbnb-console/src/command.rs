//! Parsing of console input lines.
//!
//! Two syntaxes are accepted:
//! - `<verb> [args...]`, with shell-style quoting (`update User 1 name "Ann Lee"`)
//! - `<Class>.<verb>(args)`, e.g. `User.show("1234")` or
//!   `Place.update("1234", {"max_guest": 4})`

use crate::error::{CommandError, CommandResult};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static DOT_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)\.(\w+)\((.*)\)$").expect("valid regex"));

static DICT_UPDATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*["']?([^"',]*)["']?\s*,\s*(\{.*\})\s*$"#).expect("valid regex"));

/// A parsed input line.
///
/// Argument lists are kept raw so that the executor can report missing
/// pieces in a fixed order (class, id, instance, attribute, value).
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Create(Vec<String>),
    Show(Vec<String>),
    Destroy(Vec<String>),
    All(Vec<String>),
    Count(Vec<String>),
    Update(Vec<String>),
    UpdateMany {
        class: String,
        id: String,
        attributes: Map<String, Value>,
    },
    Help(Option<String>),
    Quit,
    Empty,
}

impl Command {
    /// Parses one line of input.
    pub fn parse(line: &str) -> CommandResult<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(Self::Empty);
        }

        let (verb, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim_start()),
            None => (trimmed, ""),
        };

        let args = || split_args(rest, &[]).ok_or_else(|| unknown(line));
        match verb {
            "quit" | "EOF" => Ok(Self::Quit),
            "help" | "?" => Ok(Self::Help(args()?.into_iter().next())),
            "create" => Ok(Self::Create(args()?)),
            "show" => Ok(Self::Show(args()?)),
            "destroy" => Ok(Self::Destroy(args()?)),
            "all" => Ok(Self::All(args()?)),
            "count" => Ok(Self::Count(args()?)),
            "update" => Ok(Self::Update(args()?)),
            _ => Self::parse_dot_call(trimmed).ok_or_else(|| unknown(line))?,
        }
    }

    /// `<Class>.<verb>(args)`; `None` when the line does not have that shape.
    fn parse_dot_call(line: &str) -> Option<CommandResult<Self>> {
        let caps = DOT_CALL.captures(line)?;
        let class = caps[1].to_owned();
        let verb = &caps[2];
        let inner = &caps[3];

        let with_class = |mut args: Vec<String>| {
            args.insert(0, class.clone());
            args
        };

        let command = match verb {
            "all" => Self::All(vec![class.clone()]),
            "count" => Self::Count(vec![class.clone()]),
            "create" => Self::Create(vec![class.clone()]),
            "show" | "destroy" | "update" => {
                if verb == "update" {
                    if let Some(dict) = DICT_UPDATE.captures(inner) {
                        return Some(parse_dict(&dict[2]).map(|attributes| Self::UpdateMany {
                            class: class.clone(),
                            id: dict[1].to_owned(),
                            attributes,
                        }));
                    }
                }
                let args = match split_args(inner, &[',']) {
                    Some(args) => with_class(args),
                    None => return Some(Err(unknown(line))),
                };
                match verb {
                    "show" => Self::Show(args),
                    "destroy" => Self::Destroy(args),
                    _ => Self::Update(args),
                }
            }
            _ => return Some(Err(unknown(line))),
        };
        Some(Ok(command))
    }
}

fn unknown(line: &str) -> CommandError {
    CommandError::UnknownSyntax(line.trim().to_owned())
}

fn parse_dict(text: &str) -> CommandResult<Map<String, Value>> {
    let value = serde_json::from_str::<Value>(text)
        .or_else(|_| serde_json::from_str::<Value>(&text.replace('\'', "\"")))
        .map_err(|e| CommandError::InvalidValue(e.to_string()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(CommandError::InvalidValue("expected a dictionary".into())),
    }
}

/// Splits `input` into words with shell-style quoting.
///
/// Whitespace and any of `separators` delimit words outside quotes. Single
/// quotes are literal; inside double quotes and bare words a backslash
/// escapes the next character. Returns `None` on an unterminated quote.
pub fn split_args(input: &str, separators: &[char]) -> Option<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_word = true;
                loop {
                    match chars.next()? {
                        '\'' => break,
                        c => current.push(c),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next()? {
                        '"' => break,
                        '\\' => current.push(chars.next()?),
                        c => current.push(c),
                    }
                }
            }
            '\\' => {
                in_word = true;
                current.push(chars.next()?);
            }
            c if c.is_whitespace() || separators.contains(&c) => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }
    if in_word {
        words.push(current);
    }
    Some(words)
}
