use std::path::PathBuf;

use optparse::{OptionSpec, ParseResult, Registry};
use tracing::debug;

use crate::error::{BojtierError, Result};

const DEFAULT_DIR: &str = ".";
const DEFAULT_LOG: &str = "log.txt";
const DEFAULT_EXTENSION: &str = "cpp";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Info,
    Patch,
    Get,
    New,
    Update,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::Help,
        Command::Info,
        Command::Patch,
        Command::Get,
        Command::New,
        Command::Update,
    ];

    /// Resolve a command word, ignoring case.
    pub fn from_word(word: &str) -> Option<Command> {
        let word = word.to_lowercase();
        Command::ALL.into_iter().find(|c| c.name() == word)
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Info => "info",
            Command::Patch => "patch",
            Command::Get => "get",
            Command::New => "new",
            Command::Update => "update",
        }
    }

    /// Option table registered before the command's arguments are parsed.
    pub fn options(self) -> Vec<OptionSpec> {
        match self {
            Command::Help | Command::Get => vec![],
            Command::Info => vec![
                OptionSpec::param("search").short('s'),
                OptionSpec::param("dir").short('d'),
            ],
            Command::Patch => vec![
                OptionSpec::param("log").short('l'),
                OptionSpec::param("dir").short('d'),
                OptionSpec::flag("yes").short('y'),
            ],
            Command::New => vec![
                OptionSpec::param("dir").short('d'),
                OptionSpec::param("tier").short('t'),
                OptionSpec::param("extension").short('x'),
                OptionSpec::flag("yes").short('y'),
                OptionSpec::flag("code").short('c'),
            ],
            Command::Update => vec![
                OptionSpec::param("log").short('l'),
                OptionSpec::param("dir").short('d'),
                OptionSpec::param("filter").short('f'),
                OptionSpec::param("extension").short('x'),
                OptionSpec::flag("yes").short('y'),
                OptionSpec::flag("code").short('c'),
            ],
        }
    }
}

/// A fully resolved command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Help {
        topic: Option<String>,
    },
    Info {
        dir: PathBuf,
        search: Option<String>,
    },
    Patch {
        dir: PathBuf,
        log: PathBuf,
        yes: bool,
    },
    Get {
        problem_id: i32,
    },
    New {
        problem_id: i32,
        dir: PathBuf,
        tier: Option<String>,
        extension: String,
        yes: bool,
        code: bool,
    },
    Update {
        username: String,
        dir: PathBuf,
        log: PathBuf,
        filter: Option<String>,
        extension: String,
        yes: bool,
        code: bool,
    },
}

impl Invocation {
    pub fn command(&self) -> Command {
        match self {
            Invocation::Help { .. } => Command::Help,
            Invocation::Info { .. } => Command::Info,
            Invocation::Patch { .. } => Command::Patch,
            Invocation::Get { .. } => Command::Get,
            Invocation::New { .. } => Command::New,
            Invocation::Update { .. } => Command::Update,
        }
    }

    fn from_parsed(command: Command, parsed: &ParseResult) -> Result<Invocation> {
        let dir = || PathBuf::from(parsed.value("dir").unwrap_or(DEFAULT_DIR));
        let log = || PathBuf::from(parsed.value("log").unwrap_or(DEFAULT_LOG));
        let extension = || {
            parsed
                .value("extension")
                .unwrap_or(DEFAULT_EXTENSION)
                .to_string()
        };
        let owned = |name: &str| parsed.value(name).map(str::to_string);

        let invocation = match command {
            Command::Help => Invocation::Help {
                topic: parsed.positionals().first().cloned(),
            },
            Command::Info => Invocation::Info {
                dir: dir(),
                search: owned("search"),
            },
            Command::Patch => Invocation::Patch {
                dir: dir(),
                log: log(),
                yes: parsed.is_present("yes"),
            },
            Command::Get => Invocation::Get {
                problem_id: problem_id(command, parsed)?,
            },
            Command::New => Invocation::New {
                problem_id: problem_id(command, parsed)?,
                dir: dir(),
                tier: owned("tier"),
                extension: extension(),
                yes: parsed.is_present("yes"),
                code: parsed.is_present("code"),
            },
            Command::Update => Invocation::Update {
                username: parsed
                    .positionals()
                    .first()
                    .cloned()
                    .ok_or_else(|| usage(command, "Missing username"))?,
                dir: dir(),
                log: log(),
                filter: owned("filter"),
                extension: extension(),
                yes: parsed.is_present("yes"),
                code: parsed.is_present("code"),
            },
        };
        Ok(invocation)
    }

    /// Resolved parameters as `(key, value)` pairs, command first.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        fn path(p: &std::path::Path) -> String {
            p.display().to_string()
        }
        fn opt(v: &Option<String>) -> String {
            v.clone().unwrap_or_else(|| "-".to_string())
        }
        fn yes_no(b: bool) -> String {
            let s = if b { "yes" } else { "no" };
            s.to_string()
        }

        let mut params = vec![("command", self.command().name().to_string())];
        match self {
            Invocation::Help { topic } => params.push(("topic", opt(topic))),
            Invocation::Info { dir, search } => {
                params.push(("dir", path(dir)));
                params.push(("search", opt(search)));
            }
            Invocation::Patch { dir, log, yes } => {
                params.push(("dir", path(dir)));
                params.push(("log", path(log)));
                params.push(("yes", yes_no(*yes)));
            }
            Invocation::Get { problem_id } => params.push(("problem-id", problem_id.to_string())),
            Invocation::New {
                problem_id,
                dir,
                tier,
                extension,
                yes,
                code,
            } => {
                params.push(("problem-id", problem_id.to_string()));
                params.push(("dir", path(dir)));
                params.push(("tier", opt(tier)));
                params.push(("extension", extension.clone()));
                params.push(("yes", yes_no(*yes)));
                params.push(("code", yes_no(*code)));
            }
            Invocation::Update {
                username,
                dir,
                log,
                filter,
                extension,
                yes,
                code,
            } => {
                params.push(("username", username.clone()));
                params.push(("dir", path(dir)));
                params.push(("log", path(log)));
                params.push(("filter", opt(filter)));
                params.push(("extension", extension.clone()));
                params.push(("yes", yes_no(*yes)));
                params.push(("code", yes_no(*code)));
            }
        }
        params
    }
}

fn usage(command: Command, message: &str) -> BojtierError {
    BojtierError::Usage {
        command,
        message: message.to_string(),
    }
}

fn problem_id(command: Command, parsed: &ParseResult) -> Result<i32> {
    let raw = parsed
        .positionals()
        .first()
        .ok_or_else(|| usage(command, "Missing problem id"))?;
    raw.parse()
        .map_err(|_| usage(command, "Invalid problem id"))
}

/// Resolve `argv` (program name already removed): command word first,
/// then that command's options and positionals.
pub fn parse_args<I>(argv: I) -> Result<Invocation>
where
    I: IntoIterator<Item = String>,
{
    let mut argv = argv.into_iter();
    let word = argv.next().ok_or(BojtierError::NoCommand)?;
    let command =
        Command::from_word(&word).ok_or_else(|| BojtierError::UnknownCommand(word.clone()))?;
    debug!(command = command.name(), "command selected");

    let registry = Registry::new(command.options())
        .map_err(|source| BojtierError::Register { command, source })?;
    let rest: Vec<String> = argv.collect();
    let parsed = optparse::parse(&registry, &rest)
        .map_err(|source| BojtierError::Parse { command, source })?;

    Invocation::from_parsed(command, &parsed)
}
