use std::io::{self, Write};

use crate::arguments::Command;

pub const APP_NAME: &str = "bojtier";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// ANSI 256-color styling, off when compiled without `color` or when
/// `NO_COLOR` is set.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn from_env() -> Self {
        if cfg!(feature = "color") && std::env::var_os("NO_COLOR").is_none() {
            Palette { enabled: true }
        } else {
            Palette::plain()
        }
    }

    pub fn plain() -> Self {
        Palette { enabled: false }
    }

    fn paint(&self, color: u8, text: &str) -> String {
        if self.enabled {
            format!("\x1b[38;5;{}m{}\x1b[0m", color, text)
        } else {
            text.to_string()
        }
    }

    pub fn app_name(&self) -> String {
        self.paint(214, APP_NAME)
    }

    pub fn error(&self) -> String {
        self.paint(160, "Error")
    }

    fn usage(&self) -> String {
        self.paint(112, "Usage")
    }

    fn menu(&self, title: &str) -> String {
        self.paint(218, title)
    }

    fn unsafe_note(&self) -> String {
        self.paint(160, "(unsafe)")
    }
}

struct OptionHelp {
    long: &'static str,
    arg: Option<&'static str>,
    short: char,
    text: &'static str,
    unsafe_: bool,
}

const fn opt(long: &'static str, arg: Option<&'static str>, short: char, text: &'static str) -> OptionHelp {
    OptionHelp {
        long,
        arg,
        short,
        text,
        unsafe_: false,
    }
}

struct Page {
    synopsis: &'static str,
    about: &'static [&'static str],
    required: &'static [(&'static str, &'static str)],
    options: &'static [OptionHelp],
    examples: &'static [(&'static str, &'static str)],
}

const LOG: OptionHelp = opt("log", Some("<path>"), 'l', "set log output file.");
const DIR: OptionHelp = opt("dir", Some("<path>"), 'd', "set working directory.");
const YES: OptionHelp = opt("yes", None, 'y', "skip confirmation.");
const EXTENSION: OptionHelp = opt("extension", Some("<ext>"), 'x', "set file extension (default is cpp).");
const PROBLEM_ID: (&str, &str) = ("<problem-id>", "problem id (required)");

static INFO: Page = Page {
    synopsis: "info [options]",
    about: &[
        "Collects problems by difficulty according to the specified folder structure",
        "and displays the results.",
    ],
    required: &[],
    options: &[
        opt("search", Some("<tier>"), 's', "filter information by tier."),
        DIR,
    ],
    examples: &[
        ("info", "get all information"),
        ("info --search s1", "get s1 tier's information"),
        ("info -s b3..s1", "get information from b3 to s1 tier"),
        ("info -s d", "get information from d5 to d1 tier"),
        ("info -s b3..", "get information above b3 tier"),
        ("info -s ..p2", "get information below p2 tier"),
    ],
};

static PATCH: Page = Page {
    synopsis: "patch [options]",
    about: &["Fetches tiers from solved.ac and moves files", "to the correct directory."],
    required: &[],
    options: &[LOG, DIR, YES],
    examples: &[("patch", ""), ("patch -l./log.txt", ""), ("patch --dir ../solved -y", "")],
};

static GET: Page = Page {
    synopsis: "get <problem-id>",
    about: &["Gets information from solved.ac with the problem id."],
    required: &[PROBLEM_ID],
    options: &[],
    examples: &[("get 1000", ""), ("get 11440", "")],
};

static NEW: Page = Page {
    synopsis: "new <problem-id> [options]",
    about: &[
        "Fetches the tier from solved.ac",
        "and creates a new file in the corresponding tier folder.",
    ],
    required: &[PROBLEM_ID],
    options: &[
        DIR,
        opt("tier", Some("<tier>"), 't', "force tier (do not fetch from solved.ac)."),
        EXTENSION,
        YES,
        OptionHelp {
            unsafe_: true,
            ..opt("code", None, 'c', "open file with code.")
        },
    ],
    examples: &[("new 1000", ""), ("new 3024 -d../ -tD3 -xcpp", "")],
};

static UPDATE: Page = Page {
    synopsis: "update <username> [options]",
    about: &[
        "Gets all solved problems of the user from solved.ac",
        "and create all the files that are solved but not in the directory.",
    ],
    required: &[("<username>", "solved.ac handle (required)")],
    options: &[
        LOG,
        DIR,
        opt("filter", Some("<tier>"), 'f', "filter by tier."),
        EXTENSION,
        YES,
        OptionHelp {
            unsafe_: true,
            ..opt("code", None, 'c', "open files with code.")
        },
    ],
    examples: &[
        ("update solvedac", ""),
        ("update solvedac -d../", ""),
        ("update solvedac --log ./log.txt", ""),
    ],
};

fn page(command: Command) -> Option<&'static Page> {
    match command {
        Command::Help => None,
        Command::Info => Some(&INFO),
        Command::Patch => Some(&PATCH),
        Command::Get => Some(&GET),
        Command::New => Some(&NEW),
        Command::Update => Some(&UPDATE),
    }
}

pub fn summary(command: Command) -> &'static str {
    match command {
        Command::Help => "Show help",
        Command::Info => "Gets tier information in current/specific directory.",
        Command::Patch => "Updates tier and moves files to the correct directory.",
        Command::Get => "Gets tier information with problem id",
        Command::New => "Create new file with tier",
        Command::Update => "Updates source code that are solved but not in the directory.",
    }
}

/// Help page of a single command. `help` itself renders the general help.
pub fn write_command_help<W: Write>(out: &mut W, command: Command, palette: &Palette) -> io::Result<()> {
    let Some(page) = page(command) else {
        return write_general_help(out, palette);
    };

    write!(out, "\n{}: {} {}\n\n", palette.usage(), APP_NAME, page.synopsis)?;
    for line in page.about {
        write!(out, "  {}\n", line)?;
    }

    if !page.required.is_empty() {
        write!(out, "\n{}\n", palette.menu("Required"))?;
        for (name, text) in page.required {
            write!(out, "  {:<20} : {}\n", name, text)?;
        }
    }

    if !page.options.is_empty() {
        write!(out, "\n{}\n", palette.menu("Options"))?;
        for o in page.options {
            let left = match o.arg {
                Some(arg) => format!("--{} {}", o.long, arg),
                None => format!("--{}", o.long),
            };
            write!(out, "  {:<17} -{} : {}", left, o.short, o.text)?;
            if o.unsafe_ {
                write!(out, " {}", palette.unsafe_note())?;
            }
            writeln!(out)?;
        }
    }

    write!(out, "\n{}\n", palette.menu("Examples"))?;
    for (example, text) in page.examples {
        if text.is_empty() {
            write!(out, "  {} {}\n", APP_NAME, example)?;
        } else {
            let line = format!("{} {}", APP_NAME, example);
            write!(out, "  {:<30} {}\n", line, text)?;
        }
    }
    Ok(())
}

/// Tool description, usage line and command list.
pub fn write_general_help<W: Write>(out: &mut W, palette: &Palette) -> io::Result<()> {
    write!(out, "Baekjoon source code manager with solved.ac tier.\n")?;
    write_command_list(out, palette)
}

pub fn write_command_list<W: Write>(out: &mut W, palette: &Palette) -> io::Result<()> {
    write!(out, "\n{}: {} <command> [options]\n\n", palette.usage(), APP_NAME)?;
    write!(out, "{}\n", palette.menu("Command List"))?;
    for command in Command::ALL {
        write!(out, "  {:<6} : {}\n", command.name(), summary(command))?;
    }
    write!(
        out,
        "\nSee '{} help <command>' for more information on a specific command.\n",
        APP_NAME
    )
}
