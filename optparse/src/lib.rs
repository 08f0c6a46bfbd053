//! Command-line option parsing for multi-command tools.
//!
//! A command declares its options as a list of [`OptionSpec`]s, registers
//! them in a [`Registry`], and hands the raw argument tail to [`parse`]:
//! - `--name` long options and `-abc` short-option clusters
//! - a parameter-taking short option swallows the rest of its cluster
//!   (`-dsrc`) or the next positional argument (`-d src`)
//! - `--` switches to passthrough: everything after it is positional
//! - typed errors per operation, plus [`describe`] for callers that only
//!   hold a (call site, numeric code) pair

use std::collections::HashMap;
use std::iter::Peekable;

use tracing::{debug, trace};

// ============================================================================
// Result and Error types
// ============================================================================

pub type Result<T, E = ParseError> = std::result::Result<T, E>;

/// The fallible operation an error code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallSite {
    Register,
    Parse,
}

// Numeric codes of Registry::register
pub const DUPLICATED_NAME: i32 = 1;
pub const DUPLICATED_SHORT_NAME: i32 = 2;
pub const INVALID_SHORT_NAME: i32 = 3;

// Numeric codes of parse
pub const NOT_INIT: i32 = -1;
pub const OPTION_NAME_ERROR: i32 = 1;
// Code 2 is reserved for a quoting error that the parser never reports.
pub const UNKNOWN_OPTION: i32 = 3;
pub const PARAMETER_MISSING: i32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Option name duplicated: --{0}")]
    DuplicateName(String),

    #[error("Option short name duplicated: -{0}")]
    DuplicatedShortName(char),

    #[error("Invalid short name: '{0}'")]
    InvalidShortName(char),
}

impl RegistryError {
    pub fn code(&self) -> i32 {
        match self {
            RegistryError::DuplicateName(_) => DUPLICATED_NAME,
            RegistryError::DuplicatedShortName(_) => DUPLICATED_SHORT_NAME,
            RegistryError::InvalidShortName(_) => INVALID_SHORT_NAME,
        }
    }

    pub fn call_site(&self) -> CallSite {
        CallSite::Register
    }

    /// Fixed diagnostic without the offending option.
    pub fn describe(&self) -> &'static str {
        describe(self.call_site(), self.code())
    }
}

/// Parse failure. The payload is the offending argument as the user typed it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Parser has not been initialized")]
    NotInitialized,

    #[error("Invalid option name: {0}")]
    OptionNameError(String),

    #[error("Unknown option name: {0}")]
    UnknownOption(String),

    #[error("Missing parameter: {0}")]
    ParameterMissing(String),
}

impl ParseError {
    pub fn code(&self) -> i32 {
        match self {
            ParseError::NotInitialized => NOT_INIT,
            ParseError::OptionNameError(_) => OPTION_NAME_ERROR,
            ParseError::UnknownOption(_) => UNKNOWN_OPTION,
            ParseError::ParameterMissing(_) => PARAMETER_MISSING,
        }
    }

    pub fn call_site(&self) -> CallSite {
        CallSite::Parse
    }

    /// Fixed diagnostic without the offending argument.
    pub fn describe(&self) -> &'static str {
        describe(self.call_site(), self.code())
    }
}

// ============================================================================
// Error reporter
// ============================================================================

const REGISTER_MESSAGES: [&str; 4] = [
    "Unknown Error",
    "Option name duplicated",
    "Option short name duplicated",
    "Invalid short name",
];

// Shifted by one so that NOT_INIT (-1) lands on index 0.
const PARSE_MESSAGES: [&str; 6] = [
    "Parser has not been initialized",
    "Unknown Error",
    "Invalid option name",
    "Illegal Error (DQUOTE_ERROR)",
    "Unknown option name",
    "Missing parameter",
];

/// Map a numeric result code of `site` to its diagnostic.
///
/// Codes outside the table of the call site resolve to "Unknown Error".
pub fn describe(site: CallSite, code: i32) -> &'static str {
    match site {
        CallSite::Register => REGISTER_MESSAGES[table_index(code, REGISTER_MESSAGES.len(), 0)],
        CallSite::Parse => {
            PARSE_MESSAGES[table_index(code.saturating_add(1), PARSE_MESSAGES.len(), 1)]
        }
    }
}

fn table_index(value: i32, len: usize, fallback: usize) -> usize {
    usize::try_from(value)
        .ok()
        .filter(|&i| i < len)
        .unwrap_or(fallback)
}

// ============================================================================
// OptionSpec — option definition builder
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    long_name: String,
    short_name: Option<char>,
    takes_parameter: bool,
}

impl OptionSpec {
    pub fn new(name: &str, takes_parameter: bool) -> Self {
        OptionSpec {
            long_name: name.to_string(),
            short_name: None,
            takes_parameter,
        }
    }

    /// Option without a parameter (`--yes`, `-y`).
    pub fn flag(name: &str) -> Self {
        Self::new(name, false)
    }

    /// Option that binds exactly one parameter (`--dir PATH`, `-dPATH`).
    pub fn param(name: &str) -> Self {
        Self::new(name, true)
    }

    pub fn short(mut self, c: char) -> Self {
        self.short_name = Some(c);
        self
    }

    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    pub fn short_name(&self) -> Option<char> {
        self.short_name
    }

    pub fn takes_parameter(&self) -> bool {
        self.takes_parameter
    }
}

// ============================================================================
// Registry
// ============================================================================

const SHORT_SLOTS: usize = 52;

/// Slot of a short name: `a`-`z` → 0-25, `A`-`Z` → 26-51.
fn short_slot(c: char) -> Option<usize> {
    match c {
        'a'..='z' => Some(c as usize - 'a' as usize),
        'A'..='Z' => Some(c as usize - 'A' as usize + 26),
        _ => None,
    }
}

/// The options valid for one command.
///
/// A registry that has not completed a successful [`Registry::register`]
/// rejects every parse with [`ParseError::NotInitialized`].
#[derive(Debug, Clone)]
pub struct Registry {
    specs: Vec<OptionSpec>,
    by_long: HashMap<String, usize>,
    by_short: [Option<usize>; SHORT_SLOTS],
    initialized: bool,
}

impl Default for Registry {
    fn default() -> Self {
        Registry {
            specs: Vec::new(),
            by_long: HashMap::new(),
            by_short: [None; SHORT_SLOTS],
            initialized: false,
        }
    }
}

impl Registry {
    /// Build a registry holding exactly `specs`.
    pub fn new<I>(specs: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = OptionSpec>,
    {
        let mut registry = Registry::default();
        registry.register(specs)?;
        Ok(registry)
    }

    /// Replace the registered options with `specs`.
    ///
    /// Stops at the first invalid spec. Entries inserted before it are kept
    /// but the registry stays uninitialized until a later call succeeds.
    pub fn register<I>(&mut self, specs: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = OptionSpec>,
    {
        self.clear();
        match self.insert_all(specs) {
            Ok(()) => {
                self.initialized = true;
                debug!(options = self.specs.len(), "options registered");
                Ok(())
            }
            Err(e) => {
                debug!(error = %e, kept = self.specs.len(), "option registration failed");
                Err(e)
            }
        }
    }

    fn clear(&mut self) {
        self.specs.clear();
        self.by_long.clear();
        self.by_short = [None; SHORT_SLOTS];
        self.initialized = false;
    }

    fn insert_all<I>(&mut self, specs: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = OptionSpec>,
    {
        for spec in specs {
            if self.by_long.contains_key(&spec.long_name) {
                return Err(RegistryError::DuplicateName(spec.long_name));
            }

            // The long name goes in before the short name is checked.
            let idx = self.specs.len();
            let short_name = spec.short_name;
            self.by_long.insert(spec.long_name.clone(), idx);
            self.specs.push(spec);

            if let Some(c) = short_name {
                let slot = short_slot(c).ok_or(RegistryError::InvalidShortName(c))?;
                if self.by_short[slot].is_some() {
                    return Err(RegistryError::DuplicatedShortName(c));
                }
                self.by_short[slot] = Some(idx);
            }
        }
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn lookup_long(&self, name: &str) -> Option<&OptionSpec> {
        self.by_long.get(name).map(|&idx| &self.specs[idx])
    }

    pub fn lookup_short(&self, c: char) -> Option<&OptionSpec> {
        short_slot(c).and_then(|slot| self.spec_at_slot(slot))
    }

    fn spec_at_slot(&self, slot: usize) -> Option<&OptionSpec> {
        self.by_short[slot].map(|idx| &self.specs[idx])
    }

    /// Registered options in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

// ============================================================================
// Tokenizer
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Positional(String),
    /// Characters after the leading `-`.
    ShortCluster(String),
    /// Name after the leading `--`.
    LongOption(String),
    EndOfOptions,
}

/// Classify one raw argument. An empty argument yields no token.
pub fn classify(arg: &str) -> Result<Option<Token>> {
    if arg.is_empty() {
        return Ok(None);
    }

    let token = if let Some(name) = arg.strip_prefix("--") {
        match name.len() {
            0 => Token::EndOfOptions,
            // Single-byte long names are malformed
            1 => return Err(ParseError::OptionNameError(arg.to_string())),
            _ => Token::LongOption(name.to_string()),
        }
    } else if let Some(cluster) = arg.strip_prefix('-') {
        if cluster.is_empty() {
            return Err(ParseError::OptionNameError(arg.to_string()));
        }
        Token::ShortCluster(cluster.to_string())
    } else {
        Token::Positional(arg.to_string())
    };

    trace!(arg, token = ?token, "classified argument");
    Ok(Some(token))
}

/// Token stream over raw arguments, see [`tokenize`].
pub struct Tokens<I> {
    args: I,
}

impl<I> Iterator for Tokens<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let arg = self.args.next()?;
            if let Some(token) = classify(arg.as_ref()).transpose() {
                return Some(token);
            }
        }
    }
}

/// Classify `args` lazily, one token per non-empty argument.
pub fn tokenize<I>(args: I) -> Tokens<I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Tokens {
        args: args.into_iter(),
    }
}

// ============================================================================
// ParseResult
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOption {
    pub name: String,
    /// Present iff the option takes a parameter.
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    /// Keyed by long name. A repeated option keeps its last occurrence.
    pub options: HashMap<String, ParsedOption>,
    pub positionals: Vec<String>,
}

impl ParseResult {
    fn record(&mut self, spec: &OptionSpec, value: Option<String>) {
        self.options.insert(
            spec.long_name.clone(),
            ParsedOption {
                name: spec.long_name.clone(),
                value,
            },
        );
    }

    pub fn is_present(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    pub fn option(&self, name: &str) -> Option<&ParsedOption> {
        self.options.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.options.get(name).and_then(|o| o.value.as_deref())
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }
}

// ============================================================================
// Parser
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AcceptingOptions,
    /// Entered on `--`, never left.
    Passthrough,
}

/// Parse `args` (command word already removed) against `registry`.
///
/// The whole argument list is tokenized before any token is interpreted.
pub fn parse<I>(registry: &Registry, args: I) -> Result<ParseResult>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    if !registry.is_initialized() {
        return Err(ParseError::NotInitialized);
    }

    let tokens = tokenize(args).collect::<Result<Vec<_>>>()?;
    let mut cursor = tokens.into_iter().peekable();
    let mut result = ParseResult::default();
    let mut state = State::AcceptingOptions;

    while let Some(token) = cursor.next() {
        if state == State::Passthrough {
            match token {
                Token::ShortCluster(s) => result.positionals.push(format!("-{}", s)),
                Token::LongOption(s) => result.positionals.push(format!("--{}", s)),
                Token::Positional(s) => result.positionals.push(s),
                Token::EndOfOptions => {}
            }
            continue;
        }

        match token {
            Token::Positional(s) => result.positionals.push(s),
            Token::EndOfOptions => {
                debug!("end of options, passing remaining arguments through");
                state = State::Passthrough;
            }
            Token::ShortCluster(cluster) => {
                parse_cluster(registry, &cluster, &mut cursor, &mut result)?;
            }
            Token::LongOption(name) => {
                let spec = registry
                    .lookup_long(&name)
                    .ok_or_else(|| ParseError::UnknownOption(format!("--{}", name)))?;
                let value = if spec.takes_parameter {
                    Some(take_parameter(&mut cursor, &format!("--{}", name))?)
                } else {
                    None
                };
                result.record(spec, value);
            }
        }
    }

    debug!(
        options = result.options.len(),
        positionals = result.positionals.len(),
        "arguments parsed"
    );
    Ok(result)
}

/// Resolve a short-option cluster left to right. The first option that
/// takes a parameter ends the cluster.
fn parse_cluster<T>(
    registry: &Registry,
    cluster: &str,
    cursor: &mut Peekable<T>,
    result: &mut ParseResult,
) -> Result<()>
where
    T: Iterator<Item = Token>,
{
    for (pos, c) in cluster.char_indices() {
        let slot = short_slot(c).ok_or_else(|| ParseError::OptionNameError(format!("-{}", c)))?;
        let spec = registry
            .spec_at_slot(slot)
            .ok_or_else(|| ParseError::UnknownOption(format!("-{}", c)))?;

        if !spec.takes_parameter {
            result.record(spec, None);
            continue;
        }

        let rest = &cluster[pos + c.len_utf8()..];
        let value = if rest.is_empty() {
            take_parameter(cursor, &format!("-{}", c))?
        } else {
            rest.to_string()
        };
        result.record(spec, Some(value));
        break;
    }
    Ok(())
}

/// Consume the next token as a parameter. Only a positional qualifies.
fn take_parameter<T>(cursor: &mut Peekable<T>, option: &str) -> Result<String>
where
    T: Iterator<Item = Token>,
{
    match cursor.next_if(|t| matches!(t, Token::Positional(_))) {
        Some(Token::Positional(value)) => Ok(value),
        _ => Err(ParseError::ParameterMissing(option.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir_yes() -> Registry {
        Registry::new([
            OptionSpec::param("dir").short('d'),
            OptionSpec::flag("yes").short('y'),
        ])
        .unwrap()
    }

    fn run(registry: &Registry, args: &[&str]) -> Result<ParseResult> {
        parse(registry, args)
    }

    fn tokens(args: &[&str]) -> Result<Vec<Token>> {
        tokenize(args).collect()
    }

    // ── Group 1: registration ─────────────────────────────────────

    #[test]
    fn register_unique_options() {
        let reg = Registry::new([
            OptionSpec::param("dir").short('d'),
            OptionSpec::flag("yes").short('y'),
            OptionSpec::flag("verbose"),
            OptionSpec::param("Zone").short('Z'),
        ])
        .unwrap();
        assert!(reg.is_initialized());
        assert_eq!(reg.len(), 4);
        let names: Vec<&str> = reg.iter().map(|s| s.long_name()).collect();
        assert_eq!(names, vec!["dir", "yes", "verbose", "Zone"]);
        assert_eq!(reg.lookup_short('d').unwrap().long_name(), "dir");
        assert_eq!(reg.lookup_short('Z').unwrap().long_name(), "Zone");
        assert!(reg.lookup_short('z').is_none());
        assert!(reg.lookup_long("verbose").unwrap().short_name().is_none());
    }

    #[test]
    fn register_empty_table() {
        let reg = Registry::new(Vec::<OptionSpec>::new()).unwrap();
        assert!(reg.is_initialized());
        assert!(reg.is_empty());
    }

    #[test]
    fn register_duplicate_long_name_keeps_prefix() {
        let mut reg = Registry::default();
        let err = reg
            .register([
                OptionSpec::flag("a"),
                OptionSpec::flag("b"),
                OptionSpec::flag("a"),
                OptionSpec::flag("c"),
            ])
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("a".to_string()));
        assert!(reg.lookup_long("a").is_some());
        assert!(reg.lookup_long("b").is_some());
        assert!(reg.lookup_long("c").is_none());
        assert!(!reg.is_initialized());
    }

    #[test]
    fn register_invalid_short_name() {
        let mut reg = Registry::default();
        let err = reg
            .register([OptionSpec::flag("help").short('?')])
            .unwrap_err();
        assert_eq!(err, RegistryError::InvalidShortName('?'));
        // Inserted by long name before the short name was rejected
        assert!(reg.lookup_long("help").is_some());
    }

    #[test]
    fn register_digit_short_name_is_invalid() {
        let err = Registry::new([OptionSpec::flag("one").short('1')]).unwrap_err();
        assert_eq!(err.code(), INVALID_SHORT_NAME);
    }

    #[test]
    fn register_duplicated_short_name() {
        let err = Registry::new([
            OptionSpec::param("dir").short('d'),
            OptionSpec::flag("debug").short('d'),
        ])
        .unwrap_err();
        assert_eq!(err, RegistryError::DuplicatedShortName('d'));
    }

    #[test]
    fn short_names_are_case_sensitive() {
        let reg = Registry::new([
            OptionSpec::flag("lower").short('x'),
            OptionSpec::flag("upper").short('X'),
        ])
        .unwrap();
        assert_eq!(reg.lookup_short('x').unwrap().long_name(), "lower");
        assert_eq!(reg.lookup_short('X').unwrap().long_name(), "upper");
    }

    #[test]
    fn register_replaces_previous_table() {
        let mut reg = dir_yes();
        reg.register([OptionSpec::flag("code").short('c')]).unwrap();
        assert_eq!(reg.len(), 1);
        assert!(reg.lookup_long("dir").is_none());
        assert!(reg.lookup_short('y').is_none());
        assert!(reg.lookup_short('c').is_some());
    }

    #[test]
    fn successful_register_after_failure_reinitializes() {
        let mut reg = Registry::default();
        assert!(reg
            .register([OptionSpec::flag("a"), OptionSpec::flag("a")])
            .is_err());
        assert_eq!(run(&reg, &[]).unwrap_err(), ParseError::NotInitialized);
        reg.register([OptionSpec::flag("a")]).unwrap();
        assert!(run(&reg, &["--aa"]).is_err());
        assert!(run(&reg, &[]).is_ok());
    }

    // ── Group 2: tokenizer ────────────────────────────────────────

    #[test]
    fn tokenize_each_kind() {
        assert_eq!(
            tokens(&["file", "-abc", "--dir", "--"]).unwrap(),
            vec![
                Token::Positional("file".to_string()),
                Token::ShortCluster("abc".to_string()),
                Token::LongOption("dir".to_string()),
                Token::EndOfOptions,
            ]
        );
    }

    #[test]
    fn tokenize_skips_empty_arguments() {
        assert_eq!(
            tokens(&["", "x", ""]).unwrap(),
            vec![Token::Positional("x".to_string())]
        );
    }

    #[test]
    fn tokenize_multibyte_long_name() {
        assert_eq!(
            tokens(&["--é"]).unwrap(),
            vec![Token::LongOption("é".to_string())]
        );
        let reg = Registry::new([OptionSpec::flag("é")]).unwrap();
        let result = parse(&reg, ["--é"]).unwrap();
        assert!(result.is_present("é"));
    }

    #[test]
    fn tokenize_keeps_whitespace_only_argument() {
        assert_eq!(
            tokens(&[" "]).unwrap(),
            vec![Token::Positional(" ".to_string())]
        );
    }

    #[test]
    fn tokenize_bare_dash_is_malformed() {
        assert_eq!(
            tokens(&["-"]).unwrap_err(),
            ParseError::OptionNameError("-".to_string())
        );
    }

    #[test]
    fn tokenize_single_letter_long_name_is_malformed() {
        assert_eq!(
            tokens(&["--x"]).unwrap_err(),
            ParseError::OptionNameError("--x".to_string())
        );
    }

    #[test]
    fn tokenize_triple_dash_is_long_option() {
        assert_eq!(
            tokens(&["---"]).unwrap(),
            vec![Token::LongOption("-".to_string())]
        );
    }

    #[test]
    fn tokenize_is_lazy() {
        let mut stream = tokenize(["ok", "-", "never"]);
        assert_eq!(
            stream.next(),
            Some(Ok(Token::Positional("ok".to_string())))
        );
        assert!(matches!(stream.next(), Some(Err(_))));
    }

    // ── Group 3: parser scenarios ─────────────────────────────────

    #[test]
    fn empty_input() {
        let res = run(&dir_yes(), &[]).unwrap();
        assert!(res.options.is_empty());
        assert!(res.positionals.is_empty());
    }

    #[test]
    fn separate_parameter_and_flag() {
        let res = run(&dir_yes(), &["-d", "./x", "-y"]).unwrap();
        assert_eq!(res.value("dir"), Some("./x"));
        assert!(res.is_present("yes"));
        assert_eq!(res.option("yes").unwrap().value, None);
        assert!(res.positionals.is_empty());
    }

    #[test]
    fn long_option_with_parameter() {
        let res = run(&dir_yes(), &["--dir", "p", "extra"]).unwrap();
        assert_eq!(res.options.len(), 1);
        assert_eq!(res.value("dir"), Some("p"));
        assert_eq!(res.positionals(), ["extra"]);
    }

    #[test]
    fn cluster_remainder_is_parameter() {
        let res = run(&dir_yes(), &["-dsuffix"]).unwrap();
        assert_eq!(res.value("dir"), Some("suffix"));
        assert!(res.positionals.is_empty());
    }

    #[test]
    fn cluster_remainder_is_not_reinterpreted() {
        let res = run(&dir_yes(), &["-dy"]).unwrap();
        assert_eq!(res.value("dir"), Some("y"));
        assert!(!res.is_present("yes"));
    }

    #[test]
    fn cluster_flags_then_parameter() {
        let res = run(&dir_yes(), &["-yd", "out"]).unwrap();
        assert!(res.is_present("yes"));
        assert_eq!(res.value("dir"), Some("out"));
    }

    #[test]
    fn cluster_remainder_keeps_non_alpha() {
        let res = run(&dir_yes(), &["-d../a b"]).unwrap();
        assert_eq!(res.value("dir"), Some("../a b"));
    }

    #[test]
    fn positional_order_preserved() {
        let res = run(&dir_yes(), &["a", "-y", "b", "--dir", "x", "c"]).unwrap();
        assert_eq!(res.positionals(), ["a", "b", "c"]);
    }

    #[test]
    fn repeated_option_last_wins() {
        let res = run(&dir_yes(), &["-d", "first", "--dir", "second", "-yy"]).unwrap();
        assert_eq!(res.value("dir"), Some("second"));
        assert_eq!(res.options.len(), 2);
    }

    #[test]
    fn flag_never_has_value() {
        for args in [&["-y"][..], &["--yes"][..], &["-yy", "v"][..], &["-y", "v"][..]] {
            let res = run(&dir_yes(), args).unwrap();
            assert_eq!(res.option("yes").unwrap().value, None, "{:?}", args);
        }
    }

    #[test]
    fn parameter_may_look_like_anything_positional() {
        let res = run(&dir_yes(), &["--dir", "yes"]).unwrap();
        assert_eq!(res.value("dir"), Some("yes"));
    }

    // ── Group 4: end of options ───────────────────────────────────

    #[test]
    fn lone_end_of_options() {
        let res = run(&dir_yes(), &["--"]).unwrap();
        assert!(res.options.is_empty());
        assert!(res.positionals.is_empty());
    }

    #[test]
    fn second_end_of_options_is_dropped() {
        let res = run(&dir_yes(), &["--", "a", "--", "b"]).unwrap();
        assert_eq!(res.positionals(), ["a", "b"]);
    }

    #[test]
    fn options_after_end_of_options_are_literal() {
        let res = run(&dir_yes(), &["--", "--dir", "x"]).unwrap();
        assert!(res.options.is_empty());
        assert_eq!(res.positionals(), ["--dir", "x"]);
    }

    #[test]
    fn short_cluster_after_end_of_options_is_literal() {
        let res = run(&dir_yes(), &["-y", "--", "-y", "-zq"]).unwrap();
        assert!(res.is_present("yes"));
        assert_eq!(res.positionals(), ["-y", "-zq"]);
    }

    #[test]
    fn end_of_options_cannot_be_a_parameter() {
        assert_eq!(
            run(&dir_yes(), &["-d", "--", "x"]).unwrap_err(),
            ParseError::ParameterMissing("-d".to_string())
        );
    }

    // ── Group 5: parse errors ─────────────────────────────────────

    #[test]
    fn unknown_short_option() {
        assert_eq!(
            run(&dir_yes(), &["-z"]).unwrap_err(),
            ParseError::UnknownOption("-z".to_string())
        );
    }

    #[test]
    fn unknown_short_in_cluster() {
        assert_eq!(
            run(&dir_yes(), &["-yq"]).unwrap_err(),
            ParseError::UnknownOption("-q".to_string())
        );
    }

    #[test]
    fn unknown_long_option() {
        assert_eq!(
            run(&dir_yes(), &["--directory", "x"]).unwrap_err(),
            ParseError::UnknownOption("--directory".to_string())
        );
    }

    #[test]
    fn name_value_syntax_is_not_supported() {
        assert_eq!(
            run(&dir_yes(), &["--dir=x"]).unwrap_err(),
            ParseError::UnknownOption("--dir=x".to_string())
        );
    }

    #[test]
    fn non_alpha_in_cluster_is_malformed() {
        assert_eq!(
            run(&dir_yes(), &["-y1"]).unwrap_err(),
            ParseError::OptionNameError("-1".to_string())
        );
    }

    #[test]
    fn short_parameter_missing_at_end() {
        assert_eq!(
            run(&dir_yes(), &["-d"]).unwrap_err(),
            ParseError::ParameterMissing("-d".to_string())
        );
    }

    #[test]
    fn long_parameter_followed_by_option() {
        assert_eq!(
            run(&dir_yes(), &["--dir", "-y"]).unwrap_err(),
            ParseError::ParameterMissing("--dir".to_string())
        );
    }

    #[test]
    fn malformed_token_reported_before_unknown_option() {
        assert_eq!(
            run(&dir_yes(), &["-z", "-"]).unwrap_err(),
            ParseError::OptionNameError("-".to_string())
        );
    }

    #[test]
    fn uninitialized_registry() {
        assert_eq!(
            run(&Registry::default(), &["x"]).unwrap_err(),
            ParseError::NotInitialized
        );
    }

    // ── Group 6: error reporter ───────────────────────────────────

    #[test]
    fn describe_register_codes() {
        assert_eq!(describe(CallSite::Register, 1), "Option name duplicated");
        assert_eq!(describe(CallSite::Register, 2), "Option short name duplicated");
        assert_eq!(describe(CallSite::Register, 3), "Invalid short name");
        assert_eq!(describe(CallSite::Register, 0), "Unknown Error");
        assert_eq!(describe(CallSite::Register, 4), "Unknown Error");
        assert_eq!(describe(CallSite::Register, -1), "Unknown Error");
    }

    #[test]
    fn describe_parse_codes() {
        assert_eq!(describe(CallSite::Parse, -1), "Parser has not been initialized");
        assert_eq!(describe(CallSite::Parse, 1), "Invalid option name");
        assert_eq!(describe(CallSite::Parse, 2), "Illegal Error (DQUOTE_ERROR)");
        assert_eq!(describe(CallSite::Parse, 3), "Unknown option name");
        assert_eq!(describe(CallSite::Parse, 4), "Missing parameter");
        assert_eq!(describe(CallSite::Parse, 0), "Unknown Error");
        assert_eq!(describe(CallSite::Parse, 5), "Unknown Error");
        assert_eq!(describe(CallSite::Parse, -2), "Unknown Error");
        assert_eq!(describe(CallSite::Parse, i32::MAX), "Unknown Error");
    }

    #[test]
    fn typed_errors_agree_with_table() {
        let errors = [
            ParseError::NotInitialized,
            ParseError::OptionNameError("-".to_string()),
            ParseError::UnknownOption("-z".to_string()),
            ParseError::ParameterMissing("-d".to_string()),
        ];
        for e in &errors {
            assert_eq!(e.call_site(), CallSite::Parse);
            assert!(e.to_string().starts_with(e.describe()), "{}", e);
            assert_ne!(e.describe(), "Unknown Error");
        }

        let errors = [
            RegistryError::DuplicateName("a".to_string()),
            RegistryError::DuplicatedShortName('a'),
            RegistryError::InvalidShortName('?'),
        ];
        for e in &errors {
            assert_eq!(e.call_site(), CallSite::Register);
            assert!(e.to_string().starts_with(e.describe()), "{}", e);
        }
    }
}
