// Test runner: registers an option table given on the command line, parses
// the remaining arguments against it and dumps the result.
//
//   optdump SPEC... :: ARG...
//
// SPEC is `long[/s][=]`: `/s` assigns short name `s`, a trailing `=` marks
// an option that takes a parameter.

use optparse::{parse, OptionSpec, Registry};

const SEPARATOR: &str = "::";

fn spec_from_arg(arg: &str) -> OptionSpec {
    let (body, takes_parameter) = match arg.strip_suffix('=') {
        Some(body) => (body, true),
        None => (arg, false),
    };
    match body.split_once('/') {
        Some((long, short)) => {
            let mut spec = OptionSpec::new(long, takes_parameter);
            if let Some(c) = short.chars().next() {
                spec = spec.short(c);
            }
            spec
        }
        None => OptionSpec::new(body, takes_parameter),
    }
}

fn main() {
    let argv: Vec<String> = std::env::args().skip(1).collect();

    let Some(split) = argv.iter().position(|a| a == SEPARATOR) else {
        println!("usage: optdump SPEC... :: ARG...");
        std::process::exit(2);
    };

    let specs: Vec<OptionSpec> = argv[..split].iter().map(String::as_str).map(spec_from_arg).collect();
    let args = &argv[split + 1..];

    let registry = match Registry::new(specs) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("register error {}: {}", e.code(), e);
            std::process::exit(2);
        }
    };

    let result = match parse(&registry, args) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("parse error {}: {}", e.code(), e);
            std::process::exit(1);
        }
    };

    // Registration order keeps the dump stable
    for spec in registry.iter() {
        if let Some(opt) = result.option(spec.long_name()) {
            match &opt.value {
                Some(v) => println!("option {}={}", opt.name, v),
                None => println!("option {}", opt.name),
            }
        }
    }
    for arg in result.positionals() {
        println!("arg {}", arg);
    }
}
