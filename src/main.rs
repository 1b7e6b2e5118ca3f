use std::{collections::HashMap, fs};

use clap::Parser;
use velocette::{Value, render};

/// velocette renders a sandboxed subset of the Velocity template language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells velocette to read the template from a file instead of the
    /// command line.
    #[arg(short, long)]
    file: bool,

    /// Defines a template variable as name=value. May be repeated.
    #[arg(short, long = "var", value_name = "NAME=VALUE")]
    vars: Vec<String>,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let template = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the template file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    let mut vars = HashMap::new();
    for definition in &args.vars {
        let Some((name, value)) = definition.split_once('=') else {
            eprintln!("Invalid variable definition '{definition}'. Expected NAME=VALUE.");
            std::process::exit(1);
        };
        vars.insert(name.to_string(), Value::from(value));
    }

    match render(&template, &vars) {
        Ok(output) => print!("{output}"),
        Err(e) => eprintln!("{e}"),
    }
}
