//! CLI front-end: reads a JSON document from a file, `--json` literal, or
//! stdin, and prints one line per matched value for each `--path` given.

use std::fs::File;
use std::io::{self, Read};
use std::process::ExitCode;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "jsonpath", about = "Extract values from JSON by path expression")]
struct Args {
    /// Read the document from this file instead of stdin.
    #[arg(short, long)]
    file: Option<String>,

    /// Take the document from this literal string instead of a file/stdin.
    #[arg(short, long, conflicts_with = "file")]
    json: Option<String>,

    /// A path expression to evaluate; may be given multiple times.
    #[arg(short, long = "path", required = true)]
    paths: Vec<String>,

    /// Print the location keys instead of / in addition to values.
    #[arg(short, long)]
    keys: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let compiled = match jsonpath_stream::compile_paths(args.paths.iter().map(String::as_str)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("jsonpath: bad path expression: {e}");
            return ExitCode::FAILURE;
        }
    };

    let input = match read_input(&args) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("jsonpath: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut evaluator = jsonpath_stream::eval_over_bytes(&input, compiled);
    while let Some(result) = evaluator.next() {
        print_result(&result, args.keys);
    }

    if let Some(err) = evaluator.error() {
        eprintln!("jsonpath: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn read_input(args: &Args) -> io::Result<Vec<u8>> {
    if let Some(json) = &args.json {
        return Ok(json.clone().into_bytes());
    }
    if let Some(path) = &args.file {
        let mut buf = Vec::new();
        File::open(path)?.read_to_end(&mut buf)?;
        return Ok(buf);
    }
    let mut buf = Vec::new();
    io::stdin().read_to_end(&mut buf)?;
    Ok(buf)
}

fn print_key(step: &jsonpath_stream::eval::LocStep) {
    match step {
        jsonpath_stream::eval::LocStep::Key(bytes) => {
            print!("{:?}", String::from_utf8_lossy(bytes))
        }
        jsonpath_stream::eval::LocStep::Index(i) => print!("{i}"),
    }
}

/// Mirrors `PrintResult` in the original: with `--keys`, every key is
/// printed tab-separated (quoted strings, bare digits for indices) ahead of
/// the value; without it, only the value is printed, falling back to the
/// last key when a path matched a location but requested no capture.
fn print_result(result: &jsonpath_stream::eval::MatchResult, show_keys: bool) {
    let mut printed = false;

    if show_keys {
        for step in &result.keys {
            print_key(step);
            print!("\t");
            printed = true;
        }
    } else if result.value.is_none() {
        if let Some(last) = result.keys.last() {
            print_key(last);
            printed = true;
        }
    }

    if let Some(bytes) = &result.value {
        print!("{}", String::from_utf8_lossy(bytes));
        printed = true;
    }

    if printed {
        println!();
    }
}
