use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

use anyhow::{bail, Context, Result};
use regex_sample::{Generator, GeneratorConfig, RegexNode, RngSource};

const USAGE: &str = "Usage: regex-sample [-n COUNT] [--seed N] [--max-depth N] [FILE|-]";

struct Options {
    count: usize,
    seed: Option<u64>,
    max_depth: Option<usize>,
    input: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options> {
    let mut options = Options {
        count: 1,
        seed: None,
        max_depth: None,
        input: None,
    };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-n" => options.count = flag_value(&arg, args.next())?,
            "--seed" => options.seed = Some(flag_value(&arg, args.next())?),
            "--max-depth" => options.max_depth = Some(flag_value(&arg, args.next())?),
            "-h" | "--help" => {
                println!("{USAGE}");
                process::exit(0);
            }
            "-" => options.input = None,
            _ if arg.starts_with('-') => bail!("unknown option `{arg}`\n{USAGE}"),
            _ => options.input = Some(arg),
        }
    }
    Ok(options)
}

fn flag_value<T>(flag: &str, value: Option<String>) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = value.with_context(|| format!("`{flag}` needs a value"))?;
    value
        .parse()
        .with_context(|| format!("invalid value `{value}` for `{flag}`"))
}

// Reads the JSON tree from the named file, or stdin when none is given.
fn read_ast(input: Option<&str>) -> Result<RegexNode> {
    let json = match input {
        Some(path) => fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?,
        None => {
            let mut json = String::new();
            io::stdin()
                .read_to_string(&mut json)
                .context("failed to read stdin")?;
            json
        }
    };
    RegexNode::from_json(&json).context("input is not a valid pattern tree")
}

fn run() -> Result<()> {
    let options = parse_args(env::args().skip(1))?;
    let ast = read_ast(options.input.as_deref())?;

    let mut config = GeneratorConfig::default();
    if let Some(max_depth) = options.max_depth {
        config.max_depth = max_depth;
    }
    let mut random = match options.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };
    let mut generator = Generator::new(&mut random).with_config(config);
    for _ in 0..options.count {
        let sample = generator
            .generate(&ast)
            .context("could not generate a sample")?;
        println!("{sample}");
    }
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}
