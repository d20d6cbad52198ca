use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tursub::types::DEFAULT_INPUT;
use tursub::{Config, InputLoader, Run, Simulator, DEFINITION, TRANSITIONS};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  tursub-cli '101 # 011'
  tursub-cli --result-only 011#101 101#
  printf '101#011\\n1#10\\n' | tursub-cli --json")]
struct Cli {
    /// Inputs of the form `W1 # W2` or `W1 W2`.
    /// Read from stdin when piped, otherwise defaults to `101 # 011`.
    input: Vec<String>,

    /// Read inputs from a file, one per line (`;` starts a comment)
    #[clap(short, long)]
    file: Option<PathBuf>,

    /// JSON configuration file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Cells cleared after the separator before writing a result
    #[clap(long)]
    erase_window: Option<usize>,

    /// Cells shown around the head in each description
    #[clap(long)]
    trace_window: Option<usize>,

    /// Print runs as JSON
    #[clap(long)]
    json: bool,

    /// Print only the final tape of each run
    #[clap(short, long)]
    result_only: bool,

    /// Print the machine definition and transition table, then exit
    #[clap(short, long)]
    table: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.table {
        print_table();
        return Ok(());
    }

    let config = load_config(&cli)?;
    let inputs = load_inputs(&cli)?;

    if cli.json {
        let output: Vec<_> = inputs.iter().map(|input| run_json(input, config)).collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for input in &inputs {
        let run = Simulator::with_config(input, config).run();
        if cli.result_only {
            println!("{}", run.result);
        } else {
            print_run(input, &run);
        }
    }

    Ok(())
}

/// Runs one input and renders it together with the configuration it ran under.
fn run_json(input: &str, config: Config) -> serde_json::Value {
    let mut simulator = Simulator::with_config(input, config);
    let run = simulator.run();

    serde_json::json!({
        "input": input,
        "config": simulator.config(),
        "descriptions": run.descriptions,
        "result": run.result,
    })
}

/// Builds the configuration from the optional file, then applies command-line overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(width) = cli.erase_window {
        config.erase_window = width;
    }
    if let Some(width) = cli.trace_window {
        config.trace_window = width;
    }
    config.validate()?;

    debug!(
        erase_window = config.erase_window,
        trace_window = config.trace_window,
        "configuration loaded"
    );
    Ok(config)
}

/// Collects inputs from the arguments, the input file, or stdin, in that order.
fn load_inputs(cli: &Cli) -> Result<Vec<String>> {
    let mut inputs = cli.input.clone();

    if let Some(path) = &cli.file {
        inputs.extend(InputLoader::load_inputs(path)?);
    }

    if inputs.is_empty() && atty::isnt(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read from stdin")?;
        inputs = InputLoader::load_inputs_from_string(&buffer);
    }

    if inputs.is_empty() {
        debug!(input = DEFAULT_INPUT, "no input given, using default");
        inputs.push(DEFAULT_INPUT.to_string());
    }

    debug!(count = inputs.len(), "inputs collected");
    Ok(inputs)
}

fn print_run(input: &str, run: &Run) {
    println!("Input: {}", input);
    for (i, description) in run.descriptions.iter().enumerate() {
        println!("{:>4}  {}", i, description);
    }
    println!("Result: {}\n", run.result);
}

fn print_table() {
    let join = |symbols: &[char]| {
        symbols
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let states = DEFINITION
        .states
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    println!("Q  = {{{}}}", states);
    println!("Σ  = {{{}}}", join(&DEFINITION.input_alphabet));
    println!("Γ  = {{{}}}", join(&DEFINITION.tape_alphabet));
    println!("q0 = {}", DEFINITION.initial_state);
    println!("B  = {}", DEFINITION.blank);
    println!(
        "F  = {{{}}}",
        DEFINITION
            .accepting_states
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!();

    for rule in TRANSITIONS.iter() {
        println!("{}", rule);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_window_overrides() {
        let cli = Cli::parse_from(["tursub-cli", "--erase-window", "64", "101#011"]);
        let config = load_config(&cli).unwrap();

        assert_eq!(config.erase_window, 64);
        assert_eq!(config.trace_window, Config::default().trace_window);
    }

    #[test]
    fn test_override_applies_on_top_of_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("machine.json");
        let mut file = File::create(&file_path).unwrap();
        file.write_all(br#"{ "erase_window": 50, "trace_window": 20 }"#).unwrap();

        let path = file_path.to_str().unwrap();
        let cli = Cli::parse_from(["tursub-cli", "-c", path, "--trace-window", "8", "1#1"]);
        let config = load_config(&cli).unwrap();

        assert_eq!(config.erase_window, 50);
        assert_eq!(config.trace_window, 8);
    }

    #[test]
    fn test_zero_window_rejected() {
        let cli = Cli::parse_from(["tursub-cli", "--trace-window", "0", "1#1"]);
        assert!(load_config(&cli).is_err());
    }

    #[test]
    fn test_inputs_from_arguments_and_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("inputs.txt");
        let mut file = File::create(&file_path).unwrap();
        file.write_all(b"; batch\n011#101\n").unwrap();

        let path = file_path.to_str().unwrap();
        let cli = Cli::parse_from(["tursub-cli", "-f", path, "101#011"]);
        let inputs = load_inputs(&cli).unwrap();

        assert_eq!(inputs, vec!["101#011", "011#101"]);
    }

    #[test]
    fn test_json_carries_active_config() {
        let config = Config {
            erase_window: 48,
            trace_window: 12,
        };
        let output = run_json("011#101", config);

        assert_eq!(output["input"], "011#101");
        assert_eq!(output["result"], "-10");
        assert_eq!(output["config"]["erase_window"], 48);
        assert_eq!(output["config"]["trace_window"], 12);
        assert_eq!(output["descriptions"][0]["note"], "start");
    }
}
