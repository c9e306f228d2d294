use anyhow::{Context, Result, bail, ensure};
use clap::{Parser, Subcommand};
use prefixsum_config::{PrefixsumConfig, load_or_default};
use prefixsum_fenwick::PrefixSumIndex;
use prefixsum_logging::LogLevel;
use prefixsum_replay::{DEFAULT_MAX_LEN, Replayer, Scenario, Transcript, read_script, scenarios};
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(name = "prefixsum")]
#[command(about = "Exercise a Fenwick-tree prefix-sum index.", long_about = None)]
struct Cli {
    /// Config file (YAML or JSON). If omitted, PREFIXSUM_CONFIG is used.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Override the configured log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk through set, add and range-sum on [1, 2, 3, 4, 5].
    Demo,

    /// Replay a JSONL script of operations and check its expectations.
    Replay {
        #[arg(long)]
        script: PathBuf,
        /// Stop at the first failed expectation.
        #[arg(long)]
        stop_on_mismatch: bool,
        /// Print element values after each create or update.
        #[arg(long)]
        show_values: bool,
        /// Largest length a create step may request.
        #[arg(long)]
        max_len: Option<usize>,
    },

    /// Run the built-in scenarios.
    Check {
        /// Run only the named scenario.
        #[arg(long)]
        scenario: Option<String>,
        /// List scenario names and exit.
        #[arg(long)]
        list: bool,
    },
}

const COMPONENT: &str = "cli";

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config: PrefixsumConfig = load_or_default(cli.config)?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.logging.init().context("install log subscriber")?;

    match cli.cmd {
        Command::Demo => demo(),
        Command::Replay {
            script,
            stop_on_mismatch,
            show_values,
            max_len,
        } => {
            let steps = read_script(&script)?;
            info!(
                target: COMPONENT,
                path = %script.display(),
                steps = steps.len(),
                "loaded script"
            );

            let mut replayer = Replayer::new()
                .stop_on_mismatch(stop_on_mismatch || config.stop_on_mismatch)
                .capture_values(show_values || config.show_values)
                .max_len(max_len.or(config.max_len).unwrap_or(DEFAULT_MAX_LEN));
            let transcript = replayer.run(&steps)?;
            log_transcript("replay", &transcript);

            println!("{}", transcript.render());
            ensure!(
                transcript.is_success(),
                "{} of {} checks failed",
                transcript.failed(),
                transcript.checks()
            );
            Ok(())
        }
        Command::Check { scenario, list } => {
            if list {
                for s in scenarios() {
                    println!("{:<20} {}", s.name, s.description);
                }
                return Ok(());
            }

            let selected: Vec<Scenario> = match scenario {
                Some(name) => match prefixsum_replay::scenarios::find(&name) {
                    Some(s) => vec![s],
                    None => bail!("unknown scenario '{name}' (see --list)"),
                },
                None => scenarios(),
            };
            check(&selected, &config)
        }
    }
}

fn demo() -> Result<()> {
    let mut index: PrefixSumIndex<i64> = PrefixSumIndex::new(5);
    for i in 0..5 {
        index.set(i, i as i64 + 1)?;
    }
    println!("Initial array: {:?}", index.values());

    let sum = index.range_sum(1, 3)?;
    println!("Sum [1, 3] = {sum}");

    index.add(2, 2)?;
    println!("Added +2 to index 2.");

    let sum = index.range_sum(1, 3)?;
    println!("Sum [1, 3] after update = {sum}");

    let total = index.range_sum(0, 4)?;
    ensure!(total == 1 + 2 + 5 + 4 + 5, "unexpected total {total}");
    println!("Sum [0, 4] = {total}");

    println!("All operations completed successfully.");
    Ok(())
}

fn check(selected: &[Scenario], config: &PrefixsumConfig) -> Result<()> {
    let mut passed = 0;
    for scenario in selected {
        let transcript = Replayer::new()
            .stop_on_mismatch(config.stop_on_mismatch)
            .capture_values(config.show_values)
            .max_len(config.max_len.unwrap_or(DEFAULT_MAX_LEN))
            .run(&scenario.steps)
            .with_context(|| format!("scenario {}", scenario.name))?;
        log_transcript(scenario.name, &transcript);

        if transcript.is_success() {
            passed += 1;
            println!("PASS {} ({} checks)", scenario.name, transcript.checks());
        } else {
            println!("FAIL {}", scenario.name);
            for line in transcript.render().lines() {
                println!("    {line}");
            }
        }
    }

    println!("RESULTS: {passed}/{} scenarios passed", selected.len());
    ensure!(
        passed == selected.len(),
        "{} scenario(s) failed",
        selected.len() - passed
    );
    Ok(())
}

fn log_transcript(source: &str, transcript: &Transcript) {
    for report in &transcript.reports {
        if report.is_mismatch() {
            warn!(target: COMPONENT, source, line = report.line, "{report}");
        } else {
            debug!(target: COMPONENT, source, line = report.line, "{report}");
        }
    }
    info!(
        target: COMPONENT,
        source,
        passed = transcript.passed(),
        failed = transcript.failed(),
        "run finished"
    );
}
