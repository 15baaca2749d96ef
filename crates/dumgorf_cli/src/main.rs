//! Command-line front end for the dumgorf tools.
//!
//! Examples:
//!   dumgorf-cli tools
//!   dumgorf-cli rng hello-world 500
//!   dumgorf-cli dice 3d8+5
//!   dumgorf-cli roll 2d6 --seed campaign-1
//!   dumgorf-cli loot boss-loot 5000 --seed 42
//!   dumgorf-cli sort insertion 5,3,8,1
//!
//! Pass `--json` before the command for machine-readable output and
//! `--data-dir <path>` to keep config and settings somewhere else.

mod config;
mod error;
mod paths;
mod render;
mod settings;

use std::process;

use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn, Level};

use dumgorf::algorithms::{self, AlgorithmInfo};
use dumgorf::dice::{self, DiceExpr};
use dumgorf::loot::{share_link, LootPreset};
use dumgorf::prelude::*;
use dumgorf::prng::histogram;

use crate::config::CliConfig;
use crate::error::CliError;
use crate::paths::AppPaths;
use crate::settings::Settings;

/// Length of the playground array when `sort` gets no values.
const DEFAULT_SORT_LEN: usize = 12;
/// Points thrown by `pi` when no count is given.
const DEFAULT_PI_SAMPLES: u32 = 10_000;

fn usage() -> ! {
    eprintln!("dumgorf-cli (seeded game-dev tools)");
    eprintln!("Usage: dumgorf-cli [--json] [--data-dir path] <command> [args]\n");
    eprintln!("Commands:");
    eprintln!("  tools [--all]                     List registered tools");
    eprintln!("  tool <id>                         Show one tool");
    eprintln!("  seed <text>                       Hash text to a 32-bit seed");
    eprintln!("  rng <seed> [count] [buckets]      Sample the seeded generator");
    eprintln!("  dice <notation>                   Outcome distribution (e.g. 3d8+5)");
    eprintln!("  presets                           Dice and loot presets");
    eprintln!("  roll <notation> [--seed text]     Roll dice once");
    eprintln!("  loot <table> [runs] [--seed n]    Stats and simulation for a loot table");
    eprintln!("  sort <algo> [n,n,...] [--seed t]  Step-by-step sort trace");
    eprintln!("  algos                             Algorithm complexity table");
    eprintln!("  pi [samples] [--seed text]        Monte Carlo estimate of pi");
    eprintln!("  config                            Show effective configuration");
    eprintln!("  paths                             Show data directory and files");
    eprintln!("  get|set|unset <key> [value]       Persisted settings");
    process::exit(1);
}

struct Invocation {
    json: bool,
    data_dir: Option<String>,
    command: String,
    args: Vec<String>,
}

fn parse_args() -> Invocation {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let mut json = false;
    let mut data_dir = None;

    loop {
        match args.first().map(String::as_str) {
            Some("--json") => {
                json = true;
                args.remove(0);
            }
            Some("--data-dir") if args.len() >= 2 => {
                data_dir = Some(args[1].clone());
                args.drain(0..2);
            }
            _ => break,
        }
    }

    if args.is_empty() {
        usage();
    }
    let command = args.remove(0);
    Invocation {
        json,
        data_dir,
        command,
        args,
    }
}

/// Pull `--name value` out of `args`, wherever it appears.
fn take_option(args: &mut Vec<String>, name: &str) -> Option<String> {
    let pos = args.iter().position(|a| a == name)?;
    if pos + 1 >= args.len() {
        args.remove(pos);
        return None;
    }
    let value = args.remove(pos + 1);
    args.remove(pos);
    Some(value)
}

fn take_flag(args: &mut Vec<String>, name: &str) -> bool {
    match args.iter().position(|a| a == name) {
        Some(pos) => {
            args.remove(pos);
            true
        }
        None => false,
    }
}

fn parse_num<T: std::str::FromStr>(what: &'static str, text: &str) -> Result<T, CliError> {
    text.trim().parse().map_err(|_| CliError::invalid(what, text))
}

fn init_logging(level: &str) {
    let parsed = level.parse::<Level>();
    tracing_subscriber::fmt()
        .with_max_level(*parsed.as_ref().unwrap_or(&Level::WARN))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    if parsed.is_err() {
        warn!("Unknown log level {:?}, using warn", level);
    }
}

/// Shared state for one invocation.
struct App {
    config: CliConfig,
    paths: AppPaths,
    registry: ToolRegistry,
    json: bool,
}

impl App {
    fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> Result<(), CliError> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            print!("{}", text());
        }
        Ok(())
    }

    fn run(&self, command: &str, mut args: Vec<String>) -> Result<(), CliError> {
        debug!(command, ?args, "dispatch");
        match command {
            "tools" => {
                let all = take_flag(&mut args, "--all");
                let list: Vec<&ToolManifest> = if all {
                    self.registry.all().iter().collect()
                } else {
                    self.registry.active().collect()
                };
                self.emit(&list, || render::tools(list.iter().copied()))
            }
            "tool" => {
                let id = args.first().unwrap_or_else(|| usage());
                let tool = self
                    .registry
                    .get(id)
                    .ok_or_else(|| CliError::UnknownTool(id.clone()))?;
                self.emit(tool, || {
                    format!(
                        "{} ({})\n{}\nroute: {}\ntags: {}\n",
                        tool.title,
                        tool.id,
                        tool.description,
                        tool.route,
                        tool.tags.join(", ")
                    )
                })
            }
            "seed" => {
                let text = args.join(" ");
                let seed = hash_seed(&text);
                self.emit(&json!({ "text": text, "seed": seed }), || format!("{seed}\n"))
            }
            "rng" => self.rng(&args),
            "dice" => {
                let notation = args.first().unwrap_or_else(|| usage());
                let expr: DiceExpr = notation.parse().map_err(dumgorf::Error::from)?;
                let dist = expr.distribution();
                self.emit(
                    &json!({ "expr": expr, "notation": expr.to_string(), "distribution": dist }),
                    || render::distribution(&expr.to_string(), &dist),
                )
            }
            "presets" => {
                let tables: Vec<_> = LootPreset::ALL
                    .iter()
                    .map(|p| json!({ "id": p.id(), "label": p.label() }))
                    .collect();
                self.emit(&json!({ "dice": dice::PRESETS, "loot": tables }), || {
                    let mut out = format!("dice: {}\nloot:\n", dice::PRESETS.join(" "));
                    for p in LootPreset::ALL {
                        out.push_str(&format!("  {:<12} {}\n", p.id(), p.label()));
                    }
                    out
                })
            }
            "roll" => {
                let seed = take_option(&mut args, "--seed");
                let notation = args.first().unwrap_or_else(|| usage());
                let expr: DiceExpr = notation.parse().map_err(dumgorf::Error::from)?;
                let mut rng = match &seed {
                    Some(text) => SeededRng::from_text(text),
                    None => SeededRng::from_entropy(),
                };
                let result = expr.roll(&mut rng);
                self.emit(&result, || render::roll(&expr.to_string(), &result, expr.modifier()))
            }
            "loot" => self.loot(args),
            "sort" => self.sort(args),
            "algos" => {
                let list: &[AlgorithmInfo] = algorithms::catalog();
                self.emit(&list, || {
                    let mut out = format!(
                        "{:<16} {:<12} {:<10} {:<10} {:<10} {}\n",
                        "algorithm", "category", "best", "average", "worst", "space"
                    );
                    for a in list {
                        out.push_str(&format!(
                            "{:<16} {:<12} {:<10} {:<10} {:<10} {}\n",
                            a.label,
                            a.category.label(),
                            a.best,
                            a.average,
                            a.worst,
                            a.space
                        ));
                    }
                    out
                })
            }
            "pi" => {
                let seed = take_option(&mut args, "--seed");
                let samples = match args.first() {
                    Some(s) => parse_num("sample count", s)?,
                    None => DEFAULT_PI_SAMPLES,
                };
                let mut rng = match &seed {
                    Some(text) => SeededRng::from_text(text),
                    None => SeededRng::from_entropy(),
                };
                let estimate = algorithms::estimate_pi(samples, &mut rng);
                self.emit(&json!({ "samples": samples, "estimate": estimate }), || {
                    format!(
                        "pi ~ {estimate:.6} ({samples} samples, error {:.6})\n",
                        (estimate - std::f64::consts::PI).abs()
                    )
                })
            }
            "config" => self.emit(&self.config, || {
                format!(
                    "sample_count = {}\nhistogram_buckets = {}\nsimulation_runs = {}\njson_output = {}\nlog_level = {}\n",
                    self.config.sample_count,
                    self.config.histogram_buckets,
                    self.config.simulation_runs,
                    self.config.json_output,
                    self.config.log_level
                )
            }),
            "paths" => {
                let data = self.paths.data_dir().display().to_string();
                let cfg = self.paths.config_file().display().to_string();
                let settings = self.paths.settings_file().display().to_string();
                self.emit(
                    &json!({ "data_dir": data, "config": cfg, "settings": settings }),
                    || format!("Data directory: {data}\nConfig: {cfg}\nSettings: {settings}\n"),
                )
            }
            "get" | "set" | "unset" => self.settings(command, &args),
            _ => usage(),
        }
    }

    fn rng(&self, args: &[String]) -> Result<(), CliError> {
        let seed_text = args.first().unwrap_or_else(|| usage());
        let count = match args.get(1) {
            Some(s) => parse_num("sample count", s)?,
            None => self.config.sample_count,
        };
        let buckets = match args.get(2) {
            Some(s) => parse_num::<usize>("bucket count", s)?.max(1),
            None => self.config.histogram_buckets,
        };
        let seed = hash_seed(seed_text);
        let values = SeededRng::new(seed).sample(count);
        let bins = histogram(&values, buckets);
        self.emit(
            &json!({ "seed": seed, "values": values, "histogram": bins }),
            || render::histogram(seed, &values, &bins),
        )
    }

    fn loot(&self, mut args: Vec<String>) -> Result<(), CliError> {
        let seed_text = take_option(&mut args, "--seed");
        let id = args.first().unwrap_or_else(|| usage());
        let preset = LootPreset::from_id(id).ok_or_else(|| CliError::UnknownPreset(id.clone()))?;
        let runs = match args.get(1) {
            Some(s) => parse_num("run count", s)?,
            None => self.config.simulation_runs,
        };
        // Integer seeds are used as-is; anything else is hashed.
        let seed = seed_text
            .as_deref()
            .map(|s| s.trim().parse::<i32>().unwrap_or_else(|_| hash_seed(s)));

        let table = preset.table();
        let sim = table.simulate(runs, seed);
        let link = seed_text.as_deref().map(|s| share_link(s, preset.id()));
        self.emit(
            &json!({
                "table": preset.id(),
                "items": table.items(),
                "expected_value": table.expected_value(),
                "std_dev": table.std_dev(),
                "simulation": sim,
                "share": link,
            }),
            || {
                let mut out = render::loot(preset.label(), &table, &sim);
                if let Some(link) = &link {
                    out.push_str(&format!("\nShare: {link}\n"));
                }
                out
            },
        )
    }

    fn sort(&self, mut args: Vec<String>) -> Result<(), CliError> {
        let seed = take_option(&mut args, "--seed");
        let name = args.first().unwrap_or_else(|| usage());
        let algorithm: SortAlgorithm = name.parse()?;
        let input: Vec<i64> = match args.get(1) {
            Some(list) => list
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| parse_num("array value", s))
                .collect::<Result<_, _>>()?,
            None => {
                let mut rng = SeededRng::from_text(seed.as_deref().unwrap_or(algorithm.id()));
                algorithms::random_array(DEFAULT_SORT_LEN, &mut rng)
                    .into_iter()
                    .map(i64::from)
                    .collect()
            }
        };

        let trace: Vec<SortStep<i64>> = sort_steps(algorithm, &input).collect();
        self.emit(
            &json!({ "algorithm": algorithm, "input": input, "steps": trace }),
            || {
                let shown: Vec<String> = input.iter().map(|v| v.to_string()).collect();
                let mut out = format!("{} on [{}]\n", algorithm.label(), shown.join(", "));
                for (i, step) in trace.iter().enumerate() {
                    out.push_str(&render::sort_step(i + 1, step));
                    out.push('\n');
                }
                let swaps = trace.iter().filter(|s| s.swapped).count();
                out.push_str(&format!("{} comparisons, {} swaps\n", trace.len(), swaps));
                out
            },
        )
    }

    fn settings(&self, command: &str, args: &[String]) -> Result<(), CliError> {
        let mut settings = Settings::open(&self.paths.settings_file())?;
        match (command, args) {
            ("get", []) => {
                let all: std::collections::BTreeMap<&str, &str> = settings.iter().collect();
                self.emit(&all, || {
                    all.iter().map(|(k, v)| format!("{k} = {v}\n")).collect()
                })
            }
            ("get", [key, ..]) => {
                let value = settings.get(key);
                self.emit(&json!({ "key": key, "value": value }), || match value {
                    Some(v) => format!("{v}\n"),
                    None => String::new(),
                })
            }
            ("set", [key, value, ..]) => {
                settings.set(key, value)?;
                self.emit(&json!({ "key": key, "value": value }), || format!("{key} = {value}\n"))
            }
            ("unset", [key, ..]) => {
                let old = settings.remove(key)?;
                self.emit(&json!({ "key": key, "previous": old }), || match &old {
                    Some(_) => format!("removed {key}\n"),
                    None => format!("{key} was not set\n"),
                })
            }
            _ => usage(),
        }
    }
}

fn main() {
    let inv = parse_args();

    let make_error = |err: CliError| -> ! {
        eprintln!("error: {err}");
        process::exit(1);
    };

    let paths = match &inv.data_dir {
        Some(dir) => AppPaths::at(dir),
        None => AppPaths::new(),
    }
    .unwrap_or_else(|e| make_error(e));
    let config = CliConfig::load(&paths.config_file()).unwrap_or_else(|e| make_error(e));
    init_logging(&config.log_level);

    let app = App {
        json: inv.json || config.json_output,
        config,
        paths,
        registry: ToolRegistry::builtin(),
    };
    if let Err(e) = app.run(&inv.command, inv.args) {
        make_error(e);
    }
}
