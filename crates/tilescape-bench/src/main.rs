use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use tilescape_bench::report;
use tilescape_bench::runner::BenchmarkRunner;
use tilescape_bench::scenes;
use tilescape_core::config::WorldConfig;
use tilescape_core::types::Seed;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut baseline_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut seed: Option<u32> = None;
    let mut regression_threshold = 10.0f64;
    let mut tick_count = 300u32;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--baseline" => baseline_path = Some(PathBuf::from(value_of(&args, &mut i, flag))),
            "--output" => output_path = Some(PathBuf::from(value_of(&args, &mut i, flag))),
            "--config" => config_path = Some(PathBuf::from(value_of(&args, &mut i, flag))),
            "--seed" => seed = Some(Seed::from_text(value_of(&args, &mut i, flag)).0),
            "--regression-threshold" => regression_threshold = parse_value(&args, &mut i, flag),
            "--ticks" => tick_count = parse_value(&args, &mut i, flag),
            "--help" | "-h" => {
                eprintln!("Usage: walk-bench [OPTIONS]");
                eprintln!("  --baseline <path>              Load baseline JSON for comparison");
                eprintln!("  --output <path>                Save current results as JSON baseline");
                eprintln!("  --config <path>                World config RON (default: built-in)");
                eprintln!("  --seed <text>                  Seed for every scene (number or text)");
                eprintln!("  --regression-threshold <pct>   Regression threshold % (default: 10)");
                eprintln!("  --ticks <n>                    Ticks per scene (default: 300)");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let base_config = match config_path {
        Some(ref path) => match WorldConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("ERROR: {e}");
                process::exit(1);
            }
        },
        None => WorldConfig::default(),
    };

    let runner = match BenchmarkRunner::new(tick_count, base_config, seed) {
        Ok(runner) => runner,
        Err(e) => {
            eprintln!("ERROR: {e}");
            process::exit(1);
        }
    };

    let mut results = Vec::new();
    for scene in &scenes::standard_scenes() {
        match runner.run_scene(scene) {
            Ok(result) => results.push(result),
            Err(e) => log::error!("Scene '{}' skipped: {e}", scene.name),
        }
    }

    println!("\n## Benchmark Results\n");
    println!("{}", report::format_markdown(&results));

    if let Some(ref path) = output_path {
        let baseline = report::Baseline {
            label: format!("walk-bench-{}", process::id()),
            results: results.clone(),
        };
        match report::save_baseline(path, &baseline) {
            Ok(()) => log::info!("Saved baseline to {}", path.display()),
            Err(e) => {
                eprintln!("ERROR: failed to save baseline {}: {e}", path.display());
                process::exit(1);
            }
        }
    }

    if let Some(ref path) = baseline_path {
        if let Some(baseline) = report::load_baseline(path) {
            let regressions = report::compare(&results, &baseline, regression_threshold);
            println!("{}", report::format_comparison(&regressions, regression_threshold));
            if !regressions.is_empty() {
                eprintln!("ERROR: {} regressions detected, exiting with code 1", regressions.len());
                process::exit(1);
            }
        } else {
            log::warn!("Baseline file not found: {}", path.display());
        }
    }

    log::info!("Benchmark complete.");
}

/// Value following `flag`, advancing the cursor. Exits if it is missing.
fn value_of<'a>(args: &'a [String], i: &mut usize, flag: &str) -> &'a str {
    *i += 1;
    match args.get(*i) {
        Some(value) => value,
        None => {
            eprintln!("Missing value for {}", flag);
            process::exit(1);
        }
    }
}

fn parse_value<T: FromStr>(args: &[String], i: &mut usize, flag: &str) -> T {
    let raw = value_of(args, i, flag);
    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            eprintln!("Invalid {} value: {}", flag, raw);
            process::exit(1);
        }
    }
}
