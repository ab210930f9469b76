//! Command implementations.

use anyhow::Context;

use resto_model::Position;

use crate::cli::ReplayArgs;
use resto_cli::replay::run_script;
use resto_cli::script::ReplayScript;

pub fn run_replay(args: &ReplayArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("reading {}", args.script.display()))?;
    let script: ReplayScript = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", args.script.display()))?;
    let payload = run_script(&script)?;
    let json = if args.compact {
        serde_json::to_string(&payload)?
    } else {
        serde_json::to_string_pretty(&payload)?
    };
    println!("{json}");
    Ok(())
}

pub fn run_positions() {
    println!("{:<5} {:<12} {:<6} {:>6}", "FDI", "QUADRANT", "JAW", "PALMER");
    for position in Position::all() {
        println!(
            "{:<5} {:<12} {:<6} {:>6}",
            position.fdi(),
            position.quadrant().as_str(),
            position.jaw().as_str(),
            position.palmer()
        );
    }
}
