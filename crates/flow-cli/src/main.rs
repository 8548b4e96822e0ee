//! flow-cli: ejecuta las vistas del pipeline in-silico sin interfaz gráfica.
//!
//! `flow-cli stages` lista el pipeline, `flow-cli run <stage>` reproduce una
//! etapa y `flow-cli pipeline` las recorre todas siguiendo el contrato de
//! navegación.
mod printer;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use flow_core::SequenceState;
use flow_stages::results::{BIOISOSTERE_METRICS, MMGBSA_RESULT};
use flow_stages::{next_stage_affordance, Stage, StageError, StagePreset, MOLECULES};
use insilico_flow::{RuntimeConfig, SequenceDriver, CONFIG};
use log::info;

use crate::printer::ConsolePrinter;

#[derive(Parser)]
#[command(name = "flow-cli")]
#[command(about = "Simulated in-silico drug discovery pipeline", long_about = None)]
struct Cli {
    /// Speed-up factor for simulated timers (overrides INSILICO_TIME_SCALE)
    #[arg(long, global = true)]
    time_scale: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the pipeline stages in navigation order
    Stages,
    /// Run every step of one stage
    Run {
        /// Stage id (e.g. protein-prep, docking)
        stage: Stage,
        /// Print the final state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run all stages in order
    Pipeline,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = match cli.time_scale {
        Some(scale) => (*CONFIG).clone().with_time_scale(scale)?,
        None => (*CONFIG).clone(),
    };
    info!("runtime config: {config:?}");

    match cli.command {
        Command::Stages => list_stages(),
        Command::Run { stage, json } => {
            match run_stage(stage, &config).await? {
                Some(state) if json => println!("{}", serde_json::to_string_pretty(&state)?),
                Some(_) => {}
                None => print_static(stage),
            }
        }
        Command::Pipeline => run_pipeline(&config).await?,
    }
    Ok(())
}

fn list_stages() {
    for (i, stage) in Stage::ALL.iter().enumerate() {
        println!("{:>2}. {:<14} {:<28} {}", i + 1, stage.id(), stage.title(), stage.route());
    }
}

/// Ejecuta todos los pasos de `stage` en orden. `None` para etapas estáticas.
async fn run_stage(stage: Stage, config: &RuntimeConfig) -> Result<Option<SequenceState>> {
    let preset = match StagePreset::for_stage(stage) {
        Ok(preset) => preset,
        Err(StageError::NoSequence(_)) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    println!("== {} ==", stage.title());
    let sampler = preset.default_sampler();
    let mut sequencer = preset.into_sequencer(sampler)?;
    sequencer.subscribe(Box::new(ConsolePrinter::new(sequencer.definition())));
    let step_ids: Vec<String> = sequencer.definition().steps.iter().map(|s| s.id.clone()).collect();

    let mut driver = SequenceDriver::new(sequencer, config.clone());
    for step_id in &step_ids {
        if driver.run_step(step_id)?.is_none() {
            bail!("step '{step_id}' was not accepted");
        }
        driver.wait_idle().await?;
    }
    let state = driver.snapshot()?;
    print_results(stage);
    Ok(Some(state))
}

fn print_results(stage: Stage) {
    match stage {
        Stage::Mmgbsa => {
            let r = MMGBSA_RESULT;
            println!("  dG bind {:.1} kcal/mol (solv {:.1}, coulomb {:.1}, vdW {:.1})",
                     r.delta_g, r.solvation, r.coulomb, r.van_der_waals);
        }
        Stage::Bioisostere => {
            for m in BIOISOSTERE_METRICS {
                println!("  {:<16} {:>6.1} -> {:>6.1} {} ({:+.1})", m.label, m.before, m.after, m.unit, m.delta());
            }
        }
        _ => {}
    }
}

fn print_static(stage: Stage) {
    println!("== {} ==", stage.title());
    println!("  {}", stage.description());
    if stage == Stage::Admet {
        for m in MOLECULES {
            println!("  {:<26} MW {:>6.2}  HBD {}  HBA {}  PSA {:>5.1}  abs {:>3.0}%",
                     m.name, m.admet.mw, m.admet.hbd, m.admet.hba, m.admet.psa, m.admet.absorption);
        }
    }
}

async fn run_pipeline(config: &RuntimeConfig) -> Result<()> {
    let mut stage = Stage::ALL[0];
    loop {
        let next = match run_stage(stage, config).await? {
            Some(state) => next_stage_affordance(stage, &state),
            None => {
                print_static(stage);
                stage.next()
            }
        };
        match next {
            Some(next) => {
                println!("  -> {}", next.route());
                stage = next;
            }
            None if stage.next().is_none() => break,
            None => bail!("stage '{}' did not unlock the next stage", stage.id()),
        }
    }
    println!("pipeline complete");
    Ok(())
}
