use flow_core::{StepStatus, TickOutcome};
use flow_stages::presets::{docking, md_simulation, protein_prep};
use flow_stages::results::{BIOISOSTERE_METRICS, MMGBSA_RESULT};
use flow_stages::{next_stage_affordance, stage_sequencer, DockingScoreSampler, RmsdSampler, Stage, StageError, StagePreset};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

fn drive(seq: &mut flow_core::StepSequencer, step_id: &str) -> TickOutcome {
    let ticket = seq.run_step(step_id).expect("step should start");
    let mut last = TickOutcome::Idle;
    for _ in 0..ticket.total_ticks {
        last = seq.tick_for(&ticket);
    }
    last
}

#[test]
fn static_stages_have_no_sequence() {
    assert_eq!(StagePreset::for_stage(Stage::Admet).unwrap_err(), StageError::NoSequence("admet"));
    assert!(matches!(stage_sequencer(Stage::Report), Err(StageError::NoSequence("report"))));
}

#[test]
fn every_interactive_stage_builds_a_valid_sequencer() {
    for stage in Stage::ALL {
        if matches!(stage, Stage::Admet | Stage::Report) {
            continue;
        }
        let seq = stage_sequencer(stage).expect("preset should be valid");
        assert!(!seq.is_complete());
        assert!(seq.state().steps.values().all(|s| s.status == StepStatus::Idle));
    }
}

#[test]
fn protein_prep_reveals_logs_every_750ms() {
    let steps = protein_prep();
    assert_eq!(steps.len(), 4);
    for s in &steps {
        assert_eq!(s.logs.len(), 5);
        assert_eq!(s.tick_interval(), Duration::from_millis(750));
        assert_eq!(s.total_ticks(), 6);
    }
}

#[test]
fn docking_final_score_overrides_search_jitter() {
    let preset = StagePreset { stage: Stage::Docking, steps: docking() };
    let sampler = DockingScoreSampler::new(StdRng::seed_from_u64(42));
    let mut seq = preset.into_sequencer(Some(Box::new(sampler))).expect("valid docking preset");

    let ticket = seq.run_step("docking").expect("docking should start");
    assert_eq!(ticket.interval, Duration::from_millis(60));
    for _ in 0..50 {
        seq.tick_for(&ticket);
    }
    let slot = seq.state().slot("docking").unwrap();
    assert_eq!(slot.samples.len(), 10);
    assert!(slot.metric.is_some_and(|v| (-7.0..=-2.0).contains(&v)));

    for _ in 50..100 {
        seq.tick_for(&ticket);
    }
    assert_eq!(seq.state().slot("docking").and_then(|s| s.metric), Some(-8.9));
    assert_eq!(next_stage_affordance(Stage::Docking, seq.state()), Some(Stage::Admet));
}

#[test]
fn md_series_has_point_every_two_ticks() {
    let preset = StagePreset { stage: Stage::MdSimulation, steps: md_simulation() };
    let mut seq = preset.into_sequencer(Some(Box::new(RmsdSampler::new(StdRng::seed_from_u64(3)))))
                        .expect("valid md preset");
    drive(&mut seq, "production");
    let slot = seq.state().slot("production").unwrap();
    let times: Vec<u32> = slot.samples.iter().map(|s| s.progress).collect();
    assert_eq!(times, (2..=100).step_by(2).collect::<Vec<u32>>());
    assert!(slot.samples.iter().filter(|s| s.progress >= 30).all(|s| s.value >= 1.3));
}

#[test]
fn mmgbsa_completes_in_fifty_ticks_with_fixed_delta_g() {
    let preset = StagePreset::for_stage(Stage::Mmgbsa).expect("valid preset");
    assert!(preset.default_sampler().is_none());
    let mut seq = stage_sequencer(Stage::Mmgbsa).expect("valid preset");
    let ticket = seq.run_step("refinement").expect("refinement should start");
    assert_eq!(ticket.total_ticks, 50);
    for _ in 0..ticket.total_ticks - 1 {
        seq.tick_for(&ticket);
        assert_eq!(seq.state().slot("refinement").and_then(|s| s.metric), None);
    }
    seq.tick_for(&ticket);
    let slot = seq.state().slot("refinement").expect("slot");
    assert_eq!(slot.metric, Some(MMGBSA_RESULT.delta_g));
    assert!(slot.samples.is_empty());
}

#[test]
fn ligand_prep_unlocks_docking_only_when_all_done() {
    let mut seq = stage_sequencer(Stage::LigandPrep).expect("valid preset");
    for id in ["desalting", "ionization", "tautomer_gen"] {
        drive(&mut seq, id);
        assert_eq!(next_stage_affordance(Stage::LigandPrep, seq.state()), None);
    }
    let outcome = drive(&mut seq, "optimization");
    assert_eq!(outcome,
               TickOutcome::Finished { step_id: "optimization".into(),
                                       sequence_complete: true });
    assert_eq!(next_stage_affordance(Stage::LigandPrep, seq.state()), Some(Stage::Docking));
}

#[test]
fn bioisostere_swap_can_be_reset_and_repeated() {
    let mut seq = stage_sequencer(Stage::Bioisostere).expect("valid preset");
    drive(&mut seq, "swap");
    assert!(seq.is_complete());
    assert_eq!(next_stage_affordance(Stage::Bioisostere, seq.state()), Some(Stage::Report));

    seq.reset();
    assert_eq!(next_stage_affordance(Stage::Bioisostere, seq.state()), None);
    drive(&mut seq, "swap");
    assert!(seq.is_complete());
    assert!(BIOISOSTERE_METRICS[0].delta() < 0.0);
}
