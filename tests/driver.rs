use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use flow_core::{SequenceEventKind, SequenceState, StepSequencer, StepSpec, StepStatus};
use flow_stages::Stage;
use insilico_flow::{RuntimeConfig, RuntimeError, SequenceDriver};
use tokio::time::sleep;
use tokio_test::assert_ok;

fn counter_sequencer(observed: Arc<AtomicUsize>) -> StepSequencer {
    let step = StepSpec::counter("md", "MD Simulation", Duration::from_millis(100), 1);
    let mut seq = StepSequencer::initialize(vec![step]).unwrap();
    seq.subscribe(Box::new(move |_: &SequenceState| {
                      observed.fetch_add(1, Ordering::SeqCst);
                  }));
    seq
}

#[tokio::test(start_paused = true)]
async fn ligand_prep_runs_to_completion_in_order() {
    let mut driver = SequenceDriver::for_stage(Stage::LigandPrep, RuntimeConfig::default()).unwrap();
    for id in ["desalting", "ionization", "tautomer_gen", "optimization"] {
        assert!(!driver.is_complete().unwrap());
        let ticket = driver.run_step(id).unwrap().expect("idle step should start");
        assert_eq!(ticket.total_ticks, 1);
        assert_ok!(driver.wait_idle().await);
        assert_eq!(driver.snapshot().unwrap().status_of(id), Some(StepStatus::Done));
    }
    assert!(driver.is_complete().unwrap());
    let completions = driver.events()
                            .unwrap()
                            .into_iter()
                            .filter(|e| matches!(e.kind, SequenceEventKind::SequenceCompleted { .. }))
                            .count();
    assert_eq!(completions, 1);
}

#[tokio::test(start_paused = true)]
async fn fixed_step_finishes_after_its_delay() {
    let mut driver = SequenceDriver::for_stage(Stage::Ifd, RuntimeConfig::default()).unwrap();
    let ticket = driver.run_step("induced_fit").unwrap().unwrap();
    assert_eq!(ticket.interval, Duration::from_millis(3000));

    sleep(Duration::from_millis(2900)).await;
    assert_eq!(driver.snapshot().unwrap().status_of("induced_fit"), Some(StepStatus::Running));
    sleep(Duration::from_millis(200)).await;
    assert!(driver.is_complete().unwrap());
    assert!(!driver.is_ticking());
}

#[tokio::test(start_paused = true)]
async fn run_while_busy_keeps_the_current_timer() {
    let mut driver = SequenceDriver::for_stage(Stage::LigandPrep, RuntimeConfig::default()).unwrap();
    driver.run_step("desalting").unwrap().unwrap();
    sleep(Duration::from_millis(500)).await;

    assert!(driver.run_step("ionization").unwrap().is_none());
    assert!(driver.run_step("desalting").unwrap().is_none());
    assert!(driver.is_ticking());

    assert_ok!(driver.wait_idle().await);
    let state = driver.snapshot().unwrap();
    assert_eq!(state.status_of("desalting"), Some(StepStatus::Done));
    assert_eq!(state.status_of("ionization"), Some(StepStatus::Idle));
}

#[tokio::test(start_paused = true)]
async fn reset_mid_run_cancels_the_timer() {
    let observed = Arc::new(AtomicUsize::new(0));
    let seq = counter_sequencer(Arc::clone(&observed));
    let initial = seq.state().clone();
    let mut driver = SequenceDriver::new(seq, RuntimeConfig::default());

    driver.run_step("md").unwrap().unwrap();
    sleep(Duration::from_millis(4250)).await;
    let progress = driver.snapshot().unwrap().progress();
    assert!(progress > 0 && progress < 100, "progress was {progress}");

    driver.reset().unwrap();
    assert!(!driver.is_ticking());
    let after_reset = observed.load(Ordering::SeqCst);

    sleep(Duration::from_secs(20)).await;
    assert_eq!(driver.snapshot().unwrap(), initial);
    assert_eq!(observed.load(Ordering::SeqCst), after_reset);
}

#[tokio::test(start_paused = true)]
async fn counter_never_exceeds_one_hundred() {
    let observed = Arc::new(AtomicUsize::new(0));
    let mut driver = SequenceDriver::new(counter_sequencer(observed), RuntimeConfig::default());
    driver.run_step("md").unwrap().unwrap();
    assert_ok!(driver.wait_idle().await);

    let state = driver.snapshot().unwrap();
    assert_eq!(state.slot("md").unwrap().progress, 100);
    assert!(state.all_done());
    // 99 ticks intermedios + el terminal, sin ningún tick extra.
    let ticks = driver.events()
                      .unwrap()
                      .into_iter()
                      .filter(|e| matches!(e.kind, SequenceEventKind::StepProgress { .. }))
                      .count();
    assert_eq!(ticks, 99);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_driver_stops_mutations() {
    let observed = Arc::new(AtomicUsize::new(0));
    let mut driver = SequenceDriver::new(counter_sequencer(Arc::clone(&observed)), RuntimeConfig::default());
    driver.run_step("md").unwrap().unwrap();
    sleep(Duration::from_millis(1050)).await;
    drop(driver);

    let at_drop = observed.load(Ordering::SeqCst);
    sleep(Duration::from_secs(20)).await;
    assert_eq!(observed.load(Ordering::SeqCst), at_drop);
}

#[tokio::test(start_paused = true)]
async fn time_scale_shortens_the_period() {
    let config = RuntimeConfig::default().with_time_scale(10.0).unwrap();
    let mut driver = SequenceDriver::for_stage(Stage::Bioisostere, config).unwrap();
    driver.run_step("swap").unwrap().unwrap();
    sleep(Duration::from_millis(160)).await;
    assert!(driver.is_complete().unwrap());
}

#[test]
fn static_stage_has_no_driver() {
    let err = SequenceDriver::for_stage(Stage::Report, RuntimeConfig::default()).err().unwrap();
    assert!(matches!(err, RuntimeError::Stage(_)));
}
