//! Samplers de métricas cosméticas.
//!
//! Ambos son genéricos sobre el RNG: en producción `StdRng::from_entropy()`,
//! en tests una semilla fija.
use flow_core::MetricSampler;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Score de docking "buscando" pose: uniforme en (-7.0, -2.0], un decimal.
#[derive(Debug, Clone)]
pub struct DockingScoreSampler<R: Rng = StdRng> {
    rng: R,
}

impl DockingScoreSampler<StdRng> {
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }
}

impl<R: Rng> DockingScoreSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> MetricSampler for DockingScoreSampler<R> {
    fn sample(&mut self, _step_id: &str, _progress: u32) -> f64 {
        let u: f64 = self.rng.gen();
        round_to(u * -5.0 - 2.0, 1)
    }
}

/// RMSD (Å) de la trayectoria MD: rampa de equilibrado hasta t = 30 y luego
/// meseta alrededor de 1.3-1.5 Å. Dos decimales.
#[derive(Debug, Clone)]
pub struct RmsdSampler<R: Rng = StdRng> {
    rng: R,
}

impl RmsdSampler<StdRng> {
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }
}

impl<R: Rng> RmsdSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> MetricSampler for RmsdSampler<R> {
    fn sample(&mut self, _step_id: &str, progress: u32) -> f64 {
        let t = progress as f64;
        let u: f64 = self.rng.gen();
        let rmsd = if progress < 30 { 0.4 + t * 0.03 + u * 0.15 } else { 1.3 + u * 0.2 };
        round_to(rmsd, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docking_scores_stay_in_search_band() {
        let mut s = DockingScoreSampler::new(StdRng::seed_from_u64(7));
        for p in (5..100).step_by(5) {
            let v = s.sample("docking", p);
            assert!((-7.0..=-2.0).contains(&v), "score {v} out of band");
            assert_eq!(round_to(v, 1), v);
        }
    }

    #[test]
    fn rmsd_ramps_then_plateaus() {
        let mut s = RmsdSampler::new(StdRng::seed_from_u64(11));
        let early = s.sample("production", 2);
        assert!((0.46..=0.61).contains(&early), "early rmsd {early}");
        for p in (30..=100).step_by(2) {
            let v = s.sample("production", p);
            assert!((1.3..=1.5).contains(&v), "plateau rmsd {v}");
        }
    }
}
