use std::f64::consts::PI;

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xorshift64*)
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng {
            state: seed.max(1),
        }
    }

    fn next_f64(&mut self) -> f64 {
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        let v = self.state.wrapping_mul(0x2545_F491_4F6C_DD1D);
        (v >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        std_dev * (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // 2 ms window centred on the trigger, 1 µs per sample
    let samples = 2000;
    let dt = 1e-6;
    let t0 = -1e-3;
    let freq = 1e3;

    let output_path = "sample_scope.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer.write_record(["x-axis", "1", "2", "3"])?;
    writer.write_record(["second", "Volt", "Volt", "Volt"])?;

    for k in 0..samples {
        let t = t0 + k as f64 * dt;
        let phase = 2.0 * PI * freq * t;

        let sine = 1.5 * phase.sin() + rng.gauss(0.02);
        let square = (if phase.sin() >= 0.0 { 3.3 } else { 0.0 }) + rng.gauss(0.05);
        let damped = 0.8 * (-(t - t0) * 2e3).exp() * (4.0 * phase).cos() + rng.gauss(0.01);

        writer.write_record([
            format!("{t:.6e}"),
            format!("{sine:.5}"),
            format!("{square:.5}"),
            format!("{damped:.5}"),
        ])?;
    }

    writer.flush().context("flushing CSV writer")?;

    println!("Wrote {samples} samples x 3 channels to {output_path}");
    Ok(())
}
