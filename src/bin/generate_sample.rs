use std::sync::Arc;

use arrow::array::Float64Array;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// y = 0.5x^3 - 2x^2 + x + 4
fn cubic(x: f64) -> f64 {
    0.5 * x.powi(3) - 2.0 * x.powi(2) + x + 4.0
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

#[derive(Serialize)]
struct Sample {
    x: Vec<f64>,
    y: Vec<f64>,
}

fn write_parquet(path: &str, sample: &Sample) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("x", DataType::Float64, false),
        Field::new("y", DataType::Float64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Float64Array::from(sample.x.clone())),
            Arc::new(Float64Array::from(sample.y.clone())),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

/// Usage: `generate_sample [OUTPUT]` – `.parquet` output writes Parquet,
/// anything else JSON.  Defaults to `sample_data.json`.
fn main() {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_data.json".to_string());

    let mut rng = SimpleRng::new(42);

    // 41 points over [-2, 6], step 0.2
    let x: Vec<f64> = (0..=40).map(|i| -2.0 + i as f64 * 0.2).collect();
    let y: Vec<f64> = x.iter().map(|&xi| cubic(xi) + rng.gauss(0.0, 0.75)).collect();
    let sample = Sample { x, y };

    if output_path.ends_with(".parquet") {
        write_parquet(&output_path, &sample);
    } else {
        let json = serde_json::to_string_pretty(&sample).expect("Failed to serialise sample");
        std::fs::write(&output_path, json).expect("Failed to write output file");
    }

    println!("Wrote {} points to {output_path}", sample.x.len());
}
