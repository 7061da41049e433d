use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const CSV_PATH: &str = "spacex_launch_dash.csv";
const PARQUET_PATH: &str = "spacex_launch_dash.parquet";

/// Sites with their share of launches and a base success rate.
const SITES: [(&str, u32, f64); 4] = [
    ("CCAFS LC-40", 26, 0.27),
    ("VAFB SLC-4E", 10, 0.40),
    ("KSC LC-39A", 13, 0.77),
    ("CCAFS SLC-40", 7, 0.43),
];

/// Booster families in flight order, with a reliability bonus.
const BOOSTERS: [(&str, &str, f64); 5] = [
    ("v1.0", "F9 v1.0  B000", -0.30),
    ("v1.1", "F9 v1.1  B10", -0.10),
    ("FT", "F9 FT B10", 0.25),
    ("B4", "F9 B4 B10", 0.30),
    ("B5", "F9 B5 B10", 0.45),
];

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
}

struct Launch {
    flight_number: i64,
    site: &'static str,
    class: i64,
    payload: f64,
    booster_version: String,
    booster_category: &'static str,
}

fn generate(rng: &mut SimpleRng) -> Vec<Launch> {
    let total: u32 = SITES.iter().map(|s| s.1).sum();
    let mut launches = Vec::with_capacity(total as usize);

    for n in 0..total {
        // Draw a site weighted by its launch share.
        let mut pick = (rng.next_f64() * total as f64) as u32;
        let &(site, _, base_rate) = SITES
            .iter()
            .find(|s| {
                if pick < s.1 {
                    true
                } else {
                    pick -= s.1;
                    false
                }
            })
            .unwrap_or(&SITES[0]);

        let era = (n as usize * BOOSTERS.len()) / total as usize;
        let (category, prefix, bonus) = BOOSTERS[era];
        let serial = 3 + n;

        // Early flights carried light payloads; a few carry none.
        let payload = if rng.next_f64() < 0.05 {
            0.0
        } else {
            let ceiling = 2_000.0 + 8_000.0 * (era as f64 / (BOOSTERS.len() - 1) as f64);
            (rng.next_f64() * ceiling * 10.0).round() / 10.0
        };

        let class = i64::from(rng.next_f64() < (base_rate + bonus).clamp(0.05, 0.95));

        launches.push(Launch {
            flight_number: i64::from(n + 1),
            site,
            class,
            payload: payload.min(9_600.0),
            booster_version: format!("{prefix}{serial:02}"),
            booster_category: category,
        });
    }
    launches
}

fn write_csv(launches: &[Launch]) -> Result<()> {
    let mut writer = csv::Writer::from_path(CSV_PATH).context("creating CSV file")?;
    writer.write_record([
        "Flight Number",
        "Launch Site",
        "class",
        "Payload Mass (kg)",
        "Booster Version",
        "Booster Version Category",
    ])?;
    for l in launches {
        writer.write_record([
            l.flight_number.to_string(),
            l.site.to_string(),
            l.class.to_string(),
            format!("{:.1}", l.payload),
            l.booster_version.clone(),
            l.booster_category.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(launches: &[Launch]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.flight_number))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.site))),
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.class))),
            Arc::new(Float64Array::from_iter_values(launches.iter().map(|l| l.payload))),
            Arc::new(StringArray::from_iter_values(
                launches.iter().map(|l| l.booster_version.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(
                launches.iter().map(|l| l.booster_category),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(PARQUET_PATH).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let launches = generate(&mut rng);

    write_csv(&launches)?;
    write_parquet(&launches)?;

    let successes = launches.iter().filter(|l| l.class == 1).count();
    println!(
        "Wrote {} launches ({successes} successful) to {CSV_PATH} and {PARQUET_PATH}",
        launches.len()
    );
    Ok(())
}
