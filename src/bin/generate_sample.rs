use std::sync::Arc;

use anyhow::Context;
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const CSV_PATH: &str = "Data Science Jobs Salaries.csv";
const PARQUET_PATH: &str = "sample_salaries.parquet";
const ROWS: usize = 600;

const YEARS: [i64; 4] = [2020, 2021, 2022, 2023];
const TITLES: [(&str, f64); 10] = [
    ("Data Scientist", 1.00),
    ("Data Engineer", 1.02),
    ("Data Analyst", 0.70),
    ("Machine Learning Engineer", 1.12),
    ("Research Scientist", 1.08),
    ("Data Science Manager", 1.30),
    ("Analytics Engineer", 0.90),
    ("Big Data Engineer", 0.85),
    ("Computer Vision Engineer", 1.05),
    ("Head of Data", 1.45),
];
const LOCATIONS: [(&str, f64); 8] = [
    ("US", 1.00),
    ("GB", 0.72),
    ("CA", 0.80),
    ("DE", 0.70),
    ("IN", 0.25),
    ("FR", 0.62),
    ("ES", 0.50),
    ("BR", 0.30),
];
/// Experience code, base salary (USD), selection weight.
static LEVELS: [(&str, f64, f64); 4] = [
    ("EN", 60_000.0, 0.15),
    ("MI", 90_000.0, 0.35),
    ("SE", 140_000.0, 0.42),
    ("EX", 190_000.0, 0.08),
];
const REMOTE: [i64; 3] = [0, 50, 100];
const EMPLOYMENT: [&str; 4] = ["FT", "FT", "FT", "CT"];
const SIZES: [&str; 3] = ["S", "M", "L"];

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn weighted_level(&mut self) -> &'static (&'static str, f64, f64) {
        let mut r = self.next_f64();
        for level in &LEVELS {
            if r < level.2 {
                return level;
            }
            r -= level.2;
        }
        &LEVELS[LEVELS.len() - 1]
    }
}

struct Row {
    work_year: i64,
    experience_level: &'static str,
    employment_type: &'static str,
    job_title: &'static str,
    salary_in_usd: i64,
    remote_ratio: i64,
    company_location: &'static str,
    company_size: &'static str,
}

fn generate_rows(rng: &mut SimpleRng) -> Vec<Row> {
    (0..ROWS)
        .map(|_| {
            let &(level, base, _) = rng.weighted_level();
            let &(title, title_factor) = rng.pick(&TITLES);
            let &(location, location_factor) = rng.pick(&LOCATIONS);
            let work_year = *rng.pick(&YEARS);
            let growth = 1.0 + 0.04 * (work_year - YEARS[0]) as f64;
            // Log-normal spread around the expected salary.
            let spread = rng.gauss(0.0, 0.25).exp();
            let salary = base * title_factor * location_factor * growth * spread;

            Row {
                work_year,
                experience_level: level,
                employment_type: *rng.pick(&EMPLOYMENT),
                job_title: title,
                salary_in_usd: salary.round() as i64,
                remote_ratio: *rng.pick(&REMOTE),
                company_location: location,
                company_size: *rng.pick(&SIZES),
            }
        })
        .collect()
}

const HEADER: [&str; 8] = [
    "work_year",
    "experience_level",
    "employment_type",
    "job_title",
    "salary_in_usd",
    "remote_ratio",
    "company_location",
    "company_size",
];

fn write_csv(rows: &[Row]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(CSV_PATH).context("creating CSV output")?;
    writer.write_record(HEADER)?;
    for r in rows {
        writer.write_record([
            r.work_year.to_string(),
            r.experience_level.to_string(),
            r.employment_type.to_string(),
            r.job_title.to_string(),
            r.salary_in_usd.to_string(),
            r.remote_ratio.to_string(),
            r.company_location.to_string(),
            r.company_size.to_string(),
        ])?;
    }

    // A few rows the dashboard is expected to drop or pass through.
    writer.write_record(["unknown", "SE", "FT", "Data Scientist", "120000", "0", "US", "M"])?;
    writer.write_record(["2022", "MI", "FT", "Data Analyst", "", "50", "GB", "S"])?;
    writer.write_record(["2021", "SE", "FT", "Data Engineer", "n/a", "100", "DE", "L"])?;
    writer.write_record(["FY2022", "Principal", "FT", "Data Architect", "210000", "75", "US", "L"])?;
    writer.flush()?;
    Ok(())
}

fn write_parquet(rows: &[Row]) -> anyhow::Result<()> {
    let strings = |f: fn(&Row) -> &'static str| -> StringArray {
        StringArray::from(rows.iter().map(f).collect::<Vec<_>>())
    };
    let ints = |f: fn(&Row) -> i64| -> Int64Array {
        Int64Array::from(rows.iter().map(f).collect::<Vec<_>>())
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("work_year", DataType::Int64, false),
        Field::new("experience_level", DataType::Utf8, false),
        Field::new("employment_type", DataType::Utf8, false),
        Field::new("job_title", DataType::Utf8, false),
        Field::new("salary_in_usd", DataType::Int64, false),
        Field::new("remote_ratio", DataType::Int64, false),
        Field::new("company_location", DataType::Utf8, false),
        Field::new("company_size", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(ints(|r| r.work_year)),
            Arc::new(strings(|r| r.experience_level)),
            Arc::new(strings(|r| r.employment_type)),
            Arc::new(strings(|r| r.job_title)),
            Arc::new(ints(|r| r.salary_in_usd)),
            Arc::new(ints(|r| r.remote_ratio)),
            Arc::new(strings(|r| r.company_location)),
            Arc::new(strings(|r| r.company_size)),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(PARQUET_PATH).context("creating Parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng);

    write_csv(&rows)?;
    write_parquet(&rows)?;

    println!(
        "Wrote {} rows (+4 irregular) to '{CSV_PATH}' and {} rows to '{PARQUET_PATH}'",
        rows.len(),
        rows.len()
    );
    Ok(())
}
