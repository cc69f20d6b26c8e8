use anyhow::{Context, Result};

use spacex_dash::data::model::{
    BOOSTER_CATEGORY_COLUMN, CLASS_COLUMN, PAYLOAD_COLUMN, SITE_COLUMN,
};

/// SplitMix64: enough randomness for a reproducible sample file.
struct SampleRng(u64);

impl SampleRng {
    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        (z ^ (z >> 31)) as f64 / (u64::MAX as f64 + 1.0)
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let i = (self.next_f64() * items.len() as f64) as usize;
        &items[i.min(items.len() - 1)]
    }
}

/// Booster generations in flight order, with their payload ceiling (kg) and
/// success probability.
const BOOSTERS: [(&str, f64, f64); 5] = [
    ("v1.0", 700.0, 0.2),
    ("v1.1", 4500.0, 0.35),
    ("FT", 7000.0, 0.65),
    ("B4", 9600.0, 0.55),
    ("B5", 6500.0, 0.9),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

const FLIGHTS: usize = 56;

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "spacex_launch_dash.csv".to_string());
    let mut rng = SampleRng(42);

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record([
        "",
        "Flight Number",
        SITE_COLUMN,
        CLASS_COLUMN,
        PAYLOAD_COLUMN,
        "Booster Version",
        BOOSTER_CATEGORY_COLUMN,
    ])?;

    for i in 0..FLIGHTS {
        // Later flights use later booster generations.
        let generation = (i * BOOSTERS.len() / FLIGHTS).min(BOOSTERS.len() - 1);
        let (category, max_payload, success_rate) = BOOSTERS[generation];

        let site = if i < 5 { SITES[0] } else { *rng.pick(&SITES) };
        let payload = (rng.next_f64() * max_payload / 10.0).round() * 10.0;
        let class = u8::from(rng.next_f64() < success_rate);
        let version = format!("F9 {category} B{:04}", 1000 + i);

        writer.write_record([
            i.to_string(),
            (i + 1).to_string(),
            site.to_string(),
            class.to_string(),
            format!("{payload:.1}"),
            version,
            category.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {FLIGHTS} launches to {output_path}");
    Ok(())
}
