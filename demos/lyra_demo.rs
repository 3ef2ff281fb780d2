//! # Lyra - peaks and dance streams
//!
//! Drives a waveform-peaks stream and a dance-bitmap stream from one tick
//! source, the way a display refresh loop would.
//!
//! **Concepts:** `stream()`, `AssetDir`, `RenderStage`, `TickDriver`
//!
//! ```bash
//! cargo run --example lyra_demo -- /path/to/card
//! ```
//!
//! The card directory should contain `LYRA2/peaks.bin` and `LYRA2/dance.bin`.
//! Missing assets are reported and their streams stay dark.

use std::time::Duration;
use tickstream::prelude::*;

/// Display refresh period.
const TICK: Duration = Duration::from_millis(5);

/// Ticks to run (about ten seconds at the refresh period).
const TICKS: u64 = 2000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .init();

    let root = std::env::args().nth(1).unwrap_or_else(|| ".".to_string());
    let mut card = AssetDir::new(&root);
    println!("Card: {}", card.root().display());

    let peaks = tickstream::stream(card.resolve("LYRA2/peaks.bin")?)
        .chunks(2, 512)
        .threshold(128)
        .name("peaks")
        .build()?;
    let dance = StreamingPrefetcher::open_with(&mut card, "LYRA2/dance.bin", StreamConfig::dance())?;

    let mut column = 0usize;
    let mut peaks_stage = RenderStage::new(peaks, |sample: Option<&[u8]>| {
        if let Some(&[level]) = sample {
            if column % 64 == 0 {
                println!("peak {:>5} {}", column, "#".repeat(usize::from(level) / 8));
            }
            column += 1;
        }
    });

    let mut frames = 0u64;
    let mut dance_stage = RenderStage::new(dance, |frame: Option<&[u8]>| {
        if let Some(frame) = frame {
            frames += 1;
            if frames % 30 == 1 {
                let lit: u32 = frame.iter().map(|byte| byte.count_ones()).sum();
                println!("dance frame {frames}: {lit} pixels lit");
            }
        }
    });

    let mut driver = TickDriver::new();
    driver.attach(&mut peaks_stage).attach(&mut dance_stage);
    for _ in 0..TICKS {
        driver.fire();
        std::thread::sleep(TICK);
    }
    println!("Fired {} ticks", driver.ticks());
    drop(driver);

    report(peaks_stage.prefetcher());
    report(dance_stage.prefetcher());
    Ok(())
}

fn report(stream: &FileStream) {
    let stats = stream.stats();
    println!(
        "{}: {:?}, {} reads, {} bytes, {} refills, {} underruns",
        stream.name(),
        stream.state(),
        stats.reads,
        stats.bytes_read,
        stats.refills,
        stats.underruns
    );
}
