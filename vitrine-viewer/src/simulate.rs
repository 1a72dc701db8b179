//! Headless render loop.
//!
//! Ticks a [`Gallery`] at a fixed frame rate using measured wall-clock
//! deltas, replays the scripted inputs and prints the state it ends in.

use std::time::{Duration, Instant};

use anyhow::{Context, ensure};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};
use vitrine_config::Config;
use vitrine_core::{Gallery, UserInput};
use vitrine_model::{Item, ItemId, ItemList, Photo};

use crate::{
    cli::SimulateArgs,
    fetch::{build_provider, load_items},
    sink::LoggingSink,
};

/// Upper bound on frames spent letting animations come to rest.
const MAX_SETTLE_FRAMES: u32 = 10_000;

/// Longest session `--seconds` accepts (one day).
const MAX_SECONDS: f64 = 86_400.0;

pub async fn run(config: &Config, args: SimulateArgs) -> anyhow::Result<()> {
    ensure!(
        args.seconds.is_finite() && args.seconds > 0.0,
        "--seconds must be a positive number"
    );
    ensure!(
        args.seconds <= MAX_SECONDS,
        "--seconds must be at most {MAX_SECONDS}"
    );

    let items = if args.offline {
        demo_items(args.items)?
    } else {
        let provider = build_provider(config)?;
        load_items(&provider, true).await?.items
    };
    info!(count = items.len(), "starting simulation");

    let mut gallery = Gallery::new(
        items,
        config.carousel,
        config.board,
        LoggingSink::default(),
    );

    let frame = Duration::from_secs_f64(1.0 / f64::from(args.fps));
    let total_frames =
        ((args.seconds * f64::from(args.fps)).round() as u64).max(1);
    let mut schedule = schedule(&args, total_frames).into_iter().peekable();

    let mut ticker = interval(frame);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last = Instant::now();

    for n in 0..total_frames {
        ticker.tick().await;
        let now = Instant::now();
        let delta = now - last;
        last = now;

        while let Some((_, input)) = schedule.next_if(|(at, _)| *at <= n) {
            let accepted = gallery.handle(input);
            info!(frame = n, ?input, accepted, "input");
        }
        gallery.tick(delta);

        if n % u64::from(args.fps) == 0 {
            debug!(
                frame = n,
                phase = ?gallery.carousel().phase(),
                offset = gallery.carousel().current_offset(),
                angle = gallery.board_angle(),
                "frame"
            );
        }
    }

    let mut settle = 0;
    while !gallery.carousel().is_idle() || gallery.board().is_animating() {
        gallery.tick(frame);
        settle += 1;
        if settle >= MAX_SETTLE_FRAMES {
            break;
        }
    }

    println!("{}", summary(&gallery, total_frames));
    Ok(())
}

/// Frame index at which each scripted input fires, spread evenly.
fn schedule(args: &SimulateArgs, total_frames: u64) -> Vec<(u64, UserInput)> {
    let slots = args.script.len() as u64 + 1;
    args.script
        .iter()
        .enumerate()
        .map(|(k, action)| {
            ((k as u64 + 1) * total_frames / slots, UserInput::from(*action))
        })
        .collect()
}

fn summary(gallery: &Gallery<LoggingSink>, frames: u64) -> String {
    let labels: Vec<String> = gallery
        .placements()
        .iter()
        .map(|placement| placement.display_label())
        .collect();
    let window = if labels.is_empty() {
        "-".to_string()
    } else {
        labels.join(" ")
    };
    format!(
        "frames={frames} start_index={} window={window} board={} audio={}",
        gallery.carousel().start_index(),
        if gallery.board().is_flipped() { "back" } else { "front" },
        if gallery.audio_enabled() { "on" } else { "off" },
    )
}

fn demo_items(count: usize) -> anyhow::Result<ItemList> {
    (0..count)
        .map(|i| -> anyhow::Result<Item> {
            let id = ItemId::new(format!("demo-{i}"))
                .context("invalid demo item id")?;
            let photo = Photo::new(format!(
                "https://picsum.photos/seed/vitrine-{i}/1200/800"
            ))
            .with_dimensions(1200, 800);
            Ok(Item::new(id, format!("Demo {}", i + 1))
                .with_photo(photo)
                .with_body("<p>Generated for offline runs</p>")
                .with_shooting_date("2024-01-15"))
        })
        .collect::<anyhow::Result<Vec<Item>>>()
        .map(ItemList::from)
}
