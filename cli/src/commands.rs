//! Command implementations for the REPL.
//!
//! Commands print their own output; errors bubble up as strings for the
//! REPL loop to display.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use tactic_core::battle_log::tokenize;
use tactic_core::events::{ItemRef, build_items};
use tactic_core::roster::{SkillResolver, load_roster, used_roster_names};
use tactic_core::timeline::{CoordinateMapper, Timeline};
use tactic_types::formatting::format_timecode;

use crate::app_state::AppState;

/// Load the character and enemy tables.
pub async fn load_data(dir: Option<String>, state: Arc<RwLock<AppState>>) -> Result<(), String> {
    let mut s = state.write().await;
    if let Some(dir) = dir {
        s.config.data_directory = Some(PathBuf::from(dir));
        confy::store("tactic", None, &s.config).map_err(|e| e.to_string())?;
    }
    let dir = s.data_dir().ok_or("error: no data directory configured")?;

    let roster = load_roster(&dir).await.map_err(|e| e.to_string())?;
    info!(
        characters = roster.characters.len(),
        enemies = roster.enemies.len(),
        "roster loaded"
    );
    println!(
        "loaded {} characters and {} enemies from {}",
        roster.characters.len(),
        roster.enemies.len(),
        dir.display()
    );
    s.roster = Some(roster);
    Ok(())
}

/// Tokenize a log file and build a fresh timeline from it.
pub async fn parse_file(path: &str, state: Arc<RwLock<AppState>>) -> Result<(), String> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("error: cannot read {path}: {e}"))?;
    parse_text(&text, state).await
}

/// Tokenize pasted log text and build a fresh timeline from it.
pub async fn parse_text(text: &str, state: Arc<RwLock<AppState>>) -> Result<(), String> {
    let mut guard = state.write().await;
    let s = &mut *guard;
    let roster = s.roster.as_ref().ok_or("error: run load-data first")?;

    let entries = tokenize(text);
    let items = {
        let resolver = SkillResolver::new(roster);
        build_items(&entries, &resolver)
    };
    let used = used_roster_names(roster, &entries);

    println!(
        "{} entries -> {} attack items, {} buff items",
        entries.len(),
        items.attack.len(),
        items.buff.len()
    );
    if !used.is_empty() {
        println!("characters: {}", used.join(", "));
    }

    s.entries = entries;
    s.timeline = Some(Timeline::new(items, s.config.timeline.clone()));
    Ok(())
}

fn timeline_of(s: &AppState) -> Result<&Timeline, String> {
    s.timeline
        .as_ref()
        .ok_or_else(|| "error: no timeline, parse a log first".to_string())
}

/// List both item lists with their current start times.
pub async fn show_items(state: Arc<RwLock<AppState>>) -> Result<(), String> {
    let s = state.read().await;
    let timeline = timeline_of(&s)?;
    let items = timeline.items();

    println!("attack items:");
    for (i, item) in items.attack.iter().enumerate() {
        println!(
            "  [{i}] {} {} at {} ({} hits over {:.3}s)",
            item.character,
            item.detail,
            format_timecode(item.start_time),
            item.all_delays.len(),
            CoordinateMapper::attack_extent(item),
        );
    }
    println!("buff items:");
    for (i, item) in items.buff.iter().enumerate() {
        println!(
            "  [{i}] {} {} at {} (delay {:.3}s, duration {:.3}s)",
            item.character,
            item.detail,
            format_timecode(item.start_time),
            item.delay,
            item.duration,
        );
    }
    Ok(())
}

/// List display lanes in order.
pub async fn show_lanes(state: Arc<RwLock<AppState>>) -> Result<(), String> {
    let s = state.read().await;
    let timeline = timeline_of(&s)?;
    for (i, lane) in timeline.lanes().iter().enumerate() {
        println!("  [{i}] {}>{}", lane.character, lane.detail);
    }
    Ok(())
}

/// Show the visible time window.
pub async fn show_bounds(state: Arc<RwLock<AppState>>) -> Result<(), String> {
    let s = state.read().await;
    let timeline = timeline_of(&s)?;
    let window = timeline.bounds();
    println!(
        "window {} .. {} ({}s)",
        format_timecode(window.min_time),
        format_timecode(window.max_time),
        window.span()
    );
    Ok(())
}

/// Commit a typed start time for one item, moving its simultaneity group.
pub async fn move_item(
    kind: &str,
    index: usize,
    time: &str,
    state: Arc<RwLock<AppState>>,
) -> Result<(), String> {
    let item = match kind {
        "attack" => ItemRef::Attack(index),
        "buff" => ItemRef::Buff(index),
        other => return Err(format!("error: unknown item kind {other:?}")),
    };

    let mut s = state.write().await;
    let timeline = s
        .timeline
        .as_mut()
        .ok_or("error: no timeline, parse a log first")?;
    match timeline.commit_typed_time(item, time) {
        Some(parsed) => {
            let landed = timeline
                .start_time_of(item)
                .map(format_timecode)
                .unwrap_or_default();
            println!("committed {} -> item now at {landed}", parsed.normalized);
            Ok(())
        }
        None => Err(format!("error: cannot parse time {time:?}")),
    }
}

/// Toggle the two-star gear duration multiplier for a character.
pub async fn set_ue2(name: &str, off: bool, state: Arc<RwLock<AppState>>) -> Result<(), String> {
    let mut s = state.write().await;
    let timeline = s
        .timeline
        .as_mut()
        .ok_or("error: no timeline, parse a log first")?;
    timeline.set_ue2_checked(name, !off);
    println!("{} gear multiplier for {name}", if off { "cleared" } else { "set" });
    Ok(())
}

/// Discard all edits.
pub async fn reset(state: Arc<RwLock<AppState>>) -> Result<(), String> {
    let mut s = state.write().await;
    let timeline = s
        .timeline
        .as_mut()
        .ok_or("error: no timeline, parse a log first")?;
    timeline.reset();
    println!("timeline reset");
    Ok(())
}

/// Print the active configuration.
pub async fn show_config(state: Arc<RwLock<AppState>>) -> Result<(), String> {
    let s = state.read().await;
    match s.data_dir() {
        Some(dir) => println!("data directory: {}", dir.display()),
        None => println!("data directory: (unset)"),
    }
    let t = &s.config.timeline;
    println!(
        "fps: {}, ue2 multiplier: {}, clamp min at zero: {}, zoom: {}, axis ticks: {}",
        t.fps, t.ue2_duration_multiplier, t.clamp_min_time_at_zero, t.width_mult, t.time_zone_num
    );
    Ok(())
}
