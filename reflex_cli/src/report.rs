use std::fmt::Write;

use reflex_core::stats::{display_ms, StatsEngine};
use reflex_core::{Difficulty, GameRecord};

pub fn stats(record: &GameRecord, recent_window: usize) -> String {
    let engine = StatsEngine::new(record);
    let s = engine.summary(recent_window);
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "games:        {}", s.total_games);
    let _ = writeln!(out, "best:         {} ms", display_ms(s.best));
    let _ = writeln!(out, "worst:        {} ms", display_ms(s.worst));
    let _ = writeln!(out, "average:      {} ms", display_ms(s.average));
    let _ = writeln!(
        out,
        "last {:<2}      {} ms",
        s.recent_window,
        display_ms(s.recent_average)
    );
    let _ = writeln!(out, "streak:       {} (best {})", s.current_streak, s.best_streak);
    let _ = writeln!(out, "too early:    {}", s.early_taps);
    let _ = writeln!(
        out,
        "success:      {}",
        s.success_rate_percent
            .map(|p| format!("{p}%"))
            .unwrap_or_else(|| "--".to_string())
    );
    for difficulty in Difficulty::ALL {
        let _ = writeln!(
            out,
            "best {:<7} {} ms",
            difficulty.as_str().to_ascii_lowercase(),
            display_ms(engine.best_for(difficulty))
        );
    }
    out
}

pub fn history(record: &GameRecord, limit: Option<usize>) -> String {
    let engine = StatsEngine::new(record);
    let mut out = String::new();
    if record.history.is_empty() {
        out.push_str("No results yet.\n");
        return out;
    }

    let limit = limit.unwrap_or(usize::MAX);
    for entry in engine.formatted_history().take(limit) {
        let _ = writeln!(
            out,
            "#{:<4} {:>5} ms  {:<14} {:<6} {}",
            entry.number,
            entry.reaction_time_ms(),
            entry.rank().as_str(),
            entry.difficulty().as_str(),
            entry.date()
        );
    }
    out
}
