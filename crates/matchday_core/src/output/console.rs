//! End-of-match summary for the terminal

use std::fmt::Write;

use crate::engine::possession_pct;
use crate::models::{Team, Teams};

/// Match events, team stats and player ratings as printed after the final whistle.
pub fn console_summary(teams: &Teams) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = render(&mut out, teams);
    out
}

fn render(out: &mut String, teams: &Teams) -> std::fmt::Result {
    let sides = [&teams.home, &teams.away];

    writeln!(out, "Match events")?;
    writeln!(out, "-------------")?;
    writeln!(out)?;
    for team in sides {
        writeln!(out, "{}", team.name)?;
        for goal in &team.events.goals {
            writeln!(out, "{}", goal)?;
        }
        for missed in &team.events.missed_penalties {
            writeln!(out, "{}", missed)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Stats")?;
    writeln!(out, "------")?;
    let total = teams.home.stats.possession + teams.away.stats.possession;
    for team in sides {
        let s = &team.stats;
        writeln!(out, "{}", team.name)?;
        writeln!(out, "Ball possession: {}%", possession_pct(s.possession, total))?;
        writeln!(out, "Shots on target: {}", s.shots_on_target)?;
        writeln!(out, "Shots off target: {}", s.shots_off_target)?;
        writeln!(out, "Corner kicks: {}", s.corner_kicks)?;
        writeln!(out, "Offsides: {}", s.offsides)?;
        writeln!(out, "Free kicks: {}", s.free_kicks)?;
        writeln!(out)?;
    }

    writeln!(out, "Player ratings")?;
    for team in sides {
        writeln!(out, "{}", team.name)?;
        render_ratings(out, team)?;
        writeln!(out)?;
    }
    Ok(())
}

fn render_ratings(out: &mut String, team: &Team) -> std::fmt::Result {
    for slot in team.lineup() {
        let player = team.player(slot.player);
        match player.stats.rating(Some(slot.line), Some(slot.position)) {
            Some(rating) => writeln!(out, "{} : {:.2}", player.family_name, rating)?,
            None => writeln!(out, "{} : -", player.family_name)?,
        }
    }
    Ok(())
}
