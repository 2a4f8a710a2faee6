//! Report and statistics files
//!
//! Each writer has a `render_*` twin taking any [`Write`] so the layout can be checked
//! without touching the filesystem.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::engine::report::{MatchReport, ReportEntry};
use crate::error::Result;
use crate::models::{FieldState, Team, Teams};
use crate::stats::PercStats;

fn create(path: &Path) -> Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path)?))
}

// ============================================================================
// Match report
// ============================================================================

pub fn write_match_report(path: &Path, report: &MatchReport, teams: &Teams) -> Result<()> {
    let mut w = create(path)?;
    render_match_report(&mut w, report, teams)?;
    w.flush()?;
    log::info!("Match report written to {} ({} entries)", path.display(), report.entries().len());
    Ok(())
}

/// One block per simulated step: the acting player, then the state the action was
/// played from, what was played and any special outcome.
pub fn render_match_report(w: &mut impl Write, report: &MatchReport, teams: &Teams) -> Result<()> {
    for entry in report.entries() {
        writeln!(w, "{}", entry.player_name)?;
        writeln!(w, "{}", describe_entry(entry, teams))?;
    }
    Ok(())
}

fn describe_entry(entry: &ReportEntry, teams: &Teams) -> String {
    let state = entry
        .action_state
        .as_ref()
        .map(|state| describe_state(state, teams))
        .unwrap_or_default();
    let action = entry.action.map(|a| a.description()).unwrap_or("");
    let mut line = format!("{},{}", state, action);
    if let Some(special) = entry.special {
        line.push_str("-> ");
        line.push_str(special.description());
    }
    line
}

fn describe_state(state: &FieldState, teams: &Teams) -> String {
    format!(
        "({},{},{},{})",
        teams.name(state.team),
        state.y.label(),
        state.x.label(),
        state.pressure.label()
    )
}

// ============================================================================
// Raw player stats
// ============================================================================

pub fn write_raw_stats(path: &Path, teams: &Teams) -> Result<()> {
    let mut w = create(path)?;
    render_raw_stats(&mut w, teams)?;
    w.flush()?;
    log::info!("Player stats written to {}", path.display());
    Ok(())
}

/// Every counter of every player, home squad first.
pub fn render_raw_stats(w: &mut impl Write, teams: &Teams) -> Result<()> {
    for team in [&teams.home, &teams.away] {
        for player in team.players() {
            let s = &player.stats;
            writeln!(w, "{}", player.family_name)?;
            let perc: [(&str, &PercStats); 14] = [
                ("Gk Long Pass", &s.gk_long_pass),
                ("Long Pass", &s.long_pass),
                ("Forward Pass", &s.forward_pass),
                ("Flank Pass", &s.flank_pass),
                ("Ball Control", &s.ball_control),
                ("Dribbling", &s.dribbling),
                ("Long Flank Pass", &s.long_flank_pass),
                ("Pass", &s.pass),
                ("Area Pass", &s.area_pass),
                ("Run Ball", &s.run_ball),
                ("Low Cross", &s.low_cross),
                ("Cross", &s.cross),
                ("Shots", &s.shots),
                ("Headings", &s.headings_on_target),
            ];
            for (label, stat) in perc {
                writeln!(w, "{}: {}/{}", label, stat.successes(), stat.total())?;
            }
            writeln!(w, "Individual challenges: {}", s.personal_challenges.occurrences())?;
            writeln!(w, "Interceptions: {}", s.interceptions.occurrences())?;
            writeln!(w, "Saves: {}", s.saves.occurrences())?;
            writeln!(w, "Concedings: {}", s.concedings.occurrences())?;
            writeln!(w)?;
        }
    }
    Ok(())
}

// ============================================================================
// Stats summary
// ============================================================================

pub fn write_stats_summary(path: &Path, teams: &Teams) -> Result<()> {
    let mut w = create(path)?;
    render_stats_summary(&mut w, teams)?;
    w.flush()?;
    log::info!("Stats summary written to {}", path.display());
    Ok(())
}

/// Aggregated per-player figures, home squad first.
pub fn render_stats_summary(w: &mut impl Write, teams: &Teams) -> Result<()> {
    for team in [&teams.home, &teams.away] {
        render_team_summary(w, team)?;
    }
    Ok(())
}

fn render_team_summary(w: &mut impl Write, team: &Team) -> Result<()> {
    for player in team.players() {
        let s = &player.stats;
        writeln!(w, "{}", player.family_name)?;
        writeln!(w, "Passes: {}/{}", s.all_passes_succ(), s.all_passes_total())?;
        writeln!(
            w,
            "Personal challenges (attacking): {}/{}",
            s.att_challenges_succ(),
            s.att_challenges_total()
        )?;
        writeln!(w, "Crosses: {}/{}", s.crosses_succ(), s.crosses_total())?;
        writeln!(w, "Player runs: {}/{}", s.runs_succ(), s.runs_total())?;
        writeln!(w, "Personal challenges won (defending): {}", s.def_challenges_won())?;
        writeln!(w, "Interceptions: {}", s.interceptions_made())?;
        writeln!(w, "Saves: {}", s.saves_made())?;
        writeln!(w, "Attempts at goal: {}/{}", s.all_shots_succ(), s.all_shots_total())?;
        writeln!(w, "Goals scored: {}", s.goals())?;
        writeln!(w, "Penalties missed: {}", s.penalties_missed())?;
        writeln!(w, "Penalties saved: {}", s.penalties_saved())?;
        writeln!(w)?;
    }
    Ok(())
}

// ========== Tests ==========
