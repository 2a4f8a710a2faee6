//! Built-in squads for runs without team sheets

use matchday_core::models::player::position;
use matchday_core::models::squad::assign_skills;
use matchday_core::models::{Player, Team, TeamSheet};
use matchday_core::{RandomSource, Result};

type Roster = [(&'static str, &'static str, u8); 11];

const GREECE: Roster = [
    ("Antonios", "Nikopolidis", position::GK),
    ("Giourkas", "Seitaridis", position::DEFENDER | position::RIGHT),
    ("Traianos", "Dellas", position::DEFENDER | position::CENTRAL),
    ("Michalis", "Kapsis", position::DEFENDER | position::CENTRAL),
    ("Takis", "Fyssas", position::DEFENDER | position::LEFT),
    ("Angelos", "Basinas", position::MIDFIELDER | position::RIGHT),
    ("Theodoros", "Zagorakis", position::MIDFIELDER | position::CENTRAL),
    ("Kostas", "Katsouranis", position::MIDFIELDER | position::CENTRAL),
    ("Giorgos", "Karagounis", position::MIDFIELDER | position::LEFT),
    ("Angelos", "Charisteas", position::FORWARD),
    ("Zisis", "Vryzas", position::FORWARD),
];

const PORTUGAL: Roster = [
    ("Ricardo", "Pereira", position::GK),
    ("Paulo", "Ferreira", position::DEFENDER | position::RIGHT),
    ("Jorge", "Andrade", position::DEFENDER | position::CENTRAL),
    ("Ricardo", "Carvalho", position::DEFENDER | position::CENTRAL),
    ("Nuno", "Valente", position::DEFENDER | position::LEFT),
    ("Luis", "Figo", position::MIDFIELDER | position::RIGHT),
    ("Costinha", "Silva", position::MIDFIELDER | position::CENTRAL),
    ("Maniche", "Ribeiro", position::MIDFIELDER | position::CENTRAL),
    ("Cristiano", "Ronaldo", position::MIDFIELDER | position::LEFT),
    ("Pedro", "Pauleta", position::FORWARD),
    ("Rui", "Costa", position::FORWARD),
];

fn squad(name: &str, roster: &Roster, reputation: f64, rng: &mut dyn RandomSource) -> Result<Team> {
    let mut players: Vec<Player> = roster
        .iter()
        .enumerate()
        .map(|(i, (first, family, pos))| Player::new(i as u8 + 1, first, family, *pos))
        .collect();
    assign_skills(&mut players, reputation, rng);
    Team::from_sheet(TeamSheet { name: name.to_string(), tactics: "4-4-2".parse()?, players })
}

/// Home and away demo squads, skills drawn around `reputation`.
pub fn demo_teams(reputation: f64, rng: &mut dyn RandomSource) -> Result<(Team, Team)> {
    let home = squad("Greece", &GREECE, reputation, rng)?;
    let away = squad("Portugal", &PORTUGAL, reputation, rng)?;
    Ok((home, away))
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchday_core::SeededRandom;

    #[test]
    fn test_demo_squads_are_full_lineups() {
        let mut rng = SeededRandom::new(7);
        let (home, away) = demo_teams(6.0, &mut rng).unwrap();
        assert_eq!(home.lineup().len(), 11);
        assert_eq!(away.lineup().len(), 11);
        assert!(home.gk().is_ok());
        assert_eq!(away.name, "Portugal");
    }
}
