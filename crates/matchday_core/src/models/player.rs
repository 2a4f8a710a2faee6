//! Player model
//!
//! Skills are read-only to the engine; only [`PlayerStats`] is mutated during a match.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::stats::PlayerStats;

/// Named skills a player can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    Passing,
    Teamwork,
    BallControl,
    ThrowIn,
    Dribbling,
    Crossing,
    ZonalMarking,
    ManMarking,
    RushingOut,
    Handling,
    Shooting,
    Pace,
    Heading,
    RightFoot,
    LeftFoot,
}

impl Skill {
    pub const ALL: [Skill; 15] = [
        Skill::Passing,
        Skill::Teamwork,
        Skill::BallControl,
        Skill::ThrowIn,
        Skill::Dribbling,
        Skill::Crossing,
        Skill::ZonalMarking,
        Skill::ManMarking,
        Skill::RushingOut,
        Skill::Handling,
        Skill::Shooting,
        Skill::Pace,
        Skill::Heading,
        Skill::RightFoot,
        Skill::LeftFoot,
    ];
}

/// Position bitmask flags. A player may carry several.
pub mod position {
    pub const GK: u8 = 1;
    pub const DEFENDER: u8 = 2;
    pub const MIDFIELDER: u8 = 4;
    pub const FORWARD: u8 = 8;
    pub const RIGHT: u8 = 16;
    pub const LEFT: u8 = 32;
    pub const CENTRAL: u8 = 64;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub shirt: u8,
    pub first_name: String,
    pub family_name: String,
    /// Bitmask of [`position`] flags.
    pub position: u8,
    #[serde(default)]
    skills: HashMap<Skill, f64>,
    #[serde(skip)]
    pub stats: PlayerStats,
    #[serde(skip)]
    time_in: Vec<u32>,
    #[serde(skip)]
    time_out: Vec<u32>,
}

impl Player {
    pub fn new(shirt: u8, first_name: &str, family_name: &str, position: u8) -> Self {
        Self {
            shirt,
            first_name: first_name.to_string(),
            family_name: family_name.to_string(),
            position,
            skills: HashMap::new(),
            stats: PlayerStats::default(),
            time_in: Vec::new(),
            time_out: Vec::new(),
        }
    }

    /// Builder helper: every listed skill set to `value`.
    pub fn with_uniform_skills(mut self, value: f64) -> Self {
        for skill in Skill::ALL {
            self.skills.insert(skill, value);
        }
        self
    }

    pub fn set_skill(&mut self, skill: Skill, value: f64) {
        self.skills.insert(skill, value);
    }

    /// Missing skills read as 0.
    pub fn skill(&self, skill: Skill) -> f64 {
        self.skills.get(&skill).copied().unwrap_or(0.0)
    }

    pub fn has_position(&self, flag: u8) -> bool {
        self.position & flag != 0
    }

    pub fn is_goalkeeper(&self) -> bool {
        self.has_position(position::GK)
    }

    pub fn enter_field(&mut self, tick: u32) {
        self.time_in.push(tick);
    }

    pub fn leave_field(&mut self, tick: u32) {
        self.time_out.push(tick);
    }

    /// Real minutes spent on the pitch, counting a player still on at full time.
    pub fn minutes_played(&self, half_duration: u32) -> u32 {
        let Some(&last_in) = self.time_in.last() else {
            return 0;
        };
        let full_time = 2 * half_duration;
        let last_step = if self.time_out.len() < self.time_in.len() {
            full_time
        } else {
            self.time_out.last().copied().unwrap_or(full_time)
        };

        let mut ticks: u32 = self
            .time_in
            .iter()
            .zip(&self.time_out)
            .take(self.time_in.len() - 1)
            .map(|(t_in, t_out)| t_out.saturating_sub(*t_in))
            .sum();
        ticks += last_step.saturating_sub(last_in);

        if full_time == 0 {
            return 0;
        }
        (ticks as f64 / full_time as f64 * 90.0) as u32
    }

    pub fn clear_stats(&mut self) {
        self.stats = PlayerStats::default();
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family_name, self.first_name)
    }
}
