//! Skill generation from team reputation
//!
//! For squads without hand-entered skills: every skill starts at the club's
//! reputation plus Gaussian noise, is promoted for players whose position favours
//! it and halved when it belongs to the other kind of player (keeper vs outfield).

use rand_distr::{Distribution, StandardNormal};

use super::player::{position, Player, Skill};
use crate::rng::RandomSource;

/// Which players a skill favours.
#[derive(Debug, Clone, Copy)]
struct SkillProfile {
    skill: Skill,
    /// Position flags that earn a promotion.
    optimal: u8,
    outfield: bool,
    side_affected: bool,
    right_foot: bool,
    left_foot: bool,
}

impl SkillProfile {
    const fn new(skill: Skill, optimal: u8, outfield: bool) -> Self {
        Self { skill, optimal, outfield, side_affected: false, right_foot: false, left_foot: false }
    }

    const fn sided(mut self) -> Self {
        self.side_affected = true;
        self
    }

    const fn right(mut self) -> Self {
        self.right_foot = true;
        self
    }

    const fn left(mut self) -> Self {
        self.left_foot = true;
        self
    }

    fn is_privileged(&self, player: &Player) -> bool {
        if player.position & self.optimal != 0 {
            return true;
        }
        if self.side_affected {
            player.has_position(position::RIGHT) || player.has_position(position::LEFT)
        } else if self.right_foot {
            player.has_position(position::RIGHT)
        } else if self.left_foot {
            player.has_position(position::LEFT)
        } else {
            false
        }
    }
}

const PROFILES: [SkillProfile; 15] = {
    use position::{DEFENDER as D, FORWARD as F, GK as G, MIDFIELDER as M};
    [
        SkillProfile::new(Skill::Passing, M, true),
        SkillProfile::new(Skill::Teamwork, 0, true),
        SkillProfile::new(Skill::BallControl, M, true),
        SkillProfile::new(Skill::ThrowIn, 0, true),
        SkillProfile::new(Skill::Dribbling, M, true),
        SkillProfile::new(Skill::Crossing, M, true).sided(),
        SkillProfile::new(Skill::ZonalMarking, M, true),
        SkillProfile::new(Skill::ManMarking, D | M, true),
        SkillProfile::new(Skill::RushingOut, G, false),
        SkillProfile::new(Skill::Handling, G, false),
        SkillProfile::new(Skill::Shooting, F, true),
        SkillProfile::new(Skill::Pace, M | F, true).sided(),
        SkillProfile::new(Skill::Heading, F, true),
        SkillProfile::new(Skill::RightFoot, 0, true).right(),
        SkillProfile::new(Skill::LeftFoot, 0, true).left(),
    ]
};

/// Geometric bonus: +1 with probability 1/2, +2 with 1/4, and so on.
fn promotion(u: f64) -> f64 {
    let mut count = 0.0;
    let mut covered = 0.0;
    let mut divisor = 2.0;
    while u > covered + 1.0 / divisor && divisor < 1e12 {
        covered += 1.0 / divisor;
        divisor *= 2.0;
        count += 1.0;
    }
    count
}

/// Adapter so `rand_distr` can draw from the match's random source.
struct SourceRng<'a>(&'a mut dyn RandomSource);

impl rand::RngCore for SourceRng<'_> {
    fn next_u32(&mut self) -> u32 {
        (self.0.next_f64() * u32::MAX as f64) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.next_u32() as u64;
        let lo = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Draws one skill value for `player`.
fn rate_skill(profile: &SkillProfile, player: &Player, reputation: f64, rng: &mut dyn RandomSource) -> f64 {
    let deviation: f64 = StandardNormal.sample(&mut SourceRng(&mut *rng));
    let mut rate = reputation + deviation;
    if profile.is_privileged(player) {
        rate += promotion(rng.next_f64());
    }
    let is_keeper = player.position == position::GK;
    if is_keeper == profile.outfield {
        rate /= 2.0;
    }
    rate.max(0.0)
}

/// Fills in every skill of every player in `squad`.
pub fn assign_skills(squad: &mut [Player], reputation: f64, rng: &mut dyn RandomSource) {
    for player in squad.iter_mut() {
        for profile in PROFILES.iter() {
            let value = rate_skill(profile, player, reputation, rng);
            player.set_skill(profile.skill, value);
        }
    }
    log::debug!("assigned skills to {} players at reputation {}", squad.len(), reputation);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRandom;

    #[test]
    fn test_promotion_is_geometric() {
        assert_eq!(promotion(0.3), 0.0);
        assert_eq!(promotion(0.6), 1.0);
        assert_eq!(promotion(0.8), 2.0);
        assert_eq!(promotion(0.9), 3.0);
    }

    #[test]
    fn test_privilege_by_position_and_side() {
        let winger = Player::new(7, "W", "Winger", position::FORWARD | position::RIGHT);
        let crossing = PROFILES[5];
        assert!(crossing.is_privileged(&winger));
        let left_foot = PROFILES[14];
        assert!(!left_foot.is_privileged(&winger));
        assert!(PROFILES[13].is_privileged(&winger));
    }

    #[test]
    fn test_assigned_skills_non_negative_and_keeper_favours_handling() {
        let mut squad = vec![
            Player::new(1, "G", "Keeper", position::GK),
            Player::new(9, "F", "Striker", position::FORWARD | position::CENTRAL),
        ];
        let mut rng = SeededRandom::new(2024);
        let mut keeper_handling = 0.0;
        let mut striker_handling = 0.0;
        for _ in 0..200 {
            assign_skills(&mut squad, 5.0, &mut rng);
            for p in &squad {
                for skill in Skill::ALL {
                    assert!(p.skill(skill) >= 0.0);
                }
            }
            keeper_handling += squad[0].skill(Skill::Handling);
            striker_handling += squad[1].skill(Skill::Handling);
        }
        assert!(keeper_handling > striker_handling * 1.5);
    }
}
