//! Hit detection and combat resolution.
//!
//! Runs once per attacker direction per tick against externally sampled,
//! grid-quantized bone geometry. Every precondition failure is a silent
//! no-op; only a geometric intersection inside the active window enters the
//! resolution ladder (parry, block scaling, headshot, commit, clamp, emit).

use glam::DVec2;

use melee_core::attacks::{AttackConfig, AttackLibrary, HitboxShape};
use melee_core::bones::{point_segment_distance, BoneSamples, ChestBox};
use melee_core::constants::{
    BLOCK_CORRECT_DAMAGE_FACTOR, BLOCK_KNOCKBACK_MULT, BLOCK_WRONG_DAMAGE_FACTOR,
    HEADSHOT_MULTIPLIER, HIT_KNOCKBACK_MULT, METER_MAX, PARRY_KNOCKBACK_MULT,
    PARRY_SPECIAL_REWARD, PRESSURE_STUN_TICKS,
};
use melee_core::enums::{FighterState, HitZone, StunCause};
use melee_core::events::GameEvent;
use melee_core::state::Fighter;

use crate::machine;

/// Where and what a connecting hit touched, for presentation effects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitDiagnostics {
    pub zone: HitZone,
    pub contact: DVec2,
}

/// Test one attacker against one defender and resolve any contact.
/// Mutates only the two fighters; all observable outcomes are events.
pub fn resolve(
    attacker: &mut Fighter,
    defender: &mut Fighter,
    attacker_bones: &BoneSamples,
    defender_bones: &BoneSamples,
    library: &AttackLibrary,
    tick: u64,
    events: &mut Vec<GameEvent>,
) -> Option<HitDiagnostics> {
    if attacker.state != FighterState::Attack || defender.is_dead() {
        return None;
    }
    let attack = attacker.active_attack?;
    let config = library.get(attacker.character, attack);

    // One landed hit per instance, unless the attack is multi-hit and the
    // re-hit interval has elapsed.
    if defender.last_hit_by_instance == attacker.attack_instance_id {
        if !config.multi_hit {
            return None;
        }
        if tick.saturating_sub(defender.last_hit_tick) < config.hit_interval as u64 {
            return None;
        }
    }

    // The defender must be in front of the attacker.
    if (defender.x - attacker.x) * attacker.facing.sign() < 0.0 {
        return None;
    }

    // Active window: [from, to) as fractions of the attack duration,
    // measured against the attacker's state ticks.
    let t = attacker.state_ticks as f64;
    let duration = config.duration_ticks as f64;
    if t < config.hitbox.active_from * duration || t >= config.hitbox.active_to * duration {
        return None;
    }

    let diagnostics = intersect(config, attacker_bones, defender_bones)?;

    // Parry: a hit inside the defender's parry window reflects entirely.
    if defender.parry_window_active {
        defender.parry_window_active = false;
        if defender.id == 0 {
            defender.special_meter =
                (defender.special_meter + PARRY_SPECIAL_REWARD).min(METER_MAX);
        }
        // The instance resolved; it neither whiffs nor re-hits.
        attacker.attack_landed_hit = true;
        attacker.impulse_vx =
            -attacker.facing.sign() * config.knockback * PARRY_KNOCKBACK_MULT;
        interrupt_attack(attacker, config);
        machine::force_transition(attacker, FighterState::Hurt, events);
        events.push(GameEvent::Parry {
            attacker: attacker.id,
            defender: defender.id,
            attack,
        });
        return Some(diagnostics);
    }

    // Headshot scaling applies before block scaling.
    let mut damage = config.damage as f64;
    if diagnostics.zone == HitZone::Top {
        damage *= HEADSHOT_MULTIPLIER;
    }
    let guard = if defender.state == FighterState::Block {
        defender.block_zone
    } else {
        None
    };
    let mut knockback_mult = HIT_KNOCKBACK_MULT;
    let mut perfect = false;
    if let Some(zone) = guard {
        perfect = zone.covers(diagnostics.zone);
        damage *= if perfect {
            BLOCK_CORRECT_DAMAGE_FACTOR
        } else {
            BLOCK_WRONG_DAMAGE_FACTOR
        };
        knockback_mult = BLOCK_KNOCKBACK_MULT;
    }
    let damage = damage.floor() as i32;

    // Commit.
    defender.health -= damage;
    defender.last_hit_by_instance = attacker.attack_instance_id;
    defender.last_hit_tick = tick;
    attacker.attack_landed_hit = true;
    if attacker.id == 0 {
        attacker.special_meter =
            (attacker.special_meter + config.special_charge).min(METER_MAX);
    }

    // Pressure only accrues against the boss slot, and a capped meter
    // stuns through super armor.
    let mut pressure_stunned = false;
    if defender.id == 1 && defender.pressure_stun_ticks == 0 {
        defender.pressure_meter = (defender.pressure_meter + config.pressure_charge).min(METER_MAX);
        if defender.pressure_meter >= METER_MAX {
            pressure_stunned = true;
            defender.pressure_stun_ticks = PRESSURE_STUN_TICKS;
            if let Some(active) = defender.active_attack {
                let cancelled = library.get(defender.character, active).clone();
                interrupt_attack(defender, &cancelled);
            }
            machine::force_transition(defender, FighterState::Hurt, events);
            events.push(GameEvent::Stun {
                fighter: defender.id,
                cause: StunCause::Pressure,
            });
        }
    }

    // Clamp and death.
    if defender.health <= 0 {
        defender.health = 0;
        machine::force_transition(defender, FighterState::Dead, events);
        events.push(GameEvent::Death {
            fighter: defender.id,
        });
    }

    // Knockback pushes along the attacker's facing; super armor suppresses
    // the hitstun, not the shove.
    defender.impulse_vx = attacker.facing.sign() * config.knockback * knockback_mult;

    if !defender.is_dead() && !pressure_stunned {
        if guard.is_some() {
            // Guard held: no hitstun, and a correct-zone block punishes
            // the attacker instead.
            if perfect {
                if let Some(active) = attacker.active_attack {
                    let punished = library.get(attacker.character, active).clone();
                    interrupt_attack(attacker, &punished);
                }
                machine::force_transition(attacker, FighterState::Hurt, events);
            }
        } else if !has_super_armor(defender, library) {
            if let Some(active) = defender.active_attack {
                let cancelled = library.get(defender.character, active).clone();
                interrupt_attack(defender, &cancelled);
            }
            machine::force_transition(defender, FighterState::Hurt, events);
        }
    }

    events.push(if guard.is_some() {
        GameEvent::Block {
            attacker: attacker.id,
            defender: defender.id,
            attack,
            damage,
            zone: diagnostics.zone,
            perfect,
        }
    } else {
        GameEvent::Hit {
            attacker: attacker.id,
            defender: defender.id,
            attack,
            damage,
            zone: diagnostics.zone,
        }
    });

    Some(diagnostics)
}

/// Cancel an in-flight attack, arming its cooldown.
fn interrupt_attack(fighter: &mut Fighter, config: &AttackConfig) {
    fighter.active_attack = None;
    fighter.attack_zone = None;
    fighter.cooldown_ticks = fighter.cooldown_ticks.max(config.cooldown_ticks);
}

/// Whether the defender currently shrugs off hitstun.
fn has_super_armor(defender: &Fighter, library: &AttackLibrary) -> bool {
    if defender.super_armor_active
        && matches!(
            defender.state,
            FighterState::Attack | FighterState::Telegraph
        )
    {
        return true;
    }
    defender
        .active_attack
        .map(|id| library.get(defender.character, id).super_armor)
        .unwrap_or(false)
        && matches!(
            defender.state,
            FighterState::Attack | FighterState::Telegraph
        )
}

/// Geometric intersection test: head circle first, then chest box, per
/// shape. Point bones are tested in declared anchor order; first contact
/// wins.
fn intersect(
    config: &AttackConfig,
    attacker_bones: &BoneSamples,
    defender_bones: &BoneSamples,
) -> Option<HitDiagnostics> {
    match &config.hitbox.shape {
        HitboxShape::WeaponLine { thickness } => {
            let (a, b) = attacker_bones.weapon_line?;
            if defender_bones.head_radius > 0.0
                && point_segment_distance(defender_bones.head_center, a, b)
                    <= defender_bones.head_radius + thickness
            {
                return Some(HitDiagnostics {
                    zone: HitZone::Top,
                    contact: defender_bones.head_center,
                });
            }
            if defender_bones.chest.intersects_segment(a, b, *thickness) {
                return Some(HitDiagnostics {
                    zone: HitZone::Center,
                    contact: (a + b) / 2.0,
                });
            }
            None
        }
        HitboxShape::Bones { anchors, radius } => anchors.iter().find_map(|&anchor| {
            let p = attacker_bones.anchor(anchor)?;
            if defender_bones.head_radius > 0.0
                && p.distance(defender_bones.head_center) <= radius + defender_bones.head_radius
            {
                return Some(HitDiagnostics {
                    zone: HitZone::Top,
                    contact: p,
                });
            }
            let grown = ChestBox {
                min: defender_bones.chest.min - DVec2::splat(*radius),
                max: defender_bones.chest.max + DVec2::splat(*radius),
            };
            if grown.contains(p) {
                return Some(HitDiagnostics {
                    zone: HitZone::Center,
                    contact: p,
                });
            }
            None
        }),
    }
}
