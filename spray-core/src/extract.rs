//! Builds the tick log from a replay's event stream.
//!
//! For every rifle shot the player's view direction is sampled from the shot
//! tick through [`EXTRACT_PADDING_TICKS`] ticks after it, so recoil recovery
//! between shots shows up in the aim path.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::constants::{
    EXTRACT_PADDING_TICKS, RIFLE_WEAPON_ID_MAX_EXCLUSIVE, RIFLE_WEAPON_ID_MIN,
};
use crate::error::ExtractError;
use crate::sample::TickSample;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    #[serde(default)]
    pub weapon_fires: Vec<WeaponFire>,
    #[serde(default)]
    pub hurts: Vec<PlayerHurt>,
    #[serde(default)]
    pub kills: Vec<KillEvent>,
    #[serde(default)]
    pub views: Vec<ViewSample>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponFire {
    pub player: String,
    pub tick: i64,
    pub weapon_id: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerHurt {
    #[serde(default)]
    pub attacker: Option<String>,
    #[serde(default)]
    pub victim: Option<String>,
    pub tick: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillEvent {
    #[serde(default)]
    pub killer: Option<String>,
    pub tick: i64,
}

/// A player's view direction at the end of a tick, in raw replay encoding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewSample {
    pub player: String,
    pub tick: i64,
    pub yaw: f64,
    pub pitch: f64,
}

pub fn parse_event_log(json: &str) -> Result<EventLog, ExtractError> {
    serde_json::from_str(json).map_err(|err| ExtractError::InvalidEventLog {
        message: err.to_string(),
    })
}

#[inline]
pub fn is_rifle(weapon_id: i32) -> bool {
    (RIFLE_WEAPON_ID_MIN..RIFLE_WEAPON_ID_MAX_EXCLUSIVE).contains(&weapon_id)
}

#[derive(Clone, Copy)]
struct Row {
    shot: bool,
    hit: bool,
    kill: bool,
    yaw: f64,
    pitch: f64,
    weapon_id: i32,
}

/// Produces the tick log grouped by player (sorted by name), each player's
/// rows in tick order.
pub fn extract_samples(log: &EventLog) -> Vec<TickSample> {
    let mut fires: BTreeMap<&str, Vec<&WeaponFire>> = BTreeMap::new();
    for fire in log.weapon_fires.iter().filter(|fire| is_rifle(fire.weapon_id)) {
        fires.entry(fire.player.as_str()).or_default().push(fire);
    }

    // Later samples at the same tick replace earlier ones.
    let mut views: HashMap<&str, BTreeMap<i64, &ViewSample>> = HashMap::new();
    for view in &log.views {
        views
            .entry(view.player.as_str())
            .or_default()
            .insert(view.tick, view);
    }

    let mut hits: HashMap<&str, Vec<i64>> = HashMap::new();
    for hurt in &log.hurts {
        if let (Some(attacker), Some(_)) = (&hurt.attacker, &hurt.victim) {
            hits.entry(attacker.as_str()).or_default().push(hurt.tick);
        }
    }

    let mut kills: HashMap<&str, Vec<i64>> = HashMap::new();
    for kill in &log.kills {
        if let Some(killer) = &kill.killer {
            kills.entry(killer.as_str()).or_default().push(kill.tick);
        }
    }

    let mut out = Vec::new();
    for (player, player_fires) in fires {
        let Some(player_views) = views.get(player) else {
            continue;
        };

        let mut rows: BTreeMap<i64, Row> = BTreeMap::new();
        for fire in &player_fires {
            let window = fire.tick..=fire.tick.saturating_add(EXTRACT_PADDING_TICKS);
            for (tick, view) in player_views.range(window) {
                rows.insert(
                    *tick,
                    Row {
                        shot: false,
                        hit: false,
                        kill: false,
                        yaw: view.yaw,
                        pitch: view.pitch,
                        weapon_id: fire.weapon_id,
                    },
                );
            }
        }

        for fire in &player_fires {
            if let Some(row) = rows.get_mut(&fire.tick) {
                row.shot = true;
            }
        }
        for tick in hits.get(player).into_iter().flatten() {
            if let Some(row) = rows.get_mut(tick) {
                row.hit = true;
            }
        }
        for tick in kills.get(player).into_iter().flatten() {
            if let Some(row) = rows.get_mut(tick) {
                row.kill = true;
            }
        }

        for (tick, row) in rows {
            // A hit or kill off a shot tick belongs to some other weapon.
            if (row.hit || row.kill) && !row.shot {
                continue;
            }
            out.push(TickSample {
                player: player.to_string(),
                tick,
                is_shot: row.shot,
                is_hit: row.hit,
                is_kill: row.kill,
                yaw: row.yaw,
                pitch: row.pitch,
                weapon_id: row.weapon_id,
            });
        }
    }

    out
}

/// Encodes samples as newline-terminated tick-log rows.
pub fn write_tick_log(samples: &[TickSample]) -> String {
    let mut text = String::new();
    for sample in samples {
        text.push_str(&sample.to_row());
        text.push('\n');
    }
    text
}
