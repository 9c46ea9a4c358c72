//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (plus the current time and, where needed, an RNG handle) and
//! returns a brand-new `GameState`.  Side effects are limited to the
//! injected RNG and log output.

use rand::Rng;
use tracing::{debug, info};

use crate::entities::{
    Bullet, Enemy, GameState, GameStatus, Player, BULLET_SPEED, BULLET_WIDTH, ENEMY_HEALTH,
    ENEMY_HEIGHT, ENEMY_WIDTH, PLAYER_BOTTOM_OFFSET, PLAYER_WIDTH,
};

// ── Tuning ───────────────────────────────────────────────────────────────────

/// Minimum gap between two accepted shots.
pub const FIRE_INTERVAL_MS: u64 = 200;
/// Minimum gap between two enemy spawns.
pub const SPAWN_INTERVAL_MS: u64 = 1000;
/// Score awarded per enemy destroyed.
pub const ENEMY_REWARD: u32 = 10;
const ENEMY_MIN_SPEED: f32 = 2.0;
const ENEMY_MAX_SPEED: f32 = 4.0;

/// True when an action last accepted at `last` may not run again at `now`.
fn throttled(last: Option<u64>, now_ms: u64, interval_ms: u64) -> bool {
    match last {
        Some(t) => now_ms.saturating_sub(t) < interval_ms,
        None => false,
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// State shown before the first session: nothing on the field, waiting for
/// an activate.
pub fn blank_state(width: f32, height: f32) -> GameState {
    GameState {
        status: GameStatus::NotStarted,
        ..init_state(width, height)
    }
}

/// Build a fresh, running session for the given playfield.
pub fn init_state(width: f32, height: f32) -> GameState {
    let x = width / 2.0 - PLAYER_WIDTH / 2.0;
    GameState {
        player: Player {
            x,
            y: height - PLAYER_BOTTOM_OFFSET,
            target_x: width / 2.0,
        },
        bullets: Vec::new(),
        enemies: Vec::new(),
        score: 0,
        status: GameStatus::Playing,
        last_fire_ms: None,
        last_spawn_ms: None,
        frame: 0,
        width,
        height,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Record the pointer position for the next tick.  Pointer movement is
/// dropped while no session is running.
pub fn track_pointer(state: &GameState, pointer_x: f32) -> GameState {
    if !state.is_playing() {
        return state.clone();
    }
    GameState {
        player: Player {
            target_x: pointer_x,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// The "click": starts a new session when idle or after a game over,
/// otherwise fires.
pub fn activate(state: &GameState, now_ms: u64) -> GameState {
    match state.status {
        GameStatus::NotStarted | GameStatus::GameOver => {
            info!(width = state.width, height = state.height, "starting new session");
            init_state(state.width, state.height)
        }
        GameStatus::Playing => player_shoot(state, now_ms),
    }
}

/// Fire a bullet from the centre of the ship, at most once per
/// `FIRE_INTERVAL_MS`.
pub fn player_shoot(state: &GameState, now_ms: u64) -> GameState {
    if throttled(state.last_fire_ms, now_ms, FIRE_INTERVAL_MS) {
        return state.clone();
    }
    let new_bullet = Bullet {
        x: state.player.center_x() - BULLET_WIDTH / 2.0,
        y: state.player.y,
        speed: BULLET_SPEED,
    };
    let mut bullets = state.bullets.clone();
    bullets.push(new_bullet);
    GameState {
        bullets,
        last_fire_ms: Some(now_ms),
        ..state.clone()
    }
}

/// Drop a new enemy just above the playfield, at most once per
/// `SPAWN_INTERVAL_MS`.
pub fn spawn_enemy(state: &GameState, now_ms: u64, rng: &mut impl Rng) -> GameState {
    if throttled(state.last_spawn_ms, now_ms, SPAWN_INTERVAL_MS) {
        return state.clone();
    }
    let enemy = Enemy {
        x: rng.gen_range(0.0..=state.width - ENEMY_WIDTH),
        y: -ENEMY_HEIGHT,
        speed: rng.gen_range(ENEMY_MIN_SPEED..ENEMY_MAX_SPEED),
        health: ENEMY_HEALTH,
    };
    debug!(x = enemy.x, speed = enemy.speed, "enemy spawned");
    let mut enemies = state.enemies.clone();
    enemies.push(enemy);
    GameState {
        enemies,
        last_spawn_ms: Some(now_ms),
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  `pointer_x` is the pointer position
/// in playfield units and `now_ms` drives the spawn throttle.  All
/// randomness comes through `rng` so callers control determinism.
///
/// Callers stop ticking once the returned state is game over.
pub fn tick(state: &GameState, pointer_x: f32, now_ms: u64, rng: &mut impl Rng) -> GameState {
    // ── 1. Follow the pointer, clamped to the playfield ─────────────────────
    let max_x = state.width - PLAYER_WIDTH;
    let player = Player {
        x: (pointer_x - PLAYER_WIDTH / 2.0).min(max_x).max(0.0),
        target_x: pointer_x,
        ..state.player.clone()
    };

    // ── 2. Move bullets, discarding those fully above the top edge ──────────
    let mut bullets: Vec<Bullet> = state
        .bullets
        .iter()
        .map(|b| Bullet { y: b.y - b.speed, ..b.clone() })
        .filter(|b| b.y > -b.rect().height)
        .collect();

    // ── 3. Move enemies and resolve hits ────────────────────────────────────
    let mut enemies: Vec<Enemy> = Vec::with_capacity(state.enemies.len());
    let mut score_gain: u32 = 0;
    let mut breached = false;

    for enemy in &state.enemies {
        let mut enemy = Enemy { y: enemy.y + enemy.speed, ..enemy.clone() };

        if enemy.y > state.height {
            breached = true;
            continue;
        }

        // Walk bullets back to front so removal keeps earlier indices valid.
        let mut destroyed = false;
        for bi in (0..bullets.len()).rev() {
            if bullets[bi].rect().overlaps(&enemy.rect()) {
                enemy.health -= 1;
                bullets.remove(bi);
                if enemy.health <= 0 {
                    destroyed = true;
                    break;
                }
            }
        }

        if destroyed {
            score_gain += ENEMY_REWARD;
            debug!(x = enemy.x, y = enemy.y, "enemy destroyed");
        } else {
            enemies.push(enemy);
        }
    }

    let status = if breached {
        GameStatus::GameOver
    } else {
        state.status
    };
    if breached && state.status != GameStatus::GameOver {
        info!(score = state.score + score_gain, frame = state.frame + 1, "game over");
    }

    let next = GameState {
        player,
        bullets,
        enemies,
        score: state.score + score_gain,
        status,
        frame: state.frame + 1,
        ..state.clone()
    };

    // ── 4. Spawn ─────────────────────────────────────────────────────────────
    spawn_enemy(&next, now_ms, rng)
}
