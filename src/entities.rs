/// All game entity types — plain data plus the rectangle views the
/// collision pass and the renderer share.

// ── Entity dimensions (playfield units) ─────────────────────────────────────

pub const PLAYER_WIDTH: f32 = 40.0;
pub const PLAYER_HEIGHT: f32 = 40.0;
/// Distance from the bottom of the playfield to the player's top edge.
pub const PLAYER_BOTTOM_OFFSET: f32 = 60.0;

pub const BULLET_WIDTH: f32 = 5.0;
pub const BULLET_HEIGHT: f32 = 15.0;
pub const BULLET_SPEED: f32 = 7.0;

pub const ENEMY_WIDTH: f32 = 30.0;
pub const ENEMY_HEIGHT: f32 = 30.0;
pub const ENEMY_HEALTH: i32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Nothing has been played yet; the first activate starts a session.
    NotStarted,
    Playing,
    /// An enemy crossed the bottom boundary.
    GameOver,
}

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle, origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    /// Strict overlap test: rectangles that only share an edge do not touch.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    /// Latest pointer x reported by the input layer; the ship centres on it
    /// during the next tick.
    pub target_x: f32,
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    pub fn center_x(&self) -> f32 {
        self.x + PLAYER_WIDTH / 2.0
    }
}

// ── Projectiles & enemies ────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    /// Upward distance travelled per frame.
    pub speed: f32,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, BULLET_WIDTH, BULLET_HEIGHT)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    /// Downward distance travelled per frame, rolled once at spawn.
    pub speed: f32,
    pub health: i32,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, ENEMY_WIDTH, ENEMY_HEIGHT)
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire session state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub score: u32,
    pub status: GameStatus,
    /// Timestamp (ms) of the last accepted shot; `None` until the first one.
    pub last_fire_ms: Option<u64>,
    /// Timestamp (ms) of the last accepted spawn; `None` until the first one.
    pub last_spawn_ms: Option<u64>,
    pub frame: u64,
    pub width: f32,
    pub height: f32,
}

impl GameState {
    pub fn is_started(&self) -> bool {
        self.status != GameStatus::NotStarted
    }

    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}
