//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Animation reference frame rate the telegraph data is authored against.
/// Spine frames are converted to ticks by `TICK_RATE / ANIM_FRAME_RATE`.
pub const ANIM_FRAME_RATE: u32 = 30;

/// Ticks per authored animation frame (60Hz sim / 30fps animation data).
pub const TICKS_PER_ANIM_FRAME: u32 = TICK_RATE / ANIM_FRAME_RATE;

// --- Arena ---

/// Left arena wall (world units).
pub const ARENA_MIN_X: f64 = -600.0;

/// Right arena wall (world units).
pub const ARENA_MAX_X: f64 = 600.0;

/// Ground plane. Y grows downward; airborne fighters have y < 0.
pub const GROUND_Y: f64 = 0.0;

/// Minimum horizontal distance two grounded fighters may occupy.
pub const MIN_FIGHTER_DISTANCE: f64 = 70.0;

/// Facing only flips once the opponent is this far past the fighter's x,
/// preventing flicker when the pair overlaps.
pub const FACING_DEADZONE: f64 = 4.0;

// --- Movement & physics ---

/// Base walk speed (units/s) before character speed multipliers.
pub const BASE_MOVE_SPEED: f64 = 220.0;

/// Walk speed multiplier while the run modifier is held.
pub const RUN_MULTIPLIER: f64 = 2.0;

/// Downward acceleration while airborne (units/s²).
pub const GRAVITY: f64 = 2400.0;

/// Initial vertical velocity of a jump (negative = upward).
pub const JUMP_VELOCITY: f64 = -820.0;

/// Knockback impulse retained per tick (8% damping).
pub const IMPULSE_DAMPING: f64 = 0.92;

/// Impulse magnitude below which it snaps to zero.
pub const IMPULSE_EPSILON: f64 = 1.0;

// --- Combat timing ---

/// Ticks a fighter stays in `Hurt` before auto-returning to `Idle`.
pub const HURT_TICKS: u32 = 24;

/// Parry window length from the initial block press (ticks).
pub const PARRY_WINDOW_TICKS: u32 = 10;

/// Full pressure-stun paralysis duration (ticks).
pub const PRESSURE_STUN_TICKS: u32 = 90;

/// Ticks a buffered attack command survives before expiring.
pub const INPUT_BUFFER_TICKS: u32 = 12;

// --- Meters ---

/// Cap for both special and pressure meters.
pub const METER_MAX: f64 = 100.0;

/// Special meter awarded to the player for a successful parry.
pub const PARRY_SPECIAL_REWARD: f64 = 12.0;

// --- Damage & knockback ---

/// Damage multiplier for hits resolved against the head.
pub const HEADSHOT_MULTIPLIER: f64 = 1.3;

/// Fraction of damage that lands through a correct-zone block.
pub const BLOCK_CORRECT_DAMAGE_FACTOR: f64 = 0.25;

/// Fraction of damage that lands through a wrong-zone block.
pub const BLOCK_WRONG_DAMAGE_FACTOR: f64 = 0.50;

/// Knockback multiplier for a clean hit.
pub const HIT_KNOCKBACK_MULT: f64 = 1.0;

/// Knockback multiplier while blocking.
pub const BLOCK_KNOCKBACK_MULT: f64 = 0.5;

/// Knockback multiplier applied to the *attacker* on a parry.
pub const PARRY_KNOCKBACK_MULT: f64 = 10.0;

// --- Rage burst defaults ---

/// Default proximity radius that charges the rage timer.
pub const RAGE_PROXIMITY_RANGE: f64 = 120.0;

/// Default ticks of sustained proximity before the burst fires.
pub const RAGE_TRIGGER_TICKS: u32 = 120;

/// Default burst knockback magnitude.
pub const RAGE_KNOCKBACK: f64 = 900.0;

/// Default cooldown before the burst can retrigger (ticks).
pub const RAGE_COOLDOWN_TICKS: u32 = 300;

// --- AI defaults ---

/// Extra reach added to an opponent attack's range when deciding to block.
pub const AI_BLOCK_RANGE_BUFFER: f64 = 30.0;

/// Default engage-range hysteresis (exit threshold = engage + this).
pub const AI_ENGAGE_HYSTERESIS: f64 = 40.0;

/// Ticks an AI stays disengaged after exiting engage range.
pub const AI_ENGAGE_LOCK_TICKS: u32 = 30;

/// Retreat trigger distance as a fraction of preferred distance.
pub const AI_RETREAT_DISTANCE_FRAC: f64 = 0.5;

/// Preferred distance as a fraction of engage range, when not configured.
pub const AI_PREFERRED_DISTANCE_FRAC: f64 = 0.7;

/// Half-width of the maintain-distance deadzone band.
pub const AI_MAINTAIN_DEADZONE: f64 = 25.0;

/// Ticks a chase/retreat direction stays locked once chosen.
pub const AI_DIRECTION_LOCK_TICKS: u32 = 20;

// --- Host loop ---

/// Maximum ticks drained from the accumulator per frame (runaway guard).
pub const MAX_CATCHUP_TICKS: u32 = 5;

// --- Geometry ---

/// Bone samples are quantized to this grid before hit tests, bounding the
/// nondeterminism of presentation-side animation interpolation.
pub const BONE_QUANT_STEP: f64 = 1.0;
