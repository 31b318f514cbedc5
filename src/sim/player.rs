//! Player avatar and its hit/invincibility lifecycle

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// Player lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Controllable and vulnerable
    Active,
    /// Just hit: pinned at home, blinking, untouchable
    Invincible { ticks: u32 },
}

/// Directional intent for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Movement {
    /// -1 left, 1 right
    pub dx: i8,
    /// -1 up, 1 down
    pub dy: i8,
    /// Slow, precise movement
    pub focus: bool,
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Sprite center
    pub pos: Vec2,
    pub lives: u32,
    pub bombs: u32,
    pub life: Lifecycle,
    /// Tick of the last shot fired
    pub last_shot: Option<u64>,
    /// Blink visibility while invincible (cosmetic)
    pub visible: bool,
    blink_timer: u32,
    hitbox: Rect,
    grazebox: Rect,
}

impl Player {
    pub fn new(lives: u32, bombs: u32) -> Self {
        let pos = Self::home();
        Self {
            pos,
            lives,
            bombs,
            life: Lifecycle::Active,
            last_shot: None,
            visible: true,
            blink_timer: 0,
            hitbox: Rect::square(pos, PLAYER_HITBOX_SIZE),
            grazebox: Self::sprite_at(pos).inflate(-PLAYER_GRAZE_INSET, -PLAYER_GRAZE_INSET),
        }
    }

    /// Spawn point, bottom center
    pub fn home() -> Vec2 {
        Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - PLAYER_HOME_OFFSET)
    }

    fn sprite_at(pos: Vec2) -> Rect {
        Rect::square(pos, PLAYER_SIZE)
    }

    pub fn sprite(&self) -> Rect {
        Self::sprite_at(self.pos)
    }

    /// Inner box that registers hits
    pub fn hitbox(&self) -> Rect {
        self.hitbox
    }

    /// Outer box that registers grazes
    pub fn grazebox(&self) -> Rect {
        self.grazebox
    }

    pub fn is_invincible(&self) -> bool {
        matches!(self.life, Lifecycle::Invincible { .. })
    }

    pub fn is_defeated(&self) -> bool {
        self.lives == 0
    }

    fn recenter_boxes(&mut self) {
        self.hitbox.center = self.pos;
        self.grazebox.center = self.pos;
    }

    /// Advance one tick. Returns true when a shot should be spawned.
    pub fn update(&mut self, movement: Movement, now: u64) -> bool {
        if let Lifecycle::Invincible { ticks } = &mut self.life {
            *ticks += 1;
            if *ticks >= INVINCIBLE_TICKS {
                self.respawn();
                return false;
            }
            self.blink_timer = (self.blink_timer + 1) % (BLINK_HALF_PERIOD * 2);
            self.visible = self.blink_timer < BLINK_HALF_PERIOD;
            return false;
        }

        let speed = if movement.focus {
            PLAYER_FOCUS_SPEED
        } else {
            PLAYER_SPEED
        };
        self.pos += Vec2::new(movement.dx as f32, movement.dy as f32) * speed;
        self.pos = self.sprite().clamp_inside(&Rect::playfield()).center;
        self.recenter_boxes();

        self.try_fire(now)
    }

    fn try_fire(&mut self, now: u64) -> bool {
        match self.last_shot {
            Some(last) if now.saturating_sub(last) < FIRE_COOLDOWN_TICKS => false,
            _ => {
                self.last_shot = Some(now);
                true
            }
        }
    }

    /// Take a hit. Ignored while invincible; returns whether it landed.
    pub fn hit(&mut self) -> bool {
        if self.is_invincible() {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        self.life = Lifecycle::Invincible { ticks: 0 };
        self.blink_timer = 0;
        self.pos = Self::home();
        self.recenter_boxes();
        true
    }

    /// Leave invincibility at the home point
    pub fn respawn(&mut self) {
        self.life = Lifecycle::Active;
        self.visible = true;
        self.blink_timer = 0;
        self.pos = Self::home();
        self.recenter_boxes();
    }

    /// Spend a bomb. Only possible while active.
    pub fn use_bomb(&mut self) -> bool {
        if self.bombs > 0 && !self.is_invincible() {
            self.bombs -= 1;
            true
        } else {
            false
        }
    }
}
