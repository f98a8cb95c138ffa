use std::env;
use std::str::FromStr;

use log::warn;

/// Frame-based timings used by the puzzle session.
///
/// The front end advances time by calling `tick()` once per rendered frame,
/// so every duration is stored as a frame count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settings {
    pub fps: u32,
    pub wrong_flash_secs: f32,
    pub hint_secs: f32,
    pub correct_secs: f32,
    pub nav_secs: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            fps: 60,
            wrong_flash_secs: 2.0,
            hint_secs: 3.0,
            correct_secs: 1.0,
            nav_secs: 1.5,
        }
    }
}

impl Settings {
    /// Defaults overridden by `ACADEMY_*` environment variables.
    pub fn from_env() -> Settings {
        let defaults = Settings::default();
        Settings {
            fps: read_var("ACADEMY_FPS", defaults.fps),
            wrong_flash_secs: read_var("ACADEMY_WRONG_FLASH_SECS", defaults.wrong_flash_secs),
            hint_secs: read_var("ACADEMY_HINT_SECS", defaults.hint_secs),
            correct_secs: read_var("ACADEMY_CORRECT_SECS", defaults.correct_secs),
            nav_secs: read_var("ACADEMY_NAV_SECS", defaults.nav_secs),
        }
    }

    fn frames(&self, secs: f32) -> u32 {
        (self.fps as f32 * secs).round() as u32
    }

    pub fn wrong_flash_frames(&self) -> u32 {
        self.frames(self.wrong_flash_secs)
    }

    pub fn hint_frames(&self) -> u32 {
        self.frames(self.hint_secs)
    }

    pub fn correct_frames(&self) -> u32 {
        self.frames(self.correct_secs)
    }

    pub fn nav_frames(&self) -> u32 {
        self.frames(self.nav_secs)
    }
}

fn read_var<T: FromStr + Copy>(name: &str, default: T) -> T {
    match env::var(name) {
        Err(_) => default,
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring {name}='{raw}', not a valid value");
            default
        }),
    }
}
