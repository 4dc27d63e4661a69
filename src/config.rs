/// Behavioural differences between CHIP-8 interpreters that real programs
/// depend on. Everything off gives the CHIP-48 / modern behaviour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Quirks {
    /// 8xy6 / 8xyE shift Vy into Vx instead of shifting Vx in place (COSMAC VIP)
    pub shift_uses_vy: bool,
    /// Fx55 / Fx65 leave I pointing past the last register touched (COSMAC VIP)
    pub load_store_bumps_index: bool,
    /// 8xy1 / 8xy2 / 8xy3 zero VF afterwards (COSMAC VIP)
    pub logic_resets_vf: bool,
    /// Bxnn jumps to xnn + Vx instead of nnn + V0 (SUPER-CHIP)
    pub jump_uses_vx: bool,
}

/// instructions run per 60Hz frame unless told otherwise
pub const DEFAULT_CYCLES_PER_FRAME: u32 = 10;
/// timers count down at this rate
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// How the host drives the interpreter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// instructions executed between timer ticks
    pub cycles_per_frame: u32,
    /// timer ticks (and screen refreshes) per second
    pub frame_rate: u32,
    /// stop after this many frames; run until quit if None
    pub max_frames: Option<u64>,
    /// seed for Cxnn; entropy if None
    pub seed: Option<u64>,
    pub quirks: Quirks,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cycles_per_frame: DEFAULT_CYCLES_PER_FRAME,
            frame_rate: DEFAULT_FRAME_RATE,
            max_frames: None,
            seed: None,
            quirks: Quirks::default(),
        }
    }
}

impl Config {
    /// wallclock length of one frame
    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs(1) / self.frame_rate.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let c = Config::default();
        assert_eq!(c.cycles_per_frame, 10);
        assert_eq!(c.quirks, Quirks::default());
        assert!(!c.quirks.shift_uses_vy);
    }

    #[test]
    fn test_frame_duration() {
        let c = Config::default();
        assert_eq!(c.frame_duration(), Duration::from_nanos(16_666_666));
        let zero = Config {
            frame_rate: 0,
            ..Config::default()
        };
        assert_eq!(zero.frame_duration(), Duration::from_secs(1));
    }
}
