use std::ops::BitOr;
use std::time::Duration;

use serde::{Serialize, Deserialize};

/// Set of features a haptic device supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Capabilities(u32);

impl Capabilities {
    pub const RUMBLE: Capabilities = Capabilities(1 << 0);
    pub const PERIODIC: Capabilities = Capabilities(1 << 1);
    pub const CONSTANT: Capabilities = Capabilities(1 << 2);
    pub const SPRING: Capabilities = Capabilities(1 << 3);
    pub const FRICTION: Capabilities = Capabilities(1 << 4);
    pub const DAMPER: Capabilities = Capabilities(1 << 5);
    pub const INERTIA: Capabilities = Capabilities(1 << 6);
    pub const RAMP: Capabilities = Capabilities(1 << 7);
    pub const SQUARE: Capabilities = Capabilities(1 << 8);
    pub const TRIANGLE: Capabilities = Capabilities(1 << 9);
    pub const SINE: Capabilities = Capabilities(1 << 10);
    pub const SAW_UP: Capabilities = Capabilities(1 << 11);
    pub const SAW_DOWN: Capabilities = Capabilities(1 << 12);
    pub const CUSTOM: Capabilities = Capabilities(1 << 13);
    pub const GAIN: Capabilities = Capabilities(1 << 14);
    pub const ANGLE: Capabilities = Capabilities(1 << 15);
    pub const RADIUS: Capabilities = Capabilities(1 << 16);
    pub const AZIMUTH: Capabilities = Capabilities(1 << 17);

    pub const fn empty() -> Self {Capabilities(0)}
    pub const fn bits(&self) -> u32 {self.0}
    pub const fn from_bits(bits: u32) -> Self {Capabilities(bits)}

    pub const fn contains(&self, other: Capabilities) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(&self, other: Capabilities) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for Capabilities {
    type Output = Capabilities;
    fn bitor(self, rhs: Capabilities) -> Capabilities {Capabilities(self.0 | rhs.0)}
}

/// Where an effect comes from. Angle is in `0..2π`, 0 points at the user.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Direction {
    pub angle: f64,
    pub radius: f64,
    pub azimuth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Replay {
    pub length: Duration,
    pub delay: Duration,
}

/// Levels are in `0.0..=1.0`, lengths in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Envelope {
    pub attack_length: f64,
    pub attack_level: f64,
    pub fade_length: f64,
    pub fade_level: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Waveform {
    Square,
    Triangle,
    Sine,
    SawUp,
    SawDown,
    Custom(Vec<f64>),
}

impl Waveform {
    pub fn capability(&self) -> Capabilities {
        match self {
            Waveform::Square => Capabilities::SQUARE,
            Waveform::Triangle => Capabilities::TRIANGLE,
            Waveform::Sine => Capabilities::SINE,
            Waveform::SawUp => Capabilities::SAW_UP,
            Waveform::SawDown => Capabilities::SAW_DOWN,
            Waveform::Custom(_) => Capabilities::CUSTOM,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionKind {
    Spring,
    Friction,
    Damper,
    Inertia,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EffectKind {
    Rumble {strong: f64, weak: f64},
    Periodic {
        waveform: Waveform,
        period: f64,
        magnitude: f64,
        offset: f64,
        phase: f64,
        envelope: Envelope,
    },
    Constant {level: f64, envelope: Envelope},
    Ramp {start_level: f64, end_level: f64, envelope: Envelope},
    Condition {
        kind: ConditionKind,
        right_saturation: f64,
        left_saturation: f64,
        right_coeff: f64,
        left_coeff: f64,
        deadband: f64,
        center: f64,
    },
}

impl EffectKind {
    pub fn capability(&self) -> Capabilities {
        match self {
            EffectKind::Rumble{..} => Capabilities::RUMBLE,
            EffectKind::Periodic{..} => Capabilities::PERIODIC,
            EffectKind::Constant{..} => Capabilities::CONSTANT,
            EffectKind::Ramp{..} => Capabilities::RAMP,
            EffectKind::Condition{kind: ConditionKind::Spring, ..} => Capabilities::SPRING,
            EffectKind::Condition{kind: ConditionKind::Friction, ..} => Capabilities::FRICTION,
            EffectKind::Condition{kind: ConditionKind::Damper, ..} => Capabilities::DAMPER,
            EffectKind::Condition{kind: ConditionKind::Inertia, ..} => Capabilities::INERTIA,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub direction: Direction,
    pub replay: Replay,
}

impl Effect {
    pub fn new(kind: EffectKind, replay: Replay) -> Self {
        Effect{kind, direction: Direction::default(), replay}
    }

    /// Rumble with both motors at `intensity`.
    pub fn rumble(intensity: f64, length: Duration) -> Self {
        Effect::new(
            EffectKind::Rumble{strong: intensity, weak: intensity},
            Replay{length, delay: Duration::ZERO}
        )
    }

    /// Time one play of the effect takes, delay included.
    pub fn duration(&self) -> Duration {
        self.replay.delay + self.replay.length
    }

    /// Every capability the effect needs, waveform included.
    pub fn required(&self) -> Capabilities {
        match &self.kind {
            EffectKind::Periodic{waveform, ..} => self.kind.capability() | waveform.capability(),
            kind => kind.capability(),
        }
    }
}
