use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use super::{Capabilities, Effect, Environment, HapticConfig, HapticController, HapticError};

//Shared by every device so an id is only ever accepted by the device that issued it
static GENERATION: AtomicU64 = AtomicU64::new(1);

/// Handle to an effect uploaded to a [`HapticDevice`].
/// Ids of released effects stay invalid even after their slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectId {
    slot: usize,
    generation: u64,
}

impl EffectId {
    pub fn slot(&self) -> usize {self.slot}
}

#[derive(Default)]
struct Slot {
    effect: Option<Effect>,
    generation: u64,
    playing: bool,
    started: Option<Instant>,
    //None while playing means the end is too far away to represent
    ends: Option<Instant>,
}

impl Slot {
    fn clear(&mut self) {
        self.effect = None;
        self.playing = false;
        self.started = None;
        self.ends = None;
    }

    fn is_playing(&self, now: Instant) -> bool {
        self.playing && self.ends.is_none_or(|ends| now < ends)
    }
}

/// Effect slots on top of a [`HapticController`].
///
/// The device is the phone itself, so all effects share the one vibration motor:
/// playing an effect turns into a single timed `vibrate` and stopping one cancels the motor.
/// The platform cannot be asked whether the motor is still running, playback state is
/// tracked with a timer instead.
pub struct HapticDevice<'a, E: Environment> {
    controller: HapticController<'a, E>,
    slots: Vec<Slot>,
    capabilities: Capabilities,
    active: bool,
}

impl<'a, E: Environment> HapticDevice<'a, E> {
    pub fn new(context: &'a E, config: &HapticConfig) -> Result<Self, HapticError> {
        let controller = HapticController::new(context)?;
        let capabilities = match controller.has_vibrator() {
            true => Capabilities::RUMBLE | Capabilities::PERIODIC | Capabilities::SINE | Capabilities::CUSTOM,
            false => Capabilities::empty(),
        };
        log::info!("Haptic device with {} effect slots, capabilities {:#x}", config.max_effects, capabilities.bits());
        Ok(HapticDevice{
            controller,
            slots: (0..config.max_effects).map(|_| Slot::default()).collect(),
            capabilities,
            active: true,
        })
    }

    pub fn controller(&self) -> &HapticController<'a, E> {&self.controller}

    pub fn is_active(&self) -> bool {self.active}

    pub fn capabilities(&self) -> Capabilities {self.capabilities}

    pub fn num_effects(&self) -> usize {self.slots.len()}

    /// A plain vibrator has no gain control, it always runs at full strength.
    pub fn gain(&self) -> f64 {1.0}

    pub fn set_gain(&mut self, _gain: f64) -> Result<(), HapticError> {
        Err(HapticError::Unsupported)
    }

    pub fn autocenter(&self) -> f64 {0.0}

    pub fn set_autocenter(&mut self, _autocenter: f64) -> Result<(), HapticError> {
        Err(HapticError::Unsupported)
    }

    pub fn is_effect_ok(&self, effect: &Effect) -> bool {
        self.capabilities.contains(effect.required())
    }

    pub fn upload(&mut self, effect: &Effect) -> Result<EffectId, HapticError> {
        self.check_active()?;
        if !self.is_effect_ok(effect) {
            log::warn!("Effect {:?} not supported by this device", effect.kind);
            return Err(HapticError::UnsupportedEffect);
        }
        let index = self.slots.iter().position(|slot| slot.effect.is_none()).ok_or_else(|| {
            log::warn!("No free effect slot.");
            HapticError::NoFreeSlot
        })?;
        let generation = GENERATION.fetch_add(1, Ordering::Relaxed);
        let slot = &mut self.slots[index];
        slot.clear();
        slot.effect = Some(effect.clone());
        slot.generation = generation;
        log::debug!("Uploaded effect to slot {}", index);
        Ok(EffectId{slot: index, generation})
    }

    /// Plays `id` back `loops` times in a row.
    /// The new vibration replaces whatever the motor was doing, so other effects stop playing.
    pub fn play(&mut self, id: EffectId, loops: u32) -> Result<(), HapticError> {
        self.check_active()?;
        if loops == 0 {
            return Err(HapticError::InvalidLoops);
        }
        let (length, duration) = {
            let effect = self.slot(id)?.effect.as_ref().ok_or(HapticError::InvalidEffectId)?;
            (effect.replay.length, effect.duration())
        };

        let milliseconds = u64::try_from(length.as_millis()).unwrap_or(u64::MAX).saturating_mul(loops as u64);
        self.controller.vibrate(milliseconds)?;

        let now = Instant::now();
        self.slots.iter_mut().for_each(|slot| slot.playing = false);
        let slot = self.slot_mut(id)?;
        slot.playing = true;
        slot.started = Some(now);
        slot.ends = duration.checked_mul(loops).and_then(|total| now.checked_add(total));
        Ok(())
    }

    pub fn upload_and_play(&mut self, effect: &Effect, loops: u32) -> Result<EffectId, HapticError> {
        let id = self.upload(effect)?;
        if let Err(e) = self.play(id, loops) {
            self.slot_mut(id)?.clear();
            return Err(e);
        }
        Ok(id)
    }

    /// Rumbles at `intensity` for `length`, once.
    pub fn rumble(&mut self, intensity: f64, length: Duration) -> Result<EffectId, HapticError> {
        self.upload_and_play(&Effect::rumble(intensity, length), 1)
    }

    /// Cancels the motor, which ends every effect on this device, not just `id`.
    pub fn stop(&mut self, id: EffectId) -> Result<(), HapticError> {
        self.check_active()?;
        self.slot(id)?;
        self.controller.cancel()?;
        self.slots.iter_mut().for_each(|slot| slot.playing = false);
        Ok(())
    }

    pub fn is_playing(&self, id: EffectId) -> bool {
        self.slot(id).map(|slot| slot.is_playing(Instant::now())).unwrap_or(false)
    }

    /// When `id` was last started, if it is still uploaded.
    pub fn started(&self, id: EffectId) -> Option<Instant> {
        self.slot(id).ok().and_then(|slot| slot.started)
    }

    /// Frees the slot of `id`, stopping the motor first if the effect is still running.
    pub fn release_effect(&mut self, id: EffectId) -> Result<(), HapticError> {
        self.check_active()?;
        let playing = self.is_playing(id);
        self.slot(id)?;
        let stopped = match playing {
            true => self.controller.cancel(),
            false => Ok(())
        };
        self.slot_mut(id)?.clear();
        stopped
    }

    /// Releases every effect and deactivates the device.
    /// The device is released even when cancelling the motor fails, the error is returned afterwards.
    pub fn release(&mut self) -> Result<(), HapticError> {
        self.check_active()?;
        let now = Instant::now();
        let stopped = match self.slots.iter().any(|slot| slot.is_playing(now)) {
            true => self.controller.cancel(),
            false => Ok(())
        };
        self.slots.iter_mut().for_each(Slot::clear);
        self.active = false;
        stopped
    }

    fn check_active(&self) -> Result<(), HapticError> {
        match self.active {
            true => Ok(()),
            false => Err(HapticError::Inactive)
        }
    }

    fn slot(&self, id: EffectId) -> Result<&Slot, HapticError> {
        self.slots.get(id.slot)
            .filter(|slot| slot.effect.is_some() && slot.generation == id.generation)
            .ok_or(HapticError::InvalidEffectId)
    }

    fn slot_mut(&mut self, id: EffectId) -> Result<&mut Slot, HapticError> {
        self.slots.get_mut(id.slot)
            .filter(|slot| slot.effect.is_some() && slot.generation == id.generation)
            .ok_or(HapticError::InvalidEffectId)
    }
}
