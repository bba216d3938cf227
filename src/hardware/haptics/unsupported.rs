use super::{Environment, HapticError, VibratorService};

/// Desktop targets have no vibration motor.
#[derive(Clone, Default)]
pub struct OsEnvironment;

impl OsEnvironment {
    pub fn new() -> Self {
        Self
    }
}

impl Environment for OsEnvironment {
    type Service = OsVibrator;

    fn system_service(&self, _key: &str) -> Result<OsVibrator, HapticError> {
        Ok(OsVibrator)
    }
}

#[derive(Clone)]
pub struct OsVibrator;

impl VibratorService for OsVibrator {
    fn vibrate(&self, _milliseconds: u64) -> Result<(), HapticError> {
        Err(HapticError::Unsupported)
    }

    fn cancel(&self) -> Result<(), HapticError> {
        Err(HapticError::Unsupported)
    }

    fn has_vibrator(&self) -> bool {
        false
    }
}
