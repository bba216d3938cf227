use objc2_ui_kit::{UIImpactFeedbackGenerator, UIImpactFeedbackStyle};
use objc2::{MainThreadMarker, msg_send};
use objc2::rc::{Retained, Allocated};

use super::{Environment, HapticError, VibratorService};

/// UIKit has no service registry, every lookup hands out the impact generator.
#[derive(Clone, Default)]
pub struct OsEnvironment;

impl OsEnvironment {
    pub fn new() -> Self {
        Self
    }
}

impl Environment for OsEnvironment {
    type Service = OsVibrator;

    fn system_service(&self, key: &str) -> Result<OsVibrator, HapticError> {
        log::trace!("{} resolves to UIImpactFeedbackGenerator", key);
        Ok(OsVibrator{style: UIImpactFeedbackStyle::Rigid})
    }
}

/// Impact feedback has no duration: `vibrate` is one impact of `style`, `cancel` has nothing to stop.
#[derive(Clone, Copy)]
pub struct OsVibrator {
    style: UIImpactFeedbackStyle,
}

impl OsVibrator {
    fn generator(&self, mtm: MainThreadMarker) -> Retained<UIImpactFeedbackGenerator> {
        let alloc: Allocated<UIImpactFeedbackGenerator> = UIImpactFeedbackGenerator::alloc(mtm);
        unsafe { msg_send![alloc, initWithStyle: self.style] }
    }
}

impl VibratorService for OsVibrator {
    fn vibrate(&self, milliseconds: u64) -> Result<(), HapticError> {
        let mtm = MainThreadMarker::new()
            .ok_or_else(|| HapticError::Platform("impact feedback must run on the main thread".to_string()))?;
        log::trace!("impact in place of a {}ms vibration", milliseconds);
        let generator = self.generator(mtm);
        unsafe {
            generator.prepare();
            generator.impactOccurred();
        }
        Ok(())
    }

    fn cancel(&self) -> Result<(), HapticError> {
        Ok(())
    }

    fn has_vibrator(&self) -> bool {
        true
    }
}
