#[cfg(target_os = "ios")]
mod apple;
#[cfg(target_os = "ios")]
pub use apple::{OsEnvironment, OsVibrator};

#[cfg(target_os = "android")]
mod android;
#[cfg(target_os = "android")]
pub use android::{OsEnvironment, OsVibrator};

#[cfg(not(any(target_os = "ios", target_os = "android")))]
mod unsupported;
#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub use unsupported::{OsEnvironment, OsVibrator};

mod config;
pub use config::HapticConfig;

mod effect;
pub use effect::{Capabilities, Effect, EffectKind, Replay, Direction, Envelope, Waveform, ConditionKind};

mod device;
pub use device::{HapticDevice, EffectId};

#[cfg(test)]
pub(crate) mod fake;

/// Key the platform service registry knows the vibration service by.
pub const VIBRATOR_SERVICE: &str = "vibrator";

#[derive(Debug)]
pub enum HapticError {
    Unsupported,
    UnsupportedEffect,
    NoFreeSlot,
    InvalidEffectId,
    InvalidLoops,
    Inactive,
    Platform(String),
    #[cfg(target_os = "android")]
    Jni(jni::errors::Error),
    Config(serde_json::Error),
}
impl std::error::Error for HapticError {}
impl std::fmt::Display for HapticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {write!(f, "{:?}", self)}
}
#[cfg(target_os = "android")]
impl From<jni::errors::Error> for HapticError {
    fn from(error: jni::errors::Error) -> HapticError {HapticError::Jni(error)}
}
impl From<serde_json::Error> for HapticError {
    fn from(error: serde_json::Error) -> HapticError {HapticError::Config(error)}
}

/// Handle to the platform vibration service.
/// Implementations forward straight to the platform, they never validate or retry.
pub trait VibratorService {
    fn vibrate(&self, milliseconds: u64) -> Result<(), HapticError>;
    fn cancel(&self) -> Result<(), HapticError>;
    fn has_vibrator(&self) -> bool;
}

/// Host environment that platform services are looked up through.
pub trait Environment {
    type Service: VibratorService;

    fn system_service(&self, key: &str) -> Result<Self::Service, HapticError>;
}

/// Pass-through wrapper around the vibration service of a host environment.
///
/// The service is resolved once in [`HapticController::new`] and used as-is afterwards.
pub struct HapticController<'a, E: Environment> {
    context: &'a E,
    service: E::Service,
}

impl<'a, E: Environment> HapticController<'a, E> {
    pub fn new(context: &'a E) -> Result<Self, HapticError> {
        let service = context.system_service(VIBRATOR_SERVICE)?;
        log::debug!("Resolved {} service", VIBRATOR_SERVICE);
        Ok(HapticController{context, service})
    }

    pub fn context(&self) -> &'a E {self.context}

    pub fn vibrate(&self, milliseconds: u64) -> Result<(), HapticError> {
        log::trace!("vibrate {}ms", milliseconds);
        self.service.vibrate(milliseconds)
    }

    pub fn cancel(&self) -> Result<(), HapticError> {
        log::trace!("cancel");
        self.service.cancel()
    }

    pub fn has_vibrator(&self) -> bool {
        self.service.has_vibrator()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::fake::{FakeEnvironment, Call};

    #[test]
    fn construction_resolves_vibrator_once() {
        let env = FakeEnvironment::new(true);
        let controller = HapticController::new(&env).unwrap();
        assert!(controller.has_vibrator());
        assert_eq!(env.lookups(), vec![VIBRATOR_SERVICE.to_string()]);
        assert!(env.calls().is_empty());
    }

    #[test]
    fn has_vibrator_mirrors_service() {
        let present = FakeEnvironment::new(true);
        let absent = FakeEnvironment::new(false);
        assert!(HapticController::new(&present).unwrap().has_vibrator());
        assert!(!HapticController::new(&absent).unwrap().has_vibrator());
    }

    #[test]
    fn vibrate_delegates_exactly_once() {
        let env = FakeEnvironment::new(true);
        let controller = HapticController::new(&env).unwrap();
        controller.vibrate(500).unwrap();
        assert_eq!(env.calls(), vec![Call::Vibrate(500)]);
    }

    #[test]
    fn cancel_delegates_exactly_once() {
        let env = FakeEnvironment::new(true);
        let controller = HapticController::new(&env).unwrap();
        controller.cancel().unwrap();
        assert_eq!(env.calls(), vec![Call::Cancel]);
    }

    #[test]
    fn calls_keep_issue_order() {
        let env = FakeEnvironment::new(true);
        let controller = HapticController::new(&env).unwrap();
        controller.vibrate(100).unwrap();
        controller.cancel().unwrap();
        controller.vibrate(20).unwrap();
        controller.vibrate(20).unwrap();
        controller.cancel().unwrap();
        assert_eq!(env.calls(), vec![
            Call::Vibrate(100), Call::Cancel, Call::Vibrate(20), Call::Vibrate(20), Call::Cancel
        ]);
    }

    #[test]
    fn platform_errors_pass_through() {
        let env = FakeEnvironment::failing("permission denied");
        let controller = HapticController::new(&env).unwrap();
        match controller.vibrate(10) {
            Err(HapticError::Platform(message)) => assert_eq!(message, "permission denied"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(env.calls(), vec![Call::Vibrate(10)]);
    }

    #[test]
    fn zero_duration_is_not_filtered() {
        let env = FakeEnvironment::new(true);
        let controller = HapticController::new(&env).unwrap();
        controller.vibrate(0).unwrap();
        assert_eq!(env.calls(), vec![Call::Vibrate(0)]);
    }

    #[test]
    fn controller_borrows_context() {
        let env = FakeEnvironment::new(true);
        let controller = HapticController::new(&env).unwrap();
        assert!(std::ptr::eq(controller.context(), &env));
    }
}
