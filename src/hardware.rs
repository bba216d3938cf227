pub mod haptics;
mod logger;

pub use haptics::{
    HapticController,
    HapticDevice,
    HapticConfig,
    HapticError,
    OsEnvironment,
    VibratorService,
    Environment,
};
pub use logger::Logger;

/// Hardware context owns the platform environment haptics are looked up through.
/// Controllers and devices borrow it, so it has to outlive them.
#[derive(Clone)]
pub struct Context {
    environment: OsEnvironment,
    config: HapticConfig,
}

impl Context {
    #[cfg(target_os = "android")]
    pub fn new(vm: &jni::JavaVM, config: HapticConfig) -> Result<Self, HapticError> {
        Logger::start(config.log_level);
        Ok(Self {
            environment: OsEnvironment::new(vm)?,
            config,
        })
    }

    /// Creates a new hardware context for non-Android platforms
    #[cfg(not(target_os = "android"))]
    pub fn new(config: HapticConfig) -> Result<Self, HapticError> {
        Logger::start(config.log_level);
        Ok(Self {
            environment: OsEnvironment::new(),
            config,
        })
    }

    pub fn environment(&self) -> &OsEnvironment {&self.environment}

    pub fn config(&self) -> &HapticConfig {&self.config}

    pub fn controller(&self) -> Result<HapticController<'_, OsEnvironment>, HapticError> {
        HapticController::new(&self.environment)
    }

    pub fn device(&self) -> Result<HapticDevice<'_, OsEnvironment>, HapticError> {
        HapticDevice::new(&self.environment, &self.config)
    }
}

#[cfg(all(test, not(any(target_os = "android", target_os = "ios"))))]
mod tests {
    use super::*;

    #[test]
    fn desktop_context_hands_out_haptics() {
        let context = Context::new(HapticConfig{max_effects: 8, log_level: None}).unwrap();
        let controller = context.controller().unwrap();
        assert!(!controller.has_vibrator());

        let device = context.device().unwrap();
        assert_eq!(device.num_effects(), 8);
        assert!(device.capabilities().bits() == 0);
    }
}
