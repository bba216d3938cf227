use std::cell::RefCell;
use std::rc::Rc;

use super::{Environment, HapticError, VibratorService};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Vibrate(u64),
    Cancel,
}

/// Records every call it receives, in order.
#[derive(Clone)]
pub struct FakeVibrator {
    present: bool,
    failure: Option<String>,
    cancel_failure: Option<String>,
    calls: Rc<RefCell<Vec<Call>>>,
}

impl VibratorService for FakeVibrator {
    fn vibrate(&self, milliseconds: u64) -> Result<(), HapticError> {
        self.calls.borrow_mut().push(Call::Vibrate(milliseconds));
        Self::result(self.failure.as_ref())
    }

    fn cancel(&self) -> Result<(), HapticError> {
        self.calls.borrow_mut().push(Call::Cancel);
        Self::result(self.cancel_failure.as_ref().or(self.failure.as_ref()))
    }

    fn has_vibrator(&self) -> bool {self.present}
}

impl FakeVibrator {
    fn result(failure: Option<&String>) -> Result<(), HapticError> {
        match failure {
            Some(message) => Err(HapticError::Platform(message.clone())),
            None => Ok(())
        }
    }
}

pub struct FakeEnvironment {
    vibrator: FakeVibrator,
    lookups: RefCell<Vec<String>>,
}

impl FakeEnvironment {
    pub fn new(present: bool) -> Self {
        FakeEnvironment{
            vibrator: FakeVibrator{present, failure: None, cancel_failure: None, calls: Rc::new(RefCell::new(Vec::new()))},
            lookups: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        let mut env = Self::new(true);
        env.vibrator.failure = Some(message.to_string());
        env
    }

    /// Vibrating works, cancelling fails with `message`.
    pub fn failing_cancel(message: &str) -> Self {
        let mut env = Self::new(true);
        env.vibrator.cancel_failure = Some(message.to_string());
        env
    }

    pub fn calls(&self) -> Vec<Call> {self.vibrator.calls.borrow().clone()}

    pub fn lookups(&self) -> Vec<String> {self.lookups.borrow().clone()}
}

impl Environment for FakeEnvironment {
    type Service = FakeVibrator;

    fn system_service(&self, key: &str) -> Result<FakeVibrator, HapticError> {
        self.lookups.borrow_mut().push(key.to_string());
        Ok(self.vibrator.clone())
    }
}
