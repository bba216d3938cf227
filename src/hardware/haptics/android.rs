use jni::objects::{GlobalRef, JObject, JValue};
use jni::{JNIEnv, JavaVM};
use std::sync::Arc;

use super::{Environment, HapticError, VibratorService};

/// The hosting activity, as handed to us by `ndk-context`.
#[derive(Clone)]
pub struct OsEnvironment {
    vm: Arc<JavaVM>,
    context: GlobalRef,
}

impl OsEnvironment {
    pub fn new(vm: &JavaVM) -> Result<Self, HapticError> {
        let vm = Arc::new(unsafe { JavaVM::from_raw(vm.get_java_vm_pointer())? });

        let context = {
            let env = vm.attach_current_thread()?;
            let context_obj = ndk_context::android_context().context().cast();
            let context_obj = unsafe { JObject::from_raw(context_obj) };
            env.new_global_ref(context_obj)?
        };

        Ok(Self { vm, context })
    }
}

impl Environment for OsEnvironment {
    type Service = OsVibrator;

    fn system_service(&self, key: &str) -> Result<OsVibrator, HapticError> {
        let mut env = self.vm.attach_current_thread()?;
        let context = self.context.as_obj();

        let key_string = env.new_string(key)?;
        let result = env.call_method(
            context,
            "getSystemService",
            "(Ljava/lang/String;)Ljava/lang/Object;",
            &[(&key_string).into()],
        );
        clear_exception(&mut env)?;
        let service = result?.l()?;

        // A null service is kept as-is, calls on it fail when they are made.
        if service.is_null() {
            log::warn!("getSystemService({}) returned null", key);
        }

        Ok(OsVibrator { vm: self.vm.clone(), vibrator: env.new_global_ref(service)? })
    }
}

/// `android.os.Vibrator`
#[derive(Clone)]
pub struct OsVibrator {
    vm: Arc<JavaVM>,
    vibrator: GlobalRef,
}

impl VibratorService for OsVibrator {
    fn vibrate(&self, milliseconds: u64) -> Result<(), HapticError> {
        let mut env = self.vm.attach_current_thread()?;
        let milliseconds = milliseconds.min(i64::MAX as u64) as i64;
        let result = env.call_method(self.vibrator.as_obj(), "vibrate", "(J)V", &[JValue::Long(milliseconds)]);
        clear_exception(&mut env)?;
        result?;
        Ok(())
    }

    fn cancel(&self) -> Result<(), HapticError> {
        let mut env = self.vm.attach_current_thread()?;
        let result = env.call_method(self.vibrator.as_obj(), "cancel", "()V", &[]);
        clear_exception(&mut env)?;
        result?;
        Ok(())
    }

    fn has_vibrator(&self) -> bool {
        self.has_vibrator_impl().unwrap_or_else(|e| {
            log::error!("hasVibrator failed: {}", e);
            false
        })
    }
}

impl OsVibrator {
    fn has_vibrator_impl(&self) -> Result<bool, HapticError> {
        let mut env = self.vm.attach_current_thread()?;
        let result = env.call_method(self.vibrator.as_obj(), "hasVibrator", "()Z", &[]);
        clear_exception(&mut env)?;
        Ok(result?.z()?)
    }
}

fn clear_exception(env: &mut JNIEnv) -> Result<(), HapticError> {
    if env.exception_check()? {
        env.exception_describe()?;
        env.exception_clear()?;
    }
    Ok(())
}
