pub mod hardware;
pub use crate::hardware::{
    Context,
    Logger,
    {HapticController, HapticDevice, HapticConfig, HapticError},
    {Environment, VibratorService, OsEnvironment},
};
pub use crate::hardware::haptics::{
    Capabilities,
    Effect,
    EffectId,
    EffectKind,
    Replay,
    VIBRATOR_SERVICE,
};

pub mod prelude {
    pub use crate::{Context, HapticController, HapticDevice, HapticConfig, HapticError, Effect};
}
