use tracing::debug;

use super::api::{NativeScriptApi, Signal, SignalArgument};
use crate::variant::Variant;

/// A signal ready to be registered on a class.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeSignal {
    class: String,
    signal: Signal,
}

impl NativeSignal {
    pub fn new(
        class: impl Into<String>,
        name: impl Into<String>,
        args: Vec<SignalArgument>,
        default_args: Vec<Variant>,
    ) -> Self {
        Self {
            class: class.into(),
            signal: Signal {
                name: name.into(),
                args,
                default_args,
            },
        }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn signal(&self) -> &Signal {
        &self.signal
    }

    pub(crate) fn register<A: NativeScriptApi + ?Sized>(self, api: &mut A) {
        debug!(class = %self.class, signal = %self.signal.name, "registering signal");
        api.register_signal(&self.class, self.signal);
    }
}
