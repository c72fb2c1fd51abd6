use std::sync::Arc;

/// Fire-and-forget sink for probe progress messages.
pub trait ProbeLogger {
    fn log(&self, message: &str);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl ProbeLogger for TracingLogger {
    fn log(&self, message: &str) {
        tracing::info!(target: "connect_probe", "{}", message);
    }
}

impl<T: ProbeLogger + ?Sized> ProbeLogger for &T {
    fn log(&self, message: &str) {
        (**self).log(message)
    }
}

impl<T: ProbeLogger + ?Sized> ProbeLogger for Arc<T> {
    fn log(&self, message: &str) {
        (**self).log(message)
    }
}

impl<T: ProbeLogger + ?Sized> ProbeLogger for Box<T> {
    fn log(&self, message: &str) {
        (**self).log(message)
    }
}
