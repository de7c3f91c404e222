use std::fmt;
use std::rc::Rc;

/// Operations a block reports to whoever owns the api handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiEvent {
    PreviewResolved { url: String },
    PreviewFailed { url: String, reason: String },
    FileLoaded { name: String, bytes: usize },
    FileFailed { name: String, reason: String },
}

/// Receiver for block-level api events. The session never calls this itself.
pub trait BlockApi {
    fn report(&self, block_type: &'static str, event: ApiEvent);
}

struct NoopApi;

impl BlockApi for NoopApi {
    fn report(&self, _block_type: &'static str, _event: ApiEvent) {}
}

/// Opaque handle passed unchanged to every block at construction
#[derive(Clone)]
pub struct ApiHandle(Rc<dyn BlockApi>);

impl ApiHandle {
    pub fn new(api: impl BlockApi + 'static) -> Self {
        Self(Rc::new(api))
    }

    pub fn report(&self, block_type: &'static str, event: ApiEvent) {
        self.0.report(block_type, event);
    }
}

impl Default for ApiHandle {
    fn default() -> Self {
        Self::new(NoopApi)
    }
}

impl fmt::Debug for ApiHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiHandle")
    }
}
