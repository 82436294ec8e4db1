use std::sync::Arc;
use tokio::sync::Notify;

/// Handle that aborts the [`Match`](crate::Match) it came from.
///
/// Quitting before the match waits on decisions aborts it as soon as it does.
#[derive(Debug, Clone)]
pub struct Quitter(Arc<Notify>);

impl From<Arc<Notify>> for Quitter {
    fn from(notify: Arc<Notify>) -> Self {
        Self(notify)
    }
}

impl Quitter {
    pub fn quit(&self) {
        self.0.notify_one();
    }
}
