use crate::intent::Intent;

/// The host side of the boundary: executes intents against the real engine.
pub trait HostShell {
    fn execute(&mut self, intent: &Intent);
}

/// Queue of intents collected over a frame from `update` and contact
/// callbacks, flushed to the shell in arrival order.
#[derive(Debug, Default)]
pub struct IntentQueue {
    intents: Vec<Intent>,
}

impl IntentQueue {
    pub fn push(&mut self, intent: Intent) {
        self.intents.push(intent);
    }

    pub fn extend(&mut self, intents: impl IntoIterator<Item = Intent>) {
        self.intents.extend(intents);
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    pub fn clear(&mut self) {
        self.intents.clear();
    }

    /// Hand every queued intent to `shell`, leaving the queue empty.
    pub fn flush(&mut self, shell: &mut dyn HostShell) {
        if !self.intents.is_empty() {
            tracing::trace!(count = self.intents.len(), "Flushing intents");
        }
        for intent in self.intents.drain(..) {
            shell.execute(&intent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::SoundCue;

    #[derive(Default)]
    struct Collect(Vec<Intent>);

    impl HostShell for Collect {
        fn execute(&mut self, intent: &Intent) {
            self.0.push(intent.clone());
        }
    }

    #[test]
    fn flush_preserves_order_and_empties_queue() {
        let mut queue = IntentQueue::default();
        queue.push(Intent::SetAccelerationX(0.0));
        queue.extend([
            Intent::PlaySound {
                cue: SoundCue::Land,
                volume: 1.0,
            },
            Intent::ResetSession,
        ]);
        assert_eq!(queue.len(), 3);

        let mut shell = Collect::default();
        queue.flush(&mut shell);
        assert!(queue.is_empty());
        assert_eq!(shell.0.len(), 3);
        assert_eq!(shell.0[0], Intent::SetAccelerationX(0.0));
        assert_eq!(shell.0[2], Intent::ResetSession);
    }

    #[test]
    fn clear_drops_without_executing() {
        let mut queue = IntentQueue::default();
        queue.push(Intent::ToggleDebugDraw);
        queue.clear();
        let mut shell = Collect::default();
        queue.flush(&mut shell);
        assert!(shell.0.is_empty());
    }
}
