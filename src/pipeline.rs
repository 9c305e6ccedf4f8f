/// Payload-to-snapshot pipeline owned by the ingestion task
use crate::error::PayloadError;
use crate::protocol::{decode_frame, DecodingContext, Event, Token};
use crate::store::{SlidingWindowStore, SnapshotPublisher};

/// Frame decoding, protocol state and sample storage behind one entry point
///
/// Owned exclusively by the ingestion side; the only thing that leaves it is a
/// snapshot through the publisher.
#[derive(Debug)]
pub struct Pipeline {
    context: DecodingContext,
    store: SlidingWindowStore,
    publisher: SnapshotPublisher,
}

impl Pipeline {
    pub fn new(window_capacity: usize, publisher: SnapshotPublisher) -> Self {
        Self {
            context: DecodingContext::new(),
            store: SlidingWindowStore::new(window_capacity),
            publisher,
        }
    }

    /// Consume one raw payload
    ///
    /// An error means the payload was dropped with no effect on the context or
    /// the store. Callers are expected to log and keep going.
    pub fn process(&mut self, raw: &[u8]) -> Result<Event, PayloadError> {
        let frame = decode_frame(raw)?;
        let token = Token::classify(frame.body)?;

        match self.context.apply(token, &mut self.store)? {
            Event::FlushRequested { .. } => {
                let delivered = self.publisher.publish(self.store.snapshot());
                Ok(Event::FlushRequested { delivered })
            }
            event => Ok(event),
        }
    }

    pub fn context(&self) -> &DecodingContext {
        &self.context
    }

    pub fn store(&self) -> &SlidingWindowStore {
        &self.store
    }
}
