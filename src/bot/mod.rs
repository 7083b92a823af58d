//! The update loop: poll, persist the cursor, dispatch.

pub mod offset;


use crate::handlers::{Outcome, Router};
use myna_core::error::MynaError;
use myna_telegram::{Client, Update};
use offset::OffsetStore;
use tracing::{error, info};

/// The polling engine. Owns the API client, the handler list, and the single
/// offset cursor; everything runs sequentially on one task.
pub struct BotServer {
    client: Client,
    router: Router,
    store: OffsetStore,
    offset: Option<i64>,
    poll_timeout: Option<u64>,
}

impl BotServer {
    /// Load the persisted cursor and assemble the loop. A corrupt offset
    /// file fails here, before the first poll.
    pub fn new(
        client: Client,
        router: Router,
        store: OffsetStore,
        poll_timeout: Option<u64>,
    ) -> Result<Self, MynaError> {
        let offset = store.load()?;
        Ok(Self {
            client,
            router,
            store,
            offset,
            poll_timeout,
        })
    }

    /// Poll until a handler requests shutdown or abort. Transport and API
    /// failures are logged and the next poll starts immediately.
    pub async fn run(&mut self) -> Outcome {
        info!("starting telegram bot server");
        loop {
            match self.poll_cycle().await {
                Ok(Outcome::Continue) => {}
                Ok(outcome) => return outcome,
                Err(e) => error!("poll failed: {e}"),
            }
        }
    }

    /// One pass: poll with the next offset, then for each update persist the
    /// advanced cursor before dispatching its message.
    async fn poll_cycle(&mut self) -> Result<Outcome, MynaError> {
        let next_offset = self.offset.map(|o| o + 1);
        let updates = self
            .client
            .get_updates(next_offset, self.poll_timeout)
            .await?;

        for update in updates {
            info!(
                "handling update_id: {}, message: {}",
                update.update_id,
                update.message_text()
            );

            self.advance_offset(update.update_id);

            match self.handle_update(&update).await {
                Outcome::Continue => {}
                // The rest of the batch is deliberately skipped; the cursor
                // has not acknowledged those updates yet.
                outcome => return Ok(outcome),
            }
        }

        Ok(Outcome::Continue)
    }

    /// Advance the in-memory cursor to `max(cursor, update_id)` and write it
    /// through. A failed save only risks duplicate handling on the next run,
    /// which at-least-once delivery already allows.
    fn advance_offset(&mut self, update_id: i64) {
        let new = match self.offset {
            Some(current) => current.max(update_id),
            None => update_id,
        };
        info!("saving offset from {} to {new}", fmt_offset(self.offset));
        self.offset = Some(new);

        if let Err(e) = self.store.save(new) {
            error!("offset save failed: {e}");
        }
    }

    async fn handle_update(&self, update: &Update) -> Outcome {
        let message = match &update.message {
            Some(m) => m,
            None => return Outcome::Continue,
        };

        let handler = self.router.dispatch(message);
        match handler.handle(&self.client, message).await {
            Ok(Outcome::Shutdown) => {
                info!("got shutdown request");
                Outcome::Shutdown
            }
            Ok(Outcome::Abort) => {
                error!("got crash request");
                Outcome::Abort
            }
            Ok(Outcome::Continue) => Outcome::Continue,
            Err(e) => {
                error!("handler '{}' failed: {e}", handler.name());
                Outcome::Continue
            }
        }
    }
}

fn fmt_offset(offset: Option<i64>) -> String {
    offset
        .map(|o| o.to_string())
        .unwrap_or_else(|| "none".to_string())
}
