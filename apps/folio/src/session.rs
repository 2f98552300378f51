//! Résumé view session: owns one `CompositionState` and sequences loads.
//!
//! Loads are last-load-wins. `begin_load` hands out a ticket; a completion
//! whose ticket is not the latest one is discarded, so a slow fetch for a
//! previously selected résumé can never overwrite a newer selection.
//! Toggles applied before a load completes are lost when it lands.

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::composition::mapper::withhold_gated_links;
use crate::composition::{compose_state, CompositionState, ContactAccess, ResumeView, Toggle};
use crate::errors::FetchError;
use crate::fetcher::record::ResumeRecord;
use crate::fetcher::{ContentFetcher, ResumeSource};

/// Identifies one load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    source: ResumeSource,
}

impl LoadTicket {
    pub fn source(&self) -> ResumeSource {
        self.source
    }
}

#[derive(Debug, Clone)]
pub struct ResumeSession {
    state: CompositionState,
    access: ContactAccess,
    generation: u64,
    source: Option<ResumeSource>,
}

impl ResumeSession {
    pub fn new(access: ContactAccess) -> Self {
        Self {
            state: CompositionState::empty(),
            access,
            generation: 0,
            source: None,
        }
    }

    pub fn state(&self) -> &CompositionState {
        &self.state
    }

    pub fn access(&self) -> ContactAccess {
        self.access
    }

    /// Source of the state currently held; `None` before the first load.
    pub fn source(&self) -> Option<ResumeSource> {
        self.source
    }

    /// Losing access withholds gated links from the held state at once.
    /// Gaining access takes effect on the next load, since withheld links
    /// are not kept anywhere.
    pub fn set_access(&mut self, access: ContactAccess) {
        let revoked = self.access.is_granted() && !access.is_granted();
        self.access = access;
        if revoked {
            let withheld = withhold_gated_links(&mut self.state);
            debug!(withheld, "Contact access revoked");
        }
    }

    pub fn begin_load(&mut self, source: ResumeSource) -> LoadTicket {
        self.generation += 1;
        debug!(generation = self.generation, ?source, "Load started");
        LoadTicket {
            generation: self.generation,
            source,
        }
    }

    /// Installs the fetch outcome if `ticket` is the latest load. Returns
    /// whether the state was replaced.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        fetched: Result<Option<ResumeRecord>, FetchError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                latest = self.generation,
                "Discarding superseded load"
            );
            return false;
        }

        self.state = compose_state(fetched, self.access);
        self.source = Some(ticket.source);
        info!(source = ?ticket.source, empty = self.state.is_empty(), "Résumé loaded");
        true
    }

    pub async fn load(&mut self, fetcher: &dyn ContentFetcher, source: ResumeSource) -> bool {
        let ticket = self.begin_load(source);
        let fetched = fetcher.fetch(source).await;
        self.complete_load(ticket, fetched)
    }

    pub fn apply(&mut self, toggle: &Toggle) -> bool {
        self.state.apply(toggle)
    }

    pub fn view(&self) -> ResumeView {
        ResumeView::derive(&self.state, self.access.is_granted())
    }
}

/// Loads into a shared session without holding the lock across the fetch,
/// so toggles and newer loads proceed while this one is in flight.
pub async fn load_shared(
    session: &Mutex<ResumeSession>,
    fetcher: &dyn ContentFetcher,
    source: ResumeSource,
) -> bool {
    let ticket = session.lock().await.begin_load(source);
    let fetched = fetcher.fetch(source).await;
    session.lock().await.complete_load(ticket, fetched)
}
