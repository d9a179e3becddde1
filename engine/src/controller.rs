use crate::aggregator::Aggregator;
use crate::debounce::DebounceTimer;
use crate::debounce::SequenceCounter;
use crate::intent::QueryIntent;
use crate::result_set::ResultSet;
use meal_catalog::Catalog;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;
use tracing::trace;

/// What the view currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Sequence number of the resolution that produced `results`; 0 before
    /// the first one lands
    pub seq: u64,
    pub intent: Option<QueryIntent>,
    pub results: ResultSet,
    /// A resolution newer than `seq` has been dispatched and not yet applied
    pub loading: bool,
}

struct Shared<C> {
    aggregator: Aggregator<C>,
    view: watch::Sender<ViewState>,
    /// Highest sequence number handed to the aggregator this session
    dispatched: AtomicU64,
    /// Bumped by `end_session` so in-flight work from an older session can
    /// never match a recycled sequence number
    session: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ticket {
    session: u64,
    seq: u64,
}

/// Debounces query changes for one view and applies only the newest
/// resolution's results.
///
/// Superseded resolutions are not aborted; their results are dropped on
/// arrival. Dropping the controller cancels whatever is still waiting out its
/// quiet period.
pub struct QueryController<C> {
    shared: Arc<Shared<C>>,
    counter: SequenceCounter,
    debounce: Duration,
    pending: Option<DebounceTimer>,
}

impl<C: Catalog + 'static> QueryController<C> {
    pub fn new(aggregator: Aggregator<C>, debounce: Duration) -> Self {
        let (view, _) = watch::channel(ViewState::default());
        Self {
            shared: Arc::new(Shared {
                aggregator,
                view,
                dispatched: AtomicU64::new(0),
                session: AtomicU64::new(0),
            }),
            counter: SequenceCounter::new(),
            debounce,
            pending: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.shared.view.subscribe()
    }

    /// Current view, cloned
    pub fn snapshot(&self) -> ViewState {
        self.shared.view.borrow().clone()
    }

    /// Schedule `intent` after the quiet period, replacing any pending one.
    /// Returns the sequence number it will carry if it fires.
    pub fn submit(&mut self, intent: QueryIntent) -> u64 {
        let ticket = self.ticket();
        trace!(seq = ticket.seq, intent = intent.kind(), "scheduling resolution");
        let shared = Arc::clone(&self.shared);
        // Replacing the pending timer drops, and so cancels, the old one.
        self.pending = Some(DebounceTimer::schedule(
            self.debounce,
            dispatch(shared, ticket, intent),
        ));
        ticket.seq
    }

    /// Dispatch `intent` now, dropping anything still waiting out its quiet
    /// period.
    pub fn flush(&mut self, intent: QueryIntent) -> u64 {
        self.cancel_pending();
        let ticket = self.ticket();
        tokio::spawn(dispatch(Arc::clone(&self.shared), ticket, intent));
        ticket.seq
    }

    pub fn cancel_pending(&mut self) {
        if let Some(timer) = self.pending.take() {
            timer.cancel();
        }
    }

    /// Forget this session: cancel pending work, restart the sequence and
    /// clear the view. Resolutions still in flight are discarded on arrival.
    pub fn end_session(&mut self) {
        self.cancel_pending();
        self.shared.session.fetch_add(1, Ordering::SeqCst);
        self.shared.dispatched.store(0, Ordering::SeqCst);
        self.counter.reset();
        self.shared.view.send_replace(ViewState::default());
        debug!("query session ended");
    }

    fn ticket(&self) -> Ticket {
        Ticket {
            session: self.shared.session.load(Ordering::SeqCst),
            seq: self.counter.next(),
        }
    }
}

async fn dispatch<C: Catalog>(shared: Arc<Shared<C>>, ticket: Ticket, intent: QueryIntent) {
    if shared.session.load(Ordering::SeqCst) != ticket.session {
        return;
    }
    // A newer ticket already started; this one could never be applied.
    let newest = shared.dispatched.fetch_max(ticket.seq, Ordering::SeqCst);
    if newest >= ticket.seq {
        trace!(seq = ticket.seq, newest, "skipping superseded resolution");
        return;
    }
    shared.view.send_if_modified(|view| {
        let was_loading = view.loading;
        view.loading = true;
        !was_loading
    });
    debug!(seq = ticket.seq, intent = intent.kind(), "dispatching resolution");

    let results = shared.aggregator.resolve(&intent).await;

    // Check and write under the channel's lock so a stale result can never
    // land after a newer one.
    let applied = shared.view.send_if_modified(|view| {
        let current = shared.session.load(Ordering::SeqCst) == ticket.session
            && shared.dispatched.load(Ordering::SeqCst) == ticket.seq
            && ticket.seq > view.seq;
        if current {
            *view = ViewState {
                seq: ticket.seq,
                intent: Some(intent),
                results,
                loading: false,
            };
        }
        current
    });

    if !applied {
        trace!(seq = ticket.seq, "discarding stale resolution");
    }
}
