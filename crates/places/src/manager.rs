//! Debounced, subscriber-based places state manager.
//!
//! The manager owns the current [`PlacesState`], one [`Debouncer`] bound to
//! its lookup, and the list of subscribers. State is only replaced through
//! [`PlacesManager::update_search_input`] and
//! [`PlacesManager::get_place_details`]; every replacement is broadcast to
//! all subscribers as an owned snapshot.
//!
//! # Ordering
//!
//! A fetch that has started is never cancelled. When several fetches are in
//! flight the one that resolves last determines the final state, even if it
//! was requested first.
//!
//! Every replacement bumps a version number under the state lock. Each
//! subscriber receives snapshots one at a time and never an older version
//! after a newer one, so its last snapshot always matches the manager's
//! state. If replacements pile up while its callback is still running, only
//! the newest one is delivered next.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::debounce::Debouncer;
use crate::errors::PlacesError;
use crate::models::{PlaceDetails, PlacesOptions, PlacesState};
use crate::provider::{resolve_lookup, LookupSource, PlaceLookup, Platform};

type Callback = Arc<dyn Fn(&PlacesState) + Send + Sync>;

/// Current state plus the number of replacements applied so far.
#[derive(Default)]
struct Versioned {
    version: u64,
    state: PlacesState,
}

/// Snapshots waiting for one subscriber.
#[derive(Default)]
struct Inbox {
    newest: Option<u64>,
    pending: Option<Arc<PlacesState>>,
    delivering: bool,
}

struct Subscriber {
    id: u64,
    active: AtomicBool,
    callback: Callback,
    inbox: Mutex<Inbox>,
}

impl Subscriber {
    fn new(id: u64, callback: Callback) -> Self {
        Self {
            id,
            active: AtomicBool::new(true),
            callback,
            inbox: Mutex::new(Inbox::default()),
        }
    }

    fn lock_inbox(&self) -> MutexGuard<'_, Inbox> {
        self.inbox.lock().unwrap_or_else(|poisoned| {
            warn!("Places subscriber inbox mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Hand `snapshot` to the callback unless a newer version got here first.
    ///
    /// Deliveries to one subscriber never overlap. A snapshot offered while a
    /// callback is running (from another thread, or re-entrantly from the
    /// callback itself) is queued and delivered once it returns; only the
    /// newest queued snapshot survives.
    fn offer(&self, version: u64, snapshot: &Arc<PlacesState>) {
        {
            let mut inbox = self.lock_inbox();
            if !self.is_active() || inbox.newest.is_some_and(|newest| newest >= version) {
                return;
            }
            inbox.newest = Some(version);
            inbox.pending = Some(Arc::clone(snapshot));
            if inbox.delivering {
                return;
            }
            inbox.delivering = true;
        }

        loop {
            let next = {
                let mut inbox = self.lock_inbox();
                match inbox.pending.take() {
                    Some(state) if self.is_active() => state,
                    _ => {
                        inbox.delivering = false;
                        return;
                    }
                }
            };
            (self.callback)(next.as_ref());
        }
    }

    /// Returns false if the subscriber was already inactive.
    fn deactivate(&self) -> bool {
        let mut inbox = self.lock_inbox();
        inbox.pending = None;
        self.active.swap(false, Ordering::SeqCst)
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// State reachable from the debounced task and from subscriptions.
struct Shared {
    lookup: Arc<dyn PlaceLookup>,
    state: Mutex<Versioned>,
    subscribers: Mutex<Vec<Arc<Subscriber>>>,
    next_subscriber_id: AtomicU64,
    destroyed: AtomicBool,
    enable_logging: bool,
}

impl Shared {
    fn lock_state(&self) -> MutexGuard<'_, Versioned> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("Places state mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn lock_subscribers(&self) -> MutexGuard<'_, Vec<Arc<Subscriber>>> {
        self.subscribers.lock().unwrap_or_else(|poisoned| {
            warn!("Places subscribers mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn log(&self, message: &str) {
        if self.enable_logging {
            info!("[PlacesManager] {}", message);
        }
    }

    fn snapshot(&self) -> (u64, Arc<PlacesState>) {
        let current = self.lock_state();
        (current.version, Arc::new(current.state.clone()))
    }

    /// Apply `update` to the state and broadcast the result.
    ///
    /// No lock is held while callbacks run, so a callback may call back into
    /// the manager. Every subscriber ends on the snapshot of the last
    /// replacement, whatever order concurrent broadcasts arrive in.
    fn replace_state(&self, update: impl FnOnce(&mut PlacesState)) {
        let (version, snapshot) = {
            let mut current = self.lock_state();
            update(&mut current.state);
            current.version += 1;
            (current.version, Arc::new(current.state.clone()))
        };

        let targets: Vec<Arc<Subscriber>> = self.lock_subscribers().iter().cloned().collect();
        for subscriber in targets {
            subscriber.offer(version, &snapshot);
        }
    }

    fn remove_subscriber(&self, id: u64) {
        self.lock_subscribers().retain(|s| s.id != id);
    }

    /// Body of the debounced search: mark loading, fetch, publish the outcome.
    async fn run_search(self: Arc<Self>, input: String) {
        if self.destroyed.load(Ordering::SeqCst) {
            return;
        }

        self.replace_state(|state| {
            state.is_loading = true;
            state.error = None;
        });
        self.log(&format!("Fetching predictions for: {}", input));

        match self.lookup.fetch_predictions(&input).await {
            Ok(predictions) => {
                debug!(
                    "{} returned {} predictions for '{}'",
                    self.lookup.id(),
                    predictions.len(),
                    input
                );
                self.replace_state(|state| {
                    state.predictions = predictions;
                    state.is_loading = false;
                });
            }
            Err(err) => {
                error!("Error fetching predictions: {}", err);
                self.replace_state(|state| {
                    state.predictions.clear();
                    state.is_loading = false;
                    state.error = Some(err);
                });
            }
        }
    }
}

/// Handle returned by [`PlacesManager::subscribe`].
///
/// Dropping the handle does not unsubscribe; call
/// [`unsubscribe`](Subscription::unsubscribe).
pub struct Subscription {
    subscriber: Option<Arc<Subscriber>>,
    shared: Weak<Shared>,
}

impl Subscription {
    fn inert() -> Self {
        Self {
            subscriber: None,
            shared: Weak::new(),
        }
    }

    /// Stop deliveries to this callback. Safe to call any number of times.
    ///
    /// Queued snapshots are dropped. A callback already running on another
    /// thread is not interrupted.
    pub fn unsubscribe(&self) {
        let Some(subscriber) = &self.subscriber else {
            return;
        };
        if !subscriber.deactivate() {
            return;
        }
        if let Some(shared) = self.shared.upgrade() {
            shared.remove_subscriber(subscriber.id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.subscriber
            .as_ref()
            .is_some_and(|subscriber| subscriber.is_active())
    }
}

/// Places autocomplete state manager.
///
/// # Example
///
/// ```ignore
/// use places_autocomplete::{PlacesManager, PlacesOptions};
///
/// let manager = PlacesManager::create("api-key", None, PlacesOptions::default())?;
/// let subscription = manager.subscribe(|state| println!("{} results", state.predictions.len()));
/// manager.update_search_input("eiffel");
/// ```
pub struct PlacesManager {
    shared: Arc<Shared>,
    debouncer: Debouncer<String>,
}

impl fmt::Debug for PlacesManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlacesManager")
            .field("lookup", &self.shared.lookup.id())
            .finish_non_exhaustive()
    }
}

impl PlacesManager {
    /// Create a manager around an existing lookup.
    pub fn new(lookup: Arc<dyn PlaceLookup>, options: PlacesOptions) -> Self {
        let shared = Arc::new(Shared {
            lookup,
            state: Mutex::new(Versioned::default()),
            subscribers: Mutex::new(Vec::new()),
            next_subscriber_id: AtomicU64::new(1),
            destroyed: AtomicBool::new(false),
            enable_logging: options.enable_logging,
        });

        let weak = Arc::downgrade(&shared);
        let debouncer = Debouncer::new(options.debounce(), move |input: String| {
            let shared = weak.upgrade();
            async move {
                if let Some(shared) = shared {
                    shared.run_search(input).await;
                }
            }
        });

        shared.log(&format!(
            "Initialized with {} lookup, debounce {:?}",
            shared.lookup.id(),
            options.debounce()
        ));

        Self { shared, debouncer }
    }

    /// Create a manager from an API key or a ready-made lookup.
    ///
    /// `platform` defaults to [`Platform::detect`]. Fails on a missing API key
    /// or a platform with no strategy in this build.
    pub fn create(
        source: impl Into<LookupSource>,
        platform: Option<Platform>,
        options: PlacesOptions,
    ) -> Result<Self, PlacesError> {
        let lookup = resolve_lookup(source.into(), platform, &options)?;
        Ok(Self::new(lookup, options))
    }

    /// Feed new search text.
    ///
    /// Empty text clears the state immediately and drops any pending search.
    /// Anything else is debounced; only the last text within the delay is
    /// fetched. Failures surface through subscribed state only.
    pub fn update_search_input(&self, input: impl Into<String>) {
        if self.is_destroyed() {
            debug!("Ignoring search input on destroyed places manager");
            return;
        }

        let input = input.into();
        if input.is_empty() {
            self.debouncer.cancel();
            self.shared.replace_state(|state| {
                state.predictions.clear();
                state.is_loading = false;
                state.error = None;
            });
            return;
        }

        self.debouncer.call(input);
    }

    /// Fetch details for one place, bypassing the debounce.
    ///
    /// On failure the error is stored in the state (predictions and loading
    /// flag untouched) and the same error is returned.
    pub async fn get_place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        self.shared
            .log(&format!("Fetching place details for: {}", place_id));

        match self.shared.lookup.fetch_place_details(place_id).await {
            Ok(details) => Ok(details),
            Err(err) => {
                error!("Error fetching place details: {}", err);
                let stored = err.clone();
                self.shared.replace_state(move |state| state.error = Some(stored));
                Err(err)
            }
        }
    }

    /// Register `callback` for state changes.
    ///
    /// The callback is invoked right away with the current state, then on
    /// every later replacement until unsubscribed or the manager is destroyed.
    /// Registering the same closure twice creates two subscriptions.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&PlacesState) + Send + Sync + 'static,
    {
        if self.is_destroyed() {
            return Subscription::inert();
        }

        let id = self
            .shared
            .next_subscriber_id
            .fetch_add(1, Ordering::SeqCst);
        let subscriber = Arc::new(Subscriber::new(id, Arc::new(callback)));
        self.shared.lock_subscribers().push(Arc::clone(&subscriber));

        // Registered first, so a replacement racing this read is either
        // already in the snapshot or delivered after it.
        let (version, current) = self.shared.snapshot();
        subscriber.offer(version, &current);

        Subscription {
            subscriber: Some(subscriber),
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// Owned snapshot of the current state.
    pub fn get_state(&self) -> PlacesState {
        self.shared.lock_state().state.clone()
    }

    /// Cancel the pending search and drop every subscriber. Idempotent.
    ///
    /// A fetch that already started still completes, but nobody is notified.
    pub fn destroy(&self) {
        if self.shared.destroyed.swap(true, Ordering::SeqCst) {
            return;
        }

        self.debouncer.cancel();
        let removed = std::mem::take(&mut *self.shared.lock_subscribers());
        for subscriber in &removed {
            subscriber.deactivate();
        }
        self.shared.log("Destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.shared.destroyed.load(Ordering::SeqCst)
    }

    pub fn debounce_delay(&self) -> Duration {
        self.debouncer.delay()
    }

    /// Id of the lookup this manager delegates to.
    pub fn lookup_id(&self) -> &'static str {
        self.shared.lookup.id()
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.lock_subscribers().len()
    }
}

impl Drop for PlacesManager {
    fn drop(&mut self) {
        self.destroy();
    }
}
