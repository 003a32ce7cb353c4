//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;
use std::time::Duration;

use mockable::Clock;

use crate::domain::ports::{
    AccountRepository, AdminCommand, BlobStorage, BookmarkCommand, BookmarkQuery,
    BookmarkRepository, InterestCommand, InterestQuery, InterestRepository, ListingCommand,
    ListingQuery, ListingRepository, LoginService, NotificationInbox, NotificationRepository,
    PostingDrafter, ProfileCommand, TextGenerator, UserProfileRepository,
};
use crate::domain::{
    AccountService, AdminService, BookmarkService, DEFAULT_POLL_INTERVAL, DraftingService,
    InterestService, ListingService, NotificationService, ProfileService,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub listings: Arc<dyn ListingCommand>,
    pub listings_query: Arc<dyn ListingQuery>,
    pub interests: Arc<dyn InterestCommand>,
    pub interests_query: Arc<dyn InterestQuery>,
    pub bookmarks: Arc<dyn BookmarkCommand>,
    pub bookmarks_query: Arc<dyn BookmarkQuery>,
    pub inbox: Arc<dyn NotificationInbox>,
    pub profiles: Arc<dyn ProfileCommand>,
    pub admin: Arc<dyn AdminCommand>,
    pub drafter: Arc<dyn PostingDrafter>,
}

/// Driven adapters from which the domain services are assembled.
pub struct Adapters<L, I, B, N, P, A, S, T> {
    pub listings: Arc<L>,
    pub interests: Arc<I>,
    pub bookmarks: Arc<B>,
    pub notifications: Arc<N>,
    pub profiles: Arc<P>,
    pub accounts: Arc<A>,
    pub blobs: Arc<S>,
    pub generator: Arc<T>,
}

impl HttpStatePorts {
    /// Wire every domain service over one set of driven adapters.
    ///
    /// The server passes either the Diesel repositories or a single
    /// in-memory store for all six repository slots.
    pub fn from_adapters<L, I, B, N, P, A, S, T>(
        adapters: Adapters<L, I, B, N, P, A, S, T>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        L: ListingRepository + 'static,
        I: InterestRepository + 'static,
        B: BookmarkRepository + 'static,
        N: NotificationRepository + 'static,
        P: UserProfileRepository + 'static,
        A: AccountRepository + 'static,
        S: BlobStorage + 'static,
        T: TextGenerator + 'static,
    {
        let Adapters {
            listings,
            interests,
            bookmarks,
            notifications,
            profiles,
            accounts,
            blobs,
            generator,
        } = adapters;

        let listing_service = Arc::new(ListingService::new(
            Arc::clone(&listings),
            Arc::clone(&interests),
            Arc::clone(&profiles),
            Arc::clone(&clock),
        ));
        let interest_service = Arc::new(InterestService::new(
            interests,
            Arc::clone(&listings),
            NotificationService::new(Arc::clone(&notifications), Arc::clone(&clock)),
            Arc::clone(&clock),
        ));
        let bookmark_service = Arc::new(BookmarkService::new(
            bookmarks,
            Arc::clone(&listings),
            Arc::clone(&clock),
        ));

        Self {
            login: Arc::new(AccountService::new(accounts, Arc::clone(&clock))),
            listings: listing_service.clone(),
            listings_query: listing_service,
            interests: interest_service.clone(),
            interests_query: interest_service,
            bookmarks: bookmark_service.clone(),
            bookmarks_query: bookmark_service,
            inbox: Arc::new(NotificationService::new(notifications, Arc::clone(&clock))),
            profiles: Arc::new(ProfileService::new(
                Arc::clone(&profiles),
                blobs,
                Arc::clone(&clock),
            )),
            admin: Arc::new(AdminService::new(listings, profiles, clock)),
            drafter: Arc::new(DraftingService::new(generator)),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub listings: Arc<dyn ListingCommand>,
    pub listings_query: Arc<dyn ListingQuery>,
    pub interests: Arc<dyn InterestCommand>,
    pub interests_query: Arc<dyn InterestQuery>,
    pub bookmarks: Arc<dyn BookmarkCommand>,
    pub bookmarks_query: Arc<dyn BookmarkQuery>,
    pub inbox: Arc<dyn NotificationInbox>,
    pub profiles: Arc<dyn ProfileCommand>,
    pub admin: Arc<dyn AdminCommand>,
    pub drafter: Arc<dyn PostingDrafter>,
    /// Cadence clients should use when polling the inbox.
    pub poll_interval: Duration,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle with the default poll interval.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            listings,
            listings_query,
            interests,
            interests_query,
            bookmarks,
            bookmarks_query,
            inbox,
            profiles,
            admin,
            drafter,
        } = ports;
        Self {
            login,
            listings,
            listings_query,
            interests,
            interests_query,
            bookmarks,
            bookmarks_query,
            inbox,
            profiles,
            admin,
            drafter,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the advertised inbox poll interval.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}
