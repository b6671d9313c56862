use crate::core::catalog::descriptor;
use crate::core::classifier::classify;
use crate::core::dispatcher::{dispatch, RenderInstruction};
use crate::core::metadata::MetadataBuilder;
use crate::domain::model::{ContentEntity, PageMetadata, QueryDescriptor, Route, RouteDecision};
use crate::domain::ports::{ConfigProvider, ContentFetcher};
use crate::utils::error::PageError;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Where a route's content fetch stands.
#[derive(Debug)]
pub enum FetchState {
    Pending,
    /// `None` means the collection had no entry for the slug.
    Settled(Option<ContentEntity>),
    Failed(PageError),
}

/// Marks which navigation a fetch was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteTicket {
    generation: u64,
}

/// Tracks the current route; every `begin` supersedes all earlier tickets.
#[derive(Debug, Default)]
pub struct RouteTracker {
    generation: AtomicU64,
}

impl RouteTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> RouteTicket {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        RouteTicket { generation }
    }

    pub fn is_current(&self, ticket: &RouteTicket) -> bool {
        self.generation.load(Ordering::Acquire) == ticket.generation
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub route: Route,
    pub decision: RouteDecision,
    pub metadata: Option<PageMetadata>,
    pub instruction: RenderInstruction,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    Rendered(PageView),
    /// The route changed while the fetch was in flight.
    Discarded { route: Route },
}

impl RenderOutcome {
    pub fn view(&self) -> Option<&PageView> {
        match self {
            RenderOutcome::Rendered(view) => Some(view),
            RenderOutcome::Discarded { .. } => None,
        }
    }

    pub fn into_view(self) -> Option<PageView> {
        match self {
            RenderOutcome::Rendered(view) => Some(view),
            RenderOutcome::Discarded { .. } => None,
        }
    }
}

/// A classified route whose fetch has not settled yet.
#[derive(Debug, Clone)]
pub struct PendingRender {
    ticket: RouteTicket,
    route: Route,
    decision: RouteDecision,
    query: &'static QueryDescriptor,
}

impl PendingRender {
    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn decision(&self) -> &RouteDecision {
        &self.decision
    }

    pub fn query(&self) -> &'static QueryDescriptor {
        self.query
    }

    pub fn loading_view(&self) -> PageView {
        PageView {
            route: self.route.clone(),
            decision: self.decision.clone(),
            metadata: None,
            instruction: RenderInstruction::loading(self.decision.template),
        }
    }
}

pub struct PageRenderer<F: ContentFetcher> {
    fetcher: F,
    metadata: MetadataBuilder,
    tracker: RouteTracker,
}

impl<F: ContentFetcher> PageRenderer<F> {
    pub fn new(fetcher: F, metadata: MetadataBuilder) -> Self {
        Self {
            fetcher,
            metadata,
            tracker: RouteTracker::new(),
        }
    }

    pub fn from_config<C: ConfigProvider>(fetcher: F, config: &C) -> Self {
        Self::new(fetcher, MetadataBuilder::new(config.site_name()))
    }

    /// Classify `route` and make it the current one.
    pub fn begin(&self, route: Route) -> PendingRender {
        let decision = classify(&route);
        let query = descriptor(decision.query);
        let ticket = self.tracker.begin();

        tracing::debug!(
            "🧭 Route {:?} (category {:?}) -> {:?} template, {} query",
            route.slug,
            route.category,
            decision.template,
            query.collection
        );

        PendingRender {
            ticket,
            route,
            decision,
            query,
        }
    }

    /// Await the fetch for `pending` and render it, unless a newer route
    /// became current in the meantime.
    pub async fn complete(&self, pending: PendingRender) -> RenderOutcome {
        let result = self.fetcher.fetch(pending.query, &pending.route.slug).await;

        if !self.tracker.is_current(&pending.ticket) {
            tracing::debug!("Discarding stale fetch for route {:?}", pending.route.slug);
            return RenderOutcome::Discarded { route: pending.route };
        }

        let state = match result {
            Ok(entity) => FetchState::Settled(entity),
            Err(e) => FetchState::Failed(e),
        };

        RenderOutcome::Rendered(self.view(pending.route, pending.decision, state))
    }

    pub async fn render(&self, route: Route) -> RenderOutcome {
        let pending = self.begin(route);
        self.complete(pending).await
    }

    /// Build the view for a fetch in any state.
    pub fn view(&self, route: Route, decision: RouteDecision, state: FetchState) -> PageView {
        let (metadata, instruction) = match state {
            FetchState::Pending => (None, RenderInstruction::loading(decision.template)),
            FetchState::Settled(None) => {
                tracing::info!("🔍 No content for slug {:?}", route.slug);
                (None, RenderInstruction::not_found())
            }
            FetchState::Settled(Some(entity)) => {
                let metadata = self.metadata.build(&entity, &decision, &route);
                let instruction = dispatch(&decision, &metadata, &entity);
                (Some(metadata), instruction)
            }
            FetchState::Failed(e) => {
                tracing::error!(
                    "❌ Loading {:?} failed: {} (Category: {:?}, Severity: {:?})",
                    route.slug,
                    e,
                    e.category(),
                    e.severity()
                );
                (None, RenderInstruction::load_error())
            }
        };

        PageView {
            route,
            decision,
            metadata,
            instruction,
        }
    }
}
