//! The connection-chain gesture state machine.
//!
//! One builder instance serves one interaction session. A chain can only be
//! started once a product-type context has been armed, grows tooth by tooth
//! while the pointer drags across adjacent positions, and is emitted as a
//! [`ConnectionChain`] on release. Anything else (short chains, releases
//! outside the chart, cancellation) discards the draft with no effect.

use tracing::debug;

use resto_model::{ConnectionChain, Position, ProductType, is_adjacent, is_contiguous_chain};

use crate::layout::{ChartLayout, ChartPoint};

/// Default pointer proximity radius in logical pixels.
pub const DEFAULT_PROXIMITY_RADIUS: f32 = 20.0;

/// Observable state of the gesture machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainState {
    Idle,
    /// A pointer went down on `origin`; no extension has happened yet.
    Started { origin: Position },
    /// At least one extension succeeded.
    Extending { chain: Vec<Position> },
}

/// Builds one validated chain per drag gesture.
#[derive(Debug)]
pub struct ChainBuilder {
    layout: ChartLayout,
    radius: f32,
    product_type: Option<ProductType>,
    state: ChainState,
}

impl ChainBuilder {
    pub fn new(layout: ChartLayout) -> Self {
        Self {
            layout,
            radius: DEFAULT_PROXIMITY_RADIUS,
            product_type: None,
            state: ChainState::Idle,
        }
    }

    /// Override the proximity radius.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Arm the builder with the product-type context chosen upstream.
    /// Pointer-downs are ignored until this has been called.
    pub fn arm(&mut self, product_type: ProductType) {
        self.product_type = Some(product_type);
    }

    /// Drop the context and any in-progress draft.
    pub fn disarm(&mut self) {
        self.product_type = None;
        self.state = ChainState::Idle;
    }

    pub fn state(&self) -> &ChainState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == ChainState::Idle
    }

    /// Positions currently in the draft, in order.
    pub fn draft(&self) -> Vec<Position> {
        match &self.state {
            ChainState::Idle => Vec::new(),
            ChainState::Started { origin } => vec![*origin],
            ChainState::Extending { chain } => chain.clone(),
        }
    }

    /// Pointer/touch-down. Starts a chain when armed and the point lands on
    /// a position; ignored otherwise.
    pub fn pointer_down(&mut self, point: ChartPoint) {
        if self.product_type.is_none() {
            return;
        }
        if !self.is_idle() {
            // A second contact during a drag is ignored; one chain at a time.
            return;
        }
        if let Some(origin) = self.layout.hit_test(point, self.radius) {
            debug!(%origin, "chain started");
            self.state = ChainState::Started { origin };
        }
    }

    /// Pointer/touch-move. Appends the nearest not-yet-included position
    /// when it is adjacent to the chain tail; non-adjacent nearby positions
    /// are ignored without error.
    pub fn pointer_move(&mut self, point: ChartPoint) {
        let draft = match &self.state {
            ChainState::Idle => return,
            ChainState::Started { origin } => vec![*origin],
            ChainState::Extending { chain } => chain.clone(),
        };
        let candidate =
            self.layout
                .nearest_within(point, self.radius, |p| draft.contains(&p));
        let (Some(candidate), Some(&tail)) = (candidate, draft.last()) else {
            return;
        };
        let extends = is_adjacent(tail, candidate)
            || (draft.len() == 1 && is_adjacent(draft[0], candidate));
        if !extends {
            return;
        }
        let mut chain = draft;
        chain.push(candidate);
        debug!(%candidate, length = chain.len(), "chain extended");
        self.state = ChainState::Extending { chain };
    }

    /// Pointer/touch-up. Releases outside every position abort the draft;
    /// otherwise a chain of two or more positions is re-validated pair by
    /// pair and emitted. Short or invalid chains are discarded silently.
    pub fn pointer_up(&mut self, point: ChartPoint) -> Option<ConnectionChain> {
        let state = std::mem::replace(&mut self.state, ChainState::Idle);
        let chain = match state {
            ChainState::Idle => return None,
            ChainState::Started { .. } => {
                debug!("chain discarded: single position");
                return None;
            }
            ChainState::Extending { chain } => chain,
        };
        if self.layout.hit_test(point, self.radius).is_none() {
            debug!("chain aborted: released outside the chart");
            return None;
        }
        if chain.len() < 2 {
            return None;
        }
        // Appends only ever add adjacent teeth; re-check anyway before
        // anything downstream trusts the chain.
        if !is_contiguous_chain(&chain) {
            debug!("chain discarded: adjacency re-check failed");
            return None;
        }
        let product_type = self.product_type?;
        debug!(length = chain.len(), "chain completed");
        Some(ConnectionChain::new(chain, product_type))
    }

    /// Explicit cancellation. Always safe; no partial state survives.
    pub fn cancel(&mut self) {
        if !self.is_idle() {
            debug!("chain aborted");
        }
        self.state = ChainState::Idle;
    }
}
