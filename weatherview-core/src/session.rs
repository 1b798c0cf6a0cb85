//! What the widget is showing, and which query is allowed to change it.
//!
//! At most one query is in flight. A trigger that arrives while one is
//! pending is rejected with [`Busy`]; the pending query's result is the
//! only one that can be applied.

use thiserror::Error;

use crate::{QueryError, WeatherView};

#[derive(Debug, Clone, PartialEq)]
pub enum QueryState {
    Loading,
    Showing(WeatherView),
    ShowingError(QueryError),
}

/// Handle for one issued query, returned by [`Session::start`] and
/// [`Session::trigger`] and handed back to [`Session::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub seq: u64,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("A query for '{pending}' is still loading")]
pub struct Busy {
    pub pending: String,
}

#[derive(Debug)]
pub struct Session {
    state: QueryState,
    in_flight: Option<Ticket>,
    next_seq: u64,
}

impl Session {
    /// Start in `Loading` with the first query already issued.
    pub fn start(default_city: impl Into<String>) -> (Self, Ticket) {
        let ticket = Ticket { seq: 0, city: default_city.into() };
        let session = Self {
            state: QueryState::Loading,
            in_flight: Some(ticket.clone()),
            next_seq: 1,
        };
        (session, ticket)
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn pending_city(&self) -> Option<&str> {
        self.in_flight.as_ref().map(|t| t.city.as_str())
    }

    /// Issue a query for `city`, unless one is already in flight.
    pub fn trigger(&mut self, city: impl Into<String>) -> Result<Ticket, Busy> {
        if let Some(pending) = &self.in_flight {
            return Err(Busy { pending: pending.city.clone() });
        }

        let ticket = Ticket { seq: self.next_seq, city: city.into() };
        self.next_seq += 1;
        self.in_flight = Some(ticket.clone());
        self.state = QueryState::Loading;

        Ok(ticket)
    }

    /// Apply the outcome of the in-flight query.
    ///
    /// Returns `false` and leaves the state alone if `ticket` is not the one
    /// in flight.
    pub fn resolve(&mut self, ticket: &Ticket, result: Result<WeatherView, QueryError>) -> bool {
        if self.in_flight.as_ref() != Some(ticket) {
            return false;
        }

        self.in_flight = None;
        self.state = match result {
            Ok(view) => QueryState::Showing(view),
            Err(err) => QueryState::ShowingError(err),
        };
        true
    }
}
