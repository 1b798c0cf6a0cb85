//! Interactive widget: one event loop, one query in flight at a time.
//!
//! Input lines and query results arrive as [`Event`]s on a single channel and
//! are applied to the [`Session`] in arrival order. Rendering happens after
//! every state change.

use std::{io::Write, sync::Arc};

use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader},
    sync::mpsc::{UnboundedReceiver, UnboundedSender},
};
use tracing::{debug, warn};
use weatherview_core::{QueryError, QueryState, Session, Ticket, WeatherProvider, WeatherView};

use crate::view;

#[derive(Debug)]
pub enum Event {
    /// User pressed Enter on a line.
    Submit(String),
    /// A query finished.
    Resolved(Ticket, Result<WeatherView, QueryError>),
    /// No more input will arrive.
    InputClosed,
}

/// Forward stdin lines as [`Event::Submit`] until end of input.
pub fn spawn_stdin_reader(tx: UnboundedSender<Event>) {
    tokio::spawn(read_lines(BufReader::new(tokio::io::stdin()), tx));
}

/// Forward each line of `reader` as [`Event::Submit`], then send
/// [`Event::InputClosed`].
///
/// Lines are forwarded as typed, minus the line terminator. Bytes that are
/// not UTF-8 are replaced rather than ending input.
pub async fn read_lines<R>(mut reader: R, tx: UnboundedSender<Event>)
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = strip_terminator(&buf);
                let line = match std::str::from_utf8(line) {
                    Ok(text) => text.to_string(),
                    Err(e) => {
                        warn!(error = %e, "input line is not valid UTF-8");
                        String::from_utf8_lossy(line).into_owned()
                    }
                };

                if tx.send(Event::Submit(line)).is_err() {
                    return;
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to read input");
                break;
            }
        }
    }

    let _ = tx.send(Event::InputClosed);
}

fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn spawn_query(provider: &Arc<dyn WeatherProvider>, ticket: Ticket, tx: &UnboundedSender<Event>) {
    let provider = Arc::clone(provider);
    let tx = tx.clone();

    tokio::spawn(async move {
        let result = provider.current_weather(&ticket.city).await;
        let _ = tx.send(Event::Resolved(ticket, result));
    });
}

fn draw(out: &mut impl Write, session: &Session) -> anyhow::Result<()> {
    write!(out, "\n{}", view::render(session.state()))?;
    if !session.is_loading() {
        write!(out, "\n{}", view::PROMPT)?;
    }
    out.flush()?;
    Ok(())
}

/// Run the widget until input is closed and no query is pending.
///
/// The first query, for `default_city`, is issued before any event is read.
/// Returns the state on screen at exit.
pub async fn run(
    provider: Arc<dyn WeatherProvider>,
    default_city: String,
    tx: UnboundedSender<Event>,
    mut rx: UnboundedReceiver<Event>,
    out: &mut impl Write,
) -> anyhow::Result<QueryState> {
    writeln!(out, "{}", view::HEADING)?;

    let (mut session, ticket) = Session::start(default_city);
    spawn_query(&provider, ticket, &tx);
    draw(out, &session)?;

    let mut input_open = true;

    while let Some(event) = rx.recv().await {
        match event {
            Event::Submit(city) => match session.trigger(city.clone()) {
                Ok(ticket) => {
                    spawn_query(&provider, ticket, &tx);
                    draw(out, &session)?;
                }
                Err(busy) => {
                    debug!(%busy, ignored = %city, "trigger ignored while loading");
                    writeln!(out, "{busy}; ignored '{city}'.")?;
                }
            },
            Event::Resolved(ticket, result) => {
                if session.resolve(&ticket, result) {
                    draw(out, &session)?;
                } else {
                    debug!(seq = ticket.seq, city = %ticket.city, "dropping stale result");
                }
            }
            Event::InputClosed => input_open = false,
        }

        if !input_open && !session.is_loading() {
            break;
        }
    }

    writeln!(out)?;
    Ok(session.state().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeProvider, view};
    use tokio::sync::mpsc;

    async fn run_with(
        provider: Arc<FakeProvider>,
        default_city: &str,
        events: Vec<Event>,
    ) -> (QueryState, String) {
        let (tx, rx) = mpsc::unbounded_channel();
        for event in events {
            tx.send(event).unwrap();
        }

        let mut out = Vec::new();
        let state = run(provider, default_city.to_string(), tx, rx, &mut out).await.unwrap();
        (state, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn startup_queries_default_city() {
        let provider = Arc::new(FakeProvider::default());

        let (state, out) =
            run_with(provider.clone(), "palakkad", vec![Event::InputClosed]).await;

        assert_eq!(state, QueryState::Showing(view("palakkad")));
        assert_eq!(provider.calls(), ["palakkad"]);
        assert!(out.starts_with("Weather Details\n"));
        assert!(out.contains("Loading..."));
        assert!(out.contains("Local Time: 12:00"));
    }

    #[tokio::test]
    async fn failed_query_shows_error() {
        let provider = Arc::new(FakeProvider::default());

        let (state, out) = run_with(provider, "Atlantis", vec![Event::InputClosed]).await;

        assert!(matches!(state, QueryState::ShowingError(QueryError::NotFound { .. })));
        assert!(out.contains("City not found. Please try again."));
        assert!(!out.contains("Local Time"));
    }

    #[tokio::test]
    async fn submit_while_loading_is_ignored() {
        let provider = Arc::new(FakeProvider::default());

        // CityB is queued before CityA can resolve.
        let (state, out) = run_with(
            provider.clone(),
            "CityA",
            vec![Event::Submit("CityB".into()), Event::InputClosed],
        )
        .await;

        assert_eq!(state, QueryState::Showing(view("CityA")));
        assert_eq!(provider.calls(), ["CityA"]);
        assert!(out.contains("A query for 'CityA' is still loading; ignored 'CityB'."));
    }

    #[tokio::test]
    async fn stale_resolution_is_dropped() {
        let provider = Arc::new(FakeProvider::default());
        let stale = Ticket { seq: 42, city: "Elsewhere".into() };

        let (state, _) = run_with(
            provider,
            "CityA",
            vec![Event::Resolved(stale, Ok(view("Elsewhere"))), Event::InputClosed],
        )
        .await;

        assert_eq!(state, QueryState::Showing(view("CityA")));
    }

    /// Lines sent by the reader, plus whether input was reported closed.
    async fn read_all(input: &'static [u8]) -> (Vec<String>, bool) {
        let (tx, mut rx) = mpsc::unbounded_channel();
        read_lines(input, tx).await;

        let mut lines = Vec::new();
        let mut closed = false;
        while let Ok(event) = rx.try_recv() {
            match event {
                Event::Submit(line) => lines.push(line),
                Event::InputClosed => closed = true,
                Event::Resolved(..) => panic!("reader sent a query result"),
            }
        }
        (lines, closed)
    }

    #[tokio::test]
    async fn invalid_utf8_line_does_not_end_input() {
        let (lines, closed) = read_all(b"\xff\xfe\nOslo\nBergen\n").await;

        assert_eq!(lines, ["\u{FFFD}\u{FFFD}", "Oslo", "Bergen"]);
        assert!(closed);
    }

    #[tokio::test]
    async fn reader_strips_terminators_and_keeps_empty_lines() {
        let (lines, closed) = read_all(b"S\xc3\xa3o Paulo\r\n\n  Oslo ").await;

        assert_eq!(lines, ["São Paulo", "", "  Oslo "]);
        assert!(closed);
    }

    #[tokio::test]
    async fn empty_input_only_closes() {
        let (lines, closed) = read_all(b"").await;

        assert!(lines.is_empty());
        assert!(closed);
    }
}
