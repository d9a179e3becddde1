use anyhow::Context;
use anyhow::Result;
use meal_catalog::Catalog;
use meal_engine::EngineConfig;
use meal_engine::MealEngine;
use meal_engine::QueryIntent;
use meal_engine::SortSpec;
use meal_engine::ViewState;
use std::io::Write;
use std::time::Duration;
use tokio::io::AsyncBufRead;
use tokio::io::AsyncBufReadExt;
use tracing::debug;

use crate::render;

/// Extra wait after end of input for the last query to land
const DRAIN_GRACE: Duration = Duration::from_secs(1);

pub struct WatchOptions {
    pub sort: SortSpec,
    /// Load the default sample before any input arrives
    pub initial: bool,
}

/// Feed each input line to a query controller and print every view update
/// it applies. Returns once input ends and the last query has settled.
pub async fn watch_lines<C, R, W>(
    engine: &MealEngine<C>,
    input: R,
    out: &mut W,
    options: WatchOptions,
) -> Result<()>
where
    C: Catalog + 'static,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut controller = engine.controller();
    let mut view = controller.subscribe();
    let mut lines = input.lines();
    let mut printed = 0;
    let mut expected = 0;

    if options.initial {
        expected = controller.flush(QueryIntent::Default);
    }

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("failed to read query input")? {
                    Some(line) => expected = controller.submit(QueryIntent::text(line)),
                    None => break,
                }
            }
            changed = view.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = view.borrow_and_update().clone();
                printed = print_if_new(out, &state, printed, options.sort)?;
            }
        }
    }

    if expected == 0 {
        return Ok(());
    }

    let settled = tokio::time::timeout(drain_deadline(engine.config()), async {
        loop {
            let state = view.borrow_and_update().clone();
            printed = print_if_new(out, &state, printed, options.sort)?;
            if state.seq >= expected || view.changed().await.is_err() {
                return anyhow::Ok(());
            }
        }
    })
    .await;

    match settled {
        Ok(result) => result,
        Err(_) => {
            debug!(expected, "input ended before the last query settled");
            Ok(())
        }
    }
}

/// Longest a just-submitted query can take to land: the quiet period plus
/// one request timeout per sequential upstream round.
fn drain_deadline(config: &EngineConfig) -> Duration {
    let rounds = config.default_sample.sequential_rounds();
    config.debounce() + config.catalog.request_timeout() * rounds + DRAIN_GRACE
}

fn print_if_new<W: Write>(
    out: &mut W,
    state: &ViewState,
    printed: u64,
    sort: SortSpec,
) -> Result<u64> {
    if state.seq <= printed {
        return Ok(printed);
    }
    let label = match &state.intent {
        Some(QueryIntent::FreeText(text)) if !text.trim().is_empty() => {
            format!("\"{}\"", text.trim())
        }
        Some(QueryIntent::FacetFilter(_)) => "facets".to_string(),
        _ => "(default sample)".to_string(),
    };
    let sorted = meal_engine::apply(state.results.as_slice(), sort);
    write!(out, "#{} {label}\n{}", state.seq, render::meal_table(&sorted))
        .context("failed to write results")?;
    out.flush().context("failed to write results")?;
    Ok(state.seq)
}
