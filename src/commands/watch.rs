//! Watch command implementation

use anyhow::{Context, Result};
use cert_expiry_watch::cli::WatchArgs;
use cert_expiry_watch::clock::SystemClock;
use cert_expiry_watch::config::Settings;
use cert_expiry_watch::models::ObservationEvent;
use cert_expiry_watch::notify::TerminalBadge;
use cert_expiry_watch::output::{
    context_reports, print_context_records, print_error, print_info, print_json_line,
    print_warning,
};
use cert_expiry_watch::policy::PolicyStore;
use cert_expiry_watch::runner::{ExpiryWatcher, Outcome};
use cert_expiry_watch::store::KeyValueStore;
use chrono::Utc;
use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Run the watch command
pub async fn run_watch<S: KeyValueStore>(
    mut policy: PolicyStore<S>,
    settings: &Settings,
    args: &WatchArgs,
    json: bool,
) -> Result<()> {
    if settings.policy.seed_default {
        match policy.seed_default() {
            Ok(true) => tracing::info!("Seeded global default threshold"),
            Ok(false) => {}
            Err(e) => tracing::warn!("Could not seed global default threshold: {}", e),
        }
    }

    let sink = if json {
        TerminalBadge::quiet()
    } else {
        TerminalBadge::new()
    };
    let mut watcher =
        ExpiryWatcher::new(policy, sink, SystemClock).with_https_only(settings.watch.https_only);

    match &args.input {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open {}", path.display()))?;
            process_events(&mut watcher, BufReader::new(file), json).await?;
        }
        None => {
            process_events(&mut watcher, BufReader::new(tokio::io::stdin()), json).await?;
        }
    }

    let contexts = watcher.contexts();
    if json {
        print_json_line(&json!({ "contexts": context_reports(contexts) }))?;
    } else if contexts.is_empty() {
        print_info("No expiring certificates observed");
    } else {
        let now = Utc::now();
        for context in contexts.contexts() {
            print_context_records(context, &contexts.records(context), now);
        }
    }

    Ok(())
}

/// Feed every line of `reader` through the watcher, one event at a time
async fn process_events<S, R>(
    watcher: &mut ExpiryWatcher<S, TerminalBadge, SystemClock>,
    reader: R,
    json: bool,
) -> Result<()>
where
    S: KeyValueStore,
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let event = match ObservationEvent::from_json_line(line) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("Skipping line {}: {}", line_no, e);
                if !json {
                    print_error(&format!("line {}: {}", line_no, e));
                }
                continue;
            }
        };

        match watcher.handle(event) {
            Ok(outcome) => {
                if json {
                    print_json_line(&outcome)?;
                } else if let Outcome::Reset { context } = outcome {
                    print_info(&format!("Context {} reset", context));
                }
            }
            Err(e) => {
                tracing::warn!("Skipping line {}: {}", line_no, e);
                if !json {
                    print_warning(&format!("line {}: {}", line_no, e));
                }
            }
        }
    }

    Ok(())
}
