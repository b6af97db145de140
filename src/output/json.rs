//! JSON output formatter

use crate::context::ContextAggregator;
use crate::models::{CertificateRecord, ContextId};
use serde::Serialize;

/// Flagged certificates of one context, for JSON output
#[derive(Serialize)]
pub struct ContextReport {
    pub context: ContextId,
    pub count: usize,
    pub certificates: Vec<CertificateRecord>,
}

/// Collect every tracked context, records ordered by expiry
pub fn context_reports(contexts: &ContextAggregator) -> Vec<ContextReport> {
    contexts
        .contexts()
        .into_iter()
        .map(|context| {
            let mut certificates: Vec<CertificateRecord> =
                contexts.records(context).into_values().collect();
            certificates.sort_by(|a, b| {
                a.validity_end
                    .cmp(&b.validity_end)
                    .then_with(|| a.fingerprint.cmp(&b.fingerprint))
            });
            ContextReport {
                context,
                count: certificates.len(),
                certificates,
            }
        })
        .collect()
}

/// Print any serializable value as pretty JSON to stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as a single JSON line
pub fn print_json_line<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
