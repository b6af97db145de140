//! Rich terminal output formatting

use super::tables::print_table;
use crate::context::ContextRecordSet;
use crate::models::{
    ContextId, ObservedCertificate, Resolution, ThresholdPolicy, FALLBACK_THRESHOLD,
};
use chrono::{DateTime, Local, Utc};
use console::style;

/// Print section header
pub fn print_header(title: &str) {
    println!();
    println!("{}", style(format!("━━━ {} ━━━", title)).cyan().bold());
    println!();
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}

/// Print the global default and every override
pub fn print_policy(policy: &ThresholdPolicy) {
    print_header("Warning Thresholds");

    match policy.global_default {
        Some(threshold) => println!("  Global default: {}", style(threshold).bold()),
        None => println!(
            "  Global default: {} (falls back to {})",
            style("not set").yellow(),
            FALLBACK_THRESHOLD
        ),
    }
    println!();

    if policy.overrides.is_empty() {
        println!("  No domain overrides configured");
        return;
    }

    let rows: Vec<Vec<String>> = policy
        .overrides
        .iter()
        .map(|(domain, threshold)| vec![domain.clone(), threshold.to_string()])
        .collect();
    print_table(&["Domain", "Show if expiring in"], &rows);
}

/// Print the effective threshold of a host
pub fn print_resolution(host: &str, resolution: &Resolution) {
    println!(
        "  {} {} ({})",
        style(host).bold(),
        style(resolution.threshold).cyan().bold(),
        resolution.source
    );
}

/// Print the flagged certificates of one context
pub fn print_context_records(context: ContextId, records: &ContextRecordSet, now: DateTime<Utc>) {
    print_header(&format!("Context {}", context));

    if records.is_empty() {
        println!("  No expiring certificates");
        return;
    }

    let mut sorted: Vec<_> = records.values().collect();
    sorted.sort_by(|a, b| a.validity_end.cmp(&b.validity_end));

    let rows: Vec<Vec<String>> = sorted
        .iter()
        .map(|record| {
            vec![
                record.issuer.clone(),
                record.subject.clone(),
                format_time(record.validity_end),
                format_expiry_days(record.days_until_expiry(now)),
                record.last_url.clone(),
                format_time(record.last_seen),
            ]
        })
        .collect();
    print_table(
        &["Issuer", "Subject", "Expires", "Remaining", "Last URL", "Last Seen"],
        &rows,
    );
}

/// Print certificates from a file with their flag state
pub fn print_certificate_check(
    certs: &[(ObservedCertificate, bool)],
    resolution: &Resolution,
    now: DateTime<Utc>,
) {
    print_header("Certificate Expiry");
    println!(
        "  Threshold: {} ({})\n",
        style(resolution.threshold).bold(),
        resolution.source
    );

    let rows: Vec<Vec<String>> = certs
        .iter()
        .map(|(cert, flagged)| {
            let status = if *flagged {
                "✗ Expiring".to_string()
            } else {
                "✓ OK".to_string()
            };
            let days = cert.validity_end.signed_duration_since(now).num_days();
            vec![
                status,
                cert.subject.clone(),
                format_time(cert.validity_end),
                format_expiry_days(days),
                short_fingerprint(&cert.fingerprint),
            ]
        })
        .collect();
    print_table(
        &["Status", "Subject", "Expires", "Remaining", "SHA-256"],
        &rows,
    );
}

fn format_time(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

fn format_expiry_days(days: i64) -> String {
    if days < 0 {
        style(format!("Expired {} days ago", days.abs()))
            .red()
            .to_string()
    } else if days == 0 {
        style("Expires today!").red().bold().to_string()
    } else if days <= 7 {
        style(format!("{} days (critical)", days))
            .red()
            .bold()
            .to_string()
    } else {
        style(format!("{} days", days)).yellow().to_string()
    }
}

fn short_fingerprint(fingerprint: &str) -> String {
    if fingerprint.chars().count() <= 16 {
        return fingerprint.to_string();
    }
    format!("{}…", fingerprint.chars().take(16).collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_fingerprint() {
        assert_eq!(short_fingerprint("abc"), "abc");
        assert_eq!(
            short_fingerprint("a2287ce17d363bfb4c581b276181aaa0"),
            "a2287ce17d363bfb…"
        );
    }

    #[test]
    fn test_format_expiry_days_text() {
        console::set_colors_enabled(false);
        assert_eq!(format_expiry_days(-3), "Expired 3 days ago");
        assert_eq!(format_expiry_days(0), "Expires today!");
        assert_eq!(format_expiry_days(5), "5 days (critical)");
        assert_eq!(format_expiry_days(20), "20 days");
    }
}
