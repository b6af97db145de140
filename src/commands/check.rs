//! Check command implementation

use anyhow::Result;
use cert_expiry_watch::checks::{read_certificates, ExpiryChecker};
use cert_expiry_watch::cli::CheckArgs;
use cert_expiry_watch::clock::{Clock, SystemClock};
use cert_expiry_watch::models::{ObservedCertificate, Resolution, Threshold, ThresholdSource};
use cert_expiry_watch::output::{print_certificate_check, print_json};
use cert_expiry_watch::policy::{PolicyStore, ThresholdResolver};
use cert_expiry_watch::store::KeyValueStore;
use chrono::Utc;
use serde::Serialize;

#[derive(Serialize)]
struct CheckedCertificate {
    #[serde(flatten)]
    certificate: ObservedCertificate,
    expiring: bool,
}

#[derive(Serialize)]
struct CheckOutput {
    resolution: Resolution,
    certificates: Vec<CheckedCertificate>,
}

/// Run the check command
pub fn run_check<S: KeyValueStore>(
    policy: &PolicyStore<S>,
    args: &CheckArgs,
    json: bool,
) -> Result<()> {
    let resolver = ThresholdResolver::new(policy);
    let resolution = match (&args.days, &args.host) {
        (Some(days), _) => Resolution {
            threshold: days.parse::<Threshold>()?,
            source: ThresholdSource::Explicit,
        },
        (None, Some(host)) => resolver.resolve(host),
        (None, None) => resolver.resolve_default(),
    };

    let certs = read_certificates(&args.file)?;
    let now = SystemClock.now();
    let checker = ExpiryChecker::new(resolution.threshold);
    let checked: Vec<(ObservedCertificate, bool)> = certs
        .into_iter()
        .map(|cert| {
            let flagged = checker.is_flagged(&cert, &now);
            (cert, flagged)
        })
        .collect();

    if json {
        let output = CheckOutput {
            resolution,
            certificates: checked
                .into_iter()
                .map(|(certificate, expiring)| CheckedCertificate {
                    certificate,
                    expiring,
                })
                .collect(),
        };
        print_json(&output)?;
    } else {
        print_certificate_check(&checked, &resolution, now.with_timezone(&Utc));
    }

    Ok(())
}
