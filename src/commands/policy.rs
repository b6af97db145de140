//! Policy commands: default threshold, overrides, resolution

use anyhow::Result;
use cert_expiry_watch::cli::{DefaultAction, OverrideAction};
use cert_expiry_watch::output::{print_json, print_policy, print_resolution, print_success};
use cert_expiry_watch::policy::{PolicyStore, ThresholdResolver};
use cert_expiry_watch::store::KeyValueStore;
use console::style;
use serde_json::json;

/// Run `default get|set`
pub fn run_default<S: KeyValueStore>(
    policy: &mut PolicyStore<S>,
    action: DefaultAction,
    json: bool,
) -> Result<()> {
    match action {
        DefaultAction::Get => {
            let current = policy.global_default()?;
            if json {
                print_json(&json!({ "global_default": current }))?;
            } else {
                match current {
                    Some(threshold) => println!("{}", threshold.days()),
                    None => println!("{}", style("not set").yellow()),
                }
            }
        }
        DefaultAction::Set { days } => {
            policy.set_global_default(days.as_str())?;
            let saved = policy.global_default()?;
            if json {
                print_json(&json!({ "global_default": saved }))?;
            } else if let Some(threshold) = saved {
                print_success(&format!("Global default set to {}", threshold));
            }
        }
    }
    Ok(())
}

/// Run `override list|get|set|add|delete`
pub fn run_override<S: KeyValueStore>(
    policy: &mut PolicyStore<S>,
    action: OverrideAction,
    json: bool,
) -> Result<()> {
    match action {
        OverrideAction::List => {
            let snapshot = policy.snapshot()?;
            if json {
                print_json(&snapshot)?;
            } else {
                print_policy(&snapshot);
            }
        }
        OverrideAction::Get { host } => {
            let current = policy.override_for(&host)?;
            if json {
                print_json(&json!({ "host": host, "override": current }))?;
            } else {
                match current {
                    Some(threshold) => println!("{}", threshold.days()),
                    None => println!("{}", style("not customized").yellow()),
                }
            }
        }
        OverrideAction::Set { host, days } => {
            policy.set_override(&host, days.as_str())?;
            let saved = policy.override_for(&host)?;
            if json {
                print_json(&json!({ "host": host, "override": saved }))?;
            } else if let Some(threshold) = saved {
                print_success(&format!("{} now warns {} ahead", host, threshold));
            }
        }
        OverrideAction::Add { host } => {
            let threshold = policy.add_override(&host)?;
            if json {
                print_json(&json!({ "host": host, "override": threshold }))?;
            } else {
                print_success(&format!("{} customized, starting at {}", host, threshold));
            }
        }
        OverrideAction::Delete { host } => {
            policy.delete_override(&host)?;
            if json {
                print_json(&json!({ "host": host, "override": null }))?;
            } else {
                print_success(&format!("{} uses the global default", host));
            }
        }
    }
    Ok(())
}

/// Run `resolve <host>`
pub fn run_resolve<S: KeyValueStore>(policy: &PolicyStore<S>, host: &str, json: bool) -> Result<()> {
    let resolution = ThresholdResolver::new(policy).resolve(host);
    if json {
        print_json(&json!({ "host": host, "resolution": resolution }))?;
    } else {
        print_resolution(host, &resolution);
    }
    Ok(())
}
