//! Metrics collection.
//!
//! # Metrics
//! - `autolink_config_reloads_total` (counter): reloads by outcome
//! - `autolink_rule_compile_failures_total` (counter)
//! - `autolink_admin_lookup_failures_total` (counter)
//! - `autolink_command_registrations_total` (counter): by action, outcome
//!
//! # Design Decisions
//! - Only the `metrics` facade is used; without an installed recorder every
//!   call is a no-op

pub fn record_config_reload(outcome: &'static str) {
    metrics::counter!("autolink_config_reloads_total", "outcome" => outcome).increment(1);
}

pub fn record_rule_compile_failure() {
    metrics::counter!("autolink_rule_compile_failures_total").increment(1);
}

pub fn record_admin_lookup_failure() {
    metrics::counter!("autolink_admin_lookup_failures_total").increment(1);
}

pub fn record_command_registration(action: &'static str, success: bool) {
    let outcome = if success { "ok" } else { "error" };
    metrics::counter!(
        "autolink_command_registrations_total",
        "action" => action,
        "outcome" => outcome
    )
    .increment(1);
}
