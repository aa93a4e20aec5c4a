//! Install metric aggregation and the human-readable summaries shown for a
//! deployment's latest release.
use crate::deployment::{AggregatedMetric, Deployment, Release, ReleaseMetric};
use chrono::{DateTime, Local, Utc};

pub const NO_INSTALLS_RECORDED: &str = "No installs recorded";

/// Active installs summed over every release of the deployment.
pub fn total_active(metrics: &[ReleaseMetric]) -> u64 {
    metrics.iter().map(|metric| metric.active).sum()
}

pub fn find_release_metric<'a>(
    metrics: &'a [ReleaseMetric],
    label: &str,
) -> Option<&'a ReleaseMetric> {
    metrics.iter().find(|metric| metric.label == label)
}

/// Share of `total_active` held by `active`, in percent.
/// Zero when nothing is active at all.
pub fn active_percent(active: u64, total_active: u64) -> f64 {
    if total_active == 0 {
        return 0.0;
    }
    (active as f64 / total_active as f64) * 100.0
}

/// Renders a percentage with two significant digits, e.g. `37%`, `4.2%`
/// or `0.33%`. Exactly 0 and 100 are printed without a fraction.
pub fn format_percent(percent: f64) -> String {
    if percent == 100.0 {
        return "100%".to_owned();
    }
    if percent == 0.0 {
        return "0%".to_owned();
    }
    format!("{}%", to_precision(percent, 2))
}

/// Formats `value` with `precision` significant digits. Switches to
/// exponent notation when the exponent is below -6 or does not fit into
/// `precision` digits. Ties round away from zero.
fn to_precision(value: f64, precision: i32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return format!("{:.*}", (precision - 1) as usize, 0.0);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let value = value.abs();
    let lower = 10u64.pow(precision as u32 - 1);
    let upper = 10u64.pow(precision as u32);
    let mut exponent = value.log10().floor() as i32;
    let mut digits = scaled_digits(value, precision - 1 - exponent);
    if digits < lower {
        exponent -= 1;
        digits = scaled_digits(value, precision - 1 - exponent);
    }
    if digits >= upper {
        exponent += 1;
        digits = scaled_digits(value, precision - 1 - exponent);
    }
    let digits = digits.to_string();
    if exponent < -6 || exponent >= precision {
        let (first, rest) = digits.split_at(1);
        let mantissa = match rest.is_empty() {
            true => first.to_owned(),
            false => format!("{first}.{rest}"),
        };
        let exponent_sign = if exponent < 0 { '-' } else { '+' };
        return format!("{sign}{mantissa}e{exponent_sign}{}", exponent.abs());
    }
    if exponent >= 0 {
        let (integer, fraction) = digits.split_at(exponent as usize + 1);
        return match fraction.is_empty() {
            true => format!("{sign}{integer}"),
            false => format!("{sign}{integer}.{fraction}"),
        };
    }
    let zeros = "0".repeat((-exponent - 1) as usize);
    format!("{sign}0.{zeros}{digits}")
}

fn scaled_digits(value: f64, scale: i32) -> u64 {
    let scaled = match scale >= 0 {
        true => value * 10f64.powi(scale),
        false => value / 10f64.powi(-scale),
    };
    scaled.round() as u64
}

/// Installs that were downloaded but neither installed nor failed yet.
/// Untracked installs count as zero.
pub fn pending(metric: &ReleaseMetric) -> i128 {
    let installed = metric.installed.unwrap_or(0);
    i128::from(metric.downloaded) - i128::from(installed) - i128::from(metric.failed)
}

/// The "Install Metrics" cell for a deployment's latest release.
pub fn install_metrics_summary(metric: Option<&ReleaseMetric>, total_active: u64) -> String {
    let Some(metric) = metric else {
        return NO_INSTALLS_RECORDED.to_owned();
    };
    let percent = format_percent(active_percent(metric.active, total_active));
    let mut summary = format!(
        "Active: {percent} ({active} of {total_active})",
        active = metric.active
    );
    if let Some(installed) = metric.installed {
        summary.push_str(&format!("\nInstalled: {installed}"));
        let pending = pending(metric);
        if pending != 0 {
            summary.push_str(&format!(" ({pending} pending)"));
        }
    }
    summary
}

/// The "Update Metadata" cell: five lines, the last one unterminated.
pub fn release_metadata(
    release: &Release,
    format_time: impl Fn(&DateTime<Utc>) -> String,
) -> String {
    let mandatory = match release.is_mandatory {
        true => "Yes",
        false => "No",
    };
    format!(
        "Label: {label}\n\
         App Version: {app_version}\n\
         Mandatory: {mandatory}\n\
         Release Time: {release_time}\n\
         Released By: {released_by}",
        label = release.label,
        app_version = release.target_binary_range,
        release_time = format_time(&release.upload_time),
        released_by = release.released_by,
    )
}

/// Release time in the local timezone, e.g. `Oct 18, 2026 3:04 PM`.
pub fn display_time(time: &DateTime<Utc>) -> String {
    time.with_timezone(&Local)
        .format("%b %-d, %Y %-I:%M %p")
        .to_string()
}

/// The latest release's counters plus the deployment-wide active total.
/// `None` when no metrics were fetched or none belong to `label`.
pub fn aggregate(metrics: &[ReleaseMetric], label: &str) -> Option<AggregatedMetric> {
    if metrics.is_empty() {
        return None;
    }
    let total_active = total_active(metrics);
    find_release_metric(metrics, label).map(|metric| AggregatedMetric {
        active: metric.active,
        downloaded: metric.downloaded,
        installed: metric.installed,
        failed: metric.failed,
        total_active,
    })
}

/// Attaches the aggregated metrics to the deployment's latest release,
/// for machine-readable output.
pub fn attach_metrics(deployment: &mut Deployment, metrics: &[ReleaseMetric]) {
    if let Some(release) = deployment.latest_release.as_mut() {
        release.metrics = aggregate(metrics, &release.label);
    }
}
