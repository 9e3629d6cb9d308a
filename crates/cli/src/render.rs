//! Human-readable lines for optimizer events.

use pearl_core::{CapacityReport, OptimizerEvent};

fn kib(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}

/// Lines printed to stdout for one event.
pub fn render_event(event: &OptimizerEvent) -> Vec<String> {
    match event {
        OptimizerEvent::EncoderReady(_) => Vec::new(),
        OptimizerEvent::Command(line) => vec!["FFmpeg command:".to_string(), line.clone()],
        OptimizerEvent::Encoded(outcome) => vec![
            format!("Optimized file saved to: {}", outcome.output_path.display()),
            format!(
                "File size: {} bytes ({:.2} KB)",
                outcome.size_bytes,
                kib(outcome.size_bytes)
            ),
        ],
        OptimizerEvent::Capacity(report) => render_report(report),
        OptimizerEvent::Playing(_) => vec!["Playing optimized file...".to_string()],
    }
}

pub fn render_report(report: &CapacityReport) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Base64 size: {} bytes ({:.2} KB)",
            report.encoded_len,
            kib(report.encoded_len)
        ),
        format!(
            "Data URI size: {} bytes ({:.2} KB)",
            report.wrapped_len,
            kib(report.wrapped_len)
        ),
    ];

    if report.fits {
        lines.push(format!(
            "✅ Will fit in QR Level 40 (capacity: {} characters)",
            report.ceiling
        ));
        lines.push(format!(
            "   Used: {} characters ({:.1}% of capacity)",
            report.wrapped_len, report.utilization_pct
        ));
    } else {
        lines.push(format!(
            "❌ Too large for QR Level 40 (capacity: {} characters)",
            report.ceiling
        ));
        if let Some(overflow) = report.overflow() {
            lines.push(format!("   Exceeds by: {} characters", overflow));
        }
        if let Some(suggested) = report.suggested_duration_secs {
            lines.push(format!(
                "   Try reducing duration to {:.1} seconds",
                suggested
            ));
        }
    }

    lines
}
