use std::fmt::Write;

use crate::engine::Report;
use crate::error::Result;
use crate::metrics::MetricsResult;
use crate::queues::PriorityReport;

pub trait Formatter {
    fn write(&self, label: &str, report: &Report) -> Result<String>;
}

pub struct HumanFormatter;

pub struct JsonFormatter;

impl Formatter for HumanFormatter {
    fn write(&self, label: &str, report: &Report) -> Result<String> {
        let mut out = String::new();
        let _ = writeln!(out, "Model: {}", label);
        match report {
            Report::Metrics(metrics) => write_metrics(&mut out, metrics),
            Report::Priority(priority) => write_priority(&mut out, priority),
        }
        Ok(out)
    }
}

impl Formatter for JsonFormatter {
    fn write(&self, _label: &str, report: &Report) -> Result<String> {
        let mut out = serde_json::to_string_pretty(report)?;
        out.push('\n');
        Ok(out)
    }
}

fn write_metrics(out: &mut String, metrics: &MetricsResult) {
    for (metric, value) in metrics.iter() {
        if metric.is_echo() {
            let _ = writeln!(out, "{}: {}", metric, value);
        } else {
            let _ = writeln!(out, "{}: {:.6}", metric, value);
        }
    }
}

fn write_priority(out: &mut String, report: &PriorityReport) {
    let _ = writeln!(out, "rho: {:.6}", report.rho);
    let _ = writeln!(out, "lambdaTotal: {:.6}", report.lambda_total);
    let _ = writeln!(out, "capacidadeTotal: {:.6}", report.capacity);
    if let Some(term) = report.residual_term {
        let _ = writeln!(out, "termoA: {:.6}", term);
    }
    let _ = writeln!(out, "Classes:");
    for class in &report.classes {
        let _ = writeln!(
            out,
            "class {}: L={:.6} Lq={:.6} W={:.6} Wq={:.6} lambda={:.6} sigma={:.6}",
            class.rank, class.l, class.lq, class.w, class.wq, class.lambda, class.sigma
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Metric;
    use crate::queues::{calculate_mm1, calculate_priority_preemptive, Query};

    #[test]
    fn human_output_lists_metrics_in_fixed_order() {
        let metrics = calculate_mm1(3.0, 5.0, Query::state(2)).unwrap();
        let output = HumanFormatter
            .write("M/M/1", &Report::Metrics(metrics))
            .unwrap();
        let expected = concat!(
            "Model: M/M/1\n",
            "rho: 0.600000\n",
            "P0: 0.400000\n",
            "L: 1.500000\n",
            "Lq: 0.900000\n",
            "W: 0.500000\n",
            "Wq: 0.300000\n",
            "n: 2\n",
            "Pn: 0.144000\n",
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn human_output_for_priority_classes() {
        let report = calculate_priority_preemptive(2, 5.0, &[2.0, 3.0]).unwrap();
        let output = HumanFormatter
            .write("M/M/s priority (preemptive)", &Report::Priority(report))
            .unwrap();
        assert!(output.contains("capacidadeTotal: 10.000000\n"));
        assert!(output.contains("class 1: L=0.500000 Lq=0.100000 W=0.250000 Wq=0.050000"));
        assert!(!output.contains("termoA"));
    }

    #[test]
    fn json_output_uses_wire_names() {
        let mut metrics = MetricsResult::baseline(0.5, 0.5, 1.0, 0.5, 0.5, 0.25);
        metrics.insert(Metric::NoWaitProbability, 0.75);
        let output = JsonFormatter
            .write("M/M/s", &Report::Metrics(metrics))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["PWqIgualZero"], 0.75);
        assert_eq!(value["rho"], 0.5);
    }
}
