//! Parse command implementation

use clap::{Args, ValueEnum};
use serde::Serialize;
use std::fmt::Write as _;
use tokio::io::AsyncReadExt;

use crate::config::Config;
use crate::extract::{Extraction, SignalExtractor};
use crate::risk::RiskReward;
use crate::signal::{assess_levels, ExtractedSignal, LevelIssue};

/// Output format for a parsed signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Message text (read from stdin when omitted)
    pub message: Option<String>,

    /// Source tag attached to the signal
    #[arg(short, long)]
    pub source: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// JSON report for one message
#[derive(Debug, Serialize)]
struct ParseReport<'a> {
    signal: Option<&'a ExtractedSignal>,
    risk_reward: Option<RiskReward>,
    level_issues: Vec<LevelIssue>,
    reason: Option<String>,
}

impl ParseArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let message = match &self.message {
            Some(message) => message.clone(),
            None => {
                let mut buf = String::new();
                tokio::io::stdin().read_to_string(&mut buf).await?;
                buf
            }
        };

        let extractor = SignalExtractor::from_config(&config.extractor);
        let source = self
            .source
            .as_deref()
            .unwrap_or_else(|| extractor.default_source());

        let (signal, reason) = match extractor.try_extract(&message, source) {
            Ok(Extraction::Signal(signal)) => (Some(*signal), None),
            Ok(Extraction::NoSignal(reason)) => (None, Some(reason.to_string())),
            Err(e) => {
                tracing::warn!(error = %e, "Signal extraction failed");
                (None, Some(e.to_string()))
            }
        };

        match self.format {
            OutputFormat::Json => {
                let report = ParseReport {
                    signal: signal.as_ref(),
                    risk_reward: signal.as_ref().map(ExtractedSignal::risk_reward),
                    level_issues: signal.as_ref().map(assess_levels).unwrap_or_default(),
                    reason,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Table => match &signal {
                Some(signal) => print!("{}", render_table(signal)),
                None => println!("No signal: {}", reason.unwrap_or_default()),
            },
        }

        Ok(())
    }
}

/// Human readable summary of a signal
pub fn render_table(signal: &ExtractedSignal) -> String {
    let mut out = String::new();
    let rr = signal.risk_reward();

    let _ = writeln!(out, "Signal {}", signal.id);
    let _ = writeln!(out, "  Symbol:      {}", signal.symbol);
    let _ = writeln!(out, "  Direction:   {}", signal.direction);
    let _ = writeln!(out, "  Entry:       {}", signal.entry_price);
    match signal.stop_loss {
        Some(stop_loss) => {
            let _ = writeln!(out, "  Stop loss:   {}", stop_loss);
        }
        None => {
            let _ = writeln!(out, "  Stop loss:   -");
        }
    }
    let targets: Vec<String> = signal
        .take_profit_levels
        .iter()
        .map(|tp| tp.to_string())
        .collect();
    let _ = writeln!(
        out,
        "  Targets:     {}",
        if targets.is_empty() {
            "-".to_string()
        } else {
            targets.join(", ")
        }
    );
    let _ = writeln!(out, "  Leverage:    {}x", signal.leverage);
    let _ = writeln!(out, "  Confidence:  {}", signal.confidence);
    let _ = writeln!(out, "  Source:      {}", signal.source_tag);
    let _ = writeln!(out, "  Risk/reward: {} (risk {}%)", rr.ratio, rr.risk_percent);
    for issue in assess_levels(signal) {
        let _ = writeln!(out, "  Warning:     {}", issue);
    }
    out
}
