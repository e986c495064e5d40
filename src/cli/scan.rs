//! Scan command implementation

use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::config::Config;
use crate::extract::SignalExtractor;
use crate::signal::{FilterResult, SignalFilter, SignalRateLimiter, SignalSubmission};
use crate::telemetry::{self, CounterMetric};

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// File with one message per line (stdin when omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Source tag attached to every signal
    #[arg(short, long)]
    pub source: Option<String>,

    /// Apply the signal filter before emitting
    #[arg(long)]
    pub filter: bool,
}

/// Counts for one scan run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub messages: usize,
    pub detected: usize,
    pub forwarded: usize,
    pub rejected: usize,
}

impl ScanArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let extractor = SignalExtractor::from_config(&config.extractor);
        let source = self
            .source
            .clone()
            .unwrap_or_else(|| extractor.default_source().to_string());
        let filter = self
            .filter
            .then(|| SignalFilter::new(config.filter.clone()));

        tracing::info!(input = ?self.input, %source, filter = self.filter, "Scanning messages");

        let mut stdout = tokio::io::stdout();
        let summary = match &self.input {
            Some(path) => {
                let file = tokio::fs::File::open(path).await?;
                scan_lines(
                    BufReader::new(file),
                    &mut stdout,
                    &extractor,
                    filter.as_ref(),
                    &source,
                )
                .await?
            }
            None => {
                scan_lines(
                    BufReader::new(tokio::io::stdin()),
                    &mut stdout,
                    &extractor,
                    filter.as_ref(),
                    &source,
                )
                .await?
            }
        };

        tracing::info!(
            messages = summary.messages,
            detected = summary.detected,
            forwarded = summary.forwarded,
            rejected = summary.rejected,
            "Scan complete"
        );
        Ok(())
    }
}

/// Extract signals from each non-empty line and write forwarded ones as JSON lines
///
/// A line that yields no signal is skipped; it never stops the scan. Bytes
/// that are not valid UTF-8 are replaced before extraction.
pub async fn scan_lines<R, W>(
    mut reader: R,
    writer: &mut W,
    extractor: &SignalExtractor,
    filter: Option<&SignalFilter>,
    source: &str,
) -> anyhow::Result<ScanSummary>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut summary = ScanSummary::default();
    let mut limiter = SignalRateLimiter::hourly();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        if line.trim().is_empty() {
            continue;
        }
        summary.messages += 1;

        let Some(signal) = extractor.extract(&line, source) else {
            continue;
        };
        summary.detected += 1;

        if let Some(filter) = filter {
            let recent = limiter.recent_count(&signal.source_tag, signal.extracted_at);
            if let FilterResult::Reject(reason) = filter.apply(&signal, recent) {
                tracing::debug!(symbol = %signal.symbol, ?reason, "Signal rejected");
                telemetry::increment(CounterMetric::SignalsRejected, &[("reason", reason.label())]);
                summary.rejected += 1;
                continue;
            }
            limiter.record(&signal.source_tag, signal.extracted_at);
        }

        let submission = SignalSubmission::from(&signal);
        let mut json = serde_json::to_vec(&submission)?;
        json.push(b'\n');
        writer.write_all(&json).await?;
        telemetry::increment(CounterMetric::SignalsForwarded, &[]);
        summary.forwarded += 1;
    }

    writer.flush().await?;
    Ok(summary)
}
