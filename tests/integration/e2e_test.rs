//! End-to-end tests: config file, extraction, filtering and scanning

use rust_decimal_macros::dec;
use signal_scraper::cli::{scan_lines, ScanSummary};
use signal_scraper::config::Config;
use signal_scraper::signal::{FilterResult, RejectReason, SignalFilter, SignalSubmission};
use signal_scraper::SignalExtractor;
use std::io::Write;

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_config_drives_extractor_and_filter() {
    let file = write_temp(
        r#"
        [extractor]
        max_leverage = 25
        default_source = "binancekillers"

        [filter]
        min_confidence = 0.8
        supported_sources = ["binancekillers"]
        "#,
    );
    let config = Config::load(file.path()).unwrap();

    let extractor = SignalExtractor::from_config(&config.extractor);
    let filter = SignalFilter::new(config.filter.clone());

    let full = extractor
        .extract_default("BTCUSDT LONG Entry: 45000 SL: 44000 TP: 46000 Leverage: 50x")
        .unwrap();
    assert_eq!(full.leverage, 25);
    assert_eq!(full.source_tag, "binancekillers");
    assert!(filter.apply(&full, 0).is_pass());

    let bare = extractor
        .extract_default("BTCUSDT LONG Entry: 45000")
        .unwrap();
    assert!(matches!(
        filter.apply(&bare, 0),
        FilterResult::Reject(RejectReason::ConfidenceTooLow(c)) if c == dec!(0.5)
    ));
}

#[tokio::test]
async fn test_scan_file_to_submissions() {
    let input = write_temp(
        "🟢 LONG #BTC Entry: 45000 SL: 44000 TP1: 46000 TP2: 47000 Lev: 5\n\
         gm everyone\n\
         ETH/USDT SELL Price: 3000 Stop loss: 3100 TP: 2800\n",
    );
    let file = tokio::fs::File::open(input.path()).await.unwrap();
    let extractor = SignalExtractor::new();
    let mut out = Vec::new();

    let summary = scan_lines(
        tokio::io::BufReader::new(file),
        &mut out,
        &extractor,
        None,
        "bybitpro",
    )
    .await
    .unwrap();

    assert_eq!(
        summary,
        ScanSummary {
            messages: 3,
            detected: 2,
            forwarded: 2,
            rejected: 0,
        }
    );

    let submissions: Vec<SignalSubmission> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(submissions[0].symbol, "BTCUSDT");
    assert_eq!(submissions[0].leverage, 5);
    assert_eq!(submissions[0].take_profits, vec![dec!(46000), dec!(47000)]);
    assert_eq!(submissions[0].risk_reward, dec!(1));
    assert_eq!(submissions[1].symbol, "ETHUSDT");
    assert_eq!(submissions[1].stop_loss, Some(dec!(3100)));
    assert_eq!(submissions[1].source, "bybitpro");
}
