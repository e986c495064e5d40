//! Integration tests for signal extraction

use rust_decimal_macros::dec;
use signal_scraper::extract::{normalize, Extraction, NoSignalReason};
use signal_scraper::risk::RiskReward;
use signal_scraper::signal::{assess_levels, LevelIssue};
use signal_scraper::{Direction, SignalExtractor};

#[test]
fn test_labeled_long_with_risk_reward() {
    let signal = SignalExtractor::new()
        .extract("BTCUSDT LONG Entry: 45000 SL: 44000 TP: 46000", "generic")
        .unwrap();

    assert_eq!(signal.symbol, "BTCUSDT");
    assert_eq!(signal.direction, Direction::Long);
    assert_eq!(signal.entry_price, dec!(45000));
    assert_eq!(signal.stop_loss, Some(dec!(44000)));
    assert_eq!(signal.take_profit_levels, vec![dec!(46000)]);
    assert_eq!(signal.leverage, 1);

    let rr = signal.risk_reward();
    assert_eq!(rr.risk, dec!(1000));
    assert_eq!(rr.reward, dec!(1000));
    assert_eq!(rr.ratio, dec!(1.0));
    assert_eq!(rr.risk_percent, dec!(2.22));
}

#[test]
fn test_hashtag_buy_at_price() {
    let signal = SignalExtractor::new()
        .extract("#ETH BUY @ 3000 Stop: 2900 Target: 3200", "generic")
        .unwrap();

    assert_eq!(signal.symbol, "ETHUSDT");
    assert_eq!(signal.direction, Direction::Long);
    assert_eq!(signal.entry_price, dec!(3000));
    assert_eq!(signal.stop_loss, Some(dec!(2900)));
    assert_eq!(signal.take_profit_levels, vec![dec!(3200)]);
}

#[test]
fn test_unlabeled_short_targets_ascending() {
    let signal = SignalExtractor::new()
        .extract("SOLUSDT SHORT 150 SL 155 TP1 145 TP2 140", "generic")
        .unwrap();

    assert_eq!(signal.symbol, "SOLUSDT");
    assert_eq!(signal.direction, Direction::Short);
    assert_eq!(signal.entry_price, dec!(150));
    assert_eq!(signal.stop_loss, Some(dec!(155)));
    assert_eq!(signal.take_profit_levels, vec![dec!(140), dec!(145)]);
}

#[test]
fn test_chatter_yields_nothing() {
    assert!(SignalExtractor::new()
        .extract("Just chatting about the market today", "generic")
        .is_none());
}

#[test]
fn test_negative_entry_yields_nothing() {
    assert!(SignalExtractor::new()
        .extract("BTCUSDT LONG Entry: -100", "generic")
        .is_none());
}

#[test]
fn test_leverage_clamped_to_cap() {
    let signal = SignalExtractor::new()
        .extract("ETHUSDT SHORT Entry: 3000 Leverage: 250x", "generic")
        .unwrap();
    assert_eq!(signal.leverage, 100);
}

#[test]
fn test_required_field_gate() {
    let extractor = SignalExtractor::new();
    let cases = [
        ("LONG Entry: 45000 SL: 44000", NoSignalReason::MissingSymbol),
        ("BTCUSDT Entry: 45000 SL: 44000", NoSignalReason::MissingDirection),
        ("BTCUSDT LONG SL: 44000", NoSignalReason::MissingEntry),
        ("BTCUSDT LONG Entry: 0", NoSignalReason::NonPositiveEntry(dec!(0))),
        (
            "BTCUSDT LONG Entry: 45000 SL: 0",
            NoSignalReason::NonPositiveStopLoss(dec!(0)),
        ),
    ];

    for (message, expected) in cases {
        match extractor.try_extract(message, "generic").unwrap() {
            Extraction::NoSignal(reason) => assert_eq!(reason, expected, "{message}"),
            Extraction::Signal(signal) => panic!("{message} produced {signal:?}"),
        }
        assert!(extractor.extract(message, "generic").is_none());
    }
}

#[test]
fn test_symbol_suffix_never_doubled() {
    let extractor = SignalExtractor::new();
    for (message, symbol) in [
        ("#BTC LONG Entry: 1", "BTCUSDT"),
        ("ETHUSDT LONG Entry: 1", "ETHUSDT"),
        ("#ETHUSDT LONG Entry: 1", "ETHUSDT"),
        ("Coin: LINK Side: SELL Price: 14.2", "LINKUSDT"),
    ] {
        let signal = extractor.extract(message, "generic").unwrap();
        assert_eq!(signal.symbol, symbol, "{message}");
        assert!(signal.symbol.ends_with("USDT"));
    }
}

#[test]
fn test_direction_keywords_map_to_two_values() {
    let extractor = SignalExtractor::new();
    for (keyword, expected) in [
        ("BUY", Direction::Long),
        ("long", Direction::Long),
        ("Sell", Direction::Short),
        ("SHORT", Direction::Short),
    ] {
        let message = format!("BTCUSDT {keyword} Entry: 45000");
        let signal = extractor.extract(&message, "generic").unwrap();
        assert_eq!(signal.direction, expected, "{message}");
    }
}

#[test]
fn test_take_profits_deduplicated_and_sorted() {
    let signal = SignalExtractor::new()
        .extract(
            "BTCUSDT LONG Entry: 45000 TP3: 48000 TP1: 46000 TP2: 47000 Target: 46000 Take Profit: 47000",
            "generic",
        )
        .unwrap();

    assert_eq!(
        signal.take_profit_levels,
        vec![dec!(46000), dec!(47000), dec!(48000)]
    );
    assert!(signal
        .take_profit_levels
        .windows(2)
        .all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_wrong_side_stop_accepted_and_zero_ratio() {
    let signal = SignalExtractor::new()
        .extract("BTCUSDT LONG Entry: 45000 SL: 46000 TP: 47000", "generic")
        .unwrap();

    assert_eq!(signal.stop_loss, Some(dec!(46000)));
    assert_eq!(signal.risk_reward(), RiskReward::zero());
    assert_eq!(signal.risk_reward().ratio, dec!(0));
    assert_eq!(
        assess_levels(&signal),
        vec![LevelIssue::StopLossOnWrongSide(dec!(46000))]
    );
}

#[test]
fn test_raw_message_is_normalized_text() {
    let raw = "🚀 #SOL 🔴 SHORT\nEntry: 150\nSL: 155";
    let signal = SignalExtractor::new().extract(raw, "ravenpro").unwrap();

    assert_eq!(signal.raw_message, normalize(raw));
    assert_eq!(signal.raw_message, "#SOL SHORT ENTRY: 150 SL: 155");
    assert_eq!(signal.source_tag, "ravenpro");
}

#[test]
fn test_extraction_from_many_threads() {
    let extractor = std::sync::Arc::new(SignalExtractor::new());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let extractor = extractor.clone();
            std::thread::spawn(move || {
                let message = format!("BTCUSDT LONG Entry: {} SL: 1", 1000 + i);
                extractor.extract(&message, "generic").unwrap().entry_price
            })
        })
        .collect();

    let mut prices: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    prices.sort();
    assert_eq!(prices.first(), Some(&dec!(1000)));
    assert_eq!(prices.last(), Some(&dec!(1007)));
}
