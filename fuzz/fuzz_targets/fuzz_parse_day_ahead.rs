#![no_main]
use libfuzzer_sys::fuzz_target;
use stromvarsler::config::TariffConfig;
use stromvarsler::nordpool::DayAheadResponse;
use stromvarsler::prices::{parse_prices, price_views};
use stromvarsler::tariff::Tariff;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as a provider response body
    let Ok(resp) = serde_json::from_slice::<DayAheadResponse>(data) else {
        return;
    };
    let payload = resp.into_payload();
    let tariff = Tariff::from(&TariffConfig::default());

    for area in payload.areas.keys() {
        let records = parse_prices(&payload, area, &tariff, chrono_tz::Europe::Oslo);
        assert!(records.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        let _ = price_views(&records);
    }
});
