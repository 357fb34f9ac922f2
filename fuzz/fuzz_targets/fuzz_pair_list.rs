#![no_main]

use libfuzzer_sys::fuzz_target;
use pihole::api::wire::PairListResponse;

fuzz_target!(|data: &[u8]| {
    // Decode arbitrary bytes as a custom DNS/CNAME list response
    let Ok(response) = serde_json::from_slice::<PairListResponse>(data) else {
        return;
    };

    let rows = response.data.len();
    let short = response.data.iter().any(|row| row.len() < 2);

    match response.into_pairs() {
        Ok(pairs) => {
            assert!(!short);
            assert_eq!(pairs.len(), rows);
        }
        Err(_) => assert!(short),
    }
});
