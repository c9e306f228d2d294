//! Fuzz harness for replay scripts
//!
//! Parses arbitrary text as a JSONL script and replays whatever parses.

#![no_main]

use libfuzzer_sys::fuzz_target;
use prefixsum_replay::{Replayer, parse_script};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let Ok(steps) = parse_script(input) else {
        return;
    };

    let _ = Replayer::new().capture_values(true).run(&steps);
});
