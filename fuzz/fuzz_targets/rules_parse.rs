#![no_main]

use jinny_runtime::parse_rules;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let rules = parse_rules(&raw);

    let candidate_lines = raw.lines().filter(|line| line.contains(':')).count();
    assert!(rules.len() <= candidate_lines);
    for rule in &rules {
        assert_eq!(rule.content, rule.content.trim());
        assert!(!rule.content.contains('\n'));
    }
});
