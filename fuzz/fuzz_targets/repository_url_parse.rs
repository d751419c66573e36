#![no_main]

use jinny_github_issues::parse_repository_url;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    match parse_repository_url(&raw) {
        Ok(repo) => {
            assert!(!repo.owner.is_empty());
            assert!(!repo.name.is_empty());
            assert!(!repo.owner.contains('/'));
            assert!(!repo.name.contains('/'));
            assert!(raw.trim().starts_with("https://github.com/"));
        }
        Err(error) => {
            assert!(error.to_string().contains("invalid repository url"));
        }
    }
});
