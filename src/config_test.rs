use super::*;

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_api_env() {
    unsafe {
        std::env::remove_var(API_URL_ENV);
    }
}

#[test]
fn new_trims_trailing_slashes() {
    let cfg = ApiConfig::new("https://bingo.example.test///").unwrap();
    assert_eq!(cfg.api_base_url, "https://bingo.example.test");
}

#[test]
fn new_trims_surrounding_whitespace() {
    let cfg = ApiConfig::new("  http://127.0.0.1:8080/ ").unwrap();
    assert_eq!(cfg.api_base_url, "http://127.0.0.1:8080");
}

#[test]
fn new_rejects_blank_url() {
    assert_eq!(ApiConfig::new("   "), Err(ConfigError::EmptyBaseUrl));
    assert_eq!(ApiConfig::new("/"), Err(ConfigError::EmptyBaseUrl));
}

#[test]
fn new_rejects_non_http_scheme() {
    let err = ApiConfig::new("ftp://bingo.example.test").unwrap_err();
    assert_eq!(err, ConfigError::UnsupportedScheme("ftp://bingo.example.test".into()));
}

#[test]
fn endpoint_joins_path() {
    let cfg = ApiConfig::new("http://localhost:8080/").unwrap();
    assert_eq!(cfg.endpoint("/api/createGoals"), "http://localhost:8080/api/createGoals");
}

#[test]
fn default_points_at_local_backend() {
    assert_eq!(ApiConfig::default().api_base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn from_env_defaults_and_overrides() {
    unsafe { clear_api_env() };
    assert_eq!(ApiConfig::from_env().unwrap().api_base_url, DEFAULT_API_BASE_URL);

    unsafe { std::env::set_var(API_URL_ENV, "https://api.bingo.test/") };
    assert_eq!(ApiConfig::from_env().unwrap().api_base_url, "https://api.bingo.test");

    unsafe { std::env::set_var(API_URL_ENV, "bingo.test") };
    assert!(matches!(ApiConfig::from_env(), Err(ConfigError::UnsupportedScheme(_))));

    unsafe { clear_api_env() };
}
