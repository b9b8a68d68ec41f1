pub fn default_api_url() -> String {
    "http://localhost:8080/api".to_string()
}

pub fn default_timeout_secs() -> u64 {
    30
}
