/// Expand ${VAR_NAME} references using `lookup`. Unknown variables are
/// left as written.
pub fn expand_with(value: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let Ok(re) = regex::Regex::new(r"\$\{([^}]+)\}") else {
        return value.to_string();
    };
    re.replace_all(value, |caps: &regex::Captures| {
        let var_name = &caps[1];
        lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
    })
    .into_owned()
}

/// Accepts "true", "1" and "yes" in any case.
pub fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}
