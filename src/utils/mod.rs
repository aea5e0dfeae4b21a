use url::Url;

/// Short label for status lines: the host of `input` when it parses as a
/// URL, otherwise the trimmed input itself
pub fn target_label(input: &str) -> String {
    let input = input.trim();
    Url::parse(input)
        .ok()
        .and_then(|url| url.host_str().map(|host| host.trim_start_matches("www.").to_string()))
        .unwrap_or_else(|| input.to_string())
}

/// Quotes `arg` for display in a POSIX-style command line when it is
/// empty or contains whitespace or quotes
pub fn quote_arg(arg: &str) -> String {
    let plain = !arg.is_empty()
        && !arg
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '\'' | '"' | '\\'));
    if plain {
        return arg.to_string();
    }
    format!("'{}'", arg.replace('\'', r"'\''"))
}
