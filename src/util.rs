// Helpers for turning config strings into a connect target.

pub fn parse_host_port(s: &str, default_port: Option<u16>) -> (String, Option<u16>) {
    if let Some(idx) = s.rfind(':') {
        // bare IPv6 literals contain ':' too, only split when the tail is a port
        if !s[..idx].contains(':') || s.starts_with('[') {
            if let Ok(port) = s[idx + 1..].parse::<u16>() {
                let host = s[..idx].trim_start_matches('[').trim_end_matches(']');
                return (host.to_string(), Some(port));
            }
        }
    }
    (s.trim_start_matches('[').trim_end_matches(']').to_string(), default_port)
}
