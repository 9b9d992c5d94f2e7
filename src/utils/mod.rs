/// Sanitize an identifier for safe filesystem usage.
///
/// Real video and channel IDs only carry `[A-Za-z0-9_-]`, but unrecognized
/// input passes through extraction unchanged and may hold anything.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            match c {
                // Keep alphanumeric characters, spaces, hyphens, underscores, and dots
                c if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' || c == '.' => c,
                // Replace everything else with underscore
                _ => '_',
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("dQw4w9WgXcQ"), "dQw4w9WgXcQ");
        assert_eq!(sanitize_filename("https://bad/input?x"), "https___bad_input_x");
        assert_eq!(sanitize_filename("  spaced  "), "spaced");
    }
}
