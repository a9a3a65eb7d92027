const ESCAPE_CHARS: [char; 6] = [' ', '&', '(', ')', '"', ';'];

/// An argument is left alone when it looks like an option. A leading `-`
/// followed by a digit is a negative number, not an option.
fn looks_like_option(arg: &str) -> bool {
    let mut chars = arg.chars();
    match chars.next() {
        Some('-') => !chars.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

pub fn escape_argument(arg: &str) -> String {
    if !arg.is_empty() && !looks_like_option(arg) && arg.contains(ESCAPE_CHARS) {
        format!("\"{}\"", arg.replace('\\', "\\\\").replace('"', "\"\"\""))
    } else {
        arg.to_string()
    }
}

/// Escapes each argument and joins them into one console command string.
pub fn escape_and_join<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(|arg| escape_argument(arg.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_are_not_escaped() {
        let arg = "-t_srs \"+proj=longlat +datum=WGS84 +no_defs\"";
        assert_eq!(escape_argument(arg), arg);
        assert_eq!(escape_argument("-overwrite"), "-overwrite");
    }

    #[test]
    fn test_paths_with_spaces_are_quoted() {
        assert_eq!(escape_argument("/data/my dem.tif"), "\"/data/my dem.tif\"");
        assert_eq!(escape_argument("/data/a&b.tif"), "\"/data/a&b.tif\"");
    }

    #[test]
    fn test_negative_number_is_escaped_like_a_value() {
        assert_eq!(escape_argument("-9999"), "-9999");
        assert_eq!(escape_argument("-1 (nodata)"), "\"-1 (nodata)\"");
    }

    #[test]
    fn test_backslashes_and_quotes() {
        assert_eq!(
            escape_argument("C:\\My Data\\\"x\".tif"),
            "\"C:\\\\My Data\\\\\"\"\"x\"\"\".tif\""
        );
    }

    #[test]
    fn test_plain_arguments_pass_through() {
        assert_eq!(escape_argument("/in.tif"), "/in.tif");
        assert_eq!(escape_argument(""), "");
    }

    #[test]
    fn test_escape_and_join() {
        let joined = escape_and_join(&["-tr 1 1", "-overwrite", "/in put.tif", "/out.tif"]);
        assert_eq!(joined, "-tr 1 1 -overwrite \"/in put.tif\" /out.tif");
        assert_eq!(escape_and_join::<&str>(&[]), "");
    }
}
