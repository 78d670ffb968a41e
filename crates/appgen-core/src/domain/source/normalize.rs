/// Collapse runs of blank lines into one and drop leading and trailing
/// blank lines. Trailing whitespace is removed from every line and the
/// result ends with exactly one newline.
pub fn normalize_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_blank = false;

    for line in text.lines().map(str::trim_end) {
        if line.is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if pending_blank {
            out.push('\n');
            pending_blank = false;
        }
        out.push_str(line);
        out.push('\n');
    }

    out
}
