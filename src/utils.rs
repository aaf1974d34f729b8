/// Discord rejects message content longer than this.
pub const MAX_MESSAGE_LEN: usize = 2000;

/// Break `text` into pieces no longer than `limit` bytes, cutting on line
/// boundaries where possible so table rows stay whole.
///
/// A single line longer than `limit` is cut at the nearest char boundary.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::default();
    let mut current = String::new();

    for line in text.split('\n') {
        let separator = usize::from(!current.is_empty());
        if current.len() + separator + line.len() <= limit {
            if separator == 1 {
                current.push('\n');
            }
            current.push_str(line);
            continue;
        }

        if !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }

        let mut rest = line;
        while rest.len() > limit {
            let mut cut = limit;
            while !rest.is_char_boundary(cut) {
                cut -= 1;
            }
            if cut == 0 {
                cut = rest.chars().next().map_or(rest.len(), char::len_utf8);
            }
            chunks.push(rest[..cut].to_string());
            rest = &rest[cut..];
        }
        current.push_str(rest);
    }

    if !current.is_empty() || chunks.is_empty() {
        chunks.push(current);
    }
    chunks
}
