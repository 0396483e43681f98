// src/inspect/scan.rs
//! Brace-depth scanning of PHP source, aware of comments and string literals.

/// Returns the brace nesting depth at every byte offset of `source`.
///
/// Braces inside comments and quoted strings are ignored. The depth recorded
/// for an opening brace is the depth *outside* it.
pub fn brace_depths(source: &str) -> Vec<usize> {
    let bytes = source.as_bytes();
    let mut depths = vec![0; bytes.len()];
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = find_from(source, i + 2, "*/").map_or(bytes.len(), |end| end + 2);
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => i = line_end(bytes, i),
            b'#' => i = line_end(bytes, i),
            quote @ (b'\'' | b'"') => i = string_end(bytes, i, quote),
            b'{' => {
                depth += 1;
                i += 1;
            }
            b'}' => {
                depth = depth.saturating_sub(1);
                i += 1;
            }
            _ => i += 1,
        }
        let fill = if bytes[start] == b'{' { depth - 1 } else { depth };
        for slot in depths.iter_mut().take(i).skip(start) {
            *slot = fill;
        }
    }

    depths
}

/// Byte offset of the brace closing the block opened at `open`.
pub fn matching_brace(source: &str, depths: &[usize], open: usize) -> usize {
    let outer = depths.get(open).copied().unwrap_or(0);
    source
        .bytes()
        .enumerate()
        .skip(open + 1)
        .find(|&(idx, byte)| byte == b'}' && depths.get(idx).copied() == Some(outer))
        .map_or(source.len(), |(idx, _)| idx)
}

fn find_from(source: &str, from: usize, needle: &str) -> Option<usize> {
    source.get(from..)?.find(needle).map(|pos| pos + from)
}

fn line_end(bytes: &[u8], from: usize) -> usize {
    bytes
        .iter()
        .skip(from)
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |pos| from + pos)
}

fn string_end(bytes: &[u8], from: usize, quote: u8) -> usize {
    let mut i = from + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}
