use sha2::{Digest, Sha256};

/// Windows-safe, deterministic local name for a PDF generated from
/// `url`: `{sanitized_host}--{short_hash(url)}.pdf`
pub fn pdf_filename(url: &str) -> String {
    let host = url::Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(ToOwned::to_owned));
    let sanitized = sanitize(host.as_deref().unwrap_or("webpage"));
    let hash = short_hash(url);
    format!("{sanitized}--{hash}.pdf")
}

/// Local name for a file named by the descriptor contract. Only the
/// final path segment is kept; the server does not get to pick
/// directories on this machine.
pub fn descriptor_filename(file: &str) -> String {
    let segment = file.rsplit(['/', '\\']).next().unwrap_or(file);
    let cleaned = sanitize(segment.strip_suffix(".pdf").unwrap_or(segment));
    format!("{cleaned}.pdf")
}

fn sanitize(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let mut cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]).to_string();
    if cleaned.is_empty() {
        cleaned = "webpage".to_string();
    }
    if cleaned.len() > 80 {
        // Server-named files can be multibyte; cut on a char boundary.
        let mut cut = 80;
        while !cleaned.is_char_boundary(cut) {
            cut -= 1;
        }
        cleaned.truncate(cut);
    }
    if is_reserved_windows_name(&cleaned) {
        cleaned.push('_');
    }
    cleaned
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

fn short_hash(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
