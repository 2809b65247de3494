//! ISBN normalization

/// Normalize a user-supplied ISBN into its compact form
///
/// Hyphens and spaces are removed and a trailing `x` check character is
/// upper-cased. Returns `None` unless the result is an ISBN-13 (13 digits)
/// or an ISBN-10 (9 digits followed by a digit or `X`). Check digits are not
/// verified.
pub fn normalize(raw: &str) -> Option<String> {
    let compact: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '-' && *c != ' ')
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if !compact.is_ascii() {
        return None;
    }

    let valid = match compact.len() {
        13 => compact.chars().all(|c| c.is_ascii_digit()),
        10 => {
            let (body, check) = compact.split_at(9);
            body.chars().all(|c| c.is_ascii_digit())
                && check.chars().all(|c| c.is_ascii_digit() || c == 'X')
        }
        _ => false,
    };

    valid.then_some(compact)
}
