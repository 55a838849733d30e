//! Text normalization shared by the vocabulary matcher and the similarity engine.
//!
//! Normalized text is lowercase, restricted to ASCII letters, digits, a fixed
//! set of French accented letters and the symbols `+ # .`, with whitespace
//! collapsed to single spaces. Technical tokens such as `c++`, `c#` and
//! `.net` survive intact; generic punctuation does not.

use once_cell::sync::Lazy;
use regex::Regex;

/// Every character outside the allowed class.
static DISALLOWED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9àâçéèêëîïôûùüÿñæœ+#.]").unwrap());

/// Normalize free text for matching.
///
/// Steps (order matters):
/// 1. Lowercase
/// 2. Newlines become spaces, carriage returns are dropped
/// 3. Characters outside the allowed class become spaces
/// 4. Periods with no word character on either side become spaces
/// 5. Collapse whitespace runs and trim
///
/// Never fails; empty input yields an empty string. The result is a fixed
/// point: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = text.to_lowercase().replace('\n', " ").replace('\r', "");
    let text = DISALLOWED_RE.replace_all(&text, " ");
    let text = drop_isolated_periods(&text);

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Replace every `.` that is neither preceded nor followed by a word character.
///
/// Neighbours are inspected in the input, not in the partially rewritten
/// output, so a run like `"..."` disappears entirely while `".net"` and
/// `"node.js"` keep their periods.
fn drop_isolated_periods(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            if c != '.' {
                return c;
            }
            let before = i.checked_sub(1).map(|j| chars[j]);
            let after = chars.get(i + 1).copied();
            let attached = before.is_some_and(is_word_char) || after.is_some_and(is_word_char);
            if attached { c } else { ' ' }
        })
        .collect()
}
