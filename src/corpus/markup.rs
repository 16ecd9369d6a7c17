// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Plain text from rich-text answer content.
//!
//! Answers arrive as editor HTML. The phrase count should measure the words a
//! student changed, not the `<span>` soup around them, so tags go and entities
//! are decoded. This is a scanner, not a parser:
//!
//! - a tag starts only at `<` followed by an ASCII letter, `/`, `!` or `?`;
//!   any other `<` is text, as is a tag that never closes
//! - text runs are concatenated as-is, block elements add no line breaks
//! - `<script>`/`<style>` bodies are dropped whole

/// Remove tags and comments, decode entities.
pub fn strip_markup(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find(['<', '&']) {
        out.push_str(&rest[..open]);
        rest = &rest[open..];

        if rest.starts_with('&') {
            match decode_entity(rest) {
                Some((decoded, consumed)) => {
                    out.push(decoded);
                    rest = &rest[consumed..];
                }
                None => {
                    out.push('&');
                    rest = &rest[1..];
                }
            }
            continue;
        }

        if !opens_tag(rest) {
            out.push('<');
            rest = &rest[1..];
            continue;
        }

        if let Some(body) = rest.strip_prefix("<!--") {
            rest = match body.find("-->") {
                Some(end) => &body[end + 3..],
                None => "",
            };
            continue;
        }

        let Some(close) = rest.find('>') else {
            // Unterminated tag: keep as text
            break;
        };

        let tag = tag_name(&rest[1..close]);
        rest = &rest[close + 1..];

        if tag == "script" || tag == "style" {
            rest = skip_past_closing(rest, &tag);
        }
    }

    out.push_str(rest);
    out
}

/// `rest` starts with `<`. True when the next char can begin markup.
fn opens_tag(rest: &str) -> bool {
    rest[1..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'))
}

/// Lowercased element name of a tag body like `p class="x"` or `/div`.
fn tag_name(body: &str) -> String {
    body.trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase()
}

fn skip_past_closing<'a>(rest: &'a str, tag: &str) -> &'a str {
    let closing = format!("</{}", tag);
    let lower = rest.to_ascii_lowercase();
    match lower.find(&closing) {
        Some(start) => match rest[start..].find('>') {
            Some(end) => &rest[start + end + 1..],
            None => "",
        },
        None => "",
    }
}

// ============================================================================
// ENTITIES
// ============================================================================

/// Names for U+00A0..=U+00FF, in code point order.
const LATIN1: [&str; 96] = [
    "nbsp", "iexcl", "cent", "pound", "curren", "yen", "brvbar", "sect", "uml", "copy", "ordf",
    "laquo", "not", "shy", "reg", "macr", "deg", "plusmn", "sup2", "sup3", "acute", "micro",
    "para", "middot", "cedil", "sup1", "ordm", "raquo", "frac14", "frac12", "frac34", "iquest",
    "Agrave", "Aacute", "Acirc", "Atilde", "Auml", "Aring", "AElig", "Ccedil", "Egrave", "Eacute",
    "Ecirc", "Euml", "Igrave", "Iacute", "Icirc", "Iuml", "ETH", "Ntilde", "Ograve", "Oacute",
    "Ocirc", "Otilde", "Ouml", "times", "Oslash", "Ugrave", "Uacute", "Ucirc", "Uuml", "Yacute",
    "THORN", "szlig", "agrave", "aacute", "acirc", "atilde", "auml", "aring", "aelig", "ccedil",
    "egrave", "eacute", "ecirc", "euml", "igrave", "iacute", "icirc", "iuml", "eth", "ntilde",
    "ograve", "oacute", "ocirc", "otilde", "ouml", "divide", "oslash", "ugrave", "uacute", "ucirc",
    "uuml", "yacute", "thorn", "yuml",
];

/// Names for U+0391..=U+03A9. U+03A2 is unassigned.
const GREEK_UPPER: [&str; 25] = [
    "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Eta", "Theta", "Iota", "Kappa",
    "Lambda", "Mu", "Nu", "Xi", "Omicron", "Pi", "Rho", "", "Sigma", "Tau", "Upsilon", "Phi",
    "Chi", "Psi", "Omega",
];

/// Names for U+03B1..=U+03C9.
const GREEK_LOWER: [&str; 25] = [
    "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
    "lambda", "mu", "nu", "xi", "omicron", "pi", "rho", "sigmaf", "sigma", "tau", "upsilon", "phi",
    "chi", "psi", "omega",
];

/// Named entities outside the contiguous blocks above.
const NAMED: &[(&str, u32)] = &[
    ("amp", 0x26),
    ("lt", 0x3c),
    ("gt", 0x3e),
    ("quot", 0x22),
    ("apos", 0x27),
    ("OElig", 0x152),
    ("oelig", 0x153),
    ("Scaron", 0x160),
    ("scaron", 0x161),
    ("Yuml", 0x178),
    ("fnof", 0x192),
    ("circ", 0x2c6),
    ("tilde", 0x2dc),
    ("thetasym", 0x3d1),
    ("piv", 0x3d6),
    ("ensp", 0x2002),
    ("emsp", 0x2003),
    ("thinsp", 0x2009),
    ("zwnj", 0x200c),
    ("zwj", 0x200d),
    ("lrm", 0x200e),
    ("rlm", 0x200f),
    ("ndash", 0x2013),
    ("mdash", 0x2014),
    ("lsquo", 0x2018),
    ("rsquo", 0x2019),
    ("sbquo", 0x201a),
    ("ldquo", 0x201c),
    ("rdquo", 0x201d),
    ("bdquo", 0x201e),
    ("dagger", 0x2020),
    ("Dagger", 0x2021),
    ("bull", 0x2022),
    ("hellip", 0x2026),
    ("permil", 0x2030),
    ("prime", 0x2032),
    ("Prime", 0x2033),
    ("lsaquo", 0x2039),
    ("rsaquo", 0x203a),
    ("oline", 0x203e),
    ("frasl", 0x2044),
    ("euro", 0x20ac),
    ("trade", 0x2122),
    ("larr", 0x2190),
    ("uarr", 0x2191),
    ("rarr", 0x2192),
    ("darr", 0x2193),
    ("harr", 0x2194),
    ("lArr", 0x21d0),
    ("uArr", 0x21d1),
    ("rArr", 0x21d2),
    ("dArr", 0x21d3),
    ("hArr", 0x21d4),
    ("forall", 0x2200),
    ("part", 0x2202),
    ("exist", 0x2203),
    ("empty", 0x2205),
    ("nabla", 0x2207),
    ("isin", 0x2208),
    ("notin", 0x2209),
    ("ni", 0x220b),
    ("prod", 0x220f),
    ("sum", 0x2211),
    ("minus", 0x2212),
    ("lowast", 0x2217),
    ("radic", 0x221a),
    ("prop", 0x221d),
    ("infin", 0x221e),
    ("ang", 0x2220),
    ("and", 0x2227),
    ("or", 0x2228),
    ("cap", 0x2229),
    ("cup", 0x222a),
    ("int", 0x222b),
    ("there4", 0x2234),
    ("sim", 0x223c),
    ("cong", 0x2245),
    ("asymp", 0x2248),
    ("ne", 0x2260),
    ("equiv", 0x2261),
    ("le", 0x2264),
    ("ge", 0x2265),
    ("sub", 0x2282),
    ("sup", 0x2283),
    ("nsub", 0x2284),
    ("sube", 0x2286),
    ("supe", 0x2287),
    ("oplus", 0x2295),
    ("otimes", 0x2297),
    ("perp", 0x22a5),
    ("sdot", 0x22c5),
    ("loz", 0x25ca),
    ("spades", 0x2660),
    ("clubs", 0x2663),
    ("hearts", 0x2665),
    ("diams", 0x2666),
];

/// Code point of `name` in a contiguous block starting at `first`.
fn in_block(names: &[&str], first: u32, name: &str) -> Option<u32> {
    names
        .iter()
        .position(|&n| !n.is_empty() && n == name)
        .map(|i| first + i as u32)
}

fn named_entity(name: &str) -> Option<char> {
    let code = in_block(&LATIN1, 0xa0, name)
        .or_else(|| in_block(&GREEK_UPPER, 0x391, name))
        .or_else(|| in_block(&GREEK_LOWER, 0x3b1, name))
        .or_else(|| NAMED.iter().find(|&&(n, _)| n == name).map(|&(_, c)| c))?;
    char::from_u32(code)
}

/// Decode an entity at the start of `s`. Returns the char and bytes consumed.
fn decode_entity(s: &str) -> Option<(char, usize)> {
    let end = s
        .char_indices()
        .take(12)
        .find(|&(_, c)| c == ';')
        .map(|(i, _)| i)?;
    let name = &s[1..end];

    let decoded = match name.strip_prefix('#') {
        Some(number) => {
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse::<u32>().ok()?,
            };
            char::from_u32(code)?
        }
        None => named_entity(name)?,
    };

    Some((decoded, end + 1))
}
