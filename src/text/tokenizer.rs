//! Penn Treebank style word tokenizer.
//!
//! The rules run as a sequence of regex rewrites that pad punctuation,
//! quotes and clitics with spaces, after which the text is split on
//! whitespace. Sentence-final periods are split off wherever a period is
//! followed by whitespace or the end of input. Typographic quotes and
//! apostrophes are split off like their ASCII counterparts.

use std::sync::LazyLock;

use regex::Regex;

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

impl Rule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap_or_else(|e| panic!("bad tokenizer rule {pattern}: {e}")),
            replacement,
        }
    }
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        // opening quotes
        Rule::new(r"([«“‘„]|`+)", " $1 "),
        Rule::new(r#"^""#, " `` "),
        Rule::new(r"(``)", " $1 "),
        Rule::new(r#"([ (\[{<])("|'')"#, "$1 `` "),
        // punctuation
        Rule::new(r"([:,])([^\d])", " $1 $2"),
        Rule::new(r"([:,])$", " $1 "),
        Rule::new(r"\.{2,}", " $0 "),
        Rule::new(r"[;@#$%&]", " $0 "),
        Rule::new(r#"([^.])(\.)([\]\)}>"']*)(\s|$)"#, "$1 $2$3 $4"),
        Rule::new(r"[?!]", " $0 "),
        Rule::new(r"([^'])' ", "$1 ' "),
        Rule::new(r"[*]", " $0 "),
        Rule::new(r"[\]\[\(\)\{\}<>]", " $0 "),
        Rule::new(r"--", " -- "),
        // closing quotes
        Rule::new(r"([»”’])", " $1 "),
        Rule::new(r#"""#, " '' "),
        Rule::new(r"(\S)('')", "$1 $2 "),
        // clitics
        Rule::new(r"([^' ])('[sS]|'[mM]|'[dD]|') ", "$1 $2 "),
        Rule::new(r"([^' ])('ll|'LL|'re|'RE|'ve|'VE|n't|N'T) ", "$1 $2 "),
        // fused forms
        Rule::new(r"(?i)\b(can)(not)\b", " $1 $2 "),
        Rule::new(r"(?i)\b(d)('ye)\b", " $1 $2 "),
        Rule::new(r"(?i)\b(gim)(me)\b", " $1 $2 "),
        Rule::new(r"(?i)\b(gon)(na)\b", " $1 $2 "),
        Rule::new(r"(?i)\b(got)(ta)\b", " $1 $2 "),
        Rule::new(r"(?i)\b(lem)(me)\b", " $1 $2 "),
        Rule::new(r"(?i)\b(more)('n)\b", " $1 $2 "),
        Rule::new(r"(?i)\b(wan)(na)(\s)", " $1 $2$3"),
        Rule::new(r"(?i) ('t)(is)\b", " $1 $2 "),
        Rule::new(r"(?i) ('t)(was)\b", " $1 $2 "),
    ]
});

/// Splits `text` into word, number and punctuation tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    // Leading and trailing spaces let the clitic rules see word boundaries
    // at the edges of the input.
    let mut padded = format!(" {text} ");

    for rule in RULES.iter() {
        if rule.pattern.is_match(&padded) {
            padded = rule
                .pattern
                .replace_all(&padded, rule.replacement)
                .into_owned();
        }
    }

    padded.split_whitespace().map(str::to_owned).collect()
}
