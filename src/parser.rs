//! Directive line matchers
//!
//! A script line is recognized by the first matcher it satisfies in the
//! directive table, so table order is significant: `false` must be checked
//! as a word so that `false deliberately` fails while `falsehood` stays
//! unrecognized, and `echo ` must be checked before shorter prefixes could
//! shadow it. Matching is literal — there is no word splitting, quoting, or
//! expansion; whatever follows the matched prefix is the argument, verbatim.

/// How a directive line is recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// The whole line equals the pattern. The argument is empty.
    Exact(&'static str),
    /// The line starts with the pattern; the remainder is the argument.
    Prefix(&'static str),
    /// The line is exactly the word, or the word followed by a space and
    /// anything else (which becomes the argument).
    Word(&'static str),
}

impl Matcher {
    /// Try to match `line`, returning the argument slice on success.
    pub fn matches<'l>(&self, line: &'l str) -> Option<&'l str> {
        match *self {
            Matcher::Exact(pat) => (line == pat).then_some(""),
            Matcher::Prefix(pat) => line.strip_prefix(pat),
            Matcher::Word(word) => {
                if line == word {
                    Some("")
                } else {
                    line.strip_prefix(word).and_then(|rest| rest.strip_prefix(' '))
                }
            }
        }
    }
}
