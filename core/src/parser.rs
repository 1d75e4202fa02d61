//! Generic parser combinators over string slices.
//!
//! A [`Parser`] is a function from the remaining input to an optional value. On
//! success it advances the input; on failure every combinator leaves the input
//! exactly where it was when that combinator was entered, so alternatives can be
//! retried from the same position.

use std::fmt;
use std::sync::Arc;

type RunFn<A> = dyn Fn(&mut &str) -> Option<A> + Send + Sync;

/// Result of running a parser against a complete string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'a, A> {
    /// Parsed value, if any
    pub result: Option<A>,
    /// Input left over after the parser stopped
    pub rest: &'a str,
}

impl<'a, A> Match<'a, A> {
    /// Pair a result with the unconsumed input
    pub fn new(result: Option<A>, rest: &'a str) -> Self {
        Self { result, rest }
    }

    /// True when a value was produced and nothing is left over
    pub fn is_complete(&self) -> bool {
        self.result.is_some() && self.rest.is_empty()
    }
}

/// A composable parser producing values of type `A`
pub struct Parser<A> {
    run: Arc<RunFn<A>>,
}

impl<A> Clone for Parser<A> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
        }
    }
}

impl<A> fmt::Debug for Parser<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Parser")
    }
}

impl<A: 'static> Parser<A> {
    pub fn new(run: impl Fn(&mut &str) -> Option<A> + Send + Sync + 'static) -> Self {
        Self { run: Arc::new(run) }
    }

    /// Run against the cursor, advancing it on success
    pub fn parse(&self, input: &mut &str) -> Option<A> {
        (self.run)(input)
    }

    /// Run against a full string and report what is left
    pub fn run<'a>(&self, input: &'a str) -> Match<'a, A> {
        let mut rest = input;
        let result = self.parse(&mut rest);
        Match { result, rest }
    }

    pub fn map<B: 'static>(self, f: impl Fn(A) -> B + Send + Sync + 'static) -> Parser<B> {
        Parser::new(move |input| {
            let mut rest = *input;
            let value = self.parse(&mut rest)?;
            *input = rest;
            Some(f(value))
        })
    }

    /// Chain a parser built from this parser's result. Either stage failing
    /// restores the input to where this combinator started.
    pub fn flat_map<B: 'static>(
        self,
        f: impl Fn(A) -> Parser<B> + Send + Sync + 'static,
    ) -> Parser<B> {
        Parser::new(move |input| {
            let mut rest = *input;
            let first = self.parse(&mut rest)?;
            let second = f(first).parse(&mut rest)?;
            *input = rest;
            Some(second)
        })
    }

    /// Additionally require the input to be exhausted after this parser
    pub fn exhaustive(self) -> Parser<A> {
        zip(self, end()).map(|(value, ())| value)
    }
}

/// Same as [`Parser::exhaustive`]
pub fn append_end<A: 'static>(parser: Parser<A>) -> Parser<A> {
    parser.exhaustive()
}

/// Matches `expected` exactly
pub fn literal(expected: &str) -> Parser<()> {
    let expected = expected.to_string();
    Parser::new(move |input| {
        let rest = input.strip_prefix(expected.as_str())?;
        *input = rest;
        Some(())
    })
}

/// Matches `expected` exactly and yields it
pub fn string(expected: &str) -> Parser<String> {
    let owned = expected.to_string();
    literal(expected).map(move |()| owned.clone())
}

/// Consumes the longest prefix whose characters satisfy `predicate`. Never fails.
pub fn prefix_while(predicate: impl Fn(char) -> bool + Send + Sync + 'static) -> Parser<String> {
    Parser::new(move |input| {
        let split = input
            .char_indices()
            .find(|&(_, c)| !predicate(c))
            .map_or(input.len(), |(idx, _)| idx);
        let (matched, rest) = input.split_at(split);
        *input = rest;
        Some(matched.to_string())
    })
}

/// Consumes everything before the first `marker`, or the whole input when the
/// marker does not occur. Never fails.
pub fn prefix_up_to(marker: &str) -> Parser<String> {
    let marker = marker.to_string();
    Parser::new(move |input| {
        let split = input.find(marker.as_str()).unwrap_or(input.len());
        let (matched, rest) = input.split_at(split);
        *input = rest;
        Some(matched.to_string())
    })
}

/// Consumes one character satisfying `predicate`
pub fn char_in(predicate: impl Fn(char) -> bool + Send + Sync + 'static) -> Parser<char> {
    Parser::new(move |input| {
        let c = input.chars().next().filter(|&c| predicate(c))?;
        *input = &input[c.len_utf8()..];
        Some(c)
    })
}

/// Consumes any single character
pub fn any_char() -> Parser<char> {
    char_in(|_| true)
}

/// Consumes a run of ASCII digits as an unsigned integer
pub fn int() -> Parser<u64> {
    Parser::new(|input| {
        let len = input.bytes().take_while(u8::is_ascii_digit).count();
        let value = input[..len].parse().ok()?;
        *input = &input[len..];
        Some(value)
    })
}

/// Succeeds only on exhausted input
pub fn end() -> Parser<()> {
    Parser::new(|input| input.is_empty().then_some(()))
}

/// Succeeds with `value` without consuming anything
pub fn always<A: Clone + Send + Sync + 'static>(value: A) -> Parser<A> {
    Parser::new(move |_| Some(value.clone()))
}

/// Always fails
pub fn never<A: 'static>() -> Parser<A> {
    Parser::new(|_| None)
}

pub fn zip<A: 'static, B: 'static>(a: Parser<A>, b: Parser<B>) -> Parser<(A, B)> {
    Parser::new(move |input| {
        let mut rest = *input;
        let first = a.parse(&mut rest)?;
        let second = b.parse(&mut rest)?;
        *input = rest;
        Some((first, second))
    })
}

pub fn zip3<A: 'static, B: 'static, C: 'static>(
    a: Parser<A>,
    b: Parser<B>,
    c: Parser<C>,
) -> Parser<(A, B, C)> {
    zip(a, zip(b, c)).map(|(a, (b, c))| (a, b, c))
}

pub fn zip4<A: 'static, B: 'static, C: 'static, D: 'static>(
    a: Parser<A>,
    b: Parser<B>,
    c: Parser<C>,
    d: Parser<D>,
) -> Parser<(A, B, C, D)> {
    zip(a, zip3(b, c, d)).map(|(a, (b, c, d))| (a, b, c, d))
}

pub fn zip5<A: 'static, B: 'static, C: 'static, D: 'static, E: 'static>(
    a: Parser<A>,
    b: Parser<B>,
    c: Parser<C>,
    d: Parser<D>,
    e: Parser<E>,
) -> Parser<(A, B, C, D, E)> {
    zip(a, zip4(b, c, d, e)).map(|(a, (b, c, d, e))| (a, b, c, d, e))
}

pub fn zip6<A: 'static, B: 'static, C: 'static, D: 'static, E: 'static, F: 'static>(
    a: Parser<A>,
    b: Parser<B>,
    c: Parser<C>,
    d: Parser<D>,
    e: Parser<E>,
    f: Parser<F>,
) -> Parser<(A, B, C, D, E, F)> {
    zip(a, zip5(b, c, d, e, f)).map(|(a, (b, c, d, e, f))| (a, b, c, d, e, f))
}

#[allow(clippy::type_complexity)]
pub fn zip7<
    A: 'static,
    B: 'static,
    C: 'static,
    D: 'static,
    E: 'static,
    F: 'static,
    G: 'static,
>(
    a: Parser<A>,
    b: Parser<B>,
    c: Parser<C>,
    d: Parser<D>,
    e: Parser<E>,
    f: Parser<F>,
    g: Parser<G>,
) -> Parser<(A, B, C, D, E, F, G)> {
    zip(a, zip6(b, c, d, e, f, g)).map(|(a, (b, c, d, e, f, g))| (a, b, c, d, e, f, g))
}

/// First alternative to succeed wins. Every alternative starts from the same
/// position.
pub fn one_of<A: 'static>(parsers: Vec<Parser<A>>) -> Parser<A> {
    Parser::new(move |input| {
        parsers.iter().find_map(|parser| {
            let mut rest = *input;
            let value = parser.parse(&mut rest)?;
            *input = rest;
            Some(value)
        })
    })
}

/// Picks the successful alternative that consumed the least input. Ties go to
/// the alternative listed first.
pub fn shortest_of<A: 'static>(parsers: Vec<Parser<A>>) -> Parser<A> {
    Parser::new(move |input| {
        let mut best: Option<(A, &str)> = None;
        for parser in &parsers {
            let mut rest = *input;
            let Some(value) = parser.parse(&mut rest) else {
                continue;
            };
            let longer_rest = best
                .as_ref()
                .is_none_or(|(_, best_rest)| rest.len() > best_rest.len());
            if longer_rest {
                best = Some((value, rest));
            }
        }
        let (value, rest) = best?;
        *input = rest;
        Some(value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal() {
        assert_eq!(literal("foo").run("foobar"), Match::new(Some(()), "bar"));
        assert_eq!(literal("foo").run("fobar"), Match::new(None, "fobar"));
        assert_eq!(literal("").run("abc"), Match::new(Some(()), "abc"));
    }

    #[test]
    fn test_int() {
        assert_eq!(int().run("123abc"), Match::new(Some(123), "abc"));
        assert_eq!(int().run("abc"), Match::new(None, "abc"));
        assert_eq!(int().run(""), Match::new(None, ""));
        // overflow consumes nothing
        assert_eq!(
            int().run("99999999999999999999999.1"),
            Match::new(None, "99999999999999999999999.1")
        );
    }

    #[test]
    fn test_int_parses_any_digit_run() {
        for n in [0_u64, 7, 42, 1000, 4_294_967_296, u64::MAX] {
            let input = n.to_string();
            assert_eq!(int().run(&input), Match::new(Some(n), ""));
        }
    }

    #[test]
    fn test_prefix_while() {
        let digits = prefix_while(|c| c.is_ascii_digit());
        assert_eq!(digits.run("12ab"), Match::new(Some("12".to_string()), "ab"));
        assert_eq!(digits.run("ab"), Match::new(Some(String::new()), "ab"));
        assert_eq!(digits.run("ünï"), Match::new(Some(String::new()), "ünï"));

        let letters = prefix_while(char::is_alphabetic);
        assert_eq!(letters.run("ünï-1"), Match::new(Some("ünï".to_string()), "-1"));
    }

    #[test]
    fn test_prefix_up_to() {
        let parser = prefix_up_to("@");
        assert_eq!(
            parser.run("https://host/repo@1.2.3"),
            Match::new(Some("https://host/repo".to_string()), "@1.2.3")
        );
        assert_eq!(
            parser.run("https://host/repo"),
            Match::new(Some("https://host/repo".to_string()), "")
        );
        assert_eq!(parser.run("@x"), Match::new(Some(String::new()), "@x"));
        assert_eq!(
            prefix_up_to("..<").run("1.2.3..<2"),
            Match::new(Some("1.2.3".to_string()), "..<2")
        );
    }

    #[test]
    fn test_char_in() {
        let vowel = char_in(|c| "aeiou".contains(c));
        assert_eq!(vowel.run("abc"), Match::new(Some('a'), "bc"));
        assert_eq!(vowel.run("bc"), Match::new(None, "bc"));
        assert_eq!(vowel.run(""), Match::new(None, ""));
        assert_eq!(any_char().run("éa"), Match::new(Some('é'), "a"));
    }

    #[test]
    fn test_end_always_never() {
        assert_eq!(end().run(""), Match::new(Some(()), ""));
        assert_eq!(end().run("x"), Match::new(None, "x"));
        assert_eq!(always(5).run("abc"), Match::new(Some(5), "abc"));
        assert_eq!(never::<i32>().run("abc"), Match::new(None, "abc"));
    }

    #[test]
    fn test_map() {
        let parser = int().map(|n| n * 2);
        assert_eq!(parser.run("21!"), Match::new(Some(42), "!"));
        assert_eq!(parser.run("!"), Match::new(None, "!"));
    }

    #[test]
    fn test_zip_restores_input_on_failure() {
        let parser = zip3(int(), literal("."), int());
        assert_eq!(parser.run("1.2rest"), Match::new(Some((1, (), 2)), "rest"));
        assert_eq!(parser.run("1.x"), Match::new(None, "1.x"));
        assert_eq!(parser.run("1-2"), Match::new(None, "1-2"));
    }

    #[test]
    fn test_zip7() {
        let parser = zip7(
            int(),
            literal("."),
            int(),
            literal("."),
            int(),
            string("-"),
            prefix_while(char::is_alphanumeric),
        );
        let m = parser.run("1.2.3-rc1 tail");
        assert_eq!(
            m.result,
            Some((1, (), 2, (), 3, "-".to_string(), "rc1".to_string()))
        );
        assert_eq!(m.rest, " tail");
        assert_eq!(parser.run("1.2.3+rc1").rest, "1.2.3+rc1");
    }

    #[test]
    fn test_flat_map_is_all_or_nothing() {
        // a digit count followed by that many letters
        let counted = int().flat_map(|n| {
            prefix_while(char::is_alphabetic).flat_map(move |s| {
                if s.len() as u64 == n {
                    always(s)
                } else {
                    never()
                }
            })
        });
        assert_eq!(counted.run("3abc!"), Match::new(Some("abc".to_string()), "!"));
        assert_eq!(counted.run("3ab!"), Match::new(None, "3ab!"));
        assert_eq!(counted.run("x"), Match::new(None, "x"));
    }

    #[test]
    fn test_one_of_is_left_biased() {
        let parser = one_of(vec![string("ab"), string("abc")]);
        assert_eq!(parser.run("abcd"), Match::new(Some("ab".to_string()), "cd"));

        let parser = one_of(vec![string("abc"), string("ab")]);
        assert_eq!(parser.run("abcd"), Match::new(Some("abc".to_string()), "d"));
    }

    #[test]
    fn test_one_of_does_not_leak_partial_consumption() {
        // the first alternative consumes "1." before failing
        let parser = one_of(vec![
            zip3(int(), literal("."), literal("x")).map(|_| "dotted"),
            zip(int(), literal(".5")).map(|_| "half"),
        ]);
        assert_eq!(parser.run("1.5"), Match::new(Some("half"), ""));
        assert_eq!(parser.run("1.7"), Match::new(None, "1.7"));
        assert_eq!(one_of::<()>(vec![]).run("a"), Match::new(None, "a"));
    }

    #[test]
    fn test_shortest_of() {
        let parser = shortest_of(vec![prefix_up_to("@"), prefix_up_to(":")]);
        assert_eq!(
            parser.run("git@host:repo"),
            Match::new(Some("git".to_string()), "@host:repo")
        );
        assert_eq!(
            parser.run("host:repo@x"),
            Match::new(Some("host".to_string()), ":repo@x")
        );
    }

    #[test]
    fn test_shortest_of_ties_and_failures() {
        // tie: both leave "b", first listed wins
        let parser = shortest_of(vec![
            literal("a").map(|()| 1),
            literal("a").map(|()| 2),
        ]);
        assert_eq!(parser.run("ab"), Match::new(Some(1), "b"));

        // a failed candidate is not considered even though it consumed nothing
        let parser = shortest_of(vec![literal("x").map(|()| 0), string("ab").map(|_| 1)]);
        assert_eq!(parser.run("abc"), Match::new(Some(1), "c"));

        let parser = shortest_of(vec![literal("x"), literal("y")]);
        assert_eq!(parser.run("abc"), Match::new(None, "abc"));
    }

    #[test]
    fn test_exhaustive() {
        let parser = int().exhaustive();
        assert_eq!(parser.run("12"), Match::new(Some(12), ""));
        assert_eq!(parser.run("12a"), Match::new(None, "12a"));
        assert_eq!(append_end(literal("a")).run("a"), Match::new(Some(()), ""));
    }

    #[test]
    fn test_parsers_are_reusable_across_threads() {
        let parser = zip3(int(), literal("."), int()).map(|(a, (), b)| a + b);
        let handles: Vec<_> = (0..4_u64)
            .map(|i| {
                let parser = parser.clone();
                std::thread::spawn(move || parser.run(&format!("{i}.{i}")).result)
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), Some(2 * i as u64));
        }
    }
}
