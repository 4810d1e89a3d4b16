//! Property-based tests for tokenizing, quoting and expansion.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::environment::Environment;
    use crate::parser::{parse, tokenize, unquote, Parsed};
    use proptest::prelude::*;

    fn args_of(line: &str, env: &Environment) -> Vec<String> {
        match parse(line, env) {
            Ok(Parsed::Pipeline(commands)) if commands.len() == 1 => commands[0].args().to_vec(),
            other => panic!("unexpected parse of {:?}: {:?}", line, other),
        }
    }

    // ============================================================================
    // tokenize property tests
    // ============================================================================

    proptest! {
        /// Property: plain words separated by whitespace come back unchanged
        #[test]
        fn tokenize_plain_words(
            words in prop::collection::vec("[A-Za-z0-9_./-]{1,12}", 1..8),
            gap in "[ \t]{1,3}",
        ) {
            let line = words.join(&gap);
            prop_assert_eq!(tokenize(&line).unwrap(), words);
        }

        /// Property: tokenize never panics
        #[test]
        fn tokenize_never_panics(input in ".*") {
            let _ = tokenize(&input);
        }

        /// Property: every unquoted pipe becomes its own token
        #[test]
        fn tokenize_counts_pipes(stages in prop::collection::vec("[a-z]{1,6}", 1..6)) {
            let line = stages.join("|");
            let tokens = tokenize(&line).unwrap();
            prop_assert_eq!(tokens.len(), stages.len() * 2 - 1);
            prop_assert_eq!(tokens.iter().filter(|t| *t == "|").count(), stages.len() - 1);
        }
    }

    // ============================================================================
    // unquote property tests
    // ============================================================================

    proptest! {
        /// Property: single quotes preserve their content exactly
        #[test]
        fn unquote_single_quotes_are_literal(content in "[^']*") {
            prop_assert_eq!(unquote(&format!("'{}'", content)), content);
        }

        /// Property: unquoting text without quotes or backslashes is identity
        #[test]
        fn unquote_plain_text_is_identity(content in "[^'\"\\\\]*") {
            prop_assert_eq!(unquote(&content), content);
        }
    }

    // ============================================================================
    // expansion property tests
    // ============================================================================

    proptest! {
        /// Property: a double-quoted variable expands to exactly its value
        #[test]
        fn quoted_expansion_preserves_value(value in ".*") {
            let mut env = Environment::new();
            env.set("v", value.clone());
            prop_assert_eq!(args_of("echo \"$v\"", &env), vec![value]);
        }

        /// Property: an unquoted value without blanks or pipes stays one word
        #[test]
        fn unquoted_expansion_of_single_word(value in "[^\\s|]+") {
            let mut env = Environment::new();
            env.set("v", value.clone());
            prop_assert_eq!(args_of("echo $v", &env), vec![value]);
        }

        /// Property: parse never panics, whatever the line and the variables
        #[test]
        fn parse_never_panics(line in ".*", value in ".*") {
            let mut env = Environment::new();
            env.set("x", value);
            let _ = parse(&line, &env);
        }
    }
}
