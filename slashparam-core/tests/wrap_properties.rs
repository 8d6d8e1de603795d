use proptest::prelude::*;
use slashparam_core::wrap;

/// Walk the input alongside the lines, allowing one dropped space per break.
fn reconstructs(input: &str, lines: &[String]) -> bool {
    let mut offsets = vec![0usize];
    for (i, line) in lines.iter().enumerate() {
        let mut next = Vec::new();
        for &at in &offsets {
            let rest = &input[at..];
            if rest.starts_with(line.as_str()) {
                next.push(at + line.len());
            }
            if i > 0 && rest.starts_with(' ') && rest[1..].starts_with(line.as_str()) {
                next.push(at + 1 + line.len());
            }
        }
        next.sort_unstable();
        next.dedup();
        offsets = next;
    }
    offsets.contains(&input.len())
}

proptest! {
    #[test]
    fn lines_reconstruct_the_input(input in "[a-z ]{0,60}", width in 1usize..20) {
        let lines: Vec<String> = wrap(&input, width).collect();
        prop_assert!(!lines.is_empty());
        prop_assert!(reconstructs(&input, &lines), "{:?} -> {:?}", input, lines);
    }

    #[test]
    fn only_single_words_exceed_the_width(input in "[a-z ]{0,60}", width in 1usize..20) {
        for line in wrap(&input, width) {
            prop_assert!(
                line.chars().count() <= width || !line.contains(' '),
                "{:?} is too wide for {}",
                line,
                width
            );
        }
    }

    #[test]
    fn no_characters_other_than_spaces_are_lost(input in "[a-z ]{0,60}", width in 0usize..20) {
        let joined: String = wrap(&input, width).collect();
        prop_assert_eq!(joined.replace(' ', ""), input.replace(' ', ""));
    }
}

#[test]
fn seed_case_matches_greedy_trace() {
    let lines: Vec<String> = wrap("a bb ccc", 3).collect();
    assert_eq!(lines, ["a ", "bb ", "ccc"]);
}
