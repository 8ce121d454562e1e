use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

/// Maximum number of answer buttons offered per round.
pub const MAX_OPTIONS: usize = 4;

/// Build the answer options for one round: up to [`MAX_OPTIONS`] distinct
/// class names, always containing `truth`, in shuffled order.
///
/// With fewer classes than [`MAX_OPTIONS`] every class is offered. `truth`
/// must be one of `class_names`.
pub fn build_options<R: Rng>(class_names: &[String], truth: &str, rng: &mut R) -> Vec<String> {
    let count = class_names.len().min(MAX_OPTIONS);
    let mut options: Vec<String> = class_names
        .choose_multiple(rng, count)
        .cloned()
        .collect();
    if !options.iter().any(|option| option == truth) {
        options[0] = truth.to_string();
    }
    options.shuffle(rng);
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn classes(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn options_always_contain_the_truth() {
        let names = classes(&["ball", "cat", "dog", "fish", "tree", "zebra"]);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let options = build_options(&names, "zebra", &mut rng);
            assert_eq!(options.len(), MAX_OPTIONS);
            assert!(options.iter().any(|option| option == "zebra"));
        }
    }

    #[test]
    fn options_are_distinct_and_from_the_class_list() {
        let names = classes(&["ball", "cat", "dog", "fish", "tree"]);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let options = build_options(&names, "cat", &mut rng);
            let mut sorted = options.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), options.len());
            for option in &options {
                assert!(names.contains(option));
            }
        }
    }

    #[test]
    fn small_class_lists_offer_every_class() {
        let names = classes(&["cat", "dog"]);
        let mut rng = StdRng::seed_from_u64(2);
        let mut options = build_options(&names, "dog", &mut rng);
        options.sort();
        assert_eq!(options, classes(&["cat", "dog"]));
    }
}
