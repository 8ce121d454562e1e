use rand::Rng;
use rand::seq::SliceRandom;

/// One word button in a sentence round. Duplicated words get one slot each,
/// so picking consumes a single instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSlot {
    pub text: String,
    pub used: bool,
}

/// State of one sentence builder round: a target sentence, its words in
/// shuffled order, and the words picked so far.
#[derive(Debug, Clone)]
pub struct SentenceRound {
    target: String,
    slots: Vec<WordSlot>,
    picked: Vec<usize>,
}

impl SentenceRound {
    /// Start a round for `sentence`. The words are shuffled; if the shuffle
    /// of a multi-word sentence lands back on the original order it is
    /// reshuffled once so the exercise is not already solved.
    pub fn new<R: Rng>(sentence: &str, rng: &mut R) -> Self {
        let original: Vec<String> = sentence.split_whitespace().map(str::to_string).collect();
        let target = original.join(" ");
        let mut words = original.clone();
        words.shuffle(rng);
        if words.len() > 1 && words == original {
            words.shuffle(rng);
        }
        Self {
            target,
            slots: words
                .into_iter()
                .map(|text| WordSlot { text, used: false })
                .collect(),
            picked: Vec::new(),
        }
    }

    /// The normalized target sentence (single spaces between words).
    pub fn target(&self) -> &str {
        &self.target
    }

    /// All word slots in presentation order.
    pub fn slots(&self) -> &[WordSlot] {
        &self.slots
    }

    /// Pick the word at `slot`. Ignored when the slot is already used or
    /// the round is complete.
    pub fn pick(&mut self, slot: usize) {
        if self.is_complete() {
            return;
        }
        if let Some(word) = self.slots.get_mut(slot) {
            if !word.used {
                word.used = true;
                self.picked.push(slot);
            }
        }
    }

    /// The sentence built from the picked words so far.
    pub fn built(&self) -> String {
        self.picked
            .iter()
            .map(|&slot| self.slots[slot].text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether every word has been picked.
    pub fn is_complete(&self) -> bool {
        self.picked.len() == self.slots.len()
    }

    /// Case-insensitive comparison of the built sentence against the target.
    /// Only meaningful once [`Self::is_complete`] is true.
    pub fn is_correct(&self) -> bool {
        self.is_complete() && self.built().to_lowercase() == self.target.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn picking_in_target_order_is_correct() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut round = SentenceRound::new("The cat sleeps", &mut rng);
        let target_words: Vec<String> = round.target().split(' ').map(str::to_string).collect();
        for word in &target_words {
            let slot = round
                .slots()
                .iter()
                .position(|slot| !slot.used && slot.text == *word)
                .unwrap();
            round.pick(slot);
        }
        assert!(round.is_complete());
        assert!(round.is_correct());
    }

    #[test]
    fn wrong_order_is_incorrect_but_complete() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut round = SentenceRound::new("red ball bounces", &mut rng);
        // Pick in reverse target order; the words are unique, so the
        // built sentence cannot match.
        for word in ["bounces", "ball", "red"] {
            let slot = round
                .slots()
                .iter()
                .position(|slot| !slot.used && slot.text == word)
                .unwrap();
            round.pick(slot);
        }
        assert!(round.is_complete());
        assert!(!round.is_correct());
        assert_eq!(round.built(), "bounces ball red");
    }

    #[test]
    fn comparison_is_case_insensitive() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut round = SentenceRound::new("Dogs Run", &mut rng);
        let lower = ["dogs", "run"];
        for word in lower {
            let slot = round
                .slots()
                .iter()
                .position(|slot| !slot.used && slot.text.to_lowercase() == word)
                .unwrap();
            round.pick(slot);
        }
        assert!(round.is_correct());
    }

    #[test]
    fn duplicate_words_are_consumed_per_slot() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut round = SentenceRound::new("run run run", &mut rng);
        round.pick(0);
        round.pick(0);
        assert_eq!(round.built(), "run");
        round.pick(1);
        round.pick(2);
        assert!(round.is_complete());
        assert!(round.is_correct());
    }

    #[test]
    fn used_slots_cannot_be_picked_again() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut round = SentenceRound::new("big blue sky", &mut rng);
        round.pick(1);
        let built = round.built();
        round.pick(1);
        assert_eq!(round.built(), built);
    }

    #[test]
    fn single_word_sentences_are_solved_in_one_pick() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut round = SentenceRound::new("hello", &mut rng);
        round.pick(0);
        assert!(round.is_correct());
    }
}
