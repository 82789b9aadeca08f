// Run-length constraints on consecutive vowels and consonants

use chakra_core::LetterClass;
use serde::{Deserialize, Serialize};

/// Maximum number of consecutive vowels and consonants along a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunLimits {
    pub max_vowels: usize,
    pub max_consonants: usize,
}

impl Default for RunLimits {
    fn default() -> Self {
        Self {
            max_vowels: 2,
            max_consonants: 3,
        }
    }
}

impl RunLimits {
    pub fn new(max_vowels: usize, max_consonants: usize) -> Self {
        Self {
            max_vowels,
            max_consonants,
        }
    }

    /// True when both counters are within their maxima.
    pub fn allows(&self, run: RunState) -> bool {
        run.vowels <= self.max_vowels && run.consonants <= self.max_consonants
    }

    /// Maximum for a class; `None` for classes that are never counted.
    pub fn max_for(&self, class: LetterClass) -> Option<usize> {
        match class {
            LetterClass::Vowel => Some(self.max_vowels),
            LetterClass::Consonant => Some(self.max_consonants),
            LetterClass::Special | LetterClass::Unknown => None,
        }
    }
}

/// Length of the trailing vowel run and consonant run of a path.
///
/// At most one counter is non-zero. Special marks reset both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunState {
    pub vowels: usize,
    pub consonants: usize,
}

impl RunState {
    /// State of a one-vertex path.
    pub fn start(class: LetterClass) -> Self {
        RunState::default().advance(class)
    }

    /// State after appending a vertex of `class`.
    pub fn advance(self, class: LetterClass) -> Self {
        match class {
            LetterClass::Vowel => RunState {
                vowels: self.vowels + 1,
                consonants: 0,
            },
            LetterClass::Consonant => RunState {
                vowels: 0,
                consonants: self.consonants + 1,
            },
            LetterClass::Special | LetterClass::Unknown => RunState::default(),
        }
    }

    /// Recompute the state from a sequence of classes, last element being
    /// the path tail. Only the trailing run is examined.
    pub fn of_suffix<I>(classes: I) -> Self
    where
        I: DoubleEndedIterator<Item = LetterClass>,
    {
        let mut rev = classes.rev();
        let Some(tail) = rev.next() else {
            return RunState::default();
        };
        let run = 1 + rev.take_while(|c| *c == tail).count();
        match tail {
            LetterClass::Vowel => RunState {
                vowels: run,
                consonants: 0,
            },
            LetterClass::Consonant => RunState {
                vowels: 0,
                consonants: run,
            },
            LetterClass::Special | LetterClass::Unknown => RunState::default(),
        }
    }

    /// Current run length for `class`.
    pub fn count(&self, class: LetterClass) -> usize {
        match class {
            LetterClass::Vowel => self.vowels,
            LetterClass::Consonant => self.consonants,
            LetterClass::Special | LetterClass::Unknown => 0,
        }
    }
}

/// Length of the leading run of the first element's class.
pub fn leading_run<I>(classes: I) -> (LetterClass, usize)
where
    I: Iterator<Item = LetterClass>,
{
    let mut iter = classes;
    let Some(head) = iter.next() else {
        return (LetterClass::Unknown, 0);
    };
    (head, 1 + iter.take_while(|c| *c == head).count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use LetterClass::*;

    #[test]
    fn advance_counts_runs() {
        let s = RunState::start(Vowel);
        assert_eq!(s, RunState { vowels: 1, consonants: 0 });
        let s = s.advance(Vowel);
        assert_eq!(s.vowels, 2);
        let s = s.advance(Consonant);
        assert_eq!(s, RunState { vowels: 0, consonants: 1 });
        let s = s.advance(Special);
        assert_eq!(s, RunState::default());
    }

    #[test]
    fn default_limits() {
        let limits = RunLimits::default();
        assert!(limits.allows(RunState { vowels: 2, consonants: 0 }));
        assert!(!limits.allows(RunState { vowels: 3, consonants: 0 }));
        assert!(limits.allows(RunState { vowels: 0, consonants: 3 }));
        assert!(!limits.allows(RunState { vowels: 0, consonants: 4 }));
    }

    #[test]
    fn suffix_matches_incremental_state() {
        let classes = [Vowel, Consonant, Consonant, Vowel, Vowel, Special, Consonant];
        let mut state = RunState::default();
        for (i, class) in classes.iter().enumerate() {
            state = state.advance(*class);
            assert_eq!(RunState::of_suffix(classes[..=i].iter().copied()), state);
        }
        assert_eq!(RunState::of_suffix(std::iter::empty::<LetterClass>()), RunState::default());
    }

    #[test]
    fn leading_run_counts_prefix() {
        assert_eq!(leading_run([Vowel, Vowel, Consonant, Vowel].into_iter()), (Vowel, 2));
        assert_eq!(leading_run([Special, Special].into_iter()), (Special, 2));
        assert_eq!(leading_run(std::iter::empty()), (Unknown, 0));
    }
}
