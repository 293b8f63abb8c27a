//! Reorder engine
//!
//! Pure list-splice over the rank-ordered entries. Every input modality
//! (pointer drag, keyboard move, scripted call) reduces to a
//! [`MoveInstruction`] and goes through [`reorder`].

use super::error::RankingError;
use crate::model::RankedEntry;

/// Move the entry at `from_rank` next to the entry at `to_rank`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveInstruction {
    pub from_rank: u32,
    pub to_rank: u32,

    /// Land above the target (drop point above its midpoint) rather than below
    pub insert_before: bool,
}

impl MoveInstruction {
    pub fn new(from_rank: u32, to_rank: u32, insert_before: bool) -> Self {
        Self {
            from_rank,
            to_rank,
            insert_before,
        }
    }

    /// Position in the sequence after the moved entry has been taken out
    fn insertion_index(&self, remaining: usize) -> usize {
        let mut index = self.to_rank as usize - 1;
        if !self.insert_before {
            index += 1;
        }
        if self.from_rank < self.to_rank {
            index -= 1;
        }
        index.min(remaining)
    }
}

/// Compute the full replacement ordering for a move
///
/// `entries` must be in ascending rank order with dense ranks. The result
/// holds the same entries with `rank` reassigned to position + 1.
/// Dropping an entry onto itself (`from_rank == to_rank`) leaves the order
/// unchanged whichever side it lands on.
pub fn reorder(
    entries: &[RankedEntry],
    instruction: MoveInstruction,
) -> Result<Vec<RankedEntry>, RankingError> {
    let size = entries.len();
    let in_range = |rank: u32| rank >= 1 && rank as usize <= size;
    if !in_range(instruction.from_rank) || !in_range(instruction.to_rank) {
        return Err(RankingError::InvalidMove {
            from_rank: instruction.from_rank,
            to_rank: instruction.to_rank,
            size,
        });
    }

    let mut sequence = entries.to_vec();

    if instruction.from_rank != instruction.to_rank {
        let moved = sequence.remove(instruction.from_rank as usize - 1);
        let index = instruction.insertion_index(sequence.len());
        sequence.insert(index, moved);
    }

    for (position, entry) in sequence.iter_mut().enumerate() {
        entry.rank = position as u32 + 1;
    }

    Ok(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Song;

    fn list(names: &[&str]) -> Vec<RankedEntry> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| RankedEntry::new(Song::new(*n, "Artist"), i as u32 + 1))
            .collect()
    }

    fn order(entries: &[RankedEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.song.name.as_str()).collect()
    }

    #[test]
    fn test_move_first_below_last() {
        let result = reorder(&list(&["A", "B", "C"]), MoveInstruction::new(1, 3, false)).unwrap();
        assert_eq!(order(&result), vec!["B", "C", "A"]);
        assert_eq!(result.iter().map(|e| e.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_move_first_above_last() {
        let result = reorder(&list(&["A", "B", "C"]), MoveInstruction::new(1, 3, true)).unwrap();
        assert_eq!(order(&result), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_move_up_before_target() {
        let result =
            reorder(&list(&["A", "B", "C", "D"]), MoveInstruction::new(4, 2, true)).unwrap();
        assert_eq!(order(&result), vec!["A", "D", "B", "C"]);
    }

    #[test]
    fn test_move_up_after_target() {
        let result =
            reorder(&list(&["A", "B", "C", "D"]), MoveInstruction::new(4, 1, false)).unwrap();
        assert_eq!(order(&result), vec!["A", "D", "B", "C"]);
    }

    #[test]
    fn test_move_to_top() {
        let result = reorder(&list(&["A", "B", "C"]), MoveInstruction::new(3, 1, true)).unwrap();
        assert_eq!(order(&result), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_drop_on_self_is_noop() {
        let original = list(&["A", "B", "C"]);
        for insert_before in [true, false] {
            let result = reorder(&original, MoveInstruction::new(2, 2, insert_before)).unwrap();
            assert_eq!(result, original);
        }
    }

    #[test]
    fn test_out_of_range_move_is_rejected() {
        let original = list(&["A", "B"]);
        assert!(matches!(
            reorder(&original, MoveInstruction::new(0, 1, true)),
            Err(RankingError::InvalidMove { .. })
        ));
        assert!(matches!(
            reorder(&original, MoveInstruction::new(1, 3, true)),
            Err(RankingError::InvalidMove { size: 2, .. })
        ));
    }
}
