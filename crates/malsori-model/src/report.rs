use crate::targets::TargetList;
use std::collections::HashSet;

/// Mutable state for one fetch run.
///
/// Holds one download counter per target position (indices correspond 1:1
/// with [`TargetList::words`]) and the set of asset paths already fetched
/// this run. Constructed once, mutated only by the search and retry passes,
/// summarized at run end.
#[derive(Debug)]
pub struct RunContext {
    targets: TargetList,
    counters: Vec<u32>,
    seen_assets: HashSet<String>,
    files: u32,
}

impl RunContext {
    pub fn new(targets: TargetList) -> Self {
        let counters = vec![0; targets.len()];
        Self {
            targets,
            counters,
            seen_assets: HashSet::new(),
            files: 0,
        }
    }

    pub fn targets(&self) -> &TargetList {
        &self.targets
    }

    pub fn is_target(&self, word: &str) -> bool {
        self.targets.contains(word)
    }

    /// Whether this asset path was already downloaded during this run.
    pub fn asset_seen(&self, path: &str) -> bool {
        self.seen_assets.contains(path)
    }

    /// Record a completed download of `path` for `word`, returning the
    /// 1-based sequence number to use in the output file name.
    ///
    /// Every position holding `word` advances together, so duplicate target
    /// words stay in step and the sequence number is per word string, never
    /// colliding across positions. Returns `None` if `word` is not a target.
    pub fn record_download(&mut self, word: &str, path: &str) -> Option<u32> {
        let positions = self.targets.positions_of(word)?;
        let mut sequence = 0;
        for &i in positions {
            self.counters[i] += 1;
            sequence = self.counters[i];
        }
        self.seen_assets.insert(path.to_string());
        self.files += 1;
        Some(sequence)
    }

    /// How many audio files this run has written.
    pub fn downloads(&self) -> u32 {
        self.files
    }

    /// The download count for one word (zero if not a target).
    pub fn count_for(&self, word: &str) -> u32 {
        self.targets
            .positions_of(word)
            .and_then(|positions| positions.first())
            .map_or(0, |&i| self.counters[i])
    }

    /// Words whose counter is still zero, in list order, one entry per
    /// position. A word appears here iff no audio was downloaded for it.
    pub fn unfound(&self) -> Vec<String> {
        self.targets
            .words()
            .iter()
            .zip(&self.counters)
            .filter(|(_, &count)| count == 0)
            .map(|(word, _)| word.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(words: &[&str]) -> RunContext {
        RunContext::new(TargetList::from_words(
            words.iter().map(|w| (*w).to_string()).collect(),
        ))
    }

    #[test]
    fn test_record_download_returns_sequence_numbers() {
        let mut ctx = context(&["사과", "배"]);
        assert_eq!(ctx.record_download("사과", "/a/1.mp3"), Some(1));
        assert_eq!(ctx.record_download("사과", "/a/2.mp3"), Some(2));
        assert_eq!(ctx.count_for("사과"), 2);
        assert_eq!(ctx.downloads(), 2);
    }

    #[test]
    fn test_non_target_word_is_rejected() {
        let mut ctx = context(&["사과"]);
        assert_eq!(ctx.record_download("포도", "/a/1.mp3"), None);
        assert_eq!(ctx.downloads(), 0);
    }

    #[test]
    fn test_duplicate_positions_advance_together() {
        let mut ctx = context(&["사과", "배", "사과"]);
        assert_eq!(ctx.record_download("사과", "/a/1.mp3"), Some(1));
        // Both 사과 positions are now found; only 배 remains.
        assert_eq!(ctx.unfound(), vec!["배"]);
    }

    #[test]
    fn test_seen_assets_are_tracked() {
        let mut ctx = context(&["사과"]);
        assert!(!ctx.asset_seen("/a/1.mp3"));
        ctx.record_download("사과", "/a/1.mp3");
        assert!(ctx.asset_seen("/a/1.mp3"));
    }

    #[test]
    fn test_unfound_lists_every_zero_counter_position() {
        let mut ctx = context(&["사과", "배", "포도"]);
        ctx.record_download("배", "/a/1.mp3");
        assert_eq!(ctx.unfound(), vec!["사과", "포도"]);
    }
}
