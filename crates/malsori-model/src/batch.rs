/// How many target words are combined into a single search query.
pub const BATCH_SIZE: usize = 10;

/// Split the word list into consecutive groups of [`BATCH_SIZE`].
///
/// The final group holds the remainder (1 to `BATCH_SIZE` words); an exact
/// multiple produces no trailing empty group. Concatenating the groups in
/// order yields the input exactly.
pub fn batches(words: &[String]) -> std::slice::Chunks<'_, String> {
    words.chunks(BATCH_SIZE)
}
