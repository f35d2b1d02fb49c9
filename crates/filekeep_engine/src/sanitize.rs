/// Characters rejected in file names on at least one supported platform.
const INVALID_FILE_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Removes every character that cannot be used in a file name.
///
/// Useful for turning a document title into a storage location. Strips path separators,
/// the characters Windows reserves, NUL and the other ASCII control characters. Never fails;
/// a string made only of invalid characters comes back empty.
///
/// ```
/// use filekeep_engine::remove_invalid_file_name_characters;
///
/// assert_eq!(
///     remove_invalid_file_name_characters("Q3: plan/draft?"),
///     "Q3 plandraft"
/// );
/// ```
pub fn remove_invalid_file_name_characters(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_ascii_control() && !INVALID_FILE_NAME_CHARS.contains(c))
        .collect()
}
