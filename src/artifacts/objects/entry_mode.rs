//! Interpretation of tree and index mode values
//!
//! Modes are stored as plain integers (octal on the wire for trees). The
//! decoders keep them raw; callers classify them through [`EntryMode`] using
//! the POSIX file type bits.

/// Mask selecting the file type bits of a mode
pub const S_IFMT: u32 = 0o170000;
pub const S_IFDIR: u32 = 0o040000;
pub const S_IFREG: u32 = 0o100000;
pub const S_IFLNK: u32 = 0o120000;
/// Submodule commit (directory and symlink bits together)
pub const S_IFGITLINK: u32 = 0o160000;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EntryMode {
    Directory,
    Regular,
    Executable,
    Symlink,
    Gitlink,
    Unknown(u32),
}

impl EntryMode {
    pub fn is_tree(&self) -> bool {
        matches!(self, EntryMode::Directory)
    }

    /// Type name of the object an entry with this mode points to
    pub fn object_kind(&self) -> &'static str {
        match self {
            EntryMode::Directory => "tree",
            EntryMode::Gitlink => "commit",
            _ => "blob",
        }
    }
}

impl From<u32> for EntryMode {
    fn from(mode: u32) -> Self {
        match mode & S_IFMT {
            S_IFDIR => EntryMode::Directory,
            S_IFREG if mode & 0o111 != 0 => EntryMode::Executable,
            S_IFREG => EntryMode::Regular,
            S_IFLNK => EntryMode::Symlink,
            S_IFGITLINK => EntryMode::Gitlink,
            _ => EntryMode::Unknown(mode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0o040000, EntryMode::Directory)]
    #[case(0o100644, EntryMode::Regular)]
    #[case(0o100755, EntryMode::Executable)]
    #[case(0o120000, EntryMode::Symlink)]
    #[case(0o160000, EntryMode::Gitlink)]
    #[case(0o010644, EntryMode::Unknown(0o010644))]
    fn classifies_by_file_type_bits(#[case] mode: u32, #[case] expected: EntryMode) {
        pretty_assertions::assert_eq!(EntryMode::from(mode), expected);
    }

    #[test]
    fn only_directories_are_trees() {
        assert!(EntryMode::from(0o040000).is_tree());
        assert!(!EntryMode::from(0o100644).is_tree());
        assert_eq!(EntryMode::from(0o160000).object_kind(), "commit");
    }
}
