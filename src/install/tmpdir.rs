//! Temporary extraction directory naming.
//!
//! Each annotator install extracts into a fresh directory named after the
//! package plus a random suffix, so repeated or overlapping installs do not
//! extract over each other. This is collision avoidance, not locking.

use rand::Rng;
use std::path::{Path, PathBuf};

/// Number of random lowercase letters in the suffix.
pub const SUFFIX_LEN: usize = 4;

/// `<identifier>_<4 random lowercase letters>`.
pub fn temp_dir_name<R: Rng + ?Sized>(identifier: &str, rng: &mut R) -> String {
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| char::from(rng.gen_range(b'a'..=b'z')))
        .collect();
    format!("{}_{}", identifier, suffix)
}

/// A fresh extraction directory path under `root`.
pub fn temp_dest<R: Rng + ?Sized>(root: &Path, identifier: &str, rng: &mut R) -> PathBuf {
    root.join(temp_dir_name(identifier, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn suffix_of(name: &str) -> &str {
        name.rsplit_once('_').map(|(_, s)| s).unwrap()
    }

    #[test]
    fn name_has_identifier_and_four_lowercase_letters() {
        let mut rng = StdRng::seed_from_u64(7);
        let name = temp_dir_name("membraneAnnotator-1.0", &mut rng);

        assert!(name.starts_with("membraneAnnotator-1.0_"));
        let suffix = suffix_of(&name);
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn same_seed_gives_same_name() {
        let a = temp_dir_name("x", &mut StdRng::seed_from_u64(42));
        let b = temp_dir_name("x", &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn successive_names_differ() {
        let mut rng = StdRng::seed_from_u64(1);
        let names: std::collections::HashSet<String> =
            (0..50).map(|_| temp_dir_name("x", &mut rng)).collect();
        assert!(names.len() > 45);
    }

    #[test]
    fn temp_dest_is_under_root() {
        let mut rng = StdRng::seed_from_u64(3);
        let dest = temp_dest(Path::new("/tmp"), "membraneAnnotator-1.0", &mut rng);
        assert_eq!(dest.parent(), Some(Path::new("/tmp")));
    }

    #[test]
    fn thread_rng_works_as_source() {
        let name = temp_dir_name("x", &mut rand::thread_rng());
        assert_eq!(suffix_of(&name).len(), SUFFIX_LEN);
    }
}
