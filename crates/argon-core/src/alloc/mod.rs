//! Hash collections backed by AHash.

pub use ahash::AHashMap as HashMap;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_ahash() {
        let mut map = HashMap::new();
        map.insert("hero0", 1u32);
        assert_eq!(map.get("hero0"), Some(&1));
    }
}
