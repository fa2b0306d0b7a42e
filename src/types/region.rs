use smallvec::SmallVec;

/// Result of an int-array expression.
pub type IntArray = SmallVec<[i32; 8]>;

/// An ordered set of sites, ascending and without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    sites: SmallVec<[i32; 8]>,
}

impl Region {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Negative sites are dropped.
    pub fn from_sites<T: IntoIterator<Item = i32>>(sites: T) -> Self {
        let mut sites: SmallVec<[i32; 8]> = sites.into_iter().filter(|s| *s >= 0).collect();
        sites.sort_unstable();
        sites.dedup();
        Self { sites }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    #[inline]
    pub fn contains(&self, site: i32) -> bool {
        self.sites.binary_search(&site).is_ok()
    }

    #[inline]
    pub fn sites(&self) -> &[i32] {
        &self.sites
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.sites.iter().copied()
    }

    pub fn union(&self, other: &Region) -> Region {
        Self::from_sites(self.iter().chain(other.iter()))
    }

    pub fn insert(&mut self, site: i32) {
        if site < 0 {
            return;
        }
        if let Err(i) = self.sites.binary_search(&site) {
            self.sites.insert(i, site);
        }
    }
}

impl FromIterator<i32> for Region {
    fn from_iter<T: IntoIterator<Item = i32>>(iter: T) -> Self {
        Self::from_sites(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sites_sorts_and_dedups() {
        let r = Region::from_sites([9, 3, 5, 3, -1]);
        assert_eq!(&[3, 5, 9], r.sites());
        assert!(r.contains(5));
        assert!(!r.contains(4));
    }

    #[test]
    fn test_union_and_insert() {
        let mut r = Region::from_sites([1, 4]).union(&Region::from_sites([2, 4]));
        assert_eq!(&[1, 2, 4], r.sites());
        r.insert(3);
        r.insert(3);
        assert_eq!(&[1, 2, 3, 4], r.sites());
    }
}
