use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// an ordered set in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<K> {
    /// Insert the K into the data structure
    Insert(K),
    /// Remove the K from the data structure
    Remove(K),
    /// Count the keys below K
    Rank(K),
    /// Count the keys between the two Ks, inclusive
    Range(K, K),
    /// List the keys between the two Ks, inclusive
    Keys(K, K),
    /// Compare iterators
    Iter,
}

impl<K> Arbitrary for Op<K>
where
    K: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation. Inserts are weighted up so trees
    /// grow tall enough to need rotations.
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 0, 1, 1, 2, 3, 4, 5]).unwrap() {
            0 => Op::Insert(K::arbitrary(g)),
            1 => Op::Remove(K::arbitrary(g)),
            2 => Op::Rank(K::arbitrary(g)),
            3 => Op::Range(K::arbitrary(g), K::arbitrary(g)),
            4 => Op::Keys(K::arbitrary(g), K::arbitrary(g)),
            5 => Op::Iter,
            _ => unreachable!(),
        }
    }
}
