use ::quickcheck::{Arbitrary, Gen};
use super::{Key, Tree};

impl Arbitrary for Tree {
    fn arbitrary(gen: &mut Gen) -> Self { Vec::<Key>::arbitrary(gen).into_iter().collect() }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let vec: Vec<Key> = self.iter().collect();
        Box::new(vec.shrink().map(|vec| vec.into_iter().collect()))
    }
}
