use ::ordered_iter::OrderedSetIterator;
use super::Iter;

impl<'a> OrderedSetIterator for Iter<'a> {}
