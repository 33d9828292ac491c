//! Fixed-size bitsets over closed enums.
//!
//! Note sets, option flags, experimental features and debug flags are all
//! small closed enumerations. [`EnumSet`] stores membership for any of them in
//! two machine words, so copying a set is as cheap as copying a pair of `u64`.

use std::{
    fmt,
    hash::{Hash, Hasher},
    iter::FromIterator,
    marker::PhantomData,
    ops::{BitAnd, BitOr, Sub},
};

use serde::{Serialize, Serializer, ser::SerializeSeq};

const WORD_BITS: usize = 64;
const WORDS: usize = 2;

/// An enum whose variants can be stored in an [`EnumSet`].
pub trait SetElement: Copy + 'static {
    const COUNT: usize;

    fn index(self) -> usize;

    fn from_index(index: usize) -> Option<Self>;
}

/// Declares a closed enum together with its `ALL` table and [`SetElement`] impl.
///
/// Variants are numbered in declaration order, which is also the order of `ALL`.
macro_rules! set_element_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }

        impl $crate::enum_set::SetElement for $name {
            const COUNT: usize = $name::ALL.len();

            fn index(self) -> usize {
                self as usize
            }

            fn from_index(index: usize) -> Option<Self> {
                Self::ALL.get(index).copied()
            }
        }
    };
}

pub(crate) use set_element_enum;

pub struct EnumSet<T> {
    words: [u64; WORDS],
    marker: PhantomData<fn() -> T>,
}

impl<T: SetElement> EnumSet<T> {
    pub const fn empty() -> Self {
        const { assert!(T::COUNT <= WORDS * WORD_BITS) };
        Self {
            words: [0; WORDS],
            marker: PhantomData,
        }
    }

    pub fn full() -> Self {
        (0..T::COUNT).filter_map(T::from_index).collect()
    }

    pub fn from_slice(items: &[T]) -> Self {
        items.iter().copied().collect()
    }

    pub fn contains(&self, item: T) -> bool {
        let (word, bit) = slot(item);
        self.words[word] & bit != 0
    }

    /// Adds `item`, returning `true` if it was not present before.
    pub fn insert(&mut self, item: T) -> bool {
        let (word, bit) = slot(item);
        let fresh = self.words[word] & bit == 0;
        self.words[word] |= bit;
        fresh
    }

    /// Removes `item`, returning `true` if it was present.
    pub fn remove(&mut self, item: T) -> bool {
        let (word, bit) = slot(item);
        let present = self.words[word] & bit != 0;
        self.words[word] &= !bit;
        present
    }

    pub fn set(&mut self, item: T, enabled: bool) {
        if enabled {
            self.insert(item);
        } else {
            self.remove(item);
        }
    }

    pub fn union(self, other: Self) -> Self {
        self.zip(other, |a, b| a | b)
    }

    pub fn intersection(self, other: Self) -> Self {
        self.zip(other, |a, b| a & b)
    }

    pub fn difference(self, other: Self) -> Self {
        self.zip(other, |a, b| a & !b)
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .all(|(a, b)| a & !b == 0)
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|word| *word == 0)
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..T::COUNT)
            .filter_map(T::from_index)
            .filter(|item| self.contains(*item))
    }

    fn zip(self, other: Self, op: impl Fn(u64, u64) -> u64) -> Self {
        let mut words = [0; WORDS];
        for (i, word) in words.iter_mut().enumerate() {
            *word = op(self.words[i], other.words[i]);
        }
        Self {
            words,
            marker: PhantomData,
        }
    }
}

fn slot<T: SetElement>(item: T) -> (usize, u64) {
    let index = item.index();
    (index / WORD_BITS, 1u64 << (index % WORD_BITS))
}

impl<T> Clone for EnumSet<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EnumSet<T> {}

impl<T> PartialEq for EnumSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.words == other.words
    }
}

impl<T> Eq for EnumSet<T> {}

impl<T> Hash for EnumSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.words.hash(state);
    }
}

impl<T: SetElement> Default for EnumSet<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: SetElement + fmt::Debug> fmt::Debug for EnumSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: SetElement> FromIterator<T> for EnumSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::empty();
        for item in iter {
            set.insert(item);
        }
        set
    }
}

impl<T: SetElement> Extend<T> for EnumSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: SetElement> BitOr for EnumSet<T> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl<T: SetElement> BitAnd for EnumSet<T> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl<T: SetElement> Sub for EnumSet<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.difference(rhs)
    }
}

impl<T: SetElement + Serialize> Serialize for EnumSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self.iter() {
            seq.serialize_element(&item)?;
        }
        seq.end()
    }
}
