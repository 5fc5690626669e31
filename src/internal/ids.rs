macro_rules! impl_id {
    ($name:ident, $tp:ty) => {
        /// The ID type $name.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(transparent)
        )]
        pub struct $name($tp);

        impl $name {
            /// Create a new id.
            #[inline]
            pub const fn new(index: $tp) -> Self {
                $name(index)
            }

            /// Get the id as usize.
            #[inline]
            pub fn as_usize(&self) -> usize {
                self.0 as usize
            }

            /// Get the id as $tp.
            #[inline]
            pub fn id(&self) -> $tp {
                self.0
            }
        }

        impl<T> std::ops::Index<$name> for [T] {
            type Output = T;

            #[inline]
            fn index(&self, index: $name) -> &Self::Output {
                &self[index.0 as usize]
            }
        }

        impl<T> std::ops::IndexMut<$name> for [T] {
            #[inline]
            fn index_mut(&mut self, index: $name) -> &mut T {
                &mut self[index.0 as usize]
            }
        }

        impl<T> std::ops::Index<$name> for Vec<T> {
            type Output = T;

            #[inline]
            fn index(&self, index: $name) -> &Self::Output {
                &self[index.0 as usize]
            }
        }

        impl<T> std::ops::IndexMut<$name> for Vec<T> {
            #[inline]
            fn index_mut(&mut self, index: $name) -> &mut T {
                &mut self[index.0 as usize]
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$tp> for $name {
            fn from(index: $tp) -> Self {
                $name::new(index)
            }
        }
    };
}

/// The ID type for automaton states. It is unique within one automaton and never reused after a
/// state has been removed.
pub type StateIDBase = u32;
impl_id!(StateID, StateIDBase);

/// The ID type for the groups of a partition tree. This is the index of the group in the arena of
/// the tree.
pub type GroupIDBase = u32;
impl_id!(GroupID, GroupIDBase);
