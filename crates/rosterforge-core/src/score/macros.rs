//! Arithmetic and serde boilerplate shared by the field-based scores.

/// Generates `PartialOrd`, `Add`, `Sub` and `Neg`, level by level.
///
/// ```ignore
/// impl_score_ops!(HardMediumSoftScore { hard, medium, soft } => of);
/// ```
macro_rules! impl_score_ops {
    ($type:ident { $($field:ident),+ } => $ctor:ident) => {
        impl PartialOrd for $type {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl std::ops::Add for $type {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                $type::$ctor($(self.$field + rhs.$field),+)
            }
        }

        impl std::ops::Sub for $type {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self {
                $type::$ctor($(self.$field - rhs.$field),+)
            }
        }

        impl std::ops::Neg for $type {
            type Output = Self;

            fn neg(self) -> Self {
                $type::$ctor($(-self.$field),+)
            }
        }

        impl std::iter::Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold($type::ZERO, |total, s| total + s)
            }
        }
    };
}

/// With the `serde` feature, a score travels as its `Display` string and is
/// read back through `FromStr`, e.g. `"0hard/-1medium/-20soft"`.
macro_rules! impl_score_serde {
    ($type:ident) => {
        #[cfg(feature = "serde")]
        impl serde::Serialize for $type {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $type {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let repr = <String as serde::Deserialize>::deserialize(deserializer)?;
                repr.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}
