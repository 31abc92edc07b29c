//! This module defines the unit types used by the attractiveness model and their conversions.
use serde::{Deserialize, Serialize};

macro_rules! unit_struct {
    ($name:ident) => {
        /// Represents a type of quantity.
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            PartialOrd,
            Default,
            Serialize,
            Deserialize,
            derive_more::Add,
            derive_more::Sub,
        )]
        pub struct $name(pub f64);

        impl $name {
            /// Creates a new instance of the unit type from a f64 value.
            pub fn new(val: f64) -> Self {
                Self(val)
            }

            /// Returns the value of the unit type as a f64.
            pub fn value(self) -> f64 {
                self.0
            }

            /// Whether the underlying value is neither infinite nor NaN
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }

            /// Returns the larger of two quantities
            pub fn max(self, other: Self) -> Self {
                Self(self.0.max(other.0))
            }
        }

        impl std::ops::Mul<f64> for $name {
            type Output = $name;
            fn mul(self, rhs: f64) -> $name {
                $name(self.0 * rhs)
            }
        }
    };
}

macro_rules! impl_div {
    ($Lhs:ty, $Rhs:ty, $Out:ty) => {
        impl std::ops::Div<$Rhs> for $Lhs {
            type Output = $Out;
            fn div(self, rhs: $Rhs) -> $Out {
                <$Out>::new(self.0 / rhs.0)
            }
        }
    };
}

// Base quantities
unit_struct!(Energy);
unit_struct!(Minutes);
unit_struct!(Hours);

// Derived quantities
unit_struct!(Power);

// Division rules
impl_div!(Energy, Power, Hours);
impl_div!(Energy, Hours, Power);

const MINUTES_PER_HOUR: f64 = 60.0;

impl From<Hours> for Minutes {
    fn from(val: Hours) -> Self {
        Minutes(val.0 * MINUTES_PER_HOUR)
    }
}

impl From<Minutes> for Hours {
    fn from(val: Minutes) -> Self {
        Hours(val.0 / MINUTES_PER_HOUR)
    }
}
