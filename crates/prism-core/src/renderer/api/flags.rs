// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A small declarative macro for the bitmask types of the renderer API.

/// Declares a `Copy` bitmask newtype with named constants and `|` support.
macro_rules! prism_flags {
    (
        $(#[$outer:meta])*
        pub struct $name:ident: $repr:ty {
            $(
                $(#[$inner:meta])*
                const $flag:ident = $value:expr;
            )+
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name($repr);

        impl $name {
            $(
                $(#[$inner])*
                pub const $flag: Self = Self($value);
            )+

            /// The empty set of flags.
            pub const fn empty() -> Self {
                Self(0)
            }

            /// Returns the raw bits.
            pub const fn bits(&self) -> $repr {
                self.0
            }

            /// Returns `true` if every flag in `other` is also set in `self`.
            pub const fn contains(&self, other: Self) -> bool {
                (self.0 & other.0) == other.0
            }
        }

        impl std::ops::BitOr for $name {
            type Output = Self;
            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl std::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }
    };
}
