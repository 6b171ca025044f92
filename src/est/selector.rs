/*
 * Copyright (c) 2022 Kamil Konior. All rights reserved.
*/

use std::str::FromStr;

///
/// Names one output lane of a multi output estimator, either by its textual name or by ordinal
///
pub trait Selector: FromStr<Err = anyhow::Error> + Sized {
    fn from_ordinal(ordinal: usize) -> Result<Self, anyhow::Error>;

    fn ordinal(&self) -> usize;
}

macro_rules! output_selector {
    ($selector:ident, $component:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        #[derive(Debug, Copy, Clone, PartialEq, Eq)]
        pub enum $selector {
            $($variant),+
        }

        impl std::str::FromStr for $selector {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok($selector::$variant),)+
                    _ => Err($crate::est::error::DefinitionError::UnrecognizedSelector {
                        component: $component,
                        unrecognized: String::from(s),
                    }
                    .into()),
                }
            }
        }

        impl $crate::est::selector::Selector for $selector {
            fn from_ordinal(ordinal: usize) -> Result<Self, anyhow::Error> {
                const LANES: &[$selector] = &[$($selector::$variant),+];

                LANES.get(ordinal).copied().ok_or_else(|| {
                    $crate::est::error::DefinitionError::UnrecognizedSelectorOrdinal {
                        component: $component,
                        unrecognized: ordinal,
                    }
                    .into()
                })
            }

            fn ordinal(&self) -> usize {
                *self as usize
            }
        }
    };
}

pub(crate) use output_selector;
