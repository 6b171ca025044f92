/*
 * Copyright (c) 2022 Kamil Konior. All rights reserved.
*/

use std::borrow::Cow;

use crate::est::collections::ring_buffer::RingBuffer;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EstimatorError {
    #[error("NotConfigured: {0}")]
    NotConfigured(Cow<'static, str>),
    #[error("NotReady: not enough history accumulated")]
    NotReady,
    #[error("InvalidArgument: {0}")]
    InvalidArgument(Cow<'static, str>),
}

#[derive(thiserror::Error, Debug)]
pub enum DefinitionError {
    #[error("Unrecognized estimator kind('{0}')")]
    UnrecognizedKind(String),
    #[error("Unrecognized selector('{unrecognized}') for component('{component}')")]
    UnrecognizedSelector {
        unrecognized: String,
        component: &'static str,
    },
    #[error("Unrecognized selector ordinal('{unrecognized}') for component('{component}')")]
    UnrecognizedSelectorOrdinal {
        unrecognized: usize,
        component: &'static str,
    },
    #[error("Component('{component}') expects {expected} argument(s), got {actual}")]
    WrongArity {
        component: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("Invalid parameter('{parameter}') for component('{component}')")]
    InvalidParameter {
        parameter: String,
        component: &'static str,
    },
    #[error("Malformed definition('{0}')")]
    Malformed(String),
}

pub(crate) fn check_period(period: usize, component: &'static str) -> Result<(), EstimatorError> {
    if period == 0 {
        Err(EstimatorError::NotConfigured(
            format!("{component} requires a positive period").into(),
        ))
    } else if RingBuffer::<f64>::storage_len(period).is_none() {
        Err(EstimatorError::NotConfigured(
            format!("{component} period({period}) exceeds addressable window").into(),
        ))
    } else {
        Ok(())
    }
}

///
/// A delay of `delay` keeps `delay + 1` values
///
pub(crate) fn check_delay(delay: usize, component: &'static str) -> Result<(), EstimatorError> {
    match delay.checked_add(1) {
        Some(window) if RingBuffer::<f64>::storage_len(window).is_some() => Ok(()),
        _ => Err(EstimatorError::NotConfigured(
            format!("{component} delay({delay}) exceeds addressable window").into(),
        )),
    }
}
