/*
 * Copyright (c) 2022 Kamil Konior. All rights reserved.
*/

pub trait OrderingOperator {
    fn compare<T: PartialOrd>(left: &T, right: &T) -> bool;
}

pub struct Greater;

impl OrderingOperator for Greater {
    fn compare<T: PartialOrd>(left: &T, right: &T) -> bool {
        left > right
    }
}

pub struct Lower;

impl OrderingOperator for Lower {
    fn compare<T: PartialOrd>(left: &T, right: &T) -> bool {
        left < right
    }
}

pub struct GreaterOrEqual;

impl OrderingOperator for GreaterOrEqual {
    fn compare<T: PartialOrd>(left: &T, right: &T) -> bool {
        left >= right
    }
}

pub struct LowerOrEqual;

impl OrderingOperator for LowerOrEqual {
    fn compare<T: PartialOrd>(left: &T, right: &T) -> bool {
        left <= right
    }
}

///
/// Picks `left` unless `right` wins under the ordering
///
pub fn select<O: OrderingOperator, T: PartialOrd>(left: T, right: T) -> T {
    if O::compare(&right, &left) {
        right
    } else {
        left
    }
}
